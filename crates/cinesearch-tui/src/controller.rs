//! Search / pagination / detail controller.
//!
//! Operations update the UI state synchronously and spawn their network call
//! onto the Tokio runtime. Completed calls come back as [`Outcome`] values on
//! the [`OutcomeReceiver`] and are committed with [`Controller::apply`].
//!
//! Every request is tagged with a sequence number. Only the most recently
//! issued search and the most recently issued detail lookup may commit, so
//! the state always reflects the latest request rather than the latest
//! response. Closing the detail view retires the in-flight lookup.

use std::sync::Arc;

use anyhow::Result;
use cinesearch_api::omdb::{
    DetailParams, DetailRecord, OmdbApi, OmdbDetailResponse, OmdbSearchResponse,
    ProviderRejection, ResultItem, ResultPage, SearchParams,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Shown when a search is rejected without a provider message.
pub const SEARCH_FALLBACK_MESSAGE: &str = "No results found.";

/// Shown when a title lookup is rejected without a provider message.
pub const DETAIL_FALLBACK_MESSAGE: &str = "Unable to load title details.";

/// Shown for network and decoding failures.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to reach the movie database. Please try again.";

/// Receiving half for completed requests.
pub type OutcomeReceiver = UnboundedReceiver<Outcome>;

/// Everything the browser renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Query that produced the current result collection.
    pub query: String,
    /// Accumulated items across all loaded pages.
    pub results: Vec<ResultItem>,
    /// Last page loaded (0 before any page).
    pub page: u32,
    /// Total matches reported by the provider.
    pub total_results: u32,
    /// A list request is in flight.
    pub loading_list: bool,
    /// A detail lookup is in flight.
    pub loading_detail: bool,
    /// Most recent user-facing error.
    pub error: Option<String>,
    /// Currently displayed detail record.
    pub selection: Option<DetailRecord>,
}

/// Detail modal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// No modal.
    Closed,
    /// Lookup in flight.
    Loading,
    /// Record displayed.
    Shown,
}

/// Why a request produced no data.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FetchFailure {
    /// The provider answered with `"Response": "False"`.
    Rejected(ProviderRejection),
    /// Network, HTTP status or decoding failure.
    Transport,
}

impl FetchFailure {
    /// Returns the user-facing message.
    fn message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected(rejection) => String::from(rejection.message().unwrap_or(fallback)),
            Self::Transport => String::from(TRANSPORT_FAILURE_MESSAGE),
        }
    }
}

#[derive(Debug)]
enum OutcomeKind {
    Search {
        seq: u64,
        query: String,
        append: bool,
        result: Result<ResultPage, FetchFailure>,
    },
    Details {
        seq: u64,
        result: Result<DetailRecord, FetchFailure>,
    },
}

/// A completed request waiting to be applied.
#[derive(Debug)]
pub struct Outcome(OutcomeKind);

/// Resolves a search reply, logging transport failures.
fn resolve_search(
    reply: Result<OmdbSearchResponse>,
    query: &str,
    page: u32,
) -> Result<ResultPage, FetchFailure> {
    match reply {
        Ok(response) => response.into_page(page).map_err(FetchFailure::Rejected),
        Err(err) => {
            tracing::warn!(query, page, error = %format!("{err:#}"), "search request failed");
            Err(FetchFailure::Transport)
        }
    }
}

/// Resolves a title lookup reply, logging transport failures.
fn resolve_details(
    reply: Result<OmdbDetailResponse>,
    id: &str,
) -> Result<DetailRecord, FetchFailure> {
    match reply {
        Ok(response) => response.into_record(id).map_err(FetchFailure::Rejected),
        Err(err) => {
            tracing::warn!(id, error = %format!("{err:#}"), "title lookup failed");
            Err(FetchFailure::Transport)
        }
    }
}

/// Owns the UI state and mediates every call to the movie database.
#[derive(Debug)]
pub struct Controller<A> {
    api: Arc<A>,
    state: UiState,
    outcomes: UnboundedSender<Outcome>,
    search_seq: u64,
    detail_seq: u64,
}

impl<A> Controller<A>
where
    A: OmdbApi + Sync + 'static,
{
    /// Creates a controller and the receiver its requests complete on.
    pub fn new(api: A) -> (Self, OutcomeReceiver) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            api: Arc::new(api),
            state: UiState::default(),
            outcomes,
            search_seq: 0,
            detail_seq: 0,
        };
        (controller, receiver)
    }

    /// Returns the current UI state.
    #[must_use]
    pub const fn state(&self) -> &UiState {
        &self.state
    }

    /// Returns whether another page can be requested.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        !self.state.results.is_empty()
            && u32::try_from(self.state.results.len())
                .is_ok_and(|count| count < self.state.total_results)
    }

    /// Returns the detail modal state.
    #[must_use]
    pub const fn modal_state(&self) -> ModalState {
        if self.state.loading_detail {
            ModalState::Loading
        } else if self.state.selection.is_some() {
            ModalState::Shown
        } else {
            ModalState::Closed
        }
    }

    /// Issues a search for `query` at `page`.
    ///
    /// A blank query is ignored. With `append` the fetched page is added to
    /// the current collection, otherwise it replaces it. Returns whether a
    /// request was issued. Must be called from within a Tokio runtime.
    pub fn search(&mut self, query: &str, page: u32, append: bool) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        let page = page.max(1);

        self.state.loading_list = true;
        self.state.error = None;
        self.search_seq = self.search_seq.wrapping_add(1);
        let seq = self.search_seq;
        tracing::debug!(seq, query, page, append, "issuing search");

        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();
        let query = String::from(query);
        tokio::spawn(async move {
            let params = SearchParams::new(query.as_str()).page(page);
            let reply = api.search(&params).await;
            let result = resolve_search(reply, &query, page);
            // The receiver is gone once the browser has shut down.
            let _ = outcomes.send(Outcome(OutcomeKind::Search {
                seq,
                query,
                append,
                result,
            }));
        });
        true
    }

    /// Requests the page after the last loaded one and appends it.
    ///
    /// Ignored when everything is loaded or a list request is in flight.
    pub fn load_more(&mut self) -> bool {
        if !self.can_load_more() || self.state.loading_list {
            return false;
        }
        let next_page = self.state.page.saturating_add(1);
        let query = self.state.query.clone();
        self.search(&query, next_page, true)
    }

    /// Looks up the full record for `id` and opens the detail modal.
    ///
    /// An empty identifier is ignored. Returns whether a request was issued.
    /// Must be called from within a Tokio runtime.
    pub fn load_details(&mut self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() {
            return false;
        }

        self.state.loading_detail = true;
        self.state.error = None;
        self.state.selection = None;
        self.detail_seq = self.detail_seq.wrapping_add(1);
        let seq = self.detail_seq;
        tracing::debug!(seq, id, "issuing title lookup");

        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();
        let id = String::from(id);
        tokio::spawn(async move {
            let params = DetailParams::new(id.as_str());
            let reply = api.details(&params).await;
            let result = resolve_details(reply, &id);
            let _ = outcomes.send(Outcome(OutcomeKind::Details { seq, result }));
        });
        true
    }

    /// Closes the detail modal and retires any in-flight lookup.
    pub fn close_details(&mut self) {
        self.state.selection = None;
        self.state.loading_detail = false;
        self.detail_seq = self.detail_seq.wrapping_add(1);
    }

    /// Commits a completed request. Returns `false` if it was superseded.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome.0 {
            OutcomeKind::Search {
                seq,
                query,
                append,
                result,
            } => {
                if seq != self.search_seq {
                    tracing::debug!(seq, latest = self.search_seq, "dropping stale search");
                    return false;
                }
                self.state.loading_list = false;
                match result {
                    Ok(page) => {
                        tracing::debug!(
                            page = page.page,
                            items = page.items.len(),
                            total = page.total_results,
                            "search page loaded"
                        );
                        if append {
                            self.state.results.extend(page.items);
                        } else {
                            self.state.results = page.items;
                        }
                        self.state.total_results = page.total_results;
                        self.state.page = page.page;
                        self.state.query = query;
                    }
                    Err(failure) => {
                        self.state.error = Some(failure.message(SEARCH_FALLBACK_MESSAGE));
                        self.state.results.clear();
                        self.state.total_results = 0;
                        self.state.page = 0;
                        self.state.query = query;
                    }
                }
                true
            }
            OutcomeKind::Details { seq, result } => {
                if seq != self.detail_seq {
                    tracing::debug!(seq, latest = self.detail_seq, "dropping stale title lookup");
                    return false;
                }
                self.state.loading_detail = false;
                match result {
                    Ok(record) => self.state.selection = Some(record),
                    Err(failure) => {
                        self.state.error = Some(failure.message(DETAIL_FALLBACK_MESSAGE));
                        self.state.selection = None;
                    }
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]

    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;
    use cinesearch_api::omdb::{MediaKind, OmdbClient, OmdbSearchItem};
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    /// Serves canned replies; unknown requests fail at the transport level.
    #[derive(Debug, Default)]
    struct ScriptedApi {
        searches: HashMap<(String, u32), OmdbSearchResponse>,
        details: HashMap<String, OmdbDetailResponse>,
        calls: Arc<AtomicUsize>,
    }

    impl OmdbApi for ScriptedApi {
        async fn search(&self, params: &SearchParams) -> Result<OmdbSearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.searches.get(&(params.query.clone(), params.page)) {
                Some(response) => Ok(response.clone()),
                None => bail!("connection refused"),
            }
        }

        async fn details(&self, params: &DetailParams) -> Result<OmdbDetailResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.details.get(&params.id) {
                Some(response) => Ok(response.clone()),
                None => bail!("connection refused"),
            }
        }
    }

    fn not_found() -> OmdbSearchResponse {
        serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap()
    }

    /// Builds a catalog of `total` titles for `query`, `per_page` per page.
    fn catalog(api: &mut ScriptedApi, query: &str, total: u32, per_page: u32) {
        let pages = total.div_ceil(per_page);
        for page in 1..=pages {
            let first = (page - 1) * per_page;
            let last = (first + per_page).min(total);
            let search = (first..last)
                .map(|n| OmdbSearchItem {
                    title: format!("{query} {n}"),
                    year: String::from("2005"),
                    imdb_id: format!("tt{:07}", n + 1),
                    kind: MediaKind::Movie,
                    poster: Some(String::from("N/A")),
                })
                .collect();
            api.searches.insert(
                (String::from(query), page),
                OmdbSearchResponse {
                    search,
                    total_results: Some(total.to_string()),
                    response: true,
                    error: None,
                },
            );
        }
    }

    fn with_shawshank(api: &mut ScriptedApi) {
        let json = include_str!("../../../fixtures/omdb/details_tt0111161.json");
        api.details
            .insert(String::from("tt0111161"), serde_json::from_str(json).unwrap());
        let json = include_str!("../../../fixtures/omdb/details_invalid_id.json");
        api.details
            .insert(String::from("badid"), serde_json::from_str(json).unwrap());
    }

    async fn settle(controller: &mut Controller<ScriptedApi>, rx: &mut OutcomeReceiver) -> bool {
        let outcome = rx.recv().await.unwrap();
        controller.apply(outcome)
    }

    #[tokio::test]
    async fn test_search_replaces_results() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        let (mut controller, mut rx) = Controller::new(api);

        // Act
        assert!(controller.search("batman", 1, false));
        assert!(controller.state().loading_list);
        assert!(settle(&mut controller, &mut rx).await);

        // Assert
        let state = controller.state();
        assert_eq!(state.results.len(), 10);
        assert_eq!(state.page, 1);
        assert_eq!(state.total_results, 50);
        assert_eq!(state.query, "batman");
        assert!(!state.loading_list);
        assert!(state.error.is_none());
        assert!(controller.can_load_more());
    }

    #[tokio::test]
    async fn test_fresh_search_discards_previous_collection() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        catalog(&mut api, "alien", 3, 10);
        let (mut controller, mut rx) = Controller::new(api);
        controller.search("batman", 1, false);
        settle(&mut controller, &mut rx).await;

        // Act
        controller.search("alien", 1, false);
        settle(&mut controller, &mut rx).await;

        // Assert
        let state = controller.state();
        assert_eq!(state.results.len(), 3);
        assert!(state.results.iter().all(|item| item.title.starts_with("alien")));
        assert!(!controller.can_load_more());
    }

    #[tokio::test]
    async fn test_blank_query_is_noop() {
        // Arrange
        let api = ScriptedApi::default();
        let calls = Arc::clone(&api.calls);
        let (mut controller, mut rx) = Controller::new(api);
        let before = controller.state().clone();

        // Act
        let issued = controller.search("   \t ", 1, false) || controller.search("", 1, false);

        // Assert
        assert!(!issued);
        assert_eq!(controller.state(), &before);
        assert!(rx.try_recv().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load_more_until_exhausted() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        let (mut controller, mut rx) = Controller::new(api);
        controller.search("batman", 1, false);
        settle(&mut controller, &mut rx).await;

        // Act
        for expected in [20, 30, 40, 50] {
            assert!(controller.load_more());
            settle(&mut controller, &mut rx).await;
            assert_eq!(controller.state().results.len(), expected);
        }

        // Assert
        assert!(!controller.can_load_more());
        assert!(!controller.load_more());
        assert!(rx.try_recv().is_err());

        let state = controller.state();
        assert_eq!(state.page, 5);
        let ids: Vec<&str> = state.results.iter().map(|item| item.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 50);
        assert_eq!(ids[0], "tt0000001");
        assert_eq!(ids[49], "tt0000050");
    }

    #[tokio::test]
    async fn test_load_more_without_results_is_noop() {
        // Arrange
        let (mut controller, mut rx) = Controller::new(ScriptedApi::default());

        // Act & Assert
        assert!(!controller.load_more());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_load_more_while_loading_is_noop() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        let (mut controller, mut rx) = Controller::new(api);
        controller.search("batman", 1, false);
        settle(&mut controller, &mut rx).await;

        // Act
        assert!(controller.load_more());
        let second = controller.load_more();
        settle(&mut controller, &mut rx).await;

        // Assert
        assert!(!second);
        assert_eq!(controller.state().results.len(), 20);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_search_shows_provider_message() {
        // Arrange
        let mut api = ScriptedApi::default();
        api.searches
            .insert((String::from("xyzzynotamovie"), 1), not_found());
        let (mut controller, mut rx) = Controller::new(api);

        // Act
        controller.search("xyzzynotamovie", 1, false);
        settle(&mut controller, &mut rx).await;

        // Assert
        let state = controller.state();
        assert_eq!(state.error.as_deref(), Some("Movie not found!"));
        assert!(state.results.is_empty());
        assert_eq!(state.total_results, 0);
        assert!(!state.loading_list);
        assert!(!controller.can_load_more());
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        // Arrange
        let mut api = ScriptedApi::default();
        api.searches.insert(
            (String::from("quiet"), 1),
            serde_json::from_str(r#"{"Response":"False"}"#).unwrap(),
        );
        let (mut controller, mut rx) = Controller::new(api);

        // Act
        controller.search("quiet", 1, false);
        settle(&mut controller, &mut rx).await;

        // Assert
        assert_eq!(
            controller.state().error.as_deref(),
            Some(SEARCH_FALLBACK_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_failed_appended_page_resets_collection() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        api.searches.insert((String::from("batman"), 2), not_found());
        let (mut controller, mut rx) = Controller::new(api);
        controller.search("batman", 1, false);
        settle(&mut controller, &mut rx).await;

        // Act
        controller.load_more();
        settle(&mut controller, &mut rx).await;

        // Assert
        let state = controller.state();
        assert!(state.results.is_empty());
        assert_eq!(state.total_results, 0);
        assert_eq!(state.error.as_deref(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_message() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        let (mut controller, mut rx) = Controller::new(api);
        controller.search("batman", 1, false);
        settle(&mut controller, &mut rx).await;

        // Act: no script for this query, the mock fails the request
        controller.search("offline", 1, false);
        settle(&mut controller, &mut rx).await;

        // Assert
        let state = controller.state();
        assert_eq!(state.error.as_deref(), Some(TRANSPORT_FAILURE_MESSAGE));
        assert!(state.results.is_empty());
        assert_eq!(state.total_results, 0);
        assert!(!state.loading_list);
    }

    #[tokio::test]
    async fn test_invalid_key_shows_provider_message() {
        // Arrange: OMDb answers a bad key with 401 and its rejection envelope
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(401)
                    .set_body_string(r#"{"Response":"False","Error":"Invalid API key!"}"#),
            )
            .mount(&mock_server)
            .await;
        let client = OmdbClient::builder()
            .base_url(format!("{}/", mock_server.uri()).parse().unwrap())
            .api_key("invalid-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();
        let (mut controller, mut rx) = Controller::new(client);

        // Act
        controller.search("batman", 1, false);
        let outcome = rx.recv().await.unwrap();
        controller.apply(outcome);

        // Assert
        let state = controller.state();
        assert_eq!(state.error.as_deref(), Some("Invalid API key!"));
        assert!(state.results.is_empty());
        assert!(!state.loading_list);
    }

    #[tokio::test]
    async fn test_new_search_clears_previous_error() {
        // Arrange
        let mut api = ScriptedApi::default();
        api.searches
            .insert((String::from("xyzzynotamovie"), 1), not_found());
        catalog(&mut api, "batman", 50, 10);
        let (mut controller, mut rx) = Controller::new(api);
        controller.search("xyzzynotamovie", 1, false);
        settle(&mut controller, &mut rx).await;

        // Act
        controller.search("batman", 1, false);

        // Assert: cleared as soon as the request is issued
        assert!(controller.state().error.is_none());
        settle(&mut controller, &mut rx).await;
        assert!(controller.state().error.is_none());
        assert_eq!(controller.state().results.len(), 10);
    }

    #[tokio::test]
    async fn test_latest_issued_search_wins_when_resolved_in_order() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        catalog(&mut api, "superman", 7, 10);
        let (mut controller, mut rx) = Controller::new(api);

        // Act
        controller.search("batman", 1, false);
        controller.search("superman", 1, false);
        let mut outcomes = vec![rx.recv().await.unwrap(), rx.recv().await.unwrap()];
        outcomes.sort_by_key(|outcome| match outcome.0 {
            OutcomeKind::Search { seq, .. } | OutcomeKind::Details { seq, .. } => seq,
        });
        let newer = outcomes.pop().unwrap();
        let older = outcomes.pop().unwrap();
        let older_applied = controller.apply(older);
        let still_loading = controller.state().loading_list;
        let newer_applied = controller.apply(newer);

        // Assert
        assert!(!older_applied);
        assert!(still_loading);
        assert!(newer_applied);
        assert_eq!(controller.state().query, "superman");
        assert_eq!(controller.state().results.len(), 7);
        assert!(!controller.state().loading_list);
    }

    #[tokio::test]
    async fn test_latest_issued_search_wins_when_resolved_out_of_order() {
        // Arrange
        let mut api = ScriptedApi::default();
        catalog(&mut api, "batman", 50, 10);
        catalog(&mut api, "superman", 7, 10);
        let (mut controller, mut rx) = Controller::new(api);

        // Act: the older response arrives last
        controller.search("batman", 1, false);
        controller.search("superman", 1, false);
        let mut outcomes = vec![rx.recv().await.unwrap(), rx.recv().await.unwrap()];
        outcomes.sort_by_key(|outcome| match outcome.0 {
            OutcomeKind::Search { seq, .. } | OutcomeKind::Details { seq, .. } => seq,
        });
        let newer = outcomes.pop().unwrap();
        let older = outcomes.pop().unwrap();
        controller.apply(newer);
        let older_applied = controller.apply(older);

        // Assert
        assert!(!older_applied);
        assert_eq!(controller.state().query, "superman");
        assert_eq!(controller.state().results.len(), 7);
    }

    #[tokio::test]
    async fn test_load_details_then_close() {
        // Arrange
        let mut api = ScriptedApi::default();
        with_shawshank(&mut api);
        let (mut controller, mut rx) = Controller::new(api);

        // Act
        assert!(controller.load_details("tt0111161"));
        assert_eq!(controller.modal_state(), ModalState::Loading);
        settle(&mut controller, &mut rx).await;

        // Assert
        assert_eq!(controller.modal_state(), ModalState::Shown);
        let record = controller.state().selection.as_ref().unwrap();
        assert_eq!(record.title, "The Shawshank Redemption");
        assert!(record.plot.is_some());
        assert_eq!(record.rating().as_deref(), Some("9.3/10"));

        // Act: Escape, background click and the close control all land here
        controller.close_details();

        // Assert
        assert!(controller.state().selection.is_none());
        assert_eq!(controller.modal_state(), ModalState::Closed);
    }

    #[tokio::test]
    async fn test_close_details_is_idempotent() {
        // Arrange
        let (mut controller, _rx) = Controller::new(ScriptedApi::default());

        // Act
        controller.close_details();
        controller.close_details();

        // Assert
        assert!(controller.state().selection.is_none());
        assert_eq!(controller.modal_state(), ModalState::Closed);
    }

    #[tokio::test]
    async fn test_failed_details_never_opens_modal() {
        // Arrange
        let mut api = ScriptedApi::default();
        with_shawshank(&mut api);
        let (mut controller, mut rx) = Controller::new(api);

        // Act
        controller.load_details("badid");
        settle(&mut controller, &mut rx).await;

        // Assert
        assert!(controller.state().selection.is_none());
        assert_eq!(
            controller.state().error.as_deref(),
            Some("Incorrect IMDb ID.")
        );
        assert!(!controller.state().loading_detail);
        assert_eq!(controller.modal_state(), ModalState::Closed);
    }

    #[tokio::test]
    async fn test_failed_details_transport_uses_generic_message() {
        // Arrange
        let (mut controller, mut rx) = Controller::new(ScriptedApi::default());

        // Act
        controller.load_details("tt0000404");
        settle(&mut controller, &mut rx).await;

        // Assert
        assert!(controller.state().selection.is_none());
        assert_eq!(
            controller.state().error.as_deref(),
            Some(TRANSPORT_FAILURE_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_late_detail_response_after_close_is_dropped() {
        // Arrange
        let mut api = ScriptedApi::default();
        with_shawshank(&mut api);
        let (mut controller, mut rx) = Controller::new(api);

        // Act
        controller.load_details("tt0111161");
        controller.close_details();
        let applied = settle(&mut controller, &mut rx).await;

        // Assert
        assert!(!applied);
        assert!(controller.state().selection.is_none());
        assert!(!controller.state().loading_detail);
        assert_eq!(controller.modal_state(), ModalState::Closed);
    }

    #[tokio::test]
    async fn test_new_selection_replaces_previous() {
        // Arrange
        let mut api = ScriptedApi::default();
        with_shawshank(&mut api);
        api.details.insert(
            String::from("tt0068646"),
            serde_json::from_str(
                r#"{"Title":"The Godfather","Year":"1972","imdbID":"tt0068646","Response":"True"}"#,
            )
            .unwrap(),
        );
        let (mut controller, mut rx) = Controller::new(api);
        controller.load_details("tt0111161");
        settle(&mut controller, &mut rx).await;
        controller.close_details();

        // Act
        controller.load_details("tt0068646");
        assert!(controller.state().selection.is_none());
        settle(&mut controller, &mut rx).await;

        // Assert: no fields carried over from the previous record
        let record = controller.state().selection.as_ref().unwrap();
        assert_eq!(record.title, "The Godfather");
        assert!(record.plot.is_none());
        assert!(record.cast.is_empty());
    }

    #[tokio::test]
    async fn test_empty_identifier_is_noop() {
        // Arrange
        let (mut controller, mut rx) = Controller::new(ScriptedApi::default());
        let before = controller.state().clone();

        // Act
        let issued = controller.load_details("");

        // Assert
        assert!(!issued);
        assert_eq!(controller.state(), &before);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_transport_failure_is_logged() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .run_with_handle();

        // Act
        let result = with_default(subscriber, || {
            resolve_search(Err(anyhow::anyhow!("connection reset")), "batman", 1)
        });

        // Assert
        assert_eq!(result, Err(FetchFailure::Transport));
        handle.assert_finished();
    }

    #[test]
    fn test_provider_rejection_is_not_logged_as_failure() {
        // Arrange
        let (subscriber, handle) = subscriber::mock().only().run_with_handle();

        // Act
        let result = with_default(subscriber, || resolve_search(Ok(not_found()), "xyzzy", 1));

        // Assert
        assert!(matches!(result, Err(FetchFailure::Rejected(_))));
        handle.assert_finished();
    }
}
