//! Validated records resolved from OMDb envelopes.

use super::types::{MediaKind, OmdbDetailResponse, OmdbSearchItem, OmdbSearchResponse};

/// Sentinel OMDb uses for "field not available".
pub const NOT_AVAILABLE: &str = "N/A";

/// Poster shown when a title has no usable poster.
pub const PLACEHOLDER_POSTER: &str = "https://placehold.co/300x450?text=No+Poster";

/// Public IMDb title page prefix.
const IMDB_TITLE_BASE_URL: &str = "https://www.imdb.com/title/";

/// Title used when a detail record carries none.
const UNTITLED: &str = "Untitled";

/// Resolves a poster reference to a displayable URL.
///
/// Returns the input for any non-empty value other than the exact sentinel
/// `"N/A"` (compared case-sensitively), otherwise [`PLACEHOLDER_POSTER`].
#[must_use]
pub fn resolve_poster(poster: Option<&str>) -> &str {
    match poster {
        Some(url) if !url.is_empty() && url != NOT_AVAILABLE => url,
        _ => PLACEHOLDER_POSTER,
    }
}

/// Builds the IMDb title page URL for an identifier.
#[must_use]
pub fn imdb_url(id: &str) -> String {
    format!("{IMDB_TITLE_BASE_URL}{id}/")
}

/// Drops the sentinel and blank values.
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let trimmed = v.trim();
        !trimmed.is_empty() && trimmed != NOT_AVAILABLE
    })
}

/// Splits a comma-separated field into trimmed entries.
fn split_list(value: Option<String>) -> Vec<String> {
    available(value)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// A failure the provider reported in-band (`"Response": "False"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRejection {
    message: Option<String>,
}

impl ProviderRejection {
    /// Creates a rejection, discarding blank messages.
    #[must_use]
    pub fn new(message: Option<String>) -> Self {
        Self {
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Returns the provider's message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl std::fmt::Display for ProviderRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "OMDb rejected the request: {message}"),
            None => write!(f, "OMDb rejected the request"),
        }
    }
}

impl std::error::Error for ProviderRejection {}

/// One title in a result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// IMDb identifier, unique per item.
    pub id: String,
    /// Title.
    pub title: String,
    /// Release year as reported.
    pub year: String,
    /// Title category.
    pub kind: MediaKind,
    /// Poster reference exactly as received (may be the sentinel).
    pub poster: Option<String>,
}

impl ResultItem {
    /// Returns the displayable poster URL.
    #[must_use]
    pub fn poster_url(&self) -> &str {
        resolve_poster(self.poster.as_deref())
    }
}

impl From<OmdbSearchItem> for ResultItem {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            kind: item.kind,
            poster: item.poster,
        }
    }
}

/// One fetched page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage {
    /// Page number that was fetched (starts at 1).
    pub page: u32,
    /// Total number of matches across all pages.
    pub total_results: u32,
    /// Items on this page, in provider order.
    pub items: Vec<ResultItem>,
}

impl OmdbSearchResponse {
    /// Resolves the envelope into the page that was fetched.
    ///
    /// An unparsable `totalResults` counts as zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderRejection`] when the response flag is false.
    pub fn into_page(self, page: u32) -> Result<ResultPage, ProviderRejection> {
        if !self.response {
            return Err(ProviderRejection::new(self.error));
        }
        let total_results = self
            .total_results
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(0);
        Ok(ResultPage {
            page,
            total_results,
            items: self.search.into_iter().map(ResultItem::from).collect(),
        })
    }
}

/// A source-specific rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    /// Rating source.
    pub source: String,
    /// Rating value.
    pub value: String,
}

/// Full record for one selected title.
///
/// Sentinel and blank fields are resolved to `None` / empty lists once,
/// when the record is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    /// IMDb identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Release year.
    pub year: Option<String>,
    /// Title category.
    pub kind: MediaKind,
    /// Content rating.
    pub rated: Option<String>,
    /// Release date.
    pub released: Option<String>,
    /// Runtime.
    pub runtime: Option<String>,
    /// Genres.
    pub genres: Vec<String>,
    /// Director(s).
    pub director: Option<String>,
    /// Writer(s).
    pub writer: Option<String>,
    /// Cast.
    pub cast: Vec<String>,
    /// Plot summary.
    pub plot: Option<String>,
    /// Spoken language(s).
    pub language: Option<String>,
    /// Production country.
    pub country: Option<String>,
    /// Awards line.
    pub awards: Option<String>,
    /// Poster reference exactly as received (may be the sentinel).
    pub poster: Option<String>,
    /// Ratings by source.
    pub ratings: Vec<Rating>,
    /// Metascore.
    pub metascore: Option<String>,
    /// IMDb rating.
    pub imdb_rating: Option<String>,
    /// IMDb vote count.
    pub imdb_votes: Option<String>,
    /// Box office gross.
    pub box_office: Option<String>,
}

impl DetailRecord {
    /// Returns the displayable poster URL.
    #[must_use]
    pub fn poster_url(&self) -> &str {
        resolve_poster(self.poster.as_deref())
    }

    /// Returns the headline rating (`"9.3/10"`), if the title has one.
    #[must_use]
    pub fn rating(&self) -> Option<String> {
        self.imdb_rating.as_ref().map(|r| format!("{r}/10"))
    }
}

impl OmdbDetailResponse {
    /// Resolves the envelope into a detail record.
    ///
    /// `requested_id` fills in the identifier when the body omits it.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderRejection`] when the response flag is false.
    pub fn into_record(self, requested_id: &str) -> Result<DetailRecord, ProviderRejection> {
        if !self.response {
            return Err(ProviderRejection::new(self.error));
        }
        Ok(DetailRecord {
            id: available(self.imdb_id).unwrap_or_else(|| String::from(requested_id)),
            title: available(self.title).unwrap_or_else(|| String::from(UNTITLED)),
            year: available(self.year),
            kind: self.kind,
            rated: available(self.rated),
            released: available(self.released),
            runtime: available(self.runtime),
            genres: split_list(self.genre),
            director: available(self.director),
            writer: available(self.writer),
            cast: split_list(self.actors),
            plot: available(self.plot),
            language: available(self.language),
            country: available(self.country),
            awards: available(self.awards),
            poster: self.poster,
            ratings: self
                .ratings
                .into_iter()
                .map(|r| Rating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
            metascore: available(self.metascore),
            imdb_rating: available(self.imdb_rating),
            imdb_votes: available(self.imdb_votes),
            box_office: available(self.box_office),
        })
    }
}
