//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb search and title lookup endpoints
//! and resolves the loosely-typed responses into validated records.

mod api;
mod client;
mod model;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder};
pub use model::{
    DetailRecord, NOT_AVAILABLE, PLACEHOLDER_POSTER, ProviderRejection, Rating, ResultItem,
    ResultPage, imdb_url, resolve_poster,
};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DetailParams, MediaKind, OmdbDetailResponse, OmdbRating, OmdbSearchItem, OmdbSearchResponse,
    PlotLength, SearchParams,
};
