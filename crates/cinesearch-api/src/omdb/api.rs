//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{DetailParams, OmdbDetailResponse, OmdbSearchResponse, SearchParams};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait,
/// which is the variant request tasks are spawned against.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Searches titles by free text.
    ///
    /// A provider-reported failure (`"Response": "False"`) is returned as a
    /// successfully decoded envelope, not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server answers with a
    /// non-success status, or JSON decoding fails.
    async fn search(&self, params: &SearchParams) -> Result<OmdbSearchResponse>;

    /// Fetches the full record for one title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server answers with a
    /// non-success status, or JSON decoding fails.
    async fn details(&self, params: &DetailParams) -> Result<OmdbDetailResponse>;
}
