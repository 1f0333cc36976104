//! API client library for cinesearch.
//!
//! Provides a client for the OMDb movie database API and the typed
//! records the rest of the workspace works with.

/// OMDb API client.
pub mod omdb;
