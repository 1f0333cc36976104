//! OMDb API response envelopes and request parameters.

use serde::{Deserialize, Deserializer};

/// Decodes the `"True"` / `"False"` string flag OMDb uses for `Response`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.eq_ignore_ascii_case("true"))
}

/// Title category reported in the `Type` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature film.
    Movie,
    /// TV series.
    Series,
    /// Single TV episode.
    Episode,
    /// Video game.
    Game,
    /// Anything the API adds later.
    #[default]
    #[serde(other)]
    Other,
}

impl MediaKind {
    /// Returns the query-string value for the `type` filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Game => "game",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            "episode" => Ok(Self::Episode),
            "game" => Ok(Self::Game),
            other => Err(format!(
                "unknown title type: {other} (expected movie, series, episode, game)"
            )),
        }
    }
}

// --- Search ---

/// Response from the `s=` search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    /// Matching titles (absent on failure).
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    /// Total number of matches, string-encoded.
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    /// Success flag.
    #[serde(rename = "Response", default, deserialize_with = "deserialize_flag")]
    pub response: bool,
    /// Provider error message (only on failure).
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchItem {
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year or year range (e.g. `"1992–1995"`).
    #[serde(rename = "Year", default)]
    pub year: String,
    /// IMDb identifier (e.g. `"tt0372784"`).
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Title category.
    #[serde(rename = "Type", default)]
    pub kind: MediaKind,
    /// Poster URL or the `"N/A"` sentinel.
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

// --- Title details ---

/// Response from the `i=` title lookup endpoint.
///
/// Every text field may be the `"N/A"` sentinel; use
/// [`OmdbDetailResponse::into_record`] to resolve them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbDetailResponse {
    /// Title.
    pub title: Option<String>,
    /// Release year.
    pub year: Option<String>,
    /// Content rating (e.g. `"R"`).
    pub rated: Option<String>,
    /// Release date.
    pub released: Option<String>,
    /// Runtime (e.g. `"142 min"`).
    pub runtime: Option<String>,
    /// Comma-separated genres.
    pub genre: Option<String>,
    /// Director(s).
    pub director: Option<String>,
    /// Writer(s).
    pub writer: Option<String>,
    /// Comma-separated cast.
    pub actors: Option<String>,
    /// Plot summary.
    pub plot: Option<String>,
    /// Spoken language(s).
    pub language: Option<String>,
    /// Production country.
    pub country: Option<String>,
    /// Awards line.
    pub awards: Option<String>,
    /// Poster URL or the `"N/A"` sentinel.
    pub poster: Option<String>,
    /// Ratings by source.
    #[serde(default)]
    pub ratings: Vec<OmdbRating>,
    /// Metascore.
    pub metascore: Option<String>,
    /// IMDb rating (e.g. `"9.3"`).
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    /// IMDb vote count.
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    /// IMDb identifier.
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    /// Title category.
    #[serde(rename = "Type", default)]
    pub kind: MediaKind,
    /// Box office gross.
    pub box_office: Option<String>,
    /// Success flag.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub response: bool,
    /// Provider error message (only on failure).
    pub error: Option<String>,
}

/// One rating source entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
    /// Rating source (e.g. `"Rotten Tomatoes"`).
    pub source: String,
    /// Rating value (e.g. `"91%"`).
    pub value: String,
}

// --- Error Response ---

/// Error body sent along with non-success HTTP statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbErrorResponse {
    /// Error message.
    #[serde(rename = "Error")]
    pub error: String,
}

// --- Request Parameters ---

/// Parameters for the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Search text (required).
    pub query: String,
    /// Result page (1-100, default: 1).
    pub page: u32,
    /// Restrict to a title category.
    pub kind: Option<MediaKind>,
    /// Restrict to a release year.
    pub year: Option<u32>,
}

impl SearchParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            kind: None,
            year: None,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the title category filter.
    #[must_use]
    pub const fn kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the release year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Plot length for title lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlotLength {
    /// One-paragraph summary.
    Short,
    /// Full plot.
    #[default]
    Full,
}

impl PlotLength {
    /// Returns the query-string value for the `plot` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Full => "full",
        }
    }
}

/// Parameters for the title lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailParams {
    /// IMDb identifier (required).
    pub id: String,
    /// Plot length (default: full).
    pub plot: PlotLength,
}

impl DetailParams {
    /// Creates new lookup params for the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            plot: PlotLength::Full,
        }
    }

    /// Sets the plot length.
    #[must_use]
    pub const fn plot(mut self, plot: PlotLength) -> Self {
        self.plot = plot;
        self
    }
}
