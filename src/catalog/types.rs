//! # Catalog Records
//!
//! Typed records decoded from the catalog's JSON responses.
//! Optional fields are explicit; a required field that is missing or has the
//! wrong JSON type fails decoding instead of being coerced.

use serde::{Deserialize, Serialize};

/// Catalog-wide movie identifier
pub type MovieId = u64;

/// One entry of a keyword search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: MovieId,
    pub title: String,
    /// Synopsis text
    pub overview: String,
    /// Opaque poster path fragment, resolved through `ImageResolver`
    #[serde(default)]
    pub poster_path: Option<String>,
    /// ISO-8601 date; empty for unreleased titles, which the catalog may
    /// send as `""` or leave out
    #[serde(default)]
    pub release_date: String,
    /// Average rating on a 0-10 scale
    pub vote_average: f64,
}

impl SearchResultItem {
    /// Release year, if the release date carries one
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .get(..4)
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Genre tag attached to a detail record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Extended record for a single title
///
/// Embeds the summary fields instead of re-declaring them, so a detail
/// record always carries everything a search result does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(flatten)]
    pub summary: SearchResultItem,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl DetailRecord {
    pub fn id(&self) -> MovieId {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    /// Genre names joined for display
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Runtime formatted as `1h 47m`
    pub fn formatted_runtime(&self) -> Option<String> {
        self.runtime.filter(|minutes| *minutes > 0).map(|minutes| {
            let (hours, rest) = (minutes / 60, minutes % 60);
            if hours == 0 {
                format!("{rest}m")
            } else {
                format!("{hours}h {rest}m")
            }
        })
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// 1-based page number
    pub page: u32,
    pub results: Vec<SearchResultItem>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl SearchPage {
    /// Page with no results, as the catalog returns for an unmatched query
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
