//! # Image Resolution
//!
//! Turns opaque image path fragments into displayable URLs.

use crate::config::DEFAULT_IMAGE_BASE_URL;

/// Size tag used for posters in the result grid
pub const POSTER_SIZE: &str = "w500";

/// Size tag used for the backdrop in the detail overlay
pub const BACKDROP_SIZE: &str = "original";

pub const PLACEHOLDER_POSTER_URL: &str =
    "https://placehold.co/500x750/cccccc/333333?text=No+Poster";

pub const PLACEHOLDER_BACKDROP_URL: &str =
    "https://placehold.co/800x600/333333/ffffff?text=No+Backdrop";

/// Image kinds the catalog serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
}

impl ImageKind {
    fn size(self) -> &'static str {
        match self {
            ImageKind::Poster => POSTER_SIZE,
            ImageKind::Backdrop => BACKDROP_SIZE,
        }
    }

    /// URL shown when the path is absent or the image cannot be loaded
    pub fn placeholder(self) -> &'static str {
        match self {
            ImageKind::Poster => PLACEHOLDER_POSTER_URL,
            ImageKind::Backdrop => PLACEHOLDER_BACKDROP_URL,
        }
    }
}

/// Resolves image paths against a fixed base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    base_url: String,
}

impl ImageResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn resolve(&self, kind: ImageKind, path: Option<&str>) -> String {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => format!(
                "{}{}/{}",
                self.base_url,
                kind.size(),
                path.trim_start_matches('/')
            ),
            None => kind.placeholder().to_string(),
        }
    }

    pub fn poster_url(&self, path: Option<&str>) -> String {
        self.resolve(ImageKind::Poster, path)
    }

    pub fn backdrop_url(&self, path: Option<&str>) -> String {
        self.resolve(ImageKind::Backdrop, path)
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}
