//! Configuration for cinescope
//!
//! Catalog access settings are resolved once at startup from, in increasing
//! precedence: built-in defaults, an INI profile file, environment variables
//! and command-line flags. The result is a plain `CatalogConfig` value handed
//! to the catalog client; nothing here is process-global after startup.

use ini::Ini;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default profile file path for cinescope
pub const DEFAULT_PROFILE_PATH: &str = "~/.cinescope/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CINESCOPE_PROFILE_PATH";

/// Environment variable carrying the catalog credential
pub const API_KEY_ENV_VAR: &str = "TMDB_API_KEY";

/// Environment variable overriding the catalog base URL
pub const BASE_URL_ENV_VAR: &str = "TMDB_API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no catalog credential configured; set {API_KEY_ENV_VAR} or `api_key` in the profile"
    )]
    MissingCredential,

    #[error("failed to read profile file '{path}': {source}")]
    Profile {
        path: String,
        #[source]
        source: ini::Error,
    },

    #[error("invalid catalog URL '{0}'")]
    InvalidUrl(String),

    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: &'static str, value: String },
}

/// How the credential travels with each request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// `?api_key=<credential>` on every request
    #[default]
    QueryParameter,
    /// `Authorization: Bearer <credential>`
    BearerToken,
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" | "api_key" | "apikey" => Ok(AuthMode::QueryParameter),
            "bearer" | "token" => Ok(AuthMode::BearerToken),
            _ => Err(ConfigError::InvalidValue {
                key: "auth",
                value: s.to_string(),
            }),
        }
    }
}

/// Partial settings from one configuration source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub auth_mode: Option<AuthMode>,
    pub language: Option<String>,
    pub image_base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl ConfigOverrides {
    /// Read the catalog environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: non_blank_env(BASE_URL_ENV_VAR),
            api_key: non_blank_env(API_KEY_ENV_VAR),
            ..Self::default()
        }
    }

    /// Read the named profile section, if the file and section exist
    pub fn from_profile(profile_name: &str, profile_path: &str) -> Result<Self, ConfigError> {
        let expanded = shellexpand::tilde(profile_path).to_string();
        if !Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' not found, skipping", expanded);
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(&expanded).map_err(|source| ConfigError::Profile {
            path: expanded.clone(),
            source,
        })?;

        let Some(section) = ini.section(Some(profile_name)) else {
            tracing::debug!("Profile '{}' not found in '{}'", profile_name, expanded);
            return Ok(Self::default());
        };

        let value = |key: &str| {
            section
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let auth_mode = value("auth").map(|v| v.parse::<AuthMode>()).transpose()?;
        let timeout = value("timeout_secs")
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "timeout_secs",
                        value: v,
                    })
            })
            .transpose()?;

        Ok(Self {
            base_url: value("base_url"),
            api_key: value("api_key"),
            auth_mode,
            language: value("language"),
            image_base_url: value("image_base_url"),
            timeout,
        })
    }

    /// Fill any field left unset here from `lower`
    pub fn or(self, lower: ConfigOverrides) -> Self {
        Self {
            base_url: self.base_url.or(lower.base_url),
            api_key: self.api_key.or(lower.api_key),
            auth_mode: self.auth_mode.or(lower.auth_mode),
            language: self.language.or(lower.language),
            image_base_url: self.image_base_url.or(lower.image_base_url),
            timeout: self.timeout.or(lower.timeout),
        }
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fully resolved catalog access settings
#[derive(Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub credential: String,
    pub auth_mode: AuthMode,
    pub language: String,
    pub image_base_url: String,
    pub timeout: Option<Duration>,
}

impl CatalogConfig {
    /// Resolve settings from command-line flags, the environment and the profile file
    pub fn load(
        profile_name: &str,
        profile_path: &str,
        cli: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);
        let profile = ConfigOverrides::from_profile(profile_name, profile_path)?;
        Self::resolve(cli.or(ConfigOverrides::from_env()).or(profile))
    }

    /// Apply defaults to merged settings and validate them
    pub fn resolve(settings: ConfigOverrides) -> Result<Self, ConfigError> {
        let credential = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let base_url = settings
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        reqwest::Url::parse(&base_url).map_err(|_| ConfigError::InvalidUrl(base_url.clone()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
            auth_mode: settings.auth_mode.unwrap_or_default(),
            language: settings
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            image_base_url: settings
                .image_base_url
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            timeout: settings.timeout,
        })
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("credential", &"<redacted>")
            .field("auth_mode", &self.auth_mode)
            .field("language", &self.language)
            .field("image_base_url", &self.image_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn with_key(key: &str) -> ConfigOverrides {
        ConfigOverrides {
            api_key: Some(key.to_string()),
            ..ConfigOverrides::default()
        }
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.cinescope/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "CINESCOPE_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        // Restore original state
        match original {
            Some(val) => std::env::set_var(PROFILE_PATH_ENV_VAR, val),
            None => std::env::remove_var(PROFILE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn resolve_should_fail_without_credential() {
        let result = CatalogConfig::resolve(ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::MissingCredential)));

        let blank = CatalogConfig::resolve(with_key("   "));
        assert!(matches!(blank, Err(ConfigError::MissingCredential)));
    }

    #[test]
    fn resolve_should_apply_defaults() {
        let config = CatalogConfig::resolve(with_key("secret")).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.credential, "secret");
        assert_eq!(config.auth_mode, AuthMode::QueryParameter);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn resolve_should_reject_invalid_base_url() {
        let settings = ConfigOverrides {
            base_url: Some("not a url".to_string()),
            ..with_key("secret")
        };
        assert!(matches!(
            CatalogConfig::resolve(settings),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn resolve_should_trim_trailing_slash() {
        let settings = ConfigOverrides {
            base_url: Some("http://localhost:8080/3/".to_string()),
            ..with_key("secret")
        };
        let config = CatalogConfig::resolve(settings).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/3");
    }

    #[test]
    fn higher_precedence_source_should_win() {
        let cli = ConfigOverrides {
            language: Some("de-DE".to_string()),
            ..ConfigOverrides::default()
        };
        let profile = ConfigOverrides {
            language: Some("fr-FR".to_string()),
            api_key: Some("from-profile".to_string()),
            ..ConfigOverrides::default()
        };

        let merged = cli.or(profile);
        assert_eq!(merged.language.as_deref(), Some("de-DE"));
        assert_eq!(merged.api_key.as_deref(), Some("from-profile"));
    }

    #[test]
    fn profile_section_should_be_parsed() {
        let file = write_profile(
            "[default]\napi_key = abc\n\n[work]\napi_key = xyz\nauth = bearer\nlanguage = ja-JP\ntimeout_secs = 5\nbase_url = http://localhost:9000/3\n",
        );
        let path = file.path().to_str().unwrap();

        let work = ConfigOverrides::from_profile("work", path).unwrap();
        assert_eq!(work.api_key.as_deref(), Some("xyz"));
        assert_eq!(work.auth_mode, Some(AuthMode::BearerToken));
        assert_eq!(work.language.as_deref(), Some("ja-JP"));
        assert_eq!(work.timeout, Some(Duration::from_secs(5)));
        assert_eq!(work.base_url.as_deref(), Some("http://localhost:9000/3"));

        let default = ConfigOverrides::from_profile("default", path).unwrap();
        assert_eq!(default.api_key.as_deref(), Some("abc"));
        assert_eq!(default.auth_mode, None);
    }

    #[test]
    fn missing_profile_file_or_section_should_be_empty() {
        let missing = ConfigOverrides::from_profile("default", "/no/such/cinescope/profile");
        assert_eq!(missing.unwrap(), ConfigOverrides::default());

        let file = write_profile("[default]\napi_key = abc\n");
        let other = ConfigOverrides::from_profile("staging", file.path().to_str().unwrap());
        assert_eq!(other.unwrap(), ConfigOverrides::default());
    }

    #[test]
    fn profile_with_bad_auth_mode_should_fail() {
        let file = write_profile("[default]\napi_key = abc\nauth = cookie\n");
        let result = ConfigOverrides::from_profile("default", file.path().to_str().unwrap());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "auth", .. })
        ));
    }

    #[test]
    fn auth_mode_should_parse_aliases() {
        assert_eq!("query".parse::<AuthMode>().unwrap(), AuthMode::QueryParameter);
        assert_eq!("API_KEY".parse::<AuthMode>().unwrap(), AuthMode::QueryParameter);
        assert_eq!(" Bearer ".parse::<AuthMode>().unwrap(), AuthMode::BearerToken);
        assert!("basic".parse::<AuthMode>().is_err());
    }

    #[test]
    fn debug_output_should_redact_credential() {
        let config = CatalogConfig::resolve(with_key("super-secret")).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
