use crate::config::{AuthMode, ConfigError, ConfigOverrides};
use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Browse the movie catalog from your terminal", long_about = None)]
struct ClapArgs {
    /// Profile section to read from the profile file
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Search to run as soon as the browser opens
    #[clap(short = 'q', long, help = "initial search query")]
    query: Option<String>,

    /// Response language, e.g. en-US
    #[clap(short = 'l', long, help = "response language")]
    language: Option<String>,

    /// How the credential is sent: query or bearer
    #[clap(long, help = "credential placement (query|bearer)")]
    auth: Option<String>,

    /// Write logs here instead of the default log file
    #[clap(long, help = "log file path")]
    log_file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    query: Option<String>,
    language: Option<String>,
    auth: Option<String>,
    log_file: Option<String>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from(ClapArgs::parse_from(itr))
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    /// Settings given on the command line, highest precedence
    pub fn overrides(&self) -> Result<ConfigOverrides, ConfigError> {
        let auth_mode = self
            .auth
            .as_deref()
            .map(str::parse::<AuthMode>)
            .transpose()?;

        Ok(ConfigOverrides {
            language: self.language.clone(),
            auth_mode,
            ..ConfigOverrides::default()
        })
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            query: args.query.filter(|q| !q.trim().is_empty()),
            language: args.language,
            auth: args.auth,
            log_file: args.log_file,
        }
    }
}
