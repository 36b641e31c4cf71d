use crate::error::Error;
use crate::session::BasicCredentials;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "TODOCHECK_BASE_URL";
pub const TIMEOUT_ENV: &str = "TODOCHECK_TIMEOUT_SEC";
pub const USER_ENV: &str = "TODOCHECK_USER";
pub const PASSWORD_ENV: &str = "TODOCHECK_PASSWORD";

const DEFAULT_BASE_URL: &str = "https://apichallenges.herokuapp.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-run configuration for the orchestrator: where the service lives, how
/// long a single call may take, and optional credentials for the secondary
/// token exchange.
#[derive(Debug, Clone)]
pub struct RunnerConfiguration {
    base_url: String,
    timeout: Duration,
    credentials: Option<BasicCredentials>,
}

impl RunnerConfiguration {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
        }
    }

    /// Builds a configuration from `TODOCHECK_*` environment variables,
    /// falling back to the public API Challenges instance.
    pub fn from_env() -> Result<Self, Error> {
        let base_url =
            read_env_nonempty(BASE_URL_ENV)?.unwrap_or_else(|| String::from(DEFAULT_BASE_URL));
        let timeout = match read_env_nonempty(TIMEOUT_ENV)? {
            Some(raw) => parse_timeout_seconds(TIMEOUT_ENV, &raw)?,
            None => DEFAULT_TIMEOUT,
        };
        let credentials = match (read_env_nonempty(USER_ENV)?, read_env_nonempty(PASSWORD_ENV)?) {
            (Some(user), Some(password)) => Some(BasicCredentials::new(user, password)),
            (None, None) => None,
            _ => {
                return Err(Error::Config(format!(
                    "{} and {} must be set together",
                    USER_ENV, PASSWORD_ENV
                )))
            }
        };

        Ok(Self {
            base_url,
            timeout,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_credentials(&mut self, credentials: BasicCredentials) {
        self.credentials = Some(credentials);
    }

    pub fn credentials(&self) -> Option<&BasicCredentials> {
        self.credentials.as_ref()
    }
}

fn read_env_nonempty(name: &str) -> Result<Option<String>, Error> {
    match std::env::var_os(name) {
        None => Ok(None),
        Some(raw) => {
            let value = raw
                .into_string()
                .map_err(|_| Error::Config(format!("{} must be valid UTF-8", name)))?;
            if value.trim().is_empty() {
                Err(Error::Config(format!("{} must not be empty", name)))
            } else {
                Ok(Some(value))
            }
        }
    }
}

fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, Error> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        Error::Config(format!(
            "{} must be a positive integer number of seconds",
            name
        ))
    })?;
    if secs == 0 {
        return Err(Error::Config(format!("{} must be greater than zero", name)));
    }
    Ok(Duration::from_secs(secs))
}
