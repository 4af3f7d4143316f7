//! Backend base URL resolution.
//!
//! The URL is resolved once at startup. `API_BASE_URL` always wins; otherwise
//! release builds read `BACKEND_URL` and fall back to the hosted backend, while
//! debug builds talk to a local backend.

use mockable::Env;
use tracing::debug;
use url::Url;

/// Explicit override honoured in every build.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
/// Release-build override.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";
/// Release-build fallback.
pub const PRODUCTION_BACKEND_URL: &str = "https://oncare-backend.onrender.com";
/// Debug-build fallback.
pub const DEVELOPMENT_BACKEND_URL: &str = "http://localhost:8000";

/// Build mode selecting the fallback chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Local development against `localhost`.
    Debug,
    /// Deployed build.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oncare_gateway::outbound::backend::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while resolving the backend base URL.
#[derive(thiserror::Error, Debug)]
pub enum BackendUrlError {
    /// The chosen value does not parse as an absolute URL.
    #[error("invalid backend URL from {source_name}='{value}': {source}")]
    InvalidUrl {
        source_name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The URL parses but cannot carry path segments, such as `mailto:`.
    #[error("backend URL from {source_name}='{value}' cannot be a base")]
    NotABase {
        source_name: &'static str,
        value: String,
    },
}

fn non_blank<E: Env>(env: &E, name: &'static str) -> Option<(&'static str, String)> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(|value| (name, value))
}

/// Resolve the backend base URL from the environment.
///
/// Blank variables count as unset.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use oncare_gateway::outbound::backend::{BuildMode, backend_base_url_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
/// let url = backend_base_url_from_env(&env, BuildMode::Debug).expect("default url");
/// assert_eq!(url.as_str(), "http://localhost:8000/");
/// ```
///
/// # Errors
///
/// Returns [`BackendUrlError`] when the selected value is not a usable base
/// URL.
pub fn backend_base_url_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Url, BackendUrlError> {
    let (source_name, value) = non_blank(env, API_BASE_URL_ENV)
        .or_else(|| match mode {
            BuildMode::Release => non_blank(env, BACKEND_URL_ENV),
            BuildMode::Debug => None,
        })
        .unwrap_or_else(|| match mode {
            BuildMode::Release => ("default", PRODUCTION_BACKEND_URL.to_owned()),
            BuildMode::Debug => ("default", DEVELOPMENT_BACKEND_URL.to_owned()),
        });

    let url = Url::parse(&value).map_err(|source| BackendUrlError::InvalidUrl {
        source_name,
        value: value.clone(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(BackendUrlError::NotABase { source_name, value });
    }
    debug!(source = source_name, url = %url, "resolved backend base URL");
    Ok(url)
}
