//! Backend API outbound adapters.
//!
//! This module provides the reqwest implementation of the `BackendApi` port
//! and the environment-driven resolution of the backend base URL.

mod base_url;
mod http_client;

pub use base_url::{
    API_BASE_URL_ENV, BACKEND_URL_ENV, BackendUrlError, BuildMode, DEVELOPMENT_BACKEND_URL,
    PRODUCTION_BACKEND_URL, backend_base_url_from_env,
};
pub use http_client::BackendHttpClient;
