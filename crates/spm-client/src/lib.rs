//! HTTP gateway for the SmartPayMap backend.
//!
//! Every backend call goes through a [`Transport`]. [`HttpTransport`] is the
//! production implementation built on `reqwest`; callers receive an
//! [`ApiClient`] wrapping whichever transport they were given, so tests can
//! inject a double instead of reaching for a process-wide singleton.
//!
//! # Example
//!
//! ```no_run
//! use spm_client::{ApiClient, ClientConfig};
//!
//! async fn ping() -> spm_model::Result<()> {
//!     let client = ApiClient::from_config(&ClientConfig::default())?;
//!     let heatmap = client.compliance_heatmap().await?;
//!     println!("{} countries", heatmap.compliance_heatmap.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod disposition;
pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::{ApiClient, endpoints};
pub use config::{
    BASE_URL_ENV, ClientConfig, ClientSettings, DEFAULT_TIMEOUT, DEV_BASE_URL, ENVIRONMENT_ENV,
    Environment, PROD_BASE_URL,
};
pub use disposition::filename_from_content_disposition;
pub use transport::{FilePart, FileResponse, HttpTransport, Transport};

/// Current version of the client.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
