//! QCM Observability
//!
//! Structured logging for the QCM API:
//! - subscriber setup (console, optional rolling log files)
//! - per-request HTTP logging middleware
//!
//! ```no_run
//! use qcm_observability::{LoggingConfig, init_logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LoggingConfig::from_env())?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod middleware;

pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use middleware::{REQUEST_ID_HEADER, logging_middleware, request_route};
