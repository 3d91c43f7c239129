//! HTTP middleware.
//!
//! - **Request ID**: generation and propagation of `X-Request-Id` for log
//!   correlation

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
