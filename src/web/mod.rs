//! Boundary with the HTTP transport.
//!
//! The engine consumes a request and a response sink through two narrow
//! traits. It handles:
//! - Reading the method, path, query, headers and parameters of a request
//! - Resolving the host name and port a request was addressed to
//! - Writing the final status, headers and body, once, from the evaluator
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no framework-specific
//!    code. Framework integrations implement [`Request`] and [`Response`].
//!
//! 2. **Read-Only Requests**: Filters see the request through a shared
//!    reference and can never modify it.
//!
//! 3. **Single Writer**: Only the [`Evaluator`](crate::Evaluator) writes to a
//!    [`Response`].
//!
//! # Integration Flow
//!
//! ```text
//! HTTP Request
//!   ↓
//! Framework-specific code implements Request (or fills a RequestAdapter)
//!   ↓
//! Context::new(request, response)
//!   ↓
//! evaluate(&mut context, &routes)
//!   ↓
//! Response receives status, headers and body exactly once
//! ```

mod adapter;
pub mod example_routes;
mod extract;
mod host;

pub use adapter::{RecordedResponse, RequestAdapter};
pub use extract::{
    Request, Response, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, WWW_AUTHENTICATE,
    X_AUTH_HOST, X_AUTH_METHOD, X_AUTH_URL,
};
pub use host::host_name_and_port;
