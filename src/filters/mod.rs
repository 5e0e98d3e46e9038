//! Concrete filters and the combinators that recover from their failures.
//!
//! Each filter is a small struct implementing [`Filter`](crate::Filter), built
//! through a free function of the same name. Optional behavior is configured
//! with builder methods, so filter trees read top-down:
//!
//! ```
//! use request_gate::{choice, method, no_cache, on_error_complete, output, path, Expr};
//!
//! let routes = choice([
//!     Expr::new(on_error_complete(
//!         Expr::new(path("/health").unwrap()) >> method(["GET"]) >> no_cache() >> output("text/plain", "ok"),
//!     )),
//!     Expr::new(path("/items/(\\d+)").unwrap()) >> method(["GET", "HEAD"]),
//! ]);
//! # let _ = routes;
//! ```

use std::sync::Arc;

use crate::message::Message;
use crate::parser::Parser;

mod authorization;
mod bearer;
mod choice;
mod content;
mod header;
mod mac;
mod method;
mod on_error;
mod option;
mod output;
mod params;
mod path;

pub use authorization::{authorization, Authorization, CredentialsHandler};
pub use bearer::{bearer_auth, BearerAuth, BearerHandler, BEARER_CHALLENGE, BEARER_MALFORMED};
pub use choice::{choice, Choice};
pub use content::{content, Content, ContentHandler};
pub use header::{header, Header, Required};
pub use mac::{mac_auth, MacAuth, MacHandler, MAC_CHALLENGE, MAC_MALFORMED};
pub use method::{method, Method};
pub use on_error::{on_error, on_error_complete, OnError, OnErrorComplete};
pub use option::{option, OptionFilter};
pub use output::{no_cache, output, pass, rheader, NoCache, Output, Pass, RHeader};
pub use params::{params, Params};
pub use path::{path, Path};

/// Most header or parameter names a filter passes to its handler.
pub const MAX_FIELDS: usize = 3;

/// Number of path parts passed to a path handler: the whole match followed
/// by the first three groups.
pub const MAX_PATH_PARTS: usize = 4;

/// Handler receiving positional values, one per declared field or path part.
pub type FieldsHandler = Arc<dyn Fn(&Message, &[Option<String>]) -> Parser + Send + Sync>;

fn fields_handler<F>(handler: F) -> FieldsHandler
where
    F: Fn(&Message, &[Option<String>]) -> Parser + Send + Sync + 'static,
{
    Arc::new(handler)
}
