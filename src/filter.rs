//! The filter abstraction and its sequencing primitives.
//!
//! A filter inspects a [`Message`] and returns a [`Parser`]. Filters are
//! combined with [`sequence`], the only primitive that advances a chain;
//! everything else is built on top of it.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use request_gate::web::RequestAdapter;
//! use request_gate::{method, output, Expr, Filter, Message};
//!
//! let route = Expr::new(method(["GET"])) >> output("text/plain", "hello");
//!
//! let msg = Message::new(Arc::new(RequestAdapter::new("GET", "/")));
//! let result = route.apply(&msg);
//! assert!(!result.failed());
//! assert_eq!(result.message().response_body(), "hello");
//! ```

use std::fmt;
use std::ops::{Shl, Shr};
use std::sync::Arc;

use crate::message::Message;
use crate::parser::Parser;

/// A function from a message to an evaluation outcome.
///
/// Filters hold no mutable state, so one filter tree can serve concurrent
/// requests on separate threads. Any `Fn(&Message) -> Parser` closure that
/// is `Send + Sync` is a filter.
pub trait Filter: Send + Sync {
    /// Applies the filter.
    fn apply(&self, msg: &Message) -> Parser;
}

impl<F> Filter for F
where
    F: Fn(&Message) -> Parser + Send + Sync,
{
    fn apply(&self, msg: &Message) -> Parser {
        self(msg)
    }
}

/// A shared, type-erased filter.
///
/// `Expr` is what combinators produce and accept. Cloning is cheap. The
/// `>>` operator runs the left side first; `<<` runs the right side first.
#[derive(Clone)]
pub struct Expr(Arc<dyn Filter>);

impl Expr {
    /// Erases a filter's type.
    pub fn new(filter: impl Filter + 'static) -> Self {
        Expr(Arc::new(filter))
    }
}

impl Filter for Expr {
    fn apply(&self, msg: &Message) -> Parser {
        self.0.apply(msg)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Expr")
    }
}

impl<F: Filter + 'static> Shr<F> for Expr {
    type Output = Expr;

    fn shr(self, rhs: F) -> Expr {
        left_compose(self, rhs)
    }
}

impl<F: Filter + 'static> Shl<F> for Expr {
    type Output = Expr;

    fn shl(self, rhs: F) -> Expr {
        right_compose(self, rhs)
    }
}

/// Advances a chain by one filter.
///
/// Returns `p` untouched when it has failed or completed; otherwise applies
/// `f` to its message. No filter after a failed or complete outcome ever
/// sees its message.
pub fn sequence<F: Filter + ?Sized>(p: Parser, f: &F) -> Parser {
    if p.failed_or_complete() {
        return p;
    }
    f.apply(p.message())
}

/// A filter running `f`, then `g` on its result.
pub fn left_compose(f: impl Filter + 'static, g: impl Filter + 'static) -> Expr {
    Expr::new(move |msg: &Message| sequence(f.apply(msg), &g))
}

/// A filter running `g`, then `f` on its result.
pub fn right_compose(f: impl Filter + 'static, g: impl Filter + 'static) -> Expr {
    Expr::new(move |msg: &Message| sequence(g.apply(msg), &f))
}

/// Method-style composition for any filter.
pub trait FilterExt: Filter + Sized + 'static {
    /// `self`, then `next`.
    fn then(self, next: impl Filter + 'static) -> Expr {
        left_compose(self, next)
    }

    /// `prev`, then `self`.
    fn after(self, prev: impl Filter + 'static) -> Expr {
        right_compose(self, prev)
    }

    /// Erases the filter's type.
    fn boxed(self) -> Expr {
        Expr::new(self)
    }
}

impl<F: Filter + Sized + 'static> FilterExt for F {}
