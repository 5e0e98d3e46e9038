//! A sample route tree showing how filters combine into a small API.
//!
//! **This module is for documentation and testing only.** It shows realistic
//! routing without requiring an HTTP server:
//!
//! | Route | Methods | Guard |
//! |---|---|---|
//! | `/health` | `GET` | none |
//! | `/items/{id}` | `GET` | Bearer token |
//! | `/signed` | `POST`, `PUT` | `application/json` body, MAC signature |
//! | `/search?q=..&page=..` | `GET` | `q` required |
//!
//! A path that matches but a method that does not answers `405`; an
//! unknown path answers `404`.

use std::sync::Arc;

use crate::auth::MacHeader;
use crate::error::Error;
use crate::filter::Expr;
use crate::filters::{
    bearer_auth, choice, content, mac_auth, method, no_cache, on_error_complete, output, params,
    path,
};
use crate::message::Message;
use crate::parser::{complete_ok, complete_with_error, fail_with, parse, Parser};
use crate::status::HttpCode;

/// Response header carrying the item id matched by `/items/{id}`.
pub const ITEM_ID: &str = "X-Item-Id";

/// Decides whether a Bearer token is acceptable.
pub type TokenCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Decides whether a MAC header signs the given normalized request string.
pub type SignatureCheck = Arc<dyn Fn(&MacHeader, &str) -> bool + Send + Sync>;

/// Builds the sample API.
///
/// Credentials are checked by the caller's functions; the tree itself holds
/// no secrets.
///
/// # Errors
///
/// Returns an error only if one of the built-in path patterns fails to
/// compile.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::web::example_routes::api_routes;
/// use request_gate::web::{RecordedResponse, RequestAdapter};
/// use request_gate::{Context, Evaluator, MacHeader};
///
/// let routes = api_routes(
///     Arc::new(|t: &str| t == "letmein"),
///     Arc::new(|_: &MacHeader, _: &str| false),
/// )
/// .unwrap();
/// let evaluator = Evaluator::new(routes);
///
/// let req = RequestAdapter::new("GET", "/items/7").with_header("Authorization", "Bearer letmein");
/// let mut ctx = Context::new(Arc::new(req), RecordedResponse::new());
/// evaluator.evaluate(&mut ctx).unwrap();
///
/// assert_eq!(ctx.response().status_line().code(), 200);
/// assert_eq!(ctx.response().body(), "{\"id\":7}\n");
/// ```
pub fn api_routes(tokens: TokenCheck, signatures: SignatureCheck) -> Result<Expr, Error> {
    Ok(Expr::new(choice([
        health()?,
        items(tokens)?,
        signed(signatures)?,
        search()?,
    ])))
}

fn health() -> Result<Expr, Error> {
    Ok(Expr::new(path("/health")?)
        >> on_error_complete(method(["GET"]))
        >> no_cache()
        >> output("text/plain", "ok\n"))
}

fn items(tokens: TokenCheck) -> Result<Expr, Error> {
    let route = path("/items/(\\d+)")?.handler(|msg, parts| match &parts[1] {
        Some(id) => parse(msg.set_response_header(ITEM_ID, id)),
        None => fail_with(msg.clone(), HttpCode::NotFound),
    });

    let auth = bearer_auth(move |msg, token| {
        if tokens(token.expose_secret()) {
            parse(msg.clone())
        } else {
            msg.log().info(format_args!("bearer token refused"));
            complete_with_error(msg.clone(), HttpCode::Forbidden)
        }
    });

    Ok(Expr::new(route)
        >> on_error_complete(method(["GET"]))
        >> auth
        >> show_item)
}

fn show_item(msg: &Message) -> Parser {
    let id = msg.response_header(ITEM_ID).unwrap_or_default();
    let body = format!("{{\"id\":{}}}\n", id);
    complete_ok(msg.clone(), "application/json", &body)
}

fn signed(signatures: SignatureCheck) -> Result<Expr, Error> {
    let auth = mac_auth(move |msg, header, normalized| {
        if signatures(header, &normalized.normalize()) {
            parse(msg.clone())
        } else {
            msg.log().info(format_args!("MAC signature refused for id {}", header.id()));
            complete_with_error(msg.clone(), HttpCode::Unauthorized)
        }
    });

    Ok(Expr::new(path("/signed")?)
        >> on_error_complete(method(["POST", "PUT"]))
        >> on_error_complete(content().expect_type("application/json"))
        >> auth
        >> output("text/plain", "accepted\n"))
}

fn search() -> Result<Expr, Error> {
    let query = params(["q", "page"], |msg, values| {
        let Some(q) = values[0].as_deref().filter(|q| !q.is_empty()) else {
            return complete_with_error(msg.clone(), HttpCode::BadRequest);
        };
        let page = values[1]
            .as_deref()
            .and_then(|p| p.parse::<u32>().ok())
            .unwrap_or(1);
        complete_ok(
            msg.clone(),
            "text/plain",
            &format!("results for '{}', page {}\n", q, page),
        )
    })?;

    Ok(Expr::new(path("/search")?) >> on_error_complete(method(["GET"])) >> query)
}
