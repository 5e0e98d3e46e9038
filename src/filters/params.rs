use std::fmt;

use crate::error::Error;
use crate::filter::Filter;
use crate::message::Message;
use crate::parser::{parse, Parser};

use super::{fields_handler, FieldsHandler, MAX_FIELDS};

/// Extracts up to [`MAX_FIELDS`] query or body parameters and hands them to
/// a handler.
#[derive(Clone)]
pub struct Params {
    names: Vec<String>,
    handler: FieldsHandler,
}

/// Builds a parameter filter.
///
/// The handler receives one value per name, in order; absent parameters are
/// `None`. With no names the filter passes through without calling it.
///
/// # Errors
///
/// Returns [`Error::TooManyFields`] if more than [`MAX_FIELDS`] names are
/// given.
pub fn params<I, S, F>(names: I, handler: F) -> Result<Params, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&Message, &[Option<String>]) -> Parser + Send + Sync + 'static,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    if names.len() > MAX_FIELDS {
        return Err(Error::TooManyFields {
            filter: "params",
            max: MAX_FIELDS,
            given: names.len(),
        });
    }
    Ok(Params {
        names,
        handler: fields_handler(handler),
    })
}

impl Filter for Params {
    fn apply(&self, msg: &Message) -> Parser {
        if self.names.is_empty() {
            return parse(msg.clone());
        }
        let values: Vec<Option<String>> = self
            .names
            .iter()
            .map(|name| msg.request().param(name))
            .collect();
        (self.handler)(msg, &values)
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params").field("names", &self.names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fail_with;
    use crate::status::HttpCode;
    use crate::web::RequestAdapter;
    use std::sync::Arc;

    fn message() -> Message {
        let req = RequestAdapter::new("GET", "/search")
            .with_param("q", "rust")
            .with_param("page", "2");
        Message::new(Arc::new(req))
    }

    #[test]
    fn values_follow_declaration_order() {
        let f = params(["page", "missing", "q"], |msg, values| {
            let joined: Vec<&str> = values.iter().map(|v| v.as_deref().unwrap_or("-")).collect();
            parse(msg.output("text/plain", &joined.join(",")))
        })
        .unwrap();
        assert_eq!(f.apply(&message()).message().response_body(), "2,-,rust");
    }

    #[test]
    fn handler_can_reject() {
        let f = params(["limit"], |msg, values| match &values[0] {
            Some(_) => parse(msg.clone()),
            None => fail_with(msg.clone(), HttpCode::BadRequest),
        })
        .unwrap();
        let p = f.apply(&message());
        assert!(p.failed());
        assert_eq!(p.message().status().code(), 400);
    }

    #[test]
    fn too_many_names() {
        let err = params(["a", "b", "c", "d"], |msg, _| parse(msg.clone())).unwrap_err();
        assert!(matches!(err, Error::TooManyFields { filter: "params", .. }));
    }
}
