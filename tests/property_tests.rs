//! Integration property tests for request-gate.
//!
//! These tests validate cross-module invariants of composition, routing,
//! the credential grammars and the evaluator using property-based testing.

use std::sync::Arc;

use proptest::prelude::*;
use request_gate::web::example_routes::api_routes;
use request_gate::web::{RecordedResponse, RequestAdapter};
use request_gate::{
    choice, complete, evaluate, fail, parse, parse_bearer, parse_mac, Context, Evaluator, Expr,
    Filter, GrammarErrorKind, MacHeader, Message, Parser, DEFAULT_MAX_TOKEN_LENGTH,
};

/// What a generated filter does with the message it receives.
#[derive(Debug, Clone, Copy)]
enum Step {
    Pass(char),
    Fail(char),
    Complete(char),
}

impl Step {
    fn filter(self) -> Expr {
        Expr::new(move |msg: &Message| -> Parser {
            match self {
                Step::Pass(c) => parse(msg.output("", &c.to_string())),
                Step::Fail(c) => fail(msg.output("", &c.to_string())),
                Step::Complete(c) => complete(msg.output("", &c.to_string())),
            }
        })
    }
}

// Strategy: a filter behavior tagged with a distinguishing character
fn arb_step() -> impl Strategy<Value = Step> {
    let tag = prop::char::range('a', 'z');
    prop_oneof![
        3 => tag.clone().prop_map(Step::Pass),
        1 => tag.clone().prop_map(Step::Fail),
        1 => tag.prop_map(Step::Complete),
    ]
}

fn message() -> Message {
    Message::new(Arc::new(RequestAdapter::new("GET", "/prop")))
}

fn outcome(p: &Parser) -> (bool, bool, String) {
    (p.failed(), p.complete(), p.message().response_body().to_string())
}

proptest! {
    /// Property: A chain stops at the first failed or complete step
    ///
    /// The body records which steps ran; it must be exactly the prefix of
    /// steps up to and including the first one that failed or completed.
    #[test]
    fn proptest_chain_short_circuits(steps in prop::collection::vec(arb_step(), 1..8)) {
        let chain = steps[1..]
            .iter()
            .fold(steps[0].filter(), |acc, s| acc >> s.filter());
        let result = chain.apply(&message());

        let mut expected = String::new();
        for step in &steps {
            match *step {
                Step::Pass(c) => expected.push(c),
                Step::Fail(c) | Step::Complete(c) => {
                    expected.push(c);
                    break;
                }
            }
        }
        prop_assert_eq!(result.message().response_body(), expected.as_str());
    }

    /// Property: Grouping does not change what a chain computes
    #[test]
    fn proptest_composition_is_associative(f in arb_step(), g in arb_step(), h in arb_step()) {
        let left = (f.filter() >> g.filter()) >> h.filter();
        let right = f.filter() >> (g.filter() >> h.filter());
        prop_assert_eq!(outcome(&left.apply(&message())), outcome(&right.apply(&message())));
    }

    /// Property: `g << f` runs `f` first, exactly like `f >> g`
    #[test]
    fn proptest_right_compose_mirrors_left(f in arb_step(), g in arb_step()) {
        let forward = f.filter() >> g.filter();
        let backward = g.filter() << f.filter();
        prop_assert_eq!(outcome(&forward.apply(&message())), outcome(&backward.apply(&message())));
    }

    /// Property: Choice returns the first alternative that did not fail
    ///
    /// Failed alternatives never leak their output into the result. With
    /// every alternative failing, the result is a `404` failure.
    #[test]
    fn proptest_choice_picks_first_viable(steps in prop::collection::vec(arb_step(), 0..6)) {
        let routes = choice(steps.iter().map(|s| s.filter()));
        let result = routes.apply(&message());

        match steps.iter().find(|s| !matches!(s, Step::Fail(_))) {
            Some(Step::Pass(c)) => {
                prop_assert!(!result.failed_or_complete());
                prop_assert_eq!(result.message().response_body(), c.to_string());
            }
            Some(Step::Complete(c)) => {
                prop_assert!(result.complete());
                prop_assert_eq!(result.message().response_body(), c.to_string());
            }
            _ => {
                prop_assert!(result.failed());
                prop_assert_eq!(result.message().status().code(), 404);
                prop_assert_eq!(result.message().response_body(), "");
            }
        }
    }

    /// Property: Bearer tokens are accepted up to the length limit and no further
    #[test]
    fn proptest_bearer_length_limit(len in 1usize..(DEFAULT_MAX_TOKEN_LENGTH + 64)) {
        let token = "t".repeat(len);
        let result = parse_bearer(&format!("Bearer {}", token));
        if len <= DEFAULT_MAX_TOKEN_LENGTH {
            let parsed = result.unwrap();
            prop_assert_eq!(parsed.expose_secret(), token.as_str());
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), GrammarErrorKind::TokenTooLong);
        }
    }

    /// Property: Parsed credentials never print their secret
    #[test]
    fn proptest_credentials_are_redacted(secret in "[A-Za-z0-9]{12,40}") {
        let token = parse_bearer(&format!("Bearer {}", secret)).unwrap();
        let debug = format!("{:?}", token);
        let shown = token.to_string();
        prop_assert!(!debug.contains(&secret));
        prop_assert!(!shown.contains(&secret));

        let header = parse_mac(&format!(r#"MAC id="i", ts="1", nonce="n", mac="{}""#, secret)).unwrap();
        let debug = format!("{:?}", header);
        let shown = header.to_string();
        prop_assert!(!debug.contains(&secret));
        prop_assert!(!shown.contains(&secret));
    }

    /// Property: Every evaluation commits exactly one well-formed response
    #[test]
    fn proptest_evaluator_always_commits_once(
        method in prop_oneof![Just("GET"), Just("POST"), Just("PUT"), Just("DELETE")],
        path in prop_oneof![
            Just("/health".to_string()),
            Just("/signed".to_string()),
            Just("/search".to_string()),
            "/items/[0-9]{1,4}",
            "/[a-z]{1,10}",
        ],
        auth in prop::option::of("[ -~]{0,40}"),
    ) {
        let routes = api_routes(
            Arc::new(|t: &str| t == "ok"),
            Arc::new(|_: &MacHeader, _: &str| true),
        ).unwrap();
        let evaluator = Evaluator::new(routes);

        let mut req = RequestAdapter::new(method, path);
        if let Some(v) = auth {
            req.add_header("Authorization", v);
        }
        let mut ctx = Context::new(Arc::new(req), RecordedResponse::new());
        evaluator.evaluate(&mut ctx).unwrap();

        let resp = ctx.response();
        prop_assert_eq!(resp.status_writes(), 1);
        prop_assert!(matches!(
            resp.status_line().code(),
            200 | 400 | 401 | 403 | 404 | 405 | 415
        ));
        prop_assert!(!resp.status_line().phrase().is_empty());
    }

    /// Property: Output accumulates bodies in chain order
    #[test]
    fn proptest_output_appends_in_order(parts in prop::collection::vec("[a-z]{0,6}", 1..5)) {
        let chain = parts[1..]
            .iter()
            .fold(Expr::new(request_gate::output("text/plain", parts[0].clone())), |acc, p| {
                acc >> request_gate::output("", p.clone())
            });

        let mut ctx = Context::new(
            Arc::new(RequestAdapter::new("GET", "/")),
            RecordedResponse::new(),
        );
        evaluate(&mut ctx, &chain).unwrap();

        prop_assert_eq!(ctx.response().body(), parts.concat());
        prop_assert_eq!(ctx.response().header("Content-Type"), Some("text/plain"));
    }
}
