//! Integration tests for outcome routing in generated method bodies.
//!
//! These tests walk the guarded send call and its callback the way the
//! generated code would execute them, and check which handler each outcome
//! reaches:
//! - A send-time failure reaches the error handler
//! - A transport failure reported to the callback reaches the error handler
//! - A received status reaches the response handler exactly when it is 2xx,
//!   and otherwise the error handler with the status as the error message

use restproxy_define::{EndpointMethodDescriptor, HttpMethod};
use restproxy_gen::ast::{Block, CompareOp, Expr, MethodOverride, SharedStmt, Stmt};
use restproxy_gen::codegen::{Outcome, classify_status, generate_proxy_method};
use restproxy_gen::context::{ERROR_BINDING, GeneratorContext, HandlerStatements, RESPONSE_BINDING};

/// A handler statement reached while executing a block.
#[derive(Debug, PartialEq, Eq)]
enum Reached {
    /// The error handler, with the message of a synthesized status error.
    Error(Option<String>),
    Response,
}

struct Routing<'a> {
    handlers: &'a HandlerStatements,
    status: u16,
    /// Message of the error synthesized in the current branch, if any.
    status_error: Option<String>,
    reached: Vec<Reached>,
}

impl<'a> Routing<'a> {
    fn new(handlers: &'a HandlerStatements, status: u16) -> Self {
        Self {
            handlers,
            status,
            status_error: None,
            reached: Vec::new(),
        }
    }

    fn run(&mut self, block: &Block) {
        for stmt in block {
            match stmt {
                Stmt::If {
                    cond,
                    then,
                    otherwise,
                } => {
                    if self.truth(cond) {
                        self.run(then);
                    } else {
                        self.run(otherwise);
                    }
                }
                Stmt::Declare { name, init, .. } if name == ERROR_BINDING => {
                    let Expr::New { args, .. } = init else {
                        panic!("status error should be constructed: {init:?}");
                    };
                    self.status_error = Some(self.text(&args[0]));
                }
                Stmt::Shared(shared) => self.reach(shared),
                other => panic!("unexpected statement in callback: {other:?}"),
            }
        }
    }

    fn reach(&mut self, shared: &SharedStmt) {
        if shared.ptr_eq(&self.handlers.error) {
            self.reached.push(Reached::Error(self.status_error.take()));
        } else if shared.ptr_eq(&self.handlers.response) {
            self.reached.push(Reached::Response);
        } else {
            panic!("unknown handler statement");
        }
    }

    fn truth(&self, expr: &Expr) -> bool {
        match expr {
            Expr::And(lhs, rhs) => self.truth(lhs) && self.truth(rhs),
            Expr::Compare { op, lhs, rhs } => {
                let (lhs, rhs) = (self.number(lhs), self.number(rhs));
                match op {
                    CompareOp::GreaterOrEqual => lhs >= rhs,
                    CompareOp::Less => lhs < rhs,
                }
            }
            other => panic!("unexpected condition {other:?}"),
        }
    }

    fn number(&self, expr: &Expr) -> i64 {
        match expr {
            Expr::Int(value) => *value,
            expr if is_status_code(expr) => self.status.into(),
            other => panic!("unexpected operand {other:?}"),
        }
    }

    fn text(&self, expr: &Expr) -> String {
        match expr {
            Expr::Invoke { target, method, .. } if method == "to_string" && is_status_code(target) => {
                self.status.to_string()
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}

fn is_status_code(expr: &Expr) -> bool {
    *expr == Expr::var(RESPONSE_BINDING).invoke("status_code", vec![])
}

/// The guarded send statement's catch handler and callback overrides.
fn dispatch_parts(body: &Block) -> (&Block, &[MethodOverride]) {
    let Some(Stmt::TryCatch { body, handler, .. }) = body
        .iter()
        .find(|stmt| matches!(stmt, Stmt::TryCatch { .. }))
    else {
        panic!("body should contain the guarded send");
    };
    let Stmt::Expr(Expr::Invoke { args, .. }) = &body.statements()[0] else {
        panic!("guarded body should be the send call");
    };
    let Expr::AnonymousObject { overrides, .. } = &args[1] else {
        panic!("callback should be an anonymous object");
    };
    (handler, overrides.as_slice())
}

fn callback<'a>(overrides: &'a [MethodOverride], name: &str) -> &'a Block {
    &overrides
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("callback should override {name}"))
        .body
}

fn generate() -> (Block, GeneratorContext) {
    let descriptor = EndpointMethodDescriptor::new("get_user", "/users/{id}")
        .with_method(HttpMethod::Get)
        .with_path_param("id", "id")
        .with_return_type("User");
    let context = GeneratorContext::default();
    let body = generate_proxy_method(&descriptor, &context).expect("Generation should succeed");
    (body, context)
}

fn route_status(status: u16) -> Vec<Reached> {
    let (body, context) = generate();
    let (_, overrides) = dispatch_parts(&body);
    let mut routing = Routing::new(&context.handlers, status);
    routing.run(callback(overrides, "on_response_received"));
    routing.reached
}

#[test]
fn send_failure_reaches_error_handler() {
    let (body, context) = generate();
    let (handler, _) = dispatch_parts(&body);
    let mut routing = Routing::new(&context.handlers, 0);
    routing.run(handler);
    assert_eq!(routing.reached, vec![Reached::Error(None)]);
}

#[test]
fn transport_failure_reaches_error_handler() {
    let (body, context) = generate();
    let (_, overrides) = dispatch_parts(&body);
    let mut routing = Routing::new(&context.handlers, 0);
    routing.run(callback(overrides, "on_error"));
    assert_eq!(routing.reached, vec![Reached::Error(None)]);
}

#[test]
fn success_statuses_reach_response_handler() {
    for status in [200, 201, 204, 299] {
        assert_eq!(route_status(status), vec![Reached::Response], "status {status}");
    }
}

#[test]
fn failure_statuses_reach_error_handler_with_status_message() {
    for status in [100, 199, 300, 304, 404, 500, 503] {
        assert_eq!(
            route_status(status),
            vec![Reached::Error(Some(status.to_string()))],
            "status {status}"
        );
    }
}

#[test]
fn generated_routing_agrees_with_classify_status() {
    for status in 100..600 {
        let expected = match classify_status(status) {
            Outcome::Succeeded => vec![Reached::Response],
            Outcome::Failed => vec![Reached::Error(Some(status.to_string()))],
        };
        assert_eq!(route_status(status), expected, "status {status}");
    }
}

#[test]
fn custom_handler_statements_are_inserted() {
    let handlers = HandlerStatements::new(
        Stmt::expr(Expr::var("log").invoke("push", vec![Expr::var(ERROR_BINDING)])),
        Stmt::expr(Expr::var("sink").invoke("accept", vec![Expr::var(RESPONSE_BINDING)])),
    );
    let context = GeneratorContext::new(handlers, Default::default());
    let descriptor = EndpointMethodDescriptor::new("ping", "/ping").with_method(HttpMethod::Get);
    let body = generate_proxy_method(&descriptor, &context).expect("Generation should succeed");

    let (_, overrides) = dispatch_parts(&body);
    let mut routing = Routing::new(&context.handlers, 200);
    routing.run(callback(overrides, "on_response_received"));
    assert_eq!(routing.reached, vec![Reached::Response]);
}
