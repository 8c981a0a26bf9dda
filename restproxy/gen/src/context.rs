//! Per-proxy generation context.
//!
//! A [`GeneratorContext`] is built once per enclosing proxy and shared, read
//! only, by every method synthesized for it. It carries the handler
//! statements inserted at each dispatch point and the paths of the runtime
//! transport types the generated code calls into.

use restproxy_define::DEFAULT_RUNTIME_CRATE;

use crate::ast::{Expr, SharedStmt, Stmt, TypePath};

/// Local name a caught or synthesized error is bound to.
pub const ERROR_BINDING: &str = "error";

/// Local name the received response is bound to.
pub const RESPONSE_BINDING: &str = "response";

/// Local holding the path under construction.
pub const PATH_VAR: &str = "path";

/// Local holding the request builder.
pub const REQUEST_BUILDER_VAR: &str = "request_builder";

/// Paths of the runtime transport types used by generated code.
///
/// ## Examples
///
/// ```
/// use restproxy_gen::context::RuntimePaths;
///
/// let runtime = RuntimePaths::new("my_transport");
/// assert_eq!(runtime.request_builder().as_str(), "::my_transport::RequestBuilder");
///
/// let local = RuntimePaths::new("crate::transport");
/// assert_eq!(local.response().as_str(), "crate::transport::Response");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    root: String,
}

impl RuntimePaths {
    pub fn new(crate_path: impl Into<String>) -> Self {
        let crate_path = crate_path.into();
        let relative = ["crate", "self", "super"]
            .iter()
            .any(|prefix| crate_path == *prefix || crate_path.starts_with(&format!("{prefix}::")));
        let root = if relative || crate_path.starts_with("::") {
            crate_path
        } else {
            format!("::{crate_path}")
        };
        Self { root }
    }

    fn item(&self, name: &str) -> TypePath {
        TypePath::new(format!("{}::{}", self.root, name))
    }

    pub fn path_builder(&self) -> TypePath {
        self.item("PathBuilder")
    }

    pub fn request_builder(&self) -> TypePath {
        self.item("RequestBuilder")
    }

    pub fn request_callback(&self) -> TypePath {
        self.item("RequestCallback")
    }

    pub fn request(&self) -> TypePath {
        self.item("Request")
    }

    pub fn response(&self) -> TypePath {
        self.item("Response")
    }

    pub fn request_error(&self) -> TypePath {
        self.item("RequestError")
    }

    pub fn url_encode(&self) -> TypePath {
        self.item("url::encode")
    }
}

impl Default for RuntimePaths {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_CRATE)
    }
}

/// The caller-supplied statements run on failure and on success.
///
/// The error statement reads [`ERROR_BINDING`]; the response statement reads
/// [`RESPONSE_BINDING`]. Both are inserted by reference wherever an outcome is
/// dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerStatements {
    pub error: SharedStmt,
    pub response: SharedStmt,
}

impl HandlerStatements {
    pub fn new(error: Stmt, response: Stmt) -> Self {
        Self {
            error: SharedStmt::new(error),
            response: SharedStmt::new(response),
        }
    }

    /// `self.handle_error(error)` and `self.handle_response(response)`.
    pub fn delegate_to_self() -> Self {
        Self::new(
            Stmt::expr(
                Expr::var("self").invoke("handle_error", vec![Expr::var(ERROR_BINDING)]),
            ),
            Stmt::expr(
                Expr::var("self").invoke("handle_response", vec![Expr::var(RESPONSE_BINDING)]),
            ),
        )
    }

    pub fn error_stmt(&self) -> Stmt {
        Stmt::Shared(self.error.clone())
    }

    pub fn response_stmt(&self) -> Stmt {
        Stmt::Shared(self.response.clone())
    }
}

/// Everything shared by the methods of one proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContext {
    pub handlers: HandlerStatements,
    pub runtime: RuntimePaths,
}

impl GeneratorContext {
    pub fn new(handlers: HandlerStatements, runtime: RuntimePaths) -> Self {
        Self { handlers, runtime }
    }
}

impl Default for GeneratorContext {
    fn default() -> Self {
        Self::new(HandlerStatements::delegate_to_self(), RuntimePaths::default())
    }
}
