//! Request builder declaration.

use restproxy_define::HttpMethod;

use crate::ast::{BlockBuilder, Expr};
use crate::context::{PATH_VAR, REQUEST_BUILDER_VAR, RuntimePaths};

/// Declares the request builder for `method` and the encoded path.
///
/// The fully assembled path (template and query string) is URL-encoded
/// exactly once, here:
///
/// ```ignore
/// let request_builder: ::restproxy_runtime::RequestBuilder =
///     ::restproxy_runtime::RequestBuilder::new("GET", ::restproxy_runtime::url::encode(&path.to_string()));
/// ```
pub fn generate_request_builder<B: BlockBuilder + ?Sized>(
    method: HttpMethod,
    runtime: &RuntimePaths,
    out: &mut B,
) {
    let encoded_path = Expr::invoke_static(
        runtime.url_encode(),
        vec![Expr::borrow(Expr::var(PATH_VAR).invoke("to_string", vec![]))],
    );

    out.declare_variable(
        REQUEST_BUILDER_VAR,
        Some(runtime.request_builder()),
        false,
        Expr::new_object(
            runtime.request_builder(),
            vec![Expr::str(method.to_string()), encoded_path],
        ),
    );
}
