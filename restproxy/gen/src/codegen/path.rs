//! Request path construction.
//!
//! Emits the statements that build the request path of a proxy method:
//! a `path` declaration holding the template with every placeholder
//! substituted, then a single chained append for the query string.
//!
//! ## Generated Shape
//!
//! For `/users/{id}` with query `verbose` bound to `verbose`:
//!
//! ```ignore
//! let mut path: ::restproxy_runtime::PathBuilder =
//!     ::restproxy_runtime::PathBuilder::new("/users/{id}".replacen("{id}", &id.to_string(), 1));
//! path.append("?").append("verbose").append("=").append(&verbose);
//! ```

use restproxy_define::{EndpointMethodDescriptor, QueryParams, extract_placeholders};
use tracing::trace;

use crate::ast::{BlockBuilder, Expr, Stmt};
use crate::context::{PATH_VAR, RuntimePaths};
use crate::errors::GeneratorError;

const APPEND: &str = "append";

/// Appends the path declaration and, when needed, the query string append.
///
/// ## Errors
///
/// Returns `GeneratorError::UnboundPlaceholder` if a placeholder in the raw
/// path has no binding.
pub fn generate_path<B: BlockBuilder + ?Sized>(
    descriptor: &EndpointMethodDescriptor,
    runtime: &RuntimePaths,
    out: &mut B,
) -> Result<(), GeneratorError> {
    let path_value = substituted_path(descriptor)?;

    out.declare_variable(
        PATH_VAR,
        Some(runtime.path_builder()),
        !descriptor.query_params.is_empty(),
        Expr::new_object(runtime.path_builder(), vec![path_value]),
    );

    if let Some(query) = query_appends(&descriptor.query_params) {
        out.append(Stmt::expr(query));
    }

    Ok(())
}

/// Folds the raw path literal through one replace-first per placeholder,
/// in the order the placeholders occur.
pub fn substituted_path(descriptor: &EndpointMethodDescriptor) -> Result<Expr, GeneratorError> {
    let raw_path = descriptor.raw_path();

    extract_placeholders(&raw_path)
        .iter()
        .try_fold(Expr::str(raw_path.as_str()), |value, placeholder| {
            let bound = descriptor.path_param(placeholder.name).ok_or_else(|| {
                GeneratorError::UnboundPlaceholder {
                    method: descriptor.name.clone(),
                    placeholder: placeholder.name.to_string(),
                }
            })?;
            trace!(placeholder = placeholder.name, value = %bound, "substituting path parameter");

            Ok(value.invoke(
                "replacen",
                vec![
                    Expr::str(placeholder.token),
                    Expr::borrow(Expr::var(bound.name()).invoke("to_string", vec![])),
                    Expr::int(1),
                ],
            ))
        })
}

/// Builds `path.append("?").append(key).append("=").append(&value)...`.
///
/// A `"&"` follows every pair except the last one overall; values of a
/// multi-valued key each count as one pair.
fn query_appends(query: &QueryParams) -> Option<Expr> {
    if query.is_empty() {
        return None;
    }

    let total = query.len();
    let mut builder = Expr::var(PATH_VAR).invoke(APPEND, vec![Expr::str("?")]);

    for (index, (key, value)) in query.pairs().enumerate() {
        builder = builder
            .invoke(APPEND, vec![Expr::str(key)])
            .invoke(APPEND, vec![Expr::str("=")])
            .invoke(APPEND, vec![Expr::borrow(Expr::var(value.name()))]);
        if index + 1 < total {
            builder = builder.invoke(APPEND, vec![Expr::str("&")]);
        }
    }

    Some(builder)
}
