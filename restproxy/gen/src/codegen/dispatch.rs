//! Send call and outcome routing.
//!
//! Emits the guarded send call whose callback routes every outcome to the
//! proxy's handler statements:
//!
//! ```ignore
//! try {
//!     request_builder.send_request(None, RequestCallback {
//!         on_error: |_request, error| <error handler>,
//!         on_response_received: |_request, response| {
//!             if response.status_code() >= 200 && response.status_code() < 300 {
//!                 <response handler>
//!             } else {
//!                 let error = RequestError::new(response.status_code().to_string());
//!                 <error handler>
//!             }
//!         },
//!     });
//! } catch (error: RequestError) {
//!     <error handler>
//! }
//! ```
//!
//! Send-time failures, asynchronous transport failures and non-2xx statuses
//! all end in the same error handler. Nothing is retried.

use std::ops::Range;

use restproxy_define::EndpointMethodDescriptor;

use crate::ast::{Block, BlockBuilder, Expr, MethodOverride, Param, Stmt};
use crate::context::{ERROR_BINDING, GeneratorContext, REQUEST_BUILDER_VAR, RESPONSE_BINDING};

/// Statuses routed to the response handler. Half-open: 300 fails.
pub const SUCCESS_STATUS: Range<u16> = 200..300;

/// Terminal state of one generated call at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Returns `true` for statuses in `200..300`.
///
/// ## Examples
///
/// ```
/// use restproxy_gen::codegen::dispatch::is_success_status;
///
/// assert!(is_success_status(200));
/// assert!(is_success_status(299));
/// assert!(!is_success_status(300));
/// assert!(!is_success_status(199));
/// ```
pub fn is_success_status(status: u16) -> bool {
    SUCCESS_STATUS.contains(&status)
}

/// Classifies a received status the way the generated callback does.
pub fn classify_status(status: u16) -> Outcome {
    if is_success_status(status) {
        Outcome::Succeeded
    } else {
        Outcome::Failed
    }
}

/// Appends the guarded send call for `descriptor`.
pub fn generate_dispatch<B: BlockBuilder + ?Sized>(
    descriptor: &EndpointMethodDescriptor,
    context: &GeneratorContext,
    out: &mut B,
) {
    let body = match &descriptor.entity_param {
        None => Expr::Null,
        Some(entity) => Expr::some(Expr::borrow(Expr::var(entity.name()))),
    };

    let send = Expr::var(REQUEST_BUILDER_VAR)
        .invoke("send_request", vec![body, generate_callback(context)]);

    out.append(Stmt::try_catch(
        Block::of(vec![Stmt::expr(send)]),
        context.runtime.request_error(),
        ERROR_BINDING,
        Block::of(vec![context.handlers.error_stmt()]),
    ));
}

/// Builds the anonymous callback object passed to `send_request`.
pub fn generate_callback(context: &GeneratorContext) -> Expr {
    let runtime = &context.runtime;
    let handlers = &context.handlers;

    let on_error = MethodOverride {
        name: "on_error".to_string(),
        params: vec![
            Param::new("_request", runtime.request()),
            Param::new(ERROR_BINDING, runtime.request_error()),
        ],
        body: Block::of(vec![handlers.error_stmt()]),
    };

    let status_error = Stmt::Declare {
        name: ERROR_BINDING.to_string(),
        ty: Some(runtime.request_error()),
        mutable: false,
        init: Expr::new_object(
            runtime.request_error(),
            vec![status_code().invoke("to_string", vec![])],
        ),
    };

    let on_response = MethodOverride {
        name: "on_response_received".to_string(),
        params: vec![
            Param::new("_request", runtime.request()),
            Param::new(RESPONSE_BINDING, runtime.response()),
        ],
        body: Block::of(vec![Stmt::if_else(
            status_code()
                .greater_or_equal(Expr::int(SUCCESS_STATUS.start.into()))
                .and(status_code().less_than(Expr::int(SUCCESS_STATUS.end.into()))),
            Block::of(vec![handlers.response_stmt()]),
            Block::of(vec![status_error, handlers.error_stmt()]),
        )]),
    };

    Expr::anonymous(runtime.request_callback(), vec![on_error, on_response])
}

/// Appends `return None` for methods with a return type.
///
/// The real result reaches the caller through the response handler; the
/// returned value is a placeholder.
pub fn generate_trailing_return<B: BlockBuilder + ?Sized>(
    descriptor: &EndpointMethodDescriptor,
    out: &mut B,
) {
    if !descriptor.return_type.is_void() {
        out.append(Stmt::return_value(Expr::Null));
    }
}

fn status_code() -> Expr {
    Expr::var(RESPONSE_BINDING).invoke("status_code", vec![])
}
