//! Proxy method body synthesis.
//!
//! Runs the three generation steps in their fixed order for one descriptor:
//!
//! 1. Path construction ([`generate_path`])
//! 2. Request builder declaration ([`generate_request_builder`])
//! 3. Guarded send and outcome routing ([`generate_dispatch`])
//!
//! followed by the trailing `return None` for non-void methods. Steps 1-3
//! are skipped entirely for stub descriptors (no HTTP method).

use restproxy_define::EndpointMethodDescriptor;
use tracing::debug;

use crate::ast::{Block, BlockBuilder};
use crate::codegen::dispatch::{generate_dispatch, generate_trailing_return};
use crate::codegen::path::generate_path;
use crate::codegen::request::generate_request_builder;
use crate::context::GeneratorContext;
use crate::errors::GeneratorError;

/// Synthesizes the body of one proxy method.
///
/// The generator only reads its descriptor and context, so any number of
/// generators may run at the same time over a shared context.
///
/// ## Examples
///
/// ```
/// use restproxy_define::{EndpointMethodDescriptor, HttpMethod};
/// use restproxy_gen::codegen::ProxyMethodGenerator;
/// use restproxy_gen::context::GeneratorContext;
///
/// let descriptor = EndpointMethodDescriptor::new("list_users", "/users")
///     .with_method(HttpMethod::Get)
///     .with_return_type("Vec<User>");
/// let context = GeneratorContext::default();
///
/// let body = ProxyMethodGenerator::new(&descriptor, &context).generate().unwrap();
/// // path, request builder, guarded send, return
/// assert_eq!(body.len(), 4);
/// ```
pub struct ProxyMethodGenerator<'a> {
    descriptor: &'a EndpointMethodDescriptor,
    context: &'a GeneratorContext,
}

impl<'a> ProxyMethodGenerator<'a> {
    pub fn new(descriptor: &'a EndpointMethodDescriptor, context: &'a GeneratorContext) -> Self {
        Self {
            descriptor,
            context,
        }
    }

    /// Generates the method body into a fresh block.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::UnboundPlaceholder` if the path template
    /// references a placeholder without a binding.
    pub fn generate(&self) -> Result<Block, GeneratorError> {
        let mut block = Block::new();
        self.generate_into(&mut block)?;
        Ok(block)
    }

    /// Appends the method body to `out`.
    pub fn generate_into<B: BlockBuilder + ?Sized>(&self, out: &mut B) -> Result<(), GeneratorError> {
        let descriptor = self.descriptor;

        match descriptor.http_method {
            Some(method) => {
                debug!(
                    method = %descriptor.name,
                    http_method = %method,
                    path = %descriptor.raw_path(),
                    "generating proxy method"
                );
                generate_path(descriptor, &self.context.runtime, out)?;
                generate_request_builder(method, &self.context.runtime, out);
                generate_dispatch(descriptor, self.context, out);
            }
            None => {
                debug!(method = %descriptor.name, "generating stub proxy method");
            }
        }

        generate_trailing_return(descriptor, out);
        Ok(())
    }
}

/// Synthesizes the body of one proxy method.
///
/// Shorthand for `ProxyMethodGenerator::new(descriptor, context).generate()`.
pub fn generate_proxy_method(
    descriptor: &EndpointMethodDescriptor,
    context: &GeneratorContext,
) -> Result<Block, GeneratorError> {
    ProxyMethodGenerator::new(descriptor, context).generate()
}
