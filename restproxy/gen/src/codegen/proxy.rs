//! Proxy type assembly.
//!
//! Generates the enclosing proxy for a [`ProxyDefinition`]: a handler trait
//! receiving every outcome, a struct holding the handler, and one method per
//! descriptor whose body comes from [`ProxyMethodGenerator`].
//!
//! ## Examples
//!
//! For a proxy named `UserService` rooted at `/api`:
//!
//! ```ignore
//! pub trait UserServiceHandler {
//!     fn handle_error(&self, error: ::restproxy_runtime::RequestError);
//!     fn handle_response(&self, response: ::restproxy_runtime::Response);
//! }
//!
//! pub struct UserService<H: UserServiceHandler> {
//!     handler: H,
//! }
//!
//! impl<H: UserServiceHandler> UserService<H> {
//!     pub const ROOT_PATH: &'static str = "/api";
//!
//!     pub fn new(handler: H) -> Self { ... }
//!
//!     /// `GET /api/users/{id}`
//!     pub fn get_user(&self, id: u64) -> Option<User> { ... }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use restproxy_define::{EndpointMethodDescriptor, MethodParam, ProxyDefinition, ReturnType};
use tracing::info;

use crate::codegen::method::ProxyMethodGenerator;
use crate::context::{ERROR_BINDING, GeneratorContext, HandlerStatements, RESPONSE_BINDING, RuntimePaths};
use crate::errors::GeneratorError;
use crate::render::{ident, parse_type, parse_type_str, render_block};

/// Generates the handler trait, proxy struct and methods for `definition`.
///
/// The generation context is built once and shared by every method.
///
/// ## Errors
///
/// Returns an error if a name is not a valid identifier, a type does not
/// parse, or a method's path template has an unbound placeholder.
pub fn generate_proxy(definition: &ProxyDefinition) -> Result<TokenStream, GeneratorError> {
    let context = GeneratorContext::new(
        HandlerStatements::delegate_to_self(),
        RuntimePaths::new(definition.runtime_crate.as_str()),
    );

    let proxy_name = ident(&definition.name)?;
    let handler_trait = format_ident!("{}Handler", proxy_name);
    let error_ty = parse_type(&context.runtime.request_error())?;
    let response_ty = parse_type(&context.runtime.response())?;
    let error = ident(ERROR_BINDING)?;
    let response = ident(RESPONSE_BINDING)?;
    let root_path = &definition.root_path;

    let proxy_doc = definition.description.as_ref().map(|description| {
        let description = format!(" {description}");
        quote! { #[doc = #description] }
    });
    let handler_doc = format!(" Receives the outcome of every `{}` call.", definition.name);

    let methods = definition
        .methods
        .iter()
        .map(|descriptor| generate_method(descriptor, &context))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        proxy = %definition.name,
        methods = methods.len(),
        "generated proxy"
    );

    Ok(quote! {
        #[doc = #handler_doc]
        pub trait #handler_trait {
            /// Called when a request fails to send, fails in transport, or
            /// receives a non-2xx status.
            fn handle_error(&self, #error: #error_ty);

            /// Called with every 2xx response.
            fn handle_response(&self, #response: #response_ty);
        }

        #proxy_doc
        pub struct #proxy_name<H: #handler_trait> {
            handler: H,
        }

        impl<H: #handler_trait> #proxy_name<H> {
            /// Path prefix shared by every method.
            pub const ROOT_PATH: &'static str = #root_path;

            /// Creates a proxy delivering outcomes to `handler`.
            pub fn new(handler: H) -> Self {
                Self { handler }
            }

            fn handle_error(&self, #error: #error_ty) {
                self.handler.handle_error(#error)
            }

            fn handle_response(&self, #response: #response_ty) {
                self.handler.handle_response(#response)
            }

            #(#methods)*
        }
    })
}

/// Generates one `pub fn` from a descriptor.
fn generate_method(
    descriptor: &EndpointMethodDescriptor,
    context: &GeneratorContext,
) -> Result<TokenStream, GeneratorError> {
    let name = ident(&descriptor.name)?;
    let params = descriptor
        .params
        .iter()
        .map(render_method_param)
        .collect::<Result<Vec<_>, _>>()?;
    let output = match &descriptor.return_type {
        ReturnType::Void => None,
        ReturnType::Named(ty) => {
            let ty = parse_type_str(ty)?;
            Some(quote! { -> Option<#ty> })
        }
    };

    let body = ProxyMethodGenerator::new(descriptor, context).generate()?;
    let body = render_block(&body)?;

    let doc = match descriptor.http_method {
        Some(method) => format!(" `{} {}`", method, descriptor.raw_path()),
        None => " Sends no request.".to_string(),
    };

    Ok(quote! {
        #[doc = #doc]
        pub fn #name(&self #(, #params)*) #output {
            #body
        }
    })
}

fn render_method_param(param: &MethodParam) -> Result<TokenStream, GeneratorError> {
    let name = ident(&param.name)?;
    let ty = parse_type_str(&param.ty)?;
    Ok(quote! { #name: #ty })
}
