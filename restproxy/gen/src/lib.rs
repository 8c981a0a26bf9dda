//! Restproxy code generator library.
//!
//! This crate synthesizes the bodies of client-side REST proxy methods from
//! the declarative descriptors in `restproxy-define`. For each method it
//! produces, in order:
//!
//! - The request path: the template with every `{placeholder}` substituted,
//!   followed by the query string
//! - A request builder over the HTTP method and the URL-encoded path
//! - A guarded send whose callback routes failures to the proxy's error
//!   handler and 2xx responses to its response handler
//! - A trailing `return None` for methods with a return type
//!
//! ## Modules
//!
//! - [`ast`] - Statement and expression IR the generators build
//! - [`context`] - Per-proxy handler statements and runtime type paths
//! - [`codegen`] - Method body synthesis and proxy assembly
//! - [`render`] - IR to `proc_macro2::TokenStream`
//! - [`validation`] - Pre-generation checks on definitions
//! - [`config`] - Loading definitions from TOML or JSON files
//! - [`output`] - Validation, formatting and file writing
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use restproxy_gen::config::load_definition;
//! use restproxy_gen::output::generate_and_write;
//! use restproxy_gen::validation::validate_definition;
//!
//! let proxy = load_definition(Path::new("definitions/user_service.toml")).unwrap();
//! validate_definition(&proxy).unwrap();
//!
//! // Generate code (dry_run=true prints instead of writing)
//! let code = generate_and_write(&proxy, Path::new("src/proxies"), true).unwrap();
//! println!("{}", code);
//! ```
//!
//! ## Generated Code Structure
//!
//! For a proxy named `UserService` with a `get_user` method:
//!
//! ```text
//! pub trait UserServiceHandler {
//!     fn handle_error(&self, error: RequestError);
//!     fn handle_response(&self, response: Response);
//! }
//!
//! pub struct UserService<H: UserServiceHandler> { ... }
//!
//! impl<H: UserServiceHandler> UserService<H> {
//!     pub fn get_user(&self, id: u64) -> Option<User> {
//!         let path: PathBuilder = PathBuilder::new("/api/users/{id}".replacen("{id}", &id.to_string(), 1));
//!         let request_builder: RequestBuilder = RequestBuilder::new("GET", url::encode(&path.to_string()));
//!         if let Err(error) = (|| -> Result<(), RequestError> {
//!             request_builder.send_request(None, RequestCallback { ... })?;
//!             Ok(())
//!         })() {
//!             self.handle_error(error);
//!         }
//!         return None;
//!     }
//! }
//! ```

pub mod ast;
pub mod codegen;
pub mod config;
pub mod context;
pub mod errors;
pub mod output;
pub mod render;
pub mod validation;
