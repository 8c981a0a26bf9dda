//! Restproxy Definition Library
//!
//! This crate provides the types that describe client-side proxy methods in a
//! declarative way. These descriptions are consumed by `restproxy-gen`, which
//! synthesizes the body of each proxy method: URL construction, request
//! dispatch and outcome routing.
//!
//! ## Core Types
//!
//! - [`EndpointMethodDescriptor`] - Everything needed to generate one proxy method
//! - [`ProxyDefinition`] - An enclosing proxy with a root path and its methods
//! - [`HttpMethod`] - HTTP methods (GET, POST, PUT, etc.)
//! - [`QueryParams`] - Ordered query key → value references mapping
//! - [`ValueRef`] - Reference to a value available in the generated method
//! - [`ReturnType`] - Void or a named return type
//! - [`Placeholder`] - A `{name}` placeholder found in a path template
//!
//! ## Examples
//!
//! ```
//! use restproxy_define::{EndpointMethodDescriptor, HttpMethod, MethodParam};
//!
//! let descriptor = EndpointMethodDescriptor::new("get_user", "/users/{id}")
//!     .with_method(HttpMethod::Get)
//!     .with_root_path("/api")
//!     .with_param(MethodParam::new("id", "u64"))
//!     .with_path_param("id", "id")
//!     .with_return_type("User");
//!
//! assert_eq!(descriptor.raw_path(), "/api/users/{id}");
//! assert!(!descriptor.is_stub());
//! ```

pub mod descriptor;
pub mod prelude;
pub mod proxy;
pub mod query;
pub mod template;
pub mod types;

pub use descriptor::EndpointMethodDescriptor;
pub use proxy::{DEFAULT_RUNTIME_CRATE, ProxyDefinition};
pub use query::{QueryEntry, QueryParams};
pub use template::{Placeholder, extract_placeholders};
pub use types::{HttpMethod, MethodParam, ReturnType, ValueRef};
