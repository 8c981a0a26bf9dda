//! Convenient re-exports for working with restproxy definitions.
//!
//! ```
//! use restproxy_define::prelude::*;
//!
//! let proxy = ProxyDefinition::new("UserService", "/api").with_method(
//!     EndpointMethodDescriptor::new("ping", "/ping").with_method(HttpMethod::Get),
//! );
//! assert_eq!(proxy.methods.len(), 1);
//! ```

pub use crate::descriptor::EndpointMethodDescriptor;
pub use crate::proxy::ProxyDefinition;
pub use crate::query::QueryParams;
pub use crate::template::{Placeholder, extract_placeholders};
pub use crate::types::{HttpMethod, MethodParam, ReturnType, ValueRef};
