//! Code generation modules for restproxy.
//!
//! This module contains the generators that synthesize proxy method bodies
//! from endpoint descriptors, and the assembly of the enclosing proxy type.
//! Method bodies are built as [`crate::ast`] statement blocks; only the
//! proxy assembly turns them into Rust tokens (through [`crate::render`]).
//!
//! ## Submodules
//!
//! - [`path`] - Path declaration with placeholder substitution and query string
//! - [`request`] - Request builder declaration over the encoded path
//! - [`dispatch`] - Guarded send call, callback and status classification
//! - [`method`] - Runs the steps above in order for one descriptor
//! - [`proxy`] - Handler trait, proxy struct and its methods
//!
//! ## Code Generation Flow
//!
//! 1. The path is built via [`generate_path`]
//! 2. The request builder is declared via [`generate_request_builder`]
//! 3. The send call and outcome routing are added via [`generate_dispatch`]
//! 4. Non-void methods end with `return None`
//!
//! [`ProxyMethodGenerator`] performs steps 1-4. [`generate_proxy`] runs it for
//! every method of a definition and returns the rendered `TokenStream`.

pub mod dispatch;
pub mod method;
pub mod path;
pub mod proxy;
pub mod request;

pub use dispatch::{Outcome, classify_status, generate_callback, generate_dispatch, is_success_status};
pub use method::{ProxyMethodGenerator, generate_proxy_method};
pub use path::generate_path;
pub use proxy::generate_proxy;
pub use request::generate_request_builder;
