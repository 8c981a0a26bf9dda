//! Core value types for proxy method definitions.
//!
//! - [`HttpMethod`] - HTTP method enumeration
//! - [`ValueRef`] - Reference to a value available inside the generated method
//! - [`ReturnType`] - Return type of the generated method
//! - [`MethodParam`] - A parameter of the generated method's signature

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods supported by generated proxies.
///
/// ## Examples
///
/// Parse from string:
///
/// ```
/// use std::str::FromStr;
/// use restproxy_define::HttpMethod;
///
/// let method = HttpMethod::from_str("GET").unwrap();
/// assert_eq!(method, HttpMethod::Get);
/// ```
///
/// Display as uppercase:
///
/// ```
/// use restproxy_define::HttpMethod;
///
/// assert_eq!(HttpMethod::Post.to_string(), "POST");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
}

/// Reference to a value the generated method can read, by name.
///
/// In practice this names one of the generated method's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueRef(String);

impl ValueRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValueRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ValueRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Return type of a generated proxy method.
///
/// Definition files spell void as `"void"`, `"()"` or leave it out entirely;
/// anything else is taken as a type name.
///
/// ## Examples
///
/// ```
/// use restproxy_define::ReturnType;
///
/// assert!(ReturnType::from("void").is_void());
/// assert!(ReturnType::from("()").is_void());
/// assert_eq!(ReturnType::from("User"), ReturnType::Named("User".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReturnType {
    #[default]
    Void,
    Named(String),
}

impl ReturnType {
    pub fn is_void(&self) -> bool {
        matches!(self, ReturnType::Void)
    }
}

impl From<&str> for ReturnType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "void" | "()" => ReturnType::Void,
            other => ReturnType::Named(other.to_string()),
        }
    }
}

impl From<String> for ReturnType {
    fn from(value: String) -> Self {
        ReturnType::from(value.as_str())
    }
}

impl From<ReturnType> for String {
    fn from(value: ReturnType) -> Self {
        match value {
            ReturnType::Void => "void".to_string(),
            ReturnType::Named(name) => name,
        }
    }
}

/// A parameter in the generated method's signature.
///
/// `ty` is the textual Rust type (e.g. `"u64"`, `"Option<String>"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodParam {
    pub name: String,
    pub ty: String,
}

impl MethodParam {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}
