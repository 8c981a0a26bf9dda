//! The endpoint method descriptor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::QueryParams;
use crate::template::extract_placeholders;
use crate::types::{HttpMethod, MethodParam, ReturnType, ValueRef};

/// Immutable description of one generated proxy method.
///
/// A descriptor is built once, handed to a single synthesis call by
/// reference, and never mutated afterwards.
///
/// ## Path Parameters
///
/// Every placeholder in `root_path + path_template` must have an entry in
/// `path_param_bindings`. Substitution follows the order in which the
/// placeholders occur in the template, never the order of the bindings map.
///
/// ## Examples
///
/// A stub method (no HTTP method) that returns nothing:
///
/// ```
/// use restproxy_define::EndpointMethodDescriptor;
///
/// let stub = EndpointMethodDescriptor::new("noop", "/noop");
/// assert!(stub.is_stub());
/// assert!(stub.return_type.is_void());
/// ```
///
/// A POST with a body and a query parameter:
///
/// ```
/// use restproxy_define::{EndpointMethodDescriptor, HttpMethod, MethodParam};
///
/// let create = EndpointMethodDescriptor::new("create_user", "/users")
///     .with_method(HttpMethod::Post)
///     .with_param(MethodParam::new("user", "User"))
///     .with_param(MethodParam::new("notify", "bool"))
///     .with_query_param("notify", "notify")
///     .with_entity("user");
///
/// assert_eq!(create.query_params.len(), 1);
/// assert_eq!(create.entity_param.as_ref().map(|v| v.name()), Some("user"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMethodDescriptor {
    /// Name of the generated method.
    pub name: String,
    /// HTTP method; `None` generates a stub that makes no network call.
    #[serde(default, rename = "method")]
    pub http_method: Option<HttpMethod>,
    /// Path template relative to `root_path` (e.g. `/users/{id}`).
    #[serde(rename = "path")]
    pub path_template: String,
    /// Placeholder name → value reference.
    #[serde(default, rename = "path_params")]
    pub path_param_bindings: BTreeMap<String, ValueRef>,
    /// Ordered query bindings.
    #[serde(default, rename = "query")]
    pub query_params: QueryParams,
    /// Value sent as the request body, if any.
    #[serde(default, rename = "entity")]
    pub entity_param: Option<ValueRef>,
    #[serde(default, rename = "returns")]
    pub return_type: ReturnType,
    /// Prefix prepended to `path_template`; set from the enclosing proxy.
    #[serde(skip)]
    pub root_path: String,
    /// Parameters of the generated method's signature.
    #[serde(default)]
    pub params: Vec<MethodParam>,
}

impl EndpointMethodDescriptor {
    /// Creates a stub descriptor with no HTTP method, bindings or parameters.
    pub fn new(name: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            http_method: None,
            path_template: path_template.into(),
            path_param_bindings: BTreeMap::new(),
            query_params: QueryParams::new(),
            entity_param: None,
            return_type: ReturnType::Void,
            root_path: String::new(),
            params: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    pub fn with_param(mut self, param: MethodParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_path_param(
        mut self,
        placeholder: impl Into<String>,
        value: impl Into<ValueRef>,
    ) -> Self {
        self.path_param_bindings
            .insert(placeholder.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<ValueRef>) -> Self {
        self.query_params.push(key, value);
        self
    }

    pub fn with_entity(mut self, value: impl Into<ValueRef>) -> Self {
        self.entity_param = Some(value.into());
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<ReturnType>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// `root_path + path_template`, before any substitution.
    pub fn raw_path(&self) -> String {
        format!("{}{}", self.root_path, self.path_template)
    }

    /// True when no network call is generated for this method.
    pub fn is_stub(&self) -> bool {
        self.http_method.is_none()
    }

    /// Looks up the value bound to a placeholder name.
    pub fn path_param(&self, placeholder: &str) -> Option<&ValueRef> {
        self.path_param_bindings.get(placeholder)
    }

    /// Placeholder names in the raw path that have no binding, in order.
    pub fn unbound_placeholders(&self) -> Vec<String> {
        let raw = self.raw_path();
        extract_placeholders(&raw)
            .iter()
            .filter(|p| !self.path_param_bindings.contains_key(p.name))
            .map(|p| p.name.to_string())
            .collect()
    }

    /// Every value reference the descriptor uses, in path, query, entity order.
    pub fn value_refs(&self) -> Vec<&ValueRef> {
        let raw = self.raw_path();
        let mut refs: Vec<&ValueRef> = extract_placeholders(&raw)
            .iter()
            .filter_map(|p| self.path_param_bindings.get(p.name))
            .collect();
        refs.extend(self.query_params.pairs().map(|(_, value)| value));
        refs.extend(self.entity_param.iter());
        refs
    }
}
