//! Enclosing proxy definitions.

use serde::{Deserialize, Serialize};

use crate::descriptor::EndpointMethodDescriptor;

/// Crate path the generated code uses for runtime transport types.
pub const DEFAULT_RUNTIME_CRATE: &str = "restproxy_runtime";

/// A proxy type and the methods generated on it.
///
/// Every method inherits the proxy's `root_path`; the path templates on the
/// methods are relative to it.
///
/// ## Examples
///
/// ```
/// use restproxy_define::{EndpointMethodDescriptor, HttpMethod, ProxyDefinition};
///
/// let proxy = ProxyDefinition::new("UserService", "/api")
///     .with_method(EndpointMethodDescriptor::new("list_users", "/users").with_method(HttpMethod::Get));
///
/// assert_eq!(proxy.methods[0].raw_path(), "/api/users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProxyDefinition", into = "RawProxyDefinition")]
pub struct ProxyDefinition {
    /// Name of the generated proxy struct (PascalCase).
    pub name: String,
    pub description: Option<String>,
    /// Path prefix shared by every method.
    pub root_path: String,
    /// Crate path of the runtime transport types.
    pub runtime_crate: String,
    pub methods: Vec<EndpointMethodDescriptor>,
}

impl ProxyDefinition {
    pub fn new(name: impl Into<String>, root_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            root_path: root_path.into(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            methods: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }

    /// Adds a method, rooting it at this proxy's root path.
    pub fn with_method(mut self, method: EndpointMethodDescriptor) -> Self {
        let method = method.with_root_path(self.root_path.clone());
        self.methods.push(method);
        self
    }
}

/// On-disk shape of a proxy definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProxyDefinition {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    root_path: String,
    #[serde(default = "default_runtime_crate")]
    runtime_crate: String,
    #[serde(default)]
    methods: Vec<EndpointMethodDescriptor>,
}

fn default_runtime_crate() -> String {
    DEFAULT_RUNTIME_CRATE.to_string()
}

impl From<RawProxyDefinition> for ProxyDefinition {
    fn from(raw: RawProxyDefinition) -> Self {
        let mut proxy = ProxyDefinition::new(raw.name, raw.root_path);
        proxy.description = raw.description;
        proxy.runtime_crate = raw.runtime_crate;
        raw.methods
            .into_iter()
            .fold(proxy, |proxy, method| proxy.with_method(method))
    }
}

impl From<ProxyDefinition> for RawProxyDefinition {
    fn from(proxy: ProxyDefinition) -> Self {
        Self {
            name: proxy.name,
            description: proxy.description,
            root_path: proxy.root_path,
            runtime_crate: proxy.runtime_crate,
            methods: proxy.methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HttpMethod;

    #[test]
    fn with_method_applies_root_path() {
        let proxy = ProxyDefinition::new("Svc", "/root")
            .with_method(EndpointMethodDescriptor::new("a", "/a").with_root_path("/ignored"));
        assert_eq!(proxy.methods[0].root_path, "/root");
    }

    #[test]
    fn deserialized_methods_inherit_root_path() {
        let toml_src = r#"
            name = "UserService"
            root_path = "/api"

            [[methods]]
            name = "list_users"
            method = "GET"
            path = "/users"

            [[methods]]
            name = "noop"
            path = "/noop"
        "#;
        let proxy: ProxyDefinition = toml::from_str(toml_src).unwrap();
        assert_eq!(proxy.runtime_crate, DEFAULT_RUNTIME_CRATE);
        assert_eq!(proxy.methods.len(), 2);
        assert_eq!(proxy.methods[0].raw_path(), "/api/users");
        assert_eq!(proxy.methods[0].http_method, Some(HttpMethod::Get));
        assert!(proxy.methods[1].is_stub());
        assert_eq!(proxy.methods[1].root_path, "/api");
    }

    #[test]
    fn custom_runtime_crate_is_kept() {
        let proxy: ProxyDefinition =
            serde_json::from_str(r#"{"name": "Svc", "runtime_crate": "my_transport"}"#).unwrap();
        assert_eq!(proxy.runtime_crate, "my_transport");
        assert!(proxy.root_path.is_empty());
        assert!(proxy.methods.is_empty());
    }
}
