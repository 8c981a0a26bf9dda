//! Validation module for proxy definitions.
//!
//! Runs before code generation so a bad definition is reported against the
//! method that caused it, instead of surfacing as invalid generated code.
//!
//! ## Validation Checks
//!
//! - **Identifiers**: proxy, method and parameter names must be usable as
//!   Rust identifiers
//! - **Types**: parameter and return types must parse as Rust types
//! - **Unique methods**: no two methods on a proxy share a name
//! - **Reserved names**: methods cannot reuse the proxy's own `new` or
//!   handler methods, and parameters cannot reuse the locals a generated
//!   body declares
//! - **Bindings**: every placeholder in a request method's path has a
//!   binding, and every binding, query value and entity names a declared
//!   parameter
//!
//! ## Examples
//!
//! ```
//! use restproxy_define::{EndpointMethodDescriptor, HttpMethod, MethodParam, ProxyDefinition};
//! use restproxy_gen::validation::validate_definition;
//!
//! let proxy = ProxyDefinition::new("UserService", "/api").with_method(
//!     EndpointMethodDescriptor::new("get_user", "/users/{id}")
//!         .with_method(HttpMethod::Get)
//!         .with_param(MethodParam::new("id", "u64"))
//!         .with_path_param("id", "id"),
//! );
//!
//! assert!(validate_definition(&proxy).is_ok());
//! ```

use std::collections::HashSet;

use restproxy_define::{EndpointMethodDescriptor, ProxyDefinition, ReturnType};

use crate::context::{PATH_VAR, REQUEST_BUILDER_VAR};
use crate::errors::GeneratorError;
use crate::render::{ident, parse_type_str};

/// Inherent methods every generated proxy defines.
const RESERVED_METHODS: [&str; 3] = ["new", "handle_error", "handle_response"];

/// Locals declared ahead of the send call in a generated body.
const RESERVED_PARAMS: [&str; 2] = [PATH_VAR, REQUEST_BUILDER_VAR];

/// Validates a proxy definition before code generation.
///
/// ## Errors
///
/// Returns the first problem found, checking the proxy name, then each
/// method in declaration order:
///
/// - `GeneratorError::InvalidIdentifier` for a name that is not an identifier
/// - `GeneratorError::DuplicateMethod` for a repeated method name
/// - `GeneratorError::ReservedName` for a method or parameter name the
///   generated code already uses
/// - `GeneratorError::InvalidType` for a type that does not parse
/// - `GeneratorError::UnboundPlaceholder` for a placeholder with no binding
/// - `GeneratorError::UnknownValueRef` for a binding to an undeclared parameter
pub fn validate_definition(definition: &ProxyDefinition) -> Result<(), GeneratorError> {
    check_identifier(&definition.name)?;

    let mut seen = HashSet::new();
    for method in &definition.methods {
        if !seen.insert(method.name.as_str()) {
            return Err(GeneratorError::DuplicateMethod {
                proxy: definition.name.clone(),
                method: method.name.clone(),
            });
        }
        validate_method(method)?;
    }

    Ok(())
}

/// Validates a single method descriptor.
pub fn validate_method(method: &EndpointMethodDescriptor) -> Result<(), GeneratorError> {
    check_identifier(&method.name)?;
    if RESERVED_METHODS.contains(&method.name.as_str()) {
        return Err(reserved(method, &method.name));
    }

    for param in &method.params {
        check_identifier(&param.name)?;
        if RESERVED_PARAMS.contains(&param.name.as_str()) {
            return Err(reserved(method, &param.name));
        }
        parse_type_str(&param.ty)?;
    }
    if let ReturnType::Named(ty) = &method.return_type {
        parse_type_str(ty)?;
    }

    // Stubs never substitute or send, so their bindings are unused
    if method.is_stub() {
        return Ok(());
    }

    if let Some(placeholder) = method.unbound_placeholders().into_iter().next() {
        return Err(GeneratorError::UnboundPlaceholder {
            method: method.name.clone(),
            placeholder,
        });
    }

    let declared: HashSet<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
    if let Some(unknown) = method
        .value_refs()
        .into_iter()
        .find(|value| !declared.contains(value.name()))
    {
        return Err(GeneratorError::UnknownValueRef {
            method: method.name.clone(),
            value: unknown.name().to_string(),
        });
    }

    Ok(())
}

fn reserved(method: &EndpointMethodDescriptor, name: &str) -> GeneratorError {
    GeneratorError::ReservedName {
        method: method.name.clone(),
        name: name.to_string(),
    }
}

/// `self` is valid in generated bodies but never as a declared name.
fn check_identifier(name: &str) -> Result<(), GeneratorError> {
    if name == "self" {
        return Err(GeneratorError::InvalidIdentifier(name.to_string()));
    }
    ident(name).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use restproxy_define::{HttpMethod, MethodParam};

    fn get_user() -> EndpointMethodDescriptor {
        EndpointMethodDescriptor::new("get_user", "/users/{id}")
            .with_method(HttpMethod::Get)
            .with_param(MethodParam::new("id", "u64"))
            .with_param(MethodParam::new("verbose", "bool"))
            .with_path_param("id", "id")
            .with_query_param("verbose", "verbose")
            .with_return_type("User")
    }

    #[test]
    fn valid_definition_passes() {
        let proxy = ProxyDefinition::new("UserService", "/api").with_method(get_user());
        assert!(validate_definition(&proxy).is_ok());
    }

    #[test]
    fn empty_definition_passes() {
        assert!(validate_definition(&ProxyDefinition::new("Empty", "")).is_ok());
    }

    #[test]
    fn duplicate_method_is_rejected() {
        let proxy = ProxyDefinition::new("UserService", "/api")
            .with_method(get_user())
            .with_method(get_user());
        let err = validate_definition(&proxy).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::DuplicateMethod { ref proxy, ref method }
                if proxy == "UserService" && method == "get_user"
        ));
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert!(matches!(
            validate_definition(&ProxyDefinition::new("user-service", "/")),
            Err(GeneratorError::InvalidIdentifier(_))
        ));

        let keyword = EndpointMethodDescriptor::new("type", "/");
        assert!(matches!(
            validate_method(&keyword),
            Err(GeneratorError::InvalidIdentifier(name)) if name == "type"
        ));

        let self_param = EndpointMethodDescriptor::new("get", "/")
            .with_param(MethodParam::new("self", "u8"));
        assert!(matches!(
            validate_method(&self_param),
            Err(GeneratorError::InvalidIdentifier(name)) if name == "self"
        ));
    }

    #[test]
    fn proxy_method_names_are_reserved() {
        for name in ["new", "handle_error", "handle_response"] {
            let method = EndpointMethodDescriptor::new(name, "/").with_method(HttpMethod::Get);
            assert!(
                matches!(
                    validate_method(&method),
                    Err(GeneratorError::ReservedName { method, name: reserved })
                        if method == name && reserved == name
                ),
                "{name} should be reserved"
            );
        }
    }

    #[test]
    fn path_local_is_reserved_as_param() {
        let method = EndpointMethodDescriptor::new("find", "/files")
            .with_method(HttpMethod::Get)
            .with_param(MethodParam::new("path", "String"))
            .with_query_param("path", "path");
        assert!(matches!(
            validate_method(&method),
            Err(GeneratorError::ReservedName { method, name }) if method == "find" && name == "path"
        ));
    }

    #[test]
    fn request_builder_local_is_reserved_as_param() {
        let method = EndpointMethodDescriptor::new("upload", "/files")
            .with_method(HttpMethod::Post)
            .with_param(MethodParam::new("request_builder", "String"))
            .with_entity("request_builder");
        assert!(matches!(
            validate_method(&method),
            Err(GeneratorError::ReservedName { name, .. }) if name == "request_builder"
        ));
    }

    #[test]
    fn reserved_name_message_names_method_and_name() {
        let proxy = ProxyDefinition::new("Files", "/api").with_method(
            EndpointMethodDescriptor::new("find", "/files")
                .with_param(MethodParam::new("path", "String")),
        );
        let message = validate_definition(&proxy).unwrap_err().to_string();
        assert!(message.contains("find"));
        assert!(message.contains("'path'"));
    }

    #[test]
    fn invalid_types_are_rejected() {
        let param = EndpointMethodDescriptor::new("get", "/")
            .with_param(MethodParam::new("id", "Vec<u8"));
        assert!(matches!(
            validate_method(&param),
            Err(GeneratorError::InvalidType { .. })
        ));

        let returns = EndpointMethodDescriptor::new("get", "/").with_return_type("123");
        assert!(matches!(
            validate_method(&returns),
            Err(GeneratorError::InvalidType { .. })
        ));
    }

    #[test]
    fn unbound_placeholder_is_rejected() {
        let method = EndpointMethodDescriptor::new("get", "/users/{id}/posts/{post}")
            .with_method(HttpMethod::Get)
            .with_param(MethodParam::new("id", "u64"))
            .with_path_param("id", "id");
        let err = validate_method(&method).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::UnboundPlaceholder { ref placeholder, .. } if placeholder == "post"
        ));
    }

    #[test]
    fn binding_to_undeclared_param_is_rejected() {
        let method = EndpointMethodDescriptor::new("get", "/users/{id}")
            .with_method(HttpMethod::Get)
            .with_path_param("id", "user_id");
        let err = validate_method(&method).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::UnknownValueRef { ref value, .. } if value == "user_id"
        ));
    }

    #[test]
    fn undeclared_query_value_and_entity_are_rejected() {
        let query = get_user().with_query_param("page", "page");
        assert!(matches!(
            validate_method(&query),
            Err(GeneratorError::UnknownValueRef { value, .. }) if value == "page"
        ));

        let entity = get_user().with_entity("body");
        assert!(matches!(
            validate_method(&entity),
            Err(GeneratorError::UnknownValueRef { value, .. }) if value == "body"
        ));
    }

    #[test]
    fn stub_bindings_are_not_checked() {
        let stub = EndpointMethodDescriptor::new("reserved", "/users/{id}").with_entity("missing");
        assert!(validate_method(&stub).is_ok());
    }

    #[test]
    fn error_display_is_actionable() {
        let method = EndpointMethodDescriptor::new("get", "/users/{id}").with_method(HttpMethod::Get);
        let message = validate_method(&method).unwrap_err().to_string();
        assert!(message.contains("get"));
        assert!(message.contains("{id}"));
    }
}
