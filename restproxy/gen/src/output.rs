//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: turning a proxy
//! definition into a complete Rust file, validating it, formatting it and
//! writing it to disk atomically.
//!
//! ## Output Structure
//!
//! One module file per proxy, plus a `mod.rs` declaring them:
//! ```text
//! src/proxies/
//! ├── mod.rs            # Module declarations and re-exports
//! └── user_service.rs   # UserServiceHandler, UserService<H>
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::Path;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use restproxy_define::ProxyDefinition;
use tracing::{debug, info};

use crate::codegen::generate_proxy;
use crate::errors::GeneratorError;
use crate::render::ident;

const GENERATED_NOTICE: &str =
    "// This code was automatically generated by restproxy-gen. Do not edit manually.";

/// A formatted file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub filename: String,
    pub content: String,
}

/// Converts a PascalCase or camelCase name to snake_case.
///
/// Acronyms stay together: `HTTPClient` becomes `http_client`.
///
/// ## Examples
///
/// ```
/// use restproxy_gen::output::to_snake_case;
///
/// assert_eq!(to_snake_case("UserService"), "user_service");
/// assert_eq!(to_snake_case("HTTPClient"), "http_client");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut snake = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) => p.is_uppercase() && next.is_some_and(|n| n.is_lowercase()),
            };
            if boundary {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }

    snake
}

/// Module name of the file generated for `definition`.
pub fn module_name(definition: &ProxyDefinition) -> String {
    to_snake_case(&definition.name)
}

/// Validates generated code using syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease, prepending the
/// auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{}\n\n{}", GENERATED_NOTICE, formatted)
}

/// Writes content to a file atomically using temp file + rename.
///
/// Readers see either the old or the new content, never a partial write.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if parent directories cannot be
/// created, the temp file cannot be written, or the rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates, validates and formats the module source for one proxy.
pub fn generate_proxy_source(definition: &ProxyDefinition) -> Result<String, GeneratorError> {
    let name = &definition.name;
    let module_doc = format!(" Generated proxy for `{name}`.");
    let proxy = generate_proxy(definition)?;

    let tokens = quote! {
        #![doc = #module_doc]

        #proxy
    };
    let file = validate_code(&tokens)?;
    Ok(format_code(&file))
}

/// Assembles `mod.rs` declaring and re-exporting every proxy module.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidIdentifier` if a proxy or module name is
/// not a valid identifier.
pub fn assemble_mod_rs(definitions: &[&ProxyDefinition]) -> Result<TokenStream, GeneratorError> {
    let modules = definitions
        .iter()
        .map(|definition| {
            let module = ident(&module_name(definition))?;
            let proxy = ident(&definition.name)?;
            let handler = format_ident!("{}Handler", proxy);
            Ok(quote! {
                pub mod #module;
                pub use #module::{#proxy, #handler};
            })
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    Ok(quote! {
        //! Generated REST proxies.

        #(#modules)*
    })
}

/// Generates and writes the module for one proxy.
///
/// ## Returns
///
/// The formatted module code (useful for dry-run mode or testing).
///
/// ## Errors
///
/// Returns an error if generation fails, the output directory does not
/// exist, or writing fails.
pub fn generate_and_write(
    definition: &ProxyDefinition,
    output_dir: &Path,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let content = generate_proxy_source(definition)?;
    let filename = format!("{}.rs", module_name(definition));

    if dry_run {
        println!("=== {} ===\n{}\n", filename, content);
    } else {
        ensure_output_dir(output_dir)?;
        let path = output_dir.join(&filename);
        write_atomic(&path, &content)?;
        info!(path = %path.display(), "wrote proxy module");
    }

    Ok(content)
}

/// Generates every proxy module plus `mod.rs`.
///
/// Nothing is written unless every module generates successfully.
///
/// ## Returns
///
/// The generated files, `mod.rs` first.
pub fn generate_and_write_all(
    definitions: &[&ProxyDefinition],
    output_dir: &Path,
    dry_run: bool,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let mut files = Vec::with_capacity(definitions.len() + 1);
    for definition in definitions {
        debug!(proxy = %definition.name, "generating proxy module");
        files.push(GeneratedFile {
            filename: format!("{}.rs", module_name(definition)),
            content: generate_proxy_source(definition)?,
        });
    }

    let mod_file = validate_code(&assemble_mod_rs(definitions)?)?;
    files.insert(
        0,
        GeneratedFile {
            filename: "mod.rs".to_string(),
            content: format_code(&mod_file),
        },
    );

    if dry_run {
        for file in &files {
            println!("=== {} ===\n{}\n", file.filename, file.content);
        }
    } else {
        ensure_output_dir(output_dir)?;
        for file in &files {
            write_atomic(&output_dir.join(&file.filename), &file.content)?;
        }
        info!(
            output = %output_dir.display(),
            files = files.len(),
            "wrote generated proxies"
        );
    }

    Ok(files)
}

fn ensure_output_dir(output_dir: &Path) -> Result<(), GeneratorError> {
    if output_dir.is_dir() {
        Ok(())
    } else {
        Err(GeneratorError::OutputDirNotFound(
            output_dir.display().to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restproxy_define::{EndpointMethodDescriptor, HttpMethod, MethodParam};
    use tempfile::TempDir;

    fn user_service() -> ProxyDefinition {
        ProxyDefinition::new("UserService", "/api").with_method(
            EndpointMethodDescriptor::new("get_user", "/users/{id}")
                .with_method(HttpMethod::Get)
                .with_param(MethodParam::new("id", "u64"))
                .with_param(MethodParam::new("verbose", "bool"))
                .with_path_param("id", "id")
                .with_query_param("verbose", "verbose")
                .with_return_type("User"),
        )
    }

    // === to_snake_case tests ===

    #[test]
    fn snake_case_conversions() {
        assert_eq!(to_snake_case("UserService"), "user_service");
        assert_eq!(to_snake_case("userService"), "user_service");
        assert_eq!(to_snake_case("HTTPClient"), "http_client");
        assert_eq!(to_snake_case("Api2Service"), "api2_service");
        assert_eq!(to_snake_case("Svc"), "svc");
        assert_eq!(to_snake_case("Already_Split"), "already_split");
    }

    // === validate_code tests ===

    #[test]
    fn validate_code_rejects_invalid_code() {
        let invalid_tokens = quote! {
            let x =
        };

        match validate_code(&invalid_tokens) {
            Err(GeneratorError::CodeGenError(_)) => {}
            Err(other) => panic!("Unexpected error type: {:?}", other),
            Ok(_) => panic!("Expected error but got success"),
        }
    }

    // === format_code tests ===

    #[test]
    fn format_code_prepends_notice() {
        let file = validate_code(&quote! { pub struct A; }).unwrap();
        let formatted = format_code(&file);
        assert!(formatted.starts_with("// This code was automatically generated by restproxy-gen."));
        assert!(formatted.contains("pub struct A;"));
    }

    #[test]
    fn proxy_source_is_formatted() {
        let code = generate_proxy_source(&user_service()).unwrap();

        assert!(code.contains("//! Generated proxy for `UserService`."));
        assert!(code.contains("pub trait UserServiceHandler"));
        assert!(code.contains("pub struct UserService<H: UserServiceHandler>"));
        assert!(code.contains("pub fn get_user(&self, id: u64, verbose: bool) -> Option<User>"));
        assert!(code.contains(".replacen(\"{id}\", &id.to_string(), 1)"));
        assert!(code.contains("return None;"));
    }

    // === write_atomic tests ===

    #[test]
    fn write_atomic_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.rs");

        write_atomic(&path, "fn main() {}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fn main() {}");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn write_atomic_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.rs");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    // === generate_and_write tests ===

    #[test]
    fn generate_and_write_writes_snake_case_module() {
        let dir = TempDir::new().unwrap();
        let content = generate_and_write(&user_service(), dir.path(), false).unwrap();

        let written = fs::read_to_string(dir.path().join("user_service.rs")).unwrap();
        assert_eq!(written, content);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let content = generate_and_write(&user_service(), dir.path(), true).unwrap();

        assert!(!content.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_output_dir_is_reported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let err = generate_and_write(&user_service(), &missing, false).unwrap_err();
        assert!(matches!(err, GeneratorError::OutputDirNotFound(_)));
    }

    #[test]
    fn generate_and_write_all_writes_mod_rs() {
        let dir = TempDir::new().unwrap();
        let orders = ProxyDefinition::new("OrderService", "/orders");
        let users = user_service();

        let files = generate_and_write_all(&[&users, &orders], dir.path(), false).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["mod.rs", "user_service.rs", "order_service.rs"]);

        let mod_rs = fs::read_to_string(dir.path().join("mod.rs")).unwrap();
        assert!(mod_rs.contains("pub mod user_service;"));
        assert!(mod_rs.contains("pub use user_service::{UserService, UserServiceHandler};"));
        assert!(mod_rs.contains("pub mod order_service;"));
        assert!(dir.path().join("order_service.rs").exists());
    }

    #[test]
    fn failed_module_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let good = user_service();
        let bad = ProxyDefinition::new("Bad", "/")
            .with_method(EndpointMethodDescriptor::new("get", "/{id}").with_method(HttpMethod::Get));

        let err = generate_and_write_all(&[&good, &bad], dir.path(), false).unwrap_err();
        assert!(matches!(err, GeneratorError::UnboundPlaceholder { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
