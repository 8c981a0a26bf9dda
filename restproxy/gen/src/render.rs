//! Rust backend for the statement IR.
//!
//! Renders [`Block`], [`Stmt`] and [`Expr`] values to `proc_macro2`
//! token streams. Identifiers and types are parsed with `syn`, so a name
//! that cannot appear in Rust source is reported instead of emitted.
//!
//! ## Rust Forms
//!
//! | IR                   | Rendered as                                                  |
//! |----------------------|--------------------------------------------------------------|
//! | `Null` / `Some(e)`   | `None` / `Some(e)`                                           |
//! | `New { ty, args }`   | `ty::new(args)`                                              |
//! | `AnonymousObject`    | `Interface { method: Box::new(move \|params\| { body }), .. }` |
//! | `TryCatch`           | fallible closure, expression statements use `?`, then `if let Err(binding)` |

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use crate::ast::{Block, CompareOp, Expr, MethodOverride, Param, Stmt, TypePath};
use crate::errors::GeneratorError;

/// Renders the statements of `block`, without surrounding braces.
pub fn render_block(block: &Block) -> Result<TokenStream, GeneratorError> {
    block.iter().map(render_stmt).collect()
}

pub fn render_stmt(stmt: &Stmt) -> Result<TokenStream, GeneratorError> {
    let tokens = match stmt {
        Stmt::Expr(expr) => {
            let expr = render_expr(expr)?;
            quote! { #expr; }
        }
        Stmt::Declare {
            name,
            ty,
            mutable,
            init,
        } => {
            let name = ident(name)?;
            let mutability = mutable.then(|| quote! { mut });
            let annotation = ty
                .as_ref()
                .map(|ty| parse_type(ty).map(|ty| quote! { : #ty }))
                .transpose()?;
            let init = render_expr(init)?;
            quote! { let #mutability #name #annotation = #init; }
        }
        Stmt::If {
            cond,
            then,
            otherwise,
        } => {
            let cond = render_expr(cond)?;
            let then = render_block(then)?;
            if otherwise.is_empty() {
                quote! { if #cond { #then } }
            } else {
                let otherwise = render_block(otherwise)?;
                quote! { if #cond { #then } else { #otherwise } }
            }
        }
        Stmt::TryCatch {
            body,
            error_ty,
            binding,
            handler,
        } => {
            let body = body
                .iter()
                .map(render_fallible_stmt)
                .collect::<Result<TokenStream, _>>()?;
            let error_ty = parse_type(error_ty)?;
            let binding = ident(binding)?;
            let handler = render_block(handler)?;
            quote! {
                if let ::core::result::Result::Err(#binding) =
                    (|| -> ::core::result::Result<(), #error_ty> {
                        #body
                        ::core::result::Result::Ok(())
                    })()
                {
                    #handler
                }
            }
        }
        Stmt::Return(value) => {
            let value = render_expr(value)?;
            quote! { return #value; }
        }
        Stmt::Shared(shared) => render_stmt(shared)?,
    };
    Ok(tokens)
}

/// Inside a guarded block, expression statements propagate their failure.
fn render_fallible_stmt(stmt: &Stmt) -> Result<TokenStream, GeneratorError> {
    match stmt {
        Stmt::Expr(expr) => {
            let expr = render_expr(expr)?;
            Ok(quote! { #expr?; })
        }
        other => render_stmt(other),
    }
}

pub fn render_expr(expr: &Expr) -> Result<TokenStream, GeneratorError> {
    let tokens = match expr {
        Expr::Str(value) => {
            let lit = Literal::string(value);
            quote! { #lit }
        }
        Expr::Int(value) => {
            let lit = Literal::i64_unsuffixed(*value);
            quote! { #lit }
        }
        Expr::Null => quote! { None },
        Expr::Some(inner) => {
            let inner = render_expr(inner)?;
            quote! { Some(#inner) }
        }
        Expr::Var(name) => {
            let name = ident(name)?;
            quote! { #name }
        }
        Expr::Borrow(inner) => {
            let inner = render_operand(inner)?;
            quote! { &#inner }
        }
        Expr::Invoke {
            target,
            method,
            args,
        } => {
            let target = render_operand(target)?;
            let method = ident(method)?;
            let args = render_args(args)?;
            quote! { #target.#method(#(#args),*) }
        }
        Expr::InvokeStatic { function, args } => {
            let function = parse_path(function)?;
            let args = render_args(args)?;
            quote! { #function(#(#args),*) }
        }
        Expr::New { ty, args } => {
            let ty = parse_path(ty)?;
            let args = render_args(args)?;
            quote! { #ty::new(#(#args),*) }
        }
        Expr::AnonymousObject {
            interface,
            overrides,
        } => {
            let interface = parse_path(interface)?;
            let fields = overrides
                .iter()
                .map(render_override)
                .collect::<Result<Vec<_>, _>>()?;
            quote! { #interface { #(#fields),* } }
        }
        Expr::Compare { op, lhs, rhs } => {
            let lhs = render_expr(lhs)?;
            let rhs = render_expr(rhs)?;
            match op {
                CompareOp::GreaterOrEqual => quote! { #lhs >= #rhs },
                CompareOp::Less => quote! { #lhs < #rhs },
            }
        }
        Expr::And(lhs, rhs) => {
            let lhs = render_expr(lhs)?;
            let rhs = render_expr(rhs)?;
            quote! { #lhs && #rhs }
        }
    };
    Ok(tokens)
}

/// Renders an expression used as a receiver or borrow operand,
/// parenthesizing operators that bind looser than method calls.
fn render_operand(expr: &Expr) -> Result<TokenStream, GeneratorError> {
    let tokens = render_expr(expr)?;
    match expr {
        Expr::Borrow(_) | Expr::Compare { .. } | Expr::And(..) => Ok(quote! { (#tokens) }),
        _ => Ok(tokens),
    }
}

fn render_args(args: &[Expr]) -> Result<Vec<TokenStream>, GeneratorError> {
    args.iter().map(render_expr).collect()
}

fn render_override(method: &MethodOverride) -> Result<TokenStream, GeneratorError> {
    let name = ident(&method.name)?;
    let params = method
        .params
        .iter()
        .map(render_param)
        .collect::<Result<Vec<_>, _>>()?;
    let body = render_block(&method.body)?;
    Ok(quote! {
        #name: ::std::boxed::Box::new(move |#(#params),*| { #body })
    })
}

pub fn render_param(param: &Param) -> Result<TokenStream, GeneratorError> {
    let name = ident(&param.name)?;
    let ty = parse_type(&param.ty)?;
    Ok(quote! { #name: #ty })
}

/// Parses `name` as a Rust identifier. `self` is accepted; other keywords
/// are not.
pub fn ident(name: &str) -> Result<Ident, GeneratorError> {
    if name == "self" {
        return Ok(Ident::new("self", Span::call_site()));
    }
    syn::parse_str::<Ident>(name).map_err(|_| GeneratorError::InvalidIdentifier(name.to_string()))
}

pub fn parse_type(ty: &TypePath) -> Result<syn::Type, GeneratorError> {
    parse_type_str(ty.as_str())
}

pub fn parse_type_str(ty: &str) -> Result<syn::Type, GeneratorError> {
    syn::parse_str::<syn::Type>(ty).map_err(|e| GeneratorError::InvalidType {
        ty: ty.to_string(),
        reason: e.to_string(),
    })
}

fn parse_path(path: &TypePath) -> Result<syn::Path, GeneratorError> {
    syn::parse_str::<syn::Path>(path.as_str()).map_err(|e| GeneratorError::InvalidType {
        ty: path.to_string(),
        reason: e.to_string(),
    })
}
