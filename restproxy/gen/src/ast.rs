//! Code-as-data representation of generated method bodies.
//!
//! The synthesis engine never produces text. It builds [`Stmt`] and [`Expr`]
//! values and appends them to a [`BlockBuilder`]; turning them into source is
//! the job of a backend such as [`crate::render`].
//!
//! ## Building Blocks
//!
//! - [`Block`] - Ordered, append-only statement sequence
//! - [`Stmt`] - Declarations, conditionals, try/catch, returns, shared statements
//! - [`Expr`] - Literals, variables, invocations, constructors, anonymous objects
//! - [`SharedStmt`] - A statement referenced from many places without copying
//!
//! ## Examples
//!
//! ```
//! use restproxy_gen::ast::{Block, BlockBuilder, Expr, Stmt};
//!
//! let mut block = Block::new();
//! block.declare_variable("count", None, false, Expr::int(1));
//! block.append(Stmt::expr(Expr::var("log").invoke("push", vec![Expr::var("count")])));
//! assert_eq!(block.len(), 2);
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A textual type or path, resolved by the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypePath(String);

impl TypePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A typed parameter of a method override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypePath,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypePath) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// One overridden method of an anonymous object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOverride {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
}

/// An expression in a generated method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Str(String),
    Int(i64),
    /// The absent value.
    Null,
    /// A present optional value.
    Some(Box<Expr>),
    Var(String),
    Borrow(Box<Expr>),
    /// Method call on a receiver.
    Invoke {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// Call of a free or associated function by path.
    InvokeStatic { function: TypePath, args: Vec<Expr> },
    /// Constructor call.
    New { ty: TypePath, args: Vec<Expr> },
    /// An object of `interface` implemented by the given overrides.
    AnonymousObject {
        interface: TypePath,
        overrides: Vec<MethodOverride>,
    },
    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn some(value: Expr) -> Self {
        Expr::Some(Box::new(value))
    }

    pub fn borrow(value: Expr) -> Self {
        Expr::Borrow(Box::new(value))
    }

    pub fn new_object(ty: TypePath, args: Vec<Expr>) -> Self {
        Expr::New { ty, args }
    }

    pub fn invoke_static(function: TypePath, args: Vec<Expr>) -> Self {
        Expr::InvokeStatic { function, args }
    }

    pub fn anonymous(interface: TypePath, overrides: Vec<MethodOverride>) -> Self {
        Expr::AnonymousObject {
            interface,
            overrides,
        }
    }

    /// Invokes `method` on this expression, consuming it as the receiver.
    pub fn invoke(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Invoke {
            target: Box::new(self),
            method: method.into(),
            args,
        }
    }

    pub fn greater_or_equal(self, rhs: Expr) -> Self {
        Expr::Compare {
            op: CompareOp::GreaterOrEqual,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    pub fn less_than(self, rhs: Expr) -> Self {
        Expr::Compare {
            op: CompareOp::Less,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    /// Visits this expression and every expression nested inside it,
    /// including those in anonymous object bodies. Parents come first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Expr)) {
        visit(self);
        match self {
            Expr::Str(_) | Expr::Int(_) | Expr::Null | Expr::Var(_) => {}
            Expr::Some(inner) | Expr::Borrow(inner) => inner.walk(visit),
            Expr::Invoke { target, args, .. } => {
                target.walk(visit);
                args.iter().for_each(|arg| arg.walk(visit));
            }
            Expr::InvokeStatic { args, .. } | Expr::New { args, .. } => {
                args.iter().for_each(|arg| arg.walk(visit));
            }
            Expr::AnonymousObject { overrides, .. } => {
                for method in overrides {
                    method.body.walk(visit);
                }
            }
            Expr::Compare { lhs, rhs, .. } | Expr::And(lhs, rhs) => {
                lhs.walk(visit);
                rhs.walk(visit);
            }
        }
    }
}

/// A statement shared by reference between insertion points.
///
/// Cloning a `SharedStmt` clones the handle, not the statement.
#[derive(Debug, Clone)]
pub struct SharedStmt(Arc<Stmt>);

impl SharedStmt {
    pub fn new(stmt: Stmt) -> Self {
        Self(Arc::new(stmt))
    }

    /// True when both handles point at the same statement value.
    pub fn ptr_eq(&self, other: &SharedStmt) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedStmt {
    type Target = Stmt;

    fn deref(&self) -> &Stmt {
        &self.0
    }
}

impl PartialEq for SharedStmt {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl Eq for SharedStmt {}

/// A statement in a generated method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expr(Expr),
    Declare {
        name: String,
        ty: Option<TypePath>,
        mutable: bool,
        init: Expr,
    },
    If {
        cond: Expr,
        then: Block,
        otherwise: Block,
    },
    /// Runs `body`; a failure of type `error_ty` is bound to `binding` and
    /// handed to `handler`.
    TryCatch {
        body: Block,
        error_ty: TypePath,
        binding: String,
        handler: Block,
    },
    Return(Expr),
    Shared(SharedStmt),
}

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }

    pub fn if_else(cond: Expr, then: Block, otherwise: Block) -> Self {
        Stmt::If {
            cond,
            then,
            otherwise,
        }
    }

    pub fn try_catch(
        body: Block,
        error_ty: TypePath,
        binding: impl Into<String>,
        handler: Block,
    ) -> Self {
        Stmt::TryCatch {
            body,
            error_ty,
            binding: binding.into(),
            handler,
        }
    }

    pub fn return_value(value: Expr) -> Self {
        Stmt::Return(value)
    }

    /// Visits every expression in this statement and its nested blocks.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Expr)) {
        match self {
            Stmt::Expr(expr) | Stmt::Return(expr) => expr.walk(visit),
            Stmt::Declare { init, .. } => init.walk(visit),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                cond.walk(visit);
                then.walk(visit);
                otherwise.walk(visit);
            }
            Stmt::TryCatch { body, handler, .. } => {
                body.walk(visit);
                handler.walk(visit);
            }
            Stmt::Shared(shared) => shared.walk(visit),
        }
    }
}

/// Ordered, append-only statement sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    stmts: Vec<Stmt>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block holding exactly `stmts`, in order.
    pub fn of(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn last(&self) -> Option<&Stmt> {
        self.stmts.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.stmts.iter()
    }

    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Expr)) {
        for stmt in &self.stmts {
            stmt.walk(visit);
        }
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Stmt;
    type IntoIter = std::slice::Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.iter()
    }
}

/// The statement-building capability the synthesis engine writes into.
pub trait BlockBuilder {
    fn append(&mut self, stmt: Stmt);

    fn declare_variable(
        &mut self,
        name: &str,
        ty: Option<TypePath>,
        mutable: bool,
        init: Expr,
    ) {
        self.append(Stmt::Declare {
            name: name.to_string(),
            ty,
            mutable,
            init,
        });
    }
}

impl BlockBuilder for Block {
    fn append(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }
}
