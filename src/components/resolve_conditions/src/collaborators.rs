/*
    Contracts for the parts of the compiler that conditional compilation
    relies on but doesn't own: scopes, expression semantic analysis,
    and compile-time interpretation.
*/

use crate::ResolveCtx;
use modules::ModuleRef;
use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

/// Marker for a failure that has already been reported (or gagged)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Errored;

pub trait Scope: Sized {
    type Symbol: Copy;

    /// Creates a child scope inheriting this scope's symbol table linkage.
    /// The child is popped by dropping it.
    fn push(&self) -> Self;

    /// Symbol that members added while analyzing in this scope attach to
    fn set_guarded_symbol(&mut self, symbol: Option<Self::Symbol>);

    fn set_static_if(&mut self);

    fn start_ctfe(&mut self);

    fn end_ctfe(&mut self);

    fn module(&self) -> Option<ModuleRef>;

    /// Module whose template instantiation caused this scope to be analyzed, if any
    fn instantiating_module(&self) -> Option<ModuleRef>;
}

pub trait ConstValue: Display {
    fn is_bool(&self, value: bool) -> bool;
}

pub trait ExprAnalyzer<S: Scope> {
    type Expr: Display;
    type Typed;
    type Value: ConstValue;

    /// Whether the expression already failed to resolve before ever being evaluated here
    fn is_error(&self, expr: &Self::Expr) -> bool;

    /// Semantic analysis of the expression.
    /// An `Err` is an error-typed result, and has already been reported through `ctx`.
    fn semantic(
        &mut self,
        ctx: &ResolveCtx,
        expr: &Self::Expr,
        scope: &S,
    ) -> Result<Self::Typed, Errored>;

    fn is_boolean(&self, typed: &Self::Typed) -> bool;

    fn type_name(&self, typed: &Self::Typed) -> String;

    /// Compile-time interpretation of an analyzed expression.
    /// An `Err` has already been reported through `ctx`.
    fn interpret(&mut self, ctx: &ResolveCtx, typed: Self::Typed) -> Result<Self::Value, Errored>;
}

/// Scope in constant-evaluation mode for as long as this guard lives
pub struct Ctfe<'s, S: Scope> {
    scope: &'s mut S,
}

impl<'s, S: Scope> Ctfe<'s, S> {
    pub fn start(scope: &'s mut S) -> Self {
        scope.start_ctfe();
        Self { scope }
    }
}

impl<'s, S: Scope> Deref for Ctfe<'s, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.scope
    }
}

impl<'s, S: Scope> DerefMut for Ctfe<'s, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.scope
    }
}

impl<'s, S: Scope> Drop for Ctfe<'s, S> {
    fn drop(&mut self) {
        self.scope.end_ctfe();
    }
}
