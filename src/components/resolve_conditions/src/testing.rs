/*
    Test doubles for the collaborators: a scope that records how it was set up,
    and a tiny expression language whose identifiers may be guarded by conditions.
*/

use crate::{
    ConstValue, DependencyReporter, Errored, ExprAnalyzer, GlobalConditions, Include, ResolveCtx,
    Scope,
};
use compiler::DepsOutput;
use conditions::Condition;
use diagnostics::{DiagnosticFlags, Diagnostics};
use modules::{Module, ModuleRef, Modules};
use source_files::{Location, Source, SourceFiles};
use std::{cell::Cell, fmt::Display, rc::Rc};

pub struct World {
    pub source_files: SourceFiles,
    pub modules: Modules,
    pub globals: GlobalConditions,
    pub deps: DependencyReporter,
}

impl World {
    pub fn new() -> Self {
        Self {
            source_files: SourceFiles::new(),
            modules: Modules::new(),
            globals: GlobalConditions::new(),
            deps: DependencyReporter::new(&DepsOutput::Print),
        }
    }

    pub fn module(&self, name: &str, path: &str) -> ModuleRef {
        self.modules
            .add(Module::new(name, self.source_files.add(path.into())))
    }

    pub fn source(&self, module: ModuleRef, line: u32) -> Source {
        Source::new(
            self.modules.get(module).source_file,
            Location::new(line, 1),
        )
    }

    pub fn run<T>(&self, f: impl FnOnce(&ResolveCtx, &Diagnostics) -> T) -> T {
        let diagnostics = Diagnostics::new(&self.source_files, DiagnosticFlags::collecting());
        let ctx = ResolveCtx::new(&self.globals, &self.modules, &diagnostics, &self.deps);
        f(&ctx, &diagnostics)
    }

    pub fn deps(&self) -> Vec<String> {
        self.deps.lines().map(String::from).collect()
    }
}

pub fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics
        .collected()
        .map(|diagnostic| diagnostic.message().to_string())
        .collect()
}

#[derive(Clone, Debug)]
pub struct TestScope {
    pub module: Option<ModuleRef>,
    pub instantiating: Option<ModuleRef>,
    pub guarded: Option<u32>,
    pub static_if: bool,
    pub ctfe: bool,
    // Shared between a scope and its children to check start/end pairing
    pub ctfe_balance: Rc<Cell<i32>>,
}

impl TestScope {
    pub fn new(module: Option<ModuleRef>) -> Self {
        Self {
            module,
            instantiating: None,
            guarded: None,
            static_if: false,
            ctfe: false,
            ctfe_balance: Rc::new(Cell::new(0)),
        }
    }
}

impl Scope for TestScope {
    type Symbol = u32;

    fn push(&self) -> Self {
        Self {
            guarded: None,
            static_if: false,
            ..self.clone()
        }
    }

    fn set_guarded_symbol(&mut self, symbol: Option<u32>) {
        self.guarded = symbol;
    }

    fn set_static_if(&mut self) {
        self.static_if = true;
    }

    fn start_ctfe(&mut self) {
        self.ctfe = true;
        self.ctfe_balance.set(self.ctfe_balance.get() + 1);
    }

    fn end_ctfe(&mut self) {
        self.ctfe = false;
        self.ctfe_balance.set(self.ctfe_balance.get() - 1);
    }

    fn module(&self) -> Option<ModuleRef> {
        self.module
    }

    fn instantiating_module(&self) -> Option<ModuleRef> {
        self.instantiating
    }
}

#[derive(Clone, Debug)]
pub enum Expr {
    Bool(bool),
    Int(i64),
    Ident(String),
    Eq(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    // Already known to be broken before evaluation
    Poisoned,
    // Well typed, but only known at runtime
    Runtime,
    // Well typed, but interpretation fails
    Trap,
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.into())
    }

    pub fn eq(a: Expr, b: Expr) -> Self {
        Expr::Eq(Box::new(a), Box::new(b))
    }

    pub fn and(a: Expr, b: Expr) -> Self {
        Expr::And(Box::new(a), Box::new(b))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Bool(value) => write!(f, "{}", value),
            Expr::Int(value) => write!(f, "{}", value),
            Expr::Ident(name) => write!(f, "{}", name),
            Expr::Eq(a, b) => write!(f, "{} == {}", a, b),
            Expr::And(a, b) => write!(f, "{} && {}", a, b),
            Expr::Poisoned => write!(f, "__error"),
            Expr::Runtime => write!(f, "__runtime"),
            Expr::Trap => write!(f, "__trap"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ty {
    Bool,
    Int,
}

#[derive(Clone, Debug)]
pub struct Typed {
    pub ty: Ty,
    pub expr: Expr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Runtime,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{}", value),
            Value::Int(value) => write!(f, "{}", value),
            Value::Runtime => write!(f, "__runtime"),
        }
    }
}

impl ConstValue for Value {
    fn is_bool(&self, value: bool) -> bool {
        *self == Value::Bool(value)
    }
}

/// A named constant, only visible when its guarding condition (if any) is included
#[derive(Clone, Debug)]
pub struct Decl {
    pub name: String,
    pub value: Expr,
    pub guard: Option<usize>,
}

impl Decl {
    pub fn new(name: &str, value: Expr, guard: Option<usize>) -> Self {
        Self {
            name: name.into(),
            value,
            guard,
        }
    }
}

pub struct TestAnalyzer<'c> {
    pub conditions: &'c [Condition<Expr>],
    pub decls: Vec<Decl>,
    pub semantic_calls: usize,
    pub seen_scopes: Vec<TestScope>,
}

impl<'c> TestAnalyzer<'c> {
    pub fn new(conditions: &'c [Condition<Expr>], decls: Vec<Decl>) -> Self {
        Self {
            conditions,
            decls,
            semantic_calls: 0,
            seen_scopes: Vec::new(),
        }
    }

    fn check(&mut self, ctx: &ResolveCtx, expr: &Expr, scope: &TestScope) -> Result<Ty, Errored> {
        match expr {
            Expr::Bool(_) | Expr::Runtime | Expr::Trap => Ok(Ty::Bool),
            Expr::Int(_) => Ok(Ty::Int),
            Expr::Poisoned => Err(Errored),
            Expr::Ident(name) => {
                let value = self.lookup(ctx, name, scope)?;
                self.check(ctx, &value, scope)
            }
            Expr::Eq(a, b) => {
                let (a, b) = (self.check(ctx, a, scope)?, self.check(ctx, b, scope)?);

                if a != b {
                    ctx.error("incompatible types for ==", Source::internal());
                    return Err(Errored);
                }
                Ok(Ty::Bool)
            }
            Expr::And(a, b) => {
                self.check(ctx, a, scope)?;
                self.check(ctx, b, scope)?;
                Ok(Ty::Bool)
            }
        }
    }

    fn lookup(&mut self, ctx: &ResolveCtx, name: &str, scope: &TestScope) -> Result<Expr, Errored> {
        let conditions = self.conditions;

        let Some(decl) = self.decls.iter().find(|decl| decl.name == name).cloned() else {
            ctx.error(format!("undefined identifier {}", name), Source::internal());
            return Err(Errored);
        };

        if let Some(guard) = decl.guard {
            if !conditions[guard].include(ctx, &mut *self, Some(scope), None) {
                ctx.error(format!("undefined identifier {}", name), Source::internal());
                return Err(Errored);
            }
        }

        Ok(decl.value)
    }

    fn eval(&self, expr: &Expr) -> Option<Value> {
        Some(match expr {
            Expr::Bool(value) => Value::Bool(*value),
            Expr::Int(value) => Value::Int(*value),
            Expr::Runtime => Value::Runtime,
            Expr::Trap | Expr::Poisoned => return None,
            Expr::Ident(name) => {
                let decl = self.decls.iter().find(|decl| &decl.name == name)?;
                self.eval(&decl.value)?
            }
            Expr::Eq(a, b) => Value::Bool(self.eval(a)? == self.eval(b)?),
            Expr::And(a, b) => match (self.eval(a)?, self.eval(b)?) {
                (Value::Bool(a), Value::Bool(b)) => Value::Bool(a && b),
                _ => Value::Runtime,
            },
        })
    }
}

impl<'c> ExprAnalyzer<TestScope> for TestAnalyzer<'c> {
    type Expr = Expr;
    type Typed = Typed;
    type Value = Value;

    fn is_error(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Poisoned)
    }

    fn semantic(&mut self, ctx: &ResolveCtx, expr: &Expr, scope: &TestScope) -> Result<Typed, Errored> {
        self.semantic_calls += 1;
        self.seen_scopes.push(scope.clone());

        let ty = self.check(ctx, expr, scope)?;

        Ok(Typed {
            ty,
            expr: expr.clone(),
        })
    }

    fn is_boolean(&self, typed: &Typed) -> bool {
        typed.ty == Ty::Bool
    }

    fn type_name(&self, typed: &Typed) -> String {
        match typed.ty {
            Ty::Bool => "bool".into(),
            Ty::Int => "int".into(),
        }
    }

    fn interpret(&mut self, ctx: &ResolveCtx, typed: Typed) -> Result<Value, Errored> {
        match self.eval(&typed.expr) {
            Some(value) => Ok(value),
            None => {
                ctx.error(
                    format!("cannot interpret {} at compile time", typed.expr),
                    Source::internal(),
                );
                Err(Errored)
            }
        }
    }
}
