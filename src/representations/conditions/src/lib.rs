/*
    =================  representations/conditions/src/lib.rs  =================
    Conditional compilation directives: `version(...)`, `debug(...)`
    and `static if(...)`, each with a memoized tri-state result
    ---------------------------------------------------------------------------
*/

mod dv;
mod memo;
mod predefined;
mod static_if;

pub use dv::{DvCondition, DvQuery};
pub use memo::{Inclusion, Memo};
use modules::{ModuleRef, Namespace};
pub use predefined::{
    PREDEFINED_VERSIONS, RESERVED_PREFIX, TESTING_VERSIONS, is_predefined_version,
    is_testing_version,
};
use source_files::Source;
pub use static_if::{Nested, StaticIfCondition};
use std::{fmt::Display, rc::Rc};

#[derive(Debug)]
pub enum Condition<E> {
    Version(Rc<DvCondition>),
    Debug(Rc<DvCondition>),
    StaticIf(StaticIfCondition<E>),
}

impl<E> Condition<E> {
    pub fn version(module: ModuleRef, query: DvQuery, source: Source) -> Self {
        Self::Version(Rc::new(DvCondition::new(module, query, source)))
    }

    pub fn debug(module: ModuleRef, query: DvQuery, source: Source) -> Self {
        Self::Debug(Rc::new(DvCondition::new(module, query, source)))
    }

    pub fn static_if(expr: E, source: Source) -> Self {
        Self::StaticIf(StaticIfCondition::new(expr, source))
    }

    pub fn source(&self) -> Source {
        match self {
            Condition::Version(dv) | Condition::Debug(dv) => dv.source,
            Condition::StaticIf(static_if) => static_if.source,
        }
    }

    pub fn memo(&self) -> &Memo {
        match self {
            Condition::Version(dv) | Condition::Debug(dv) => &dv.memo,
            Condition::StaticIf(static_if) => &static_if.memo,
        }
    }

    pub fn inclusion(&self) -> Inclusion {
        self.memo().get()
    }

    pub fn namespace(&self) -> Option<Namespace> {
        match self {
            Condition::Version(_) => Some(Namespace::Version),
            Condition::Debug(_) => Some(Namespace::Debug),
            Condition::StaticIf(_) => None,
        }
    }
}

impl<E: Clone> Condition<E> {
    /// Copies the condition for a new instantiation of the surrounding declarations.
    /// `version`/`debug` answers only depend on their module, so copies share
    /// the same condition and it is resolved (and reported) once.
    pub fn syntax_copy(&self) -> Self {
        match self {
            Condition::Version(dv) => Condition::Version(Rc::clone(dv)),
            Condition::Debug(dv) => Condition::Debug(Rc::clone(dv)),
            Condition::StaticIf(static_if) => Condition::StaticIf(static_if.syntax_copy()),
        }
    }
}

impl<E: Display> Display for Condition<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Version(dv) => write!(f, "version ({})", dv.query),
            Condition::Debug(dv) => write!(f, "debug ({})", dv.query),
            Condition::StaticIf(static_if) => write!(f, "static if ({})", static_if.expr),
        }
    }
}

#[cfg(test)]
use modules::{Module, Modules};
#[cfg(test)]
use source_files::SourceFiles;

#[cfg(test)]
fn some_module() -> ModuleRef {
    let source_files = SourceFiles::new();
    let modules = Modules::new();
    modules.add(Module::new("app", source_files.add("app.src".into())))
}

#[test]
fn test_directive_text() {
    let module = some_module();
    let source = Source::internal();

    let version = Condition::<&str>::version(module, DvQuery::Identifier("linux".into()), source);
    let debug = Condition::<&str>::debug(module, DvQuery::Level(42), source);
    let static_if = Condition::static_if("T.sizeof == 8", source);

    assert_eq!(version.to_string(), "version (linux)");
    assert_eq!(debug.to_string(), "debug (42)");
    assert_eq!(static_if.to_string(), "static if (T.sizeof == 8)");
}

#[test]
fn test_syntax_copy_shares_version_conditions() {
    let module = some_module();
    let source = Source::internal();

    let version = Condition::<String>::version(module, DvQuery::Level(1), source);
    let copy = version.syntax_copy();
    assert!(copy.inclusion().is_unresolved());

    copy.memo().settle(true);
    assert!(version.inclusion().is_included());

    let (Condition::Version(a), Condition::Version(b)) = (&version, &copy) else {
        unreachable!()
    };
    assert!(Rc::ptr_eq(a, b));

    let static_if = Condition::static_if(String::from("true"), source);
    static_if.memo().settle(false);
    assert!(static_if.syntax_copy().inclusion().is_unresolved());
}

#[test]
fn test_namespace() {
    let module = some_module();
    let source = Source::internal();

    assert_eq!(
        Condition::<()>::debug(module, DvQuery::Level(0), source).namespace(),
        Some(Namespace::Debug)
    );
    assert_eq!(Condition::static_if((), source).namespace(), None);
}
