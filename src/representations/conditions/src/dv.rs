use crate::Memo;
use derive_more::IsVariant;
use modules::ModuleRef;
use source_files::Source;
use std::fmt::Display;

/// What a `version(...)`/`debug(...)` directive asks about.
/// Exactly one of the two forms is ever consulted, matching how the directive was written.
#[derive(Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum DvQuery {
    Level(u32),
    Identifier(Box<str>),
}

impl DvQuery {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            DvQuery::Level(_) => None,
            DvQuery::Identifier(identifier) => Some(identifier),
        }
    }
}

impl Display for DvQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DvQuery::Level(level) => write!(f, "{}", level),
            DvQuery::Identifier(identifier) => write!(f, "{}", identifier),
        }
    }
}

/// Shared representation of `version(...)` and `debug(...)` conditions
#[derive(Debug)]
pub struct DvCondition {
    pub module: ModuleRef,
    pub query: DvQuery,
    pub source: Source,
    pub memo: Memo,
}

impl DvCondition {
    pub fn new(module: ModuleRef, query: DvQuery, source: Source) -> Self {
        Self {
            module,
            query,
            source,
            memo: Memo::default(),
        }
    }
}
