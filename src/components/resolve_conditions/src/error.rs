use derive_more::IsVariant;
use modules::Namespace;
use std::fmt::Display;

/// Problem with externally supplied conditional compilation settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ReservedIdentifier(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReservedIdentifier(identifier) => write!(
                f,
                "version identifier '{}' is reserved and cannot be set",
                identifier
            ),
        }
    }
}

/// Problem with a `version = ...;` or `debug = ...;` declaration inside a module
#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum DeclareError {
    Reserved(String),
    DefinedAfterUse(Namespace, String),
}

impl Display for DeclareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclareError::Reserved(identifier) => write!(
                f,
                "version identifier '{}' is reserved and cannot be set",
                identifier
            ),
            DeclareError::DefinedAfterUse(namespace, identifier) => write!(
                f,
                "{} identifier '{}' defined after use",
                namespace, identifier
            ),
        }
    }
}
