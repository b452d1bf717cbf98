use derive_more::IsVariant;
use std::fmt::Display;

/// The two independent identifier/level spaces used by conditional compilation.
/// An identifier defined for `version` has no effect on `debug`, and vice versa.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum Namespace {
    Version,
    Debug,
}

impl Namespace {
    pub fn keyword(&self) -> &'static str {
        match self {
            Namespace::Version => "version",
            Namespace::Debug => "debug",
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
