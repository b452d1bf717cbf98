use crate::{DependencyReporter, GlobalConditions, Registry};
use derive_more::IsVariant;
use diagnostics::{Diagnostics, ErrorDiagnostic};
use modules::Modules;
use source_files::{Source, SourceFiles};

/// Whether errors are currently being suppressed.
///
/// Speculative analysis (such as probing whether a template instantiates)
/// runs gagged, so failures there don't become permanent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, IsVariant)]
pub enum Gag {
    #[default]
    Visible,
    Gagged,
}

/// Thresholds for nested `static if` evaluation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NestingLimits {
    /// Maximum number of simultaneous evaluations of the same condition
    pub reentry: u32,
    /// Maximum number of `static if` evaluations in flight overall
    pub depth: u32,
}

impl Default for NestingLimits {
    fn default() -> Self {
        Self {
            reentry: 100,
            depth: 500,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct ResolveCtx<'a> {
    pub globals: &'a GlobalConditions,
    pub modules: &'a Modules,
    pub source_files: &'a SourceFiles,
    pub diagnostics: &'a Diagnostics<'a>,
    pub deps: &'a DependencyReporter,
    pub limits: NestingLimits,
    pub gag: Gag,
    depth: u32,
}

impl<'a> ResolveCtx<'a> {
    pub fn new(
        globals: &'a GlobalConditions,
        modules: &'a Modules,
        diagnostics: &'a Diagnostics<'a>,
        deps: &'a DependencyReporter,
    ) -> Self {
        Self {
            globals,
            modules,
            source_files: diagnostics.source_files(),
            diagnostics,
            deps,
            limits: NestingLimits::default(),
            gag: Gag::Visible,
            depth: 0,
        }
    }

    pub fn with_limits(self, limits: NestingLimits) -> Self {
        Self { limits, ..self }
    }

    /// Same context, but with errors suppressed
    pub fn gagged(self) -> Self {
        Self {
            gag: Gag::Gagged,
            ..self
        }
    }

    pub fn is_gagged(&self) -> bool {
        self.gag.is_gagged()
    }

    /// Number of `static if` evaluations in flight that led to this context
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub(crate) fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    pub fn registry(&self) -> Registry<'a> {
        Registry::new(self.globals, self.modules)
    }

    pub fn error(&self, message: impl ToString, source: Source) {
        if self.is_gagged() {
            self.diagnostics.push_gagged();
        } else {
            self.diagnostics.push(ErrorDiagnostic::new(message, source));
        }
    }
}
