/*
    Dependency output for external build tooling.

    Each resolved `version`/`debug` condition that depends on something outside
    of its own module produces one line:

        depsVersion app.main (src/app/main.d) : Feature
        depsDebug app.main (src/app/main.d) : 2
*/

use crate::{ResolveCtx, Scope};
use append_only_vec::AppendOnlyVec;
use compiler::DepsOutput;
use conditions::{DvCondition, DvQuery, is_predefined_version, is_testing_version};
use modules::Namespace;
use std::{fmt::Debug, io::Write};

pub const VERSION_LABEL: &str = "depsVersion ";
pub const DEBUG_LABEL: &str = "depsDebug ";

pub fn label(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Version => VERSION_LABEL,
        Namespace::Debug => DEBUG_LABEL,
    }
}

pub struct DependencyReporter {
    enabled: bool,
    lines: AppendOnlyVec<String>,
}

impl DependencyReporter {
    /// Lines are only collected here when they are printed after analysis.
    /// When writing to a separate dependency file, this reporter stays silent.
    pub fn new(output: &DepsOutput) -> Self {
        Self {
            enabled: output.is_print(),
            lines: AppendOnlyVec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(&DepsOutput::Disabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether resolving this query is worth reporting as an external dependency.
    /// The compiler's own version identifiers never are.
    pub fn is_reportable(namespace: Namespace, query: &DvQuery) -> bool {
        match (namespace, query) {
            (Namespace::Version, DvQuery::Identifier(identifier)) => {
                !is_predefined_version(identifier) && !is_testing_version(identifier)
            }
            _ => true,
        }
    }

    pub fn report<S: Scope>(
        &self,
        ctx: &ResolveCtx,
        scope: Option<&S>,
        namespace: Namespace,
        condition: &DvCondition,
    ) {
        if !self.enabled {
            return;
        }

        let referencing = match scope {
            Some(scope) => scope.instantiating_module().or_else(|| scope.module()),
            None => Some(condition.module),
        };

        let Some(referencing) = referencing else {
            return;
        };

        let module = ctx.modules.get(referencing);

        self.lines.push(format!(
            "{}{} ({}) : {}",
            label(namespace),
            module.name,
            escape_path(module.filename(ctx.source_files)),
            condition.query,
        ));
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn write_to(&self, w: &mut impl Write) -> std::io::Result<()> {
        for line in self.lines() {
            writeln!(w, "{}", line)?;
        }
        Ok(())
    }
}

impl Debug for DependencyReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyReporter")
            .field("enabled", &self.enabled)
            .field("lines", &self.lines.len())
            .finish()
    }
}

/// Escapes a path so it can be embedded inside parentheses
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());

    for c in path.chars() {
        if matches!(c, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[test]
fn test_escape_path() {
    assert_eq!(escape_path("/a/b.src"), "/a/b.src");
    assert_eq!(escape_path("C:\\x (1)\\y.d"), "C:\\\\x \\(1\\)\\\\y.d");
}

#[test]
fn test_reportable() {
    let identifier = |name: &str| DvQuery::Identifier(name.into());

    assert!(DependencyReporter::is_reportable(Namespace::Version, &identifier("Foo")));
    assert!(!DependencyReporter::is_reportable(Namespace::Version, &identifier("linux")));
    assert!(!DependencyReporter::is_reportable(Namespace::Version, &identifier("D_LP64")));
    assert!(!DependencyReporter::is_reportable(Namespace::Version, &identifier("unittest")));
    assert!(DependencyReporter::is_reportable(Namespace::Debug, &identifier("linux")));
    assert!(DependencyReporter::is_reportable(Namespace::Version, &DvQuery::Level(1)));
}

#[test]
fn test_only_print_mode_collects() {
    assert!(DependencyReporter::new(&DepsOutput::Print).is_enabled());
    assert!(!DependencyReporter::new(&DepsOutput::File("deps.txt".into())).is_enabled());
    assert!(!DependencyReporter::disabled().is_enabled());
}
