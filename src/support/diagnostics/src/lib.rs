mod error;
mod show;
mod warning;

use append_only_vec::AppendOnlyVec;
use core::fmt::Debug;
pub use error::ErrorDiagnostic;
pub use show::Show;
use source_files::SourceFiles;
use std::sync::atomic::{AtomicUsize, Ordering};
pub use warning::WarningDiagnostic;

pub trait Diagnostic: Show + Send + Sync {
    fn message(&self) -> &str;

    fn is_error(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug)]
pub struct DiagnosticFlags {
    pub print_without_collecting: bool,
}

impl Default for DiagnosticFlags {
    fn default() -> Self {
        Self {
            print_without_collecting: true,
        }
    }
}

impl DiagnosticFlags {
    pub fn collecting() -> Self {
        Self {
            print_without_collecting: false,
        }
    }
}

pub struct Diagnostics<'a> {
    source_files: &'a SourceFiles,
    diagnostics: AppendOnlyVec<Box<dyn Diagnostic>>,
    flags: DiagnosticFlags,
    errors: AtomicUsize,
    gagged: AtomicUsize,
}

impl<'a> Debug for Diagnostics<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("errors", &self.error_count())
            .field("gagged", &self.gagged_count())
            .finish_non_exhaustive()
    }
}

impl<'a> Diagnostics<'a> {
    pub fn new(source_files: &'a SourceFiles, flags: DiagnosticFlags) -> Self {
        Self {
            source_files,
            diagnostics: AppendOnlyVec::<Box<dyn Diagnostic>>::new(),
            flags,
            errors: AtomicUsize::new(0),
            gagged: AtomicUsize::new(0),
        }
    }

    pub fn source_files(&self) -> &'a SourceFiles {
        self.source_files
    }

    pub fn push(&self, diagnostic: impl Diagnostic + 'static) {
        if diagnostic.is_error() {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }

        if self.flags.print_without_collecting {
            self.print(&diagnostic);
        } else {
            self.diagnostics.push(Box::new(diagnostic));
        }
    }

    /// Records an error that was produced while errors were being suppressed.
    /// Nothing is printed or collected.
    pub fn push_gagged(&self) {
        self.gagged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn gagged_count(&self) -> usize {
        self.gagged.load(Ordering::Relaxed)
    }

    pub fn collected(&self) -> impl Iterator<Item = &dyn Diagnostic> {
        self.diagnostics.iter().map(|diagnostic| &**diagnostic)
    }

    pub fn print(&self, diagnostic: &dyn Diagnostic) {
        diagnostic.eprintln(self.source_files);
    }
}

#[cfg(test)]
use source_files::{Location, Source};

#[test]
fn test_collects_and_counts() {
    let source_files = SourceFiles::new();
    let key = source_files.add("main.src".into());
    let diagnostics = Diagnostics::new(&source_files, DiagnosticFlags::collecting());

    diagnostics.push(ErrorDiagnostic::new(
        "bad thing",
        Source::new(key, Location::new(4, 2)),
    ));
    diagnostics.push(WarningDiagnostic::plain("odd thing"));
    diagnostics.push_gagged();

    let messages = diagnostics
        .collected()
        .map(|diagnostic| diagnostic.message().to_string())
        .collect::<Vec<_>>();

    assert_eq!(messages, ["bad thing", "odd thing"]);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.gagged_count(), 1);
}

#[test]
fn test_error_mentions_position() {
    colored::control::set_override(false);

    let source_files = SourceFiles::new();
    let key = source_files.add("main.src".into());
    let error = ErrorDiagnostic::new("oops", Source::new(key, Location::new(7, 3)));

    let mut shown = String::new();
    error.show(&mut shown, &source_files).unwrap();
    assert_eq!(shown, "main.src:7:3: error: oops");
}
