mod declared;
mod namespace;

use append_only_vec::AppendOnlyVec;
pub use declared::DeclaredConditions;
pub use namespace::Namespace;
use source_files::{SourceFileKey, SourceFiles};
use std::fmt::Debug;

#[derive(Debug)]
pub struct Module {
    /// Fully qualified name, e.g. `std.stdio`
    pub name: Box<str>,
    pub source_file: SourceFileKey,
    versions: DeclaredConditions,
    debugs: DeclaredConditions,
}

impl Module {
    pub fn new(name: impl Into<Box<str>>, source_file: SourceFileKey) -> Self {
        Self {
            name: name.into(),
            source_file,
            versions: DeclaredConditions::default(),
            debugs: DeclaredConditions::default(),
        }
    }

    pub fn conditions(&self, namespace: Namespace) -> &DeclaredConditions {
        match namespace {
            Namespace::Version => &self.versions,
            Namespace::Debug => &self.debugs,
        }
    }

    pub fn filename<'a>(&self, source_files: &'a SourceFiles) -> &'a str {
        source_files.get(self.source_file).filename()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleRef(usize);

/// Table of every module known to the compilation.
/// Conditions and scopes refer to modules by [`ModuleRef`] rather than by reference.
pub struct Modules {
    arena: AppendOnlyVec<Module>,
}

impl Modules {
    pub fn new() -> Self {
        Self {
            arena: AppendOnlyVec::new(),
        }
    }

    pub fn add(&self, module: Module) -> ModuleRef {
        ModuleRef(self.arena.push(module))
    }

    pub fn get(&self, module_ref: ModuleRef) -> &Module {
        &self.arena[module_ref.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleRef, &Module)> {
        self.arena
            .iter()
            .enumerate()
            .map(|(index, module)| (ModuleRef(index), module))
    }
}

impl Debug for Modules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.arena.iter()).finish()
    }
}

impl Default for Modules {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_namespaces_are_independent() {
    let source_files = SourceFiles::new();
    let modules = Modules::new();
    let main = modules.add(Module::new("app.main", source_files.add("app/main.src".into())));

    let module = modules.get(main);
    module.conditions(Namespace::Version).define("Foo");

    assert!(module.conditions(Namespace::Version).is_defined("Foo"));
    assert!(!module.conditions(Namespace::Debug).is_defined("Foo"));
    assert_eq!(module.filename(&source_files), "app/main.src");
    assert_eq!(modules.iter().count(), 1);
}
