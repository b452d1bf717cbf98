use crate::{DeclareError, GlobalConditions};
use conditions::is_predefined_version;
use derive_more::IsVariant;
use modules::{ModuleRef, Modules, Namespace};

/// Where an identifier was found to be defined
#[derive(Copy, Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum Definition {
    InModule,
    Global,
    Undefined,
}

/// Answers which identifiers and levels are defined, combining
/// the module-local declarations with the global settings
#[derive(Copy, Clone, Debug)]
pub struct Registry<'a> {
    globals: &'a GlobalConditions,
    modules: &'a Modules,
}

impl<'a> Registry<'a> {
    pub fn new(globals: &'a GlobalConditions, modules: &'a Modules) -> Self {
        Self { globals, modules }
    }

    /// Looks up an identifier in the module first, then globally.
    /// Identifiers that aren't defined anywhere are remembered by the module.
    pub fn lookup(&self, namespace: Namespace, identifier: &str, module: ModuleRef) -> Definition {
        let declared = self.modules.get(module).conditions(namespace);

        if declared.is_defined(identifier) {
            Definition::InModule
        } else if self.globals.is_defined(namespace, identifier) {
            Definition::Global
        } else {
            declared.note_not_defined(identifier);
            Definition::Undefined
        }
    }

    pub fn is_defined(&self, namespace: Namespace, identifier: &str, module: ModuleRef) -> bool {
        !self.lookup(namespace, identifier, module).is_undefined()
    }

    /// Either threshold is enough to include a level, the module's doesn't override the global one
    pub fn is_defined_by_level(&self, namespace: Namespace, level: u32, module: ModuleRef) -> bool {
        level <= self.globals.level(namespace)
            || level <= self.modules.get(module).conditions(namespace).level()
    }

    /// Handles `version = identifier;` / `debug = identifier;` inside a module
    pub fn declare_identifier(
        &self,
        module: ModuleRef,
        namespace: Namespace,
        identifier: &str,
    ) -> Result<(), DeclareError> {
        if namespace.is_version() && is_predefined_version(identifier) {
            return Err(DeclareError::Reserved(identifier.into()));
        }

        let declared = self.modules.get(module).conditions(namespace);

        if declared.was_queried_undefined(identifier) {
            return Err(DeclareError::DefinedAfterUse(namespace, identifier.into()));
        }

        declared.define(identifier);
        Ok(())
    }

    /// Handles `version = level;` / `debug = level;` inside a module
    pub fn declare_level(&self, module: ModuleRef, namespace: Namespace, level: u32) {
        self.modules
            .get(module)
            .conditions(namespace)
            .raise_level(level);
    }
}

#[cfg(test)]
use modules::Module;
#[cfg(test)]
use source_files::SourceFiles;

#[cfg(test)]
fn setup() -> (GlobalConditions, Modules, ModuleRef) {
    let source_files = SourceFiles::new();
    let modules = Modules::new();
    let module = modules.add(Module::new("app", source_files.add("app.src".into())));

    let mut globals = GlobalConditions::new();
    globals.add_global_identifier(Namespace::Version, "Global").unwrap();
    (globals, modules, module)
}

#[test]
fn test_lookup_order() {
    let (mut globals, modules, module) = setup();
    globals.add_global_identifier(Namespace::Version, "Both").unwrap();
    let registry = Registry::new(&globals, &modules);

    registry.declare_identifier(module, Namespace::Version, "Both").unwrap();
    registry.declare_identifier(module, Namespace::Version, "Local").unwrap();

    assert_eq!(registry.lookup(Namespace::Version, "Both", module), Definition::InModule);
    assert_eq!(registry.lookup(Namespace::Version, "Local", module), Definition::InModule);
    assert_eq!(registry.lookup(Namespace::Version, "Global", module), Definition::Global);
    assert_eq!(registry.lookup(Namespace::Version, "Nope", module), Definition::Undefined);
    assert_eq!(registry.lookup(Namespace::Debug, "Local", module), Definition::Undefined);
}

#[test]
fn test_undefined_lookups_are_remembered_once() {
    let (globals, modules, module) = setup();
    let registry = Registry::new(&globals, &modules);

    assert!(!registry.is_defined(Namespace::Debug, "Trace", module));
    assert!(!registry.is_defined(Namespace::Debug, "Trace", module));
    assert!(registry.is_defined(Namespace::Version, "Global", module));

    let declared = modules.get(module).conditions(Namespace::Debug);
    assert_eq!(declared.not_defined(), [Box::<str>::from("Trace")]);
    assert!(
        modules
            .get(module)
            .conditions(Namespace::Version)
            .not_defined()
            .is_empty()
    );
}

#[test]
fn test_levels_either_threshold() {
    let (globals, modules, module) = setup();
    let registry = Registry::new(&globals, &modules);
    registry.declare_level(module, Namespace::Version, 3);

    assert!(registry.is_defined_by_level(Namespace::Version, 0, module));
    assert!(registry.is_defined_by_level(Namespace::Version, 2, module));
    assert!(registry.is_defined_by_level(Namespace::Version, 3, module));
    assert!(!registry.is_defined_by_level(Namespace::Version, 4, module));
    assert!(!registry.is_defined_by_level(Namespace::Debug, 2, module));

    let mut globals = globals;
    globals.set_global_level(Namespace::Version, 5);
    let registry = Registry::new(&globals, &modules);
    assert!(registry.is_defined_by_level(Namespace::Version, 4, module));
}

#[test]
fn test_declaring_reserved_version() {
    let (globals, modules, module) = setup();
    let registry = Registry::new(&globals, &modules);

    assert_eq!(
        registry.declare_identifier(module, Namespace::Version, "OSX"),
        Err(DeclareError::Reserved("OSX".into()))
    );
    assert!(registry.declare_identifier(module, Namespace::Debug, "OSX").is_ok());
    assert!(!modules.get(module).conditions(Namespace::Version).is_defined("OSX"));
}

#[test]
fn test_defined_after_use() {
    let (globals, modules, module) = setup();
    let registry = Registry::new(&globals, &modules);

    assert!(!registry.is_defined(Namespace::Version, "Late", module));

    let error = registry
        .declare_identifier(module, Namespace::Version, "Late")
        .unwrap_err();
    assert_eq!(error.to_string(), "version identifier 'Late' defined after use");
    assert!(!modules.get(module).conditions(Namespace::Version).is_defined("Late"));
}
