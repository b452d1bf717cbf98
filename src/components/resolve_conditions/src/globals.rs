use crate::ConfigError;
use compiler::{BuildOptions, ConditionFlags};
use conditions::is_predefined_version;
use indexmap::IndexSet;
use modules::Namespace;

/// Conditional compilation settings that apply to every module.
///
/// Built once during configuration, before any module is analyzed,
/// and only read afterwards.
#[derive(Clone, Debug, Default)]
pub struct GlobalConditions {
    versions: GlobalNamespace,
    debugs: GlobalNamespace,
}

#[derive(Clone, Debug, Default)]
struct GlobalNamespace {
    identifiers: IndexSet<Box<str>>,
    level: u32,
}

impl GlobalConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global settings for a build, including the identifiers the compiler
    /// predefines for the target and everything requested on the command line.
    /// All invalid requests are reported, not just the first one.
    pub fn for_build(options: &BuildOptions) -> Result<Self, Vec<ConfigError>> {
        let mut globals = Self::new();
        let mut errors = Vec::new();

        for identifier in crate::predefine::predefined_for(options) {
            globals.add_predefined_identifier(identifier);
        }

        for (namespace, flags) in [
            (Namespace::Version, &options.versions),
            (Namespace::Debug, &options.debugs),
        ] {
            let ConditionFlags { identifiers, level } = flags;

            for identifier in identifiers {
                if let Err(error) = globals.add_global_identifier(namespace, identifier) {
                    errors.push(error);
                }
            }

            if let Some(level) = level {
                globals.set_global_level(namespace, *level);
            }
        }

        if errors.is_empty() {
            Ok(globals)
        } else {
            Err(errors)
        }
    }

    fn namespace(&self, namespace: Namespace) -> &GlobalNamespace {
        match namespace {
            Namespace::Version => &self.versions,
            Namespace::Debug => &self.debugs,
        }
    }

    fn namespace_mut(&mut self, namespace: Namespace) -> &mut GlobalNamespace {
        match namespace {
            Namespace::Version => &mut self.versions,
            Namespace::Debug => &mut self.debugs,
        }
    }

    /// Defines an identifier for every module.
    /// Reserved version identifiers are rejected without changing anything.
    pub fn add_global_identifier(
        &mut self,
        namespace: Namespace,
        identifier: &str,
    ) -> Result<(), ConfigError> {
        if namespace.is_version() && is_predefined_version(identifier) {
            return Err(ConfigError::ReservedIdentifier(identifier.into()));
        }

        self.namespace_mut(namespace)
            .identifiers
            .insert(identifier.into());
        Ok(())
    }

    /// Defines a version identifier on behalf of the compiler itself,
    /// which is allowed to use reserved names
    pub fn add_predefined_identifier(&mut self, identifier: &str) {
        self.versions.identifiers.insert(identifier.into());
    }

    pub fn set_global_level(&mut self, namespace: Namespace, level: u32) {
        self.namespace_mut(namespace).level = level;
    }

    pub fn level(&self, namespace: Namespace) -> u32 {
        self.namespace(namespace).level
    }

    pub fn is_defined(&self, namespace: Namespace, identifier: &str) -> bool {
        self.namespace(namespace).identifiers.contains(identifier)
    }

    pub fn identifiers(&self, namespace: Namespace) -> impl Iterator<Item = &str> {
        self.namespace(namespace)
            .identifiers
            .iter()
            .map(|identifier| &**identifier)
    }
}

#[cfg(test)]
use target::{Target, TargetOs};

#[test]
fn test_reserved_version_is_rejected_without_mutation() {
    let mut globals = GlobalConditions::new();

    assert_eq!(
        globals.add_global_identifier(Namespace::Version, "Windows"),
        Err(ConfigError::ReservedIdentifier("Windows".into()))
    );
    assert_eq!(
        globals.add_global_identifier(Namespace::Version, "D_Custom"),
        Err(ConfigError::ReservedIdentifier("D_Custom".into()))
    );

    assert!(!globals.is_defined(Namespace::Version, "Windows"));
    assert_eq!(globals.identifiers(Namespace::Version).count(), 0);
}

#[test]
fn test_debug_has_no_reserved_names() {
    let mut globals = GlobalConditions::new();

    assert!(globals.add_global_identifier(Namespace::Debug, "Windows").is_ok());
    assert!(globals.is_defined(Namespace::Debug, "Windows"));
    assert!(!globals.is_defined(Namespace::Version, "Windows"));
}

#[test]
fn test_predefined_path_allows_reserved() {
    let mut globals = GlobalConditions::new();
    globals.add_predefined_identifier("linux");
    assert!(globals.is_defined(Namespace::Version, "linux"));
}

#[test]
fn test_for_build_collects_every_error() {
    let mut options = BuildOptions {
        target: Target::generic_os(TargetOs::Linux),
        ..Default::default()
    };
    options.versions.identifiers = vec!["Feature".into(), "linux".into(), "D_LP64".into()];
    options.debugs.identifiers = vec!["linux".into()];
    options.debugs.level = Some(2);

    let errors = GlobalConditions::for_build(&options).unwrap_err();
    assert_eq!(
        errors,
        [
            ConfigError::ReservedIdentifier("linux".into()),
            ConfigError::ReservedIdentifier("D_LP64".into()),
        ]
    );

    options.versions.identifiers = vec!["Feature".into()];
    let globals = GlobalConditions::for_build(&options).unwrap();
    assert!(globals.is_defined(Namespace::Version, "Feature"));
    assert!(globals.is_defined(Namespace::Version, "linux"));
    assert!(globals.is_defined(Namespace::Debug, "linux"));
    assert_eq!(globals.level(Namespace::Debug), 2);
    assert_eq!(globals.level(Namespace::Version), 0);
}

#[test]
fn test_error_message() {
    assert_eq!(
        ConfigError::ReservedIdentifier("Windows".into()).to_string(),
        "version identifier 'Windows' is reserved and cannot be set"
    );
}
