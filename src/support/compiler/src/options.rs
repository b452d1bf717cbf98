use derive_more::IsVariant;
use std::path::PathBuf;
use target::{Target, TargetOsExt};

#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub target: Target,
    pub deps: DepsOutput,
    pub versions: ConditionFlags,
    pub debugs: ConditionFlags,
    pub unittest: bool,
    pub release: bool,
    pub coverage: bool,
    pub ddoc: bool,
    pub use_pic: Option<bool>,
    pub no_bounds_checks: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            target: Target::HOST,
            deps: DepsOutput::Disabled,
            versions: ConditionFlags::default(),
            debugs: ConditionFlags::default(),
            unittest: false,
            release: false,
            coverage: false,
            ddoc: false,
            use_pic: None,
            no_bounds_checks: false,
        }
    }
}

impl BuildOptions {
    pub fn asserts_enabled(&self) -> bool {
        !self.release || self.unittest
    }

    pub fn use_pic(&self) -> bool {
        // Position independent code is the default for posix targets
        self.use_pic
            .unwrap_or_else(|| self.target.os().is_posix())
    }
}

/// Identifiers and level requested for one of the `version`/`debug`
/// namespaces, as given on the command line
#[derive(Clone, Debug, Default)]
pub struct ConditionFlags {
    pub identifiers: Vec<String>,
    pub level: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, IsVariant)]
pub enum DepsOutput {
    #[default]
    Disabled,
    // Dependency lines are collected and printed after analysis
    Print,
    // Dependency lines are written to a file by the driver
    File(PathBuf),
}

#[test]
fn test_asserts_follow_release_and_unittest() {
    let mut options = BuildOptions::default();
    assert!(options.asserts_enabled());

    options.release = true;
    assert!(!options.asserts_enabled());

    options.unittest = true;
    assert!(options.asserts_enabled());
}

#[test]
fn test_pic_defaults_by_os() {
    let mut options = BuildOptions {
        target: Target::generic_os(target::TargetOs::Windows),
        ..Default::default()
    };
    assert!(!options.use_pic());

    options.target = Target::generic_os(target::TargetOs::Linux);
    assert!(options.use_pic());

    options.use_pic = Some(false);
    assert!(!options.use_pic());
}
