mod arch;
mod display;
mod os;

pub use arch::TargetArch;
pub use display::IntoDisplay;
pub use os::{TargetOs, TargetOsExt};
use std::{fmt::Display, str::FromStr};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Target {
    arch: Option<TargetArch>,
    os: Option<TargetOs>,
}

impl Target {
    pub const HOST: Self = Self::new(TargetOs::HOST, TargetArch::HOST);

    pub const fn new(os: Option<TargetOs>, arch: Option<TargetArch>) -> Self {
        Self { arch, os }
    }

    pub const fn generic_os(os: TargetOs) -> Self {
        let arch = match os {
            TargetOs::Windows | TargetOs::Mac | TargetOs::Linux | TargetOs::FreeBsd => {
                TargetArch::X86_64
            }
        };

        Self::new(Some(os), Some(arch))
    }

    pub fn with_arch(self, arch: TargetArch) -> Self {
        Self::new(self.os, Some(arch))
    }

    pub fn os(&self) -> Option<TargetOs> {
        self.os
    }

    pub fn arch(&self) -> Option<TargetArch> {
        self.arch
    }

    pub fn is_little_endian(&self) -> bool {
        match &self.arch {
            None | Some(TargetArch::X86_64) | Some(TargetArch::Aarch64) => true,
        }
    }

    pub fn pointer_bits(&self) -> u32 {
        // Unknown architectures are assumed to be 64-bit
        self.arch.map_or(64, |arch| arch.pointer_bits())
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.arch.display(), self.os.display())
    }
}

impl FromStr for TargetArch {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" | "amd64" => Ok(TargetArch::X86_64),
            "aarch64" | "arm64" => Ok(TargetArch::Aarch64),
            _ => Err(()),
        }
    }
}

#[test]
fn test_generic_os_defaults_to_x86_64() {
    let target = Target::generic_os(TargetOs::Linux);
    assert_eq!(target.arch(), Some(TargetArch::X86_64));
    assert!(target.os().is_posix());
    assert_eq!(target.to_string(), "x86_64 linux");
}

#[test]
fn test_unknown_parts_display() {
    let target = Target::new(None, Some(TargetArch::Aarch64));
    assert_eq!(target.to_string(), "aarch64 unknown");
    assert_eq!("arm64".parse::<TargetArch>(), Ok(TargetArch::Aarch64));
}
