use derive_more::IsVariant;
use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum TargetOs {
    Windows,
    Mac,
    Linux,
    FreeBsd,
}

impl TargetOs {
    pub const HOST: Option<Self> = if cfg!(target_os = "windows") {
        Some(TargetOs::Windows)
    } else if cfg!(target_os = "macos") {
        Some(TargetOs::Mac)
    } else if cfg!(target_os = "linux") {
        Some(TargetOs::Linux)
    } else if cfg!(target_os = "freebsd") {
        Some(TargetOs::FreeBsd)
    } else {
        None
    };

    pub fn is_posix(&self) -> bool {
        !self.is_windows()
    }
}

impl Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetOs::Windows => write!(f, "windows"),
            TargetOs::Mac => write!(f, "macos"),
            TargetOs::Linux => write!(f, "linux"),
            TargetOs::FreeBsd => write!(f, "freebsd"),
        }
    }
}

pub trait TargetOsExt {
    fn is_windows(&self) -> bool;
    fn is_posix(&self) -> bool;
}

impl TargetOsExt for Option<TargetOs> {
    fn is_windows(&self) -> bool {
        matches!(self, Some(TargetOs::Windows))
    }

    fn is_posix(&self) -> bool {
        self.map_or(false, |os| os.is_posix())
    }
}
