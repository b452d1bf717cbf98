use compiler::BuildOptions;
use target::{TargetArch, TargetOs};

/// Version identifiers the compiler defines by itself for a build
pub fn predefined_for(options: &BuildOptions) -> Vec<&'static str> {
    let target = &options.target;
    let mut predefined = vec!["all", "D_Version2", "D_HardFloat"];

    match target.os() {
        Some(TargetOs::Windows) => {
            predefined.push("Windows");
            predefined.push(if target.pointer_bits() == 64 {
                "Win64"
            } else {
                "Win32"
            });
        }
        Some(TargetOs::Mac) => predefined.extend(["Posix", "OSX"]),
        Some(TargetOs::Linux) => predefined.extend(["Posix", "linux"]),
        Some(TargetOs::FreeBsd) => predefined.extend(["Posix", "FreeBSD", "BSD"]),
        None => (),
    }

    match target.arch() {
        Some(TargetArch::X86_64) => {
            predefined.extend(["X86_64", "D_InlineAsm_X86_64", "D_SIMD"]);
        }
        Some(TargetArch::Aarch64) => predefined.push("AArch64"),
        None => (),
    }

    predefined.push(if target.is_little_endian() {
        "LittleEndian"
    } else {
        "BigEndian"
    });

    if target.pointer_bits() == 64 {
        predefined.push("D_LP64");
    }

    if options.use_pic() {
        predefined.push("D_PIC");
    }

    if options.coverage {
        predefined.push("D_Coverage");
    }

    if options.ddoc {
        predefined.push("D_Ddoc");
    }

    if options.no_bounds_checks {
        predefined.push("D_NoBoundsChecks");
    }

    if options.unittest {
        predefined.push("unittest");
    }

    if options.asserts_enabled() {
        predefined.push("assert");
    }

    predefined
}

#[cfg(test)]
use conditions::is_predefined_version;
#[cfg(test)]
use target::Target;

#[test]
fn test_linux_x86_64() {
    let options = BuildOptions {
        target: Target::generic_os(TargetOs::Linux),
        ..Default::default()
    };

    let predefined = predefined_for(&options);
    for expected in ["Posix", "linux", "X86_64", "LittleEndian", "D_LP64", "D_PIC", "assert"] {
        assert!(predefined.contains(&expected), "missing {expected}");
    }
    assert!(!predefined.contains(&"Windows"));
    assert!(!predefined.contains(&"unittest"));
}

#[test]
fn test_windows_release_unittest() {
    let options = BuildOptions {
        target: Target::generic_os(TargetOs::Windows).with_arch(TargetArch::Aarch64),
        release: true,
        unittest: true,
        ..Default::default()
    };

    let predefined = predefined_for(&options);
    for expected in ["Windows", "Win64", "AArch64", "unittest", "assert"] {
        assert!(predefined.contains(&expected), "missing {expected}");
    }
    assert!(!predefined.contains(&"Posix"));
    assert!(!predefined.contains(&"D_PIC"));
}

#[test]
fn test_everything_predefined_is_reserved() {
    let options = BuildOptions {
        coverage: true,
        ddoc: true,
        no_bounds_checks: true,
        unittest: true,
        ..Default::default()
    };

    for identifier in predefined_for(&options) {
        assert!(is_predefined_version(identifier), "{identifier} is not reserved");
    }
}
