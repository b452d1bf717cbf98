/// Version identifiers reserved by the compiler.
/// These describe the platform, architecture and compiler features,
/// and can never be set from outside the compiler.
pub const PREDEFINED_VERSIONS: &[&str] = &[
    "DigitalMars",
    "GNU",
    "LDC",
    "SDC",
    "Windows",
    "Win32",
    "Win64",
    "linux",
    "OSX",
    "FreeBSD",
    "OpenBSD",
    "NetBSD",
    "DragonFlyBSD",
    "BSD",
    "Solaris",
    "Posix",
    "AIX",
    "Haiku",
    "SkyOS",
    "SysV3",
    "SysV4",
    "Hurd",
    "Android",
    "Cygwin",
    "MinGW",
    "X86",
    "X86_64",
    "ARM",
    "ARM_Thumb",
    "ARM_SoftFloat",
    "ARM_SoftFP",
    "ARM_HardFloat",
    "AArch64",
    "PPC",
    "PPC_SoftFloat",
    "PPC_HardFloat",
    "PPC64",
    "IA64",
    "MIPS32",
    "MIPS64",
    "MIPS_O32",
    "MIPS_N32",
    "MIPS_O64",
    "MIPS_N64",
    "MIPS_EABI",
    "MIPS_SoftFloat",
    "MIPS_HardFloat",
    "SPARC",
    "SPARC_V8Plus",
    "SPARC_SoftFloat",
    "SPARC_HardFloat",
    "SPARC64",
    "S390",
    "S390X",
    "HPPA",
    "HPPA64",
    "SH",
    "SH64",
    "Alpha",
    "Alpha_SoftFloat",
    "Alpha_HardFloat",
    "LittleEndian",
    "BigEndian",
    "D_Coverage",
    "D_Ddoc",
    "D_InlineAsm_X86",
    "D_InlineAsm_X86_64",
    "D_LP64",
    "D_X32",
    "D_HardFloat",
    "D_SoftFloat",
    "D_PIC",
    "D_SIMD",
    "D_Version2",
    "D_NoBoundsChecks",
    "unittest",
    "assert",
    "all",
    "none",
];

/// Any identifier starting with this prefix is reserved, listed or not
pub const RESERVED_PREFIX: &str = "D_";

/// Language keywords that double as version identifiers for testing builds
pub const TESTING_VERSIONS: [&str; 2] = ["unittest", "assert"];

pub fn is_predefined_version(identifier: &str) -> bool {
    identifier.starts_with(RESERVED_PREFIX) || PREDEFINED_VERSIONS.contains(&identifier)
}

pub fn is_testing_version(identifier: &str) -> bool {
    TESTING_VERSIONS.contains(&identifier)
}

#[test]
fn test_listed_identifiers() {
    assert!(is_predefined_version("Windows"));
    assert!(is_predefined_version("linux"));
    assert!(is_predefined_version("none"));
    assert!(!is_predefined_version("Linux"));
    assert!(!is_predefined_version("MyFeature"));
}

#[test]
fn test_reserved_prefix() {
    assert!(is_predefined_version("D_Whatever"));
    assert!(is_predefined_version("D_"));
    assert!(!is_predefined_version("D"));
    assert!(!is_predefined_version("DX_Thing"));
}

#[test]
fn test_testing_versions() {
    assert!(is_testing_version("unittest"));
    assert!(is_testing_version("assert"));
    assert!(!is_testing_version("debug"));
}
