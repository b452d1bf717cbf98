use compiler::{BuildOptions, ConditionFlags, DepsOutput};
use target::{Target, TargetArch, TargetOs};

/// Applies a single command-line option to `options`.
/// Returns whether the argument was an option at all.
pub fn parse_build_option(option: &str, options: &mut BuildOptions) -> Result<bool, ()> {
    match option {
        "-unittest" => options.unittest = true,
        "-release" => options.release = true,
        "-cov" => options.coverage = true,
        "-D" => options.ddoc = true,
        "-fPIC" => options.use_pic = Some(true),
        "-debug" => options.debugs.level = Some(1),
        "-deps" => options.deps = DepsOutput::Print,
        "--windows" => set_os(options, TargetOs::Windows),
        "--mac" | "--macos" => set_os(options, TargetOs::Mac),
        "--linux" => set_os(options, TargetOs::Linux),
        "--freebsd" => set_os(options, TargetOs::FreeBsd),
        _ => {
            if let Some(value) = option.strip_prefix("-version=") {
                parse_condition_value("-version=", value, &mut options.versions)?;
            } else if let Some(value) = option.strip_prefix("-debug=") {
                parse_condition_value("-debug=", value, &mut options.debugs)?;
            } else if let Some(filename) = option.strip_prefix("-deps=") {
                if filename.is_empty() {
                    eprintln!("error: Expected filename after '-deps='");
                    return Err(());
                }
                options.deps = DepsOutput::File(filename.into());
            } else if let Some(arch) = option.strip_prefix("--target-arch=") {
                let Ok(arch) = arch.parse::<TargetArch>() else {
                    eprintln!("error: Unsupported target architecture '{}'", arch);
                    return Err(());
                };
                options.target = options.target.with_arch(arch);
            } else if option.starts_with('-') {
                eprintln!("error: Unrecognized option '{}'", option);
                return Err(());
            } else {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

fn set_os(options: &mut BuildOptions, os: TargetOs) {
    options.target = match options.target.arch() {
        Some(arch) => Target::generic_os(os).with_arch(arch),
        None => Target::generic_os(os),
    };
}

fn parse_condition_value(flag: &str, value: &str, flags: &mut ConditionFlags) -> Result<(), ()> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        let Ok(level) = value.parse::<u32>() else {
            eprintln!("error: Level '{}' for '{}' is too large", value, flag);
            return Err(());
        };

        flags.level = Some(level);
        return Ok(());
    }

    if !is_identifier(value) {
        eprintln!("error: Expected identifier or level after '{}'", flag);
        return Err(());
    }

    flags.identifiers.push(value.into());
    Ok(())
}

pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();

    chars
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
fn parse(args: &[&str]) -> Result<BuildOptions, ()> {
    let mut options = BuildOptions::default();

    for arg in args {
        assert!(parse_build_option(arg, &mut options)?, "{} is an option", arg);
    }

    Ok(options)
}

#[test]
fn test_condition_flags() {
    let options = parse(&["-version=Foo", "-version=3", "-debug=Trace", "-version=Bar"]).unwrap();

    assert_eq!(options.versions.identifiers, ["Foo", "Bar"]);
    assert_eq!(options.versions.level, Some(3));
    assert_eq!(options.debugs.identifiers, ["Trace"]);
    assert_eq!(options.debugs.level, None);

    assert_eq!(parse(&["-debug"]).unwrap().debugs.level, Some(1));
}

#[test]
fn test_invalid_values() {
    assert!(parse(&["-version="]).is_err());
    assert!(parse(&["-version=1abc"]).is_err());
    assert!(parse(&["-debug=99999999999"]).is_err());
    assert!(parse(&["-deps="]).is_err());
    assert!(parse(&["--target-arch=mips"]).is_err());
    assert!(parse(&["-frobnicate"]).is_err());
}

#[test]
fn test_deps_modes() {
    assert!(parse(&["-deps"]).unwrap().deps.is_print());
    assert_eq!(
        parse(&["-deps=out.deps"]).unwrap().deps,
        DepsOutput::File("out.deps".into())
    );
    assert!(BuildOptions::default().deps.is_disabled());
}

#[test]
fn test_target_flags() {
    let options = parse(&["--target-arch=aarch64", "--linux"]).unwrap();
    assert_eq!(options.target.os(), Some(TargetOs::Linux));
    assert_eq!(options.target.arch(), Some(TargetArch::Aarch64));

    let options = parse(&["--windows", "-fPIC", "-release"]).unwrap();
    assert_eq!(options.target.os(), Some(TargetOs::Windows));
    assert!(options.use_pic());
    assert!(!options.asserts_enabled());
}

#[test]
fn test_positional_arguments_are_not_options() {
    let mut options = BuildOptions::default();
    assert_eq!(parse_build_option("query", &mut options), Ok(false));
    assert_eq!(parse_build_option("version=Foo", &mut options), Ok(false));
}

#[test]
fn test_identifiers() {
    assert!(is_identifier("Foo_2"));
    assert!(is_identifier("_x"));
    assert!(!is_identifier("2x"));
    assert!(!is_identifier("a-b"));
    assert!(!is_identifier(""));
}
