mod invoke;

use crate::options::parse_build_option;
use compiler::BuildOptions;

#[derive(Clone, Debug)]
pub struct PredefinedCommand {
    pub options: BuildOptions,
}

impl PredefinedCommand {
    pub fn parse(args: impl Iterator<Item = String>) -> Result<Self, ()> {
        let mut options = BuildOptions::default();

        for arg in args.filter(|arg| arg != "--print-predefined") {
            if !parse_build_option(&arg, &mut options)? {
                eprintln!("error: Unexpected argument '{}'", arg);
                return Err(());
            }
        }

        Ok(Self { options })
    }
}
