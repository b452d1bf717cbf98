use crate::Invoke;
use indoc::indoc;

pub const USAGE: &str = indoc! {"
    usage: condc [OPTIONS] query DIRECTIVE...
           condc [OPTIONS] --print-predefined

    directives (evaluated in order, inside a single module):
        version IDENT|LEVEL    query a version condition
        debug IDENT|LEVEL      query a debug condition
        version=IDENT|LEVEL    declare inside the module, like `version = IDENT;`
        debug=IDENT|LEVEL      declare inside the module, like `debug = IDENT;`

    options:
        -version=IDENT|LEVEL   define a version identifier or level globally
        -debug[=IDENT|LEVEL]   define a debug identifier or level globally
        -deps                  print the dependencies of evaluated conditions
        -deps=FILE             dependency file (conditions are not written to it)
        -unittest              compile in unittests
        -release               disable asserts
        -cov                   instrument for code coverage
        -D                     generate documentation
        -fPIC                  generate position independent code
        --windows | --mac | --linux | --freebsd
        --target-arch=x86_64|aarch64
"};

#[derive(Clone, Debug)]
pub struct HelpCommand;

impl HelpCommand {
    pub fn parse(_args: impl Iterator<Item = String>) -> Result<Self, ()> {
        Ok(Self)
    }
}

impl Invoke for HelpCommand {
    fn invoke(self) -> Result<(), ()> {
        print!("{}", USAGE);
        Err(())
    }
}
