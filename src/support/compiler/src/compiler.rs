use crate::BuildOptions;
use diagnostics::Diagnostics;
use target::Target;

pub struct Compiler<'a> {
    pub options: BuildOptions,
    pub diagnostics: &'a Diagnostics<'a>,
}

impl<'a> Compiler<'a> {
    pub fn new(options: BuildOptions, diagnostics: &'a Diagnostics<'a>) -> Self {
        Self {
            options,
            diagnostics,
        }
    }

    pub fn target(&self) -> &Target {
        &self.options.target
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.error_count() > 0
    }
}
