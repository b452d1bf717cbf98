use diagnostics::{Diagnostics, WarningDiagnostic};
use target::Target;

pub fn warn_if_unsupported_target(target: &Target, diagnostics: &Diagnostics) {
    if target.arch().is_none() {
        diagnostics.push(WarningDiagnostic::plain(
            "Target architecture is not supported, no architecture identifiers will be predefined",
        ));
    }

    if target.os().is_none() {
        diagnostics.push(WarningDiagnostic::plain(
            "Target os is not supported, no operating system identifiers will be predefined",
        ));
    }
}
