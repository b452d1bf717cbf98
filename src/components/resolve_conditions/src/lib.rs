/*
    ==============  components/resolve_conditions/src/lib.rs  =================
    Decides whether declarations guarded by `version(...)`, `debug(...)`
    and `static if(...)` are included in the program.

    Results are memoized per condition. `version`/`debug` conditions are
    answered from module-local and global settings, while `static if`
    conditions are handed to the expression analyzer and interpreter
    in a constant-evaluation scope.
    ---------------------------------------------------------------------------
*/

mod collaborators;
mod ctx;
mod deps;
mod dv;
mod error;
mod globals;
mod include;
mod predefine;
mod registry;
mod static_if;

pub use collaborators::{ConstValue, Ctfe, Errored, ExprAnalyzer, Scope};
pub use ctx::{Gag, NestingLimits, ResolveCtx};
pub use deps::{DEBUG_LABEL, DependencyReporter, VERSION_LABEL, escape_path};
pub use dv::include_dv;
pub use error::{ConfigError, DeclareError};
pub use globals::GlobalConditions;
pub use include::Include;
pub use predefine::predefined_for;
pub use registry::{Definition, Registry};
pub use static_if::include_static_if;

#[cfg(test)]
mod testing;
