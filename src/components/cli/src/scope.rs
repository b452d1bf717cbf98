use modules::ModuleRef;
use resolve_conditions::Scope;

/// Module-level scope for directives given on the command line.
/// Only `version`/`debug` directives are evaluated here, so there is
/// nothing to attach members to and no constant evaluation to track.
#[derive(Copy, Clone, Debug)]
pub struct ModuleScope {
    module: ModuleRef,
}

impl ModuleScope {
    pub fn new(module: ModuleRef) -> Self {
        Self { module }
    }
}

impl Scope for ModuleScope {
    type Symbol = ();

    fn push(&self) -> Self {
        *self
    }

    fn set_guarded_symbol(&mut self, _symbol: Option<()>) {}

    fn set_static_if(&mut self) {}

    fn start_ctfe(&mut self) {}

    fn end_ctfe(&mut self) {}

    fn module(&self) -> Option<ModuleRef> {
        Some(self.module)
    }

    fn instantiating_module(&self) -> Option<ModuleRef> {
        None
    }
}
