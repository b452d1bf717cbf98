mod invoke;
mod parse;

use compiler::BuildOptions;
use conditions::DvQuery;
use modules::Namespace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// `version X` / `debug X`, evaluated and printed
    Query(Namespace, DvQuery),
    /// `version=X` / `debug=X`, declared inside the queried module
    Declare(Namespace, DvQuery),
}

#[derive(Clone, Debug)]
pub struct QueryCommand {
    pub directives: Vec<Directive>,
    pub options: BuildOptions,
}
