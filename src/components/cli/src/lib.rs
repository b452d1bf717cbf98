mod help;
mod options;
mod predefined;
mod query;
mod scope;
mod supported_targets;

use enum_dispatch::enum_dispatch;
use help::HelpCommand;
use predefined::PredefinedCommand;
use query::QueryCommand;

#[enum_dispatch(Invoke)]
#[derive(Clone, Debug)]
pub enum Command {
    Help(HelpCommand),
    Query(QueryCommand),
    Predefined(PredefinedCommand),
}

impl Command {
    pub fn parse() -> Result<Self, ()> {
        Self::parse_from(std::env::args().skip(1))
    }

    pub fn parse_from(args: impl Iterator<Item = String>) -> Result<Self, ()> {
        let args = args.collect::<Vec<_>>();

        match args.first().map(String::as_str) {
            Some("-h" | "--help") | None => HelpCommand::parse(args.into_iter()).map(Self::from),
            _ if args.iter().any(|arg| arg == "--print-predefined") => {
                PredefinedCommand::parse(args.into_iter()).map(Self::from)
            }
            _ => QueryCommand::parse(args.into_iter()).map(Self::from),
        }
    }
}

#[enum_dispatch]
pub trait Invoke {
    fn invoke(self) -> Result<(), ()>;
}
