use cli::{Command, Invoke};
use std::process::ExitCode;

fn main() -> ExitCode {
    match Command::parse().and_then(Invoke::invoke) {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}
