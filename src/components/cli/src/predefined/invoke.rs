use super::PredefinedCommand;
use crate::Invoke;
use resolve_conditions::predefined_for;

impl Invoke for PredefinedCommand {
    fn invoke(self) -> Result<(), ()> {
        for identifier in predefined_for(&self.options) {
            println!("{}", identifier);
        }
        Ok(())
    }
}
