use std::fmt::Display;

/// Displays a possibly-unknown target component, using "unknown" for `None`
pub trait IntoDisplay {
    fn display(self) -> impl Display;
}

impl<T: Display> IntoDisplay for Option<T> {
    fn display(self) -> impl Display {
        OrUnknown(self)
    }
}

struct OrUnknown<T: Display>(Option<T>);

impl<T: Display> Display for OrUnknown<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(inner) => inner.fmt(f),
            None => f.write_str("unknown"),
        }
    }
}
