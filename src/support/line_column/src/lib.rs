use std::fmt::Display;

/// One-based line/column position within a source file
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const START: Self = Self { line: 1, column: 1 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::START
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[test]
fn test_location_ordering() {
    assert!(Location::new(1, 9) < Location::new(2, 1));
    assert!(Location::new(3, 2) < Location::new(3, 4));
    assert_eq!(Location::default().to_string(), "1:1");
}
