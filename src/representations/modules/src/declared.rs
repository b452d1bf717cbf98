use indexmap::IndexSet;
use std::cell::{Cell, RefCell};

/// Module-local conditional compilation state for a single namespace
#[derive(Debug, Default)]
pub struct DeclaredConditions {
    defined: RefCell<IndexSet<Box<str>>>,
    not_defined: RefCell<IndexSet<Box<str>>>,
    level: Cell<u32>,
}

impl DeclaredConditions {
    pub fn is_defined(&self, identifier: &str) -> bool {
        self.defined.borrow().contains(identifier)
    }

    /// Returns whether the identifier was newly defined
    pub fn define(&self, identifier: &str) -> bool {
        self.defined.borrow_mut().insert(identifier.into())
    }

    pub fn defined(&self) -> Vec<Box<str>> {
        self.defined.borrow().iter().cloned().collect()
    }

    /// Remembers that `identifier` was queried by this module and found
    /// to not be defined anywhere. Recording the same identifier twice is a no-op.
    pub fn note_not_defined(&self, identifier: &str) {
        let mut not_defined = self.not_defined.borrow_mut();

        if !not_defined.contains(identifier) {
            not_defined.insert(identifier.into());
        }
    }

    pub fn was_queried_undefined(&self, identifier: &str) -> bool {
        self.not_defined.borrow().contains(identifier)
    }

    pub fn not_defined(&self) -> Vec<Box<str>> {
        self.not_defined.borrow().iter().cloned().collect()
    }

    pub fn level(&self) -> u32 {
        self.level.get()
    }

    /// Levels only ever grow, later declarations can't lower an earlier one
    pub fn raise_level(&self, level: u32) {
        self.level.set(self.level.get().max(level));
    }
}

#[test]
fn test_not_defined_is_idempotent() {
    let declared = DeclaredConditions::default();
    declared.note_not_defined("Foo");
    declared.note_not_defined("Bar");
    declared.note_not_defined("Foo");

    assert_eq!(declared.not_defined(), [Box::<str>::from("Foo"), Box::from("Bar")]);
    assert!(declared.was_queried_undefined("Bar"));
    assert!(!declared.is_defined("Foo"));
}

#[test]
fn test_level_only_raises() {
    let declared = DeclaredConditions::default();
    assert_eq!(declared.level(), 0);

    declared.raise_level(3);
    declared.raise_level(1);
    assert_eq!(declared.level(), 3);
}

#[test]
fn test_define_reports_new() {
    let declared = DeclaredConditions::default();
    assert!(declared.define("Foo"));
    assert!(!declared.define("Foo"));
    assert!(declared.is_defined("Foo"));
    assert_eq!(declared.defined(), [Box::<str>::from("Foo")]);
}
