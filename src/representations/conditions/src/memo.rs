use derive_more::IsVariant;
use std::cell::Cell;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, IsVariant)]
pub enum Inclusion {
    #[default]
    Unresolved,
    Included,
    Excluded,
}

impl From<bool> for Inclusion {
    fn from(included: bool) -> Self {
        if included {
            Inclusion::Included
        } else {
            Inclusion::Excluded
        }
    }
}

/// Write-once tri-state result of a condition.
///
/// Once a memo is settled to either [`Inclusion::Included`] or [`Inclusion::Excluded`],
/// it stays that way.
#[derive(Clone, Debug, Default)]
pub struct Memo {
    inclusion: Cell<Inclusion>,
}

impl Memo {
    pub fn get(&self) -> Inclusion {
        self.inclusion.get()
    }

    pub fn is_included(&self) -> bool {
        self.get().is_included()
    }

    /// Settles the memo if it is still unresolved, and returns the settled answer.
    /// An earlier settlement always wins over a later one.
    pub fn settle(&self, included: bool) -> bool {
        if self.get().is_unresolved() {
            self.inclusion.set(included.into());
        }

        self.is_included()
    }

    /// Computes the answer on first use.
    ///
    /// The closure may return `None` to leave the memo unresolved,
    /// in which case this call answers `false` and a later call will compute again.
    pub fn resolve_with(&self, compute: impl FnOnce() -> Option<bool>) -> bool {
        if !self.get().is_unresolved() {
            return self.is_included();
        }

        match compute() {
            Some(included) => self.settle(included),
            None => self.is_included(),
        }
    }
}

#[test]
fn test_first_settlement_wins() {
    let memo = Memo::default();
    assert!(memo.get().is_unresolved());

    assert!(!memo.settle(false));
    assert!(!memo.settle(true));
    assert_eq!(memo.get(), Inclusion::Excluded);
}

#[test]
fn test_resolve_computes_once() {
    let memo = Memo::default();
    let mut calls = 0;

    assert!(memo.resolve_with(|| {
        calls += 1;
        Some(true)
    }));
    assert!(memo.resolve_with(|| {
        calls += 1;
        Some(false)
    }));

    assert_eq!(calls, 1);
}

#[test]
fn test_unresolved_result_can_retry() {
    let memo = Memo::default();

    assert!(!memo.resolve_with(|| None));
    assert!(memo.get().is_unresolved());
    assert!(memo.resolve_with(|| Some(true)));
}

#[test]
fn test_settled_during_computation_keeps_earlier_answer() {
    let memo = Memo::default();

    // A re-entrant evaluation settles the memo before the outer one finishes
    let included = memo.resolve_with(|| {
        memo.settle(false);
        Some(true)
    });

    assert!(!included);
    assert_eq!(memo.get(), Inclusion::Excluded);
}
