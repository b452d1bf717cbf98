use crate::Memo;
use derivative::Derivative;
use source_files::Source;
use std::cell::Cell;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct StaticIfCondition<E> {
    pub expr: E,
    pub source: Source,
    pub memo: Memo,
    #[derivative(Debug = "ignore")]
    nesting: Cell<u32>,
}

impl<E> StaticIfCondition<E> {
    pub fn new(expr: E, source: Source) -> Self {
        Self {
            expr,
            source,
            memo: Memo::default(),
            nesting: Cell::new(0),
        }
    }

    /// How many evaluations of this condition are currently in flight
    pub fn nesting(&self) -> u32 {
        self.nesting.get()
    }

    /// Marks one more evaluation as in flight until the returned guard is dropped
    pub fn nest(&self) -> Nested<'_> {
        self.nesting.set(self.nesting.get() + 1);
        Nested {
            nesting: &self.nesting,
        }
    }
}

impl<E: Clone> StaticIfCondition<E> {
    /// Fresh, unevaluated copy (used when instantiating templates)
    pub fn syntax_copy(&self) -> Self {
        Self::new(self.expr.clone(), self.source)
    }
}

#[must_use]
pub struct Nested<'a> {
    nesting: &'a Cell<u32>,
}

impl<'a> Drop for Nested<'a> {
    fn drop(&mut self) {
        self.nesting.set(self.nesting.get() - 1);
    }
}

#[test]
fn test_nesting_restored_on_drop() {
    let condition = StaticIfCondition::new("x", Source::internal());

    {
        let _outer = condition.nest();
        let _inner = condition.nest();
        assert_eq!(condition.nesting(), 2);
    }

    assert_eq!(condition.nesting(), 0);
}

#[test]
fn test_nesting_restored_on_unwind() {
    let condition = StaticIfCondition::new("x", Source::internal());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _nested = condition.nest();
        panic!("evaluation blew up");
    }));

    assert!(result.is_err());
    assert_eq!(condition.nesting(), 0);
}

#[test]
fn test_syntax_copy_is_fresh() {
    let condition = StaticIfCondition::new(String::from("a == b"), Source::internal());
    condition.memo.settle(true);

    let copy = condition.syntax_copy();
    assert!(copy.memo.get().is_unresolved());
    assert_eq!(copy.expr, "a == b");
}
