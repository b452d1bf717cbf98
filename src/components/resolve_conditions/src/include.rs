use crate::{ExprAnalyzer, ResolveCtx, Scope, include_dv, include_static_if};
use conditions::Condition;
use modules::Namespace;

pub trait Include<S: Scope, A: ExprAnalyzer<S>> {
    /// Whether the declarations guarded by this condition are part of the program.
    ///
    /// The answer is computed on first use and then remembered,
    /// so later calls return the same answer regardless of their arguments.
    fn include(
        &self,
        ctx: &ResolveCtx,
        analyzer: &mut A,
        scope: Option<&S>,
        symbol: Option<S::Symbol>,
    ) -> bool;
}

impl<E, S, A> Include<S, A> for Condition<E>
where
    S: Scope,
    A: ExprAnalyzer<S, Expr = E>,
{
    fn include(
        &self,
        ctx: &ResolveCtx,
        analyzer: &mut A,
        scope: Option<&S>,
        symbol: Option<S::Symbol>,
    ) -> bool {
        match self {
            Condition::Version(dv) => include_dv(ctx, Namespace::Version, dv, scope),
            Condition::Debug(dv) => include_dv(ctx, Namespace::Debug, dv, scope),
            Condition::StaticIf(static_if) => {
                include_static_if(ctx, static_if, analyzer, scope, symbol)
            }
        }
    }
}

#[cfg(test)]
use crate::testing::{Expr, TestAnalyzer, TestScope, World};
#[cfg(test)]
use conditions::DvQuery;

#[test]
fn test_copied_version_condition_resolves_once() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");

    let original = Condition::<Expr>::version(
        main,
        DvQuery::Identifier("Foo".into()),
        world.source(main, 3),
    );
    let copy = original.syntax_copy();
    let mut analyzer = TestAnalyzer::new(&[], Vec::new());

    world.run(|ctx, _| {
        assert!(!original.include(ctx, &mut analyzer, None::<&TestScope>, None));
        assert!(!copy.include(ctx, &mut analyzer, None::<&TestScope>, None));
    });

    assert!(copy.inclusion().is_excluded());
    assert_eq!(world.deps(), ["depsVersion M (/a/b.src) : Foo"]);
}
