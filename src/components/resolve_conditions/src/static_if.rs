use crate::{ConstValue, Ctfe, ExprAnalyzer, ResolveCtx, Scope};
use conditions::StaticIfCondition;

/// Resolves a `static if(...)` condition on first use.
///
/// The expression is analyzed in a child of `scope` that is in constant-evaluation
/// mode and attaches new members to `symbol`. Evaluating it may re-enter this
/// function for the same or other conditions.
pub fn include_static_if<S, A>(
    ctx: &ResolveCtx,
    condition: &StaticIfCondition<A::Expr>,
    analyzer: &mut A,
    scope: Option<&S>,
    symbol: Option<S::Symbol>,
) -> bool
where
    S: Scope,
    A: ExprAnalyzer<S>,
{
    condition
        .memo
        .resolve_with(|| evaluate(ctx, condition, analyzer, scope, symbol))
}

/// `Some` settles the condition for good, `None` leaves it open for another attempt
fn evaluate<S, A>(
    ctx: &ResolveCtx,
    condition: &StaticIfCondition<A::Expr>,
    analyzer: &mut A,
    scope: Option<&S>,
    symbol: Option<S::Symbol>,
) -> Option<bool>
where
    S: Scope,
    A: ExprAnalyzer<S>,
{
    let source = condition.source;

    let Some(scope) = scope else {
        ctx.error("static if conditional cannot be at global scope", source);
        return Some(false);
    };

    // Runaway recursion is never retried, even while gagged
    if condition.nesting() > ctx.limits.reentry || ctx.depth() > ctx.limits.depth {
        ctx.error(
            if ctx.depth() > ctx.limits.depth {
                "unresolvable circular static if expression"
            } else {
                "error evaluating static if expression"
            },
            source,
        );
        return Some(false);
    }

    if analyzer.is_error(&condition.expr) {
        ctx.error("error evaluating static if expression", source);
        return failed(ctx);
    }

    let analyzed = {
        let _nested = condition.nest();
        let inner = ctx.nested();

        let mut child = scope.push();
        child.set_guarded_symbol(symbol);
        child.set_static_if();

        let ctfe = Ctfe::start(&mut child);
        analyzer.semantic(&inner, &condition.expr, &ctfe)
    };

    let Ok(typed) = analyzed else {
        return failed(ctx);
    };

    if !analyzer.is_boolean(&typed) {
        ctx.error(
            format!(
                "expression {} of type {} does not have a boolean value",
                condition.expr,
                analyzer.type_name(&typed)
            ),
            source,
        );
        return failed(ctx);
    }

    let Ok(value) = analyzer.interpret(ctx, typed) else {
        return failed(ctx);
    };

    if value.is_bool(true) {
        Some(true)
    } else if value.is_bool(false) {
        Some(false)
    } else {
        ctx.error(
            format!(
                "expression {} is not constant or does not evaluate to a bool",
                value
            ),
            source,
        );
        failed(ctx)
    }
}

/// Failures are permanent unless gagged, so the same error isn't reported twice.
/// Gagged failures stay open so the speculative attempt can be retried later.
fn failed(ctx: &ResolveCtx) -> Option<bool> {
    if ctx.is_gagged() { None } else { Some(false) }
}

#[cfg(test)]
use crate::{
    Include, NestingLimits,
    testing::{Decl, Expr, TestAnalyzer, TestScope, World, messages},
};
#[cfg(test)]
use conditions::{Condition, DvQuery, Inclusion};
#[cfg(test)]
use modules::Namespace;
#[cfg(test)]
use itertools::Itertools;
#[cfg(test)]
use source_files::Source;

#[cfg(test)]
fn static_if(expr: Expr) -> Condition<Expr> {
    Condition::static_if(expr, Source::internal())
}

#[test]
fn test_evaluates_once() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [static_if(Expr::eq(Expr::ident("N"), Expr::Int(3)))];
    let mut analyzer = TestAnalyzer::new(&conditions, vec![Decl::new("N", Expr::Int(3), None)]);
    let scope = TestScope::new(Some(main));

    world.run(|ctx, diagnostics| {
        assert!(conditions[0].include(ctx, &mut analyzer, Some(&scope), None));
        assert!(conditions[0].include(ctx, &mut analyzer, Some(&scope), None));
        assert_eq!(diagnostics.collected().count(), 0);
    });

    assert_eq!(analyzer.semantic_calls, 1);
    assert_eq!(conditions[0].inclusion(), Inclusion::Included);
}

#[test]
fn test_analyzed_in_constant_evaluation_scope() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [static_if(Expr::Bool(false))];
    let mut analyzer = TestAnalyzer::new(&conditions, Vec::new());
    let scope = TestScope::new(Some(main));

    world.run(|ctx, _| {
        assert!(!conditions[0].include(ctx, &mut analyzer, Some(&scope), Some(7)));
    });

    let seen = &analyzer.seen_scopes[0];
    assert!(seen.static_if);
    assert!(seen.ctfe);
    assert_eq!(seen.guarded, Some(7));
    assert_eq!(seen.module, Some(main));

    assert!(!scope.static_if);
    assert_eq!(scope.ctfe_balance.get(), 0);
}

#[test]
fn test_guarded_declarations_see_each_other() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    world
        .modules
        .get(main)
        .conditions(Namespace::Version)
        .define("Fast");

    let conditions = [
        static_if(Expr::and(Expr::ident("fast"), Expr::eq(Expr::ident("width"), Expr::Int(64)))),
        Condition::version(main, DvQuery::Identifier("Fast".into()), Source::internal()),
        static_if(Expr::Bool(true)),
    ];
    let decls = vec![
        Decl::new("fast", Expr::Bool(true), Some(1)),
        Decl::new("width", Expr::Int(64), Some(2)),
    ];
    let mut analyzer = TestAnalyzer::new(&conditions, decls);
    let scope = TestScope::new(Some(main));

    world.run(|ctx, _| {
        assert!(conditions[0].include(ctx, &mut analyzer, Some(&scope), None));
    });

    assert!(conditions.iter().all(|condition| condition.inclusion().is_included()));
}

#[test]
fn test_global_scope_is_an_error() {
    let world = World::new();
    let conditions = [static_if(Expr::Bool(true))];
    let mut analyzer = TestAnalyzer::new(&conditions, Vec::new());

    world.run(|ctx, diagnostics| {
        assert!(!conditions[0].include(&ctx.gagged(), &mut analyzer, None::<&TestScope>, None));
        assert_eq!(diagnostics.gagged_count(), 1);
    });

    assert_eq!(conditions[0].inclusion(), Inclusion::Excluded);
    assert_eq!(analyzer.semantic_calls, 0);

    world.run(|ctx, diagnostics| {
        assert!(!conditions[0].include(ctx, &mut analyzer, None::<&TestScope>, None));
        assert!(messages(diagnostics).is_empty());
    });
}

#[test]
fn test_type_and_value_errors() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [
        static_if(Expr::Int(3)),
        static_if(Expr::Runtime),
        static_if(Expr::Poisoned),
        static_if(Expr::Trap),
    ];
    let mut analyzer = TestAnalyzer::new(&conditions, Vec::new());
    let scope = TestScope::new(Some(main));

    world.run(|ctx, diagnostics| {
        for condition in conditions.iter() {
            assert!(!condition.include(ctx, &mut analyzer, Some(&scope), None));
            assert_eq!(condition.inclusion(), Inclusion::Excluded);
        }

        assert_eq!(
            messages(diagnostics),
            [
                "expression 3 of type int does not have a boolean value",
                "expression __runtime is not constant or does not evaluate to a bool",
                "error evaluating static if expression",
                "cannot interpret __trap at compile time",
            ]
        );
    });

    // Already poisoned expressions never reach analysis
    assert_eq!(analyzer.semantic_calls, 3);
}

#[test]
fn test_gagged_failure_can_be_retried() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [static_if(Expr::ident("late"))];
    let mut analyzer = TestAnalyzer::new(&conditions, Vec::new());
    let scope = TestScope::new(Some(main));

    world.run(|ctx, diagnostics| {
        assert!(!conditions[0].include(&ctx.gagged(), &mut analyzer, Some(&scope), None));
        assert_eq!(conditions[0].inclusion(), Inclusion::Unresolved);
        assert_eq!(diagnostics.gagged_count(), 1);
        assert_eq!(diagnostics.collected().count(), 0);

        analyzer.decls.push(Decl::new("late", Expr::Bool(true), None));

        assert!(conditions[0].include(ctx, &mut analyzer, Some(&scope), None));
        assert_eq!(diagnostics.collected().count(), 0);
    });

    assert_eq!(conditions[0].inclusion(), Inclusion::Included);
}

#[test]
fn test_gagged_failure_then_visible_failure() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [static_if(Expr::ident("late"))];
    let mut analyzer = TestAnalyzer::new(&conditions, Vec::new());
    let scope = TestScope::new(Some(main));

    world.run(|ctx, diagnostics| {
        assert!(!conditions[0].include(&ctx.gagged(), &mut analyzer, Some(&scope), None));
        assert_eq!(conditions[0].inclusion(), Inclusion::Unresolved);
        assert!(messages(diagnostics).is_empty());

        assert!(!conditions[0].include(ctx, &mut analyzer, Some(&scope), None));
        assert_eq!(conditions[0].inclusion(), Inclusion::Excluded);

        assert!(!conditions[0].include(ctx, &mut analyzer, Some(&scope), None));
        assert_eq!(messages(diagnostics), ["undefined identifier late"]);
        assert_eq!(diagnostics.gagged_count(), 1);
        assert_eq!(diagnostics.error_count(), 1);
    });

    assert_eq!(analyzer.semantic_calls, 2);
}

#[test]
fn test_visible_failure_is_permanent() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [static_if(Expr::ident("late"))];
    let mut analyzer = TestAnalyzer::new(&conditions, Vec::new());
    let scope = TestScope::new(Some(main));

    world.run(|ctx, diagnostics| {
        assert!(!conditions[0].include(ctx, &mut analyzer, Some(&scope), None));

        analyzer.decls.push(Decl::new("late", Expr::Bool(true), None));

        assert!(!conditions[0].include(ctx, &mut analyzer, Some(&scope), None));
        assert!(!conditions[0].include(&ctx.gagged(), &mut analyzer, Some(&scope), None));
        assert_eq!(messages(diagnostics), ["undefined identifier late"]);
    });

    assert_eq!(analyzer.semantic_calls, 1);
}

#[test]
fn test_self_reference_is_bounded() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [static_if(Expr::eq(Expr::ident("x"), Expr::Bool(true)))];
    let mut analyzer = TestAnalyzer::new(&conditions, vec![Decl::new("x", Expr::Bool(true), Some(0))]);
    let scope = TestScope::new(Some(main));
    let limits = NestingLimits {
        reentry: 5,
        depth: 1000,
    };

    world.run(|ctx, diagnostics| {
        let ctx = ctx.with_limits(limits);
        assert!(!conditions[0].include(&ctx, &mut analyzer, Some(&scope), None));

        let messages = messages(diagnostics);
        assert_eq!(messages[0], "error evaluating static if expression");
        assert_eq!(
            messages
                .iter()
                .map(String::as_str)
                .counts()
                .get("error evaluating static if expression"),
            Some(&1)
        );
    });

    assert_eq!(conditions[0].inclusion(), Inclusion::Excluded);
    assert_eq!(analyzer.semantic_calls, 6);
    assert_eq!(scope.ctfe_balance.get(), 0);

    let Condition::StaticIf(condition) = &conditions[0] else {
        unreachable!()
    };
    assert_eq!(condition.nesting(), 0);
}

#[test]
fn test_recursion_poisons_even_when_gagged() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let conditions = [static_if(Expr::ident("x"))];
    let mut analyzer = TestAnalyzer::new(&conditions, vec![Decl::new("x", Expr::Bool(true), Some(0))]);
    let scope = TestScope::new(Some(main));
    let limits = NestingLimits {
        reentry: 2,
        depth: 1000,
    };

    world.run(|ctx, diagnostics| {
        let ctx = ctx.with_limits(limits).gagged();
        assert!(!conditions[0].include(&ctx, &mut analyzer, Some(&scope), None));
        assert_eq!(diagnostics.collected().count(), 0);
    });

    assert_eq!(conditions[0].inclusion(), Inclusion::Excluded);
}

/// `c0` needs `s1`, which needs `c1` to be included, which needs `s2`, and so on
#[cfg(test)]
fn chain(length: usize) -> (Vec<Condition<Expr>>, Vec<Decl>) {
    let name = |i: usize| format!("s{}", i);

    let conditions = (0..length)
        .map(|i| {
            static_if(if i + 1 < length {
                Expr::Ident(name(i + 1))
            } else {
                Expr::Bool(true)
            })
        })
        .collect_vec();

    let decls = (1..length)
        .map(|i| Decl::new(&name(i), Expr::Bool(true), Some(i)))
        .collect_vec();

    (conditions, decls)
}

#[test]
fn test_long_chain_within_depth() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let (conditions, decls) = chain(10);
    let mut analyzer = TestAnalyzer::new(&conditions, decls);
    let scope = TestScope::new(Some(main));

    world.run(|ctx, diagnostics| {
        let ctx = ctx.with_limits(NestingLimits {
            reentry: 5,
            depth: 20,
        });
        assert!(conditions[0].include(&ctx, &mut analyzer, Some(&scope), None));
        assert!(messages(diagnostics).is_empty());
    });

    assert!(conditions.iter().all(|condition| condition.inclusion().is_included()));
}

#[test]
fn test_long_chain_beyond_depth() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let (conditions, decls) = chain(30);
    let mut analyzer = TestAnalyzer::new(&conditions, decls);
    let scope = TestScope::new(Some(main));

    world.run(|ctx, diagnostics| {
        let ctx = ctx.with_limits(NestingLimits {
            reentry: 5,
            depth: 20,
        });
        assert!(!conditions[0].include(&ctx, &mut analyzer, Some(&scope), None));
        assert_eq!(
            messages(diagnostics).first().map(String::as_str),
            Some("unresolvable circular static if expression")
        );
    });

    assert!(conditions[..=21].iter().all(|condition| condition.inclusion().is_excluded()));
    assert!(conditions[22..].iter().all(|condition| condition.inclusion().is_unresolved()));
    assert_eq!(scope.ctfe_balance.get(), 0);
}
