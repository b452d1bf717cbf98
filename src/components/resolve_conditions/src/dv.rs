use crate::{DependencyReporter, ResolveCtx, Scope};
use conditions::{DvCondition, DvQuery};
use modules::Namespace;

/// Resolves a `version(...)` or `debug(...)` condition on first use.
/// Absence of a definition is a normal exclusion, never an error.
pub fn include_dv<S: Scope>(
    ctx: &ResolveCtx,
    namespace: Namespace,
    condition: &DvCondition,
    scope: Option<&S>,
) -> bool {
    condition.memo.resolve_with(|| {
        let registry = ctx.registry();

        let (included, defined_in_module) = match &condition.query {
            DvQuery::Identifier(identifier) => {
                let definition = registry.lookup(namespace, identifier, condition.module);
                (!definition.is_undefined(), definition.is_in_module())
            }
            DvQuery::Level(level) => (
                registry.is_defined_by_level(namespace, *level, condition.module),
                false,
            ),
        };

        // Answers coming from the module itself aren't external dependencies
        if !defined_in_module && DependencyReporter::is_reportable(namespace, &condition.query) {
            ctx.deps.report(ctx, scope, namespace, condition);
        }

        Some(included)
    })
}

#[cfg(test)]
use crate::testing::{TestScope, World};
#[cfg(test)]
use conditions::Inclusion;
#[cfg(test)]
use modules::ModuleRef;

#[cfg(test)]
fn version(world: &World, module: ModuleRef, identifier: &str) -> DvCondition {
    DvCondition::new(
        module,
        DvQuery::Identifier(identifier.into()),
        world.source(module, 1),
    )
}

#[cfg(test)]
fn debug_level(world: &World, module: ModuleRef, level: u32) -> DvCondition {
    DvCondition::new(module, DvQuery::Level(level), world.source(module, 1))
}

#[test]
fn test_undefined_is_excluded_and_reported_once() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let condition = version(&world, main, "Foo");

    world.run(|ctx, diagnostics| {
        assert!(!include_dv::<TestScope>(ctx, Namespace::Version, &condition, None));
        assert!(!include_dv::<TestScope>(ctx, Namespace::Version, &condition, None));
        assert_eq!(diagnostics.collected().count(), 0);
    });

    assert_eq!(condition.memo.get(), Inclusion::Excluded);
    assert_eq!(world.deps(), ["depsVersion M (/a/b.src) : Foo"]);
}

#[test]
fn test_module_definition_wins_and_is_not_reported() {
    let mut world = World::new();
    world
        .globals
        .add_global_identifier(Namespace::Version, "Foo")
        .unwrap();
    let main = world.module("M", "/a/b.src");
    world.modules.get(main).conditions(Namespace::Version).define("Foo");

    let local = version(&world, main, "Foo");
    world.run(|ctx, _| {
        assert!(include_dv::<TestScope>(ctx, Namespace::Version, &local, None));
    });
    assert!(world.deps().is_empty());

    let other = world.module("N", "/a/c.src");
    let from_other = version(&world, other, "Foo");
    world.run(|ctx, _| {
        assert!(include_dv::<TestScope>(ctx, Namespace::Version, &from_other, None));
    });
    assert_eq!(world.deps(), ["depsVersion N (/a/c.src) : Foo"]);
}

#[test]
fn test_levels() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    world.modules.get(main).conditions(Namespace::Debug).raise_level(3);

    let two = debug_level(&world, main, 2);
    let four = debug_level(&world, main, 4);

    world.run(|ctx, _| {
        assert!(include_dv::<TestScope>(ctx, Namespace::Debug, &two, None));
        assert!(!include_dv::<TestScope>(ctx, Namespace::Debug, &four, None));
    });

    assert_eq!(
        world.deps(),
        ["depsDebug M (/a/b.src) : 2", "depsDebug M (/a/b.src) : 4"]
    );
}

#[test]
fn test_predefined_versions_are_not_dependencies() {
    let mut world = World::new();
    world.globals.add_predefined_identifier("linux");
    let main = world.module("M", "/a/b.src");

    let linux = version(&world, main, "linux");
    let windows = version(&world, main, "Windows");
    let unittest = version(&world, main, "unittest");

    world.run(|ctx, _| {
        assert!(include_dv::<TestScope>(ctx, Namespace::Version, &linux, None));
        assert!(!include_dv::<TestScope>(ctx, Namespace::Version, &windows, None));
        assert!(!include_dv::<TestScope>(ctx, Namespace::Version, &unittest, None));
    });

    assert!(world.deps().is_empty());
}

#[test]
fn test_referencing_module_comes_from_scope() {
    let world = World::new();
    let library = world.module("lib.util", "/lib/util (copy).src");
    let user = world.module("app", "/app.src");
    let condition = version(&world, library, "Fast");
    let unattached = version(&world, library, "Slow");

    let mut scope = TestScope::new(Some(library));
    scope.instantiating = Some(user);

    world.run(|ctx, _| {
        include_dv(ctx, Namespace::Version, &condition, Some(&scope));
        include_dv(ctx, Namespace::Version, &unattached, Some(&TestScope::new(None)));
    });

    assert_eq!(world.deps(), ["depsVersion app (/app.src) : Fast"]);

    let scope = TestScope::new(Some(library));
    let again = version(&world, library, "Small");
    world.run(|ctx, _| {
        include_dv(ctx, Namespace::Version, &again, Some(&scope));
    });

    assert_eq!(
        world.deps().last().map(String::as_str),
        Some("depsVersion lib.util (/lib/util \\(copy\\).src) : Small")
    );
}

#[test]
fn test_undefined_lookup_blocks_later_declaration() {
    let world = World::new();
    let main = world.module("M", "/a/b.src");
    let condition = version(&world, main, "Late");

    world.run(|ctx, _| {
        include_dv::<TestScope>(ctx, Namespace::Version, &condition, None);

        assert!(
            ctx.registry()
                .declare_identifier(main, Namespace::Version, "Late")
                .is_err()
        );
    });
}
