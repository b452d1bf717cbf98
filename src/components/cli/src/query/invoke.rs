use super::{Directive, QueryCommand};
use crate::{Invoke, scope::ModuleScope, supported_targets::warn_if_unsupported_target};
use compiler::{Compiler, DepsOutput};
use conditions::{DvCondition, DvQuery};
use diagnostics::{DiagnosticFlags, Diagnostics, ErrorDiagnostic};
use modules::{Module, Modules};
use resolve_conditions::{DependencyReporter, GlobalConditions, ResolveCtx, include_dv};
use source_files::{Location, Source, SourceFiles};
use std::io::Write;

impl Invoke for QueryCommand {
    fn invoke(self) -> Result<(), ()> {
        let source_files = SourceFiles::new();
        let diagnostics = Diagnostics::new(&source_files, DiagnosticFlags::default());
        self.run(&diagnostics, &mut std::io::stdout().lock())
    }
}

impl QueryCommand {
    /// Evaluates the directives in order, writing each answer to `w`,
    /// followed by the dependency log when it is printed.
    pub fn run(self, diagnostics: &Diagnostics, w: &mut impl Write) -> Result<(), ()> {
        let QueryCommand {
            directives,
            options,
        } = self;

        let source_files = diagnostics.source_files();
        let compiler = Compiler::new(options, diagnostics);

        warn_if_unsupported_target(compiler.target(), diagnostics);

        let globals = GlobalConditions::for_build(&compiler.options).map_err(|errors| {
            for error in errors {
                diagnostics.push(ErrorDiagnostic::plain(error));
            }
        })?;

        let modules = Modules::new();
        let command_line = source_files.add("<command-line>".into());
        let module = modules.add(Module::new("__query", command_line));
        let scope = ModuleScope::new(module);

        let deps = DependencyReporter::new(&compiler.options.deps);
        let ctx = ResolveCtx::new(&globals, &modules, diagnostics, &deps);

        for (index, directive) in directives.into_iter().enumerate() {
            let source = Source::new(command_line, Location::new(index as u32 + 1, 1));

            match directive {
                Directive::Query(namespace, query) => {
                    let condition = DvCondition::new(module, query, source);
                    let included = include_dv(&ctx, namespace, &condition, Some(&scope));

                    writeln!(
                        w,
                        "{} ({}): {}",
                        namespace,
                        condition.query,
                        if included { "included" } else { "excluded" }
                    )
                    .map_err(|error| eprintln!("error: {}", error))?;
                }
                Directive::Declare(namespace, DvQuery::Identifier(identifier)) => {
                    let registry = ctx.registry();

                    if let Err(error) = registry.declare_identifier(module, namespace, &identifier) {
                        diagnostics.push(ErrorDiagnostic::new(error, source));
                    }
                }
                Directive::Declare(namespace, DvQuery::Level(level)) => {
                    ctx.registry().declare_level(module, namespace, level);
                }
            }
        }

        match &compiler.options.deps {
            DepsOutput::Print => deps
                .write_to(w)
                .map_err(|error| eprintln!("error: {}", error))?,
            // A dependency file only ever receives import dependencies,
            // so there is nothing to write to it from here
            DepsOutput::Disabled | DepsOutput::File(_) => (),
        }

        if compiler.has_errors() {
            Err(())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
fn run_query(args: &str) -> (Result<(), ()>, String, Vec<String>) {
    let command = QueryCommand::parse(args.split_whitespace().map(String::from)).unwrap();
    let source_files = SourceFiles::new();
    let diagnostics = Diagnostics::new(&source_files, DiagnosticFlags::collecting());

    let mut output = Vec::new();
    let result = command.run(&diagnostics, &mut output);

    let messages = diagnostics
        .collected()
        .map(|diagnostic| diagnostic.message().to_string())
        .collect();

    (result, String::from_utf8(output).unwrap(), messages)
}

#[test]
fn test_directives_apply_in_order() {
    let (result, output, messages) = run_query(
        "--linux -version=Feature query version Feature version=Local version Local \
         debug=2 debug 2 debug 3 version linux",
    );

    assert_eq!(result, Ok(()));
    assert!(messages.is_empty());
    assert_eq!(
        output,
        indoc::indoc! {"
            version (Feature): included
            version (Local): included
            debug (2): included
            debug (3): excluded
            version (linux): included
        "}
    );
}

#[test]
fn test_declaration_after_use() {
    let (result, output, messages) = run_query("--linux query version Late version=Late version Late");

    assert_eq!(result, Err(()));
    assert_eq!(output, "version (Late): excluded\nversion (Late): excluded\n");
    assert_eq!(messages, ["version identifier 'Late' defined after use"]);
}

#[test]
fn test_reserved_command_line_versions() {
    let (result, output, messages) =
        run_query("--linux -version=Windows -version=Fine -version=D_Custom query version Fine");

    assert_eq!(result, Err(()));
    assert!(output.is_empty());
    assert_eq!(
        messages,
        [
            "version identifier 'Windows' is reserved and cannot be set",
            "version identifier 'D_Custom' is reserved and cannot be set",
        ]
    );
}

#[test]
fn test_printed_dependencies() {
    let (result, output, _) = run_query("--linux -deps query version Foo version linux debug 1");

    assert_eq!(result, Ok(()));
    assert_eq!(
        output,
        indoc::indoc! {"
            version (Foo): excluded
            version (linux): included
            debug (1): excluded
            depsVersion __query (<command-line>) : Foo
            depsDebug __query (<command-line>) : 1
        "}
    );
}

#[test]
fn test_dependency_file_is_left_alone() {
    let path = std::env::temp_dir().join("condc-query-dependency-file.deps");
    let (result, output, _) = run_query(&format!(
        "--linux -deps={} query version Foo",
        path.display()
    ));

    assert_eq!(result, Ok(()));
    assert_eq!(output, "version (Foo): excluded\n");
    assert!(!path.exists());
}
