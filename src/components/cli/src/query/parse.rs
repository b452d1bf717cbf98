use super::{Directive, QueryCommand};
use crate::options::{is_identifier, parse_build_option};
use compiler::BuildOptions;
use conditions::DvQuery;
use modules::Namespace;

impl QueryCommand {
    pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ()> {
        let mut options = BuildOptions::default();
        let mut directives = Vec::new();
        let mut saw_query = false;

        while let Some(arg) = args.next() {
            if parse_build_option(&arg, &mut options)? {
                continue;
            }

            if !saw_query {
                if arg != "query" {
                    eprintln!("error: Unknown command '{}'", arg);
                    return Err(());
                }

                saw_query = true;
                continue;
            }

            if let Some((keyword, value)) = arg.split_once('=') {
                let namespace = parse_namespace(keyword)?;
                directives.push(Directive::Declare(namespace, parse_query(value)?));
            } else {
                let namespace = parse_namespace(&arg)?;

                let Some(value) = args.next() else {
                    eprintln!("error: Expected identifier or level after '{}'", arg);
                    return Err(());
                };

                directives.push(Directive::Query(namespace, parse_query(&value)?));
            }
        }

        if directives.is_empty() {
            eprintln!("error: No directives to evaluate");
            return Err(());
        }

        Ok(Self {
            directives,
            options,
        })
    }
}

fn parse_namespace(keyword: &str) -> Result<Namespace, ()> {
    match keyword {
        "version" => Ok(Namespace::Version),
        "debug" => Ok(Namespace::Debug),
        _ => {
            eprintln!("error: Expected 'version' or 'debug', got '{}'", keyword);
            Err(())
        }
    }
}

fn parse_query(value: &str) -> Result<DvQuery, ()> {
    if let Ok(level) = value.parse::<u32>() {
        Ok(DvQuery::Level(level))
    } else if is_identifier(value) {
        Ok(DvQuery::Identifier(value.into()))
    } else {
        eprintln!("error: Expected identifier or level, got '{}'", value);
        Err(())
    }
}

#[cfg(test)]
fn parse(args: &str) -> Result<QueryCommand, ()> {
    QueryCommand::parse(args.split_whitespace().map(String::from))
}

#[test]
fn test_directives_in_order() {
    let command = parse("-version=Foo query version=Bar version Bar debug 2").unwrap();

    assert_eq!(
        command.directives,
        [
            Directive::Declare(Namespace::Version, DvQuery::Identifier("Bar".into())),
            Directive::Query(Namespace::Version, DvQuery::Identifier("Bar".into())),
            Directive::Query(Namespace::Debug, DvQuery::Level(2)),
        ]
    );
    assert_eq!(command.options.versions.identifiers, ["Foo"]);
}

#[test]
fn test_options_after_command() {
    let command = parse("query debug Trace -debug=Trace").unwrap();
    assert_eq!(command.options.debugs.identifiers, ["Trace"]);
}

#[test]
fn test_malformed() {
    assert!(parse("query").is_err());
    assert!(parse("query version").is_err());
    assert!(parse("query static Foo").is_err());
    assert!(parse("query version 1.5").is_err());
    assert!(parse("evaluate version Foo").is_err());
}
