use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, Command, PhaseArgs};

#[test]
fn parses_translate() {
    let args = CliArgs::try_parse_from(["as2ts", "translate", "src", "out"])
        .expect("translate args should parse");

    assert_eq!(
        args.command,
        Command::Translate(PhaseArgs {
            input: PathBuf::from("src"),
            output: PathBuf::from("out"),
        })
    );
    assert!(args.config.is_none());
    assert!(!args.parallel);
    assert!(!args.no_color);
}

#[test]
fn global_flags_follow_the_subcommand() {
    let args = CliArgs::try_parse_from([
        "as2ts",
        "make",
        "src",
        "out",
        "--config",
        "conf/as2ts.json",
        "--parallel",
        "--no-color",
    ])
    .expect("flagged args should parse");

    assert!(matches!(args.command, Command::Make(_)));
    assert_eq!(
        args.config.as_deref(),
        Some(std::path::Path::new("conf/as2ts.json"))
    );
    assert!(args.parallel);
    assert!(args.no_color);
}

#[test]
fn parses_normalize() {
    let args = CliArgs::try_parse_from(["as2ts", "normalize", "Foo.as"])
        .expect("normalize args should parse");
    assert_eq!(
        args.command,
        Command::Normalize {
            file: PathBuf::from("Foo.as")
        }
    );
}

#[test]
fn phase_commands_require_both_paths() {
    assert!(CliArgs::try_parse_from(["as2ts", "analyse", "src"]).is_err());
    assert!(CliArgs::try_parse_from(["as2ts"]).is_err());
}
