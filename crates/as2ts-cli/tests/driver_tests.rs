//! Analyse/Make runs over temporary source trees with an in-process parser.

use anyhow::{Result, bail};
use rustc_hash::FxHashMap;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

use as2ts_cli::checkpoint::Checkpoint;
use as2ts_cli::config::ResolvedConfig;
use as2ts_cli::driver::Driver;
use as2ts_cli::fs::{read_file, write_file};
use as2ts_cli::parser::SyntaxParser;
use as2ts_common::DiagnosticKind;

// =============================================================================
// Fixtures
// =============================================================================

/// Hands back a canned tree per relative path; anything else is a syntax error.
struct CannedParser {
    trees: FxHashMap<String, String>,
}

impl CannedParser {
    fn new(trees: &[(&str, Value)]) -> Self {
        CannedParser {
            trees: trees
                .iter()
                .map(|(path, tree)| (path.to_string(), tree.to_string()))
                .collect(),
        }
    }
}

impl SyntaxParser for CannedParser {
    fn parse(&self, _source: &str, relative_path: &str) -> Result<String> {
        match self.trees.get(relative_path) {
            Some(json) => Ok(json.clone()),
            None => bail!("{relative_path}(1:0): unexpected token"),
        }
    }
}

fn id(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

fn method(name: &str, body: Vec<Value>) -> Value {
    json!({
        "type": "MethodDefinition",
        "kind": "method",
        "key": id(name),
        "accessibility": "public",
        "static": false,
        "value": {
            "type": "FunctionExpression",
            "params": [],
            "body": { "type": "BlockStatement", "body": body }
        }
    })
}

fn exported_class(name: &str, super_class: Option<&str>, members: Vec<Value>) -> Value {
    json!({
        "type": "Program",
        "sourceType": "module",
        "body": [{
            "type": "ExportNamedDeclaration",
            "specifiers": [],
            "declaration": {
                "type": "ClassDeclaration",
                "id": id(name),
                "superClass": super_class.map(id),
                "body": { "type": "ClassBody", "body": members }
            }
        }]
    })
}

fn base_tree() -> Value {
    exported_class(
        "Base",
        None,
        vec![
            json!({
                "type": "ClassProperty",
                "key": id("hp"),
                "accessibility": "private",
                "static": false,
                "typeAnnotation": {
                    "type": "TSTypeAnnotation",
                    "typeAnnotation": { "type": "TSTypeReference", "typeName": id("int") }
                }
            }),
            method("heal", vec![]),
        ],
    )
}

fn hero_tree() -> Value {
    let heal = json!({
        "type": "ExpressionStatement",
        "expression": { "type": "CallExpression", "callee": id("heal"), "arguments": [] }
    });
    exported_class("Hero", Some("Base"), vec![method("revive", vec![heal])])
}

fn awaiting_tree() -> Value {
    json!({
        "type": "Program",
        "sourceType": "module",
        "body": [
            {
                "type": "ExpressionStatement",
                "expression": {
                    "type": "AwaitExpression",
                    "argument": id("job"),
                    "loc": { "start": { "line": 2, "column": 4 }, "end": { "line": 2, "column": 13 } }
                }
            },
            {
                "type": "ExpressionStatement",
                "expression": { "type": "CallExpression", "callee": id("done"), "arguments": [] }
            }
        ]
    })
}

const BASE_TS: &str = "export class Base {\n    private hp: number;\n    public heal() {}\n}";
const HERO_TS: &str = "import {Base} from \"game/Base\";\n\
                       export class Hero extends Base {\n    \
                           public revive() {\n        \
                               this.heal();\n    \
                           }\n\
                       }";

struct Workspace {
    _dir: tempfile::TempDir,
    input: PathBuf,
    output: PathBuf,
    tmp: PathBuf,
}

impl Workspace {
    fn new(files: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("src");
        for file in files {
            write_file(&input.join(file), "package game {\n}\n").expect("write source");
        }
        Workspace {
            input,
            output: dir.path().join("out"),
            tmp: dir.path().join("tmp"),
            _dir: dir,
        }
    }

    fn config(&self) -> ResolvedConfig {
        ResolvedConfig {
            tmp_root: self.tmp.clone(),
            ..Default::default()
        }
    }

    fn continuing_config(&self) -> ResolvedConfig {
        let mut config = self.config();
        config.emitter.terminate_on_error = false;
        config
    }

    fn output_text(&self, relative: &str) -> String {
        read_file(&self.output.join(relative)).expect("output written")
    }
}

fn game_parser() -> Box<CannedParser> {
    Box::new(CannedParser::new(&[
        ("game/Base.as", base_tree()),
        ("game/Hero.as", hero_tree()),
    ]))
}

fn exists(path: &Path) -> bool {
    path.is_file()
}

// =============================================================================
// Translate
// =============================================================================

#[test]
fn test_translate_writes_outputs_and_intermediates() {
    let ws = Workspace::new(&["game/Base.as", "game/Hero.as"]);
    let driver = Driver::new(ws.config()).with_parser(game_parser());

    let report = driver.translate(&ws.input, &ws.output).expect("translation succeeds");

    assert_eq!(report.analysed, 2);
    assert_eq!(
        report.emitted,
        vec![ws.output.join("game/Base.ts"), ws.output.join("game/Hero.ts")]
    );
    assert!(report.diagnostics.is_empty());
    assert!(!report.has_errors());

    assert_eq!(ws.output_text("game/Base.ts"), BASE_TS);
    assert_eq!(ws.output_text("game/Hero.ts"), HERO_TS);

    assert!(exists(&ws.tmp.join("ts/game/Hero.ts")));
    assert!(exists(&ws.tmp.join("ast/game/Hero.json")));
    assert!(exists(&ws.tmp.join("analysor.txt")));
    let index = read_file(&ws.tmp.join("analysor.json")).expect("index written");
    assert!(index.contains("\"heal\""));

    let checkpoint = Checkpoint::load(&ws.tmp.join("last.txt"))
        .expect("checkpoint readable")
        .expect("checkpoint written");
    assert_eq!(checkpoint.file, "game/Hero.as");
    assert_eq!(checkpoint.input, ws.input.display().to_string());
    assert_eq!(checkpoint.output, ws.output.display().to_string());
}

#[test]
fn test_parallel_make_matches_sequential_output() {
    let ws = Workspace::new(&["game/Base.as", "game/Hero.as"]);
    let driver = Driver::new(ws.config())
        .with_parser(game_parser())
        .with_parallel(true);

    let report = driver.translate(&ws.input, &ws.output).expect("translation succeeds");

    assert_eq!(
        report.emitted,
        vec![ws.output.join("game/Base.ts"), ws.output.join("game/Hero.ts")]
    );
    assert_eq!(ws.output_text("game/Hero.ts"), HERO_TS);
}

#[test]
fn test_single_file_input_writes_the_named_output() {
    let ws = Workspace::new(&["game/Base.as"]);
    let parser = CannedParser::new(&[("Base.as", base_tree())]);
    let driver = Driver::new(ws.config()).with_parser(Box::new(parser));
    let target = ws.output.join("Base.ts");

    driver
        .translate(&ws.input.join("game/Base.as"), &target)
        .expect("translation succeeds");

    assert_eq!(read_file(&target).expect("output written"), BASE_TS);
}

#[test]
fn test_skip_rules_apply_to_the_batch() {
    let ws = Workspace::new(&["game/Base.as", "game/Hero.as"]);
    let mut config = ws.config();
    config.skip.files.push(regex::Regex::new("Hero").expect("valid regex"));
    let driver = Driver::new(config).with_parser(game_parser());

    let report = driver.translate(&ws.input, &ws.output).expect("translation succeeds");

    assert_eq!(report.analysed, 1);
    assert!(!exists(&ws.output.join("game/Hero.ts")));
}

// =============================================================================
// Analyse and Make separately
// =============================================================================

#[test]
fn test_make_reuses_persisted_trees_and_index() {
    let ws = Workspace::new(&["game/Base.as", "game/Hero.as"]);
    let (index, report) = Driver::new(ws.config())
        .with_parser(game_parser())
        .analyse(&ws.input, &ws.output)
        .expect("analyse succeeds");
    assert_eq!(index.len(), 2);
    assert_eq!(report.analysed, 2);
    assert!(!ws.output.exists());

    let report = Driver::new(ws.config())
        .make(&ws.input, &ws.output)
        .expect("make succeeds without a parser");

    assert_eq!(report.emitted.len(), 2);
    assert_eq!(ws.output_text("game/Hero.ts"), HERO_TS);
}

#[test]
fn test_make_without_index_leaves_inherited_members_bare() {
    let ws = Workspace::new(&["game/Base.as", "game/Hero.as"]);
    Driver::new(ws.config())
        .with_parser(game_parser())
        .analyse(&ws.input, &ws.output)
        .expect("analyse succeeds");
    std::fs::remove_file(ws.tmp.join("analysor.json")).expect("remove index");

    Driver::new(ws.config())
        .make(&ws.input, &ws.output)
        .expect("make succeeds");

    let hero = ws.output_text("game/Hero.ts");
    assert!(hero.contains("        heal();"), "{hero}");
    assert!(!hero.contains("this.heal"), "{hero}");
}

#[test]
fn test_make_before_analyse_fails() {
    let ws = Workspace::new(&["game/Base.as"]);
    let err = Driver::new(ws.config())
        .make(&ws.input, &ws.output)
        .expect_err("nothing persisted");
    assert!(format!("{err:#}").contains("run analyse first"), "{err:#}");
}

#[test]
fn test_analyse_without_parser_fails() {
    let ws = Workspace::new(&["game/Base.as"]);
    let err = Driver::new(ws.config())
        .translate(&ws.input, &ws.output)
        .expect_err("no parser");
    assert!(format!("{err:#}").contains("parserCommand"), "{err:#}");
}

// =============================================================================
// Error policy
// =============================================================================

#[test]
fn test_parse_failure_terminates_the_batch() {
    let ws = Workspace::new(&["game/Base.as", "game/Broken.as", "game/Hero.as"]);
    let driver = Driver::new(ws.config()).with_parser(game_parser());

    let err = driver
        .translate(&ws.input, &ws.output)
        .expect_err("broken file aborts");

    let message = format!("{err:#}");
    assert!(message.contains("analyse failed for game/Broken.as"), "{message}");
    assert!(message.contains("unexpected token"), "{message}");
    assert!(!ws.output.exists());
}

#[test]
fn test_parse_failure_is_recorded_when_continuing() {
    let ws = Workspace::new(&["game/Base.as", "game/Broken.as", "game/Hero.as"]);
    let driver = Driver::new(ws.continuing_config()).with_parser(game_parser());

    let report = driver
        .translate(&ws.input, &ws.output)
        .expect("batch continues");

    assert_eq!(report.analysed, 2);
    assert!(report.has_errors());
    // Make fails too: no tree was persisted for the broken file.
    let failed: Vec<&str> = report.failures.iter().map(|(file, _)| file.as_str()).collect();
    assert_eq!(failed, vec!["game/Broken.as", "game/Broken.as"]);
    assert_eq!(ws.output_text("game/Hero.ts"), HERO_TS);
}

#[test]
fn test_emit_error_terminates_the_batch() {
    let ws = Workspace::new(&["Job.as"]);
    let parser = CannedParser::new(&[("Job.as", awaiting_tree())]);
    let driver = Driver::new(ws.config()).with_parser(Box::new(parser));

    let err = driver
        .translate(&ws.input, &ws.output)
        .expect_err("unsupported construct aborts");

    let message = format!("{err:#}");
    assert!(message.contains("make failed for Job.as"), "{message}");
    assert!(message.contains("Job.as(2:4) - error AS9001"), "{message}");
}

#[test]
fn test_emit_error_is_reported_when_continuing() {
    let ws = Workspace::new(&["Job.as"]);
    let parser = CannedParser::new(&[("Job.as", awaiting_tree())]);
    let driver = Driver::new(ws.continuing_config()).with_parser(Box::new(parser));

    let report = driver
        .translate(&ws.input, &ws.output)
        .expect("batch continues");

    assert!(report.failures.is_empty());
    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.kind(), Some(DiagnosticKind::UnsupportedConstruct));
    assert_eq!(diagnostic.file, "Job.as");
    assert_eq!((diagnostic.line, diagnostic.column), (2, 4));
    assert!(report.has_errors());
    assert_eq!(ws.output_text("Job.ts"), "done();");
}

// =============================================================================
// Resuming
// =============================================================================

#[test]
fn test_continue_last_resumes_at_the_checkpoint() {
    let ws = Workspace::new(&["game/Base.as", "game/Hero.as"]);
    Checkpoint::new(
        ws.input.display().to_string(),
        ws.output.display().to_string(),
        "game/Hero.as",
    )
    .save(&ws.tmp.join("last.txt"))
    .expect("checkpoint saved");

    let mut config = ws.config();
    config.continue_last = true;
    let report = Driver::new(config)
        .with_parser(game_parser())
        .translate(&ws.input, &ws.output)
        .expect("translation succeeds");

    assert_eq!(report.analysed, 1);
    assert_eq!(report.emitted, vec![ws.output.join("game/Hero.ts")]);
    assert!(!exists(&ws.tmp.join("ast/game/Base.json")));
    assert!(!exists(&ws.output.join("game/Base.ts")));
}

#[test]
fn test_checkpoint_for_another_output_is_ignored() {
    let ws = Workspace::new(&["game/Base.as", "game/Hero.as"]);
    Checkpoint::new(ws.input.display().to_string(), "elsewhere", "game/Hero.as")
        .save(&ws.tmp.join("last.txt"))
        .expect("checkpoint saved");

    let mut config = ws.config();
    config.continue_last = true;
    let report = Driver::new(config)
        .with_parser(game_parser())
        .translate(&ws.input, &ws.output)
        .expect("translation succeeds");

    assert_eq!(report.analysed, 2);
    assert_eq!(report.emitted.len(), 2);
}
