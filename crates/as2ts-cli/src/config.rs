//! `as2ts.json` loading and resolution.

use anyhow::{Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use as2ts_emitter::{EmitterOptions, ImportRule, default_type_mapper};

use crate::fs::SkipRules;

/// Default location of intermediate files.
pub const DEFAULT_TMP_ROOT: &str = "tmp/";

fn default_true() -> bool {
    true
}

fn default_tmp_root() -> PathBuf {
    PathBuf::from(DEFAULT_TMP_ROOT)
}

/// The configuration file as written. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct As2TsConfig {
    #[serde(default)]
    pub skip_rule: SkipRuleConfig,
    #[serde(default)]
    pub id_replacement: FxHashMap<String, String>,
    #[serde(default)]
    pub literal_replacement: FxHashMap<String, String>,
    /// Replaces the builtin type map entirely when present.
    #[serde(default)]
    pub type_mapper: Option<FxHashMap<String, String>>,
    #[serde(default)]
    pub import_rule: ImportRuleConfig,
    #[serde(default)]
    pub error_detail: bool,
    #[serde(default = "default_true")]
    pub terminate_when_error: bool,
    #[serde(default)]
    pub continue_last: bool,
    #[serde(default = "default_tmp_root")]
    pub tmp_root: PathBuf,
    /// argv of the external ESTree parser.
    #[serde(default)]
    pub parser_command: Vec<String>,
}

impl Default for As2TsConfig {
    fn default() -> Self {
        As2TsConfig {
            skip_rule: SkipRuleConfig::default(),
            id_replacement: FxHashMap::default(),
            literal_replacement: FxHashMap::default(),
            type_mapper: None,
            import_rule: ImportRuleConfig::default(),
            error_detail: false,
            terminate_when_error: true,
            continue_last: false,
            tmp_root: default_tmp_root(),
            parser_command: Vec::new(),
        }
    }
}

/// Regexes over paths relative to the input root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkipRuleConfig {
    #[serde(default)]
    pub dirs: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRuleConfig {
    #[serde(default)]
    pub from_module: Vec<ModuleRuleConfig>,
}

/// `{ "module": "Laya", "regular": "^laya" }`
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleRuleConfig {
    pub module: String,
    pub regular: String,
}

/// Configuration with every regex compiled and every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub emitter: EmitterOptions,
    pub skip: SkipRules,
    pub continue_last: bool,
    pub tmp_root: PathBuf,
    pub parser_command: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            emitter: EmitterOptions::default(),
            skip: SkipRules::default(),
            continue_last: false,
            tmp_root: default_tmp_root(),
            parser_command: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    pub fn terminate_on_error(&self) -> bool {
        self.emitter.terminate_on_error
    }
}

fn compile_all(patterns: &[String], what: &str) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern)
                .with_context(|| format!("invalid {what} pattern in configuration: {pattern}"))
        })
        .collect()
}

impl As2TsConfig {
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let skip = SkipRules {
            dirs: compile_all(&self.skip_rule.dirs, "skipRule.dirs")?,
            files: compile_all(&self.skip_rule.files, "skipRule.files")?,
        };
        let import_rules = self
            .import_rule
            .from_module
            .iter()
            .map(|rule| {
                let pattern = Regex::new(&rule.regular).with_context(|| {
                    format!(
                        "invalid importRule pattern for module {}: {}",
                        rule.module, rule.regular
                    )
                })?;
                Ok(ImportRule::new(rule.module.clone(), pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        let emitter = EmitterOptions {
            id_replacement: self.id_replacement.clone(),
            literal_replacement: self.literal_replacement.clone(),
            type_mapper: self.type_mapper.clone().unwrap_or_else(default_type_mapper),
            import_rules,
            terminate_on_error: self.terminate_when_error,
            error_detail: self.error_detail,
        };
        Ok(ResolvedConfig {
            emitter,
            skip,
            continue_last: self.continue_last,
            tmp_root: self.tmp_root.clone(),
            parser_command: self.parser_command.clone(),
        })
    }
}

pub fn parse_config(source: &str) -> Result<As2TsConfig> {
    let config = serde_json::from_str(source).context("failed to parse as2ts configuration JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<As2TsConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration: {}", path.display()))?;
    parse_config(&source)
        .with_context(|| format!("failed to parse configuration: {}", path.display()))
}
