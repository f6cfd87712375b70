//! The Analyse and Make phases.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use as2ts_common::Diagnostic;
use as2ts_emitter::{CodeEmitter, MemberIndex};
use as2ts_normalizer::SyntaxNormalizer;
use as2ts_syntax::Node;

use crate::checkpoint::{Checkpoint, ResumeGate};
use crate::config::ResolvedConfig;
use crate::fs::{
    SourceFile, TARGET_EXTENSION, discover_sources, read_file, with_extension, write_file,
};
use crate::parser::SyntaxParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Analyse,
    Make,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Analyse => "analyse",
            Phase::Make => "make",
        })
    }
}

/// Where intermediate files live under the temp root.
#[derive(Debug, Clone)]
pub struct TmpLayout {
    root: PathBuf,
}

impl TmpLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TmpLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalized source text, kept for inspection.
    pub fn ts_path(&self, relative: &str) -> PathBuf {
        self.root.join("ts").join(with_extension(relative, TARGET_EXTENSION))
    }

    /// Persisted syntax tree, the Analyse to Make hand-off.
    pub fn ast_path(&self, relative: &str) -> PathBuf {
        self.root.join("ast").join(with_extension(relative, "json"))
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.root.join("last.txt")
    }

    pub fn index_text_path(&self) -> PathBuf {
        self.root.join("analysor.txt")
    }

    pub fn index_json_path(&self) -> PathBuf {
        self.root.join("analysor.json")
    }
}

/// What a batch run did.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub analysed: usize,
    /// Output files written, in processing order.
    pub emitted: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    /// Files abandoned in continue-on-error mode, with the reason.
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

pub struct Driver {
    config: ResolvedConfig,
    parser: Option<Box<dyn SyntaxParser>>,
    normalizer: SyntaxNormalizer,
    layout: TmpLayout,
    parallel: bool,
}

impl Driver {
    /// A driver without a parser can only run Make.
    pub fn new(config: ResolvedConfig) -> Self {
        let layout = TmpLayout::new(&config.tmp_root);
        Driver {
            config,
            parser: None,
            normalizer: SyntaxNormalizer::new(),
            layout,
            parallel: false,
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn SyntaxParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn layout(&self) -> &TmpLayout {
        &self.layout
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Analyse followed by Make, sharing the freshly built member index.
    pub fn translate(&self, input: &Path, output: &Path) -> Result<BatchReport> {
        let sources = discover_sources(input, &self.config.skip)?;
        let gate = self.resume_gate(input, output)?;
        let mut report = BatchReport::default();
        let index = self.run_analyse(input, output, &sources, gate.restarted(), &mut report)?;
        self.run_make(input, output, &sources, index, gate.restarted(), &mut report)?;
        info!(
            files = sources.len(),
            emitted = report.emitted.len(),
            "translation finished"
        );
        Ok(report)
    }

    pub fn analyse(&self, input: &Path, output: &Path) -> Result<(MemberIndex, BatchReport)> {
        let sources = discover_sources(input, &self.config.skip)?;
        let gate = self.resume_gate(input, output)?;
        let mut report = BatchReport::default();
        let index = self.run_analyse(input, output, &sources, gate, &mut report)?;
        Ok((index, report))
    }

    /// Make on its own, with the member index a previous Analyse persisted.
    pub fn make(&self, input: &Path, output: &Path) -> Result<BatchReport> {
        let sources = discover_sources(input, &self.config.skip)?;
        let gate = self.resume_gate(input, output)?;
        let index = self.load_index()?;
        let mut report = BatchReport::default();
        self.run_make(input, output, &sources, index, gate, &mut report)?;
        Ok(report)
    }

    /// Where Make writes the TypeScript for `source`.
    pub fn output_path(input: &Path, output: &Path, source: &SourceFile) -> PathBuf {
        if input.is_file() {
            if output.is_dir() {
                return output.join(with_extension(&source.relative, TARGET_EXTENSION));
            }
            return output.with_extension(TARGET_EXTENSION);
        }
        output.join(with_extension(&source.relative, TARGET_EXTENSION))
    }

    // =========================================================================
    // Phases
    // =========================================================================

    fn run_analyse(
        &self,
        input: &Path,
        output: &Path,
        sources: &[SourceFile],
        mut gate: ResumeGate,
        report: &mut BatchReport,
    ) -> Result<MemberIndex> {
        let mut index = MemberIndex::new();
        for source in sources {
            if !gate.admits(&source.relative) {
                debug!(file = %source.relative, "before checkpoint, skipped");
                continue;
            }
            self.save_checkpoint(input, output, source)?;
            info!(file = %source.relative, "parsing");
            let tree = self.analyse_file(source);
            if let Some(tree) = self.settle(tree, Phase::Analyse, source, report)? {
                index.collect(&tree, &source.relative);
                report.analysed += 1;
            }
        }

        write_file(&self.layout.index_text_path(), &index.to_string())?;
        let json = index
            .to_json_string_pretty()
            .context("failed to serialize the member index")?;
        write_file(&self.layout.index_json_path(), &json)?;
        debug!(classes = index.len(), "member index written");
        Ok(index)
    }

    /// Normalize, parse and persist one file.
    fn analyse_file(&self, source: &SourceFile) -> Result<Node> {
        let text = read_file(&source.path)?;
        let normalized = self.normalizer.normalize(&text);
        write_file(&self.layout.ts_path(&source.relative), &normalized)?;

        let parser = self
            .parser
            .as_deref()
            .context("no parser configured: set \"parserCommand\" in the configuration")?;
        let json = parser.parse(&normalized, &source.relative)?;
        let tree = Node::program_from_json_str(&json)
            .with_context(|| format!("parser returned an unusable tree for {}", source.relative))?;
        write_file(&self.layout.ast_path(&source.relative), &json)?;
        Ok(tree)
    }

    fn run_make(
        &self,
        input: &Path,
        output: &Path,
        sources: &[SourceFile],
        index: MemberIndex,
        mut gate: ResumeGate,
        report: &mut BatchReport,
    ) -> Result<()> {
        let emitter = CodeEmitter::new(self.config.emitter.clone()).with_member_index(index);
        let selected: Vec<&SourceFile> = sources
            .iter()
            .filter(|source| gate.admits(&source.relative))
            .collect();

        if self.parallel {
            debug!(files = selected.len(), "making in parallel, no checkpoints");
            let results: Vec<Result<(PathBuf, Vec<Diagnostic>)>> = selected
                .par_iter()
                .map(|source| self.make_file(&emitter, input, output, source))
                .collect();
            for (source, result) in selected.iter().zip(results) {
                self.record_make(result, source, report)?;
            }
            return Ok(());
        }

        for source in selected {
            self.save_checkpoint(input, output, source)?;
            let result = self.make_file(&emitter, input, output, source);
            self.record_make(result, source, report)?;
        }
        Ok(())
    }

    /// Emit one persisted tree and write the result.
    fn make_file(
        &self,
        emitter: &CodeEmitter,
        input: &Path,
        output: &Path,
        source: &SourceFile,
    ) -> Result<(PathBuf, Vec<Diagnostic>)> {
        let target = Self::output_path(input, output, source);
        info!(file = %target.display(), "making");
        let json = read_file(&self.layout.ast_path(&source.relative))
            .context("no persisted tree, run analyse first")?;
        let tree = Node::program_from_json_str(&json)
            .with_context(|| format!("persisted tree for {} is unusable", source.relative))?;
        let emitted = emitter
            .emit(&tree, &source.relative)
            .map_err(anyhow::Error::new)?;
        write_file(&target, &emitted.text)?;
        Ok((target, emitted.diagnostics))
    }

    fn record_make(
        &self,
        result: Result<(PathBuf, Vec<Diagnostic>)>,
        source: &SourceFile,
        report: &mut BatchReport,
    ) -> Result<()> {
        if let Some((target, diagnostics)) = self.settle(result, Phase::Make, source, report)? {
            report.emitted.push(target);
            report.diagnostics.extend(diagnostics);
        }
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Apply the error policy to one file's result: with terminate-on-error a
    /// failure ends the batch, otherwise it is logged and recorded.
    fn settle<T>(
        &self,
        result: Result<T>,
        phase: Phase,
        source: &SourceFile,
        report: &mut BatchReport,
    ) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.config.terminate_on_error() => {
                Err(err.context(format!("{phase} failed for {}", source.relative)))
            }
            Err(err) => {
                error!(file = %source.relative, %phase, "{err:#}");
                report
                    .failures
                    .push((source.relative.clone(), format!("{err:#}")));
                Ok(None)
            }
        }
    }

    fn resume_gate(&self, input: &Path, output: &Path) -> Result<ResumeGate> {
        ResumeGate::for_run(
            self.config.continue_last,
            &self.layout.checkpoint_path(),
            &input.display().to_string(),
            &output.display().to_string(),
        )
    }

    fn save_checkpoint(&self, input: &Path, output: &Path, source: &SourceFile) -> Result<()> {
        Checkpoint::new(
            input.display().to_string(),
            output.display().to_string(),
            source.relative.clone(),
        )
        .save(&self.layout.checkpoint_path())
    }

    fn load_index(&self) -> Result<MemberIndex> {
        let path = self.layout.index_json_path();
        if !path.exists() {
            warn!(path = %path.display(), "no member index found, inherited members stay unqualified");
            return Ok(MemberIndex::new());
        }
        MemberIndex::from_json_str(&read_file(&path)?)
            .with_context(|| format!("failed to parse member index {}", path.display()))
    }
}
