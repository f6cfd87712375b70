//! Source discovery and output file helpers.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Extension of AS3 sources, matched case-insensitively.
pub const SOURCE_EXTENSION: &str = "as";
pub const TARGET_EXTENSION: &str = "ts";

/// Directory and file exclusion rules. Paths are matched relative to the
/// input root with `/` separators.
#[derive(Debug, Clone, Default)]
pub struct SkipRules {
    pub dirs: Vec<Regex>,
    pub files: Vec<Regex>,
}

impl SkipRules {
    /// Directory rules see the path both bare and with a trailing `/`, so
    /// `^ui/` excludes the `ui` directory itself.
    pub fn skips_dir(&self, relative: &str) -> bool {
        let with_slash = format!("{relative}/");
        self.dirs
            .iter()
            .any(|rule| rule.is_match(relative) || rule.is_match(&with_slash))
    }

    pub fn skips_file(&self, relative: &str) -> bool {
        self.files.iter().any(|rule| rule.is_match(relative))
    }
}

/// One input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the input root, `/`-separated. Used for diagnostics,
    /// import paths and the temp layout.
    pub relative: String,
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// `path` relative to `base`, joined with `/`.
pub fn relative_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `relative` with its extension replaced by `extension`.
pub fn with_extension(relative: &str, extension: &str) -> PathBuf {
    Path::new(relative).with_extension(extension)
}

/// Every `.as` file under `input` in file-name order, minus skipped ones.
/// A single file is accepted as input too; its relative path is its name.
pub fn discover_sources(input: &Path, skip: &SkipRules) -> Result<Vec<SourceFile>> {
    let metadata = std::fs::metadata(input)
        .with_context(|| format!("failed to read input {}", input.display()))?;
    if metadata.is_file() {
        let relative = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if skip.skips_file(&relative) {
            return Ok(Vec::new());
        }
        return Ok(vec![SourceFile {
            path: input.to_path_buf(),
            relative,
        }]);
    }

    let walker = WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let relative = relative_path(input, entry.path());
            let skipped = skip.skips_dir(&relative);
            if skipped {
                trace!(dir = %relative, "skipping directory");
            }
            !skipped
        });

    let mut sources = Vec::new();
    for entry in walker {
        let entry =
            entry.with_context(|| format!("failed to walk input directory {}", input.display()))?;
        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }
        let relative = relative_path(input, entry.path());
        if skip.skips_file(&relative) {
            trace!(file = %relative, "skipping file");
            continue;
        }
        sources.push(SourceFile {
            path: entry.into_path(),
            relative,
        });
    }
    Ok(sources)
}

/// Write `contents` to `path`, creating parent directories first.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
