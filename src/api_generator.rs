//! Loading documents and writing generated modules to disk.
//!
//! The engine in [`crate::openapi`] is pure; this module is the only place
//! that touches the filesystem. A run is split into planning (compare the
//! generated text with what is on disk) and applying (write, report, or
//! fail in check mode).

use std::fs;
use std::path::{Path, PathBuf};

use similar::{ChangeTag, TextDiff};
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::{Error, LoadError, Result, WriteError};
use crate::openapi;
use crate::openapi::ir::types::GeneratedCode;
use crate::openapi::spec::OpenApiSpec;

/// File name of the generated manifest.
pub const MANIFEST_FILE: &str = "mod.rs";

/// What to do with the planned changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Write new and modified files.
    #[default]
    Write,
    /// Report the plan, write nothing.
    DryRun,
    /// Write nothing, fail if anything differs.
    Check,
}

/// Inputs for [`generate_types`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// OpenAPI document (`.json`, `.yaml` or `.yml`).
    pub spec_path: PathBuf,
    /// Output directory. Falls back to `[output] dir` from the config.
    pub out_dir: Option<PathBuf>,
    /// Write, dry run or check.
    pub mode: Mode,
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path relative to the output directory.
    pub rel_path: String,
    /// Generated text.
    pub new_content: String,
    /// Current contents, `None` if the file does not exist yet.
    pub existing_content: Option<String>,
}

impl FileChange {
    /// Not on disk yet.
    pub fn is_new(&self) -> bool {
        self.existing_content.is_none()
    }

    /// On disk with different contents.
    pub fn is_modified(&self) -> bool {
        self.existing_content
            .as_ref()
            .is_some_and(|existing| existing != &self.new_content)
    }

    /// New or modified.
    pub fn is_pending(&self) -> bool {
        self.is_new() || self.is_modified()
    }

    /// Short label for listings.
    pub fn status(&self) -> &'static str {
        if self.is_new() {
            "new"
        } else if self.is_modified() {
            "modified"
        } else {
            "unchanged"
        }
    }

    /// Colored unified diff against the current contents, `None` when the
    /// file is new or unchanged.
    pub fn generate_diff(&self) -> Option<String> {
        let existing = self.existing_content.as_ref()?;
        if existing == &self.new_content {
            return None;
        }

        let diff = TextDiff::from_lines(existing, &self.new_content);
        let mut output = String::new();

        output.push_str(&format!("\x1b[1m--- {} (current)\x1b[0m\n", self.rel_path));
        output.push_str(&format!("\x1b[1m+++ {} (generated)\x1b[0m\n", self.rel_path));

        for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
            if idx > 0 {
                output.push_str("...\n");
            }
            for op in group {
                for change in diff.iter_changes(op) {
                    let (sign, color) = match change.tag() {
                        ChangeTag::Delete => ("-", "\x1b[31m"),
                        ChangeTag::Insert => ("+", "\x1b[32m"),
                        ChangeTag::Equal => (" ", ""),
                    };
                    output.push_str(color);
                    output.push_str(sign);
                    output.push_str(change.value());
                    if change.missing_newline() {
                        output.push('\n');
                    }
                    if !color.is_empty() {
                        output.push_str("\x1b[0m");
                    }
                }
            }
        }

        Some(output)
    }
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Directory the plan was made against.
    pub out_dir: PathBuf,
    /// Mode the plan was applied in.
    pub mode: Mode,
    /// Every planned file, sorted by path, manifest last.
    pub changes: Vec<FileChange>,
    /// Files actually written (write mode only).
    pub written: Vec<PathBuf>,
}

impl GenerateReport {
    /// Changes that are new or modified.
    pub fn pending(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter().filter(|c| c.is_pending())
    }
}

/// Read and parse an OpenAPI document, picking the parser by extension.
///
/// `.yaml` and `.yml` go through serde_yaml; everything else is parsed as
/// JSON.
pub fn load_document(path: &Path) -> std::result::Result<OpenApiSpec, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    debug!(
        path = %path.display(),
        bytes = content.len(),
        format = if is_yaml { "yaml" } else { "json" },
        "Loaded schema document."
    );

    if is_yaml {
        OpenApiSpec::from_yaml(&content).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        OpenApiSpec::from_json(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Compare generated code with the contents of `out_dir`.
pub fn plan_changes(
    code: &GeneratedCode,
    out_dir: &Path,
) -> std::result::Result<Vec<FileChange>, WriteError> {
    let files = code
        .modules
        .iter()
        .map(|(tag, text)| (format!("{tag}.rs"), text))
        .chain(std::iter::once((MANIFEST_FILE.to_string(), &code.manifest)));

    let mut changes = Vec::with_capacity(code.modules.len() + 1);
    for (rel_path, new_content) in files {
        let path = out_dir.join(&rel_path);
        let existing_content = if path.exists() {
            Some(fs::read_to_string(&path).map_err(|source| WriteError::ReadFile {
                path: path.clone(),
                source,
            })?)
        } else {
            None
        };
        changes.push(FileChange {
            rel_path,
            new_content: new_content.clone(),
            existing_content,
        });
    }

    Ok(changes)
}

/// Write every new or modified file, creating `out_dir` if needed.
///
/// Each file is written to a `.tmp` sibling and renamed into place, so a
/// failure never leaves a half-written module. Files replaced before the
/// failure stay replaced and are logged.
pub fn write_changes(
    changes: &[FileChange],
    out_dir: &Path,
) -> std::result::Result<Vec<PathBuf>, WriteError> {
    fs::create_dir_all(out_dir).map_err(|source| WriteError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written: Vec<PathBuf> = Vec::new();
    for change in changes.iter().filter(|c| c.is_pending()) {
        let path = out_dir.join(&change.rel_path);
        if let Err(err) = replace_file(&path, &change.new_content) {
            if !written.is_empty() {
                let done: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
                warn!(
                    failed = %path.display(),
                    written = %done.join(", "),
                    "Write failed after some generated files were already replaced."
                );
            }
            return Err(err);
        }
        debug!(path = %path.display(), status = change.status(), "Wrote generated file.");
        written.push(path);
    }

    Ok(written)
}

fn replace_file(path: &Path, content: &str) -> std::result::Result<(), WriteError> {
    let temp_path = path.with_extension("tmp");

    fs::write(&temp_path, content).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        WriteError::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    })?;

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        WriteError::ReplaceFile {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Load, generate and plan, without touching the output directory.
pub fn plan_types(spec_path: &Path, out_dir: &Path, config: &GeneratorConfig) -> Result<Vec<FileChange>> {
    let spec = load_document(spec_path)?;
    let code = openapi::generate(&spec, config)?;
    let changes = plan_changes(&code, out_dir)?;
    debug!(
        modules = code.modules.len(),
        pending = changes.iter().filter(|c| c.is_pending()).count(),
        "Planned generated files."
    );
    Ok(changes)
}

/// Carry out a plan in the given mode.
///
/// Check mode returns [`Error::OutOfDate`] naming every file that would
/// change.
pub fn apply_plan(changes: Vec<FileChange>, out_dir: &Path, mode: Mode) -> Result<GenerateReport> {
    let written = match mode {
        Mode::Write => write_changes(&changes, out_dir)?,
        Mode::DryRun => Vec::new(),
        Mode::Check => {
            let stale: Vec<String> = changes
                .iter()
                .filter(|c| c.is_pending())
                .map(|c| c.rel_path.clone())
                .collect();
            if !stale.is_empty() {
                return Err(Error::OutOfDate { files: stale });
            }
            Vec::new()
        }
    };

    info!(
        out_dir = %out_dir.display(),
        mode = ?mode,
        files = changes.len(),
        written = written.len(),
        "Type generation finished."
    );

    Ok(GenerateReport {
        out_dir: out_dir.to_path_buf(),
        mode,
        changes,
        written,
    })
}

/// Full run: load the document, generate, and apply in `options.mode`.
pub fn generate_types(options: &GenerateOptions, config: &GeneratorConfig) -> Result<GenerateReport> {
    let out_dir = options
        .out_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());
    let changes = plan_types(&options.spec_path, &out_dir, config)?;
    apply_plan(changes, &out_dir, options.mode)
}
