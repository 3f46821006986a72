//! Batch conversion of a source tree into a mirrored tree of HTML pages.

use std::path::{Path, PathBuf};

use super::markup::MarkupError;
use super::page;
use super::paths::{destination_path, is_source_file};
use super::pipeline::RenderPipeline;
use super::substitute::{PatternError, Rule};

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("source folder does not exist: {0}")]
    SourceNotFound(PathBuf),

    #[error("source folder is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct ConvertOptions {
    /// Root of the documents to convert.
    pub source_folder: PathBuf,
    /// Destination root; `None` converts in place next to the sources.
    pub output_folder: Option<PathBuf>,
    /// Substitution rules, applied in the order given.
    pub rules: Vec<Rule>,
    /// Match substitution patterns case-insensitively.
    pub case_insensitive: bool,
    /// Stylesheet path written verbatim into every page head.
    pub css_path: String,
    /// Script path; no script tag is emitted when unset.
    pub js_path: Option<String>,
    /// Footer text; no footer block is emitted when unset.
    pub footer: Option<String>,
    /// Link prefix for toctree entries.
    pub link_prefix: String,
}

#[derive(Debug)]
pub struct ConvertResult {
    pub documents: usize,
    pub output_dir: PathBuf,
}

/// Walks the source tree and produces one page per source document.
///
/// Fail-fast: the first error (bad pattern, malformed markup, I/O)
/// aborts the batch. A document is fully rendered before its output
/// file is opened, so no partial page is ever written.
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn convert(&self) -> Result<ConvertResult, ConvertError> {
        let source_root = &self.options.source_folder;
        if !source_root.exists() {
            return Err(ConvertError::SourceNotFound(source_root.clone()));
        }
        if !source_root.is_dir() {
            return Err(ConvertError::NotADirectory(source_root.clone()));
        }

        let output_root = self
            .options
            .output_folder
            .clone()
            .unwrap_or_else(|| source_root.clone());

        // One-time setup: directive registration and rule compilation
        // happen here, before the first document is read.
        let pipeline = RenderPipeline::new(
            &self.options.rules,
            self.options.case_insensitive,
            &self.options.link_prefix,
        )?;

        let mut documents = 0;
        self.convert_directory(source_root, source_root, &output_root, &pipeline, &mut documents)?;

        Ok(ConvertResult {
            documents,
            output_dir: output_root,
        })
    }

    /// Recurse into `dir`, converting matching files in lexicographic
    /// order so repeated runs report and write deterministically.
    fn convert_directory(
        &self,
        dir: &Path,
        source_root: &Path,
        output_root: &Path,
        pipeline: &RenderPipeline,
        documents: &mut usize,
    ) -> Result<(), ConvertError> {
        let read_dir = std::fs::read_dir(dir).map_err(|e| ConvertError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| ConvertError::ReadDir {
                path: dir.to_path_buf(),
                source: e,
            })?;
            entries.push(entry.path());
        }
        entries.sort();

        for path in entries {
            if path.is_dir() {
                self.convert_directory(&path, source_root, output_root, pipeline, documents)?;
            } else if is_source_file(&path) {
                self.convert_file(&path, source_root, output_root, pipeline)?;
                *documents += 1;
            }
        }

        Ok(())
    }

    fn convert_file(
        &self,
        source_path: &Path,
        source_root: &Path,
        output_root: &Path,
        pipeline: &RenderPipeline,
    ) -> Result<(), ConvertError> {
        let raw = std::fs::read_to_string(source_path).map_err(|e| ConvertError::ReadSource {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        let fragment = pipeline.render(&raw).map_err(|e| ConvertError::Render {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        let page = page::assemble(
            &fragment,
            &self.options.css_path,
            self.options.js_path.as_deref(),
            self.options.footer.as_deref(),
        );

        let destination = destination_path(source_root, output_root, source_path);
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConvertError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&destination, page).map_err(|e| ConvertError::WriteOutput {
            path: destination.clone(),
            source: e,
        })?;

        println!("Converted {} -> {}", source_path.display(), destination.display());
        Ok(())
    }
}
