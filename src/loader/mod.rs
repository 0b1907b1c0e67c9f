//! Document loading.
//!
//! Converts heterogeneous uploads (plain text, CSV tables, PDFs) into a
//! uniform sequence of text records with source metadata:
//!
//! - `.txt` / `.md` — the whole file becomes one record
//! - `.csv` — one record per data row, rendered as `"col: value"` pairs
//!   in header order joined by `" | "`
//! - `.pdf` — one record per page with extractable text
//!
//! Dispatch is an explicit [`DocumentKind`] per file rather than ad-hoc
//! string matching. Unsupported extensions are skipped and reported back
//! to the caller; a malformed *supported* file fails the whole batch.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::{AppError, DocumentMetadata, IngestedFile, Result};

// ============================================================================
// Loader Kinds
// ============================================================================

/// The set of file formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Plain text or Markdown; one record for the whole file.
    Text,
    /// Comma-separated values; one record per data row.
    Csv,
    /// PDF; one record per page.
    Pdf,
}

impl DocumentKind {
    /// Classify a path by extension, ASCII case-insensitive.
    /// Returns `None` for anything the loader does not support.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "md" => Some(DocumentKind::Text),
            "csv" => Some(DocumentKind::Csv),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Text => "text",
            DocumentKind::Csv => "csv",
            DocumentKind::Pdf => "pdf",
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A file to load: the client-facing name plus where its bytes live on disk.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
}

/// A loaded text unit before it is assigned an id and an embedding.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// Result of loading a batch of files.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// All records across all files, in upload order.
    pub records: Vec<LoadedRecord>,
    /// Per-file summary for files that were loaded.
    pub files: Vec<IngestedFile>,
    /// Names of files skipped because of an unsupported extension.
    pub skipped: Vec<String>,
}

// ============================================================================
// Loading
// ============================================================================

/// Load a batch of files into records.
///
/// Unsupported extensions are skipped (warned and reported in the
/// outcome). Any read or parse failure of a supported file aborts the
/// whole batch.
///
/// # Errors
///
/// Returns [`AppError::Loader`] on the first file that fails to load.
pub fn load_files(sources: &[SourceFile]) -> Result<LoadOutcome> {
    let mut outcome = LoadOutcome::default();

    for source in sources {
        let Some(kind) = DocumentKind::from_path(&source.path) else {
            warn!(file = %source.name, "skipping file with unsupported extension");
            outcome.skipped.push(source.name.clone());
            continue;
        };

        let records = match kind {
            DocumentKind::Text => load_text(source)?,
            DocumentKind::Csv => load_csv(source)?,
            DocumentKind::Pdf => load_pdf(source)?,
        };

        debug!(file = %source.name, kind = kind.name(), records = records.len(), "loaded file");
        outcome.files.push(IngestedFile {
            name: source.name.clone(),
            kind: kind.name().to_string(),
            records: records.len(),
        });
        outcome.records.extend(records);
    }

    Ok(outcome)
}

/// Whole file as a single record.
fn load_text(source: &SourceFile) -> Result<Vec<LoadedRecord>> {
    let content = std::fs::read_to_string(&source.path)
        .map_err(|e| AppError::Loader(format!("Failed to read '{}': {}", source.name, e)))?;

    Ok(vec![LoadedRecord {
        content,
        metadata: DocumentMetadata::for_file(&source.name),
    }])
}

/// One record per data row, `"col: value"` pairs in header order.
fn load_csv(source: &SourceFile) -> Result<Vec<LoadedRecord>> {
    let mut reader = csv::Reader::from_path(&source.path)
        .map_err(|e| AppError::Loader(format!("Failed to open '{}': {}", source.name, e)))?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::Loader(format!("Failed to read headers of '{}': {}", source.name, e)))?
        .clone();

    let mut records = Vec::new();
    for (row, entry) in reader.records().enumerate() {
        let entry = entry.map_err(|e| {
            AppError::Loader(format!("Malformed row {} in '{}': {}", row, source.name, e))
        })?;

        let content = headers
            .iter()
            .zip(entry.iter())
            .map(|(column, value)| format!("{}: {}", column, value))
            .collect::<Vec<_>>()
            .join(" | ");

        records.push(LoadedRecord {
            content,
            metadata: DocumentMetadata::for_row(&source.name, row),
        });
    }

    Ok(records)
}

/// One record per page; pages with no extractable text are dropped.
fn load_pdf(source: &SourceFile) -> Result<Vec<LoadedRecord>> {
    let pages = pdf_extract::extract_text_by_pages(&source.path)
        .map_err(|e| AppError::Loader(format!("Failed to parse '{}': {}", source.name, e)))?;

    let records = pages
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| LoadedRecord {
            content: text,
            metadata: DocumentMetadata::for_page(&source.name, index + 1),
        })
        .collect();

    Ok(records)
}
