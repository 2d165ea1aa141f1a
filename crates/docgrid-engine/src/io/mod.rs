use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Document;

/// File extensions picked up when scanning a corpus directory.
pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm", "xhtml", "xml"];

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid corpus directory: {0}")]
    InvalidCorpusDir(String),
}

/// Read a markup file into a [`Document`] named after the file stem.
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(IoError::Io)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Document::new(name, text).with_meta("file_name", file_name))
}

/// Scan for markup files below `root`, sorted by path
pub fn scan_documents(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidCorpusDir(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    dir: &Path,
    extensions: &[&str],
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, extensions, files)?;
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && extensions.iter().any(|x| x.eq_ignore_ascii_case(ext))
        {
            files.push(path);
        }
    }

    Ok(())
}
