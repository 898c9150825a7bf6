use anyhow::{Result, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::transcript::payload::{decode_fragments, decode_highlights};
use crate::transcript::{CaptionFragment, HighlightSet};

// @module: File utilities for transcript inputs and rendered outputs

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path next to the input, e.g. talk.json -> talk.transcript.html
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, extension: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(".transcript.");
        output_filename.push_str(extension.trim_start_matches('.'));

        match input_file.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        }
    }

    /// Read caption fragments from a JSON file
    pub fn read_fragments<P: AsRef<Path>>(path: P) -> Result<Vec<CaptionFragment>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read captions file: {}", path.display()))?;

        let fragments = decode_fragments(&content)
            .with_context(|| format!("Failed to decode captions file: {}", path.display()))?;
        Ok(fragments)
    }

    /// Read a highlight list from a JSON file
    pub fn read_highlights<P: AsRef<Path>>(path: P) -> Result<HighlightSet> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read highlights file: {}", path.display()))?;

        let highlights = decode_highlights(&content)
            .with_context(|| format!("Failed to decode highlights file: {}", path.display()))?;
        Ok(highlights)
    }

    /// Write `content` to `path` through a temporary file in the same directory
    pub fn write_output<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        let mut file = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temporary file in: {}", parent.display()))?;
        file.write_all(content.as_bytes())?;
        file.persist(path)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        Ok(())
    }
}
