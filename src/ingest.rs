use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eyre::{Result, WrapErr, eyre};

use crate::document::Document;

/// Outcome of a background file read.
pub struct FileReadResult {
    pub path: PathBuf,
    pub document: Result<Document, String>,
}

/// Reads a whole file as UTF-8 text.
pub fn read_text_file(path: &Path) -> Result<String> {
    if path.is_dir() {
        return Err(eyre!("{} is a directory", path.display()));
    }
    let bytes = fs::read(path).wrap_err_with(|| format!("Could not read {}", path.display()))?;
    String::from_utf8(bytes).wrap_err_with(|| format!("{} is not valid UTF-8 text", path.display()))
}

pub fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .wrap_err("Could not read text from stdin")?;
    Ok(text)
}

/// Expands a leading `~` to the home directory.
pub fn expand_path(input: &str) -> PathBuf {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(input)
}

/// Reads and segments `path` on a worker thread. The receiver yields exactly
/// one result; dropping it discards the read.
pub fn spawn_file_read(path: PathBuf) -> Receiver<FileReadResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let document = read_text_file(&path)
            .map(|text| Document::from_text(&text))
            .map_err(|e| format!("{:#}", e));
        let _ = tx.send(FileReadResult { path, document });
    });
    rx
}
