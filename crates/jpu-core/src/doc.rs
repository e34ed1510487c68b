// JSON document boundary: decode, encode, write and back up files.
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{DocError, DocResult};

pub fn parse_document(text: &str) -> DocResult<Value> {
    if text.trim().is_empty() {
        return Err(DocError::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

pub fn load_document(path: &Path) -> DocResult<Value> {
    let text = fs::read_to_string(path).map_err(|e| DocError::io(path, e))?;
    let value = parse_document(&text)?;
    debug!(path = %path.display(), bytes = text.len(), "loaded document");
    Ok(value)
}

pub fn render_document(value: &Value) -> DocResult<String> {
    let mut s = serde_json::to_string_pretty(value)?;
    s.push('\n');
    Ok(s)
}

pub fn write_document(path: &Path, value: &Value) -> DocResult<()> {
    let s = render_document(value)?;
    fs::write(path, s).map_err(|e| DocError::io(path, e))
}

// Non-destructive copy next to the original: data.json -> data_20250922-120000.json.bak.
// An existing backup is never replaced; same-second backups get `_1`, `_2`, ... suffixes.
pub fn backup_file(path: &Path) -> DocResult<PathBuf> {
    if !path.is_file() {
        let e = io::Error::new(ErrorKind::InvalidInput, "not a file");
        return Err(DocError::io(path, e));
    }
    let parent = path.parent().unwrap_or(Path::new("."));
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("document");
    let ext = path.extension().and_then(|s| s.to_str());
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();

    let mut attempt = 0usize;
    loop {
        let base = if attempt == 0 {
            format!("{}_{}", stem, ts)
        } else {
            format!("{}_{}_{}", stem, ts, attempt)
        };
        let name = match ext {
            Some(ext) => format!("{}.{}.bak", base, ext),
            None => format!("{}.bak", base),
        };
        let dest = parent.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&dest) {
            Ok(mut out) => {
                let mut src = File::open(path).map_err(|e| DocError::io(path, e))?;
                io::copy(&mut src, &mut out).map_err(|e| DocError::io(&dest, e))?;
                debug!(from = %path.display(), to = %dest.display(), "backup written");
                return Ok(dest);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(DocError::io(&dest, e)),
        }
    }
}
