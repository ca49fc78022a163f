//! Reading and atomically replacing the store file.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use honeypot_core::{Error, Result, VisitorEvent};

/// Load all events from `path`, oldest first.
///
/// A missing or blank file is an empty log. Events are stably ordered by
/// capture time so hand-edited or legacy files still read chronologically.
pub fn read_events(path: &Path) -> Result<Vec<VisitorEvent>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::read(path, e)),
    };

    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut events: Vec<VisitorEvent> =
        serde_json::from_slice(&data).map_err(|e| Error::decode(path, e))?;
    events.sort_by_key(VisitorEvent::observed_at);
    Ok(events)
}

/// Replace `path` with `data` without ever exposing a partial file.
///
/// The bytes go to a sibling temporary file which is synced and then
/// renamed over the target.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }

    let tmp = temp_path(path);
    let written = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp)
        .and_then(|mut f| {
            f.write_all(data)?;
            f.sync_all()
        });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(Error::write(&tmp, e));
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::write(path, e));
    }

    sync_parent(path);
    Ok(())
}

/// Sibling path used while writing `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("visitors"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn sync_parent(path: &Path) {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Ok(dir) = OpenOptions::new().read(true).open(parent) {
        let _ = dir.sync_all();
    }
}
