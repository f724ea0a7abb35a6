// src/scripts.rs

//! Script discovery.
//!
//! A "script" is one `*.sh` file in the scripts directory; its file name
//! is the job name used everywhere else (results, logs, reports).
//!
//! Discovery is deliberately forgiving:
//! - a missing directory is created and yields an empty list,
//! - an unreadable directory yields an empty list with a warning,
//!
//! so a fresh checkout can run the tool without setup and without errors.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::fs::FileSystem;

/// One discovered script: a job name plus its resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub path: PathBuf,
}

impl Script {
    /// Resolve a script by name inside `dir`. The file may not exist;
    /// execution reports that as a per-script failure, not an error here.
    pub fn new(name: impl Into<String>, dir: &Path) -> Self {
        let name = name.into();
        let path = dir.join(&name);
        Self { name, path }
    }
}

/// Append `.sh` to a user-supplied script name unless it already has it.
pub fn normalize_script_name(name: &str) -> String {
    if name.ends_with(".sh") {
        name.to_string()
    } else {
        format!("{}.sh", name)
    }
}

/// Scan `dir` for `*.sh` scripts, sorted by name.
///
/// Never fails: a missing directory is created (first-run convenience)
/// and reported as empty; read errors degrade to an empty list with a
/// warning.
pub fn scan_scripts(fs: &dyn FileSystem, dir: &Path) -> Vec<Script> {
    if !fs.is_dir(dir) {
        debug!(dir = %dir.display(), "scripts directory missing, creating it");
        if let Err(err) = fs.create_dir_all(dir) {
            warn!(dir = %dir.display(), error = %err, "could not create scripts directory");
        }
        return Vec::new();
    }

    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "could not read scripts directory");
            return Vec::new();
        }
    };

    let mut scripts: Vec<Script> = entries
        .into_iter()
        .filter(|path| fs.is_file(path))
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            name.ends_with(".sh").then(|| Script { name, path })
        })
        .collect();

    // Sort by name so run order is deterministic across filesystems.
    scripts.sort_by(|a, b| a.name.cmp(&b.name));
    scripts
}
