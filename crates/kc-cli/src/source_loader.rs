use std::fs;
use std::path::{Path, PathBuf};

use kc_core::KcodeError;
use walkdir::WalkDir;

/// Resolves a CLI path argument into the list of .kcode files to process:
/// a file path is taken as-is, a directory is scanned recursively for
/// `.kcode` files in sorted order.
pub(crate) fn resolve_targets(path: &str) -> Result<Vec<PathBuf>, KcodeError> {
    let target = PathBuf::from(path);
    if !target.exists() {
        return Err(KcodeError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("Path does not exist: {}", target.display()),
        ));
    }

    if !target.is_dir() {
        return Ok(vec![target]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&target)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == "kcode") {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(KcodeError::new(
            "CLI_SOURCE_EMPTY",
            format!("No .kcode files under {}", target.display()),
        ));
    }
    Ok(files)
}

pub(crate) fn read_creation(path: &Path) -> Result<Vec<u8>, KcodeError> {
    fs::read(path).map_err(|error| {
        KcodeError::new(
            "CLI_SOURCE_READ",
            format!("Failed to read {}: {}", path.display(), error),
        )
    })
}
