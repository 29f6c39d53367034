//! File helpers shared by the JSON store and the config manager.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Sibling path the contents are staged in before the final rename.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Stages `data` in [`tmp_path`] and renames it over `path`, so readers never
/// observe a partially written file.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    write_file(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tmp_path_appends_suffix_to_existing_extension() {
        assert_eq!(
            tmp_path(Path::new("/data/budget-tracker-data.json")),
            PathBuf::from("/data/budget-tracker-data.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/data/raw")), PathBuf::from("/data/raw.tmp"));
    }

    #[test]
    fn atomic_write_replaces_contents_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("file.json");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn failed_atomic_write_leaves_target_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.json");
        write_atomic(&path, "kept").unwrap();
        fs::create_dir_all(tmp_path(&path)).unwrap();
        assert!(write_atomic(&path, "lost").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    }
}
