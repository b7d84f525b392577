/// Level file discovery and loading.
///
/// A level file is plain text: one row per line, one symbol per tile.
/// A path given on the command line is either a single level file or a
/// directory whose `.txt` files are taken in file-name order (not recursive).

use std::path::{Path, PathBuf};

use crate::error::{ProbeError, ProbeResult};

/// Raw level text plus where it came from.
#[derive(Clone, Debug)]
pub struct LevelSource {
    /// File stem, e.g. `lvl-1` for `levels/lvl-1.txt`.
    pub name: String,
    pub path: PathBuf,
    pub text: String,
}

// ══════════════════════════════════════════════════════════════
// Discovery
// ══════════════════════════════════════════════════════════════

/// Expand `path` into the level files it names.
pub fn collect_level_paths(path: &Path) -> ProbeResult<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let entries = std::fs::read_dir(path).map_err(|source| ProbeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().map_or(false, |e| e == "txt"))
        .collect();

    if files.is_empty() {
        return Err(ProbeError::NoLevels(path.to_path_buf()));
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ══════════════════════════════════════════════════════════════
// Loading
// ══════════════════════════════════════════════════════════════

pub fn read_level(path: &Path) -> ProbeResult<LevelSource> {
    let text = std::fs::read_to_string(path).map_err(|source| ProbeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    Ok(LevelSource { name, path: path.to_path_buf(), text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("levelprobe-levels-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn directory_yields_sorted_txt_files() {
        let dir = scratch_dir("sorted");
        fs::write(dir.join("b.txt"), "--\nXX\n").unwrap();
        fs::write(dir.join("a.txt"), "--\nXX\n").unwrap();
        fs::write(dir.join("notes.md"), "ignored").unwrap();
        fs::create_dir(dir.join("nested.txt")).unwrap();

        let paths = collect_level_paths(&dir).unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = scratch_dir("empty");
        assert!(matches!(collect_level_paths(&dir), Err(ProbeError::NoLevels(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_path_is_passed_through() {
        let p = Path::new("some/level.txt");
        assert_eq!(collect_level_paths(p).unwrap(), vec![p.to_path_buf()]);
    }

    #[test]
    fn read_level_uses_file_stem() {
        let dir = scratch_dir("read");
        let path = dir.join("lvl-3.txt");
        fs::write(&path, "M-\nXX\n").unwrap();

        let src = read_level(&path).unwrap();
        assert_eq!(src.name, "lvl-3");
        assert_eq!(src.text, "M-\nXX\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_level(Path::new("/no/such/level.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/level.txt"));
    }
}
