use crate::{file_utils, logger::Logger, sheet};
use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub matched_names: usize,
    pub copied: usize,
}

/// Base-names from the first column of the first sheet.
///
/// The sheet is read without a header, so the first row is a candidate too.
/// Empty cells are dropped and extensions stripped.
pub fn read_match_set(sheet_path: &Path) -> anyhow::Result<HashSet<String>> {
    let sheets = sheet::read_workbook(sheet_path)?;
    let first = sheets
        .into_iter()
        .next()
        .with_context(|| format!("No sheets in {}", sheet_path.display()))?;

    Ok(first
        .rows
        .iter()
        .filter_map(|row| row.first().and_then(|cell| cell.as_text()))
        .filter(|value| !value.is_empty())
        .map(|value| file_utils::strip_extension(&value).to_string())
        .collect())
}

/// Copy every file under `source` whose base-name is in `names` to the same
/// relative folder under `dest`, overwriting existing files.
///
/// Stops at the first error; files already copied stay where they are.
pub fn copy_matching(
    names: &HashSet<String>,
    source: &Path,
    dest: &Path,
    logger: &Logger,
) -> anyhow::Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !names.contains(file_utils::strip_extension(&file_name)) {
            continue;
        }

        let parent = entry.path().parent().unwrap_or(source);
        let target_dir = dest.join(file_utils::relative_dir(source, parent)?);
        fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create {}", target_dir.display()))?;
        file_utils::copy_preserving(entry.path(), &target_dir.join(&file_name))?;

        logger.file_copied(&file_name, &target_dir);
        copied += 1;
    }
    Ok(copied)
}

/// Read the match set from `sheet_path`, then copy matching files.
pub fn copy_from_sheet(
    sheet_path: &Path,
    source: &Path,
    dest: &Path,
    logger: &Logger,
) -> anyhow::Result<CopyReport> {
    let names = read_match_set(sheet_path)?;
    logger.debug(&format!("{} names to match from {}", names.len(), sheet_path.display()));

    let copied = copy_matching(&names, source, dest, logger)?;
    logger.copy_finished(copied);

    Ok(CopyReport {
        matched_names: names.len(),
        copied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputConfig;
    use crate::sheet::{Cell, Sheet};
    use tempfile::TempDir;

    fn quiet_logger() -> Logger {
        Logger::new(OutputConfig {
            quiet: true,
            ..OutputConfig::default()
        })
    }

    #[test]
    fn test_copies_by_base_name_ignoring_extension() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("album")).unwrap();
        fs::write(src.path().join("album/track1.mp3"), b"a").unwrap();
        fs::write(src.path().join("album/track1.txt"), b"b").unwrap();
        fs::write(src.path().join("album/track2.mp3"), b"c").unwrap();

        let names: HashSet<String> = ["track1".to_string()].into_iter().collect();
        let copied = copy_matching(&names, src.path(), dest.path(), &quiet_logger()).unwrap();

        assert_eq!(copied, 2);
        assert!(dest.path().join("album/track1.mp3").exists());
        assert!(dest.path().join("album/track1.txt").exists());
        assert!(!dest.path().join("album/track2.mp3").exists());
    }

    #[test]
    fn test_root_files_land_in_dest_root_and_overwrite() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(src.path().join("song.wav"), b"new").unwrap();
        fs::write(dest.path().join("song.wav"), b"old").unwrap();

        let names: HashSet<String> = ["song".to_string()].into_iter().collect();
        copy_matching(&names, src.path(), dest.path(), &quiet_logger()).unwrap();

        assert_eq!(fs::read(dest.path().join("song.wav")).unwrap(), b"new");
    }

    #[test]
    fn test_dest_equal_to_source_fails_without_emptying_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("album")).unwrap();
        fs::write(dir.path().join("album/track1.mp3"), b"precious audio").unwrap();

        let names: HashSet<String> = ["track1".to_string()].into_iter().collect();
        let result = copy_matching(&names, dir.path(), dir.path(), &quiet_logger());

        assert!(result.is_err());
        assert_eq!(fs::read(dir.path().join("album/track1.mp3")).unwrap(), b"precious audio");
    }

    #[test]
    fn test_match_set_from_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.xlsx");
        let mut sheet = Sheet::new("Sheet1");
        sheet.rows = vec![
            vec![Cell::from("Archivo")],
            vec![Cell::from("track1.mp3"), Cell::from("ignored")],
            vec![Cell::Empty, Cell::from("no first column")],
            vec![Cell::from("track1.wav")],
            vec![Cell::from("intro")],
            vec![Cell::Int(42)],
        ];
        sheet::write_workbook(&path, &[sheet]).unwrap();

        let names = read_match_set(&path).unwrap();
        let expected: HashSet<String> = ["Archivo", "track1", "intro", "42"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_copy_from_sheet_end_to_end() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        fs::create_dir_all(src.join("a/b")).unwrap();
        fs::write(src.join("a/b/keep.flac"), b"x").unwrap();
        fs::write(src.join("a/skip.flac"), b"y").unwrap();

        let list = dir.path().join("list.xlsx");
        let mut sheet = Sheet::new("Sheet1");
        sheet.rows = vec![vec![Cell::from("keep.mp3")]];
        sheet::write_workbook(&list, &[sheet]).unwrap();

        let report = copy_from_sheet(&list, &src, &dest, &quiet_logger()).unwrap();
        assert_eq!(report, CopyReport { matched_names: 1, copied: 1 });
        assert!(dest.join("a/b/keep.flac").exists());
        assert!(!dest.join("a/skip.flac").exists());
    }

    #[test]
    fn test_missing_sheet_fails_before_copying() {
        let dir = TempDir::new().unwrap();
        let result = copy_from_sheet(
            &dir.path().join("missing.xlsx"),
            dir.path(),
            &dir.path().join("dest"),
            &quiet_logger(),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("dest").exists());
    }
}
