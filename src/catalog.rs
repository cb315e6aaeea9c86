//! The four catalog reports. Each `build_*` walks the filesystem and returns
//! its rows; each `export_*` builds, then writes a single spreadsheet.
//! Nothing is written when the walk fails.

use crate::{
    cli::CatalogConfig,
    file_utils,
    logger::Logger,
    names::{self, ArtistPair},
    natural_sort::sort_natural,
    sheet::{self, Cell, ReportRow},
};
use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const FOLDER_NAMES_FILE: &str = "folderNames.xlsx";
pub const FOLDER_FILES_FILE: &str = "folderFiles.xlsx";
pub const TRACKS_FILE: &str = "wavFiles.xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRow {
    pub name: String,
}

impl ReportRow for FolderRow {
    const HEADERS: &'static [&'static str] = &["Folder Names"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.name.clone().into()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub original: String,
    pub normalized: String,
}

impl ReportRow for FileRow {
    const HEADERS: &'static [&'static str] = &["Original Names", "Modified Names"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.original.clone().into(), self.normalized.clone().into()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub subfolder: String,
    pub artists: ArtistPair,
    pub track: String,
}

impl ReportRow for TrackRow {
    const HEADERS: &'static [&'static str] = &["Subfolder", "PrimaryArtist", "SecondaryArtist", "WavFile"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.subfolder.clone().into(),
            self.artists.primary.clone().into(),
            self.artists.secondary.clone().into(),
            self.track.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFileRow {
    pub relative_dir: String,
    pub file_name: String,
}

impl ReportRow for AudioFileRow {
    const HEADERS: &'static [&'static str] = &["Ruta Relativa", "Archivo"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.relative_dir.clone().into(), self.file_name.clone().into()]
    }
}

/// Immediate subfolders of `root`, in enumeration order.
pub fn build_folder_listing(root: &Path) -> anyhow::Result<Vec<FolderRow>> {
    Ok(file_utils::list_subdirs(root)?
        .into_iter()
        .map(|name| FolderRow { name })
        .collect())
}

/// Immediate files of `root` in natural order, with their loose display names.
pub fn build_file_listing(root: &Path) -> anyhow::Result<Vec<FileRow>> {
    let mut files = file_utils::list_files(root)?;
    sort_natural(&mut files);

    Ok(files
        .into_iter()
        .map(|original| FileRow {
            normalized: names::normalize_loose(&original),
            original,
        })
        .collect())
}

/// One row per `container` file in each immediate subfolder of `root`.
///
/// Subfolders and their files are visited in natural order; the subfolder
/// name supplies the artists and the file name the track.
pub fn build_track_listing(root: &Path, container: &str) -> anyhow::Result<Vec<TrackRow>> {
    let suffix = format!(".{}", container.to_lowercase());
    let mut subfolders = file_utils::list_subdirs(root)?;
    sort_natural(&mut subfolders);

    let mut rows = Vec::new();
    for subfolder in subfolders {
        let mut files = file_utils::list_files(&root.join(&subfolder))?;
        sort_natural(&mut files);

        let artists = names::split_artists(&subfolder);
        let title = names::title_case(&subfolder);
        for file in files.iter().filter(|f| f.to_lowercase().ends_with(&suffix)) {
            rows.push(TrackRow {
                subfolder: title.clone(),
                artists: artists.clone(),
                track: names::normalize_strict(file),
            });
        }
    }
    Ok(rows)
}

/// Every audio file below `root`, at any depth, in walk order.
pub fn build_audio_scan(root: &Path, config: &CatalogConfig) -> anyhow::Result<Vec<AudioFileRow>> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    let mut rows = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        // Symlinked files count, symlinked directories are not descended
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let is_audio = file_utils::extension_lower(&file_name)
            .is_some_and(|ext| config.is_audio_extension(&ext));
        if !is_audio {
            continue;
        }

        let parent = entry.path().parent().unwrap_or(root);
        rows.push(AudioFileRow {
            relative_dir: file_utils::relative_dir(root, parent)?,
            file_name,
        });
    }
    Ok(rows)
}

fn finish<R: ReportRow>(logger: &Logger, path: PathBuf, rows: &[R]) -> anyhow::Result<PathBuf> {
    sheet::write_rows(&path, rows)?;
    logger.report_written(&path, rows.len());
    Ok(path)
}

pub fn export_folder_listing(root: &Path, config: &CatalogConfig, logger: &Logger) -> anyhow::Result<PathBuf> {
    logger.progress(&format!("Listing folders in {}", root.display()));
    let rows = build_folder_listing(root)?;
    finish(logger, config.output_path(FOLDER_NAMES_FILE), &rows)
}

pub fn export_file_listing(root: &Path, config: &CatalogConfig, logger: &Logger) -> anyhow::Result<PathBuf> {
    logger.progress(&format!("Listing files in {}", root.display()));
    let rows = build_file_listing(root)?;
    finish(logger, config.output_path(FOLDER_FILES_FILE), &rows)
}

pub fn export_track_listing(root: &Path, config: &CatalogConfig, logger: &Logger) -> anyhow::Result<PathBuf> {
    logger.progress(&format!("Listing .{} tracks under {}", config.container, root.display()));
    let rows = build_track_listing(root, &config.container)?;
    finish(logger, config.output_path(TRACKS_FILE), &rows)
}

/// `name` gets the `.xlsx` suffix appended, as typed.
pub fn export_audio_scan(
    root: &Path,
    name: &str,
    config: &CatalogConfig,
    logger: &Logger,
) -> anyhow::Result<PathBuf> {
    logger.progress(&format!("Scanning {} for audio files", root.display()));
    let rows = build_audio_scan(root, config)?;
    logger.debug(&format!("{} audio files found", rows.len()));
    finish(logger, config.output_path(&format!("{}.xlsx", name)), &rows)
}
