use crate::{
    catalog,
    cli::{CatalogConfig, Commands},
    copier,
    logger::Logger,
    merger,
};
use std::path::PathBuf;

/// One fully specified operation, from either a subcommand or the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    FolderListing { path: PathBuf },
    FileListing { path: PathBuf },
    TrackListing { path: PathBuf },
    AudioScan { dir: PathBuf, name: String },
    Copy { sheet: PathBuf, source: PathBuf, dest: PathBuf },
    Merge { folder: PathBuf },
}

impl Request {
    /// `None` for commands that are not a single operation
    pub fn from_command(command: Commands) -> Option<Self> {
        Some(match command {
            Commands::Folders { path } => Request::FolderListing { path },
            Commands::Files { path } => Request::FileListing { path },
            Commands::Tracks { path } => Request::TrackListing { path },
            Commands::Scan { dir, name } => Request::AudioScan { dir, name },
            Commands::Copy { sheet, source, dest } => Request::Copy { sheet, source, dest },
            Commands::Merge { folder } => Request::Merge { folder },
            Commands::Menu => return None,
        })
    }
}

pub fn execute(request: &Request, config: &CatalogConfig, logger: &Logger) -> anyhow::Result<()> {
    match request {
        Request::FolderListing { path } => {
            catalog::export_folder_listing(path, config, logger)?;
        }
        Request::FileListing { path } => {
            catalog::export_file_listing(path, config, logger)?;
        }
        Request::TrackListing { path } => {
            catalog::export_track_listing(path, config, logger)?;
        }
        Request::AudioScan { dir, name } => {
            catalog::export_audio_scan(dir, name, config, logger)?;
        }
        Request::Copy { sheet, source, dest } => {
            let report = copier::copy_from_sheet(sheet, source, dest, logger)?;
            logger.debug(&format!(
                "{} files copied for {} listed names",
                report.copied, report.matched_names
            ));
        }
        Request::Merge { folder } => {
            let report = merger::merge_reports(folder, merger::MERGED_REPORT_FILE, logger)?;
            logger.debug(&format!(
                "{} spreadsheets merged into {} ({} sheets), {} skipped",
                report.merged_files,
                report.path.display(),
                report.sheets.len(),
                report.skipped_files.len()
            ));
        }
    }
    Ok(())
}
