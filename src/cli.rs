use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Audio extensions matched by the recursive audio scan.
pub const DEFAULT_AUDIO_EXTENSIONS: [&str; 7] = ["mp3", "wav", "flac", "aac", "ogg", "m4a", "wma"];

#[derive(Parser)]
#[command(name = "wavsheet")]
#[command(version = "0.1.0")]
#[command(about = "Catalog audio folders into spreadsheets and copy files listed in them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory where catalog spreadsheets are written
    #[arg(long, default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// Audio container matched by the subfolder/track listing
    #[arg(long, default_value = "mp3", global = true)]
    pub container: String,

    /// Audio extensions matched by the recursive scan (comma separated)
    #[arg(long, value_delimiter = ',', global = true)]
    pub extensions: Vec<String>,

    /// Output format for progress and results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Only print warnings, errors and final results
    #[arg(long, short = 'q', default_value_t = false, global = true)]
    pub quiet: bool,

    /// Print debug output
    #[arg(long, short = 'v', default_value_t = false, global = true)]
    pub verbose: bool,

    /// Print messages without [OK]/[WARN] style prefixes
    #[arg(long, default_value_t = false, global = true)]
    pub plain: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Logging configuration derived from CLI flags
#[derive(Clone, Debug)]
pub struct OutputConfig {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    /// Prefix text lines with their event kind
    pub prefixed: bool,
}

impl OutputConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            output_format: cli.format,
            quiet: cli.quiet,
            verbose: cli.verbose,
            prefixed: !cli.plain,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Text,
            quiet: false,
            verbose: false,
            prefixed: true,
        }
    }
}

/// Builder parameters derived from CLI flags
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub output_dir: PathBuf,
    /// Lower-case, no leading dot
    pub container: String,
    /// Lower-case, no leading dot
    pub audio_extensions: Vec<String>,
}

fn clean_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

impl CatalogConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let audio_extensions: Vec<String> = cli
            .extensions
            .iter()
            .map(|e| clean_extension(e))
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            output_dir: cli.output_dir.clone(),
            container: clean_extension(&cli.container),
            audio_extensions: if audio_extensions.is_empty() {
                Self::default().audio_extensions
            } else {
                audio_extensions
            },
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn is_audio_extension(&self, ext: &str) -> bool {
        self.audio_extensions.iter().any(|e| e == ext)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            container: "mp3".to_string(),
            audio_extensions: DEFAULT_AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the immediate subfolders of a folder (folderNames.xlsx)
    Folders { path: PathBuf },
    /// List files with their normalized names (folderFiles.xlsx)
    Files { path: PathBuf },
    /// List tracks per artist subfolder (wavFiles.xlsx)
    Tracks { path: PathBuf },
    /// Recursively list audio files with their folder (<name>.xlsx)
    Scan { dir: PathBuf, name: String },
    /// Copy files named in a spreadsheet's first column, keeping folder structure
    Copy {
        sheet: PathBuf,
        source: PathBuf,
        dest: PathBuf,
    },
    /// Combine every spreadsheet in a folder into final_vp_report.xlsx
    Merge { folder: PathBuf },
    /// Run the interactive menu
    Menu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wavsheet"]);
        assert!(cli.command.is_none());
        let config = CatalogConfig::from_cli(&cli);
        assert_eq!(config.container, "mp3");
        assert_eq!(config.audio_extensions.len(), 7);
        assert!(config.is_audio_extension("m4a"));
        assert_eq!(config.output_path("x.xlsx"), PathBuf::from("./x.xlsx"));
    }

    #[test]
    fn test_extension_flags_are_cleaned() {
        let cli = Cli::parse_from(["wavsheet", "--container", ".WAV", "--extensions", "MP3,.flac", "menu"]);
        let config = CatalogConfig::from_cli(&cli);
        assert_eq!(config.container, "wav");
        assert_eq!(config.audio_extensions, vec!["mp3", "flac"]);
        assert!(!config.is_audio_extension("ogg"));
    }

    #[test]
    fn test_subcommand_args() {
        let cli = Cli::parse_from(["wavsheet", "scan", "/music", "inventory", "--format", "json", "-q"]);
        match &cli.command {
            Some(Commands::Scan { dir, name }) => {
                assert_eq!(*dir, PathBuf::from("/music"));
                assert_eq!(name, "inventory");
            }
            _ => panic!("expected scan"),
        }
        let output = OutputConfig::from_cli(&cli);
        assert_eq!(output.output_format, OutputFormat::Json);
        assert!(output.quiet);
    }
}
