use crate::cli::{OutputConfig, OutputFormat};
use serde::Serialize;
use std::path::Path;

#[derive(Clone)]
pub struct Logger {
    config: OutputConfig,
}

#[derive(Serialize)]
struct JsonEvent {
    #[serde(rename = "type")]
    event_type: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Logger {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn info(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        self.output("info", message, None);
    }

    pub fn progress(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        self.output("progress", message, None);
    }

    pub fn warn(&self, message: &str) {
        self.output("warn", message, None);
    }

    pub fn error(&self, message: &str) {
        self.output("error", message, None);
    }

    pub fn debug(&self, message: &str) {
        if !self.config.verbose {
            return;
        }
        self.output("debug", message, None);
    }

    pub fn report_written(&self, path: &Path, rows: usize) {
        let data = serde_json::json!({
            "path": path.display().to_string(),
            "rows": rows
        });
        self.output(
            "report_written",
            &format!("Spreadsheet written to {} ({} rows)", path.display(), rows),
            Some(data),
        );
    }

    pub fn file_copied(&self, file: &str, dir: &Path) {
        if self.config.quiet {
            return;
        }
        let data = serde_json::json!({
            "file": file,
            "dir": dir.display().to_string()
        });
        self.output("file_copied", &format!("Copied: {} -> {}", file, dir.display()), Some(data));
    }

    pub fn copy_finished(&self, copied: usize) {
        let data = serde_json::json!({ "copied": copied });
        self.output("copy_finished", &format!("Copy finished, {} files copied.", copied), Some(data));
    }

    pub fn merge_skipped(&self, file: &str, error: &anyhow::Error) {
        let data = serde_json::json!({
            "file": file,
            "error": format!("{:#}", error)
        });
        self.output("merge_skipped", &format!("Error processing {}: {:#}", file, error), Some(data));
    }

    pub fn merge_finished(&self, path: &Path, sheets: usize) {
        let data = serde_json::json!({
            "path": path.display().to_string(),
            "sheets": sheets
        });
        self.output("merge_finished", &format!("Combined file saved to: {}", path.display()), Some(data));
    }

    fn output(&self, event_type: &str, message: &str, data: Option<serde_json::Value>) {
        match self.config.output_format {
            OutputFormat::Json => {
                let event = JsonEvent {
                    event_type: event_type.to_string(),
                    message: message.to_string(),
                    data,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{}", json);
                }
            }
            OutputFormat::Text => {
                let prefix = match event_type {
                    "error" => "[ERROR]",
                    "warn" | "merge_skipped" => "[WARN]",
                    "debug" => "[DEBUG]",
                    "progress" | "file_copied" => "[...]",
                    "report_written" | "copy_finished" | "merge_finished" => "[OK]",
                    _ => "[INFO]",
                };
                if self.config.prefixed {
                    println!("{} {}", prefix, message);
                } else {
                    println!("{}", message);
                }
            }
        }
    }
}
