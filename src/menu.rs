use crate::{
    cli::CatalogConfig,
    commands::{self, Request},
    logger::Logger,
};
use dialoguer::Input;
use std::path::PathBuf;

/// Source of typed answers, so the loop can be driven without a terminal.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

pub struct MenuEntry {
    pub number: u32,
    pub label: &'static str,
    read: fn(&mut dyn Prompter) -> anyhow::Result<Request>,
}

pub static MENU: [MenuEntry; 6] = [
    MenuEntry {
        number: 1,
        label: "List folder names",
        read: read_folder_listing,
    },
    MenuEntry {
        number: 2,
        label: "List file names",
        read: read_file_listing,
    },
    MenuEntry {
        number: 3,
        label: "List tracks and their subfolders",
        read: read_track_listing,
    },
    MenuEntry {
        number: 4,
        label: "List audio files and their folder",
        read: read_audio_scan,
    },
    MenuEntry {
        number: 5,
        label: "Copy files listed in a spreadsheet, keeping folder structure",
        read: read_copy,
    },
    MenuEntry {
        number: 6,
        label: "Combine spreadsheets in a folder",
        read: read_merge,
    },
];

pub const EXIT_SELECTION: u32 = 0;

/// Menu selection number, `None` unless the input is an integer.
pub fn parse_selection(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

pub fn find_entry(selection: u32) -> Option<&'static MenuEntry> {
    MENU.iter().find(|entry| entry.number == selection)
}

/// Trim whitespace and surrounding quotes from a pasted path, expanding `~`.
pub fn clean_path_input(input: &str) -> PathBuf {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');

    if trimmed == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}

fn ask_path(prompter: &mut dyn Prompter, prompt: &str) -> anyhow::Result<PathBuf> {
    Ok(clean_path_input(&prompter.ask(prompt)?))
}

fn read_folder_listing(prompter: &mut dyn Prompter) -> anyhow::Result<Request> {
    Ok(Request::FolderListing {
        path: ask_path(prompter, "Folder path")?,
    })
}

fn read_file_listing(prompter: &mut dyn Prompter) -> anyhow::Result<Request> {
    Ok(Request::FileListing {
        path: ask_path(prompter, "Folder path")?,
    })
}

fn read_track_listing(prompter: &mut dyn Prompter) -> anyhow::Result<Request> {
    Ok(Request::TrackListing {
        path: ask_path(prompter, "Main folder path")?,
    })
}

fn read_audio_scan(prompter: &mut dyn Prompter) -> anyhow::Result<Request> {
    let dir = ask_path(prompter, "Directory to search")?;
    let name = prompter.ask("Name of the generated spreadsheet")?.trim().to_string();
    Ok(Request::AudioScan { dir, name })
}

fn read_copy(prompter: &mut dyn Prompter) -> anyhow::Result<Request> {
    Ok(Request::Copy {
        sheet: ask_path(prompter, "Spreadsheet path")?,
        source: ask_path(prompter, "Source folder")?,
        dest: ask_path(prompter, "Destination folder")?,
    })
}

fn read_merge(prompter: &mut dyn Prompter) -> anyhow::Result<Request> {
    Ok(Request::Merge {
        folder: ask_path(prompter, "Source folder")?,
    })
}

fn print_menu() {
    println!("Select an option:");
    for entry in &MENU {
        println!("{}. {}", entry.number, entry.label);
    }
    println!("{}. Exit", EXIT_SELECTION);
}

/// Prompt until the user selects exit.
///
/// Bad selections and failed operations are reported and the menu is shown
/// again; only a failure to read input ends the loop with an error.
pub fn run(prompter: &mut dyn Prompter, config: &CatalogConfig, logger: &Logger) -> anyhow::Result<()> {
    loop {
        print_menu();
        let input = prompter.ask("->")?;

        let Some(selection) = parse_selection(&input) else {
            logger.warn(&format!("Invalid selection: {}", input.trim()));
            continue;
        };
        if selection == EXIT_SELECTION {
            logger.info("Exiting");
            return Ok(());
        }
        let Some(entry) = find_entry(selection) else {
            logger.warn(&format!("Invalid selection: {}", selection));
            continue;
        };

        let request = (entry.read)(&mut *prompter)?;
        logger.debug(&format!("Running {:?}", request));
        if let Err(e) = commands::execute(&request, config, logger) {
            logger.error(&format!("{:#}", e));
        }
    }
}
