use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use exporter_engine::ContentMode;

#[derive(Parser, Debug)]
#[command(
    name = "chat-exporter",
    version,
    about = "Export a saved chat page into standalone per-speaker and full-dialog HTML files"
)]
pub struct Cli {
    /// Saved chat page (HTML) to export
    pub input: PathBuf,

    /// Directory that receives the exported files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Keep message markup or flatten it to plain text
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Config file (RON); defaults to ./chat_exporter.ron when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wait until the page exists and shows the conversation before exporting
    #[arg(long)]
    pub wait: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Build every document but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the export report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Markup,
    PlainText,
}

impl From<ModeArg> for ContentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Markup => ContentMode::Markup,
            ModeArg::PlainText => ContentMode::PlainText,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
