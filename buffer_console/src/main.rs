//! # textbuf
//!
//! Main entry point for the menu-driven text buffer.

use std::path::PathBuf;
use std::process;

use buffer_console::{logging, ConsoleConfig, DocumentIo, FsDocumentIo, Session};
use buffer_core::TextBuffer;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "textbuf", version, about = "Menu-driven text buffer with undo/redo", long_about = None)]
struct Cli {
    /// File to load before the first prompt
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Initial buffer capacity (overrides the config file)
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,

    /// Do not print the menu before each prompt
    #[arg(long)]
    no_menu: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => ConsoleConfig::default(),
    };
    if let Some(capacity) = cli.capacity {
        config.initial_capacity = capacity;
    }
    if cli.no_menu {
        config.show_menu = false;
    }

    if let Err(e) = logging::init_global(&config.log_filter, cli.log_file.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        process::exit(1);
    }
    info!(?config, "starting");

    let mut buffer = TextBuffer::with_capacity(config.initial_capacity);
    let mut documents = FsDocumentIo::new();
    if let Some(path) = &cli.file {
        match documents.load(path) {
            Ok(content) => buffer.load_raw(content),
            Err(e) => {
                eprintln!("Failed to load from {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session =
        Session::new(buffer, stdin.lock(), stdout.lock(), documents).with_menu(config.show_menu);

    if let Err(e) = session.run() {
        eprintln!("Session error: {}", e);
        process::exit(1);
    }
}
