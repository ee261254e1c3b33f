use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use yamlui::core::callbacks::CallbackRegistry;
use yamlui::core::command::ShellRunner;
use yamlui::core::config;
use yamlui::core::document::Document;
use yamlui::tui;

#[derive(Parser)]
#[command(name = "yamlui", about = "Declarative YAML menu and page interface")]
struct Args {
    /// YAML interface document to open
    file: PathBuf,

    /// Shell used to run the document's commands
    #[arg(long)]
    shell: Option<String>,

    /// Log level: error, warn, info, debug, trace, off
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("yamlui: config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&file_config, args.shell.as_deref(), args.log_level.as_deref());

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    log::info!("yamlui starting with {}", args.file.display());

    let doc = match Document::load(&args.file) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("yamlui: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tui::ensure_terminal_size() {
        eprintln!("yamlui: {e}");
        return ExitCode::FAILURE;
    }

    // Built-in builds ship no callbacks; embedders register theirs here.
    let registry = CallbackRegistry::new();
    let runner = ShellRunner::new(resolved.shell);

    let mut terminal = ratatui::init();
    let result = tui::run(&mut terminal, &doc, &registry, &runner);
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("yamlui: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
