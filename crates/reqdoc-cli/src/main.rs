mod app;
mod export;
mod ui;

use std::fs::File;
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqdoc_config::Config;
use reqdoc_engine::{BlockModel, PluginRegistry, export::format_nodes, io};

use crate::app::{App, Flow, seed_model};

/// Build a requirements document from text and use-case blocks, and export it as DOCX
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON block list to start from instead of the sample document
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the .docx (defaults to output_dir/file_name from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export once and exit without opening the editor
    #[arg(long)]
    export: bool,

    /// Print the assembled document outline and exit
    #[arg(long, conflicts_with = "export")]
    dump: bool,

    /// Config file to use instead of ~/.config/reqdoc/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config to the config path and exit
    #[arg(long, conflicts_with_all = ["export", "dump"])]
    write_config: bool,

    /// Write logs to this file; without it the editor only logs in headless modes
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>, interactive: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Info);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr output would tear the alternate screen
        None if interactive => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }

    builder.init();
    Ok(())
}

fn load_model(input: Option<&PathBuf>) -> Result<BlockModel> {
    let Some(path) = input else {
        return Ok(seed_model()?);
    };

    let blocks = io::read_blocks(path)
        .with_context(|| format!("Failed to read blocks from {}", path.display()))?;
    let model = BlockModel::from_blocks(Arc::new(PluginRegistry::with_defaults()), blocks)
        .with_context(|| format!("Invalid block list in {}", path.display()))?;
    log::info!("Loaded {} blocks from {}", model.len(), path.display());
    Ok(model)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = !cli.export && !cli.dump && !cli.write_config;
    init_logging(cli.log_file.as_ref(), interactive)?;

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::info!("Config path: {}", config_path.display());
    let config = Config::load_or_default(&config_path)?;

    if cli.write_config {
        config.save_to_path(&config_path)?;
        println!("Wrote config to {}", config_path.display());
        return Ok(());
    }

    let model = load_model(cli.input.as_ref())?;
    let output = cli.output.unwrap_or_else(|| config.output_path());

    if cli.dump {
        let document = export::assemble(&model, &config.title);
        let nodes: Vec<_> = document.nodes().cloned().collect();
        print!("{}", format_nodes(&nodes));
        return Ok(());
    }

    if cli.export {
        let size = export::export_to(&model, &config.title, &output)?;
        println!("Wrote {} bytes to {}", size, output.display());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(model, config, output);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.on_key(key) == Flow::Quit
        {
            return Ok(());
        }
    }
}
