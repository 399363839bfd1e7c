//! Collage CLI - build and inspect collages from the command line.
//!
//! Scripts of JSON commands drive the same executor the editor uses, so a
//! session can be replayed headless.

mod resolver;

use anyhow::{Context, Result};
use api::{execute_command, execute_query, Command, Query, Workspace};
use clap::{Parser, Subcommand};
use collage::import::{import_images, ImportContext};
use collage::layout::PRESETS;
use collage::{AutoLayout, CanvasSettings, CanvasSettingsUpdate, Item, ItemContent};
use resolver::ImageFileResolver;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Collage CLI - lay out images and replay editing scripts
#[derive(Parser)]
#[command(name = "collage")]
#[command(about = "Command-line interface for the collage editor")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script of JSON commands (a JSON array, or one per line)
    Run {
        /// Script file; reads stdin when omitted
        script: Option<PathBuf>,

        /// Canvas settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Import image files and print their laid-out placements
    Layout {
        /// Image files to place
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Layout engine
        #[arg(short, long, default_value_t = AutoLayout::Grid)]
        mode: AutoLayout,

        #[arg(long)]
        width: Option<f32>,

        #[arg(long)]
        height: Option<f32>,

        #[arg(long)]
        padding: Option<f32>,

        /// Canvas settings JSON file; flags override it
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Start an interactive session
    Repl {
        /// Canvas settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// List canvas size presets
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { script, settings } => smol::block_on(run_script(script, settings)),
        Commands::Layout {
            images,
            mode,
            width,
            height,
            padding,
            settings,
        } => {
            let overrides = CanvasSettingsUpdate {
                width,
                height,
                padding,
                ..Default::default()
            };
            smol::block_on(layout_images(images, mode, overrides, settings))
        }
        Commands::Repl { settings } => {
            let settings = smol::block_on(load_settings(settings.as_deref()))?;
            repl(Workspace::with_settings(settings)?)
        }
        Commands::Presets => {
            list_presets();
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` flags pick the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Load canvas settings from a JSON file, or use the defaults.
async fn load_settings(path: Option<&Path>) -> Result<CanvasSettings> {
    let Some(path) = path else {
        return Ok(CanvasSettings::default());
    };

    let json = smol::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: CanvasSettings = serde_json::from_str(&json)
        .with_context(|| format!("Invalid settings JSON in {}", path.display()))?;
    settings.validate()?;
    log::info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Parse a script: either one JSON array, or one command per line.
fn parse_script(text: &str) -> Result<Vec<Command>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Invalid command array");
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid command on line {}", index + 1))
        })
        .collect()
}

async fn run_script(script: Option<PathBuf>, settings: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(settings.as_deref()).await?;
    let text = match &script {
        Some(path) => smol::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            text
        }
    };

    let commands = parse_script(&text)?;
    log::info!("running {} command(s)", commands.len());

    let mut workspace = Workspace::with_settings(settings)?;
    for command in commands {
        let result = execute_command(&mut workspace, command);
        println!("{}", serde_json::to_string(&result)?);
    }

    println!("{}", serde_json::to_string_pretty(workspace.store.items())?);
    Ok(())
}

async fn layout_images(
    images: Vec<PathBuf>,
    mode: AutoLayout,
    overrides: CanvasSettingsUpdate,
    settings: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(settings.as_deref()).await?.merged(&overrides);
    let mut workspace = Workspace::with_settings(settings)?;

    let sources: Vec<String> = images
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    let import = import_images(
        &ImageFileResolver,
        &sources,
        ImportContext::for_store(&workspace.store, None),
    )
    .await?;
    import.apply(&mut workspace.store);
    workspace.store.apply_layout(mode);

    let placements: Vec<_> = workspace
        .store
        .items()
        .iter()
        .map(|item| {
            let rendered = item.rendered_bounds();
            serde_json::json!({
                "src": source_of(item),
                "x": rendered.origin.x(),
                "y": rendered.origin.y(),
                "width": rendered.size.width(),
                "height": rendered.size.height(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&placements)?);
    Ok(())
}

fn source_of(item: &Item) -> Option<&str> {
    match &item.content {
        ItemContent::Image { src, .. } | ItemContent::Sticker { src } => Some(src.as_str()),
        ItemContent::Text { .. } => None,
    }
}

fn list_presets() {
    println!("Canvas presets:");
    for preset in PRESETS {
        println!("  {:<18} {} x {}", preset.name, preset.width, preset.height);
    }
    let layouts: Vec<String> = AutoLayout::iter().map(|layout| layout.to_string()).collect();
    println!();
    println!("Layouts: {}", layouts.join(", "));
}

/// Interactive session on a fresh workspace.
fn repl(mut workspace: Workspace) -> Result<()> {
    println!("Enter commands or queries (JSON), or 'help' for usage. Ctrl+D to exit.\n");
    let stdin = std::io::stdin();

    loop {
        print!("collage> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "help" | "?" => print_help(),
            "quit" | "exit" => break,
            "items" => print_json(&execute_query(&workspace, Query::GetItems))?,
            "history" => print_json(&execute_query(&workspace, Query::GetHistory))?,
            "undo" => print_json(&execute_command(&mut workspace, Command::Undo))?,
            "redo" => print_json(&execute_command(&mut workspace, Command::Redo))?,
            _ => {
                if let Ok(command) = serde_json::from_str::<Command>(input) {
                    print_json(&execute_command(&mut workspace, command))?;
                } else {
                    match serde_json::from_str::<Query>(input) {
                        Ok(query) => print_json(&execute_query(&workspace, query))?,
                        Err(err) => println!("Not a command or query: {err}"),
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_help() {
    println!("Collage Interactive Mode");
    println!("========================");
    println!();
    println!("Built-in commands:");
    println!("  items       - Get all items");
    println!("  history     - Get undo/redo depth");
    println!("  undo, redo  - Step through history");
    println!("  help, ?     - Show this help");
    println!("  quit, exit  - Exit interactive mode");
    println!();
    println!("JSON Commands (examples):");
    println!("  {{\"type\": \"add_item\", \"item\": {{\"content\": {{\"type\": \"sticker\", \"src\": \"star\"}}, \"size\": [80, 80]}}}}");
    println!("  {{\"type\": \"apply_layout\", \"layout\": \"mosaic\"}}");
    println!("  {{\"type\": \"shuffle_layout\", \"seed\": 7}}");
    println!("  {{\"type\": \"remove_item\", \"target\": \"all\"}}");
    println!();
    println!("JSON Queries:");
    println!("  {{\"type\": \"get_items_in_paint_order\"}}");
    println!("  {{\"type\": \"get_item_at_point\", \"x\": 100, \"y\": 100}}");
    println!("  {{\"type\": \"get_canvas_settings\"}}");
}
