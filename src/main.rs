use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use inkveil::script::{self, ReplayReport};
use inkveil::{CanvasEngine, Config, util};

#[derive(Parser, Debug)]
#[command(name = "inkveil")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("INKVEIL_GIT_HASH"), ")"),
    about = "Replay annotation scripts through the overlay drawing engine"
)]
struct Cli {
    /// Command script to replay (reads stdin when omitted or "-")
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Use this config file instead of ~/.config/inkveil/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final scene as JSON instead of a text summary
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Write the documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["script", "json"])]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut engine = CanvasEngine::from_config(&config)?;

    let source = read_script(cli.script.as_ref())?;
    let commands = script::parse(&source).context("Invalid script")?;
    log::info!("Replaying {} command(s)", commands.len());

    let report = script::replay(&mut engine, &commands);

    if cli.json {
        let output = serde_json::json!({
            "executed": report.executed,
            "noops": report.noops,
            "rejected": report.rejected,
            "mode": engine.mode(),
            "scene": engine.scene(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&engine, &report);
    }

    Ok(())
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            Ok(source)
        }
    }
}

fn print_summary(engine: &CanvasEngine, report: &ReplayReport) {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let count = engine.page_count();

    for (index, page) in engine.pages().iter().enumerate() {
        let marker = if index == engine.active_page_index() {
            "*"
        } else {
            " "
        };
        let by_label = |label: &str| {
            page.elements()
                .iter()
                .filter(|element| element.kind.label() == label)
                .count()
        };
        println!(
            "{marker} page {}/{count}: {} element(s) ({} stroke, {} shape, {} image), background {}, undo {}, redo {}",
            index + 1,
            page.len(),
            by_label("stroke"),
            by_label("shape"),
            by_label("image"),
            page.background().as_str(),
            yes_no(page.history().can_undo()),
            yes_no(page.history().can_redo()),
        );
    }

    let color = engine.color();
    println!(
        "tool {}, color {} ({}), thickness {:.1}, mode {}, curtain {}",
        engine.tool(),
        util::color_to_name(&color),
        util::color_to_hex(&color),
        engine.thickness(),
        engine.mode(),
        engine.curtain().mode(),
    );
    println!(
        "{} executed, {} no-op, {} rejected",
        report.executed,
        report.noops,
        report.rejected.len()
    );
    for rejection in &report.rejected {
        println!("  rejected {rejection}");
    }
}
