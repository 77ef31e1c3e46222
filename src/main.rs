use anyhow::Context;
use clap::{Parser, Subcommand};
use penstream::{default_config_path, init_logging, list_ports, Config, PlotRunner, RunRequest};
use std::io::Read;
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "penstream",
    version,
    long_version = LONG_VERSION,
    about = "Stream GRBL and G-code commands to serial pen plotters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the serial endpoints a discovery scan would probe
    Ports,
    /// Save a command list as G-code and stream it to the plotter
    Plot {
        /// Text identifying the plotter in its $I response
        /// (e.g. "DrawCore" for iDraw, "DRAWBOT" for DrawBot)
        #[arg(short, long)]
        identifier: Option<String>,

        /// Directory where G-code files are saved
        #[arg(long)]
        gcode_dir: Option<PathBuf>,

        /// Interpreter executable that runs the streaming engine
        #[arg(long)]
        interpreter: Option<PathBuf>,

        /// Configuration file supplying defaults for the flags above
        #[arg(long)]
        config: Option<PathBuf>,

        /// Command list file, one GRBL/G-code command per line ("-" reads stdin)
        commands: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Ports => ports(),
        Commands::Plot {
            identifier,
            gcode_dir,
            interpreter,
            config,
            commands,
        } => plot(identifier, gcode_dir, interpreter, config, &commands),
    }
}

fn ports() -> anyhow::Result<()> {
    let ports = list_ports().context("Failed to enumerate serial ports")?;
    if ports.is_empty() {
        println!("No serial endpoints found.");
        return Ok(());
    }

    for port in ports {
        match port.manufacturer {
            Some(mfg) => println!("{}  {} ({})", port.port_name, port.description, mfg),
            None => println!("{}  {}", port.port_name, port.description),
        }
    }
    Ok(())
}

fn plot(
    identifier: Option<String>,
    gcode_dir: Option<PathBuf>,
    interpreter: Option<PathBuf>,
    config_path: Option<PathBuf>,
    commands_file: &Path,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let request = RunRequest::new(
        identifier.unwrap_or(config.plotter.identifier),
        read_commands(commands_file)?,
        gcode_dir.unwrap_or(config.files.output_directory),
        interpreter.unwrap_or(config.interpreter.path),
    );

    let mut runner = PlotRunner::new();
    let status = runner.activate(&request)?;
    println!("{status}");
    Ok(())
}

/// Explicit config file, else the platform default if it exists, else
/// built-in defaults.
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => match default_config_path() {
            Ok(path) if path.exists() => Config::load_from_file(&path)
                .with_context(|| format!("Failed to load {}", path.display())),
            _ => Ok(Config::default()),
        },
    }
}

/// Read command lines verbatim; no trimming, no filtering.
fn read_commands(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read commands from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    Ok(text.lines().map(str::to_string).collect())
}
