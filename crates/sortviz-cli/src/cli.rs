use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sortviz_core::{Algorithm, AlgorithmInfo, Trace};
use tracing::info;

use crate::error::{CliError, Result};
use crate::logging;
use crate::render::{DEFAULT_BAR_HEIGHT, RenderOptions, legend, render_bars, step_header};
use crate::source::ArrayArgs;
use crate::terminal::run_interactive;

#[derive(Debug, Parser)]
#[command(
    name = "sortviz",
    about = "Step through bubble sort and merge sort in the terminal",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every step of a sorting run.
    Trace(TraceArgs),

    /// Interactive player with auto-play.
    Play(PlayArgs),

    /// Print the algorithm catalog.
    Info(InfoArgs),
}

#[derive(Debug, Clone, Args)]
pub struct TraceArgs {
    #[command(flatten)]
    pub array: ArrayArgs,

    /// Emit the trace as JSON instead of bar charts.
    #[arg(long)]
    pub json: bool,

    /// Rows for the tallest bar.
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Color bars by state.
    #[arg(long)]
    pub color: bool,

    /// Print only the final step.
    #[arg(long)]
    pub last: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub array: ArrayArgs,

    /// Rows for the tallest bar; shrinks to fit the terminal.
    #[arg(long, default_value_t = DEFAULT_BAR_HEIGHT)]
    pub height: usize,

    /// Glyphs instead of colors.
    #[arg(long)]
    pub no_color: bool,

    /// Write the session's event log as JSONL on exit.
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct InfoArgs {
    /// Only this algorithm.
    #[arg(long, short = 'a')]
    pub algorithm: Option<Algorithm>,

    #[arg(long)]
    pub json: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Trace(args) => run_trace(&args, &mut io::stdout().lock()),
        Commands::Play(args) => run_play(&args),
        Commands::Info(args) => run_info(&args, &mut io::stdout().lock()),
    }
}

#[derive(Serialize)]
struct TraceReport<'a> {
    algorithm: Algorithm,
    info: &'a AlgorithmInfo,
    input: Vec<i64>,
    steps: &'a Trace,
}

pub fn run_trace(args: &TraceArgs, out: &mut impl Write) -> Result<()> {
    if args.height == 0 {
        return Err(CliError::invalid("--height must be at least 1"));
    }
    let config = args.array.resolve()?;
    let input = config.input_elements();
    let trace = config.algorithm.trace(&input);
    info!(
        algorithm = config.algorithm.key(),
        elements = input.len(),
        steps = trace.len(),
        "trace"
    );

    if args.json {
        let report = TraceReport {
            algorithm: config.algorithm,
            info: config.algorithm.info(),
            input: input.iter().map(|el| el.value()).collect(),
            steps: &trace,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let options = RenderOptions {
        height: args.height,
        color: args.color,
    };
    let values: Vec<String> = input.iter().map(|el| el.value().to_string()).collect();
    writeln!(
        out,
        "{} on [{}]: {} steps",
        config.algorithm,
        values.join(", "),
        trace.len()
    )?;
    writeln!(out, "{}", legend(args.color))?;

    let skip = if args.last { trace.len().saturating_sub(1) } else { 0 };
    for (index, step) in trace.iter().enumerate().skip(skip) {
        writeln!(out)?;
        writeln!(out, "{}", step_header(index, trace.len(), step))?;
        for line in render_bars(step, options) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn run_play(args: &PlayArgs) -> Result<()> {
    let config = args.array.resolve()?;
    let options = RenderOptions {
        height: args.height.max(1),
        color: !args.no_color,
    };
    let player = run_interactive(config, options)?;

    if let Some(path) = &args.diagnostics {
        let mut file = BufWriter::new(File::create(path)?);
        player.diagnostic_log().write_jsonl(&mut file)?;
        file.flush()?;
        info!(path = %path.display(), entries = player.diagnostic_log().len(), "diagnostics written");
    }
    Ok(())
}

pub fn run_info(args: &InfoArgs, out: &mut impl Write) -> Result<()> {
    let selected: Vec<Algorithm> = match args.algorithm {
        Some(algorithm) => vec![algorithm],
        None => Algorithm::ALL.to_vec(),
    };

    if args.json {
        let infos: Vec<&AlgorithmInfo> = selected.iter().map(|a| a.info()).collect();
        serde_json::to_writer_pretty(&mut *out, &infos)?;
        writeln!(out)?;
        return Ok(());
    }

    for (i, algorithm) in selected.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let info = algorithm.info();
        writeln!(out, "{} ({})", info.name, algorithm.key())?;
        writeln!(out, "  Time Complexity:  {}", info.time_complexity)?;
        writeln!(out, "  Space Complexity: {}", info.space_complexity)?;
        writeln!(out, "  {}", info.description)?;
    }
    Ok(())
}
