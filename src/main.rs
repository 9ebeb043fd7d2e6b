//! Scripted blockfit runner (default binary).
//!
//! Reads line-delimited JSON commands from a file or stdin and writes one
//! JSON response per command to stdout. Logs go to stderr.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfit::engine::GameConfig;
use blockfit::script::Runner;
use blockfit::types::GameMode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliArgs {
    script: Option<String>,
    mode: Option<GameMode>,
    seed: Option<u32>,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--script" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --script"))?;
                out.script = Some(v.clone());
            }
            "--mode" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --mode"))?;
                let mode =
                    GameMode::from_str(v).ok_or_else(|| anyhow!("unknown --mode value: {}", v))?;
                out.mode = Some(mode);
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                out.seed = Some(seed);
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(out)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let mut config = GameConfig::from_env();
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let mut runner = Runner::new(config)?;
    let stdout = io::stdout();
    let summary = match cli.script.as_deref() {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
            runner.run(BufReader::new(file), stdout.lock())?
        }
        None => runner.run(io::stdin().lock(), stdout.lock())?,
    };

    let game = runner.game();
    info!(
        commands = summary.commands,
        errors = summary.errors,
        score = game.score(),
        moves = game.moves(),
        "script finished"
    );
    Ok(())
}
