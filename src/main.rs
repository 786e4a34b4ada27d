use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use easel::config::InteractionConfig;
use easel::replay::{Replay, ReplayError};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "easel", about = "Replay recorded canvas input through the interaction controller")]
struct Cli {
    /// Newline-delimited JSON trace; reads stdin when omitted.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Number of rectangles to place on the canvas before replaying.
    #[arg(long, default_value_t = 0)]
    seed: usize,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = InteractionConfig::from_env()?;
    let replay = Replay::new(config, cli.seed);
    let active = replay.controller().config();
    info!(seed = cli.seed, move_step = active.move_step, zoom_step = active.zoom_step, "replay starting");

    let mut reader: Box<dyn BufRead> = match &cli.trace {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut applied = 0_usize;
    let mut skipped = 0_usize;
    let mut line_no = 0_usize;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_no = line_no.saturating_add(1);
        match replay.apply_line(&line) {
            Ok(()) => applied = applied.saturating_add(1),
            Err(e) => {
                warn!(line = line_no, error = %e, "trace line skipped");
                skipped = skipped.saturating_add(1);
            }
        }
    }
    info!(applied, skipped, "replay complete");

    let rendered = serde_json::to_string_pretty(&replay.report())?;
    println!("{rendered}");
    Ok(())
}
