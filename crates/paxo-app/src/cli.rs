use std::path::PathBuf;

use clap::Parser;

use crate::input::ScheduledTouch;

/// Paxo: run a Lua widget script.
#[derive(Parser, Debug)]
#[command(name = "paxo", version, about)]
pub struct Args {
    /// Lua script to run.
    pub script: PathBuf,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Stop after this many frames.
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Run one dispatch cycle after the entry point, then exit.
    #[arg(long)]
    pub single_shot: bool,

    /// Touch the screen at X,Y on frame N (`X,Y@N`). Repeatable.
    #[arg(long = "touch", value_name = "X,Y@FRAME")]
    pub touches: Vec<ScheduledTouch>,
}

pub fn parse() -> Args {
    Args::parse()
}
