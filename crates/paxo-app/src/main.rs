mod cli;
mod input;

use std::process::ExitCode;

use paxo_config::{DispatchMode, PaxoConfig};
use paxo_script::ScriptHost;
use tracing_subscriber::EnvFilter;

use input::ScheduledTouches;

const DEFAULT_LOG_DIRECTIVE: &str = "paxo=info";

/// Turn `--log-level debug` into `paxo=debug`; anything that already looks
/// like a filter directive is used as given.
fn log_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("paxo={level}")
    }
}

fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    let mut added = false;
    for part in directive.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse() {
            Ok(parsed) => {
                filter = filter.add_directive(parsed);
                added = true;
            }
            Err(e) => eprintln!("paxo: ignoring log directive '{part}': {e}"),
        }
    }
    if !added {
        if let Ok(default) = DEFAULT_LOG_DIRECTIVE.parse() {
            filter = filter.add_directive(default);
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(args: &cli::Args) -> PaxoConfig {
    paxo_config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        // Logging is not initialised yet.
        eprintln!("paxo: config load failed, using defaults: {e}");
        PaxoConfig::default()
    })
}

fn main() -> ExitCode {
    let args = cli::parse();
    let mut config = load_config(&args);

    let directive = match &args.log_level {
        Some(level) => log_directive(level),
        None => config.logging.level.directive(),
    };
    init_logging(&directive);

    tracing::info!("paxo v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }

    if let Some(max_frames) = args.max_frames {
        config.dispatch.max_frames = max_frames;
    }
    if args.single_shot {
        config.dispatch.mode = DispatchMode::SingleShot;
    }

    let mut host = match ScriptHost::new(&config) {
        Ok(host) => host,
        Err(e) => {
            tracing::error!("Failed to set up script host: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = host.load_script(&args.script) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    // Scheduled touches end the run on their own unless a frame budget
    // was given.
    let quit_when_done = config.dispatch.max_frames == 0;
    let mut input = ScheduledTouches::new(args.touches.clone(), quit_when_done);

    tracing::info!(script = %args.script.display(), "Running script");
    match host.run_app(&mut input) {
        Ok(summary) => {
            tracing::info!(
                frames = summary.frames,
                callbacks = summary.callbacks_fired,
                diagnostics = summary.diagnostics,
                "Shutdown complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Script failed: {e}");
            ExitCode::FAILURE
        }
    }
}
