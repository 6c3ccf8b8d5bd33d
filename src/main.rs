// SPDX-License-Identifier: MPL-2.0
use seekwise::config;
use seekwise::infrastructure::{SeekUnit, SimulatedEngine};
use seekwise::paths;
use seekwise::video_player::{spawn_player, MediaItem, PlaybackController, SeekOutcome, Tuning};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
seekwise: calibrate a media engine's seek unit and perform a verified seek

USAGE:
  seekwise <FILE> [OPTIONS]

OPTIONS:
  --engine <seconds|fraction|opaque>  Seek unit of the simulated engine [default: seconds]
  --duration <SECS>                   Duration the engine reports [default: 120]
  --seek <SECS>                       Verified seek target after calibration
  --config-dir <DIR>                  Directory holding settings.toml
  -h, --help                          Print this help
";

struct Args {
    file: PathBuf,
    engine: SeekUnit,
    duration: f64,
    seek: Option<f64>,
    config_dir: Option<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let engine = args
        .opt_value_from_str("--engine")?
        .unwrap_or(SeekUnit::Seconds);
    let duration = args.opt_value_from_str("--duration")?.unwrap_or(120.0);
    let seek = args.opt_value_from_str("--seek")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let file = args.free_from_str()?;
    Ok(Some(Args {
        file,
        engine,
        duration,
        seek,
        config_dir,
    }))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seekwise=info")),
        )
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_override(args.config_dir);
    let (config, warning) = config::load();
    if let Some(warning) = warning {
        warn!("{warning}");
    }
    let tuning = Tuning::from_config(&config);

    let engine = SimulatedEngine::new(args.engine, args.duration);
    let controller = PlaybackController::new(engine.clone(), tuning.clone());
    let (handle, task) = spawn_player(controller);
    let mut views = handle.subscribe();

    handle.load(MediaItem::new(&args.file));
    tokio::time::sleep(tuning.calibration_delay + tuning.settle_delay * 2).await;

    let view = handle.view();
    if let Some(notice) = view.notice {
        error!(key = notice.key, "{}", notice.message);
        handle.shutdown();
        let _ = task.await;
        return ExitCode::FAILURE;
    }
    info!(mode = %view.seek_mode, duration = args.duration, "calibration finished");

    if let Some(target) = args.seek {
        let _ = views.borrow_and_update();
        handle.seek(target);
        let report = loop {
            if views.changed().await.is_err() {
                break None;
            }
            let view = views.borrow_and_update().clone();
            if !view.seeking {
                break view.last_seek;
            }
        };
        match report {
            Some(report) => match report.outcome {
                SeekOutcome::Verified(strategy) => info!(
                    target = report.target,
                    position = report.position,
                    strategy = strategy.name(),
                    "seek verified"
                ),
                SeekOutcome::Exhausted => warn!(
                    target = report.target,
                    position = report.position,
                    "seek could not be verified"
                ),
            },
            None => warn!("player stopped before the seek finished"),
        }
    }

    handle.shutdown();
    let _ = task.await;
    ExitCode::SUCCESS
}
