use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chess_core::{move_to_uci, set_position_from_uci, Position};
use negamax_engine::{ConfigError, SearchConfig, SearchController};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "NEGAMAX_CONFIG";

/// `--config <path>` on the command line wins over `NEGAMAX_CONFIG`.
fn config_path() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    std::env::var_os(CONFIG_ENV).map(PathBuf::from)
}

fn load_config() -> Result<SearchConfig, ConfigError> {
    match config_path() {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading search config");
            SearchConfig::from_file(path)
        }
        None => Ok(SearchConfig::default()),
    }
}

/// Value following `key` in a token list, e.g. `movetime 500`.
fn arg_after<T: std::str::FromStr>(parts: &[&str], key: &str) -> Option<T> {
    let at = parts.iter().position(|&p| p == key)?;
    parts.get(at + 1)?.parse().ok()
}

fn set_option(controller: &mut SearchController, parts: &[&str]) {
    // setoption name <Name> value <V>
    let Some(name) = arg_after::<String>(parts, "name") else {
        return;
    };
    let Some(value) = arg_after::<u64>(parts, "value") else {
        tracing::warn!(name = %name, "setoption without a numeric value");
        return;
    };
    let depth = u8::try_from(value).unwrap_or(u8::MAX);
    let result = match name.as_str() {
        "Depth" => controller.set_depths(depth, depth),
        "MaxDepth" => {
            let base = controller.config().base_depth.min(depth);
            controller.set_depths(base, depth)
        }
        "MoveTime" => {
            controller.set_time_budget((value > 0).then(|| Duration::from_millis(value)));
            Ok(())
        }
        "Seed" => {
            controller.reseed(value);
            Ok(())
        }
        _ => {
            tracing::debug!(name = %name, "ignoring unknown option");
            Ok(())
        }
    };
    if let Err(e) = result {
        tracing::warn!(name = %name, error = %e, "rejected option");
    }
}

fn go(controller: &mut SearchController, pos: &mut Position, parts: &[&str]) -> String {
    let budget = arg_after::<u64>(parts, "movetime")
        .map(Duration::from_millis)
        .or(controller.config().time_budget());

    // `go depth N` searches exactly N plies for this move only.
    let saved = (controller.config().base_depth, controller.config().max_depth);
    let fixed = arg_after::<u8>(parts, "depth").filter(|&d| d > 0);
    if let Some(d) = fixed
        && let Err(e) = controller.set_depths(d, d)
    {
        tracing::warn!(error = %e, "ignoring go depth");
    }

    let best = controller.choose_move_within(pos, budget);

    if fixed.is_some()
        && let Err(e) = controller.set_depths(saved.0, saved.1)
    {
        tracing::warn!(error = %e, "could not restore depth range");
    }

    match best {
        Ok(mv) => {
            let stats = controller.last_stats();
            format!(
                "info depth {} score cp {} nodes {} time {}\nbestmove {}",
                stats.depth,
                stats.score.unwrap_or(0),
                stats.nodes,
                stats.elapsed.as_millis(),
                move_to_uci(mv)
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "no move found");
            "bestmove 0000".to_string()
        }
    }
}

fn main() -> ExitCode {
    // stdout carries the UCI protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid search config");
            return ExitCode::FAILURE;
        }
    };
    let mut controller = SearchController::new(config);

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut pos = Position::startpos();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                let config = controller.config();
                writeln!(stdout, "id name Negamax 0.1").ok();
                writeln!(stdout, "id author ML-chess").ok();
                writeln!(
                    stdout,
                    "option name Depth type spin default {} min 1 max 8",
                    config.max_depth
                )
                .ok();
                writeln!(
                    stdout,
                    "option name MaxDepth type spin default {} min 1 max 8",
                    config.max_depth
                )
                .ok();
                writeln!(
                    stdout,
                    "option name MoveTime type spin default {} min 0 max 600000",
                    config.time_budget_millis.unwrap_or(0)
                )
                .ok();
                writeln!(stdout, "option name Seed type spin default 0 min 0 max 2147483647").ok();
                writeln!(stdout, "uciok").ok();
                stdout.flush().ok();
            }
            "isready" => {
                writeln!(stdout, "readyok").ok();
                stdout.flush().ok();
            }
            "setoption" => set_option(&mut controller, &parts),
            "ucinewgame" => {
                pos = Position::startpos();
                controller.new_game();
            }
            "position" => {
                if let Err(e) = set_position_from_uci(&mut pos, &parts[1..]) {
                    tracing::warn!(error = %e, "bad position command");
                }
            }
            "go" => {
                let reply = go(&mut controller, &mut pos, &parts);
                writeln!(stdout, "{reply}").ok();
                stdout.flush().ok();
            }
            "quit" => break,
            _ => {
                // ignore unknown commands
            }
        }
    }
    ExitCode::SUCCESS
}
