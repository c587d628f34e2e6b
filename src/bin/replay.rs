// Standalone replay tool for re-running logged move decisions
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate <T:M,...>   Check logged moves against expectations
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use pathfinder_snake::config::Config;
use pathfinder_snake::replay::ReplayEngine;
use pathfinder_snake::types::Direction;

enum Mode {
    All,
    Turns(Vec<u32>),
    Validate(Vec<(u32, Vec<Direction>)>),
}

struct Options {
    log_file: String,
    config_path: String,
    verbose: bool,
    mode: Mode,
}

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate logged moves (format: turn:move|move,...)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay battlesnake_debug.jsonl --all --verbose");
    eprintln!("  replay battlesnake_debug.jsonl --turns 5,10,15");
    eprintln!("  replay battlesnake_debug.jsonl --validate 5:up,10:left|right");
}

fn parse_turns(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(u32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'turn:move'", pair))?;

            let turn = turn
                .parse::<u32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;

            // Several acceptable moves are separated by '|'
            let moves = moves
                .split('|')
                .map(str::parse::<Direction>)
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut rest = args.iter().skip(1);
    let log_file = rest.next().ok_or("Missing log file")?.clone();

    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    while let Some(arg) = rest.next() {
        let mut value = |name: &str| {
            rest.next()
                .cloned()
                .ok_or_else(|| format!("{} requires an argument", name))
        };

        match arg.as_str() {
            "--all" => mode = Some(Mode::All),
            "--turns" => mode = Some(Mode::Turns(parse_turns(&value("--turns")?)?)),
            "--validate" => {
                mode = Some(Mode::Validate(parse_expected_moves(&value("--validate")?)?))
            }
            "--config" => config_path = value("--config")?,
            "--verbose" => verbose = true,
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    Ok(Options {
        log_file,
        config_path,
        verbose,
        mode: mode.ok_or("Must specify --all, --turns, or --validate")?,
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(0);
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let config = Config::from_file(&options.config_path).unwrap_or_else(|e| {
        eprintln!(
            "Warning: Could not load config from '{}': {}",
            options.config_path, e
        );
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, options.verbose);

    let entries = match engine.load_log_file(&options.log_file) {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => {
            eprintln!("Error: Log file is empty");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    println!("Loaded {} log entries from {}\n", entries.len(), options.log_file);

    let results = match options.mode {
        Mode::All => engine.replay_all(&entries),
        Mode::Turns(turns) => match engine.replay_turns(&entries, &turns) {
            Ok(results) => results,
            Err(e) => {
                eprintln!("Error during replay: {}", e);
                process::exit(1);
            }
        },
        Mode::Validate(expected) => {
            match engine.validate_expected_moves(&entries, &expected) {
                Ok(()) => println!("✓ All {} expected move(s) validated", expected.len()),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
            return;
        }
    };

    engine.print_report(&results);
    if results.iter().any(|r| r.is_mismatch()) {
        process::exit(2);
    }
}
