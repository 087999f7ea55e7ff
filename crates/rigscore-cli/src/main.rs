//! rigscore — resolve noisy CPU/GPU model strings to catalog scores.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

mod commands;

fn print_help() {
    println!("rigscore — hardware identifier resolution");
    println!();
    println!("Usage: rigscore <command>");
    println!();
    println!("Commands:");
    println!("  match <cpu-catalog> <gpu-catalog> <rows>   Resolve rows, print JSON");
    println!("  simplify <cpu|gpu> <text>                  Print the series key");
    println!("  help                                       Show this help message");
    println!();
    println!("Catalogs are JSON arrays of {{\"model\", \"score\"}} records; rows are");
    println!("JSON arrays of {{\"cpu\", \"gpu\"}} objects.");
    println!("Config: $RIGSCORE_CONFIG (default rigscore.json) and RIGSCORE_* overrides.");
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("match") => {
            if args.len() < 5 {
                eprintln!("Usage: rigscore match <cpu-catalog> <gpu-catalog> <rows>");
                std::process::exit(1);
            }
            let config = commands::load_config()?;
            let output = commands::run_match(
                &PathBuf::from(&args[2]),
                &PathBuf::from(&args[3]),
                &PathBuf::from(&args[4]),
                &config,
            )?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Some("simplify") => {
            if args.len() < 4 {
                eprintln!("Usage: rigscore simplify <cpu|gpu> <text>");
                std::process::exit(1);
            }
            let text = args[3..].join(" ");
            println!("{}", commands::run_simplify(&args[2], &text)?);
        }
        Some("--help") | Some("-h") | Some("help") | None => print_help(),
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'rigscore help' for usage.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}
