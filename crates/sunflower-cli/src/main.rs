//! sunflower - CLI for phyllotaxis and shape dot patterns
//!
//! Usage:
//!   sunflower render [config] [options]   Generate and export a pattern
//!   sunflower dots [config] [options]     Dump the dots as JSON
//!   sunflower info [config] [options]     One-line summary
//!   sunflower autofit [options]           Spacing that fills the canvas
//!   sunflower patterns                    List available patterns
//!   sunflower preset <action> ...         Manage stored presets

use std::env;
use std::process;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use sunflower::PatternType;

mod cli;

use cli::{cmd_autofit, cmd_dots, cmd_info, cmd_preset, cmd_render, print_example};

fn main() {
    // Logs go to stderr so stdout stays clean for `-o -`, dots and info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    let Some(command) = args.get(1) else {
        print_usage();
        process::exit(1);
    };
    let rest = &args[2..];

    let result: Result<()> = match command.as_str() {
        "render" => cmd_render(rest),
        "dots" => cmd_dots(rest),
        "info" => cmd_info(rest),
        "autofit" => cmd_autofit(rest),
        "preset" => cmd_preset(rest),
        "patterns" => {
            cmd_patterns();
            Ok(())
        }
        "example" => {
            print_example();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            Err(anyhow!("Unknown command: '{other}'"))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("sunflower - phyllotaxis and shape dot patterns for fabrication");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  sunflower render [config.yaml|.json] [options] [-o out]");
    eprintln!("  sunflower dots [config] [options]");
    eprintln!("  sunflower info [config] [options]");
    eprintln!("  sunflower autofit [config] [options]");
    eprintln!("  sunflower patterns");
    eprintln!("  sunflower preset list|save <name>|show <name>|delete <name> [--store file]");
    eprintln!("  sunflower example");
    eprintln!();
    eprintln!("Run 'sunflower <command> --help' for the options of a command.");
    eprintln!();
    eprintln!("Logging:");
    eprintln!("  RUST_LOG=debug sunflower render ...   Show generation details");
}

fn cmd_patterns() {
    println!("Available patterns:");
    for pattern in PatternType::all() {
        println!("  {:<16} {}", pattern.name(), pattern.description());
    }
}
