//! Manage the preset store: list, save, show and delete named configs.

use anyhow::{Context, Result, bail};
use tracing::info;

use sunflower::preset::DEFAULT_STORE;
use sunflower::{ConfigRecord, summary};

use super::common::{Invocation, print_pattern_options};

/// Execute the preset command.
pub fn cmd_preset(args: &[String]) -> Result<()> {
    let Some(action) = args.first() else {
        print_usage();
        bail!("Missing preset action");
    };

    let inv = Invocation::parse(&args[1..])?;
    if inv.help || matches!(action.as_str(), "-h" | "--help" | "help") {
        print_usage();
        return Ok(());
    }

    match action.as_str() {
        "list" => {
            let store = inv.open_store()?;
            if store.is_empty() {
                eprintln!("No presets in {}", store.path().display());
            }
            for name in store.names() {
                println!("{name}");
            }
        }
        "save" => {
            let name = preset_name(&inv, 2)?;
            // Anything after the name is a config file to start from.
            let config = inv.config_from(inv.positional.get(1).map(String::as_str))?;
            let mut store = inv.open_store()?;
            store.insert(name, &config)?;
            store
                .save()
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            info!(preset = name.trim(), store = %store.path().display(), "saved preset");
            eprintln!("Saved preset '{}': {}", name.trim(), summary(&config));
        }
        "show" => {
            let name = preset_name(&inv, 1)?;
            let config = inv.open_store()?.get(name)?;
            let record = ConfigRecord::from(config.clone());
            println!("{}", serde_json::to_string_pretty(&record)?);
            eprintln!("{}", summary(&config));
        }
        "delete" | "rm" => {
            let name = preset_name(&inv, 1)?;
            let mut store = inv.open_store()?;
            if !store.remove(name) {
                bail!("Preset not found: '{name}'");
            }
            store
                .save()
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            eprintln!("Deleted preset '{name}'");
        }
        other => {
            print_usage();
            bail!("Unknown preset action: '{other}'");
        }
    }

    Ok(())
}

/// The preset name (first positional), allowing at most `max` positionals.
fn preset_name(inv: &Invocation, max: usize) -> Result<&str> {
    let Some(name) = inv.positional.first() else {
        bail!("Missing preset name");
    };
    if let Some(extra) = inv.positional.get(max) {
        bail!("Unexpected argument: '{extra}'");
    }
    Ok(name)
}

fn print_usage() {
    eprintln!("sunflower preset - Manage named configurations");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sunflower preset list [--store <file>]");
    eprintln!("    sunflower preset save <name> [config.yaml] [OPTIONS] [--store <file>]");
    eprintln!("    sunflower preset show <name> [--store <file>]");
    eprintln!("    sunflower preset delete <name> [--store <file>]");
    eprintln!();
    eprintln!("The store defaults to ./{DEFAULT_STORE}. Saving an existing name replaces it.");
    eprintln!("Use a preset with: sunflower render --preset <name>");
    eprintln!();
    print_pattern_options();
}
