//! Autofill subcommand handlers.

use formpilot_config::{Config, ConfigLoader};
use formpilot_core::AutofillStore;

use crate::cli::AutofillCommand;

/// Handle autofill subcommands.
pub(crate) fn handle_autofill_command(
    config: &Config,
    action: AutofillCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = AutofillStore::open(ConfigLoader::expand_path(&config.autofill.path));

    match action {
        AutofillCommand::List { format } => autofill_list(&store, &format),
        AutofillCommand::Forget { field } => {
            if store.forget(&field)? {
                println!("Forgot '{}'", field);
            } else {
                println!("No stored value for '{}'", field);
            }
            Ok(())
        }
        AutofillCommand::Clear => {
            let count = store.entries().len();
            store.clear()?;
            println!("Cleared {} stored values from {}", count, store.path().display());
            Ok(())
        }
    }
}

fn autofill_list(store: &AutofillStore, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(store.entries())?);
        return Ok(());
    }

    if store.entries().is_empty() {
        println!("No stored values in {}", store.path().display());
        return Ok(());
    }

    println!("{:<24} {}", "FIELD", "VALUE");
    println!("{}", "-".repeat(60));
    for (field, value) in store.entries() {
        println!("{:<24} {}", field, value);
    }
    Ok(())
}
