//! `check` command: one pass over a page snapshot.

use std::path::Path;

use tracing::info;

use formpilot_config::Config;
use formpilot_core::FormEngine;
use formpilot_page_snapshot::SnapshotPage;

/// Run a pass against the snapshot at `page_path` and print the JSON report.
pub(crate) fn handle_check(
    config: &Config,
    page_path: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = SnapshotPage::load(page_path)?;
    let mut engine = FormEngine::from_config(config);

    // No solver is wired into the CLI; a configured CAPTCHA is reported
    // as unsolved.
    let report = engine.run_pass(&page, None)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(path) = output {
        page.save(path)?;
        info!("Wrote page state to {}", path.display());
    }

    Ok(())
}
