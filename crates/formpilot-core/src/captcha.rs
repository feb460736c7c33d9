//! CAPTCHA solution injection.

use std::collections::BTreeMap;

use tracing::{info, warn};

use formpilot_protocols::{CaptchaChallenge, CaptchaConfig, CaptchaSolver, FormError};

/// Ask `solver` for a solution and store it in `form_data` under the
/// configured response field. `form_data` is untouched on failure.
pub fn inject_solution(
    form_data: &mut BTreeMap<String, String>,
    config: &CaptchaConfig,
    solver: &dyn CaptchaSolver,
    page_url: &str,
) -> Result<(), FormError> {
    let challenge = CaptchaChallenge {
        site_key_or_image: config.site_key.clone(),
        kind: config.kind,
        page_url: page_url.to_string(),
    };

    let solution = solver.solve(&challenge).inspect_err(|e| {
        warn!("{} CAPTCHA on {} not solved: {}", config.kind.as_str(), page_url, e);
    })?;

    let field = config.response_field();
    info!("Injected {} CAPTCHA solution into '{}'", config.kind.as_str(), field);
    form_data.insert(field.to_string(), solution);
    Ok(())
}
