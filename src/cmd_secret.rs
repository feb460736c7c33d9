//! `mask`, `encrypt` and `decrypt` commands.

use formpilot_config::Config;
use formpilot_core::SensitiveDataProcessor;
use formpilot_protocols::{FormError, MaskType};

pub(crate) fn handle_mask(
    value: &str,
    mask_type: MaskType,
    mask_char: char,
    visible_chars: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{}",
        SensitiveDataProcessor::mask(value, mask_type, mask_char, visible_chars)
    );
    Ok(())
}

pub(crate) fn handle_encrypt(config: &Config, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let processor = processor(config);
    let encrypted = processor.encrypt(value).map_err(FormError::from)?;
    println!("{}", encrypted);
    Ok(())
}

pub(crate) fn handle_decrypt(
    config: &Config,
    ciphertext: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let processor = processor(config);
    let plaintext = processor.decrypt(ciphertext).map_err(FormError::from)?;
    println!("{}", plaintext);
    Ok(())
}

fn processor(config: &Config) -> SensitiveDataProcessor {
    let secret = config.sensitive.resolve_secret();
    SensitiveDataProcessor::new(secret.as_deref())
}
