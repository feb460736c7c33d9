//! Masking and encryption of sensitive field values.
//!
//! Encrypted values are base64 of `[version][12-byte nonce][ciphertext + tag]`
//! under AES-256-GCM. The cipher key is the SHA-256 digest of the configured
//! secret. Every encryption uses a fresh random nonce.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use formpilot_protocols::{MaskType, SensitiveError, SensitiveFieldConfig};

const FORMAT_VERSION: u8 = 1;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("valid card regex"));

static SSN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$").expect("valid ssn regex"));

/// AES-256-GCM cipher keyed from a secret string.
#[derive(Zeroize, ZeroizeOnDrop)]
struct FieldCipher {
    key: [u8; 32],
}

impl FieldCipher {
    fn from_secret(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, SensitiveError> {
        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| SensitiveError::EncryptionFailed)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| SensitiveError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
        out.push(FORMAT_VERSION);
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SensitiveError> {
        if data.len() < 1 + NONCE_LEN + TAG_LEN {
            return Err(SensitiveError::InvalidCiphertext(format!(
                "{} bytes is too short",
                data.len()
            )));
        }
        if data[0] != FORMAT_VERSION {
            return Err(SensitiveError::InvalidCiphertext(format!(
                "unsupported version: {}",
                data[0]
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|_| SensitiveError::InvalidCiphertext("bad key".to_string()))?;
        let (nonce, ciphertext) = data[1..].split_at(NONCE_LEN);

        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| SensitiveError::InvalidCiphertext("authentication failed".to_string()))
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Masked and encrypted renditions of one sensitive value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProtectedValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<String>,
}

impl ProtectedValue {
    /// Encrypted form when available, else masked, else `raw`.
    pub fn preferred<'a>(&'a self, raw: &'a str) -> &'a str {
        self.encrypted
            .as_deref()
            .or(self.masked.as_deref())
            .unwrap_or(raw)
    }
}

/// Masks values and, when a secret is configured, encrypts and decrypts them.
#[derive(Debug, Default)]
pub struct SensitiveDataProcessor {
    cipher: Option<FieldCipher>,
}

impl SensitiveDataProcessor {
    /// Create a processor. An absent or empty secret disables encryption.
    pub fn new(secret: Option<&str>) -> Self {
        let cipher = secret
            .filter(|s| !s.is_empty())
            .map(FieldCipher::from_secret);
        if cipher.is_none() {
            debug!("No encryption secret configured, encryption disabled");
        }
        Self { cipher }
    }

    /// Whether encryption is available.
    pub fn has_key(&self) -> bool {
        self.cipher.is_some()
    }

    /// Mask a value. Lengths are counted in characters.
    pub fn mask(value: &str, mask_type: MaskType, mask_char: char, visible_chars: usize) -> String {
        match mask_type {
            MaskType::Full => full_mask(value, mask_char),
            MaskType::Partial => partial_mask(value, mask_char, visible_chars),
            MaskType::Custom => custom_mask(value, mask_char),
        }
    }

    pub fn encrypt(&self, value: &str) -> Result<String, SensitiveError> {
        let cipher = self.cipher.as_ref().ok_or(SensitiveError::NoKey)?;
        let bytes = cipher.encrypt(value.as_bytes())?;
        Ok(STANDARD.encode(bytes))
    }

    pub fn decrypt(&self, cipher_text: &str) -> Result<String, SensitiveError> {
        let cipher = self.cipher.as_ref().ok_or(SensitiveError::NoKey)?;
        let bytes = STANDARD
            .decode(cipher_text.trim())
            .map_err(|e| SensitiveError::InvalidCiphertext(e.to_string()))?;
        let plaintext = cipher.decrypt(&bytes)?;
        String::from_utf8(plaintext)
            .map_err(|_| SensitiveError::InvalidCiphertext("plaintext is not UTF-8".to_string()))
    }

    /// Apply a field's masking and encryption settings to its value.
    /// Encryption problems are logged and leave `encrypted` unset.
    pub fn protect(&self, name: &str, value: &str, config: &SensitiveFieldConfig) -> ProtectedValue {
        let masked = config
            .mask
            .then(|| Self::mask(value, config.mask_type, config.mask_char, config.visible_chars));

        let encrypted = if config.encrypt {
            match self.encrypt(value) {
                Ok(encrypted) => Some(encrypted),
                Err(e) => {
                    warn!("Could not encrypt '{}': {}", name, e);
                    None
                }
            }
        } else {
            None
        };

        debug!(
            "Protected '{}' (masked: {}, encrypted: {})",
            name,
            masked.as_deref().unwrap_or("-"),
            encrypted.is_some()
        );
        ProtectedValue { masked, encrypted }
    }

    /// Replace every configured field in `data` with its protected form.
    /// Fields without configuration pass through unchanged.
    pub fn protect_all(
        &self,
        data: &BTreeMap<String, String>,
        config: &BTreeMap<String, SensitiveFieldConfig>,
    ) -> BTreeMap<String, String> {
        data.iter()
            .map(|(name, value)| {
                let out = match config.get(name) {
                    Some(cfg) => self.protect(name, value, cfg).preferred(value).to_string(),
                    None => value.clone(),
                };
                (name.clone(), out)
            })
            .collect()
    }
}

fn full_mask(value: &str, mask_char: char) -> String {
    repeat(mask_char, value.chars().count())
}

fn partial_mask(value: &str, mask_char: char, visible: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if visible >= chars.len().div_ceil(2) {
        return full_mask(value, mask_char);
    }
    let head: String = chars[..visible].iter().collect();
    let tail: String = chars[chars.len() - visible..].iter().collect();
    format!("{}{}{}", head, repeat(mask_char, chars.len() - 2 * visible), tail)
}

fn custom_mask(value: &str, mask_char: char) -> String {
    if CARD_NUMBER.is_match(value) {
        return format!("{}{}{}", &value[..4], repeat(mask_char, 8), &value[12..]);
    }
    if SSN.is_match(value) {
        let stars = |n| repeat(mask_char, n);
        return format!("{}-{}-{}", stars(3), stars(2), &value[7..]);
    }
    if let Some((local, domain)) = value.split_once('@') {
        let chars: Vec<char> = local.chars().collect();
        // Too short to keep both ends visible.
        if chars.len() <= 2 {
            return format!("{}@{}", full_mask(local, mask_char), domain);
        }
        return format!(
            "{}{}{}@{}",
            chars[0],
            repeat(mask_char, chars.len() - 2),
            chars[chars.len() - 1],
            domain
        );
    }
    full_mask(value, mask_char)
}

fn repeat(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

#[cfg(test)]
#[path = "sensitive_tests.rs"]
mod tests;
