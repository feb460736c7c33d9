//! Sensitive-field handling configuration.

use serde::{Deserialize, Serialize};

/// How a sensitive value is masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskType {
    #[default]
    Full,
    Partial,
    Custom,
}

/// Per-field sensitive-data configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveFieldConfig {
    #[serde(default = "default_true")]
    pub mask: bool,
    #[serde(default)]
    pub encrypt: bool,
    #[serde(default)]
    pub mask_type: MaskType,
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
    #[serde(default = "default_visible_chars")]
    pub visible_chars: usize,
}

impl Default for SensitiveFieldConfig {
    fn default() -> Self {
        Self {
            mask: true,
            encrypt: false,
            mask_type: MaskType::Full,
            mask_char: default_mask_char(),
            visible_chars: default_visible_chars(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_mask_char() -> char {
    '*'
}

fn default_visible_chars() -> usize {
    4
}
