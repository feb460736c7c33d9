//! CLI definitions for formpilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use formpilot_protocols::MaskType;

/// formpilot CLI.
#[derive(Parser)]
#[command(name = "formpilot")]
#[command(about = "Conditional form automation engine")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "formpilot.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run one pass against a page snapshot and print the report
    Check {
        /// Page snapshot (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Write the page state after the pass to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mask a value
    Mask {
        value: String,

        #[arg(long, value_enum, default_value_t = MaskKind::Full)]
        mask_type: MaskKind,

        #[arg(long, default_value_t = '*')]
        mask_char: char,

        /// Characters kept at each end for partial masks
        #[arg(long, default_value_t = 4)]
        visible_chars: usize,
    },

    /// Encrypt a value with the configured secret
    Encrypt { value: String },

    /// Decrypt a value produced by `encrypt`
    Decrypt { ciphertext: String },

    /// Autofill store management
    Autofill {
        #[command(subcommand)]
        action: AutofillCommand,
    },
}

#[derive(Subcommand)]
pub(crate) enum AutofillCommand {
    /// List stored values
    List {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Remove one stored value
    Forget { field: String },

    /// Remove every stored value
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum MaskKind {
    Full,
    Partial,
    Custom,
}

impl From<MaskKind> for MaskType {
    fn from(kind: MaskKind) -> Self {
        match kind {
            MaskKind::Full => MaskType::Full,
            MaskKind::Partial => MaskType::Partial,
            MaskKind::Custom => MaskType::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["formpilot", "check", "--page", "page.json", "-o", "out.json"]);
        assert_eq!(cli.config, PathBuf::from("formpilot.toml"));
        match cli.command {
            Commands::Check { page, output } => {
                assert_eq!(page, PathBuf::from("page.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_mask_options() {
        let cli = Cli::parse_from([
            "formpilot",
            "mask",
            "4111111111111111",
            "--mask-type",
            "partial",
            "--mask-char",
            "#",
            "--visible-chars",
            "2",
        ]);
        match cli.command {
            Commands::Mask {
                value,
                mask_type,
                mask_char,
                visible_chars,
            } => {
                assert_eq!(value, "4111111111111111");
                assert_eq!(MaskType::from(mask_type), MaskType::Partial);
                assert_eq!(mask_char, '#');
                assert_eq!(visible_chars, 2);
            }
            _ => panic!("expected mask"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["formpilot", "autofill", "clear", "-c", "other.toml"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.command,
            Commands::Autofill {
                action: AutofillCommand::Clear
            }
        ));
    }
}
