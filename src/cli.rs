//! CLI definitions for pagesum.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pagesum_protocols::types::SummaryLength;

/// pagesum CLI.
#[derive(Parser)]
#[command(name = "pagesum")]
#[command(about = "Summarize web pages in a persona's voice with Gemini")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.pagesum/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Summarize a web page
    Summarize {
        /// Page URL
        url: String,

        /// Summary length: concise or detailed
        #[arg(short, long, default_value = "concise")]
        length: SummaryLength,

        /// Use a saved HTML document instead of fetching the URL
        #[arg(long)]
        html_file: Option<PathBuf>,
    },

    /// Show or change stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Print the persona served to content scripts
    Persona,
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Show stored settings (API key masked)
    Show,

    /// Save the Gemini API key and theme
    Set {
        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY")]
        api_key: String,

        /// Dark theme flag
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        dark_mode: bool,
    },
}
