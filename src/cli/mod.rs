//! CLI module for Ladle.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{money, Output};

use clap::{Parser, Subcommand};

/// Ladle - tool-calling agents for supplier costing and web research
///
/// Hands natural-language tasks to an LLM agent equipped with cost calculators,
/// web search, and a plain-text long-term memory.
#[derive(Parser, Debug)]
#[command(name = "ladle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the total daily price of every supplier (no LLM involved)
    Quote {
        /// Daily order volume in liters
        #[arg(long)]
        volume: Option<f64>,

        /// JSON file with suppliers (defaults to the built-in list)
        #[arg(short, long)]
        suppliers: Option<String>,

        /// Print the quotes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calculate refrigerated transport cost
    Transport {
        /// Distance in kilometers
        #[arg(short, long)]
        distance: f64,

        /// Order volume in liters
        #[arg(long)]
        volume: f64,
    },

    /// Calculate the tariff on a base cost of goods
    Tariff {
        /// Base cost of goods, excluding transport
        #[arg(short, long)]
        base_cost: f64,

        /// Goods are imported from Canada
        #[arg(long)]
        canadian: bool,
    },

    /// Ask the supplier cost agent a question
    Ask {
        /// The task for the agent (e.g., "Transport cost for 50 liters over 10 km?")
        task: String,

        /// Attach the supplier table to the task
        #[arg(short, long)]
        with_suppliers: bool,

        /// JSON file with suppliers (implies --with-suppliers)
        #[arg(short, long)]
        suppliers: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Research a question on the web, remembering what is learned
    Research {
        /// The question to research (prompted for when omitted)
        question: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Inspect the long-term memory file
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// Check configuration and connectivity
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemoryAction {
    /// Print the memory file
    Show,

    /// Append a fact by hand
    Add {
        /// The fact to remember
        fact: String,
    },

    /// Show memory file path
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_suppliers() {
        let cli = Cli::parse_from(["ladle", "-vv", "ask", "Compare suppliers", "--with-suppliers"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask {
                task,
                with_suppliers,
                suppliers,
                model,
            } => {
                assert_eq!(task, "Compare suppliers");
                assert!(with_suppliers);
                assert!(suppliers.is_none());
                assert!(model.is_none());
            }
            other => panic!("Expected Ask command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_research_without_question() {
        let cli = Cli::parse_from(["ladle", "research"]);
        assert!(matches!(cli.command, Commands::Research { question: None, .. }));
    }

    #[test]
    fn test_parse_quote_json() {
        let cli = Cli::parse_from(["ladle", "quote", "--volume", "50", "--json"]);
        match cli.command {
            Commands::Quote { volume, json, .. } => {
                assert_eq!(volume, Some(50.0));
                assert!(json);
            }
            other => panic!("Expected Quote command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tariff() {
        let cli = Cli::parse_from(["ladle", "tariff", "--base-cost", "58.5", "--canadian"]);
        match cli.command {
            Commands::Tariff {
                base_cost,
                canadian,
            } => {
                assert_eq!(base_cost, 58.5);
                assert!(canadian);
            }
            other => panic!("Expected Tariff command, got {:?}", other),
        }
    }
}
