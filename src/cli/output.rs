//! CLI output formatting utilities.

use crate::agent::ToolCallRecord;
use crate::suppliers::SupplierQuote;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print the supplier comparison table.
    pub fn quote_table(quotes: &[SupplierQuote]) {
        println!(
            "  {:<24} {:<16} {:>9} {:>10} {:>8} {:>8} {:>10}",
            style("Supplier").bold(),
            style("Location").bold(),
            style("Product").bold(),
            style("Transport").bold(),
            style("Tariff").bold(),
            style("Fee").bold(),
            style("Total").bold(),
        );
        for (i, quote) in quotes.iter().enumerate() {
            let total = money(quote.cost.total);
            let total = if i == 0 {
                style(total).green().bold()
            } else {
                style(total)
            };
            println!(
                "  {:<24} {:<16} {:>9} {:>10} {:>8} {:>8} {:>10}",
                quote.supplier.name,
                style(&quote.supplier.location).dim(),
                money(quote.cost.product_cost),
                money(quote.cost.transport_cost),
                money(quote.cost.tariff),
                money(quote.cost.tasting_fee),
                total,
            );
        }
    }

    /// Print a one-line summary of a tool call.
    pub fn tool_call(call: &ToolCallRecord) {
        println!(
            "  {} {} {} {}",
            style("*").cyan(),
            style(&call.name).bold(),
            style(content_preview(&call.arguments, 60)).dim(),
            content_preview(&call.result, 60)
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format an amount of money.
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let head: String = content.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
