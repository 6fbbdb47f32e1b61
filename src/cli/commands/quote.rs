//! Quote command implementation.

use crate::cli::{money, Output};
use crate::config::Settings;
use crate::suppliers::{load_suppliers, quote_all, Supplier, SupplierQuote, DATA_DESCRIPTION};
use anyhow::Result;

/// Run the quote command.
pub fn run_quote(
    volume: Option<f64>,
    suppliers: Option<&str>,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let volume = volume.unwrap_or(settings.costs.order_volume_liters);
    let suppliers = supplier_list(suppliers, settings)?;

    let quotes = quote_all(&suppliers, volume)?;

    if json {
        println!("{}", render_json(&quotes)?);
        return Ok(());
    }

    Output::header(&format!("Daily price for {} liters", volume));
    println!();
    Output::quote_table(&quotes);
    println!();
    Output::info(DATA_DESCRIPTION);

    if let Some(best) = quotes.first() {
        Output::success(&format!(
            "Cheapest: {} at {}",
            best.supplier.name,
            money(best.cost.total)
        ));
    }

    Ok(())
}

/// Quotes as pretty-printed JSON, cheapest first.
fn render_json(quotes: &[SupplierQuote]) -> Result<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Suppliers from the given file, the configured file, or the built-in list.
pub(crate) fn supplier_list(path: Option<&str>, settings: &Settings) -> Result<Vec<Supplier>> {
    let path = path
        .map(Settings::expand_path)
        .or_else(|| settings.suppliers_path());

    match path {
        Some(p) => Ok(load_suppliers(&p)?),
        None => Ok(Supplier::catalog()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_list_defaults_to_catalog() {
        let suppliers = supplier_list(None, &Settings::default()).unwrap();
        assert_eq!(suppliers, Supplier::catalog());
    }

    #[test]
    fn test_render_json_lists_cheapest_first() -> anyhow::Result<()> {
        let quotes = quote_all(&Supplier::catalog(), 30.0)?;
        let json: serde_json::Value = serde_json::from_str(&render_json(&quotes)?)?;

        let entries = json.as_array().expect("array of quotes");
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["supplier"]["name"], "Brain Freeze Brothers");
        let first = entries[0]["cost"]["total"].as_f64().unwrap();
        let last = entries[4]["cost"]["total"].as_f64().unwrap();
        assert!(first <= last);
        Ok(())
    }

    #[test]
    fn test_supplier_list_prefers_argument() {
        let mut settings = Settings::default();
        settings.costs.suppliers_file = Some("/nonexistent/configured.json".to_string());

        let err = supplier_list(Some("/nonexistent/given.json"), &settings).unwrap_err();
        assert!(err.to_string().contains("given.json"));
    }
}
