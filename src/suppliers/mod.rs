//! Supplier records and daily price quotes.

use crate::costs::{daily_supplier_price, CostBreakdown};
use crate::error::{LadleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Note handed to the agent alongside the supplier table.
pub const DATA_DESCRIPTION: &str = "Suppliers have an additional tasting fee: that is a fixed fee applied to each order to taste the ice cream.";

/// An ice cream supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub location: String,
    pub distance_km: f64,
    /// Whether goods are imported from Canada.
    pub canadian: bool,
    pub price_per_liter: f64,
    /// Fixed fee applied to each order.
    #[serde(default)]
    pub tasting_fee: f64,
}

impl Supplier {
    fn new(
        name: &str,
        location: &str,
        distance_km: f64,
        canadian: bool,
        price_per_liter: f64,
        tasting_fee: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            distance_km,
            canadian,
            price_per_liter,
            tasting_fee,
        }
    }

    /// The built-in supplier list.
    pub fn catalog() -> Vec<Supplier> {
        vec![
            Supplier::new("Montreal Ice Cream Co", "Montreal, QC", 120.0, true, 1.95, 0.0),
            Supplier::new("Brain Freeze Brothers", "Burlington, VT", 85.0, false, 1.91, 12.50),
            Supplier::new("Toronto Gelato Ltd", "Toronto, ON", 400.0, true, 1.82, 30.14),
            Supplier::new("Buffalo Scoops", "Buffalo, NY", 220.0, false, 2.43, 42.00),
            Supplier::new("Vermont Creamery", "Portland, ME", 280.0, false, 2.33, 0.20),
        ]
    }
}

/// Load suppliers from a JSON array on disk.
pub fn load_suppliers(path: &Path) -> Result<Vec<Supplier>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LadleError::Suppliers(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let suppliers: Vec<Supplier> = serde_json::from_str(&content)?;

    if suppliers.is_empty() {
        return Err(LadleError::Suppliers(format!(
            "No suppliers found in {}",
            path.display()
        )));
    }

    Ok(suppliers)
}

/// A supplier with its computed daily cost.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierQuote {
    pub supplier: Supplier,
    pub cost: CostBreakdown,
}

/// Quote every supplier for the given daily volume, cheapest first.
pub fn quote_all(suppliers: &[Supplier], order_volume: f64) -> Result<Vec<SupplierQuote>> {
    let mut quotes = suppliers
        .iter()
        .map(|s| {
            Ok(SupplierQuote {
                supplier: s.clone(),
                cost: daily_supplier_price(s, order_volume)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    quotes.sort_by(|a, b| a.cost.total.total_cmp(&b.cost.total));
    Ok(quotes)
}

/// Render suppliers as a text block the agent can read.
pub fn suppliers_context(suppliers: &[Supplier]) -> String {
    let rows = suppliers
        .iter()
        .map(|s| {
            format!(
                "| {} | {} | {} | {} | {:.2} | {:.2} |",
                s.name, s.location, s.distance_km, s.canadian, s.price_per_liter, s.tasting_fee
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "suppliers_data:\n\
        | name | location | distance_km | canadian | price_per_liter | tasting_fee |\n\
        |---|---|---|---|---|---|\n\
        {}\n\n\
        data_description: {}",
        rows, DATA_DESCRIPTION
    )
}
