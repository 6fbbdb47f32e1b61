//! Direct calculator commands.

use crate::cli::{money, Output};
use crate::costs::{self, trucks_needed};
use anyhow::Result;

/// Run the transport command.
pub fn run_transport(distance_km: f64, order_volume: f64) -> Result<()> {
    let cost = costs::transport_cost(distance_km, order_volume)?;

    Output::kv("Distance", &format!("{} km", distance_km));
    Output::kv("Volume", &format!("{} liters", order_volume));
    Output::kv("Trucks", &format!("{}", trucks_needed(order_volume)));
    Output::success(&format!("Transport cost: {}", money(cost)));
    Ok(())
}

/// Run the tariff command.
pub fn run_tariff(base_cost: f64, is_canadian: bool) -> Result<()> {
    let tariff = costs::tariff(base_cost, is_canadian)?;

    Output::kv("Base cost", &money(base_cost));
    Output::kv("Origin", if is_canadian { "Canada" } else { "domestic" });
    Output::success(&format!("Tariff: {}", money(tariff)));
    Ok(())
}
