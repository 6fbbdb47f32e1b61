//! Cost arithmetic for ice cream supply orders.
//!
//! Refrigerated transport is billed per kilometer per truck, and dairy
//! imported from Canada carries a tariff on the product cost only.

use crate::error::{LadleError, Result};
use crate::suppliers::Supplier;
use serde::Serialize;
use std::f64::consts::PI;

/// Capacity of one refrigerated truck.
pub const TRUCK_CAPACITY_LITERS: f64 = 300.0;

/// Transport price per kilometer per truck.
pub const COST_PER_KM: f64 = 1.20;

/// Daily order volume used when none is given.
pub const DEFAULT_ORDER_VOLUME_LITERS: f64 = 30.0;

/// Tariff rate on Canadian dairy, 2 * pi / 100 (about 6.28%).
pub const CANADIAN_TARIFF_RATE: f64 = PI / 50.0;

/// Number of trucks needed to carry the given volume.
pub fn trucks_needed(order_volume: f64) -> f64 {
    (order_volume / TRUCK_CAPACITY_LITERS).ceil()
}

/// Transportation cost for an order over a distance.
pub fn transport_cost(distance_km: f64, order_volume: f64) -> Result<f64> {
    ensure_non_negative("distance_km", distance_km)?;
    ensure_non_negative("order_volume", order_volume)?;

    Ok(distance_km * COST_PER_KM * trucks_needed(order_volume))
}

/// Tariff owed on the base cost of goods. Returns the tariff only, not the total.
pub fn tariff(base_cost: f64, is_canadian: bool) -> Result<f64> {
    ensure_non_negative("base_cost", base_cost)?;

    if is_canadian {
        Ok(base_cost * CANADIAN_TARIFF_RATE)
    } else {
        Ok(0.0)
    }
}

/// Itemized daily cost of ordering from one supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub product_cost: f64,
    pub transport_cost: f64,
    pub tariff: f64,
    pub tasting_fee: f64,
    pub total: f64,
}

/// Total daily price for getting `order_volume` liters from a supplier.
pub fn daily_supplier_price(supplier: &Supplier, order_volume: f64) -> Result<CostBreakdown> {
    ensure_non_negative("order_volume", order_volume)?;
    ensure_non_negative("price_per_liter", supplier.price_per_liter)?;
    ensure_non_negative("tasting_fee", supplier.tasting_fee)?;

    let product_cost = supplier.price_per_liter * order_volume;
    let transport_cost = transport_cost(supplier.distance_km, order_volume)?;
    let tariff = tariff(product_cost, supplier.canadian)?;

    Ok(CostBreakdown {
        product_cost,
        transport_cost,
        tariff,
        tasting_fee: supplier.tasting_fee,
        total: product_cost + transport_cost + tariff + supplier.tasting_fee,
    })
}

fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LadleError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            name, value
        )));
    }
    if value < 0.0 {
        return Err(LadleError::InvalidInput(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(())
}
