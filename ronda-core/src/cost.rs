//! Fuel-based traversal costs.

use crate::Error;

/// Converts street lengths into a scalar traversal cost from a fuel price
/// and a fuel efficiency. Costs carry no directionality: both orientations
/// of a street cost the same.
#[derive(Debug, Clone, Copy)]
pub struct FuelCostModel {
    price_per_liter: f64,
    km_per_liter: f64,
}

impl FuelCostModel {
    /// # Errors
    ///
    /// Both parameters must be strictly positive. A zero or negative fuel
    /// efficiency is a configuration error, not a zero-cost network.
    pub fn new(price_per_liter: f64, km_per_liter: f64) -> Result<Self, Error> {
        if !(price_per_liter > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "fuel price must be positive, got {price_per_liter}"
            )));
        }
        if !(km_per_liter > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "fuel efficiency must be positive, got {km_per_liter} km/l"
            )));
        }
        Ok(Self {
            price_per_liter,
            km_per_liter,
        })
    }

    pub fn cost_per_km(&self) -> f64 {
        self.price_per_liter / self.km_per_liter
    }

    /// Cost of traversing `length_m` meters of street, either direction.
    pub fn street_cost(&self, length_m: f64) -> f64 {
        self.cost_per_km() * (length_m / 1000.0)
    }
}
