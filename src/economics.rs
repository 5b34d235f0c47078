use serde::Deserialize;

/// Per-unit cost structure supplied by the seller alongside the report.
/// Defaults match the Rocket Growth fulfillment fee and the standard
/// Coupang commission rate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnitEconomics {
    /// Listed sale price per unit, in won.
    pub unit_price: f64,
    /// Landed cost per unit, in won.
    pub unit_cost: f64,
    /// Inbound/outbound fulfillment fee per unit, in won.
    pub delivery_fee: f64,
    /// Platform commission, percent of sale price.
    pub fee_rate_percent: f64,
}

impl Default for UnitEconomics {
    fn default() -> Self {
        Self {
            unit_price: 0.0,
            unit_cost: 0.0,
            delivery_fee: 3650.0,
            fee_rate_percent: 11.55,
        }
    }
}

impl UnitEconomics {
    /// Commission charged per unit sold.
    pub fn fee_amount(&self) -> f64 {
        self.unit_price * self.fee_rate_percent / 100.0
    }

    /// Profit per unit before ad spend. A negative margin is a valid,
    /// reportable state, not an error.
    pub fn net_unit_margin(&self) -> f64 {
        self.unit_price - self.unit_cost - self.delivery_fee - self.fee_amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_from_price_cost_and_fees() {
        let econ = UnitEconomics {
            unit_price: 10_000.0,
            unit_cost: 3_000.0,
            delivery_fee: 3_650.0,
            fee_rate_percent: 11.55,
        };
        assert_eq!(econ.fee_amount(), 1_155.0);
        assert_eq!(econ.net_unit_margin(), 2_195.0);
    }

    #[test]
    fn margin_may_go_negative() {
        let econ = UnitEconomics {
            unit_price: 5_000.0,
            unit_cost: 4_000.0,
            delivery_fee: 3_650.0,
            fee_rate_percent: 11.55,
        };
        assert!(econ.net_unit_margin() < 0.0);
    }

    #[test]
    fn defaults_carry_standard_fees() {
        let econ: UnitEconomics = serde_yaml::from_str("unit_price: 12000").unwrap();
        assert_eq!(econ.unit_price, 12_000.0);
        assert_eq!(econ.delivery_fee, 3_650.0);
        assert_eq!(econ.fee_rate_percent, 11.55);
    }
}
