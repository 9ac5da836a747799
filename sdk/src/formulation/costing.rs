// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cost roll-up for a product development formula.
//!
//! Each line of a formula gives the share of a raw material by weight (`percent`), its rate per
//! kg, its density in kg/L and its solids content in percent. Totals are computed from the
//! unrounded line values; only the reported figures are rounded.

use rust_decimal::Decimal;

use super::store::ProductDevelopmentItem;

/// Derived values for one formula line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineCost {
    /// Litres taken up by the line's weight share; zero when density is zero
    pub volume: Decimal,
    pub solid_weight: Decimal,
    pub cost: Decimal,
}

/// Totals and ratios for a whole formula.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CostSummary {
    pub total_percent: Decimal,
    pub total_volume: Decimal,
    pub total_solids: Decimal,
    pub total_cost: Decimal,
    /// kg/L, rounded to 3 places
    pub density: Decimal,
    pub solids_percent: Decimal,
    pub cost_per_kg: Decimal,
    pub cost_per_liter: Decimal,
    pub gross_profit: Decimal,
    pub gross_profit_percent: Decimal,
}

fn divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .unwrap_or(Decimal::ZERO)
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    (divide(part, whole) * Decimal::ONE_HUNDRED).round_dp(2)
}

pub fn line_cost(item: &ProductDevelopmentItem) -> LineCost {
    LineCost {
        volume: divide(item.percent, item.density),
        solid_weight: item.percent * item.solids / Decimal::ONE_HUNDRED,
        cost: item.percent * item.rate,
    }
}

/// Rolls the formula lines up against the price the product is meant to sell at per litre.
pub fn roll_up(items: &[ProductDevelopmentItem], selling_price: Decimal) -> CostSummary {
    let mut total_percent = Decimal::ZERO;
    let mut total_volume = Decimal::ZERO;
    let mut total_solids = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;

    for item in items {
        let line = line_cost(item);
        total_percent += item.percent;
        total_volume += line.volume;
        total_solids += line.solid_weight;
        total_cost += line.cost;
    }

    let cost_per_liter = divide(total_cost, total_volume);
    let gross_profit = selling_price - cost_per_liter;

    CostSummary {
        total_percent: total_percent.round_dp(2),
        total_volume: total_volume.round_dp(3),
        total_solids: total_solids.round_dp(2),
        total_cost: total_cost.round_dp(2),
        density: divide(total_percent, total_volume).round_dp(3),
        solids_percent: percent_of(total_solids, total_percent),
        cost_per_kg: divide(total_cost, total_percent).round_dp(2),
        cost_per_liter: cost_per_liter.round_dp(2),
        gross_profit: gross_profit.round_dp(2),
        gross_profit_percent: percent_of(gross_profit, selling_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn item(percent: i64, rate: i64, density: &str, solids: i64) -> ProductDevelopmentItem {
        ProductDevelopmentItem {
            material: "material".to_string(),
            percent: Decimal::from(percent),
            rate: Decimal::from(rate),
            density: density.parse().expect("density"),
            solids: Decimal::from(solids),
        }
    }

    #[test]
    fn test_line_cost() {
        let line = line_cost(&item(40, 120, "1.6", 100));
        assert_eq!(line.volume, Decimal::from(25));
        assert_eq!(line.solid_weight, Decimal::from(40));
        assert_eq!(line.cost, Decimal::from(4800));
    }

    /// A resin/pigment/solvent formula:
    ///
    /// | %  | rate | density | solids | volume | solids wt | cost |
    /// | 40 | 120  | 1.6     | 100    | 25     | 40        | 4800 |
    /// | 35 | 200  | 1.0     | 50     | 35     | 17.5      | 7000 |
    /// | 25 | 80   | 0.8     | 0      | 31.25  | 0         | 2000 |
    #[test]
    fn test_roll_up() {
        let items = vec![
            item(40, 120, "1.6", 100),
            item(35, 200, "1.0", 50),
            item(25, 80, "0.8", 0),
        ];

        let summary = roll_up(&items, Decimal::from(200));

        assert_eq!(summary.total_percent, Decimal::from(100));
        assert_eq!(summary.total_volume, "91.25".parse::<Decimal>().expect("decimal"));
        assert_eq!(summary.total_solids, "57.5".parse::<Decimal>().expect("decimal"));
        assert_eq!(summary.total_cost, Decimal::from(13800));
        // 100 / 91.25
        assert_eq!(summary.density, "1.096".parse::<Decimal>().expect("decimal"));
        assert_eq!(summary.solids_percent, "57.5".parse::<Decimal>().expect("decimal"));
        assert_eq!(summary.cost_per_kg, Decimal::from(138));
        // 13800 / 91.25 = 151.2328...
        assert_eq!(summary.cost_per_liter, "151.23".parse::<Decimal>().expect("decimal"));
        assert_eq!(summary.gross_profit, "48.77".parse::<Decimal>().expect("decimal"));
        assert_eq!(
            summary.gross_profit_percent,
            "24.38".parse::<Decimal>().expect("decimal")
        );
    }

    #[test]
    fn test_zero_density_and_empty_formula() {
        let summary = roll_up(&[item(10, 50, "0", 20)], Decimal::ZERO);
        assert_eq!(summary.total_volume, Decimal::ZERO);
        assert_eq!(summary.density, Decimal::ZERO);
        assert_eq!(summary.cost_per_liter, Decimal::ZERO);
        assert_eq!(summary.gross_profit_percent, Decimal::ZERO);
        assert_eq!(summary.cost_per_kg, Decimal::from(50));

        let empty = roll_up(&[], Decimal::from(10));
        assert_eq!(empty.solids_percent, Decimal::ZERO);
        assert_eq!(empty.gross_profit, Decimal::from(10));
        assert_eq!(empty.gross_profit_percent, Decimal::from(100));
    }
}
