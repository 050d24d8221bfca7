//! Movement cost per terrain category.
use crate::terrain::{TerrainCategory, TerrainTable};

/// Sentinel cost for terrain that can never be entered.
pub const IMPASSABLE: f64 = f64::INFINITY;

/// Cost assumed for labels the table does not know (Land-equivalent).
pub const FALLBACK_COST: f64 = 1.0;

#[inline]
pub fn is_passable(cost: f64) -> bool {
    cost.is_finite()
}

impl TerrainCategory {
    /// Movement cost from the shipped table.
    pub fn cost(self) -> f64 {
        TerrainTable::default().definition(self).cost
    }

    pub fn is_passable(self) -> bool {
        is_passable(self.cost())
    }
}

/// Cost for a category given by name. Unrecognized names cost the same as
/// Land instead of failing.
pub fn cost_by_name(name: &str) -> f64 {
    name.parse::<TerrainCategory>()
        .map_or(FALLBACK_COST, TerrainCategory::cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TerrainCategory::*;

    #[test]
    fn water_is_the_only_impassable_category() {
        assert!(!Water.is_passable());
        assert_eq!(Water.cost(), IMPASSABLE);
        for c in [Sand, Land, Hills, Mountain, Snow] {
            assert!(c.is_passable(), "{c} should be passable");
            assert!(c.cost() >= 1.0, "{c} cost {} below 1", c.cost());
        }
    }

    #[test]
    fn land_is_cheapest_and_costs_climb_with_elevation() {
        let ranked = [Sand, Land, Hills, Mountain, Snow];
        let cheapest = ranked.iter().map(|c| c.cost()).fold(f64::INFINITY, f64::min);
        assert_eq!(Land.cost(), cheapest);

        let costs: Vec<f64> = ranked.iter().map(|c| c.cost()).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]), "costs by rank {costs:?}");
    }

    #[test]
    fn unknown_names_fall_back_to_land_cost() {
        assert_eq!(cost_by_name("swamp"), FALLBACK_COST);
        assert_eq!(cost_by_name(""), FALLBACK_COST);
        assert_eq!(cost_by_name("hills"), Hills.cost());
        assert!(cost_by_name("WATER").is_infinite());
    }
}
