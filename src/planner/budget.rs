//! Budget allocation strategies
//!
//! Vibe-keyed percentage splits of the trip budget. Exact vibe matches
//! win, then keyword fallbacks, then the "comfortable travel" default.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fractional split of a total budget across spending categories.
/// Shares always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationStrategy {
    pub flights: Decimal,
    pub accommodation: Decimal,
    pub activities: Decimal,
    pub food_transport: Decimal,
    pub buffer: Decimal,
}

impl AllocationStrategy {
    pub fn total_share(&self) -> Decimal {
        self.flights + self.accommodation + self.activities + self.food_transport + self.buffer
    }
}

const COMFORTABLE: AllocationStrategy = AllocationStrategy {
    flights: dec!(0.25),
    accommodation: dec!(0.40),
    activities: dec!(0.20),
    food_transport: dec!(0.12),
    buffer: dec!(0.03),
};

const BEACH: AllocationStrategy = AllocationStrategy {
    flights: dec!(0.25),
    accommodation: dec!(0.35),
    activities: dec!(0.20),
    food_transport: dec!(0.15),
    buffer: dec!(0.05),
};

const MOUNTAIN: AllocationStrategy = AllocationStrategy {
    flights: dec!(0.30),
    accommodation: dec!(0.30),
    activities: dec!(0.25),
    food_transport: dec!(0.12),
    buffer: dec!(0.03),
};

const LUXURY: AllocationStrategy = AllocationStrategy {
    flights: dec!(0.20),
    accommodation: dec!(0.50),
    activities: dec!(0.20),
    food_transport: dec!(0.08),
    buffer: dec!(0.02),
};

const FRUGAL: AllocationStrategy = AllocationStrategy {
    flights: dec!(0.30),
    accommodation: dec!(0.30),
    activities: dec!(0.15),
    food_transport: dec!(0.20),
    buffer: dec!(0.05),
};

const ROMANTIC: AllocationStrategy = AllocationStrategy {
    flights: dec!(0.25),
    accommodation: dec!(0.45),
    activities: dec!(0.20),
    food_transport: dec!(0.08),
    buffer: dec!(0.02),
};

const FAMILY: AllocationStrategy = AllocationStrategy {
    flights: dec!(0.25),
    accommodation: dec!(0.40),
    activities: dec!(0.20),
    food_transport: dec!(0.12),
    buffer: dec!(0.03),
};

/// Keyword groups checked in order against the lowercased vibe
const KEYWORD_STRATEGIES: &[(&[&str], &AllocationStrategy)] = &[
    (&["beach", "yoga", "peaceful", "relax"], &BEACH),
    (&["mountain", "adventure", "trek", "hike"], &MOUNTAIN),
    (&["luxury", "premium", "luxurious", "5-star"], &LUXURY),
    (&["budget", "cheap", "economy", "save"], &FRUGAL),
    (&["romantic", "couple", "honeymoon"], &ROMANTIC),
    (&["family", "kids", "children"], &FAMILY),
];

/// Pick the allocation strategy for a free-form vibe description
pub fn strategy_for_vibe(vibe: &str) -> AllocationStrategy {
    let vibe = vibe.to_lowercase();
    for (keywords, strategy) in KEYWORD_STRATEGIES {
        if keywords.iter().any(|k| vibe.contains(k)) {
            return **strategy;
        }
    }
    COMFORTABLE
}

/// Absolute category budgets derived from a ceiling and strategy.
/// This is the Budget role's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub total: Decimal,
    pub flights: Decimal,
    pub accommodation: Decimal,
    pub activities: Decimal,
    pub food_transport: Decimal,
    pub buffer: Decimal,
    /// Vibe the strategy was chosen for
    pub strategy: String,
}

impl BudgetBreakdown {
    pub fn from_strategy(total: Decimal, vibe: &str) -> Self {
        let s = strategy_for_vibe(vibe);
        Self {
            total,
            flights: total * s.flights,
            accommodation: total * s.accommodation,
            activities: total * s.activities,
            food_transport: total * s.food_transport,
            buffer: total * s.buffer,
            strategy: vibe.to_string(),
        }
    }

    /// Budget left for the ground portion once a flight cost is known
    pub fn remaining_after_flights(&self, flight_cost: Decimal) -> Decimal {
        self.total - flight_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_strategies_sum_to_one() {
        let mut strategies = vec![COMFORTABLE];
        strategies.extend(KEYWORD_STRATEGIES.iter().map(|(_, s)| **s));
        for s in strategies {
            assert_eq!(s.total_share(), dec!(1.00), "{:?}", s);
        }
    }

    #[test]
    fn keyword_fallback_matches() {
        assert_eq!(strategy_for_vibe("lazy beach week"), BEACH);
        assert_eq!(strategy_for_vibe("Himalayan trek"), MOUNTAIN);
        assert_eq!(strategy_for_vibe("5-star everything"), LUXURY);
        assert_eq!(strategy_for_vibe("cheap and cheerful"), FRUGAL);
        assert_eq!(strategy_for_vibe("honeymoon"), ROMANTIC);
        assert_eq!(strategy_for_vibe("trip with the kids"), FAMILY);
    }

    #[test]
    fn unknown_vibe_uses_default() {
        assert_eq!(strategy_for_vibe("something else entirely"), COMFORTABLE);
    }

    #[test]
    fn breakdown_allocates_ceiling() {
        let b = BudgetBreakdown::from_strategy(dec!(100000), "comfortable travel");
        assert_eq!(b.flights, dec!(25000));
        assert_eq!(b.accommodation, dec!(40000));
        assert_eq!(
            b.flights + b.accommodation + b.activities + b.food_transport + b.buffer,
            b.total
        );
        assert_eq!(b.remaining_after_flights(dec!(30000)), dec!(70000));
    }
}
