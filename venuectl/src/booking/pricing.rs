//! Tier-based pricing.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::models::reservations::PricingTier;

impl PricingTier {
    /// Multiplier applied to a facility's hourly rate. Unrecognised tiers pay the base rate.
    pub fn multiplier(&self) -> Decimal {
        match self {
            PricingTier::Explorer => Decimal::new(8, 1),
            PricingTier::Commander => Decimal::new(12, 1),
            PricingTier::GalacticVip => Decimal::new(18, 1),
            PricingTier::Other(_) => Decimal::ONE,
        }
    }
}

/// Bookings are at least one hour long.
pub fn effective_duration(duration: Option<i32>) -> i32 {
    match duration {
        Some(hours) if hours > 0 => hours,
        _ => 1,
    }
}

/// Total cost of a booking, rounded to cents half away from zero.
pub fn price(hourly_rate: Decimal, tier: &PricingTier, duration: Option<i32>) -> Decimal {
    let hours = Decimal::from(effective_duration(duration));
    (hourly_rate * tier.multiplier() * hours).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
