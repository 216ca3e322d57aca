use crate::{
    config::{DEFAULT_VOLUME_SCALE, DecimalRange},
    error::SimulationError,
    ladder::PriceLadder,
    level::Side,
};
use derive_more::Constructor;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Simulates a single new resting order arriving at a uniformly random [`PriceLadder`] level.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Constructor)]
pub struct LiquidityInjector {
    /// Range the injected volume is drawn from.
    pub magnitude: DecimalRange,

    /// Decimal places the resulting volume is quantised to.
    pub volume_scale: u32,
}

/// Record of the liquidity a [`LiquidityInjector`] added to a [`PriceLadder`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Spike {
    /// Logical index of the level the volume was added to.
    pub index: usize,
    pub price: Decimal,
    pub side: Side,
    pub volume: Decimal,
}

impl LiquidityInjector {
    /// Add a spike of resting volume to exactly one side of exactly one level.
    ///
    /// The level is selected uniformly at random, the [`Side`] with equal probability, and the
    /// volume uniformly from the configured magnitude range.
    pub fn inject_spike<R>(
        &self,
        ladder: &mut PriceLadder,
        rng: &mut R,
    ) -> Result<Spike, SimulationError>
    where
        R: Rng,
    {
        if ladder.is_empty() {
            return Err(SimulationError::EmptyLadder);
        }

        let index = rng.random_range(0..ladder.len());
        let side = if rng.random_bool(0.5) {
            Side::Bid
        } else {
            Side::Ask
        };
        let volume = self.magnitude.sample(rng).round_dp(self.volume_scale);

        let level = ladder.level_at_mut(index)?;
        *level.volume_mut(side) += volume;

        let spike = Spike {
            index,
            price: level.price,
            side,
            volume,
        };
        trace!(?spike, "injected liquidity spike");

        Ok(spike)
    }
}

/// Add a single random liquidity spike drawn from `magnitude` to the `ladder`.
///
/// See [`LiquidityInjector::inject_spike`].
pub fn inject_spike<R>(
    ladder: &mut PriceLadder,
    magnitude: DecimalRange,
    rng: &mut R,
) -> Result<Spike, SimulationError>
where
    R: Rng,
{
    LiquidityInjector::new(magnitude, DEFAULT_VOLUME_SCALE).inject_spike(ladder, rng)
}
