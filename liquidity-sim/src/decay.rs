use crate::{
    config::{DEFAULT_VOLUME_SCALE, DecimalRange},
    ladder::PriceLadder,
};
use derive_more::Constructor;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Models resting liquidity going stale by shrinking every level's volume multiplicatively.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Constructor)]
pub struct DecayModel {
    /// Range each per-side retention factor is drawn from (eg/ 0.95..0.99 decays 1-5%).
    pub retention: DecimalRange,

    /// Decimal places the decayed volume is quantised to.
    pub volume_scale: u32,
}

impl DecayModel {
    /// Multiply the bid and ask volume of every level by an independently drawn retention
    /// factor, flooring the result at zero.
    ///
    /// Factors are drawn bid then ask, level by level in increasing price order.
    pub fn decay<R>(&self, ladder: &mut PriceLadder, rng: &mut R)
    where
        R: Rng,
    {
        for level in ladder.iter_mut() {
            level.bid_volume = self.attenuate(level.bid_volume, rng);
            level.ask_volume = self.attenuate(level.ask_volume, rng);
        }
    }

    fn attenuate<R>(&self, volume: Decimal, rng: &mut R) -> Decimal
    where
        R: Rng,
    {
        let retention = self.retention.sample(rng);
        (volume * retention)
            .round_dp(self.volume_scale)
            .max(Decimal::ZERO)
    }
}

/// Decay every level of the `ladder` by factors drawn from `retention`.
///
/// See [`DecayModel::decay`].
pub fn decay<R>(ladder: &mut PriceLadder, retention: DecimalRange, rng: &mut R)
where
    R: Rng,
{
    DecayModel::new(retention, DEFAULT_VOLUME_SCALE).decay(ladder, rng)
}
