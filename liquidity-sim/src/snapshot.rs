use crate::level::{Level, PriceLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable, point-in-time copy of a [`PriceLadder`](crate::ladder::PriceLadder).
///
/// Owns its levels outright, so nothing done to a snapshot can reach the engine that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct LadderSnapshot {
    /// Number of ticks the engine had completed when the snapshot was taken.
    pub sequence: u64,

    /// Levels in strictly increasing price order.
    pub levels: Vec<PriceLevel>,
}

/// Cumulative liquidity at a price, as drawn by a depth chart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct DepthPoint {
    pub price: Decimal,
    /// Total bid volume resting at or above `price`.
    pub cumulative_bid_volume: Decimal,
    /// Total ask volume resting at or below `price`.
    pub cumulative_ask_volume: Decimal,
}

impl LadderSnapshot {
    pub fn new(sequence: u64, levels: Vec<PriceLevel>) -> Self {
        Self { sequence, levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Price of the structural center level (index `len / 2`).
    ///
    /// This is a representative quote for a "last price" marker, not a best bid/ask midpoint.
    pub fn current_price(&self) -> Option<Decimal> {
        self.levels.get(self.levels.len() / 2).map(|level| level.price)
    }

    pub fn total_bid_volume(&self) -> Decimal {
        self.levels.iter().map(|level| level.bid_volume).sum()
    }

    pub fn total_ask_volume(&self) -> Decimal {
        self.levels.iter().map(|level| level.ask_volume).sum()
    }

    /// Largest single-sided volume resting at any level, used to normalise heatmap intensity.
    pub fn max_volume(&self) -> Decimal {
        self.levels
            .iter()
            .map(|level| level.bid_volume.max(level.ask_volume))
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Levels holding bid volume as single sided [`Level`]s, best (highest price) first.
    pub fn bid_levels(&self) -> Vec<Level> {
        self.levels
            .iter()
            .rev()
            .filter(|level| !level.bid_volume.is_zero())
            .map(|level| Level::new(level.price, level.bid_volume))
            .collect()
    }

    /// Levels holding ask volume as single sided [`Level`]s, best (lowest price) first.
    pub fn ask_levels(&self) -> Vec<Level> {
        self.levels
            .iter()
            .filter(|level| !level.ask_volume.is_zero())
            .map(|level| Level::new(level.price, level.ask_volume))
            .collect()
    }

    /// Cumulative depth at every level, in increasing price order.
    ///
    /// Bids accumulate downwards from the top of the ladder, asks upwards from the bottom.
    pub fn depth(&self) -> Vec<DepthPoint> {
        let mut cumulative_bid_volume = self
            .levels
            .iter()
            .rev()
            .scan(Decimal::ZERO, |total, level| {
                *total += level.bid_volume;
                Some(*total)
            })
            .collect::<Vec<_>>();
        cumulative_bid_volume.reverse();

        self.levels
            .iter()
            .zip(cumulative_bid_volume)
            .scan(Decimal::ZERO, |ask_total, (level, cumulative_bid_volume)| {
                *ask_total += level.ask_volume;
                Some(DepthPoint {
                    price: level.price,
                    cumulative_bid_volume,
                    cumulative_ask_volume: *ask_total,
                })
            })
            .collect()
    }
}

impl From<LadderSnapshot> for Vec<PriceLevel> {
    fn from(value: LadderSnapshot) -> Self {
        value.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> LadderSnapshot {
        LadderSnapshot::new(
            3,
            vec![
                PriceLevel::new(dec!(1.00000), dec!(10), dec!(0)),
                PriceLevel::new(dec!(1.00005), dec!(0), dec!(0)),
                PriceLevel::new(dec!(1.00010), dec!(5), dec!(7)),
                PriceLevel::new(dec!(1.00015), dec!(0), dec!(2)),
            ],
        )
    }

    #[test]
    fn test_current_price() {
        assert_eq!(snapshot().current_price(), Some(dec!(1.00010)));
        assert_eq!(LadderSnapshot::default().current_price(), None);
    }

    #[test]
    fn test_volume_totals() {
        let snapshot = snapshot();
        assert_eq!(snapshot.total_bid_volume(), dec!(15));
        assert_eq!(snapshot.total_ask_volume(), dec!(9));
        assert_eq!(snapshot.max_volume(), dec!(10));
        assert_eq!(LadderSnapshot::default().max_volume(), dec!(0));
    }

    #[test]
    fn test_single_sided_levels() {
        let snapshot = snapshot();

        assert_eq!(
            snapshot.bid_levels(),
            vec![
                Level::new(dec!(1.00010), dec!(5)),
                Level::new(dec!(1.00000), dec!(10)),
            ]
        );
        assert_eq!(
            snapshot.ask_levels(),
            vec![
                Level::new(dec!(1.00010), dec!(7)),
                Level::new(dec!(1.00015), dec!(2)),
            ]
        );
    }

    #[test]
    fn test_depth() {
        let actual = snapshot().depth();

        let expected = vec![
            DepthPoint {
                price: dec!(1.00000),
                cumulative_bid_volume: dec!(15),
                cumulative_ask_volume: dec!(0),
            },
            DepthPoint {
                price: dec!(1.00005),
                cumulative_bid_volume: dec!(5),
                cumulative_ask_volume: dec!(0),
            },
            DepthPoint {
                price: dec!(1.00010),
                cumulative_bid_volume: dec!(5),
                cumulative_ask_volume: dec!(7),
            },
            DepthPoint {
                price: dec!(1.00015),
                cumulative_bid_volume: dec!(0),
                cumulative_ask_volume: dec!(9),
            },
        ];

        assert_eq!(actual, expected);
    }
}
