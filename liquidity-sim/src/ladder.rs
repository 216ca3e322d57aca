use crate::{
    config::{ladder_tick_size, validate_ladder_geometry},
    error::SimulationError,
    level::PriceLevel,
};
use itertools::Itertools;
use rust_decimal::Decimal;

/// Decimal places prices are quantised to when no explicit scale is provided (FX-style quoting).
pub const DEFAULT_PRICE_SCALE: u32 = 5;

/// Fixed size window of evenly spaced [`PriceLevel`]s, ordered by strictly increasing price.
///
/// Levels are stored in a ring buffer: shifting the window by one level overwrites the vacated
/// slot in place and rotates the logical start offset, so the level count can never change once
/// initialised. Logical index `0` is always the lowest price.
///
/// [`PriceLadder::default`] is the uninitialised (empty) ladder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceLadder {
    levels: Vec<PriceLevel>,
    head: usize,
    tick_size: Decimal,
}

impl PriceLadder {
    /// Construct a [`PriceLadder`] of `level_count` empty levels spanning
    /// `[center_price - range/2, center_price + range/2)`, with prices quantised to
    /// `price_scale` decimal places.
    pub fn new(
        center_price: Decimal,
        range: Decimal,
        level_count: usize,
        price_scale: u32,
    ) -> Result<Self, SimulationError> {
        let mut ladder = Self::default();
        ladder.initialize_scaled(center_price, range, level_count, price_scale)?;
        Ok(ladder)
    }

    /// (Re)initialise this [`PriceLadder`] using the [`DEFAULT_PRICE_SCALE`].
    ///
    /// See [`Self::initialize_scaled`].
    pub fn initialize(
        &mut self,
        center_price: Decimal,
        range: Decimal,
        level_count: usize,
    ) -> Result<(), SimulationError> {
        self.initialize_scaled(center_price, range, level_count, DEFAULT_PRICE_SCALE)
    }

    /// (Re)initialise this [`PriceLadder`] with `level_count` empty levels, each
    /// `range / level_count` apart, the lowest at `center_price - range/2`.
    ///
    /// Fails with [`SimulationError::InvalidConfiguration`] if `level_count` is zero, `range`
    /// is not positive, or the geometry cannot be represented at `price_scale` decimal places.
    /// On failure the existing levels are left untouched.
    pub fn initialize_scaled(
        &mut self,
        center_price: Decimal,
        range: Decimal,
        level_count: usize,
        price_scale: u32,
    ) -> Result<(), SimulationError> {
        validate_ladder_geometry(center_price, range, level_count, price_scale)?;

        let tick_size = ladder_tick_size(range, level_count, price_scale).ok_or_else(|| {
            SimulationError::InvalidConfiguration("level_count must be > 0".to_string())
        })?;
        let lowest = center_price - range / Decimal::TWO;

        self.levels = (0..level_count)
            .map(|index| PriceLevel::empty(lowest + tick_size * Decimal::from(index)))
            .collect();
        self.head = 0;
        self.tick_size = tick_size;

        Ok(())
    }

    /// Number of levels in this [`PriceLadder`].
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Price distance between adjacent levels (zero if uninitialised).
    pub fn tick_size(&self) -> Decimal {
        self.tick_size
    }

    /// Return the [`PriceLevel`] at the logical `index` (`0` is the lowest price).
    pub fn level_at(&self, index: usize) -> Result<&PriceLevel, SimulationError> {
        let slot = self.slot(index)?;
        Ok(&self.levels[slot])
    }

    pub(crate) fn level_at_mut(&mut self, index: usize) -> Result<&mut PriceLevel, SimulationError> {
        let slot = self.slot(index)?;
        Ok(&mut self.levels[slot])
    }

    /// Iterate over the [`PriceLevel`]s in increasing price order.
    pub fn iter(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        let (wrapped, front) = self.levels.split_at(self.head);
        front.iter().chain(wrapped.iter())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PriceLevel> + '_ {
        let (wrapped, front) = self.levels.split_at_mut(self.head);
        front.iter_mut().chain(wrapped.iter_mut())
    }

    /// Copy the [`PriceLevel`]s into a new `Vec`, in increasing price order.
    pub fn to_vec(&self) -> Vec<PriceLevel> {
        self.iter().copied().collect()
    }

    /// Lowest priced [`PriceLevel`].
    pub fn bottom(&self) -> Option<&PriceLevel> {
        self.level_at(0).ok()
    }

    /// Highest priced [`PriceLevel`].
    pub fn top(&self) -> Option<&PriceLevel> {
        self.len()
            .checked_sub(1)
            .and_then(|index| self.level_at(index).ok())
    }

    /// Structural center [`PriceLevel`], found at logical index `len / 2`.
    pub fn center(&self) -> Option<&PriceLevel> {
        self.level_at(self.len() / 2).ok()
    }

    /// Price of the structural center [`PriceLevel`].
    pub fn center_price(&self) -> Option<Decimal> {
        self.center().map(|level| level.price)
    }

    /// Shift the window up by one level: the lowest level is dropped and a new empty level is
    /// added one `tick_size` above the current top.
    ///
    /// Returns the new top level, or `None` if the ladder is empty.
    pub fn shift_up(&mut self) -> Option<&PriceLevel> {
        let new_price = self.top()?.price + self.tick_size;

        // Lowest slot is recycled as the new top
        let slot = self.head;
        self.levels[slot] = PriceLevel::empty(new_price);
        self.head = (self.head + 1) % self.levels.len();

        Some(&self.levels[slot])
    }

    /// Shift the window down by one level: the highest level is dropped and a new empty level is
    /// added one `tick_size` below the current bottom.
    ///
    /// Returns the new bottom level, or `None` if the ladder is empty or the new bottom level
    /// would have a non-positive price (in which case the ladder is left untouched).
    pub fn shift_down(&mut self) -> Option<&PriceLevel> {
        let new_price = self.bottom()?.price - self.tick_size;
        if new_price <= Decimal::ZERO {
            return None;
        }

        // Highest slot is recycled as the new bottom
        let slot = (self.head + self.levels.len() - 1) % self.levels.len();
        self.levels[slot] = PriceLevel::empty(new_price);
        self.head = slot;

        Some(&self.levels[slot])
    }

    /// Atomically swap the entire level sequence.
    ///
    /// The replacement must keep the current level count, be strictly increasing in price with
    /// uniform spacing, and hold no negative volume. On failure the ladder is left untouched.
    pub fn replace_window(&mut self, levels: Vec<PriceLevel>) -> Result<(), SimulationError> {
        if self.is_empty() {
            return Err(SimulationError::EmptyLadder);
        }

        if levels.len() != self.len() {
            return Err(SimulationError::InvalidWindow(format!(
                "expected {} levels, received {}",
                self.len(),
                levels.len()
            )));
        }

        if let Some(level) = levels.iter().find(|level| {
            level.price <= Decimal::ZERO
                || level.bid_volume < Decimal::ZERO
                || level.ask_volume < Decimal::ZERO
        }) {
            return Err(SimulationError::InvalidWindow(format!(
                "level {level:?} has a non-positive price or negative volume"
            )));
        }

        let spacing = levels
            .iter()
            .tuple_windows()
            .map(|(a, b)| b.price - a.price)
            .all_equal_value();

        let tick_size = match spacing {
            Ok(spacing) if spacing > Decimal::ZERO => spacing,
            Ok(spacing) => {
                return Err(SimulationError::InvalidWindow(format!(
                    "prices must be strictly increasing, found spacing {spacing}"
                )));
            }
            // Single level window, nothing to compare against
            Err(None) => self.tick_size,
            Err(Some((first, other))) => {
                return Err(SimulationError::InvalidWindow(format!(
                    "prices must be evenly spaced, found spacing {first} and {other}"
                )));
            }
        };

        self.levels = levels;
        self.head = 0;
        self.tick_size = tick_size;

        Ok(())
    }

    fn slot(&self, index: usize) -> Result<usize, SimulationError> {
        if index < self.levels.len() {
            Ok((self.head + index) % self.levels.len())
        } else {
            Err(SimulationError::IndexOutOfRange {
                index,
                len: self.levels.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_strictly_increasing(ladder: &PriceLadder) {
        for (a, b) in ladder.iter().tuple_windows() {
            assert!(a.price < b.price, "{} !< {}", a.price, b.price);
            assert_eq!(b.price - a.price, ladder.tick_size());
        }
    }

    #[test]
    fn test_initialize() {
        let ladder = PriceLadder::new(dec!(1.07255), dec!(0.0050), 100, 5).unwrap();

        assert_eq!(ladder.len(), 100);
        assert_eq!(ladder.tick_size(), dec!(0.00005));
        assert_eq!(ladder.bottom().unwrap().price, dec!(1.07005));
        assert_eq!(ladder.top().unwrap().price, dec!(1.07500));
        assert_eq!(ladder.center_price(), Some(dec!(1.07255)));
        assert!(ladder.iter().all(PriceLevel::is_empty));
        assert_strictly_increasing(&ladder);
    }

    #[test]
    fn test_initialize_invalid_configuration() {
        struct TestCase {
            center_price: Decimal,
            range: Decimal,
            level_count: usize,
        }

        let tests = vec![
            TestCase {
                // TC0: zero level count
                center_price: dec!(1.07255),
                range: dec!(0.0050),
                level_count: 0,
            },
            TestCase {
                // TC1: zero range
                center_price: dec!(1.07255),
                range: dec!(0),
                level_count: 100,
            },
            TestCase {
                // TC2: negative range
                center_price: dec!(1.07255),
                range: dec!(-1),
                level_count: 100,
            },
            TestCase {
                // TC3: level width would be rounded, pushing the top level out of the band
                center_price: dec!(1.07255),
                range: dec!(0.0049),
                level_count: 100,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let mut ladder = PriceLadder::default();
            let actual = ladder.initialize(test.center_price, test.range, test.level_count);
            assert!(
                matches!(actual, Err(SimulationError::InvalidConfiguration(_))),
                "TC{} failed",
                index
            );
            assert!(ladder.is_empty(), "TC{} failed", index);
        }
    }

    #[test]
    fn test_level_at_out_of_range() {
        let ladder = PriceLadder::new(dec!(100), dec!(10), 10, 2).unwrap();

        assert_eq!(ladder.level_at(9).unwrap().price, dec!(104));
        assert_eq!(
            ladder.level_at(10),
            Err(SimulationError::IndexOutOfRange { index: 10, len: 10 })
        );
        assert_eq!(
            PriceLadder::default().level_at(0),
            Err(SimulationError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_shift_up_recycles_bottom_as_empty_top() {
        let mut ladder = PriceLadder::new(dec!(100), dec!(10), 10, 2).unwrap();
        ladder.level_at_mut(0).unwrap().bid_volume = dec!(5);
        ladder.level_at_mut(9).unwrap().ask_volume = dec!(7);

        let new_top = *ladder.shift_up().unwrap();

        assert_eq!(new_top, PriceLevel::empty(dec!(105)));
        assert_eq!(ladder.len(), 10);
        assert_eq!(ladder.bottom().unwrap().price, dec!(96));
        assert_eq!(ladder.level_at(8).unwrap().ask_volume, dec!(7));
        assert_eq!(ladder.top(), Some(&new_top));
        assert_strictly_increasing(&ladder);
    }

    #[test]
    fn test_shift_down_recycles_top_as_empty_bottom() {
        let mut ladder = PriceLadder::new(dec!(100), dec!(10), 10, 2).unwrap();
        ladder.level_at_mut(0).unwrap().bid_volume = dec!(5);
        ladder.level_at_mut(9).unwrap().ask_volume = dec!(7);

        let new_bottom = *ladder.shift_down().unwrap();

        assert_eq!(new_bottom, PriceLevel::empty(dec!(94)));
        assert_eq!(ladder.len(), 10);
        assert_eq!(ladder.top().unwrap().price, dec!(103));
        assert_eq!(ladder.level_at(1).unwrap().bid_volume, dec!(5));
        assert!(ladder.iter().all(|level| level.ask_volume.is_zero()));
        assert_strictly_increasing(&ladder);
    }

    #[test]
    fn test_shift_wraps_ring_buffer() {
        let mut ladder = PriceLadder::new(dec!(100), dec!(4), 4, 2).unwrap();

        for _ in 0..7 {
            ladder.shift_up();
            assert_strictly_increasing(&ladder);
        }
        for _ in 0..3 {
            ladder.shift_down();
            assert_strictly_increasing(&ladder);
        }

        assert_eq!(ladder.len(), 4);
        assert_eq!(ladder.bottom().unwrap().price, dec!(102));
        assert_eq!(ladder.top().unwrap().price, dec!(105));
    }

    #[test]
    fn test_shift_down_stops_at_zero_floor() {
        let mut ladder = PriceLadder::new(dec!(1.5), dec!(2), 2, 2).unwrap();
        let before = ladder.clone();

        assert!(ladder.shift_down().is_none());
        assert_eq!(ladder, before);
        assert_eq!(ladder.bottom().unwrap().price, dec!(0.5));

        // Upward shifts are unaffected by the floor
        assert_eq!(ladder.shift_up().unwrap().price, dec!(2.5));
        assert_eq!(ladder.shift_down().unwrap().price, dec!(0.5));
    }

    #[test]
    fn test_initialize_spans_band() {
        let center_price = dec!(1.07255);
        let range = dec!(0.0050);
        let ladder = PriceLadder::new(center_price, range, 100, 5).unwrap();

        assert_eq!(ladder.bottom().unwrap().price, center_price - range / Decimal::TWO);
        assert!(ladder.top().unwrap().price < center_price + range / Decimal::TWO);
        assert_eq!(ladder.center_price(), Some(center_price));
    }

    #[test]
    fn test_shift_empty_ladder() {
        let mut ladder = PriceLadder::default();
        assert!(ladder.shift_up().is_none());
        assert!(ladder.shift_down().is_none());
    }

    #[test]
    fn test_replace_window() {
        struct TestCase {
            input: Vec<PriceLevel>,
            expected: Result<(), SimulationError>,
        }

        let tests = vec![
            TestCase {
                // TC0: valid window with new spacing
                input: vec![
                    PriceLevel::new(dec!(10), dec!(1), dec!(0)),
                    PriceLevel::new(dec!(12), dec!(0), dec!(0)),
                    PriceLevel::new(dec!(14), dec!(0), dec!(3)),
                ],
                expected: Ok(()),
            },
            TestCase {
                // TC1: wrong level count
                input: vec![PriceLevel::empty(dec!(10)), PriceLevel::empty(dec!(11))],
                expected: Err(SimulationError::InvalidWindow(
                    "expected 3 levels, received 2".to_string(),
                )),
            },
            TestCase {
                // TC2: unordered prices
                input: vec![
                    PriceLevel::empty(dec!(12)),
                    PriceLevel::empty(dec!(11)),
                    PriceLevel::empty(dec!(10)),
                ],
                expected: Err(SimulationError::InvalidWindow(
                    "prices must be strictly increasing, found spacing -1".to_string(),
                )),
            },
            TestCase {
                // TC3: uneven spacing
                input: vec![
                    PriceLevel::empty(dec!(10)),
                    PriceLevel::empty(dec!(11)),
                    PriceLevel::empty(dec!(13)),
                ],
                expected: Err(SimulationError::InvalidWindow(
                    "prices must be evenly spaced, found spacing 1 and 2".to_string(),
                )),
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let mut ladder = PriceLadder::new(dec!(100), dec!(3), 3, 2).unwrap();
            let before = ladder.clone();
            let input = test.input.clone();

            let actual = ladder.replace_window(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);

            match actual {
                Ok(()) => {
                    assert_eq!(ladder.to_vec(), input, "TC{} failed", index);
                    assert_eq!(ladder.tick_size(), dec!(2), "TC{} failed", index);
                }
                Err(_) => assert_eq!(ladder, before, "TC{} failed", index),
            }
        }
    }

    #[test]
    fn test_replace_window_rejects_negative_volume() {
        let mut ladder = PriceLadder::new(dec!(100), dec!(2), 2, 2).unwrap();
        let actual = ladder.replace_window(vec![
            PriceLevel::new(dec!(99), dec!(-1), dec!(0)),
            PriceLevel::empty(dec!(100)),
        ]);
        assert!(matches!(actual, Err(SimulationError::InvalidWindow(_))));
    }

    #[test]
    fn test_replace_window_after_rotation_resets_order() {
        let mut ladder = PriceLadder::new(dec!(100), dec!(4), 4, 2).unwrap();
        ladder.shift_up();
        ladder.shift_up();
        let levels = ladder.to_vec();

        ladder.replace_window(levels.clone()).unwrap();

        assert_eq!(ladder.to_vec(), levels);
        assert_strictly_increasing(&ladder);
    }

    #[test]
    fn test_replace_window_empty_ladder() {
        let mut ladder = PriceLadder::default();
        assert_eq!(
            ladder.replace_window(vec![PriceLevel::empty(dec!(1))]),
            Err(SimulationError::EmptyLadder)
        );
    }
}
