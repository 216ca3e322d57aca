use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One price point of a [`PriceLadder`](crate::ladder::PriceLadder), carrying the resting bid
/// and ask volume at that price.
///
/// Volumes are never negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub bid_volume: Decimal,
    pub ask_volume: Decimal,
}

impl PriceLevel {
    /// Construct an empty [`PriceLevel`] (zero bid and ask volume) at the provided price.
    pub fn empty(price: Decimal) -> Self {
        Self {
            price,
            bid_volume: Decimal::ZERO,
            ask_volume: Decimal::ZERO,
        }
    }

    pub fn new<T>(price: T, bid_volume: T, ask_volume: T) -> Self
    where
        T: Into<Decimal>,
    {
        Self {
            price: price.into(),
            bid_volume: bid_volume.into(),
            ask_volume: ask_volume.into(),
        }
    }

    /// Return the resting volume on the provided [`Side`].
    pub fn volume(&self, side: Side) -> Decimal {
        match side {
            Side::Bid => self.bid_volume,
            Side::Ask => self.ask_volume,
        }
    }

    /// Return a mutable reference to the resting volume on the provided [`Side`].
    pub fn volume_mut(&mut self, side: Side) -> &mut Decimal {
        match side {
            Side::Bid => &mut self.bid_volume,
            Side::Ask => &mut self.ask_volume,
        }
    }

    /// Returns true if no volume rests on either side of this level.
    pub fn is_empty(&self) -> bool {
        self.bid_volume.is_zero() && self.ask_volume.is_zero()
    }
}

/// Side of a [`PriceLevel`] that liquidity rests on.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[display("bid")]
    Bid,
    #[display("ask")]
    Ask,
}

/// Single sided order book [`Level`], used when a ladder is viewed as separate bid and ask books.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Default, Deserialize, Serialize)]
pub struct Level {
    pub price: Decimal,
    pub amount: Decimal,
}

impl<T> From<(T, T)> for Level
where
    T: Into<Decimal>,
{
    fn from((price, amount): (T, T)) -> Self {
        Self::new(price, amount)
    }
}

impl Level {
    pub fn new<T>(price: T, amount: T) -> Self
    where
        T: Into<Decimal>,
    {
        Self {
            price: price.into(),
            amount: amount.into(),
        }
    }
}
