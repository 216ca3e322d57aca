use crate::ladder::PriceLadder;
use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Models the center price moving by exactly one level per tick, with low probability, while
/// keeping the [`PriceLadder`] level count fixed.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct DriftController {
    pub up_probability: f64,
    pub down_probability: f64,
}

/// Direction a [`DriftController`] moved the [`PriceLadder`] window during a tick.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize, Display,
)]
pub enum Drift {
    #[display("up")]
    Up,
    #[display("down")]
    Down,
    #[default]
    #[display("none")]
    None,
}

impl DriftController {
    pub fn new(up_probability: f64, down_probability: f64) -> Self {
        Self {
            up_probability,
            down_probability,
        }
    }

    /// Draw a single uniform `r` in `[0, 1)` and shift the ladder window:
    /// * `r < up_probability`: up by one level.
    /// * `r > 1 - down_probability`: down by one level.
    /// * otherwise: no change.
    ///
    /// Up is checked first, so a tick never drifts both ways. The new boundary level always
    /// starts with zero volume. A down drift that would produce a non-positive price is
    /// suppressed.
    pub fn drift<R>(&self, ladder: &mut PriceLadder, rng: &mut R) -> Drift
    where
        R: Rng,
    {
        let r = rng.random::<f64>();

        if r < self.up_probability {
            match ladder.shift_up() {
                Some(top) => {
                    debug!(price = %top.price, "ladder drifted up");
                    Drift::Up
                }
                None => Drift::None,
            }
        } else if r > 1.0 - self.down_probability {
            match ladder.shift_down() {
                Some(bottom) => {
                    debug!(price = %bottom.price, "ladder drifted down");
                    Drift::Down
                }
                None => {
                    debug!("suppressed down drift");
                    Drift::None
                }
            }
        } else {
            Drift::None
        }
    }
}
