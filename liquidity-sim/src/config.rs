use crate::{error::SimulationError, ladder::DEFAULT_PRICE_SCALE};
use derive_more::Constructor;
use rand::Rng;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Largest scale a [`Decimal`] can represent.
const MAX_SCALE: u32 = 28;

/// Decimal places volumes are quantised to when no explicit scale is provided.
pub const DEFAULT_VOLUME_SCALE: u32 = 8;

/// Construction parameters for a [`LiquiditySimulator`](crate::simulator::LiquiditySimulator).
///
/// Set once at construction. [`Default`] provides the reference FX-style parameters
/// (EURUSD-like center price, 100 levels of 0.00005).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Price the ladder window is initially centered on.
    pub center_price: Decimal,

    /// Total price span of the ladder window.
    pub range: Decimal,

    /// Number of levels in the ladder, constant for the lifetime of the simulation.
    pub level_count: usize,

    /// Decimal places prices are quantised to.
    pub price_scale: u32,

    /// Decimal places volumes are quantised to after every mutation.
    pub volume_scale: u32,

    /// Range each level's per-tick retention factor is drawn from.
    pub retention: DecimalRange,

    /// Range the volume of an injected spike is drawn from.
    pub spike_magnitude: DecimalRange,

    /// Probability a tick injects a liquidity spike.
    pub injection_probability: f64,

    /// Probability a tick shifts the ladder window up by one level.
    pub drift_up_probability: f64,

    /// Probability a tick shifts the ladder window down by one level.
    pub drift_down_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            center_price: dec!(1.07255),
            range: dec!(0.0050),
            level_count: 100,
            price_scale: DEFAULT_PRICE_SCALE,
            volume_scale: DEFAULT_VOLUME_SCALE,
            retention: DecimalRange::new(dec!(0.95), dec!(0.99)),
            spike_magnitude: DecimalRange::new(dec!(50), dec!(250)),
            injection_probability: 0.5,
            drift_up_probability: 0.10,
            drift_down_probability: 0.10,
        }
    }
}

impl SimulationConfig {
    /// Spacing between adjacent levels, `range / level_count` quantised to `price_scale`.
    ///
    /// Returns `None` if `level_count` is zero.
    pub fn tick_size(&self) -> Option<Decimal> {
        ladder_tick_size(self.range, self.level_count, self.price_scale)
    }

    /// Validate every parameter, failing with [`SimulationError::InvalidConfiguration`] on the
    /// first violation found.
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_ladder_geometry(
            self.center_price,
            self.range,
            self.level_count,
            self.price_scale,
        )?;

        if self.volume_scale > MAX_SCALE {
            return Err(invalid(format!(
                "volume_scale {} exceeds maximum {MAX_SCALE}",
                self.volume_scale
            )));
        }

        self.retention.validate("retention")?;
        if self.retention.max > Decimal::ONE {
            return Err(invalid(format!(
                "retention max {} must be <= 1",
                self.retention.max
            )));
        }

        self.spike_magnitude.validate("spike_magnitude")?;

        validate_probability("injection_probability", self.injection_probability)?;
        validate_probability("drift_up_probability", self.drift_up_probability)?;
        validate_probability("drift_down_probability", self.drift_down_probability)?;

        if self.drift_up_probability + self.drift_down_probability > 1.0 {
            return Err(invalid(format!(
                "drift_up_probability {} + drift_down_probability {} must be <= 1",
                self.drift_up_probability, self.drift_down_probability
            )));
        }

        Ok(())
    }
}

/// Inclusive-exclusive `[min, max)` range of [`Decimal`] values that uniform samples are
/// drawn from.
///
/// A degenerate range (`min == max`) always samples `min`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Constructor)]
pub struct DecimalRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl DecimalRange {
    /// Draw a uniformly distributed value from this range.
    pub fn sample<R>(&self, rng: &mut R) -> Decimal
    where
        R: Rng,
    {
        let unit = Decimal::from_f64(rng.random::<f64>()).unwrap_or(Decimal::ZERO);
        self.min + (self.max - self.min) * unit
    }

    fn validate(&self, name: &str) -> Result<(), SimulationError> {
        if self.min < Decimal::ZERO {
            return Err(invalid(format!("{name} min {} must be >= 0", self.min)));
        }
        if self.min > self.max {
            return Err(invalid(format!(
                "{name} min {} must be <= max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

pub(crate) fn ladder_tick_size(range: Decimal, level_count: usize, scale: u32) -> Option<Decimal> {
    (level_count > 0).then(|| (range / Decimal::from(level_count)).round_dp(scale))
}

/// Validate the parameters that shape a [`PriceLadder`](crate::ladder::PriceLadder).
pub(crate) fn validate_ladder_geometry(
    center_price: Decimal,
    range: Decimal,
    level_count: usize,
    price_scale: u32,
) -> Result<(), SimulationError> {
    if level_count == 0 {
        return Err(invalid("level_count must be > 0".to_string()));
    }
    if range <= Decimal::ZERO {
        return Err(invalid(format!("range {range} must be > 0")));
    }
    if center_price <= Decimal::ZERO {
        return Err(invalid(format!("center_price {center_price} must be > 0")));
    }
    if price_scale > MAX_SCALE {
        return Err(invalid(format!(
            "price_scale {price_scale} exceeds maximum {MAX_SCALE}"
        )));
    }

    let width = range / Decimal::from(level_count);
    match ladder_tick_size(range, level_count, price_scale) {
        Some(tick_size) if tick_size <= Decimal::ZERO => {
            return Err(invalid(format!(
                "range {range} over {level_count} levels rounds to a zero level width at \
                 {price_scale} decimal places"
            )));
        }
        Some(tick_size) if tick_size != width => {
            return Err(invalid(format!(
                "range {range} over {level_count} levels gives level width {width}, which is \
                 not exact at {price_scale} decimal places"
            )));
        }
        Some(_) => {}
        None => return Err(invalid("level_count must be > 0".to_string())),
    }

    let lowest = center_price - range / Decimal::TWO;
    if lowest.round_dp(price_scale) != lowest {
        return Err(invalid(format!(
            "lowest level price {lowest} is not exact at {price_scale} decimal places \
             (center_price {center_price}, range {range})"
        )));
    }
    if lowest <= Decimal::ZERO {
        return Err(invalid(format!(
            "lowest level price {lowest} must be > 0 (center_price {center_price}, range {range})"
        )));
    }

    Ok(())
}

fn validate_probability(name: &str, value: f64) -> Result<(), SimulationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} {value} must be within [0, 1]")))
    }
}

fn invalid(message: String) -> SimulationError {
    SimulationError::InvalidConfiguration(message)
}
