use crate::{
    config::SimulationConfig,
    decay::DecayModel,
    drift::DriftController,
    error::SimulationError,
    inject::LiquidityInjector,
    ladder::PriceLadder,
    snapshot::LadderSnapshot,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use tracing::{info, trace, warn};

/// Synthetic order-book depth simulator.
///
/// Owns a [`PriceLadder`] and evolves it one [`tick`](Self::tick) at a time by composing a
/// [`DecayModel`], a [`LiquidityInjector`] and a [`DriftController`]. State is read via
/// [`snapshot`](Self::snapshot) and [`current_price`](Self::current_price) (pull based).
///
/// All randomness comes from the injected `Rng`, so two simulators constructed with the same
/// configuration and seed produce identical ticks.
///
/// The simulator does not own a timer; the caller decides when to tick. Ticks mutate internal
/// state, so concurrent ticking of one instance must be serialised by the caller.
#[derive(Debug, Clone)]
pub struct LiquiditySimulator<R = StdRng> {
    config: SimulationConfig,
    ladder: PriceLadder,
    decay: DecayModel,
    injector: LiquidityInjector,
    drift: DriftController,
    rng: R,
    ticks: u64,
}

impl LiquiditySimulator<StdRng> {
    /// Construct a [`LiquiditySimulator`] driven by a [`StdRng`] seeded with `seed`.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Construct a [`LiquiditySimulator`] driven by a [`StdRng`] seeded from the operating
    /// system's entropy source.
    pub fn from_os_rng(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R> LiquiditySimulator<R>
where
    R: Rng,
{
    /// Construct a [`LiquiditySimulator`] driven by the provided random source.
    ///
    /// Fails with [`SimulationError::InvalidConfiguration`] if the config does not validate.
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self, SimulationError> {
        config.validate()?;

        let ladder = PriceLadder::new(
            config.center_price,
            config.range,
            config.level_count,
            config.price_scale,
        )?;

        info!(
            center_price = %config.center_price,
            range = %config.range,
            level_count = config.level_count,
            tick_size = %ladder.tick_size(),
            "initialised LiquiditySimulator"
        );

        Ok(Self {
            decay: DecayModel::new(config.retention, config.volume_scale),
            injector: LiquidityInjector::new(config.spike_magnitude, config.volume_scale),
            drift: DriftController::new(config.drift_up_probability, config.drift_down_probability),
            config,
            ladder,
            rng,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of ticks completed since construction (or since the last restore).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Read-only view of the engine's [`PriceLadder`].
    pub fn ladder(&self) -> &PriceLadder {
        &self.ladder
    }

    /// Advance the simulation by one tick, in fixed order:
    /// 1. Decay every level.
    /// 2. With `injection_probability`, inject one liquidity spike.
    /// 3. Evaluate drift.
    ///
    /// Decay runs first so freshly injected volume is never decayed in the tick it arrives.
    pub fn tick(&mut self) {
        self.decay.decay(&mut self.ladder, &mut self.rng);

        if self.rng.random_bool(self.config.injection_probability) {
            // Ladder is non-empty from construction onwards
            if let Err(error) = self.injector.inject_spike(&mut self.ladder, &mut self.rng) {
                warn!(%error, "failed to inject liquidity spike");
            }
        }

        let drift = self.drift.drift(&mut self.ladder, &mut self.rng);

        self.ticks += 1;
        trace!(sequence = self.ticks, %drift, "completed tick");
    }

    /// Deep copy of the current ladder state.
    pub fn snapshot(&self) -> LadderSnapshot {
        LadderSnapshot::new(self.ticks, self.ladder.to_vec())
    }

    /// Price of the ladder's structural center level (index `level_count / 2`).
    ///
    /// A deliberately simplified representative quote, not a best bid/ask midpoint.
    pub fn current_price(&self) -> Decimal {
        self.ladder.center_price().unwrap_or(Decimal::ZERO)
    }

    /// Replace the engine state with a previously taken [`LadderSnapshot`].
    ///
    /// The snapshot must hold exactly `level_count` valid levels, otherwise the engine is left
    /// untouched and [`SimulationError::InvalidWindow`] is returned.
    pub fn restore(&mut self, snapshot: LadderSnapshot) -> Result<(), SimulationError> {
        self.ladder.replace_window(snapshot.levels)?;
        self.ticks = snapshot.sequence;
        Ok(())
    }
}
