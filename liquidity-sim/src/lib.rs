#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]

//! # Liquidity Sim
//! Seedable synthetic order-book depth simulator, producing plausible and continuously evolving
//! market depth for liquidity heatmaps, depth charts, order-book panels and tests.
//!
//! ## Overview
//! A [`LiquiditySimulator`] owns a fixed size [`PriceLadder`] of evenly spaced
//! [`PriceLevel`](level::PriceLevel)s centered on a configurable price. Every
//! [`tick`](LiquiditySimulator::tick) it:
//! * **Decays** all resting volume by a random 1-5% ([`DecayModel`](decay::DecayModel)).
//! * **Injects**, half of the time, a random volume spike onto one side of one level
//!   ([`LiquidityInjector`](inject::LiquidityInjector)).
//! * **Drifts**, occasionally, the ladder window up or down by one level
//!   ([`DriftController`](drift::DriftController)).
//!
//! Callers own the timer and pull state on demand via
//! [`snapshot`](LiquiditySimulator::snapshot) and
//! [`current_price`](LiquiditySimulator::current_price).
//!
//! ## Getting Started
//! ```
//! use liquidity_sim::{LiquiditySimulator, config::SimulationConfig};
//!
//! let mut simulator = LiquiditySimulator::new(SimulationConfig::default(), 42).unwrap();
//!
//! for _ in 0..10 {
//!     simulator.tick();
//! }
//!
//! let snapshot = simulator.snapshot();
//! assert_eq!(snapshot.len(), 100);
//! assert_eq!(snapshot.sequence, 10);
//! ```

/// All [`Error`](std::error::Error)s generated in `liquidity-sim`.
pub mod error;

/// [`SimulationConfig`](config::SimulationConfig) construction parameters.
pub mod config;

/// [`PriceLevel`](level::PriceLevel) and single sided [`Level`](level::Level) data types.
pub mod level;

/// Fixed size ring buffer of evenly spaced price levels.
pub mod ladder;

/// Random liquidity spike injection.
pub mod inject;

/// Multiplicative per-tick volume decay.
pub mod decay;

/// Single level window drift.
pub mod drift;

/// Immutable [`LadderSnapshot`](snapshot::LadderSnapshot)s and derived depth views.
pub mod snapshot;

/// [`LiquiditySimulator`] composing decay, injection and drift into ticks.
pub mod simulator;

/// `tracing` subscriber initialisation.
pub mod logging;

pub use ladder::PriceLadder;
pub use simulator::LiquiditySimulator;
