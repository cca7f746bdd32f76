//! # mallowflight
//!
//! Simulation core for a population of flying androids threading a scrolling course of
//! marshmallow sticks. Each android is steered by an external decision controller and
//! scored through a paired fitness accumulator; the core never looks inside either.
//!
//! ```rust
//! use mallowflight::simulation::{SimRng, SimulationState, TickOutcome};
//! use mallowflight::controller::Sensors;
//! use rand::SeedableRng;
//!
//! // Three androids that never flap.
//! let idle = |_: Sensors| -> f32 { 0.0 };
//! let mut state = SimulationState::new(vec![(idle, 0.0_f64); 3], SimRng::seed_from_u64(1));
//! while let TickOutcome::Running { .. } = state.tick() {}
//! assert!(state.is_extinct());
//! ```

pub mod android;
pub mod config;
pub mod constants;
pub mod controller;
pub mod driver;
pub mod error;
pub mod ground;
pub mod mask;
pub mod pipe;
pub mod simulation;
pub mod sprites;
pub mod utils;

pub use config::RunConfig;
pub use controller::{DecisionController, FitnessAccumulator, PopulationProvider, Presenter};
pub use driver::{RunOutcome, RunReport, SimulationLoop};
pub use error::{Result, SimError};
pub use simulation::{SimRng, SimulationState, Snapshot, TickOutcome};
