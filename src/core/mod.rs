//! Core pipeline logic
//!
//! The whole system is one linear pipeline: load the reference map and
//! encounter sequence, derive an event per step, occasionally inject a
//! data-quality fault, and publish at a fixed pace.
//!
//! - [`derive`] - date parsing, age computation, numeric coercion
//! - [`faults`] - probabilistic data-quality fault injection
//! - [`generator`] - the infinite cyclic event generator
//! - [`driver`] - the bounded, paced publish loop

pub mod derive;
pub mod driver;
pub mod faults;
pub mod generator;

pub use driver::{StreamDriver, StreamSummary};
pub use faults::{Clock, FaultInjector, RandomSource, SystemClock, ThreadRandom};
pub use generator::EventGenerator;
