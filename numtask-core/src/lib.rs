#![warn(missing_docs)]
//! Environment abstractions for number-task grid worlds.
//!
//! The crate defines the small set of traits and types an environment and the code
//! driving it agree on:
//!
//! * [`Env`] - an episodic environment with a seeded constructor,
//! * [`Step`] - what an environment emits at every interaction step,
//! * [`Obs`], [`Act`] and [`Info`] - the types flowing through a [`Step`],
//! * [`Policy`] - a mapping from observations to actions,
//! * [`record`] - key-value records emitted alongside steps,
//! * [`Evaluator`] - runs a policy for a number of episodes.
//!
//! Concrete environments live in the `numtask-env` crate.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
