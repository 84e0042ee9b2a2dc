#![warn(missing_docs)]
//! Number-task grid worlds.
//!
//! A digit is displayed in a small fully-observable grid world and the agent
//! has to answer one of three hidden tasks about it by interacting with a
//! stimulus:
//!
//! * color: the ball whose color matches the color the digit is drawn in,
//! * magnitude: `+` if the digit is at least 5, `-` otherwise,
//! * parity: `0` if the digit is even, `1` otherwise.
//!
//! Two environments implement [`numtask_core::Env`]:
//!
//! * [`NumTaskGridEnv`] - a room with two stimuli per task scattered over eight
//!   slots. Picking a stimulus up ends the episode.
//! * [`NumTaskCorridorEnv`] - a T-maze (or a one-row nose-poke box) whose two
//!   goal tiles are labelled with stimuli. Reaching a goal ends the episode.
//!
//! The building blocks are exposed as well: [`task`] selects the task and draws
//! the ground truth, [`placement`] lays out the stimuli, [`outcome`] scores an
//! interaction, and [`arena`] is the grid simulation underneath.
//!
//! ```no_run
//! use anyhow::Result;
//! use numtask_core::Env;
//! use numtask_env::{arena::Action, NumTaskAct, NumTaskGridConfig, NumTaskGridEnv, TaskType};
//!
//! fn main() -> Result<()> {
//!     let config = NumTaskGridConfig::default().task(Some(TaskType::Parity));
//!     let mut env = NumTaskGridEnv::build(&config, 42)?;
//!     let _obs = env.reset()?;
//!     let (step, record) = env.step(&NumTaskAct(Action::Pickup));
//!     println!("{} {:?}", step.reward, record.get_string("task"));
//!     Ok(())
//! }
//! ```
pub mod arena;
mod config;
mod corridor;
mod episode;
mod error;
mod grid;
mod obs;
pub mod outcome;
pub mod placement;
mod presets;
mod rng;
pub mod stimulus;
pub mod task;

pub use config::{NumTaskCorridorConfig, NumTaskGridConfig, MIN_GRID_SIZE};
pub use corridor::{CorridorLayout, NumTaskCorridorEnv};
pub use episode::{Episode, EpisodeOptions};
pub use error::NumTaskError;
pub use grid::NumTaskGridEnv;
pub use obs::{NumTaskAct, NumTaskObs};
pub use presets::{Preset, PresetConfig};
pub use rng::EpisodeRng;
pub use task::{GroundTruth, TaskType};
