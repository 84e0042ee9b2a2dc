//! Configuration of the number-task environments.
use crate::{
    error::NumTaskError,
    outcome::RewardShaping,
    stimulus::ColorPair,
    task::TaskType,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Smallest grid size with room for the cue, the agent and eight slots.
pub const MIN_GRID_SIZE: usize = 5;

/// Configuration of [`NumTaskGridEnv`](crate::NumTaskGridEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct NumTaskGridConfig {
    /// Inner size of the room. The grid is `size + 2` cells wide, walls included.
    pub size: usize,

    /// The active task. Drawn at construction when `None`.
    pub task: Option<TaskType>,

    /// Palette indices of the two colors of the color task.
    pub color_indices: [usize; 2],

    /// Draw a fresh layout at every reset.
    pub shuffle_task_locations: bool,

    /// Reward of a correct pickup. `None` uses the time-decayed reward.
    pub positive_reward: Option<f32>,

    /// Reward of a wrong pickup.
    pub negative_reward: f32,

    /// Overrides the seed given to [`Env::build`](numtask_core::Env::build).
    pub seed: Option<u64>,
}

impl Default for NumTaskGridConfig {
    fn default() -> Self {
        Self {
            size: 9,
            task: None,
            color_indices: [1, 2],
            shuffle_task_locations: true,
            positive_reward: None,
            negative_reward: 0.0,
            seed: None,
        }
    }
}

impl NumTaskGridConfig {
    /// Sets the inner size of the room.
    pub fn size(mut self, v: usize) -> Self {
        self.size = v;
        self
    }

    /// Pins the active task.
    pub fn task(mut self, v: Option<TaskType>) -> Self {
        self.task = v;
        self
    }

    /// Sets the palette indices of the color task.
    pub fn color_indices(mut self, v: [usize; 2]) -> Self {
        self.color_indices = v;
        self
    }

    /// Sets whether the layout is redrawn at every reset.
    pub fn shuffle_task_locations(mut self, v: bool) -> Self {
        self.shuffle_task_locations = v;
        self
    }

    /// Sets a fixed reward for correct pickups.
    pub fn positive_reward(mut self, v: Option<f32>) -> Self {
        self.positive_reward = v;
        self
    }

    /// Sets the reward of wrong pickups.
    pub fn negative_reward(mut self, v: f32) -> Self {
        self.negative_reward = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: Option<u64>) -> Self {
        self.seed = v;
        self
    }

    /// Step budget of an episode, `4 * size^2`.
    pub fn max_steps(&self) -> usize {
        4 * self.size * self.size
    }

    /// Reward shaping of the grid arena. Non-terminal ticks are worth 0.
    pub fn shaping(&self) -> RewardShaping {
        RewardShaping {
            positive: self.positive_reward,
            negative: self.negative_reward,
            step: 0.0,
        }
    }

    /// Checks the configuration and resolves the color pair.
    pub fn validate(&self) -> Result<ColorPair, NumTaskError> {
        if self.size < MIN_GRID_SIZE {
            return Err(NumTaskError::InvalidConfig(format!(
                "grid size must be at least {}, got {}",
                MIN_GRID_SIZE, self.size
            )));
        }
        ColorPair::from_indices(self.color_indices)
    }

    /// Constructs [`NumTaskGridConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`NumTaskGridConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Configuration of [`NumTaskCorridorEnv`](crate::NumTaskCorridorEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct NumTaskCorridorConfig {
    /// Width of the top bar, walls excluded.
    pub width: usize,

    /// Height of the corridor, walls excluded.
    pub height: usize,

    /// The active task. Drawn at construction when `None`.
    pub task: Option<TaskType>,

    /// Show the stimuli of every task, one pair per task.
    pub show_all_tasks: bool,

    /// Palette indices of the two colors of the color task.
    pub color_indices: [usize; 2],

    /// Draw a fresh layout at every reset.
    pub shuffle_task_locations: bool,

    /// Reward of a correct goal. `None` uses the time-decayed reward.
    pub positive_reward: Option<f32>,

    /// Reward of a wrong goal.
    pub negative_reward: f32,

    /// Reward of every non-terminal step.
    pub step_reward: f32,

    /// Overrides the seed given to [`Env::build`](numtask_core::Env::build).
    pub seed: Option<u64>,
}

impl Default for NumTaskCorridorConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            task: None,
            show_all_tasks: false,
            color_indices: [1, 2],
            shuffle_task_locations: false,
            positive_reward: None,
            negative_reward: 0.0,
            step_reward: 0.0,
            seed: None,
        }
    }
}

impl NumTaskCorridorConfig {
    /// Sets the width of the top bar.
    pub fn width(mut self, v: usize) -> Self {
        self.width = v;
        self
    }

    /// Sets the height of the corridor.
    pub fn height(mut self, v: usize) -> Self {
        self.height = v;
        self
    }

    /// Pins the active task.
    pub fn task(mut self, v: Option<TaskType>) -> Self {
        self.task = v;
        self
    }

    /// Sets whether the stimuli of every task are shown.
    pub fn show_all_tasks(mut self, v: bool) -> Self {
        self.show_all_tasks = v;
        self
    }

    /// Sets the palette indices of the color task.
    pub fn color_indices(mut self, v: [usize; 2]) -> Self {
        self.color_indices = v;
        self
    }

    /// Sets whether the layout is redrawn at every reset.
    pub fn shuffle_task_locations(mut self, v: bool) -> Self {
        self.shuffle_task_locations = v;
        self
    }

    /// Sets a fixed reward for correct goals.
    pub fn positive_reward(mut self, v: Option<f32>) -> Self {
        self.positive_reward = v;
        self
    }

    /// Sets the reward of wrong goals.
    pub fn negative_reward(mut self, v: f32) -> Self {
        self.negative_reward = v;
        self
    }

    /// Sets the reward of non-terminal steps.
    pub fn step_reward(mut self, v: f32) -> Self {
        self.step_reward = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: Option<u64>) -> Self {
        self.seed = v;
        self
    }

    /// Step budget of an episode, `4 * max(width, height)^2`.
    pub fn max_steps(&self) -> usize {
        let side = self.width.max(self.height);
        4 * side * side
    }

    /// Reward shaping of the corridor.
    pub fn shaping(&self) -> RewardShaping {
        RewardShaping {
            positive: self.positive_reward,
            negative: self.negative_reward,
            step: self.step_reward,
        }
    }

    /// Checks the configuration and resolves the color pair.
    ///
    /// The top bar needs two goal ends with the stem strictly between them,
    /// so the width must be at least 3.
    pub fn validate(&self) -> Result<ColorPair, NumTaskError> {
        if self.width < 3 {
            return Err(NumTaskError::InvalidConfig(format!(
                "corridor width must be at least 3, got {}",
                self.width
            )));
        }
        if self.height == 0 {
            return Err(NumTaskError::InvalidConfig(
                "corridor height must be at least 1".to_string(),
            ));
        }
        ColorPair::from_indices(self.color_indices)
    }

    /// Constructs [`NumTaskCorridorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`NumTaskCorridorConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
