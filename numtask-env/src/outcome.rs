//! Scoring of the agent's interactions.
use crate::{
    stimulus::{ColorPair, MarkerText, Stimulus},
    task::{GroundTruth, TaskType},
};
use serde::{Deserialize, Serialize};

/// Raw result of an interaction, before reward shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawOutcome {
    /// The interaction answers the active task correctly. Raw reward +1.
    Correct,

    /// The interaction answers wrongly, or with a stimulus of another task. Raw reward -1.
    Incorrect,

    /// Nothing to score, e.g. a pickup with empty hands. Raw reward 0.
    Nothing,
}

impl RawOutcome {
    /// The raw reward in `{+1, -1, 0}`.
    pub fn raw_reward(self) -> i8 {
        match self {
            RawOutcome::Correct => 1,
            RawOutcome::Incorrect => -1,
            RawOutcome::Nothing => 0,
        }
    }

    /// `true` if the outcome ends the episode.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RawOutcome::Nothing)
    }
}

/// Scores an interacted stimulus against the active task.
///
/// `None` means the agent interacted with nothing; it is not an error and not
/// terminal. A stimulus belonging to another task is always [`RawOutcome::Incorrect`].
pub fn evaluate(
    task: TaskType,
    truth: &GroundTruth,
    palette: &ColorPair,
    interacted: Option<&Stimulus>,
) -> RawOutcome {
    let stimulus = match interacted {
        Some(s) => s,
        None => return RawOutcome::Nothing,
    };

    let correct = match (task, stimulus) {
        (TaskType::Color, Stimulus::Ball(color)) => *color == palette.correct(truth),
        (TaskType::Magnitude, Stimulus::Marker(text @ (MarkerText::Plus | MarkerText::Minus))) => {
            (*text == MarkerText::Plus) == truth.is_large()
        }
        (TaskType::Parity, Stimulus::Marker(text @ (MarkerText::Zero | MarkerText::One))) => {
            (*text == MarkerText::Zero) == truth.is_even()
        }
        (TaskType::Color, Stimulus::Marker(_))
        | (TaskType::Magnitude, Stimulus::Ball(_) | Stimulus::Marker(MarkerText::Zero | MarkerText::One))
        | (TaskType::Parity, Stimulus::Ball(_) | Stimulus::Marker(MarkerText::Plus | MarkerText::Minus)) => false,
    };

    if correct {
        RawOutcome::Correct
    } else {
        RawOutcome::Incorrect
    }
}

/// Maps raw outcomes to rewards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardShaping {
    /// Reward of a correct answer. `None` uses the arena's time-decayed reward.
    pub positive: Option<f32>,

    /// Reward of a wrong answer.
    pub negative: f32,

    /// Reward of a non-terminal tick.
    pub step: f32,
}

impl Default for RewardShaping {
    fn default() -> Self {
        Self {
            positive: None,
            negative: 0.0,
            step: 0.0,
        }
    }
}

impl RewardShaping {
    /// The reward of an outcome. `shaped` is the arena's time-decayed reward.
    pub fn reward(&self, outcome: RawOutcome, shaped: f32) -> f32 {
        match outcome {
            RawOutcome::Correct => self.positive.unwrap_or(shaped),
            RawOutcome::Incorrect => self.negative,
            RawOutcome::Nothing => self.step,
        }
    }
}

/// Phase of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// Ground truth and layout are being generated.
    Placing,

    /// The agent acts; no terminal interaction happened yet.
    Acting,

    /// The episode ended. Only a reset leaves this phase.
    Scored,
}

impl EpisodePhase {
    /// Name used in step records.
    pub fn name(self) -> &'static str {
        match self {
            EpisodePhase::Placing => "placing",
            EpisodePhase::Acting => "acting",
            EpisodePhase::Scored => "scored",
        }
    }
}
