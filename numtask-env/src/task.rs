//! Task types, ground truth and their selection.
use crate::{error::NumTaskError, rng::EpisodeRng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The hidden task the agent has to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Pick the ball whose color matches the color of the displayed digit.
    Color,

    /// Pick `+` if the digit is at least 5, `-` otherwise.
    Magnitude,

    /// Pick `0` if the digit is even, `1` otherwise.
    Parity,
}

impl TaskType {
    /// All task types, in catalog order.
    ///
    /// Placement and sampling iterate over this array, never over a hash map,
    /// so the order of random draws is fixed.
    pub const ALL: [TaskType; 3] = [TaskType::Color, TaskType::Magnitude, TaskType::Parity];

    /// Position in [`TaskType::ALL`].
    pub fn index(self) -> usize {
        match self {
            TaskType::Color => 0,
            TaskType::Magnitude => 1,
            TaskType::Parity => 2,
        }
    }

    /// The lowercase name of the task.
    pub fn name(self) -> &'static str {
        match self {
            TaskType::Color => "color",
            TaskType::Magnitude => "magnitude",
            TaskType::Parity => "parity",
        }
    }

    /// Draws a task uniformly.
    pub fn sample(rng: &mut EpisodeRng) -> Self {
        Self::ALL[rng.uniform_int(0, Self::ALL.len())]
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskType {
    type Err = NumTaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "color" => Ok(TaskType::Color),
            "magnitude" => Ok(TaskType::Magnitude),
            "parity" => Ok(TaskType::Parity),
            _ => Err(NumTaskError::InvalidTask(s.to_string())),
        }
    }
}

/// Hidden values every task of an episode is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundTruth {
    /// The displayed digit, in `0..=9`.
    pub digit: u8,

    /// Which color of the configured pair is correct, `0` or `1`.
    pub correct_color_index: usize,
}

impl GroundTruth {
    /// Constructs ground truth, checking the ranges.
    pub fn new(digit: u8, correct_color_index: usize) -> Result<Self, NumTaskError> {
        if digit > 9 {
            return Err(NumTaskError::InvalidConfig(format!(
                "digit must be in 0..=9, got {}",
                digit
            )));
        }
        if correct_color_index > 1 {
            return Err(NumTaskError::InvalidConfig(format!(
                "correct color index must be 0 or 1, got {}",
                correct_color_index
            )));
        }
        Ok(Self {
            digit,
            correct_color_index,
        })
    }

    /// `true` if `+` is the correct magnitude answer.
    pub fn is_large(&self) -> bool {
        self.digit >= 5
    }

    /// `true` if `0` is the correct parity answer.
    pub fn is_even(&self) -> bool {
        self.digit % 2 == 0
    }
}

/// Returns the configured task, or draws one when none is configured.
pub fn select(configured: Option<TaskType>, rng: &mut EpisodeRng) -> TaskType {
    match configured {
        Some(task) => task,
        None => TaskType::sample(rng),
    }
}

/// Draws the digit and then the correct color bit.
pub fn sample_ground_truth(rng: &mut EpisodeRng) -> GroundTruth {
    let digit = rng.uniform_int(0, 10) as u8;
    let correct_color_index = rng.uniform_int(0, 2);
    GroundTruth {
        digit,
        correct_color_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task() {
        assert_eq!("color".parse::<TaskType>(), Ok(TaskType::Color));
        assert_eq!("magnitude".parse::<TaskType>(), Ok(TaskType::Magnitude));
        assert_eq!("parity".parse::<TaskType>(), Ok(TaskType::Parity));
        assert_eq!(
            "shape".parse::<TaskType>(),
            Err(NumTaskError::InvalidTask("shape".to_string()))
        );
    }

    #[test]
    fn test_pinned_task_consumes_no_draw() {
        let mut a = EpisodeRng::from_seed(11);
        let mut b = EpisodeRng::from_seed(11);
        assert_eq!(select(Some(TaskType::Parity), &mut a), TaskType::Parity);
        assert_eq!(a.uniform_int(0, 1000), b.uniform_int(0, 1000));
    }

    #[test]
    fn test_select_is_reproducible() {
        for seed in 0..20 {
            let t1 = select(None, &mut EpisodeRng::from_seed(seed));
            let t2 = select(None, &mut EpisodeRng::from_seed(seed));
            assert_eq!(t1, t2);
        }
    }

    #[test]
    fn test_select_covers_all_tasks() {
        let mut rng = EpisodeRng::from_seed(0);
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[select(None, &mut rng).index()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_ground_truth_ranges() {
        let mut rng = EpisodeRng::from_seed(5);
        for _ in 0..200 {
            let gt = sample_ground_truth(&mut rng);
            assert!(gt.digit <= 9);
            assert!(gt.correct_color_index <= 1);
        }
    }

    #[test]
    fn test_boundaries() {
        assert!(GroundTruth::new(5, 0).unwrap().is_large());
        assert!(!GroundTruth::new(4, 0).unwrap().is_large());
        assert!(GroundTruth::new(0, 0).unwrap().is_even());
        assert!(GroundTruth::new(10, 0).is_err());
        assert!(GroundTruth::new(3, 2).is_err());
    }
}
