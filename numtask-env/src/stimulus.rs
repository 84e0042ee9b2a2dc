//! Stimuli: the placeable answers to a task.
use crate::{
    error::NumTaskError,
    task::{GroundTruth, TaskType},
};
use serde::{Deserialize, Serialize};

/// Colors of the arena palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Green,
    Blue,
    Purple,
    Yellow,
    Grey,
}

impl Color {
    /// The palette, indexed by color index.
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Yellow,
        Color::Grey,
    ];

    /// Looks up a palette color.
    pub fn from_index(ix: usize) -> Result<Self, NumTaskError> {
        Self::PALETTE
            .get(ix)
            .copied()
            .ok_or(NumTaskError::InvalidColorIndex(ix))
    }

    /// Index in the palette, used in observation encoding.
    pub fn index(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Purple => 3,
            Color::Yellow => 4,
            Color::Grey => 5,
        }
    }
}

/// The two colors of the color task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair([Color; 2]);

impl ColorPair {
    /// Resolves configured palette indices into a color pair.
    ///
    /// The two indices must name two different palette colors, otherwise the
    /// color task would have two correct balls.
    pub fn from_indices(indices: [usize; 2]) -> Result<Self, NumTaskError> {
        let pair = [Color::from_index(indices[0])?, Color::from_index(indices[1])?];
        if pair[0] == pair[1] {
            return Err(NumTaskError::InvalidConfig(format!(
                "color indices must differ, got {:?}",
                indices
            )));
        }
        Ok(Self(pair))
    }

    /// The color at position `ix` (0 or 1) of the pair.
    pub fn get(&self, ix: usize) -> Color {
        debug_assert!(ix < 2, "color pair index {} out of range", ix);
        self.0[ix]
    }

    /// The correct color under the given ground truth.
    pub fn correct(&self, truth: &GroundTruth) -> Color {
        self.get(truth.correct_color_index)
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self([Color::Green, Color::Blue])
    }
}

/// Text shown on a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerText {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `0`
    Zero,
    /// `1`
    One,
}

impl MarkerText {
    /// The character shown on the marker.
    pub fn as_char(self) -> char {
        match self {
            MarkerText::Plus => '+',
            MarkerText::Minus => '-',
            MarkerText::Zero => '0',
            MarkerText::One => '1',
        }
    }

    /// Code of the text in observation encoding.
    pub fn code(self) -> u8 {
        match self {
            MarkerText::Plus => 0,
            MarkerText::Minus => 1,
            MarkerText::Zero => 2,
            MarkerText::One => 3,
        }
    }
}

/// A placeable answer to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stimulus {
    /// A colored ball, answer to the color task.
    Ball(Color),

    /// A grey marker with a sign or bit, answer to the magnitude or parity task.
    Marker(MarkerText),
}

impl Stimulus {
    /// Color the stimulus is drawn with. Markers are always grey.
    pub fn color(&self) -> Color {
        match self {
            Stimulus::Ball(c) => *c,
            Stimulus::Marker(_) => Color::Grey,
        }
    }

    /// The task this stimulus answers.
    pub fn task(&self) -> TaskType {
        match self {
            Stimulus::Ball(_) => TaskType::Color,
            Stimulus::Marker(MarkerText::Plus | MarkerText::Minus) => TaskType::Magnitude,
            Stimulus::Marker(MarkerText::Zero | MarkerText::One) => TaskType::Parity,
        }
    }
}

/// The two stimuli of a task.
///
/// For the color task the first ball carries the correct color of `truth`.
/// Marker pairs are always `('+', '-')` and `('0', '1')`: which one is correct
/// is decided when the interaction is scored.
pub fn build_stimuli(task: TaskType, truth: &GroundTruth, palette: &ColorPair) -> (Stimulus, Stimulus) {
    match task {
        TaskType::Color => (
            Stimulus::Ball(palette.get(truth.correct_color_index)),
            Stimulus::Ball(palette.get((truth.correct_color_index + 1) % 2)),
        ),
        TaskType::Magnitude => (
            Stimulus::Marker(MarkerText::Plus),
            Stimulus::Marker(MarkerText::Minus),
        ),
        TaskType::Parity => (
            Stimulus::Marker(MarkerText::Zero),
            Stimulus::Marker(MarkerText::One),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_pair() {
        let pair = ColorPair::from_indices([1, 2]).unwrap();
        assert_eq!(pair, ColorPair::default());
        assert_eq!(pair.get(0), Color::Green);
        assert_eq!(pair.get(1), Color::Blue);
        assert_eq!(
            ColorPair::from_indices([1, 6]),
            Err(NumTaskError::InvalidColorIndex(6))
        );
        assert!(ColorPair::from_indices([3, 3]).is_err());
    }

    #[test]
    #[should_panic]
    fn test_color_pair_index_out_of_range() {
        ColorPair::default().get(2);
    }

    #[test]
    fn test_build_color_stimuli() {
        let pair = ColorPair::from_indices([0, 4]).unwrap();
        let truth = GroundTruth::new(2, 1).unwrap();
        let (a, b) = build_stimuli(TaskType::Color, &truth, &pair);
        assert_eq!(a, Stimulus::Ball(Color::Yellow));
        assert_eq!(b, Stimulus::Ball(Color::Red));
    }

    #[test]
    fn test_stimulus_task() {
        let truth = GroundTruth::new(2, 0).unwrap();
        let pair = ColorPair::default();
        for task in TaskType::ALL {
            let (a, b) = build_stimuli(task, &truth, &pair);
            assert_eq!(a.task(), task);
            assert_eq!(b.task(), task);
            assert_ne!(a, b);
        }
    }
}
