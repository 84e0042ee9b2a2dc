//! The grid arena the number tasks are played in.
//!
//! Environments only talk to the arena through [`GridArena`]: they write the
//! layout with [`GridArena::put_object`], forward the agent's actions to
//! [`GridArena::step`] and read back the agent's pose and the object it
//! carries. [`MiniArena`] is a small fully-observable implementation.
mod grid;
use crate::{
    error::NumTaskError,
    stimulus::{Color, Stimulus},
};
pub use grid::MiniArena;
use std::convert::TryFrom;

/// A cell position `(x, y)`, `x` growing to the right and `y` downwards.
pub type Pos = (usize, usize);

/// Direction the agent faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Towards growing `x`.
    Right = 0,
    /// Towards growing `y`.
    Down = 1,
    /// Towards `x = 0`.
    Left = 2,
    /// Towards `y = 0`.
    Up = 3,
}

impl Direction {
    /// All directions, by index.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Turns clockwise.
    pub fn right(self) -> Self {
        Self::ALL[(self as usize + 1) % 4]
    }

    /// Turns counter-clockwise.
    pub fn left(self) -> Self {
        Self::ALL[(self as usize + 3) % 4]
    }

    /// Unit step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }
}

/// Actions of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    /// Turn left.
    Left = 0,
    /// Turn right.
    Right = 1,
    /// Move one cell forward.
    Forward = 2,
    /// Pick up the object in front of the agent.
    Pickup = 3,
    /// Drop the carried object in front of the agent.
    Drop = 4,
    /// Interact with the object in front of the agent. Nothing in these arenas reacts to it.
    Toggle = 5,
    /// Declare the episode done. Has no effect on the arena.
    Done = 6,
}

impl Action {
    /// Number of actions.
    pub const N: usize = 7;
}

impl TryFrom<u8> for Action {
    type Error = NumTaskError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            0 => Action::Left,
            1 => Action::Right,
            2 => Action::Forward,
            3 => Action::Pickup,
            4 => Action::Drop,
            5 => Action::Toggle,
            6 => Action::Done,
            _ => {
                return Err(NumTaskError::InvalidConfig(format!(
                    "action index {} out of range 0..{}",
                    v,
                    Action::N
                )))
            }
        })
    }
}

/// Objects living in arena cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldObject {
    /// A goal tile. Walking onto it ends the arena episode.
    Goal,

    /// A stimulus. Only pickable stimuli can be carried.
    Stimulus {
        /// The stimulus.
        stimulus: Stimulus,
        /// Whether [`Action::Pickup`] can take it.
        pickable: bool,
    },

    /// The displayed digit, drawn in the correct color of the episode.
    Cue {
        /// The digit.
        digit: u8,
        /// Drawing color.
        color: Color,
    },
}

impl WorldObject {
    /// Object id used in observation encoding.
    pub fn type_id(&self) -> u8 {
        match self {
            WorldObject::Goal => object_ids::GOAL,
            WorldObject::Stimulus {
                stimulus: Stimulus::Ball(_),
                ..
            } => object_ids::BALL,
            WorldObject::Stimulus {
                stimulus: Stimulus::Marker(_),
                ..
            } => object_ids::MARKER,
            WorldObject::Cue { .. } => object_ids::CUE,
        }
    }

    /// The stimulus, if this object is one.
    pub fn stimulus(&self) -> Option<&Stimulus> {
        match self {
            WorldObject::Stimulus { stimulus, .. } => Some(stimulus),
            _ => None,
        }
    }

    /// `[object, color, state]` encoding of the object.
    pub fn encode(&self) -> [u8; 3] {
        match self {
            WorldObject::Goal => [object_ids::GOAL, Color::Green.index(), 0],
            WorldObject::Stimulus { stimulus, .. } => {
                let state = match stimulus {
                    Stimulus::Ball(_) => 0,
                    Stimulus::Marker(text) => text.code(),
                };
                [self.type_id(), stimulus.color().index(), state]
            }
            WorldObject::Cue { digit, color } => [object_ids::CUE, color.index(), *digit],
        }
    }
}

/// Object ids of the observation encoding.
pub mod object_ids {
    /// Floor without an object.
    pub const EMPTY: u8 = 1;
    /// Wall, including empty wall niches.
    pub const WALL: u8 = 2;
    /// Ball stimulus.
    pub const BALL: u8 = 6;
    /// Goal tile.
    pub const GOAL: u8 = 8;
    /// The agent.
    pub const AGENT: u8 = 10;
    /// Marker stimulus.
    pub const MARKER: u8 = 11;
    /// Digit cue.
    pub const CUE: u8 = 12;
}

/// Outcome of one arena tick, before any task scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaStep {
    /// Reward of the arena itself: the shaped reward on reaching a goal, 0 otherwise.
    pub reward: f32,

    /// The agent reached a goal tile.
    pub terminated: bool,

    /// The step budget is exhausted.
    pub truncated: bool,
}

/// The grid simulation a number-task environment runs on.
pub trait GridArena {
    /// Width of the grid in cells, walls included.
    fn width(&self) -> usize;

    /// Height of the grid in cells, walls included.
    fn height(&self) -> usize;

    /// Places an object.
    ///
    /// Fails with [`NumTaskError::SlotCollision`] if the cell already holds an
    /// object or is a solid wall. Placement never overwrites.
    fn put_object(&mut self, object: WorldObject, pos: Pos) -> Result<(), NumTaskError>;

    /// The object in a cell.
    fn object_at(&self, pos: Pos) -> Option<&WorldObject>;

    /// Position of the agent.
    fn agent_pos(&self) -> Pos;

    /// Direction the agent faces.
    fn agent_dir(&self) -> Direction;

    /// The object the agent carries.
    fn carrying(&self) -> Option<&WorldObject>;

    /// Applies one action.
    fn step(&mut self, action: Action) -> ArenaStep;

    /// Time-decayed success reward, `1 - 0.9 * step_count / max_steps`.
    fn shaped_reward(&self) -> f32 {
        1.0 - 0.9 * (self.step_count() as f32 / self.max_steps() as f32)
    }

    /// Number of steps taken.
    fn step_count(&self) -> usize;

    /// Step budget.
    fn max_steps(&self) -> usize;

    /// Full-grid observation, `[object, color, state]` per cell, rows first.
    fn encode(&self) -> Vec<u8>;
}
