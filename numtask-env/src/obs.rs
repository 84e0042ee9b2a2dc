//! Observation and action of the number-task environments.
use crate::{
    arena::{Action, Direction, GridArena, Pos},
    error::NumTaskError,
};
use numtask_core::{Act, Obs};
use std::convert::TryFrom;

/// Fully-observable view of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumTaskObs {
    /// `[object, color, state]` per cell, row by row.
    pub grid: Vec<u8>,

    /// Width of the grid.
    pub width: usize,

    /// Height of the grid.
    pub height: usize,

    /// Position of the agent.
    pub agent_pos: Pos,

    /// Direction the agent faces.
    pub agent_dir: Direction,
}

impl NumTaskObs {
    /// Snapshots an arena.
    pub fn from_arena<A: GridArena>(arena: &A) -> Self {
        Self {
            grid: arena.encode(),
            width: arena.width(),
            height: arena.height(),
            agent_pos: arena.agent_pos(),
            agent_dir: arena.agent_dir(),
        }
    }

    /// The `[object, color, state]` triple of a cell.
    pub fn cell(&self, (x, y): Pos) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let ix = (y * self.width + x) * 3;
        self.grid.get(ix..ix + 3)
    }
}

impl Obs for NumTaskObs {}

/// Action of the number-task environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumTaskAct(pub Action);

impl Act for NumTaskAct {}

impl From<Action> for NumTaskAct {
    fn from(a: Action) -> Self {
        Self(a)
    }
}

impl TryFrom<u8> for NumTaskAct {
    type Error = NumTaskError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(Self(Action::try_from(v)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{object_ids, MiniArena};

    #[test]
    fn test_obs_from_arena() {
        let mut arena = MiniArena::new(4, 3, 10);
        arena.wall_rect(0, 0, 4, 3);
        arena.place_agent((1, 1), Direction::Down);
        let obs = NumTaskObs::from_arena(&arena);

        assert_eq!(obs.grid.len(), 4 * 3 * 3);
        assert_eq!(obs.agent_pos, (1, 1));
        assert_eq!(obs.cell((0, 0)).unwrap()[0], object_ids::WALL);
        assert_eq!(obs.cell((2, 1)).unwrap()[0], object_ids::EMPTY);
        assert_eq!(obs.cell((1, 1)).unwrap(), &[object_ids::AGENT, 0, 1]);
        assert!(obs.cell((4, 0)).is_none());
    }

    #[test]
    fn test_act_from_index() {
        assert_eq!(NumTaskAct::try_from(3u8), Ok(NumTaskAct(Action::Pickup)));
        assert!(NumTaskAct::try_from(9u8).is_err());
    }
}
