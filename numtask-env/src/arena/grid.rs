//! A small fully-observable grid arena.
use super::{object_ids, Action, ArenaStep, Direction, GridArena, Pos, WorldObject};
use crate::{error::NumTaskError, stimulus::Color};
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Floor,
    Wall,
    // A wall cell that can display one object. The agent never enters it.
    Niche,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    tile: Tile,
    object: Option<WorldObject>,
}

/// A walled grid with one agent.
///
/// The agent turns, moves forward onto floor and goal tiles, picks up pickable
/// stimuli in front of it into an empty hand and drops them again. Reaching a
/// goal tile terminates the arena episode; exhausting `max_steps` truncates it.
#[derive(Debug, Clone)]
pub struct MiniArena {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    agent_pos: Pos,
    agent_dir: Direction,
    carrying: Option<WorldObject>,
    step_count: usize,
    max_steps: usize,
}

impl MiniArena {
    /// An open floor of the given size, without walls, agent at `(0, 0)`.
    pub fn new(width: usize, height: usize, max_steps: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![
                Cell {
                    tile: Tile::Floor,
                    object: None,
                };
                width * height
            ],
            agent_pos: (0, 0),
            agent_dir: Direction::Right,
            carrying: None,
            step_count: 0,
            max_steps: max_steps.max(1),
        }
    }

    fn ix(&self, (x, y): Pos) -> usize {
        y * self.width + x
    }

    fn in_bounds(&self, (x, y): Pos) -> bool {
        x < self.width && y < self.height
    }

    /// Turns a cell into wall.
    pub fn set_wall(&mut self, pos: Pos) {
        let ix = self.ix(pos);
        self.cells[ix] = Cell {
            tile: Tile::Wall,
            object: None,
        };
    }

    /// Turns a cell into a wall niche that accepts one object.
    pub fn set_niche(&mut self, pos: Pos) {
        let ix = self.ix(pos);
        self.cells[ix].tile = Tile::Niche;
    }

    /// Walls the outline of a rectangle.
    pub fn wall_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for i in x..x + w {
            self.set_wall((i, y));
            self.set_wall((i, y + h - 1));
        }
        for j in y..y + h {
            self.set_wall((x, j));
            self.set_wall((x + w - 1, j));
        }
    }

    /// Walls a vertical segment of `length` cells starting at `(x, y)`.
    pub fn vert_wall(&mut self, x: usize, y: usize, length: usize) {
        for j in y..y + length {
            self.set_wall((x, j));
        }
    }

    /// Puts the agent on a cell.
    pub fn place_agent(&mut self, pos: Pos, dir: Direction) {
        self.agent_pos = pos;
        self.agent_dir = dir;
    }

    /// `true` if the cell is wall or niche.
    pub fn is_wall(&self, pos: Pos) -> bool {
        matches!(self.cells[self.ix(pos)].tile, Tile::Wall | Tile::Niche)
    }

    fn front_pos(&self) -> Option<Pos> {
        let (dx, dy) = self.agent_dir.delta();
        let x = self.agent_pos.0 as isize + dx;
        let y = self.agent_pos.1 as isize + dy;
        if x < 0 || y < 0 {
            return None;
        }
        let pos = (x as usize, y as usize);
        self.in_bounds(pos).then_some(pos)
    }

    fn can_enter(&self, pos: Pos) -> bool {
        let cell = &self.cells[self.ix(pos)];
        cell.tile == Tile::Floor && matches!(cell.object, None | Some(WorldObject::Goal))
    }
}

impl GridArena for MiniArena {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn put_object(&mut self, object: WorldObject, pos: Pos) -> Result<(), NumTaskError> {
        if !self.in_bounds(pos) {
            return Err(NumTaskError::InvalidConfig(format!(
                "cell {:?} outside of a {}x{} arena",
                pos, self.width, self.height
            )));
        }
        let ix = self.ix(pos);
        let cell = &mut self.cells[ix];
        if cell.tile == Tile::Wall || cell.object.is_some() {
            return Err(NumTaskError::SlotCollision { x: pos.0, y: pos.1 });
        }
        cell.object = Some(object);
        Ok(())
    }

    fn object_at(&self, pos: Pos) -> Option<&WorldObject> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.ix(pos)].object.as_ref()
    }

    fn agent_pos(&self) -> Pos {
        self.agent_pos
    }

    fn agent_dir(&self) -> Direction {
        self.agent_dir
    }

    fn carrying(&self) -> Option<&WorldObject> {
        self.carrying.as_ref()
    }

    fn step(&mut self, action: Action) -> ArenaStep {
        self.step_count += 1;
        let mut reward = 0.0;
        let mut terminated = false;

        match action {
            Action::Left => self.agent_dir = self.agent_dir.left(),
            Action::Right => self.agent_dir = self.agent_dir.right(),
            Action::Forward => {
                if let Some(pos) = self.front_pos().filter(|&p| self.can_enter(p)) {
                    self.agent_pos = pos;
                    if self.object_at(pos) == Some(&WorldObject::Goal) {
                        terminated = true;
                        reward = self.shaped_reward();
                    }
                }
            }
            Action::Pickup => {
                if let Some(pos) = self.front_pos() {
                    let ix = self.ix(pos);
                    let pickable = matches!(
                        self.cells[ix].object,
                        Some(WorldObject::Stimulus { pickable: true, .. })
                    );
                    if pickable && self.carrying.is_none() {
                        self.carrying = self.cells[ix].object.take();
                    }
                }
            }
            Action::Drop => {
                if let Some(pos) = self.front_pos() {
                    let ix = self.ix(pos);
                    let cell = &mut self.cells[ix];
                    if cell.tile == Tile::Floor && cell.object.is_none() {
                        cell.object = self.carrying.take();
                    }
                }
            }
            Action::Toggle | Action::Done => {}
        }

        let truncated = self.step_count >= self.max_steps;
        trace!(
            "MiniArena::step({:?}) -> pos = {:?}, dir = {:?}",
            action,
            self.agent_pos,
            self.agent_dir
        );

        ArenaStep {
            reward,
            terminated,
            truncated,
        }
    }

    fn step_count(&self) -> usize {
        self.step_count
    }

    fn max_steps(&self) -> usize {
        self.max_steps
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.width * self.height * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = &self.cells[self.ix((x, y))];
                let code = if (x, y) == self.agent_pos {
                    [object_ids::AGENT, Color::Red.index(), self.agent_dir as u8]
                } else if let Some(obj) = cell.object.as_ref() {
                    obj.encode()
                } else if cell.tile == Tile::Floor {
                    [object_ids::EMPTY, 0, 0]
                } else {
                    [object_ids::WALL, Color::Grey.index(), 0]
                };
                buf.extend_from_slice(&code);
            }
        }
        buf
    }
}
