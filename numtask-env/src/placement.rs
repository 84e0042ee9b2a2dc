//! Assignment of stimuli to arena slots.
//!
//! [`StimulusPlacer::place`] is a pure function of the previous layout, the
//! layout state, the shuffle flag and the random draws it makes: it returns a
//! [`TaskLocations`] and leaves writing it into an arena to
//! [`TaskLocations::apply`].
use crate::{
    arena::{GridArena, Pos, WorldObject},
    error::NumTaskError,
    rng::EpisodeRng,
    stimulus::{build_stimuli, ColorPair, Stimulus},
    task::{GroundTruth, TaskType},
};
use log::debug;
use std::collections::HashSet;

/// A cell eligible to hold one stimulus or goal.
pub type Slot = Pos;

/// One stimulus at one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The task the stimulus answers.
    pub task: TaskType,

    /// The stimulus.
    pub stimulus: Stimulus,

    /// Where it is shown.
    pub slot: Slot,

    /// Index of the corridor goal the stimulus labels, `0` left and `1` right.
    /// `None` in the grid arena.
    pub goal: Option<usize>,
}

/// The layout of an episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskLocations(Vec<Placement>);

impl TaskLocations {
    /// Builds a layout, refusing two placements on the same slot.
    pub fn new(placements: Vec<Placement>) -> Result<Self, NumTaskError> {
        let mut seen = HashSet::new();
        for p in placements.iter() {
            if !seen.insert(p.slot) {
                return Err(NumTaskError::SlotCollision {
                    x: p.slot.0,
                    y: p.slot.1,
                });
            }
        }
        Ok(Self(placements))
    }

    /// Iterates over the placements.
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.0.iter()
    }

    /// Number of placed stimuli.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The placements of one task.
    pub fn for_task(&self, task: TaskType) -> impl Iterator<Item = &Placement> {
        self.0.iter().filter(move |p| p.task == task)
    }

    /// The stimulus of `task` labelling corridor goal `goal`.
    pub fn at_goal(&self, goal: usize, task: TaskType) -> Option<&Placement> {
        self.0
            .iter()
            .find(|p| p.goal == Some(goal) && p.task == task)
    }

    /// `true` if every task in `tasks` has its two stimuli placed.
    pub fn covers(&self, tasks: &[TaskType]) -> bool {
        tasks.iter().all(|&t| self.for_task(t).count() == 2)
    }

    /// Writes the layout into an arena.
    pub fn apply<A: GridArena>(&self, arena: &mut A, pickable: bool) -> Result<(), NumTaskError> {
        for p in self.0.iter() {
            let object = WorldObject::Stimulus {
                stimulus: p.stimulus,
                pickable,
            };
            arena.put_object(object, p.slot)?;
        }
        Ok(())
    }
}

/// Whether the layout of the last episode is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// The next placement draws a fresh layout.
    Dirty,

    /// The next placement replays the previous layout.
    Stable,
}

/// Where stimuli may go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotScheme {
    /// Grid arena: every task gets two slots, drawn without replacement from
    /// the candidates.
    Scattered(Vec<Slot>),

    /// Corridor: only the active task's pair, next to the left and right goal.
    Sides([Slot; 2]),

    /// Corridor showing all tasks: one `[left, right]` pair per task.
    PairPerTask([[Slot; 2]; 3]),
}

/// Builds and places the stimuli of an episode.
#[derive(Debug, Clone)]
pub struct StimulusPlacer {
    scheme: SlotScheme,
    palette: ColorPair,
}

impl StimulusPlacer {
    /// Constructs a placer.
    pub fn new(scheme: SlotScheme, palette: ColorPair) -> Result<Self, NumTaskError> {
        if let SlotScheme::Scattered(slots) = &scheme {
            let distinct = slots.iter().collect::<HashSet<_>>().len();
            if distinct < 2 * TaskType::ALL.len() {
                return Err(NumTaskError::InvalidConfig(format!(
                    "{} distinct slots cannot hold {} stimuli",
                    distinct,
                    2 * TaskType::ALL.len()
                )));
            }
        }
        Ok(Self { scheme, palette })
    }

    /// The color pair of the color task.
    pub fn palette(&self) -> &ColorPair {
        &self.palette
    }

    /// Tasks whose stimuli this scheme places when `active` is the active task.
    pub fn placed_tasks(&self, active: TaskType) -> Vec<TaskType> {
        match self.scheme {
            SlotScheme::Sides(_) => vec![active],
            SlotScheme::Scattered(_) | SlotScheme::PairPerTask(_) => TaskType::ALL.to_vec(),
        }
    }

    /// Computes the layout of a new episode.
    ///
    /// With `state == Stable` and `shuffle == false`, `previous` is returned
    /// unchanged and no random number is drawn, as long as it holds the stimuli
    /// of every task this scheme places. Otherwise a fresh layout is drawn:
    ///
    /// * `Scattered`: one permutation of the candidate slots; task `t` of
    ///   [`TaskType::ALL`] takes slots `perm[2t]` and `perm[2t + 1]`.
    /// * `Sides`: the active task's pair, in permuted order when shuffling.
    /// * `PairPerTask`: the pairs are permuted across tasks and the stimuli
    ///   within each pair are permuted, both only when shuffling.
    pub fn place(
        &self,
        state: LayoutState,
        previous: &TaskLocations,
        shuffle: bool,
        active: TaskType,
        truth: &GroundTruth,
        rng: &mut EpisodeRng,
    ) -> Result<TaskLocations, NumTaskError> {
        if state == LayoutState::Stable
            && !shuffle
            && previous.covers(&self.placed_tasks(active))
        {
            debug!("Replay layout of {} stimuli", previous.len());
            return Ok(previous.clone());
        }

        let placements = match &self.scheme {
            SlotScheme::Scattered(slots) => {
                let perm = rng.permutation(slots.len());
                let mut placements = Vec::with_capacity(2 * TaskType::ALL.len());
                for (t, task) in TaskType::ALL.iter().enumerate() {
                    let (first, second) = build_stimuli(*task, truth, &self.palette);
                    for (s, stimulus) in [first, second].into_iter().enumerate() {
                        placements.push(Placement {
                            task: *task,
                            stimulus,
                            slot: slots[perm[t * 2 + s]],
                            goal: None,
                        });
                    }
                }
                placements
            }
            SlotScheme::Sides(sides) => self.place_pair(active, sides, shuffle, truth, rng),
            SlotScheme::PairPerTask(pairs) => {
                let order = permutation_or_identity(pairs.len(), shuffle, rng);
                TaskType::ALL
                    .iter()
                    .enumerate()
                    .flat_map(|(t, task)| {
                        self.place_pair(*task, &pairs[order[t]], shuffle, truth, rng)
                    })
                    .collect()
            }
        };

        let locations = TaskLocations::new(placements)?;
        debug!("Fresh layout: {:?}", locations);
        Ok(locations)
    }

    fn place_pair(
        &self,
        task: TaskType,
        sides: &[Slot; 2],
        shuffle: bool,
        truth: &GroundTruth,
        rng: &mut EpisodeRng,
    ) -> Vec<Placement> {
        let (first, second) = build_stimuli(task, truth, &self.palette);
        let stimuli = [first, second];
        let order = permutation_or_identity(2, shuffle, rng);
        sides
            .iter()
            .enumerate()
            .map(|(goal, &slot)| Placement {
                task,
                stimulus: stimuli[order[goal]],
                slot,
                goal: Some(goal),
            })
            .collect()
    }
}

fn permutation_or_identity(n: usize, shuffle: bool, rng: &mut EpisodeRng) -> Vec<usize> {
    if shuffle {
        rng.permutation(n)
    } else {
        (0..n).collect()
    }
}
