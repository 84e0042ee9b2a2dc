//! The corridor variant: a T-maze, or a nose-poke box when it is one row high.
use crate::{
    arena::{Direction, GridArena, MiniArena, Pos, WorldObject},
    config::NumTaskCorridorConfig,
    episode::{Episode, EpisodeOptions},
    error::NumTaskError,
    obs::{NumTaskAct, NumTaskObs},
    outcome::{EpisodePhase, RawOutcome},
    placement::{Slot, SlotScheme, StimulusPlacer},
};
use anyhow::Result;
use log::{error, info, trace, warn};
use numtask_core::{record::Record, Env, Step};

/// Fixed geometry of a corridor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorridorLayout {
    /// Grid width, walls included.
    pub width: usize,

    /// Grid height, walls included.
    pub height: usize,

    /// Column of the stem.
    pub mid: usize,

    /// Left and right goal tiles at the ends of the top bar.
    pub goals: [Pos; 2],

    /// Cell of the digit cue, in the top wall above the stem.
    pub cue: Pos,

    /// Start cell of the agent, at the bottom of the stem.
    pub start: Pos,
}

impl CorridorLayout {
    /// Geometry of a corridor with a top bar `width` cells wide and `height` rows high.
    pub fn new(width: usize, height: usize) -> Self {
        let mid = (width + 1) / 2;
        let (w, h) = (width + 2, height + 2);
        Self {
            width: w,
            height: h,
            mid,
            goals: [(1, 1), (width, 1)],
            cue: (mid, 0),
            start: (mid, h - 2),
        }
    }

    /// Wall cells beside the two goals, where the active task's stimuli are shown.
    pub fn sides(&self) -> [Slot; 2] {
        [(0, 1), (self.width - 1, 1)]
    }

    /// One pair of wall cells per task: beside, above and below the goals.
    pub fn pairs(&self) -> [[Slot; 2]; 3] {
        let right = self.width - 2;
        [
            self.sides(),
            [(1, 0), (right, 0)],
            [(1, 2), (right, 2)],
        ]
    }

    /// Index of the goal at `pos`, `0` left and `1` right.
    pub fn goal_index(&self, pos: Pos) -> Option<usize> {
        self.goals.iter().position(|&g| g == pos)
    }

    /// Walls, display niches and goals, without cue, stimuli or agent.
    fn arena(&self, show_all_tasks: bool, max_steps: usize) -> Result<MiniArena, NumTaskError> {
        let mut arena = MiniArena::new(self.width, self.height, max_steps);
        arena.wall_rect(0, 0, self.width, self.height);
        if self.height - 1 > 2 {
            for x in 1..self.width - 1 {
                if x != self.mid {
                    arena.vert_wall(x, 2, self.height - 3);
                }
            }
        }

        arena.set_niche(self.cue);
        let niches = if show_all_tasks {
            self.pairs().concat()
        } else {
            self.sides().to_vec()
        };
        for pos in niches {
            arena.set_niche(pos);
        }
        for &goal in self.goals.iter() {
            arena.put_object(WorldObject::Goal, goal)?;
        }
        Ok(arena)
    }
}

/// A corridor whose two ends are goal tiles labelled with stimuli.
///
/// The agent starts at the bottom of the stem facing up; the digit is shown in
/// the wall above the stem. Walking onto a goal ends the episode and scores the
/// active task's stimulus shown next to that goal. In show-all mode every task
/// labels the goals with one stimulus pair, but only the active task is scored.
pub struct NumTaskCorridorEnv {
    config: NumTaskCorridorConfig,
    layout: CorridorLayout,
    episode: Episode,
    arena: MiniArena,
}

impl NumTaskCorridorEnv {
    /// The corridor geometry.
    pub fn layout(&self) -> &CorridorLayout {
        &self.layout
    }

    /// The episode state.
    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    /// The arena.
    pub fn arena(&self) -> &MiniArena {
        &self.arena
    }

    fn gen_grid(&mut self) -> Result<(), NumTaskError> {
        let truth = self.episode.begin();
        let mut arena = self
            .layout
            .arena(self.config.show_all_tasks, self.config.max_steps())?;

        let cue = WorldObject::Cue {
            digit: truth.digit,
            color: self.episode.placer().palette().correct(&truth),
        };
        arena.put_object(cue, self.layout.cue)?;
        arena.place_agent(self.layout.start, Direction::Up);

        self.episode.place(&mut arena)?;
        self.arena = arena;
        Ok(())
    }

    fn obs(&self) -> NumTaskObs {
        NumTaskObs::from_arena(&self.arena)
    }
}

impl Env for NumTaskCorridorEnv {
    type Config = NumTaskCorridorConfig;
    type Obs = NumTaskObs;
    type Act = NumTaskAct;
    type Info = ();

    /// Builds the environment.
    ///
    /// `config.seed`, when set, overrides `seed`. The episode does not start
    /// before the first [`Env::reset`].
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let palette = config.validate()?;
        let seed = config.seed.unwrap_or(seed as u64);
        let layout = CorridorLayout::new(config.width, config.height);
        let scheme = if config.show_all_tasks {
            SlotScheme::PairPerTask(layout.pairs())
        } else {
            SlotScheme::Sides(layout.sides())
        };
        let options = EpisodeOptions {
            task: config.task,
            shuffle: config.shuffle_task_locations,
            pickable: false,
            shaping: config.shaping(),
        };
        let arena = layout.arena(config.show_all_tasks, config.max_steps())?;
        info!(
            "Build NumTaskCorridorEnv: {}x{}, show_all_tasks = {}, seed = {}",
            config.width, config.height, config.show_all_tasks, seed
        );

        Ok(Self {
            config: config.clone(),
            episode: Episode::new(options, StimulusPlacer::new(scheme, palette)?, seed),
            layout,
            arena,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        trace!("NumTaskCorridorEnv::step({:?})", a);

        if self.episode.phase() != EpisodePhase::Acting {
            warn!(
                "step() called in phase {:?}; call reset() to start an episode",
                self.episode.phase()
            );
            let (is_terminated, is_truncated) = self.episode.idle_flags();
            let step = Step::new(self.obs(), *a, 0.0, is_terminated, is_truncated, ());
            return (step, self.episode.record(RawOutcome::Nothing));
        }

        let arena_step = self.arena.step(a.0);
        let shaped = self.arena.shaped_reward();
        let (outcome, reward) = match self.layout.goal_index(self.arena.agent_pos()) {
            Some(goal) => {
                let label = self
                    .episode
                    .locations()
                    .at_goal(goal, self.episode.task())
                    .map(|p| p.stimulus);
                self.episode.score(label.as_ref(), shaped)
            }
            None => self.episode.score(None, shaped),
        };

        let is_terminated = outcome.is_terminal() || arena_step.terminated;
        let is_truncated = !is_terminated && arena_step.truncated;
        if is_terminated || is_truncated {
            self.episode.finish(outcome, reward, is_truncated);
        }

        let step = Step::new(self.obs(), *a, reward, is_terminated, is_truncated, ());
        (step, self.episode.record(outcome))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        trace!("NumTaskCorridorEnv::reset()");
        self.gen_grid()?;
        Ok(self.obs())
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            step.init_obs = match self.reset() {
                Ok(obs) => Some(obs),
                Err(e) => {
                    error!("Failed to reset NumTaskCorridorEnv: {}", e);
                    None
                }
            };
        }
        (step, record)
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        trace!("NumTaskCorridorEnv::reset_with_index({})", ix);
        self.episode.reseed(ix as u64);
        self.reset()
    }
}
