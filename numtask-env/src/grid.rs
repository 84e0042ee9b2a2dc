//! The grid-arena variant: a room with the digit in the middle.
use crate::{
    arena::{Action, Direction, GridArena, MiniArena, WorldObject},
    config::NumTaskGridConfig,
    episode::{Episode, EpisodeOptions},
    error::NumTaskError,
    obs::{NumTaskAct, NumTaskObs},
    outcome::{EpisodePhase, RawOutcome},
    placement::{Slot, SlotScheme, StimulusPlacer},
};
use anyhow::Result;
use log::{error, info, trace, warn};
use numtask_core::{record::Record, Env, Step};

/// A walled room with the digit cue in the centre and eight candidate
/// stimulus slots at the corners and edge midpoints.
///
/// Every reset draws a digit and a correct color, turns the agent to a random
/// direction just below the cue and places two stimuli per task. Picking a
/// stimulus up ends the episode and scores it against the active task.
pub struct NumTaskGridEnv {
    config: NumTaskGridConfig,
    episode: Episode,
    arena: MiniArena,
}

impl NumTaskGridEnv {
    /// Column and row of the cue.
    pub fn mid(&self) -> usize {
        (self.config.size + 1) / 2
    }

    /// The eight candidate slots of a room of inner size `size`.
    pub fn candidate_slots(size: usize) -> Vec<Slot> {
        let mid = (size + 1) / 2;
        vec![
            (1, 1),
            (1, mid),
            (1, size),
            (mid, 1),
            (mid, size),
            (size, 1),
            (size, mid),
            (size, size),
        ]
    }

    /// The episode state.
    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    /// The arena.
    pub fn arena(&self) -> &MiniArena {
        &self.arena
    }

    fn empty_room(config: &NumTaskGridConfig) -> MiniArena {
        let side = config.size + 2;
        let mut arena = MiniArena::new(side, side, config.max_steps());
        arena.wall_rect(0, 0, side, side);
        arena
    }

    fn gen_grid(&mut self) -> Result<(), NumTaskError> {
        let truth = self.episode.begin();
        let mid = self.mid();
        let mut arena = Self::empty_room(&self.config);

        let cue = WorldObject::Cue {
            digit: truth.digit,
            color: self.episode.placer().palette().correct(&truth),
        };
        arena.put_object(cue, (mid, mid))?;
        let dir = Direction::ALL[self.episode.rng_mut().uniform_int(0, Direction::ALL.len())];
        arena.place_agent((mid, mid + 1), dir);

        self.episode.place(&mut arena)?;
        self.arena = arena;
        Ok(())
    }

    fn obs(&self) -> NumTaskObs {
        NumTaskObs::from_arena(&self.arena)
    }
}

impl Env for NumTaskGridEnv {
    type Config = NumTaskGridConfig;
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
        let placer = StimulusPlacer::new(
            SlotScheme::Scattered(Self::candidate_slots(config.size)),
            palette,
        )?;
        let options = EpisodeOptions {
            task: config.task,
            shuffle: config.shuffle_task_locations,
            pickable: true,
            shaping: config.shaping(),
        };
        info!("Build NumTaskGridEnv: size = {}, seed = {}", config.size, seed);

        Ok(Self {
            config: config.clone(),
            episode: Episode::new(options, placer, seed),
            arena: Self::empty_room(config),
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        trace!("NumTaskGridEnv::step({:?})", a);

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
        let (outcome, reward) = if a.0 == Action::Pickup {
            let carried = self.arena.carrying().and_then(|obj| obj.stimulus()).copied();
            self.episode.score(carried.as_ref(), self.arena.shaped_reward())
        } else {
            (RawOutcome::Nothing, arena_step.reward)
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
        trace!("NumTaskGridEnv::reset()");
        self.gen_grid()?;
        Ok(self.obs())
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            step.init_obs = match self.reset() {
                Ok(obs) => Some(obs),
                Err(e) => {
                    error!("Failed to reset NumTaskGridEnv: {}", e);
                    None
                }
            };
        }
        (step, record)
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        trace!("NumTaskGridEnv::reset_with_index({})", ix);
        self.episode.reseed(ix as u64);
        self.reset()
    }
}
