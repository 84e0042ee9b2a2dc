//! Per-episode task state shared by the grid and corridor environments.
use crate::{
    arena::GridArena,
    error::NumTaskError,
    outcome::{evaluate, EpisodePhase, RawOutcome, RewardShaping},
    placement::{LayoutState, StimulusPlacer, TaskLocations},
    rng::EpisodeRng,
    stimulus::Stimulus,
    task::{sample_ground_truth, select, GroundTruth, TaskType},
};
use log::{debug, info};
use numtask_core::record::{Record, RecordValue};

/// Options of an [`Episode`] that do not change between resets.
#[derive(Debug, Clone)]
pub struct EpisodeOptions {
    /// The pinned task, if any.
    pub task: Option<TaskType>,

    /// Draw a fresh layout at every reset.
    pub shuffle: bool,

    /// Whether the agent can pick the placed stimuli up.
    pub pickable: bool,

    /// Maps outcomes to rewards.
    pub shaping: RewardShaping,
}

/// Task, ground truth and layout of the running episode.
///
/// The environment drives the phases: [`Episode::begin`] enters
/// [`EpisodePhase::Placing`] and draws the ground truth, [`Episode::place`]
/// writes the layout into the arena and enters [`EpisodePhase::Acting`], and
/// [`Episode::finish`] enters [`EpisodePhase::Scored`].
#[derive(Debug, Clone)]
pub struct Episode {
    rng: EpisodeRng,
    options: EpisodeOptions,
    placer: StimulusPlacer,
    task: TaskType,
    truth: GroundTruth,
    layout_state: LayoutState,
    locations: TaskLocations,
    phase: EpisodePhase,
    truncated: bool,
}

impl Episode {
    /// Constructs the episode state and fixes the active task.
    pub fn new(options: EpisodeOptions, placer: StimulusPlacer, seed: u64) -> Self {
        let mut rng = EpisodeRng::from_seed(seed);
        let task = select(options.task, &mut rng);
        info!("Active task: {}", task);

        Self {
            rng,
            options,
            placer,
            task,
            truth: GroundTruth {
                digit: 0,
                correct_color_index: 0,
            },
            layout_state: LayoutState::Dirty,
            locations: TaskLocations::default(),
            phase: EpisodePhase::Placing,
            truncated: false,
        }
    }

    /// Restarts the random stream.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Starts a reset by drawing the ground truth.
    pub fn begin(&mut self) -> GroundTruth {
        self.phase = EpisodePhase::Placing;
        self.truncated = false;
        self.truth = sample_ground_truth(&mut self.rng);
        debug!("Ground truth: {:?}", self.truth);
        self.truth
    }

    /// The random stream, for draws the environment makes between
    /// [`Episode::begin`] and [`Episode::place`].
    pub fn rng_mut(&mut self) -> &mut EpisodeRng {
        &mut self.rng
    }

    /// Computes the layout and writes it into the arena.
    pub fn place<A: GridArena>(&mut self, arena: &mut A) -> Result<(), NumTaskError> {
        let locations = self.placer.place(
            self.layout_state,
            &self.locations,
            self.options.shuffle,
            self.task,
            &self.truth,
            &mut self.rng,
        )?;
        locations.apply(arena, self.options.pickable)?;
        self.locations = locations;
        self.layout_state = if self.options.shuffle {
            LayoutState::Dirty
        } else {
            LayoutState::Stable
        };
        self.phase = EpisodePhase::Acting;
        Ok(())
    }

    /// Scores an interaction and returns the outcome with its shaped reward.
    pub fn score(&self, interacted: Option<&Stimulus>, shaped: f32) -> (RawOutcome, f32) {
        let outcome = evaluate(self.task, &self.truth, self.placer.palette(), interacted);
        (outcome, self.options.shaping.reward(outcome, shaped))
    }

    /// Ends the episode. `truncated` is set when the step budget ran out.
    pub fn finish(&mut self, outcome: RawOutcome, reward: f32, truncated: bool) {
        self.phase = EpisodePhase::Scored;
        self.truncated = truncated;
        info!(
            "Episode finished: task = {}, digit = {}, outcome = {:?}, reward = {}, truncated = {}",
            self.task, self.truth.digit, outcome, reward, truncated
        );
    }

    /// `(is_terminated, is_truncated)` of a step taken outside the acting phase.
    ///
    /// After a truncated episode the step repeats the truncation; otherwise,
    /// including before the first reset, it reports termination.
    pub fn idle_flags(&self) -> (bool, bool) {
        let truncated = self.phase == EpisodePhase::Scored && self.truncated;
        (!truncated, truncated)
    }

    /// The active task.
    pub fn task(&self) -> TaskType {
        self.task
    }

    /// Ground truth of the running episode.
    pub fn truth(&self) -> &GroundTruth {
        &self.truth
    }

    /// Layout of the running episode.
    pub fn locations(&self) -> &TaskLocations {
        &self.locations
    }

    /// The current phase.
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// The placer.
    pub fn placer(&self) -> &StimulusPlacer {
        &self.placer
    }

    /// Step record with the task, the digit, the raw reward and the phase.
    pub fn record(&self, outcome: RawOutcome) -> Record {
        Record::from_slice(&[
            ("task", RecordValue::String(self.task.name().to_string())),
            ("digit", RecordValue::Scalar(self.truth.digit as f32)),
            ("raw_reward", RecordValue::Scalar(outcome.raw_reward() as f32)),
            ("phase", RecordValue::String(self.phase.name().to_string())),
        ])
    }
}
