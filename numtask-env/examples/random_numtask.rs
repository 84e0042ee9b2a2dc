//! Runs a random policy on a number-task preset.
//!
//! ```bash
//! cargo run --example random_numtask -- --preset NumberTasksTMaze5-v0 --task parity
//! ```
use anyhow::Result;
use clap::Parser;
use log::info;
use numtask_core::{
    record::BufferedRecorder, util, DefaultEvaluator, Env, Evaluator, Policy,
};
use numtask_env::{
    arena::Action, NumTaskAct, NumTaskCorridorEnv, NumTaskGridEnv, NumTaskObs, Preset,
    PresetConfig, TaskType,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::convert::TryFrom;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Preset name (NumberTaskGrid9x9-v0, NumberTasksTMaze5-v0, NumberTasksNosePoke-v0)
    #[arg(long, default_value = "NumberTaskGrid9x9-v0")]
    preset: String,

    /// Pin the task (color, magnitude, parity)
    #[arg(long)]
    task: Option<String>,

    /// Number of evaluation episodes
    #[arg(long, default_value_t = 10)]
    n_episodes: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: i64,

    /// Save the resolved configuration to this YAML file
    #[arg(long)]
    save_config: Option<String>,
}

struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn sample_act(&mut self) -> NumTaskAct {
        let ix = self.rng.gen_range(0..Action::N) as u8;
        // `ix` is always in range.
        NumTaskAct::try_from(ix).unwrap_or(NumTaskAct(Action::Done))
    }
}

impl Policy<NumTaskGridEnv> for RandomPolicy {
    fn sample(&mut self, _obs: &NumTaskObs) -> NumTaskAct {
        self.sample_act()
    }
}

impl Policy<NumTaskCorridorEnv> for RandomPolicy {
    fn sample(&mut self, _obs: &NumTaskObs) -> NumTaskAct {
        self.sample_act()
    }
}

fn run<E>(config: &E::Config, args: &Args) -> Result<()>
where
    E: Env<Obs = NumTaskObs, Act = NumTaskAct>,
    RandomPolicy: Policy<E>,
{
    let mut policy = RandomPolicy::new(args.seed as u64);

    let mut env = E::build(config, args.seed)?;
    let mut recorder = BufferedRecorder::new();
    let returns = util::eval_with_recorder(&mut env, &mut policy, args.n_episodes, &mut recorder)?;
    let scored = recorder
        .iter()
        .filter(|r| r.get_scalar("raw_reward").map(|v| v != 0.0).unwrap_or(false))
        .count();
    info!("{} steps recorded, {} scored episodes", recorder.len(), scored);
    info!("Returns: {:?}", returns);

    let mut evaluator = DefaultEvaluator::<E>::new(config, args.seed, args.n_episodes)?;
    let record = evaluator.evaluate(&mut policy)?;
    info!(
        "Indexed evaluation: mean return = {}, mean length = {}",
        record.get_scalar("Episode return")?,
        record.get_scalar("Episode length")?
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let preset: Preset = args.preset.parse()?;
    let task = args.task.as_deref().map(str::parse::<TaskType>).transpose()?;
    info!("Preset {}, task {:?}", preset, task);

    match preset.config() {
        PresetConfig::Grid(config) => {
            let config = config.task(task);
            if let Some(path) = args.save_config.as_ref() {
                config.save(path)?;
            }
            run::<NumTaskGridEnv>(&config, &args)
        }
        PresetConfig::Corridor(config) => {
            let config = config.task(task);
            if let Some(path) = args.save_config.as_ref() {
                config.save(path)?;
            }
            run::<NumTaskCorridorEnv>(&config, &args)
        }
    }
}
