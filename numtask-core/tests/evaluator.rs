use anyhow::Result;
use numtask_core::{
    record::{BufferedRecorder, NullRecorder, Record, RecordValue},
    util, Act, DefaultEvaluator, Env, Evaluator, Obs, Policy, Step,
};

#[derive(Clone, Debug, PartialEq)]
struct CountdownObs(usize);

impl Obs for CountdownObs {}

#[derive(Clone, Debug)]
struct CountdownAct(f32);

impl Act for CountdownAct {}

/// Counts down from a length depending on the episode index; every step pays
/// the action value.
struct CountdownEnv {
    len: usize,
    left: usize,
    base: usize,
}

impl Env for CountdownEnv {
    type Config = usize;
    type Obs = CountdownObs;
    type Act = CountdownAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            len: *config,
            left: 0,
            base: *config,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.left -= 1;
        let obs = CountdownObs(self.left);
        let step = Step::new(obs, a.clone(), a.0, self.left == 0, false, ());
        let record = Record::from_scalar("left", self.left as f32);
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.left = self.len;
        Ok(CountdownObs(self.left))
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            step.init_obs = Some(self.reset().unwrap());
        }
        (step, record)
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.len = self.base + ix;
        self.reset()
    }
}

struct ConstPolicy(f32);

impl Policy<CountdownEnv> for ConstPolicy {
    fn sample(&mut self, _obs: &CountdownObs) -> CountdownAct {
        CountdownAct(self.0)
    }
}

#[test]
fn test_default_evaluator() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut evaluator = DefaultEvaluator::<CountdownEnv>::new(&2, 0, 3)?;
    let record = evaluator.evaluate(&mut ConstPolicy(0.5))?;

    // Episodes of length 2, 3 and 4.
    assert_eq!(record.get_scalar("Episode length")?, 3.0);
    assert_eq!(record.get_scalar("Episode return")?, 1.5);
    Ok(())
}

#[test]
fn test_eval_with_recorder() -> Result<()> {
    let mut env = CountdownEnv::build(&3, 0)?;
    let mut recorder = BufferedRecorder::new();
    let returns = util::eval_with_recorder(&mut env, &mut ConstPolicy(1.0), 2, &mut recorder)?;

    assert_eq!(returns, vec![3.0, 3.0]);
    assert_eq!(recorder.len(), 6);
    let last = recorder.iter().last().unwrap();
    assert_eq!(last.get_scalar("episode")?, 1.0);
    assert_eq!(last.get_scalar("step")?, 2.0);
    assert_eq!(last.get_scalar("left")?, 0.0);
    assert!(matches!(last.get("reward"), Some(RecordValue::Scalar(_))));

    let returns = util::eval_with_recorder(&mut env, &mut ConstPolicy(-1.0), 1, &mut NullRecorder {})?;
    assert_eq!(returns, vec![-3.0]);
    Ok(())
}

#[test]
fn test_step_with_reset_fills_init_obs() -> Result<()> {
    let mut env = CountdownEnv::build(&2, 0)?;
    env.reset()?;
    let (step, _) = env.step_with_reset(&CountdownAct(0.0));
    assert!(step.init_obs.is_none());
    let (step, _) = env.step_with_reset(&CountdownAct(0.0));
    assert!(step.is_done());
    assert_eq!(step.init_obs, Some(CountdownObs(2)));
    Ok(())
}
