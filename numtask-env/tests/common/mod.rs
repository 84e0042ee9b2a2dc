#![allow(dead_code)]
use numtask_env::{
    arena::{object_ids, Action, Direction, Pos},
    stimulus::{ColorPair, MarkerText, Stimulus},
    GroundTruth, NumTaskObs, TaskType,
};
use std::collections::{HashMap, VecDeque};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn front((x, y): Pos, dir: Direction) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let (x, y) = (x as isize + dx, y as isize + dy);
    (x >= 0 && y >= 0).then(|| (x as usize, y as usize))
}

fn passable(obs: &NumTaskObs, pos: Pos) -> bool {
    matches!(
        obs.cell(pos).map(|c| c[0]),
        Some(object_ids::EMPTY) | Some(object_ids::AGENT)
    )
}

/// Shortest turn/forward sequence that leaves the agent facing `target`,
/// walking on empty floor only.
pub fn plan_facing(obs: &NumTaskObs, target: Pos) -> Vec<Action> {
    let start = (obs.agent_pos, obs.agent_dir);
    let mut prev: HashMap<(Pos, Direction), ((Pos, Direction), Action)> = HashMap::new();
    let mut queue = VecDeque::from(vec![start]);
    let mut seen = vec![start];

    while let Some((pos, dir)) = queue.pop_front() {
        if front(pos, dir) == Some(target) {
            let mut actions = vec![];
            let mut state = (pos, dir);
            while state != start {
                let (p, a) = prev[&state];
                actions.push(a);
                state = p;
            }
            actions.reverse();
            return actions;
        }
        let mut next = vec![(pos, dir.left()), (pos, dir.right())];
        if let Some(p) = front(pos, dir).filter(|&p| passable(obs, p)) {
            next.push((p, dir));
        }
        for (state, action) in next
            .into_iter()
            .zip([Action::Left, Action::Right, Action::Forward])
        {
            if !seen.contains(&state) {
                seen.push(state);
                prev.insert(state, ((pos, dir), action));
                queue.push_back(state);
            }
        }
    }
    panic!("no path to face {:?}", target);
}

/// Whether a stimulus answers `task` correctly, written out per task.
pub fn is_correct(task: TaskType, truth: &GroundTruth, palette: &ColorPair, stimulus: &Stimulus) -> bool {
    match (task, stimulus) {
        (TaskType::Color, Stimulus::Ball(c)) => *c == palette.get(truth.correct_color_index),
        (TaskType::Magnitude, Stimulus::Marker(MarkerText::Plus)) => truth.digit >= 5,
        (TaskType::Magnitude, Stimulus::Marker(MarkerText::Minus)) => truth.digit < 5,
        (TaskType::Parity, Stimulus::Marker(MarkerText::Zero)) => truth.digit % 2 == 0,
        (TaskType::Parity, Stimulus::Marker(MarkerText::One)) => truth.digit % 2 == 1,
        _ => false,
    }
}
