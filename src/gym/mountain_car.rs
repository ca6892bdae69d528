use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::{EnumCount, EnumIter, FromRepr, VariantArray};

use crate::env::{DiscreteActionSpace, Environment, ObservationSpace, Step};

const FORCE: f64 = 0.001;
const GRAVITY: f64 = 0.0025;
const MIN_POSITION: f64 = -1.2;
const MAX_POSITION: f64 = 0.6;
const MAX_SPEED: f64 = 0.07;
const GOAL_POSITION: f64 = 0.5;
const GOAL_VELOCITY: f64 = 0.0;
/// Episode length of `MountainCar-v0`
pub const MAX_STEPS: u32 = 200;

/// Actions for the [`MountainCar`] environment: accelerate left, don't accelerate, accelerate right
#[derive(FromRepr, EnumIter, EnumCount, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MCAction {
    Left = 0,
    Idle = 1,
    Right = 2,
}

impl From<usize> for MCAction {
    fn from(value: usize) -> Self {
        Self::from_repr(value)
            .unwrap_or_else(|| panic!("Invalid action: {} (MountainCar has 3 actions)", value))
    }
}

/// An underpowered car in a valley that must build momentum to reach the hilltop on the right
///
/// State is `[position, velocity]`. Every step yields a reward of `-1`; the episode ends at the goal
/// or after [`MAX_STEPS`] steps.
#[derive(Debug, Clone)]
pub struct MountainCar {
    state: [f64; 2],
    steps: u32,
    max_steps: u32,
    rng: StdRng,
}

impl MountainCar {
    pub fn new(seed: u64) -> Self {
        Self {
            state: [0.0; 2],
            steps: 0,
            max_steps: MAX_STEPS,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn state(&self) -> [f64; 2] {
        self.state
    }
}

impl Environment for MountainCar {
    type State = [f64; 2];

    fn step(&mut self, action: usize) -> Step<Self::State> {
        let direction = MCAction::from(action) as i32 - 1;
        let [mut position, mut velocity] = self.state;

        velocity += direction as f64 * FORCE - (3.0 * position).cos() * GRAVITY;
        velocity = velocity.clamp(-MAX_SPEED, MAX_SPEED);
        position = (position + velocity).clamp(MIN_POSITION, MAX_POSITION);
        if position == MIN_POSITION && velocity < 0.0 {
            velocity = 0.0;
        }

        self.state = [position, velocity];
        self.steps += 1;
        let goal = position >= GOAL_POSITION && velocity >= GOAL_VELOCITY;

        Step {
            state: self.state,
            reward: -1.0,
            done: goal || self.steps >= self.max_steps,
        }
    }

    fn reset(&mut self) -> Self::State {
        self.steps = 0;
        self.state = [self.rng.gen_range(-0.6..-0.4), 0.0];
        self.state
    }
}

impl DiscreteActionSpace for MountainCar {
    fn num_actions(&self) -> usize {
        MCAction::COUNT
    }
}

impl ObservationSpace<2> for MountainCar {
    fn low(&self) -> [f64; 2] {
        [MIN_POSITION, -MAX_SPEED]
    }

    fn high(&self) -> [f64; 2] {
        [MAX_POSITION, MAX_SPEED]
    }
}
