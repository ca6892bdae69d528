use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::{EnumCount, EnumIter, FromRepr, VariantArray};

use crate::env::{DiscreteActionSpace, Environment, ObservationSpace, Step};

const GRAVITY: f64 = 9.8;
const MASS_CART: f64 = 1.0;
const MASS_POLE: f64 = 0.1;
const TOTAL_MASS: f64 = MASS_CART + MASS_POLE;
/// Half the pole's length
const LENGTH: f64 = 0.5;
const POLE_MASS_LENGTH: f64 = MASS_POLE * LENGTH;
const FORCE_MAG: f64 = 10.0;
/// Seconds between state updates
const TAU: f64 = 0.02;
const X_THRESHOLD: f64 = 2.4;
const THETA_THRESHOLD: f64 = 12.0 * 2.0 * std::f64::consts::PI / 360.0;
/// Episode length of `CartPole-v0`
pub const MAX_STEPS: u32 = 200;

/// Actions for the [`CartPole`] environment, representing applying a left or right force to the cart
#[derive(FromRepr, EnumIter, EnumCount, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CPAction {
    Left = 0,
    Right = 1,
}

impl From<usize> for CPAction {
    fn from(value: usize) -> Self {
        Self::from_repr(value)
            .unwrap_or_else(|| panic!("Invalid action: {} (CartPole has 2 actions)", value))
    }
}

/// The classic CartPole balancing task
///
/// State is `[cart position, cart velocity, pole angle, pole angular velocity]`. Every step
/// yields a reward of `1`; the episode ends when the pole tilts more than 12°, the cart leaves
/// `[-2.4, 2.4]`, or after [`MAX_STEPS`] steps.
#[derive(Debug, Clone)]
pub struct CartPole {
    state: [f64; 4],
    steps: u32,
    max_steps: u32,
    rng: StdRng,
}

impl CartPole {
    pub fn new(seed: u64) -> Self {
        Self {
            state: [0.0; 4],
            steps: 0,
            max_steps: MAX_STEPS,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn state(&self) -> [f64; 4] {
        self.state
    }

    fn failed(&self) -> bool {
        let [x, _, theta, _] = self.state;
        !(-X_THRESHOLD..=X_THRESHOLD).contains(&x)
            || !(-THETA_THRESHOLD..=THETA_THRESHOLD).contains(&theta)
    }
}

impl Environment for CartPole {
    type State = [f64; 4];

    fn step(&mut self, action: usize) -> Step<Self::State> {
        let force = match CPAction::from(action) {
            CPAction::Left => -FORCE_MAG,
            CPAction::Right => FORCE_MAG,
        };
        let [x, x_dot, theta, theta_dot] = self.state;
        let (sin, cos) = theta.sin_cos();

        let temp = (force + POLE_MASS_LENGTH * theta_dot.powi(2) * sin) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin - cos * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos.powi(2) / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos / TOTAL_MASS;

        self.state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];
        self.steps += 1;

        Step {
            state: self.state,
            reward: 1.0,
            done: self.failed() || self.steps >= self.max_steps,
        }
    }

    fn reset(&mut self) -> Self::State {
        self.steps = 0;
        let rng = &mut self.rng;
        self.state = std::array::from_fn(|_| rng.gen_range(-0.05..=0.05));
        self.state
    }
}

impl DiscreteActionSpace for CartPole {
    fn num_actions(&self) -> usize {
        CPAction::COUNT
    }
}

impl ObservationSpace<4> for CartPole {
    fn low(&self) -> [f64; 4] {
        [-X_THRESHOLD * 2.0, f64::NEG_INFINITY, -THETA_THRESHOLD * 2.0, f64::NEG_INFINITY]
    }

    fn high(&self) -> [f64; 4] {
        [X_THRESHOLD * 2.0, f64::INFINITY, THETA_THRESHOLD * 2.0, f64::INFINITY]
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn action_from_usize() {
        assert_eq!(CPAction::from(0), CPAction::Left);
        assert_eq!(CPAction::from(1), CPAction::Right);
        assert_eq!(CPAction::iter().count(), 2);
        assert_eq!(CPAction::VARIANTS.len(), CartPole::new(0).num_actions());
    }

    #[test]
    fn reset_near_upright() {
        let mut env = CartPole::new(3);
        let s = env.reset();
        assert!(s.iter().all(|v| v.abs() <= 0.05), "Initial state in [-0.05, 0.05]");
    }

    #[test]
    fn constant_push_falls_over() {
        let mut env = CartPole::new(1);
        env.reset();
        let mut steps = 0;
        loop {
            steps += 1;
            let Step { reward, done, .. } = env.step(CPAction::Right as usize);
            assert_eq!(reward, 1.0);
            if done {
                break;
            }
        }
        assert!(steps < 50, "Pushing one way fails quickly, took {}", steps);
        assert!(env.failed(), "Episode ended by failure");
    }

    #[test]
    fn time_limit() {
        let mut env = CartPole::new(2).with_max_steps(3);
        env.reset();
        assert!(!env.step(0).done);
        assert!(!env.step(1).done);
        assert!(env.step(0).done, "Truncated at the step limit");
    }

    #[test]
    fn reproducible_with_seed() {
        let (mut a, mut b) = (CartPole::new(9), CartPole::new(9));
        assert_eq!(a.reset(), b.reset());
        assert_eq!(a.step(1), b.step(1));
    }

    #[test]
    #[should_panic(expected = "Invalid action")]
    fn invalid_action() {
        CartPole::new(0).step(2);
    }
}
