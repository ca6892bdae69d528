use log::trace;
use rand::Rng;

use crate::{
    env::{Environment, Step},
    estimator::ValueEstimator,
    exp::Exp,
    exploration::select_action,
    util::max,
};

/// Adjustment of the reward used for the temporal-difference target
///
/// Shaping never affects the total reward reported by [`run_episode`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RewardShaping {
    #[default]
    None,
    /// Subtract `penalty` from the reward of a terminal step reached before `min_steps` steps
    EarlyTermination { min_steps: u32, penalty: f64 },
}

impl RewardShaping {
    /// Reward for the TD target of the `steps`-th step (1-based) of an episode
    pub fn shape(&self, reward: f64, done: bool, steps: u32) -> f64 {
        match *self {
            Self::EarlyTermination { min_steps, penalty } if done && steps < min_steps => {
                reward - penalty
            }
            _ => reward,
        }
    }
}

/// Configuration of a single episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeConfig {
    /// The discount factor - must be between 0 and 1
    pub gamma: f64,
    /// Stop the episode after this many steps even if the environment is not done
    pub max_steps: Option<u32>,
    pub shaping: RewardShaping,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            gamma: 0.99,
            max_steps: None,
            shaping: RewardShaping::None,
        }
    }
}

/// One-step temporal-difference target of a transition
///
/// The bootstrap term `gamma · max_a Q(s', a)` is included on terminal transitions as well.
pub fn td_target<S, V>(estimator: &V, exp: &Exp<S>, steps: u32, config: &EpisodeConfig) -> f64
where
    V: ValueEstimator<S> + ?Sized,
{
    let reward = config.shaping.shape(exp.reward, exp.done, steps);
    reward + config.gamma * max(&estimator.predict(&exp.next_state))
}

/// Run a full episode, updating `estimator` after every step
///
/// Actions are selected epsilon-greedily with the given `epsilon`. Every transition is used right
/// away to move `Q(s, a)` toward its [`td_target`].
///
/// **Returns** the total reward of the episode, without shaping
pub fn run_episode<E, V, R>(
    env: &mut E,
    estimator: &mut V,
    epsilon: f64,
    config: &EpisodeConfig,
    rng: &mut R,
) -> f64
where
    E: Environment,
    V: ValueEstimator<E::State> + ?Sized,
    R: Rng + ?Sized,
{
    let mut state = env.reset();
    let mut total_reward = 0.0;
    let mut steps = 0;
    let mut done = false;

    while !done && config.max_steps.map_or(true, |bound| steps < bound) {
        let action = select_action(&*estimator, &state, epsilon, rng);
        let Step {
            state: next_state,
            reward,
            done: terminal,
        } = env.step(action);
        steps += 1;

        let exp = Exp {
            state,
            action,
            reward,
            next_state,
            done: terminal,
        };
        let target = td_target(&*estimator, &exp, steps, config);
        estimator.update(&exp.state, exp.action, target);

        total_reward += exp.reward;
        state = exp.next_state;
        done = exp.done;
    }

    trace!(
        "Episode finished after {} steps, reward {} (done: {})",
        steps,
        total_reward,
        done
    );
    total_reward
}
