use log::{debug, info};
use rand::Rng;

use crate::{
    assert_interval,
    decay::Decay,
    env::Environment,
    estimator::ValueEstimator,
    exploration::EpsilonGreedy,
    stats,
};

use super::{run_episode, EpisodeConfig};

/// Episodes between two progress reports of [`Agent::train`]
const LOG_EVERY: u32 = 100;

/// Configuration for the [`Agent`]
#[derive(Debug, Clone)]
pub struct AgentConfig<D: Decay> {
    /// Exploration schedule, evaluated at the current episode
    pub exploration: EpsilonGreedy<D>,
    pub episode: EpisodeConfig,
}

/// Temporal-difference control agent
///
/// Owns a [`ValueEstimator`], the exploration schedule and the random generator driving
/// exploration. Each call to [`go`](Self::go) plays one episode with the epsilon of the current
/// episode and updates the estimator after every step.
///
/// ### Generics
/// - `V` - The action-value estimator
/// - `D` - The decay strategy of the exploration threshold
/// - `R` - The random generator
pub struct Agent<V, D: Decay, R: Rng> {
    estimator: V,
    exploration: EpsilonGreedy<D>,
    config: EpisodeConfig,
    rng: R,
    episode: u32,
}

impl<V, D: Decay, R: Rng> Agent<V, D, R> {
    /// Initialize a new `Agent` around an estimator
    ///
    /// **Panics** if `gamma` is not in the interval `[0,1]`
    pub fn new(estimator: V, config: AgentConfig<D>, rng: R) -> Self {
        assert_interval!(config.episode.gamma, 0.0, 1.0);
        Self {
            estimator,
            exploration: config.exploration,
            config: config.episode,
            rng,
            episode: 0,
        }
    }

    pub fn estimator(&self) -> &V {
        &self.estimator
    }

    /// Number of episodes played so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Exploration threshold of the next episode
    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon(self.episode)
    }

    /// Play one episode in the given environment
    ///
    /// **Returns** the total reward of the episode
    pub fn go<E>(&mut self, env: &mut E) -> f64
    where
        E: Environment,
        V: ValueEstimator<E::State>,
    {
        let epsilon = self.epsilon();
        let reward = run_episode(
            env,
            &mut self.estimator,
            epsilon,
            &self.config,
            &mut self.rng,
        );
        self.episode += 1;
        reward
    }

    /// Play `episodes` episodes, logging progress every 100th episode
    ///
    /// **Returns** the total reward of every episode
    pub fn train<E>(&mut self, env: &mut E, episodes: u32) -> Vec<f64>
    where
        E: Environment,
        V: ValueEstimator<E::State>,
    {
        let mut rewards = Vec::with_capacity(episodes as usize);
        for _ in 0..episodes {
            let epsilon = self.epsilon();
            let reward = self.go(env);
            if (self.episode - 1) % LOG_EVERY == 0 {
                info!(
                    "episode: {} total reward: {} eps: {:.4}",
                    self.episode - 1,
                    reward,
                    epsilon
                );
            }
            rewards.push(reward);
        }

        if let Some(avg) = stats::mean_last(&rewards, LOG_EVERY as usize) {
            info!("avg reward for last {} episodes: {}", LOG_EVERY, avg);
        }
        debug!("total reward over {} episodes: {}", episodes, rewards.iter().sum::<f64>());
        rewards
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{decay, env::tests::MockEnv};

    use super::*;

    /// Estimator counting its updates
    struct Counter(usize);

    impl ValueEstimator<[f64; 2]> for Counter {
        fn num_actions(&self) -> usize {
            2
        }

        fn predict(&self, _state: &[f64; 2]) -> Vec<f64> {
            vec![0.0, 1.0]
        }

        fn update(&mut self, _state: &[f64; 2], _action: usize, _target: f64) {
            self.0 += 1;
        }
    }

    fn agent() -> Agent<Counter, decay::InverseSqrt, StdRng> {
        let config = AgentConfig {
            exploration: EpsilonGreedy::new(decay::InverseSqrt::new(1.0, 1.0, 0.0).unwrap()),
            episode: EpisodeConfig::default(),
        };
        Agent::new(Counter(0), config, StdRng::seed_from_u64(0))
    }

    #[test]
    fn go_advances_episode() {
        let mut agent = agent();
        let mut env = MockEnv::new(Some(5), 1.0);

        assert_eq!(agent.epsilon(), 1.0, "Full exploration at the first episode");
        assert_eq!(agent.go(&mut env), 5.0);
        assert_eq!(agent.episode(), 1);
        assert_eq!(agent.estimator().0, 5, "One update per step");
        assert_eq!(agent.epsilon(), 1.0 / 2f64.sqrt(), "Epsilon decays per episode");
    }

    #[test]
    fn train_returns_every_reward() {
        let mut agent = agent();
        let mut env = MockEnv::new(Some(3), -1.0);

        let rewards = agent.train(&mut env, 150);

        assert_eq!(rewards.len(), 150);
        assert!(rewards.iter().all(|&r| r == -3.0));
        assert_eq!(env.resets, 150, "Environment reset every episode");
        assert_eq!(agent.estimator().0, 450);
    }

    #[test]
    #[should_panic(expected = "Invalid value for `config.episode.gamma`")]
    fn invalid_gamma() {
        let config = AgentConfig {
            exploration: EpsilonGreedy::new(decay::Constant::new(0.1)),
            episode: EpisodeConfig {
                gamma: 1.5,
                ..Default::default()
            },
        };
        Agent::new(Counter(0), config, StdRng::seed_from_u64(0));
    }
}
