use rand::Rng;

use crate::{
    decay,
    env::{DiscreteActionSpace, ObservationSpace},
    estimator::{LearningRate, LinearEnsemble},
    exploration::EpsilonGreedy,
    features::{RbfConfig, RbfFeaturizer},
};

use super::{Agent, AgentConfig, EpisodeConfig, RewardShaping};

/// Configuration for the RBF linear agent built by [`Agent::q_rbf`]
#[derive(Debug, Clone)]
pub struct QRbfAgentConfig {
    /// **Default**: `ε = 0.1 · 0.97ⁿ`
    pub exploration: EpsilonGreedy<decay::Step>,
    pub rbf: RbfConfig,
    /// **Default**: constant `0.01`
    pub learning_rate: LearningRate,
    /// The discount factor
    ///
    /// **Default**: `0.99`
    pub gamma: f64,
    /// Step bound of a single episode
    ///
    /// **Default**: `10000`
    pub max_steps: u32,
}

impl Default for QRbfAgentConfig {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(
                decay::Step::new(0.97, 0.1, 0.0, 1.0).expect("valid schedule"),
            ),
            rbf: RbfConfig::default(),
            learning_rate: LearningRate::default(),
            gamma: 0.99,
            max_steps: 10000,
        }
    }
}

/// An agent approximating `Q` with one linear regressor per action over RBF features
pub type QRbfAgent<const D: usize, R> = Agent<LinearEnsemble<D>, decay::Step, R>;

impl<const D: usize, R: Rng> QRbfAgent<D, R> {
    /// Build an RBF linear agent for the given environment
    ///
    /// The featurizer is fitted on observations sampled from the environment's observation space,
    /// and every regressor is seeded on the state returned by `env.reset()`.
    pub fn q_rbf<E>(env: &mut E, config: QRbfAgentConfig, mut rng: R) -> Self
    where
        E: ObservationSpace<D> + DiscreteActionSpace,
    {
        let featurizer = RbfFeaturizer::from_env(&*env, &config.rbf, &mut rng);
        let seed_state = env.reset();
        let ensemble = LinearEnsemble::new(
            featurizer,
            env.num_actions(),
            &seed_state,
            config.learning_rate,
        );
        let config = AgentConfig {
            exploration: config.exploration,
            episode: EpisodeConfig {
                gamma: config.gamma,
                max_steps: Some(config.max_steps),
                shaping: RewardShaping::None,
            },
        };
        Agent::new(ensemble, config, rng)
    }
}
