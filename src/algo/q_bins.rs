use rand::Rng;

use crate::{
    decay,
    env::DiscreteActionSpace,
    estimator::QTable,
    exploration::EpsilonGreedy,
    features::BinDiscretizer,
};

use super::{Agent, AgentConfig, EpisodeConfig, RewardShaping};

/// Configuration for the binned Q-table agent built by [`Agent::q_bins`]
#[derive(Debug, Clone)]
pub struct QBinsAgentConfig {
    /// **Default**: `ε = 1/√(n+1)`
    pub exploration: EpsilonGreedy<decay::InverseSqrt>,
    /// The learning rate
    ///
    /// **Default**: `0.01`
    pub alpha: f64,
    /// The discount factor
    ///
    /// **Default**: `0.9`
    pub gamma: f64,
    /// Episodes terminating before this many steps are penalized
    ///
    /// **Default**: `200`
    pub min_steps: u32,
    /// **Default**: `300.0`
    pub penalty: f64,
}

impl Default for QBinsAgentConfig {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(
                decay::InverseSqrt::new(1.0, 1.0, 0.0).expect("valid schedule"),
            ),
            alpha: QTable::<4>::ALPHA,
            gamma: 0.9,
            min_steps: 200,
            penalty: 300.0,
        }
    }
}

/// A binned Q-table agent for the cart-pole task
pub type QBinsAgent<R> = Agent<QTable<4>, decay::InverseSqrt, R>;

impl<R: Rng> QBinsAgent<R> {
    /// Build a Q-table agent over the cart-pole discretizer
    ///
    /// Early terminations are penalized in the TD target. Episodes have no step bound.
    pub fn q_bins<E>(env: &E, config: QBinsAgentConfig, mut rng: R) -> Self
    where
        E: DiscreteActionSpace<State = [f64; 4]>,
    {
        let table = QTable::new(
            BinDiscretizer::cart_pole(),
            env.num_actions(),
            config.alpha,
            &mut rng,
        );
        let config = AgentConfig {
            exploration: config.exploration,
            episode: EpisodeConfig {
                gamma: config.gamma,
                max_steps: None,
                shaping: RewardShaping::EarlyTermination {
                    min_steps: config.min_steps,
                    penalty: config.penalty,
                },
            },
        };
        Agent::new(table, config, rng)
    }
}
