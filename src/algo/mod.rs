mod agent;
mod episode;
mod q_bins;
mod q_rbf;

pub use agent::{Agent, AgentConfig};
pub use episode::{run_episode, td_target, EpisodeConfig, RewardShaping};
pub use q_bins::{QBinsAgent, QBinsAgentConfig};
pub use q_rbf::{QRbfAgent, QRbfAgentConfig};
