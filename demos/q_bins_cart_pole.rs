use log::info;
use qcontrol::{algo::QBinsAgent, gym::CartPole, stats};
use rand::{rngs::StdRng, SeedableRng};

const NUM_EPISODES: u32 = 10000;

fn main() {
    tracing_subscriber::fmt::init();

    let mut env = CartPole::new(0);
    let mut agent = QBinsAgent::q_bins(&env, Default::default(), StdRng::seed_from_u64(0));

    let rewards = agent.train(&mut env, NUM_EPISODES);

    if let Some(avg) = stats::mean_last(&rewards, 100) {
        info!("avg reward for last 100 episodes: {}", avg);
    }
    info!("total steps: {}", rewards.iter().sum::<f64>());

    let running = stats::running_average(&rewards, 100);
    for (i, avg) in running.iter().enumerate().step_by(1000) {
        info!("running avg at episode {}: {:.2}", i, avg);
    }
}
