use log::info;
use qcontrol::{
    algo::QRbfAgent,
    env::ObservationSpace,
    gym::MountainCar,
    stats,
};
use rand::{rngs::StdRng, SeedableRng};

const NUM_EPISODES: u32 = 300;

fn main() {
    tracing_subscriber::fmt::init();

    let mut env = MountainCar::new(0);
    let mut agent =
        QRbfAgent::<2, _>::q_rbf(&mut env, Default::default(), StdRng::seed_from_u64(0));

    let rewards = agent.train(&mut env, NUM_EPISODES);

    if let Some(avg) = stats::mean_last(&rewards, 100) {
        info!("avg reward for last 100 episodes: {}", avg);
    }
    info!("total steps: {}", -rewards.iter().sum::<f64>());

    let grid = stats::cost_to_go(agent.estimator(), env.low(), env.high(), 20);
    let (lo, hi) = grid
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));
    info!("cost-to-go over a 20x20 grid ranges from {:.2} to {:.2}", lo, hi);
}
