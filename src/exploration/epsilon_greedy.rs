use rand::Rng;

use crate::{assert_interval, decay::Decay, estimator::ValueEstimator, util::argmax};

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Exploration threshold for the given episode
    pub fn epsilon(&self, episode: u32) -> f64 {
        self.epsilon.evaluate(episode as f64)
    }
}

/// Explore with probability `epsilon`, exploit otherwise
pub fn choose<R: Rng + ?Sized>(epsilon: f64, rng: &mut R) -> Choice {
    if rng.gen::<f64>() < epsilon {
        Choice::Explore
    } else {
        Choice::Exploit
    }
}

/// Select an action for `state` with an epsilon-greedy policy over `estimator`
///
/// Explores with a uniformly random action with probability `epsilon`, otherwise picks the action
/// of highest predicted value, the lowest index among ties.
///
/// **Panics** if `epsilon` is not in the interval `[0,1]`
pub fn select_action<S, V, R>(estimator: &V, state: &S, epsilon: f64, rng: &mut R) -> usize
where
    V: ValueEstimator<S> + ?Sized,
    R: Rng + ?Sized,
{
    assert_interval!(epsilon, 0.0, 1.0);
    match choose(epsilon, rng) {
        Choice::Explore => rng.gen_range(0..estimator.num_actions()),
        Choice::Exploit => argmax(&estimator.predict(state)),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use statrs::distribution::{ChiSquared, ContinuousCDF};

    use crate::decay;

    use super::*;

    /// Estimator with fixed predictions regardless of the state
    struct Fixed(Vec<f64>);

    impl ValueEstimator<()> for Fixed {
        fn num_actions(&self) -> usize {
            self.0.len()
        }

        fn predict(&self, _state: &()) -> Vec<f64> {
            self.0.clone()
        }

        fn update(&mut self, _state: &(), _action: usize, _target: f64) {}
    }

    #[test]
    fn greedy_picks_argmax() {
        let q = Fixed(vec![0.1, -3.0, 2.5, 0.4]);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..200 {
            assert_eq!(select_action(&q, &(), 0.0, &mut rng), 2, "Greedy action");
        }
    }

    #[test]
    fn greedy_ties_pick_lowest() {
        let q = Fixed(vec![1.0, 4.0, 4.0]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(select_action(&q, &(), 0.0, &mut rng), 1);
    }

    #[test]
    fn full_exploration_is_uniform() {
        const TRIALS: usize = 40_000;
        let q = Fixed(vec![0.0, 10.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];
        for _ in 0..TRIALS {
            counts[select_action(&q, &(), 1.0, &mut rng)] += 1;
        }

        let expected = TRIALS as f64 / 4.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        let critical = ChiSquared::new(3.0).unwrap().inverse_cdf(0.999);
        assert!(
            chi2 < critical,
            "Counts {:?} not uniform (chi2 = {})",
            counts,
            chi2
        );
    }

    #[test]
    fn choose_rate_matches_epsilon() {
        let mut rng = StdRng::seed_from_u64(5);
        let explored = (0..10_000)
            .filter(|_| choose(0.2, &mut rng) == Choice::Explore)
            .count();
        assert!((1_700..2_300).contains(&explored), "Explored {} times", explored);
    }

    #[test]
    fn schedule_epsilon() {
        let policy = EpsilonGreedy::new(decay::InverseSqrt::new(1.0, 1.0, 0.0).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert_eq!(policy.epsilon(3), 0.5);
    }

    #[test]
    #[should_panic(expected = "Invalid value for `epsilon`")]
    fn invalid_epsilon() {
        select_action(&Fixed(vec![0.0]), &(), 1.5, &mut StdRng::seed_from_u64(0));
    }
}
