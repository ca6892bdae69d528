use log::debug;
use rand::{distributions::Uniform, Rng};
use rand_distr::Distribution;

use crate::{assert_interval, features::BinDiscretizer};

use super::ValueEstimator;

/// A dense action-value table over the states of a [`BinDiscretizer`]
///
/// The table has one row per addressable state index (`10^D`, see
/// [`BinDiscretizer::capacity`]) and one column per action. Values start uniformly in `[-1, 1)`.
#[derive(Debug, Clone)]
pub struct QTable<const D: usize> {
    discretizer: BinDiscretizer<D>,
    /// Row-major `num_states × num_actions`
    values: Vec<f64>,
    num_actions: usize,
    alpha: f64, // learning rate
}

impl<const D: usize> QTable<D> {
    /// Default learning rate
    pub const ALPHA: f64 = 0.01;

    /// Initialize a table sized for every index the discretizer can produce
    ///
    /// ### Parameters
    /// - `discretizer` - Maps observations to row indices
    /// - `num_actions` - Number of columns
    /// - `alpha` - The learning rate - must be between 0 and 1
    /// - `rng` - Source of the random initial values
    ///
    /// **Panics** if `alpha` is not in the interval `[0,1]`, if `num_actions` is zero, or if the
    /// discretizer can produce an index beyond the table
    pub fn new<R: Rng + ?Sized>(
        discretizer: BinDiscretizer<D>,
        num_actions: usize,
        alpha: f64,
        rng: &mut R,
    ) -> Self {
        assert_interval!(alpha, 0.0, 1.0);
        assert!(num_actions > 0, "A table needs at least one action.");

        let num_states = discretizer.capacity();
        assert!(
            discretizer.max_index() < num_states,
            "Discretizer index {} exceeds table capacity {}",
            discretizer.max_index(),
            num_states
        );

        let init = Uniform::new(-1.0, 1.0);
        let values = init.sample_iter(rng).take(num_states * num_actions).collect();
        debug!("Q-table of {} states x {} actions", num_states, num_actions);

        Self {
            discretizer,
            values,
            num_actions,
            alpha,
        }
    }

    pub fn discretizer(&self) -> &BinDiscretizer<D> {
        &self.discretizer
    }

    pub fn num_states(&self) -> usize {
        self.values.len() / self.num_actions
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Value of a discrete state index and action
    pub fn get(&self, index: usize, action: usize) -> f64 {
        self.values[self.offset(index, action)]
    }

    /// Row of a discrete state index
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.num_actions;
        &self.values[start..start + self.num_actions]
    }

    fn offset(&self, index: usize, action: usize) -> usize {
        assert!(
            action < self.num_actions,
            "Invalid action: {} (table has {} actions)",
            action,
            self.num_actions
        );
        index * self.num_actions + action
    }
}

impl<const D: usize> ValueEstimator<[f64; D]> for QTable<D> {
    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn predict(&self, state: &[f64; D]) -> Vec<f64> {
        self.row(self.discretizer.transform(state)).to_vec()
    }

    fn update(&mut self, state: &[f64; D], action: usize, target: f64) {
        let i = self.offset(self.discretizer.transform(state), action);
        self.values[i] += self.alpha * (target - self.values[i]);
    }
}
