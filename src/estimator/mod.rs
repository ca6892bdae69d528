mod linear;
mod q_table;
mod sgd;

pub use linear::LinearEnsemble;
pub use q_table::QTable;
pub use sgd::{LearningRate, SgdRegressor};

/// An action-value function `Q(s, ·)` over a finite action space
///
/// Implementations hold one value function per action and are corrected incrementally toward
/// regression targets, one sample at a time.
pub trait ValueEstimator<S> {
    /// Number of actions, the length of every [`predict`](Self::predict) result
    fn num_actions(&self) -> usize;

    /// Estimated value of every action in `state`, indexed by action
    fn predict(&self, state: &S) -> Vec<f64>;

    /// Move the estimate of `(state, action)` toward `target`
    ///
    /// **Panics** if `action` is out of range
    fn update(&mut self, state: &S, action: usize, target: f64);
}
