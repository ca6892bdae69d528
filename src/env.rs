use rand::{distributions::Uniform, Rng};
use rand_distr::{Distribution, Exp1, StandardNormal};

/// Result of applying an action to an [`Environment`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    /// The state of the environment after the action
    pub state: S,
    /// The reward received for the action
    pub reward: f64,
    /// Whether the episode ended with this step
    pub done: bool,
}

/// Represents an episodic, discrete-time environment in which an agent can operate.
///
/// Actions are identified by their index in the action space, see [`DiscreteActionSpace`].
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State: Clone;

    /// Update the environment in response to an action taken by an agent
    ///
    /// The returned state is always present, even on the terminal step, so that agents can
    /// bootstrap from it.
    ///
    /// **Panics** if `action` is not a valid action index
    fn step(&mut self, action: usize) -> Step<Self::State>;

    /// Reset the environment to an initial state, beginning a new episode
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment with a finite set of actions, indexed `0..num_actions()`
pub trait DiscreteActionSpace: Environment {
    /// Number of actions available in every state
    fn num_actions(&self) -> usize;

    /// Sample an action uniformly from the action space
    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.num_actions())
    }
}

/// An environment whose states are points in a `D`-dimensional box
pub trait ObservationSpace<const D: usize>: Environment<State = [f64; D]> {
    /// Lower bound of every dimension, possibly `f64::NEG_INFINITY`
    fn low(&self) -> [f64; D];

    /// Upper bound of every dimension, possibly `f64::INFINITY`
    fn high(&self) -> [f64; D];

    /// Sample a point of the observation space
    ///
    /// Bounded dimensions are sampled uniformly, unbounded ones from a standard normal, and
    /// half-bounded ones from a unit exponential shifted to the finite bound.
    fn sample_state<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; D] {
        let (low, high) = (self.low(), self.high());
        std::array::from_fn(|i| sample_interval(low[i], high[i], rng))
    }
}

fn sample_interval<R: Rng + ?Sized>(low: f64, high: f64, rng: &mut R) -> f64 {
    match (low.is_finite(), high.is_finite()) {
        (true, true) if low < high => Uniform::new_inclusive(low, high).sample(rng),
        (true, true) => low,
        (false, false) => rng.sample(StandardNormal),
        (true, false) => low + rng.sample::<f64, _>(Exp1),
        (false, true) => high - rng.sample::<f64, _>(Exp1),
    }
}
