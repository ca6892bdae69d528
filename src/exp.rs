/// Represents a single transition in the environment
///
/// Transitions are produced by one step of the episode loop and consumed right away by the
/// temporal-difference update, they are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Exp<S> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: usize,
    /// The reward received after taking the action
    pub reward: f64,
    /// The state of the environment after the action is taken, also present on the terminal step
    pub next_state: S,
    /// Whether the episode ended with this transition
    pub done: bool,
}
