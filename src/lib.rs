/// Training drivers and the temporal-difference episode loop
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Action-value estimators
pub mod estimator;

/// Transitions
pub mod exp;

/// Exploration policies
pub mod exploration;

/// Feature transformers
pub mod features;

/// Training statistics
pub mod stats;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;
