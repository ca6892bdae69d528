mod bins;
mod rbf;
mod scaler;

pub use bins::{build_state, to_bin, BinDiscretizer, CART_POLE_THRESHOLDS};
pub use rbf::{RbfConfig, RbfFeaturizer, RbfSampler};
pub use scaler::StandardScaler;
