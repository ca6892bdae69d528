/// Learning-rate schedule of an [`SgdRegressor`], evaluated at the regressor's step count `t >= 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LearningRate {
    /// η = eta0
    Constant { eta0: f64 },
    /// η = eta0 / t<sup>power_t</sup>
    InvScaling { eta0: f64, power_t: f64 },
}

impl LearningRate {
    /// Learning rate at step `t`
    pub fn eta(&self, t: u64) -> f64 {
        match *self {
            Self::Constant { eta0 } => eta0,
            Self::InvScaling { eta0, power_t } => eta0 / (t.max(1) as f64).powf(power_t),
        }
    }
}

impl Default for LearningRate {
    fn default() -> Self {
        Self::Constant { eta0: 0.01 }
    }
}

/// Online linear regression trained by plain stochastic gradient descent on the squared error
///
/// Every [`partial_fit`](Self::partial_fit) performs one step on one sample: the weights are
/// shrunk by the L2 penalty, then moved along the gradient of `½(w·x + b − y)²`.
#[derive(Debug, Clone, PartialEq)]
pub struct SgdRegressor {
    weights: Vec<f64>,
    intercept: f64,
    learning_rate: LearningRate,
    /// L2 regularization strength
    l2: f64,
    t: u64,
}

impl SgdRegressor {
    /// Default L2 regularization strength
    pub const L2: f64 = 1e-4;

    /// A regressor over `dimensions` features with zero weights
    pub fn new(dimensions: usize, learning_rate: LearningRate) -> Self {
        Self {
            weights: vec![0.0; dimensions],
            intercept: 0.0,
            learning_rate,
            l2: Self::L2,
            t: 0,
        }
    }

    pub fn with_l2(mut self, l2: f64) -> Self {
        assert!(l2 >= 0.0, "Invalid value for `l2`. Must be non-negative.");
        self.l2 = l2;
        self
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of samples seen so far
    pub fn steps(&self) -> u64 {
        self.t
    }

    /// **Panics** if `x` has the wrong dimension
    pub fn predict(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.weights.len(), "Feature dimension mismatch");
        self.weights
            .iter()
            .zip(x)
            .fold(self.intercept, |acc, (w, xi)| acc + w * xi)
    }

    /// One gradient step toward label `y`
    pub fn partial_fit(&mut self, x: &[f64], y: f64) {
        self.t += 1;
        let eta = self.learning_rate.eta(self.t);
        let error = self.predict(x) - y;

        let shrink = 1.0 - eta * self.l2;
        for (w, xi) in self.weights.iter_mut().zip(x) {
            *w = *w * shrink - eta * error * xi;
        }
        self.intercept -= eta * error;
    }
}
