/// Per-dimension standardization fitted on a sample of observations
///
/// `transform` subtracts the sample mean and divides by the population standard deviation.
/// Dimensions with zero deviation are only centered.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler<const D: usize> {
    mean: [f64; D],
    scale: [f64; D],
}

impl<const D: usize> StandardScaler<D> {
    /// Fit the scaler on a sample of observations
    ///
    /// **Panics** if `samples` is empty
    pub fn fit(samples: &[[f64; D]]) -> Self {
        assert!(!samples.is_empty(), "Cannot fit a scaler on zero samples");
        let n = samples.len() as f64;

        let mean: [f64; D] =
            std::array::from_fn(|i| samples.iter().map(|s| s[i]).sum::<f64>() / n);
        let scale = std::array::from_fn(|i| {
            let var = samples.iter().map(|s| (s[i] - mean[i]).powi(2)).sum::<f64>() / n;
            match var.sqrt() {
                sd if sd > 0.0 && sd.is_finite() => sd,
                _ => 1.0,
            }
        });

        Self { mean, scale }
    }

    pub fn mean(&self) -> &[f64; D] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; D] {
        &self.scale
    }

    /// Standardize a single observation
    pub fn transform(&self, observation: &[f64; D]) -> [f64; D] {
        std::array::from_fn(|i| (observation[i] - self.mean[i]) / self.scale[i])
    }
}
