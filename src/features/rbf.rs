use std::f64::consts::PI;

use log::debug;
use rand::{distributions::Uniform, Rng};
use rand_distr::{Distribution, StandardNormal};

use crate::env::ObservationSpace;

use super::StandardScaler;

/// Random Fourier features approximating the feature map of an RBF kernel `exp(-gamma·|x-y|²)`
///
/// `transform(x) = √(2/n) · cos(x·W + b)` where `W` is drawn from `N(0, 2·gamma)` and `b` from
/// `U[0, 2π)`. Both are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RbfSampler {
    gamma: f64,
    /// Row-major `input_dim × n_components`
    weights: Vec<f64>,
    offsets: Vec<f64>,
}

impl RbfSampler {
    /// Draw the random projection for inputs of dimension `input_dim`
    ///
    /// **Panics** if `gamma` is not positive or `n_components` is zero
    pub fn fit<R: Rng + ?Sized>(
        input_dim: usize,
        gamma: f64,
        n_components: usize,
        rng: &mut R,
    ) -> Self {
        assert!(gamma > 0.0, "Invalid value for `gamma`. Must be positive.");
        assert!(n_components > 0, "Invalid value for `n_components`. Must be positive.");

        let scale = (2.0 * gamma).sqrt();
        let weights = (0..input_dim * n_components)
            .map(|_| scale * rng.sample::<f64, _>(StandardNormal))
            .collect();
        let phase = Uniform::new(0.0, 2.0 * PI);
        let offsets = (0..n_components).map(|_| phase.sample(rng)).collect();

        Self {
            gamma,
            weights,
            offsets,
        }
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn n_components(&self) -> usize {
        self.offsets.len()
    }

    /// Project `x` and append the features to `out`
    ///
    /// **Panics** if `x` does not match the input dimension
    pub fn transform_into(&self, x: &[f64], out: &mut Vec<f64>) {
        let n = self.n_components();
        assert_eq!(x.len() * n, self.weights.len(), "Input dimension mismatch");

        let norm = (2.0 / n as f64).sqrt();
        out.extend((0..n).map(|j| {
            let z = x
                .iter()
                .enumerate()
                .fold(self.offsets[j], |acc, (i, &xi)| acc + xi * self.weights[i * n + j]);
            norm * z.cos()
        }));
    }
}

/// Configuration for [`RbfFeaturizer`]
#[derive(Debug, Clone, PartialEq)]
pub struct RbfConfig {
    /// One [`RbfSampler`] is fitted per gamma, their features are concatenated in this order
    ///
    /// **Default**: `[5.0, 1.0, 2.0, 0.5]`
    pub gammas: Vec<f64>,
    /// Number of random features per sampler
    ///
    /// **Default**: `500`
    pub n_components: usize,
    /// Number of observations drawn by [`RbfFeaturizer::from_env`] to fit the scaler
    ///
    /// **Default**: `10000`
    pub n_samples: usize,
}

impl Default for RbfConfig {
    fn default() -> Self {
        Self {
            gammas: vec![5.0, 1.0, 2.0, 0.5],
            n_components: 500,
            n_samples: 10000,
        }
    }
}

/// Basis-expansion feature transformer: standardization followed by a union of [`RbfSampler`]s
#[derive(Debug, Clone, PartialEq)]
pub struct RbfFeaturizer<const D: usize> {
    scaler: StandardScaler<D>,
    samplers: Vec<RbfSampler>,
}

impl<const D: usize> RbfFeaturizer<D> {
    /// Fit the scaler on `samples` and draw one sampler per configured gamma
    ///
    /// **Panics** if `samples` or `config.gammas` is empty
    pub fn fit<R: Rng + ?Sized>(samples: &[[f64; D]], config: &RbfConfig, rng: &mut R) -> Self {
        assert!(!config.gammas.is_empty(), "At least one RBF sampler is required");
        let scaler = StandardScaler::fit(samples);
        let samplers = config
            .gammas
            .iter()
            .map(|&gamma| RbfSampler::fit(D, gamma, config.n_components, rng))
            .collect::<Vec<_>>();

        let featurizer = Self { scaler, samplers };
        debug!(
            "RBF featurizer fitted on {} samples, {} features",
            samples.len(),
            featurizer.dimensions()
        );
        featurizer
    }

    /// Fit on observations sampled from the environment's observation space
    pub fn from_env<E, R>(env: &E, config: &RbfConfig, rng: &mut R) -> Self
    where
        E: ObservationSpace<D>,
        R: Rng + ?Sized,
    {
        let samples = (0..config.n_samples)
            .map(|_| env.sample_state(rng))
            .collect::<Vec<_>>();
        Self::fit(&samples, config, rng)
    }

    /// Length of every feature vector
    pub fn dimensions(&self) -> usize {
        self.samplers.iter().map(RbfSampler::n_components).sum()
    }

    pub fn scaler(&self) -> &StandardScaler<D> {
        &self.scaler
    }

    /// Expand a single observation
    pub fn transform_one(&self, observation: &[f64; D]) -> Vec<f64> {
        let scaled = self.scaler.transform(observation);
        let mut features = Vec::with_capacity(self.dimensions());
        for sampler in &self.samplers {
            sampler.transform_into(&scaled, &mut features);
        }
        features
    }

    /// Expand a batch of observations, one row per observation
    pub fn transform(&self, observations: &[[f64; D]]) -> Vec<Vec<f64>> {
        observations.iter().map(|o| self.transform_one(o)).collect()
    }
}
