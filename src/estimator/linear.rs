use log::debug;

use crate::features::RbfFeaturizer;

use super::{LearningRate, SgdRegressor, ValueEstimator};

/// One online linear regressor per action over RBF features
///
/// Updates are sparse: only the regressor of the taken action is corrected.
#[derive(Debug, Clone)]
pub struct LinearEnsemble<const D: usize> {
    featurizer: RbfFeaturizer<D>,
    models: Vec<SgdRegressor>,
}

impl<const D: usize> LinearEnsemble<D> {
    /// Build one regressor per action and seed each with a single fit of label `0` on `seed_state`
    ///
    /// Seeding happens here so that every constructed ensemble can be queried right away.
    ///
    /// **Panics** if `num_actions` is zero
    pub fn new(
        featurizer: RbfFeaturizer<D>,
        num_actions: usize,
        seed_state: &[f64; D],
        learning_rate: LearningRate,
    ) -> Self {
        assert!(num_actions > 0, "An ensemble needs at least one action.");

        let x = featurizer.transform_one(seed_state);
        let models = (0..num_actions)
            .map(|_| {
                let mut model = SgdRegressor::new(featurizer.dimensions(), learning_rate);
                model.partial_fit(&x, 0.0);
                model
            })
            .collect();
        debug!(
            "Linear ensemble of {} regressors over {} features",
            num_actions,
            featurizer.dimensions()
        );

        Self { featurizer, models }
    }

    pub fn featurizer(&self) -> &RbfFeaturizer<D> {
        &self.featurizer
    }

    pub fn models(&self) -> &[SgdRegressor] {
        &self.models
    }
}

impl<const D: usize> ValueEstimator<[f64; D]> for LinearEnsemble<D> {
    fn num_actions(&self) -> usize {
        self.models.len()
    }

    fn predict(&self, state: &[f64; D]) -> Vec<f64> {
        let x = self.featurizer.transform_one(state);
        self.models.iter().map(|m| m.predict(&x)).collect()
    }

    fn update(&mut self, state: &[f64; D], action: usize, target: f64) {
        assert!(
            action < self.models.len(),
            "Invalid action: {} (ensemble has {} actions)",
            action,
            self.models.len()
        );
        let x = self.featurizer.transform_one(state);
        self.models[action].partial_fit(&x, target);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::features::RbfConfig;

    use super::*;

    fn ensemble() -> LinearEnsemble<2> {
        let mut rng = StdRng::seed_from_u64(11);
        let samples = (0..1000)
            .map(|_| [rng.gen_range(-1.2..0.6), rng.gen_range(-0.07..0.07)])
            .collect::<Vec<_>>();
        let config = RbfConfig {
            n_components: 100,
            ..Default::default()
        };
        let featurizer = RbfFeaturizer::fit(&samples, &config, &mut rng);
        LinearEnsemble::new(featurizer, 3, &[-0.5, 0.0], LearningRate::default())
    }

    #[test]
    fn seeded_on_construction() {
        let q = ensemble();
        assert_eq!(q.num_actions(), 3);
        assert!(
            q.models().iter().all(|m| m.steps() == 1),
            "Every regressor received one seeding fit"
        );
        assert_eq!(
            q.predict(&[-0.5, 0.0]),
            vec![0.0; 3],
            "Seeding with label 0 from zero weights predicts 0"
        );
    }

    #[test]
    fn update_is_sparse() {
        let mut q = ensemble();
        let s = [-0.3, 0.02];
        let before = q.predict(&s);

        q.update(&s, 1, 5.0);
        let after = q.predict(&s);

        assert!(after[1] > before[1], "Taken action moves toward the target");
        assert!(after[1] < 5.0, "A single step does not overshoot");
        assert_eq!(after[0], before[0], "Other actions untouched");
        assert_eq!(after[2], before[2], "Other actions untouched");
    }

    #[test]
    fn repeated_updates_converge() {
        let mut q = ensemble();
        let s = [0.1, -0.03];
        for _ in 0..500 {
            q.update(&s, 2, -1.0);
        }
        assert!((q.predict(&s)[2] + 1.0).abs() < 0.05, "Converges to the target");
    }

    #[test]
    #[should_panic(expected = "Invalid action")]
    fn invalid_action() {
        ensemble().update(&[0.0, 0.0], 3, 1.0);
    }
}
