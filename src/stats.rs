use crate::{estimator::ValueEstimator, util};

/// Trailing running average of episode rewards
///
/// Element `t` is the mean of `rewards[t - window ..= t]`, clipped at the start of the slice.
pub fn running_average(rewards: &[f64], window: usize) -> Vec<f64> {
    (0..rewards.len())
        .map(|t| {
            let slice = &rewards[t.saturating_sub(window)..=t];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Mean of the last `n` rewards, or of all of them if there are fewer
///
/// **Returns** `None` if `rewards` or `n` is empty
pub fn mean_last(rewards: &[f64], n: usize) -> Option<f64> {
    let tail = &rewards[rewards.len().saturating_sub(n)..];
    (!tail.is_empty()).then(|| tail.iter().sum::<f64>() / tail.len() as f64)
}

/// Cost-to-go `-max_a Q(s, a)` over a grid of a 2-dimensional state space
///
/// The grid has `num_tiles` evenly spaced points per dimension between `low` and `high`
/// inclusive. Row `i` holds the `i`-th value of the second dimension, column `j` the `j`-th value
/// of the first.
pub fn cost_to_go<V>(
    estimator: &V,
    low: [f64; 2],
    high: [f64; 2],
    num_tiles: usize,
) -> Vec<Vec<f64>>
where
    V: ValueEstimator<[f64; 2]> + ?Sized,
{
    let xs = util::linspace(low[0], high[0], num_tiles);
    let ys = util::linspace(low[1], high[1], num_tiles);
    ys.iter()
        .map(|&y| {
            xs.iter()
                .map(|&x| -util::max(&estimator.predict(&[x, y])))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_average_functional() {
        let avg = running_average(&[1.0, 3.0, 5.0, 7.0], 1);
        assert_eq!(avg, vec![1.0, 2.0, 4.0, 6.0], "Window of the previous element");

        let avg = running_average(&[2.0, 4.0, 6.0], 100);
        assert_eq!(avg, vec![2.0, 3.0, 4.0], "Window clipped at the start");
        assert!(running_average(&[], 10).is_empty());
    }

    #[test]
    fn mean_last_functional() {
        assert_eq!(mean_last(&[1.0, 2.0, 3.0, 5.0], 2), Some(4.0));
        assert_eq!(mean_last(&[1.0, 3.0], 100), Some(2.0));
        assert_eq!(mean_last(&[], 100), None);
        assert_eq!(mean_last(&[1.0], 0), None);
    }

    struct Position;

    impl ValueEstimator<[f64; 2]> for Position {
        fn num_actions(&self) -> usize {
            2
        }

        fn predict(&self, state: &[f64; 2]) -> Vec<f64> {
            vec![state[0], state[0] + state[1]]
        }

        fn update(&mut self, _state: &[f64; 2], _action: usize, _target: f64) {}
    }

    #[test]
    fn cost_to_go_grid() {
        let grid = cost_to_go(&Position, [0.0, 0.0], [1.0, 2.0], 3);
        assert_eq!(grid.len(), 3, "One row per velocity");
        assert!(grid.iter().all(|row| row.len() == 3), "One column per position");
        assert_eq!(grid[0], vec![-0.0, -0.5, -1.0]);
        assert_eq!(grid[2], vec![-2.0, -2.5, -3.0]);
    }
}
