//! Summary reductions used by the watchlist and portfolio views.
//!
//! Empty inputs produce `None` instead of dividing by zero.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut total = 0.0_f64;
        let mut max: Option<f64> = None;

        for value in values {
            count += 1;
            total += value;
            max = Some(match max {
                Some(current) if current >= value => current,
                _ => value,
            });
        }

        let mean = if count > 0 {
            Some(total / count as f64)
        } else {
            None
        };

        Self { count, mean, max }
    }

    /// Mean, or zero when there is nothing to average.
    pub fn mean_or_zero(&self) -> f64 {
        self.mean.unwrap_or(0.0)
    }

    pub fn max_or_zero(&self) -> f64 {
        self.max.unwrap_or(0.0)
    }
}

pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    Summary::of(values).mean
}

pub fn max<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    Summary::of(values).max
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_input_has_no_mean_or_max() {
        let summary = Summary::of(Vec::<f64>::new());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.max, None);
        assert_eq!(summary.mean_or_zero(), 0.0);
        assert_eq!(summary.max_or_zero(), 0.0);
    }

    #[test]
    fn watchlist_seed_values() {
        let summary = Summary::of([8.4, 28.6, 6.8]);
        assert_eq!(summary.count, 3);
        assert_relative_eq!(summary.mean.unwrap(), 14.6, epsilon = 1e-9);
        assert_relative_eq!(summary.max.unwrap(), 28.6);
    }

    #[test]
    fn max_handles_negatives() {
        assert_eq!(max([-5.0, -2.0, -9.0]), Some(-2.0));
        assert_eq!(mean([-1.0, 1.0]), Some(0.0));
    }

    #[test]
    fn single_value() {
        let summary = Summary::of([4.2]);
        assert_eq!(summary.mean, Some(4.2));
        assert_eq!(summary.max, Some(4.2));
    }
}
