use serde::{Deserialize, Serialize};

/// Summary statistics over a set of numeric observations.
///
/// Everything except `count` is `None` when there were no observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Stat {
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            median: None,
            min: None,
            max: None,
        }
    }
}

pub fn number_stats(values: &[f64]) -> Stat {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    if n == 0 {
        return Stat::empty();
    }

    let sum: f64 = sorted.iter().sum();
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    Stat {
        count: n,
        mean: Some(sum / n as f64),
        median: Some(median),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let stat = number_stats(&[]);
        assert_eq!(stat.count, 0);
        assert_eq!(stat.mean, None);
        assert_eq!(stat.median, None);
        assert_eq!(stat.min, None);
        assert_eq!(stat.max, None);
    }

    #[test]
    fn test_median_parity() {
        assert_eq!(number_stats(&[10.0, 20.0, 30.0, 40.0]).median, Some(25.0));
        assert_eq!(number_stats(&[10.0, 20.0, 30.0]).median, Some(20.0));
    }

    #[test]
    fn test_unsorted_input() {
        let stat = number_stats(&[50.0, 30.0, 60.0, 45.0]);
        assert_eq!(stat.count, 4);
        assert_eq!(stat.min, Some(30.0));
        assert_eq!(stat.max, Some(60.0));
        assert_eq!(stat.median, Some(47.5));
        assert_eq!(stat.mean, Some(46.25));
    }

    #[test]
    fn test_negative_values() {
        let stat = number_stats(&[-2.0, 3.0]);
        assert_eq!(stat.mean, Some(0.5));
        assert_eq!(stat.min, Some(-2.0));
    }
}
