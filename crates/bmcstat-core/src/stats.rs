use serde::{Deserialize, Serialize};

/// Mean and maximum of a bucket column; both are `None` for an empty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

impl TimeStats {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max: Option<f64> = None;
        for v in values {
            count += 1;
            sum += v;
            max = Some(max.map_or(v, |m| m.max(v)));
        }
        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };
        Self { count, mean, max }
    }
}

/// Orders optional values with `None` last, like a null-aware sort.
pub fn cmp_nulls_last(a: Option<f64>, b: Option<f64>, descending: bool) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
