//! Partitions compared cases into the buckets discussed in the results section.
//!
//! Buckets are views (`Vec<&ComparedCase>`) over the details table and may
//! overlap. A missing percentage never satisfies a threshold comparison.

use serde::{Deserialize, Serialize};

use crate::join::ComparedCase;
use crate::stats::{cmp_nulls_last, TimeStats};
use crate::thresholds::*;

pub type Bucket<'a> = Vec<&'a ComparedCase>;

fn above(v: Option<f64>, t: f64) -> bool {
    v.is_some_and(|v| v > t)
}

fn at_least(v: Option<f64>, t: f64) -> bool {
    v.is_some_and(|v| v >= t)
}

fn below(v: Option<f64>, t: f64) -> bool {
    v.is_some_and(|v| v < t)
}

fn at_most(v: Option<f64>, t: f64) -> bool {
    v.is_some_and(|v| v <= t)
}

fn absint_stats(bucket: &Bucket<'_>) -> TimeStats {
    TimeStats::from_values(bucket.iter().map(|c| c.augmented.absint_time))
}

/// Did AI4BMC make a case faster or slower?
#[derive(Debug)]
pub struct PerformanceBuckets<'a> {
    pub total: usize,
    /// Total time moved by less than the stable band.
    pub stable: Bucket<'a>,
    /// Sorted by speedup, largest first.
    pub speedups: Bucket<'a>,
    /// Sorted by (negative) change, mildest first.
    pub slowdowns: Bucket<'a>,
}

impl<'a> PerformanceBuckets<'a> {
    pub fn large_speedups(&self) -> usize {
        self.speedups
            .iter()
            .filter(|c| above(c.percentage_change(), LARGE_SPEEDUP_PCT))
            .count()
    }

    pub fn other_speedups(&self) -> usize {
        self.speedups
            .iter()
            .filter(|c| at_most(c.percentage_change(), LARGE_SPEEDUP_PCT))
            .count()
    }

    pub fn mild_slowdowns(&self) -> usize {
        self.slowdowns
            .iter()
            .filter(|c| at_least(c.percentage_change(), MILD_SLOWDOWN_PCT))
            .count()
    }

    pub fn severe_slowdowns(&self) -> usize {
        self.slowdowns
            .iter()
            .filter(|c| below(c.percentage_change(), MILD_SLOWDOWN_PCT))
            .count()
    }

    pub fn speedup_absint(&self) -> TimeStats {
        absint_stats(&self.speedups)
    }
}

pub fn performance<'a>(details: &[&'a ComparedCase]) -> PerformanceBuckets<'a> {
    let mut stable = Vec::new();
    let mut speedups = Vec::new();
    let mut slowdowns = Vec::new();

    for &c in details {
        let diff = c.total_diff();
        if diff.abs() < STABLE_BAND_SECS {
            stable.push(c);
        } else if diff > STABLE_BAND_SECS {
            speedups.push(c);
        } else if diff < -STABLE_BAND_SECS {
            slowdowns.push(c);
        }
        // exactly +/- the band: neither stable nor a change
    }

    let by_change_desc = |a: &&ComparedCase, b: &&ComparedCase| {
        cmp_nulls_last(a.percentage_change(), b.percentage_change(), true)
    };
    speedups.sort_by(by_change_desc);
    slowdowns.sort_by(by_change_desc);

    PerformanceBuckets {
        total: details.len(),
        stable,
        speedups,
        slowdowns,
    }
}

/// How much of AI4BMC's time goes into abstract interpretation.
#[derive(Debug)]
pub struct AbsIntBuckets<'a> {
    pub total: usize,
    /// BMC finished quickly but AI4BMC did not.
    pub edge_cases: Bucket<'a>,
    /// Fast AI4BMC runs dominated by analysis time.
    pub fast_heavy: Bucket<'a>,
    pub fast_light: Bucket<'a>,
    pub slow_light: Bucket<'a>,
    pub slow_heavy: Bucket<'a>,
}

impl<'a> AbsIntBuckets<'a> {
    pub fn fast_heavy_stats(&self) -> TimeStats {
        absint_stats(&self.fast_heavy)
    }

    pub fn fast_light_stats(&self) -> TimeStats {
        absint_stats(&self.fast_light)
    }

    pub fn slow_light_stats(&self) -> TimeStats {
        absint_stats(&self.slow_light)
    }
}

pub fn absint_time<'a>(details: &[&'a ComparedCase]) -> AbsIntBuckets<'a> {
    let mut b = AbsIntBuckets {
        total: details.len(),
        edge_cases: Vec::new(),
        fast_heavy: Vec::new(),
        fast_light: Vec::new(),
        slow_light: Vec::new(),
        slow_heavy: Vec::new(),
    };

    for &c in details {
        let ai4bmc = c.augmented.total_time;
        let ai_pct = c.augmented.ai_pct;
        if c.baseline.total_time <= FAST_RUN_SECS && ai4bmc > FAST_RUN_SECS {
            b.edge_cases.push(c);
        }
        if ai4bmc <= FAST_RUN_SECS {
            if above(ai_pct, HEAVY_ABSINT_PCT) {
                b.fast_heavy.push(c);
            } else if at_most(ai_pct, HEAVY_ABSINT_PCT) {
                b.fast_light.push(c);
            }
        } else if at_most(ai_pct, HEAVY_ABSINT_PCT) {
            b.slow_light.push(c);
        } else if above(ai_pct, HEAVY_ABSINT_PCT) {
            b.slow_heavy.push(c);
        }
    }
    b
}

/// How many dereference checks the analysis discharges on its own.
#[derive(Debug)]
pub struct PrecisionBuckets<'a> {
    pub total: usize,
    /// Most checks solved on the original program, best first.
    pub pre_majority: Bucket<'a>,
    pub pre_full: Bucket<'a>,
    /// Few solved before unrolling but most after, best first.
    pub post_majority: Bucket<'a>,
    pub post_full: Bucket<'a>,
    /// Neither stage solves most checks; ascending by (pre, post).
    pub hard: Bucket<'a>,
}

fn pre(c: &ComparedCase) -> Option<f64> {
    c.augmented.pp.solved_pct
}

fn post(c: &ComparedCase) -> Option<f64> {
    c.augmented.opsem.solved_pct
}

pub fn precision<'a>(details: &[&'a ComparedCase]) -> PrecisionBuckets<'a> {
    let mut pre_majority: Bucket<'a> = details
        .iter()
        .copied()
        .filter(|c| at_least(pre(c), MAJORITY_SOLVED_PCT))
        .collect();
    pre_majority.sort_by(|a, b| cmp_nulls_last(pre(a), pre(b), true));
    let pre_full = pre_majority
        .iter()
        .copied()
        .filter(|c| pre(c) == Some(FULLY_SOLVED_PCT))
        .collect();

    let mut post_majority: Bucket<'a> = details
        .iter()
        .copied()
        .filter(|c| {
            below(pre(c), MAJORITY_SOLVED_PCT) && at_least(post(c), MAJORITY_SOLVED_PCT)
        })
        .collect();
    post_majority.sort_by(|a, b| cmp_nulls_last(post(a), post(b), true));
    let post_full = post_majority
        .iter()
        .copied()
        .filter(|c| post(c) == Some(FULLY_SOLVED_PCT))
        .collect();

    let mut hard: Bucket<'a> = details
        .iter()
        .copied()
        .filter(|c| {
            below(pre(c), MAJORITY_SOLVED_PCT)
                && (post(c).is_none() || below(post(c), MAJORITY_SOLVED_PCT))
        })
        .collect();
    hard.sort_by(|a, b| {
        cmp_nulls_last(pre(a), pre(b), false).then(cmp_nulls_last(post(a), post(b), false))
    });

    PrecisionBuckets {
        total: details.len(),
        pre_majority,
        pre_full,
        post_majority,
        post_full,
        hard,
    }
}

/// Counts and statistics of all buckets for one solver, as exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub cases: usize,
    pub stable: usize,
    pub speedups: usize,
    pub speedups_above_95_pct: usize,
    pub speedups_other: usize,
    pub speedup_absint: TimeStats,
    pub slowdowns: usize,
    pub slowdowns_within_50_pct: usize,
    pub slowdowns_other: usize,
    pub edge_cases: usize,
    pub fast_heavy_absint: TimeStats,
    pub fast_light_absint: TimeStats,
    pub slow_light_absint: TimeStats,
    pub slow_heavy: usize,
}

impl BucketSummary {
    pub fn new(perf: &PerformanceBuckets<'_>, absint: &AbsIntBuckets<'_>) -> Self {
        Self {
            cases: perf.total,
            stable: perf.stable.len(),
            speedups: perf.speedups.len(),
            speedups_above_95_pct: perf.large_speedups(),
            speedups_other: perf.other_speedups(),
            speedup_absint: perf.speedup_absint(),
            slowdowns: perf.slowdowns.len(),
            slowdowns_within_50_pct: perf.mild_slowdowns(),
            slowdowns_other: perf.severe_slowdowns(),
            edge_cases: absint.edge_cases.len(),
            fast_heavy_absint: absint.fast_heavy_stats(),
            fast_light_absint: absint.fast_light_stats(),
            slow_light_absint: absint.slow_light_stats(),
            slow_heavy: absint.slow_heavy.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionSummary {
    pub cases: usize,
    pub pre_majority: usize,
    pub pre_full: usize,
    pub post_majority: usize,
    pub post_full: usize,
    pub hard: usize,
}

impl From<&PrecisionBuckets<'_>> for PrecisionSummary {
    fn from(p: &PrecisionBuckets<'_>) -> Self {
        Self {
            cases: p.total,
            pre_majority: p.pre_majority.len(),
            pre_full: p.pre_full.len(),
            post_majority: p.post_majority.len(),
            post_full: p.post_full.len(),
            hard: p.hard.len(),
        }
    }
}
