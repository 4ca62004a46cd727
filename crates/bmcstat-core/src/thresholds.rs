/// Cases whose total times differ by less than this many seconds count as unchanged.
pub const STABLE_BAND_SECS: f64 = 5.0;

/// Speedups above this percentage are reported separately.
pub const LARGE_SPEEDUP_PCT: f64 = 95.0;

/// Slowdowns at or above this (negative) percentage count as mild.
pub const MILD_SLOWDOWN_PCT: f64 = -50.0;

/// Split between fast and slow AI4BMC runs.
pub const FAST_RUN_SECS: f64 = 50.0;

/// Share of AI4BMC time spent in abstract interpretation that counts as heavy.
pub const HEAVY_ABSINT_PCT: f64 = 40.0;

/// A stage "mostly solves" its checks from this solved percentage on.
pub const MAJORITY_SOLVED_PCT: f64 = 50.0;

pub const FULLY_SOLVED_PCT: f64 = 100.0;
