/// Length of one scoring tier, in seconds.
const TIER_SECONDS: u32 = 30;

/// `(start, end)` score of each tier, interpolated over [`TIER_SECONDS`].
const TIERS: [(f64, f64); 3] = [(300.0, 201.0), (200.0, 101.0), (100.0, 1.0)];

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Score awarded for solving the round after `elapsed` seconds.
///
/// Three linear tiers of thirty seconds each, rounded to the nearest integer
/// and floored at 1. Anything from ninety seconds on scores nothing.
pub fn score_for_elapsed(elapsed: u32) -> u32 {
    let tier = (elapsed / TIER_SECONDS) as usize;
    let Some(&(start, end)) = TIERS.get(tier) else {
        return 0;
    };
    let t = f64::from(elapsed % TIER_SECONDS) / f64::from(TIER_SECONDS);
    lerp(start, end, t).round().max(1.0) as u32
}
