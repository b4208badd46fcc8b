//! Randomized pacing between detail-page requests.
//!
//! The ratings site blocks clients that crawl it at machine speed, so every
//! detail fetch is preceded by a pause drawn uniformly from a configured
//! interval. There is no adaptive backoff.

use crate::error::ScrapeError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Source of uniformly distributed draws.
///
/// Swappable so tests can pin the delay.
pub trait UniformRandom {
    /// Draw from the closed interval `[min, max]`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;
}

impl UniformRandom for StdRng {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.random_range(min..=max)
    }
}

/// Closed interval of pause lengths, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingBounds {
    lower: f64,
    upper: f64,
}

impl PacingBounds {
    pub const DEFAULT_LOWER_SECS: f64 = 1.0;
    pub const DEFAULT_UPPER_SECS: f64 = 10.0;
    /// Longest accepted pause: one day.
    pub const MAX_SECS: f64 = 86_400.0;

    /// Validate a pause interval.
    ///
    /// # Arguments
    ///
    /// * `lower` - Shortest pause, in seconds
    /// * `upper` - Longest pause, in seconds
    ///
    /// # Returns
    ///
    /// The interval, or [`ScrapeError::InvalidConfig`] if either bound is not
    /// finite, `lower` is negative, `upper` exceeds [`Self::MAX_SECS`], or
    /// `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ScrapeError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(ScrapeError::InvalidConfig(format!(
                "wait bounds must be finite (got {lower}..{upper})"
            )));
        }
        if lower < 0.0 {
            return Err(ScrapeError::InvalidConfig(format!(
                "minimum wait must not be negative (got {lower})"
            )));
        }
        if upper > Self::MAX_SECS {
            return Err(ScrapeError::InvalidConfig(format!(
                "maximum wait {upper}s exceeds the {}s limit",
                Self::MAX_SECS
            )));
        }
        if lower > upper {
            return Err(ScrapeError::InvalidConfig(format!(
                "minimum wait {lower}s exceeds maximum wait {upper}s"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

impl Default for PacingBounds {
    fn default() -> Self {
        Self {
            lower: Self::DEFAULT_LOWER_SECS,
            upper: Self::DEFAULT_UPPER_SECS,
        }
    }
}

/// Sleeps a random, bounded duration before each request.
pub struct Pacer<R = StdRng> {
    bounds: PacingBounds,
    rng: R,
}

impl Pacer<StdRng> {
    /// Pacer seeded from the operating system.
    pub fn from_os_rng(bounds: PacingBounds) -> Self {
        Self::new(bounds, StdRng::from_os_rng())
    }
}

impl<R: UniformRandom> Pacer<R> {
    pub fn new(bounds: PacingBounds, rng: R) -> Self {
        Self { bounds, rng }
    }

    /// Draw the next pause, clamped into the configured bounds.
    pub fn next_delay(&mut self) -> Duration {
        let PacingBounds { lower, upper } = self.bounds;
        let secs = self.rng.uniform(lower, upper).clamp(lower, upper);
        Duration::from_secs_f64(secs)
    }

    /// Block the current flow for a freshly drawn pause and return it.
    #[instrument(level = "debug", skip_all)]
    pub async fn wait(&mut self) -> Duration {
        let delay = self.next_delay();
        debug!(?delay, "Waiting before the next request so we don't get blocked");
        sleep(delay).await;
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    /// Replays a fixed list of draws.
    struct Scripted(Vec<f64>);

    impl UniformRandom for Scripted {
        fn uniform(&mut self, _min: f64, _max: f64) -> f64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_bounds_validation() {
        assert!(PacingBounds::new(1.0, 10.0).is_ok());
        assert!(PacingBounds::new(0.0, 0.0).is_ok());
        assert!(PacingBounds::new(5.0, 1.0).is_err());
        assert!(PacingBounds::new(-1.0, 1.0).is_err());
        assert!(PacingBounds::new(1.0, f64::INFINITY).is_err());
        assert!(PacingBounds::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_huge_bounds_rejected() {
        assert!(matches!(
            PacingBounds::new(1e20, 1e20),
            Err(ScrapeError::InvalidConfig(_))
        ));
        assert!(PacingBounds::new(1.0, 1e20).is_err());
        assert!(PacingBounds::new(1.0, PacingBounds::MAX_SECS + 1.0).is_err());

        let bounds = PacingBounds::new(PacingBounds::MAX_SECS, PacingBounds::MAX_SECS).unwrap();
        let mut pacer = Pacer::new(bounds, StdRng::seed_from_u64(1));
        assert_eq!(pacer.next_delay(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_default_bounds_are_one_to_ten_seconds() {
        let bounds = PacingBounds::default();
        assert_eq!(bounds.lower(), 1.0);
        assert_eq!(bounds.upper(), 10.0);
    }

    #[test]
    fn test_draws_stay_within_bounds_and_spread_out() {
        let bounds = PacingBounds::new(1.0, 10.0).unwrap();
        let mut pacer = Pacer::new(bounds, StdRng::seed_from_u64(0x5eed));

        const DRAWS: usize = 10_000;
        let mut buckets = [0usize; 9];
        let mut sum = 0.0;
        for _ in 0..DRAWS {
            let secs = pacer.next_delay().as_secs_f64();
            assert!((1.0..=10.0).contains(&secs), "draw {secs} out of bounds");
            sum += secs;
            let bucket = ((secs - 1.0) as usize).min(8);
            buckets[bucket] += 1;
        }

        // Uniform on [1, 10]: mean 5.5, each one-second bucket about 1/9 of draws.
        let mean = sum / DRAWS as f64;
        assert!((mean - 5.5).abs() < 0.2, "mean {mean} too far from 5.5");
        let expected = DRAWS / 9;
        for count in buckets {
            assert!(
                count > expected * 3 / 4 && count < expected * 5 / 4,
                "bucket count {count} far from {expected}"
            );
        }
    }

    #[test]
    fn test_out_of_range_draws_are_clamped() {
        let bounds = PacingBounds::new(2.0, 3.0).unwrap();
        let mut pacer = Pacer::new(bounds, Scripted(vec![0.5, 2.5, 99.0]));
        assert_eq!(pacer.next_delay(), Duration::from_secs(2));
        assert_eq!(pacer.next_delay(), Duration::from_millis(2500));
        assert_eq!(pacer.next_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_degenerate_interval() {
        let bounds = PacingBounds::new(4.0, 4.0).unwrap();
        let mut pacer = Pacer::new(bounds, StdRng::seed_from_u64(1));
        assert_eq!(pacer.next_delay(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_the_drawn_delay() {
        let bounds = PacingBounds::default();
        let mut pacer = Pacer::new(bounds, Scripted(vec![7.0]));

        let t0 = Instant::now();
        let waited = pacer.wait().await;
        assert_eq!(waited, Duration::from_secs(7));
        assert!(t0.elapsed() >= Duration::from_secs(7));
    }
}
