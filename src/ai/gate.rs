//! Request Gate
//!
//! Admission control in front of every outbound provider call. Three caps are
//! enforced against shared counters:
//!
//! - **Daily cap**: at most `per_day` admissions per rolling day window
//! - **Minute cap**: at most `per_minute` admissions per rolling minute window
//! - **Spacing**: at least `min_spacing` between two admissions
//!
//! ## Ordering
//!
//! ```text
//! day window expired?    -> reset daily count
//! daily count at cap?    -> DailyLimitExceeded (no wait)
//! minute window expired? -> reset minute count
//! minute count at cap?   -> MinuteLimitExceeded (no wait)
//! too soon after last?   -> sleep until spacing is met
//! record admission
//! ```
//!
//! Hard caps are checked before the spacing sleep so a call that would be
//! rejected never waits. The whole sequence runs inside one async critical
//! section, so concurrent callers queue behind each other and counters never
//! lose updates.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::constants::rate_limit;

// =============================================================================
// Errors
// =============================================================================

/// Rejections from [`RequestGate::admit`]. Never retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Daily limit reached. Resets in {hours_remaining} hours.")]
    DailyLimitExceeded { hours_remaining: u64 },

    #[error("Please wait {seconds_remaining} seconds before trying again.")]
    MinuteLimitExceeded { seconds_remaining: u64 },
}

// =============================================================================
// Clock
// =============================================================================

/// Time source for the gate
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer. Reading and sleeping both go
/// through tokio so paused test time stays consistent.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Manually driven clock. `sleep` advances time instead of waiting.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: StdMutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: StdMutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self
            .offset
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *offset += by;
    }

    /// Time advanced since creation
    pub fn elapsed(&self) -> Duration {
        *self
            .offset
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Caps and window lengths enforced by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateLimits {
    pub per_minute: u32,
    pub per_day: u32,
    pub min_spacing: Duration,
    pub minute_window: Duration,
    pub day_window: Duration,
}

impl Default for GateLimits {
    fn default() -> Self {
        Self {
            per_minute: rate_limit::REQUESTS_PER_MINUTE,
            per_day: rate_limit::REQUESTS_PER_DAY,
            min_spacing: Duration::from_secs(rate_limit::MIN_SPACING_SECS),
            minute_window: Duration::from_secs(rate_limit::MINUTE_WINDOW_SECS),
            day_window: Duration::from_secs(rate_limit::DAY_WINDOW_SECS),
        }
    }
}

// =============================================================================
// Gate
// =============================================================================

/// Counter state. A `None` window end is treated as already expired.
#[derive(Debug, Default)]
struct GateState {
    last_request: Option<Instant>,
    minute_count: u32,
    minute_window_end: Option<Instant>,
    daily_count: u32,
    day_window_end: Option<Instant>,
}

/// Point-in-time view of the gate counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSnapshot {
    pub minute_count: u32,
    pub daily_count: u32,
    pub limits: GateLimits,
}

impl GateSnapshot {
    pub fn remaining_today(&self) -> u32 {
        self.limits.per_day.saturating_sub(self.daily_count)
    }
}

pub type SharedGate = Arc<RequestGate>;

pub struct RequestGate {
    limits: GateLimits,
    clock: Arc<dyn Clock>,
    state: Mutex<GateState>,
}

impl RequestGate {
    pub fn new(limits: GateLimits) -> Self {
        Self::with_clock(limits, Arc::new(SystemClock))
    }

    pub fn with_clock(limits: GateLimits, clock: Arc<dyn Clock>) -> Self {
        Self {
            limits,
            clock,
            state: Mutex::new(GateState::default()),
        }
    }

    /// Admit one outbound call, waiting out the spacing floor if needed.
    ///
    /// The lock is held across the wait, so a second caller observes the
    /// first caller's admission before making its own checks.
    pub async fn admit(&self) -> Result<(), GateError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if is_expired(state.day_window_end, now) {
            state.daily_count = 0;
            state.day_window_end = Some(now + self.limits.day_window);
        }

        if state.daily_count >= self.limits.per_day {
            let remaining = remaining(state.day_window_end, now);
            let hours_remaining = ceil_div(remaining.as_secs_f64(), 3600.0);
            tracing::warn!(
                daily_count = state.daily_count,
                hours_remaining,
                "Request gate: daily cap reached"
            );
            return Err(GateError::DailyLimitExceeded { hours_remaining });
        }

        if is_expired(state.minute_window_end, now) {
            state.minute_count = 0;
            state.minute_window_end = Some(now + self.limits.minute_window);
        }

        if state.minute_count >= self.limits.per_minute {
            let remaining = remaining(state.minute_window_end, now);
            let seconds_remaining = ceil_div(remaining.as_secs_f64(), 1.0);
            tracing::debug!(
                minute_count = state.minute_count,
                seconds_remaining,
                "Request gate: minute cap reached"
            );
            return Err(GateError::MinuteLimitExceeded { seconds_remaining });
        }

        if let Some(last) = state.last_request {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.limits.min_spacing {
                let wait = self.limits.min_spacing - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "Request gate: spacing wait");
                self.clock.sleep(wait).await;
            }
        }

        state.minute_count += 1;
        state.daily_count += 1;
        state.last_request = Some(self.clock.now());

        tracing::trace!(
            minute_count = state.minute_count,
            daily_count = state.daily_count,
            "Request gate: admitted"
        );
        Ok(())
    }

    /// Counters as the next admission would see them. Expired windows
    /// read as zero.
    pub async fn snapshot(&self) -> GateSnapshot {
        let state = self.state.lock().await;
        let now = self.clock.now();
        let live = |count: u32, end: Option<Instant>| if is_expired(end, now) { 0 } else { count };
        GateSnapshot {
            minute_count: live(state.minute_count, state.minute_window_end),
            daily_count: live(state.daily_count, state.day_window_end),
            limits: self.limits,
        }
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new(GateLimits::default())
    }
}

fn is_expired(window_end: Option<Instant>, now: Instant) -> bool {
    window_end.is_none_or(|end| now > end)
}

fn remaining(window_end: Option<Instant>, now: Instant) -> Duration {
    window_end.map_or(Duration::ZERO, |end| end.saturating_duration_since(now))
}

fn ceil_div(value: f64, unit: f64) -> u64 {
    (value / unit).ceil() as u64
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_with_clock(limits: GateLimits) -> (RequestGate, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let gate = RequestGate::with_clock(limits, clock.clone());
        (gate, clock)
    }

    #[tokio::test]
    async fn test_fourth_call_in_minute_is_rejected() {
        let (gate, clock) = gate_with_clock(GateLimits {
            min_spacing: Duration::from_secs(5),
            ..GateLimits::default()
        });

        for _ in 0..3 {
            gate.admit().await.unwrap();
        }
        // 3 admissions with 5s spacing: 10s elapsed
        assert_eq!(clock.elapsed(), Duration::from_secs(10));

        let err = gate.admit().await.unwrap_err();
        match err {
            GateError::MinuteLimitExceeded { seconds_remaining } => {
                assert!(seconds_remaining > 0);
                assert_eq!(seconds_remaining, 50);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(gate.snapshot().await.minute_count, 3);
    }

    #[tokio::test]
    async fn test_default_limits_reject_fourth_call() {
        let (gate, _clock) = gate_with_clock(GateLimits::default());

        // 0s, 20s, 40s
        for _ in 0..3 {
            gate.admit().await.unwrap();
        }
        let err = gate.admit().await.unwrap_err();
        assert_eq!(
            err,
            GateError::MinuteLimitExceeded {
                seconds_remaining: 20
            }
        );
    }

    #[tokio::test]
    async fn test_minute_window_resets() {
        let (gate, clock) = gate_with_clock(GateLimits::default());
        for _ in 0..3 {
            gate.admit().await.unwrap();
        }
        clock.advance(Duration::from_secs(21));
        gate.admit().await.unwrap();
        assert_eq!(gate.snapshot().await.minute_count, 1);
        assert_eq!(gate.snapshot().await.daily_count, 4);
    }

    #[tokio::test]
    async fn test_consecutive_calls_are_spaced() {
        let (gate, clock) = gate_with_clock(GateLimits::default());

        gate.admit().await.unwrap();
        let first = clock.now();
        gate.admit().await.unwrap();
        let second = clock.now();

        assert!(second.duration_since(first) >= Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_no_wait_when_spacing_already_met() {
        let (gate, clock) = gate_with_clock(GateLimits::default());

        gate.admit().await.unwrap();
        clock.advance(Duration::from_secs(30));
        let before = clock.elapsed();
        gate.admit().await.unwrap();
        assert_eq!(clock.elapsed(), before);
    }

    #[tokio::test]
    async fn test_daily_cap_rejects_201st_call() {
        let (gate, clock) = gate_with_clock(GateLimits::default());

        for i in 0..200 {
            if i > 0 && i % 3 == 0 {
                clock.advance(Duration::from_secs(61));
            }
            gate.admit().await.unwrap();
        }
        clock.advance(Duration::from_secs(61));

        let err = gate.admit().await.unwrap_err();
        match err {
            GateError::DailyLimitExceeded { hours_remaining } => {
                assert!((1..=24).contains(&hours_remaining));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(gate.snapshot().await.remaining_today(), 0);
    }

    #[tokio::test]
    async fn test_daily_cap_checked_before_spacing_wait() {
        let (gate, clock) = gate_with_clock(GateLimits {
            per_day: 1,
            ..GateLimits::default()
        });

        gate.admit().await.unwrap();
        let before = clock.elapsed();
        let err = gate.admit().await.unwrap_err();

        assert_eq!(err, GateError::DailyLimitExceeded { hours_remaining: 24 });
        assert_eq!(clock.elapsed(), before);
    }

    #[tokio::test]
    async fn test_minute_cap_checked_before_spacing_wait() {
        let (gate, clock) = gate_with_clock(GateLimits {
            per_minute: 1,
            ..GateLimits::default()
        });

        gate.admit().await.unwrap();
        let before = clock.elapsed();
        assert!(gate.admit().await.is_err());
        assert_eq!(clock.elapsed(), before);
    }

    #[tokio::test]
    async fn test_concurrent_admissions_do_not_lose_updates() {
        let clock = Arc::new(ManualClock::new());
        let gate = Arc::new(RequestGate::with_clock(
            GateLimits {
                per_minute: 100,
                min_spacing: Duration::ZERO,
                ..GateLimits::default()
            },
            clock,
        ));

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let gate = Arc::clone(&gate);
                tokio::spawn(async move { gate.admit().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let snapshot = gate.snapshot().await;
        assert_eq!(snapshot.minute_count, 20);
        assert_eq!(snapshot.daily_count, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_spacing_with_paused_time() {
        let gate = RequestGate::default();
        let start = tokio::time::Instant::now();

        gate.admit().await.unwrap();
        gate.admit().await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_counts_paused_time_as_spacing() {
        let gate = RequestGate::default();
        let start = tokio::time::Instant::now();

        gate.admit().await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        gate.admit().await.unwrap();

        // 30s of virtual time already covers the 20s floor
        assert_eq!(start.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_snapshot_reads_expired_windows_as_zero() {
        let clock = Arc::new(ManualClock::new());
        let gate = RequestGate::with_clock(
            GateLimits {
                min_spacing: Duration::ZERO,
                ..GateLimits::default()
            },
            clock.clone(),
        );

        gate.admit().await.unwrap();
        gate.admit().await.unwrap();
        let snapshot = gate.snapshot().await;
        assert_eq!(snapshot.minute_count, 2);
        assert_eq!(snapshot.remaining_today(), 198);

        clock.advance(Duration::from_secs(61));
        let snapshot = gate.snapshot().await;
        assert_eq!(snapshot.minute_count, 0);
        assert_eq!(snapshot.daily_count, 2);

        clock.advance(Duration::from_secs(24 * 60 * 60));
        assert_eq!(gate.snapshot().await.remaining_today(), 200);
    }

    #[test]
    fn test_gate_error_messages() {
        assert_eq!(
            GateError::DailyLimitExceeded { hours_remaining: 3 }.to_string(),
            "Daily limit reached. Resets in 3 hours."
        );
        assert_eq!(
            GateError::MinuteLimitExceeded {
                seconds_remaining: 7
            }
            .to_string(),
            "Please wait 7 seconds before trying again."
        );
    }
}
