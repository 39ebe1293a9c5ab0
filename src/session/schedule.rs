//! Cancellable repeating tick schedules.
//!
//! The host loop owns the clock. It passes the current [`Instant`] in and the
//! scheduler answers whether a given schedule has a tick due.

use std::time::{Duration, Instant};

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Source of repeating ticks.
pub trait TickScheduler {
    /// Arm a new repeating schedule whose first tick is one `period` from now.
    fn schedule_repeating(&mut self, period: Duration) -> TickHandle;

    /// Disarm a schedule. Unknown handles are ignored.
    fn cancel(&mut self, handle: TickHandle);

    /// Number of armed schedules.
    fn active_count(&self) -> usize;

    /// Move the clock forward without consuming ticks.
    fn observe(&mut self, now: Instant);

    /// Consume one due tick of `handle` at time `now`.
    ///
    /// Returns false once the schedule has no tick due, or was cancelled.
    fn poll_tick(&mut self, handle: TickHandle, now: Instant) -> bool;
}

#[derive(Debug, Clone)]
struct Schedule {
    handle: TickHandle,
    period: Duration,
    next_due: Instant,
}

/// Deterministic scheduler driven by caller-supplied instants.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    now: Instant,
    next_id: u64,
    schedules: Vec<Schedule>,
}

impl IntervalScheduler {
    /// Create a scheduler whose clock starts at `origin`.
    #[must_use]
    pub const fn new(origin: Instant) -> Self {
        Self {
            now: origin,
            next_id: 0,
            schedules: Vec::new(),
        }
    }

    /// Create a scheduler starting at the current time.
    #[must_use]
    pub fn starting_now() -> Self {
        Self::new(Instant::now())
    }

    /// Latest instant the scheduler has observed.
    #[must_use]
    pub const fn now(&self) -> Instant {
        self.now
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.schedules.push(Schedule {
            handle,
            period,
            next_due: self.now + period,
        });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.schedules.retain(|s| s.handle != handle);
    }

    fn active_count(&self) -> usize {
        self.schedules.len()
    }

    fn observe(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    fn poll_tick(&mut self, handle: TickHandle, now: Instant) -> bool {
        self.observe(now);

        let Some(schedule) = self.schedules.iter_mut().find(|s| s.handle == handle) else {
            return false;
        };

        if schedule.next_due <= self.now {
            schedule.next_due += schedule.period;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut IntervalScheduler, handle: TickHandle, now: Instant) -> u32 {
        let mut count = 0;
        while scheduler.poll_tick(handle, now) {
            count += 1;
        }
        count
    }

    #[test]
    fn test_first_tick_after_one_period() {
        let origin = Instant::now();
        let mut scheduler = IntervalScheduler::new(origin);
        let handle = scheduler.schedule_repeating(TICK_PERIOD);

        assert!(!scheduler.poll_tick(handle, origin + Duration::from_millis(999)));
        assert!(scheduler.poll_tick(handle, origin + Duration::from_secs(1)));
        assert!(!scheduler.poll_tick(handle, origin + Duration::from_secs(1)));
    }

    #[test]
    fn test_catch_up_after_delay() {
        let origin = Instant::now();
        let mut scheduler = IntervalScheduler::new(origin);
        let handle = scheduler.schedule_repeating(TICK_PERIOD);

        assert_eq!(drain(&mut scheduler, handle, origin + Duration::from_millis(3500)), 3);
    }

    #[test]
    fn test_cancelled_schedule_never_fires() {
        let origin = Instant::now();
        let mut scheduler = IntervalScheduler::new(origin);
        let handle = scheduler.schedule_repeating(TICK_PERIOD);
        scheduler.cancel(handle);

        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(drain(&mut scheduler, handle, origin + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut scheduler = IntervalScheduler::new(Instant::now());
        let a = scheduler.schedule_repeating(TICK_PERIOD);
        let b = scheduler.schedule_repeating(TICK_PERIOD);

        assert_ne!(a, b);
        assert_eq!(scheduler.active_count(), 2);
        scheduler.cancel(a);
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let origin = Instant::now();
        let mut scheduler = IntervalScheduler::new(origin + Duration::from_secs(5));
        scheduler.observe(origin);
        assert_eq!(scheduler.now(), origin + Duration::from_secs(5));
    }
}
