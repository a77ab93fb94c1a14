//! Firing decisions.
//!
//! The scheduler is invoked from the outside -- a periodic background
//! trigger, an app-foreground transition, a manual poll -- and has no idea
//! how often that happens. Correctness only needs one invocation somewhere
//! inside each minute a match is possible; extra invocations are absorbed
//! by the per-alarm minute key. A minute during which nothing called
//! `evaluate` is skipped for good: firing never reaches into the past.

use chrono::{DateTime, Local};

use crate::alarm::Alarm;
use crate::clock::MinuteKey;

#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Self
    }

    /// Decide which alarms fire at `now`.
    ///
    /// Fires every enabled alarm whose time-of-day matches the current
    /// calendar minute and which has not already fired in that minute,
    /// marking it fired before returning. The result preserves the
    /// creation order of `alarms`.
    pub fn evaluate(&self, now: DateTime<Local>, alarms: &mut [Alarm]) -> Vec<String> {
        let key = MinuteKey::of(now);
        let mut fired = Vec::new();
        for alarm in alarms.iter_mut().filter(|a| a.enabled) {
            if alarm.fire_time.matches(key) && alarm.last_fired != Some(key) {
                alarm.last_fired = Some(key);
                fired.push(alarm.id.clone());
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;
    use crate::alarm::FireTime;

    fn alarm(hour: u32, minute: u32) -> Alarm {
        Alarm::new(FireTime::new(hour, minute).unwrap(), String::new(), vec![])
    }

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 6, day, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn fires_on_matching_minute() {
        let scheduler = Scheduler::new();
        let mut alarms = vec![alarm(7, 0)];
        let fired = scheduler.evaluate(at(1, 7, 0, 5), &mut alarms);
        assert_eq!(fired, [alarms[0].id.clone()]);
    }

    #[test]
    fn does_not_fire_twice_in_the_same_minute() {
        let scheduler = Scheduler::new();
        let mut alarms = vec![alarm(7, 0)];
        assert_eq!(scheduler.evaluate(at(1, 7, 0, 5), &mut alarms).len(), 1);
        // Second wake-up inside the same minute, e.g. background tick
        // followed by a foreground resume.
        assert!(scheduler.evaluate(at(1, 7, 0, 45), &mut alarms).is_empty());
    }

    #[test]
    fn fires_again_the_next_day() {
        let scheduler = Scheduler::new();
        let mut alarms = vec![alarm(7, 0)];
        assert_eq!(scheduler.evaluate(at(1, 7, 0, 5), &mut alarms).len(), 1);
        assert_eq!(scheduler.evaluate(at(2, 7, 0, 5), &mut alarms).len(), 1);
    }

    #[test]
    fn disabled_alarms_never_fire() {
        let scheduler = Scheduler::new();
        let mut alarms = vec![alarm(7, 0)];
        alarms[0].enabled = false;
        assert!(scheduler.evaluate(at(1, 7, 0, 5), &mut alarms).is_empty());
    }

    #[test]
    fn non_matching_minute_does_not_fire() {
        let scheduler = Scheduler::new();
        let mut alarms = vec![alarm(7, 0)];
        assert!(scheduler.evaluate(at(1, 7, 1, 0), &mut alarms).is_empty());
        // The 07:00 window was never evaluated; nothing fires
        // retroactively at 07:01.
        assert!(alarms[0].last_fired.is_none());
    }

    #[test]
    fn shared_fire_time_fires_each_alarm_in_creation_order() {
        let scheduler = Scheduler::new();
        let mut alarms = vec![alarm(7, 0), alarm(8, 0), alarm(7, 0)];
        let expected = vec![alarms[0].id.clone(), alarms[2].id.clone()];
        let fired = scheduler.evaluate(at(1, 7, 0, 0), &mut alarms);
        assert_eq!(fired, expected);
    }

    proptest! {
        /// Any number of evaluations inside one minute fire an alarm at
        /// most once, regardless of when inside the minute they land.
        #[test]
        fn at_most_once_per_minute(
            hour in 0u32..24,
            minute in 0u32..60,
            seconds in proptest::collection::vec(0u32..60, 1..12),
        ) {
            let scheduler = Scheduler::new();
            let mut alarms = vec![alarm(hour, minute)];
            let mut total = 0;
            for second in seconds {
                total += scheduler
                    .evaluate(at(15, hour, minute, second), &mut alarms)
                    .len();
            }
            prop_assert_eq!(total, 1);
        }

        /// Evaluations in non-matching minutes never fire or mark alarms.
        #[test]
        fn non_matching_minutes_are_inert(
            hour in 0u32..24,
            minute in 0u32..59,
        ) {
            let scheduler = Scheduler::new();
            let mut alarms = vec![alarm(hour, minute)];
            let fired = scheduler.evaluate(at(15, hour, minute + 1, 0), &mut alarms);
            prop_assert!(fired.is_empty());
            prop_assert!(alarms[0].last_fired.is_none());
        }
    }
}
