//! When the frame should wake up next.
//!
//! Wakeups are aligned to multiples of the interval counted from midnight.
//! A wakeup that falls inside the nightly sleep window is pushed to the end
//! of the window.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ImmichSettings;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MINUTES_PER_DAY: u32 = 24 * 60;
/// Anything shorter is not worth a deep sleep cycle.
const MIN_SLEEP_MS: i64 = 10 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SleepPlan {
    /// Server local time, `%Y-%m-%d %H:%M:%S`
    pub current_time: String,
    /// Next wakeup, `%Y-%m-%d %H:%M:%S`
    pub next_wakeup: String,
    /// Milliseconds until `next_wakeup`
    pub sleep_duration: i64,
}

pub fn plan_sleep(now: NaiveDateTime, settings: &ImmichSettings) -> SleepPlan {
    // At most once a day
    let interval = settings.wakeup_interval.clamp(1, MINUTES_PER_DAY);

    let mut sleep_start = at_time(now, settings.sleep_start_hour, settings.sleep_start_minute);
    let mut sleep_end = at_time(now, settings.sleep_end_hour, settings.sleep_end_minute);

    // Window crossing midnight: anchor it around `now`
    if sleep_end < sleep_start {
        if now >= sleep_start {
            sleep_end += Duration::days(1);
        } else if now < sleep_end {
            sleep_start -= Duration::days(1);
        }
    }
    let skip_window = |t: NaiveDateTime| {
        if sleep_start <= t && t < sleep_end {
            sleep_end
        } else {
            t
        }
    };

    let mut next = skip_window(next_boundary(now, interval, 1));
    let mut sleep_ms = (next - now).num_milliseconds();

    if sleep_ms < MIN_SLEEP_MS {
        next = skip_window(next_boundary(now, interval, 2));
        sleep_ms = (next - now).num_milliseconds();
    }

    tracing::debug!(
        now = %now.format(TIME_FORMAT),
        next = %next.format(TIME_FORMAT),
        sleep_ms,
        "Planned sleep"
    );

    SleepPlan {
        current_time: now.format(TIME_FORMAT).to_string(),
        next_wakeup: next.format(TIME_FORMAT).to_string(),
        sleep_duration: sleep_ms,
    }
}

/// `now`'s date at `minute` minutes past midnight.
fn at_minute(now: NaiveDateTime, minute: u32) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN) + Duration::minutes(minute as i64)
}

fn at_time(now: NaiveDateTime, hour: u32, minute: u32) -> NaiveDateTime {
    let minutes = (hour as u64 * 60 + minute as u64) % MINUTES_PER_DAY as u64;
    at_minute(now, minutes as u32)
}

/// The `steps`-th interval boundary after the current minute, on the
/// following day if it wraps past midnight.
fn next_boundary(now: NaiveDateTime, interval: u32, steps: u32) -> NaiveDateTime {
    let (interval, steps) = (interval as u64, steps as u64);
    let minutes = (now.hour() * 60 + now.minute()) as u64;
    let target = (interval * (minutes / interval + steps)) % MINUTES_PER_DAY as u64;
    let next = at_minute(now, target as u32);
    if next < now {
        next + Duration::days(1)
    } else {
        next
    }
}
