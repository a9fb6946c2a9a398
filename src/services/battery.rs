//! Battery level reported by the frame on each download.

use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Resting Li-ion cell voltage (mV) to remaining charge (%), high to low.
const DISCHARGE_CURVE: [(f64, f64); 21] = [
    (4200.0, 100.0),
    (4150.0, 95.0),
    (4110.0, 90.0),
    (4080.0, 85.0),
    (4020.0, 80.0),
    (3980.0, 75.0),
    (3950.0, 70.0),
    (3910.0, 65.0),
    (3870.0, 60.0),
    (3850.0, 55.0),
    (3840.0, 50.0),
    (3820.0, 45.0),
    (3800.0, 40.0),
    (3790.0, 35.0),
    (3770.0, 30.0),
    (3750.0, 25.0),
    (3730.0, 20.0),
    (3710.0, 15.0),
    (3690.0, 10.0),
    (3610.0, 5.0),
    (3400.0, 0.0),
];

/// Readings older than this are treated as unknown.
pub const READING_TTL: Duration = Duration::from_secs(3600);

/// Remaining charge for a cell voltage, rounded to one decimal.
pub fn percentage(millivolts: f64) -> f64 {
    let (full, _) = DISCHARGE_CURVE[0];
    let (empty, _) = DISCHARGE_CURVE[DISCHARGE_CURVE.len() - 1];
    if millivolts >= full {
        return 100.0;
    }
    if millivolts <= empty || millivolts.is_nan() {
        return 0.0;
    }

    for pair in DISCHARGE_CURVE.windows(2) {
        let (v1, p1) = pair[0];
        let (v2, p2) = pair[1];
        if v1 >= millivolts && millivolts >= v2 {
            let p = p2 + (millivolts - v2) * (p1 - p2) / (v1 - v2);
            return (p * 10.0).round() / 10.0;
        }
    }
    0.0
}

#[derive(Debug, Clone, Copy)]
struct Reading {
    millivolts: f64,
    at: Instant,
}

/// Last voltage reported by the frame.
#[derive(Debug, Default)]
pub struct BatteryMonitor {
    last: RwLock<Option<Reading>>,
}

impl BatteryMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reading. Zero, negative and non-finite values are ignored.
    pub async fn record(&self, millivolts: f64) {
        self.record_at(millivolts, Instant::now()).await;
    }

    pub async fn record_at(&self, millivolts: f64, at: Instant) {
        if !millivolts.is_finite() || millivolts <= 0.0 {
            return;
        }
        tracing::debug!(millivolts, percent = percentage(millivolts), "Battery reading");
        *self.last.write().await = Some(Reading { millivolts, at });
    }

    /// Last voltage in mV, or 0 when nothing was reported in the past hour.
    pub async fn voltage(&self) -> f64 {
        self.voltage_at(Instant::now()).await
    }

    pub async fn voltage_at(&self, now: Instant) -> f64 {
        match *self.last.read().await {
            Some(r) if now.saturating_duration_since(r.at) < READING_TTL => r.millivolts,
            _ => 0.0,
        }
    }
}
