//! Daily scheduling of pipeline runs.
//!
//! The loop sleeps until the next occurrence of the configured UTC hour and
//! runs the pipeline once per day. A failed run is logged and the loop keeps
//! going; missed runs are not caught up.

use crate::config::PipelineConfig;
use crate::pipeline;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use log::{error, info};

/// Next occurrence of `hour:00:00` UTC strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    let at = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date_naive().and_time(at).and_utc();
    if next <= now {
        next += Duration::days(1);
    }
    next
}

/// Runs the pipeline once per day at `run_hour_utc`, forever.
pub async fn run_daily(config: PipelineConfig, run_hour_utc: u32) {
    loop {
        let now = Utc::now();
        let next = next_run_after(now, run_hour_utc);
        let wait = (next - now).to_std().unwrap_or_default();
        info!("Next pipeline run scheduled for {}", next);
        tokio::time::sleep(wait).await;

        match pipeline::run(&config).await {
            Ok(report) => info!(
                "Scheduled run finished: {} daily rows, {} monthly rows",
                report.daily_rows, report.monthly_rows
            ),
            Err(err) => error!("Scheduled run failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn run_later_the_same_day() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 1, 30, 0).unwrap();
        let next = next_run_after(now, 3);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap());
    }

    #[test]
    fn rolls_over_to_the_next_day_when_the_hour_has_passed() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 5, 0, 0).unwrap();
        let next = next_run_after(now, 3);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 1, 2, 3, 0, 0).unwrap());
    }

    #[test]
    fn exact_boundary_schedules_tomorrow() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap();
        let next = next_run_after(now, 3);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 1, 2, 3, 0, 0).unwrap());
    }

    #[test]
    fn crosses_month_boundaries() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();
        let next = next_run_after(now, 3);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 2, 1, 3, 0, 0).unwrap());
    }
}
