//! Calendar position of every interval.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};

use crate::config::ConfigError;

/// Month (1-12) and hour of day (0-23) at the start of each interval.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StepCalendar {
    pub months: Vec<u32>,
    pub hours: Vec<u32>,
}

impl StepCalendar {
    pub fn new(
        start: NaiveDateTime,
        interval_minutes: f64,
        steps: usize,
    ) -> Result<Self, ConfigError> {
        let interval_seconds = (interval_minutes * 60.0).round() as i64;
        let mut months = Vec::with_capacity(steps);
        let mut hours = Vec::with_capacity(steps);
        for step in 0..steps {
            let at = i64::try_from(step)
                .ok()
                .and_then(|s| s.checked_mul(interval_seconds))
                .and_then(TimeDelta::try_seconds)
                .and_then(|offset| start.checked_add_signed(offset))
                .ok_or(ConfigError::CalendarOverflow { step })?;
            months.push(at.month());
            hours.push(at.hour());
        }
        Ok(Self { months, hours })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn hourly_steps_roll_over_days_and_months() {
        let start = NaiveDate::from_ymd_opt(2001, 1, 31)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap();
        let cal = StepCalendar::new(start, 60.0, 4).unwrap();
        assert_eq!(cal.hours, vec![22, 23, 0, 1]);
        assert_eq!(cal.months, vec![1, 1, 2, 2]);
    }

    #[test]
    fn daily_steps() {
        let start = NaiveDate::from_ymd_opt(2001, 3, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let cal = StepCalendar::new(start, 1440.0, 3).unwrap();
        assert_eq!(cal.months, vec![3, 3, 4]);
        assert_eq!(cal.hours, vec![0, 0, 0]);
    }
}
