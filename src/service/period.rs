use crate::models::pacing::PeriodPosition;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// First and last day of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    month_bounds(date).1.day()
}

/// Inclusive number of days between two dates, in either order.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u32 {
    let span = b.signed_duration_since(a).num_days().unsigned_abs();
    u32::try_from(span).unwrap_or(u32::MAX - 1) + 1
}

/// Locates `today` inside either the explicit inclusive period or the calendar month of `today`.
///
/// A reversed explicit period is not rejected here; the result is still clamped so that
/// `day_of_period <= days_in_period`.
pub fn resolve_period(today: NaiveDate, explicit_start: Option<NaiveDate>, explicit_end: Option<NaiveDate>) -> PeriodPosition {
    let position = match explicit_start.zip(explicit_end) {
        Some((start, end)) => {
            let days_in_period = days_between(start, end);
            let day_of_period = if today < start {
                0
            } else if today > end {
                days_in_period
            } else {
                days_between(start, today)
            };
            PeriodPosition {
                days_in_period,
                day_of_period: day_of_period.min(days_in_period),
            }
        }
        None => PeriodPosition {
            days_in_period: days_in_month(today),
            day_of_period: today.day(),
        },
    };

    debug!(
        days_in_period = position.days_in_period,
        day_of_period = position.day_of_period,
        "resolved period"
    );
    position
}

/// Calendar date of `now` in the portfolio timezone.
pub fn reference_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}
