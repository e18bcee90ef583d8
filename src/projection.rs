use chrono::{Datelike, Duration, NaiveDate};

use crate::forecast::models::{DayEntry, WeatherModel};
use crate::forecast::service::smart_phrase;

/// Entries in the tomorrow hourly slice (one day).
const TOMORROW_HOURS: usize = 24;
/// Entries in the weekend hourly slice (Saturday + Sunday).
const WEEKEND_HOURS: usize = 48;

/// Derive the "tomorrow" view of an already-normalized model.
///
/// Scalar fields come from `daily[1]`; the hourly slice is the next
/// calendar day, located by computing tomorrow's midnight and taking the
/// first hour at or after it. A buffer too short to contain the boundary
/// falls back to a fixed offset of 24 entries. The source model is left
/// untouched.
pub fn tomorrow_view(model: &WeatherModel) -> WeatherModel {
    let mut view = model.clone();

    let boundary = next_midnight(model, 1);
    let start = model
        .hourly
        .iter()
        .position(|h| h.time >= boundary)
        .unwrap_or_else(|| model.hourly.len().min(TOMORROW_HOURS));
    let end = (start + TOMORROW_HOURS).min(model.hourly.len());
    view.hourly = model.hourly[start..end].to_vec();

    if let Some(day) = model.daily.get(1) {
        apply_day_scalars(&mut view, day);
    }

    view
}

/// Derive the "weekend" view: the coming (or current) Saturday and
/// Sunday, with averaged highs/lows, the worse precipitation
/// probability, and Saturday's icon as the headline.
pub fn weekend_view(model: &WeatherModel) -> WeatherModel {
    let mut view = model.clone();

    let today = model.current.time.date();
    let dow = today.weekday().num_days_from_monday(); // Mon=0 .. Sun=6
    let days_until_sat = (5 + 7 - dow) % 7; // 0 if today is Saturday
    let sat_date = today + Duration::days(days_until_sat as i64);
    let sun_date = sat_date + Duration::days(1);

    let sat = day_for_date(model, sat_date, days_until_sat as usize);
    let sun = day_for_date(model, sun_date, days_until_sat as usize + 1);

    // Hourly slice: Saturday 00:00 through Sunday 23:00. Mid-weekend,
    // the slice simply starts at "now".
    let boundary = sat_date.and_hms_opt(0, 0, 0).expect("midnight is valid");
    let start = if model.current.time >= boundary {
        0
    } else {
        model
            .hourly
            .iter()
            .position(|h| h.time >= boundary)
            .unwrap_or(model.hourly.len())
    };
    let end = (start + WEEKEND_HOURS).min(model.hourly.len());
    view.hourly = model.hourly[start..end].to_vec();

    let summary = match (sat, sun) {
        (Some(sat), Some(sun)) => Some(aggregate_weekend(sat, sun)),
        (Some(day), None) | (None, Some(day)) => Some(day.clone()),
        (None, None) => None,
    };

    if let Some(summary) = summary {
        apply_day_scalars(&mut view, &summary);
        let mut days = vec![summary];
        days.extend(sat.cloned());
        days.extend(sun.cloned());
        view.daily = days;
    }

    view
}

/// Locate the daily entry for a date, falling back to positional
/// indexing when the dated lookup finds nothing.
fn day_for_date(model: &WeatherModel, date: NaiveDate, fallback_index: usize) -> Option<&DayEntry> {
    model
        .daily
        .iter()
        .find(|d| d.date == date)
        .or_else(|| model.daily.get(fallback_index))
}

fn aggregate_weekend(sat: &DayEntry, sun: &DayEntry) -> DayEntry {
    DayEntry {
        label: "Weekend".to_string(),
        date: sat.date,
        date_label: format!("{} / {}", sat.date_label, sun.date_label),
        high: ((sat.high + sun.high) / 2.0).round(),
        low: ((sat.low + sun.low) / 2.0).round(),
        feels_like_max: sat.feels_like_max.max(sun.feels_like_max),
        uv_index_max: sat.uv_index_max.max(sun.uv_index_max),
        precipitation_probability_max: sat
            .precipitation_probability_max
            .max(sun.precipitation_probability_max),
        wind_speed_max: sat.wind_speed_max.max(sun.wind_speed_max),
        icon: sat.icon,
        condition: sat.condition.clone(),
    }
}

/// Override the headline scalars of a view from a day entry and
/// recompute the advisory phrase from the same values.
fn apply_day_scalars(view: &mut WeatherModel, day: &DayEntry) {
    view.current.temperature = day.high;
    view.current.feels_like = day.feels_like_max;
    view.current.uv_index = day.uv_index_max;
    view.current.wind_speed = day.wind_speed_max;
    view.current.precipitation_probability = day.precipitation_probability_max;
    view.current.icon = day.icon;
    view.current.condition = day.condition.clone();
    view.phrase = smart_phrase(
        day.icon,
        day.high,
        day.wind_speed_max,
        day.uv_index_max,
        day.precipitation_probability_max,
    );
}

fn next_midnight(model: &WeatherModel, days_ahead: i64) -> chrono::NaiveDateTime {
    (model.current.time.date() + Duration::days(days_ahead))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::service::normalize;
    use crate::provider::{ForecastProvider, SyntheticProvider};
    use chrono::{NaiveDateTime, Weekday};

    // 2026-08-06 is a Thursday.
    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    async fn model_at(now: NaiveDateTime) -> WeatherModel {
        let payload = SyntheticProvider::anchored(now)
            .fetch_forecast(41.0082, 28.9784)
            .await
            .unwrap();
        normalize("İstanbul", payload, 42.0).unwrap()
    }

    #[tokio::test]
    async fn test_tomorrow_slice_is_exactly_the_next_day() {
        let model = model_at(anchor()).await;
        let view = tomorrow_view(&model);

        assert!(view.hourly.len() <= 24);
        assert!(!view.hourly.is_empty());
        let tomorrow = anchor().date() + Duration::days(1);
        for hour in &view.hourly {
            assert_eq!(hour.time.date(), tomorrow);
        }
        assert_eq!(view.hourly[0].time.format("%H:%M").to_string(), "00:00");
    }

    #[tokio::test]
    async fn test_tomorrow_takes_scalars_from_second_day() {
        let model = model_at(anchor()).await;
        let view = tomorrow_view(&model);

        let day = &model.daily[1];
        assert_eq!(view.current.temperature, day.high);
        assert_eq!(view.current.icon, day.icon);
        assert_eq!(
            view.current.precipitation_probability,
            day.precipitation_probability_max
        );
    }

    #[tokio::test]
    async fn test_tomorrow_does_not_mutate_source() {
        let model = model_at(anchor()).await;
        let copy = model.clone();
        let _ = tomorrow_view(&model);
        assert_eq!(model, copy);
    }

    #[tokio::test]
    async fn test_tomorrow_short_buffer_falls_back_to_fixed_offset() {
        let mut model = model_at(anchor()).await;
        model.hourly.truncate(8); // ends before the next midnight
        let view = tomorrow_view(&model);
        // fixed offset of 24 from the start clamps to an empty slice
        assert!(view.hourly.is_empty());
    }

    #[tokio::test]
    async fn test_weekend_slice_starts_saturday_midnight() {
        let model = model_at(anchor()).await;
        let view = weekend_view(&model);

        assert!(view.hourly.len() <= 48);
        assert!(!view.hourly.is_empty());
        let first = &view.hourly[0];
        assert_eq!(first.time.date().weekday(), Weekday::Sat);
        assert_eq!(first.clock, "00:00");
        for hour in &view.hourly {
            assert!(matches!(
                hour.time.date().weekday(),
                Weekday::Sat | Weekday::Sun
            ));
        }
    }

    #[tokio::test]
    async fn test_weekend_aggregates_average_high_and_max_prob() {
        let model = model_at(anchor()).await;
        let view = weekend_view(&model);

        let sat = model
            .daily
            .iter()
            .find(|d| d.date.weekday() == Weekday::Sat)
            .unwrap();
        let sun = model
            .daily
            .iter()
            .find(|d| d.date.weekday() == Weekday::Sun)
            .unwrap();

        let summary = &view.daily[0];
        assert_eq!(summary.label, "Weekend");
        assert_eq!(summary.high, ((sat.high + sun.high) / 2.0).round());
        assert_eq!(summary.low, ((sat.low + sun.low) / 2.0).round());
        assert_eq!(
            summary.precipitation_probability_max,
            sat.precipitation_probability_max
                .max(sun.precipitation_probability_max)
        );
        assert_eq!(summary.icon, sat.icon);
        assert_eq!(view.current.temperature, summary.high);
    }

    #[tokio::test]
    async fn test_weekend_on_saturday_starts_now() {
        // 2026-08-08 is a Saturday; the weekend is already underway.
        let saturday = NaiveDate::from_ymd_opt(2026, 8, 8)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let model = model_at(saturday).await;
        let view = weekend_view(&model);

        assert_eq!(view.hourly[0].time, saturday);
        // summary covers today (Sat) and tomorrow (Sun)
        assert_eq!(view.daily[0].label, "Weekend");
        assert_eq!(view.daily[0].date, saturday.date());
    }

    #[tokio::test]
    async fn test_weekend_on_sunday_targets_next_weekend() {
        // 2026-08-09 is a Sunday; the projection looks at the coming Saturday.
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let model = model_at(sunday).await;
        let view = weekend_view(&model);

        assert_eq!(
            view.daily[0].date,
            NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
        );
        assert_eq!(view.hourly[0].time.date().weekday(), Weekday::Sat);
    }

    #[tokio::test]
    async fn test_weekend_preserves_untouched_fields() {
        let model = model_at(anchor()).await;
        let view = weekend_view(&model);

        assert_eq!(view.city, model.city);
        assert_eq!(view.latitude, model.latitude);
        assert_eq!(view.sunrise, model.sunrise);
        assert_eq!(view.current.humidity, model.current.humidity);
        assert_eq!(view.current.aqi, model.current.aqi);
    }
}
