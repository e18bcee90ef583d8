use std::sync::Arc;

use chrono::{Datelike, Duration, Months, NaiveDate};

use super::models::*;
use crate::cache::SingleEntryCache;
use crate::provider::models::ArchiveDailyBlock;
use crate::provider::ForecastProvider;

/// Archive providers lag a few days behind the present.
const ARCHIVE_LAG_DAYS: i64 = 5;
/// Calendar-year offsets sampled for the climatology.
const SAMPLE_YEAR_OFFSETS: [i32; 3] = [3, 6, 9];
/// Seed averages when day-of-year 1 itself has no samples.
const SEED_HIGH: f64 = 15.0;
const SEED_LOW: f64 = 5.0;
const SEED_PRECIP: f64 = 1.0;

const DAYS_IN_LEAP_YEAR: usize = 366;

pub struct ClimateService {
    provider: Arc<dyn ForecastProvider>,
    cache: SingleEntryCache<ClimateReport>,
}

impl ClimateService {
    pub fn new(provider: Arc<dyn ForecastProvider>, cache: SingleEntryCache<ClimateReport>) -> Self {
        Self { provider, cache }
    }

    /// Historical baseline for a resolved coordinate. Infallible by
    /// design: provider trouble degrades to an empty report so the rest
    /// of the portal is unaffected.
    pub async fn report(&self, city: &str, lat: f64, lon: f64) -> ClimateReport {
        let today = chrono::Local::now().date_naive();
        let now_ts = chrono::Utc::now().timestamp();
        self.report_at(city, lat, lon, today, now_ts).await
    }

    /// Clock-injected variant of [`report`](Self::report).
    pub async fn report_at(
        &self,
        city: &str,
        lat: f64,
        lon: f64,
        today: NaiveDate,
        now_ts: i64,
    ) -> ClimateReport {
        if let Some(report) = self.cache.load(city, now_ts) {
            tracing::debug!(city = %city, "Climate cache hit");
            return report;
        }
        tracing::debug!(city = %city, "Climate cache miss");

        match self.build_report(city, lat, lon, today).await {
            Ok(report) => {
                self.cache.store(city, now_ts, &report);
                report
            }
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Climate fetch failed, returning empty report");
                ClimateReport::empty(city)
            }
        }
    }

    async fn build_report(
        &self,
        city: &str,
        lat: f64,
        lon: f64,
        today: NaiveDate,
    ) -> Result<ClimateReport, crate::provider::ProviderError> {
        // Trailing window: one year ago through five days ago.
        let end = today - Duration::days(ARCHIVE_LAG_DAYS);
        let start = today
            .checked_sub_months(Months::new(12))
            .unwrap_or(today - Duration::days(365));
        let trailing = self.provider.fetch_archive(lat, lon, start, end).await?;
        let last_twelve_months = collect_day_points(&trailing.daily);

        // Sampled climatology: three whole calendar years.
        let mut samples = DaySamples::new();
        for offset in SAMPLE_YEAR_OFFSETS {
            let year = today.year() - offset;
            let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st is valid");
            let dec31 = NaiveDate::from_ymd_opt(year, 12, 31).expect("December 31st is valid");
            let payload = self.provider.fetch_archive(lat, lon, jan1, dec31).await?;
            samples.accumulate(&payload.daily);
        }

        tracing::debug!(
            city = %city,
            trailing_days = last_twelve_months.len(),
            "Climate report built"
        );

        Ok(ClimateReport {
            city: city.to_string(),
            last_twelve_months,
            climatology: samples.into_climatology(),
        })
    }
}

/// Observed highs/lows/precipitation bucketed per day-of-year.
pub struct DaySamples {
    highs: Vec<Vec<f64>>,
    lows: Vec<Vec<f64>>,
    precip: Vec<Vec<f64>>,
}

impl DaySamples {
    pub fn new() -> Self {
        Self {
            highs: vec![Vec::new(); DAYS_IN_LEAP_YEAR],
            lows: vec![Vec::new(); DAYS_IN_LEAP_YEAR],
            precip: vec![Vec::new(); DAYS_IN_LEAP_YEAR],
        }
    }

    pub fn accumulate(&mut self, daily: &ArchiveDailyBlock) {
        for (i, raw) in daily.time.iter().enumerate() {
            let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
                continue;
            };
            let bucket = date.ordinal() as usize - 1;
            if let Some(high) = sample_at(&daily.temperature_2m_max, i) {
                self.highs[bucket].push(high);
            }
            if let Some(low) = sample_at(&daily.temperature_2m_min, i) {
                self.lows[bucket].push(low);
            }
            if let Some(p) = sample_at(&daily.precipitation_sum, i) {
                self.precip[bucket].push(p);
            }
        }
    }

    /// Average every bucket into the 366-point climatology. A day with
    /// zero samples (a Feb 29 absent from every sampled year, a hole in
    /// the archive) carries the previous day's averages forward.
    pub fn into_climatology(self) -> Vec<ClimatologyPoint> {
        let mut out = Vec::with_capacity(DAYS_IN_LEAP_YEAR);
        let mut prev = ClimatologyPoint {
            day_of_year: 0,
            avg_high: SEED_HIGH,
            avg_low: SEED_LOW,
            avg_precipitation: SEED_PRECIP,
        };

        for doy in 1..=DAYS_IN_LEAP_YEAR {
            let bucket = doy - 1;
            let point = ClimatologyPoint {
                day_of_year: doy as u16,
                avg_high: mean(&self.highs[bucket]).unwrap_or(prev.avg_high),
                avg_low: mean(&self.lows[bucket]).unwrap_or(prev.avg_low),
                avg_precipitation: mean(&self.precip[bucket]).unwrap_or(prev.avg_precipitation),
            };
            prev = point.clone();
            out.push(point);
        }

        out
    }
}

impl Default for DaySamples {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten an archive block into dated points; days with a missing high
/// or low are dropped rather than fabricated.
pub fn collect_day_points(daily: &ArchiveDailyBlock) -> Vec<HistoricalDayPoint> {
    let mut out = Vec::with_capacity(daily.time.len());
    for (i, raw) in daily.time.iter().enumerate() {
        let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
            continue;
        };
        let (Some(high), Some(low)) = (
            sample_at(&daily.temperature_2m_max, i),
            sample_at(&daily.temperature_2m_min, i),
        ) else {
            continue;
        };
        out.push(HistoricalDayPoint {
            date,
            high,
            low,
            precipitation: sample_at(&daily.precipitation_sum, i).unwrap_or(0.0),
        });
    }
    out
}

fn sample_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten().filter(|v| !v.is_nan())
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(round_1(values.iter().sum::<f64>() / values.len() as f64))
}

fn round_1(val: f64) -> f64 {
    (val * 10.0).round() / 10.0
}
