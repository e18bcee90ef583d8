use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use super::client::{ForecastProvider, ProviderError};
use super::models::*;

const BASE_TEMP: f64 = 18.0;
const DIURNAL_AMPLITUDE: f64 = 6.0;
const SEASONAL_AMPLITUDE: f64 = 9.0;
/// Repeating weather-code sequence, one code per day.
const DAY_CODES: [u8; 7] = [0, 1, 2, 3, 61, 2, 0];

/// Deterministic stand-in for the live provider. Produces fully
/// populated, internally consistent payloads anchored at a fixed "now",
/// so downstream code cannot structurally distinguish fallback data from
/// live data.
pub struct SyntheticProvider {
    now: NaiveDateTime,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::anchored(chrono::Local::now().naive_local())
    }

    /// Anchor the generator at an explicit local time.
    pub fn anchored(now: NaiveDateTime) -> Self {
        Self {
            now: now.with_minute(0).and_then(|t| t.with_second(0)).unwrap_or(now),
        }
    }

    fn hour_temp(day_index: i64, hour: u32) -> f64 {
        // Diurnal curve peaking mid-afternoon, mild day-to-day drift.
        let phase = (hour as f64 - 14.0) / 24.0 * std::f64::consts::TAU;
        let drift = (day_index % 5) as f64 * 0.4;
        round_1(BASE_TEMP + DIURNAL_AMPLITUDE * phase.cos() + drift)
    }

    fn day_code(day_index: i64) -> u8 {
        DAY_CODES[(day_index.rem_euclid(DAY_CODES.len() as i64)) as usize]
    }

    fn seasonal_temp(date: NaiveDate) -> f64 {
        // Northern-hemisphere annual curve peaking around late July.
        let phase = (date.ordinal() as f64 - 205.0) / 366.0 * std::f64::consts::TAU;
        round_1(12.0 + SEASONAL_AMPLITUDE * phase.cos())
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn round_1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn iso_hour(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%dT%H:%M").to_string()
}

#[async_trait]
impl ForecastProvider for SyntheticProvider {
    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastPayload, ProviderError> {
        let hours = 168usize;
        let days = 15usize;

        let mut hourly = HourlyBlock::default();
        for i in 0..hours {
            let t = self.now + Duration::hours(i as i64);
            let day_index = (t.date() - self.now.date()).num_days();
            let hour = t.hour();
            hourly.time.push(iso_hour(t));
            hourly.temperature_2m.push(Self::hour_temp(day_index, hour));
            hourly
                .apparent_temperature
                .push(Self::hour_temp(day_index, hour) - 1.2);
            hourly.wind_speed_10m.push(8.0 + (day_index % 3) as f64 * 3.0);
            hourly
                .precipitation_probability
                .push(Some(if Self::day_code(day_index) == 61 { 55.0 } else { 10.0 }));
            hourly.weather_code.push(Self::day_code(day_index));
            hourly.is_day.push(u8::from((6..20).contains(&hour)));
        }

        let mut daily = DailyBlock::default();
        for i in 0..days {
            let date = self.now.date() + Duration::days(i as i64);
            let code = Self::day_code(i as i64);
            let high = Self::hour_temp(i as i64, 14);
            daily.time.push(date.format("%Y-%m-%d").to_string());
            daily.weather_code.push(code);
            daily.temperature_2m_max.push(Some(high));
            daily.temperature_2m_min.push(Some(round_1(high - 8.0)));
            daily.apparent_temperature_max.push(Some(round_1(high - 1.0)));
            daily.uv_index_max.push(Some(5.5));
            daily
                .precipitation_probability_max
                .push(Some(if code == 61 { 60.0 } else { 15.0 }));
            daily.wind_speed_10m_max.push(Some(14.0));
            daily
                .sunrise
                .push(format!("{}T06:12", date.format("%Y-%m-%d")));
            daily
                .sunset
                .push(format!("{}T20:05", date.format("%Y-%m-%d")));
        }

        let hour = self.now.hour();
        let current = CurrentBlock {
            time: iso_hour(self.now),
            temperature_2m: Self::hour_temp(0, hour),
            apparent_temperature: Self::hour_temp(0, hour) - 1.2,
            relative_humidity_2m: 55.0,
            surface_pressure: 1014.0,
            wind_speed_10m: 8.0,
            wind_direction_10m: 215.0,
            cloud_cover: 30.0,
            precipitation: 0.0,
            weather_code: Self::day_code(0),
            is_day: u8::from((6..20).contains(&hour)),
            uv_index: Some(4.0),
        };

        Ok(ForecastPayload {
            latitude: lat,
            longitude: lon,
            current,
            hourly,
            daily,
        })
    }

    async fn fetch_archive(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ArchivePayload, ProviderError> {
        let mut daily = ArchiveDailyBlock::default();
        let mut date = start;
        while date <= end {
            let high = Self::seasonal_temp(date);
            daily.time.push(date.format("%Y-%m-%d").to_string());
            daily.temperature_2m_max.push(Some(high));
            daily.temperature_2m_min.push(Some(round_1(high - 7.0)));
            daily
                .precipitation_sum
                .push(Some(if date.ordinal() % 4 == 0 { 3.5 } else { 0.0 }));
            date += Duration::days(1);
        }

        Ok(ArchivePayload {
            latitude: lat,
            longitude: lon,
            daily,
        })
    }

    async fn fetch_air_quality(&self, _lat: f64, _lon: f64) -> Result<f64, ProviderError> {
        Ok(35.0)
    }

    async fn fetch_marine(&self, lat: f64, lon: f64) -> Result<MarinePayload, ProviderError> {
        Ok(MarinePayload {
            latitude: lat,
            longitude: lon,
            current: MarineCurrent {
                time: iso_hour(self.now),
                wave_height: Some(0.6),
                wave_period: Some(4.2),
                wave_direction: Some(190.0),
                sea_surface_temperature: Some(24.5),
            },
        })
    }

    async fn fetch_soil(&self, _lat: f64, _lon: f64) -> Result<SoilPayload, ProviderError> {
        let mut hourly = SoilHourlyBlock::default();
        for i in 0..24i64 {
            let t = self.now + Duration::hours(i);
            hourly.time.push(iso_hour(t));
            hourly.soil_temperature_0cm.push(Some(round_1(16.0 + (i % 12) as f64 * 0.3)));
            hourly.soil_moisture_0_to_1cm.push(Some(0.28));
        }
        Ok(SoilPayload { hourly })
    }
}
