//! Weather forecasts for city visits.
//!
//! Forecasts are decoration only: the assembler asks for one per visit and
//! leaves the field empty when the provider can't answer.

use std::future::Future;

use chrono::{Datelike, NaiveDate};
use rand::Rng;

use crate::domain::{CityCode, WeatherForecast};
use crate::seed::rng_for;

/// Errors from a weather provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    #[error("no forecast available for {0}")]
    UnknownCity(CityCode),

    #[error("weather service unavailable: {0}")]
    Unavailable(String),
}

/// Trait for looking up a forecast.
pub trait WeatherProvider: Send + Sync {
    fn forecast(
        &self,
        city: CityCode,
        date: NaiveDate,
    ) -> impl Future<Output = Result<WeatherForecast, WeatherError>> + Send;
}

/// Provider that never has a forecast.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWeather;

impl WeatherProvider for NoWeather {
    async fn forecast(
        &self,
        city: CityCode,
        _date: NaiveDate,
    ) -> Result<WeatherForecast, WeatherError> {
        Err(WeatherError::UnknownCity(city))
    }
}

/// Northern-hemisphere season of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    fn conditions(self) -> &'static [&'static str] {
        match self {
            Season::Winter => &["Cloudy", "Light Rain", "Heavy Rain", "Snow", "Partly Cloudy"],
            Season::Spring => &["Partly Cloudy", "Light Rain", "Mostly Sunny", "Sunny", "Windy"],
            Season::Summer => &["Sunny", "Mostly Sunny", "Partly Cloudy", "Light Rain", "Thunderstorm"],
            Season::Autumn => &["Partly Cloudy", "Cloudy", "Light Rain", "Mostly Sunny", "Fog"],
        }
    }
}

/// Base temperature used for cities without seasonal data.
const DEFAULT_TEMP: i32 = 25;

/// Seasonal averages: winter, spring, summer, autumn.
const SEASONAL_TEMPS: &[(&str, [i32; 4])] = &[
    ("BCN", [12, 18, 28, 20]),
    ("MAD", [8, 16, 32, 18]),
    ("LIS", [13, 17, 26, 19]),
    ("VAL", [14, 19, 30, 22]),
    ("POR", [11, 15, 24, 17]),
    ("SVQ", [13, 20, 35, 23]),
    ("ROM", [10, 18, 31, 20]),
    ("PAR", [5, 13, 25, 14]),
    ("AMS", [3, 10, 22, 12]),
    ("BER", [1, 12, 24, 13]),
    ("MIL", [4, 15, 29, 16]),
    ("ATH", [12, 19, 33, 22]),
];

/// Synthetic forecaster from seasonal averages.
///
/// Adds a seeded ±2 °C variation per city and date, and picks a condition
/// for the season; warmer days draw from the sunnier end of the list.
#[derive(Debug, Clone)]
pub struct SeasonalWeather {
    seed: u64,
}

impl SeasonalWeather {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn base_temp(city: CityCode, season: Season) -> i32 {
        let index = match season {
            Season::Winter => 0,
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
        };

        SEASONAL_TEMPS
            .iter()
            .find(|(code, _)| *code == city.as_str())
            .map(|(_, temps)| temps[index])
            .unwrap_or(DEFAULT_TEMP)
    }

    /// Forecast without going through the async trait.
    pub fn predict(&self, city: CityCode, date: NaiveDate) -> WeatherForecast {
        let season = Season::of(date);
        let day = date.to_string();
        let mut rng = rng_for(self.seed, &[city.as_str().as_bytes(), day.as_bytes()]);

        let average_temp = Self::base_temp(city, season) + rng.gen_range(-2..=2);

        let conditions = season.conditions();
        let choices = if average_temp > 30 {
            2
        } else if average_temp > 25 {
            3
        } else {
            conditions.len()
        };
        let condition = conditions[rng.gen_range(0..choices.min(conditions.len()))];

        WeatherForecast {
            average_temp,
            condition: condition.to_string(),
        }
    }
}

impl WeatherProvider for SeasonalWeather {
    async fn forecast(
        &self,
        city: CityCode,
        date: NaiveDate,
    ) -> Result<WeatherForecast, WeatherError> {
        Ok(self.predict(city, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CityCode {
        CityCode::parse(s).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn seasons() {
        assert_eq!(Season::of(date(1, 10)), Season::Winter);
        assert_eq!(Season::of(date(4, 10)), Season::Spring);
        assert_eq!(Season::of(date(7, 10)), Season::Summer);
        assert_eq!(Season::of(date(10, 10)), Season::Autumn);
        assert_eq!(Season::of(date(12, 31)), Season::Winter);
    }

    #[test]
    fn within_two_degrees_of_seasonal_average() {
        let weather = SeasonalWeather::new(3);

        for day in 1..=30 {
            let forecast = weather.predict(code("SVQ"), date(6, day));
            assert!((33..=37).contains(&forecast.average_temp), "{forecast:?}");
            // Hot days only draw from the two sunniest conditions.
            assert!(["Sunny", "Mostly Sunny"].contains(&forecast.condition.as_str()));
        }
    }

    #[test]
    fn unknown_city_uses_default_base() {
        let forecast = SeasonalWeather::new(3).predict(code("XYZ"), date(1, 5));
        assert!((23..=27).contains(&forecast.average_temp));
    }

    #[test]
    fn deterministic_per_seed() {
        let a = SeasonalWeather::new(11).predict(code("PAR"), date(3, 3));
        let b = SeasonalWeather::new(11).predict(code("PAR"), date(3, 3));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn no_weather_always_errors() {
        let result = NoWeather.forecast(code("PAR"), date(3, 3)).await;
        assert_eq!(result, Err(WeatherError::UnknownCity(code("PAR"))));
    }
}
