//! Categorical Fields
//! Integer-coded columns of the rental dataset decoded to labelled enums.
//!
//! Every enum keeps an `Unknown(code)` variant for codes outside the fixed
//! mapping. Unknown values render an empty label and sort after all known
//! variants, so grouping never silently drops a row.

use serde::{Serialize, Serializer};
use std::fmt;

/// Calendar month (`mnth` column, 1-12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
    Unknown(i64),
}

impl Month {
    /// Canonical January..December order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            1..=12 => Self::ALL[(code - 1) as usize],
            other => Month::Unknown(other),
        }
    }

    /// Zero-based position in the canonical order, `None` for unknown codes.
    pub fn index(&self) -> Option<usize> {
        Self::ALL.iter().position(|m| m == self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
            Month::Unknown(_) => "",
        }
    }
}

/// Meteorological season (`season` column, 1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    Unknown(i64),
}

impl Season {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Season::Spring,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            other => Season::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::Unknown(_) => "",
        }
    }
}

/// Day of the week (`weekday` column, 0 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Unknown(i64),
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            0..=6 => Self::ALL[code as usize],
            other => Weekday::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Unknown(_) => "",
        }
    }
}

/// Weather situation (`weathersit` column, 1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeatherCondition {
    ClearPartlyCloudy,
    MistyCloudy,
    LightSnowRain,
    SevereWeather,
    Unknown(i64),
}

impl WeatherCondition {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => WeatherCondition::ClearPartlyCloudy,
            2 => WeatherCondition::MistyCloudy,
            3 => WeatherCondition::LightSnowRain,
            4 => WeatherCondition::SevereWeather,
            other => WeatherCondition::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::ClearPartlyCloudy => "Clear/Partly Cloudy",
            WeatherCondition::MistyCloudy => "Misty/Cloudy",
            WeatherCondition::LightSnowRain => "Light Snow/Rain",
            WeatherCondition::SevereWeather => "Severe Weather",
            WeatherCondition::Unknown(_) => "",
        }
    }
}

// Labels double as the display and serialized form.
macro_rules! label_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }
        )*
    };
}

label_impls!(Month, Season, Weekday, WeatherCondition);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_labels_for_valid_codes() {
        let expected = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        for (code, label) in (1..=12).zip(expected) {
            assert_eq!(Month::from_code(code).label(), label);
        }
    }

    #[test]
    fn test_month_out_of_range_is_unknown() {
        for code in [0, 13, -1, 99] {
            let month = Month::from_code(code);
            assert_eq!(month, Month::Unknown(code));
            assert_eq!(month.label(), "");
            assert_eq!(month.index(), None);
        }
    }

    #[test]
    fn test_month_index_follows_canonical_order() {
        assert_eq!(Month::Jan.index(), Some(0));
        assert_eq!(Month::Dec.index(), Some(11));
    }

    #[test]
    fn test_season_mapping() {
        assert_eq!(Season::from_code(1), Season::Spring);
        assert_eq!(Season::from_code(2), Season::Summer);
        assert_eq!(Season::from_code(3), Season::Fall);
        assert_eq!(Season::from_code(4), Season::Winter);
        assert_eq!(Season::from_code(5).label(), "");
    }

    #[test]
    fn test_weekday_starts_on_sunday() {
        assert_eq!(Weekday::from_code(0), Weekday::Sun);
        assert_eq!(Weekday::from_code(6), Weekday::Sat);
        assert_eq!(Weekday::from_code(7), Weekday::Unknown(7));
    }

    #[test]
    fn test_weather_labels() {
        assert_eq!(WeatherCondition::from_code(1).label(), "Clear/Partly Cloudy");
        assert_eq!(WeatherCondition::from_code(2).label(), "Misty/Cloudy");
        assert_eq!(WeatherCondition::from_code(3).label(), "Light Snow/Rain");
        assert_eq!(WeatherCondition::from_code(4).label(), "Severe Weather");
        assert_eq!(WeatherCondition::from_code(0).label(), "");
    }

    #[test]
    fn test_unknown_sorts_last() {
        assert!(Season::Winter < Season::Unknown(0));
        assert!(Weekday::Sat < Weekday::Unknown(-3));
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&WeatherCondition::MistyCloudy).unwrap();
        assert_eq!(json, "\"Misty/Cloudy\"");
    }
}
