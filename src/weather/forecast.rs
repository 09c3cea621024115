use time::{Date, Duration, OffsetDateTime, UtcOffset};

use super::dto::{CitySuggestion, DayForecast, ForecastBlock, GeoPlace};
use crate::config::Lang;
use crate::text::capitalize;

pub const FORECAST_DAYS: i64 = 3;

const IT_DAYS: [&str; 7] = [
    "Lunedì", "Martedì", "Mercoledì", "Giovedì", "Venerdì", "Sabato", "Domenica",
];
const IT_MONTHS: [&str; 12] = [
    "GEN", "FEB", "MAR", "APR", "MAG", "GIU", "LUG", "AGO", "SET", "OTT", "NOV", "DIC",
];
const IT_RELATIVE: [&str; 3] = ["Oggi", "Domani", "Dopodomani"];

const EN_DAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const EN_MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const EN_RELATIVE: [&str; 3] = ["Today", "Tomorrow", "Day after"];

/// `"Oggi - Lunedì 3 GIU 2024"` style label for the `offset`-th day.
pub fn day_label(offset: usize, date: Date, lang: Lang) -> String {
    let (days, months, relative) = match lang {
        Lang::It => (&IT_DAYS, &IT_MONTHS, &IT_RELATIVE),
        Lang::En => (&EN_DAYS, &EN_MONTHS, &EN_RELATIVE),
    };
    let weekday = days[date.weekday().number_days_from_monday() as usize];
    let month = months[u8::from(date.month()) as usize - 1];
    let full = format!("{weekday} {} {month} {}", date.day(), date.year());
    match relative.get(offset) {
        Some(prefix) => format!("{prefix} - {full}"),
        None => full,
    }
}

/// Most common entry; ties go to the one seen first.
pub fn most_frequent<'a>(items: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (item, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((item, n));
        }
    }
    best.map(|(item, _)| item)
}

fn round_half_even(x: f64) -> i64 {
    x.round_ties_even() as i64
}

fn block_date(block: &ForecastBlock, offset: UtcOffset) -> Option<Date> {
    OffsetDateTime::from_unix_timestamp(block.dt)
        .ok()
        .map(|t| t.to_offset(offset).date())
}

/// Folds 3-hour blocks into per-day summaries for `today` and the next two
/// days, in the `offset` calendar. Days without blocks are left out.
pub fn summarize_days(
    blocks: &[ForecastBlock],
    today: Date,
    offset: UtcOffset,
    lang: Lang,
) -> Vec<DayForecast> {
    let mut days = Vec::new();
    for i in 0..FORECAST_DAYS {
        let Some(target) = today.checked_add(Duration::days(i)) else {
            break;
        };
        let matching: Vec<&ForecastBlock> = blocks
            .iter()
            .filter(|b| block_date(b, offset) == Some(target))
            .collect();
        if matching.is_empty() {
            continue;
        }

        let temps = matching.iter().map(|b| b.main.temp);
        let day_temp = temps.clone().fold(f64::NEG_INFINITY, f64::max);
        let night_temp = temps.fold(f64::INFINITY, f64::min);

        let descriptions: Vec<&str> = matching
            .iter()
            .filter_map(|b| b.weather.first())
            .map(|w| w.description.as_str())
            .collect();
        let weather = most_frequent(&descriptions).map(capitalize).unwrap_or_default();

        days.push(DayForecast {
            date: day_label(i as usize, target, lang),
            weather,
            day_temp: round_half_even(day_temp),
            night_temp: round_half_even(night_temp),
        });
    }
    days
}

pub fn to_suggestion(place: GeoPlace) -> CitySuggestion {
    let country = place.country.unwrap_or_default();
    let state = place.state.unwrap_or_default();
    let display = match (state.is_empty(), country.is_empty()) {
        (false, false) => format!("{}, {}, {}", place.name, state, country),
        (_, false) => format!("{}, {}", place.name, country),
        _ => place.name.clone(),
    };
    CitySuggestion {
        name: place.name,
        display,
        country,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::dto::{BlockMain, BlockWeather};
    use time::macros::{date, datetime, offset};

    fn block(at: OffsetDateTime, temp: f64, description: &str) -> ForecastBlock {
        ForecastBlock {
            dt: at.unix_timestamp(),
            main: BlockMain { temp },
            weather: vec![BlockWeather {
                description: description.into(),
            }],
        }
    }

    #[test]
    fn labels_in_both_languages() {
        // 2024-06-03 was a Monday
        let d = date!(2024 - 06 - 03);
        assert_eq!(day_label(0, d, Lang::It), "Oggi - Lunedì 3 GIU 2024");
        assert_eq!(day_label(2, d, Lang::It), "Dopodomani - Lunedì 3 GIU 2024");
        assert_eq!(day_label(1, d, Lang::En), "Tomorrow - Monday 3 JUN 2024");
        assert_eq!(day_label(5, d, Lang::En), "Monday 3 JUN 2024");
    }

    #[test]
    fn most_frequent_prefers_first_seen_on_tie() {
        assert_eq!(most_frequent(&["rain", "sun", "sun", "rain"]), Some("rain"));
        assert_eq!(most_frequent(&["rain", "sun", "sun"]), Some("sun"));
        assert_eq!(most_frequent(&[]), None);
    }

    #[test]
    fn summarizes_three_days() {
        let today = date!(2024 - 06 - 03);
        let blocks = vec![
            block(datetime!(2024-06-03 09:00 UTC), 18.4, "cielo sereno"),
            block(datetime!(2024-06-03 12:00 UTC), 24.5, "cielo sereno"),
            block(datetime!(2024-06-03 15:00 UTC), 23.0, "pioggia leggera"),
            block(datetime!(2024-06-04 12:00 UTC), 20.0, "nubi sparse"),
            block(datetime!(2024-06-05 12:00 UTC), 15.5, "pioggia"),
            block(datetime!(2024-06-05 21:00 UTC), 11.5, "pioggia"),
            block(datetime!(2024-06-06 12:00 UTC), 30.0, "sole"),
        ];
        let days = summarize_days(&blocks, today, offset!(UTC), Lang::It);
        assert_eq!(days.len(), 3);
        assert_eq!(
            days[0],
            DayForecast {
                date: "Oggi - Lunedì 3 GIU 2024".into(),
                weather: "Cielo sereno".into(),
                day_temp: 24, // 24.5 rounds to even
                night_temp: 18,
            }
        );
        assert_eq!(days[1].day_temp, 20);
        assert_eq!(days[1].night_temp, 20);
        assert_eq!(days[2].day_temp, 16);
        assert_eq!(days[2].night_temp, 12);
        assert!(days[2].date.starts_with("Dopodomani - Mercoledì 5 GIU"));
    }

    #[test]
    fn groups_by_display_offset_and_skips_empty_days() {
        let today = date!(2024 - 06 - 03);
        // 23:30 UTC on the 3rd is already the 4th at UTC+1
        let blocks = vec![block(datetime!(2024-06-03 23:30 UTC), 10.0, "nebbia")];
        let days = summarize_days(&blocks, today, offset!(+1), Lang::En);
        assert_eq!(days.len(), 1);
        assert!(days[0].date.starts_with("Tomorrow - Tuesday 4 JUN 2024"));
        assert_eq!(days[0].weather, "Nebbia");

        assert!(summarize_days(&[], today, offset!(UTC), Lang::En).is_empty());
    }

    #[test]
    fn suggestion_display_uses_available_parts() {
        let place = |state: Option<&str>, country: Option<&str>| GeoPlace {
            name: "Paris".into(),
            lat: 0.0,
            lon: 0.0,
            country: country.map(Into::into),
            state: state.map(Into::into),
        };
        assert_eq!(to_suggestion(place(Some("Texas"), Some("US"))).display, "Paris, Texas, US");
        assert_eq!(to_suggestion(place(None, Some("FR"))).display, "Paris, FR");
        assert_eq!(to_suggestion(place(Some("Île-de-France"), None)).display, "Paris");
        let s = to_suggestion(place(None, None));
        assert_eq!((s.display.as_str(), s.country.as_str()), ("Paris", ""));
    }
}
