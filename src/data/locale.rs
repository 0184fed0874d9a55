//! Fixed label tables for month, weekday, day-type and mode names.

use crate::domain::{DayType, GenerationMode, Locale};

const MONTHS_UK: [&str; 12] = [
    "Січень", "Лютий", "Березень", "Квітень", "Травень", "Червень",
    "Липень", "Серпень", "Вересень", "Жовтень", "Листопад", "Грудень",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
const MONTHS_SHORT_UK: [&str; 12] = [
    "Січ", "Лют", "Бер", "Кві", "Тра", "Чер", "Лип", "Сер", "Вер", "Жов", "Лис", "Гру",
];
const MONTHS_SHORT_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS_UK: [&str; 7] = [
    "Понеділок", "Вівторок", "Середа", "Четвер", "П'ятниця", "Субота", "Неділя",
];
const WEEKDAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Month name for `month` in 1..=12.
///
/// # Panics
/// Panics if `month` is outside 1..=12; callers pass chrono month numbers.
pub fn month_name(locale: Locale, month: u32) -> &'static str {
    let idx = month as usize - 1;
    match locale {
        Locale::Uk => MONTHS_UK[idx],
        Locale::En => MONTHS_EN[idx],
    }
}

pub fn month_short_name(locale: Locale, month: u32) -> &'static str {
    let idx = month as usize - 1;
    match locale {
        Locale::Uk => MONTHS_SHORT_UK[idx],
        Locale::En => MONTHS_SHORT_EN[idx],
    }
}

/// Weekday name for `day_of_week` in 0 (Monday) ..= 6 (Sunday).
pub fn weekday_name(locale: Locale, day_of_week: u32) -> &'static str {
    let idx = day_of_week as usize;
    match locale {
        Locale::Uk => WEEKDAYS_UK[idx],
        Locale::En => WEEKDAYS_EN[idx],
    }
}

pub fn day_type_label(locale: Locale, day_type: DayType) -> &'static str {
    match (locale, day_type) {
        (Locale::Uk, DayType::Holiday) => "Свято",
        (Locale::Uk, DayType::Regular) => "Робочий",
        (Locale::En, DayType::Holiday) => "Holiday",
        (Locale::En, DayType::Regular) => "Regular",
    }
}

pub fn mode_description(locale: Locale, mode: GenerationMode) -> &'static str {
    match (locale, mode) {
        (Locale::Uk, GenerationMode::Reproducible) => {
            "Відтворювані дані - однакові результати при кожному запуску"
        }
        (Locale::Uk, GenerationMode::Random) => {
            "Випадкові дані - унікальні результати при кожному запуску"
        }
        (Locale::En, GenerationMode::Reproducible) => "Reproducible data - identical results on every run",
        (Locale::En, GenerationMode::Random) => "Random data - unique results on every run",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_tables() {
        assert_eq!(month_name(Locale::Uk, 1), "Січень");
        assert_eq!(month_name(Locale::En, 12), "December");
        assert_eq!(month_short_name(Locale::En, 7), "Jul");
    }

    #[test]
    fn weekday_tables() {
        assert_eq!(weekday_name(Locale::Uk, 0), "Понеділок");
        assert_eq!(weekday_name(Locale::En, 6), "Sunday");
        assert_eq!(day_type_label(Locale::Uk, DayType::Holiday), "Свято");
    }
}
