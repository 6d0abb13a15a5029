// crates/nlu/src/duration.rs

use crate::morph::{Morphology, PluralForms};

// Unit words in the case the spoken phrase requires ("через одну минуту").
const DAYS: PluralForms<'static> = PluralForms {
    one: "день",
    few: "дня",
    many: "дней",
};
const HOURS: PluralForms<'static> = PluralForms {
    one: "час",
    few: "часа",
    many: "часов",
};
const MINUTES: PluralForms<'static> = PluralForms {
    one: "минуту",
    few: "минуты",
    many: "минут",
};
const SECONDS: PluralForms<'static> = PluralForms {
    one: "секунду",
    few: "секунды",
    many: "секунд",
};

const PREFIX_WORD: &str = "через";

#[derive(Debug, Clone, Copy, Default)]
pub struct DurationFormat {
    /// Prepend «через» — used for "time remaining", off for trip totals.
    pub prefix: bool,
    pub include_seconds: bool,
}

/// Renders a time span as a spoken Russian phrase, e.g.
/// `через 1 минуту 30 секунд`. Zero-count units are omitted entirely.
pub fn spoken_duration(morph: &dyn Morphology, seconds: u64, format: DurationFormat) -> String {
    let units: [(u64, PluralForms<'static>); 4] =
        [(86_400, DAYS), (3_600, HOURS), (60, MINUTES), (1, SECONDS)];

    let mut parts = Vec::new();
    if format.prefix {
        parts.push(PREFIX_WORD.to_string());
    }

    let mut rest = seconds;
    for (unit_seconds, forms) in units {
        if unit_seconds == 1 && !format.include_seconds {
            continue;
        }
        let count = rest / unit_seconds;
        rest %= unit_seconds;
        if count > 0 {
            parts.push(format!("{} {}", count, morph.agree(count as i64, forms)));
        }
    }

    parts.join(" ")
}
