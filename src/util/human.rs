use num_format::{Locale, ToFormattedString};

/// Look up a num-format locale by name, falling back to "en".
pub fn locale_or_default(name: &str) -> Locale {
    Locale::from_name(name).unwrap_or_else(|_| {
        tracing::warn!(locale = name, "unknown locale, grouping digits the \"en\" way");
        Locale::en
    })
}

/// Thousands-grouped integer: "12,345"
pub fn fmt_grouped(n: u64, locale: &Locale) -> String {
    n.to_formatted_string(locale)
}

/// Truncate toward zero, then group: 1234.9 → "1,234"
pub fn fmt_grouped_f(v: f64, locale: &Locale) -> String {
    fmt_grouped(v as u64, locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_thousands() {
        assert_eq!(fmt_grouped(0, &Locale::en), "0");
        assert_eq!(fmt_grouped(999, &Locale::en), "999");
        assert_eq!(fmt_grouped(12_345, &Locale::en), "12,345");
        assert_eq!(fmt_grouped(19_062_272_114, &Locale::en), "19,062,272,114");
    }

    #[test]
    fn floats_are_truncated_not_rounded() {
        assert_eq!(fmt_grouped_f(1234.99, &Locale::en), "1,234");
        assert_eq!(fmt_grouped_f(0.512, &Locale::en), "0");
    }

    #[test]
    fn separator_follows_locale() {
        assert_eq!(fmt_grouped(1_234_567, &Locale::de), "1.234.567");
    }

    #[test]
    fn unknown_locale_falls_back_to_en() {
        let loc = locale_or_default("xx-not-a-locale");
        assert_eq!(fmt_grouped(1_000, &loc), "1,000");
    }
}
