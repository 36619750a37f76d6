use crate::config::{ReportConfig, UnitScheme};
use crate::models::smart::SmartSummary;
use crate::models::usage::UsageStats;
use crate::util::human::{fmt_grouped, fmt_grouped_f, locale_or_default};
use num_format::Locale;
use std::fmt::Write;

// ── Colours ───────────────────────────────────────────────────────────

pub const RED:   &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const BLUE:  &str = "\x1b[34m";
pub const RESET: &str = "\x1b[0m";

/// ANSI escapes, or empty strings when colour is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub alert:   &'static str,
    pub caution: &'static str,
    pub healthy: &'static str,
    pub reset:   &'static str,
}

impl Palette {
    pub const ANSI: Palette = Palette { alert: RED, caution: BLUE, healthy: GREEN, reset: RESET };
    pub const PLAIN: Palette = Palette { alert: "", caution: "", healthy: "", reset: "" };

    pub fn new(color: bool) -> Self {
        if color { Self::ANSI } else { Self::PLAIN }
    }

    /// "ERROR: <message>" with the prefix in the alert colour.
    pub fn error_line(&self, message: &str) -> String {
        format!("{}ERROR:{} {}", self.alert, self.reset, message)
    }
}

// ── Renderer ──────────────────────────────────────────────────────────

pub struct Renderer {
    pub palette:       Palette,
    pub locale:        Locale,
    pub units:         UnitScheme,
    pub alert_below:   u64,
    pub caution_below: u64,
}

impl Renderer {
    pub fn from_config(cfg: &ReportConfig, color: bool) -> Self {
        Self {
            palette:       Palette::new(color),
            locale:        locale_or_default(&cfg.locale),
            units:         cfg.units,
            alert_below:   cfg.health_alert_below,
            caution_below: cfg.health_caution_below,
        }
    }

    pub fn health_colour(&self, health: u64) -> &'static str {
        if health < self.alert_below {
            self.palette.alert
        } else if health < self.caution_below {
            self.palette.caution
        } else {
            self.palette.healthy
        }
    }

    fn data_line(&self, decimal_label: &str, decimal: f64, binary_label: &str, binary: f64) -> String {
        let loc = &self.locale;
        match self.units {
            UnitScheme::Both => format!(
                "    {}: {} [{} {}]",
                decimal_label, fmt_grouped_f(decimal, loc), fmt_grouped_f(binary, loc), binary_label
            ),
            UnitScheme::Decimal => format!("    {}: {}", decimal_label, fmt_grouped_f(decimal, loc)),
            UnitScheme::Binary  => format!("    {}: {}", binary_label, fmt_grouped_f(binary, loc)),
        }
    }

    /// The full text report, newline-terminated.
    pub fn render(&self, device: &str, s: &SmartSummary, u: &UsageStats) -> String {
        let loc = &self.locale;
        let mut out = String::new();

        let _ = writeln!(out, "Device: {}", device);
        let _ = writeln!(out, "Model: {}", s.device_model);
        let _ = writeln!(out, "Serial number: {}", s.serial_number);
        let _ = writeln!(out, "Power on time: {} hours", fmt_grouped(s.power_on_hours, loc));

        out.push_str("Data written:\n");
        let _ = writeln!(out, "{}", self.data_line("MB", u.total_mb_written, "MiB", u.total_mib_written));
        let _ = writeln!(out, "{}", self.data_line("GB", u.total_gb_written, "GiB", u.total_gib_written));
        let _ = writeln!(out, "{}", self.data_line("TB", u.total_tb_written, "TiB", u.total_tib_written));

        out.push_str("Mean write rate:\n");
        let rate = match u.mean_write_rate {
            Some(r) => fmt_grouped_f(r, loc),
            None    => "n/a".to_string(),
        };
        let _ = writeln!(out, "    MB/hr: {}", rate);

        if let Some(spare) = &s.available_spare {
            let _ = writeln!(out, "Available spare capacity: {}", spare);
        }

        let _ = writeln!(
            out,
            "Estimated drive health: {}{}{}%",
            self.health_colour(s.health_pct), s.health_pct, self.palette.reset
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(units: UnitScheme) -> Renderer {
        let cfg = ReportConfig { units, ..ReportConfig::default() };
        Renderer::from_config(&cfg, true)
    }

    fn summary(health: u64, spare: Option<&str>) -> SmartSummary {
        SmartSummary {
            device_model:       "Samsung SSD 860 EVO 500GB".into(),
            serial_number:      "S3Z1NB0K123456A".into(),
            lba_size:           512,
            power_on_hours:     12_345,
            health_pct:         health,
            total_lbas_written: 39_183_952_381,
            available_spare:    spare.map(str::to_string),
        }
    }

    #[test]
    fn health_colour_boundaries() {
        let r = renderer(UnitScheme::Both);
        assert_eq!(r.health_colour(0), RED);
        assert_eq!(r.health_colour(29), RED);
        assert_eq!(r.health_colour(30), BLUE);
        assert_eq!(r.health_colour(59), BLUE);
        assert_eq!(r.health_colour(60), GREEN);
        assert_eq!(r.health_colour(100), GREEN);
    }

    #[test]
    fn health_line_wraps_value_in_colour() {
        let r = renderer(UnitScheme::Both);
        let s = summary(29, None);
        let text = r.render("/dev/sda", &s, &UsageStats::calculate(&s));
        assert!(text.ends_with("Estimated drive health: \x1b[31m29\x1b[0m%\n"));
    }

    #[test]
    fn full_report_with_both_unit_chains() {
        let r = renderer(UnitScheme::Both);
        let s = summary(97, None);
        let text = r.render("/dev/sda", &s, &UsageStats::calculate(&s));
        // 39,183,952,381 LBAs * 512 = 20,062,183,619,072 bytes
        let expected = "\
Device: /dev/sda
Model: Samsung SSD 860 EVO 500GB
Serial number: S3Z1NB0K123456A
Power on time: 12,345 hours
Data written:
    MB: 20,062,183,619 [19,591,976,190 MiB]
    GB: 20,062,183 [19,132,789 GiB]
    TB: 20,062 [18,684 TiB]
Mean write rate:
    MB/hr: 1,625,126
Estimated drive health: \x1b[32m97\x1b[0m%
";
        assert_eq!(text, expected);
    }

    #[test]
    fn single_scheme_reports_drop_the_other_units() {
        let s = summary(97, None);
        let u = UsageStats::calculate(&s);

        let dec = renderer(UnitScheme::Decimal).render("/dev/sda", &s, &u);
        assert!(dec.contains("    GB: 20,062,183\n"));
        assert!(!dec.contains("GiB"));

        let bin = renderer(UnitScheme::Binary).render("/dev/sda", &s, &u);
        assert!(bin.contains("    GiB: 19,132,789\n"));
        assert!(!bin.contains(" GB:"));
    }

    #[test]
    fn spare_line_only_when_reported() {
        let r = renderer(UnitScheme::Both);
        let with = summary(95, Some("100%"));
        let text = r.render("/dev/nvme0", &with, &UsageStats::calculate(&with));
        assert!(text.contains("Available spare capacity: 100%\nEstimated drive health:"));

        let without = summary(95, None);
        let text = r.render("/dev/nvme0", &without, &UsageStats::calculate(&without));
        assert!(!text.contains("Available spare"));
    }

    #[test]
    fn zero_hours_prints_na_rate() {
        let r = renderer(UnitScheme::Both);
        let mut s = summary(80, None);
        s.power_on_hours = 0;
        let text = r.render("/dev/sda", &s, &UsageStats::calculate(&s));
        assert!(text.contains("    MB/hr: n/a\n"));
    }

    #[test]
    fn plain_palette_has_no_escapes() {
        let cfg = ReportConfig::default();
        let r = Renderer::from_config(&cfg, false);
        let s = summary(10, None);
        let text = r.render("/dev/sda", &s, &UsageStats::calculate(&s));
        assert!(!text.contains('\x1b'));
        assert!(text.ends_with("Estimated drive health: 10%\n"));
        assert_eq!(r.palette.error_line("boom"), "ERROR: boom");
        assert_eq!(Palette::ANSI.error_line("boom"), "\x1b[31mERROR:\x1b[0m boom");
    }
}
