use crate::models::smart::SmartSummary;
use serde::Serialize;

const DECIMAL_STEP: f64 = 1000.0;
const BINARY_STEP: f64 = 1024.0;

/// Write volume derived from a SMART summary.
///
/// MB/GB/TB are powers of 1000 and MiB/GiB/TiB powers of 1024; each chain
/// only ever divides by its own step. Values keep full precision and are
/// truncated when rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageStats {
    pub total_bytes_written: u64,
    pub total_mb_written:    f64,
    pub total_gb_written:    f64,
    pub total_tb_written:    f64,
    pub total_mib_written:   f64,
    pub total_gib_written:   f64,
    pub total_tib_written:   f64,
    /// MB per power-on hour; None for a drive with zero hours on record
    pub mean_write_rate:     Option<f64>,
}

impl UsageStats {
    pub fn calculate(summary: &SmartSummary) -> Self {
        let total_bytes_written = summary.total_lbas_written.saturating_mul(summary.lba_size);
        let bytes = total_bytes_written as f64;

        let total_mb_written = bytes / DECIMAL_STEP;
        let total_gb_written = total_mb_written / DECIMAL_STEP;
        let total_tb_written = total_gb_written / DECIMAL_STEP;

        let total_mib_written = bytes / BINARY_STEP;
        let total_gib_written = total_mib_written / BINARY_STEP;
        let total_tib_written = total_gib_written / BINARY_STEP;

        let mean_write_rate = match summary.power_on_hours {
            0 => None,
            h => Some(total_mb_written / h as f64),
        };

        Self {
            total_bytes_written,
            total_mb_written,
            total_gb_written,
            total_tb_written,
            total_mib_written,
            total_gib_written,
            total_tib_written,
            mean_write_rate,
        }
    }
}
