use crate::error::{LifetimeError, Result};
use serde::Serialize;

/// Fields pulled out of a `smartctl -x` report. Any of them may be missing
/// when the report didn't match either layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveAttributes {
    pub device_model:        Option<String>,
    pub serial_number:       Option<String>,
    pub lba_size:            Option<u64>,
    pub power_on_hours:      Option<u64>,
    /// Remaining endurance in percent (SATA normalized value, or 100 - NVMe percentage used)
    pub wear_leveling_count: Option<u64>,
    /// SATA: LBAs written. NVMe: data units written.
    pub total_lbas_written:  Option<u64>,
    /// NVMe only, kept verbatim ("100%")
    pub available_spare:     Option<String>,
}

impl DriveAttributes {
    /// Model name, empty when the report had none.
    pub fn model(&self) -> &str {
        self.device_model.as_deref().unwrap_or("")
    }

    pub fn is_samsung(&self) -> bool {
        self.model().to_lowercase().contains("samsung")
    }

    /// Fail with the model name unless this is a Samsung drive.
    pub fn check_vendor(&self) -> Result<()> {
        if self.is_samsung() {
            Ok(())
        } else {
            Err(LifetimeError::UnsupportedVendor { model: self.model().to_string() })
        }
    }

    /// Promote to a summary once every field the report needs is present.
    pub fn complete(self) -> Result<SmartSummary> {
        Ok(SmartSummary {
            device_model:        require(self.device_model, "Device Model")?,
            serial_number:       require(self.serial_number, "Serial Number")?,
            lba_size:            require(self.lba_size, "Sector Size")?,
            power_on_hours:      require(self.power_on_hours, "Power On Hours")?,
            health_pct:          require(self.wear_leveling_count, "Wear Leveling Count")?,
            total_lbas_written:  require(self.total_lbas_written, "Total LBAs Written")?,
            available_spare:     self.available_spare,
        })
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(LifetimeError::MissingAttribute { field })
}

/// Everything the usage calculation and report need, guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmartSummary {
    pub device_model:       String,
    pub serial_number:      String,
    pub lba_size:           u64,
    pub power_on_hours:     u64,
    pub health_pct:         u64,
    pub total_lbas_written: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_spare:    Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> DriveAttributes {
        DriveAttributes {
            device_model:        Some("Samsung SSD 860 EVO 500GB".into()),
            serial_number:       Some("S3Z1NB0K123456A".into()),
            lba_size:            Some(512),
            power_on_hours:      Some(12345),
            wear_leveling_count: Some(97),
            total_lbas_written:  Some(1000),
            available_spare:     None,
        }
    }

    #[test]
    fn vendor_match_ignores_case() {
        let mut attrs = DriveAttributes::default();
        attrs.device_model = Some("Samsung 970 EVO".into());
        assert!(attrs.check_vendor().is_ok());
        attrs.device_model = Some("SAMSUNG MZVLB512HAJQ".into());
        assert!(attrs.is_samsung());
    }

    #[test]
    fn other_vendors_exit_with_four() {
        let mut attrs = DriveAttributes::default();
        attrs.device_model = Some("WD Blue".into());
        let err = attrs.check_vendor().unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn absent_model_counts_as_empty_and_fails() {
        let attrs = DriveAttributes::default();
        assert_eq!(attrs.model(), "");
        match attrs.check_vendor() {
            Err(LifetimeError::UnsupportedVendor { model }) => assert!(model.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn complete_keeps_optional_spare_absent() {
        let summary = full().complete().unwrap();
        assert_eq!(summary.health_pct, 97);
        assert_eq!(summary.available_spare, None);
    }

    #[test]
    fn complete_names_first_missing_field() {
        let mut attrs = full();
        attrs.power_on_hours = None;
        match attrs.complete() {
            Err(LifetimeError::MissingAttribute { field }) => assert_eq!(field, "Power On Hours"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
