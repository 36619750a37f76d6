use crate::collectors::tools::Toolchain;
use crate::error::{LifetimeError, Result};
use crate::models::smart::DriveAttributes;

/// Run `[sudo] smartctl -x <device>` and return its stdout.
///
/// smartctl sets exit-status bits for several non-fatal conditions, but any
/// non-zero status is treated as failure and its output handed back as-is.
pub fn fetch_report(tools: &Toolchain, device: &str) -> Result<String> {
    let mut cmd = tools.smartctl_command(device);
    tracing::info!(?cmd, "running smartctl");

    let out = cmd.output().map_err(|source| LifetimeError::Spawn {
        tool: cmd.get_program().to_string_lossy().into_owned(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
    if !out.status.success() {
        tracing::warn!(status = %out.status, "smartctl failed");
        return Err(LifetimeError::ReportFailed { status: out.status, output: stdout });
    }
    Ok(stdout)
}

/// Parse a report and refuse anything that isn't a Samsung drive.
pub fn extract(report: &str) -> Result<DriveAttributes> {
    let attrs = parse_report(report);
    attrs.check_vendor()?;
    Ok(attrs)
}

// ── Line table ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Marker {
    Prefix(&'static str),
    Contains(&'static str),
}

impl Marker {
    fn matches(self, line: &str) -> bool {
        match self {
            Marker::Prefix(p)   => line.starts_with(p),
            Marker::Contains(s) => line.contains(s),
        }
    }
}

/// Which whitespace-separated token(s) carry the value.
#[derive(Debug, Clone, Copy)]
enum Take {
    Token(usize),
    Last,
    /// Tokens from this index on, re-joined with single spaces
    Rest(usize),
}

#[derive(Debug, Clone, Copy)]
enum Coerce {
    Text,
    Integer,
    /// "5%" → 95
    PercentRemaining,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    DeviceModel,
    SerialNumber,
    LbaSize,
    PowerOnHours,
    WearLevelingCount,
    TotalLbasWritten,
    AvailableSpare,
}

#[derive(Debug)]
enum Value {
    Text(String),
    Int(u64),
}

struct LineRule {
    marker: Marker,
    field:  Field,
    take:   Take,
    coerce: Coerce,
}

const fn rule(marker: Marker, field: Field, take: Take, coerce: Coerce) -> LineRule {
    LineRule { marker, field, take, coerce }
}

/// First matching rule wins for a line; later lines overwrite earlier ones.
const RULES: &[LineRule] = &[
    // SATA
    rule(Marker::Prefix("Device Model"),          Field::DeviceModel,       Take::Rest(2),  Coerce::Text),
    rule(Marker::Prefix("Sector Size"),           Field::LbaSize,           Take::Token(2), Coerce::Integer),
    rule(Marker::Contains("Power_On_Hours"),      Field::PowerOnHours,      Take::Token(7), Coerce::Integer),
    rule(Marker::Contains("Wear_Leveling_Count"), Field::WearLevelingCount, Take::Token(3), Coerce::Integer),
    rule(Marker::Contains("Total_LBAs_Written"),  Field::TotalLbasWritten,  Take::Token(7), Coerce::Integer),
    // NVMe
    rule(Marker::Prefix("Model Number"),                   Field::DeviceModel,       Take::Rest(2),  Coerce::Text),
    rule(Marker::Prefix("Namespace 1 Formatted LBA Size"), Field::LbaSize,           Take::Last,     Coerce::Integer),
    rule(Marker::Prefix("Power On Hours"),                 Field::PowerOnHours,      Take::Token(3), Coerce::Integer),
    rule(Marker::Prefix("Percentage Used"),                Field::WearLevelingCount, Take::Token(2), Coerce::PercentRemaining),
    rule(Marker::Prefix("Data Units Written"),             Field::TotalLbasWritten,  Take::Token(3), Coerce::Integer),
    rule(Marker::Prefix("Available Spare:"),               Field::AvailableSpare,    Take::Token(2), Coerce::Text),
    // both
    rule(Marker::Prefix("Serial Number"), Field::SerialNumber, Take::Token(2), Coerce::Text),
];

impl LineRule {
    fn extract(&self, line: &str) -> Option<Value> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let raw = match self.take {
            Take::Token(i) => tokens.get(i)?.to_string(),
            Take::Last     => tokens.last()?.to_string(),
            Take::Rest(i)  => {
                let rest = tokens.get(i..).filter(|r| !r.is_empty())?;
                rest.join(" ")
            }
        };
        match self.coerce {
            Coerce::Text    => Some(Value::Text(raw)),
            Coerce::Integer => parse_int(&raw).map(Value::Int),
            Coerce::PercentRemaining => {
                let used = parse_int(raw.strip_suffix('%').unwrap_or(&raw))?;
                Some(Value::Int(100u64.saturating_sub(used)))
            }
        }
    }
}

impl Field {
    fn store(self, attrs: &mut DriveAttributes, value: Value) {
        match (self, value) {
            (Field::DeviceModel, Value::Text(s))       => attrs.device_model = Some(s),
            (Field::SerialNumber, Value::Text(s))      => attrs.serial_number = Some(s),
            (Field::AvailableSpare, Value::Text(s))    => attrs.available_spare = Some(s),
            (Field::LbaSize, Value::Int(n))            => attrs.lba_size = Some(n),
            (Field::PowerOnHours, Value::Int(n))       => attrs.power_on_hours = Some(n),
            (Field::WearLevelingCount, Value::Int(n))  => attrs.wear_leveling_count = Some(n),
            (Field::TotalLbasWritten, Value::Int(n))   => attrs.total_lbas_written = Some(n),
            (field, value) => tracing::warn!(?field, ?value, "value kind does not fit field"),
        }
    }
}

/// smartctl groups digits in NVMe counters ("1,234,567").
fn parse_int(s: &str) -> Option<u64> {
    s.replace(',', "").parse().ok()
}

/// Scan a report line by line against the rule table.
pub fn parse_report(report: &str) -> DriveAttributes {
    let mut attrs = DriveAttributes::default();
    for line in report.lines() {
        let Some(rule) = RULES.iter().find(|r| r.marker.matches(line)) else {
            continue;
        };
        match rule.extract(line) {
            Some(value) => rule.field.store(&mut attrs, value),
            None => tracing::debug!(field = ?rule.field, line, "matched line has no usable value"),
        }
    }
    attrs
}
