mod collectors;
mod config;
mod error;
mod models;
mod util;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use collectors::{device, smartctl, tools::Toolchain};
use config::{Config, ToolsConfig, UnitScheme};
use error::LifetimeError;
use models::smart::SmartSummary;
use models::usage::UsageStats;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use util::report::{Palette, Renderer};

#[derive(Parser, Debug)]
#[command(
    name = "ssdlife",
    version,
    about = "Check the lifetime of Samsung SSDs with \"smartctl\" as the only external dependency"
)]
struct Cli {
    /// Drive to inspect, e.g. /dev/sda or /dev/nvme0
    #[arg(required_unless_present_any = ["config", "completions"])]
    device: Option<String>,

    /// Print attributes and usage as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Disable ANSI colours (NO_COLOR is honoured too)
    #[arg(long)]
    no_color: bool,

    /// Unit prefixes for "Data written" (overrides the config file)
    #[arg(long, value_enum)]
    units: Option<UnitScheme>,

    /// Log more to stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "ssdlife", &mut std::io::stdout());
        return;
    }

    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let cfg = match Config::load() {
        Ok(c)  => c,
        Err(e) => exit_with(Palette::new(color), LifetimeError::Config(e)),
    };

    if cli.config {
        print_config(&cfg);
        return;
    }

    let Some(device) = cli.device.as_deref() else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "a DEVICE is required")
            .exit();
    };

    let mut report_cfg = cfg.report.clone();
    if let Some(units) = cli.units {
        report_cfg.units = units;
    }
    let renderer = Renderer::from_config(&report_cfg, color && report_cfg.color);

    if let Err(err) = run(device, &cfg.tools, &renderer, cli.json) {
        exit_with(renderer.palette, err);
    }
}

/// validate → resolve tools → smartctl → extract → calculate → print
fn run(device: &str, tools_cfg: &ToolsConfig, renderer: &Renderer, json: bool) -> error::Result<()> {
    device::validate(device)?;
    let tools = Toolchain::resolve(tools_cfg)?;
    let report = smartctl::fetch_report(&tools, device)?;
    let summary = smartctl::extract(&report)?.complete()?;
    let usage = UsageStats::calculate(&summary);

    if json {
        println!("{}", json_snapshot(device, &summary, &usage)?);
    } else {
        print!("{}", renderer.render(device, &summary, &usage));
    }
    Ok(())
}

#[derive(Serialize)]
struct Snapshot<'a> {
    ssdlife_version: &'a str,
    timestamp:       String,
    device:          &'a str,
    attributes:      &'a SmartSummary,
    usage:           &'a UsageStats,
}

fn json_snapshot(device: &str, summary: &SmartSummary, usage: &UsageStats) -> error::Result<String> {
    let snapshot = Snapshot {
        ssdlife_version: env!("CARGO_PKG_VERSION"),
        timestamp:       chrono::Local::now().to_rfc3339(),
        device,
        attributes:      summary,
        usage,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

fn print_config(cfg: &Config) {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let r = &cfg.report;
    println!("Config: {}", path);
    println!();
    println!("[tools]");
    println!("  sudo          = {}", cfg.tools.sudo);
    println!("  smartctl      = {}", cfg.tools.smartctl);
    println!("  smartctl_args = {:?}", cfg.tools.smartctl_args);
    println!();
    println!("[report]");
    println!("  units                = {:?}", r.units);
    println!("  locale               = {}", r.locale);
    println!("  color                = {}", r.color);
    println!("  health_alert_below   = {}%", r.health_alert_below);
    println!("  health_caution_below = {}%", r.health_caution_below);
}

/// Errors go to stdout, like the report itself.
fn exit_with(palette: Palette, err: LifetimeError) -> ! {
    println!("{}", palette.error_line(&err.to_string()));
    std::process::exit(err.exit_code());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}
