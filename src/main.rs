//! Battery payback calculator entry point: CLI wiring and config-driven projection.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use battery_payback::config::CalculatorConfig;
use battery_payback::error::{Error, Result};
use battery_payback::io::export::{
    ProjectionReport, export_monthly_csv, export_yearly_csv, to_json,
};
use battery_payback::projection::{Summary, project};
use battery_payback::report::render_report;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Home battery payback calculator.
///
/// If no --scenario or --preset is given, the default preset is used.
#[derive(Debug, Parser)]
#[command(name = "battery-payback", version, about)]
struct Cli {
    /// Load inputs from a TOML scenario file.
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,
    /// Use a built-in preset (default, high_price, small_install).
    #[arg(long)]
    preset: Option<String>,
    /// Installed power in W (ignored when --yield is given).
    #[arg(long)]
    power: Option<f64>,
    /// Annual yield in kWh (power is derived from it).
    #[arg(long = "yield")]
    yield_kwh: Option<f64>,
    /// Self-consumption without battery, % of yield.
    #[arg(long)]
    self_old_pct: Option<f64>,
    /// Self-consumption with battery, % of yield.
    #[arg(long)]
    self_new_pct: Option<f64>,
    /// First-year electricity price per kWh.
    #[arg(long)]
    price: Option<f64>,
    /// Installation cost.
    #[arg(long)]
    install_cost: Option<f64>,
    /// Annual price increase in percent.
    #[arg(long, allow_negative_numbers = true)]
    price_inc: Option<f64>,
    /// Lifespan in years.
    #[arg(long)]
    lifespan: Option<u32>,
    /// Output format for the report on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Export the yearly series to CSV.
    #[arg(long)]
    yearly_csv: Option<PathBuf>,
    /// Export the monthly series to CSV.
    #[arg(long)]
    monthly_csv: Option<PathBuf>,
    /// Open the interactive terminal calculator.
    #[cfg(feature = "tui")]
    #[arg(long)]
    tui: bool,
}

impl Cli {
    /// Applies per-field overrides on top of the loaded configuration.
    fn apply_overrides(&self, cfg: &mut CalculatorConfig) {
        let inst = &mut cfg.installation;
        if let Some(power) = self.power {
            inst.power_w = power;
            inst.yield_kwh = None;
        }
        if let Some(y) = self.yield_kwh {
            inst.yield_kwh = Some(y);
        }
        if let Some(pct) = self.self_old_pct {
            inst.self_old_pct = pct;
        }
        if let Some(pct) = self.self_new_pct {
            inst.self_new_pct = pct;
        }

        let eco = &mut cfg.economics;
        if let Some(price) = self.price {
            eco.price_per_kwh = price;
        }
        if let Some(cost) = self.install_cost {
            eco.install_cost = cost;
        }
        if let Some(inc) = self.price_inc {
            eco.price_increase_pct = inc;
        }
        if let Some(years) = self.lifespan {
            eco.lifespan_years = years;
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<CalculatorConfig> {
    // --scenario takes priority, then --preset, then the default preset
    let mut cfg = if let Some(ref path) = cli.scenario {
        CalculatorConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        CalculatorConfig::from_preset(name)?
    } else {
        CalculatorConfig::baseline()
    };
    cli.apply_overrides(&mut cfg);

    let errors = cfg.validate();
    if !errors.is_empty() {
        return Err(Error::Invalid(errors));
    }
    Ok(cfg)
}

fn run(cli: &Cli) -> Result<()> {
    let cfg = load_config(cli)?;

    #[cfg(feature = "tui")]
    if cli.tui {
        battery_payback::tui::run(cfg)?;
        return Ok(());
    }

    let (form, advisories) = cfg.to_form();
    for advisory in &advisories {
        warn!("{advisory}");
    }

    let input = form.input_set();
    let result = project(&input);
    let currency = &cfg.display.currency;

    match cli.format {
        OutputFormat::Text => println!("{}", render_report(&result, currency)),
        OutputFormat::Json => {
            let summary = Summary::from_result(&result);
            let report = ProjectionReport::new(&input, &summary, &advisories, &result);
            println!("{}", to_json(&report)?);
        }
    }

    if let Some(ref path) = cli.yearly_csv {
        export_yearly_csv(&result.yearly, path).map_err(|source| Error::Export {
            path: path.display().to_string(),
            source,
        })?;
    }
    if let Some(ref path) = cli.monthly_csv {
        export_monthly_csv(&result.monthly, path).map_err(|source| Error::Export {
            path: path.display().to_string(),
            source,
        })?;
    }

    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
