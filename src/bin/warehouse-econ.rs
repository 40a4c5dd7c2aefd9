//! warehouse-econ CLI - command-line front end for the warehouse model
//!
//! ## Example Usage
//!
//! ```bash
//! # Full monthly report for a parameter file
//! warehouse-econ --config warehouse.toml report
//!
//! # Break-even storage fee, with one override
//! warehouse-econ --set salary_expense=300000 break-even --param storage_fee
//!
//! # Profit curve as JSON
//! warehouse-econ sensitivity --param loan_interest_rate --steps 50 --json
//!
//! # Rebalance shares after disabling VIP storage
//! warehouse-econ shares --disable vip --share storage=0.6
//! ```

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;
use warehouse_econ::allocation::{ShareSession, SpaceAllocation};
use warehouse_econ::analysis::{
    linspace, project, BreakEven, BreakEvenSolver, NotFoundReason, ProjectionGrowth,
    SensitivityScanner,
};
use warehouse_econ::config::{apply_overrides, load_parameters, parse_override};
use warehouse_econ::engine::FinancialEngine;
use warehouse_econ::finance::constants::{
    DEFAULT_EXPENSE_GROWTH, DEFAULT_INCOME_GROWTH, DEFAULT_SCAN_STEPS,
};
use warehouse_econ::params::{ParamKey, WarehouseParameters};
use warehouse_econ::report::evaluate;
use warehouse_econ::types::StorageType;

/// warehouse-econ: self-storage warehouse economics
#[derive(Parser)]
#[command(name = "warehouse-econ")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monthly economics model for self-storage warehouses", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Parameter file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override a parameter, e.g. --set storage_fee=1800
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Income, expenses, ratios and per-type breakdown
    Report,

    /// Find the value of a parameter at which profit is zero
    BreakEven {
        /// Parameter to solve for
        #[arg(short, long, conflicts_with = "storage_type")]
        param: Option<ParamKey>,

        /// Solve for the tariff of a storage type instead
        #[arg(short = 't', long)]
        storage_type: Option<StorageType>,

        /// Base value (defaults to the current parameter value)
        #[arg(short, long)]
        base: Option<f64>,
    },

    /// Sweep a parameter and report profit at each value
    Sensitivity {
        #[arg(short, long)]
        param: ParamKey,

        /// Number of samples
        #[arg(short = 'n', long, default_value_t = DEFAULT_SCAN_STEPS)]
        steps: usize,

        /// Sweep start (defaults to the parameter's standard range)
        #[arg(long, requires = "to")]
        from: Option<f64>,

        /// Sweep end
        #[arg(long, requires = "from")]
        to: Option<f64>,
    },

    /// Month-by-month projection over the planning horizon
    Project {
        /// Months to project (defaults to the risk time horizon)
        #[arg(short, long)]
        months: Option<u32>,

        /// Income growth across the horizon, as a fraction
        #[arg(long, default_value_t = DEFAULT_INCOME_GROWTH)]
        income_growth: f64,

        /// Expense growth across the horizon, as a fraction
        #[arg(long, default_value_t = DEFAULT_EXPENSE_GROWTH)]
        expense_growth: f64,
    },

    /// Edit storage shares the way an interactive session does
    Shares {
        /// Storage types to switch off, applied first
        #[arg(long, value_name = "TYPE")]
        disable: Vec<StorageType>,

        /// Share edits in order, e.g. --share storage=0.4
        #[arg(long = "share", value_name = "TYPE=FRACTION")]
        edits: Vec<String>,
    },
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".warehouse-econ").join("config.toml"))
}

fn load_base_parameters(path: Option<&Path>) -> anyhow::Result<WarehouseParameters> {
    if let Some(path) = path {
        return load_parameters(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()));
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            match load_parameters(&default_path) {
                Ok(params) => return Ok(params),
                Err(e) => eprintln!(
                    "{} Ignoring {}: {}",
                    "Warning:".yellow(),
                    default_path.display(),
                    e
                ),
            }
        }
    }

    Ok(WarehouseParameters::default())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let base = load_base_parameters(cli.config.as_deref())?;
    let overrides = cli
        .overrides
        .iter()
        .map(|arg| parse_override(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let params = apply_overrides(&base, &overrides);

    // stdout carries only the JSON document in --json mode
    if cli.verbose {
        eprintln!(
            "{} v{}",
            "warehouse-econ".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        for (key, value) in &overrides {
            eprintln!("  {} {} = {}", "Override:".bold(), key, value);
        }
        eprintln!();
    }

    match cli.command {
        Commands::Report => show_report(&params, cli.json),
        Commands::BreakEven {
            param,
            storage_type,
            base,
        } => {
            let key = match (param, storage_type) {
                (Some(key), _) => key,
                (None, Some(t)) => ParamKey::for_storage_type(t),
                (None, None) => ParamKey::StorageFee,
            };
            show_break_even(&params, key, base, cli.json)
        }
        Commands::Sensitivity {
            param,
            steps,
            from,
            to,
        } => show_sensitivity(&params, param, steps, from.zip(to), cli.json),
        Commands::Project {
            months,
            income_growth,
            expense_growth,
        } => show_projection(
            &params,
            months,
            ProjectionGrowth {
                income_growth,
                expense_growth,
            },
            cli.json,
        ),
        Commands::Shares { disable, edits } => show_shares(&params, &disable, &edits, cli.json),
    }
}

fn money(value: f64) -> String {
    let formatted = format!("{:>16.2}", value);
    if value < 0.0 {
        formatted.red().to_string()
    } else {
        formatted
    }
}

fn show_report(params: &WarehouseParameters, json: bool) -> anyhow::Result<()> {
    let report = evaluate(params)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Monthly summary".cyan().bold());
    for (label, value) in report.table(params) {
        println!("  {:<40} {}", label, money(value));
    }
    println!();

    println!("{}", "Income".cyan().bold());
    let f = &report.financials;
    let income_rows = [
        ("Storage", f.storage_income),
        ("Loans (after realization and default)", f.loan_income_after_realization),
        ("VIP", f.vip_income),
        ("Short-term", f.short_term_income),
        ("Realization", f.realization_income),
        ("Marketing", f.marketing_income),
    ];
    for (label, value) in income_rows {
        println!("  {:<40} {}", label, money(value));
    }
    println!();

    println!("{}", "Storage types".cyan().bold());
    println!(
        "  {:<20} {:>12} {:>12} {:>16} {:>16}",
        "Type".bold(),
        "Area m²".bold(),
        "Items".bold(),
        "Income".bold(),
        "Profit".bold()
    );
    for row in &report.breakdown {
        println!(
            "  {:<20} {:>12.2} {:>12.0} {:>16.2} {}",
            row.storage_type.label(),
            row.area,
            row.items,
            row.income,
            money(row.profit)
        );
    }

    if params.loans.loan_interest_rate <= 0.0 {
        println!();
        println!(
            "{} loan interest rate is zero; loans produce no income",
            "Warning:".yellow()
        );
    }
    Ok(())
}

fn show_break_even(
    params: &WarehouseParameters,
    key: ParamKey,
    base: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    params.validate()?;
    let base_value = base.unwrap_or_else(|| key.get(params));
    let search = BreakEvenSolver::default().search(params, key, base_value);

    if json {
        println!("{}", serde_json::to_string_pretty(&search)?);
        return Ok(());
    }

    let (lower, upper) = BreakEvenSolver::bracket(base_value);
    match &search.solved {
        BreakEven::Found { value, iterations } => {
            println!(
                "{} {} = {:.2} ({} iterations)",
                "Break-even:".green().bold(),
                key,
                value,
                iterations
            );
            return Ok(());
        }
        BreakEven::NotFound(NotFoundReason::DegenerateBase) => {
            println!(
                "{} base value of {} is zero; bisection skipped",
                "Not found:".yellow().bold(),
                key
            );
        }
        BreakEven::NotFound(NotFoundReason::NoSignChange {
            profit_lower,
            profit_upper,
        }) => {
            println!(
                "{} profit does not cross zero for {} in [{:.2}, {:.2}] (profit {:.2} .. {:.2})",
                "Not found:".yellow().bold(),
                key,
                lower,
                upper,
                profit_lower,
                profit_upper
            );
        }
        BreakEven::NotFound(reason) => {
            bail!("break-even search for {} failed: {:?}", key, reason);
        }
    }

    let (from, to) = key.default_scan_range(params);
    match search.grid_fallback {
        Some(value) => println!(
            "{} {} = {:.2} (grid over [{:.2}, {:.2}], {} steps)",
            "Grid break-even:".green(),
            key,
            value,
            from,
            to,
            DEFAULT_SCAN_STEPS
        ),
        None => println!(
            "{} profit does not turn non-negative over [{:.2}, {:.2}]",
            "Grid scan:".yellow(),
            from,
            to
        ),
    }
    Ok(())
}

fn show_sensitivity(
    params: &WarehouseParameters,
    key: ParamKey,
    steps: usize,
    range: Option<(f64, f64)>,
    json: bool,
) -> anyhow::Result<()> {
    params.validate()?;
    let curve = match range {
        Some((from, to)) => SensitivityScanner::scan(params, key, &linspace(from, to, steps)),
        None => SensitivityScanner::scan_default(params, key, steps),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
        return Ok(());
    }

    println!("{} {}", "Sensitivity of profit to".cyan().bold(), key);
    for point in &curve.points {
        match point.profit {
            Some(profit) => println!("  {:>14.4} {}", point.value, money(profit)),
            None => println!("  {:>14.4} {:>16}", point.value, "fault".red()),
        }
    }
    match curve.first_break_even() {
        Some(value) => println!("{} {:.4}", "First break-even on grid:".green(), value),
        None => println!("{}", "Profit does not turn non-negative on this grid".yellow()),
    }
    Ok(())
}

fn show_projection(
    params: &WarehouseParameters,
    months: Option<u32>,
    growth: ProjectionGrowth,
    json: bool,
) -> anyhow::Result<()> {
    params.validate()?;
    let result = FinancialEngine::compute(params).into_result()?;
    let months = months.unwrap_or_else(|| params.risk.effective().time_horizon);
    let rows = project(&result, months, growth);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "  {:>5} {:>16} {:>16} {:>16} {:>16}",
        "Month".bold(),
        "Income".bold(),
        "Expenses".bold(),
        "Profit".bold(),
        "Cumulative".bold()
    );
    for row in rows {
        println!(
            "  {:>5} {:>16.2} {:>16.2} {} {}",
            row.month,
            row.income,
            row.expenses,
            money(row.profit),
            money(row.cumulative_profit)
        );
    }
    Ok(())
}

fn parse_share_edit(arg: &str) -> anyhow::Result<(StorageType, f64)> {
    let Some((storage_type, value)) = arg.split_once('=') else {
        bail!("expected TYPE=FRACTION, got '{}'", arg);
    };
    let storage_type: StorageType = storage_type.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid share '{}'", value.trim()))?;
    Ok((storage_type, value))
}

fn show_shares(
    params: &WarehouseParameters,
    disable: &[StorageType],
    edits: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let mut session = ShareSession::new(params.shares);
    for storage_type in disable {
        session.disable(*storage_type);
    }
    for arg in edits {
        let (storage_type, value) = parse_share_edit(arg)?;
        session.set_share(storage_type, value);
    }

    let updated = WarehouseParameters {
        shares: *session.shares(),
        ..params.clone()
    };
    let space = SpaceAllocation::from_params(&updated);

    if json {
        println!("{}", serde_json::to_string_pretty(&space)?);
        return Ok(());
    }

    println!(
        "  {:<20} {:>8} {:>12} {:>12}",
        "Type".bold(),
        "Share".bold(),
        "Area m²".bold(),
        "Items".bold()
    );
    for (storage_type, share) in session.shares().iter() {
        println!(
            "  {:<20} {:>7.2}% {:>12.2} {:>12.0}",
            storage_type.label(),
            share * 100.0,
            space.areas[storage_type],
            space.items[storage_type]
        );
    }
    let unallocated = session.unallocated();
    if unallocated > 0.0 {
        println!(
            "{} {:.2}% of shelf area is unallocated",
            "Note:".yellow(),
            unallocated * 100.0
        );
    }
    Ok(())
}
