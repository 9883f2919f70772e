//! Agency Desk CLI
//!
//! Command-line reports over a customers.csv / policies.csv snapshot

use agency_desk::aggregation::{
    customer_overview, hazards_for_state, suggested_outreach, EXPIRING_SOON_DAYS, OUTREACH_LIMIT,
    TOP_STATE_LIMIT,
};
use agency_desk::format::{format_date, format_phone};
use agency_desk::snapshot::DEFAULT_DATA_PATH;
use agency_desk::{generate_quote, DashboardConfig, Snapshot, SnapshotRunner};
use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "agency_desk", version, about = "Insurance agency back-office reports")]
struct Cli {
    /// Directory holding customers.csv and policies.csv
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Evaluate renewals as of midnight UTC on this date instead of now
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Book totals and the top states by premium
    Dashboard {
        /// Expiring-soon window in days
        #[arg(long, default_value_t = EXPIRING_SOON_DAYS)]
        expiring_days: i64,

        /// Number of states to rank
        #[arg(long, default_value_t = TOP_STATE_LIMIT)]
        top: usize,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Policies closest to renewal
    Outreach {
        #[arg(long, default_value_t = OUTREACH_LIMIT)]
        limit: usize,
    },
    /// Customers matching a name, phone number or policy number
    Search { query: String },
    /// Propose a premium for a policy type
    Quote {
        #[arg(long, default_value = "Auto")]
        policy_type: String,
    },
}

fn load(dir: &Path) -> Result<Snapshot> {
    Snapshot::load_from(dir).map_err(|e| anyhow!("Failed to load snapshot from {}: {}", dir.display(), e))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let now: DateTime<Utc> = match cli.as_of {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    match cli.command {
        Command::Dashboard { expiring_days, top, json } => {
            let snapshot = load(&cli.data)?;
            let runner = SnapshotRunner::with_config(DashboardConfig {
                expiring_soon_days: expiring_days,
                top_state_limit: top,
                ..Default::default()
            });
            let summary = runner.summarize(&snapshot, now);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("Agency Dashboard (as of {})", now.format("%Y-%m-%d"));
            println!("{}", "=".repeat(40));
            println!("  Total Customers:        {}", summary.customer_count);
            println!("  Total Policies:         {}", summary.policy_count);
            println!("  Total Premium:          ${:.2}", summary.total_premium);
            println!("  Expiring in {:>3} Days:   {}", expiring_days, summary.expiring_soon);
            println!("  Avg. Policy Premium:    ${:.2}", summary.average_premium);
            println!("  Revenue Forecast:       ${:.2}", summary.revenue_forecast);

            let orphans = snapshot.orphaned_policies().len();
            if orphans > 0 {
                println!("  ({} policies reference missing customers)", orphans);
            }

            println!("\nTop {} States by Total Premium:", top);
            println!("{:>4} {:>6} {:>8} {:>14} {:>9}  {}", "Rank", "State", "Policies", "Premium", "Exposure", "Hazards");
            println!("{}", "-".repeat(64));
            if summary.top_states.is_empty() {
                println!("  No data available");
            }
            for (idx, state) in summary.top_states.iter().enumerate() {
                let hazards: Vec<_> = state.hazards.iter().map(|h| h.as_str()).collect();
                println!(
                    "{:>4} {:>6} {:>8} {:>14.2} {:>9}  {}",
                    idx + 1,
                    state.state,
                    state.policy_count,
                    state.total_premium,
                    state.exposure,
                    hazards.join(", "),
                );
            }
        }

        Command::Outreach { limit } => {
            let snapshot = load(&cli.data)?;
            let entries = suggested_outreach(&snapshot.policies, now, limit);

            println!("Suggested Outreach ({} of {} policies):", entries.len(), snapshot.policies.len());
            println!("{:>12} {:>8} {:>12} {:>12} {:>6}", "Policy", "Type", "Premium", "Expires", "Days");
            println!("{}", "-".repeat(56));
            for entry in &entries {
                println!(
                    "{:>12} {:>8} {:>12.2} {:>12} {:>6}",
                    entry.policy.policy_number,
                    entry.policy.policy_type,
                    entry.policy.premium_amount(),
                    format_date(entry.policy.expiration_date),
                    entry.days_until_renewal,
                );
            }
        }

        Command::Search { query } => {
            let snapshot = load(&cli.data)?;
            let rows = customer_overview(&snapshot.customers, &snapshot.policies, &query);

            println!("Showing {} of {} customers", rows.len(), snapshot.customers.len());
            for row in &rows {
                let hazards: Vec<_> = hazards_for_state(&row.customer.state)
                    .iter()
                    .map(|h| h.description())
                    .collect();
                println!(
                    "  #{:<5} {:<28} {:<14} {:<4} {:>3} policies  ${:.2}  {}",
                    row.customer.customer_id,
                    row.customer.full_name(),
                    format_phone(&row.customer.phone),
                    row.customer.state.to_uppercase(),
                    row.policy_count,
                    row.total_premium,
                    hazards.join("; "),
                );
            }
        }

        Command::Quote { policy_type } => {
            let quote = generate_quote(&policy_type, &mut rand::thread_rng());
            println!("{} quote", quote.policy_type);
            println!("  Base Premium:     ${:.2}", quote.base_premium);
            println!("  Discount:         ${:.2}", quote.discount);
            println!("  Proposed Premium: ${:.2}", quote.proposed_premium);
        }
    }

    Ok(())
}
