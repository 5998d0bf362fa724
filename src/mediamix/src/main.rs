//! Media Mix Calculator: illustrative budget allocation estimates across
//! paid-media channels.
//!
//! Loads configuration, runs one calculation and prints or exports the plan.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mediamix_core::config::AppConfig;
use mediamix_core::{catalog, AudienceTarget, CampaignGoal, CampaignSettings, CampaignType};
use mediamix_planner::{MediaMixPlanner, MediaPlan, PlanRequest};
use mediamix_reporting::{MixSummary, SpreadsheetExporter, SpreadsheetRow, COLUMNS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "mediamix")]
#[command(about = "Media mix calculator with illustrative per-channel budget estimates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the channel catalog
    Channels {
        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Calculate a media plan for the selected channels
    Calculate {
        /// Comma-separated channel ids, e.g. search,ctv,tiktok
        #[arg(short, long, value_delimiter = ',', required = true)]
        channels: Vec<String>,

        /// Total budget in currency units
        #[arg(short, long)]
        budget: f64,

        /// Campaign goal: awareness, consideration, conversion (overrides config)
        #[arg(short, long, env = "MEDIAMIX__CALCULATOR__DEFAULT_GOAL")]
        goal: Option<String>,

        /// Campaign type: web_landing, mobile_app, cross_platform (overrides config)
        #[arg(long)]
        campaign_type: Option<String>,

        /// Audience target: broad, specific, custom (overrides config)
        #[arg(long)]
        audience: Option<String>,

        /// Duration in months (overrides config)
        #[arg(short, long)]
        duration: Option<u32>,

        /// Apply the automation bonus
        #[arg(long, default_value_t = false)]
        automated: bool,

        /// Seed for reproducible estimates
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for exports.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediamix=info,mediamix_planner=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    match cli.command {
        Commands::Channels { json } => print_channels(json)?,
        Commands::Calculate {
            channels,
            budget,
            goal,
            campaign_type,
            audience,
            duration,
            automated,
            seed,
            format,
            output,
        } => {
            let calc = &config.calculator;
            let goal: CampaignGoal = goal.as_deref().unwrap_or(&calc.default_goal).parse()?;
            let campaign_type: CampaignType = campaign_type
                .as_deref()
                .unwrap_or(&calc.default_campaign_type)
                .parse()?;
            let audience_target: AudienceTarget = audience
                .as_deref()
                .unwrap_or(&calc.default_audience_target)
                .parse()?;

            let request = PlanRequest {
                channel_ids: channels,
                budget,
                goal,
                settings: CampaignSettings {
                    campaign_type,
                    audience_target,
                    duration_months: duration.unwrap_or(calc.default_duration_months),
                    is_automated: automated,
                },
            };

            info!(
                channels = request.channel_ids.len(),
                budget = request.budget,
                goal = %request.goal,
                seeded = seed.is_some(),
                "Calculating media plan"
            );

            let planner = MediaMixPlanner::new(config.calculator.clone());
            let plan = match seed {
                Some(seed) => planner.plan_with_rng(request, &mut StdRng::seed_from_u64(seed))?,
                None => planner.plan(request).await?,
            };

            let exporter = SpreadsheetExporter::new(&config.export);
            let rendered = match format {
                OutputFormat::Table => render_table(&plan, &exporter)?,
                OutputFormat::Csv => exporter.export_csv(&plan.entries)?,
                OutputFormat::Json => exporter.export_json(&plan.entries)?,
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!(path = %path.display(), plan_id = %plan.id, "Plan exported");
                }
                None => print!("{rendered}"),
            }
        }
    }

    Ok(())
}

fn print_channels(json: bool) -> anyhow::Result<()> {
    let channels = catalog();
    if json {
        println!("{}", serde_json::to_string_pretty(&channels)?);
        return Ok(());
    }
    for channel in &channels {
        println!("{:<14} {:<22} {}", channel.id, channel.name, channel.description);
    }
    Ok(())
}

fn render_table(plan: &MediaPlan, exporter: &SpreadsheetExporter) -> anyhow::Result<String> {
    let rows = exporter.rows(&plan.entries)?;
    let widths = column_widths(&rows);

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths.iter().copied())
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    for row in &rows {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .zip(widths.iter().copied())
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    let summary = MixSummary::from_mix(&plan.entries);
    out.push_str(&format!(
        "\nEstimated impressions: {}  clicks: {}  conversions: {}\n",
        summary.total_impressions, summary.total_clicks, summary.total_conversions
    ));

    if !plan.insights.is_empty() {
        out.push_str("\nInsights:\n");
        for insight in &plan.insights {
            out.push_str(&format!("  - {insight}\n"));
        }
    }
    Ok(out)
}

fn column_widths(rows: &[SpreadsheetRow]) -> Vec<usize> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r.cells()[i].chars().count())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}
