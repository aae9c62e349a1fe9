//! Statistics handler.

use sentra_core::{ActivityFeed, ActivityStats};

use crate::cli::{GlobalOpts, StatsArgs};
use crate::config::resolve_feed_config;
use crate::error::CliError;
use crate::output::{self, DailyRow};

pub async fn handle(args: StatsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = resolve_feed_config(global)?;
    config.auto_refresh = false;
    if let Some(days) = args.days {
        config.days = days;
    }

    let feed = ActivityFeed::new(config)?;
    let stats = feed.fetch_statistics().await?;

    let rendered = output::render_single(
        &global.output,
        &stats,
        format_stats,
        |s| s.total_activities.to_string(),
    );
    output::print_output(&rendered, global.quiet);

    Ok(())
}

fn format_stats(stats: &ActivityStats) -> String {
    let mut out = String::new();

    let dist = stats.status_distribution.unwrap_or_default();
    out.push_str(&format!(
        "Last {} days: {} activities · high {} · medium {} · low {}\n",
        stats.days_range, stats.total_activities, dist.high, dist.medium, dist.low,
    ));

    if let Some(db) = &stats.database_stats {
        out.push_str(&format!("Database total: {}\n", db.total));
    }

    if stats.daily_stats.is_empty() {
        out.push_str("No daily breakdown available.");
    } else {
        let rows: Vec<DailyRow> = stats.daily_stats.iter().map(DailyRow::from).collect();
        out.push_str(
            &tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string(),
        );
    }

    out
}
