//! Watch mode: run the feed with auto-refresh and print snapshot updates.
//!
//! This is the dashboard's polling loop without the rendering — one
//! status line per settled update, until Ctrl-C.

use sentra_core::{ActivityFeed, FeedSnapshot};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::config::resolve_feed_config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = resolve_feed_config(global)?;
    config.auto_refresh = true;
    if let Some(days) = args.days {
        config.days = days;
    }
    if let Some(interval) = args.interval {
        config.refresh_interval = interval;
    }
    if let Some(status) = args.status {
        config.status_filter = Some(status.into());
    }
    if args.source.is_some() {
        config.source_filter = args.source.clone();
    }

    let interval = config.refresh_interval;
    let feed = ActivityFeed::start(config).await?;
    let color = output::should_color(&global.color);

    if !global.quiet {
        output::print_output(
            &format!(
                "Watching {} (every {}). Ctrl-C to stop.",
                feed.config().base_url,
                humantime::format_duration(interval),
            ),
            false,
        );
    }
    output::print_output(&status_line(&feed.snapshot(), color), global.quiet);

    let mut stream = feed.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            snap = stream.changed() => {
                let Some(snap) = snap else { break };
                // Only print settled states; every refresh produces a few
                // intermediate loading transitions.
                if snap.loading || snap.all_loading {
                    continue;
                }
                output::print_output(&status_line(&snap, color), global.quiet);
            }
        }
    }

    feed.shutdown().await;
    Ok(())
}

fn status_line(snap: &FeedSnapshot, color: bool) -> String {
    let now = chrono::Local::now().format("%H:%M:%S");

    if let Some(error) = &snap.error {
        return format!("{now}  fetch failed: {error}");
    }

    let dist = snap.status_distribution();
    format!(
        "{now}  {} activities · {} {} · {} {} · {} {}",
        snap.total_activities,
        output::severity_label(sentra_core::Severity::High, color),
        dist.high,
        output::severity_label(sentra_core::Severity::Medium, color),
        dist.medium,
        output::severity_label(sentra_core::Severity::Low, color),
        dist.low,
    )
}
