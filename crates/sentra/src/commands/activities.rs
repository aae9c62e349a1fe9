//! Activity listing handler.

use sentra_core::ActivityFeed;

use crate::cli::{ActivitiesArgs, GlobalOpts, OutputFormat};
use crate::config::resolve_feed_config;
use crate::error::CliError;
use crate::output::{self, ActivityRow};

pub async fn handle(args: ActivitiesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = resolve_feed_config(global)?;
    config.auto_refresh = false;
    if let Some(days) = args.days {
        config.days = days;
    }
    if let Some(limit) = args.limit {
        config.page_size = limit;
    }
    if let Some(status) = args.status {
        config.status_filter = Some(status.into());
    }
    if args.source.is_some() {
        config.source_filter = args.source.clone();
    }

    let feed = ActivityFeed::new(config)?;
    feed.refresh().await;
    check_feed_error(&feed)?;

    // The first page teaches us the totals; only then can a deeper page
    // request be bounds-checked.
    if args.page > 1 {
        let total_pages = feed.snapshot().total_pages;
        if args.page > total_pages {
            return Err(CliError::Validation {
                field: "page".into(),
                reason: format!("page {} is out of range ({total_pages} pages)", args.page),
            });
        }
        feed.go_to_page(args.page).await;
        check_feed_error(&feed)?;
    }

    let snap = feed.snapshot();
    let color = output::should_color(&global.color);

    let rendered = output::render_list(
        &global.output,
        snap.activities.as_slice(),
        |a| ActivityRow::from_activity(a, color),
        |a| a.id.to_string(),
    );
    output::print_output(&rendered, global.quiet);

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let counts = snap.page_stats.unwrap_or_default();
        let source = snap.page_source.as_deref().unwrap_or("unknown");
        output::print_output(
            &format!(
                "Page {}/{} · {} activities · high {} · medium {} · low {} · source: {source}",
                snap.current_page,
                snap.total_pages,
                snap.total_activities,
                counts.high,
                counts.medium,
                counts.low,
            ),
            false,
        );
    }

    Ok(())
}

fn check_feed_error(feed: &ActivityFeed) -> Result<(), CliError> {
    if let Some(message) = feed.snapshot().error {
        return Err(CliError::ApiError {
            message,
            status: None,
        });
    }
    Ok(())
}
