use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;
use tripfinder_config::Config;

use super::{load_widget, print_outcome};

/// Longest watch the CLI accepts: one day.
pub const MAX_WATCH_SECS: u64 = 86_400;

/// Input parameters for the Search command strategy.
#[derive(Debug, Clone)]
pub struct SearchInput {
    /// Raw keyword as typed by the user
    pub keyword: String,
    /// Optional dataset path or URL override
    pub dataset: Option<String>,
    /// Keep the render alive and reprint it each second for this many seconds
    pub watch_secs: Option<u64>,
}

/// Strategy for a single search.
///
/// Loads the dataset, submits the keyword once and prints the rendered
/// surface. In watch mode the clocks keep ticking and the surface is
/// reprinted once per second.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

impl super::CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let mut widget = load_widget(&config, input.dataset).await?;

        let outcome = widget.submit(&input.keyword);
        print_outcome(&widget, outcome);

        let Some(watch_secs) = input.watch_secs else {
            return Ok(());
        };
        if widget.active_timers() == 0 {
            info!("No live clocks to watch");
            return Ok(());
        }

        let period = Duration::from_secs(1);
        let deadline = watch_deadline(Instant::now(), watch_secs);
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while ticker.tick().await < deadline {
            println!();
            println!("{}", widget.to_html());
        }

        widget.reset();
        Ok(())
    }
}

/// End of a watch starting at `start`, capped at [`MAX_WATCH_SECS`].
fn watch_deadline(start: Instant, watch_secs: u64) -> Instant {
    let span = Duration::from_secs(watch_secs.min(MAX_WATCH_SECS));
    start.checked_add(span).unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_start_plus_watch() {
        let start = Instant::now();
        assert_eq!(watch_deadline(start, 3), start + Duration::from_secs(3));
    }

    #[test]
    fn oversized_watch_is_capped() {
        let start = Instant::now();
        let cap = start + Duration::from_secs(MAX_WATCH_SECS);

        assert_eq!(watch_deadline(start, MAX_WATCH_SECS + 1), cap);
        assert_eq!(watch_deadline(start, u64::MAX), cap);
    }
}
