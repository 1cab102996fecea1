//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use std::sync::Arc;

use tracing::info;
use tripfinder_config::Config;
use tripfinder_providers::provider_for_source;
use tripfinder_widget::{SearchWidget, SubmitOutcome, SystemClock};

mod info;
mod init;
mod interactive;
mod search;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use interactive::{InteractiveInput, InteractiveStrategy};
pub use search::{MAX_WATCH_SECS, SearchInput, SearchStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters are passed without boxing or runtime casting.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build a widget from config and load its dataset.
///
/// A failed load is not an error here: the widget keeps serving the
/// "not loaded" notice, exactly as it would for a searcher.
async fn load_widget(
    config: &Config,
    dataset_override: Option<String>,
) -> anyhow::Result<SearchWidget> {
    let source = dataset_override.unwrap_or_else(|| config.dataset.source.clone());
    info!("Dataset source: {source}");

    let provider = provider_for_source(&source, config.dataset.timeout())?;
    let mut widget = SearchWidget::new(config.search.limits())
        .with_clock(Arc::new(SystemClock), config.clock.refresh_interval());
    widget.load_from(provider.as_ref()).await;

    Ok(widget)
}

/// Print what a submit produced: a notice, or the current results surface.
fn print_outcome(widget: &SearchWidget, outcome: SubmitOutcome) {
    if let Some(notice) = outcome.notice() {
        eprintln!("⚠️  {notice}");
        return;
    }
    if outcome != SubmitOutcome::Ignored {
        println!("{}", widget.to_html());
    }
}
