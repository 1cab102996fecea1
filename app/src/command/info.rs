use tripfinder_config::Config;
use tripfinder_widget::DatasetState;

use super::load_widget;

/// Strategy for displaying configuration information.
///
/// Prints the effective configuration, then tries to load the dataset and
/// reports its status and collection sizes.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;

        println!("=== tripfinder Configuration ===\n");

        match Config::config_path() {
            Ok(path) if path.exists() => println!("Config File: {}", path.display()),
            Ok(path) => println!("Config File: {} (not found, using defaults)", path.display()),
            Err(e) => println!("Config File: unavailable ({e})"),
        }
        println!();

        println!("Dataset:");
        println!("  Source: {}", config.dataset.source);
        println!("  Timeout: {}s", config.dataset.timeout_secs);

        let widget = load_widget(&config, None).await?;
        match widget.dataset_state() {
            DatasetState::Ready(dataset) => {
                println!("  Status: Loaded");
                println!("  Beaches: {}", dataset.beaches.len());
                println!("  Temples: {}", dataset.temples.len());
                println!(
                    "  Countries: {} ({} cities)",
                    dataset.countries.len(),
                    dataset.city_count()
                );
            }
            DatasetState::Failed(e) => {
                println!("  Status: Load failed");
                println!("  Error: {e}");
            }
            DatasetState::Loading => println!("  Status: Not loaded"),
        }
        println!();

        println!("Search:");
        println!(
            "  Results Per Category: {}",
            config.search.results_per_category
        );
        println!("  Cities Per Country: {}", config.search.cities_per_country);
        println!();

        println!("Clock:");
        println!("  Refresh Interval: {}ms", config.clock.refresh_interval_ms);

        Ok(())
    }
}
