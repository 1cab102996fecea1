use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tripfinder_config::Config;

use super::{load_widget, print_outcome};

const RESET_COMMAND: &str = ":reset";
const SHOW_COMMAND: &str = ":show";
const EXIT_COMMAND: &str = "exit";

/// Input parameters for the Interactive command strategy.
#[derive(Debug, Clone)]
pub struct InteractiveInput {
    /// Optional dataset path or URL override
    pub dataset: Option<String>,
}

/// Strategy for the interactive search prompt.
///
/// Every line is a submit. `:reset` clears the results and stops the clocks,
/// `:show` reprints the live results, `exit` quits. Clocks keep running while
/// the prompt waits for input.
#[derive(Debug, Clone, Copy)]
pub struct InteractiveStrategy;

impl super::CommandStrategy for InteractiveStrategy {
    type Input = InteractiveInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let mut widget = load_widget(&config, input.dataset).await?;

        println!(
            "tripfinder started. Type a keyword, '{SHOW_COMMAND}', '{RESET_COMMAND}' or '{EXIT_COMMAND}'.\n"
        );

        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match line.trim() {
                EXIT_COMMAND => break,
                RESET_COMMAND => widget.reset(),
                SHOW_COMMAND => println!("{}", widget.to_html()),
                _ => {
                    let outcome = widget.submit(&line);
                    print_outcome(&widget, outcome);
                }
            }
        }

        widget.reset();
        Ok(())
    }
}
