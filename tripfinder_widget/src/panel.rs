//! Card renderer and the display surface it owns.

use std::sync::Arc;

use tracing::debug;
use tripfinder_core::MatchCard;

use crate::clock::{ClockRefresher, TimeNode};
use crate::escape::escape_html;

/// Markup shown when a search matched nothing.
pub const EMPTY_STATE_HTML: &str =
    "<p class=\"empty\">No results. Try “beach”, “temple”, or a country name.</p>";

/// One rendered result. Time-bearing cards own their clock node.
#[derive(Debug)]
pub struct Card {
    content: MatchCard,
    clock: Option<Arc<TimeNode>>,
}

impl Card {
    fn new(content: MatchCard) -> Self {
        let clock = content
            .time_zone
            .as_deref()
            .map(|tz| Arc::new(TimeNode::new(tz)));
        Self { content, clock }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.content.title
    }

    #[must_use]
    pub const fn clock(&self) -> Option<&Arc<TimeNode>> {
        self.clock.as_ref()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.content.title);
        let time = self.clock.as_ref().map_or_else(String::new, |node| {
            format!(
                "\n    <div class=\"time\" data-tz=\"{}\">Local time: <span>{}</span></div>",
                escape_html(node.time_zone()),
                escape_html(&node.text())
            )
        });

        format!(
            "<article class=\"card\">\n  <img src=\"{src}\" alt=\"{title}\" />\n  <div class=\"pad\">\n    <h3>{title}</h3>\n    <p>{desc}</p>{time}\n  </div>\n</article>",
            src = escape_html(&self.content.img),
            desc = escape_html(&self.content.desc),
        )
    }
}

/// What the results container currently shows.
#[derive(Debug, Default)]
pub enum Surface {
    #[default]
    Blank,
    NoResults,
    Cards(Vec<Card>),
}

/// The results container. Regenerated wholesale on every render or clear.
#[derive(Debug, Default)]
pub struct ResultsPanel {
    surface: Surface,
}

impl ResultsPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the surface with `matches`.
    ///
    /// Old clocks are cancelled and old cards dropped before anything new is
    /// built; clocks for the new time-bearing cards are started last.
    pub fn render(&mut self, matches: &[MatchCard], refresher: &mut ClockRefresher) {
        self.clear(refresher);

        if matches.is_empty() {
            self.surface = Surface::NoResults;
            return;
        }

        let cards: Vec<Card> = matches.iter().cloned().map(Card::new).collect();
        debug!("Rendering {} card(s)", cards.len());
        refresher.attach(cards.iter().filter_map(Card::clock));
        self.surface = Surface::Cards(cards);
    }

    /// Cancel every clock, then drop the displayed content.
    pub fn clear(&mut self, refresher: &mut ClockRefresher) {
        refresher.cancel_all();
        self.surface = Surface::Blank;
    }

    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match &self.surface {
            Surface::Cards(cards) => cards,
            Surface::Blank | Surface::NoResults => &[],
        }
    }

    #[must_use]
    pub const fn shows_no_results(&self) -> bool {
        matches!(self.surface, Surface::NoResults)
    }

    #[must_use]
    pub fn time_bearing_count(&self) -> usize {
        self.cards().iter().filter(|c| c.clock.is_some()).count()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        match &self.surface {
            Surface::Blank => String::new(),
            Surface::NoResults => EMPTY_STATE_HTML.to_string(),
            Surface::Cards(cards) => cards
                .iter()
                .map(Card::to_html)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
