#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Search widget: renders match cards onto an owned results surface and keeps
//! a live local-time clock running for every card that carries a time zone.
//!
//! # Ownership
//! - [`ResultsPanel`] owns the cards; each time-bearing card owns its [`TimeNode`]
//! - [`ClockRefresher`] owns one [`ClockTask`] per node and only holds weak
//!   references to the nodes themselves
//! - [`SearchWidget`] owns the dataset state, the panel and the refresher

mod clock;
mod escape;
mod panel;
mod widget;

pub use clock::{
    ActiveTimers, ClockRefresher, ClockTask, SystemClock, TIME_PLACEHOLDER, TIME_UNAVAILABLE,
    TimeNode, WallClock, format_local_time,
};
pub use escape::escape_html;
pub use panel::{Card, EMPTY_STATE_HTML, ResultsPanel, Surface};
pub use widget::{DATA_UNAVAILABLE_NOTICE, DatasetState, SearchWidget, SubmitOutcome};
