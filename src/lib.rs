//! Render ROFF manual pages from a structured description of a
//! command-line interface.
//!
//! The description is an immutable [`spec::CliSpec`] tree; rendering is a
//! pure walk over it that produces one `man(7)` document.

pub mod config;
pub mod render;
pub mod spec;

pub use config::{MarkupMode, RenderConfig};
pub use render::{render, render_man_page, RenderSummary, RenderedManPage};
pub use spec::CliSpec;
