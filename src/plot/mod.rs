//! Terminal plotting for the CLI path.

pub mod ascii;

pub use ascii::render_balance_plot;
