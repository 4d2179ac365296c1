pub mod counters;
pub mod filter_panel;
