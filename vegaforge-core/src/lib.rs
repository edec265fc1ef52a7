#[macro_use]
extern crate lazy_static;

pub mod compile;
pub mod constants;
pub mod options;
pub mod spec;

pub use compile::chart::build_chart_spec;
pub use vegaforge_common::error::{Result, VegaForgeError};
