//! geopath CLI library.
//!
//! Terminal styling and output renderers shared by the `geopath` binary.

pub mod output;
pub mod terminal;
