//! Pipeline entry points.
//!
//! - `run_harvest`: Fetch listing pages, download posters, save metadata
//! - `run_wall`: Compose downloaded posters into one image

pub mod harvest;
#[cfg(feature = "wall")]
pub mod wall;

pub use harvest::{HarvestPipeline, run_harvest};
#[cfg(feature = "wall")]
pub use wall::run_wall;
