#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod component;
mod config;
mod controller;
mod coordinate;
mod error;
mod feature;
mod handle;
mod interaction;
mod layer;
mod plugins;

pub use component::MapComponent;
pub use config::{BaseLayer, MapConfig};
pub use controller::{DrawMode, InteractionController};
pub use coordinate::DisplayedCoordinate;
pub use error::Error;
pub use feature::{CircleStyle, Feature, FeatureStyle};
pub use handle::{MapEvent, MapHandle};
pub use interaction::{DrawInteraction, DrawKind, InteractionId};
pub use layer::{FeatureLayer, LayerId};
pub use walkers::{Position, lat_lon, lon_lat};
