use crate::{FeatureStyle, Position, lat_lon};

/// Tiles displayed below the features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseLayer {
    /// <https://www.openstreetmap.org/about>
    #[default]
    OpenStreetMap,

    /// No tiles at all, only the features. Nothing gets downloaded.
    None,
}

/// Settings of a [`crate::MapComponent`], read when the map gets mounted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    /// Initial center of the view.
    pub center: Position,

    /// Initial zoom level.
    pub zoom: f64,

    pub base_layer: BaseLayer,

    /// Height of the map surface. It always takes the full width.
    pub height: f32,

    /// Style of features created by drawing interactions.
    pub drawing_style: FeatureStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: lat_lon(0., 0.),
            zoom: 2.,
            base_layer: BaseLayer::default(),
            height: 400.,
            drawing_style: FeatureStyle::default(),
        }
    }
}

impl MapConfig {
    /// Start the view at `center` instead of the origin.
    pub fn with_center(mut self, center: Position) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_base_layer(mut self, base_layer: BaseLayer) -> Self {
        self.base_layer = base_layer;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Style used for points, lines and polygons drawn by the user.
    pub fn with_drawing_style(mut self, style: FeatureStyle) -> Self {
        self.drawing_style = style;
        self
    }
}
