use egui::Painter;
use walkers::Projector;

use crate::{Feature, FeatureStyle};

/// Typed handle to a [`FeatureLayer`] of a [`crate::MapHandle`]. Obtained once, when the map
/// is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) usize);

/// Mutable collection of features, rendered on top of the base tiles.
#[derive(Debug, Clone)]
pub struct FeatureLayer {
    name: &'static str,
    features: Vec<Feature>,
    default_style: FeatureStyle,
}

impl FeatureLayer {
    pub fn new(name: &'static str, default_style: FeatureStyle) -> Self {
        Self {
            name,
            features: Vec::new(),
            default_style,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn clear(&mut self) {
        log::trace!("Clearing {} features from '{}'.", self.features.len(), self.name);
        self.features.clear();
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Style used for features which do not have their own.
    pub fn default_style(&self) -> &FeatureStyle {
        &self.default_style
    }

    pub(crate) fn draw(&self, painter: &Painter, projector: &Projector) {
        for feature in &self.features {
            feature.draw(painter, projector, &self.default_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lat_lon;

    #[test]
    fn clearing_removes_all_features() {
        let mut layer = FeatureLayer::new("test", FeatureStyle::default());
        assert!(layer.is_empty());

        layer.add_feature(Feature::new(lat_lon(1., 1.)));
        layer.add_feature(Feature::new(lat_lon(2., 2.)));
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.features()[1].point(), Some(lat_lon(2., 2.)));

        layer.clear();
        assert!(layer.is_empty());
        assert_eq!(layer.name(), "test");
    }
}
