//! Drawing interactions, which turn clicks into new features.

use geo_types::{Geometry, LineString, Polygon};

use crate::{LayerId, MapEvent, Position};

/// Kind of geometry produced by a [`DrawInteraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawKind {
    Point,
    Line,
    Polygon,
}

impl DrawKind {
    pub const ALL: [Self; 3] = [Self::Point, Self::Line, Self::Polygon];

    /// Text of the button which selects this kind.
    pub fn label(self) -> &'static str {
        match self {
            Self::Point => "Draw Point",
            Self::Line => "Draw Line",
            Self::Polygon => "Draw Polygon",
        }
    }

    /// Number of vertices needed to finish a sketch.
    fn min_vertices(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Line => 2,
            Self::Polygon => 3,
        }
    }
}

/// Key of an interaction attached to a [`crate::MapHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionId(pub(crate) u64);

/// Converts clicks into features of a single [`DrawKind`]. Points are produced on every click.
/// Lines and polygons collect vertices into a sketch, which gets finished by a double-click.
#[derive(Debug, Clone)]
pub struct DrawInteraction {
    kind: DrawKind,
    target: LayerId,
    sketch: Vec<Position>,
}

impl DrawInteraction {
    pub fn new(kind: DrawKind, target: LayerId) -> Self {
        Self {
            kind,
            target,
            sketch: Vec::new(),
        }
    }

    pub fn kind(&self) -> DrawKind {
        self.kind
    }

    /// Layer which receives the finished features.
    pub fn target(&self) -> LayerId {
        self.target
    }

    /// Vertices of the geometry being drawn.
    pub fn sketch(&self) -> &[Position] {
        &self.sketch
    }

    /// Feed an event, returning a geometry if it got finished.
    pub fn handle(&mut self, event: &MapEvent) -> Option<Geometry<f64>> {
        match (self.kind, event) {
            (DrawKind::Point, event) => Some(event.position().into()),
            (_, MapEvent::Click(position)) => {
                self.sketch.push(*position);
                None
            }
            (_, MapEvent::DoubleClick(_)) => self.finish(),
        }
    }

    /// Finish the sketch. Sketches with too few vertices are discarded.
    pub fn finish(&mut self) -> Option<Geometry<f64>> {
        let sketch = std::mem::take(&mut self.sketch);

        if sketch.len() < self.kind.min_vertices() {
            log::debug!(
                "Discarding {:?} sketch with {} vertices.",
                self.kind,
                sketch.len()
            );
            return None;
        }

        let line: LineString = sketch.into_iter().map(|position| position.0).collect();

        match self.kind {
            DrawKind::Point => line.points().next().map(Into::into),
            DrawKind::Line => Some(line.into()),
            DrawKind::Polygon => Some(Polygon::new(line, Vec::new()).into()),
        }
    }

    /// Throw away the sketch.
    pub fn abort(&mut self) {
        self.sketch.clear();
    }
}
