//! Drawable geographic objects and the way they look.

use egui::{Color32, Mesh, Painter, Pos2, Shape, Stroke, pos2};
use geo_types::{Geometry, LineString, Polygon};
use lyon_path::Path;
use lyon_tessellation::math::point;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, TessellationError, VertexBuffers,
};
use walkers::Projector;

use crate::Position;

/// Circle drawn at the location of a point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircleStyle {
    pub radius: f32,
    pub fill: Color32,
    pub stroke: Stroke,
}

/// Visual style of a [`Feature`]. Points use [`FeatureStyle::circle`], lines use
/// [`FeatureStyle::stroke`], polygons are filled with [`FeatureStyle::fill`] and outlined with
/// [`FeatureStyle::stroke`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureStyle {
    pub circle: CircleStyle,
    pub stroke: Stroke,
    pub fill: Color32,
}

impl FeatureStyle {
    /// Style of the click marker: red dot with a white outline.
    pub fn marker() -> Self {
        Self {
            circle: CircleStyle {
                radius: 6.,
                fill: Color32::RED,
                stroke: Stroke::new(2., Color32::WHITE),
            },
            ..Default::default()
        }
    }
}

impl Default for FeatureStyle {
    fn default() -> Self {
        let blue = Color32::from_rgb(0x33, 0x99, 0xcc);

        Self {
            circle: CircleStyle {
                radius: 5.,
                fill: blue,
                stroke: Stroke::new(1.25, Color32::WHITE),
            },
            stroke: Stroke::new(2., blue),
            fill: Color32::WHITE.gamma_multiply(0.4),
        }
    }
}

/// Single geographic object, optionally with its own style.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: Geometry<f64>,
    style: Option<FeatureStyle>,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: geometry.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: FeatureStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    pub fn style(&self) -> Option<&FeatureStyle> {
        self.style.as_ref()
    }

    /// Location of the feature, if it is a point.
    pub fn point(&self) -> Option<Position> {
        match self.geometry {
            Geometry::Point(point) => Some(point),
            _ => None,
        }
    }

    /// Paint the feature, using `fallback` if it does not carry its own style.
    pub(crate) fn draw(&self, painter: &Painter, projector: &Projector, fallback: &FeatureStyle) {
        let style = self.style.as_ref().unwrap_or(fallback);

        match &self.geometry {
            Geometry::Point(point) => {
                draw_circle(painter, projector.project(*point).to_pos2(), style);
            }
            Geometry::LineString(line) => {
                painter.line(screen_points(line, projector), style.stroke);
            }
            Geometry::Polygon(polygon) => draw_polygon(painter, projector, polygon, style),
            other => log::debug!("Geometry {other:?} is not drawable."),
        }
    }
}

pub(crate) fn draw_circle(painter: &Painter, center: Pos2, style: &FeatureStyle) {
    painter.circle(
        center,
        style.circle.radius,
        style.circle.fill,
        style.circle.stroke,
    );
}

fn draw_polygon(painter: &Painter, projector: &Projector, polygon: &Polygon, style: &FeatureStyle) {
    let mut exterior = screen_points(polygon.exterior(), projector);

    // Exterior ring repeats its first point at the end.
    if exterior.len() > 1 && exterior.first() == exterior.last() {
        exterior.pop();
    }

    match fill_mesh(&exterior, style.fill) {
        Ok(mesh) => {
            painter.add(Shape::mesh(mesh));
        }
        Err(e) => log::warn!("Could not tessellate polygon: {e:?}."),
    }

    painter.add(Shape::closed_line(exterior, style.stroke));
}

pub(crate) fn screen_points(line: &LineString, projector: &Projector) -> Vec<Pos2> {
    line.points()
        .map(|point| projector.project(point).to_pos2())
        .collect()
}

/// Triangulate a ring given in screen coordinates. Concave rings are supported.
pub(crate) fn fill_mesh(ring: &[Pos2], color: Color32) -> Result<Mesh, TessellationError> {
    let mut builder = Path::builder();
    let mut points = ring.iter();

    if let Some(first) = points.next() {
        let _ = builder.begin(point(first.x, first.y));
        for p in points {
            let _ = builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }

    let mut buffers: VertexBuffers<Pos2, u32> = VertexBuffers::new();
    FillTessellator::new().tessellate_path(
        &builder.build(),
        &FillOptions::default(),
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex<'_>| {
            pos2(vertex.position().x, vertex.position().y)
        }),
    )?;

    let mut mesh = Mesh::default();
    for vertex in buffers.vertices {
        mesh.colored_vertex(vertex, color);
    }
    mesh.indices = buffers.indices;
    Ok(mesh)
}
