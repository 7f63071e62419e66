//! Walkers plugins used by [`crate::MapHandle`] to draw features and listen to the pointer.

use egui::{PointerButton, Response, Shape, Ui};
use walkers::{MapMemory, Plugin, Projector};

use crate::feature::{draw_circle, fill_mesh};
use crate::{DrawInteraction, DrawKind, FeatureLayer, InteractionId, MapEvent};

/// Records clicks as [`MapEvent`]s.
pub struct EventCapture<'a> {
    events: &'a mut Vec<MapEvent>,
    listening: bool,
}

impl<'a> EventCapture<'a> {
    pub fn new(events: &'a mut Vec<MapEvent>, listening: bool) -> Self {
        Self { events, listening }
    }
}

impl Plugin for EventCapture<'_> {
    fn run(
        self: Box<Self>,
        _ui: &mut Ui,
        response: &Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let Self { events, listening } = *self;

        if !listening || response.changed() {
            return;
        }

        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };

        let position = projector.unproject(pointer.to_vec2());

        // Second click of a double-click is reported only as a double-click.
        let event = if response.double_clicked_by(PointerButton::Primary) {
            MapEvent::DoubleClick(position)
        } else if response.clicked_by(PointerButton::Primary) {
            MapEvent::Click(position)
        } else {
            return;
        };

        log::trace!("Captured {event:?}.");
        events.push(event);
    }
}

/// Draws all feature layers, in order.
pub struct FeatureLayers<'a> {
    layers: &'a [FeatureLayer],
}

impl<'a> FeatureLayers<'a> {
    pub fn new(layers: &'a [FeatureLayer]) -> Self {
        Self { layers }
    }
}

impl Plugin for FeatureLayers<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let painter = ui.painter_at(response.rect);

        // Drawings go below the marker.
        for layer in self.layers.iter().rev() {
            layer.draw(&painter, projector);
        }
    }
}

/// Draws unfinished lines and polygons, following the pointer.
pub struct Sketches<'a> {
    interactions: &'a [(InteractionId, DrawInteraction)],
    layers: &'a [FeatureLayer],
}

impl<'a> Sketches<'a> {
    pub fn new(
        interactions: &'a [(InteractionId, DrawInteraction)],
        layers: &'a [FeatureLayer],
    ) -> Self {
        Self {
            interactions,
            layers,
        }
    }
}

impl Plugin for Sketches<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let painter = ui.painter_at(response.rect);
        let hover = response.hover_pos();

        for (_, interaction) in self.interactions {
            if interaction.sketch().is_empty() {
                continue;
            }

            let Some(layer) = self.layers.get(interaction.target().0) else {
                continue;
            };
            let style = layer.default_style();

            let vertices: Vec<_> = interaction
                .sketch()
                .iter()
                .map(|position| projector.project(*position).to_pos2())
                .collect();

            let mut outline = vertices.clone();
            outline.extend(hover);

            if interaction.kind() == DrawKind::Polygon && outline.len() >= 3 {
                if let Ok(mesh) = fill_mesh(&outline, style.fill) {
                    painter.add(Shape::mesh(mesh));
                }
                painter.add(Shape::closed_line(outline, style.stroke));
            } else {
                painter.line(outline, style.stroke);
            }

            for vertex in vertices {
                draw_circle(&painter, vertex, style);
            }
        }
    }
}
