use egui::{Context, Response, Ui};
use walkers::sources::{Attribution, OpenStreetMap};
use walkers::{HttpTiles, Map, MapMemory, Tiles};

use crate::{
    BaseLayer, DrawInteraction, Error, Feature, FeatureLayer, FeatureStyle, InteractionId,
    LayerId, MapConfig, Position,
    plugins::{EventCapture, FeatureLayers, Sketches},
};

/// Input received from the map surface, already resolved to a geographical position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Click(Position),
    DoubleClick(Position),
}

impl MapEvent {
    pub fn position(&self) -> Position {
        match self {
            Self::Click(position) | Self::DoubleClick(position) => *position,
        }
    }
}

/// Live map instance: base tiles, view, feature layers and attached interactions. Created by
/// [`MapHandle::mount`] and released by [`MapHandle::teardown`], which also runs on drop.
pub struct MapHandle {
    egui_ctx: Context,

    /// `None` if the base layer is disabled or after teardown.
    tiles: Option<HttpTiles>,
    memory: MapMemory,

    /// Initial center of the view. Map follows it until it gets dragged.
    center: Position,

    layers: Vec<FeatureLayer>,
    marker_layer: LayerId,
    drawing_layer: LayerId,

    interactions: Vec<(InteractionId, DrawInteraction)>,
    next_interaction_id: u64,

    /// Whether the click listener is registered.
    listening: bool,

    /// Events captured by the surface, waiting for [`MapHandle::take_events`].
    events: Vec<MapEvent>,
}

impl MapHandle {
    /// Build the map for a surface living in `egui_ctx`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidZoom`] if the configured zoom is not supported.
    pub fn mount(egui_ctx: &Context, config: &MapConfig) -> Result<Self, Error> {
        let mut memory = MapMemory::default();
        memory.set_zoom(config.zoom)?;

        let tiles = match config.base_layer {
            BaseLayer::OpenStreetMap => Some(HttpTiles::new(OpenStreetMap, egui_ctx.to_owned())),
            BaseLayer::None => None,
        };

        let layers = vec![
            FeatureLayer::new("marker", FeatureStyle::marker()),
            FeatureLayer::new("drawings", config.drawing_style),
        ];

        log::debug!(
            "Mounting map at {:?}, zoom {}, base layer {:?}.",
            config.center,
            config.zoom,
            config.base_layer
        );

        Ok(Self {
            egui_ctx: egui_ctx.to_owned(),
            tiles,
            memory,
            center: config.center,
            layers,
            marker_layer: LayerId(0),
            drawing_layer: LayerId(1),
            interactions: Vec::new(),
            next_interaction_id: 0,
            listening: true,
            events: Vec::new(),
        })
    }

    /// Release everything owned by the map. Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.listening {
            return;
        }

        log::debug!(
            "Tearing down map, dropping {} pending events.",
            self.events.len()
        );

        self.listening = false;
        self.events.clear();
        self.interactions.clear();

        // Stops the IO thread.
        self.tiles = None;
    }

    /// Whether the map is live, i.e. not torn down.
    pub fn is_mounted(&self) -> bool {
        self.listening
    }

    pub fn marker_layer(&self) -> LayerId {
        self.marker_layer
    }

    pub fn drawing_layer(&self) -> LayerId {
        self.drawing_layer
    }

    pub fn layer(&self, id: LayerId) -> Option<&FeatureLayer> {
        self.layers.get(id.0)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut FeatureLayer> {
        self.layers.get_mut(id.0)
    }

    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &FeatureLayer)> {
        self.layers
            .iter()
            .enumerate()
            .map(|(idx, layer)| (LayerId(idx), layer))
    }

    /// Attach an interaction. It receives every event until removed.
    pub fn add_interaction(&mut self, interaction: DrawInteraction) -> InteractionId {
        let id = InteractionId(self.next_interaction_id);
        self.next_interaction_id += 1;

        log::debug!("Attaching {:?} interaction as {id:?}.", interaction.kind());
        self.interactions.push((id, interaction));
        id
    }

    /// Detach an interaction, returning it if it was attached.
    pub fn remove_interaction(&mut self, id: InteractionId) -> Option<DrawInteraction> {
        let idx = self
            .interactions
            .iter()
            .position(|(attached, _)| *attached == id)?;

        log::debug!("Detaching {id:?}.");
        Some(self.interactions.remove(idx).1)
    }

    pub fn interaction(&self, id: InteractionId) -> Option<&DrawInteraction> {
        self.interactions
            .iter()
            .find(|(attached, _)| *attached == id)
            .map(|(_, interaction)| interaction)
    }

    pub fn interaction_mut(&mut self, id: InteractionId) -> Option<&mut DrawInteraction> {
        self.interactions
            .iter_mut()
            .find(|(attached, _)| *attached == id)
            .map(|(_, interaction)| interaction)
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Let every attached interaction process the event, storing finished features in their
    /// target layers.
    pub fn apply_interactions(&mut self, event: &MapEvent) {
        for (id, interaction) in &mut self.interactions {
            if let Some(geometry) = interaction.handle(event) {
                match self.layers.get_mut(interaction.target().0) {
                    Some(layer) => layer.add_feature(Feature::new(geometry)),
                    None => log::warn!("{id:?} targets a layer which does not exist."),
                }
            }
        }
    }

    /// Queue an event as if it came from the surface. Ignored once the click listener is gone.
    pub fn push_event(&mut self, event: MapEvent) {
        if self.listening {
            self.events.push(event);
        } else {
            log::trace!("Map is torn down, ignoring {event:?}.");
        }
    }

    /// Events captured since the last call.
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        if self.listening {
            std::mem::take(&mut self.events)
        } else {
            Vec::new()
        }
    }

    pub fn request_repaint(&self) {
        self.egui_ctx.request_repaint();
    }

    pub fn memory(&self) -> &MapMemory {
        &self.memory
    }

    /// Attribution of the base layer, which should be displayed along with the map.
    pub fn attribution(&self) -> Option<Attribution> {
        self.tiles.as_ref().map(Tiles::attribution)
    }

    /// Draw the map, filling available width and `height` points vertically.
    pub fn show(&mut self, ui: &mut Ui, height: f32) -> Response {
        let Self {
            tiles,
            memory,
            center,
            layers,
            interactions,
            listening,
            events,
            ..
        } = self;

        let tiles = tiles.as_mut().map(|tiles| tiles as &mut dyn Tiles);
        let map = Map::new(tiles, memory, *center)
            .with_plugin(FeatureLayers::new(layers))
            .with_plugin(Sketches::new(interactions, layers))
            .with_plugin(EventCapture::new(events, *listening));

        ui.add_sized([ui.available_width(), height], map)
    }
}

impl Drop for MapHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
