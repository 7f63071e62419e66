use egui::{Button, Color32, Context, Frame, Margin, Response, Stroke, Ui};

use crate::{
    DisplayedCoordinate, DrawKind, DrawMode, Error, Feature, FeatureStyle, InteractionController,
    MapConfig, MapHandle, Position,
};

/// Map with click-to-mark, drawing buttons and a coordinates panel.
///
/// The map itself is created lazily, the first time the component is shown, and released when
/// the component gets unmounted or dropped.
pub struct MapComponent {
    config: MapConfig,
    handle: Option<MapHandle>,
    controller: InteractionController,
    coordinate: Option<DisplayedCoordinate>,

    /// Set if mounting failed. It is not retried.
    mount_error: Option<Error>,
}

impl MapComponent {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            handle: None,
            controller: InteractionController::default(),
            coordinate: None,
            mount_error: None,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Create the map, unless it is already there.
    ///
    /// # Errors
    ///
    /// Whatever [`MapHandle::mount`] fails with.
    pub fn mount(&mut self, egui_ctx: &Context) -> Result<(), Error> {
        if self.handle.is_none() {
            self.handle = Some(MapHandle::mount(egui_ctx, &self.config)?);
        }
        Ok(())
    }

    /// Tear the map down and forget all transient state. Component can be mounted again, which
    /// gives a brand new map.
    pub fn unmount(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.teardown();
        }
        self.controller.reset();
        self.coordinate = None;
        self.mount_error = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.as_ref().is_some_and(MapHandle::is_mounted)
    }

    pub fn handle(&self) -> Option<&MapHandle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut MapHandle> {
        self.handle.as_mut()
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.controller.mode()
    }

    pub fn coordinate(&self) -> Option<&DisplayedCoordinate> {
        self.coordinate.as_ref()
    }

    /// Start drawing `kind`, replacing whatever was being drawn.
    ///
    /// # Errors
    ///
    /// [`Error::NotMounted`] if there is no map yet.
    pub fn set_draw_mode(&mut self, kind: DrawKind) -> Result<(), Error> {
        let handle = self.handle.as_mut().ok_or(Error::NotMounted)?;
        self.controller.set_draw_mode(handle, kind)?;
        Ok(())
    }

    /// Back to plain click-to-mark.
    pub fn stop_drawing(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            self.controller.stop_drawing(handle);
        }
    }

    /// Remove the marker and all drawings, and hide the coordinates. Draw mode stays as is.
    pub fn clear(&mut self) {
        self.coordinate = None;

        if let Some(handle) = self.handle.as_mut() {
            for id in [handle.marker_layer(), handle.drawing_layer()] {
                if let Some(layer) = handle.layer_mut(id) {
                    layer.clear();
                }
            }
            self.controller.abort_sketch(handle);
            handle.request_repaint();
        }
    }

    /// React to a click at `position`: show its coordinates and move the marker there.
    pub fn handle_click(&mut self, position: Position) {
        let Some(handle) = self.handle.as_mut().filter(|handle| handle.is_mounted()) else {
            log::trace!("Map is not mounted, ignoring click at {position:?}.");
            return;
        };

        self.coordinate = Some(DisplayedCoordinate::from_position(position));

        let marker_layer = handle.marker_layer();
        if let Some(layer) = handle.layer_mut(marker_layer) {
            layer.clear();
            layer.add_feature(Feature::new(position).with_style(FeatureStyle::marker()));
        }

        handle.request_repaint();
    }

    /// Dispatch events captured by the map: the marker follows every click, and the drawing
    /// interaction gets the same input.
    pub fn process_events(&mut self) {
        let Some(events) = self.handle.as_mut().map(MapHandle::take_events) else {
            return;
        };

        for event in events {
            self.handle_click(event.position());

            if let Some(handle) = self.handle.as_mut() {
                handle.apply_interactions(&event);
            }
        }
    }

    /// Show the map, the drawing controls and the coordinates panel. Mounts the map if needed.
    ///
    /// Returns the response of the map surface, or `None` if the map could not be mounted.
    pub fn show(&mut self, ui: &mut Ui) -> Option<Response> {
        if self.handle.is_none() && self.mount_error.is_none() {
            if let Err(e) = self.mount(ui.ctx()) {
                log::error!("Could not mount the map: {e}.");
                self.mount_error = Some(e);
            }
        }

        if let Some(e) = &self.mount_error {
            ui.colored_label(Color32::RED, format!("Map is unavailable: {e}."));
            return None;
        }

        let response = self.handle.as_mut().map(|handle| {
            let response = handle.show(ui, self.config.height);

            if let Some(attribution) = handle.attribution() {
                ui.horizontal(|ui| {
                    ui.label("map data ©");
                    ui.hyperlink_to(attribution.text, attribution.url);
                });
            }

            response
        });

        self.process_events();
        self.controls(ui);
        self.coordinates_panel(ui);

        response
    }

    fn controls(&mut self, ui: &mut Ui) {
        let mode = self.draw_mode();
        let mut selected = None;
        let mut clear = false;

        ui.horizontal(|ui| {
            for kind in DrawKind::ALL {
                let button = Button::new(kind.label()).selected(mode == kind.into());
                if ui.add(button).clicked() {
                    selected = Some(kind);
                }
            }

            clear = ui.button("Clear").clicked();
        });

        if let Some(kind) = selected {
            if let Err(e) = self.set_draw_mode(kind) {
                log::warn!("Could not switch to {kind:?}: {e}.");
            }
        }

        if clear {
            self.clear();
        }
    }

    fn coordinates_panel(&self, ui: &mut Ui) {
        let Some(coordinate) = &self.coordinate else {
            return;
        };

        Frame::new()
            .stroke(Stroke::new(1., ui.visuals().text_color()))
            .inner_margin(Margin::same(10))
            .show(ui, |ui| {
                ui.heading("Coordinates");
                ui.horizontal(|ui| {
                    ui.strong("Latitude:");
                    ui.label(&coordinate.latitude);
                });
                ui.horizontal(|ui| {
                    ui.strong("Longitude:");
                    ui.label(&coordinate.longitude);
                });
            });
    }
}
