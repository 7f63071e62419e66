use crate::{DrawInteraction, DrawKind, Error, InteractionId, MapHandle};

/// Currently selected drawing mode. Changes only on explicit user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Plain click-to-mark.
    #[default]
    None,
    Point,
    Line,
    Polygon,
}

impl DrawMode {
    pub fn kind(self) -> Option<DrawKind> {
        match self {
            Self::None => None,
            Self::Point => Some(DrawKind::Point),
            Self::Line => Some(DrawKind::Line),
            Self::Polygon => Some(DrawKind::Polygon),
        }
    }
}

impl From<DrawKind> for DrawMode {
    fn from(kind: DrawKind) -> Self {
        match kind {
            DrawKind::Point => Self::Point,
            DrawKind::Line => Self::Line,
            DrawKind::Polygon => Self::Polygon,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveInteraction {
    kind: DrawKind,
    id: InteractionId,
}

/// Keeps at most one [`DrawInteraction`] attached to the map.
#[derive(Debug, Default)]
pub struct InteractionController {
    active: Option<ActiveInteraction>,
}

impl InteractionController {
    pub fn mode(&self) -> DrawMode {
        self.active
            .map(|active| active.kind.into())
            .unwrap_or_default()
    }

    /// Key of the attached interaction, if any.
    pub fn active(&self) -> Option<InteractionId> {
        self.active.map(|active| active.id)
    }

    /// Replace the attached interaction with a new one, drawing `kind` into the drawing layer.
    ///
    /// # Errors
    ///
    /// [`Error::NotMounted`] if `handle` was torn down.
    pub fn set_draw_mode(
        &mut self,
        handle: &mut MapHandle,
        kind: DrawKind,
    ) -> Result<InteractionId, Error> {
        if !handle.is_mounted() {
            return Err(Error::NotMounted);
        }

        self.detach(handle);

        let id = handle.add_interaction(DrawInteraction::new(kind, handle.drawing_layer()));
        self.active = Some(ActiveInteraction { kind, id });

        log::debug!("Draw mode is now {kind:?}.");
        Ok(id)
    }

    /// Go back to plain click-to-mark.
    pub fn stop_drawing(&mut self, handle: &mut MapHandle) {
        self.detach(handle);
        log::debug!("Drawing stopped.");
    }

    /// Drop the unfinished geometry of the attached interaction. Mode stays the same.
    pub fn abort_sketch(&self, handle: &mut MapHandle) {
        if let Some(interaction) = self.active().and_then(|id| handle.interaction_mut(id)) {
            interaction.abort();
        }
    }

    /// Forget the attached interaction, e.g. because its map is gone.
    pub fn reset(&mut self) {
        self.active = None;
    }

    fn detach(&mut self, handle: &mut MapHandle) {
        if let Some(active) = self.active.take() {
            if handle.remove_interaction(active.id).is_none() {
                log::warn!("{:?} was already detached.", active.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseLayer, MapConfig, MapEvent, lat_lon};

    fn mount() -> MapHandle {
        let config = MapConfig::default().with_base_layer(BaseLayer::None);
        MapHandle::mount(&egui::Context::default(), &config).unwrap()
    }

    #[test]
    fn nothing_is_active_initially() {
        let controller = InteractionController::default();
        assert_eq!(controller.mode(), DrawMode::None);
        assert_eq!(controller.active(), None);
    }

    #[test]
    fn swapping_leaves_exactly_one_interaction() {
        let mut handle = mount();
        let mut controller = InteractionController::default();

        let polygon = controller
            .set_draw_mode(&mut handle, DrawKind::Polygon)
            .unwrap();
        let line = controller
            .set_draw_mode(&mut handle, DrawKind::Line)
            .unwrap();

        assert_eq!(handle.interaction_count(), 1);
        assert!(handle.interaction(polygon).is_none());
        assert_eq!(handle.interaction(line).unwrap().kind(), DrawKind::Line);
        assert_eq!(controller.mode(), DrawMode::Line);
        assert_eq!(controller.active(), Some(line));
    }

    #[test]
    fn selecting_same_kind_starts_over() {
        let mut handle = mount();
        let mut controller = InteractionController::default();

        let first = controller
            .set_draw_mode(&mut handle, DrawKind::Line)
            .unwrap();
        handle.apply_interactions(&MapEvent::Click(lat_lon(0., 0.)));

        let second = controller
            .set_draw_mode(&mut handle, DrawKind::Line)
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(handle.interaction_count(), 1);
        assert!(handle.interaction(second).unwrap().sketch().is_empty());
    }

    #[test]
    fn stopping_detaches() {
        let mut handle = mount();
        let mut controller = InteractionController::default();

        controller
            .set_draw_mode(&mut handle, DrawKind::Point)
            .unwrap();
        controller.stop_drawing(&mut handle);

        assert_eq!(controller.mode(), DrawMode::None);
        assert_eq!(handle.interaction_count(), 0);
    }

    #[test]
    fn aborting_keeps_the_mode() {
        let mut handle = mount();
        let mut controller = InteractionController::default();

        let id = controller
            .set_draw_mode(&mut handle, DrawKind::Polygon)
            .unwrap();
        handle.apply_interactions(&MapEvent::Click(lat_lon(0., 0.)));
        controller.abort_sketch(&mut handle);

        assert_eq!(controller.mode(), DrawMode::Polygon);
        assert!(handle.interaction(id).unwrap().sketch().is_empty());
    }

    #[test]
    fn torn_down_map_cannot_draw() {
        let mut handle = mount();
        handle.teardown();

        let mut controller = InteractionController::default();
        assert_eq!(
            controller.set_draw_mode(&mut handle, DrawKind::Point),
            Err(Error::NotMounted)
        );
        assert_eq!(controller.mode(), DrawMode::None);
    }

    #[test]
    fn mode_and_kind_convert_both_ways() {
        for kind in DrawKind::ALL {
            assert_eq!(DrawMode::from(kind).kind(), Some(kind));
        }
        assert_eq!(DrawMode::None.kind(), None);
    }
}
