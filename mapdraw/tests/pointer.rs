use egui::{
    CentralPanel, Context, Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2, vec2,
};
use mapdraw::{BaseLayer, DrawKind, MapComponent, MapConfig, lat_lon};

/// Hosts a [`MapComponent`] in a headless egui context and feeds it pointer input, frame by
/// frame.
struct Surface {
    ctx: Context,
    time: f64,
    map_rect: Rect,
}

impl Surface {
    fn new(component: &mut MapComponent) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut surface = Self {
            ctx: Context::default(),
            time: 0.,
            map_rect: Rect::NOTHING,
        };

        // First frame mounts the map and lays it out.
        surface.frame(component, Vec::new());
        surface
    }

    fn frame(&mut self, component: &mut MapComponent, events: Vec<Event>) {
        self.time += 0.05;
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800., 600.))),
            time: Some(self.time),
            events,
            ..Default::default()
        };

        let _ = self.ctx.run(input, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                if let Some(response) = component.show(ui) {
                    self.map_rect = response.rect;
                }
            });
        });
    }

    fn button(&mut self, component: &mut MapComponent, pos: Pos2, pressed: bool) {
        let events = vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                modifiers: Modifiers::NONE,
            },
        ];
        self.frame(component, events);
    }

    fn click(&mut self, component: &mut MapComponent, offset: Vec2) {
        let pos = self.map_rect.center() + offset;
        self.button(component, pos, true);
        self.button(component, pos, false);
    }

    /// Let enough time pass for the next click not to form a double-click.
    fn pause(&mut self) {
        self.time += 1.;
    }
}

fn config() -> MapConfig {
    MapConfig::default().with_base_layer(BaseLayer::None)
}

fn marker_count(component: &MapComponent) -> usize {
    let handle = component.handle().unwrap();
    handle.layer(handle.marker_layer()).unwrap().len()
}

#[test]
fn click_at_center_of_default_view_marks_origin() {
    let mut component = MapComponent::new(config());
    let mut surface = Surface::new(&mut component);
    assert!(component.is_mounted());
    assert!(component.coordinate().is_none());

    surface.click(&mut component, Vec2::ZERO);

    let coordinate = component.coordinate().unwrap();
    assert_eq!(coordinate.latitude, "0.000000");
    assert_eq!(coordinate.longitude, "0.000000");
    assert_eq!(marker_count(&component), 1);
}

#[test]
fn view_starts_at_configured_center() {
    let mut component = MapComponent::new(config().with_center(lat_lon(10., 20.)));
    let mut surface = Surface::new(&mut component);

    surface.click(&mut component, Vec2::ZERO);

    let coordinate = component.coordinate().unwrap();
    assert_eq!(coordinate.latitude, "10.000000");
    assert_eq!(coordinate.longitude, "20.000000");
}

#[test]
fn double_click_on_surface_finishes_line() {
    let mut component = MapComponent::new(config());
    let mut surface = Surface::new(&mut component);
    component.set_draw_mode(DrawKind::Line).unwrap();

    surface.click(&mut component, vec2(-40., 0.));
    surface.pause();
    surface.click(&mut component, vec2(40., 0.));
    surface.click(&mut component, vec2(40., 0.));

    let handle = component.handle().unwrap();
    let drawings = handle.layer(handle.drawing_layer()).unwrap();
    assert_eq!(drawings.len(), 1);

    // The second click of the double-click does not add another vertex.
    let geo_types::Geometry::LineString(line) = drawings.features()[0].geometry() else {
        panic!("expected a line");
    };
    assert_eq!(line.0.len(), 2);
    assert_eq!(marker_count(&component), 1);
}

#[test]
fn dragging_the_map_does_not_mark() {
    let mut component = MapComponent::new(config());
    let mut surface = Surface::new(&mut component);
    let start = surface.map_rect.center();
    let end = start + vec2(50., 30.);

    surface.button(&mut component, start, true);
    surface.frame(&mut component, vec![Event::PointerMoved(end)]);
    surface.button(&mut component, end, false);

    assert!(component.coordinate().is_none());
    assert_eq!(marker_count(&component), 0);
}
