use mapdraw::{MapComponent, MapConfig};

/// Hosts a single map component, which can be unmounted and mounted again.
struct App {
    map: MapComponent,
    show_map: bool,
}

impl App {
    fn new() -> Self {
        Self {
            map: MapComponent::new(MapConfig::default()),
            show_map: true,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if ui.checkbox(&mut self.show_map, "Show map").changed() && !self.show_map {
                log::info!("Unmounting the map.");
                self.map.unmount();
            }

            if self.show_map {
                self.map.show(ui);
            }
        });
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    eframe::run_native(
        "mapdraw",
        Default::default(),
        Box::new(|_cc| Ok(Box::new(App::new()))),
    )
}
