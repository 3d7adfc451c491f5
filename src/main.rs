mod app;
mod engine;
mod model;

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "BBox Draw",
        native_options,
        Box::new(|cc| Ok(Box::new(app::BboxApp::new(cc)))),
    )
}
