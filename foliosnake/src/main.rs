use foliosnake::SnakeApp;

fn main() -> eframe::Result<()> {
    let settings = foliocore::boot("foliosnake");

    let options = foliocore::native_options("Snake Game", [520.0, 760.0]);
    eframe::run_native("Snake Game", options, Box::new(move |cc| {
        foliocore::FolioTheme::default().apply(&cc.egui_ctx);
        Box::new(SnakeApp::new(&settings))
    }))
}
