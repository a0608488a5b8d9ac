//! folioOS: a résumé presented as a desktop
//!
//! Icons and a start menu open résumé sections and two games in windows
//! that can be dragged, maximized, minimized to the taskbar and closed.
//! Narrow screens get a single scrolling column instead.

mod catalog;
mod content;
mod desktop;
mod narrow;
mod start_menu;
mod taskbar;

use desktop::DesktopApp;

fn main() {
    let settings = foliocore::boot("foliodesktop");

    let mut options = foliocore::native_options("folioOS", [1280.0, 800.0]);
    options.viewport = options.viewport.with_maximized(true);

    let result = eframe::run_native(
        "folioOS",
        options,
        Box::new(move |cc| {
            foliocore::FolioTheme::default().apply(&cc.egui_ctx);
            Box::new(DesktopApp::new(settings))
        }),
    );

    match result {
        Ok(()) => tracing::info!(event = "desktop.app.exited"),
        Err(e) => {
            tracing::error!(event = "desktop.app.failed", error = %e);
            std::process::exit(1);
        }
    }
}
