//! foliocore: shared library for the folioOS desktop and its games

pub mod config;
pub mod layout;
pub mod logging;
pub mod repaint;
pub mod storage;
pub mod theme;
pub mod timer;
pub mod view;
pub mod widgets;
pub mod windows;

pub use config::Settings;
pub use repaint::RepaintController;
pub use theme::FolioTheme;
pub use timer::Ticker;
pub use windows::{Position, Size, WindowDescriptor, WindowEvent, WindowId, WindowManager, WindowRecord};

/// Load settings, then bring up logging and the panic hook. Problems found
/// while loading are logged once the subscriber exists.
pub fn boot(app: &'static str) -> Settings {
    let loaded = Settings::load();
    logging::init_logging(loaded.settings.log_filter.as_deref());
    logging::install_panic_hook(app);
    report_load_problems(app, &loaded);
    tracing::info!(event = "core.app.started", app, version = env!("CARGO_PKG_VERSION"));
    loaded.settings
}

fn report_load_problems(app: &str, loaded: &config::Loaded) {
    if let Some(e) = &loaded.parse_error {
        tracing::warn!(
            event = "core.config.parse_failed",
            app,
            path = %loaded.path.display(),
            error = %e,
            message = "using default settings"
        );
    }
    if let Some(e) = &loaded.env_error {
        tracing::warn!(event = "core.config.env_rejected", app, error = %e, message = "environment overrides ignored");
    }
}

/// Native window options shared by every folioOS binary.
pub fn native_options(title: &str, inner_size: [f32; 2]) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(inner_size)
            .with_min_inner_size([320.0, 480.0])
            .with_title(title),
        ..Default::default()
    }
}
