//! Responsive placement
//!
//! Stored geometry lives in the window registry. What is drawn is derived
//! from it every frame using the live viewport and a device class, so a
//! viewport resize never moves a window the user has not touched.

use crate::windows::{Position, Size};

/// Height reserved at the bottom of the screen for the taskbar.
pub const TASKBAR_HEIGHT: f32 = 48.0;

/// Usability floor for desktop-class windows.
pub const MIN_WINDOW_WIDTH: f32 = 320.0;
pub const MIN_WINDOW_HEIGHT: f32 = 240.0;

/// Current drawable area in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Not yet measured.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::from_width(self.width)
    }
}

impl From<egui::Rect> for Viewport {
    fn from(rect: egui::Rect) -> Self {
        Self::new(rect.width(), rect.height())
    }
}

/// Width tier governing margins and scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Narrow,
    Tablet,
    WideTablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f32) -> Self {
        if width < 640.0 {
            DeviceClass::Narrow
        } else if width < 768.0 {
            DeviceClass::Tablet
        } else if width < 1024.0 {
            DeviceClass::WideTablet
        } else {
            DeviceClass::Desktop
        }
    }

    /// Phones and small tablets get the single-column résumé instead of
    /// the desktop shell.
    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceClass::Narrow | DeviceClass::Tablet)
    }
}

/// Size actually drawn for a window with `stored` size.
pub fn responsive_size(stored: Size, viewport: Viewport, fullscreen: bool) -> Size {
    if fullscreen {
        return Size::new(viewport.width, viewport.height - TASKBAR_HEIGHT);
    }
    if viewport.is_empty() {
        return stored;
    }

    let (w, h) = (viewport.width, viewport.height);
    match viewport.device_class() {
        DeviceClass::Narrow => Size::new(w - 16.0, h - 80.0),
        DeviceClass::Tablet => Size::new((w - 32.0).min(stored.width), (h - 100.0).min(stored.height)),
        DeviceClass::WideTablet => Size::new(
            (w - 64.0).min(stored.width * 0.95),
            (h - 120.0).min(stored.height * 0.9),
        ),
        DeviceClass::Desktop => Size::new(
            stored.width.min(w - 80.0).max(MIN_WINDOW_WIDTH),
            stored.height.min(h - 120.0).max(MIN_WINDOW_HEIGHT),
        ),
    }
}

/// Top-left corner actually drawn for a window at `position` with the
/// already-responsive `size`.
pub fn responsive_position(position: Position, size: Size, viewport: Viewport, fullscreen: bool) -> Position {
    if fullscreen {
        return Position::ORIGIN;
    }
    if viewport.device_class() == DeviceClass::Narrow {
        let y = ((viewport.height - size.height - TASKBAR_HEIGHT) / 4.0).max(8.0);
        return Position::new(8.0, y);
    }
    // Lower bound applied last: an oversized window pins to the origin.
    Position::new(
        position.x.min(viewport.width - size.width).max(0.0),
        position.y.min(viewport.height - size.height - TASKBAR_HEIGHT).max(0.0),
    )
}

/// Keep a dragged window fully above the taskbar.
pub fn clamp_drag(candidate: Position, window: Size, viewport: Viewport) -> Position {
    let max_x = (viewport.width - window.width).max(0.0);
    let max_y = (viewport.height - window.height - TASKBAR_HEIGHT).max(0.0);
    Position::new(candidate.x.clamp(0.0, max_x), candidate.y.clamp(0.0, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_class_breakpoints() {
        assert_eq!(DeviceClass::from_width(320.0), DeviceClass::Narrow);
        assert_eq!(DeviceClass::from_width(639.9), DeviceClass::Narrow);
        assert_eq!(DeviceClass::from_width(640.0), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_width(768.0), DeviceClass::WideTablet);
        assert_eq!(DeviceClass::from_width(1024.0), DeviceClass::Desktop);
        assert!(DeviceClass::Tablet.is_mobile());
        assert!(!DeviceClass::WideTablet.is_mobile());
    }

    #[test]
    fn test_fullscreen_fills_above_taskbar() {
        let vp = Viewport::new(1280.0, 800.0);
        let size = responsive_size(Size::new(500.0, 400.0), vp, true);
        assert_eq!(size, Size::new(1280.0, 752.0));
        assert_eq!(responsive_position(Position::new(90.0, 90.0), size, vp, true), Position::ORIGIN);
    }

    #[test]
    fn test_unmeasured_viewport_uses_stored_size() {
        let stored = Size::new(500.0, 400.0);
        assert_eq!(responsive_size(stored, Viewport::default(), false), stored);
    }

    #[test]
    fn test_tier_sizes() {
        let stored = Size::new(800.0, 600.0);
        assert_eq!(responsive_size(stored, Viewport::new(400.0, 700.0), false), Size::new(384.0, 620.0));
        assert_eq!(responsive_size(stored, Viewport::new(700.0, 600.0), false), Size::new(668.0, 500.0));
        let wide = responsive_size(stored, Viewport::new(900.0, 900.0), false);
        assert_eq!(wide, Size::new(760.0, 540.0));
        assert_eq!(responsive_size(stored, Viewport::new(1920.0, 1080.0), false), stored);
    }

    #[test]
    fn test_desktop_floor() {
        let tiny = Size::new(100.0, 100.0);
        let size = responsive_size(tiny, Viewport::new(1100.0, 300.0), false);
        assert_eq!(size, Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn test_position_clamped_into_viewport() {
        let vp = Viewport::new(1280.0, 800.0);
        let size = Size::new(500.0, 400.0);
        let pos = responsive_position(Position::new(2000.0, 2000.0), size, vp, false);
        assert_eq!(pos, Position::new(780.0, 352.0));
        let pos = responsive_position(Position::new(-40.0, -5.0), size, vp, false);
        assert_eq!(pos, Position::ORIGIN);
    }

    #[test]
    fn test_narrow_position_is_pinned_left() {
        let vp = Viewport::new(400.0, 700.0);
        let size = responsive_size(Size::new(500.0, 400.0), vp, false);
        let pos = responsive_position(Position::new(250.0, 180.0), size, vp, false);
        assert_eq!(pos.x, 8.0);
        assert_eq!(pos.y, 8.0);
    }

    #[test]
    fn test_clamp_drag_bounds() {
        let vp = Viewport::new(1280.0, 800.0);
        let win = Size::new(500.0, 400.0);
        assert_eq!(clamp_drag(Position::new(-100.0, -100.0), win, vp), Position::ORIGIN);
        assert_eq!(clamp_drag(Position::new(5000.0, 5000.0), win, vp), Position::new(780.0, 352.0));
        assert_eq!(clamp_drag(Position::new(100.0, 100.0), win, vp), Position::new(100.0, 100.0));
    }

    #[test]
    fn test_clamp_drag_when_window_larger_than_viewport() {
        let vp = Viewport::new(300.0, 200.0);
        let win = Size::new(500.0, 400.0);
        assert_eq!(clamp_drag(Position::new(40.0, 40.0), win, vp), Position::ORIGIN);
    }
}
