//! Per-window interaction state
//!
//! A [`WindowView`] turns pointer input on one window into manager calls.
//! It owns only transient state: an in-progress drag, the fullscreen flag
//! and the geometry snapshot taken when entering fullscreen. Stored geometry
//! is written back to the registry only when a drag ends or fullscreen is
//! left.
//!
//! Views live exactly as long as their window has a surface. [`ViewSet`]
//! drops the view of a window that was closed or minimized, cancelling any
//! drag it was part of, so no drag session outlives its window.

use crate::layout::{clamp_drag, responsive_position, responsive_size, Viewport};
use crate::windows::{Position, Size, WindowId, WindowManager, WindowRecord};
use std::collections::HashMap;

/// Pointer captured on the header between pointer-down and pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Pointer position relative to the window's top-left corner.
    pub offset: Position,
}

/// Placement remembered when going fullscreen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub position: Position,
    pub size: Size,
}

#[derive(Debug)]
pub struct WindowView {
    id: WindowId,
    /// Local position: the live drag candidate while dragging, otherwise the
    /// last committed position.
    position: Position,
    drag: Option<DragSession>,
    fullscreen: bool,
    previous: Option<Snapshot>,
}

impl WindowView {
    pub fn new<C>(record: &WindowRecord<C>) -> Self {
        Self {
            id: record.id.clone(),
            position: record.position,
            drag: None,
            fullscreen: false,
            previous: None,
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Pointer pressed on the header. `origin` is where the window is drawn
    /// right now. Returns whether a drag started.
    pub fn pointer_down<C>(&mut self, pointer: Position, origin: Position, manager: &mut WindowManager<C>) -> bool {
        if self.fullscreen {
            return false;
        }
        self.drag = Some(DragSession {
            offset: Position::new(pointer.x - origin.x, pointer.y - origin.y),
        });
        manager.focus(&self.id);
        true
    }

    /// Pointer moved anywhere on screen. Ignored unless dragging.
    pub fn pointer_move(&mut self, pointer: Position, window: Size, viewport: Viewport) {
        let Some(session) = self.drag else {
            return;
        };
        if self.fullscreen || viewport.is_empty() {
            return;
        }
        let candidate = Position::new(pointer.x - session.offset.x, pointer.y - session.offset.y);
        self.position = clamp_drag(candidate, window, viewport);
    }

    /// Pointer released: end the drag and commit the clamped position.
    pub fn pointer_up<C>(&mut self, manager: &mut WindowManager<C>) {
        if self.drag.take().is_some() {
            manager.update_position(&self.id, self.position);
        }
    }

    /// Drop an in-progress drag without committing anything.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Header double-click or maximize button.
    pub fn toggle_fullscreen<C>(&mut self, stored_size: Size, manager: &mut WindowManager<C>) {
        if self.fullscreen {
            self.fullscreen = false;
            if let Some(previous) = self.previous.take() {
                self.position = previous.position;
                manager.update_position(&self.id, previous.position);
            }
        } else {
            self.drag = None;
            self.previous = Some(Snapshot {
                position: self.position,
                size: stored_size,
            });
            self.fullscreen = true;
            self.position = Position::ORIGIN;
        }
    }

    /// Pointer pressed anywhere in the window.
    pub fn click_body<C>(&self, manager: &mut WindowManager<C>) {
        manager.focus(&self.id);
    }

    /// Where and how big the window is drawn this frame.
    pub fn placement(&self, stored_size: Size, viewport: Viewport) -> (Position, Size) {
        let size = responsive_size(stored_size, viewport, self.fullscreen);
        let position = responsive_position(self.position, size, viewport, self.fullscreen);
        (position, size)
    }
}

/// One view per window with a surface.
#[derive(Debug, Default)]
pub struct ViewSet {
    views: HashMap<WindowId, WindowView>,
}

impl ViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create views for newly visible windows and drop the rest.
    pub fn sync<C>(&mut self, manager: &WindowManager<C>) {
        self.views.retain(|id, view| {
            let keep = manager.get(id).map(|r| r.is_visible()).unwrap_or(false);
            if !keep {
                view.cancel_drag();
            }
            keep
        });
        for record in manager.visible() {
            self.views
                .entry(record.id.clone())
                .or_insert_with(|| WindowView::new(record));
        }
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowView> {
        self.views.get(id)
    }

    pub fn get_mut(&mut self, id: &WindowId) -> Option<&mut WindowView> {
        self.views.get_mut(id)
    }

    /// The view currently dragging, if any.
    pub fn dragging_mut(&mut self) -> Option<&mut WindowView> {
        self.views.values_mut().find(|v| v.is_dragging())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TASKBAR_HEIGHT;
    use crate::windows::{WindowDescriptor, WindowEvent};

    fn setup() -> (WindowManager<()>, WindowId) {
        let mut wm = WindowManager::new();
        wm.open(WindowDescriptor {
            id: WindowId::new("about"),
            title: "About Me".into(),
            icon: "@".into(),
            content: (),
            position: Position::new(50.0, 50.0),
            size: Size::new(500.0, 400.0),
        });
        (wm, WindowId::new("about"))
    }

    #[test]
    fn test_drag_commits_on_pointer_up() {
        let (mut wm, id) = setup();
        let mut view = WindowView::new(wm.get(&id).unwrap());
        let vp = Viewport::new(1280.0, 800.0);
        let size = wm.get(&id).unwrap().size;

        assert!(view.pointer_down(Position::new(60.0, 60.0), Position::new(50.0, 50.0), &mut wm));
        view.pointer_move(Position::new(210.0, 160.0), size, vp);
        assert_eq!(view.position(), Position::new(200.0, 150.0));
        // Not committed until release.
        assert_eq!(wm.get(&id).unwrap().position, Position::new(50.0, 50.0));

        view.pointer_up(&mut wm);
        assert!(!view.is_dragging());
        assert_eq!(wm.get(&id).unwrap().position, Position::new(200.0, 150.0));
    }

    #[test]
    fn test_pointer_down_focuses() {
        let (mut wm, id) = setup();
        let before = wm.get(&id).unwrap().z_index;
        let mut view = WindowView::new(wm.get(&id).unwrap());
        view.pointer_down(Position::new(60.0, 60.0), Position::new(50.0, 50.0), &mut wm);
        assert!(wm.get(&id).unwrap().z_index > before);
    }

    #[test]
    fn test_drag_stays_in_bounds_for_wild_trajectory() {
        let (mut wm, id) = setup();
        let vp = Viewport::new(1024.0, 768.0);
        let size = wm.get(&id).unwrap().size;
        let mut view = WindowView::new(wm.get(&id).unwrap());
        view.pointer_down(Position::new(70.0, 55.0), Position::new(50.0, 50.0), &mut wm);

        let trajectory = [
            (-500.0, -500.0),
            (5000.0, 40.0),
            (300.0, 9000.0),
            (-1.0, 767.0),
            (1023.0, -3.0),
            (512.0, 384.0),
            (2048.0, 2048.0),
        ];
        for (x, y) in trajectory {
            view.pointer_move(Position::new(x, y), size, vp);
            let p = view.position();
            assert!(p.x >= 0.0 && p.x <= vp.width - size.width);
            assert!(p.y >= 0.0 && p.y <= vp.height - size.height - TASKBAR_HEIGHT);
        }
        view.pointer_up(&mut wm);
        let committed = wm.get(&id).unwrap().position;
        assert_eq!(committed, Position::new(vp.width - size.width, vp.height - size.height - TASKBAR_HEIGHT));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (wm, id) = setup();
        let mut view = WindowView::new(wm.get(&id).unwrap());
        view.pointer_move(Position::new(400.0, 400.0), Size::new(500.0, 400.0), Viewport::new(1280.0, 800.0));
        assert_eq!(view.position(), Position::new(50.0, 50.0));
    }

    #[test]
    fn test_fullscreen_blocks_drag_and_restores_position() {
        let (mut wm, id) = setup();
        let vp = Viewport::new(1280.0, 800.0);
        let size = wm.get(&id).unwrap().size;
        let mut view = WindowView::new(wm.get(&id).unwrap());

        view.toggle_fullscreen(size, &mut wm);
        assert!(view.is_fullscreen());
        assert_eq!(view.placement(size, vp), (Position::ORIGIN, Size::new(1280.0, 800.0 - TASKBAR_HEIGHT)));
        assert!(!view.pointer_down(Position::new(10.0, 10.0), Position::ORIGIN, &mut wm));

        view.toggle_fullscreen(size, &mut wm);
        assert!(!view.is_fullscreen());
        assert_eq!(view.position(), Position::new(50.0, 50.0));
        assert_eq!(view.placement(size, vp), (Position::new(50.0, 50.0), size));
        assert_eq!(wm.get(&id).unwrap().position, Position::new(50.0, 50.0));
    }

    #[test]
    fn test_leaving_fullscreen_commits_snapshot() {
        let (mut wm, id) = setup();
        let vp = Viewport::new(1280.0, 800.0);
        let size = wm.get(&id).unwrap().size;
        let mut view = WindowView::new(wm.get(&id).unwrap());
        view.pointer_down(Position::new(60.0, 60.0), Position::new(50.0, 50.0), &mut wm);
        view.pointer_move(Position::new(130.0, 90.0), size, vp);
        view.pointer_up(&mut wm);

        view.toggle_fullscreen(size, &mut wm);
        wm.update_position(&id, Position::new(5.0, 5.0));
        let events = wm.subscribe();

        view.toggle_fullscreen(size, &mut wm);
        assert_eq!(wm.get(&id).unwrap().position, Position::new(120.0, 80.0));
        assert_eq!(events.try_recv().unwrap(), WindowEvent::Moved(id.clone(), Position::new(120.0, 80.0)));
    }

    #[test]
    fn test_click_body_raises_window() {
        let (mut wm, id) = setup();
        wm.open(WindowDescriptor {
            id: WindowId::new("skills"),
            title: "Skills".into(),
            icon: "*".into(),
            content: (),
            position: Position::new(80.0, 80.0),
            size: Size::new(400.0, 300.0),
        });
        let other = wm.get(&WindowId::new("skills")).unwrap().z_index;
        let view = WindowView::new(wm.get(&id).unwrap());
        assert!(wm.get(&id).unwrap().z_index < other);

        view.click_body(&mut wm);
        assert!(wm.get(&id).unwrap().z_index > other);
        assert_eq!(wm.topmost_visible().unwrap().id, id);
    }

    #[test]
    fn test_entering_fullscreen_cancels_drag() {
        let (mut wm, id) = setup();
        let size = wm.get(&id).unwrap().size;
        let mut view = WindowView::new(wm.get(&id).unwrap());
        view.pointer_down(Position::new(60.0, 60.0), Position::new(50.0, 50.0), &mut wm);
        view.toggle_fullscreen(size, &mut wm);
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_view_set_drops_hidden_windows() {
        let (mut wm, id) = setup();
        let mut views = ViewSet::new();
        views.sync(&wm);
        assert_eq!(views.len(), 1);

        let mut_view = views.get_mut(&id).unwrap();
        mut_view.pointer_down(Position::new(60.0, 60.0), Position::new(50.0, 50.0), &mut wm);
        assert!(views.dragging_mut().is_some());

        wm.minimize(&id);
        views.sync(&wm);
        assert!(views.is_empty());
        assert!(views.dragging_mut().is_none());

        wm.restore(&id);
        views.sync(&wm);
        assert!(!views.get(&id).unwrap().is_dragging());
    }
}
