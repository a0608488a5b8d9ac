//! Window registry and manager
//!
//! The manager is the only writer of window records. Launch surfaces and
//! window views call its operations; everything else reads snapshots.
//!
//! Records are never deleted: closing a window only clears `is_open`, so a
//! later `open` of the same id remembers where the window was and how big
//! it was. The catalog of ids is fixed, so the registry stays tiny.
//!
//! Stacking order comes from a single [`StackCounter`]. Every open, focus and
//! restore draws the next value from it, which makes ties impossible.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

/// Stable identifier of a window, assigned by the launch catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Top-left corner of a window in screen points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Outer size of a window in screen points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Everything needed to open a window. Position and size only seed the
/// record the first time an id is opened.
#[derive(Clone, Debug)]
pub struct WindowDescriptor<C> {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub content: C,
    pub position: Position,
    pub size: Size,
}

/// One tracked window.
#[derive(Clone, Debug)]
pub struct WindowRecord<C> {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    /// Opaque payload reference owned by the launch catalog.
    pub content: C,
    pub is_open: bool,
    /// Only meaningful while `is_open` is true.
    pub is_minimized: bool,
    pub position: Position,
    pub size: Size,
    pub z_index: u64,
}

impl<C> WindowRecord<C> {
    /// Open and not minimized: the window has a surface on screen.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}

/// Monotonic source of stacking values shared by every record.
#[derive(Clone, Debug)]
pub struct StackCounter {
    current: u64,
}

impl StackCounter {
    pub const BASELINE: u64 = 1000;

    pub fn new(baseline: u64) -> Self {
        Self { current: baseline }
    }

    /// Increment and return the new value.
    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }
}

impl Default for StackCounter {
    fn default() -> Self {
        Self::new(Self::BASELINE)
    }
}

/// Published after every state change.
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    Opened(WindowId),
    Closed(WindowId),
    Minimized(WindowId),
    Restored(WindowId),
    Focused(WindowId),
    Moved(WindowId, Position),
    Resized(WindowId, Size),
}

impl WindowEvent {
    pub fn id(&self) -> &WindowId {
        match self {
            WindowEvent::Opened(id)
            | WindowEvent::Closed(id)
            | WindowEvent::Minimized(id)
            | WindowEvent::Restored(id)
            | WindowEvent::Focused(id)
            | WindowEvent::Moved(id, _)
            | WindowEvent::Resized(id, _) => id,
        }
    }
}

/// The registry plus the operations that mutate it.
pub struct WindowManager<C> {
    records: HashMap<WindowId, WindowRecord<C>>,
    /// Insertion order, for stable enumeration.
    order: Vec<WindowId>,
    stack: StackCounter,
    subscribers: Vec<Sender<WindowEvent>>,
    revision: u64,
}

impl<C> Default for WindowManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> WindowManager<C> {
    pub fn new() -> Self {
        Self::with_counter(StackCounter::default())
    }

    pub fn with_counter(stack: StackCounter) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            stack,
            subscribers: Vec::new(),
            revision: 0,
        }
    }

    /// Receive every future [`WindowEvent`]. Dropping the receiver
    /// unsubscribes on the next publish.
    pub fn subscribe(&mut self) -> Receiver<WindowEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Bumped once per state change; cheap to poll.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stack_value(&self) -> u64 {
        self.stack.current()
    }

    fn publish(&mut self, event: WindowEvent) {
        self.revision += 1;
        tracing::debug!(event = "core.window.changed", window = %event.id(), change = ?event);
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Open `descriptor.id`, creating the record on first use. Reopening
    /// keeps the remembered geometry and brings the window to the front.
    pub fn open(&mut self, descriptor: WindowDescriptor<C>) {
        let z_index = self.stack.next();
        let id = descriptor.id.clone();
        match self.records.get_mut(&id) {
            Some(record) => {
                record.is_open = true;
                record.is_minimized = false;
                record.z_index = z_index;
            }
            None => {
                let record = WindowRecord {
                    id: descriptor.id,
                    title: descriptor.title,
                    icon: descriptor.icon,
                    content: descriptor.content,
                    is_open: true,
                    is_minimized: false,
                    position: descriptor.position,
                    size: descriptor.size,
                    z_index,
                };
                self.order.push(id.clone());
                self.records.insert(id.clone(), record);
            }
        }
        self.publish(WindowEvent::Opened(id));
    }

    pub fn close(&mut self, id: &WindowId) {
        match self.records.get_mut(id) {
            Some(record) if record.is_open => record.is_open = false,
            _ => return,
        }
        self.publish(WindowEvent::Closed(id.clone()));
    }

    pub fn minimize(&mut self, id: &WindowId) {
        match self.records.get_mut(id) {
            Some(record) if !record.is_minimized => record.is_minimized = true,
            _ => return,
        }
        self.publish(WindowEvent::Minimized(id.clone()));
    }

    /// Un-minimize and bring to front.
    pub fn restore(&mut self, id: &WindowId) {
        if !self.records.contains_key(id) {
            return;
        }
        let z_index = self.stack.next();
        if let Some(record) = self.records.get_mut(id) {
            record.is_minimized = false;
            record.z_index = z_index;
        }
        self.publish(WindowEvent::Restored(id.clone()));
    }

    /// Bring to front without touching open/minimized flags.
    pub fn focus(&mut self, id: &WindowId) {
        if !self.records.contains_key(id) {
            return;
        }
        let z_index = self.stack.next();
        if let Some(record) = self.records.get_mut(id) {
            record.z_index = z_index;
        }
        self.publish(WindowEvent::Focused(id.clone()));
    }

    /// Overwrite the stored position. Bounds are the view's concern.
    pub fn update_position(&mut self, id: &WindowId, position: Position) {
        match self.records.get_mut(id) {
            Some(record) => record.position = position,
            None => return,
        }
        self.publish(WindowEvent::Moved(id.clone(), position));
    }

    pub fn update_size(&mut self, id: &WindowId, size: Size) {
        match self.records.get_mut(id) {
            Some(record) => record.size = size,
            None => return,
        }
        self.publish(WindowEvent::Resized(id.clone(), size));
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord<C>> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record ever created, in creation order.
    pub fn records(&self) -> impl Iterator<Item = &WindowRecord<C>> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Open records in creation order (taskbar buttons).
    pub fn open_records(&self) -> impl Iterator<Item = &WindowRecord<C>> {
        self.records().filter(|r| r.is_open)
    }

    /// Windows with a surface, back to front.
    pub fn visible(&self) -> Vec<&WindowRecord<C>> {
        let mut visible: Vec<_> = self.records().filter(|r| r.is_visible()).collect();
        visible.sort_by_key(|r| r.z_index);
        visible
    }

    /// The visible window drawn on top, if any.
    pub fn topmost_visible(&self) -> Option<&WindowRecord<C>> {
        self.records()
            .filter(|r| r.is_visible())
            .max_by_key(|r| r.z_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str, x: f32) -> WindowDescriptor<()> {
        WindowDescriptor {
            id: WindowId::new(id),
            title: id.to_uppercase(),
            icon: "*".into(),
            content: (),
            position: Position::new(x, 50.0),
            size: Size::new(500.0, 400.0),
        }
    }

    fn assert_on_top(wm: &WindowManager<()>, id: &WindowId) {
        let top = wm.get(id).unwrap().z_index;
        for r in wm.records() {
            if &r.id != id {
                assert!(top > r.z_index, "{} not above {}", id, r.id);
            }
        }
    }

    #[test]
    fn test_open_creates_record_with_bumped_z() {
        let mut wm = WindowManager::new();
        wm.open(descriptor("about", 50.0));
        let r = wm.get(&"about".into()).unwrap();
        assert!(r.is_open);
        assert!(!r.is_minimized);
        assert_eq!(r.z_index, StackCounter::BASELINE + 1);
        assert_eq!(r.position, Position::new(50.0, 50.0));
    }

    #[test]
    fn test_reopen_reuses_record() {
        let mut wm = WindowManager::new();
        for _ in 0..3 {
            wm.open(descriptor("about", 50.0));
            wm.open(descriptor("skills", 150.0));
            wm.close(&"about".into());
            wm.minimize(&"skills".into());
            wm.restore(&"skills".into());
        }
        assert_eq!(wm.len(), 2);
        let ids: Vec<_> = wm.records().map(|r| r.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["about", "skills"]);
    }

    #[test]
    fn test_no_duplicate_ids_for_mixed_sequences() {
        let catalog = ["about", "skills", "snake"];
        let mut wm = WindowManager::new();
        for step in 0..60usize {
            let id = WindowId::new(catalog[step % catalog.len()]);
            match (step * 7) % 4 {
                0 => wm.open(descriptor(id.as_str(), 10.0)),
                1 => wm.close(&id),
                2 => wm.minimize(&id),
                _ => wm.restore(&id),
            }
            let mut seen: Vec<_> = wm.records().map(|r| r.id.clone()).collect();
            let total = seen.len();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), total);
        }
    }

    #[test]
    fn test_open_focus_restore_raise_to_top() {
        let mut wm = WindowManager::new();
        wm.open(descriptor("a", 0.0));
        wm.open(descriptor("b", 0.0));
        wm.open(descriptor("c", 0.0));
        assert_on_top(&wm, &"c".into());

        wm.focus(&"a".into());
        assert_on_top(&wm, &"a".into());

        wm.minimize(&"b".into());
        wm.restore(&"b".into());
        assert_on_top(&wm, &"b".into());

        wm.open(descriptor("c", 0.0));
        assert_on_top(&wm, &"c".into());
    }

    #[test]
    fn test_close_then_open_remembers_geometry() {
        let mut wm = WindowManager::new();
        let id = WindowId::new("projects");
        wm.open(descriptor("projects", 150.0));
        wm.update_position(&id, Position::new(321.0, 123.0));
        wm.update_size(&id, Size::new(640.0, 480.0));
        wm.close(&id);
        wm.open(descriptor("projects", 150.0));

        let r = wm.get(&id).unwrap();
        assert_eq!(r.position, Position::new(321.0, 123.0));
        assert_eq!(r.size, Size::new(640.0, 480.0));
    }

    #[test]
    fn test_minimize_and_close_keep_geometry() {
        let mut wm = WindowManager::new();
        let id = WindowId::new("a");
        wm.open(descriptor("a", 77.0));
        wm.minimize(&id);
        wm.close(&id);
        let r = wm.get(&id).unwrap();
        assert_eq!(r.position, Position::new(77.0, 50.0));
        assert!(!r.is_open);
    }

    #[test]
    fn test_focus_leaves_flags_alone() {
        let mut wm = WindowManager::new();
        let id = WindowId::new("a");
        wm.open(descriptor("a", 0.0));
        wm.minimize(&id);
        wm.focus(&id);
        let r = wm.get(&id).unwrap();
        assert!(r.is_open);
        assert!(r.is_minimized);
    }

    #[test]
    fn test_unknown_ids_are_silent_noops() {
        let mut wm: WindowManager<()> = WindowManager::new();
        let ghost = WindowId::new("ghost");
        wm.close(&ghost);
        wm.minimize(&ghost);
        wm.restore(&ghost);
        wm.focus(&ghost);
        wm.update_position(&ghost, Position::new(1.0, 1.0));
        wm.update_size(&ghost, Size::new(1.0, 1.0));
        assert!(wm.is_empty());
        assert_eq!(wm.revision(), 0);
        assert_eq!(wm.stack_value(), StackCounter::BASELINE);
    }

    #[test]
    fn test_repeated_close_and_minimize_publish_once() {
        let mut wm = WindowManager::new();
        let rx = wm.subscribe();
        let id = WindowId::new("a");
        wm.open(descriptor("a", 0.0));
        wm.minimize(&id);
        wm.minimize(&id);
        wm.close(&id);
        wm.close(&id);
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                WindowEvent::Opened(id.clone()),
                WindowEvent::Minimized(id.clone()),
                WindowEvent::Closed(id),
            ]
        );
        assert_eq!(wm.revision(), 3);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut wm = WindowManager::new();
        let rx = wm.subscribe();
        drop(wm.subscribe());
        wm.open(descriptor("a", 0.0));
        assert_eq!(wm.subscribers.len(), 1);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_visible_sorted_back_to_front() {
        let mut wm = WindowManager::new();
        wm.open(descriptor("a", 0.0));
        wm.open(descriptor("b", 0.0));
        wm.open(descriptor("c", 0.0));
        wm.focus(&"a".into());
        wm.minimize(&"b".into());
        let order: Vec<_> = wm.visible().iter().map(|r| r.id.as_str().to_string()).collect();
        assert_eq!(order, vec!["c", "a"]);
        assert_eq!(wm.topmost_visible().unwrap().id.as_str(), "a");
        assert_eq!(wm.open_records().count(), 3);
    }
}
