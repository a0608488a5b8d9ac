//! The launch catalog: every window the desktop can open.
//!
//! Desktop icons and the start menu seed new windows at different default
//! positions. Only the first open of an id uses them; afterwards the record
//! remembers its own geometry.

use foliocore::{Position, Size, WindowDescriptor, WindowId};

/// What a window shows. The manager treats it as opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Content {
    About,
    Skills,
    Experience,
    Education,
    Projects,
    Contact,
    TicTacToe,
    Snake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Resume,
    Games,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Resume => "CV Sections",
            Category::Games => "Games",
        }
    }
}

/// Which surface launched the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launcher {
    Desktop,
    StartMenu,
}

#[derive(Debug)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub content: Content,
    pub category: Category,
    pub desktop_position: Position,
    pub menu_position: Position,
    pub size: Size,
}

impl CatalogEntry {
    pub fn window_id(&self) -> WindowId {
        WindowId::new(self.id)
    }

    pub fn descriptor(&self, launcher: Launcher) -> WindowDescriptor<Content> {
        let position = match launcher {
            Launcher::Desktop => self.desktop_position,
            Launcher::StartMenu => self.menu_position,
        };
        WindowDescriptor {
            id: self.window_id(),
            title: self.title.to_string(),
            icon: self.icon.to_string(),
            content: self.content,
            position,
            size: self.size,
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    content: Content,
    category: Category,
    desktop: (f32, f32),
    menu: (f32, f32),
    size: (f32, f32),
) -> CatalogEntry {
    CatalogEntry {
        id,
        title,
        icon,
        content,
        category,
        desktop_position: Position::new(desktop.0, desktop.1),
        menu_position: Position::new(menu.0, menu.1),
        size: Size::new(size.0, size.1),
    }
}

pub static CATALOG: [CatalogEntry; 8] = [
    entry("about", "About Me", "🧍", Content::About, Category::Resume, (50.0, 50.0), (100.0, 100.0), (500.0, 400.0)),
    entry("skills", "Skills", "🛠", Content::Skills, Category::Resume, (150.0, 50.0), (150.0, 150.0), (600.0, 500.0)),
    entry("experience", "Experience", "💼", Content::Experience, Category::Resume, (250.0, 50.0), (200.0, 200.0), (700.0, 600.0)),
    entry("education", "Education", "🎓", Content::Education, Category::Resume, (50.0, 180.0), (250.0, 100.0), (500.0, 300.0)),
    entry("projects", "Projects", "🚀", Content::Projects, Category::Resume, (150.0, 180.0), (300.0, 150.0), (800.0, 600.0)),
    entry("contact", "Contact", "📬", Content::Contact, Category::Resume, (250.0, 180.0), (350.0, 200.0), (400.0, 350.0)),
    entry("tictactoe", "Tic Tac Toe", "⭕", Content::TicTacToe, Category::Games, (50.0, 310.0), (400.0, 100.0), (400.0, 500.0)),
    entry("snake", "Snake Game", "🐍", Content::Snake, Category::Games, (150.0, 310.0), (450.0, 150.0), (500.0, 600.0)),
];

/// Pinned start-menu items: the résumé sections.
pub const PINNED_COUNT: usize = 6;

pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

pub fn find_content(content: Content) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.content == content)
}

pub fn in_category(category: Category) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |e| e.category == category)
}

pub fn pinned() -> impl Iterator<Item = &'static CatalogEntry> {
    in_category(Category::Resume).take(PINNED_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_and_contents_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|e| e.id).collect();
        let contents: HashSet<_> = CATALOG.iter().map(|e| e.content).collect();
        assert_eq!(ids.len(), CATALOG.len());
        assert_eq!(contents.len(), CATALOG.len());
    }

    #[test]
    fn test_launcher_picks_default_position() {
        let snake = find("snake").unwrap();
        assert_eq!(snake.descriptor(Launcher::Desktop).position, Position::new(150.0, 310.0));
        assert_eq!(snake.descriptor(Launcher::StartMenu).position, Position::new(450.0, 150.0));
        assert_eq!(snake.descriptor(Launcher::Desktop).size, Size::new(500.0, 600.0));
    }

    #[test]
    fn test_categories() {
        let games: Vec<_> = in_category(Category::Games).map(|e| e.id).collect();
        assert_eq!(games, vec!["tictactoe", "snake"]);
        assert_eq!(pinned().count(), 6);
        assert!(pinned().all(|e| e.category == Category::Resume));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find_content(Content::Contact).unwrap().id, "contact");
        assert!(find("ghost").is_none());
    }
}
