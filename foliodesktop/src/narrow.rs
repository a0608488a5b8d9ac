//! Single-column résumé for narrow screens
//!
//! Replaces the desktop metaphor below the narrow breakpoint: a sticky
//! header and one collapsible card per résumé section. Every card starts
//! collapsed and expands independently.

use crate::catalog::{self, Category, Content};
use crate::content::{identity, section_body, PanelAction, ResumeData};
use egui::{RichText, Sense, Ui};
use foliocore::theme::{FolioColors, FolioTheme};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct NarrowCv {
    expanded: HashSet<Content>,
}

impl NarrowCv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, content: Content) -> bool {
        self.expanded.contains(&content)
    }

    pub fn toggle(&mut self, content: Content) {
        if !self.expanded.remove(&content) {
            self.expanded.insert(content);
        }
    }

    pub fn expand(&mut self, content: Content) {
        self.expanded.insert(content);
    }

    /// Draw the column. Returns the download request if one was made;
    /// cross-section links are handled here by expanding the target.
    pub fn show(&mut self, ui: &mut Ui, resume: &ResumeData) -> Option<PanelAction> {
        let mut action = None;

        FolioTheme::header_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            identity(ui, &resume.about, 48.0);
        });

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.add_space(8.0);
            for entry in catalog::in_category(Category::Resume) {
                if let Some(a) = self.card(ui, entry.content, entry.icon, entry.title, resume) {
                    action = Some(a);
                }
                ui.add_space(8.0);
            }
        });

        match action {
            Some(PanelAction::Open(content)) => {
                self.expand(content);
                None
            }
            other => other,
        }
    }

    fn card(
        &mut self,
        ui: &mut Ui,
        content: Content,
        icon: &str,
        title: &str,
        resume: &ResumeData,
    ) -> Option<PanelAction> {
        let expanded = self.is_expanded(content);
        let mut action = None;

        FolioTheme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            let header = ui
                .horizontal(|ui| {
                    ui.label(RichText::new(icon).size(22.0));
                    ui.label(RichText::new(title).strong().size(17.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let arrow = if expanded { "⏶" } else { "⏷" };
                        ui.label(RichText::new(arrow).color(FolioColors::MUTED));
                    });
                })
                .response;
            let header = ui.interact(header.rect, ui.id().with(("narrow_card", content)), Sense::click());
            if header.clicked() {
                self.toggle(content);
            }

            if expanded {
                ui.separator();
                action = section_body(ui, content, resume);
            }
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_start_collapsed() {
        let cv = NarrowCv::new();
        for entry in catalog::in_category(Category::Resume) {
            assert!(!cv.is_expanded(entry.content));
        }
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut cv = NarrowCv::new();
        cv.toggle(Content::Skills);
        cv.toggle(Content::Contact);
        assert!(cv.is_expanded(Content::Skills));
        assert!(cv.is_expanded(Content::Contact));

        cv.toggle(Content::Skills);
        assert!(!cv.is_expanded(Content::Skills));
        assert!(cv.is_expanded(Content::Contact));
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut cv = NarrowCv::new();
        cv.expand(Content::Projects);
        cv.expand(Content::Projects);
        assert!(cv.is_expanded(Content::Projects));
        cv.toggle(Content::Projects);
        assert!(!cv.is_expanded(Content::Projects));
    }
}
