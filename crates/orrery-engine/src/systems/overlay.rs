//! HTML overlay state: text written into page elements and labels that
//! float over the canvas at projected screen positions.
//!
//! The engine only records what the page should show. The web bridge applies
//! it to the DOM after each tick.

use glam::Vec2;

/// Index of a label inside `OverlayState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub usize);

/// A text label anchored to a screen position.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLabel {
    pub text: String,
    pub class: String,
    /// Pixel position, origin top-left. `None` hides the label.
    pub screen_pos: Option<Vec2>,
}

#[derive(Debug, Default)]
pub struct OverlayState {
    labels: Vec<ScreenLabel>,
    text_updates: Vec<(String, String)>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_label(&mut self, text: impl Into<String>, class: impl Into<String>) -> LabelId {
        self.labels.push(ScreenLabel {
            text: text.into(),
            class: class.into(),
            screen_pos: None,
        });
        LabelId(self.labels.len() - 1)
    }

    pub fn set_label_position(&mut self, id: LabelId, pos: Option<Vec2>) {
        if let Some(label) = self.labels.get_mut(id.0) {
            label.screen_pos = pos;
        }
    }

    pub fn label(&self, id: LabelId) -> Option<&ScreenLabel> {
        self.labels.get(id.0)
    }

    pub fn labels(&self) -> &[ScreenLabel] {
        &self.labels
    }

    /// Queue new text content for the element with the given id.
    /// A later write to the same element replaces a pending one.
    pub fn set_text(&mut self, element_id: impl Into<String>, text: impl Into<String>) {
        let element_id = element_id.into();
        let text = text.into();
        match self.text_updates.iter_mut().find(|(id, _)| *id == element_id) {
            Some(pending) => pending.1 = text,
            None => self.text_updates.push((element_id, text)),
        }
    }

    pub fn take_text_updates(&mut self) -> Vec<(String, String)> {
        std::mem::take(&mut self.text_updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_start_hidden() {
        let mut overlay = OverlayState::new();
        let id = overlay.add_label("Sun", "label");
        assert_eq!(overlay.label(id).unwrap().screen_pos, None);

        overlay.set_label_position(id, Some(Vec2::new(10.0, 20.0)));
        assert_eq!(overlay.labels()[0].screen_pos, Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn text_updates_coalesce_per_element() {
        let mut overlay = OverlayState::new();
        overlay.set_text("details", "a");
        overlay.set_text("status", "x");
        overlay.set_text("details", "b");

        let updates = overlay.take_text_updates();
        assert_eq!(
            updates,
            vec![("details".to_string(), "b".to_string()), ("status".to_string(), "x".to_string())]
        );
        assert!(overlay.take_text_updates().is_empty());
    }
}
