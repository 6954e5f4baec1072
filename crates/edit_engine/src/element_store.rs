//! Ordered store of the elements placed on a template
//!
//! The store is the live state; it knows nothing about history. Callers that
//! want an undoable change go through [`crate::EditorSession`].

use crate::{EditError, Result};
use template_model::{Element, ElementId, ElementKind, ElementPatch, Point};

/// Elements in paint order plus the current selection
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `elements`, nothing selected
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            selected: None,
        }
    }

    /// All elements in paint order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    fn get_mut(&mut self, id: &ElementId) -> Result<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| EditError::ElementNotFound(id.to_string()))
    }

    /// Append a new element of `kind` at `origin` on `page` and select it
    pub fn add(
        &mut self,
        kind: ElementKind,
        origin: Point,
        image_url: Option<String>,
        page: u32,
    ) -> ElementId {
        let mut element = Element::new(kind, origin, page);
        element.image_url = image_url;
        let id = element.id.clone();
        self.elements.push(element);
        self.selected = Some(id.clone());
        id
    }

    /// Remove an element. Clears the selection if it pointed at it.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| &e.id == id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(index))
    }

    /// Apply a partial update
    pub fn apply_patch(&mut self, id: &ElementId, patch: &ElementPatch) -> Result<()> {
        let element = self.get_mut(id)?;
        patch.apply_to(element);
        Ok(())
    }

    /// Move an element without any bookkeeping (used for live drags)
    pub fn set_position(&mut self, id: &ElementId, origin: Point) -> Result<()> {
        let element = self.get_mut(id)?;
        element.x = origin.x;
        element.y = origin.y;
        Ok(())
    }

    /// Elements on the given 1-based page, in paint order
    pub fn on_page(&self, page: u32) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.page == page)
    }

    /// Elements whose page does not exist in a document of `page_count` pages.
    /// These are kept in the store but never drawn.
    pub fn orphans(&self, page_count: usize) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(move |e| e.page == 0 || e.page as usize > page_count)
    }

    /// Topmost element on `page` under `point`
    pub fn hit_test(&self, page: u32, point: Point) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.page == page && e.contains(point))
    }

    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// Select an element; selecting an unknown id is an error
    pub fn select(&mut self, id: &ElementId) -> Result<()> {
        if self.get(id).is_none() {
            return Err(EditError::ElementNotFound(id.to_string()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Copy of the element array for history
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Replace the live elements with a snapshot. The selection survives only
    /// if the selected element still exists.
    pub fn restore(&mut self, snapshot: &[Element]) {
        self.elements = snapshot.to_vec();
        if let Some(ref id) = self.selected {
            if !self.elements.iter().any(|e| &e.id == id) {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_selects_and_stamps_page() {
        let mut store = ElementStore::new();
        let id = store.add(ElementKind::Signature, Point::new(10.0, 20.0), None, 3);

        let element = store.get(&id).unwrap();
        assert_eq!(element.page, 3);
        assert_eq!(element.width, 150.0);
        assert_eq!(element.height, 80.0);
        assert_eq!(store.selected(), Some(&id));
    }

    #[test]
    fn test_remove_clears_selection_only_for_removed() {
        let mut store = ElementStore::new();
        let a = store.add(ElementKind::Text, Point::new(0.0, 0.0), None, 1);
        let b = store.add(ElementKind::Text, Point::new(0.0, 50.0), None, 1);

        store.remove(&a);
        assert_eq!(store.selected(), Some(&b));

        store.remove(&b);
        assert_eq!(store.selected(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_patch_unknown_element() {
        let mut store = ElementStore::new();
        let result = store.apply_patch(&ElementId::from("missing"), &ElementPatch::checked(true));
        assert!(matches!(result, Err(EditError::ElementNotFound(_))));
    }

    #[test]
    fn test_on_page_and_orphans() {
        let mut store = ElementStore::new();
        store.add(ElementKind::Text, Point::default(), None, 1);
        store.add(ElementKind::Checkbox, Point::default(), None, 2);
        store.add(ElementKind::Image, Point::default(), None, 7);

        assert_eq!(store.on_page(1).count(), 1);
        assert_eq!(store.on_page(2).count(), 1);
        assert_eq!(store.orphans(2).count(), 1);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut store = ElementStore::new();
        store.add(ElementKind::Rectangle, Point::new(0.0, 0.0), None, 1);
        let top = store.add(ElementKind::Rectangle, Point::new(50.0, 50.0), None, 1);

        let hit = store.hit_test(1, Point::new(60.0, 60.0)).unwrap();
        assert_eq!(hit.id, top);
        assert!(store.hit_test(2, Point::new(60.0, 60.0)).is_none());
    }

    #[test]
    fn test_restore_drops_stale_selection() {
        let mut store = ElementStore::new();
        let before = store.snapshot();
        store.add(ElementKind::Text, Point::default(), None, 1);
        store.restore(&before);
        assert!(store.is_empty());
        assert!(store.selected().is_none());
    }
}
