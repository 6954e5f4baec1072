//! Editor session: the single owner of all editing state
//!
//! The session ties the element store, history, page model and pointer
//! controller together. Every discrete change that should be undoable
//! pushes exactly one history snapshot; intermediate drag frames do not.

use crate::{
    image_data_url, DragOutcome, DropPayload, EditError, ElementStore, History,
    InteractionController, KeyChord, PageModel, ReflowReport, Result, ShortcutAction,
    TextMetrics, Tool,
};
use template_model::{
    Element, ElementId, ElementKind, ElementPatch, MarginSide, Margins, Point, TemplateDocument,
    Viewport, Zoom,
};

/// Tunables for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Cap on stored history snapshots; `None` keeps everything
    pub history_limit: Option<usize>,
    pub metrics: TextMetrics,
    pub default_margins: Margins,
    pub zoom: Zoom,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            metrics: TextMetrics::default(),
            default_margins: Margins::default(),
            zoom: Zoom::default(),
        }
    }
}

/// What a pointer press on the canvas did
#[derive(Debug, Clone, PartialEq)]
pub enum PointerDown {
    /// The insert tool placed a new element
    Inserted(ElementId),
    /// An element was grabbed and a drag started
    Grabbed(ElementId),
    /// Empty canvas was clicked; selection cleared
    Cleared,
}

/// Editing state for one template
#[derive(Debug, Clone)]
pub struct EditorSession {
    store: ElementStore,
    history: History,
    pages: PageModel,
    interaction: InteractionController,
    config: SessionConfig,
}

impl EditorSession {
    /// Create a session with an empty single-page document
    pub fn new(config: SessionConfig) -> Self {
        Self::with_document(TemplateDocument::blank(), config)
    }

    /// Create a session editing an existing document
    pub fn with_document(document: TemplateDocument, config: SessionConfig) -> Self {
        let mut session = Self {
            store: ElementStore::new(),
            history: History::with_limit(Vec::new(), config.history_limit),
            pages: PageModel::new(),
            interaction: InteractionController::new(Viewport::new(Point::default(), config.zoom)),
            config,
        };
        session.load(document);
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pages(&self) -> &PageModel {
        &self.pages
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn selected(&self) -> Option<&ElementId> {
        self.store.selected()
    }

    fn record(&mut self) {
        self.history.push(self.store.snapshot());
    }

    // ------------------------------------------------------------------
    // Element store
    // ------------------------------------------------------------------

    /// Add an element on the current page at document coordinates `at`
    pub fn add_element(&mut self, kind: ElementKind, at: Point, image_url: Option<String>) -> ElementId {
        let page = self.pages.current();
        let id = self.store.add(kind, at, image_url, page);
        self.record();
        tracing::debug!(element = %id, kind = kind.display_name(), page, "Element added");
        id
    }

    /// Remove an element
    pub fn delete_element(&mut self, id: &ElementId) -> Result<Element> {
        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| EditError::ElementNotFound(id.to_string()))?;
        self.record();
        tracing::debug!(element = %id, "Element deleted");
        Ok(removed)
    }

    /// Apply a completed edit to one element. Empty patches do nothing.
    ///
    /// A patch that moves the element to a page that does not exist is
    /// rejected.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(page) = patch.page {
            if !self.pages.contains(page) {
                return Err(EditError::PageNotFound {
                    page,
                    page_count: self.pages.len(),
                });
            }
        }
        self.store.apply_patch(id, &patch)?;
        self.record();
        Ok(())
    }

    pub fn select(&mut self, id: &ElementId) -> Result<()> {
        self.store.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    /// Elements drawn on a page. Elements pointing at missing pages never
    /// appear here.
    pub fn elements_on_page(&self, page: u32) -> Vec<&Element> {
        self.store.on_page(page).collect()
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Step back one snapshot. Returns false when nothing was undone.
    pub fn undo(&mut self) -> bool {
        self.interaction.cancel();
        match self.history.undo() {
            Some(snapshot) => {
                self.store.restore(snapshot);
                tracing::debug!(index = self.history.index(), "Undo");
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns false when nothing was redone.
    pub fn redo(&mut self) -> bool {
        self.interaction.cancel();
        match self.history.redo() {
            Some(snapshot) => {
                self.store.restore(snapshot);
                tracing::debug!(index = self.history.index(), "Redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Handle a key press. Undo and redo are applied here; the resolved
    /// action is returned so the host can save and suppress its default.
    pub fn handle_key(&mut self, chord: &KeyChord) -> Option<ShortcutAction> {
        let action = chord.action()?;
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Save => {}
        }
        Some(action)
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    pub fn current_page(&self) -> u32 {
        self.pages.current()
    }

    pub fn set_current_page(&mut self, page: u32) -> Result<()> {
        self.pages.set_current(page)
    }

    /// Append a blank page and switch to it
    pub fn add_page(&mut self) -> u32 {
        let page = self.pages.add_page();
        tracing::debug!(page, "Page added");
        page
    }

    /// Replace a page's free text, pushing overflow onto following pages
    pub fn set_page_content(&mut self, page: u32, text: impl Into<String>) -> Result<ReflowReport> {
        self.pages.set_content(page, text)
    }

    /// Set a margin in centimetres; returns the new inset in pixels
    pub fn set_margin(&mut self, page: u32, side: MarginSide, cm: f64) -> Result<f64> {
        let inset = self.pages.set_margin(page, side, cm)?;
        self.pages.reflow_from(page);
        Ok(inset)
    }

    /// Drag a ruler handle by a screen-space distance; returns the new inset
    pub fn drag_margin(&mut self, page: u32, side: MarginSide, screen_delta: f64) -> Result<f64> {
        let delta = self.interaction.viewport().to_document_distance(screen_delta);
        let inset = self.pages.drag_margin(page, side, delta)?;
        self.pages.reflow_from(page);
        Ok(inset)
    }

    /// Page reordering is logged but not applied
    pub fn move_page(&self, from: u32, to: u32) {
        self.pages.move_page(from, to);
    }

    // ------------------------------------------------------------------
    // Pointer interaction
    // ------------------------------------------------------------------

    pub fn tool(&self) -> Tool {
        self.interaction.tool()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.interaction.set_tool(tool);
    }

    /// Screen position of the current page canvas
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.interaction.set_origin(origin);
    }

    /// Press on the current page canvas at a screen position
    pub fn pointer_down(&mut self, screen: Point) -> Result<PointerDown> {
        let point = self.interaction.to_document(screen);

        if let Tool::Insert(kind) = self.interaction.tool() {
            let id = self.add_element(kind, point, None);
            self.interaction.set_tool(Tool::Select);
            return Ok(PointerDown::Inserted(id));
        }

        let hit = self
            .store
            .hit_test(self.pages.current(), point)
            .map(|e| e.id.clone());
        match hit {
            Some(id) => {
                self.begin_drag(&id, screen)?;
                Ok(PointerDown::Grabbed(id))
            }
            None => {
                self.store.clear_selection();
                Ok(PointerDown::Cleared)
            }
        }
    }

    /// Start dragging a specific element. A drag still in progress is
    /// committed first.
    pub fn begin_drag(&mut self, id: &ElementId, screen: Point) -> Result<()> {
        let previous = self.interaction.begin_drag(&mut self.store, id, screen)?;
        self.commit_drag(&previous);
        Ok(())
    }

    /// Pointer moved; live-updates a dragged element without history
    pub fn pointer_move(&mut self, screen: Point) -> Result<Option<Point>> {
        self.interaction.drag_to(&mut self.store, screen)
    }

    /// Pointer released; records one snapshot if the element moved
    pub fn pointer_up(&mut self) -> DragOutcome {
        let outcome = self.interaction.end_drag(&self.store);
        self.commit_drag(&outcome);
        outcome
    }

    fn commit_drag(&mut self, outcome: &DragOutcome) {
        if let DragOutcome::Moved { element_id, to, .. } = outcome {
            self.record();
            tracing::debug!(element = %element_id, x = to.x, y = to.y, "Drag committed");
        }
    }

    /// Drop something onto the current page canvas at a screen position
    pub fn drop_on_canvas(&mut self, payload: DropPayload, screen: Point) -> Result<ElementId> {
        let point = self.interaction.to_document(screen);
        match payload {
            DropPayload::File { mime, bytes } => {
                let url = image_data_url(&mime, &bytes)?;
                Ok(self.add_element(ElementKind::Image, point, Some(url)))
            }
            DropPayload::Palette(kind) => Ok(self.add_element(kind, point, None)),
        }
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    pub fn zoom(&self) -> Zoom {
        self.interaction.zoom()
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.interaction.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) -> Zoom {
        let zoom = self.zoom().zoom_in();
        self.set_zoom(zoom);
        zoom
    }

    pub fn zoom_out(&mut self) -> Zoom {
        let zoom = self.zoom().zoom_out();
        self.set_zoom(zoom);
        zoom
    }

    // ------------------------------------------------------------------
    // Save / load
    // ------------------------------------------------------------------

    /// Copy of the live state for saving. Taken as-is, even mid-drag.
    pub fn document(&self) -> TemplateDocument {
        TemplateDocument {
            elements: self.store.snapshot(),
            pages: self.pages.pages().to_vec(),
        }
    }

    /// Replace all state with `document` and restart history from it
    pub fn load(&mut self, document: TemplateDocument) {
        let TemplateDocument { elements, pages } = document;

        self.pages = PageModel::from_pages(pages)
            .with_metrics(self.config.metrics)
            .with_default_margins(self.config.default_margins);
        self.store = ElementStore::from_elements(elements);
        self.history.reset(self.store.snapshot());
        self.interaction.cancel();

        let orphans = self.store.orphans(self.pages.len()).count();
        if orphans > 0 {
            tracing::warn!(
                orphans,
                pages = self.pages.len(),
                "Loaded elements reference pages that do not exist; they will not be shown"
            );
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_index_counts_mutations() {
        let mut session = EditorSession::default();
        let a = session.add_element(ElementKind::Text, Point::new(10.0, 10.0), None);
        let b = session.add_element(ElementKind::Checkbox, Point::new(10.0, 80.0), None);
        session.update_element(&b, ElementPatch::checked(true)).unwrap();
        session.delete_element(&a).unwrap();

        assert_eq!(session.history().index(), 4);
        assert_eq!(session.history().len(), 5);
    }

    #[test]
    fn test_undo_then_redo_restores_exact_state() {
        let mut session = EditorSession::default();
        let id = session.add_element(ElementKind::Text, Point::new(10.0, 10.0), None);
        session.update_element(&id, ElementPatch::content("Lessee")).unwrap();
        let before = session.elements().to_vec();

        assert!(session.undo());
        assert_ne!(session.elements(), before.as_slice());
        assert!(session.redo());
        assert_eq!(session.elements(), before.as_slice());
    }

    #[test]
    fn test_new_edit_after_undo_drops_redo() {
        let mut session = EditorSession::default();
        session.add_element(ElementKind::Text, Point::new(0.0, 0.0), None);
        session.add_element(ElementKind::Rectangle, Point::new(0.0, 50.0), None);
        session.undo();
        assert!(session.can_redo());

        session.add_element(ElementKind::Signature, Point::new(0.0, 100.0), None);
        assert!(!session.can_redo());
        assert!(!session.redo());
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut session = EditorSession::default();
        assert!(!session.undo());
        assert!(session.elements().is_empty());
    }

    #[test]
    fn test_add_stamps_current_page_and_selects() {
        let mut session = EditorSession::default();
        session.add_page();
        let id = session.add_element(ElementKind::Image, Point::new(5.0, 5.0), Some("x.png".into()));

        let element = session.store().get(&id).unwrap();
        assert_eq!(element.page, 2);
        assert_eq!(element.image_url.as_deref(), Some("x.png"));
        assert_eq!(session.selected(), Some(&id));
    }

    #[test]
    fn test_update_rejects_missing_page() {
        let mut session = EditorSession::default();
        let id = session.add_element(ElementKind::Text, Point::new(0.0, 0.0), None);
        let index = session.history().index();

        let result = session.update_element(&id, ElementPatch::page(3));
        assert!(matches!(result, Err(EditError::PageNotFound { page: 3, .. })));
        assert_eq!(session.history().index(), index);
    }

    #[test]
    fn test_empty_patch_does_not_record() {
        let mut session = EditorSession::default();
        let id = session.add_element(ElementKind::Text, Point::new(0.0, 0.0), None);
        session.update_element(&id, ElementPatch::default()).unwrap();
        assert_eq!(session.history().index(), 1);
    }

    #[test]
    fn test_drag_records_one_entry_only_when_moved() {
        let mut session = EditorSession::default();
        session.add_element(ElementKind::Text, Point::new(100.0, 100.0), None);
        let after_add = session.history().index();

        // Drag to (50,50) and release there
        session.pointer_down(Point::new(100.0, 100.0)).unwrap();
        session.pointer_move(Point::new(80.0, 70.0)).unwrap();
        session.pointer_move(Point::new(50.0, 50.0)).unwrap();
        assert_eq!(session.history().index(), after_add);
        assert!(matches!(session.pointer_up(), DragOutcome::Moved { .. }));
        assert_eq!(session.history().index(), after_add + 1);

        // Drag away and back again
        session.pointer_down(Point::new(50.0, 50.0)).unwrap();
        session.pointer_move(Point::new(200.0, 200.0)).unwrap();
        session.pointer_move(Point::new(50.0, 50.0)).unwrap();
        assert_eq!(session.pointer_up(), DragOutcome::Unchanged);
        assert_eq!(session.history().index(), after_add + 1);
    }

    #[test]
    fn test_grab_during_drag_commits_previous_move() {
        let mut session = EditorSession::default();
        session.add_element(ElementKind::Text, Point::new(100.0, 100.0), None);
        let checkbox = session.add_element(ElementKind::Checkbox, Point::new(400.0, 600.0), None);
        let after_add = session.history().index();

        session.pointer_down(Point::new(100.0, 100.0)).unwrap();
        session.pointer_move(Point::new(20.0, 30.0)).unwrap();

        // Pointer-up was lost; the next press lands on the checkbox
        let grabbed = session.pointer_down(Point::new(405.0, 605.0)).unwrap();
        assert_eq!(grabbed, PointerDown::Grabbed(checkbox));
        assert_eq!(session.history().index(), after_add + 1);
        assert_eq!(session.history().current(), session.elements());

        assert_eq!(session.pointer_up(), DragOutcome::Unchanged);
        assert_eq!(session.history().index(), after_add + 1);
    }

    #[test]
    fn test_pointer_down_on_empty_canvas_clears_selection() {
        let mut session = EditorSession::default();
        session.add_element(ElementKind::Checkbox, Point::new(10.0, 10.0), None);
        assert!(session.selected().is_some());

        let result = session.pointer_down(Point::new(600.0, 900.0)).unwrap();
        assert_eq!(result, PointerDown::Cleared);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_pointer_down_only_hits_current_page() {
        let mut session = EditorSession::default();
        session.add_element(ElementKind::Rectangle, Point::new(10.0, 10.0), None);
        session.add_page();
        assert_eq!(
            session.pointer_down(Point::new(20.0, 20.0)).unwrap(),
            PointerDown::Cleared
        );
    }

    #[test]
    fn test_insert_tool_places_element_under_zoom() {
        let mut session = EditorSession::default();
        session.set_zoom(Zoom::from_percent(50));
        session.set_tool(Tool::Insert(ElementKind::Signature));

        let result = session.pointer_down(Point::new(100.0, 100.0)).unwrap();
        let PointerDown::Inserted(id) = result else {
            panic!("expected insert, got {:?}", result);
        };
        assert_eq!(session.store().get(&id).unwrap().origin(), Point::new(200.0, 200.0));
        assert_eq!(session.tool(), Tool::Select);
    }

    #[test]
    fn test_drop_image_file() {
        let mut session = EditorSession::default();
        session.set_canvas_origin(Point::new(100.0, 0.0));
        let id = session
            .drop_on_canvas(DropPayload::file("image/gif", b"GIF89a".to_vec()), Point::new(150.0, 40.0))
            .unwrap();

        let element = session.store().get(&id).unwrap();
        assert_eq!(element.kind, ElementKind::Image);
        assert_eq!(element.origin(), Point::new(50.0, 40.0));
        assert!(element.image_url.as_deref().unwrap().starts_with("data:image/gif;base64,"));
    }

    #[test]
    fn test_drop_non_image_is_rejected_without_history() {
        let mut session = EditorSession::default();
        let result = session.drop_on_canvas(DropPayload::file("text/csv", b"a,b".to_vec()), Point::default());
        assert!(result.is_err());
        assert_eq!(session.history().index(), 0);
    }

    #[test]
    fn test_drop_palette_item() {
        let mut session = EditorSession::default();
        let id = session
            .drop_on_canvas(DropPayload::Palette(ElementKind::Checkbox), Point::new(30.0, 30.0))
            .unwrap();
        let element = session.store().get(&id).unwrap();
        assert_eq!(element.kind, ElementKind::Checkbox);
        assert!(element.content.is_none());
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut session = EditorSession::default();
        session.add_element(ElementKind::Text, Point::default(), None);

        assert_eq!(session.handle_key(&KeyChord::new("z").ctrl()), Some(ShortcutAction::Undo));
        assert!(session.elements().is_empty());

        assert_eq!(
            session.handle_key(&KeyChord::new("z").meta().shift()),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(session.elements().len(), 1);

        assert_eq!(session.handle_key(&KeyChord::new("s").ctrl()), Some(ShortcutAction::Save));
        assert_eq!(session.handle_key(&KeyChord::new("q").ctrl()), None);
    }

    #[test]
    fn test_move_element_to_second_page() {
        let mut session = EditorSession::default();
        let id = session.add_element(ElementKind::Text, Point::new(20.0, 20.0), None);
        session.add_page();
        session.update_element(&id, ElementPatch::page(2)).unwrap();

        assert!(session.elements_on_page(1).is_empty());
        assert_eq!(session.elements_on_page(2).len(), 1);
        assert_eq!(session.pages().len(), 2);
    }

    #[test]
    fn test_load_resets_history() {
        let mut session = EditorSession::default();
        session.add_element(ElementKind::Text, Point::default(), None);

        let mut document = TemplateDocument::blank();
        document.elements.push(Element::new(ElementKind::Image, Point::default(), 1));
        session.load(document);

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.elements().len(), 1);
        assert!(!session.undo());
    }

    #[test]
    fn test_orphaned_elements_are_kept_but_not_shown() {
        let mut document = TemplateDocument::blank();
        document.elements.push(Element::new(ElementKind::Text, Point::default(), 4));
        let session = EditorSession::with_document(document, SessionConfig::default());

        assert_eq!(session.elements().len(), 1);
        assert!(session.elements_on_page(1).is_empty());
    }

    #[test]
    fn test_drag_margin_uses_zoom() {
        let mut session = EditorSession::default();
        session.set_margin(1, MarginSide::Left, 1.0).unwrap();
        session.set_zoom(Zoom::from_percent(200));

        // 75.6 screen px at 200% is 37.8 document px, i.e. one centimetre
        let inset = session.drag_margin(1, MarginSide::Left, 75.6).unwrap();
        assert!((inset - 75.6).abs() < 1e-9);
    }
}
