//! Element storage: the ordered collection of elements plus selection.
//!
//! Pure data. Geometry queries (hit testing, bounding boxes) live in
//! [`crate::geometry`]; the store only owns elements, their z-order, and
//! the single-selection state.

use crate::elements::{Element, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The element store: an id-indexed arena with an explicit z-order.
///
/// Connector soft references are plain ids resolved lazily against this
/// store; removal never chases references, so a connector pointing at a
/// deleted element simply keeps its last concrete endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
    /// Draw order, back to front.
    z_order: Vec<ElementId>,
    /// At most one element is selected at a time.
    #[serde(skip)]
    selected: Option<ElementId>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element on top of the z-order. Returns its id.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.insert(id, element);
        self.z_order.push(id);
        id
    }

    /// Remove an element by id. Clears the selection if it pointed at the
    /// removed element. Connectors referencing it are left untouched.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(&id)?;
        self.z_order.retain(|&other| other != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Remove every element and clear the selection.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.z_order.clear();
        self.selected = None;
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Elements in draw order (back to front).
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Element> {
        self.z_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Elements in reverse draw order (front to back), for hit testing.
    pub fn iter_topmost_first(&self) -> impl Iterator<Item = &Element> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|id| self.elements.get(id))
    }

    /// Ids of all connector elements.
    pub fn connector_ids(&self) -> Vec<ElementId> {
        self.z_order
            .iter()
            .copied()
            .filter(|id| {
                self.elements
                    .get(id)
                    .is_some_and(|e| e.as_connector().is_some())
            })
            .collect()
    }

    /// Select an element. Ignored if the id is not in the store, so the
    /// invariant "the selection always names a live element" holds.
    pub fn select(&mut self, id: ElementId) {
        if self.contains(id) {
            self.selected = Some(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected element's id, validated against the store.
    pub fn selection(&self) -> Option<ElementId> {
        self.selected.filter(|id| self.contains(*id))
    }

    /// The selected element itself.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection().and_then(|id| self.get(id))
    }
}
