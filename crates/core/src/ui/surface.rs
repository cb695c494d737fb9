//! # Addressable UI Surface
//!
//! The flow does not own the page it animates; it addresses elements through
//! this trait and mutates them with the handful of operations the progress
//! card needs. Lookups may fail (the page may not carry the feature, or may
//! carry only part of it) and every mutation on a resolved handle must be
//! safe to repeat.

/// Opaque reference to one resolved element on the surface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    id: String,
}

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Surface-private identity of the element
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// An addressable page the flow can animate
pub trait Surface {
    /// Resolve a selector to an element, if present
    fn element(&self, selector: &str) -> Option<ElementHandle>;

    /// Read a data attribute off an element
    fn attribute(&self, element: &ElementHandle, name: &str) -> Option<String>;

    /// Add a visual class (no-op if already present)
    fn add_class(&mut self, element: &ElementHandle, class: &str);

    /// Remove a visual class (no-op if absent)
    fn remove_class(&mut self, element: &ElementHandle, class: &str);

    /// Replace an element's visible text
    fn set_text(&mut self, element: &ElementHandle, text: &str);

    /// Point a link element at a new target
    fn set_link_target(&mut self, element: &ElementHandle, href: &str);
}
