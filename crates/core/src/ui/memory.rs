//! # In-Memory Surface
//!
//! A BTreeMap-backed [`Surface`] used by the CLI demo and by tests. Elements
//! are keyed directly by the selector strings the registry uses, which is all
//! the fidelity the flow needs from a page.

use std::collections::{BTreeMap, BTreeSet};

use super::surface::{ElementHandle, Surface};
use crate::flow::Stage;

/// One fake page element
#[derive(Debug, Clone, Default)]
struct Element {
    classes: BTreeSet<String>,
    text: String,
    attributes: BTreeMap<String, String>,
    link_target: Option<String>,
}

/// In-process stand-in for the progress page
#[derive(Debug, Clone, Default)]
pub struct InMemorySurface {
    elements: BTreeMap<String, Element>,
}

impl InMemorySurface {
    /// An empty page: every lookup misses, the flow stays inert
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the reference compliance progress card. Pass `None` to build a
    /// card whose root carries no finalize endpoint.
    pub fn compliance_page(finalize_url: Option<&str>) -> Self {
        let mut surface = Self::default();

        let mut root = Element::default();
        if let Some(url) = finalize_url {
            root.attributes
                .insert("data-finalize-url".to_string(), url.to_string());
        }
        surface.elements.insert("#progress-card".to_string(), root);

        surface.insert_text("#progress-headline", "Compliance review in progress…");
        surface.insert_classed("#result-panel", &["hidden"]);
        surface.insert_text("#download-json", "Download JSON");
        surface.insert_text("#download-csv", "Download CSV");

        for stage in Stage::ALL {
            surface.insert_stage_elements(stage);
        }
        surface
    }

    /// Add the segment/icon/badge trio for one stage
    pub fn insert_stage_elements(&mut self, stage: Stage) {
        let key = stage.as_str();
        self.insert_classed(&format!(".segment-{key}"), &[]);
        self.insert_classed(&format!(".icon-{key}"), &[]);
        let badge_selector = format!("[data-segment='{key}'] .badge");
        self.insert_classed(&badge_selector, &["pending"]);
        self.set_text(&ElementHandle::new(badge_selector), "Pending");
    }

    /// Drop one stage's elements, leaving siblings in place
    pub fn remove_stage_elements(&mut self, stage: Stage) {
        let key = stage.as_str();
        self.elements.remove(&format!(".segment-{key}"));
        self.elements.remove(&format!(".icon-{key}"));
        self.elements.remove(&format!("[data-segment='{key}'] .badge"));
    }

    fn insert_text(&mut self, selector: &str, text: &str) {
        self.elements.insert(
            selector.to_string(),
            Element {
                text: text.to_string(),
                ..Element::default()
            },
        );
    }

    fn insert_classed(&mut self, selector: &str, classes: &[&str]) {
        self.elements.insert(
            selector.to_string(),
            Element {
                classes: classes.iter().map(|c| c.to_string()).collect(),
                ..Element::default()
            },
        );
    }

    // === Assertion helpers ===

    /// Whether the element at `selector` carries `class`
    pub fn has_class(&self, selector: &str, class: &str) -> bool {
        self.elements
            .get(selector)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Visible text of the element at `selector`
    pub fn text(&self, selector: &str) -> Option<&str> {
        self.elements.get(selector).map(|e| e.text.as_str())
    }

    /// Link target of the element at `selector`, if one was set
    pub fn link_target(&self, selector: &str) -> Option<&str> {
        self.elements
            .get(selector)
            .and_then(|e| e.link_target.as_deref())
    }
}

impl Surface for InMemorySurface {
    fn element(&self, selector: &str) -> Option<ElementHandle> {
        self.elements
            .contains_key(selector)
            .then(|| ElementHandle::new(selector))
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> Option<String> {
        self.elements
            .get(element.id())
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn add_class(&mut self, element: &ElementHandle, class: &str) {
        if let Some(e) = self.elements.get_mut(element.id()) {
            e.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: &ElementHandle, class: &str) {
        if let Some(e) = self.elements.get_mut(element.id()) {
            e.classes.remove(class);
        }
    }

    fn set_text(&mut self, element: &ElementHandle, text: &str) {
        if let Some(e) = self.elements.get_mut(element.id()) {
            e.text = text.to_string();
        }
    }

    fn set_link_target(&mut self, element: &ElementHandle, href: &str) {
        if let Some(e) = self.elements.get_mut(element.id()) {
            e.link_target = Some(href.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliance_page_resolves_expected_selectors() {
        let surface = InMemorySurface::compliance_page(Some("/finalize/ORD-1"));
        for selector in [
            "#progress-card",
            "#progress-headline",
            "#result-panel",
            "#download-json",
            "#download-csv",
            ".segment-kyc",
            ".icon-governance",
            "[data-segment='aml'] .badge",
        ] {
            assert!(surface.element(selector).is_some(), "missing {selector}");
        }
        let root = surface.element("#progress-card").unwrap();
        assert_eq!(
            surface.attribute(&root, "data-finalize-url").as_deref(),
            Some("/finalize/ORD-1")
        );
    }

    #[test]
    fn test_empty_page_resolves_nothing() {
        let surface = InMemorySurface::empty();
        assert!(surface.element("#progress-card").is_none());
    }

    #[test]
    fn test_class_mutations_are_idempotent() {
        let mut surface = InMemorySurface::compliance_page(None);
        let segment = surface.element(".segment-kyc").unwrap();
        surface.add_class(&segment, "complete");
        surface.add_class(&segment, "complete");
        assert!(surface.has_class(".segment-kyc", "complete"));
        surface.remove_class(&segment, "complete");
        surface.remove_class(&segment, "complete");
        assert!(!surface.has_class(".segment-kyc", "complete"));
    }

    #[test]
    fn test_mutating_missing_element_is_a_no_op() {
        let mut surface = InMemorySurface::empty();
        let ghost = ElementHandle::new("#nowhere");
        surface.add_class(&ghost, "complete");
        surface.set_text(&ghost, "x");
        assert!(surface.element("#nowhere").is_none());
    }
}
