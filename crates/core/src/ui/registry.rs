//! # Stage Registry
//!
//! One-shot resolution of the progress card's elements. Binding happens once
//! at flow start: if the root anchor is missing the whole feature is inert
//! (not an error, the page simply does not carry it), and any individual
//! element that fails to resolve is skipped at update time while its siblings
//! keep working.
//!
//! The two UI reducers live here as well: marking a stage complete and
//! presenting the finished packet. Both are idempotent and both tolerate
//! partially-bound pages.

use std::collections::HashMap;

use super::surface::{ElementHandle, Surface};
use crate::finalize::PacketLocations;
use crate::flow::Stage;

/// Anchor the feature hangs off; absent means the flow never starts
pub const ROOT_SELECTOR: &str = "#progress-card";
/// Root attribute naming the finalize endpoint
pub const FINALIZE_URL_ATTR: &str = "data-finalize-url";

const HEADLINE_SELECTOR: &str = "#progress-headline";
const RESULT_PANEL_SELECTOR: &str = "#result-panel";
const DOWNLOAD_JSON_SELECTOR: &str = "#download-json";
const DOWNLOAD_CSV_SELECTOR: &str = "#download-csv";

/// Headline shown once the packet is downloadable
pub const PACKET_READY_HEADLINE: &str = "Compliance Packet Ready ✅";
/// Glyph shown on a completed stage icon
pub const CHECK_GLYPH: &str = "✔";

/// Resolved elements for one stage; any of them may be absent
#[derive(Debug, Clone, Default)]
pub struct StageElements {
    pub segment: Option<ElementHandle>,
    pub icon: Option<ElementHandle>,
    pub badge: Option<ElementHandle>,
}

/// Everything the flow addresses on the page, resolved once at startup
#[derive(Debug, Clone)]
pub struct ProgressBindings {
    pub root: ElementHandle,
    /// Finalize endpoint read off the root; may be absent on a misrendered page
    pub finalize_url: Option<String>,
    headline: Option<ElementHandle>,
    result_panel: Option<ElementHandle>,
    download_json: Option<ElementHandle>,
    download_csv: Option<ElementHandle>,
    stages: HashMap<Stage, StageElements>,
}

impl ProgressBindings {
    /// Resolve the progress card. Returns `None` when the root anchor is
    /// missing, in which case the caller must not schedule anything.
    pub fn bind<S: Surface>(surface: &S) -> Option<Self> {
        let root = surface.element(ROOT_SELECTOR)?;
        let finalize_url = surface.attribute(&root, FINALIZE_URL_ATTR);
        if finalize_url.is_none() {
            tracing::debug!("progress root carries no {}", FINALIZE_URL_ATTR);
        }

        let mut stages = HashMap::new();
        for stage in Stage::ALL {
            let key = stage.as_str();
            let elements = StageElements {
                segment: surface.element(&format!(".segment-{key}")),
                icon: surface.element(&format!(".icon-{key}")),
                badge: surface.element(&format!("[data-segment='{key}'] .badge")),
            };
            if elements.segment.is_none() && elements.icon.is_none() && elements.badge.is_none() {
                tracing::debug!(stage = %stage, "no elements bound for stage");
            }
            stages.insert(stage, elements);
        }

        Some(Self {
            root,
            finalize_url,
            headline: surface.element(HEADLINE_SELECTOR),
            result_panel: surface.element(RESULT_PANEL_SELECTOR),
            download_json: surface.element(DOWNLOAD_JSON_SELECTOR),
            download_csv: surface.element(DOWNLOAD_CSV_SELECTOR),
            stages,
        })
    }

    /// Resolved elements for one stage
    pub fn stage(&self, stage: Stage) -> &StageElements {
        // Every stage gets an entry at bind time, possibly all-None.
        self.stages.get(&stage).unwrap_or(&EMPTY_STAGE)
    }

    /// Flip one stage's visuals to complete. Safe to repeat; each element is
    /// skipped independently when unbound.
    pub fn mark_stage_complete<S: Surface>(&self, surface: &mut S, stage: Stage) {
        let elements = self.stage(stage);

        if let Some(segment) = &elements.segment {
            surface.add_class(segment, "complete");
        }
        if let Some(badge) = &elements.badge {
            surface.remove_class(badge, "pending");
            surface.add_class(badge, "pass");
            surface.set_text(badge, "Pass");
        }
        if let Some(icon) = &elements.icon {
            surface.set_text(icon, CHECK_GLYPH);
            surface.add_class(icon, "complete");
        }
    }

    /// Reveal the result panel with the packet's download locations
    pub fn present_packet<S: Surface>(&self, surface: &mut S, locations: &PacketLocations) {
        if let Some(headline) = &self.headline {
            surface.set_text(headline, PACKET_READY_HEADLINE);
        }
        if let Some(link) = &self.download_json {
            surface.set_link_target(link, &locations.json_url);
        }
        if let Some(link) = &self.download_csv {
            surface.set_link_target(link, &locations.csv_url);
        }
        if let Some(panel) = &self.result_panel {
            surface.remove_class(panel, "hidden");
        }
    }
}

static EMPTY_STAGE: StageElements = StageElements {
    segment: None,
    icon: None,
    badge: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::memory::InMemorySurface;

    #[test]
    fn test_bind_requires_root() {
        assert!(ProgressBindings::bind(&InMemorySurface::empty()).is_none());
    }

    #[test]
    fn test_bind_reads_finalize_url_once() {
        let surface = InMemorySurface::compliance_page(Some("/finalize/ORD-9"));
        let bindings = ProgressBindings::bind(&surface).unwrap();
        assert_eq!(bindings.finalize_url.as_deref(), Some("/finalize/ORD-9"));

        let bare = InMemorySurface::compliance_page(None);
        let bindings = ProgressBindings::bind(&bare).unwrap();
        assert!(bindings.finalize_url.is_none());
    }

    #[test]
    fn test_mark_stage_complete_updates_segment_badge_icon() {
        let mut surface = InMemorySurface::compliance_page(None);
        let bindings = ProgressBindings::bind(&surface).unwrap();

        bindings.mark_stage_complete(&mut surface, Stage::Aml);

        assert!(surface.has_class(".segment-aml", "complete"));
        assert!(!surface.has_class("[data-segment='aml'] .badge", "pending"));
        assert!(surface.has_class("[data-segment='aml'] .badge", "pass"));
        assert_eq!(surface.text("[data-segment='aml'] .badge"), Some("Pass"));
        assert_eq!(surface.text(".icon-aml"), Some(CHECK_GLYPH));
        assert!(surface.has_class(".icon-aml", "complete"));

        // Siblings untouched.
        assert!(!surface.has_class(".segment-kyc", "complete"));
        assert!(surface.has_class("[data-segment='kyc'] .badge", "pending"));
    }

    #[test]
    fn test_mark_stage_complete_twice_matches_once() {
        let mut once = InMemorySurface::compliance_page(None);
        let bindings = ProgressBindings::bind(&once).unwrap();
        let mut twice = once.clone();

        for stage in Stage::ALL {
            bindings.mark_stage_complete(&mut once, stage);
            bindings.mark_stage_complete(&mut twice, stage);
            bindings.mark_stage_complete(&mut twice, stage);

            let key = stage.as_str();
            for selector in [
                format!(".segment-{key}"),
                format!(".icon-{key}"),
                format!("[data-segment='{key}'] .badge"),
            ] {
                assert_eq!(once.text(&selector), twice.text(&selector));
                assert_eq!(
                    once.has_class(&selector, "complete"),
                    twice.has_class(&selector, "complete")
                );
                assert_eq!(
                    once.has_class(&selector, "pass"),
                    twice.has_class(&selector, "pass")
                );
                assert_eq!(
                    once.has_class(&selector, "pending"),
                    twice.has_class(&selector, "pending")
                );
            }
        }
    }

    #[test]
    fn test_missing_stage_elements_are_skipped() {
        let mut surface = InMemorySurface::compliance_page(None);
        surface.remove_stage_elements(Stage::Ownership);
        let bindings = ProgressBindings::bind(&surface).unwrap();

        // No panic, siblings still update.
        bindings.mark_stage_complete(&mut surface, Stage::Ownership);
        bindings.mark_stage_complete(&mut surface, Stage::Governance);
        assert!(surface.has_class(".segment-governance", "complete"));
    }

    #[test]
    fn test_present_packet_reveals_panel_and_links() {
        let mut surface = InMemorySurface::compliance_page(Some("/finalize/ORD-1"));
        let bindings = ProgressBindings::bind(&surface).unwrap();
        let locations = PacketLocations {
            json_url: "/exports/ORD-1.json".to_string(),
            csv_url: "/exports/ORD-1.csv".to_string(),
        };

        bindings.present_packet(&mut surface, &locations);

        assert_eq!(surface.text("#progress-headline"), Some(PACKET_READY_HEADLINE));
        assert_eq!(surface.link_target("#download-json"), Some("/exports/ORD-1.json"));
        assert_eq!(surface.link_target("#download-csv"), Some("/exports/ORD-1.csv"));
        assert!(!surface.has_class("#result-panel", "hidden"));
    }
}
