//! Viewport State - page scrolling and region visibility.
//!
//! The page is a vertical flow of rows; the viewport is the terminal window
//! below the nav bar. This module owns:
//! - The scroll offset (reactive, clamped to the page bounds)
//! - Region geometry (one region per section, in page-row coordinates)
//! - The [`ViewportObserver`]: the terminal stand-in for a browser
//!   intersection primitive. It computes each subscribed region's visible
//!   proportion and fires edge-triggered callbacks when the proportion
//!   rises through the observer's threshold.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use super::section::RegionObserver;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Default scroll amount for arrow keys (rows).
pub const LINE_SCROLL: i32 = 1;

/// Default scroll amount for mouse wheel.
pub const WHEEL_SCROLL: i32 = 3;

/// Page Up/Down scrolls 90% of the viewport.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

/// Visible proportion at which a section becomes the active one.
pub const NAV_THRESHOLD: f32 = 0.35;

/// Visible proportion at which a section's fade-in latches.
pub const FADE_THRESHOLD: f32 = 0.10;

// =============================================================================
// REGION GEOMETRY
// =============================================================================

/// One section's vertical extent, in page-row coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGeom {
    pub id: String,
    pub top: u16,
    pub height: u16,
}

/// Proportion of a region's rows inside the viewport window
/// `[offset, offset + viewport_rows)`. Zero-height regions report 0.0.
pub fn visible_ratio(top: u16, height: u16, offset: u16, viewport_rows: u16) -> f32 {
    if height == 0 || viewport_rows == 0 {
        return 0.0;
    }
    let region_end = top as u32 + height as u32;
    let view_end = offset as u32 + viewport_rows as u32;
    let start = (top as u32).max(offset as u32);
    let end = region_end.min(view_end);
    if end <= start {
        return 0.0;
    }
    (end - start) as f32 / height as f32
}

// =============================================================================
// SCROLL STATE
// =============================================================================

/// Reactive scroll offset, clamped to the page bounds.
pub struct ScrollState {
    offset: Signal<u16>,
    page_height: u16,
    viewport_rows: u16,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: signal(0),
            page_height: 0,
            viewport_rows: 0,
        }
    }

    /// Current offset (top page row shown in the viewport).
    pub fn offset(&self) -> u16 {
        self.offset.get()
    }

    /// The offset signal, for the render effect.
    pub fn offset_signal(&self) -> Signal<u16> {
        self.offset.clone()
    }

    /// Maximum scroll offset for the current bounds.
    pub fn max_scroll(&self) -> u16 {
        self.page_height.saturating_sub(self.viewport_rows)
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Update page/viewport bounds (layout or terminal size changed) and
    /// re-clamp the offset against them.
    pub fn set_bounds(&mut self, page_height: u16, viewport_rows: u16) {
        self.page_height = page_height;
        self.viewport_rows = viewport_rows;
        let clamped = self.offset.get().min(self.max_scroll());
        if clamped != self.offset.get() {
            self.offset.set(clamped);
        }
    }

    /// Scroll to an absolute offset (clamped).
    pub fn scroll_to(&self, row: u16) {
        let clamped = row.min(self.max_scroll());
        if clamped != self.offset.get() {
            self.offset.set(clamped);
        }
    }

    /// Scroll by a delta amount.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at boundary.
    pub fn scroll_by(&self, delta: i32) -> bool {
        let current = self.offset.get();
        let new = ((current as i32) + delta).clamp(0, self.max_scroll() as i32) as u16;
        if new == current {
            return false;
        }
        self.offset.set(new);
        true
    }

    /// Scroll down by 90% of the viewport.
    pub fn page_down(&self) -> bool {
        self.scroll_by((self.viewport_rows as f32 * PAGE_SCROLL_FACTOR) as i32)
    }

    /// Scroll up by 90% of the viewport.
    pub fn page_up(&self) -> bool {
        self.scroll_by(-((self.viewport_rows as f32 * PAGE_SCROLL_FACTOR) as i32))
    }

    pub fn scroll_to_top(&self) {
        self.scroll_to(0);
    }

    pub fn scroll_to_bottom(&self) {
        self.scroll_to(self.max_scroll());
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// VIEWPORT OBSERVER
// =============================================================================

struct SubEntry {
    id: String,
    on_cross: Rc<dyn Fn()>,
    /// Whether the region was at/above the threshold on the last update.
    /// Crossings fire only on the rising edge.
    visible: bool,
}

struct ObserverInner {
    regions: HashMap<String, (u16, u16)>,
    subs: Vec<SubEntry>,
}

/// Edge-triggered region visibility observer.
///
/// Regions register geometry via [`set_regions`](ViewportObserver::set_regions);
/// subscribers register callbacks via the [`RegionObserver`] capability.
/// Each [`update`](ViewportObserver::update) pass recomputes every
/// subscribed region's visible proportion against the viewport window and
/// fires the callbacks of regions whose proportion rose through the
/// threshold. Within one pass, callbacks fire in subscription order, so the
/// page-order-last region wins a simultaneous crossing (last-write-wins).
pub struct ViewportObserver {
    threshold: f32,
    inner: Rc<RefCell<ObserverInner>>,
}

impl ViewportObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            inner: Rc::new(RefCell::new(ObserverInner {
                regions: HashMap::new(),
                subs: Vec::new(),
            })),
        }
    }

    /// Replace the region geometry (layout changed).
    ///
    /// Existing subscriptions are kept; a subscription whose region lost its
    /// geometry simply stops crossing until the geometry returns.
    pub fn set_regions(&self, regions: &[RegionGeom]) {
        let mut inner = self.inner.borrow_mut();
        inner.regions = regions
            .iter()
            .map(|r| (r.id.clone(), (r.top, r.height)))
            .collect();
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.inner.borrow().subs.len()
    }

    /// Recompute visibility against `[offset, offset + viewport_rows)` and
    /// fire rising-edge crossings.
    pub fn update(&self, offset: u16, viewport_rows: u16) {
        // Collect callbacks first so firing happens without holding the
        // registry borrow (a callback may re-read the observer).
        let to_fire: Vec<Rc<dyn Fn()>> = {
            let mut inner = self.inner.borrow_mut();
            let ObserverInner { regions, subs } = &mut *inner;
            let mut fired = Vec::new();
            for entry in subs.iter_mut() {
                let ratio = match regions.get(&entry.id) {
                    Some(&(top, height)) => visible_ratio(top, height, offset, viewport_rows),
                    None => 0.0,
                };
                let visible = ratio >= self.threshold;
                if visible && !entry.visible {
                    fired.push(entry.on_cross.clone());
                }
                entry.visible = visible;
            }
            fired
        };

        for callback in to_fire {
            callback();
        }
    }
}

impl RegionObserver for ViewportObserver {
    fn subscribe(&self, region_id: &str, on_cross: Box<dyn Fn()>) -> Option<Box<dyn FnOnce()>> {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.regions.contains_key(region_id) {
                return None;
            }
            inner.subs.push(SubEntry {
                id: region_id.to_string(),
                on_cross: Rc::from(on_cross),
                visible: false,
            });
        }

        let weak = Rc::downgrade(&self.inner);
        let id = region_id.to_string();
        Some(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                if let Some(pos) = inner.subs.iter().position(|s| s.id == id) {
                    inner.subs.remove(pos);
                }
            }
        }))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn regions(geoms: &[(&str, u16, u16)]) -> Vec<RegionGeom> {
        geoms
            .iter()
            .map(|&(id, top, height)| RegionGeom {
                id: id.to_string(),
                top,
                height,
            })
            .collect()
    }

    #[test]
    fn test_visible_ratio_full() {
        // Region rows 10..20 fully inside viewport 0..40
        assert_eq!(visible_ratio(10, 10, 0, 40), 1.0);
    }

    #[test]
    fn test_visible_ratio_disjoint() {
        assert_eq!(visible_ratio(50, 10, 0, 40), 0.0);
        assert_eq!(visible_ratio(0, 10, 20, 40), 0.0);
    }

    #[test]
    fn test_visible_ratio_partial() {
        // Region rows 30..50, viewport 0..40: 10 of 20 rows visible
        assert_eq!(visible_ratio(30, 20, 0, 40), 0.5);
    }

    #[test]
    fn test_visible_ratio_degenerate() {
        assert_eq!(visible_ratio(0, 0, 0, 40), 0.0);
        assert_eq!(visible_ratio(0, 10, 0, 0), 0.0);
    }

    #[test]
    fn test_scroll_clamping() {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(100, 40);
        assert_eq!(scroll.max_scroll(), 60);

        scroll.scroll_to(200);
        assert_eq!(scroll.offset(), 60);

        scroll.scroll_to(0);
        assert!(scroll.scroll_by(10));
        assert_eq!(scroll.offset(), 10);
        assert!(scroll.scroll_by(-20)); // clamps at 0
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.scroll_by(-1)); // at boundary
    }

    #[test]
    fn test_scroll_page_and_jump() {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(200, 40);

        assert!(scroll.page_down());
        assert_eq!(scroll.offset(), 36);

        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 160);
        assert!(!scroll.page_down());

        scroll.scroll_to_top();
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.page_up());
    }

    #[test]
    fn test_set_bounds_reclamps() {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(100, 40);
        scroll.scroll_to(60);

        // Viewport grows: max scroll shrinks, offset follows
        scroll.set_bounds(100, 80);
        assert_eq!(scroll.offset(), 20);
    }

    #[test]
    fn test_page_shorter_than_viewport() {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(10, 40);
        assert_eq!(scroll.max_scroll(), 0);
        assert!(!scroll.scroll_by(1));
    }

    fn counting_callback(log: &Rc<RefCell<Vec<String>>>, id: &str) -> Box<dyn Fn()> {
        let log = log.clone();
        let id = id.to_string();
        Box::new(move || log.borrow_mut().push(id.clone()))
    }

    #[test]
    fn test_crossing_fires_on_rising_edge_only() {
        let observer = ViewportObserver::new(NAV_THRESHOLD);
        observer.set_regions(&regions(&[("about", 40, 20)]));

        let log = Rc::new(RefCell::new(Vec::new()));
        let _cleanup = observer
            .subscribe("about", counting_callback(&log, "about"))
            .unwrap();

        // 0 of 20 rows visible
        observer.update(0, 30);
        assert!(log.borrow().is_empty());

        // rows 40..50 visible: ratio 0.5 >= 0.35 -> fires
        observer.update(20, 30);
        assert_eq!(log.borrow().len(), 1);

        // Still visible: no re-fire while above threshold
        observer.update(25, 30);
        assert_eq!(log.borrow().len(), 1);

        // Scrolled away, then back: re-arms and fires again
        observer.update(0, 30);
        observer.update(20, 30);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_unknown_region_subscribe_is_none() {
        let observer = ViewportObserver::new(NAV_THRESHOLD);
        observer.set_regions(&regions(&[("home", 0, 10)]));
        assert!(observer.subscribe("ghost", Box::new(|| {})).is_none());
    }

    #[test]
    fn test_unsubscribe_stops_crossings() {
        let observer = ViewportObserver::new(NAV_THRESHOLD);
        observer.set_regions(&regions(&[("home", 0, 10)]));

        let log = Rc::new(RefCell::new(Vec::new()));
        let cleanup = observer
            .subscribe("home", counting_callback(&log, "home"))
            .unwrap();
        assert_eq!(observer.subscription_count(), 1);

        cleanup();
        assert_eq!(observer.subscription_count(), 0);

        observer.update(0, 30);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_simultaneous_crossings_fire_in_subscription_order() {
        let observer = ViewportObserver::new(NAV_THRESHOLD);
        observer.set_regions(&regions(&[("about", 0, 10), ("skills", 10, 10)]));

        let log = Rc::new(RefCell::new(Vec::new()));
        let _c1 = observer
            .subscribe("about", counting_callback(&log, "about"))
            .unwrap();
        let _c2 = observer
            .subscribe("skills", counting_callback(&log, "skills"))
            .unwrap();

        // Both regions fully visible in one pass
        observer.update(0, 30);
        assert_eq!(*log.borrow(), vec!["about".to_string(), "skills".to_string()]);
    }

    #[test]
    fn test_geometry_loss_suspends_crossings() {
        let observer = ViewportObserver::new(NAV_THRESHOLD);
        observer.set_regions(&regions(&[("home", 0, 10)]));

        let log = Rc::new(RefCell::new(Vec::new()));
        let _cleanup = observer
            .subscribe("home", counting_callback(&log, "home"))
            .unwrap();

        observer.set_regions(&regions(&[("other", 0, 10)]));
        observer.update(0, 30);
        assert!(log.borrow().is_empty());

        // Geometry returns: crossing resumes
        observer.set_regions(&regions(&[("home", 0, 10)]));
        observer.update(0, 30);
        assert_eq!(log.borrow().len(), 1);
    }
}
