#![forbid(unsafe_code)]

//! Anchor resolution, tooltip placement, and anchor highlighting.
//!
//! # Invariants
//!
//! 1. Placement is a pure function of the step, the document snapshot, the
//!    tooltip size, and the config.
//! 2. A step without an anchor, or whose anchor does not resolve to a laid-out
//!    node, gets a viewport-centered tooltip. This never fails.
//! 3. At most one node is highlighted at a time. The previous highlight is
//!    released before a new one is applied, and every exit path (step change,
//!    tour end, drop) releases it exactly once.

use tracing::{debug, trace, warn};
use waypoint_core::{AnchorQuery, Highlighter, Rect, Side, Size};

use crate::catalog::Step;
use crate::config::TourConfig;

/// Where the tooltip goes for the current step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Tooltip top edge in viewport coordinates.
    pub top: f64,
    /// Tooltip left edge in viewport coordinates.
    pub left: f64,
    /// Side of the anchor the tooltip sits on; also the arrow orientation.
    pub side: Side,
    /// Bounding box of the resolved anchor, `None` when centered.
    pub anchor: Option<Rect>,
}

impl Placement {
    pub fn is_centered(&self) -> bool {
        self.anchor.is_none()
    }

    /// The tooltip's full rectangle for a given size.
    pub fn rect(&self, tooltip: Size) -> Rect {
        Rect::new(self.top, self.left, tooltip.width, tooltip.height)
    }
}

/// Center `tooltip` in `viewport`. The arrow side is cosmetic here.
pub fn centered(viewport: Size, tooltip: Size) -> Placement {
    Placement {
        top: ((viewport.height - tooltip.height) / 2.0).max(0.0),
        left: ((viewport.width - tooltip.width) / 2.0).max(0.0),
        side: Side::Bottom,
        anchor: None,
    }
}

/// Place `tooltip` on `side` of `anchor`, `gap` pixels away, centered on the
/// anchor along the other axis.
pub fn beside(anchor: Rect, side: Side, tooltip: Size, gap: f64) -> Placement {
    let (top, left) = match side {
        Side::Top => (
            anchor.top - gap - tooltip.height,
            anchor.center_x() - tooltip.width / 2.0,
        ),
        Side::Bottom => (
            anchor.bottom() + gap,
            anchor.center_x() - tooltip.width / 2.0,
        ),
        Side::Left => (
            anchor.center_y() - tooltip.height / 2.0,
            anchor.left - gap - tooltip.width,
        ),
        Side::Right => (
            anchor.center_y() - tooltip.height / 2.0,
            anchor.right() + gap,
        ),
    };
    Placement {
        top,
        left,
        side,
        anchor: Some(anchor),
    }
}

/// Shift a placement so the tooltip lies inside the viewport where possible.
///
/// A tooltip larger than the viewport is pinned to the top-left corner.
pub fn clamp_to_viewport(mut placement: Placement, viewport: Size, tooltip: Size) -> Placement {
    if Rect::from_size(viewport).contains_rect(&placement.rect(tooltip)) {
        return placement;
    }
    let max_top = (viewport.height - tooltip.height).max(0.0);
    let max_left = (viewport.width - tooltip.width).max(0.0);
    placement.top = placement.top.clamp(0.0, max_top);
    placement.left = placement.left.clamp(0.0, max_left);
    placement
}

/// Resolve `step`'s anchor in `dom` and compute its placement.
///
/// Returns the node that should be highlighted alongside the placement.
pub fn compute_placement<Q: AnchorQuery>(
    step: &Step,
    dom: &Q,
    tooltip: Size,
    config: &TourConfig,
) -> (Placement, Option<Q::Node>) {
    let viewport = dom.viewport();
    let Some(anchor_id) = step.anchor_id() else {
        return (centered(viewport, tooltip), None);
    };

    let Some(node) = dom.resolve(anchor_id) else {
        warn!(step = %step.id, anchor = %anchor_id, "anchor not found, centering tooltip");
        return (centered(viewport, tooltip), None);
    };

    let bounds = dom.bounding_box(&node);
    if bounds.is_empty() {
        warn!(step = %step.id, anchor = %anchor_id, "anchor has no layout box, centering tooltip");
        return (centered(viewport, tooltip), None);
    }

    let mut placement = beside(bounds, step.side, tooltip, config.gap);
    if config.keep_in_viewport {
        placement = clamp_to_viewport(placement, viewport, tooltip);
    }
    (placement, Some(node))
}

/// Owns the highlighter and the single highlighted node.
#[derive(Debug)]
pub struct HighlightSlot<H: Highlighter> {
    highlighter: H,
    held: Option<H::Node>,
}

impl<H: Highlighter> HighlightSlot<H> {
    pub fn new(highlighter: H) -> Self {
        Self {
            highlighter,
            held: None,
        }
    }

    pub fn held(&self) -> Option<&H::Node> {
        self.held.as_ref()
    }

    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    /// Highlight `node`, releasing whatever was held first.
    ///
    /// Re-acquiring the held node is a no-op.
    pub fn acquire(&mut self, node: H::Node) {
        if self.held.as_ref() == Some(&node) {
            return;
        }
        self.release();
        trace!(node = ?node, "highlight applied");
        self.highlighter.apply_highlight(&node);
        self.held = Some(node);
    }

    /// Release the held highlight, if any.
    pub fn release(&mut self) {
        if let Some(node) = self.held.take() {
            trace!(node = ?node, "highlight removed");
            self.highlighter.remove_highlight(&node);
        }
    }

    /// Hold exactly `node` (or nothing).
    pub fn set(&mut self, node: Option<H::Node>) {
        match node {
            Some(node) => self.acquire(node),
            None => self.release(),
        }
    }
}

impl<H: Highlighter> Drop for HighlightSlot<H> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Computes placements for the active step and keeps its anchor highlighted.
#[derive(Debug)]
pub struct Positioner<H: Highlighter> {
    slot: HighlightSlot<H>,
    config: TourConfig,
}

impl<H: Highlighter> Positioner<H> {
    pub fn new(highlighter: H, config: TourConfig) -> Self {
        Self {
            slot: HighlightSlot::new(highlighter),
            config,
        }
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn highlighted(&self) -> Option<&H::Node> {
        self.slot.held()
    }

    pub fn highlighter(&self) -> &H {
        self.slot.highlighter()
    }

    /// Position `step` against `dom`, moving the highlight to its anchor.
    ///
    /// `tooltip` is the measured tooltip size; `None` uses the configured
    /// fallback. With no step, the highlight is released.
    pub fn layout<Q>(
        &mut self,
        step: Option<&Step>,
        dom: &Q,
        tooltip: Option<Size>,
    ) -> Option<Placement>
    where
        Q: AnchorQuery<Node = H::Node>,
    {
        let Some(step) = step else {
            self.slot.release();
            return None;
        };
        let tooltip = tooltip.unwrap_or(self.config.tooltip_size);
        let (placement, node) = compute_placement(step, dom, tooltip, &self.config);
        debug!(
            step = %step.id,
            top = placement.top,
            left = placement.left,
            side = placement.side.as_str(),
            centered = placement.is_centered(),
            "tooltip placed"
        );
        self.slot.set(node);
        Some(placement)
    }

    pub fn release(&mut self) {
        self.slot.release();
    }
}
