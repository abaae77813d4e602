#![forbid(unsafe_code)]

//! Walkthrough: the tour state machine wired to the tooltip positioner.
//!
//! Transitions only mark layout as pending. Geometry is computed later, in
//! [`Walkthrough::layout`], which the host calls once the document has
//! reflowed after navigation or a step change. Ending the tour releases the
//! highlight immediately, without waiting for the next layout pass.
//!
//! ```text
//!  host input ──► update(TourMsg) ──► Tour ──► Router::navigate
//!                        │
//!                        └─► layout pending ──► layout(&dom) ──► Placement + highlight
//! ```

use std::sync::Arc;

use waypoint_core::{AnchorQuery, Highlighter, NoopNotifier, Notifier, Router, Size};

use crate::anchor::{Placement, Positioner};
use crate::catalog::Catalog;
use crate::config::TourConfig;
use crate::tour::{Tour, TourEvent, TourSnapshot};

/// Messages the host feeds into the walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourMsg {
    Start,
    End,
    Next,
    Previous,
    /// The route changed, for whatever reason.
    PathChanged(String),
}

#[derive(Debug)]
pub struct Walkthrough<R, H: Highlighter, N = NoopNotifier> {
    tour: Tour<R, N>,
    positioner: Positioner<H>,
    layout_pending: bool,
    placement: Option<Placement>,
    /// Tooltip size the cached placement was computed with.
    laid_out_with: Option<Size>,
}

impl<R, H, N> Walkthrough<R, H, N>
where
    R: Router,
    H: Highlighter,
    N: Notifier,
{
    pub fn new(
        catalog: Arc<Catalog>,
        router: R,
        highlighter: H,
        notifier: N,
        config: TourConfig,
    ) -> Self {
        let tour = Tour::with_notifier(catalog, router, notifier, &config);
        Self {
            tour,
            positioner: Positioner::new(highlighter, config),
            layout_pending: false,
            placement: None,
            laid_out_with: None,
        }
    }

    pub fn tour(&self) -> &Tour<R, N> {
        &self.tour
    }

    pub fn positioner(&self) -> &Positioner<H> {
        &self.positioner
    }

    pub fn router_mut(&mut self) -> &mut R {
        self.tour.router_mut()
    }

    pub fn snapshot(&self) -> TourSnapshot<'_> {
        self.tour.snapshot()
    }

    pub fn is_active(&self) -> bool {
        self.tour.is_active()
    }

    pub fn progress(&self) -> u8 {
        self.tour.progress()
    }

    /// Placement from the last layout pass, if still current.
    pub fn placement(&self) -> Option<Placement> {
        if self.layout_pending { None } else { self.placement }
    }

    pub fn layout_pending(&self) -> bool {
        self.layout_pending
    }

    pub fn start(&mut self) -> Option<TourEvent> {
        let event = self.tour.start();
        self.after(event)
    }

    pub fn end(&mut self) -> Option<TourEvent> {
        let event = self.tour.end();
        self.after(event)
    }

    pub fn next(&mut self) -> Option<TourEvent> {
        let event = self.tour.next();
        self.after(event)
    }

    pub fn previous(&mut self) -> Option<TourEvent> {
        let event = self.tour.previous();
        self.after(event)
    }

    pub fn sync_path(&mut self, path: &str) -> Option<TourEvent> {
        let event = self.tour.sync_path(path);
        self.after(event)
    }

    /// Deliver the router's pending path changes to the sync bridge.
    pub fn pump_router(&mut self) -> Option<TourEvent> {
        let event = self.tour.sync_router();
        self.after(event)
    }

    pub fn update(&mut self, msg: TourMsg) -> Option<TourEvent> {
        match msg {
            TourMsg::Start => self.start(),
            TourMsg::End => self.end(),
            TourMsg::Next => self.next(),
            TourMsg::Previous => self.previous(),
            TourMsg::PathChanged(path) => self.sync_path(&path),
        }
    }

    /// Force the next [`Self::layout`] to recompute (viewport resize, scroll).
    pub fn invalidate_layout(&mut self) {
        if self.tour.is_active() {
            self.layout_pending = true;
        }
    }

    /// Deferred layout pass: place the current step against a reflowed document.
    ///
    /// Returns the cached placement when no transition happened and `tooltip`
    /// matches the size of the last pass. A newly measured size recomputes.
    pub fn layout<Q>(&mut self, dom: &Q, tooltip: Option<Size>) -> Option<Placement>
    where
        Q: AnchorQuery<Node = H::Node>,
    {
        if !self.tour.is_active() {
            return None;
        }
        if !self.layout_pending && self.laid_out_with == tooltip {
            return self.placement;
        }
        self.layout_pending = false;
        self.laid_out_with = tooltip;
        self.placement = self.positioner.layout(self.tour.current_step(), dom, tooltip);
        self.placement
    }

    fn after(&mut self, event: Option<TourEvent>) -> Option<TourEvent> {
        match event {
            Some(TourEvent::Ended { .. }) => {
                self.positioner.release();
                self.placement = None;
                self.laid_out_with = None;
                self.layout_pending = false;
            }
            Some(_) => self.layout_pending = true,
            None => {}
        }
        event
    }
}
