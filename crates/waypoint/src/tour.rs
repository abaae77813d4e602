#![forbid(unsafe_code)]

//! Tour state machine and route synchronization.
//!
//! A [`Tour`] is either inactive or active at a [`Position`]. Transitions are
//! synchronous and run to completion; each returns the [`TourEvent`] it caused,
//! or `None` when the call was a no-op.
//!
//! Crossing a page boundary asks the [`Router`] to navigate before the new
//! position is committed. The router later reports that navigation (and any
//! navigation the tour did not start) through [`Tour::sync_path`], which
//! reconciles the page pointer with the route:
//!
//! - same page as the current position: kept as is
//! - another cataloged page: reset to its first step
//! - unknown path: reset to the first step of the first page
//!
//! Because engine-initiated navigation always lands on the page the tour
//! already moved to, the reconcile after `next()`/`previous()` is a no-op.

use std::sync::Arc;

use tracing::{debug, info, warn};
use waypoint_core::{NoopNotifier, Notifier, Router, TourNotice};

use crate::catalog::{Catalog, Page, Position, Step};
use crate::config::TourConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourState {
    #[default]
    Inactive,
    Active(Position),
}

/// Why the active step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourAdvanceReason {
    Next,
    Previous,
    /// The route changed underneath the tour.
    Navigation,
}

impl TourAdvanceReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Navigation => "navigation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// `end()` was called.
    User,
    /// `next()` ran past the last step of the last page.
    Completed,
}

impl EndReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    Started {
        at: Position,
    },
    StepChanged {
        from: Position,
        to: Position,
        reason: TourAdvanceReason,
    },
    Ended {
        last: Position,
        reason: EndReason,
    },
}

/// How a route change was reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Tour inactive; nothing to reconcile.
    Ignored,
    /// Route resolves to the current page.
    Kept,
    /// Route resolves to another page; moved to its first step.
    Reset,
    /// Route not in the catalog; moved to the first page.
    Fallback,
}

impl SyncOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Kept => "kept",
            Self::Reset => "reset",
            Self::Fallback => "fallback",
        }
    }
}

/// Read-only view of the tour for presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourSnapshot<'a> {
    pub is_active: bool,
    pub current_page: Option<&'a Page>,
    pub current_step: Option<&'a Step>,
    /// Percent of all steps reached, 0 when inactive.
    pub progress: u8,
    pub position: Option<Position>,
    /// 1-based ordinal across the catalog, 0 when inactive.
    pub overall_step: usize,
    pub total_steps: usize,
    /// 1-based index within the current page, 0 when inactive.
    pub page_step: usize,
    pub page_steps: usize,
    pub is_first: bool,
    pub is_last: bool,
}

/// The guided-tour state machine.
#[derive(Debug)]
pub struct Tour<R, N = NoopNotifier> {
    catalog: Arc<Catalog>,
    router: R,
    notifier: N,
    notifications: bool,
    started_message: String,
    ended_message: String,
    state: TourState,
}

impl<R: Router> Tour<R, NoopNotifier> {
    pub fn new(catalog: Arc<Catalog>, router: R) -> Self {
        Self::with_notifier(catalog, router, NoopNotifier, &TourConfig::default())
    }
}

impl<R: Router, N: Notifier> Tour<R, N> {
    pub fn with_notifier(
        catalog: Arc<Catalog>,
        router: R,
        notifier: N,
        config: &TourConfig,
    ) -> Self {
        Self {
            catalog,
            router,
            notifier,
            notifications: config.notifications,
            started_message: config.started_message.clone(),
            ended_message: config.ended_message.clone(),
            state: TourState::Inactive,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut R {
        &mut self.router
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> TourState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TourState::Active(_))
    }

    pub fn position(&self) -> Option<Position> {
        match self.state {
            TourState::Active(pos) => Some(pos),
            TourState::Inactive => None,
        }
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.catalog.step(self.position()?)
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.catalog.page(self.position()?.page)
    }

    /// Start (or restart) at the first step of the page matching the current route.
    ///
    /// An unknown route starts at the first page.
    pub fn start(&mut self) -> Option<TourEvent> {
        let path = self.router.current_path();
        let page = self.resolve_or_first(&path);
        let at = Position::new(page, 0);
        self.state = TourState::Active(at);
        info!(page = at.page, step = at.step, path = %path, "tour started");
        self.send_notice(TourNotice::Started);
        Some(TourEvent::Started { at })
    }

    /// Stop the tour from any state.
    ///
    /// The ended notice goes out on every call. The returned event is `None`
    /// when the tour was already inactive.
    pub fn end(&mut self) -> Option<TourEvent> {
        match self.position() {
            Some(last) => Some(self.finish(last, EndReason::User)),
            None => {
                info!(reason = EndReason::User.as_str(), active = false, "tour ended");
                self.send_notice(TourNotice::Ended);
                None
            }
        }
    }

    /// Advance one step, crossing into the next page or completing the tour.
    pub fn next(&mut self) -> Option<TourEvent> {
        let from = self.position()?;
        let page_steps = self.catalog.page_step_count(from.page);

        let to = if from.step + 1 < page_steps {
            Position::new(from.page, from.step + 1)
        } else if let Some(page) = self.catalog.page(from.page + 1) {
            debug!(path = %page.path, "crossing to next page");
            self.router.navigate(&page.path);
            Position::new(from.page + 1, 0)
        } else {
            return Some(self.finish(from, EndReason::Completed));
        };

        Some(self.move_to(from, to, TourAdvanceReason::Next))
    }

    /// Step back one step, crossing into the previous page's last step.
    ///
    /// A no-op on the very first step; never wraps around.
    pub fn previous(&mut self) -> Option<TourEvent> {
        let from = self.position()?;

        let to = if from.step > 0 {
            Position::new(from.page, from.step - 1)
        } else if from.page > 0 {
            let page = from.page - 1;
            let last = self.catalog.last_step_index(page)?;
            let path = self.catalog.page(page)?.path.clone();
            debug!(path = %path, "crossing to previous page");
            self.router.navigate(&path);
            Position::new(page, last)
        } else {
            return None;
        };

        Some(self.move_to(from, to, TourAdvanceReason::Previous))
    }

    /// Reconcile the tour with a route change, whoever caused it.
    pub fn sync_path(&mut self, path: &str) -> Option<TourEvent> {
        let (outcome, event) = self.reconcile(path);
        debug!(path = %path, outcome = outcome.as_str(), "route reconciled");
        event
    }

    /// Drain pending route notifications and reconcile once with the router's
    /// current path.
    ///
    /// Queued paths may be stale (a `next()` and a `previous()` both crossed a
    /// page before the host pumped), so only the post-navigation path counts.
    pub fn sync_router(&mut self) -> Option<TourEvent> {
        let mut changed = false;
        while self.router.poll_path_change().is_some() {
            changed = true;
        }
        if !changed {
            return None;
        }
        let path = self.router.current_path();
        self.sync_path(&path)
    }

    /// Percent of all steps reached, rounded; 0 when inactive.
    pub fn progress(&self) -> u8 {
        let Some(pos) = self.position() else {
            return 0;
        };
        let total = self.catalog.total_steps();
        let ordinal = self.catalog.ordinal(pos).unwrap_or(0);
        percent(ordinal, total)
    }

    pub fn snapshot(&self) -> TourSnapshot<'_> {
        let total_steps = self.catalog.total_steps();
        let Some(pos) = self.position() else {
            return TourSnapshot {
                is_active: false,
                current_page: None,
                current_step: None,
                progress: 0,
                position: None,
                overall_step: 0,
                total_steps,
                page_step: 0,
                page_steps: 0,
                is_first: false,
                is_last: false,
            };
        };
        TourSnapshot {
            is_active: true,
            current_page: self.catalog.page(pos.page),
            current_step: self.catalog.step(pos),
            progress: self.progress(),
            position: Some(pos),
            overall_step: self.catalog.ordinal(pos).unwrap_or(0),
            total_steps,
            page_step: pos.step + 1,
            page_steps: self.catalog.page_step_count(pos.page),
            is_first: pos == self.catalog.first(),
            is_last: pos == self.catalog.last(),
        }
    }

    /// Like [`Self::sync_path`], also reporting how the route was reconciled.
    pub fn reconcile(&mut self, path: &str) -> (SyncOutcome, Option<TourEvent>) {
        let Some(from) = self.position() else {
            return (SyncOutcome::Ignored, None);
        };
        match self.catalog.page_index(path) {
            Some(page) if page == from.page => (SyncOutcome::Kept, None),
            Some(page) => {
                let to = Position::new(page, 0);
                let event = self.move_to(from, to, TourAdvanceReason::Navigation);
                (SyncOutcome::Reset, Some(event))
            }
            None => {
                warn!(path = %path, "route not in tour catalog, falling back to first page");
                let to = Position::START;
                if from == to {
                    return (SyncOutcome::Fallback, None);
                }
                let event = self.move_to(from, to, TourAdvanceReason::Navigation);
                (SyncOutcome::Fallback, Some(event))
            }
        }
    }

    fn resolve_or_first(&self, path: &str) -> usize {
        self.catalog.page_index(path).unwrap_or_else(|| {
            warn!(path = %path, "route not in tour catalog, falling back to first page");
            0
        })
    }

    fn move_to(&mut self, from: Position, to: Position, reason: TourAdvanceReason) -> TourEvent {
        debug_assert!(self.catalog.contains(to), "{to:?} outside catalog");
        self.state = TourState::Active(to);
        debug!(
            from_page = from.page,
            from_step = from.step,
            to_page = to.page,
            to_step = to.step,
            reason = reason.as_str(),
            "tour step changed"
        );
        TourEvent::StepChanged { from, to, reason }
    }

    fn finish(&mut self, last: Position, reason: EndReason) -> TourEvent {
        self.state = TourState::Inactive;
        info!(reason = reason.as_str(), "tour ended");
        self.send_notice(TourNotice::Ended);
        TourEvent::Ended { last, reason }
    }

    fn send_notice(&mut self, notice: TourNotice) {
        if !self.notifications {
            return;
        }
        let message = match notice {
            TourNotice::Started => &self.started_message,
            TourNotice::Ended => &self.ended_message,
        };
        self.notifier.notify(notice, message);
    }
}

/// `100 * part / total`, rounded half up.
fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let value = (200 * part + total) / (2 * total);
    u8::try_from(value.min(100)).unwrap_or(100)
}
