#![forbid(unsafe_code)]

//! End-to-end tour scenarios against the in-memory host.
//!
//! Run:
//!   cargo test -p waypoint --test tour_scenarios

use std::sync::Arc;

use waypoint::{
    Catalog, EndReason, Page, Position, Rect, Side, Size, Step, TourAdvanceReason, TourConfig,
    TourEvent, TourMsg, Walkthrough,
};
use waypoint_core::{Router, TourNotice};
use waypoint_harness::{
    HighlightOp, JsonlLogger, MemoryRouter, RecordingHighlighter, RecordingNotifier, StaticDom,
};

type Host = Walkthrough<MemoryRouter, RecordingHighlighter, RecordingNotifier>;

const TIP: Size = Size::new(200.0, 100.0);

fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            Page::new("a", "/a", "Page A")
                .step(Step::new("a-intro", "Welcome", "Overview").anchor("header"))
                .step(Step::new("a-card", "Card", "A card").anchor("card").side(Side::Right))
                .step(Step::new("a-outro", "Done here", "Centered")),
            Page::new("b", "/b", "Page B")
                .step(Step::new("b-chart", "Chart", "Trends").anchor("chart").side(Side::Top))
                .step(Step::new("b-missing", "Gone", "Anchor never mounts").anchor("ghost")),
        ])
        .expect("valid catalog"),
    )
}

fn dom() -> StaticDom {
    StaticDom::new(Size::new(1200.0, 800.0))
        .with_node("header", Rect::new(0.0, 0.0, 1200.0, 60.0))
        .with_node("card", Rect::new(200.0, 100.0, 300.0, 150.0))
        .with_node("chart", Rect::new(400.0, 300.0, 500.0, 250.0))
}

struct Fixture {
    host: Host,
    lit: RecordingHighlighter,
    notices: RecordingNotifier,
    dom: StaticDom,
    log: JsonlLogger,
}

impl Fixture {
    fn at(path: &str) -> Self {
        let lit = RecordingHighlighter::new();
        let notices = RecordingNotifier::new();
        let host = Walkthrough::new(
            catalog(),
            MemoryRouter::new(path),
            lit.clone(),
            notices.clone(),
            TourConfig::default(),
        );
        Self {
            host,
            lit,
            notices,
            dom: dom(),
            log: JsonlLogger::new("tour_scenarios").with_context("start_path", path),
        }
    }

    /// One host event-loop turn: apply the message, deliver route changes, lay out.
    fn turn(&mut self, msg: TourMsg) -> Option<TourEvent> {
        let label = format!("{msg:?}");
        let event = self.host.update(msg);
        self.host.pump_router();
        self.host.layout(&self.dom, Some(TIP));
        let progress = self.host.progress().to_string();
        self.log.log("turn", &[("msg", &label), ("progress", &progress)]);
        event
    }

    fn position(&self) -> Option<Position> {
        self.host.tour().position()
    }
}

#[test]
fn two_page_walk_matches_expected_progress() {
    let mut fx = Fixture::at("/a");

    fx.turn(TourMsg::Start);
    assert_eq!(fx.position(), Some(Position::new(0, 0)));
    assert_eq!(fx.host.progress(), 20);

    fx.turn(TourMsg::Next);
    fx.turn(TourMsg::Next);
    assert_eq!(fx.position(), Some(Position::new(0, 2)));
    assert_eq!(fx.host.progress(), 60);

    fx.turn(TourMsg::Next);
    assert_eq!(fx.position(), Some(Position::new(1, 0)));
    assert_eq!(fx.host.tour().router().history(), ["/b"]);
    assert_eq!(fx.host.progress(), 80);

    fx.turn(TourMsg::Next);
    assert_eq!(fx.position(), Some(Position::new(1, 1)));
    assert_eq!(fx.host.progress(), 100);

    let event = fx.turn(TourMsg::Next);
    assert_eq!(
        event,
        Some(TourEvent::Ended {
            last: Position::new(1, 1),
            reason: EndReason::Completed,
        })
    );
    let snap = fx.host.snapshot();
    assert!(!snap.is_active);
    assert_eq!(snap.progress, 0);
    assert_eq!(fx.notices.kinds(), vec![TourNotice::Started, TourNotice::Ended]);
}

#[test]
fn previous_across_page_lands_on_last_step() {
    let mut fx = Fixture::at("/b");
    fx.turn(TourMsg::Start);
    assert_eq!(fx.position(), Some(Position::new(1, 0)));

    let event = fx.turn(TourMsg::Previous);
    assert_eq!(
        event,
        Some(TourEvent::StepChanged {
            from: Position::new(1, 0),
            to: Position::new(0, 2),
            reason: TourAdvanceReason::Previous,
        })
    );
    // The router's notification for /a must not pull the tour back to step 0.
    assert_eq!(fx.position(), Some(Position::new(0, 2)));
    assert_eq!(fx.host.tour().router().current_path(), "/a");
}

#[test]
fn external_navigation_resets_to_page_start() {
    let mut fx = Fixture::at("/a");
    fx.turn(TourMsg::Start);
    fx.turn(TourMsg::Next);
    assert_eq!(fx.position(), Some(Position::new(0, 1)));

    fx.host.router_mut().visit("/b");
    let event = fx.host.pump_router();
    assert_eq!(
        event,
        Some(TourEvent::StepChanged {
            from: Position::new(0, 1),
            to: Position::new(1, 0),
            reason: TourAdvanceReason::Navigation,
        })
    );
    let placement = fx.host.layout(&fx.dom, Some(TIP)).expect("placement");
    assert_eq!(placement.side, Side::Top);
    assert_eq!(fx.lit.lit(), vec!["chart".to_string()]);
}

#[test]
fn unknown_route_falls_back_to_first_page() {
    let mut fx = Fixture::at("/b");
    fx.turn(TourMsg::Start);
    fx.turn(TourMsg::Next);

    fx.turn(TourMsg::PathChanged("/settings".into()));
    assert!(fx.host.is_active());
    assert_eq!(fx.position(), Some(Position::START));
}

#[test]
fn start_on_uncataloged_route_uses_first_page() {
    let mut fx = Fixture::at("/nowhere");
    let event = fx.turn(TourMsg::Start);
    let at = Position::START;
    assert_eq!(event, Some(TourEvent::Started { at }));
}

#[test]
fn boundary_calls_are_noops() {
    let mut fx = Fixture::at("/a");
    assert_eq!(fx.turn(TourMsg::Next), None);
    assert_eq!(fx.turn(TourMsg::Previous), None);
    assert!(!fx.host.is_active());

    fx.turn(TourMsg::Start);
    assert_eq!(fx.turn(TourMsg::Previous), None);
    assert_eq!(fx.position(), Some(Position::START));
    assert!(fx.host.tour().router().history().is_empty());
}

#[test]
fn anchored_and_centered_placements() {
    let mut fx = Fixture::at("/a");
    fx.turn(TourMsg::Start);
    let header = fx.host.placement().expect("placement");
    // Header spans the viewport; bottom side, 10px below.
    assert_eq!((header.top, header.left), (70.0, 500.0));
    assert_eq!(fx.lit.lit(), vec!["header".to_string()]);

    fx.turn(TourMsg::Next);
    let card = fx.host.placement().expect("placement");
    assert_eq!(card.side, Side::Right);
    assert_eq!((card.top, card.left), (225.0, 410.0));
    assert_eq!(fx.lit.lit(), vec!["card".to_string()]);

    fx.turn(TourMsg::Next);
    let outro = fx.host.placement().expect("placement");
    assert!(outro.is_centered());
    assert_eq!((outro.top, outro.left), (350.0, 500.0));
    assert!(fx.lit.lit().is_empty());
}

#[test]
fn missing_anchor_centers_without_highlight() {
    let mut fx = Fixture::at("/b");
    fx.turn(TourMsg::Start);
    assert_eq!(fx.lit.lit(), vec!["chart".to_string()]);
    fx.turn(TourMsg::Next);
    let placement = fx.host.placement().expect("placement");
    assert!(placement.is_centered());
    assert_eq!(placement.side, Side::Bottom);
    assert!(fx.lit.lit().is_empty());
}

#[test]
fn highlight_released_on_every_exit_path() {
    let mut fx = Fixture::at("/a");
    fx.turn(TourMsg::Start);
    fx.turn(TourMsg::Next);
    fx.turn(TourMsg::Previous);
    fx.turn(TourMsg::End);
    assert!(fx.lit.lit().is_empty());
    assert_eq!(fx.lit.max_concurrent(), 1);
    assert_eq!(
        fx.lit.ops(),
        vec![
            HighlightOp::Apply("header".into()),
            HighlightOp::Remove("header".into()),
            HighlightOp::Apply("card".into()),
            HighlightOp::Remove("card".into()),
            HighlightOp::Apply("header".into()),
            HighlightOp::Remove("header".into()),
        ]
    );
}

#[test]
fn teardown_releases_highlight() {
    let lit = RecordingHighlighter::new();
    {
        let mut host: Walkthrough<_, _> = Walkthrough::new(
            catalog(),
            MemoryRouter::new("/b"),
            lit.clone(),
            waypoint_core::NoopNotifier,
            TourConfig::default(),
        );
        host.start();
        host.layout(&dom(), None);
        assert_eq!(lit.lit(), vec!["chart".to_string()]);
    }
    assert!(lit.lit().is_empty());
}

#[test]
fn anchor_unmounted_between_layouts_degrades_to_center() {
    let mut fx = Fixture::at("/a");
    fx.turn(TourMsg::Start);
    fx.dom.remove("header");
    fx.host.invalidate_layout();
    let placement = fx.host.layout(&fx.dom, Some(TIP)).expect("placement");
    assert!(placement.is_centered());
    assert!(fx.lit.lit().is_empty());
}

#[test]
fn page_crossing_next_advances_exactly_once() {
    let mut fx = Fixture::at("/a");
    fx.turn(TourMsg::Start);
    fx.turn(TourMsg::Next);
    fx.turn(TourMsg::Next);

    // Cross the boundary, then deliver the router's notification twice,
    // as a host that double-subscribes would.
    fx.host.next();
    fx.host.sync_path("/b");
    fx.host.sync_path("/b");
    fx.host.pump_router();
    assert_eq!(fx.position(), Some(Position::new(1, 0)));

    // Two clicks in one turn are two advances, never more.
    fx.turn(TourMsg::Previous);
    fx.host.next();
    fx.host.next();
    fx.host.pump_router();
    assert_eq!(fx.position(), Some(Position::new(1, 1)));
}

#[test]
fn restart_mid_tour_resets_to_route_page() {
    let mut fx = Fixture::at("/a");
    fx.turn(TourMsg::Start);
    fx.turn(TourMsg::Next);
    fx.turn(TourMsg::Next);
    fx.turn(TourMsg::Next);
    assert_eq!(fx.host.tour().router().current_path(), "/b");

    fx.turn(TourMsg::Start);
    assert_eq!(fx.position(), Some(Position::new(1, 0)));
    assert_eq!(fx.notices.kinds(), vec![TourNotice::Started, TourNotice::Started]);
}

#[test]
fn stale_route_notifications_are_not_replayed() {
    let mut fx = Fixture::at("/a");
    fx.turn(TourMsg::Start);
    fx.turn(TourMsg::Next);
    fx.turn(TourMsg::Next);

    // Cross to /b and straight back to /a before the host pumps the router.
    fx.host.next();
    fx.host.previous();
    assert_eq!(fx.host.tour().router().pending_changes(), 2);
    assert_eq!(fx.host.pump_router(), None);
    assert_eq!(fx.position(), Some(Position::new(0, 2)));
    assert_eq!(fx.host.tour().router().pending_changes(), 0);
}

#[test]
fn end_notifies_even_when_inactive() {
    let mut fx = Fixture::at("/a");
    assert_eq!(fx.turn(TourMsg::End), None);
    assert!(!fx.host.is_active());
    assert_eq!(fx.notices.kinds(), vec![TourNotice::Ended]);
    assert!(fx.lit.ops().is_empty());
}

#[test]
fn measured_tooltip_size_recomputes_cached_placement() {
    let mut fx = Fixture::at("/b");
    fx.turn(TourMsg::Start);
    fx.host.invalidate_layout();

    // chart: left 300, width 500, top side.
    let fallback = fx.host.layout(&fx.dom, None).expect("placement");
    assert_eq!(fallback.left, 550.0 - 160.0);
    assert_eq!(fallback.top, 400.0 - 10.0 - 180.0);

    let measured = fx
        .host
        .layout(&fx.dom, Some(Size::new(100.0, 40.0)))
        .expect("placement");
    assert_eq!(measured.left, 500.0);
    assert_eq!(measured.top, 350.0);
    assert_eq!(fx.lit.lit(), vec!["chart".to_string()]);
    assert_eq!(fx.lit.max_concurrent(), 1);
}
