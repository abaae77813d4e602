#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use waypoint::{Catalog, Page, Rect, Size, Step, TourConfig, TourMsg, Walkthrough};
use waypoint_core::{NoopNotifier, Router};
use waypoint_harness::{MemoryRouter, RecordingHighlighter, StaticDom};

#[derive(Debug, Arbitrary)]
enum Op {
    Start,
    End,
    Next,
    Previous,
    Visit(u8),
    Pump,
    Resize(u16, u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    pages: Vec<u8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let sizes: Vec<usize> = input
        .pages
        .iter()
        .take(8)
        .map(|n| usize::from(n % 6) + 1)
        .collect();
    if sizes.is_empty() {
        return;
    }
    let pages = sizes
        .iter()
        .enumerate()
        .map(|(p, &n)| {
            (0..n).fold(Page::new(format!("pg{p}"), format!("/{p}"), "P"), |page, s| {
                page.step(Step::new(format!("{p}.{s}"), "", "").anchor(format!("n{p}.{s}")))
            })
        })
        .collect();
    let Ok(catalog) = Catalog::new(pages) else {
        return;
    };
    let catalog = Arc::new(catalog);

    let mut dom = StaticDom::new(Size::new(800.0, 600.0));
    for (p, &n) in sizes.iter().enumerate() {
        for s in (0..n).filter(|s| s % 3 != 1) {
            let bounds = Rect::new(30.0 * s as f64, 40.0 * p as f64, 90.0, 20.0);
            dom.insert(format!("n{p}.{s}"), bounds);
        }
    }

    let lit = RecordingHighlighter::new();
    let config = TourConfig::default().keep_in_viewport(true);
    let mut host = Walkthrough::new(
        Arc::clone(&catalog),
        MemoryRouter::new("/0"),
        lit.clone(),
        NoopNotifier,
        config,
    );

    for op in input.ops.iter().take(256) {
        match op {
            Op::Start => {
                host.update(TourMsg::Start);
            }
            Op::End => {
                host.update(TourMsg::End);
            }
            Op::Next => {
                host.update(TourMsg::Next);
            }
            Op::Previous => {
                host.update(TourMsg::Previous);
            }
            Op::Visit(i) => {
                let path = if usize::from(*i) < sizes.len() * 2 {
                    format!("/{}", usize::from(*i) % sizes.len())
                } else {
                    "/elsewhere".to_string()
                };
                host.router_mut().visit(path);
            }
            Op::Pump => {
                host.pump_router();
            }
            Op::Resize(w, h) => {
                dom.set_viewport(Size::new(f64::from(*w), f64::from(*h)));
                host.invalidate_layout();
            }
        }

        if let Some(placement) = host.layout(&dom, None) {
            assert!(placement.top.is_finite() && placement.left.is_finite());
        }
        match host.tour().position() {
            Some(pos) => {
                assert!(catalog.contains(pos));
                assert!((1..=100).contains(&host.progress()));
            }
            None => assert!(lit.lit().is_empty()),
        }
        assert!(lit.lit().len() <= 1);
        let _ = host.tour().router().current_path();
    }
});
