#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use waypoint::{Catalog, Tour};
use waypoint_harness::MemoryRouter;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(catalog) = Catalog::from_json_str(text) else {
        return;
    };

    // Anything that loads must be walkable start to finish.
    let total = catalog.total_steps();
    assert!(total > 0, "loaded catalog has no steps");
    assert_eq!(catalog.ordinal(catalog.last()), Some(total));

    let start = catalog.pages()[0].path.clone();
    let mut tour = Tour::new(Arc::new(catalog), MemoryRouter::new(start));
    tour.start();
    let mut seen = 1;
    while tour.next().is_some() && tour.is_active() {
        seen += 1;
        assert!(seen <= total, "walk overran the catalog");
        assert!(tour.progress() <= 100);
    }
    assert_eq!(seen, total, "walk skipped steps");
    assert_eq!(tour.progress(), 0);
});
