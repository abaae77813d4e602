#![forbid(unsafe_code)]

//! Sample health-coaching tour and the page layouts it anchors to.

use waypoint::{Catalog, CatalogError, Page, Rect, Side, Size, Step};
use waypoint_harness::StaticDom;

pub const VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Route the demo starts on unless `--path` says otherwise.
pub const DEFAULT_PATH: &str = "/dashboard";

pub fn sample_pages() -> Vec<Page> {
    vec![
        Page::new("dashboard", "/dashboard", "Dashboard")
            .description("Daily overview of activity, sleep and nutrition.")
            .step(Step::new(
                "dash-welcome",
                "Welcome to your coaching space",
                "A quick tour of where everything lives.",
            ))
            .step(
                Step::new(
                    "dash-summary",
                    "Your week at a glance",
                    "Totals for the last seven days.",
                )
                .anchor("weekly-summary")
                .side(Side::Right),
            )
            .step(
                Step::new(
                    "dash-streak",
                    "Keep the streak alive",
                    "Days in a row you hit your targets.",
                )
                .anchor("streak-badge"),
            ),
        Page::new("goals", "/goals", "Goals")
            .description("Targets set with your coach.")
            .step(
                Step::new("goals-list", "Active goals", "Each card tracks one target.")
                    .anchor("goal-list")
                    .side(Side::Right),
            )
            .step(
                Step::new("goals-add", "Add a goal", "Propose a new target for review.")
                    .anchor("add-goal-button")
                    .side(Side::Left),
            ),
        Page::new("nutrition", "/nutrition", "Nutrition")
            .description("Meals and macronutrients.")
            .step(
                Step::new(
                    "nutrition-macros",
                    "Macro balance",
                    "Protein, carbs and fat against plan.",
                )
                .anchor("macro-chart")
                .side(Side::Top),
            )
            .step(
                Step::new("nutrition-log", "Meal log", "Everything you logged today.")
                    .anchor("meal-log"),
            ),
        Page::new("coaching", "/coaching", "Coaching")
            .description("Sessions and messages with your coach.")
            .step(
                Step::new("coaching-coach", "Your coach", "Reach out any time.")
                    .anchor("coach-card")
                    .side(Side::Left),
            )
            .step(
                Step::new(
                    "coaching-sessions",
                    "Upcoming sessions",
                    "Join from here when it starts.",
                )
                .anchor("session-schedule")
                .side(Side::Top),
            ),
    ]
}

pub fn sample_catalog() -> Result<Catalog, CatalogError> {
    Catalog::new(sample_pages())
}

/// Laid-out anchors of the page mounted at `path`. Unknown routes mount nothing.
pub fn page_layout(path: &str) -> StaticDom {
    let nodes: &[(&str, Rect)] = match path {
        "/dashboard" => &[
            ("weekly-summary", Rect::new(96.0, 264.0, 480.0, 220.0)),
            ("streak-badge", Rect::new(96.0, 1040.0, 160.0, 64.0)),
        ],
        "/goals" => &[
            ("goal-list", Rect::new(120.0, 264.0, 520.0, 420.0)),
            ("add-goal-button", Rect::new(40.0, 1100.0, 140.0, 40.0)),
        ],
        "/nutrition" => &[
            ("macro-chart", Rect::new(360.0, 264.0, 640.0, 300.0)),
            ("meal-log", Rect::new(96.0, 264.0, 640.0, 220.0)),
        ],
        "/coaching" => &[
            ("coach-card", Rect::new(96.0, 900.0, 320.0, 180.0)),
            ("session-schedule", Rect::new(420.0, 264.0, 600.0, 280.0)),
        ],
        _ => &[],
    };
    nodes
        .iter()
        .fold(StaticDom::new(VIEWPORT), |dom, (id, rect)| dom.with_node(*id, *rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::AnchorQuery;

    #[test]
    fn sample_catalog_is_valid() {
        let catalog = sample_catalog().expect("sample catalog validates");
        assert_eq!(catalog.page_count(), 4);
        assert_eq!(catalog.total_steps(), 9);
        assert_eq!(catalog.page_index(DEFAULT_PATH), Some(0));
    }

    #[test]
    fn every_anchor_is_mounted_on_its_page() {
        let catalog = sample_catalog().expect("valid");
        for page in catalog.pages() {
            let dom = page_layout(&page.path);
            for step in &page.steps {
                if let Some(anchor) = step.anchor_id() {
                    assert!(dom.resolve(anchor).is_some(), "{anchor} missing on {}", page.path);
                }
            }
        }
    }

    #[test]
    fn anchors_are_page_local() {
        assert!(page_layout("/goals").resolve("weekly-summary").is_none());
        assert_eq!(page_layout("/settings").anchors().count(), 0);
    }
}
