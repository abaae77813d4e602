#![forbid(unsafe_code)]

//! Tour catalog: the immutable page → step hierarchy.
//!
//! # Invariants
//!
//! 1. Every page has at least one step.
//! 2. Page paths and page ids are unique; step ids are unique across the
//!    whole catalog.
//! 3. Within a page, step `order` values are exactly `1..=n` in sequence, and
//!    every step's `page_id` names the page that holds it.
//! 4. A [`Catalog`] can only be obtained through validation and exposes its
//!    pages by shared reference, so it never changes after construction.
//!
//! # Example
//!
//! ```
//! use waypoint::catalog::{Catalog, Page, Step};
//! use waypoint_core::Side;
//!
//! let catalog = Catalog::new(vec![
//!     Page::new("home", "/", "Home")
//!         .step(Step::new("welcome", "Welcome", "Start here."))
//!         .step(Step::new("nav", "Navigation", "Pages live here.").anchor("sidebar").side(Side::Right)),
//! ])
//! .expect("valid catalog");
//! assert_eq!(catalog.total_steps(), 2);
//! ```

use std::collections::HashSet;

use waypoint_core::Side;

use crate::error::CatalogError;

/// A single tooltip unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "catalog-file",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Step {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "catalog-file", serde(default))]
    pub description: String,
    /// Host anchor to attach to. `None` centers the tooltip.
    #[cfg_attr(
        feature = "catalog-file",
        serde(default, alias = "anchorId", skip_serializing_if = "Option::is_none")
    )]
    pub anchor: Option<String>,
    #[cfg_attr(feature = "catalog-file", serde(default))]
    pub side: Side,
    #[cfg_attr(feature = "catalog-file", serde(alias = "pageId"))]
    pub page_id: String,
    /// 1-based position within the owning page.
    pub order: u32,
}

impl Step {
    /// Create an unattached step. [`Page::step`] fills in `page_id` and `order`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            anchor: None,
            side: Side::default(),
            page_id: String::new(),
            order: 0,
        }
    }

    #[must_use]
    pub fn anchor(mut self, anchor_id: impl Into<String>) -> Self {
        self.anchor = Some(anchor_id.into());
        self
    }

    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn anchor_id(&self) -> Option<&str> {
        self.anchor.as_deref()
    }
}

/// A routed screen grouping an ordered list of steps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "catalog-file",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Page {
    pub id: String,
    pub path: String,
    pub name: String,
    #[cfg_attr(feature = "catalog-file", serde(default))]
    pub description: String,
    pub steps: Vec<Step>,
}

impl Page {
    pub fn new(id: impl Into<String>, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            name: name.into(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a step, assigning it this page's id and the next order.
    #[must_use]
    pub fn step(mut self, mut step: Step) -> Self {
        step.page_id.clone_from(&self.id);
        step.order = u32::try_from(self.steps.len() + 1).unwrap_or(u32::MAX);
        self.steps.push(step);
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// Coordinates of a step: page index, then step index within that page.
///
/// Both indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub page: usize,
    pub step: usize,
}

impl Position {
    pub const START: Position = Position { page: 0, step: 0 };

    #[inline]
    pub const fn new(page: usize, step: usize) -> Self {
        Self { page, step }
    }
}

/// Validated, immutable collection of pages and steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pages: Vec<Page>,
    /// `offsets[i]` is the number of steps on pages before `i`.
    offsets: Vec<usize>,
    total_steps: usize,
}

impl Catalog {
    /// Validate `pages` and build a catalog.
    pub fn new(pages: Vec<Page>) -> Result<Self, CatalogError> {
        validate(&pages)?;
        let mut offsets = Vec::with_capacity(pages.len());
        let mut total_steps = 0;
        for page in &pages {
            offsets.push(total_steps);
            total_steps += page.steps.len();
        }
        Ok(Self {
            pages,
            offsets,
            total_steps,
        })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Steps across all pages.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Number of steps on page `index`, or 0 for an unknown page.
    pub fn page_step_count(&self, index: usize) -> usize {
        self.pages.get(index).map_or(0, Page::step_count)
    }

    /// Index of the page routed at `path`.
    pub fn page_index(&self, path: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.path == path)
    }

    pub fn step(&self, pos: Position) -> Option<&Step> {
        self.pages.get(pos.page)?.steps.get(pos.step)
    }

    /// Whether `pos` addresses a step in this catalog.
    pub fn contains(&self, pos: Position) -> bool {
        self.step(pos).is_some()
    }

    /// 1-based ordinal of `pos` across the whole catalog.
    pub fn ordinal(&self, pos: Position) -> Option<usize> {
        self.step(pos)?;
        Some(self.offsets[pos.page] + pos.step + 1)
    }

    /// Index of the last step on page `index`.
    pub fn last_step_index(&self, index: usize) -> Option<usize> {
        self.page_step_count(index).checked_sub(1)
    }

    pub fn first(&self) -> Position {
        Position::START
    }

    pub fn last(&self) -> Position {
        let page = self.pages.len() - 1;
        Position::new(page, self.pages[page].steps.len() - 1)
    }

    /// Locate a step by id.
    pub fn find_step(&self, id: &str) -> Option<Position> {
        self.pages.iter().enumerate().find_map(|(page, p)| {
            p.steps
                .iter()
                .position(|s| s.id == id)
                .map(|step| Position::new(page, step))
        })
    }

    /// Iterate every position in tour order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(page, p)| (0..p.steps.len()).map(move |step| Position::new(page, step)))
    }
}

fn validate(pages: &[Page]) -> Result<(), CatalogError> {
    if pages.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut paths = HashSet::new();
    let mut page_ids = HashSet::new();
    let mut step_ids = HashSet::new();

    for (page_index, page) in pages.iter().enumerate() {
        if page.id.trim().is_empty() {
            return Err(CatalogError::BlankField {
                what: "page id",
                at: format!("page #{page_index}"),
            });
        }
        if page.path.trim().is_empty() {
            return Err(CatalogError::BlankField {
                what: "page path",
                at: format!("page {:?}", page.id),
            });
        }
        if !page_ids.insert(page.id.as_str()) {
            return Err(CatalogError::DuplicatePageId {
                id: page.id.clone(),
            });
        }
        if !paths.insert(page.path.as_str()) {
            return Err(CatalogError::DuplicatePath {
                path: page.path.clone(),
            });
        }
        if page.steps.is_empty() {
            return Err(CatalogError::EmptyPage {
                path: page.path.clone(),
            });
        }

        for (index, step) in page.steps.iter().enumerate() {
            if step.id.trim().is_empty() {
                return Err(CatalogError::BlankField {
                    what: "step id",
                    at: format!("page {:?} step #{index}", page.id),
                });
            }
            if !step_ids.insert(step.id.as_str()) {
                return Err(CatalogError::DuplicateStepId {
                    id: step.id.clone(),
                });
            }
            if step.page_id != page.id {
                return Err(CatalogError::PageMismatch {
                    step: step.id.clone(),
                    expected: page.id.clone(),
                    found: step.page_id.clone(),
                });
            }
            let expected = u32::try_from(index + 1).unwrap_or(u32::MAX);
            if step.order != expected {
                return Err(CatalogError::OrderMismatch {
                    page: page.id.clone(),
                    step: step.id.clone(),
                    expected,
                    found: step.order,
                });
            }
            if step.anchor.as_deref().is_some_and(|a| a.trim().is_empty()) {
                return Err(CatalogError::BlankField {
                    what: "anchor id",
                    at: format!("step {:?}", step.id),
                });
            }
        }
    }
    Ok(())
}

#[cfg(feature = "catalog-file")]
mod file {
    use std::path::Path;

    use super::{Catalog, Page};
    use crate::error::LoadError;

    #[derive(serde::Deserialize)]
    struct CatalogDocument {
        pages: Vec<Page>,
    }

    impl Catalog {
        /// Parse and validate a JSON document of the form `{"pages": [...]}`.
        pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
            let doc: CatalogDocument = serde_json::from_str(s)?;
            Ok(Self::new(doc.pages)?)
        }

        /// Parse and validate a TOML document with `[[pages]]` tables.
        pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
            let doc: CatalogDocument = toml::from_str(s)?;
            Ok(Self::new(doc.pages)?)
        }

        pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
            let content = std::fs::read_to_string(path.as_ref())?;
            Self::from_json_str(&content)
        }

        pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
            let content = std::fs::read_to_string(path.as_ref())?;
            Self::from_toml_str(&content)
        }

        /// Serialize back to the JSON document form.
        pub fn to_json_string(&self) -> Result<String, LoadError> {
            #[derive(serde::Serialize)]
            struct Doc<'a> {
                pages: &'a [Page],
            }
            Ok(serde_json::to_string_pretty(&Doc { pages: &self.pages })?)
        }
    }
}
