#![forbid(unsafe_code)]

//! Scripted tour sessions against the sample page layouts.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use waypoint::{Catalog, Placement, TourConfig, TourEvent, TourMsg, Walkthrough};
use waypoint_core::Router;
use waypoint_harness::{MemoryRouter, RecordingHighlighter, RecordingNotifier};

use crate::data;

/// One scripted host action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Next,
    Prev,
    End,
    /// Navigate without the tour asking, like a sidebar click.
    Goto(String),
}

impl Action {
    /// Tour through every page, step back once, jump around, and finish.
    pub fn default_script() -> Vec<Action> {
        vec![
            Action::Start,
            Action::Next,
            Action::Next,
            Action::Next,
            Action::Prev,
            Action::Goto("/nutrition".into()),
            Action::Next,
            Action::Next,
            Action::Goto("/settings".into()),
            Action::End,
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Next => f.write_str("next"),
            Self::Prev => f.write_str("prev"),
            Self::End => f.write_str("end"),
            Self::Goto(path) => write!(f, "goto:{path}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    #[error("unknown action `{0}` (expected start, next, prev, end, or goto:<path>)")]
    Unknown(String),
    #[error("goto needs an absolute path, got `{0}`")]
    BadPath(String),
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(path) = s.strip_prefix("goto:") {
            if !path.starts_with('/') {
                return Err(ParseActionError::BadPath(path.to_string()));
            }
            return Ok(Self::Goto(path.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "next" => Ok(Self::Next),
            "prev" | "previous" => Ok(Self::Prev),
            "end" => Ok(Self::End),
            _ => Err(ParseActionError::Unknown(s.to_string())),
        }
    }
}

/// What one action did, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub action: Action,
    pub event: Option<TourEvent>,
    pub path: String,
    pub active: bool,
    pub page: Option<String>,
    pub step: Option<String>,
    pub overall_step: usize,
    pub total_steps: usize,
    pub progress: u8,
    pub placement: Option<Placement>,
    pub highlighted: Option<String>,
    pub notices: Vec<String>,
}

impl Turn {
    pub fn event_name(&self) -> &'static str {
        match self.event {
            Some(TourEvent::Started { .. }) => "started",
            Some(TourEvent::StepChanged { reason, .. }) => reason.as_str(),
            Some(TourEvent::Ended { reason, .. }) => match reason {
                waypoint::EndReason::User => "ended",
                waypoint::EndReason::Completed => "completed",
            },
            None => "none",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "action": self.action.to_string(),
            "event": self.event_name(),
            "path": self.path,
            "active": self.active,
            "page": self.page,
            "step": self.step,
            "overall_step": self.overall_step,
            "total_steps": self.total_steps,
            "progress": self.progress,
            "placement": self.placement.map(|p| json!({
                "top": p.top,
                "left": p.left,
                "side": p.side.as_str(),
                "centered": p.is_centered(),
            })),
            "highlighted": self.highlighted,
            "notices": self.notices,
        })
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<18} {:<10} {:<12}", self.action.to_string(), self.event_name(), self.path)?;
        match (&self.step, self.active) {
            (Some(step), true) => write!(
                f,
                " {step:<20} {}/{} {:>3}%",
                self.overall_step, self.total_steps, self.progress
            )?,
            _ => write!(f, " {:<20} {:>3}%", "(inactive)", self.progress)?,
        }
        if let Some(p) = self.placement {
            if p.is_centered() {
                write!(f, "  centered ({:.0}, {:.0})", p.top, p.left)?;
            } else {
                write!(f, "  {} ({:.0}, {:.0})", p.side, p.top, p.left)?;
            }
        }
        if let Some(node) = &self.highlighted {
            write!(f, "  lit={node}")?;
        }
        for notice in &self.notices {
            write!(f, "  \"{notice}\"")?;
        }
        Ok(())
    }
}

/// The sample host: in-memory router, per-page layouts, and the tour.
pub struct Session {
    host: Walkthrough<MemoryRouter, RecordingHighlighter, RecordingNotifier>,
    lit: RecordingHighlighter,
    notices: RecordingNotifier,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>, start_path: &str, config: TourConfig) -> Self {
        let lit = RecordingHighlighter::new();
        let notices = RecordingNotifier::new();
        let host = Walkthrough::new(
            catalog,
            MemoryRouter::new(start_path),
            lit.clone(),
            notices.clone(),
            config,
        );
        Self { host, lit, notices }
    }

    pub fn host(&self) -> &Walkthrough<MemoryRouter, RecordingHighlighter, RecordingNotifier> {
        &self.host
    }

    /// Apply `action`, let the router report, and lay out against the mounted page.
    pub fn apply(&mut self, action: &Action) -> Turn {
        let direct = match action {
            Action::Start => self.host.update(TourMsg::Start),
            Action::Next => self.host.update(TourMsg::Next),
            Action::Prev => self.host.update(TourMsg::Previous),
            Action::End => self.host.update(TourMsg::End),
            Action::Goto(path) => {
                self.host.router_mut().visit(path.as_str());
                None
            }
        };
        let routed = self.host.pump_router();

        let path = self.host.tour().router().current_path();
        let dom = data::page_layout(&path);
        let placement = self.host.layout(&dom, None);

        let snap = self.host.snapshot();
        let notices = self
            .notices
            .notices()
            .into_iter()
            .map(|(_, message)| message)
            .collect();
        self.notices.clear();

        Turn {
            action: action.clone(),
            event: routed.or(direct),
            path,
            active: snap.is_active,
            page: snap.current_page.map(|p| p.path.clone()),
            step: snap.current_step.map(|s| s.id.clone()),
            overall_step: snap.overall_step,
            total_steps: snap.total_steps,
            progress: snap.progress,
            placement,
            highlighted: self.lit.lit().into_iter().next(),
            notices,
        }
    }
}
