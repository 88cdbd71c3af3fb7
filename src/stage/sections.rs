use crate::foundation::core::{Rect, Size};
use crate::gate::intersection::ObserverOptions;
use crate::theme::section::{DEFAULT_SECTION, SectionBinding, resolve_section};
use serde::{Deserialize, Serialize};

/// Minimum time between two section evaluations.
pub const SECTION_THROTTLE_MS: f64 = 16.0;

/// Named section with its height in the scroll document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Section identifier.
    pub id: String,
    /// Height in CSS px.
    pub height: f64,
}

/// Section laid out in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionAnchor {
    /// Section identifier.
    pub id: String,
    /// Box in document coordinates.
    pub rect: Rect,
}

/// Stack `specs` top to bottom at `width`.
pub fn layout_sections(specs: &[SectionSpec], width: f64) -> Vec<SectionAnchor> {
    let mut y = 0.0;
    specs
        .iter()
        .map(|spec| {
            let height = spec.height.max(0.0);
            let rect = Rect::new(0.0, y, width.max(0.0), y + height);
            y += height;
            SectionAnchor {
                id: spec.id.clone(),
                rect,
            }
        })
        .collect()
}

/// `clamp(scroll_y / (document_height - viewport_height), 0, 1)`; zero when nothing scrolls.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let range = document_height - viewport_height;
    if !range.is_finite() || range <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0)
}

/// Active section changed.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionChange {
    /// Previously active section.
    pub from: String,
    /// Newly active section.
    pub to: String,
}

impl SectionChange {
    /// Visual binding of the new section.
    pub fn binding(&self) -> &'static SectionBinding {
        resolve_section(&self.to)
    }
}

/// Decides which content section is "current".
///
/// Transition guards: a section must reach the threshold ratio inside the margin-trimmed
/// viewport, and a challenger must be strictly more visible than the current section while
/// the current one still passes. When no section passes, the current one is kept.
/// Evaluations are throttled; requests inside the throttle window are deferred until
/// [`SectionTracker::poll`] or the next observation after the window. The owner schedules
/// the poll, using [`SectionTracker::deferred_wait_ms`] for the delay.
#[derive(Clone, Debug)]
pub struct SectionTracker {
    anchors: Vec<SectionAnchor>,
    options: ObserverOptions,
    throttle_ms: f64,
    observable: bool,
    current: String,
    ratios: Vec<f64>,
    last_eval_ms: Option<f64>,
    deferred: Option<Rect>,
}

impl SectionTracker {
    /// Tracker over `anchors`, starting at the default section.
    pub fn new(anchors: Vec<SectionAnchor>, options: ObserverOptions, throttle_ms: f64) -> Self {
        let ratios = vec![0.0; anchors.len()];
        Self {
            anchors,
            options,
            throttle_ms: throttle_ms.max(0.0),
            observable: true,
            current: DEFAULT_SECTION.to_string(),
            ratios,
            last_eval_ms: None,
            deferred: None,
        }
    }

    /// Tracker for a host without intersection observation; stays on the default section.
    pub fn unobservable(anchors: Vec<SectionAnchor>) -> Self {
        tracing::warn!("section observation unavailable; staying on {DEFAULT_SECTION}");
        Self {
            observable: false,
            ..Self::new(anchors, ObserverOptions::section(), SECTION_THROTTLE_MS)
        }
    }

    /// Identifier of the active section.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Binding of the active section.
    pub fn current_binding(&self) -> &'static SectionBinding {
        resolve_section(&self.current)
    }

    /// Laid-out anchors.
    pub fn anchors(&self) -> &[SectionAnchor] {
        &self.anchors
    }

    /// Ratios of the last evaluation, in anchor order.
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Return `true` when an evaluation is waiting for the throttle window to pass.
    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Time left until a deferred evaluation may run, or `None` when nothing is deferred.
    pub fn deferred_wait_ms(&self, now_ms: f64) -> Option<f64> {
        self.deferred?;
        let wait = match self.last_eval_ms {
            Some(last) => self.throttle_ms - (now_ms - last),
            None => 0.0,
        };
        Some(wait.max(0.0))
    }

    /// Replace the anchors after a relayout; the next observation is evaluated immediately.
    ///
    /// A deferred viewport box belongs to the old layout and is dropped.
    pub fn set_anchors(&mut self, anchors: Vec<SectionAnchor>) {
        self.ratios = vec![0.0; anchors.len()];
        self.anchors = anchors;
        self.last_eval_ms = None;
        self.deferred = None;
    }

    /// Viewport scrolled to `scroll_y`.
    pub fn observe(&mut self, scroll_y: f64, viewport: Size, now_ms: f64) -> Option<SectionChange> {
        if !self.observable {
            return None;
        }
        let view = Rect::new(0.0, scroll_y, viewport.width, scroll_y + viewport.height);
        if let Some(last) = self.last_eval_ms
            && now_ms - last < self.throttle_ms
        {
            self.deferred = Some(view);
            return None;
        }
        self.deferred = None;
        self.last_eval_ms = Some(now_ms);
        self.evaluate(view)
    }

    /// Evaluate a deferred observation once the throttle window has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<SectionChange> {
        let view = self.deferred?;
        if let Some(last) = self.last_eval_ms
            && now_ms - last < self.throttle_ms
        {
            return None;
        }
        self.deferred = None;
        self.last_eval_ms = Some(now_ms);
        self.evaluate(view)
    }

    fn evaluate(&mut self, view: Rect) -> Option<SectionChange> {
        for (ratio, anchor) in self.ratios.iter_mut().zip(&self.anchors) {
            *ratio = self.options.ratio(anchor.rect, view);
        }

        let current_ratio = self
            .anchors
            .iter()
            .position(|a| a.id == self.current)
            .map(|i| self.ratios[i])
            .filter(|r| self.options.passes(*r));

        let mut best: Option<(usize, f64)> = None;
        for (i, ratio) in self.ratios.iter().copied().enumerate() {
            if !self.options.passes(ratio) {
                continue;
            }
            if best.is_none_or(|(_, r)| ratio > r) {
                best = Some((i, ratio));
            }
        }
        let (index, ratio) = best?;
        let challenger = &self.anchors[index].id;
        if *challenger == self.current {
            return None;
        }
        if current_ratio.is_some_and(|r| ratio <= r) {
            return None;
        }

        let change = SectionChange {
            from: std::mem::replace(&mut self.current, challenger.clone()),
            to: challenger.clone(),
        };
        tracing::debug!(from = %change.from, to = %change.to, ratio, "section changed");
        Some(change)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/sections.rs"]
mod tests;
