use crate::foundation::core::{Rect, overlap_area};
use crate::foundation::error::{StardriftError, StardriftResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Margin length in CSS px or percent of the root box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Absolute CSS px.
    Px(f64),
    /// Percent of the root box along the same axis.
    Percent(f64),
}

impl Length {
    /// Length in px against a `reference` extent.
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Length::Px(v) => v,
            Length::Percent(p) => reference * p / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = StardriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (num, ctor): (&str, fn(f64) -> Length) = if let Some(v) = s.strip_suffix('%') {
            (v, Length::Percent)
        } else if let Some(v) = s.strip_suffix("px") {
            (v, Length::Px)
        } else if s == "0" {
            (s, Length::Px)
        } else {
            return Err(StardriftError::validation(format!(
                "margin \"{s}\" must end in px or %"
            )));
        };
        let v: f64 = num
            .parse()
            .map_err(|_| StardriftError::validation(format!("invalid margin length \"{s}\"")))?;
        if !v.is_finite() {
            return Err(StardriftError::validation(format!("non-finite margin \"{s}\"")));
        }
        Ok(ctor(v))
    }
}

/// Grows (positive) or shrinks (negative) the root box before intersecting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    /// Top edge.
    pub top: Length,
    /// Right edge.
    pub right: Length,
    /// Bottom edge.
    pub bottom: Length,
    /// Left edge.
    pub left: Length,
}

impl RootMargin {
    /// Same px margin on every edge.
    pub fn uniform_px(px: f64) -> Self {
        Self {
            top: Length::Px(px),
            right: Length::Px(px),
            bottom: Length::Px(px),
            left: Length::Px(px),
        }
    }

    /// Root box after applying the margin.
    pub fn apply(&self, root: Rect) -> Rect {
        let (w, h) = (root.width(), root.height());
        Rect::new(
            root.x0 - self.left.resolve(w),
            root.y0 - self.top.resolve(h),
            root.x1 + self.right.resolve(w),
            root.y1 + self.bottom.resolve(h),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::uniform_px(0.0)
    }
}

impl FromStr for RootMargin {
    type Err = StardriftError;

    /// CSS shorthand with one to four lengths, e.g. `"-10% 0px -10% 0px"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(str::parse::<Length>)
            .collect::<StardriftResult<Vec<_>>>()?;
        let (top, right, bottom, left) = match parts.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => {
                return Err(StardriftError::validation(format!(
                    "root margin \"{s}\" needs one to four lengths"
                )));
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

/// Threshold and margin of one intersection watcher.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Minimum visible ratio; `0` means "any overlap".
    pub threshold: f64,
    /// Margin applied to the viewport.
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// Animated layers: any overlap with the viewport grown by 100 px.
    pub fn layer() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::uniform_px(100.0),
        }
    }

    /// Content sections: at least 30 % inside the viewport with 10 % trimmed top and bottom.
    pub fn section() -> Self {
        Self {
            threshold: 0.3,
            root_margin: RootMargin {
                top: Length::Percent(-10.0),
                right: Length::Px(0.0),
                bottom: Length::Percent(-10.0),
                left: Length::Px(0.0),
            },
        }
    }

    /// Visible ratio of `target` inside `viewport` after the margin.
    pub fn ratio(&self, target: Rect, viewport: Rect) -> f64 {
        intersection_ratio(target, self.root_margin.apply(viewport))
    }

    /// Return `true` when `ratio` counts as intersecting under this threshold.
    pub fn passes(&self, ratio: f64) -> bool {
        if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }
}

/// Fraction of `target`'s area inside `root`, in `[0, 1]`.
///
/// A zero-area target counts as fully visible when it lies inside `root`.
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    let area = target.area();
    if area <= 0.0 {
        let inside = target.x0 >= root.x0
            && target.x1 <= root.x1
            && target.y0 >= root.y0
            && target.y1 <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    (overlap_area(target, root) / area).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/gate/intersection.rs"]
mod tests;
