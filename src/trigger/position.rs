use std::{fmt, str::FromStr};

use crate::foundation::error::{RevealError, RevealResult};

/// A point along an element or the viewport, measured from its top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Fraction of the measured length (`top` = 0, `center` = 0.5, `bottom` = 1).
    Fraction(f64),
    /// Absolute distance in pixels.
    Pixels(f64),
}

impl Anchor {
    /// Distance from the top edge for a box of height `length`.
    pub fn resolve(self, length: f64) -> f64 {
        match self {
            Self::Fraction(f) => f * length,
            Self::Pixels(px) => px,
        }
    }

    fn parse_token(tok: &str) -> RevealResult<Self> {
        let tok = tok.trim().to_ascii_lowercase();
        let anchor = match tok.as_str() {
            "top" => Self::Fraction(0.0),
            "center" => Self::Fraction(0.5),
            "bottom" => Self::Fraction(1.0),
            _ => {
                if let Some(pct) = tok.strip_suffix('%') {
                    Self::Fraction(parse_number(pct, &tok)? / 100.0)
                } else if let Some(px) = tok.strip_suffix("px") {
                    Self::Pixels(parse_number(px, &tok)?)
                } else {
                    Self::Pixels(parse_number(&tok, &tok)?)
                }
            }
        };
        Ok(anchor)
    }
}

fn parse_number(s: &str, tok: &str) -> RevealResult<f64> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| RevealError::validation(format!("invalid position token '{tok}'")))?;
    if !v.is_finite() {
        return Err(RevealError::validation(format!(
            "position token '{tok}' must be finite"
        )));
    }
    Ok(v)
}

// Drops float noise such as `7.000000000000001` left by the `/ 100` in parsing.
fn round_display(v: f64) -> f64 {
    let r = (v * 1e9).round() / 1e9;
    if r.is_finite() { r } else { v }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Fraction(v) if v == 0.0 => f.write_str("top"),
            Self::Fraction(v) if v == 0.5 => f.write_str("center"),
            Self::Fraction(v) if v == 1.0 => f.write_str("bottom"),
            Self::Fraction(v) => write!(f, "{}%", round_display(v * 100.0)),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// Where a trigger boundary sits: the moment `element` anchor of the trigger meets the
/// `viewport` anchor.
///
/// Parsed from strings such as `"top 20%"` (trigger top reaches 20% of viewport height) or
/// `"bottom center"`. A single token sets the element anchor; the viewport anchor then
/// defaults to `top`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollPosition {
    /// Anchor on the trigger element.
    pub element: Anchor,
    /// Anchor on the viewport.
    pub viewport: Anchor,
}

impl ScrollPosition {
    /// Build from explicit anchors.
    pub fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this position is reached for a trigger whose top edge sits at
    /// `doc_top` in document coordinates.
    pub fn scroll_offset(self, doc_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        doc_top + self.element.resolve(element_height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for ScrollPosition {
    type Err = RevealError;

    fn from_str(s: &str) -> RevealResult<Self> {
        let mut toks = s.split_whitespace();
        let Some(first) = toks.next() else {
            return Err(RevealError::validation("scroll position must be non-empty"));
        };
        let element = Anchor::parse_token(first)?;
        let viewport = match toks.next() {
            Some(tok) => Anchor::parse_token(tok)?,
            None => Anchor::Fraction(0.0),
        };
        if toks.next().is_some() {
            return Err(RevealError::validation(format!(
                "scroll position '{}' has more than two tokens",
                s.trim()
            )));
        }
        Ok(Self { element, viewport })
    }
}

impl fmt::Display for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

impl TryFrom<String> for ScrollPosition {
    type Error = RevealError;

    fn try_from(value: String) -> RevealResult<Self> {
        value.parse()
    }
}

impl From<ScrollPosition> for String {
    fn from(value: ScrollPosition) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/position.rs"]
mod tests;
