use std::{fmt, str::FromStr};

use crate::foundation::error::{RevealError, RevealResult};

/// Unit size produced by [`segment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Maximal runs of non-whitespace characters.
    #[default]
    Words,
    /// Every non-whitespace `char` on its own.
    Chars,
    /// Maximal runs of characters between line breaks.
    Lines,
}

impl Granularity {
    fn is_separator(self, c: char) -> bool {
        match self {
            Self::Words | Self::Chars => c.is_whitespace(),
            Self::Lines => c == '\n' || c == '\r',
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Words => "words",
            Self::Chars => "chars",
            Self::Lines => "lines",
        })
    }
}

impl FromStr for Granularity {
    type Err = RevealError;

    fn from_str(s: &str) -> RevealResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "words" | "word" => Ok(Self::Words),
            "chars" | "char" | "characters" => Ok(Self::Chars),
            "lines" | "line" => Ok(Self::Lines),
            other => Err(RevealError::validation(format!(
                "unknown granularity '{other}'"
            ))),
        }
    }
}

/// One animatable fragment of a text container.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimatableUnit {
    /// Position in the sequence; contiguous from 0.
    pub index: usize,
    /// Fragment text.
    pub content: String,
    /// Separator text that precedes `content` in the source.
    pub lead: String,
    /// Rendered opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rendered vertical offset in pixels.
    pub offset_y: f64,
}

impl AnimatableUnit {
    fn new(index: usize, lead: &str, content: &str) -> Self {
        Self {
            index,
            content: content.to_string(),
            lead: lead.to_string(),
            opacity: 1.0,
            offset_y: 0.0,
        }
    }
}

/// Ordered units of one text container plus the trailing separators.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Segmentation {
    /// Units in source order.
    pub units: Vec<AnimatableUnit>,
    /// Separator text after the last unit (or the whole input when there are no units).
    pub tail: String,
}

impl Segmentation {
    /// Rebuild the exact source text.
    pub fn reconstruct(&self) -> String {
        let mut out = String::new();
        for u in &self.units {
            out.push_str(&u.lead);
            out.push_str(&u.content);
        }
        out.push_str(&self.tail);
        out
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// `true` when no unit was produced.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Take the units, dropping the tail.
    pub fn into_units(self) -> Vec<AnimatableUnit> {
        self.units
    }
}

/// Splitting strategy handed to the scene explicitly instead of being registered globally.
pub trait Segmenter {
    /// Split `text` into ordered units.
    fn segment(&self, text: &str) -> Segmentation;
}

impl Segmenter for Granularity {
    fn segment(&self, text: &str) -> Segmentation {
        segment(text, *self)
    }
}

/// Split `text` into index-assigned units. Empty input yields an empty segmentation.
pub fn segment(text: &str, granularity: Granularity) -> Segmentation {
    let mut units = Vec::new();
    let mut lead_start = 0usize;
    let mut content_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let sep = granularity.is_separator(c);
        match (content_start, sep) {
            (Some(start), true) => {
                units.push(AnimatableUnit::new(
                    units.len(),
                    &text[lead_start..start],
                    &text[start..i],
                ));
                content_start = None;
                lead_start = i;
            }
            (None, false) => {
                if granularity == Granularity::Chars {
                    let end = i + c.len_utf8();
                    units.push(AnimatableUnit::new(
                        units.len(),
                        &text[lead_start..i],
                        &text[i..end],
                    ));
                    lead_start = end;
                } else {
                    content_start = Some(i);
                }
            }
            _ => {}
        }
    }

    if let Some(start) = content_start {
        units.push(AnimatableUnit::new(
            units.len(),
            &text[lead_start..start],
            &text[start..],
        ));
        lead_start = text.len();
    }

    Segmentation {
        units,
        tail: text[lead_start..].to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
