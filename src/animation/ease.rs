use std::{fmt, str::FromStr};

use crate::foundation::error::{RevealError, RevealResult};

/// Easing curve mapping linear local progress to an animation scalar.
///
/// Every variant is clamped to `[0, 1]` on input, returns exactly `0` at `0` and `1` at `1`,
/// and is monotonic, except [`Ease::OutBack`] which deliberately overshoots past `1` before
/// settling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Identity.
    Linear,
    /// Quadratic ease-in (`power1.in`).
    InQuad,
    /// Quadratic ease-out (`power1.out`).
    OutQuad,
    /// Quadratic ease-in-out (`power1.inOut`).
    InOutQuad,
    /// Cubic ease-in (`power2.in`).
    InCubic,
    /// Cubic ease-out (`power2.out`).
    #[default]
    OutCubic,
    /// Cubic ease-in-out (`power2.inOut`).
    InOutCubic,
    /// Quartic ease-in (`power3.in`).
    InQuart,
    /// Quartic ease-out (`power3.out`).
    OutQuart,
    /// Quartic ease-in-out (`power3.inOut`).
    InOutQuart,
    /// Back ease-out (`back.out`). Overshoots to roughly `1.1` around `t = 0.6`.
    OutBack,
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

impl Ease {
    /// All variants, in declaration order.
    pub const ALL: [Ease; 11] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::OutBack,
    ];

    /// Sample the curve at `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::OutBack => {
                if t >= 1.0 {
                    return 1.0;
                }
                if t <= 0.0 {
                    return 0.0;
                }
                let u = t - 1.0;
                1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
            }
        }
    }

    /// Whether the curve can leave `[0, 1]`.
    pub fn overshoots(self) -> bool {
        matches!(self, Self::OutBack)
    }

    /// Canonical name, as accepted by [`Ease::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "power1.in",
            Self::OutQuad => "power1.out",
            Self::InOutQuad => "power1.inOut",
            Self::InCubic => "power2.in",
            Self::OutCubic => "power2.out",
            Self::InOutCubic => "power2.inOut",
            Self::InQuart => "power3.in",
            Self::OutQuart => "power3.out",
            Self::InOutQuart => "power3.inOut",
            Self::OutBack => "back.out",
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = RevealError;

    fn from_str(s: &str) -> RevealResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        if key.is_empty() {
            return Err(RevealError::validation("ease name must be non-empty"));
        }

        let ease = match key.as_str() {
            "none" | "linear" | "power0" | "power0.none" => Self::Linear,
            "in_quad" | "quad.in" | "power1.in" => Self::InQuad,
            "out_quad" | "quad.out" | "power1" | "power1.out" => Self::OutQuad,
            "in_out_quad" | "quad.inout" | "power1.inout" => Self::InOutQuad,
            "in_cubic" | "cubic.in" | "power2.in" => Self::InCubic,
            "out_cubic" | "cubic.out" | "power2" | "power2.out" => Self::OutCubic,
            "in_out_cubic" | "cubic.inout" | "power2.inout" => Self::InOutCubic,
            "in_quart" | "quart.in" | "power3.in" => Self::InQuart,
            "out_quart" | "quart.out" | "power3" | "power3.out" => Self::OutQuart,
            "in_out_quart" | "quart.inout" | "power3.inout" => Self::InOutQuart,
            "out_back" | "back" | "back.out" => Self::OutBack,
            _ => {
                return Err(RevealError::validation(format!(
                    "unknown ease '{}'",
                    s.trim()
                )));
            }
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = RevealError;

    fn try_from(value: String) -> RevealResult<Self> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
