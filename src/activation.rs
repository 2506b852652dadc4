use serde::Serialize;
use std::ops::Range;

use crate::config::WindowConfig;

/// Low → high: pale lavender, purple, red, orange, pale yellow.
pub const GRADIENT: [Rgb; 5] = [
    Rgb(0xEF, 0xEE, 0xFF),
    Rgb(0x76, 0x1C, 0x6D),
    Rgb(0xCC, 0x43, 0x46),
    Rgb(0xF9, 0x90, 0x06),
    Rgb(0xF9, 0xFC, 0x9C),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

/// Index of the first token whose absolute activation is largest.
/// NaN activations never win.
pub fn peak_index(activations: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, activation) in activations.iter().enumerate() {
        let magnitude = activation.abs();
        if magnitude.is_nan() {
            continue;
        }
        match best {
            Some((_, best_magnitude)) if magnitude <= best_magnitude => {}
            _ => best = Some((index, magnitude)),
        }
    }
    best.map(|(index, _)| index)
}

/// Half-open token range shown in the truncated strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TokenWindow {
    pub start: usize,
    pub end: usize,
}

impl TokenWindow {
    /// `window.before` tokens before `peak` through `window.after` tokens
    /// after it, clipped to `[0, len)`.
    pub fn around(peak: usize, len: usize, window: WindowConfig) -> Self {
        let start = peak.saturating_sub(window.before).min(len);
        let end = peak
            .saturating_add(window.after)
            .saturating_add(1)
            .min(len)
            .max(start);
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Linear map from absolute activation onto [`GRADIENT`], clamped at both
/// ends. The domain is the sample's own smallest and largest magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColorScale {
    pub min: f32,
    pub max: f32,
}

impl ColorScale {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn from_activations(activations: &[f32]) -> Self {
        let (min, max) = activations
            .iter()
            .map(|a| a.abs())
            .filter(|a| !a.is_nan())
            .fold(None, |acc: Option<(f32, f32)>, a| match acc {
                None => Some((a, a)),
                Some((lo, hi)) => Some((lo.min(a), hi.max(a))),
            })
            .unwrap_or((0.0, 0.0));
        Self { min, max }
    }

    /// Position of `activation` within the domain, in `[0, 1]`.
    /// A zero-width domain sits in the middle of the gradient.
    pub fn normalize(&self, activation: f32) -> f32 {
        let magnitude = activation.abs();
        let width = self.max - self.min;
        if width == 0.0 {
            return 0.5;
        }
        let t = (magnitude - self.min) / width;
        if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    pub fn rgb(&self, activation: f32) -> Rgb {
        let segments = (GRADIENT.len() - 1) as f32;
        let position = self.normalize(activation) * segments;
        let lower = (position.floor() as usize).min(GRADIENT.len() - 2);
        GRADIENT[lower].lerp(GRADIENT[lower + 1], position - lower as f32)
    }

    pub fn color(&self, activation: f32) -> String {
        self.rgb(activation).hex()
    }
}
