//! CIE L*a*b* and sRGB color conversion

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A CIE L*a*b* color. `l` is 0..100, `a` and `b` roughly -128..127.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

/// An 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Lab {
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color with channels normalized to 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl UnitRgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Axis-aligned box in normalized RGB. Both corners are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbBox {
    pub min: UnitRgb,
    pub max: UnitRgb,
}

impl RgbBox {
    pub fn new(min: UnitRgb, max: UnitRgb) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, color: &UnitRgb) -> bool {
        let (lo, hi, c) = (self.min.channels(), self.max.channels(), color.channels());
        (0..3).all(|i| c[i] >= lo[i] && c[i] <= hi[i])
    }

    /// Finite corners with `min <= max` on every channel
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = (self.min.channels(), self.max.channels());
        for (name, i) in [("r", 0), ("g", 1), ("b", 2)] {
            if !(lo[i].is_finite() && hi[i].is_finite() && lo[i] <= hi[i]) {
                return Err(Error::InvalidData(format!(
                    "Color region {} bounds [{}, {}] are not ordered",
                    name, lo[i], hi[i]
                )));
            }
        }
        Ok(())
    }
}

/// D65 reference white
const REF_X: f64 = 95.047;
const REF_Y: f64 = 100.000;
const REF_Z: f64 = 108.883;

/// Slack on linear channels before a color counts as out of gamut
const GAMUT_TOLERANCE: f64 = 0.001;

fn lab_inverse(t: f64) -> f64 {
    let delta = 6.0 / 29.0;
    if t > delta {
        t * t * t
    } else {
        3.0 * delta * delta * (t - 4.0 / 29.0)
    }
}

fn gamma_correct(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn to_channel(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert L*a*b* to sRGB. Returns `None` when the color is outside the
/// sRGB gamut.
pub fn lab_to_rgb(lab: Lab) -> Option<Rgb> {
    let fy = (lab.l as f64 + 16.0) / 116.0;
    let fx = lab.a as f64 / 500.0 + fy;
    let fz = fy - lab.b as f64 / 200.0;

    let x = lab_inverse(fx) * REF_X;
    let y = lab_inverse(fy) * REF_Y;
    let z = lab_inverse(fz) * REF_Z;

    let r_linear = (x * 3.2406 + y * -1.5372 + z * -0.4986) / 100.0;
    let g_linear = (x * -0.9689 + y * 1.8758 + z * 0.0415) / 100.0;
    let b_linear = (x * 0.0557 + y * -0.2040 + z * 1.0570) / 100.0;

    // Gamut check happens before gamma correction
    let in_range = |c: f64| (-GAMUT_TOLERANCE..=1.0 + GAMUT_TOLERANCE).contains(&c);
    if !(in_range(r_linear) && in_range(g_linear) && in_range(b_linear)) {
        return None;
    }

    Some(Rgb {
        r: to_channel(gamma_correct(r_linear)),
        g: to_channel(gamma_correct(g_linear)),
        b: to_channel(gamma_correct(b_linear)),
    })
}

/// Whether a L*a*b* color maps into sRGB
pub fn is_in_gamut(lab: Lab) -> bool {
    lab_to_rgb(lab).is_some()
}

/// Upper-case `#RRGGBB`
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Map scene coordinates onto L*a*b*: X = a*, Y = L*, Z = b*
pub fn lab_from_coordinates(x: f32, y: f32, z: f32) -> Lab {
    Lab { l: y, a: x, b: z }
}
