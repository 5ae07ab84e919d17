//! Sampling the sRGB gamut in L*a*b* space

use conceptspace_core::{is_in_gamut, lab_from_coordinates, lab_to_rgb, Error, Point3f, Result, Rgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling lattice over L*a*b*. Ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamutSampling {
    pub l_range: [f32; 2],
    pub a_range: [f32; 2],
    pub b_range: [f32; 2],
    pub step: f32,
}

impl Default for GamutSampling {
    fn default() -> Self {
        Self {
            l_range: [0.0, 100.0],
            a_range: [-128.0, 127.0],
            b_range: [-128.0, 127.0],
            step: 5.0,
        }
    }
}

impl GamutSampling {
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidData(format!(
                "Gamut sampling step must be positive, got {}",
                self.step
            )));
        }
        for (name, [lo, hi]) in [("L", self.l_range), ("a", self.a_range), ("b", self.b_range)] {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(Error::InvalidData(format!(
                    "Gamut {} range [{}, {}] is not ordered",
                    name, lo, hi
                )));
            }
        }
        Ok(())
    }
}

/// Samples `lo, lo + step, ...` up to and including `hi`
fn lattice(range: [f32; 2], step: f32) -> impl Iterator<Item = f32> {
    let [lo, hi] = range;
    let count = ((hi - lo) / step).floor() as usize + 1;
    (0..count).map(move |i| lo + i as f32 * step)
}

/// In-gamut samples with at least one out-of-gamut neighbour one step away
/// along an axis. Points are in scene coordinates: X = a*, Y = L*, Z = b*.
pub fn gamut_boundary_points(sampling: &GamutSampling) -> Result<Vec<Point3f>> {
    sampling.validate()?;
    let step = sampling.step;
    let mut points = Vec::new();

    for l in lattice(sampling.l_range, step) {
        for a in lattice(sampling.a_range, step) {
            for b in lattice(sampling.b_range, step) {
                if !is_in_gamut(lab_from_coordinates(a, l, b)) {
                    continue;
                }

                let neighbours = [
                    (a + step, l, b),
                    (a - step, l, b),
                    (a, l + step, b),
                    (a, l - step, b),
                    (a, l, b + step),
                    (a, l, b - step),
                ];
                let on_boundary = neighbours
                    .iter()
                    .any(|&(x, y, z)| !is_in_gamut(lab_from_coordinates(x, y, z)));

                if on_boundary {
                    points.push(Point3f::new(a, l, b));
                }
            }
        }
    }

    debug!(points = points.len(), step, "sampled gamut boundary");
    Ok(points)
}

/// Every in-gamut sample of the lattice with its sRGB color, L* outermost.
/// Points are in scene coordinates: X = a*, Y = L*, Z = b*.
pub fn gamut_samples(sampling: &GamutSampling) -> Result<Vec<(Point3f, Rgb)>> {
    sampling.validate()?;
    let step = sampling.step;
    let mut samples = Vec::new();

    for l in lattice(sampling.l_range, step) {
        for a in lattice(sampling.a_range, step) {
            for b in lattice(sampling.b_range, step) {
                if let Some(rgb) = lab_to_rgb(lab_from_coordinates(a, l, b)) {
                    samples.push((Point3f::new(a, l, b), rgb));
                }
            }
        }
    }

    debug!(samples = samples.len(), step, "sampled gamut");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conceptspace_core::rgb_to_hex;

    #[test]
    fn test_lattice_is_inclusive() {
        let samples: Vec<f32> = lattice([0.0, 10.0], 5.0).collect();
        assert_eq!(samples, vec![0.0, 5.0, 10.0]);
        let samples: Vec<f32> = lattice([-128.0, 127.0], 5.0).collect();
        assert_eq!(samples.len(), 52);
        assert_eq!(*samples.last().unwrap(), 127.0);
    }

    #[test]
    fn test_boundary_points_are_in_gamut() {
        let sampling = GamutSampling { step: 10.0, ..GamutSampling::default() };
        let points = gamut_boundary_points(&sampling).unwrap();
        assert!(!points.is_empty());
        for p in &points {
            assert!(is_in_gamut(lab_from_coordinates(p.x, p.y, p.z)));
        }
    }

    #[test]
    fn test_neutral_interior_is_not_boundary() {
        let sampling = GamutSampling { step: 10.0, ..GamutSampling::default() };
        let points = gamut_boundary_points(&sampling).unwrap();
        // Mid grey sits deep inside the gamut; a = b = -128 + 13 * 10 = 2
        assert!(!points.iter().any(|p| p.y == 50.0 && p.x == 2.0 && p.z == 2.0));
    }

    #[test]
    fn test_samples_carry_their_color() {
        let sampling = GamutSampling {
            a_range: [-100.0, 100.0],
            b_range: [-100.0, 100.0],
            step: 10.0,
            ..GamutSampling::default()
        };
        let samples = gamut_samples(&sampling).unwrap();
        assert!(!samples.is_empty());

        let white = samples
            .iter()
            .find(|(p, _)| *p == Point3f::new(0.0, 100.0, 0.0))
            .map(|(_, rgb)| rgb_to_hex(*rgb));
        assert_eq!(white.as_deref(), Some("#FFFFFF"));

        for (p, rgb) in &samples {
            assert_eq!(lab_to_rgb(lab_from_coordinates(p.x, p.y, p.z)), Some(*rgb));
        }
        assert!(samples.windows(2).all(|w| w[0].0.y <= w[1].0.y));

        let lattice_size = 11 * 21 * 21;
        let out_of_gamut = lattice([0.0, 100.0], 10.0)
            .flat_map(|l| lattice([-100.0, 100.0], 10.0).map(move |a| (l, a)))
            .flat_map(|(l, a)| lattice([-100.0, 100.0], 10.0).map(move |b| (l, a, b)))
            .filter(|&(l, a, b)| !is_in_gamut(lab_from_coordinates(a, l, b)))
            .count();
        assert!(out_of_gamut > 0);
        assert_eq!(samples.len() + out_of_gamut, lattice_size);
    }

    #[test]
    fn test_boundary_is_subset_of_samples() {
        let sampling = GamutSampling { step: 10.0, ..GamutSampling::default() };
        let samples = gamut_samples(&sampling).unwrap();
        let boundary = gamut_boundary_points(&sampling).unwrap();
        assert!(boundary.len() < samples.len());
        assert!(boundary.iter().all(|b| samples.iter().any(|(p, _)| p == b)));
    }

    #[test]
    fn test_invalid_sampling() {
        let zero_step = GamutSampling { step: 0.0, ..GamutSampling::default() };
        assert!(gamut_boundary_points(&zero_step).is_err());
        assert!(gamut_samples(&zero_step).is_err());

        let reversed = GamutSampling { l_range: [100.0, 0.0], ..GamutSampling::default() };
        assert!(gamut_boundary_points(&reversed).is_err());
    }
}
