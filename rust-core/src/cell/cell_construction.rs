use std::f64::consts::PI;

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{CellError, Result};

/// Lattice lengths and the angles between the lattice vectors (radians).
///
/// For two vectors `angles = [angle(a, b)]`, for three vectors
/// `angles = [angle(b, c), angle(a, c), angle(a, b)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellParameters {
    pub lengths: Vec<f64>,
    pub angles: Vec<f64>,
}

impl Cell {
    /// Build a cell from lattice lengths and angles.
    ///
    /// Supported shapes are 0 lengths/0 angles, 1/0, 2/1 and 3/3. The first vector lies along
    /// x, the second in the xy-plane and the third is solved from its dot products with the
    /// first two and itself, with a positive z-component.
    pub fn from_parameters(lengths: &[f64], angles: &[f64]) -> Result<Cell> {
        if let Some(l) = lengths.iter().find(|l| !(**l > 0.0)) {
            return Err(CellError::invalid(format!(
                "lattice lengths must be strictly positive, got {}",
                l
            )));
        }
        if let Some(a) = angles.iter().find(|a| !(**a > 0.0 && **a < PI)) {
            return Err(CellError::invalid(format!(
                "lattice angles must lie in the open interval (0, pi), got {}",
                a
            )));
        }

        let vectors = match (lengths.len(), angles.len()) {
            (0, 0) => Vec::new(),
            (1, 0) => vec![Vector3::new(lengths[0], 0.0, 0.0)],
            (2, 1) => {
                let (sin_gamma, cos_gamma) = angles[0].sin_cos();
                vec![
                    Vector3::new(lengths[0], 0.0, 0.0),
                    Vector3::new(lengths[1] * cos_gamma, lengths[1] * sin_gamma, 0.0),
                ]
            }
            (3, 3) => triclinic_vectors(lengths, angles)?.to_vec(),
            (nl, na) => {
                return Err(CellError::invalid(format!(
                    "unsupported combination of {} lengths and {} angles",
                    nl, na
                )));
            }
        };

        Cell::new(&vectors)
    }

    /// Recover the lattice lengths and angles from the active vectors.
    pub fn parameters(&self) -> CellParameters {
        let lengths = self.rlengths().to_vec();
        let angle = |i: usize, j: usize| {
            let cos = self.rvec(i).dot(&self.rvec(j)) / (lengths[i] * lengths[j]);
            cos.clamp(-1.0, 1.0).acos()
        };
        let angles = match self.nvec() {
            2 => vec![angle(0, 1)],
            3 => vec![angle(1, 2), angle(0, 2), angle(0, 1)],
            _ => Vec::new(),
        };
        CellParameters { lengths, angles }
    }
}

fn triclinic_vectors(lengths: &[f64], angles: &[f64]) -> Result<[Vector3<f64>; 3]> {
    let (a, b, c) = (lengths[0], lengths[1], lengths[2]);
    let (alpha, beta, gamma) = (angles[0], angles[1], angles[2]);

    let va = Vector3::new(a, 0.0, 0.0);
    let (sin_gamma, cos_gamma) = gamma.sin_cos();
    let vb = Vector3::new(b * cos_gamma, b * sin_gamma, 0.0);

    // Back-substitution of a·c, b·c and c·c
    let cx = c * beta.cos();
    let cy = (b * c * alpha.cos() - vb.x * cx) / vb.y;
    let cz_sq = c * c - cx * cx - cy * cy;
    if cz_sq < 0.0 {
        debug!(
            "rejected cell parameters lengths={:?} angles={:?}: c_z^2={}",
            lengths, angles, cz_sq
        );
        return Err(CellError::geometry(
            "lattice lengths and angles do not describe a unit cell",
        ));
    }

    Ok([va, vb, Vector3::new(cx, cy, cz_sq.sqrt())])
}
