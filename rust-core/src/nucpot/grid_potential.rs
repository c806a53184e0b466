use log::trace;
use nalgebra::Vector3;

use crate::error::{CellError, Result};

/// Evaluate `sum_j charges[j] / |points[i] - coordinates[j]|` for every point.
///
/// `output[i]` is overwritten for `i < points.len()`. A point that coincides exactly with a
/// charge yields [`CellError::CoincidentCharge`] and leaves `output` partially written.
pub fn compute_grid_nucpot(
    charges: &[f64],
    coordinates: &[Vector3<f64>],
    points: &[Vector3<f64>],
    output: &mut [f64],
) -> Result<()> {
    if charges.len() != coordinates.len() {
        return Err(CellError::invalid(format!(
            "got {} charges for {} coordinates",
            charges.len(),
            coordinates.len()
        )));
    }
    if output.len() < points.len() {
        return Err(CellError::invalid(format!(
            "output holds {} values for {} points",
            output.len(),
            points.len()
        )));
    }

    for (ipoint, (point, value)) in points.iter().zip(output.iter_mut()).enumerate() {
        let mut potential = 0.0;
        for (iatom, (charge, atom)) in charges.iter().zip(coordinates).enumerate() {
            let distance = (point - atom).norm();
            if distance == 0.0 {
                return Err(CellError::CoincidentCharge {
                    point: ipoint,
                    atom: iatom,
                });
            }
            potential += charge / distance;
        }
        *value = potential;
    }
    trace!("evaluated {} charges on {} points", charges.len(), points.len());
    Ok(())
}
