use log::debug;
use nalgebra::{DMatrix, Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::LATTICE_TOLERANCE;
use crate::error::{CellError, Result};
use crate::interfaces::Space;

/// A periodic cell with 0, 1, 2 or 3 active lattice vectors.
///
/// The real-space vectors are stored as the rows of `rvecs`. Rows `nvec..3` are synthetic
/// completion vectors that only keep the 3×3 basis well conditioned; `gvecs` is always the
/// exact dual of the completed basis, i.e. `rvecs * gvecs^T = I`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 3]>", into = "Vec<[f64; 3]>")]
pub struct Cell {
    /// Number of periodic directions.
    nvec: usize,
    /// Real-space lattice vectors (rows), completed to rank 3.
    rvecs: Matrix3<f64>,
    /// Reciprocal lattice vectors (rows), inverse-transpose of `rvecs`.
    gvecs: Matrix3<f64>,
    /// Length, area or volume of the active parallelepiped.
    volume: f64,
    rlengths: [f64; 3],
    glengths: [f64; 3],
    /// Distance between opposite faces along each real direction, `1 / |g_i|`.
    rspacings: [f64; 3],
    /// Distance between opposite reciprocal faces, `1 / |r_i|`.
    gspacings: [f64; 3],
    /// Active vectors are mutually perpendicular.
    orthogonal: bool,
}

impl Cell {
    /// Construct a cell from up to three lattice vectors.
    pub fn new(vectors: &[Vector3<f64>]) -> Result<Self> {
        if vectors.len() > 3 {
            return Err(CellError::invalid(format!(
                "a cell has at most 3 lattice vectors, got {}",
                vectors.len()
            )));
        }

        if vectors.iter().any(|v| v.iter().any(|x| !x.is_finite())) {
            return Err(CellError::invalid("lattice vectors must have finite components"));
        }

        // 1) Complete the basis and take its dual
        let rvecs = complete_basis(vectors)?;
        let gvecs = rvecs
            .try_inverse()
            .ok_or_else(|| CellError::geometry("completed lattice basis is singular"))?
            .transpose();

        // 2) Derived quantities
        let nvec = vectors.len();
        let volume = match nvec {
            0 => 1.0,
            1 => vectors[0].norm(),
            2 => vectors[0].cross(&vectors[1]).norm(),
            _ => rvecs.determinant().abs(),
        };

        let mut rlengths = [0.0; 3];
        let mut glengths = [0.0; 3];
        let mut rspacings = [0.0; 3];
        let mut gspacings = [0.0; 3];
        for i in 0..nvec {
            rlengths[i] = rvecs.row(i).norm();
            glengths[i] = gvecs.row(i).norm();
            rspacings[i] = 1.0 / glengths[i];
            gspacings[i] = 1.0 / rlengths[i];
        }

        let orthogonal = (0..nvec).all(|i| {
            (0..i).all(|j| {
                rvecs.row(i).dot(&rvecs.row(j)).abs() <= LATTICE_TOLERANCE * rlengths[i] * rlengths[j]
            })
        });

        debug!("constructed cell with nvec={} volume={:.6}", nvec, volume);

        Ok(Cell {
            nvec,
            rvecs,
            gvecs,
            volume,
            rlengths,
            glengths,
            rspacings,
            gspacings,
            orthogonal,
        })
    }

    /// Construct a cell from a `k×3` matrix whose rows are the lattice vectors.
    pub fn from_matrix(matrix: &DMatrix<f64>) -> Result<Self> {
        if matrix.ncols() != 3 {
            return Err(CellError::invalid(format!(
                "lattice vectors must have 3 components, got a matrix with {} columns",
                matrix.ncols()
            )));
        }
        if matrix.nrows() > 3 {
            return Err(CellError::invalid(format!(
                "a cell has at most 3 lattice vectors, got {} rows",
                matrix.nrows()
            )));
        }
        let vectors: Vec<Vector3<f64>> = matrix
            .row_iter()
            .map(|row| Vector3::new(row[0], row[1], row[2]))
            .collect();
        Self::new(&vectors)
    }

    /// A cell without periodic directions.
    pub fn empty() -> Self {
        Cell {
            nvec: 0,
            rvecs: Matrix3::identity(),
            gvecs: Matrix3::identity(),
            volume: 1.0,
            rlengths: [0.0; 3],
            glengths: [0.0; 3],
            rspacings: [0.0; 3],
            gspacings: [0.0; 3],
            orthogonal: true,
        }
    }

    /// Replace the lattice vectors. On error the cell is left unchanged.
    pub fn update(&mut self, vectors: &[Vector3<f64>]) -> Result<()> {
        *self = Cell::new(vectors)?;
        Ok(())
    }

    pub fn nvec(&self) -> usize {
        self.nvec
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Completed real-space basis (rows).
    pub fn rvecs(&self) -> &Matrix3<f64> {
        &self.rvecs
    }

    /// Completed reciprocal basis (rows).
    pub fn gvecs(&self) -> &Matrix3<f64> {
        &self.gvecs
    }

    pub fn basis(&self, space: Space) -> &Matrix3<f64> {
        match space {
            Space::Real => &self.rvecs,
            Space::Reciprocal => &self.gvecs,
        }
    }

    /// The lattice vectors as they were supplied.
    pub fn active_rvecs(&self) -> Vec<Vector3<f64>> {
        (0..self.nvec).map(|i| self.rvec(i)).collect()
    }

    pub fn active_gvecs(&self) -> Vec<Vector3<f64>> {
        (0..self.nvec).map(|i| self.gvec(i)).collect()
    }

    pub(crate) fn rvec(&self, i: usize) -> Vector3<f64> {
        self.rvecs.row(i).transpose()
    }

    pub(crate) fn gvec(&self, i: usize) -> Vector3<f64> {
        self.gvecs.row(i).transpose()
    }

    /// Norms of the active basis vectors in the given space.
    pub fn lengths(&self, space: Space) -> &[f64] {
        match space {
            Space::Real => &self.rlengths[..self.nvec],
            Space::Reciprocal => &self.glengths[..self.nvec],
        }
    }

    /// Distances between opposite faces of the cell in the given space.
    pub fn spacings(&self, space: Space) -> &[f64] {
        match space.dual() {
            Space::Reciprocal => &self.rspacings[..self.nvec],
            Space::Real => &self.gspacings[..self.nvec],
        }
    }

    pub fn rlengths(&self) -> &[f64] {
        self.lengths(Space::Real)
    }

    pub fn glengths(&self) -> &[f64] {
        self.lengths(Space::Reciprocal)
    }

    pub fn rspacings(&self) -> &[f64] {
        self.spacings(Space::Real)
    }

    pub fn gspacings(&self) -> &[f64] {
        self.spacings(Space::Reciprocal)
    }

    pub fn is_orthogonal(&self) -> bool {
        self.orthogonal
    }

    /// Cartesian → fractional coordinates. Inactive components are zero.
    pub fn to_frac(&self, cart: &Vector3<f64>) -> Vector3<f64> {
        let mut frac = Vector3::zeros();
        for i in 0..self.nvec {
            frac[i] = self.gvec(i).dot(cart);
        }
        frac
    }

    /// Fractional → Cartesian coordinates, using the active lattice vectors only.
    pub fn to_cart(&self, frac: &Vector3<f64>) -> Vector3<f64> {
        (0..self.nvec).fold(Vector3::zeros(), |acc, i| acc + frac[i] * self.rvec(i))
    }

    /// Linear combination of the active reciprocal vectors.
    pub fn g_lincomb(&self, coeffs: &[f64]) -> Result<Vector3<f64>> {
        self.check_axis_count("coefficients", coeffs.len())?;
        Ok(coeffs
            .iter()
            .enumerate()
            .fold(Vector3::zeros(), |acc, (i, c)| acc + *c * self.gvec(i)))
    }

    /// Dot products of `cart` with each active lattice vector. Inactive components are zero.
    pub fn dot_rvecs(&self, cart: &Vector3<f64>) -> Vector3<f64> {
        let mut result = Vector3::zeros();
        for i in 0..self.nvec {
            result[i] = self.rvec(i).dot(cart);
        }
        result
    }

    /// Add the lattice translation `sum_i r[i] * rvec_i` to `delta`.
    pub fn add_rvec(&self, delta: &mut Vector3<f64>, r: &[i64]) -> Result<()> {
        self.check_axis_count("translation counts", r.len())?;
        *delta += self.lattice_translation(r);
        Ok(())
    }

    pub(crate) fn lattice_translation(&self, r: &[i64]) -> Vector3<f64> {
        r.iter()
            .enumerate()
            .fold(Vector3::zeros(), |acc, (i, n)| acc + (*n as f64) * self.rvec(i))
    }

    pub(crate) fn check_axis_count(&self, what: &str, len: usize) -> Result<()> {
        if len != self.nvec {
            return Err(CellError::invalid(format!(
                "expected {} {} for a cell with nvec={}, got {}",
                self.nvec, what, self.nvec, len
            )));
        }
        Ok(())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl TryFrom<Vec<[f64; 3]>> for Cell {
    type Error = CellError;

    fn try_from(rows: Vec<[f64; 3]>) -> Result<Self> {
        let vectors: Vec<Vector3<f64>> = rows.iter().map(|r| Vector3::from(*r)).collect();
        Cell::new(&vectors)
    }
}

impl From<Cell> for Vec<[f64; 3]> {
    fn from(cell: Cell) -> Self {
        cell.active_rvecs().iter().map(|v| [v.x, v.y, v.z]).collect()
    }
}

/// Fill rows `nvec..3` with unit vectors orthogonal to the supplied ones.
///
/// The completion rows are the right singular vectors of the zero-padded input that belong
/// to its vanishing singular values. The supplied rows are copied unchanged.
fn complete_basis(vectors: &[Vector3<f64>]) -> Result<Matrix3<f64>> {
    let nvec = vectors.len();
    if nvec == 0 {
        return Ok(Matrix3::identity());
    }

    let mut basis = Matrix3::zeros();
    for (i, v) in vectors.iter().enumerate() {
        basis.set_row(i, &v.transpose());
    }

    if nvec < 3 {
        let svd = basis.svd(false, true);
        let v_t = svd
            .v_t
            .ok_or_else(|| CellError::geometry("singular value decomposition failed"))?;
        let s = svd.singular_values;
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| s[b].total_cmp(&s[a]));
        for (row, &k) in (nvec..3).zip(order[nvec..].iter()) {
            basis.set_row(row, &v_t.row(k));
        }
    }

    // Rank check relative to the row norms, so that the tolerance does not depend on units
    let scale: f64 = (0..3).map(|i| basis.row(i).norm()).product();
    if basis.determinant().abs() <= LATTICE_TOLERANCE * scale {
        return Err(CellError::geometry(
            "lattice vectors are zero or linearly dependent",
        ));
    }

    Ok(basis)
}
