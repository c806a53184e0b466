use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::config::MIC_SEARCH_RADIUS;
use crate::error::{CellError, Result};

/// Half-open integer ranges `[begin_i, end_i)`, one per active lattice direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRanges {
    begin: Vec<i64>,
    end: Vec<i64>,
}

impl ImageRanges {
    pub fn new(begin: Vec<i64>, end: Vec<i64>) -> Result<Self> {
        if begin.len() != end.len() || begin.len() > 3 {
            return Err(CellError::invalid(format!(
                "ranges need the same number (at most 3) of begin and end values, got {} and {}",
                begin.len(),
                end.len()
            )));
        }
        if let Some(axis) = (0..begin.len()).find(|&i| end[i] < begin[i]) {
            return Err(CellError::invalid(format!(
                "range along axis {} ends before it begins: [{}, {})",
                axis, begin[axis], end[axis]
            )));
        }
        let ranges = ImageRanges { begin, end };
        ranges.try_len()?;
        Ok(ranges)
    }

    /// `[-radius, radius]` along each of `nvec` axes.
    pub(crate) fn symmetric(nvec: usize, radius: i64) -> Self {
        ImageRanges {
            begin: vec![-radius; nvec],
            end: vec![radius + 1; nvec],
        }
    }

    pub fn begin(&self) -> &[i64] {
        &self.begin
    }

    pub fn end(&self) -> &[i64] {
        &self.end
    }

    pub fn nvec(&self) -> usize {
        self.begin.len()
    }

    /// Number of integer combinations, i.e. the product of the range extents.
    ///
    /// Saturates at `usize::MAX`; [`ImageRanges::try_len`] reports the overflow instead.
    pub fn len(&self) -> usize {
        self.try_len().unwrap_or(usize::MAX)
    }

    pub fn try_len(&self) -> Result<usize> {
        self.begin
            .iter()
            .zip(&self.end)
            .try_fold(1usize, |count, (b, e)| {
                let extent = usize::try_from(e.saturating_sub(*b).max(0)).ok()?;
                count.checked_mul(extent)
            })
            .ok_or_else(|| {
                CellError::invalid(format!(
                    "ranges {:?}..{:?} hold more combinations than fit in usize",
                    self.begin, self.end
                ))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All combinations in row-major order, the first axis varying slowest.
    ///
    /// Only the first [`ImageRanges::nvec`] entries of each item are meaningful.
    pub fn iter(&self) -> ImageIter<'_> {
        let mut current = [0i64; 3];
        current[..self.nvec()].copy_from_slice(&self.begin);
        ImageIter {
            ranges: self,
            current,
            done: self.is_empty(),
        }
    }
}

impl<'a> IntoIterator for &'a ImageRanges {
    type Item = [i64; 3];
    type IntoIter = ImageIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Odometer over an [`ImageRanges`].
#[derive(Debug, Clone)]
pub struct ImageIter<'a> {
    ranges: &'a ImageRanges,
    current: [i64; 3],
    done: bool,
}

impl Iterator for ImageIter<'_> {
    type Item = [i64; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current;
        self.done = true;
        for axis in (0..self.ranges.nvec()).rev() {
            self.current[axis] += 1;
            if self.current[axis] < self.ranges.end[axis] {
                self.done = false;
                break;
            }
            self.current[axis] = self.ranges.begin[axis];
        }
        Some(item)
    }
}

/// Wrap a grid index along one axis.
///
/// With `pbc` the index is reduced into `[0, shape)`. Without it the index is returned as is
/// when it already lies in `[0, shape)` and `None` marks it as out of bounds.
pub fn smart_wrap(i: i64, shape: i64, pbc: bool) -> Option<i64> {
    if shape <= 0 {
        return None;
    }
    if pbc {
        Some(i.rem_euclid(shape))
    } else if (0..shape).contains(&i) {
        Some(i)
    } else {
        None
    }
}

impl Cell {
    /// Reduce `delta` to its minimum image.
    ///
    /// Each fractional component is first rounded into `(-0.5, 0.5]`, so an exact `+0.5`
    /// stays in place while `-0.5` moves to `+0.5`.
    ///
    /// Exact for orthogonal cells. For oblique cells the rounded vector is refined by a search
    /// over the neighboring integer combinations within [`MIC_SEARCH_RADIUS`] per axis, which
    /// finds the shortest image unless the cell is strongly skewed.
    pub fn mic(&self, delta: &mut Vector3<f64>) {
        if self.nvec() == 0 {
            return;
        }
        for i in 0..self.nvec() {
            let frac = self.gvec(i).dot(delta);
            *delta -= (frac - 0.5).ceil() * self.rvec(i);
        }
        if self.is_orthogonal() {
            return;
        }

        let mut best = *delta;
        let mut best_norm_sq = delta.norm_squared();
        for r in &ImageRanges::symmetric(self.nvec(), MIC_SEARCH_RADIUS) {
            let candidate = *delta + self.lattice_translation(&r[..self.nvec()]);
            let norm_sq = candidate.norm_squared();
            if norm_sq < best_norm_sq {
                best = candidate;
                best_norm_sq = norm_sq;
            }
        }
        *delta = best;
    }

    /// Length of the minimum-image displacement from `a` to `b`.
    pub fn mic_distance(&self, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
        let mut delta = b - a;
        self.mic(&mut delta);
        delta.norm()
    }

    /// Integer ranges that contain every lattice translation `t` for which `delta + t` or
    /// `delta - t` lies within `rcut` of the origin.
    ///
    /// The bound along axis `i` is `ceil(rcut / spacing_i + |frac_i|)` steps in both
    /// directions, which never misses an image but is not tight. Bounds or candidate counts
    /// that do not fit the integer types are an [`CellError::InvalidArgument`].
    pub fn get_ranges_rcut(&self, delta: &Vector3<f64>, rcut: f64) -> Result<ImageRanges> {
        check_rcut(rcut)?;
        let mut begin = Vec::with_capacity(self.nvec());
        let mut end = Vec::with_capacity(self.nvec());
        for i in 0..self.nvec() {
            let frac = self.gvec(i).dot(delta);
            let bound = (rcut / self.rspacings()[i] + frac.abs()).ceil();
            let steps = (bound.is_finite() && bound < i64::MAX as f64)
                .then_some(bound as i64)
                .and_then(|steps| steps.checked_add(1).map(|next| (steps, next)));
            let (steps, next) = steps.ok_or_else(|| {
                CellError::invalid(format!(
                    "image bound along axis {} is out of range for rcut={}",
                    i, rcut
                ))
            })?;
            begin.push(-steps);
            end.push(next);
        }
        let ranges = ImageRanges { begin, end };
        ranges.try_len()?;
        trace!("ranges for rcut={}: {:?} ({} images)", rcut, ranges, ranges.len());
        Ok(ranges)
    }

    /// Select the periodic images of `origin` within `rcut` of `center`.
    ///
    /// Every combination `r` in `ranges` is tried; accepted images write `nvec` indexes into
    /// `indexes`, wrapped into `[0, shape_i)` along periodic axes and left as `r_i` otherwise.
    /// `indexes` must hold at least `ranges.len() * nvec` entries. Returns the number of
    /// accepted images.
    #[allow(clippy::too_many_arguments)]
    pub fn select_inside(
        &self,
        origin: &Vector3<f64>,
        center: &Vector3<f64>,
        rcut: f64,
        ranges: &ImageRanges,
        shape: &[i64],
        pbc: &[bool],
        indexes: &mut [i64],
    ) -> Result<usize> {
        check_rcut(rcut)?;
        let nvec = self.nvec();
        self.check_axis_count("ranges", ranges.nvec())?;
        if shape.len() < nvec || pbc.len() < nvec {
            return Err(CellError::invalid(format!(
                "shape and pbc need at least {} entries, got {} and {}",
                nvec,
                shape.len(),
                pbc.len()
            )));
        }
        if let Some(axis) = (0..nvec).find(|&i| pbc[i] && shape[i] <= 0) {
            return Err(CellError::invalid(format!(
                "periodic axis {} needs a positive grid extent, got {}",
                axis, shape[axis]
            )));
        }
        let capacity = ranges
            .try_len()?
            .checked_mul(nvec)
            .ok_or_else(|| CellError::invalid("index buffer size does not fit in usize"))?;
        if indexes.len() < capacity {
            return Err(CellError::invalid(format!(
                "index buffer holds {} entries, {} required",
                indexes.len(),
                capacity
            )));
        }

        let mut nselect = 0;
        for r in ranges {
            let position = origin + self.lattice_translation(&r[..nvec]);
            if (position - center).norm() > rcut {
                continue;
            }
            let row = &mut indexes[nselect * nvec..(nselect + 1) * nvec];
            for axis in 0..nvec {
                row[axis] = smart_wrap(r[axis], shape[axis], pbc[axis]).unwrap_or(r[axis]);
            }
            nselect += 1;
        }
        trace!("selected {} of {} images", nselect, ranges.len());
        Ok(nselect)
    }
}

fn check_rcut(rcut: f64) -> Result<()> {
    if !rcut.is_finite() || rcut < 0.0 {
        return Err(CellError::invalid(format!(
            "cutoff radius must be finite and non-negative, got {}",
            rcut
        )));
    }
    Ok(())
}
