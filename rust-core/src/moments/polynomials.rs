// Recursive generation of Cartesian, pure (regular solid harmonic) and radial polynomials.
//
// The seed values occupy the first slots of the output buffer and shell 0 (the constant 1) is
// never stored:
//   Cartesian: output[0..3] = (x, y, z), then shells 2..=lmax in alphabetical order
//   Pure:      output[0..3] = (z, x, y) = (C10, C11, S11), then C_l0, C_l1, S_l1, ..., C_ll, S_ll
//   Radial:    output[0] = r, then r^2, ..., r^lmax
//
// Every filler returns the offset of the last shell it wrote, or `None` when lmax == 0.

use crate::error::{CellError, Result};

/// Number of Cartesian functions in shell `l`.
pub fn get_ncart(l: usize) -> usize {
    (l + 1) * (l + 2) / 2
}

/// Number of pure functions in shell `l`.
pub fn get_npure(l: usize) -> usize {
    2 * l + 1
}

/// Number of Cartesian functions in shells `0..=lmax`.
pub fn get_ncart_cumul(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 2) * (lmax + 3) / 6
}

/// Number of pure functions in shells `0..=lmax`.
pub fn get_npure_cumul(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 1)
}

fn check_output(kind: &str, len: usize, required: usize) -> Result<()> {
    if len < required {
        return Err(CellError::invalid(format!(
            "{} polynomial output holds {} values, {} required",
            kind, len, required
        )));
    }
    Ok(())
}

/// Fill all Cartesian monomials `x^a y^b z^c` with `1 <= a+b+c <= lmax`.
pub fn fill_cartesian_polynomials(output: &mut [f64], lmax: usize) -> Result<Option<usize>> {
    check_output("cartesian", output.len(), get_ncart_cumul(lmax) - 1)?;
    if lmax == 0 {
        return Ok(None);
    }

    let (x, y, z) = (output[0], output[1], output[2]);
    let mut old_offset = 0;
    for l in 2..=lmax {
        let old_ncart = get_ncart(l - 1);
        let new_offset = old_offset + old_ncart;
        // Multiply the whole previous shell by x
        for i in 0..old_ncart {
            output[new_offset + i] = x * output[old_offset + i];
        }
        // The last l entries of the previous shell contain no x; multiply those by y
        let yz_offset = old_offset + old_ncart - l;
        for i in 0..l {
            output[new_offset + old_ncart + i] = y * output[yz_offset + i];
        }
        output[new_offset + old_ncart + l] = z * output[new_offset - 1];
        old_offset = new_offset;
    }
    Ok(Some(old_offset))
}

/// Fill the regular solid harmonics with Racah normalization for `1 <= l <= lmax`.
///
/// Shell `l` is computed from shells `l-1` and `l-2` of the auxiliary polynomials
/// `Pi_l^m(z, r)` and `A_m(x, y)`, `B_m(x, y)`.
pub fn fill_pure_polynomials(output: &mut [f64], lmax: usize) -> Result<Option<usize>> {
    check_output("pure", output.len(), get_npure_cumul(lmax) - 1)?;
    if lmax == 0 {
        return Ok(None);
    }
    if lmax == 1 {
        return Ok(Some(0));
    }

    let (z, x, y) = (output[0], output[1], output[2]);
    let r2 = x * x + y * y + z * z;

    let mut pi_old = vec![0.0; lmax + 1];
    let mut pi_new = vec![0.0; lmax + 1];
    let mut a = vec![0.0; lmax + 1];
    let mut b = vec![0.0; lmax + 1];
    pi_old[0] = 1.0;
    pi_new[0] = z;
    pi_new[1] = 1.0;
    a[1] = x;
    b[1] = y;

    let mut old_offset = 0;
    for l in 2..=lmax {
        let new_offset = old_offset + get_npure(l - 1);
        let lf = l as f64;
        let factor = 2.0 * lf - 1.0;

        // Pi_l^m for m <= l-2 from the two previous shells
        for m in 0..=l - 2 {
            let mf = m as f64;
            let tmp = pi_old[m];
            pi_old[m] = pi_new[m];
            pi_new[m] = (z * factor * pi_old[m] - r2 * (lf + mf - 1.0) * tmp) / (lf - mf);
        }
        pi_old[l - 1] = pi_new[l - 1];
        pi_new[l] = factor * pi_old[l - 1];
        pi_new[l - 1] = z * pi_new[l];

        a[l] = x * a[l - 1] - y * b[l - 1];
        b[l] = x * b[l - 1] + y * a[l - 1];

        output[new_offset] = pi_new[0];
        let mut norm = 2.0_f64.sqrt();
        for m in 1..=l {
            norm /= (((l + m) * (l - m + 1)) as f64).sqrt();
            output[new_offset + 2 * m - 1] = norm * a[m] * pi_new[m];
            output[new_offset + 2 * m] = norm * b[m] * pi_new[m];
        }
        old_offset = new_offset;
    }
    Ok(Some(old_offset))
}

/// Apply [`fill_pure_polynomials`] to `nrep` rows of a flat buffer, row `i` starting at
/// `i * stride`.
pub fn fill_pure_polynomials_array(
    output: &mut [f64],
    lmax: usize,
    nrep: usize,
    stride: usize,
) -> Result<Option<usize>> {
    let row_len = get_npure_cumul(lmax) - 1;
    if stride < row_len {
        return Err(CellError::invalid(format!(
            "stride {} is smaller than the {} values of one row",
            stride, row_len
        )));
    }
    if nrep > 0 {
        check_output("pure", output.len(), (nrep - 1) * stride + row_len)?;
    }

    let mut last = None;
    for irep in 0..nrep {
        let start = irep * stride;
        last = fill_pure_polynomials(&mut output[start..start + row_len], lmax)?;
    }
    Ok(last)
}

/// Fill successive powers `r, r^2, ..., r^lmax` of the seed `output[0]`.
pub fn fill_radial_polynomials(output: &mut [f64], lmax: usize) -> Result<Option<usize>> {
    check_output("radial", output.len(), lmax)?;
    if lmax == 0 {
        return Ok(None);
    }
    let r = output[0];
    for l in 1..lmax {
        output[l] = r * output[l - 1];
    }
    Ok(Some(lmax - 1))
}
