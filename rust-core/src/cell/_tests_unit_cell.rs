#[cfg(test)]
mod tests {
    use super::super::unit_cell::Cell;
    use crate::error::CellError;
    use crate::interfaces::Space;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, Matrix3, Vector3};

    const TOL: f64 = 1e-10;

    fn triclinic_vectors() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(3.1, 0.2, -0.4),
            Vector3::new(0.7, 2.9, 0.3),
            Vector3::new(-0.5, 0.6, 4.2),
        ]
    }

    fn assert_dual(cell: &Cell) {
        let product = cell.rvecs() * cell.gvecs().transpose();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(product[(i, j)], expected, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_new_cubic() {
        let a = 2.5;
        let cell = Cell::new(&[
            Vector3::new(a, 0.0, 0.0),
            Vector3::new(0.0, a, 0.0),
            Vector3::new(0.0, 0.0, a),
        ])
        .unwrap();

        assert_eq!(cell.nvec(), 3);
        assert_abs_diff_eq!(cell.volume(), a.powi(3), epsilon = TOL);
        assert_abs_diff_eq!(cell.gvecs()[(0, 0)], 1.0 / a, epsilon = TOL);
        assert!(cell.is_orthogonal());
        for (l, s) in cell.rlengths().iter().zip(cell.rspacings()) {
            assert_abs_diff_eq!(*l, a, epsilon = TOL);
            assert_abs_diff_eq!(*s, a, epsilon = TOL);
        }
        for (l, s) in cell.glengths().iter().zip(cell.gspacings()) {
            assert_abs_diff_eq!(*l, 1.0 / a, epsilon = TOL);
            assert_abs_diff_eq!(*s, 1.0 / a, epsilon = TOL);
        }
    }

    #[test]
    fn test_empty_cell() {
        let cell = Cell::new(&[]).unwrap();
        assert_eq!(cell.nvec(), 0);
        assert_eq!(*cell.rvecs(), Matrix3::identity());
        assert_eq!(*cell.gvecs(), Matrix3::identity());
        assert_eq!(cell.volume(), 1.0);
        assert!(cell.rlengths().is_empty());
        assert!(cell.rspacings().is_empty());
        assert_eq!(cell, Cell::empty());
        assert_eq!(cell, Cell::default());
    }

    #[test]
    fn test_supplied_rows_are_preserved_exactly() {
        let vectors = triclinic_vectors();
        for nvec in 0..=3 {
            let cell = Cell::new(&vectors[..nvec]).unwrap();
            assert_eq!(cell.nvec(), nvec);
            for (i, v) in vectors[..nvec].iter().enumerate() {
                for k in 0..3 {
                    assert_eq!(cell.rvecs()[(i, k)].to_bits(), v[k].to_bits());
                }
            }
            assert_eq!(cell.active_rvecs(), vectors[..nvec].to_vec());
        }
    }

    #[test]
    fn test_reciprocal_is_dual_for_every_nvec() {
        let vectors = triclinic_vectors();
        for nvec in 0..=3 {
            let cell = Cell::new(&vectors[..nvec]).unwrap();
            assert_dual(&cell);
        }
    }

    #[test]
    fn test_completion_rows_are_orthonormal_to_input() {
        let vectors = triclinic_vectors();
        for nvec in 1..3 {
            let cell = Cell::new(&vectors[..nvec]).unwrap();
            for i in nvec..3 {
                let row = cell.rvecs().row(i).transpose();
                assert_abs_diff_eq!(row.norm(), 1.0, epsilon = TOL);
                for v in &vectors[..nvec] {
                    assert_abs_diff_eq!(row.dot(v), 0.0, epsilon = TOL);
                }
            }
        }
    }

    #[test]
    fn test_one_dimensional_cell() {
        let cell = Cell::new(&[Vector3::new(0.0, 0.0, 2.0)]).unwrap();
        assert_abs_diff_eq!(cell.volume(), 2.0, epsilon = TOL);
        let g0 = cell.gvecs().row(0).transpose();
        assert_abs_diff_eq!(g0, Vector3::new(0.0, 0.0, 0.5), epsilon = TOL);
        assert_abs_diff_eq!(cell.rspacings()[0], 2.0, epsilon = TOL);
        assert_abs_diff_eq!(cell.gspacings()[0], 0.5, epsilon = TOL);
    }

    #[test]
    fn test_two_dimensional_oblique_spacings() {
        let cell = Cell::new(&[Vector3::new(2.0, 0.0, 0.0), Vector3::new(1.0, 3.0, 0.0)]).unwrap();
        assert_abs_diff_eq!(cell.volume(), 6.0, epsilon = TOL);
        assert!(!cell.is_orthogonal());
        // Spacing along a_i is the area divided by the length of the other vector
        assert_abs_diff_eq!(cell.rspacings()[0], 6.0 / 10.0_f64.sqrt(), epsilon = TOL);
        assert_abs_diff_eq!(cell.rspacings()[1], 3.0, epsilon = TOL);
        assert_eq!(cell.spacings(Space::Real), cell.rspacings());
        assert_eq!(cell.lengths(Space::Reciprocal), cell.glengths());
        assert_eq!(cell.basis(Space::Reciprocal), cell.gvecs());
    }

    #[test]
    fn test_from_matrix() {
        let matrix = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
        let cell = Cell::from_matrix(&matrix).unwrap();
        assert_eq!(cell.nvec(), 2);
        assert_abs_diff_eq!(cell.volume(), 2.0, epsilon = TOL);

        let empty = DMatrix::<f64>::zeros(0, 3);
        assert_eq!(Cell::from_matrix(&empty).unwrap().nvec(), 0);
    }

    #[test]
    fn test_from_matrix_rejects_bad_shapes() {
        let too_many_rows = DMatrix::<f64>::identity(4, 3);
        assert!(matches!(
            Cell::from_matrix(&too_many_rows),
            Err(CellError::InvalidArgument(_))
        ));

        let too_few_columns = DMatrix::<f64>::identity(2, 2);
        assert!(matches!(
            Cell::from_matrix(&too_few_columns),
            Err(CellError::InvalidArgument(_))
        ));

        let four = vec![Vector3::x(); 4];
        assert!(matches!(Cell::new(&four), Err(CellError::InvalidArgument(_))));
    }

    #[test]
    fn test_dependent_vectors_are_rejected() {
        let parallel = [Vector3::new(1.0, 1.0, 0.0), Vector3::new(2.0, 2.0, 0.0)];
        assert!(matches!(Cell::new(&parallel), Err(CellError::Geometry(_))));

        let zero = [Vector3::zeros()];
        assert!(matches!(Cell::new(&zero), Err(CellError::Geometry(_))));
    }

    #[test]
    fn test_update_is_atomic() {
        let mut cell = Cell::new(&triclinic_vectors()).unwrap();
        let before = cell.clone();

        let bad = [Vector3::new(1.0, 0.0, 0.0), Vector3::new(-3.0, 0.0, 0.0)];
        assert!(cell.update(&bad).is_err());
        assert_eq!(cell, before);

        cell.update(&[Vector3::new(5.0, 0.0, 0.0)]).unwrap();
        assert_eq!(cell.nvec(), 1);
        assert_abs_diff_eq!(cell.volume(), 5.0, epsilon = TOL);
        assert_dual(&cell);
    }

    #[test]
    fn test_frac_cart_round_trip() {
        let cell = Cell::new(&triclinic_vectors()).unwrap();
        let cart = Vector3::new(1.3, -2.7, 0.45);
        let frac = cell.to_frac(&cart);
        assert_abs_diff_eq!(cell.to_cart(&frac), cart, epsilon = TOL);

        // Lattice vectors have unit fractional coordinates
        let frac = cell.to_frac(&triclinic_vectors()[1]);
        assert_abs_diff_eq!(frac, Vector3::new(0.0, 1.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn test_to_frac_zeroes_inactive_axes() {
        let cell = Cell::new(&[Vector3::new(2.0, 0.0, 0.0)]).unwrap();
        let frac = cell.to_frac(&Vector3::new(3.0, 4.0, 5.0));
        assert_abs_diff_eq!(frac, Vector3::new(1.5, 0.0, 0.0), epsilon = TOL);
        assert_eq!(frac.y, 0.0);
        assert_eq!(frac.z, 0.0);
        assert_abs_diff_eq!(cell.to_cart(&frac), Vector3::new(3.0, 0.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn test_g_lincomb() {
        let cell = Cell::new(&triclinic_vectors()).unwrap();
        let result = cell.g_lincomb(&[1.0, -2.0, 0.5]).unwrap();
        let expected = cell.gvecs().row(0).transpose() - 2.0 * cell.gvecs().row(1).transpose()
            + 0.5 * cell.gvecs().row(2).transpose();
        assert_abs_diff_eq!(result, expected, epsilon = TOL);

        // The gradient of f(frac) = frac_1 in Cartesian space is g_1
        let grad = cell.g_lincomb(&[0.0, 1.0, 0.0]).unwrap();
        assert_abs_diff_eq!(grad.dot(&triclinic_vectors()[1]), 1.0, epsilon = TOL);

        assert!(matches!(cell.g_lincomb(&[1.0]), Err(CellError::InvalidArgument(_))));
    }

    #[test]
    fn test_dot_rvecs() {
        let cell = Cell::new(&[Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 0.0)]).unwrap();
        let dots = cell.dot_rvecs(&Vector3::new(1.0, 1.0, 7.0));
        assert_eq!(dots, Vector3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_add_rvec() {
        let cell = Cell::new(&triclinic_vectors()).unwrap();
        let mut delta = Vector3::new(0.1, 0.2, 0.3);
        cell.add_rvec(&mut delta, &[1, 0, -2]).unwrap();
        let vectors = triclinic_vectors();
        let expected = Vector3::new(0.1, 0.2, 0.3) + vectors[0] - 2.0 * vectors[2];
        assert_abs_diff_eq!(delta, expected, epsilon = TOL);

        assert!(matches!(
            cell.add_rvec(&mut delta, &[1, 0]),
            Err(CellError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let cell = Cell::new(&triclinic_vectors()[..2]).unwrap();
        let json = serde_json::to_string(&cell).unwrap();
        let restored: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cell);

        let rows: Vec<[f64; 3]> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), 2);

        assert!(serde_json::from_str::<Cell>("[[1,0,0],[2,0,0]]").is_err());
    }
}
