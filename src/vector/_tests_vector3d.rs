#[cfg(test)]
mod _tests_vector3d {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use approx::assert_abs_diff_eq;
    use ndarray::{ArrayD, IxDyn};

    use super::super::vector3d::Vector3d;
    use crate::error::Error;
    use crate::quaternion::rotation::Rotation;
    use crate::scalar::scalar::Scalar;

    const TOL: f64 = 1e-10;

    // Helper function to check leading shape and row contents at once
    fn assert_rows(vectors: &Vector3d, shape: &[usize], expected: &[[f64; 3]]) {
        assert_eq!(vectors.shape(), shape);
        let flat: Vec<f64> = vectors.data().iter().copied().collect();
        assert_eq!(flat.len(), expected.len() * 3);
        for (row, want) in flat.chunks(3).zip(expected) {
            for (got, want) in row.iter().zip(want) {
                assert_abs_diff_eq!(got, want, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_new_requires_trailing_axis_of_three() {
        let err = Vector3d::new(ArrayD::zeros(IxDyn(&[4]))).unwrap_err();
        assert_eq!(
            err,
            Error::TrailingAxis {
                expected: 3,
                shape: vec![4],
            }
        );
        assert!(Vector3d::new(ArrayD::zeros(IxDyn(&[2, 3]))).is_ok());
    }

    #[test]
    fn test_single_and_components() {
        let v = Vector3d::single(1.0, -1.0, 1.0);
        assert_eq!(v.shape(), &[] as &[usize]);
        assert_eq!(v.len(), 1);
        assert_abs_diff_eq!(v.x().get(&[]).unwrap(), 1.0, epsilon = TOL);
        assert_abs_diff_eq!(v.y().get(&[]).unwrap(), -1.0, epsilon = TOL);
        assert_abs_diff_eq!(v.z().get(&[]).unwrap(), 1.0, epsilon = TOL);
    }

    #[test]
    fn test_basis_constructors() {
        assert_rows(&Vector3d::xvector(), &[], &[[1.0, 0.0, 0.0]]);
        assert_rows(&Vector3d::yvector(), &[], &[[0.0, 1.0, 0.0]]);
        assert_rows(&Vector3d::zvector(), &[], &[[0.0, 0.0, 1.0]]);
        assert_rows(
            &Vector3d::zero(&[2]),
            &[2],
            &[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
        );
    }

    #[test]
    fn test_neg() {
        let v = Vector3d::from_rows(&[[-0.707, 0.707, 1.0], [2.0, 2.0, 2.0]]);
        assert_rows(
            &(-&v),
            &[2],
            &[[0.707, -0.707, -1.0], [-2.0, -2.0, -2.0]],
        );
    }

    #[test]
    fn test_add_number() {
        let v = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [0.1, -0.3, 0.2]]);
        assert_rows(
            &(&v + 0.5),
            &[2],
            &[[1.5, 0.5, 0.5], [0.6, 0.2, 0.7]],
        );
        assert_rows(
            &(0.5 + &v),
            &[2],
            &[[1.5, 0.5, 0.5], [0.6, 0.2, 0.7]],
        );
    }

    #[test]
    fn test_add_vector_broadcasts() {
        let single = Vector3d::single(1.0, -1.0, 1.0);
        let pair = Vector3d::from_rows(&[[9.0, 9.0, 9.0], [-5.0, -5.0, -6.0]]);
        let sum = &single + &pair;
        assert_rows(&sum, &[2], &[[10.0, 8.0, 10.0], [-4.0, -6.0, -5.0]]);
        assert_rows(&(&pair + &single), &[2], &[[10.0, 8.0, 10.0], [-4.0, -6.0, -5.0]]);
    }

    #[test]
    fn test_sub_number() {
        let v = Vector3d::single(1.0, 2.0, 4.0);
        let forward = &v - 0.5;
        let backward = 0.5 - &v;
        assert_rows(&forward, &[], &[[0.5, 1.5, 3.5]]);
        assert_rows(&backward, &[], &[[-0.5, -1.5, -3.5]]);
    }

    #[test]
    fn test_sub_vector_antisymmetric() {
        let a = Vector3d::from_rows(&[[0.5, 0.25, 0.125], [1.0, 2.0, 4.0]]);
        let b = Vector3d::single(0.001, 0.0001, 0.00001);
        let forward = &a - &b;
        let backward = -(&b - &a);
        for (got, want) in forward.data().iter().zip(backward.data().iter()) {
            assert_abs_diff_eq!(got, want, epsilon = TOL);
        }
    }

    #[test]
    fn test_mul_number() {
        let v = Vector3d::single(-0.707, 0.707, 1.0);
        assert_rows(&(&v * -12.0), &[], &[[8.484, -8.484, -12.0]]);
        assert_rows(&(-12.0 * &v), &[], &[[8.484, -8.484, -12.0]]);
    }

    #[test]
    fn test_mul_scalar_array_commutes() {
        let v = Vector3d::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let factors = Scalar::from_slice(&[2.0, -1.0]);
        let left = &v * &factors;
        let right = &factors * &v;
        assert_rows(&left, &[2], &[[2.0, 4.0, 6.0], [-4.0, -5.0, -6.0]]);
        for (got, want) in left.data().iter().zip(right.data().iter()) {
            assert_abs_diff_eq!(got, want, epsilon = TOL);
        }
    }

    #[test]
    fn test_dot_is_sum_of_squares() {
        let v = Vector3d::from_rows(&[[0.5, 0.5, 0.5], [-1.0, 0.0, 0.0]]);
        let d = v.dot(&v).unwrap();
        assert_eq!(d.shape(), &[2]);
        assert_abs_diff_eq!(d.get(&[0]).unwrap(), 0.75, epsilon = TOL);
        assert_abs_diff_eq!(d.get(&[1]).unwrap(), 1.0, epsilon = TOL);
    }

    #[test]
    fn test_dot_is_symmetric() {
        let a = Vector3d::from_rows(&[[1.0, -1.0, 1.0], [9.0, 9.0, 9.0]]);
        let b = Vector3d::single(0.5, 0.25, 0.125);
        let forward = a.dot(&b).unwrap();
        let backward = b.dot(&a).unwrap();
        for (got, want) in forward.data().iter().zip(backward.data().iter()) {
            assert_abs_diff_eq!(got, want, epsilon = TOL);
        }
    }

    #[test]
    fn test_dot_rejects_incompatible_leading_shapes() {
        let a = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(
            a.dot(&b).unwrap_err(),
            Error::ShapeMismatch {
                lhs: vec![2, 3],
                rhs: vec![3, 3],
            }
        );
    }

    #[test]
    fn test_dot_outer() {
        let a = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = Vector3d::from_rows(&[[0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [2.0, 2.0, 2.0]]);
        let table = a.dot_outer(&b);
        assert_eq!(table.shape(), &[2, 3]);
        let expected = [[0.5, -1.0, 2.0], [0.5, 0.0, 2.0]];
        for i in 0..2 {
            for j in 0..3 {
                assert_abs_diff_eq!(
                    table.get(&[i, j]).unwrap(),
                    expected[i][j],
                    epsilon = TOL
                );
            }
        }
    }

    #[test]
    fn test_cross() {
        let a = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]]);
        let b = Vector3d::single(0.0, 1.0, 0.0);
        let c = a.cross(&b).unwrap();
        assert_rows(&c, &[2], &[[0.0, 0.0, 1.0], [0.0, 0.0, -1.0]]);
        let reversed = b.cross(&a).unwrap();
        assert_rows(&reversed, &[2], &[[0.0, 0.0, -1.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_from_polar() {
        let cases: [(f64, f64, [f64; 3]); 2] = [
            (FRAC_PI_4, FRAC_PI_4, [0.5, 0.5, 0.707107]),
            (2.0 * PI / 3.0, 7.0 * PI / 6.0, [-0.75, -0.433013, -0.5]),
        ];
        for (theta, phi, expected) in cases {
            let v = Vector3d::from_polar(
                &Scalar::from_value(theta),
                &Scalar::from_value(phi),
                1.0,
            )
            .unwrap();
            let got: Vec<f64> = v.data().iter().copied().collect();
            for (got, want) in got.iter().zip(&expected) {
                assert_abs_diff_eq!(got, want, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_angle_with_self_is_zero() {
        let v = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [0.5, 0.5, 0.5]]);
        let angles = v.angle_with(&v).unwrap();
        for index in 0..2 {
            assert_abs_diff_eq!(angles.get(&[index]).unwrap(), 0.0, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_angle_with_stays_in_range() {
        let a = Vector3d::from_rows(&[[-0.707, 0.707, 1.0], [2.0, 2.0, 2.0], [0.1, -0.3, 0.2]]);
        let b = Vector3d::single(-5.0, -5.0, -6.0);
        let angles = a.angle_with(&b).unwrap();
        for index in 0..3 {
            let angle = angles.get(&[index]).unwrap();
            assert!((0.0..=PI).contains(&angle), "angle {angle} out of range");
        }
        let perpendicular = Vector3d::xvector().angle_with(&Vector3d::yvector()).unwrap();
        assert_abs_diff_eq!(perpendicular.get(&[]).unwrap(), FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn test_rotate_about_z() {
        let cases: [([f64; 3], f64, [f64; 3]); 3] = [
            ([1.0, 0.0, 0.0], FRAC_PI_2, [0.0, 1.0, 0.0]),
            ([1.0, 1.0, 0.0], FRAC_PI_2, [-1.0, 1.0, 0.0]),
            ([1.0, 1.0, 1.0], -FRAC_PI_2, [1.0, -1.0, 1.0]),
        ];
        for ([x, y, z], angle, expected) in cases {
            let rotated = Vector3d::single(x, y, z).rotate_about_z(angle);
            assert_rows(&rotated, &[], &[expected]);
        }
    }

    #[test]
    fn test_rotate_by_rotation() {
        let rotation = Rotation::single(0.5, 0.5, -0.5, 0.5, false);
        let rotated = Vector3d::single(1.0, 1.0, 2.0).rotate(&rotation).unwrap();
        assert_rows(&rotated, &[], &[[-1.0, -2.0, 1.0]]);
    }

    #[test]
    fn test_norm_and_unit() {
        let v = Vector3d::from_rows(&[[3.0, 4.0, 0.0], [0.0, 0.0, 0.0]]);
        let norms = v.norm();
        assert_abs_diff_eq!(norms.get(&[0]).unwrap(), 5.0, epsilon = TOL);
        assert_abs_diff_eq!(norms.get(&[1]).unwrap(), 0.0, epsilon = TOL);
        // zero vectors normalize to zero rather than NaN
        assert_rows(&v.unit(), &[2], &[[0.6, 0.8, 0.0], [0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_reshape_and_flatten() {
        let v = Vector3d::from_rows(&[
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
        ]);
        let grid = v.reshape(&[2, 2]).unwrap();
        assert_eq!(grid.shape(), &[2, 2]);
        assert_eq!(grid.data().shape(), &[2, 2, 3]);
        let back = grid.flatten();
        assert_eq!(back.shape(), &[4]);
        assert_eq!(
            v.reshape(&[3]).unwrap_err(),
            Error::ReshapeSize {
                size: 4,
                shape: vec![3],
            }
        );
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let v = Vector3d::from_rows(&[
            [1.0, 0.0, 0.0],
            [1.0 + 1e-9, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ]);
        assert_rows(&v.unique(), &[2], &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let v = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(
            v.get(&[5]).unwrap_err(),
            Error::IndexOutOfBounds {
                index: vec![5],
                shape: vec![2],
            }
        );
    }
}
