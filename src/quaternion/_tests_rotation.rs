#[cfg(test)]
mod _tests_rotation {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;
    use ndarray::{ArrayD, IxDyn};

    use super::super::rotation::Rotation;
    use crate::error::Error;
    use crate::scalar::scalar::Scalar;
    use crate::vector::vector3d::Vector3d;

    const TOL: f64 = 1e-10;

    fn assert_rows(rotation: &Rotation, expected: &[([f64; 4], bool)]) {
        let rows: Vec<([f64; 4], bool)> = rotation
            .data()
            .iter()
            .copied()
            .collect::<Vec<f64>>()
            .chunks(4)
            .map(|q| [q[0], q[1], q[2], q[3]])
            .zip(rotation.improper().iter().copied())
            .collect();
        assert_eq!(rows.len(), expected.len());
        for ((q, flag), (want_q, want_flag)) in rows.iter().zip(expected) {
            for (got, want) in q.iter().zip(want_q) {
                assert_abs_diff_eq!(got, want, epsilon = TOL);
            }
            assert_eq!(flag, want_flag);
        }
    }

    fn assert_vector(vector: &Vector3d, expected: [f64; 3]) {
        let flat: Vec<f64> = vector.data().iter().copied().collect();
        assert_eq!(flat.len(), 3);
        for (got, want) in flat.iter().zip(&expected) {
            assert_abs_diff_eq!(got, want, epsilon = TOL);
        }
    }

    #[test]
    fn test_construction_normalizes() {
        let r = Rotation::single(2.0, 0.0, 0.0, 0.0, false);
        assert_rows(&r, &[([1.0, 0.0, 0.0, 0.0], false)]);
        // non-unit literals are accepted up to scale
        let h = 0.75_f64.sqrt();
        let r = Rotation::from_rows(&[([0.0, h, -h, 0.0], false)]);
        let s = 0.5_f64.sqrt();
        assert_rows(&r, &[([0.0, s, -s, 0.0], false)]);
    }

    #[test]
    fn test_new_checks_flag_shape() {
        let data = ArrayD::zeros(IxDyn(&[2, 4]));
        let flags = ArrayD::from_elem(IxDyn(&[3]), false);
        assert_eq!(
            Rotation::new(data, flags).unwrap_err(),
            Error::ShapeMismatch {
                lhs: vec![2],
                rhs: vec![3],
            }
        );
    }

    #[test]
    fn test_from_quaternion_is_proper() {
        let r = Rotation::from_quaternion(&crate::quaternion::Quaternion::single(
            0.5, 0.5, -0.5, 0.5,
        ));
        assert!(r.improper().iter().all(|&flag| !flag));
    }

    #[test]
    fn test_from_axes_angles() {
        let r = Rotation::from_axes_angles(
            &Vector3d::zvector(),
            &Scalar::from_value(FRAC_PI_2),
        )
        .unwrap();
        let s = 0.5_f64.sqrt();
        assert_rows(&r, &[([s, 0.0, 0.0, s], false)]);
    }

    #[test]
    fn test_from_axes_angles_broadcasts() {
        let axes = Vector3d::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let r = Rotation::from_axes_angles(&axes, &Scalar::from_value(PI)).unwrap();
        assert_eq!(r.shape(), &[2]);
        assert_rows(
            &r,
            &[([0.0, 1.0, 0.0, 0.0], false), ([0.0, 0.0, 1.0, 0.0], false)],
        );
    }

    #[test]
    fn test_apply_rotates() {
        let quarter_turn = Rotation::from_axes_angles(
            &Vector3d::zvector(),
            &Scalar::from_value(FRAC_PI_2),
        )
        .unwrap();
        let image = quarter_turn.apply(&Vector3d::xvector()).unwrap();
        assert_vector(&image, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_apply_improper_inverts() {
        let inversion = Rotation::single(1.0, 0.0, 0.0, 0.0, true);
        let image = inversion.apply(&Vector3d::single(1.0, 2.0, 3.0)).unwrap();
        assert_vector(&image, [-1.0, -2.0, -3.0]);
        // a mirror through the xy-plane
        let mirror = Rotation::single(0.0, 0.0, 0.0, 1.0, true);
        let image = mirror.apply(&Vector3d::single(1.0, 2.0, 3.0)).unwrap();
        assert_vector(&image, [1.0, 2.0, -3.0]);
    }

    #[test]
    fn test_apply_broadcasts_batch_against_single() {
        let batch = Rotation::from_rows(&[
            ([1.0, 0.0, 0.0, 0.0], false),
            ([1.0, 0.0, 0.0, 0.0], true),
        ]);
        let images = batch.apply(&Vector3d::single(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(images.shape(), &[2]);
        let flat: Vec<f64> = images.data().iter().copied().collect();
        assert_eq!(flat, vec![1.0, 2.0, 3.0, -1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_compose_xors_the_flags() {
        let mirror = Rotation::single(0.0, 0.0, 0.0, 1.0, true);
        let doubled = mirror.compose(&mirror).unwrap();
        // a mirror composed with itself is the proper identity
        assert!(!doubled.improper()[IxDyn(&[])]);
        assert_abs_diff_eq!(doubled.angle().get(&[]).unwrap(), 0.0, epsilon = TOL);

        let c2 = Rotation::single(0.0, 0.0, 0.0, 1.0, false);
        let product = mirror.compose(&c2).unwrap();
        assert!(product.improper()[IxDyn(&[])]);
    }

    #[test]
    fn test_outer_runs_left_index_slowest() {
        let a = Rotation::from_rows(&[
            ([1.0, 0.0, 0.0, 0.0], false),
            ([0.0, 1.0, 0.0, 0.0], false),
        ]);
        let b = Rotation::from_rows(&[
            ([1.0, 0.0, 0.0, 0.0], false),
            ([0.0, 0.0, 1.0, 0.0], false),
        ]);
        let products = a.outer(&b);
        assert_eq!(products.shape(), &[4]);
        assert_rows(
            &products,
            &[
                ([1.0, 0.0, 0.0, 0.0], false),
                ([0.0, 0.0, 1.0, 0.0], false),
                ([0.0, 1.0, 0.0, 0.0], false),
                ([0.0, 0.0, 0.0, 1.0], false),
            ],
        );
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        let r = Rotation::from_rows(&[
            ([0.5, 0.5, -0.5, 0.5], false),
            ([0.0, 0.0, 0.0, 1.0], true),
        ]);
        let product = r.compose(&r.inverse()).unwrap();
        for index in 0..2 {
            assert_abs_diff_eq!(product.angle().get(&[index]).unwrap(), 0.0, epsilon = 1e-7);
        }
        assert!(product.improper().iter().all(|&flag| !flag));
        // inversion keeps the improper flag itself
        assert!(r.inverse().improper()[IxDyn(&[1])]);
    }

    #[test]
    fn test_angle() {
        let s = 0.5_f64.sqrt();
        let r = Rotation::from_rows(&[
            ([1.0, 0.0, 0.0, 0.0], false),
            ([0.0, 0.0, 0.0, 1.0], false),
            ([s, 0.0, 0.0, s], false),
            ([-s, 0.0, 0.0, -s], false),
        ]);
        let angles = r.angle();
        assert_abs_diff_eq!(angles.get(&[0]).unwrap(), 0.0, epsilon = TOL);
        assert_abs_diff_eq!(angles.get(&[1]).unwrap(), PI, epsilon = TOL);
        assert_abs_diff_eq!(angles.get(&[2]).unwrap(), FRAC_PI_2, epsilon = TOL);
        // q and -q describe the same rotation
        assert_abs_diff_eq!(angles.get(&[3]).unwrap(), FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn test_axis() {
        let s = 0.5_f64.sqrt();
        let r = Rotation::from_rows(&[
            ([s, 0.0, 0.0, s], false),
            ([-s, 0.0, 0.0, -s], false),
            ([0.0, 1.0, 0.0, 0.0], false),
            ([1.0, 0.0, 0.0, 0.0], false),
        ]);
        let axes = r.axis();
        let flat: Vec<f64> = axes.data().iter().copied().collect();
        let expected = [
            [0.0, 0.0, 1.0],
            // the sign flip keeps axis and angle paired
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            // the identity has no axis and reports +z
            [0.0, 0.0, 1.0],
        ];
        for (row, want) in flat.chunks(3).zip(&expected) {
            for (got, want) in row.iter().zip(want) {
                assert_abs_diff_eq!(got, want, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_differentiators_identify_sign_pairs() {
        let s = 0.5_f64.sqrt();
        let plus = Rotation::single(s, 0.0, 0.0, s, false);
        let minus = Rotation::single(-s, 0.0, 0.0, -s, false);
        assert_eq!(plus.differentiators(), minus.differentiators());
        // the improper flag tells otherwise-equal elements apart
        let improper = Rotation::single(s, 0.0, 0.0, s, true);
        assert_ne!(plus.differentiators(), improper.differentiators());
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let r = Rotation::from_rows(&[
            ([1.0, 0.0, 0.0, 0.0], false),
            ([0.0, 0.0, 0.0, 1.0], false),
            ([0.0, 0.0, 0.0, -1.0], false),
            ([1.0, 0.0, 0.0, 0.0], false),
        ]);
        let distinct = r.unique();
        assert_rows(
            &distinct,
            &[
                ([1.0, 0.0, 0.0, 0.0], false),
                ([0.0, 0.0, 0.0, 1.0], false),
            ],
        );
    }

    #[test]
    fn test_reshape_and_flatten_carry_the_flags() {
        let r = Rotation::from_rows(&[
            ([1.0, 0.0, 0.0, 0.0], false),
            ([0.0, 1.0, 0.0, 0.0], true),
            ([0.0, 0.0, 1.0, 0.0], false),
            ([0.0, 0.0, 0.0, 1.0], true),
        ]);
        let grid = r.reshape(&[2, 2]).unwrap();
        assert_eq!(grid.shape(), &[2, 2]);
        assert!(grid.improper()[IxDyn(&[0, 1])]);
        assert!(!grid.improper()[IxDyn(&[1, 0])]);
        let back = grid.flatten();
        assert_eq!(back.shape(), &[4]);
        assert_eq!(
            r.reshape(&[3]).unwrap_err(),
            Error::ReshapeSize {
                size: 4,
                shape: vec![3],
            }
        );
    }

    #[test]
    fn test_get() {
        let r = Rotation::from_rows(&[
            ([1.0, 0.0, 0.0, 0.0], false),
            ([0.0, 0.0, 0.0, 1.0], true),
        ]);
        let second = r.get(&[1]).unwrap();
        assert_rows(&second, &[([0.0, 0.0, 0.0, 1.0], true)]);
        assert!(matches!(
            r.get(&[2]).unwrap_err(),
            Error::IndexOutOfBounds { .. }
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let r = Rotation::from_rows(&[
            ([0.5, 0.5, -0.5, 0.5], false),
            ([0.0, 0.0, 0.0, 1.0], true),
        ]);
        let encoded = serde_json::to_string(&r).unwrap();
        let decoded: Rotation = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.shape(), r.shape());
        for (got, want) in decoded.data().iter().zip(r.data().iter()) {
            assert_abs_diff_eq!(got, want, epsilon = 1e-12);
        }
        assert_eq!(
            decoded.improper().iter().collect::<Vec<_>>(),
            r.improper().iter().collect::<Vec<_>>()
        );
    }
}
