// Named crystallographic point groups, constructed once on first use.
//
// Axis conventions follow the standard setting: the principal axis along z,
// secondary twofold axes along x and y. A mirror is stored as an improper
// twofold rotation about the mirror normal, the inversion as the improper
// identity.

use std::f64::consts::FRAC_1_SQRT_2;

use once_cell::sync::Lazy;

use crate::quaternion::rotation::Rotation;
use crate::quaternion::symmetry::Symmetry;

const IDENTITY: ([f64; 4], bool) = ([1.0, 0.0, 0.0, 0.0], false);

fn group(rows: &[([f64; 4], bool)], name: &str) -> Symmetry {
    Symmetry::new(Rotation::from_rows(rows)).with_name(name)
}

fn closure(generators: &[&Rotation], name: &str) -> Symmetry {
    Symmetry::from_generators(generators)
        .expect("point-group generators close within the physical cap")
        .with_name(name)
}

// Shared generators: a twofold mirror about the x-y diagonal and the
// threefold rotation about the cube diagonal.
static MIRROR_XY: Lazy<Rotation> = Lazy::new(|| {
    let c = 0.75_f64.sqrt();
    Rotation::from_rows(&[IDENTITY, ([0.0, c, -c, 0.0], true)])
});
static CUBIC: Lazy<Rotation> =
    Lazy::new(|| Rotation::from_rows(&[IDENTITY, ([0.5, 0.5, 0.5, 0.5], false)]));

// ---- triclinic ----

/// 1: the identity group.
pub static C1: Lazy<Symmetry> = Lazy::new(|| group(&[IDENTITY], "1"));

/// -1: identity and inversion.
pub static CI: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([1.0, 0.0, 0.0, 0.0], true)], "-1"));

// ---- twofold rotations about each axis ----

pub static C2X: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 1.0, 0.0, 0.0], false)], "211"));
pub static C2Y: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 0.0, 1.0, 0.0], false)], "121"));
pub static C2Z: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 0.0, 0.0, 1.0], false)], "112"));

/// 2: the conventional setting of the twofold group, axis along z.
pub static C2: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 0.0, 0.0, 1.0], false)], "2"));

// ---- mirrors normal to each axis ----

pub static CSX: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 1.0, 0.0, 0.0], true)], "m11"));
pub static CSY: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 0.0, 1.0, 0.0], true)], "1m1"));
pub static CSZ: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 0.0, 0.0, 1.0], true)], "11m"));

/// m: the conventional setting of the mirror group, normal along z.
pub static CS: Lazy<Symmetry> =
    Lazy::new(|| group(&[IDENTITY, ([0.0, 0.0, 0.0, 1.0], true)], "m"));

// ---- monoclinic ----

pub static C2H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C2.rotation(), CS.rotation()], "2/m"));

// ---- orthorhombic ----

pub static D2: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C2Z.rotation(), C2X.rotation(), C2Y.rotation()], "222"));
pub static C2V: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C2X.rotation(), CSZ.rotation()], "mm2"));
pub static D2H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[CSZ.rotation(), CSX.rotation(), CSY.rotation()], "mmm"));

// ---- fourfold rotations ----

pub static C4X: Lazy<Symmetry> = Lazy::new(|| {
    group(
        &[
            IDENTITY,
            ([FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0], false),
            ([0.0, 1.0, 0.0, 0.0], false),
            ([-FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0], false),
        ],
        "",
    )
});
pub static C4Y: Lazy<Symmetry> = Lazy::new(|| {
    group(
        &[
            IDENTITY,
            ([FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2, 0.0], false),
            ([0.0, 0.0, 1.0, 0.0], false),
            ([-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2, 0.0], false),
        ],
        "",
    )
});

/// 4: fourfold rotation about z.
pub static C4: Lazy<Symmetry> = Lazy::new(|| {
    group(
        &[
            IDENTITY,
            ([FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2], false),
            ([0.0, 0.0, 0.0, 1.0], false),
            ([-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2], false),
        ],
        "4",
    )
});

// ---- tetragonal ----

/// -4: improper fourfold about z, the rotoinversion and its powers.
pub static S4: Lazy<Symmetry> = Lazy::new(|| {
    let rotoinversion = Rotation::single(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2, true);
    closure(&[&rotoinversion], "-4")
});
pub static C4H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C4.rotation(), CS.rotation()], "4/m"));
pub static D4: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C4.rotation(), C2X.rotation(), C2Y.rotation()], "422"));
pub static C4V: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C4.rotation(), CSX.rotation()], "4mm"));
pub static D2D: Lazy<Symmetry> =
    Lazy::new(|| closure(&[D2.rotation(), &MIRROR_XY], "-42m"));
pub static D4H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C4H.rotation(), CSX.rotation(), CSY.rotation()], "4/mmm"));

// ---- threefold rotations ----

pub static C3X: Lazy<Symmetry> = Lazy::new(|| {
    let c = 0.75_f64.sqrt();
    group(
        &[IDENTITY, ([0.5, c, 0.0, 0.0], false), ([-0.5, c, 0.0, 0.0], false)],
        "",
    )
});
pub static C3Y: Lazy<Symmetry> = Lazy::new(|| {
    let c = 0.75_f64.sqrt();
    group(
        &[IDENTITY, ([0.5, 0.0, c, 0.0], false), ([-0.5, 0.0, c, 0.0], false)],
        "",
    )
});

/// 3: threefold rotation about z.
pub static C3: Lazy<Symmetry> = Lazy::new(|| {
    let c = 0.75_f64.sqrt();
    group(
        &[IDENTITY, ([0.5, 0.0, 0.0, c], false), ([-0.5, 0.0, 0.0, c], false)],
        "3",
    )
});

// ---- trigonal ----

pub static S6: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C3.rotation(), CI.rotation()], "-3"));
pub static D3: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C3.rotation(), C2X.rotation()], "32"));
pub static C3V: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C3.rotation(), CSX.rotation()], "3m"));
pub static D3D: Lazy<Symmetry> =
    Lazy::new(|| closure(&[S6.rotation(), CSX.rotation()], "-3m"));

// ---- hexagonal ----

pub static C6: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C3.rotation(), C2.rotation()], "6"));
pub static C3H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C3.rotation(), CS.rotation()], "-6"));
pub static C6H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C6.rotation(), CS.rotation()], "6/m"));
pub static D6: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C6.rotation(), C2X.rotation(), C2Y.rotation()], "622"));
pub static C6V: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C6.rotation(), CSX.rotation()], "6mm"));
pub static D3H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C3H.rotation(), CSX.rotation(), C2Y.rotation()], "-6m2"));
pub static D6H: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C6H.rotation(), CSX.rotation(), CSY.rotation()], "6/mmm"));

// ---- cubic ----

pub static T: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C2.rotation(), &CUBIC], "23"));
pub static TH: Lazy<Symmetry> =
    Lazy::new(|| closure(&[T.rotation(), CI.rotation()], "m-3"));
pub static O: Lazy<Symmetry> =
    Lazy::new(|| closure(&[C4.rotation(), &CUBIC, C2X.rotation()], "432"));
pub static TD: Lazy<Symmetry> =
    Lazy::new(|| closure(&[T.rotation(), &MIRROR_XY], "-43m"));
pub static OH: Lazy<Symmetry> =
    Lazy::new(|| closure(&[O.rotation(), CI.rotation()], "m-3m"));

/// The named groups searched by subgroup queries and symbol lookup, in
/// crystal-system order.
pub static GROUPS: Lazy<Vec<&'static Symmetry>> = Lazy::new(|| {
    vec![
        &*C1, &*CI, // triclinic
        &*C2X, &*C2Y, &*C2Z, &*CSX, &*CSY, &*CSZ, &*C2H, // monoclinic
        &*D2, &*C2V, &*D2H, // orthorhombic
        &*C4, &*S4, &*C4H, &*D4, &*C4V, &*D2D, &*D4H, // tetragonal
        &*C3, &*S6, &*D3, &*C3V, &*D3D, // trigonal
        &*C6, &*C3H, &*C6H, &*D6, &*C6V, &*D3H, &*D6H, // hexagonal
        &*T, &*TH, &*O, &*TD, &*OH, // cubic
    ]
});

/// Conventional-setting duplicates resolvable by symbol but not listed in
/// [`GROUPS`].
pub static ALIASES: Lazy<Vec<&'static Symmetry>> = Lazy::new(|| vec![&*C2, &*CS]);

/// The proper rotation groups, one per Laue class.
pub static PROPER_GROUPS: Lazy<Vec<&'static Symmetry>> = Lazy::new(|| {
    vec![
        &*C1, &*C2, &*D2, &*C4, &*D4, &*C3, &*D3, &*C6, &*D6, &*T, &*O,
    ]
});
