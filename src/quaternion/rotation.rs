use std::ops::Mul;

use itertools::{iproduct, Itertools};
use nalgebra::Vector3;
use ndarray::{ArrayD, Axis, IxDyn, Zip};
use serde::{Deserialize, Serialize};

use crate::config::{AXIS_TOLERANCE, NORM_TOLERANCE};
use crate::error::Error;
use crate::quaternion::quaternion::Quaternion;
use crate::scalar::broadcast::{broadcast_shape, broadcast_to, zip_bool};
use crate::scalar::scalar::{round_key, Scalar};
use crate::vector::vector3d::Vector3d;
use crate::Result;

/// A collection of orientations: unit quaternions paired with a boolean
/// `improper` flag of the same leading shape.
///
/// A proper element acts on vectors as the quaternion sandwich product
/// v′ = q·v·q⁻¹; an improper element applies the same map followed by
/// inversion through the origin, which covers mirrors and rotoinversions.
/// Construction normalizes the quaternion data, so near-unit input is
/// accepted as-is up to scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rotation {
    data: ArrayD<f64>,
    improper: ArrayD<bool>,
}

impl Rotation {
    /// Wrap quaternion data (trailing axis 4) and per-element improper
    /// flags of the matching leading shape.
    pub fn new(data: ArrayD<f64>, improper: ArrayD<bool>) -> Result<Self> {
        if data.ndim() == 0 || data.shape()[data.ndim() - 1] != 4 {
            return Err(Error::TrailingAxis {
                expected: 4,
                shape: data.shape().to_vec(),
            });
        }
        let leading = &data.shape()[..data.ndim() - 1];
        if improper.shape() != leading {
            return Err(Error::ShapeMismatch {
                lhs: leading.to_vec(),
                rhs: improper.shape().to_vec(),
            });
        }
        Ok(Self { data, improper }.normalized())
    }

    /// All-proper rotations from plain quaternions.
    pub fn from_quaternion(quaternion: &Quaternion) -> Self {
        let improper = ArrayD::from_elem(IxDyn(quaternion.shape()), false);
        Self {
            data: quaternion.data().clone(),
            improper,
        }
        .normalized()
    }

    /// A single element (empty leading shape).
    pub fn single(w: f64, x: f64, y: f64, z: f64, improper: bool) -> Self {
        Self {
            data: ArrayD::from_shape_vec(IxDyn(&[4]), vec![w, x, y, z])
                .expect("four components always fill shape [4]"),
            improper: ArrayD::from_elem(IxDyn(&[]), improper),
        }
        .normalized()
    }

    /// A 1-d collection from explicit ((w, x, y, z), improper) rows.
    pub fn from_rows(rows: &[([f64; 4], bool)]) -> Self {
        let flat: Vec<f64> = rows.iter().flat_map(|(q, _)| q.iter().copied()).collect();
        let flags: Vec<bool> = rows.iter().map(|&(_, f)| f).collect();
        Self {
            data: ArrayD::from_shape_vec(IxDyn(&[rows.len(), 4]), flat)
                .expect("rows of four components always fill [n, 4]"),
            improper: ArrayD::from_shape_vec(IxDyn(&[rows.len()]), flags)
                .expect("one flag per row always fills [n]"),
        }
        .normalized()
    }

    /// The single identity element.
    pub fn identity() -> Self {
        Self::single(1.0, 0.0, 0.0, 0.0, false)
    }

    /// Axis-angle construction. Axes and angles broadcast to a common
    /// leading shape; axes are normalized first.
    pub fn from_axes_angles(axes: &Vector3d, angles: &Scalar) -> Result<Self> {
        let shape = broadcast_shape(axes.shape(), angles.shape())?;
        let unit_axes = axes.unit();
        let half = angles.data().mapv(|a| 0.5 * a);
        let cos = broadcast_to(&half.mapv(f64::cos), &shape)?;
        let sin = broadcast_to(&half.mapv(f64::sin), &shape)?;
        let ax = broadcast_to(&unit_axes.x().into_data(), &shape)?;
        let ay = broadcast_to(&unit_axes.y().into_data(), &shape)?;
        let az = broadcast_to(&unit_axes.z().into_data(), &shape)?;
        let x = &sin * &ax;
        let y = &sin * &ay;
        let z = &sin * &az;
        let data = ndarray::stack(
            Axis(cos.ndim()),
            &[cos.view(), x.view(), y.view(), z.view()],
        )
        .expect("component grids share the broadcast shape");
        let improper = ArrayD::from_elem(IxDyn(&shape), false);
        Ok(Self { data, improper }.normalized())
    }

    fn normalized(mut self) -> Self {
        let last = Axis(self.data.ndim() - 1);
        for mut lane in self.data.lanes_mut(last) {
            let norm = lane.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > NORM_TOLERANCE {
                lane /= norm;
            } else {
                lane.fill(0.0);
            }
        }
        self
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn improper(&self) -> &ArrayD<bool> {
        &self.improper
    }

    /// The quaternion parts, improper flags discarded.
    pub fn quaternion(&self) -> Quaternion {
        Quaternion::from_array_unchecked(self.data.clone())
    }

    /// Leading (collection) shape.
    pub fn shape(&self) -> &[usize] {
        &self.data.shape()[..self.data.ndim() - 1]
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim() - 1
    }

    /// Number of elements in the collection.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn last_axis(&self) -> Axis {
        Axis(self.data.ndim() - 1)
    }

    fn component(&self, index: usize) -> ArrayD<f64> {
        self.data.index_axis(self.last_axis(), index).to_owned()
    }

    /// One element by full leading index.
    pub fn get(&self, index: &[usize]) -> Result<Rotation> {
        let leading = self.shape();
        let in_bounds = index.len() == leading.len()
            && index.iter().zip(leading).all(|(&i, &n)| i < n);
        if !in_bounds {
            return Err(Error::IndexOutOfBounds {
                index: index.to_vec(),
                shape: leading.to_vec(),
            });
        }
        let mut view = self.data.view();
        for &i in index {
            view = view.index_axis_move(Axis(0), i);
        }
        Ok(Self {
            data: view.to_owned(),
            improper: ArrayD::from_elem(IxDyn(&[]), self.improper[IxDyn(index)]),
        })
    }

    /// Flattened ((w, x, y, z), improper) element list in row-major order.
    pub(crate) fn rows(&self) -> Vec<([f64; 4], bool)> {
        self.data
            .lanes(self.last_axis())
            .into_iter()
            .zip(self.improper.iter())
            .map(|(lane, &flag)| ([lane[0], lane[1], lane[2], lane[3]], flag))
            .collect()
    }

    // ---- group algebra --------------------------------------------------

    /// Composition: Hamilton product of the quaternions, XOR of the
    /// improper flags, broadcasting both.
    pub fn compose(&self, other: &Rotation) -> Result<Rotation> {
        let product = self.quaternion().compose(&other.quaternion())?;
        let improper = zip_bool(&self.improper, &other.improper, |l, r| l ^ r)?;
        Ok(Self {
            data: product.data().clone(),
            improper,
        }
        .normalized())
    }

    /// Composition of every element of `self` with every element of
    /// `other`, flattened to `self.len() * other.len()` elements with the
    /// `self` index varying slowest.
    pub fn outer(&self, other: &Rotation) -> Rotation {
        let rows: Vec<([f64; 4], bool)> = iproduct!(self.rows(), other.rows())
            .map(|((a, fa), (b, fb))| (hamilton(a, b), fa ^ fb))
            .collect();
        Self::from_rows(&rows)
    }

    /// Inverse of each element. The improper flag survives inversion.
    pub fn inverse(&self) -> Rotation {
        Self {
            data: self.quaternion().conj().data().clone(),
            improper: self.improper.clone(),
        }
    }

    /// Rotate (and for improper elements, invert) every vector.
    ///
    /// Leading shapes broadcast, so a single rotation applies across a
    /// whole vector grid and vice versa.
    pub fn apply(&self, vectors: &Vector3d) -> Result<Vector3d> {
        let shape = broadcast_shape(self.shape(), vectors.shape())?;
        let w = broadcast_to(&self.component(0), &shape)?;
        let x = broadcast_to(&self.component(1), &shape)?;
        let y = broadcast_to(&self.component(2), &shape)?;
        let z = broadcast_to(&self.component(3), &shape)?;
        let vx = broadcast_to(&vectors.x().into_data(), &shape)?;
        let vy = broadcast_to(&vectors.y().into_data(), &shape)?;
        let vz = broadcast_to(&vectors.z().into_data(), &shape)?;

        // t = 2 u × v, v' = v + w t + u × t with u the quaternion vector part
        let tx = (&y * &vz - &z * &vy).mapv(|v| 2.0 * v);
        let ty = (&z * &vx - &x * &vz).mapv(|v| 2.0 * v);
        let tz = (&x * &vy - &y * &vx).mapv(|v| 2.0 * v);
        let ux = &y * &tz - &z * &ty;
        let uy = &z * &tx - &x * &tz;
        let uz = &x * &ty - &y * &tx;
        let rx = &vx + &(&w * &tx) + &ux;
        let ry = &vy + &(&w * &ty) + &uy;
        let rz = &vz + &(&w * &tz) + &uz;

        let flags = broadcast_to(&self.improper, &shape)?;
        let rx = Zip::from(&rx)
            .and(&flags)
            .map_collect(|&v, &f| if f { -v } else { v });
        let ry = Zip::from(&ry)
            .and(&flags)
            .map_collect(|&v, &f| if f { -v } else { v });
        let rz = Zip::from(&rz)
            .and(&flags)
            .map_collect(|&v, &f| if f { -v } else { v });

        let stacked = ndarray::stack(
            Axis(rx.ndim()),
            &[rx.view(), ry.view(), rz.view()],
        )
        .expect("component grids share the broadcast shape");
        Ok(Vector3d::from_array_unchecked(stacked))
    }

    // ---- canonical identity ---------------------------------------------

    /// Per-element canonical fingerprint, one per flattened element.
    ///
    /// The quaternion sign is normalized so that q and −q, which act
    /// identically, fingerprint identically; components are rounded at a
    /// fixed precision and the improper flag is carried alongside.
    pub fn differentiators(&self) -> Vec<([i64; 4], bool)> {
        self.rows()
            .into_iter()
            .map(|(q, flag)| (differentiator(q), flag))
            .collect()
    }

    /// Distinct elements by differentiator, first occurrence kept, as a
    /// flat collection.
    pub fn unique(&self) -> Rotation {
        let rows: Vec<([f64; 4], bool)> = self
            .rows()
            .into_iter()
            .unique_by(|&(q, flag)| (differentiator(q), flag))
            .collect();
        Self::from_rows(&rows)
    }

    /// Elements at the given flat indices, in the given order.
    pub(crate) fn select(&self, indices: &[usize]) -> Rotation {
        let rows = self.rows();
        let picked: Vec<([f64; 4], bool)> = indices.iter().map(|&i| rows[i]).collect();
        Self::from_rows(&picked)
    }

    // ---- axis-angle view -------------------------------------------------

    /// Rotation angle of each element in radians, in [0, π].
    pub fn angle(&self) -> Scalar {
        let w = self.component(0);
        Scalar::from_array(w.mapv(|w| 2.0 * w.abs().clamp(0.0, 1.0).acos()))
    }

    /// Rotation axis of each element as a unit vector.
    ///
    /// The axis is flipped wherever the scalar part is negative so that it
    /// pairs with the non-negative angle convention, and the identity
    /// (no axis) reports +z.
    pub fn axis(&self) -> Vector3d {
        let rows = self.rows();
        let mut out: Vec<[f64; 3]> = Vec::with_capacity(rows.len());
        for ([w, x, y, z], _) in rows {
            let mut v = Vector3::new(x, y, z);
            if w < 0.0 {
                v = -v;
            }
            let norm = v.norm();
            let unit = if norm < AXIS_TOLERANCE {
                Vector3::z()
            } else {
                v / norm
            };
            out.push([unit.x, unit.y, unit.z]);
        }
        let mut full = self.shape().to_vec();
        full.push(3);
        let flat: Vec<f64> = out.iter().flatten().copied().collect();
        Vector3d::from_array_unchecked(
            ArrayD::from_shape_vec(IxDyn(&full), flat)
                .expect("one axis per element fills the leading shape"),
        )
    }

    // ---- shape operations -----------------------------------------------

    /// New leading shape of identical element count.
    pub fn reshape(&self, shape: &[usize]) -> Result<Rotation> {
        let count: usize = shape.iter().product();
        if count != self.len() {
            return Err(Error::ReshapeSize {
                size: self.len(),
                shape: shape.to_vec(),
            });
        }
        let mut full = shape.to_vec();
        full.push(4);
        let data: Vec<f64> = self.data.iter().copied().collect();
        let flags: Vec<bool> = self.improper.iter().copied().collect();
        Ok(Self {
            data: ArrayD::from_shape_vec(IxDyn(&full), data)
                .expect("element count verified above"),
            improper: ArrayD::from_shape_vec(IxDyn(shape), flags)
                .expect("element count verified above"),
        })
    }

    /// Collapse the leading shape to one axis.
    pub fn flatten(&self) -> Rotation {
        self.reshape(&[self.len()])
            .expect("flattening preserves the element count")
    }
}

/// Hamilton product of two single quaternions in (w, x, y, z) order.
pub(crate) fn hamilton(a: [f64; 4], b: [f64; 4]) -> [f64; 4] {
    let [aw, ax, ay, az] = a;
    let [bw, bx, by, bz] = b;
    [
        aw * bw - ax * bx - ay * by - az * bz,
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
    ]
}

/// Sign-normalized, fixed-precision fingerprint of a single quaternion.
pub(crate) fn differentiator(q: [f64; 4]) -> [i64; 4] {
    let mut key = [
        round_key(q[0]),
        round_key(q[1]),
        round_key(q[2]),
        round_key(q[3]),
    ];
    if let Some(&first) = key.iter().find(|&&k| k != 0) {
        if first < 0 {
            for k in &mut key {
                *k = -*k;
            }
        }
    }
    key
}

fn forced<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}

impl Mul<&Rotation> for &Rotation {
    type Output = Rotation;
    fn mul(self, rhs: &Rotation) -> Rotation {
        forced(self.compose(rhs))
    }
}

impl Mul<Rotation> for Rotation {
    type Output = Rotation;
    fn mul(self, rhs: Rotation) -> Rotation {
        forced(self.compose(&rhs))
    }
}

impl Mul<&Vector3d> for &Rotation {
    type Output = Vector3d;
    fn mul(self, rhs: &Vector3d) -> Vector3d {
        forced(self.apply(rhs))
    }
}

impl Mul<Vector3d> for Rotation {
    type Output = Vector3d;
    fn mul(self, rhs: Vector3d) -> Vector3d {
        forced(self.apply(&rhs))
    }
}
