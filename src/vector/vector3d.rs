use std::collections::HashSet;
use std::ops::{Add, Mul, Neg, Sub};

use ndarray::{Array2, ArrayD, Axis, IxDyn, Zip};
use serde::{Deserialize, Serialize};

use crate::config::NORM_TOLERANCE;
use crate::error::Error;
use crate::quaternion::rotation::Rotation;
use crate::scalar::broadcast::{broadcast_pair, zip_map};
use crate::scalar::scalar::{round_key, Scalar};
use crate::Result;

/// A collection of three-dimensional vectors of any leading shape.
///
/// The stored array always carries the vector components on the trailing
/// axis, so `shape()` reports the leading (collection) shape only. A single
/// vector has an empty leading shape.
///
/// Addition, subtraction and scaling broadcast over leading shapes. There
/// is deliberately no `*` between two vector collections; use [`Vector3d::dot`]
/// or [`Vector3d::cross`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vector3d {
    data: ArrayD<f64>,
}

/// Component count on the trailing axis.
const DIM: usize = 3;

impl Vector3d {
    /// Wrap an array whose trailing axis holds the x, y, z components.
    pub fn new(data: ArrayD<f64>) -> Result<Self> {
        if data.ndim() == 0 || data.shape()[data.ndim() - 1] != DIM {
            return Err(Error::TrailingAxis {
                expected: DIM,
                shape: data.shape().to_vec(),
            });
        }
        Ok(Self { data })
    }

    /// Internal constructor for data whose trailing axis is 3 by
    /// construction.
    pub(crate) fn from_array_unchecked(data: ArrayD<f64>) -> Self {
        debug_assert_eq!(data.shape()[data.ndim() - 1], DIM);
        Self { data }
    }

    /// A single vector (empty leading shape).
    pub fn single(x: f64, y: f64, z: f64) -> Self {
        Self {
            data: ArrayD::from_shape_vec(IxDyn(&[DIM]), vec![x, y, z])
                .expect("three components always fill shape [3]"),
        }
    }

    /// A 1-d collection from explicit rows.
    pub fn from_rows(rows: &[[f64; DIM]]) -> Self {
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self {
            data: ArrayD::from_shape_vec(IxDyn(&[rows.len(), DIM]), flat)
                .expect("rows of three components always fill [n, 3]"),
        }
    }

    /// Zero vectors in the given leading shape.
    pub fn zero(shape: &[usize]) -> Self {
        let mut full = shape.to_vec();
        full.push(DIM);
        Self {
            data: ArrayD::zeros(IxDyn(&full)),
        }
    }

    /// The unit vector along +x.
    pub fn xvector() -> Self {
        Self::single(1.0, 0.0, 0.0)
    }

    /// The unit vector along +y.
    pub fn yvector() -> Self {
        Self::single(0.0, 1.0, 0.0)
    }

    /// The unit vector along +z.
    pub fn zvector() -> Self {
        Self::single(0.0, 0.0, 1.0)
    }

    /// The underlying array, trailing axis included.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Leading (collection) shape.
    pub fn shape(&self) -> &[usize] {
        &self.data.shape()[..self.data.ndim() - 1]
    }

    /// Number of leading axes.
    pub fn ndim(&self) -> usize {
        self.data.ndim() - 1
    }

    /// Number of vectors in the collection.
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

    /// The x components as a Scalar of the leading shape.
    pub fn x(&self) -> Scalar {
        Scalar::from_array(self.component(0))
    }

    /// The y components as a Scalar of the leading shape.
    pub fn y(&self) -> Scalar {
        Scalar::from_array(self.component(1))
    }

    /// The z components as a Scalar of the leading shape.
    pub fn z(&self) -> Scalar {
        Scalar::from_array(self.component(2))
    }

    /// One vector by full leading index.
    pub fn get(&self, index: &[usize]) -> Result<Vector3d> {
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
        Ok(Self::from_array_unchecked(view.to_owned()))
    }

    // ---- algebra --------------------------------------------------------

    pub fn checked_add(&self, other: &Vector3d) -> Result<Vector3d> {
        Ok(Self::from_array_unchecked(zip_map(
            &self.data,
            &other.data,
            |l, r| l + r,
        )?))
    }

    pub fn checked_sub(&self, other: &Vector3d) -> Result<Vector3d> {
        Ok(Self::from_array_unchecked(zip_map(
            &self.data,
            &other.data,
            |l, r| l - r,
        )?))
    }

    /// Scale every vector by a broadcastable Scalar factor.
    pub fn checked_scale(&self, factor: &Scalar) -> Result<Vector3d> {
        let expanded = factor
            .data()
            .clone()
            .insert_axis(Axis(factor.ndim()));
        Ok(Self::from_array_unchecked(zip_map(
            &self.data,
            &expanded,
            |l, r| l * r,
        )?))
    }

    /// Elementwise dot product over broadcast leading shapes.
    pub fn dot(&self, other: &Vector3d) -> Result<Scalar> {
        let products = zip_map(&self.data, &other.data, |l, r| l * r)?;
        let last = Axis(products.ndim() - 1);
        Ok(Scalar::from_array(products.sum_axis(last)))
    }

    /// Dot product of every vector in `self` with every vector in `other`.
    ///
    /// The result has shape `self.shape() + other.shape()`.
    pub fn dot_outer(&self, other: &Vector3d) -> Scalar {
        let m = self.len();
        let n = other.len();
        let lhs = Array2::from_shape_vec((m, DIM), self.data.iter().copied().collect())
            .expect("vector data flattens to len rows of three components");
        let rhs = Array2::from_shape_vec((n, DIM), other.data.iter().copied().collect())
            .expect("vector data flattens to len rows of three components");
        let table = lhs.dot(&rhs.t());
        let mut shape = self.shape().to_vec();
        shape.extend_from_slice(other.shape());
        Scalar::from_array(
            table
                .into_shape(IxDyn(&shape))
                .expect("pairwise table has one entry per vector pair"),
        )
    }

    /// Elementwise cross product over broadcast leading shapes.
    pub fn cross(&self, other: &Vector3d) -> Result<Vector3d> {
        let (a, b) = broadcast_pair(&self.data, &other.data)?;
        let last = Axis(a.ndim() - 1);
        let (ax, ay, az) = (
            a.index_axis(last, 0),
            a.index_axis(last, 1),
            a.index_axis(last, 2),
        );
        let (bx, by, bz) = (
            b.index_axis(last, 0),
            b.index_axis(last, 1),
            b.index_axis(last, 2),
        );
        let cx = Zip::from(&ay)
            .and(&az)
            .and(&by)
            .and(&bz)
            .map_collect(|&ay, &az, &by, &bz| ay * bz - az * by);
        let cy = Zip::from(&az)
            .and(&ax)
            .and(&bz)
            .and(&bx)
            .map_collect(|&az, &ax, &bz, &bx| az * bx - ax * bz);
        let cz = Zip::from(&ax)
            .and(&ay)
            .and(&bx)
            .and(&by)
            .map_collect(|&ax, &ay, &bx, &by| ax * by - ay * bx);
        let stacked = ndarray::stack(
            Axis(cx.ndim()),
            &[cx.view(), cy.view(), cz.view()],
        )
        .expect("component grids share the broadcast shape");
        Ok(Self::from_array_unchecked(stacked))
    }

    /// Euclidean norm of each vector.
    pub fn norm(&self) -> Scalar {
        let squares = self.data.mapv(|v| v * v).sum_axis(self.last_axis());
        Scalar::from_array(squares.mapv(f64::sqrt))
    }

    /// Each vector scaled to unit length. Vectors with norm beneath the
    /// normalization tolerance come out as zero rather than NaN.
    pub fn unit(&self) -> Vector3d {
        let norms = self.norm();
        let mut data = self.data.clone();
        let last = self.last_axis();
        for (mut lane, &n) in data.lanes_mut(last).into_iter().zip(norms.data().iter()) {
            if n > NORM_TOLERANCE {
                lane /= n;
            } else {
                lane.fill(0.0);
            }
        }
        Self::from_array_unchecked(data)
    }

    /// Angle between corresponding vectors, in radians within [0, π].
    ///
    /// The cosine is clamped before `acos`, so values that drift just past
    /// ±1 do not produce NaN.
    pub fn angle_with(&self, other: &Vector3d) -> Result<Scalar> {
        let dots = self.dot(other)?;
        let denom = zip_map(self.norm().data(), other.norm().data(), |a, b| a * b)?;
        let angles = zip_map(dots.data(), &denom, |d, n| {
            (d / n).clamp(-1.0, 1.0).acos()
        })?;
        Ok(Scalar::from_array(angles))
    }

    /// Vectors from spherical coordinates: `theta` is the polar angle from
    /// +z, `phi` the azimuth from +x, `r` the radius.
    pub fn from_polar(theta: &Scalar, phi: &Scalar, r: f64) -> Result<Vector3d> {
        let x = zip_map(theta.data(), phi.data(), |t, p| p.cos() * t.sin())?;
        let y = zip_map(theta.data(), phi.data(), |t, p| p.sin() * t.sin())?;
        let z = zip_map(theta.data(), phi.data(), |t, _| t.cos())?;
        let stacked = ndarray::stack(Axis(x.ndim()), &[x.view(), y.view(), z.view()])
            .expect("component grids share the broadcast shape");
        Ok(Self::from_array_unchecked(stacked.mapv(|v| v * r)))
    }

    // ---- rotation -------------------------------------------------------

    /// Rotate every vector by (every element of) a rotation.
    pub fn rotate(&self, rotation: &Rotation) -> Result<Vector3d> {
        rotation.apply(self)
    }

    /// Rotate about the +z axis by a plain angle in radians.
    pub fn rotate_about_z(&self, angle: f64) -> Vector3d {
        let rotation =
            Rotation::from_axes_angles(&Vector3d::zvector(), &Scalar::from_value(angle))
                .expect("a single axis and angle always broadcast");
        rotation
            .apply(self)
            .expect("a single rotation broadcasts over any vector shape")
    }

    // ---- shape operations -----------------------------------------------

    /// New leading shape of identical vector count.
    pub fn reshape(&self, shape: &[usize]) -> Result<Vector3d> {
        let count: usize = shape.iter().product();
        if count != self.len() {
            return Err(Error::ReshapeSize {
                size: self.len(),
                shape: shape.to_vec(),
            });
        }
        let mut full = shape.to_vec();
        full.push(DIM);
        let values: Vec<f64> = self.data.iter().copied().collect();
        Ok(Self::from_array_unchecked(
            ArrayD::from_shape_vec(IxDyn(&full), values)
                .expect("vector count verified above"),
        ))
    }

    /// Collapse the leading shape to one axis.
    pub fn flatten(&self) -> Vector3d {
        self.reshape(&[self.len()])
            .expect("flattening preserves the vector count")
    }

    /// Distinct vectors within the differentiator rounding tolerance, in
    /// first-occurrence order.
    pub fn unique(&self) -> Vector3d {
        let mut seen = HashSet::new();
        let mut rows: Vec<[f64; DIM]> = Vec::new();
        for lane in self.data.lanes(self.last_axis()) {
            let row = [lane[0], lane[1], lane[2]];
            let key = (round_key(row[0]), round_key(row[1]), round_key(row[2]));
            if seen.insert(key) {
                rows.push(row);
            }
        }
        Self::from_rows(&rows)
    }
}

fn forced<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}

macro_rules! vector_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait<&Vector3d> for &Vector3d {
            type Output = Vector3d;
            fn $method(self, rhs: &Vector3d) -> Vector3d {
                forced(self.$checked(rhs))
            }
        }

        impl $trait<Vector3d> for Vector3d {
            type Output = Vector3d;
            fn $method(self, rhs: Vector3d) -> Vector3d {
                forced(self.$checked(&rhs))
            }
        }

        impl $trait<&Vector3d> for Vector3d {
            type Output = Vector3d;
            fn $method(self, rhs: &Vector3d) -> Vector3d {
                forced(self.$checked(rhs))
            }
        }

        impl $trait<Vector3d> for &Vector3d {
            type Output = Vector3d;
            fn $method(self, rhs: Vector3d) -> Vector3d {
                forced(self.$checked(&rhs))
            }
        }
    };
}

vector_binop!(Add, add, checked_add);
vector_binop!(Sub, sub, checked_sub);

impl Add<f64> for &Vector3d {
    type Output = Vector3d;
    fn add(self, rhs: f64) -> Vector3d {
        Vector3d::from_array_unchecked(self.data.mapv(|v| v + rhs))
    }
}

impl Add<f64> for Vector3d {
    type Output = Vector3d;
    fn add(self, rhs: f64) -> Vector3d {
        &self + rhs
    }
}

impl Add<&Vector3d> for f64 {
    type Output = Vector3d;
    fn add(self, rhs: &Vector3d) -> Vector3d {
        rhs + self
    }
}

impl Sub<f64> for &Vector3d {
    type Output = Vector3d;
    fn sub(self, rhs: f64) -> Vector3d {
        Vector3d::from_array_unchecked(self.data.mapv(|v| v - rhs))
    }
}

impl Sub<f64> for Vector3d {
    type Output = Vector3d;
    fn sub(self, rhs: f64) -> Vector3d {
        &self - rhs
    }
}

impl Sub<&Vector3d> for f64 {
    type Output = Vector3d;
    fn sub(self, rhs: &Vector3d) -> Vector3d {
        Vector3d::from_array_unchecked(rhs.data.mapv(|v| self - v))
    }
}

impl Mul<f64> for &Vector3d {
    type Output = Vector3d;
    fn mul(self, rhs: f64) -> Vector3d {
        Vector3d::from_array_unchecked(self.data.mapv(|v| v * rhs))
    }
}

impl Mul<f64> for Vector3d {
    type Output = Vector3d;
    fn mul(self, rhs: f64) -> Vector3d {
        &self * rhs
    }
}

impl Mul<&Vector3d> for f64 {
    type Output = Vector3d;
    fn mul(self, rhs: &Vector3d) -> Vector3d {
        rhs * self
    }
}

impl Mul<&Scalar> for &Vector3d {
    type Output = Vector3d;
    fn mul(self, rhs: &Scalar) -> Vector3d {
        forced(self.checked_scale(rhs))
    }
}

impl Mul<&Vector3d> for &Scalar {
    type Output = Vector3d;
    fn mul(self, rhs: &Vector3d) -> Vector3d {
        forced(rhs.checked_scale(self))
    }
}

impl Neg for &Vector3d {
    type Output = Vector3d;
    fn neg(self) -> Vector3d {
        Vector3d::from_array_unchecked(self.data.mapv(|v| -v))
    }
}

impl Neg for Vector3d {
    type Output = Vector3d;
    fn neg(self) -> Vector3d {
        Vector3d::from_array_unchecked(self.data.mapv(|v| -v))
    }
}
