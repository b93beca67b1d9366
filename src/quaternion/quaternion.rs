use std::ops::{Mul, Neg};

use ndarray::{ArrayD, Axis, IxDyn};
use serde::{Deserialize, Serialize};

use crate::config::NORM_TOLERANCE;
use crate::error::Error;
use crate::scalar::broadcast::broadcast_pair;
use crate::scalar::scalar::Scalar;
use crate::Result;

/// A collection of quaternions of any leading shape.
///
/// Components sit on the trailing axis in scalar-first order (w, x, y, z).
/// Multiplication is the Hamilton product: associative, not commutative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quaternion {
    data: ArrayD<f64>,
}

/// Component count on the trailing axis.
const DIM: usize = 4;

impl Quaternion {
    /// Wrap an array whose trailing axis holds (w, x, y, z).
    pub fn new(data: ArrayD<f64>) -> Result<Self> {
        if data.ndim() == 0 || data.shape()[data.ndim() - 1] != DIM {
            return Err(Error::TrailingAxis {
                expected: DIM,
                shape: data.shape().to_vec(),
            });
        }
        Ok(Self { data })
    }

    pub(crate) fn from_array_unchecked(data: ArrayD<f64>) -> Self {
        debug_assert_eq!(data.shape()[data.ndim() - 1], DIM);
        Self { data }
    }

    /// A single quaternion (empty leading shape).
    pub fn single(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            data: ArrayD::from_shape_vec(IxDyn(&[DIM]), vec![w, x, y, z])
                .expect("four components always fill shape [4]"),
        }
    }

    /// A 1-d collection from explicit (w, x, y, z) rows.
    pub fn from_rows(rows: &[[f64; DIM]]) -> Self {
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self {
            data: ArrayD::from_shape_vec(IxDyn(&[rows.len(), DIM]), flat)
                .expect("rows of four components always fill [n, 4]"),
        }
    }

    /// The single identity quaternion (1, 0, 0, 0).
    pub fn identity() -> Self {
        Self::single(1.0, 0.0, 0.0, 0.0)
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Leading (collection) shape.
    pub fn shape(&self) -> &[usize] {
        &self.data.shape()[..self.data.ndim() - 1]
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim() - 1
    }

    /// Number of quaternions in the collection.
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

    /// Scalar parts of the leading shape.
    pub fn w(&self) -> Scalar {
        Scalar::from_array(self.component(0))
    }

    pub fn x(&self) -> Scalar {
        Scalar::from_array(self.component(1))
    }

    pub fn y(&self) -> Scalar {
        Scalar::from_array(self.component(2))
    }

    pub fn z(&self) -> Scalar {
        Scalar::from_array(self.component(3))
    }

    /// One quaternion by full leading index.
    pub fn get(&self, index: &[usize]) -> Result<Quaternion> {
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

    /// Conjugate: vector part negated.
    pub fn conj(&self) -> Quaternion {
        let mut data = self.data.clone();
        let last = self.last_axis();
        for mut lane in data.lanes_mut(last) {
            lane[1] = -lane[1];
            lane[2] = -lane[2];
            lane[3] = -lane[3];
        }
        Self::from_array_unchecked(data)
    }

    /// Euclidean norm of each quaternion.
    pub fn norm(&self) -> Scalar {
        let squares = self.data.mapv(|v| v * v).sum_axis(self.last_axis());
        Scalar::from_array(squares.mapv(f64::sqrt))
    }

    /// Each quaternion scaled to unit norm. Near-zero quaternions come out
    /// as zero rather than NaN.
    pub fn unit(&self) -> Quaternion {
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

    /// Multiplicative inverse: conj(q) / |q|².
    pub fn inverse(&self) -> Quaternion {
        let norms = self.norm();
        let mut data = self.conj().data;
        let last = Axis(data.ndim() - 1);
        for (mut lane, &n) in data.lanes_mut(last).into_iter().zip(norms.data().iter()) {
            if n > NORM_TOLERANCE {
                lane /= n * n;
            } else {
                lane.fill(0.0);
            }
        }
        Self::from_array_unchecked(data)
    }

    /// Componentwise dot product over broadcast leading shapes.
    pub fn dot(&self, other: &Quaternion) -> Result<Scalar> {
        let (a, b) = broadcast_pair(&self.data, &other.data)?;
        let products = &a * &b;
        let last = Axis(products.ndim() - 1);
        Ok(Scalar::from_array(products.sum_axis(last)))
    }

    /// Hamilton product over broadcast leading shapes.
    pub fn compose(&self, other: &Quaternion) -> Result<Quaternion> {
        let (a, b) = broadcast_pair(&self.data, &other.data)?;
        let last = Axis(a.ndim() - 1);
        let aw = a.index_axis(last, 0).to_owned();
        let ax = a.index_axis(last, 1).to_owned();
        let ay = a.index_axis(last, 2).to_owned();
        let az = a.index_axis(last, 3).to_owned();
        let bw = b.index_axis(last, 0).to_owned();
        let bx = b.index_axis(last, 1).to_owned();
        let by = b.index_axis(last, 2).to_owned();
        let bz = b.index_axis(last, 3).to_owned();

        let w = &aw * &bw - &ax * &bx - &ay * &by - &az * &bz;
        let x = &aw * &bx + &ax * &bw + &ay * &bz - &az * &by;
        let y = &aw * &by - &ax * &bz + &ay * &bw + &az * &bx;
        let z = &aw * &bz + &ax * &by - &ay * &bx + &az * &bw;

        let stacked = ndarray::stack(
            Axis(w.ndim()),
            &[w.view(), x.view(), y.view(), z.view()],
        )
        .expect("component grids share the broadcast shape");
        Ok(Self::from_array_unchecked(stacked))
    }
}

fn forced<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}

impl Mul<&Quaternion> for &Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: &Quaternion) -> Quaternion {
        forced(self.compose(rhs))
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: Quaternion) -> Quaternion {
        forced(self.compose(&rhs))
    }
}

impl Neg for &Quaternion {
    type Output = Quaternion;
    fn neg(self) -> Quaternion {
        Quaternion::from_array_unchecked(self.data.mapv(|v| -v))
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;
    fn neg(self) -> Quaternion {
        Quaternion::from_array_unchecked(self.data.mapv(|v| -v))
    }
}
