use std::collections::HashSet;
use std::ops::{Add, Mul, Neg, Sub};

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::config::DIFFERENTIATOR_SCALE;
use crate::error::Error;
use crate::scalar::broadcast::{zip_compare, zip_map};
use crate::Result;

/// An n-dimensional array of f64 with value semantics and broadcast
/// arithmetic. 0-d (a bare number) is a valid shape.
///
/// Every operation returns a fresh `Scalar`; the stored data is never
/// mutated. The checked methods (`checked_add`, ...) report shape problems
/// as errors; the operator impls delegate to them and panic on mismatch,
/// the same contract the array backend's own operators have.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scalar {
    data: ArrayD<f64>,
}

impl Scalar {
    /// Wrap an existing array.
    pub fn from_array(data: ArrayD<f64>) -> Self {
        Self { data }
    }

    /// A 0-d scalar.
    pub fn from_value(value: f64) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(&[]), value),
        }
    }

    /// A 1-d scalar from a flat list of values.
    pub fn from_vec(values: Vec<f64>) -> Self {
        let n = values.len();
        Self {
            data: ArrayD::from_shape_vec(IxDyn(&[n]), values)
                .expect("a flat vec always fits its own length"),
        }
    }

    /// A 1-d scalar copied from a slice.
    pub fn from_slice(values: &[f64]) -> Self {
        Self::from_vec(values.to_vec())
    }

    /// The underlying array.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Consume self, yielding the underlying array.
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Shape of the stored data; empty for 0-d.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total element count (1 for 0-d).
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Read one element by full index. An empty index reads a 0-d scalar.
    pub fn get(&self, index: &[usize]) -> Result<f64> {
        self.data
            .get(IxDyn(index))
            .copied()
            .ok_or_else(|| Error::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape().to_vec(),
            })
    }

    // ---- arithmetic (checked) -------------------------------------------

    pub fn checked_add(&self, rhs: &Scalar) -> Result<Scalar> {
        Ok(Self::from_array(zip_map(&self.data, &rhs.data, |l, r| l + r)?))
    }

    pub fn checked_sub(&self, rhs: &Scalar) -> Result<Scalar> {
        Ok(Self::from_array(zip_map(&self.data, &rhs.data, |l, r| l - r)?))
    }

    pub fn checked_mul(&self, rhs: &Scalar) -> Result<Scalar> {
        Ok(Self::from_array(zip_map(&self.data, &rhs.data, |l, r| l * r)?))
    }

    /// Elementwise power. Fractional and negative exponents follow IEEE
    /// `powf`, so domain violations surface as NaN rather than being
    /// truncated away.
    pub fn checked_pow(&self, exp: &Scalar) -> Result<Scalar> {
        Ok(Self::from_array(zip_map(&self.data, &exp.data, f64::powf)?))
    }

    /// Elementwise power by a plain exponent.
    pub fn powf(&self, exp: f64) -> Scalar {
        Self::from_array(self.data.mapv(|v| v.powf(exp)))
    }

    // ---- comparisons ----------------------------------------------------
    //
    // Comparisons yield a plain boolean array, not a Scalar.

    pub fn lt(&self, rhs: &Scalar) -> Result<ArrayD<bool>> {
        zip_compare(&self.data, &rhs.data, |l, r| l < r)
    }

    pub fn le(&self, rhs: &Scalar) -> Result<ArrayD<bool>> {
        zip_compare(&self.data, &rhs.data, |l, r| l <= r)
    }

    pub fn gt(&self, rhs: &Scalar) -> Result<ArrayD<bool>> {
        zip_compare(&self.data, &rhs.data, |l, r| l > r)
    }

    pub fn ge(&self, rhs: &Scalar) -> Result<ArrayD<bool>> {
        zip_compare(&self.data, &rhs.data, |l, r| l >= r)
    }

    pub fn eq_elem(&self, rhs: &Scalar) -> Result<ArrayD<bool>> {
        zip_compare(&self.data, &rhs.data, |l, r| l == r)
    }

    // ---- shape operations -----------------------------------------------

    /// Reinterpret the data in a new shape of identical element count.
    pub fn reshape(&self, shape: &[usize]) -> Result<Scalar> {
        let count: usize = shape.iter().product();
        if count != self.size() {
            return Err(Error::ReshapeSize {
                size: self.size(),
                shape: shape.to_vec(),
            });
        }
        let values: Vec<f64> = self.data.iter().copied().collect();
        Ok(Self::from_array(
            ArrayD::from_shape_vec(IxDyn(shape), values)
                .expect("element count verified above"),
        ))
    }

    /// Collapse all axes into one, row-major order.
    pub fn flatten(&self) -> Scalar {
        let values: Vec<f64> = self.data.iter().copied().collect();
        Self::from_vec(values)
    }

    /// Distinct values within the differentiator rounding tolerance, in
    /// first-occurrence order.
    pub fn unique(&self) -> Scalar {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for &v in self.data.iter() {
            if seen.insert(round_key(v)) {
                values.push(v);
            }
        }
        Self::from_vec(values)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::from_value(value)
    }
}

impl From<ArrayD<f64>> for Scalar {
    fn from(data: ArrayD<f64>) -> Self {
        Self::from_array(data)
    }
}

/// Fixed-precision integer key for tolerant value identity. Maps -0.0 and
/// 0.0 to the same key.
pub(crate) fn round_key(value: f64) -> i64 {
    (value * DIFFERENTIATOR_SCALE).round() as i64
}

fn forced<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}

macro_rules! scalar_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait<&Scalar> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                forced(self.$checked(rhs))
            }
        }

        impl $trait<Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                forced(self.$checked(&rhs))
            }
        }

        impl $trait<&Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                forced(self.$checked(rhs))
            }
        }

        impl $trait<Scalar> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                forced(self.$checked(&rhs))
            }
        }

        impl $trait<f64> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: f64) -> Scalar {
                forced(self.$checked(&Scalar::from_value(rhs)))
            }
        }

        impl $trait<f64> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: f64) -> Scalar {
                forced(self.$checked(&Scalar::from_value(rhs)))
            }
        }

        impl $trait<&Scalar> for f64 {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                forced(Scalar::from_value(self).$checked(rhs))
            }
        }

        impl $trait<Scalar> for f64 {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                forced(Scalar::from_value(self).$checked(&rhs))
            }
        }
    };
}

scalar_binop!(Add, add, checked_add);
scalar_binop!(Sub, sub, checked_sub);
scalar_binop!(Mul, mul, checked_mul);

impl Neg for &Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::from_array(self.data.mapv(|v| -v))
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::from_array(self.data.mapv(|v| -v))
    }
}
