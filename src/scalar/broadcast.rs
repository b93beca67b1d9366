// Shape resolution for broadcast arithmetic.
//
// Follows the standard trailing-alignment rules: shapes are compared from the
// last axis backwards, axes agree when equal or when either is 1, and the
// result takes the larger extent. Anything else is a ShapeMismatch. Keeping
// this fallible (instead of leaning on the panicking operator arithmetic of
// the array backend) lets every public operation surface shape problems as
// `Result`s.

use ndarray::{ArrayD, ArrayViewD, IxDyn, Zip};

use crate::error::Error;
use crate::Result;

/// Resolve the broadcast shape of two operand shapes.
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let mut shape = vec![0usize; ndim];
    for i in 0..ndim {
        // Align from the trailing axis; missing leading axes count as 1.
        let l = if i < ndim - lhs.len() { 1 } else { lhs[i - (ndim - lhs.len())] };
        let r = if i < ndim - rhs.len() { 1 } else { rhs[i - (ndim - rhs.len())] };
        shape[i] = if l == r || r == 1 {
            l
        } else if l == 1 {
            r
        } else {
            return Err(Error::ShapeMismatch {
                lhs: lhs.to_vec(),
                rhs: rhs.to_vec(),
            });
        };
    }
    Ok(shape)
}

/// Views of both operands stretched to their common broadcast shape.
pub fn broadcast_pair<'a>(
    lhs: &'a ArrayD<f64>,
    rhs: &'a ArrayD<f64>,
) -> Result<(ArrayViewD<'a, f64>, ArrayViewD<'a, f64>)> {
    let shape = broadcast_shape(lhs.shape(), rhs.shape())?;
    let mismatch = || Error::ShapeMismatch {
        lhs: lhs.shape().to_vec(),
        rhs: rhs.shape().to_vec(),
    };
    let lv = lhs.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
    let rv = rhs.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
    Ok((lv, rv))
}

/// Stretch one array to an explicit target shape, returning an owned copy.
pub fn broadcast_to<A: Clone>(array: &ArrayD<A>, shape: &[usize]) -> Result<ArrayD<A>> {
    array
        .broadcast(IxDyn(shape))
        .map(|view| view.to_owned())
        .ok_or_else(|| Error::ShapeMismatch {
            lhs: array.shape().to_vec(),
            rhs: shape.to_vec(),
        })
}

/// Elementwise combination of two arrays over their broadcast shape.
pub fn zip_map<F>(lhs: &ArrayD<f64>, rhs: &ArrayD<f64>, f: F) -> Result<ArrayD<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    let (lv, rv) = broadcast_pair(lhs, rhs)?;
    log::trace!(
        "broadcasting {:?} with {:?} -> {:?}",
        lhs.shape(),
        rhs.shape(),
        lv.shape()
    );
    Ok(Zip::from(&lv).and(&rv).map_collect(|&l, &r| f(l, r)))
}

/// Elementwise comparison of two arrays over their broadcast shape.
pub fn zip_compare<F>(lhs: &ArrayD<f64>, rhs: &ArrayD<f64>, f: F) -> Result<ArrayD<bool>>
where
    F: Fn(f64, f64) -> bool,
{
    let (lv, rv) = broadcast_pair(lhs, rhs)?;
    Ok(Zip::from(&lv).and(&rv).map_collect(|&l, &r| f(l, r)))
}

/// Elementwise combination of two boolean arrays over their broadcast shape.
pub fn zip_bool<F>(lhs: &ArrayD<bool>, rhs: &ArrayD<bool>, f: F) -> Result<ArrayD<bool>>
where
    F: Fn(bool, bool) -> bool,
{
    let shape = broadcast_shape(lhs.shape(), rhs.shape())?;
    let lv = broadcast_to(lhs, &shape)?;
    let rv = broadcast_to(rhs, &shape)?;
    Ok(Zip::from(&lv).and(&rv).map_collect(|&l, &r| f(l, r)))
}
