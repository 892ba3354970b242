use crate::{error::*, Continous};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

/// Solves the dense system `a · x = b` by LU decomposition with partial pivoting.
pub fn solve_linear_system(a: &Array2<Continous>, b: &Array1<Continous>) -> Result<Array1<Continous>> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(MdpError::Numerical(format!(
            "coefficient matrix must be square, got {rows}x{cols}"
        )));
    }
    if b.len() != rows {
        return Err(MdpError::DimensionMismatch {
            expected: rows,
            actual: b.len(),
        });
    }

    let m = DMatrix::from_fn(rows, cols, |r, c| a[[r, c]]);
    let rhs = DVector::from_iterator(rows, b.iter().copied());

    let x = m
        .lu()
        .solve(&rhs)
        .ok_or_else(|| MdpError::Numerical("coefficient matrix is singular".to_string()))?;

    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(MdpError::Numerical(format!(
            "solution is not finite at row {i}; the system is ill-conditioned"
        )));
    }

    Ok(Array1::from_iter(x.iter().copied()))
}
