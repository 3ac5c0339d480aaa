use rand::Rng;

use crate::error::{Error, Result};

/// Dense row-major matrix. Weight matrices are `(source, destination)`, so
/// `data[i][j]` connects source neuron `i` to destination neuron `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Every entry drawn independently from U[-1, 1].
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(-1.0..=1.0);
            }
        }

        res
    }

    /// Wraps nested rows, rejecting ragged or empty input.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidData(format!(
                "matrix must be non-empty, got {rows}x{cols}"
            )));
        }
        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(Error::InvalidData(format!(
                "row {i} has {} entries, expected {cols}",
                row.len()
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Row vector times matrix: `out[j] = Σ_i v[i] * self[i][j]`.
    pub fn vec_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "Matrices are of incorrect sizes");

        let mut res = vec![0.0; self.cols];
        for (row, &x) in self.data.iter().zip(v) {
            for (acc, &w) in res.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        res
    }

    /// Matrix times column vector: `out[i] = Σ_j self[i][j] * v[j]`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.cols, "Matrices are of incorrect sizes");

        self.data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|x| x.is_finite())
    }
}
