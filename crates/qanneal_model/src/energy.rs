//! Energy evaluation against the binary form of a model
//!
//! Gantree: L4_Model → Energy
//!
//! `E(x) = x^T M x + offset`, where `M` is the upper-triangular matrix of the
//! binary model with linear biases on the diagonal. For 0/1 vectors the
//! diagonal term `M_ii x_i^2` equals the linear term.

use crate::bqm::BinaryQuadraticModel;
use qanneal_core::{QannealError, QannealResult, Sample, VarId, Vartype};
use std::collections::HashMap;

/// Dense upper-triangular QUBO matrix
/// Gantree: QuboMatrix // 행렬
#[derive(Debug, Clone, PartialEq)]
pub struct QuboMatrix {
    variables: Vec<VarId>,
    data: Vec<f64>,
    offset: f64,
}

impl QuboMatrix {
    /// Build from a model, converting to binary first
    pub fn from_model(bqm: &BinaryQuadraticModel) -> Self {
        let binary = bqm.to_binary();
        let variables: Vec<VarId> = binary.variables().collect();
        let index: HashMap<VarId, usize> =
            variables.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let n = variables.len();
        let mut data = vec![0.0; n * n];

        for (&v, &bias) in binary.linear() {
            let i = index[&v];
            data[i * n + i] = bias;
        }
        for (&(u, v), &bias) in binary.quadratic() {
            // Keys are u < v and variables are sorted, so index[u] < index[v]
            data[index[&u] * n + index[&v]] = bias;
        }

        Self {
            variables,
            data,
            offset: binary.offset(),
        }
    }

    /// Row/column labels
    pub fn variables(&self) -> &[VarId] {
        &self.variables
    }

    /// Matrix dimension
    pub fn dim(&self) -> usize {
        self.variables.len()
    }

    /// Constant offset of the binary model
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Entry at (row, col)
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.dim() + col]
    }

    /// `x^T M x`
    pub fn quadratic_form(&self, x: &[f64]) -> f64 {
        let n = self.dim();
        let mut total = 0.0;
        for (i, &xi) in x.iter().enumerate().take(n) {
            if xi == 0.0 {
                continue;
            }
            let row = &self.data[i * n..(i + 1) * n];
            let dot: f64 = row.iter().zip(x).map(|(m, xj)| m * xj).sum();
            total += xi * dot;
        }
        total
    }
}

/// Energy of a 0/1 sample against the binary form of `bqm`
/// Gantree: get_energy(bqm,sample) -> Result<f64> // 에너지
///
/// The sample is binary regardless of the model's vartype; spin samples go
/// through [`spin_to_binary_sample`] first.
pub fn get_energy(bqm: &BinaryQuadraticModel, sample: &Sample) -> QannealResult<f64> {
    let matrix = QuboMatrix::from_model(bqm);

    let x = matrix
        .variables()
        .iter()
        .map(|&v| {
            let value = *sample.get(&v).ok_or(QannealError::MissingVariable(v))?;
            if !Vartype::Binary.contains(value) {
                return Err(QannealError::InvalidSample(format!(
                    "variable {} = {} is not a binary value",
                    v, value
                )));
            }
            Ok(f64::from(value))
        })
        .collect::<QannealResult<Vec<f64>>>()?;

    Ok(matrix.quadratic_form(&x) + matrix.offset())
}

/// Map a spin sample to binary: `x = (s + 1) / 2`
pub fn spin_to_binary_sample(sample: &Sample) -> QannealResult<Sample> {
    sample
        .iter()
        .map(|(&v, &s)| match s {
            -1 => Ok((v, 0)),
            1 => Ok((v, 1)),
            _ => Err(QannealError::InvalidSample(format!(
                "variable {} = {} is not a spin value",
                v, s
            ))),
        })
        .collect()
}

/// Map a binary sample to spin: `s = 2x - 1`
pub fn binary_to_spin_sample(sample: &Sample) -> QannealResult<Sample> {
    sample
        .iter()
        .map(|(&v, &x)| match x {
            0 => Ok((v, -1)),
            1 => Ok((v, 1)),
            _ => Err(QannealError::InvalidSample(format!(
                "variable {} = {} is not a binary value",
                v, x
            ))),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
