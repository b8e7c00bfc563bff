//! Binary quadratic models
//!
//! Gantree: L4_Model → BinaryQuadraticModel
//!
//! Ising (spin) and QUBO (binary) problems share one representation:
//! `E(x) = offset + sum_i h_i x_i + sum_{i<j} J_ij x_i x_j`.

use qanneal_core::{normalize_edge, Couplings, Edge, QannealError, QannealResult, Sample, VarId, Vartype};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Binary quadratic model
/// Gantree: BinaryQuadraticModel // BQM
///
/// Deserialization goes through [`add_variable`](Self::add_variable) and
/// [`add_interaction`](Self::add_interaction), so every quadratic endpoint
/// has a linear entry and self-loops are rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct BinaryQuadraticModel {
    /// Linear biases
    linear: BTreeMap<VarId, f64>,

    /// Quadratic biases, keyed with `u < v`
    #[serde(serialize_with = "serialize_quadratic")]
    quadratic: BTreeMap<Edge, f64>,

    /// Constant energy offset
    offset: f64,

    /// Variable domain
    vartype: Vartype,
}

impl BinaryQuadraticModel {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create empty model
    pub fn new(vartype: Vartype) -> Self {
        Self {
            vartype,
            ..Self::default()
        }
    }

    /// Create spin model from fields `h` and couplings `J`
    /// Gantree: from_ising(h,J,offset) -> Result<Self> // Ising
    pub fn from_ising(
        h: &BTreeMap<VarId, f64>,
        j: &Couplings,
        offset: f64,
    ) -> QannealResult<Self> {
        let mut bqm = Self::new(Vartype::Spin);
        for (&v, &bias) in h {
            bqm.add_variable(v, bias);
        }
        for (&(u, v), &bias) in j {
            bqm.add_interaction(u, v, bias)?;
        }
        bqm.offset = offset;
        Ok(bqm)
    }

    /// Create binary model from a QUBO; diagonal entries are linear biases
    /// Gantree: from_qubo(Q,offset) -> Self // QUBO
    pub fn from_qubo(q: &Couplings, offset: f64) -> QannealResult<Self> {
        let mut bqm = Self::new(Vartype::Binary);
        for (&(u, v), &bias) in q {
            if u == v {
                bqm.add_variable(u, bias);
            } else {
                bqm.add_interaction(u, v, bias)?;
            }
        }
        bqm.offset = offset;
        Ok(bqm)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add to a linear bias, creating the variable if needed
    pub fn add_variable(&mut self, v: VarId, bias: f64) {
        *self.linear.entry(v).or_insert(0.0) += bias;
    }

    /// Add to a quadratic bias, creating both variables if needed
    pub fn add_interaction(&mut self, u: VarId, v: VarId, bias: f64) -> QannealResult<()> {
        if u == v {
            return Err(QannealError::InvalidCoupling(u, v));
        }
        self.linear.entry(u).or_insert(0.0);
        self.linear.entry(v).or_insert(0.0);
        *self.quadratic.entry(normalize_edge(u, v)).or_insert(0.0) += bias;
        Ok(())
    }

    /// Add to the constant offset
    pub fn add_offset(&mut self, offset: f64) {
        self.offset += offset;
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Linear biases
    pub fn linear(&self) -> &BTreeMap<VarId, f64> {
        &self.linear
    }

    /// Quadratic biases (`u < v`)
    pub fn quadratic(&self) -> &BTreeMap<Edge, f64> {
        &self.quadratic
    }

    /// Linear bias of one variable
    pub fn get_linear(&self, v: VarId) -> Option<f64> {
        self.linear.get(&v).copied()
    }

    /// Quadratic bias between two variables, in either order
    pub fn get_quadratic(&self, u: VarId, v: VarId) -> Option<f64> {
        self.quadratic.get(&normalize_edge(u, v)).copied()
    }

    /// Constant offset
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Variable domain
    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    /// Variables, sorted
    pub fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.linear.keys().copied()
    }

    /// Number of variables
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    /// Number of interactions
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Interaction graph edges, usable as an embedding source
    pub fn edges(&self) -> Vec<Edge> {
        self.quadratic.keys().copied().collect()
    }

    // ========================================================================
    // Vartype Conversion
    // ========================================================================

    /// Equivalent model over the other domain
    pub fn change_vartype(&self, vartype: Vartype) -> Self {
        match (self.vartype, vartype) {
            (Vartype::Spin, Vartype::Binary) => self.spin_to_binary(),
            (Vartype::Binary, Vartype::Spin) => self.binary_to_spin(),
            _ => self.clone(),
        }
    }

    /// Equivalent binary model
    pub fn to_binary(&self) -> Self {
        self.change_vartype(Vartype::Binary)
    }

    /// Equivalent spin model
    pub fn to_spin(&self) -> Self {
        self.change_vartype(Vartype::Spin)
    }

    // s = 2x - 1
    fn spin_to_binary(&self) -> Self {
        let mut out = Self::new(Vartype::Binary);
        out.offset = self.offset;

        for (&v, &h) in &self.linear {
            out.add_variable(v, 2.0 * h);
            out.offset -= h;
        }
        for (&(u, v), &j) in &self.quadratic {
            out.quadratic.insert((u, v), 4.0 * j);
            out.add_variable(u, -2.0 * j);
            out.add_variable(v, -2.0 * j);
            out.offset += j;
        }

        out
    }

    // x = (s + 1) / 2
    fn binary_to_spin(&self) -> Self {
        let mut out = Self::new(Vartype::Spin);
        out.offset = self.offset;

        for (&v, &a) in &self.linear {
            out.add_variable(v, a / 2.0);
            out.offset += a / 2.0;
        }
        for (&(u, v), &b) in &self.quadratic {
            out.quadratic.insert((u, v), b / 4.0);
            out.add_variable(u, b / 4.0);
            out.add_variable(v, b / 4.0);
            out.offset += b / 4.0;
        }

        out
    }

    // ========================================================================
    // Energy
    // ========================================================================

    /// Energy of a sample in this model's own vartype
    /// Gantree: energy(sample) -> Result<f64> // 에너지
    pub fn energy(&self, sample: &Sample) -> QannealResult<f64> {
        let value = |v: VarId| -> QannealResult<f64> {
            let x = *sample.get(&v).ok_or(QannealError::MissingVariable(v))?;
            if !self.vartype.contains(x) {
                return Err(QannealError::InvalidSample(format!(
                    "variable {} = {} is not a {} value",
                    v, x, self.vartype
                )));
            }
            Ok(f64::from(x))
        };

        let mut energy = self.offset;
        for (&v, &h) in &self.linear {
            energy += h * value(v)?;
        }
        for (&(u, v), &j) in &self.quadratic {
            energy += j * value(u)? * value(v)?;
        }

        Ok(energy)
    }

    /// Energies of several samples
    pub fn energies(&self, samples: &[Sample]) -> QannealResult<Vec<f64>> {
        samples.iter().map(|s| self.energy(s)).collect()
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serialize to JSON
    pub fn to_json(&self) -> QannealResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> QannealResult<Self> {
        let raw: RawModel = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

/// Wire form of a model before its invariants are checked
#[derive(Deserialize)]
struct RawModel {
    linear: BTreeMap<VarId, f64>,
    quadratic: Vec<(VarId, VarId, f64)>,
    offset: f64,
    vartype: Vartype,
}

impl TryFrom<RawModel> for BinaryQuadraticModel {
    type Error = QannealError;

    fn try_from(raw: RawModel) -> QannealResult<Self> {
        let mut bqm = Self::new(raw.vartype);
        for (v, bias) in raw.linear {
            bqm.add_variable(v, bias);
        }
        for (u, v, bias) in raw.quadratic {
            bqm.add_interaction(u, v, bias)?;
        }
        bqm.offset = raw.offset;
        Ok(bqm)
    }
}

impl fmt::Display for BinaryQuadraticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BQM({}, {} variables, {} interactions, offset={})",
            self.vartype,
            self.num_variables(),
            self.num_interactions(),
            self.offset
        )
    }
}

/// Quadratic biases as `[[u, v, bias], ...]`; JSON object keys cannot be pairs
fn serialize_quadratic<S: Serializer>(
    map: &BTreeMap<Edge, f64>,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_seq(map.iter().map(|(&(u, v), &bias)| (u, v, bias)))
}

// ============================================================================
// Tests
// ============================================================================
