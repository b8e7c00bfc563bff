//! Anneal waveform values
//!
//! Gantree: L2_Schedule → Waveform
//!
//! A [`Schedule`] is an immutable, validated list of `(time, s)` control
//! points. Annealing clients take it in the `[[t, s], ...]` form, which is
//! also its serde representation.

use qanneal_core::schedule::INITIAL_S;
use qanneal_core::{QannealError, QannealResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest schedule: start and end points only
pub const MIN_POINTS: usize = 2;

/// Longest schedule: start, descent end, hold end, return
pub const MAX_POINTS: usize = 4;

// ============================================================================
// WaveformPoint
// ============================================================================

/// One control point of an anneal waveform
/// Gantree: WaveformPoint // (time, s)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct WaveformPoint {
    /// Time in microseconds
    pub time: f64,

    /// Normalized anneal fraction
    pub s: f64,
}

impl WaveformPoint {
    /// Create a point
    pub const fn new(time: f64, s: f64) -> Self {
        Self { time, s }
    }

    /// As a `[time, s]` pair
    pub fn to_pair(self) -> [f64; 2] {
        [self.time, self.s]
    }
}

impl From<[f64; 2]> for WaveformPoint {
    fn from([time, s]: [f64; 2]) -> Self {
        Self { time, s }
    }
}

impl From<WaveformPoint> for [f64; 2] {
    fn from(p: WaveformPoint) -> Self {
        p.to_pair()
    }
}

impl From<(f64, f64)> for WaveformPoint {
    fn from((time, s): (f64, f64)) -> Self {
        Self { time, s }
    }
}

impl fmt::Display for WaveformPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.time, self.s)
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// Validated anneal schedule
/// Gantree: Schedule // 파형
///
/// Invariants: 2 to 4 points, first point `(0.0, 1.0)`, last point s-value
/// `1.0`, strictly increasing times, every s-value in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WaveformPoint>", into = "Vec<WaveformPoint>")]
pub struct Schedule {
    points: Vec<WaveformPoint>,
}

impl Schedule {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from points, checking every schedule invariant
    /// Gantree: from_points(points) -> Result<Self> // 검증 생성
    pub fn from_points(points: Vec<WaveformPoint>) -> QannealResult<Self> {
        let invalid = |reason: String| QannealError::invalid_parameter("schedule", reason);

        if !(MIN_POINTS..=MAX_POINTS).contains(&points.len()) {
            return Err(invalid(format!(
                "must have {} to {} points, got {}",
                MIN_POINTS,
                MAX_POINTS,
                points.len()
            )));
        }

        for p in &points {
            if !p.time.is_finite() || !p.s.is_finite() {
                return Err(invalid(format!("non-finite point {}", p)));
            }
            if !(0.0..=1.0).contains(&p.s) {
                return Err(invalid(format!("s-value of {} outside [0, 1]", p)));
            }
        }

        let first = points[0];
        if first != WaveformPoint::new(0.0, INITIAL_S) {
            return Err(invalid(format!("must start at (0, 1), got {}", first)));
        }

        let last = points[points.len() - 1];
        if last.s != INITIAL_S {
            return Err(invalid(format!("must end at s = 1, got {}", last)));
        }

        for pair in points.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(invalid(format!(
                    "times must strictly increase, got {} then {}",
                    pair[0], pair[1]
                )));
            }
        }

        Ok(Self { points })
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Get control points in time order
    pub fn points(&self) -> &[WaveformPoint] {
        &self.points
    }

    /// Number of control points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First control point, always `(0.0, 1.0)`
    pub fn first(&self) -> WaveformPoint {
        self.points[0]
    }

    /// Last control point
    pub fn last(&self) -> WaveformPoint {
        self.points[self.points.len() - 1]
    }

    /// Total anneal duration (microseconds)
    pub fn total_time(&self) -> f64 {
        self.last().time
    }

    /// Lowest s-value the waveform reaches
    pub fn min_s(&self) -> f64 {
        self.points.iter().map(|p| p.s).fold(INITIAL_S, f64::min)
    }

    /// Iterate over control points
    pub fn iter(&self) -> std::slice::Iter<'_, WaveformPoint> {
        self.points.iter()
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// s-value at time `t` by linear interpolation between control points
    /// Gantree: s_at(t) -> f64 // 보간
    ///
    /// Times before 0 or after the end clamp to the boundary s-value.
    pub fn s_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.first().s;
        }
        if t >= self.total_time() {
            return self.last().s;
        }

        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let frac = (t - a.time) / (b.time - a.time);
                return a.s + frac * (b.s - a.s);
            }
        }

        self.last().s
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// As `[[t, s], ...]` pairs
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| p.to_pair()).collect()
    }

    /// Serialize as `[[t, s], ...]` JSON
    pub fn to_json(&self) -> QannealResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate `[[t, s], ...]` JSON
    pub fn from_json(json: &str) -> QannealResult<Self> {
        let points: Vec<WaveformPoint> = serde_json::from_str(json)?;
        Self::from_points(points)
    }
}

impl TryFrom<Vec<WaveformPoint>> for Schedule {
    type Error = QannealError;

    fn try_from(points: Vec<WaveformPoint>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<Schedule> for Vec<WaveformPoint> {
    fn from(schedule: Schedule) -> Self {
        schedule.points
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a WaveformPoint;
    type IntoIter = std::slice::Iter<'a, WaveformPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schedule[")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

// ============================================================================
// Tests
// ============================================================================
