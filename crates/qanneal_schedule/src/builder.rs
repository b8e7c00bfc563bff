//! Reverse-anneal schedule builder
//!
//! Gantree: L2_Schedule → ReverseAnnealBuilder
//!
//! Builds the descent-hold-return waveform: start at s = 1, ramp down to
//! `s_target`, hold there for `hold_time`, then ramp back up to s = 1.

use crate::waveform::{Schedule, WaveformPoint};
use qanneal_core::schedule::{
    DEFAULT_HOLD_TIME_US, DEFAULT_RAMP_BACK_SLOPE, DEFAULT_RAMP_UP_TIME_US, DEFAULT_S_TARGET,
    INITIAL_S, MAX_RAMP_BACK_SLOPE, TIME_DECIMALS,
};
use qanneal_core::{QannealError, QannealResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round `x` to `decimals` decimal places
///
/// Rounds the exact binary value of `x`, so `0.30005` (stored just below the
/// tie) becomes `0.3`.
pub fn round_to(x: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, x).parse().unwrap_or(x)
}

/// Reverse-anneal parameters
/// Gantree: ReverseAnnealParams // 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseAnnealParams {
    /// s-value to descend to, in [0, 1]
    /// Gantree: s_target: f64 // 목표 s (0.0)
    pub s_target: f64,

    /// Time spent at `s_target` (microseconds)
    /// Gantree: hold_time: f64 // 유지 시간 (10.0)
    pub hold_time: f64,

    /// Descent rate (1/microsecond), at most 0.2
    /// Gantree: ramp_back_slope: f64 // 하강 기울기 (0.2)
    pub ramp_back_slope: f64,

    /// Return-ramp duration, used when `ramp_up_slope` is unset
    pub ramp_up_time: f64,

    /// Return rate (1/microsecond); overrides `ramp_up_time`
    pub ramp_up_slope: Option<f64>,
}

impl ReverseAnnealParams {
    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set target s-value
    pub fn with_s_target(mut self, s_target: f64) -> Self {
        self.s_target = s_target;
        self
    }

    /// Set hold time
    pub fn with_hold_time(mut self, hold_time: f64) -> Self {
        self.hold_time = hold_time;
        self
    }

    /// Set descent slope
    pub fn with_ramp_back_slope(mut self, slope: f64) -> Self {
        self.ramp_back_slope = slope;
        self
    }

    /// Set return-ramp duration
    pub fn with_ramp_up_time(mut self, ramp_up_time: f64) -> Self {
        self.ramp_up_time = ramp_up_time;
        self
    }

    /// Set return slope (takes precedence over `ramp_up_time`)
    pub fn with_ramp_up_slope(mut self, slope: f64) -> Self {
        self.ramp_up_slope = Some(slope);
        self
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Descent duration: `(1 - s_target) / ramp_back_slope`
    pub fn ramp_time(&self) -> f64 {
        (INITIAL_S - self.s_target) / self.ramp_back_slope
    }

    /// Return duration actually used
    pub fn return_time(&self) -> f64 {
        match self.ramp_up_slope {
            Some(slope) => (INITIAL_S - self.s_target) / slope,
            None => self.ramp_up_time,
        }
    }

    /// Rounded times of every point after the start, in order
    fn point_times(&self) -> Vec<f64> {
        let ramp_time = self.ramp_time();
        let mut times = Vec::with_capacity(3);

        if self.s_target < INITIAL_S {
            times.push(round_to(ramp_time, TIME_DECIMALS));
            if self.hold_time != 0.0 {
                times.push(round_to(ramp_time + self.hold_time, TIME_DECIMALS));
            }
        }
        times.push(round_to(
            ramp_time + self.hold_time + self.return_time(),
            TIME_DECIMALS,
        ));

        times
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate parameters
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> QannealResult<()> {
        let finite = |name: &str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(QannealError::invalid_parameter(
                    name,
                    format!("must be finite, got {}", value),
                ))
            }
        };

        finite("s_target", self.s_target)?;
        finite("hold_time", self.hold_time)?;
        finite("ramp_back_slope", self.ramp_back_slope)?;

        if !(0.0..=1.0).contains(&self.s_target) {
            return Err(QannealError::invalid_parameter(
                "s_target",
                format!("must be between 0 and 1, got {}", self.s_target),
            ));
        }

        if self.hold_time < 0.0 {
            return Err(QannealError::invalid_parameter(
                "hold_time",
                format!("must be >= 0, got {}", self.hold_time),
            ));
        }

        if self.ramp_back_slope > MAX_RAMP_BACK_SLOPE {
            return Err(QannealError::invalid_parameter(
                "ramp_back_slope",
                format!(
                    "must be <= {}, got {}",
                    MAX_RAMP_BACK_SLOPE, self.ramp_back_slope
                ),
            ));
        }

        if self.ramp_back_slope <= 0.0 {
            return Err(QannealError::invalid_parameter(
                "ramp_back_slope",
                format!("must be > 0, got {}", self.ramp_back_slope),
            ));
        }

        match self.ramp_up_slope {
            Some(slope) => {
                finite("ramp_up_slope", slope)?;
                if slope <= 0.0 {
                    return Err(QannealError::invalid_parameter(
                        "ramp_up_slope",
                        format!("must be > 0, got {}", slope),
                    ));
                }
            }
            None => {
                finite("ramp_up_time", self.ramp_up_time)?;
                if self.ramp_up_time < 0.0 {
                    return Err(QannealError::invalid_parameter(
                        "ramp_up_time",
                        format!("must be >= 0, got {}", self.ramp_up_time),
                    ));
                }
            }
        }

        // Segments shorter than the output resolution collapse after rounding
        let mut previous = 0.0;
        for t in self.point_times() {
            if t <= previous {
                return Err(QannealError::invalid_parameter(
                    "schedule",
                    format!(
                        "point times must strictly increase after rounding, got {} then {}",
                        previous, t
                    ),
                ));
            }
            previous = t;
        }

        Ok(())
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Build the waveform
    /// Gantree: build(&self) -> Result<Schedule> // 파형 생성
    pub fn build(&self) -> QannealResult<Schedule> {
        self.validate()?;

        let s = round_to(self.s_target, TIME_DECIMALS);
        let times = self.point_times();
        let (end_time, intermediate) = times
            .split_last()
            .ok_or_else(|| QannealError::InternalError("schedule has no end point".into()))?;

        let mut points = Vec::with_capacity(times.len() + 1);
        points.push(WaveformPoint::new(0.0, INITIAL_S));
        points.extend(intermediate.iter().map(|&t| WaveformPoint::new(t, s)));
        points.push(WaveformPoint::new(*end_time, round_to(INITIAL_S, TIME_DECIMALS)));

        let schedule = Schedule::from_points(points)?;
        log::debug!("Built reverse-anneal schedule {} from {}", schedule, self);

        Ok(schedule)
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> QannealResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QannealResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for ReverseAnnealParams {
    fn default() -> Self {
        Self {
            s_target: DEFAULT_S_TARGET,
            hold_time: DEFAULT_HOLD_TIME_US,
            ramp_back_slope: DEFAULT_RAMP_BACK_SLOPE,
            ramp_up_time: DEFAULT_RAMP_UP_TIME_US,
            ramp_up_slope: None,
        }
    }
}

impl fmt::Display for ReverseAnnealParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReverseAnnealParams(s_target={}, hold={}us, back_slope={}",
            self.s_target, self.hold_time, self.ramp_back_slope
        )?;
        match self.ramp_up_slope {
            Some(slope) => write!(f, ", up_slope={})", slope),
            None => write!(f, ", up_time={}us)", self.ramp_up_time),
        }
    }
}

/// Build a reverse-anneal waveform from positional parameters
/// Gantree: make_reverse_anneal_schedule(...) -> Result<Schedule> // 역어닐링
///
/// Waveform starts and ends at s = 1.0, descending linearly to `s_target`,
/// holding for `hold_time` microseconds, then returning. `ramp_up_slope`,
/// when given, replaces `ramp_up_time` with `(1 - s_target) / ramp_up_slope`.
pub fn make_reverse_anneal_schedule(
    s_target: f64,
    hold_time: f64,
    ramp_back_slope: f64,
    ramp_up_time: f64,
    ramp_up_slope: Option<f64>,
) -> QannealResult<Schedule> {
    ReverseAnnealParams {
        s_target,
        hold_time,
        ramp_back_slope,
        ramp_up_time,
        ramp_up_slope,
    }
    .build()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn is_invalid(result: QannealResult<Schedule>, param: &str) -> bool {
        matches!(result, Err(QannealError::InvalidParameter { ref name, .. }) if name == param)
    }

    #[test]
    fn test_reference_waveform() {
        let schedule = make_reverse_anneal_schedule(0.5, 10.0, 0.2, 0.0201, None).unwrap();
        let pairs = schedule.to_pairs();

        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], [0.0, 1.0]);
        assert_relative_eq!(pairs[1][0], 2.5);
        assert_relative_eq!(pairs[1][1], 0.5);
        assert_relative_eq!(pairs[2][0], 12.5);
        assert_relative_eq!(pairs[2][1], 0.5);
        assert_relative_eq!(pairs[3][0], 12.5201);
        assert_eq!(pairs[3][1], 1.0);
    }

    #[test]
    fn test_defaults() {
        let schedule = ReverseAnnealParams::default().build().unwrap();
        let pairs = schedule.to_pairs();

        // Descend 1.0 at 0.2/us = 5us, hold 10us, return 0.0201us
        assert_eq!(pairs.len(), 4);
        assert_relative_eq!(pairs[1][0], 5.0);
        assert_eq!(pairs[1][1], 0.0);
        assert_relative_eq!(pairs[2][0], 15.0);
        assert_relative_eq!(pairs[3][0], 15.0201);
    }

    #[test]
    fn test_point_counts() {
        // s_target == 1: no descent, no hold point
        let flat = make_reverse_anneal_schedule(1.0, 10.0, 0.2, 0.0201, None).unwrap();
        assert_eq!(flat.len(), 2);
        assert_relative_eq!(flat.total_time(), 10.0201);

        // No hold: descent point only
        let no_hold = make_reverse_anneal_schedule(0.3, 0.0, 0.2, 0.0201, None).unwrap();
        assert_eq!(no_hold.len(), 3);

        let with_hold = make_reverse_anneal_schedule(0.3, 2.0, 0.2, 0.0201, None).unwrap();
        assert_eq!(with_hold.len(), 4);
    }

    #[test]
    fn test_endpoints_for_many_inputs() {
        for &s_target in &[0.0, 0.1, 0.37, 0.5, 0.999, 1.0] {
            for &hold_time in &[0.0, 0.5, 10.0, 123.4] {
                for &slope in &[0.01, 0.1, 0.2] {
                    let schedule =
                        make_reverse_anneal_schedule(s_target, hold_time, slope, 0.0201, None)
                            .unwrap();
                    assert_eq!(schedule.first(), WaveformPoint::new(0.0, 1.0));
                    assert_eq!(schedule.last().s, 1.0);
                    for pair in schedule.points().windows(2) {
                        assert!(pair[1].time > pair[0].time);
                    }
                }
            }
        }
    }

    #[test]
    fn test_ramp_up_slope_overrides_time() {
        let by_time = make_reverse_anneal_schedule(0.5, 10.0, 0.2, 0.0201, None).unwrap();
        let by_slope = make_reverse_anneal_schedule(0.5, 10.0, 0.2, 0.0201, Some(0.1)).unwrap();

        // Return takes (1 - 0.5) / 0.1 = 5us
        assert_relative_eq!(by_slope.total_time(), 17.5);
        assert!((by_slope.total_time() - by_time.total_time()).abs() > 1e-9);
        assert_eq!(by_slope.points()[..3], by_time.points()[..3]);
    }

    #[test]
    fn test_rounding() {
        // (1 - 0.3) / 0.15 = 4.6666...
        let schedule = make_reverse_anneal_schedule(0.3, 1.0, 0.15, 0.0201, None).unwrap();
        assert_relative_eq!(schedule.points()[1].time, 4.6667);
        assert_relative_eq!(schedule.points()[2].time, 5.6667);
        assert_relative_eq!(schedule.points()[3].time, 5.6868);

        let schedule = make_reverse_anneal_schedule(0.123456, 0.0, 0.2, 0.0201, None).unwrap();
        assert_relative_eq!(schedule.points()[1].s, 0.1235);
    }

    #[test]
    fn test_invalid_s_target() {
        assert!(is_invalid(
            make_reverse_anneal_schedule(1.1, 10.0, 0.2, 0.0201, None),
            "s_target"
        ));
        assert!(is_invalid(
            make_reverse_anneal_schedule(-0.1, 10.0, 0.2, 0.0201, None),
            "s_target"
        ));
        assert!(is_invalid(
            make_reverse_anneal_schedule(f64::NAN, 10.0, 0.2, 0.0201, None),
            "s_target"
        ));
    }

    #[test]
    fn test_invalid_hold_time() {
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, -1.0, 0.2, 0.0201, None),
            "hold_time"
        ));
    }

    #[test]
    fn test_invalid_ramp_back_slope() {
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, 10.0, 0.3, 0.0201, None),
            "ramp_back_slope"
        ));
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, 10.0, 0.0, 0.0201, None),
            "ramp_back_slope"
        ));
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, 10.0, -0.1, 0.0201, None),
            "ramp_back_slope"
        ));
    }

    #[test]
    fn test_invalid_return_ramp() {
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, 10.0, 0.2, -0.01, None),
            "ramp_up_time"
        ));
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, 10.0, 0.2, 0.0201, Some(0.0)),
            "ramp_up_slope"
        ));
        // A bad ramp_up_time is ignored when a slope is given
        assert!(make_reverse_anneal_schedule(0.5, 10.0, 0.2, -0.01, Some(0.2)).is_ok());
    }

    #[test]
    fn test_degenerate_schedule_rejected() {
        // s_target == 1 with no hold and a slope-derived return has zero length
        assert!(is_invalid(
            make_reverse_anneal_schedule(1.0, 0.0, 0.2, 0.0201, Some(0.2)),
            "schedule"
        ));
        // Zero-length return ramp repeats the hold end time
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, 10.0, 0.2, 0.0, None),
            "schedule"
        ));
        // Positive hold below the time resolution rounds onto the descent end
        assert!(is_invalid(
            make_reverse_anneal_schedule(0.5, 1e-5, 0.2, 0.0201, None),
            "schedule"
        ));
        // Smallest representable hold still yields four points
        let short_hold = make_reverse_anneal_schedule(0.5, 1e-4, 0.2, 0.0201, None).unwrap();
        assert_eq!(short_hold.len(), 4);
    }

    #[test]
    fn test_builder_and_json() {
        let params = ReverseAnnealParams::default()
            .with_s_target(0.45)
            .with_hold_time(20.0)
            .with_ramp_back_slope(0.1)
            .with_ramp_up_slope(0.2);

        assert_eq!(params.ramp_up_slope, Some(0.2));
        assert_relative_eq!(params.ramp_time(), 5.5, epsilon = 1e-12);
        assert_relative_eq!(params.return_time(), 2.75, epsilon = 1e-12);

        let json = params.to_json().unwrap();
        let back = ReverseAnnealParams::from_json(&json).unwrap();
        assert_eq!(back, params);

        let partial = ReverseAnnealParams::from_json(r#"{"s_target": 0.5}"#).unwrap();
        assert_eq!(partial.s_target, 0.5);
        assert_eq!(partial.hold_time, DEFAULT_HOLD_TIME_US);
        assert_eq!(partial.ramp_up_slope, None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.49999, 4), 2.5);
        assert_eq!(round_to(12.5201, 4), 12.5201);
        assert_eq!(round_to(0.00004, 4), 0.0);
    }

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        // Each literal sits just below its decimal tie
        assert_eq!(round_to(0.30005, 4), 0.3);
        assert_eq!(round_to(4.56785, 4), 4.5678);
        assert_eq!(round_to(10.00015, 4), 10.0001);
        assert!(round_to(f64::NAN, 4).is_nan());
    }

    #[test]
    fn test_waveform_near_rounding_ties() {
        let schedule = make_reverse_anneal_schedule(0.30005, 10.0, 0.2, 0.0201, None).unwrap();

        assert_eq!(
            schedule.to_pairs(),
            vec![[0.0, 1.0], [3.4998, 0.3], [13.4998, 0.3], [13.5198, 1.0]]
        );
    }
}
