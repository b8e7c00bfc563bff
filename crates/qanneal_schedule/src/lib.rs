//! # QAnneal Schedule
//!
//! Piecewise-linear anneal waveforms for reverse annealing.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qanneal_schedule // L2: Schedule
//!     Waveform // WaveformPoint, Schedule (검증된 파형)
//!     ReverseAnnealBuilder // ReverseAnnealParams → Schedule
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qanneal_schedule::prelude::*;
//!
//! let schedule = make_reverse_anneal_schedule(0.5, 10.0, 0.2, 0.0201, None).unwrap();
//!
//! assert_eq!(schedule.len(), 4);
//! println!("{}", schedule.to_json().unwrap());
//! ```
//!
//! ## Parameter Objects
//!
//! ```rust
//! use qanneal_schedule::prelude::*;
//!
//! let schedule = ReverseAnnealParams::default()
//!     .with_s_target(0.4)
//!     .with_hold_time(20.0)
//!     .with_ramp_up_slope(0.2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.last().s, 1.0);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Waveform values (Gantree: L2_Schedule → Waveform)
pub mod waveform;

/// Reverse-anneal builder (Gantree: L2_Schedule → ReverseAnnealBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{make_reverse_anneal_schedule, round_to, ReverseAnnealParams};
pub use waveform::{Schedule, WaveformPoint};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qanneal_schedule::prelude::*;
    //! ```

    pub use crate::builder::{make_reverse_anneal_schedule, ReverseAnnealParams};
    pub use crate::waveform::{Schedule, WaveformPoint};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_params_json_to_schedule_json() {
        // Parameters from a config file, schedule out to the hardware client
        let params = ReverseAnnealParams::from_json(
            r#"{"s_target": 0.5, "hold_time": 10.0, "ramp_back_slope": 0.2}"#,
        )
        .unwrap();

        let schedule = params.build().unwrap();
        assert_eq!(
            schedule.to_json().unwrap(),
            "[[0.0,1.0],[2.5,0.5],[12.5,0.5],[12.5201,1.0]]"
        );
    }

    #[test]
    fn test_schedule_follows_ramps() {
        let schedule = make_reverse_anneal_schedule(0.2, 4.0, 0.1, 0.0201, Some(0.4)).unwrap();

        // Descent: 8us, hold: 4us, return: 2us
        assert_relative_eq!(schedule.s_at(4.0), 0.6, epsilon = 1e-9);
        assert_relative_eq!(schedule.s_at(10.0), 0.2, epsilon = 1e-9);
        assert_relative_eq!(schedule.s_at(13.0), 0.6, epsilon = 1e-9);
        assert_relative_eq!(schedule.total_time(), 14.0);
        assert_relative_eq!(schedule.min_s(), 0.2);
    }

    #[test]
    fn test_invalid_parameters_are_validation_errors() {
        let err = make_reverse_anneal_schedule(1.1, 10.0, 0.2, 0.0201, None).unwrap_err();
        assert!(err.is_validation_error());
        assert!(!err.is_recoverable());
    }
}
