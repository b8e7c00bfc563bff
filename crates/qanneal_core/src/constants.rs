//! Constants for QAnneal
//!
//! Gantree: L0_Foundation → Constants
//!
//! Reverse-anneal defaults, embedding search defaults, and the default
//! processor geometry.

// ============================================================================
// Schedule Constants
// Gantree: schedule // 스케줄 상수
// ============================================================================

pub mod schedule {
    //! Reverse-anneal waveform parameters

    /// s-value every schedule starts and ends at
    pub const INITIAL_S: f64 = 1.0;

    /// Default target s-value
    /// Gantree: DEFAULT_S_TARGET: f64 = 0.0
    pub const DEFAULT_S_TARGET: f64 = 0.0;

    /// Default time held at the target (microseconds)
    /// Gantree: DEFAULT_HOLD_TIME_US: f64 = 10.0
    pub const DEFAULT_HOLD_TIME_US: f64 = 10.0;

    /// Default descent rate (1/microsecond)
    pub const DEFAULT_RAMP_BACK_SLOPE: f64 = 0.2;

    /// Fastest descent the hardware accepts (1/microsecond)
    pub const MAX_RAMP_BACK_SLOPE: f64 = 0.2;

    /// Default return-ramp duration (microseconds)
    pub const DEFAULT_RAMP_UP_TIME_US: f64 = 0.0201;

    /// Decimal places kept on every waveform coordinate
    pub const TIME_DECIMALS: usize = 4;
}

// ============================================================================
// Embedding Constants
// Gantree: embedding // 임베딩 상수
// ============================================================================

pub mod embedding {
    //! Short-chain embedding search parameters

    /// Default number of probabilistic embedding attempts
    /// Gantree: DEFAULT_TRIES: usize = 5
    pub const DEFAULT_TRIES: usize = 5;
}

// ============================================================================
// Chimera Constants
// ============================================================================

pub mod chimera {
    //! Default processor geometry: 16 by 16 unit cells of K_{4,4}

    /// Unit-cell rows
    pub const DEFAULT_ROWS: usize = 16;

    /// Unit-cell columns
    pub const DEFAULT_COLS: usize = 16;

    /// Shore size of each unit cell
    pub const DEFAULT_SHORE: usize = 4;

    /// Node count of a Chimera graph
    #[inline]
    pub const fn num_nodes(m: usize, n: usize, t: usize) -> usize {
        2 * m * n * t
    }

    /// Edge count of a Chimera graph
    #[inline]
    pub const fn num_edges(m: usize, n: usize, t: usize) -> usize {
        m * n * t * t + m.saturating_sub(1) * n * t + m * n.saturating_sub(1) * t
    }
}

// ============================================================================
// Tests
// ============================================================================
