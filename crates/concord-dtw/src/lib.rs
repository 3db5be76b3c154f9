//! Dynamic time warping distances between two univariate series.
//!
//! Pure math library with no I/O. The local cost of aligning `a[i]` with `b[j]`
//! is `|a[i] - b[j]|` and the distance is the accumulated cost along the
//! cheapest monotone warping path (no square root is taken).
//!
//! Two solvers are provided:
//!
//! - [`Dtw`] solves the exact recurrence, optionally inside a Sakoe-Chiba band.
//! - [`FastDtw`] coarsens both series by pairwise averaging, solves the coarse
//!   problem, and refines inside a [`SearchWindow`] projected from the coarse
//!   warping path. Cost is roughly `O(n * radius)`.

mod constraint;
mod distance;
mod dtw;
mod error;
mod fast;
mod path;
mod series;
mod window;

pub use constraint::BandConstraint;
pub use distance::DtwDistance;
pub use dtw::Dtw;
pub use error::DtwError;
pub use fast::FastDtw;
pub use path::{WarpingPath, WarpingStep};
pub use series::{TimeSeries, TimeSeriesView};
pub use window::SearchWindow;
