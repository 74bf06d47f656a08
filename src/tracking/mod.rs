//! Mouth identity tracking
//!
//! Runs once per new video frame, before the simulation tick. Writes only
//! slot identity fields (`x`, `y`, `mouth_open`, `active`, `enrolled`,
//! `lost_frames`); everything else on a slot belongs to the simulation.

pub mod candidates;
pub mod detection;
pub mod tracker;

pub use candidates::{Candidate, CandidatePool};
pub use detection::{Detection, dedupe};
pub use tracker::{SyncReport, Tracker};
