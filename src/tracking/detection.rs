//! Raw mouth detections and per-frame deduplication

use serde::{Deserialize, Serialize};

use crate::distance;

/// One face/mouth observation from the landmark model (normalized coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    /// Mouth opening relative to face size
    pub open_ratio: f32,
}

impl Detection {
    pub fn new(x: f32, y: f32, open_ratio: f32) -> Self {
        Self { x, y, open_ratio }
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        distance(self.x, self.y, x, y)
    }
}

/// Merge detections closer than `merge_distance` into one observation
///
/// Each raw detection folds into the first already-kept observation in
/// range: position becomes the midpoint, open ratio the larger of the two.
pub fn dedupe(raw: &[Detection], merge_distance: f32) -> Vec<Detection> {
    let mut merged: Vec<Detection> = Vec::with_capacity(raw.len());
    for d in raw {
        match merged.iter_mut().find(|m| m.distance_to(d.x, d.y) <= merge_distance) {
            Some(hit) => {
                hit.x = (hit.x + d.x) * 0.5;
                hit.y = (hit.y + d.y) * 0.5;
                hit.open_ratio = hit.open_ratio.max(d.open_ratio);
            }
            None => merged.push(*d),
        }
    }
    merged
}
