//! Slot identity tracking
//!
//! Turns each frame's noisy detections into stable player slots. Steady
//! state matching is greedy over all (slot, detection) pairs by global
//! distance; new players must survive the candidate debounce first.

use serde::Serialize;

use super::candidates::CandidatePool;
use super::detection::{Detection, dedupe};
use crate::sim::state::PlayerSlot;
use crate::tuning::Tuning;

/// What changed during one `sync`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Took the left-to-right first-enrollment path
    pub initial: bool,
    /// Slots assigned a detection this frame
    pub matched: Vec<usize>,
    /// Slots enrolled this frame
    pub enrolled: Vec<usize>,
    /// Lost slots handed to a new face
    pub reclaimed: Vec<usize>,
    /// Slots that went inactive this frame
    pub lost: Vec<usize>,
}

struct Pair {
    slot: usize,
    detection: usize,
    dist: f32,
}

/// Owns the candidate pool between frames
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    candidates: CandidatePool,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &CandidatePool {
        &self.candidates
    }

    /// Forget every pending candidate
    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    /// Update slot identity and position from this frame's detections
    pub fn sync(&mut self, players: &mut [PlayerSlot], raw: &[Detection], tuning: &Tuning) -> SyncReport {
        let detections = dedupe(raw, tuning.tracking_merge_distance);
        let mut report = SyncReport::default();
        let enrolled_count = players.iter().filter(|p| p.enrolled).count();
        let max_allowed = players.len().min(detections.len());

        if enrolled_count == 0 && !detections.is_empty() {
            report.initial = true;
            enroll_left_to_right(players, &detections, tuning, &mut report);
            log::debug!("Initial enrollment: slots {:?}", report.enrolled);
            return report;
        }

        // Re-identification
        let mut pairs = Vec::new();
        for (slot, p) in players.iter().enumerate() {
            if !p.enrolled {
                continue;
            }
            let relax = if p.active { 1.0 } else { tuning.tracking_inactive_relax };
            let max_dist = tuning.tracking_max_distance * relax;
            for (idx, d) in detections.iter().enumerate() {
                let dist = d.distance_to(p.x, p.y);
                if dist <= max_dist {
                    pairs.push(Pair {
                        slot,
                        detection: idx,
                        dist,
                    });
                }
            }
        }
        // Stable: equal distances keep slot order, then detection order
        pairs.sort_by(|a, b| a.dist.total_cmp(&b.dist));

        let mut slot_taken = vec![false; players.len()];
        let mut detection_taken = vec![false; detections.len()];
        for pair in &pairs {
            if slot_taken[pair.slot] || detection_taken[pair.detection] {
                continue;
            }
            slot_taken[pair.slot] = true;
            detection_taken[pair.detection] = true;
            let d = &detections[pair.detection];
            let p = &mut players[pair.slot];
            p.x = d.x;
            p.y = d.y;
            p.mouth_open = d.open_ratio > tuning.mouth_open_threshold;
            p.active = true;
            p.enrolled = true;
            p.lost_frames = 0;
            report.matched.push(pair.slot);
        }

        for (slot, p) in players.iter_mut().enumerate() {
            if !p.enrolled || slot_taken[slot] {
                continue;
            }
            p.lost_frames += 1;
            p.mouth_open = false;
            if p.lost_frames > tuning.tracking_lost_grace_frames {
                if p.active {
                    report.lost.push(slot);
                }
                p.active = false;
            }
        }
        if !report.lost.is_empty() {
            log::debug!("Lost track of slots {:?}", report.lost);
        }

        // Candidate lifecycle
        let unmatched: Vec<Detection> = detections
            .iter()
            .zip(&detection_taken)
            .filter(|(_, taken)| !**taken)
            .map(|(d, _)| *d)
            .collect();
        self.candidates.update(&unmatched, tuning);
        let ready = self.candidates.ready(players, tuning);

        // Promotion or reclamation
        let mut promoted = Vec::new();
        let remaining_slots = max_allowed.saturating_sub(enrolled_count);
        if remaining_slots > 0 {
            let mut ready_iter = ready.iter();
            for (slot, p) in players.iter_mut().enumerate() {
                if promoted.len() >= remaining_slots {
                    break;
                }
                if p.enrolled {
                    continue;
                }
                let Some(&idx) = ready_iter.next() else {
                    break;
                };
                let Some(c) = self.candidates.get(idx) else {
                    break;
                };
                place(p, c.x, c.y);
                promoted.push(idx);
                report.enrolled.push(slot);
            }
        } else if !unmatched.is_empty() {
            let mut reclaimable: Vec<usize> = players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.enrolled && !p.active && p.lost_frames > tuning.tracking_lost_grace_frames)
                .map(|(slot, _)| slot)
                .collect();
            reclaimable.sort_by(|a, b| players[*b].lost_frames.cmp(&players[*a].lost_frames));

            for (&slot, &idx) in reclaimable.iter().zip(&ready) {
                let Some(c) = self.candidates.get(idx) else {
                    break;
                };
                place(&mut players[slot], c.x, c.y);
                promoted.push(idx);
                report.reclaimed.push(slot);
            }
        }
        self.candidates.remove(&promoted);

        if !report.enrolled.is_empty() {
            log::debug!("Enrolled new players in slots {:?}", report.enrolled);
        }
        if !report.reclaimed.is_empty() {
            log::debug!("Reclaimed slots {:?} for new faces", report.reclaimed);
        }
        report
    }
}

/// First enrollment: slot order is screen order, left to right
fn enroll_left_to_right(players: &mut [PlayerSlot], detections: &[Detection], tuning: &Tuning, report: &mut SyncReport) {
    let mut sorted = detections.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    for (slot, p) in players.iter_mut().enumerate() {
        match sorted.get(slot) {
            Some(d) => {
                p.active = true;
                p.enrolled = true;
                p.lost_frames = 0;
                p.x = d.x;
                p.y = d.y;
                p.mouth_open = d.open_ratio > tuning.mouth_open_threshold;
                report.enrolled.push(slot);
            }
            None => {
                p.active = false;
                p.mouth_open = false;
            }
        }
    }
}

fn place(p: &mut PlayerSlot, x: f32, y: f32) {
    p.active = true;
    p.enrolled = true;
    p.lost_frames = 0;
    p.x = x;
    p.y = y;
    p.mouth_open = false;
}
