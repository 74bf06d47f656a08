//! Unconfirmed faces waiting to become players
//!
//! A detection that no slot claims starts (or feeds) a candidate. Only a
//! candidate seen for `tracking_new_player_frames` frames, far enough from
//! every enrolled slot, may be promoted.

use serde::Serialize;

use super::detection::Detection;
use crate::distance;
use crate::sim::state::PlayerSlot;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub x: f32,
    pub y: f32,
    /// Frames this candidate has been observed
    pub frames: u32,
    /// Frames since last observation
    pub age: u32,
}

impl Candidate {
    fn fresh(d: &Detection) -> Self {
        Self {
            x: d.x,
            y: d.y,
            frames: 1,
            age: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Candidate> {
        self.candidates.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    /// Feed this frame's unclaimed detections, then age and evict the rest
    ///
    /// Each detection merges into the nearest candidate not yet fed this
    /// frame if within `tracking_candidate_merge_distance`.
    pub fn update(&mut self, unmatched: &[Detection], tuning: &Tuning) {
        let mut fed = vec![false; self.candidates.len()];
        let mut next = Vec::with_capacity(self.candidates.len() + unmatched.len());

        for d in unmatched {
            let mut best: Option<(usize, f32)> = None;
            for (idx, c) in self.candidates.iter().enumerate() {
                if fed[idx] {
                    continue;
                }
                let dist = d.distance_to(c.x, c.y);
                if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                    best = Some((idx, dist));
                }
            }
            match best {
                Some((idx, dist)) if dist <= tuning.tracking_candidate_merge_distance => {
                    let c = self.candidates[idx];
                    fed[idx] = true;
                    next.push(Candidate {
                        x: (c.x + d.x) * 0.5,
                        y: (c.y + d.y) * 0.5,
                        frames: c.frames + 1,
                        age: 0,
                    });
                }
                _ => next.push(Candidate::fresh(d)),
            }
        }

        for (idx, c) in self.candidates.iter().enumerate() {
            if fed[idx] {
                continue;
            }
            let age = c.age + 1;
            if age <= tuning.tracking_candidate_max_age {
                next.push(Candidate { age, ..*c });
            }
        }

        self.candidates = next;
    }

    /// Indices of promotable candidates, most-observed first
    pub fn ready(&self, players: &[PlayerSlot], tuning: &Tuning) -> Vec<usize> {
        let mut ready: Vec<usize> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.frames >= tuning.tracking_new_player_frames)
            .filter(|(_, c)| {
                players
                    .iter()
                    .filter(|p| p.enrolled)
                    .all(|p| distance(p.x, p.y, c.x, c.y) >= tuning.tracking_candidate_min_distance)
            })
            .map(|(idx, _)| idx)
            .collect();
        ready.sort_by(|a, b| self.candidates[*b].frames.cmp(&self.candidates[*a].frames));
        ready
    }

    /// Drop the candidates at `indices` (promoted this frame)
    pub fn remove(&mut self, indices: &[usize]) {
        let mut idx = 0;
        self.candidates.retain(|_| {
            let keep = !indices.contains(&idx);
            idx += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x: f32, y: f32) -> Detection {
        Detection::new(x, y, 0.0)
    }

    #[test]
    fn test_new_detection_starts_candidate() {
        let tuning = Tuning::default();
        let mut pool = CandidatePool::new();
        pool.update(&[det(0.5, 0.5)], &tuning);
        assert_eq!(
            pool.get(0),
            Some(&Candidate {
                x: 0.5,
                y: 0.5,
                frames: 1,
                age: 0
            })
        );
    }

    #[test]
    fn test_nearby_detection_feeds_candidate() {
        let tuning = Tuning::default();
        let mut pool = CandidatePool::new();
        pool.update(&[det(0.5, 0.5)], &tuning);
        pool.update(&[det(0.54, 0.5)], &tuning);
        assert_eq!(pool.len(), 1);
        let c = pool.get(0).copied().expect("candidate");
        assert_eq!(c.frames, 2);
        assert!((c.x - 0.52).abs() < 1e-6);
    }

    #[test]
    fn test_candidate_fed_once_per_frame() {
        let tuning = Tuning::default();
        let mut pool = CandidatePool::new();
        pool.update(&[det(0.5, 0.5)], &tuning);
        pool.update(&[det(0.5, 0.5), det(0.52, 0.5)], &tuning);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.iter().map(|c| c.frames).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_unseen_candidates_age_out() {
        let tuning = Tuning::default();
        let mut pool = CandidatePool::new();
        pool.update(&[det(0.5, 0.5)], &tuning);
        for _ in 0..tuning.tracking_candidate_max_age {
            pool.update(&[], &tuning);
        }
        assert_eq!(pool.get(0).map(|c| c.age), Some(tuning.tracking_candidate_max_age));
        pool.update(&[], &tuning);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_ready_requires_frames_and_distance() {
        let tuning = Tuning {
            tracking_new_player_frames: 2,
            ..Tuning::default()
        };
        let mut pool = CandidatePool::new();
        for _ in 0..2 {
            pool.update(&[det(0.2, 0.5), det(0.8, 0.5)], &tuning);
        }
        pool.update(&[det(0.8, 0.5)], &tuning);

        let mut near = PlayerSlot::new(0);
        near.enrolled = true;
        near.x = 0.25;
        near.y = 0.5;

        let ready = pool.ready(std::slice::from_ref(&near), &tuning);
        assert_eq!(ready.len(), 1);
        let c = pool.get(ready[0]).copied().expect("candidate");
        assert_eq!((c.x, c.frames), (0.8, 3));
    }

    #[test]
    fn test_remove_by_index() {
        let tuning = Tuning::default();
        let mut pool = CandidatePool::new();
        pool.update(&[det(0.1, 0.5), det(0.5, 0.5), det(0.9, 0.5)], &tuning);
        pool.remove(&[0, 2]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(0).map(|c| c.x), Some(0.5));
    }
}
