//! Cooperative job blackboard: post/bid/complete, priority×preference
//! scoring. One assignment per job; a bid with no open jobs, or where
//! every open job scores zero, is simply rejected.

use std::collections::HashMap;

use npcsim_core::components::Job;
use npcsim_core::enums::JobType;
use npcsim_core::types::{Uid, Vec3};

/// Scores a job twice as attractive when its type matches the bidder's
/// stated preference.
const PREFERRED_TYPE_MULTIPLIER: f32 = 2.0;
const OTHER_TYPE_MULTIPLIER: f32 = 1.0;

#[derive(Debug, Default)]
pub struct JobBlackboard {
    jobs: HashMap<Uid, Job>,
    next_id: Uid,
}

impl JobBlackboard {
    pub fn post_job(&mut self, job_type: JobType, position: Vec3, priority: f32, difficulty: f32) -> Uid {
        let id = self.next_id;
        self.next_id += 1;
        self.jobs.insert(id, Job { id, job_type, position, priority, difficulty, assigned_to: None });
        id
    }

    /// Scans every unassigned job, scores it `priority * (2 if
    /// job_type == preferred else 1)`, and assigns the agent to the
    /// highest-scoring one (earliest-posted wins a tie). Returns the
    /// assigned job, or `None` if there was nothing worth bidding on.
    pub fn bid_for_job(&mut self, agent_id: Uid, preferred: JobType) -> Option<Job> {
        let winner_id = self
            .jobs
            .values()
            .filter(|job| job.assigned_to.is_none())
            .map(|job| {
                let multiplier =
                    if job.job_type == preferred { PREFERRED_TYPE_MULTIPLIER } else { OTHER_TYPE_MULTIPLIER };
                (job.id, job.priority * multiplier)
            })
            .filter(|(_, score)| *score > 0.0)
            .max_by(|(id_a, score_a), (id_b, score_b)| {
                score_a.partial_cmp(score_b).unwrap_or(std::cmp::Ordering::Equal).then(id_b.cmp(id_a))
            })
            .map(|(id, _)| id)?;

        let job = self.jobs.get_mut(&winner_id)?;
        job.assigned_to = Some(agent_id);
        Some(*job)
    }

    pub fn complete_job(&mut self, job_id: Uid) -> Option<Job> {
        self.jobs.remove(&job_id)
    }

    pub fn assigned_to(&self, agent_id: Uid) -> Option<&Job> {
        self.jobs.values().find(|j| j.assigned_to == Some(agent_id))
    }

    pub fn open_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values().filter(|j| j.assigned_to.is_none())
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_assigns_the_only_open_job() {
        let mut bb = JobBlackboard::default();
        let id = bb.post_job(JobType::Repair, Vec3::ZERO, 1.0, 0.5);
        let won = bb.bid_for_job(7, JobType::Repair).unwrap();
        assert_eq!(won.id, id);
        assert_eq!(bb.assigned_to(7).map(|j| j.id), Some(id));
    }

    #[test]
    fn bid_prefers_higher_scoring_job_over_higher_priority_mismatch() {
        let mut bb = JobBlackboard::default();
        // Repair priority 1.0, unmatched: score 1.0.
        let repair = bb.post_job(JobType::Repair, Vec3::ZERO, 1.0, 0.5);
        // Scavenge priority 0.6, matched preference: score 1.2.
        let scavenge = bb.post_job(JobType::Scavenge, Vec3::ZERO, 0.6, 0.5);
        let won = bb.bid_for_job(7, JobType::Scavenge).unwrap();
        assert_eq!(won.id, scavenge);
        assert_ne!(won.id, repair);
    }

    #[test]
    fn tied_score_goes_to_earliest_posted_job() {
        let mut bb = JobBlackboard::default();
        let first = bb.post_job(JobType::Repair, Vec3::ZERO, 1.0, 0.5);
        let _second = bb.post_job(JobType::Repair, Vec3::new(1.0, 0.0, 0.0), 1.0, 0.5);
        let won = bb.bid_for_job(7, JobType::Combat).unwrap();
        assert_eq!(won.id, first);
    }

    #[test]
    fn already_assigned_job_is_excluded_from_the_next_bid() {
        let mut bb = JobBlackboard::default();
        let id = bb.post_job(JobType::Repair, Vec3::ZERO, 1.0, 0.5);
        bb.bid_for_job(7, JobType::Repair).unwrap();
        assert!(bb.bid_for_job(8, JobType::Repair).is_none());
        assert_eq!(bb.assigned_to(7).map(|j| j.id), Some(id));
        assert_eq!(bb.assigned_to(8), None);
    }

    #[test]
    fn zero_priority_job_is_unbiddable() {
        let mut bb = JobBlackboard::default();
        bb.post_job(JobType::Scavenge, Vec3::ZERO, 0.0, 0.5);
        assert!(bb.bid_for_job(7, JobType::Scavenge).is_none());
    }

    #[test]
    fn complete_job_removes_it() {
        let mut bb = JobBlackboard::default();
        let id = bb.post_job(JobType::Transport, Vec3::ZERO, 1.0, 0.5);
        bb.bid_for_job(1, JobType::Transport);
        assert!(bb.complete_job(id).is_some());
        assert_eq!(bb.assigned_to(1), None);
    }
}
