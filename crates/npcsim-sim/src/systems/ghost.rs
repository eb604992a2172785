//! Ghost recorder: a bounded per-agent ring buffer of positions for
//! replay. Oldest frame is evicted once a buffer exceeds `GHOST_MAX_SAMPLES`.

use std::collections::{HashMap, VecDeque};

use npcsim_core::components::GhostFrame;
use npcsim_core::constants::GHOST_MAX_SAMPLES;
use npcsim_core::types::Uid;

#[derive(Debug, Default)]
pub struct GhostRecorder {
    frames: HashMap<Uid, VecDeque<GhostFrame>>,
}

impl GhostRecorder {
    pub fn record(&mut self, id: Uid, frame: GhostFrame) {
        let buf = self.frames.entry(id).or_default();
        buf.push_back(frame);
        if buf.len() > GHOST_MAX_SAMPLES {
            buf.pop_front();
        }
    }

    pub fn history(&self, id: Uid) -> Option<&VecDeque<GhostFrame>> {
        self.frames.get(&id)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
