use log::info;

/// Track progress of match scoring
pub struct ScoringProgress {
    total: usize,
    scored: usize,
}

impl ScoringProgress {
    pub fn new(total: usize) -> Self {
        Self { total, scored: 0 }
    }

    pub fn increment(&mut self) {
        self.scored += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.scored
    }

    fn log_progress(&self) {
        if should_log(self.scored, self.total) {
            info!("  → Scored {}/{} matches", self.scored, self.total);
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
