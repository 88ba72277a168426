use crate::{CountDrift, GridHost};

/// Why the new-row affordance is temporarily withdrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suspension {
    Drag,
    ProvisionalEdit,
}

impl Suspension {
    fn bit(self) -> u8 {
        match self {
            Self::Drag => 1,
            Self::ProvisionalEdit => 2,
        }
    }
}

/// Keeps the host's displayed row count equal to the store count, plus the sentinel row.
///
/// Callers mutate the store completely and only then call [`RowCountSync::resync`]; the
/// synchronizer never runs in the middle of a mutation.
#[derive(Clone, Debug)]
pub struct RowCountSync {
    allow_new_row: bool,
    suspended: u8,
    displayed: usize,
    resyncs: u64,
}

impl RowCountSync {
    pub fn new(allow_new_row: bool) -> Self {
        Self {
            allow_new_row,
            suspended: 0,
            displayed: 0,
            resyncs: 0,
        }
    }

    /// The configured preference, regardless of suspensions.
    pub fn allow_new_row(&self) -> bool {
        self.allow_new_row
    }

    pub fn set_allow_new_row(&mut self, allow: bool) {
        self.allow_new_row = allow;
    }

    /// Whether the sentinel row is currently shown.
    pub fn new_row_affordance(&self) -> bool {
        self.allow_new_row && self.suspended == 0
    }

    pub fn is_suspended(&self, reason: Suspension) -> bool {
        self.suspended & reason.bit() != 0
    }

    /// Withdraws the sentinel row. Does not touch the displayed count.
    pub fn suspend(&mut self, reason: Suspension) {
        self.suspended |= reason.bit();
    }

    /// Lifts one suspension. Does not touch the displayed count.
    pub fn resume(&mut self, reason: Suspension) {
        self.suspended &= !reason.bit();
    }

    pub fn expected(&self, count: usize) -> usize {
        if self.new_row_affordance() {
            count.saturating_add(1)
        } else {
            count
        }
    }

    /// The row count last pushed to the host.
    pub fn displayed(&self) -> usize {
        self.displayed
    }

    /// Number of times the count has been pushed to the host.
    pub fn resyncs(&self) -> u64 {
        self.resyncs
    }

    pub fn resync(&mut self, count: usize, host: &mut impl GridHost) -> usize {
        let displayed = self.expected(count);
        gdebug!(
            count,
            displayed,
            affordance = self.new_row_affordance(),
            "RowCountSync::resync"
        );
        self.displayed = displayed;
        self.resyncs = self.resyncs.wrapping_add(1);
        host.set_row_count(displayed);
        displayed
    }

    /// Classifies the displayed count against what `count` records support.
    pub fn drift(&self, count: usize) -> CountDrift {
        let expected = self.expected(count);
        match self.displayed.cmp(&expected) {
            core::cmp::Ordering::Equal => CountDrift::InSync,
            core::cmp::Ordering::Less => CountDrift::Behind(expected - self.displayed),
            core::cmp::Ordering::Greater => CountDrift::Ahead(self.displayed - expected),
        }
    }
}
