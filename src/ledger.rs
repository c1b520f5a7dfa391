use crate::member::MemberId;
use crate::values::Arguments;
use std::collections::{HashMap, HashSet};

/// Per-member call counts, argument history and the verified set.
#[derive(Debug, Default)]
pub struct Ledger {
    counts: HashMap<MemberId, usize>,
    calls: HashMap<MemberId, Vec<Arguments>>,
    verified: HashSet<MemberId>,
}

impl Ledger {
    /// Record one call. Happens before any outcome is resolved.
    pub fn record(&mut self, member: MemberId, args: Arguments) {
        *self.counts.entry(member).or_insert(0) += 1;
        self.calls.entry(member).or_default().push(args);
    }

    pub fn call_count(&self, member: MemberId) -> usize {
        self.counts.get(&member).copied().unwrap_or(0)
    }

    /// Argument tuples of every call to `member`, oldest first.
    pub fn calls(&self, member: MemberId) -> &[Arguments] {
        self.calls.get(&member).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_calls(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn mark_verified(&mut self, member: MemberId) {
        self.verified.insert(member);
    }

    pub fn is_verified(&self, member: MemberId) -> bool {
        self.verified.contains(&member)
    }

    /// Members with at least one call that were never verified, by name.
    pub fn unverified(&self) -> Vec<MemberId> {
        let mut members: Vec<MemberId> = self
            .counts
            .iter()
            .filter(|(member, count)| **count > 0 && !self.verified.contains(*member))
            .map(|(member, _)| *member)
            .collect();
        members.sort_by(|a, b| a.name().cmp(b.name()).then(a.key().cmp(&b.key())));
        members
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.calls.clear();
        self.verified.clear();
    }
}
