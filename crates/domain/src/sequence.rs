//! Request sequencing — drop responses that arrive after a newer one.
//!
//! Each fetch is tagged when it is issued. A response is applied only if its
//! tag is newer than the last applied tag; anything older is stale.

/// Tag attached to an outgoing fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seq(u64);

impl Seq {
    /// Raw counter value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Seq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Issues increasing tags and tracks the newest applied one.
#[derive(Debug, Default)]
pub struct SequenceGate {
    issued: u64,
    applied: Option<Seq>,
}

impl SequenceGate {
    /// Create a gate that has issued nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new request.
    pub fn issue(&mut self) -> Seq {
        self.issued += 1;
        Seq(self.issued)
    }

    /// Record `seq` as applied if it is newer than the last applied tag.
    ///
    /// Returns `false` for stale responses, which must be discarded.
    pub fn accept(&mut self, seq: Seq) -> bool {
        if self.applied.is_some_and(|applied| seq <= applied) {
            return false;
        }
        self.applied = Some(seq);
        true
    }

    /// Newest applied tag.
    #[must_use]
    pub fn last_applied(&self) -> Option<Seq> {
        self.applied
    }
}
