/// Orders overlapping uploads. Each upload gets a sequence number when it
/// is issued; an outcome (success or failure) may only be applied if no
/// outcome from a later upload has been applied already. Outcomes that
/// lose the race are discarded, so the session never regresses to an
/// older request's result.
#[derive(Debug, Default)]
pub struct UploadTracker {
    next_sequence: u64,
    latest_applied: u64,
    in_flight: usize,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new upload and returns its sequence number.
    pub fn begin(&mut self) -> u64 {
        self.next_sequence += 1;
        self.in_flight += 1;
        self.next_sequence
    }

    /// Marks an upload as resolved, regardless of outcome.
    pub fn finish(&mut self, _sequence: u64) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Whether an outcome with this sequence number is still current.
    pub fn is_current(&self, sequence: u64) -> bool {
        sequence > self.latest_applied
    }

    /// Records that an outcome with this sequence number was applied.
    pub fn mark_applied(&mut self, sequence: u64) {
        debug_assert!(self.is_current(sequence));
        self.latest_applied = sequence;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
