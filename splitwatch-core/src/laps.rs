//! Append-only lap log

use heapless::Vec;
use splitwatch_protocol::RemoteEventKind;

use crate::error::ClientError;

/// Maximum marks kept for one run
pub const MAX_LAPS: usize = 32;

/// Which mark produced a lap record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LapLabel {
    Lap1,
    Lap2,
    Goal,
}

impl LapLabel {
    /// Label for marking events, `None` for everything else
    pub fn from_kind(kind: RemoteEventKind) -> Option<Self> {
        match kind {
            RemoteEventKind::LapOne => Some(LapLabel::Lap1),
            RemoteEventKind::LapTwo => Some(LapLabel::Lap2),
            RemoteEventKind::Finished => Some(LapLabel::Goal),
            _ => None,
        }
    }

    /// Display text
    pub const fn as_str(self) -> &'static str {
        match self {
            LapLabel::Lap1 => "LAP 1",
            LapLabel::Lap2 => "LAP 2",
            LapLabel::Goal => "GOAL",
        }
    }
}

/// One recorded mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LapRecord {
    /// Position in arrival order, starting at 1
    pub sequence: u32,
    pub label: LapLabel,
    /// Device elapsed time at the mark (ms)
    pub elapsed_ms: u64,
}

/// Ordered log of marks for the current run
///
/// Records are never edited or removed individually; only [`LapLog::clear`]
/// empties the log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LapLog {
    records: Vec<LapRecord, MAX_LAPS>,
    next_sequence: u32,
}

impl LapLog {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Append a mark, assigning the next sequence number
    pub fn append(&mut self, label: LapLabel, elapsed_ms: u64) -> Result<LapRecord, ClientError> {
        let record = LapRecord {
            sequence: self.next_sequence,
            label,
            elapsed_ms,
        };
        self.records
            .push(record)
            .map_err(|_| ClientError::LapLogFull)?;
        self.next_sequence = record.sequence + 1;
        Ok(record)
    }

    /// Drop every record and restart numbering at 1
    pub fn clear(&mut self) {
        self.records.clear();
        self.next_sequence = 1;
    }

    pub fn records(&self) -> &[LapRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LapRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&LapRecord> {
        self.records.last()
    }
}

impl Default for LapLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_follows_arrival_not_label() {
        let mut log = LapLog::new();
        log.append(LapLabel::Lap2, 4_000).unwrap();
        log.append(LapLabel::Lap2, 6_000).unwrap();
        let goal = log.append(LapLabel::Goal, 9_000).unwrap();

        assert_eq!(goal.sequence, 3);
        let sequences: heapless::Vec<u32, 4> = log.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_clear_restarts_numbering() {
        let mut log = LapLog::new();
        log.append(LapLabel::Lap1, 1).unwrap();
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.append(LapLabel::Lap1, 2).unwrap().sequence, 1);
    }

    #[test]
    fn test_default_log_numbers_from_one() {
        let mut log = LapLog::default();
        assert_eq!(log.append(LapLabel::Goal, 5).unwrap().sequence, 1);
    }

    #[test]
    fn test_full_log_refuses_without_mutation() {
        let mut log = LapLog::new();
        for i in 0..MAX_LAPS as u64 {
            log.append(LapLabel::Lap1, i).unwrap();
        }
        assert_eq!(log.append(LapLabel::Goal, 99), Err(ClientError::LapLogFull));
        assert_eq!(log.len(), MAX_LAPS);
        assert_eq!(log.last().map(|r| r.label), Some(LapLabel::Lap1));
    }

    #[test]
    fn test_labels() {
        assert_eq!(LapLabel::from_kind(RemoteEventKind::LapOne), Some(LapLabel::Lap1));
        assert_eq!(LapLabel::from_kind(RemoteEventKind::Finished), Some(LapLabel::Goal));
        assert_eq!(LapLabel::from_kind(RemoteEventKind::Stopped), None);
        assert_eq!(LapLabel::Lap2.as_str(), "LAP 2");
    }
}
