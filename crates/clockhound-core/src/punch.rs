//! Punch records and attendance-state classification.
//!
//! A punch is a recorded attendance event: a clock-in, a clock-out, or a
//! leave period (vacation, sick, unpaid). Punches are produced elsewhere;
//! this module only classifies them.
//!
//! ## State Machine
//!
//! ```text
//! NoPunch -> PunchedIn -> PunchedOut -> PunchedIn -> ...
//!                 \-> OnLeave -> PunchedIn
//! ```
//!
//! Transitions are driven by punch events outside this crate. The decision
//! engine observes the state derived from the most recent punch and never
//! writes punches itself.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Kind of attendance event a punch records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunchKind {
    In,
    Out,
    Vacation,
    Sick,
    Unpaid,
}

impl PunchKind {
    /// Whether this kind marks a leave period rather than a worked shift.
    pub fn is_leave(self) -> bool {
        matches!(self, PunchKind::Vacation | PunchKind::Sick | PunchKind::Unpaid)
    }
}

/// A recorded attendance event.
///
/// Worked punches carry their timestamps in `times`. A leave punch either
/// carries an explicit `[begin, end]` pair in `times`, or a `block_hours`
/// duration anchored at `recorded_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Punch {
    /// What this punch records
    pub kind: PunchKind,

    /// Ordered timestamps; for leave punches an optional `[begin, end]` pair
    #[serde(default)]
    pub times: Vec<DateTime<Utc>>,

    /// When the punch was recorded (anchor for block-style leave windows)
    pub recorded_at: DateTime<Utc>,

    /// Absence window length in hours, for block-style leave punches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hours: Option<f64>,
}

impl Punch {
    /// A plain worked punch at a single instant.
    pub fn worked(kind: PunchKind, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            times: vec![at],
            recorded_at: at,
            block_hours: None,
        }
    }

    /// A leave punch covering a block of hours starting at `recorded_at`.
    pub fn leave_block(kind: PunchKind, recorded_at: DateTime<Utc>, hours: f64) -> Self {
        Self {
            kind,
            times: Vec::new(),
            recorded_at,
            block_hours: Some(hours),
        }
    }

    /// A leave punch with an explicit begin/end pair.
    pub fn leave_span(kind: PunchKind, begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            kind,
            times: vec![begin, end],
            recorded_at: begin,
            block_hours: None,
        }
    }

    /// The most recent timestamp on this punch, if any.
    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        self.times.last().copied()
    }
}

/// Absence window carried by a leave punch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveWindow {
    /// Explicit `[begin, end]` pair recorded on the punch
    Explicit {
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// `hours` of absence starting at `start`
    Block { start: DateTime<Utc>, hours: f64 },
    /// Leave punch with neither a pair nor a block; never ends on its own
    Open,
}

impl LeaveWindow {
    /// Whether `now` falls inside the absence window.
    ///
    /// An `Open` window contains every instant: without an end there is
    /// nothing to return from.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        match *self {
            LeaveWindow::Explicit { begin, end } => now > begin && now < end,
            LeaveWindow::Block { start, hours } => {
                let end = start + Duration::seconds((hours * 3600.0) as i64);
                now > start && now < end
            }
            LeaveWindow::Open => true,
        }
    }
}

/// A user's attendance state, derived from their most recent punch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    /// No punch on record
    NoPunch,
    /// Last punch clocked the user in
    PunchedIn { at: DateTime<Utc> },
    /// Last punch clocked the user out
    PunchedOut { at: DateTime<Utc> },
    /// Last punch opened a leave period
    OnLeave {
        kind: PunchKind,
        window: LeaveWindow,
    },
}

impl AttendanceState {
    /// Classify the most recent punch in `punches`.
    pub fn from_last_punch(punches: &[Punch]) -> Self {
        let Some(punch) = punches.last() else {
            return AttendanceState::NoPunch;
        };
        match punch.kind {
            PunchKind::In => AttendanceState::PunchedIn {
                at: punch.last_time().unwrap_or(punch.recorded_at),
            },
            PunchKind::Out => AttendanceState::PunchedOut {
                at: punch.last_time().unwrap_or(punch.recorded_at),
            },
            kind => {
                // Explicit pair wins over a block window when both exist.
                let window = if punch.times.len() >= 2 {
                    LeaveWindow::Explicit {
                        begin: punch.times[0],
                        end: punch.times[1],
                    }
                } else if let Some(hours) = punch.block_hours {
                    LeaveWindow::Block {
                        start: punch.recorded_at,
                        hours,
                    }
                } else {
                    LeaveWindow::Open
                };
                AttendanceState::OnLeave { kind, window }
            }
        }
    }

    /// The most recent punch timestamp backing this state, if any.
    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        match *self {
            AttendanceState::NoPunch => None,
            AttendanceState::PunchedIn { at } | AttendanceState::PunchedOut { at } => Some(at),
            AttendanceState::OnLeave { window, .. } => match window {
                LeaveWindow::Explicit { begin, .. } => Some(begin),
                LeaveWindow::Block { start, .. } => Some(start),
                LeaveWindow::Open => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, h, 0, 0).unwrap()
    }

    #[test]
    fn test_no_punch_state() {
        assert_eq!(AttendanceState::from_last_punch(&[]), AttendanceState::NoPunch);
    }

    #[test]
    fn test_last_punch_wins() {
        let punches = vec![
            Punch::worked(PunchKind::In, at(9)),
            Punch::worked(PunchKind::Out, at(17)),
        ];
        assert_eq!(
            AttendanceState::from_last_punch(&punches),
            AttendanceState::PunchedOut { at: at(17) }
        );
    }

    #[test]
    fn test_leave_prefers_explicit_pair() {
        let mut punch = Punch::leave_span(PunchKind::Vacation, at(0), at(8));
        punch.block_hours = Some(24.0);
        let state = AttendanceState::from_last_punch(&[punch]);
        match state {
            AttendanceState::OnLeave { window, .. } => {
                assert_eq!(
                    window,
                    LeaveWindow::Explicit {
                        begin: at(0),
                        end: at(8)
                    }
                );
            }
            other => panic!("expected OnLeave, got {:?}", other),
        }
    }

    #[test]
    fn test_block_window_containment() {
        let window = LeaveWindow::Block {
            start: at(0),
            hours: 24.0,
        };
        assert!(window.contains(at(12)));
        assert!(!window.contains(at(12) + Duration::hours(24)));
    }

    #[test]
    fn test_open_window_never_ends() {
        let window = LeaveWindow::Open;
        assert!(window.contains(at(0) + Duration::days(365)));
    }

    #[test]
    fn test_leave_kinds() {
        assert!(PunchKind::Vacation.is_leave());
        assert!(PunchKind::Sick.is_leave());
        assert!(PunchKind::Unpaid.is_leave());
        assert!(!PunchKind::In.is_leave());
        assert!(!PunchKind::Out.is_leave());
    }
}
