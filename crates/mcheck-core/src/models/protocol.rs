//! Frame-stream protocol model, checked by bounded depth-first enumeration.
//!
//! A stream must open with a `start` frame and, once terminated, must end
//! with a terminal frame (`result` or `error`). The stream is its own
//! history, so the state space is a tree and needs no deduplication.

use std::fmt;

use crate::model::{Model, Violation};

/// Frame tags carried on the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTag {
    Start,
    Event,
    End,
    Result,
    Error,
}

impl FrameTag {
    /// Tags that legally terminate a stream.
    pub fn is_terminal(self) -> bool {
        matches!(self, FrameTag::Result | FrameTag::Error)
    }
}

impl fmt::Display for FrameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrameTag::Start => "start",
            FrameTag::Event => "event",
            FrameTag::End => "end",
            FrameTag::Result => "result",
            FrameTag::Error => "error",
        };
        f.write_str(s)
    }
}

/// One configuration of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProtocolState {
    pub stream: Vec<FrameTag>,
    pub terminated: bool,
}

/// One legal move: append a frame to the stream.
#[derive(Debug, Clone, Copy)]
pub struct Append(pub FrameTag);

pub struct ProtocolModel;

impl Model for ProtocolModel {
    type State = ProtocolState;
    type Action = Append;

    fn name(&self) -> &'static str {
        "protocol"
    }

    fn initial_state(&self) -> ProtocolState {
        ProtocolState::default()
    }

    fn actions(&self, state: &ProtocolState) -> Vec<Append> {
        if state.terminated {
            return vec![];
        }
        if state.stream.is_empty() {
            return vec![Append(FrameTag::Start)];
        }
        if state.stream[0] != FrameTag::Start {
            // Malformed opening: nothing legal follows, keeping the
            // transition relation total over hand-built states too.
            return vec![];
        }

        let mut actions = vec![Append(FrameTag::Event)];
        // At most one end-of-data marker per stream.
        if !state.stream.contains(&FrameTag::End) {
            actions.push(Append(FrameTag::End));
        }
        // Terminal tags are mutually exclusive per branch; each spawns its
        // own branch of the tree.
        actions.push(Append(FrameTag::Result));
        actions.push(Append(FrameTag::Error));
        actions
    }

    fn apply(&self, state: &ProtocolState, action: &Append) -> ProtocolState {
        let Append(tag) = *action;
        let mut next = state.clone();
        next.stream.push(tag);
        if tag.is_terminal() {
            next.terminated = true;
        }
        next
    }

    fn invariants(&self, state: &ProtocolState) -> Vec<Violation> {
        let mut violations = Vec::new();

        // PROTO-INV-1: a non-empty stream opens with the start tag.
        if let Some(first) = state.stream.first() {
            if *first != FrameTag::Start {
                violations.push(Violation::new(
                    "PROTO-INV-1",
                    format!("first frame is '{first}', expected 'start'"),
                ));
            }
        }

        // PROTO-INV-2: a terminated stream ends with a terminal tag.
        if state.terminated {
            match state.stream.last() {
                Some(last) if last.is_terminal() => {}
                Some(last) => violations.push(Violation::new(
                    "PROTO-INV-2",
                    format!("terminated but last frame is '{last}'"),
                )),
                None => violations.push(Violation::new(
                    "PROTO-INV-2",
                    "terminated but stream is empty".to_string(),
                )),
            }
        }

        // PROTO-INV-4: an event frame cannot be the opening frame. Distinct
        // from INV-1: both can trigger independently depending on how the
        // state was reached.
        if state.stream.first() == Some(&FrameTag::Event) {
            violations.push(Violation::new(
                "PROTO-INV-4",
                "event at index 0, no start before it".to_string(),
            ));
        }

        violations
    }
}
