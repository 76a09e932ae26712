//! Content-addressable store model, checked by deduplicated BFS.
//!
//! A write either commits (fresh digest, or idempotent rewrite of identical
//! content) or is rejected as a collision error. The stored content for a
//! digest must never change once committed.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::{Model, Violation};

/// Digest universe, kept to two values so BFS stays tractable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Digest {
    D1,
    D2,
}

impl Digest {
    pub const ALL: [Digest; 2] = [Digest::D1, Digest::D2];
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Digest::D1 => write!(f, "d1"),
            Digest::D2 => write!(f, "d2"),
        }
    }
}

/// Content universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Content {
    A,
    B,
}

impl Content {
    pub const ALL: [Content; 2] = [Content::A, Content::B];
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::A => write!(f, "c_a"),
            Content::B => write!(f, "c_b"),
        }
    }
}

/// One configuration of the store.
///
/// Ordered containers throughout: equality and hashing must not depend on
/// the order writes were issued in, or BFS dedup would treat permuted
/// histories as distinct states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CasState {
    /// Stored content per digest.
    pub store: BTreeMap<Digest, Content>,
    /// Writes that committed, including idempotent rewrites.
    pub committed: BTreeSet<(Digest, Content)>,
    /// Writes rejected because the digest held different content.
    pub errors: BTreeSet<(Digest, Content)>,
}

/// One legal move: attempt to write `content` at `digest`.
#[derive(Debug, Clone, Copy)]
pub struct Write {
    pub digest: Digest,
    pub content: Content,
}

pub struct CasModel;

impl Model for CasModel {
    type State = CasState;
    type Action = Write;

    fn name(&self) -> &'static str {
        "cas"
    }

    fn initial_state(&self) -> CasState {
        CasState::default()
    }

    fn actions(&self, state: &CasState) -> Vec<Write> {
        // Every (digest, content) pair not yet committed is a legal write
        // attempt; re-attempting an already-committed write is a no-op state
        // and would only be pruned by dedup anyway.
        let mut actions = Vec::new();
        for digest in Digest::ALL {
            for content in Content::ALL {
                if !state.committed.contains(&(digest, content)) {
                    actions.push(Write { digest, content });
                }
            }
        }
        actions
    }

    fn apply(&self, state: &CasState, action: &Write) -> CasState {
        let Write { digest, content } = *action;
        let mut next = state.clone();
        match state.store.get(&digest) {
            // Idempotent rewrite: identical content commits again without
            // touching the store.
            Some(stored) if *stored == content => {
                next.committed.insert((digest, content));
            }
            // Collision: the stored value is never mutated, the attempt is
            // recorded as an error rather than silently dropped.
            Some(_) => {
                next.errors.insert((digest, content));
            }
            None => {
                next.store.insert(digest, content);
                next.committed.insert((digest, content));
            }
        }
        next
    }

    fn invariants(&self, state: &CasState) -> Vec<Violation> {
        let mut violations = Vec::new();

        // CAS-INV-1: immutability — every committed write must match the store.
        for (digest, content) in &state.committed {
            if let Some(stored) = state.store.get(digest) {
                if stored != content {
                    violations.push(Violation::new(
                        "CAS-INV-1",
                        format!("digest {digest} mapped to '{stored}' but write has '{content}'"),
                    ));
                }
            }
        }

        // CAS-INV-2: completeness — committed writes not recorded as errors
        // must be readable from the store.
        for (digest, content) in &state.committed {
            if !state.errors.contains(&(*digest, *content))
                && state.store.get(digest) != Some(content)
            {
                violations.push(Violation::new(
                    "CAS-INV-2",
                    format!("committed write ({digest},{content}) not readable from store"),
                ));
            }
        }

        // CAS-INV-4: collision errors are accurate — an error for (d,c) means
        // d is present in the store with content other than c.
        for (digest, content) in &state.errors {
            match state.store.get(digest) {
                None => violations.push(Violation::new(
                    "CAS-INV-4",
                    format!("error for ({digest},{content}) but digest absent from store"),
                )),
                Some(stored) if stored == content => violations.push(Violation::new(
                    "CAS-INV-4",
                    format!("error for ({digest},{content}) but store holds that exact content"),
                )),
                Some(_) => {}
            }
        }

        violations
    }
}
