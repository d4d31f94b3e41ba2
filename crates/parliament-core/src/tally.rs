//! One-shot vote tallies.

use serde::{Deserialize, Serialize};
use strum::Display;

/// A binary vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Vote {
    Aye,
    Nay,
}

/// A single recorded ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: String,
    pub vote: Vote,
}

/// The outcome of a single vote, keyed by voter name in seating order.
///
/// A tally is built once and then only read; it exposes no way to change
/// a ballot or add a voter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    ballots: Vec<Ballot>,
}

impl VoteTally {
    /// Records the given ballots, keeping their order.
    pub fn from_votes<I, S>(votes: I) -> Self
    where
        I: IntoIterator<Item = (S, Vote)>,
        S: Into<String>,
    {
        Self {
            ballots: votes
                .into_iter()
                .map(|(voter, vote)| Ballot {
                    voter: voter.into(),
                    vote,
                })
                .collect(),
        }
    }

    pub fn ayes(&self) -> usize {
        self.count(Vote::Aye)
    }

    pub fn nays(&self) -> usize {
        self.count(Vote::Nay)
    }

    pub fn total(&self) -> usize {
        self.ballots.len()
    }

    /// The vote cast by `voter`, if they voted.
    pub fn get(&self, voter: &str) -> Option<Vote> {
        self.ballots
            .iter()
            .find(|b| b.voter == voter)
            .map(|b| b.vote)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ballot> {
        self.ballots.iter()
    }

    /// Whether the ayes have it. A tie fails.
    pub fn carried(&self) -> bool {
        self.ayes() > self.nays()
    }

    /// e.g. "7 ayes, 4 nays"
    pub fn summary(&self) -> String {
        format!("{} ayes, {} nays", self.ayes(), self.nays())
    }

    fn count(&self, vote: Vote) -> usize {
        self.ballots.iter().filter(|b| b.vote == vote).count()
    }
}
