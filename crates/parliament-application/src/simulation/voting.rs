//! Simulated one-shot vote.

use parliament_core::persona::PersonaCatalog;
use parliament_core::tally::{Vote, VoteTally};
use rand::Rng;

/// Every member casts an independent vote, aye with probability `aye_odds`.
///
/// `aye_odds` must already be within `0.0..=1.0`.
pub fn cast_votes<R>(catalog: &PersonaCatalog, aye_odds: f64, rng: &mut R) -> VoteTally
where
    R: Rng + ?Sized,
{
    VoteTally::from_votes(catalog.iter().map(|persona| {
        let vote = if rng.gen_bool(aye_odds) {
            Vote::Aye
        } else {
            Vote::Nay
        };
        (persona.name.clone(), vote)
    }))
}
