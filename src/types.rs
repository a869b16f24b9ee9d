//! # Registry Records
//!
//! Plain data records stored in the registry's keyed stores. The data
//! structures themselves are generic; these are the values the election
//! registry feeds them.
//!
//! ## Record Kinds
//!
//! - [`Voter`]: a registered voter, keyed by voter id
//! - [`Candidate`]: a registered candidate, keyed by candidate id and
//!   indexed by lowercase name
//! - [`Vote`]: a cast vote with its integrity receipt, keyed by vote id
//! - [`SystemStats`]: aggregate counts across the three stores
//!
//! ## Usage Examples
//!
//! ```rust
//! use ballot_index::types::Candidate;
//! use chrono::Utc;
//!
//! let candidate = Candidate {
//!     candidate_id: "C123456ABCD".to_string(),
//!     name: "Ada Lovelace".to_string(),
//!     party: "Analytical".to_string(),
//!     registered_at: Utc::now(),
//!     votes: 0,
//! };
//!
//! assert_eq!(candidate.votes, 0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered voter
///
/// Voter ids follow the `V123ABC456DEF` shape (see
/// [`validation::is_valid_voter_id`](crate::validation::is_valid_voter_id)).
/// Emails are stored lowercased and trimmed so duplicate detection is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub voter_id: String,
    pub name: String,
    pub age: u8,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub has_voted: bool,
}

/// A registered candidate with a running vote tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub candidate_id: String,
    pub name: String,
    pub party: String,
    pub registered_at: DateTime<Utc>,
    pub votes: u64,
}

/// A cast vote
///
/// `vote_hash` is a hex Blake3 digest over `voter_id:candidate_id:timestamp`
/// used to detect tampering with the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub vote_id: String,
    pub voter_id: String,
    pub candidate_id: String,
    pub timestamp: DateTime<Utc>,
    pub vote_hash: String,
}

impl Vote {
    /// Compute the integrity receipt for a vote
    pub fn receipt(voter_id: &str, candidate_id: &str, timestamp: &DateTime<Utc>) -> String {
        let payload = format!("{}:{}:{}", voter_id, candidate_id, timestamp.to_rfc3339());
        hex::encode(blake3::hash(payload.as_bytes()).as_bytes())
    }

    /// Check that the stored receipt still matches the record's fields
    pub fn verify(&self) -> bool {
        Self::receipt(&self.voter_id, &self.candidate_id, &self.timestamp) == self.vote_hash
    }
}

/// Aggregate registry counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_voters: usize,
    pub total_candidates: usize,
    pub total_votes: usize,
    pub voted_count: usize,
    /// Percentage of registered voters who have voted, two decimals
    pub turnout_percentage: f64,
    pub pending_voters: usize,
}
