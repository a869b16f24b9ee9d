//! Election registry built on the keyed stores and the candidate prefix index
//!
//! The registry owns three [`KeyedStore`]s (voters, candidates, votes) and
//! a [`PrefixIndex`] over candidate names. Candidate records live in both
//! the candidate store and the index; every mutation updates both.
//!
//! The registry performs no I/O. [`ElectionRegistry::snapshot`] exposes the
//! `all_entries` projections for callers to persist, and
//! [`ElectionRegistry::from_snapshot`] rebuilds a registry by replaying the
//! inserts.
//!
//! It is not internally synchronized: share it behind a caller-held lock
//! such as `Arc<RwLock<ElectionRegistry>>`.

use crate::config::StoreConfig;
use crate::store::{KeyedStore, StoreStats};
use crate::trie::{PrefixIndex, PrefixStats};
use crate::types::{Candidate, SystemStats, Vote, Voter};
use crate::validation;
use crate::{Result, registry_error, validation_error};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const UPPERCASE_AND_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Serializable projection of every store in the registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub voters: HashMap<String, Voter>,
    pub candidates: HashMap<String, Candidate>,
    pub votes: HashMap<String, Vote>,
}

/// Structural statistics for every structure the registry owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub voters: StoreStats,
    pub candidates: StoreStats,
    pub votes: StoreStats,
    pub candidate_index: PrefixStats,
}

/// Voter, candidate and vote storage for one election
#[derive(Debug, Clone)]
pub struct ElectionRegistry {
    voters: KeyedStore<String, Voter>,
    candidates: KeyedStore<String, Candidate>,
    votes: KeyedStore<String, Vote>,
    candidate_index: PrefixIndex<Candidate>,
}

fn random_chars<R: Rng>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

impl ElectionRegistry {
    /// Create an empty registry with the configured table capacities
    pub fn new(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            voters: KeyedStore::new(config.voter_capacity)?,
            candidates: KeyedStore::new(config.candidate_capacity)?,
            votes: KeyedStore::new(config.vote_capacity)?,
            candidate_index: PrefixIndex::new(),
        })
    }

    /// Rebuild a registry from a snapshot by replaying every insert
    pub fn from_snapshot(config: &StoreConfig, snapshot: RegistrySnapshot) -> Result<Self> {
        let mut registry = Self::new(config)?;

        let (voters, candidates, votes) =
            (snapshot.voters.len(), snapshot.candidates.len(), snapshot.votes.len());

        registry.voters.extend(snapshot.voters);
        for (candidate_id, candidate) in snapshot.candidates {
            if registry.candidate_index.contains(&candidate.name) {
                return Err(registry_error!(
                    "snapshot holds duplicate candidate name {}",
                    candidate.name
                ));
            }
            registry
                .candidate_index
                .insert(&candidate.name, candidate.clone());
            registry.candidates.insert(candidate_id, candidate);
        }
        registry.votes.extend(snapshot.votes);

        tracing::info!(voters, candidates, votes, "📥 Registry restored from snapshot");
        Ok(registry)
    }

    /// Export every store's entries
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            voters: self.voters.all_entries(),
            candidates: self.candidates.all_entries(),
            votes: self.votes.all_entries(),
        }
    }

    fn generate_voter_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id = format!(
                "V{}{}{}{}",
                random_chars(&mut rng, DIGITS, 3),
                random_chars(&mut rng, UPPERCASE, 3),
                random_chars(&mut rng, DIGITS, 3),
                random_chars(&mut rng, UPPERCASE, 3),
            );
            if !self.voters.contains(id.as_str()) {
                return id;
            }
        }
    }

    /// Next free `VOTE_<n>`, starting after the current count
    ///
    /// Restored snapshots may have gaps in their numbering, so the count
    /// alone can point at an id that is already stored.
    fn generate_vote_id(&self) -> String {
        (self.votes.len() + 1..)
            .map(|n| format!("VOTE_{}", n))
            .find(|id| !self.votes.contains(id.as_str()))
            .unwrap_or_default()
    }

    fn generate_candidate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        let timestamp = Utc::now().timestamp().rem_euclid(1_000_000);
        loop {
            let id = format!(
                "C{:06}{}",
                timestamp,
                random_chars(&mut rng, UPPERCASE_AND_DIGITS, 4)
            );
            if !self.candidates.contains(id.as_str()) {
                return id;
            }
        }
    }

    /// Register a voter and return the stored record
    ///
    /// Emails are compared case-insensitively; a second registration with
    /// the same address is rejected.
    pub fn register_voter(&mut self, name: &str, age: u32, email: &str) -> Result<Voter> {
        validation::validate_voter(name, age, email)?;

        let email = email.trim().to_lowercase();
        if self.voters.iter().any(|(_, voter)| voter.email == email) {
            return Err(registry_error!("email {} is already registered", email));
        }

        let voter = Voter {
            voter_id: self.generate_voter_id(),
            name: validation::sanitize(name),
            age: u8::try_from(age).map_err(|_| validation_error!("age out of range"))?,
            email,
            registered_at: Utc::now(),
            has_voted: false,
        };

        self.voters.insert(voter.voter_id.clone(), voter.clone());
        tracing::info!(voter_id = %voter.voter_id, "🧾 Voter registered");
        Ok(voter)
    }

    /// Register a candidate in both the candidate store and the name index
    pub fn register_candidate(&mut self, name: &str, party: &str) -> Result<Candidate> {
        validation::validate_candidate(name, party)?;

        let name = validation::sanitize(name);
        if self.candidate_index.contains(&name) {
            return Err(registry_error!("candidate {} is already registered", name));
        }

        let candidate = Candidate {
            candidate_id: self.generate_candidate_id(),
            name,
            party: validation::sanitize(party),
            registered_at: Utc::now(),
            votes: 0,
        };

        self.candidates
            .insert(candidate.candidate_id.clone(), candidate.clone());
        self.candidate_index
            .insert(&candidate.name, candidate.clone());

        tracing::info!(
            candidate_id = %candidate.candidate_id,
            name = %candidate.name,
            "🎯 Candidate registered"
        );
        Ok(candidate)
    }

    /// Record a vote, mark the voter and bump the candidate's tally
    pub fn cast_vote(&mut self, voter_id: &str, candidate_id: &str) -> Result<Vote> {
        let voter = self
            .voters
            .get(voter_id)
            .ok_or_else(|| registry_error!("unknown voter {}", voter_id))?;
        if voter.has_voted {
            return Err(registry_error!("voter {} has already voted", voter_id));
        }
        if !self.candidates.contains(candidate_id) {
            return Err(registry_error!("unknown candidate {}", candidate_id));
        }

        let timestamp = Utc::now();
        let vote = Vote {
            vote_id: self.generate_vote_id(),
            voter_id: voter_id.to_string(),
            candidate_id: candidate_id.to_string(),
            vote_hash: Vote::receipt(voter_id, candidate_id, &timestamp),
            timestamp,
        };
        self.votes.insert(vote.vote_id.clone(), vote.clone());

        if let Some(voter) = self.voters.get_mut(voter_id) {
            voter.has_voted = true;
        }
        if let Some(candidate) = self.candidates.get_mut(candidate_id) {
            candidate.votes += 1;
            self.candidate_index
                .insert(&candidate.name, candidate.clone());
        }

        tracing::info!(vote_id = %vote.vote_id, "🗳️  Vote recorded");
        Ok(vote)
    }

    /// Recompute a stored vote's receipt; `None` if the vote does not exist
    pub fn verify_vote(&self, vote_id: &str) -> Option<bool> {
        self.votes.get(vote_id).map(Vote::verify)
    }

    pub fn voter(&self, voter_id: &str) -> Option<&Voter> {
        self.voters.get(voter_id)
    }

    pub fn candidate(&self, candidate_id: &str) -> Option<&Candidate> {
        self.candidates.get(candidate_id)
    }

    pub fn vote(&self, vote_id: &str) -> Option<&Vote> {
        self.votes.get(vote_id)
    }

    /// Candidates whose name starts with `prefix`, case-insensitively
    pub fn search_candidates(&self, prefix: &str) -> Vec<&Candidate> {
        self.candidate_index
            .starts_with(prefix)
            .into_iter()
            .map(|hit| hit.value)
            .collect()
    }

    /// Voters whose name or email contains `term`, case-insensitively, by id
    pub fn find_voters(&self, term: &str) -> Vec<&Voter> {
        let term = term.to_lowercase();
        let mut found: Vec<_> = self
            .voters
            .iter()
            .map(|(_, voter)| voter)
            .filter(|voter| voter.name.to_lowercase().contains(&term) || voter.email.contains(&term))
            .collect();
        found.sort_by(|a, b| a.voter_id.cmp(&b.voter_id));
        found
    }

    /// All candidates by descending vote count, ties broken by id
    pub fn leaderboard(&self) -> Vec<&Candidate> {
        let mut ranked: Vec<_> = self.candidates.iter().map(|(_, c)| c).collect();
        ranked.sort_by(|a, b| {
            b.votes
                .cmp(&a.votes)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });
        ranked
    }

    pub fn top_candidates(&self, n: usize) -> Vec<&Candidate> {
        let mut ranked = self.leaderboard();
        ranked.truncate(n);
        ranked
    }

    /// Leading candidate, if any vote has been cast
    pub fn winner(&self) -> Option<&Candidate> {
        self.leaderboard().into_iter().next().filter(|c| c.votes > 0)
    }

    /// Percentage of all votes held by a candidate
    pub fn vote_share(&self, candidate_id: &str) -> Option<f64> {
        self.candidates
            .get(candidate_id)
            .map(|c| validation::vote_percentage(c.votes, self.votes.len() as u64))
    }

    pub fn system_stats(&self) -> SystemStats {
        let total_voters = self.voters.len();
        let voted_count = self
            .voters
            .iter()
            .filter(|(_, voter)| voter.has_voted)
            .count();

        SystemStats {
            total_voters,
            total_candidates: self.candidates.len(),
            total_votes: self.votes.len(),
            voted_count,
            turnout_percentage: validation::turnout_percentage(total_voters, voted_count),
            pending_voters: total_voters - voted_count,
        }
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            voters: self.voters.stats(),
            candidates: self.candidates.stats(),
            votes: self.votes.stats(),
            candidate_index: self.candidate_index.stats(),
        }
    }
}
