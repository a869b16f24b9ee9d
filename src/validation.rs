//! Input validation and tally arithmetic for registry records

use crate::{Result, validation_error};

/// Minimum voting age
pub const MIN_AGE: u32 = 18;
/// Maximum plausible age accepted at registration
pub const MAX_AGE: u32 = 120;
/// Sanitized strings are cut to this many characters
pub const MAX_INPUT_LEN: usize = 200;

const STRIPPED_CHARS: [char; 7] = ['<', '>', '{', '}', ';', '\\', '|'];

/// Non-empty and made only of letters and spaces
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphabetic() || c.is_whitespace())
}

/// `local@domain.tld` with a tld of at least two ASCII letters
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}

pub fn is_valid_age(age: u32) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age)
}

/// `V` + 3 digits + 3 uppercase + 3 digits + 3 uppercase, e.g. `V123ABC456DEF`
pub fn is_valid_voter_id(voter_id: &str) -> bool {
    let bytes = voter_id.as_bytes();
    if bytes.len() != 13 || bytes[0] != b'V' {
        return false;
    }

    bytes[1..].chunks(3).enumerate().all(|(i, group)| {
        if i % 2 == 0 {
            group.iter().all(u8::is_ascii_digit)
        } else {
            group.iter().all(u8::is_ascii_uppercase)
        }
    })
}

/// Starts with `C` and is at least five characters long
pub fn is_valid_candidate_id(candidate_id: &str) -> bool {
    candidate_id.starts_with('C') && candidate_id.chars().count() >= 5
}

/// Trim, drop markup and shell metacharacters, and cap the length
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .chars()
        .take(MAX_INPUT_LEN)
        .collect()
}

/// Validate the fields of a voter registration
pub fn validate_voter(name: &str, age: u32, email: &str) -> Result<()> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(validation_error!("name and email are required"));
    }
    if !is_valid_name(name.trim()) {
        return Err(validation_error!("name must contain only letters and spaces"));
    }
    if !is_valid_email(email.trim()) {
        return Err(validation_error!("invalid email format: {}", email));
    }
    if !is_valid_age(age) {
        return Err(validation_error!(
            "age must be between {} and {}",
            MIN_AGE,
            MAX_AGE
        ));
    }
    Ok(())
}

/// Validate the fields of a candidate registration
pub fn validate_candidate(name: &str, party: &str) -> Result<()> {
    if name.trim().is_empty() || party.trim().is_empty() {
        return Err(validation_error!("name and party are required"));
    }
    if !is_valid_name(name.trim()) {
        return Err(validation_error!("name must contain only letters and spaces"));
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of registered voters who voted, as a percentage
pub fn turnout_percentage(total_voters: usize, voted: usize) -> f64 {
    if total_voters == 0 {
        return 0.0;
    }
    round2(voted as f64 / total_voters as f64 * 100.0)
}

/// Share of all votes received by one candidate, as a percentage
pub fn vote_percentage(candidate_votes: u64, total_votes: u64) -> f64 {
    if total_votes == 0 {
        return 0.0;
    }
    round2(candidate_votes as f64 / total_votes as f64 * 100.0)
}
