//! Vote tally extraction from decision text.
//!
//! Committee recommendations end with the tally that produced them, e.g.
//! "Innstilt vedtatt (10-0-0)" or "avvist til fordel for F12 (3-2-1)".
//! The tally is read from the *end* of the sentence: the last three numbers
//! are taken to be (for, against, abstain).
//!
//! # Known fragility
//!
//! Any number that follows the tally, or a tally with fewer than three parts
//! preceded by some other number, is read as part of the tally. "F12 (3-2)"
//! yields (12, 3, 2). The heuristic is kept as-is: display code depends on
//! exactly three slots.

use serde::{Deserialize, Serialize};

/// The (for, against, abstain) triple recorded for a voted-on proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteTally {
    pub votes_for: u32,
    pub against: u32,
    pub abstain: u32,
}

impl VoteTally {
    pub const fn new(votes_for: u32, against: u32, abstain: u32) -> Self {
        Self {
            votes_for,
            against,
            abstain,
        }
    }

    /// Compact form used in recommendation text: `(3-2-1)`.
    pub fn compact(&self) -> String {
        format!("({}-{}-{})", self.votes_for, self.against, self.abstain)
    }

    /// Long form: `(3 for, 2 mot, 1 avholdende)`.
    pub fn itemised(&self) -> String {
        format!(
            "({} for, {} mot, {} avholdende)",
            self.votes_for, self.against, self.abstain
        )
    }
}

/// Parse the trailing vote tally out of a decision text.
///
/// Returns `None` when the text contains no digits at all.
///
/// # Algorithm
///
/// 1. Scan characters from the last toward the first.
/// 2. Every maximal run of ASCII digits is one count; non-digits are skipped.
/// 3. Stop once three counts are collected.
/// 4. Reverse the collected counts into reading order.
/// 5. Right-justify into (for, against, abstain): with fewer than three
///    counts the *leading* slots stay 0, so "vedtatt 7" is (0, 0, 7).
///
/// Counts too large for `u32` saturate.
pub fn parse_tally(text: &str) -> Option<VoteTally> {
    let mut counts: Vec<u32> = Vec::with_capacity(3);
    let mut chars = text.chars().rev().peekable();

    while counts.len() < 3 {
        // Skip to the next digit (from the right).
        while chars.next_if(|c| !c.is_ascii_digit()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        // Consume the run; digits arrive least significant first.
        let mut value: u32 = 0;
        let mut place: u32 = 1;
        let mut place_overflowed = false;
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            let digit = c.to_digit(10).unwrap_or(0);
            if digit != 0 {
                value = if place_overflowed {
                    u32::MAX
                } else {
                    value.saturating_add(digit.saturating_mul(place))
                };
            }
            match place.checked_mul(10) {
                Some(p) => place = p,
                None => place_overflowed = true,
            }
        }
        counts.push(value);
    }

    if counts.is_empty() {
        return None;
    }

    counts.reverse();
    let mut slots = [0u32; 3];
    let offset = 3 - counts.len();
    for (i, count) in counts.into_iter().enumerate() {
        slots[offset + i] = count;
    }
    Some(VoteTally::new(slots[0], slots[1], slots[2]))
}

/// [`parse_tally`] with absent counts defaulted to zero.
pub fn extract_votes(text: &str) -> VoteTally {
    parse_tally(text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(text: &str) -> (u32, u32, u32) {
        let t = extract_votes(text);
        (t.votes_for, t.against, t.abstain)
    }

    #[test]
    fn full_tally_in_parentheses() {
        assert_eq!(votes("Innstilt vedtatt (3-2-1)"), (3, 2, 1));
    }

    #[test]
    fn multi_digit_counts() {
        assert_eq!(votes("Innstilt vedtatt (10-0-0)"), (10, 0, 0));
        assert_eq!(votes("Innstilt avvist (12-105-7)"), (12, 105, 7));
    }

    #[test]
    fn no_digits_is_none() {
        assert_eq!(parse_tally("Innstilt vedtatt"), None);
        assert_eq!(votes("Innstilt vedtatt"), (0, 0, 0));
        assert_eq!(votes(""), (0, 0, 0));
    }

    #[test]
    fn single_digit_right_justified() {
        assert_eq!(votes("vedtatt 7"), (0, 0, 7));
    }

    #[test]
    fn two_counts_right_justified() {
        assert_eq!(votes("vedtatt 4-1"), (0, 4, 1));
    }

    #[test]
    fn only_last_three_counts_used() {
        assert_eq!(votes("avvist til fordel for F12 (3-2-1)"), (3, 2, 1));
        assert_eq!(votes("9 8 7 6 5"), (7, 6, 5));
    }

    #[test]
    fn trailing_number_corrupts_tally() {
        // Documented fragility: a reference after the tally shifts the slots.
        assert_eq!(votes("vedtatt (3-2-1) se punkt 4"), (2, 1, 4));
    }

    #[test]
    fn adjacent_digits_form_one_count() {
        assert_eq!(votes("(321)"), (0, 0, 321));
    }

    #[test]
    fn huge_count_saturates() {
        assert_eq!(votes("(99999999999-1-1)"), (u32::MAX, 1, 1));
    }

    #[test]
    fn non_ascii_text_is_skipped() {
        assert_eq!(votes("Innstilt vedtatt – enstemmig (5–0–0)"), (5, 0, 0));
    }

    #[test]
    fn compact_and_itemised_forms() {
        let t = VoteTally::new(3, 2, 1);
        assert_eq!(t.compact(), "(3-2-1)");
        assert_eq!(t.itemised(), "(3 for, 2 mot, 1 avholdende)");
    }

    #[test]
    fn reextracting_compact_form_is_stable() {
        let t = VoteTally::new(14, 0, 3);
        let sentence = format!("Innstilt vedtatt {}", t.compact());
        assert_eq!(extract_votes(&sentence), t);
    }
}
