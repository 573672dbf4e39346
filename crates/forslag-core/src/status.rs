//! Closed set of decision outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome category of a proposal after committee deliberation.
///
/// Persisted as `"<code> - <label>"` (e.g. `"V - Innstilt vedtatt"`). Parsing
/// reads only the first whitespace-delimited token, so the bare code is
/// accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusCode {
    /// The proposal was not dealt with on its merits.
    NotAddressed,
    Adopted,
    Rejected,
    /// Rejected because a competing proposal was recommended instead.
    RejectedInFavorOf,
    /// The concern is already covered by the current text.
    Preserved,
    /// No actionable proposal was put forward. Also the classifier fallback.
    NoProposal,
    /// Referred onward to the national board.
    Forwarded,
    /// Legacy `IF` code: no proposal, with the long-form tally.
    NoProposalItemised,
    /// A stored code outside this set. Never produced by classification;
    /// kept so a hand-edited table still shows the proposal.
    Unrecognized,
}

impl StatusCode {
    /// Every status that has a persisted code.
    pub const ALL: [StatusCode; 8] = [
        Self::NotAddressed,
        Self::Adopted,
        Self::Rejected,
        Self::RejectedInFavorOf,
        Self::Preserved,
        Self::NoProposal,
        Self::Forwarded,
        Self::NoProposalItemised,
    ];

    /// Short code used in the persisted table.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::NotAddressed => "IRH",
            Self::Adopted => "V",
            Self::Rejected => "A",
            Self::RejectedInFavorOf => "AF",
            Self::Preserved => "I",
            Self::NoProposal => "IFV",
            Self::Forwarded => "O",
            Self::NoProposalItemised => "IF",
            Self::Unrecognized => "?",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotAddressed => "Ikke realitetsbehandlet",
            Self::Adopted => "Innstilt vedtatt",
            Self::Rejected => "Innstilt avvist",
            Self::RejectedInFavorOf => "Innstilt avvist til fordel for",
            Self::Preserved => "Ivaretatt",
            Self::NoProposal => "Ingen forslag til vedtak",
            Self::Forwarded => "Oversendt til Landsstyret",
            Self::NoProposalItemised => "Ingen forslag til vedtak",
            Self::Unrecognized => "Ukjent status",
        }
    }

    /// Whether a vote tally is extracted and displayed for this outcome.
    pub fn carries_votes(&self) -> bool {
        !matches!(self, Self::NotAddressed | Self::Preserved | Self::Unrecognized)
    }

    /// Parse a persisted status value. Only the first token is significant.
    ///
    /// `AV` is accepted as an alias of `AF`. [`StatusCode::Unrecognized`] is
    /// never returned; callers decide what an unknown code means.
    pub fn from_code(s: &str) -> Option<Self> {
        let token = s.split_whitespace().next()?;
        match token {
            "IRH" => Some(Self::NotAddressed),
            "V" => Some(Self::Adopted),
            "A" => Some(Self::Rejected),
            "AF" | "AV" => Some(Self::RejectedInFavorOf),
            "I" => Some(Self::Preserved),
            "IFV" => Some(Self::NoProposal),
            "O" => Some(Self::Forwarded),
            "IF" => Some(Self::NoProposalItemised),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.as_code(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code: {0:?}")]
pub struct UnknownStatusCode(pub String);

impl FromStr for StatusCode {
    type Err = UnknownStatusCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownStatusCode(s.to_string()))
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_from_code() {
        for status in StatusCode::ALL {
            let persisted = status.to_string();
            assert_eq!(StatusCode::from_code(&persisted), Some(status), "{persisted}");
        }
    }

    #[test]
    fn bare_codes_parse() {
        assert_eq!(StatusCode::from_code("V"), Some(StatusCode::Adopted));
        assert_eq!(StatusCode::from_code("  IRH  "), Some(StatusCode::NotAddressed));
        assert_eq!(StatusCode::from_code("IFV - whatever"), Some(StatusCode::NoProposal));
    }

    #[test]
    fn legacy_av_alias() {
        assert_eq!(
            StatusCode::from_code("AV - Innstilt avvist til fordel for"),
            Some(StatusCode::RejectedInFavorOf)
        );
    }

    #[test]
    fn unknown_codes_rejected() {
        assert_eq!(StatusCode::from_code(""), None);
        assert_eq!(StatusCode::from_code("X - nope"), None);
        assert!("v".parse::<StatusCode>().is_err());
    }

    #[test]
    fn legacy_if_code() {
        assert_eq!(
            StatusCode::from_code("IF - Ingen forslag"),
            Some(StatusCode::NoProposalItemised)
        );
        assert_eq!(StatusCode::NoProposalItemised.to_string(), "IF - Ingen forslag til vedtak");
    }

    #[test]
    fn unrecognized_stays_unrecognized() {
        assert!(!StatusCode::ALL.contains(&StatusCode::Unrecognized));
        let persisted = StatusCode::Unrecognized.to_string();
        assert_eq!(StatusCode::from_code(&persisted), None);
        assert!(!StatusCode::Unrecognized.carries_votes());
    }

    #[test]
    fn vote_bearing_statuses() {
        assert!(!StatusCode::NotAddressed.carries_votes());
        assert!(!StatusCode::Preserved.carries_votes());
        assert!(StatusCode::Adopted.carries_votes());
        assert!(StatusCode::NoProposal.carries_votes());
    }

    #[test]
    fn serde_uses_short_code() {
        let json = serde_json::to_string(&StatusCode::RejectedInFavorOf).unwrap();
        assert_eq!(json, "\"AF\"");
        let parsed: StatusCode = serde_json::from_str("\"I\"").unwrap();
        assert_eq!(parsed, StatusCode::Preserved);
    }
}
