//! Recommendation sentences shown under each proposal in the printed document.

use crate::status::StatusCode;
use crate::votes::VoteTally;

/// Shown in place of a missing alternative label.
pub const UNKNOWN_ALTERNATIVE: &str = "?";

/// Render the recommendation sentence for a status.
///
/// Vote-bearing statuses end with the compact tally `(for-against-abstain)`,
/// except the legacy `IF` code which spells the tally out. `NotAddressed`
/// and `Preserved` are fixed text; an unrecognized status renders empty.
pub fn render(status: StatusCode, votes: &VoteTally, alternative: Option<&str>) -> String {
    let tally = votes.compact();
    match status {
        StatusCode::Rejected => format!("Innstilt avvist {tally}"),
        StatusCode::RejectedInFavorOf => {
            let alt = alternative.unwrap_or(UNKNOWN_ALTERNATIVE);
            format!("Innstilt avvist til fordel for {alt} {tally}")
        }
        StatusCode::Adopted => format!("Innstilt vedtatt {tally}"),
        StatusCode::NoProposal => format!("Ingen forslag til vedtak {tally}"),
        StatusCode::NoProposalItemised => {
            format!("Ingen forslag til vedtak {}", votes.itemised())
        }
        StatusCode::Forwarded => format!("Oversendt til Landsstyret {tally}"),
        StatusCode::NotAddressed => "Ikke realitetsbehandlet".to_string(),
        StatusCode::Preserved => "Ivaretatt".to_string(),
        StatusCode::Unrecognized => String::new(),
    }
}
