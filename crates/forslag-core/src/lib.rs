pub mod alternative;
pub mod classify;
pub mod config;
pub mod normalize;
pub mod recommendation;
pub mod record;
pub mod schema;
pub mod status;
pub mod votes;

pub use alternative::extract_alternative;
pub use classify::{Classification, Classifier, Decision, MarkerRule, Origin, classify, decide};
pub use config::{ClassifierConfig, ColumnMap, Config, ConfigError, DocumentConfig, RuleConfig};
pub use normalize::{NormalizeReport, RowError, count_by_status, normalize_row, normalize_rows};
pub use record::{NormalizedRecord, RawProposalRow};
pub use schema::normalized;
pub use status::StatusCode;
pub use votes::{VoteTally, extract_votes, parse_tally};
