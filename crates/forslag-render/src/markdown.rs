//! Markdown document: one `##` section per proposal.

use forslag_core::NormalizedRecord;
use tracing::debug;

use crate::{DocumentSink, FILL_IN, TitlePage};

#[derive(Debug, Clone, Default)]
pub struct MarkdownDocument {
    title_page: TitlePage,
}

impl MarkdownDocument {
    pub fn new(title_page: TitlePage) -> Self {
        Self { title_page }
    }
}

impl DocumentSink for MarkdownDocument {
    fn render(&self, title: &str, records: &[NormalizedRecord]) -> Vec<u8> {
        debug!(records = records.len(), "rendering markdown document");

        let mut sections = vec![
            format!("# {}", escape(title)),
            format!("**{}** {}", escape(&self.title_page.owner_label), escape(FILL_IN)),
            format!("**{}** {}", escape(&self.title_page.school_label), escape(FILL_IN)),
            "---".to_string(),
        ];
        sections.extend(records.iter().map(record_section));

        let mut out = sections.join("\n\n");
        out.push('\n');
        out.into_bytes()
    }
}

fn record_section(record: &NormalizedRecord) -> String {
    let mut parts = vec![
        format!("## {}", escape(&record.id)),
        format!("{}  \n{}", escape(&record.proposer_name), escape(&record.school)),
        format!("Kapittel {}", escape(&record.location)),
        "- [ ] For\n- [ ] Mot".to_string(),
    ];
    if !record.change_type.is_empty() {
        parts.push(format!("*{}*", escape(&record.change_type)));
    }

    let mut paragraphs = record.change_paragraphs().filter(|p| !p.trim().is_empty());
    match paragraphs.next() {
        Some(first) => parts.push(format!("**Endring:** {}", escape(first))),
        None => parts.push("**Endring:**".to_string()),
    }
    parts.extend(paragraphs.map(escape));

    parts.push(format!("Innstilt: **{}**", escape(&record.recommendation())));
    parts.join("\n\n")
}

/// Backslash-escape characters Markdown would otherwise interpret inline.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>' | '#' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
