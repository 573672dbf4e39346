//! Plain text document, paginated with form feeds.

use forslag_core::NormalizedRecord;
use tracing::debug;

use crate::{DocumentSink, FILL_IN, TitlePage};

const PAGE_BREAK: char = '\u{0C}';
const RULE_WIDTH: usize = 64;

// Header grid column widths.
const ID_WIDTH: usize = 8;
const PROPOSER_WIDTH: usize = 32;
const LOCATION_WIDTH: usize = 12;

/// Plain text rendering of the deliberation document.
#[derive(Debug, Clone, Default)]
pub struct PlainTextDocument {
    title_page: TitlePage,
}

impl PlainTextDocument {
    pub fn new(title_page: TitlePage) -> Self {
        Self { title_page }
    }

    fn title_page(&self, title: &str) -> Vec<String> {
        let width = self
            .title_page
            .owner_label
            .chars()
            .count()
            .max(self.title_page.school_label.chars().count());
        vec![
            title.to_string(),
            String::new(),
            String::new(),
            format!("{:>width$} {FILL_IN}", self.title_page.owner_label),
            format!("{:>width$} {FILL_IN}", self.title_page.school_label),
        ]
    }
}

impl DocumentSink for PlainTextDocument {
    fn render(&self, title: &str, records: &[NormalizedRecord]) -> Vec<u8> {
        let blocks: Vec<String> = records.iter().map(|r| record_block(r).join("\n")).collect();
        debug!(records = records.len(), "rendering plain text document");

        let mut out = self.title_page(title).join("\n");
        out.push('\n');
        out.push(PAGE_BREAK);
        out.push_str(&blocks.join("\n\n"));
        if !blocks.is_empty() {
            out.push('\n');
        }
        out.into_bytes()
    }
}

fn record_block(record: &NormalizedRecord) -> Vec<String> {
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!(
            "{}{}{}[ ] For",
            cell(&record.id, ID_WIDTH),
            cell(&record.proposer_name, PROPOSER_WIDTH),
            cell("Kapittel", LOCATION_WIDTH),
        ),
        format!(
            "{}{}{}[ ] Mot",
            cell("", ID_WIDTH),
            cell(&record.school, PROPOSER_WIDTH),
            cell(&record.location, LOCATION_WIDTH),
        ),
        rule.clone(),
    ];

    if !record.change_type.is_empty() {
        lines.push(record.change_type.clone());
    }
    let mut paragraphs = record.change_paragraphs();
    match paragraphs.next() {
        Some(first) if !first.is_empty() => lines.push(format!("Endring: {first}")),
        _ => lines.push("Endring:".to_string()),
    }
    lines.extend(paragraphs.map(str::to_string));

    lines.push(rule.clone());
    lines.push(format!("Innstilt: {}", record.recommendation()));
    lines.push(rule);
    lines
}

/// Left-aligned cell, always followed by at least one space.
fn cell(text: &str, width: usize) -> String {
    let w = width.saturating_sub(1);
    format!("{text:<w$} ")
}
