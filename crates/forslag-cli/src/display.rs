//! Vertical card display for normalized proposal records.

use std::collections::BTreeMap;

use forslag_core::{NormalizedRecord, StatusCode};

use crate::pipeline::NormalizeStats;

const LABEL_WIDTH: usize = 18;

// ── Public API ──

/// Print a single record as a card grouped into sections.
pub fn print_record_card(record: &NormalizedRecord) {
    println!("=== {} ===", record.id);
    println!("{}", record.recommendation());
    println!();

    print_section(
        "Proposer",
        &[
            ("name", record.proposer_name.as_str()),
            ("school", record.school.as_str()),
        ],
    );
    print_section(
        "Change",
        &[
            ("change_type", record.change_type.as_str()),
            ("location", record.location.as_str()),
        ],
    );
    print_paragraphs(record);

    let status = record.status.to_string();
    let votes = record.votes.compact();
    let mut decision = vec![("status", status.as_str())];
    if record.status.carries_votes() {
        decision.push(("votes", votes.as_str()));
    }
    if let Some(label) = &record.alternative_label {
        decision.push(("alternative_label", label.as_str()));
    }
    print_section("Decision", &decision);
}

/// Print records per status, in status order.
pub fn print_status_summary(counts: &BTreeMap<StatusCode, usize>) {
    println!("Status");
    for (status, count) in counts {
        println!("  {:<5} {:<32} {:>5}", status.as_code(), status.label(), count);
    }
    let total: usize = counts.values().sum();
    println!("  {:<38} {:>5}", "total", total);
}

pub fn print_normalize_stats(stats: &NormalizeStats) {
    println!(
        "Normalized {} of {} rows in {:.2}s ({} skipped, {} blank decisions, {} unmatched)",
        stats.written,
        stats.rows,
        stats.elapsed_secs,
        stats.skipped,
        stats.blank_decisions,
        stats.fallbacks
    );
    println!();
    print_status_summary(&stats.counts);
}

// ── Section rendering ──

fn print_section(header: &str, fields: &[(&str, &str)]) {
    if fields.iter().all(|(_, v)| v.is_empty()) {
        return;
    }
    println!("{header}");
    for (name, value) in fields {
        if !value.is_empty() {
            println!("  {name:<LABEL_WIDTH$} {value}");
        }
    }
    println!();
}

fn print_paragraphs(record: &NormalizedRecord) {
    let paragraphs: Vec<&str> = record.change_paragraphs().collect();
    if paragraphs.iter().all(|p| p.is_empty()) {
        return;
    }
    println!("Change text");
    for p in paragraphs {
        println!("  {p}");
    }
    println!();
}
