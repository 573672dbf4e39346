//! Normalize and render stages, wired to files.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use forslag_core::{Classifier, Config, StatusCode, normalize_rows};
use forslag_render::{DocumentFormat, TitlePage};

pub struct NormalizeStats {
    pub rows: usize,
    pub written: usize,
    pub skipped: usize,
    pub blank_decisions: usize,
    pub fallbacks: usize,
    pub counts: BTreeMap<StatusCode, usize>,
    pub elapsed_secs: f64,
}

pub struct RenderStats {
    pub records: usize,
    pub skipped: usize,
    pub unrecognized: usize,
    pub bytes: usize,
}

/// Raw export → normalized table.
pub fn run_normalize(input: &Path, table: &Path, config: &Config) -> anyhow::Result<NormalizeStats> {
    let start = Instant::now();
    let classifier =
        Classifier::from_config(&config.classifier).context("building classifier from config")?;

    let rows = forslag_store::read_raw_rows(input, &config.columns)
        .with_context(|| format!("reading raw export {}", input.display()))?;
    let report = normalize_rows(&rows, &classifier);

    forslag_store::write_records(table, &report.records)
        .with_context(|| format!("writing normalized table {}", table.display()))?;

    Ok(NormalizeStats {
        rows: rows.len(),
        written: report.records.len(),
        skipped: report.skipped.len(),
        blank_decisions: report.blank_decisions,
        fallbacks: report.fallbacks,
        counts: report.counts(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

/// Normalized table → document. `output` of `-` writes to stdout.
pub fn run_render(
    table: &Path,
    output: &Path,
    title: &str,
    format: DocumentFormat,
    config: &Config,
) -> anyhow::Result<RenderStats> {
    let read = forslag_store::read_records(table)
        .with_context(|| format!("reading normalized table {}", table.display()))?;

    let sink = format.sink(TitlePage::from(&config.document));
    let bytes = sink.render(title, &read.records);

    if output == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes).context("writing document to stdout")?;
        stdout.flush()?;
    } else {
        std::fs::write(output, &bytes)
            .with_context(|| format!("writing document {}", output.display()))?;
    }
    tracing::info!(records = read.records.len(), %format, "rendered document");

    Ok(RenderStats {
        records: read.records.len(),
        skipped: read.skipped.len(),
        unrecognized: read.unrecognized.len(),
        bytes: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Auto Merge Field,Navn,Skole,Type endring,Punkt,Endring ,Innstilling
F1,Kari,Oslo,Endring,2.1,Stryk ledd 2.,Innstilt vedtatt (10-0-0)
F2,Ola,Bergen,Tillegg,3,Legg til punkt,Innstilt avvist til fordel for Fellesforslaget (3-2-1)
F3,Per,Tromsø,Stryking,4,Stryk,Ikke realitetsbehandlet
,Anne,Bodø,Endring,5,Tekst,vedtatt
F5,Siri,Hamar,Endring,6,Tekst,
";

    fn export(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("export.csv");
        std::fs::write(&path, EXPORT).unwrap();
        path
    }

    #[test]
    fn normalize_writes_table_and_counts() {
        let tmp = tempfile::TempDir::new().unwrap();
        let table = tmp.path().join("table.parquet");
        let stats = run_normalize(&export(tmp.path()), &table, &Config::default()).unwrap();

        assert_eq!(stats.rows, 5);
        assert_eq!(stats.written, 4);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.blank_decisions, 1);
        assert_eq!(stats.counts.get(&StatusCode::Adopted), Some(&1));
        assert_eq!(stats.counts.get(&StatusCode::RejectedInFavorOf), Some(&1));
        assert_eq!(stats.counts.get(&StatusCode::NotAddressed), Some(&1));
        assert_eq!(stats.counts.get(&StatusCode::NoProposal), Some(&1));

        let read = forslag_store::read_records(&table).unwrap();
        let ids: Vec<&str> = read.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["F1", "F2", "F3", "F5"]);
    }

    #[test]
    fn convert_renders_from_stored_table() {
        let tmp = tempfile::TempDir::new().unwrap();
        let table = tmp.path().join("table.arrow");
        let doc = tmp.path().join("doc.txt");
        let config = Config::default();

        run_normalize(&export(tmp.path()), &table, &config).unwrap();
        let stats = run_render(&table, &doc, "Innstilling", DocumentFormat::Text, &config).unwrap();
        assert_eq!(stats.records, 4);
        assert_eq!(stats.skipped, 0);

        let text = std::fs::read_to_string(&doc).unwrap();
        assert_eq!(text.len(), stats.bytes);
        assert!(text.starts_with("Innstilling\n"));
        assert!(text.contains("Innstilt: Innstilt vedtatt (10-0-0)"));
        assert!(text.contains("Innstilt: Innstilt avvist til fordel for Fellesforslaget (3-2-1)"));
        assert!(text.contains("Innstilt: Ikke realitetsbehandlet"));
        assert!(text.contains("Innstilt: Ingen forslag til vedtak (0-0-0)"));
    }

    #[test]
    fn legacy_and_unknown_codes_stay_in_document() {
        let tmp = tempfile::TempDir::new().unwrap();
        let table = tmp.path().join("edited.csv");
        let doc = tmp.path().join("doc.txt");
        std::fs::write(
            &table,
            "id,name,school,change_type,location,change_text,status_code,votes_for,votes_against,votes_abstain,alternative_label\n\
             F1,Kari,Oslo,Endring,1,Tekst,IF - Ingen forslag,3,2,1,\n\
             F2,Ola,Bergen,Endring,2,Tekst,ZZ,1,1,1,\n",
        )
        .unwrap();

        let stats =
            run_render(&table, &doc, "Innstilling", DocumentFormat::Text, &Config::default()).unwrap();
        assert_eq!(stats.records, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.unrecognized, 1);

        let text = std::fs::read_to_string(&doc).unwrap();
        assert!(text.contains("Innstilt: Ingen forslag til vedtak (3 for, 2 mot, 1 avholdende)"));
        assert!(text.contains("\nF2      Ola"));
        assert!(text.lines().any(|l| l == "Innstilt: "));
    }

    #[test]
    fn ragged_export_still_normalizes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("export.csv");
        std::fs::write(
            &input,
            "Auto Merge Field,Navn,Skole,Type endring,Punkt,Endring,Innstilling,Kommentar\n\
             F1,Kari,Oslo,Endring,1,Tekst,Innstilt vedtatt (10-0-0),ok\n\
             F2,Ola,Bergen,Endring,2,Tekst,Innstilt avvist (1-2-3)\n",
        )
        .unwrap();
        let table = tmp.path().join("table.parquet");

        let stats = run_normalize(&input, &table, &Config::default()).unwrap();
        assert_eq!(stats.written, 2);
        assert_eq!(stats.counts.get(&StatusCode::Rejected), Some(&1));
    }

    #[test]
    fn configured_columns() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("export.csv");
        std::fs::write(&input, "Nr,Vedtak\nF1,Ivaretatt\n").unwrap();
        let table = tmp.path().join("table.csv");

        let mut config = Config::default();
        config.columns.id = "Nr".into();
        config.columns.decision = "Vedtak".into();

        let stats = run_normalize(&input, &table, &config).unwrap();
        assert_eq!(stats.written, 1);
        assert_eq!(stats.counts.get(&StatusCode::Preserved), Some(&1));
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let table = tmp.path().join("table.parquet");
        let missing = tmp.path().join("missing.csv");
        assert!(run_normalize(&missing, &table, &Config::default()).is_err());

        let xlsx = tmp.path().join("export.xlsx");
        std::fs::write(&xlsx, "").unwrap();
        assert!(run_normalize(&xlsx, &table, &Config::default()).is_err());
    }
}
