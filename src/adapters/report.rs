use crate::domain::model::ScanReport;
use crate::utils::error::{Result, ScanError};
use serde::Serialize;

pub const JSON_REPORT: &str = "prices.json";
pub const CSV_REPORT: &str = "prices.csv";

#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    url: &'a str,
    offers_found: usize,
    min_any: Option<f64>,
    min_zero: Option<f64>,
    min_day_one: Option<f64>,
    display_any: &'a str,
    display_zero: &'a str,
    display_day_one: &'a str,
    error: Option<&'a str>,
}

/// Serialises a scan report into the requested output formats.
pub struct ReportWriter;

impl ReportWriter {
    pub fn to_json(report: &ScanReport) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(report)?)
    }

    pub fn to_csv(report: &ScanReport) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for card in &report.cards {
            writer.serialize(CsvRow {
                title: &card.card.title,
                url: &card.card.url,
                offers_found: card.offers_found,
                min_any: card.summary.min_any,
                min_zero: card.summary.min_zero,
                min_day_one: card.summary.min_day_one,
                display_any: &card.display.any,
                display_zero: &card.display.zero,
                display_day_one: &card.display.day_one,
                error: card.error.as_deref(),
            })?;
        }
        writer
            .into_inner()
            .map_err(|e| ScanError::IoError(e.into_error()))
    }

    /// File name and contents for each format, in the order given.
    pub fn render(report: &ScanReport, formats: &[String]) -> Result<Vec<(&'static str, Vec<u8>)>> {
        formats
            .iter()
            .map(|format| match format.as_str() {
                "json" => Ok((JSON_REPORT, Self::to_json(report)?)),
                "csv" => Ok((CSV_REPORT, Self::to_csv(report)?)),
                other => Err(ScanError::InvalidConfigValueError {
                    field: "output_formats".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported format".to_string(),
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CardRef, CardReport, PriceSummary};

    fn report() -> ScanReport {
        let bolt = CardRef::new("Lightning Bolt", "https://example.com/cards/1").with_listed_price("€1.00");
        ScanReport::new(
            "https://example.com/search",
            vec![
                CardReport::new(
                    bolt,
                    PriceSummary {
                        min_any: Some(0.3),
                        min_zero: Some(0.35),
                        min_day_one: None,
                    },
                    12,
                ),
                CardReport::failed(
                    CardRef::new("Opt", "https://example.com/cards/2"),
                    "timeout".to_string(),
                ),
            ],
        )
    }

    #[test]
    fn test_csv_report() {
        let csv = String::from_utf8(ReportWriter::to_csv(&report()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("title,url,offers_found,min_any"));
        assert!(lines[1].contains("€0.30"));
        assert!(lines[1].contains("N/A"));
        assert!(lines[2].ends_with("timeout"));
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value = serde_json::from_slice(&ReportWriter::to_json(&report()).unwrap()).unwrap();
        assert_eq!(json["cards"][0]["summary"]["min_zero"], 0.35);
        assert!(json["cards"][0]["summary"]["min_day_one"].is_null());
        assert_eq!(json["cards"][1]["error"], "timeout");
    }

    #[test]
    fn test_render_selected_formats() {
        let files = ReportWriter::render(&report(), &["csv".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, CSV_REPORT);

        assert!(ReportWriter::render(&report(), &["zip".to_string()]).is_err());
    }
}
