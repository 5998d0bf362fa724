//! Spreadsheet projection of a media mix: formatted rows, a TOTAL summary
//! row, and CSV / JSON serialization.

use chrono::{DateTime, Utc};
use mediamix_core::config::ExportConfig;
use mediamix_core::{MediaMixEntry, MediaMixError, MediaMixResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::summary::MixSummary;

pub const COLUMNS: [&str; 8] = [
    "Channel",
    "Budget",
    "Allocation",
    "ROI",
    "CPM",
    "CTR",
    "CPC",
    "CAC",
];

pub const TOTAL_LABEL: &str = "TOTAL";

/// Rendered in place of a non-finite metric.
pub const DASH: &str = "-";

/// One formatted spreadsheet row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpreadsheetRow {
    #[serde(rename = "Channel")]
    pub channel: String,
    #[serde(rename = "Budget")]
    pub budget: String,
    #[serde(rename = "Allocation")]
    pub allocation: String,
    #[serde(rename = "ROI")]
    pub roi: String,
    #[serde(rename = "CPM")]
    pub cpm: String,
    #[serde(rename = "CTR")]
    pub ctr: String,
    #[serde(rename = "CPC")]
    pub cpc: String,
    #[serde(rename = "CAC")]
    pub cac: String,
}

impl SpreadsheetRow {
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.channel,
            &self.budget,
            &self.allocation,
            &self.roi,
            &self.cpm,
            &self.ctr,
            &self.cpc,
            &self.cac,
        ]
    }
}

/// JSON export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SpreadsheetRow>,
    pub summary: MixSummary,
}

// ─── Cell formatting ────────────────────────────────────────────────────────

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$1,666.67`; non-finite values render as a dash.
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return DASH.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

/// Whole currency units, `$13` or `$1,235`; non-finite values render as a dash.
pub fn format_whole_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return DASH.to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}", group_thousands(&format!("{:.0}", rounded.abs())))
}

/// A percentage value with two decimals, `33.33%`.
pub fn format_percent(percent: f64) -> String {
    if !percent.is_finite() {
        return DASH.to_string();
    }
    format!("{percent:.2}%")
}

/// A fraction shown as a percentage, `0.0123` becomes `1.23%`.
pub fn format_rate(fraction: f64) -> String {
    format_percent(fraction * 100.0)
}

/// An ROI multiplier shown as a whole percentage, `2.4` becomes `240%`.
pub fn format_roi(roi: f64) -> String {
    if !roi.is_finite() {
        return DASH.to_string();
    }
    format!("{:.0}%", roi * 100.0)
}

// ─── Cell parsing ───────────────────────────────────────────────────────────

fn parse_number(cell: &str, cleaned: &str) -> MediaMixResult<f64> {
    cleaned.parse::<f64>().map_err(|_| {
        MediaMixError::InvalidArgument(format!("cannot parse spreadsheet cell {cell:?}"))
    })
}

/// Inverse of [`format_currency`] and [`format_whole_currency`]. A dash
/// parses as infinity.
pub fn parse_currency(cell: &str, symbol: &str) -> MediaMixResult<f64> {
    let trimmed = cell.trim();
    if trimmed == DASH {
        return Ok(f64::INFINITY);
    }
    let cleaned: String = trimmed.replacen(symbol, "", 1).replace(',', "");
    parse_number(cell, &cleaned)
}

/// Inverse of [`format_percent`], returning the percentage value.
pub fn parse_percent(cell: &str) -> MediaMixResult<f64> {
    let trimmed = cell.trim();
    if trimmed == DASH {
        return Ok(f64::INFINITY);
    }
    parse_number(cell, trimmed.trim_end_matches('%'))
}

/// Inverse of [`format_rate`], returning the fraction.
pub fn parse_rate(cell: &str) -> MediaMixResult<f64> {
    Ok(parse_percent(cell)? / 100.0)
}

/// Inverse of [`format_roi`], returning the multiplier.
pub fn parse_roi(cell: &str) -> MediaMixResult<f64> {
    Ok(parse_percent(cell)? / 100.0)
}

// ─── Exporter ───────────────────────────────────────────────────────────────

pub struct SpreadsheetExporter {
    currency_symbol: String,
    include_summary_row: bool,
}

impl SpreadsheetExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            include_summary_row: config.include_summary_row,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    fn entry_row(&self, entry: &MediaMixEntry) -> SpreadsheetRow {
        let p = &entry.predictions;
        SpreadsheetRow {
            channel: entry.name().to_string(),
            budget: format_currency(entry.budget, &self.currency_symbol),
            allocation: format_percent(entry.allocation),
            roi: format_roi(p.roi),
            cpm: format_whole_currency(p.cpm, &self.currency_symbol),
            ctr: format_rate(p.ctr),
            cpc: format_currency(p.cpc, &self.currency_symbol),
            cac: format_whole_currency(p.cac as f64, &self.currency_symbol),
        }
    }

    /// The TOTAL row: summed budget and allocation, simple means elsewhere.
    pub fn summary_row(&self, summary: &MixSummary) -> SpreadsheetRow {
        SpreadsheetRow {
            channel: TOTAL_LABEL.to_string(),
            budget: format_currency(summary.total_budget, &self.currency_symbol),
            allocation: format_percent(summary.total_allocation),
            roi: format_roi(summary.avg_roi),
            cpm: format_whole_currency(summary.avg_cpm, &self.currency_symbol),
            ctr: format_rate(summary.avg_ctr),
            cpc: format_currency(summary.avg_cpc, &self.currency_symbol),
            cac: format_whole_currency(summary.avg_cac, &self.currency_symbol),
        }
    }

    /// Channel rows in mix order, followed by the TOTAL row when enabled.
    pub fn rows(&self, mix: &[MediaMixEntry]) -> MediaMixResult<Vec<SpreadsheetRow>> {
        if mix.is_empty() {
            return Err(MediaMixError::EmptyMix);
        }
        let mut rows: Vec<SpreadsheetRow> = mix.iter().map(|e| self.entry_row(e)).collect();
        if self.include_summary_row {
            rows.push(self.summary_row(&MixSummary::from_mix(mix)));
        }
        Ok(rows)
    }

    pub fn export_csv(&self, mix: &[MediaMixEntry]) -> MediaMixResult<String> {
        let rows = self.rows(mix)?;
        let mut csv = COLUMNS.join(",");
        csv.push('\n');
        for row in &rows {
            let cells: Vec<String> = row
                .cells()
                .iter()
                .map(|s| format!("\"{}\"", s.replace('"', "\"\"")))
                .collect();
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }
        debug!(rows = rows.len(), bytes = csv.len(), "Exported media mix as CSV");
        Ok(csv)
    }

    pub fn export_json(&self, mix: &[MediaMixEntry]) -> MediaMixResult<String> {
        let document = ExportDocument {
            generated_at: Utc::now(),
            rows: self.rows(mix)?,
            summary: MixSummary::from_mix(mix),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl Default for SpreadsheetExporter {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediamix_core::{Channel, PredictionBundle};

    fn sample_mix() -> Vec<MediaMixEntry> {
        vec![
            MediaMixEntry {
                channel: Channel::from_id("search"),
                allocation: 100.0 / 3.0,
                budget: 5000.0 / 3.0,
                predictions: PredictionBundle {
                    impressions: 80_000,
                    cpm: 21.0,
                    roi: 2.4,
                    ctr: 0.0288,
                    cpc: 0.72,
                    conversion: 0.036,
                    cac: 20,
                    clicks: 2304,
                    conversions: 83,
                    engagement: 0,
                },
            },
            MediaMixEntry {
                channel: Channel::from_id("ctv"),
                allocation: 100.0 / 3.0,
                budget: 5000.0 / 3.0,
                predictions: PredictionBundle {
                    cpm: f64::INFINITY,
                    roi: 1.1,
                    ctr: 0.0016,
                    cpc: f64::INFINITY,
                    cac: 0,
                    ..Default::default()
                },
            },
        ]
    }

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(1666.666_666, "$"), "$1,666.67");
        assert_eq!(format_currency(1_234_567.0, "$"), "$1,234,567.00");
        assert_eq!(format_currency(12.0, "€"), "€12.00");
        assert_eq!(format_currency(0.5, "$"), "$0.50");
        assert_eq!(format_currency(f64::INFINITY, "$"), "-");
    }

    #[test]
    fn test_whole_currency_formatting() {
        assert_eq!(format_whole_currency(13.0, "$"), "$13");
        assert_eq!(format_whole_currency(1234.6, "$"), "$1,235");
        assert_eq!(format_whole_currency(0.0, "$"), "$0");
        assert_eq!(format_whole_currency(f64::INFINITY, "$"), "-");
        assert_eq!(parse_currency("$1,235", "$").unwrap(), 1235.0);
    }

    #[test]
    fn test_rate_and_roi_formatting() {
        assert_eq!(format_percent(100.0 / 3.0), "33.33%");
        assert_eq!(format_rate(0.0288), "2.88%");
        assert_eq!(format_roi(2.4), "240%");
        assert_eq!(format_roi(f64::NAN), "-");
    }

    #[test]
    fn test_rows_include_total() {
        let exporter = SpreadsheetExporter::default();
        let rows = exporter.rows(&sample_mix()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].channel, "Search Ads");
        assert_eq!(rows[0].budget, "$1,666.67");
        assert_eq!(rows[0].allocation, "33.33%");
        assert_eq!(rows[0].cpm, "$21");
        assert_eq!(rows[0].cac, "$20");
        assert_eq!(rows[1].cpm, "-");
        assert_eq!(rows[2].channel, "TOTAL");
        assert_eq!(rows[2].budget, "$3,333.33");
        assert_eq!(rows[2].allocation, "66.67%");
        assert_eq!(rows[2].roi, "175%");
    }

    #[test]
    fn test_summary_row_can_be_disabled() {
        let exporter = SpreadsheetExporter::new(&ExportConfig {
            include_summary_row: false,
            ..ExportConfig::default()
        });
        let rows = exporter.rows(&sample_mix()).unwrap();
        assert!(rows.iter().all(|r| r.channel != TOTAL_LABEL));
    }

    #[test]
    fn test_empty_mix_is_rejected() {
        let exporter = SpreadsheetExporter::default();
        assert!(matches!(exporter.rows(&[]), Err(MediaMixError::EmptyMix)));
        assert!(exporter.export_csv(&[]).is_err());
    }

    #[test]
    fn test_round_trip_restores_rounded_values() {
        let exporter = SpreadsheetExporter::default();
        let mix = sample_mix();
        let row = &exporter.rows(&mix).unwrap()[0];
        let p = &mix[0].predictions;

        let budget = parse_currency(&row.budget, "$").unwrap();
        assert!((budget - mix[0].budget).abs() < 0.005);
        let allocation = parse_percent(&row.allocation).unwrap();
        assert!((allocation - mix[0].allocation).abs() < 0.005);
        assert!((parse_roi(&row.roi).unwrap() - p.roi).abs() < 1e-9);
        assert!((parse_currency(&row.cpm, "$").unwrap() - p.cpm).abs() < 1e-9);
        assert!((parse_rate(&row.ctr).unwrap() - p.ctr).abs() < 1e-9);
        assert!((parse_currency(&row.cpc, "$").unwrap() - p.cpc).abs() < 1e-9);
        assert!((parse_currency(&row.cac, "$").unwrap() - p.cac as f64).abs() < 1e-9);
    }

    #[test]
    fn test_dash_parses_as_infinity() {
        assert!(parse_currency("-", "$").unwrap().is_infinite());
        assert!(parse_currency("abc", "$").is_err());
    }

    #[test]
    fn test_csv_quotes_every_cell() {
        let exporter = SpreadsheetExporter::default();
        let csv = exporter.export_csv(&sample_mix()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Channel,Budget,Allocation,ROI,CPM,CTR,CPC,CAC"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Search Ads\",\"$1,666.67\",\"33.33%\",\"240%\",\"$21\",\"2.88%\",\"$0.72\",\"$20\""
        );
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_json_document() {
        let exporter = SpreadsheetExporter::default();
        let json = exporter.export_json(&sample_mix()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"][0]["Channel"], "Search Ads");
        assert_eq!(value["rows"][2]["Channel"], "TOTAL");
        assert_eq!(value["summary"]["total_impressions"], 80_000);
    }
}
