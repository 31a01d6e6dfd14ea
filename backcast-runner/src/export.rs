//! Report and artifact export: JSON, CSV trade tape, CSV equity curve.
//!
//! All persisted reports include a `schema_version` field; unknown (newer)
//! versions are rejected on load.

use std::path::Path;

use anyhow::{bail, Context, Result};

use backcast_core::domain::{EquityPoint, Trade};

use crate::report::{Report, SCHEMA_VERSION};

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a `Report` to pretty JSON.
pub fn export_report_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize Report to JSON")
}

/// Deserialize a `Report` from JSON, rejecting unknown schema versions.
pub fn import_report_json(json: &str) -> Result<Report> {
    let report: Report =
        serde_json::from_str(json).context("failed to deserialize Report from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Export the trade tape as CSV.
///
/// Columns: symbol, direction, quantity, entry_timestamp, entry_price,
/// exit_timestamp, exit_price, pnl.
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "symbol",
        "direction",
        "quantity",
        "entry_timestamp",
        "entry_price",
        "exit_timestamp",
        "exit_price",
        "pnl",
    ])
    .context("failed to write trades CSV header")?;

    for trade in trades {
        wtr.write_record([
            trade.symbol.clone(),
            format!("{:?}", trade.direction),
            trade.quantity.to_string(),
            trade.entry_timestamp.to_string(),
            trade.entry_price.to_string(),
            trade.exit_timestamp.to_string(),
            trade.exit_price.to_string(),
            trade.pnl.to_string(),
        ])
        .context("failed to write trade record")?;
    }

    let bytes = wtr.into_inner().context("failed to flush trades CSV")?;
    String::from_utf8(bytes).context("trades CSV is not valid UTF-8")
}

/// Export the equity curve as CSV with columns: timestamp, equity.
pub fn export_equity_csv(equity_curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["timestamp", "equity"])
        .context("failed to write equity CSV header")?;
    for point in equity_curve {
        wtr.write_record([point.timestamp.to_string(), point.equity.to_string()])
            .context("failed to write equity point")?;
    }

    let bytes = wtr.into_inner().context("failed to flush equity CSV")?;
    String::from_utf8(bytes).context("equity CSV is not valid UTF-8")
}

// ─── Files ──────────────────────────────────────────────────────────

/// Write report, trade tape, and equity curve into a directory as
/// `report.json`, `trades.csv`, and `equity.csv`.
pub fn write_run_artifacts(
    dir: impl AsRef<Path>,
    report: &Report,
    trades: &[Trade],
    equity_curve: &[EquityPoint],
) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create artifact directory {}", dir.display()))?;

    std::fs::write(dir.join("report.json"), export_report_json(report)?)
        .context("failed to write report.json")?;
    std::fs::write(dir.join("trades.csv"), export_trades_csv(trades)?)
        .context("failed to write trades.csv")?;
    std::fs::write(dir.join("equity.csv"), export_equity_csv(equity_curve)?)
        .context("failed to write equity.csv")?;
    Ok(())
}
