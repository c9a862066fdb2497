// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::currencies::CurrencyStore;
use crate::models::CurrencyRecord;
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::warn;

/// Outcome of loading seed rows through the validated insert path
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub added: usize,
    pub rejected: usize,
}

/// Reference rates relative to USD
pub fn default_rates() -> Vec<CurrencyRecord> {
    vec![
        CurrencyRecord::new("USD", 1.00),
        CurrencyRecord::new("EUR", 1.02),
        CurrencyRecord::new("GBP", 0.90),
        CurrencyRecord::new("JPY", 142.79),
        CurrencyRecord::new("MXN", 20.08),
    ]
}

/// Parse `code,rate` rows with a header line
pub fn read_seed_csv<R: Read>(reader: R) -> Result<Vec<CurrencyRecord>> {
    let mut reader = Reader::from_reader(reader);
    let mut records = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let record: CurrencyRecord =
            row.with_context(|| format!("Invalid seed row {}", i + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_seed_file(path: &Path) -> Result<Vec<CurrencyRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open seed file {}", path.display()))?;
    read_seed_csv(file)
}

/// Insert each row with [`CurrencyStore::try_add`]. Rejected rows are
/// logged and counted, never fatal.
pub async fn seed_store(store: &mut CurrencyStore, rows: &[CurrencyRecord]) -> SeedReport {
    let mut report = SeedReport::default();
    for row in rows {
        match store.try_add(&row.code, row.rate).await {
            Ok(_) => report.added += 1,
            Err(e) => {
                warn!(code = %row.code, rate = row.rate, error = %e, "seed row rejected");
                report.rejected += 1;
            }
        }
    }
    report
}

/// Write the current table as `code,rate` rows. Returns the row count.
pub async fn export_csv<W: Write>(store: &mut CurrencyStore, writer: W) -> Result<usize> {
    let records = store.try_list().await?;
    let mut writer = Writer::from_writer(writer);
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}
