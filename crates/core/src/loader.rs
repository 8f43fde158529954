//! CSV import/export of purchase history.
//!
//! Layout (header row required, columns matched by position):
//!   date,localTime,amount,btcReceived,rate,status,source,orderId
//!   2025-08-13,13/08/2025,200,0.0010814,185834,PROCESSED,Swyftx,SWY-001

use std::io::Read;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::transaction::Transaction;

pub const CSV_HEADER: [&str; 8] = [
    "date",
    "localTime",
    "amount",
    "btcReceived",
    "rate",
    "status",
    "source",
    "orderId",
];

/// Parse CSV text into purchases. See [`parse_transactions_reader`].
pub fn parse_transactions_csv(text: &str) -> Result<Vec<Transaction>, CoreError> {
    parse_transactions_reader(text.as_bytes())
}

/// Parse purchases from any CSV source.
///
/// Rows the reader rejects (e.g. invalid UTF-8), rows that are too short, or
/// rows whose date / amount / BTC fields don't parse are skipped with a
/// warning rather than failing the whole import. An empty or zero rate is
/// treated as "not reported".
pub fn parse_transactions_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, CoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut txns = Vec::new();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => match e.position() {
                Some(pos) => {
                    warn!(line = pos.line(), error = %e, "skipping CSV row");
                    continue;
                }
                None => return Err(e.into()),
            },
        };
        let line = record.position().map_or(0, |p| p.line());

        if record.iter().all(str::is_empty) {
            continue;
        }

        match parse_row(&record) {
            Ok(tx) => txns.push(tx),
            Err(reason) => {
                warn!(line, reason, "skipping CSV row");
                continue;
            }
        }
    }

    debug!(count = txns.len(), "parsed transactions from CSV");
    Ok(txns)
}

/// Load purchases from a CSV file on disk (native only).
#[cfg(not(target_arch = "wasm32"))]
pub fn load_transactions_csv(path: impl AsRef<std::path::Path>) -> Result<Vec<Transaction>, CoreError> {
    let file = std::fs::File::open(path.as_ref())?;
    parse_transactions_reader(file)
}

/// Write purchases back out in the import layout, in the given order.
pub fn write_transactions_csv(transactions: &[Transaction]) -> Result<String, CoreError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;

    for tx in transactions {
        let rate = tx.rate.map(|r| r.to_string()).unwrap_or_default();
        wtr.write_record([
            tx.date.format("%Y-%m-%d").to_string(),
            tx.local_time.clone().unwrap_or_default(),
            tx.amount.to_string(),
            tx.btc_received.to_string(),
            rate,
            tx.status.clone(),
            tx.source.clone(),
            tx.order_id.clone(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| CoreError::Serialization(format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Serialization(format!("CSV is not UTF-8: {e}")))
}

fn parse_row(record: &csv::StringRecord) -> Result<Transaction, &'static str> {
    if record.len() < CSV_HEADER.len() {
        return Err("expected 8 columns");
    }

    let field = |idx: usize| record.get(idx).unwrap_or("");

    let date = NaiveDate::parse_from_str(field(0), "%Y-%m-%d").map_err(|_| "unparseable date")?;
    let amount: f64 = field(2).parse().map_err(|_| "non-numeric amount")?;
    let btc_received: f64 = field(3).parse().map_err(|_| "non-numeric btcReceived")?;
    let rate = field(4)
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite() && *r != 0.0);

    let local_time = match field(1) {
        "" => None,
        s => Some(s.to_string()),
    };

    let mut tx = Transaction::new(date, amount, btc_received, rate)
        .with_source(field(6), field(5), field(7));
    tx.local_time = local_time;
    Ok(tx)
}
