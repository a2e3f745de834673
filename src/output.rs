//! Record output: CSV rows or line-delimited JSON, one record per line.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::coin::CoinRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Record plus its 1-based position in the dump.
#[derive(Serialize)]
struct NumberedRecord<'a> {
    count: u64,
    #[serde(flatten)]
    record: &'a CoinRecord,
}

pub struct RecordWriter<W: Write> {
    out: W,
    format: OutputFormat,
    count: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> RecordWriter<W> {
        RecordWriter {
            out,
            format,
            count: 0,
        }
    }

    /// Write one record. In CSV mode the header row goes out before the
    /// first record.
    pub fn write(&mut self, record: &CoinRecord) -> io::Result<()> {
        self.count += 1;
        match self.format {
            OutputFormat::Csv => {
                if self.count == 1 {
                    writeln!(self.out, "count,txid,vout,height,amount,coinbase,type,script")?;
                }
                writeln!(
                    self.out,
                    "{},{},{},{},{},{},{},{}",
                    self.count,
                    hex::encode(record.txid),
                    record.vout,
                    record.height,
                    record.amount,
                    record.coinbase as u8,
                    record.script_type,
                    hex::encode(&record.script),
                )
            }
            OutputFormat::Json => {
                let row = NumberedRecord {
                    count: self.count,
                    record,
                };
                let line = serde_json::to_string(&row)?;
                writeln!(self.out, "{}", line)
            }
        }
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.count
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
