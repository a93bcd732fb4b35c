//! Final report records and rendering
//!
//! The report is a JSON array written to stdout. Its exact text shape is
//! load-bearing for downstream consumers: each record is serialized with
//! three-space indentation, every line of a record gets one extra leading
//! space, and records are joined with `,\n` between a bare `[` and `]`.

use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// One completed measurement
///
/// Immutable once created; the order records were completed in is the order
/// they appear in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Address the document was fetched from
    pub url: String,

    /// Literal `<img ` occurrences in the document body
    pub count: u64,

    /// Normalized IMDB id (bare digits)
    pub imdb_id: String,
}

/// Renders the full report in completion order
pub fn render_report(records: &[ResultRecord]) -> Result<String> {
    let mut blocks = Vec::with_capacity(records.len());

    for record in records {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"   ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        record.serialize(&mut serializer)?;

        let text = String::from_utf8(buf).expect("serde_json output is UTF-8");
        blocks.push(format!(" {}", text.replace('\n', "\n ")));
    }

    Ok(format!("[\n{}\n]", blocks.join(",\n")))
}
