//! Register report to CSV conversion.
//!
//! The engine's `register` report prints one posting per line:
//!
//! ```text
//! 2024/01/15 Opening capital  Assets:Bank:Business      100,000 JPY  100,000 JPY
//! ```
//!
//! [`parse_register_line`] turns such a line into a [`RegisterRow`]. Lines
//! that do not have this shape (headers, wrapped descriptions, postings
//! continued on the next line) yield `None` and are left out of the table.

use std::borrow::Cow;
use std::sync::OnceLock;

/// Header row of the exported CSV.
pub const CSV_HEADER: &str = "date,account,description,amount,total";

/// One transaction line of a register report.
///
/// `amount` and `total` are kept as printed by the engine (digits with
/// thousands separators followed by a commodity), never parsed as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRow {
    /// Posting date, `YYYY-MM-DD` (slashes normalized to dashes).
    pub date: String,
    /// Account the posting belongs to.
    pub account: String,
    /// Transaction description (payee / narration).
    pub description: String,
    /// Posting amount with commodity.
    pub amount: String,
    /// Running total with commodity.
    pub total: String,
}

impl RegisterRow {
    /// Format the row as one CSV record (without line terminator).
    pub fn to_csv_record(&self) -> String {
        [
            Cow::Borrowed(self.date.as_str()),
            escape_field(&self.account),
            escape_field(&self.description),
            Cow::Borrowed(self.amount.as_str()),
            Cow::Borrowed(self.total.as_str()),
        ]
        .join(",")
    }
}

fn register_line_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(
            r"^(\S+)\s+(.+?)\s{2,}(\S+(?::\S+)*)\s+(-?[\d,]+\s+\S+)\s+(-?[\d,]+\s+\S+)$",
        )
        .expect("register line pattern is valid")
    })
}

/// Parse a single register line.
///
/// Returns `None` for anything that is not a complete transaction line.
///
/// ```
/// use rbooks_core::parse_register_line;
///
/// let row = parse_register_line("2024/03/01 Rent  Expenses:Rent  80,000 JPY  -20,000 JPY").unwrap();
/// assert_eq!(row.date, "2024-03-01");
/// assert_eq!(row.account, "Expenses:Rent");
/// assert_eq!(row.total, "-20,000 JPY");
///
/// assert!(parse_register_line("").is_none());
/// ```
pub fn parse_register_line(line: &str) -> Option<RegisterRow> {
    let caps = register_line_regex().captures(line.trim_end())?;
    Some(RegisterRow {
        date: caps[1].replace('/', "-"),
        account: caps[3].to_string(),
        description: caps[2].trim().to_string(),
        amount: caps[4].trim().to_string(),
        total: caps[5].trim().to_string(),
    })
}

/// Parse every transaction line of a register report, skipping the rest.
pub fn to_table(register: &str) -> Vec<RegisterRow> {
    register
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let row = parse_register_line(line);
            if row.is_none() {
                tracing::trace!(line, "skipping unrecognized register line");
            }
            row
        })
        .collect()
}

/// Render rows as CSV text: the header, then one record per row.
///
/// Records are separated by `\n`; there is no trailing newline.
pub fn render_csv(rows: &[RegisterRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(&row.to_csv_record());
    }
    out
}

/// Quote a CSV field if it contains a comma, a double quote or a newline.
///
/// Quoted fields have every inner `"` doubled, so a standard CSV reader
/// recovers the original text exactly.
///
/// ```
/// use rbooks_core::escape_field;
///
/// assert_eq!(escape_field("Coffee"), "Coffee");
/// assert_eq!(escape_field("Tea, milk"), "\"Tea, milk\"");
/// assert_eq!(escape_field("5\" disk"), "\"5\"\" disk\"");
/// ```
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
