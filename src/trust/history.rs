use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::domain::{ChannelId, MessageDraft, UserId};

/// Import failures for chat-history exports.
#[derive(Debug, thiserror::Error)]
pub enum HistoryImportError {
    #[error("failed to read message export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid message export data: {0}")]
    Csv(#[from] csv::Error),
    #[error("message export row {row} has unparseable sent_at '{value}'")]
    Timestamp { row: usize, value: String },
}

/// Loads `author_id,channel_id,content,sent_at` exports into drafts the
/// integrity checks can score against.
pub struct MessageHistoryImporter;

impl MessageHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MessageDraft>, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MessageDraft>, HistoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut drafts = Vec::new();

        for (index, record) in csv_reader.deserialize::<HistoryRow>().enumerate() {
            let row = record?;
            let sent_at =
                parse_instant(&row.sent_at).ok_or_else(|| HistoryImportError::Timestamp {
                    row: index + 1,
                    value: row.sent_at.clone(),
                })?;

            drafts.push(MessageDraft {
                author_id: UserId(row.author_id),
                channel_id: ChannelId(row.channel_id),
                content: row.content,
                sent_at,
            });
        }

        Ok(drafts)
    }
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    author_id: String,
    channel_id: String,
    content: String,
    sent_at: String,
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn importer_reads_rows_into_drafts() {
        let csv = "author_id,channel_id,content,sent_at\n\
alice,catan-lfg,Looking for a fourth player tonight,2026-08-10T18:00:00Z\n\
alice,general,Looking for a fourth player tonight,2026-08-10T18:05:00Z\n";

        let drafts = MessageHistoryImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].author_id, UserId("alice".to_string()));
        assert_eq!(drafts[0].channel_id, ChannelId("catan-lfg".to_string()));
        assert_eq!(drafts[1].channel_id, ChannelId("general".to_string()));
        assert!(drafts[1].sent_at > drafts[0].sent_at);
    }

    #[test]
    fn importer_accepts_date_only_timestamps() {
        let csv = "author_id,channel_id,content,sent_at\nbob,general,Game night recap,2026-08-09\n";

        let drafts = MessageHistoryImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(drafts.len(), 1);
        let expected = NaiveDate::from_ymd_opt(2026, 8, 9)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(drafts[0].sent_at, expected);
    }

    #[test]
    fn importer_reports_row_for_bad_timestamps() {
        let csv = "author_id,channel_id,content,sent_at\n\
bob,general,first,2026-08-09T10:00:00Z\n\
bob,general,second,not-a-time\n";

        let error = MessageHistoryImporter::from_reader(Cursor::new(csv))
            .expect_err("expected timestamp error");

        match error {
            HistoryImportError::Timestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-time");
            }
            other => panic!("expected timestamp error, got {other:?}"),
        }
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = MessageHistoryImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            HistoryImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
