use crate::domain::model::DatasetRow;
use crate::domain::ports::BlobStorage;
use crate::utils::error::Result;

pub const DATASET_CONTAINER: &str = "diet-data";
pub const DATASET_BLOB: &str = "All_Diets.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeKind {
    Utf8,
    Latin1,
}

/// Two-stage decode: strict UTF-8 first, then Latin-1, which maps every byte
/// to a char and therefore cannot fail. The kind reports which path was taken
/// so the caller can log the degraded one.
pub fn decode_text(bytes: &[u8]) -> (String, DecodeKind) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), DecodeKind::Utf8),
        Err(_) => (
            bytes.iter().map(|&b| b as char).collect(),
            DecodeKind::Latin1,
        ),
    }
}

/// Parse CSV text into row objects. The first line is the header; each data
/// line becomes one map keyed in header order. Ragged lines follow the `csv`
/// crate's default strict policy and surface as an error.
pub fn csv_to_rows(text: &str) -> Result<Vec<DatasetRow>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = DatasetRow::new();
        for (column, value) in headers.iter().zip(record.iter()) {
            row.insert(
                column.to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Download the dataset blob and return it as a serialized JSON array of row
/// objects. Row order follows line order; key order follows the header.
pub async fn load_dataset(storage: &dyn BlobStorage) -> Result<String> {
    let data = storage.download(DATASET_BLOB).await?;
    tracing::debug!("Downloaded {} ({} bytes)", DATASET_BLOB, data.len());

    let (text, kind) = decode_text(&data);
    if kind == DecodeKind::Latin1 {
        tracing::warn!("{} is not valid UTF-8, decoded as Latin-1", DATASET_BLOB);
    }

    let rows = csv_to_rows(&text)?;
    tracing::info!("Parsed {} rows from {}", rows.len(), DATASET_BLOB);

    let body = serde_json::to_string(&rows)?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_utf8() {
        let (text, kind) = decode_text("a,b\n1,2".as_bytes());
        assert_eq!(text, "a,b\n1,2");
        assert_eq!(kind, DecodeKind::Utf8);
    }

    #[test]
    fn test_decode_text_falls_back_to_latin1() {
        // 0xE9 is 'é' in Latin-1 but an invalid UTF-8 sequence on its own.
        let (text, kind) = decode_text(&[b'n', b'a', b'm', b'e', b'\n', b'c', b'a', b'f', 0xE9]);
        assert_eq!(text, "name\ncafé");
        assert_eq!(kind, DecodeKind::Latin1);
    }

    #[test]
    fn test_csv_to_rows_preserves_order() {
        let rows = csv_to_rows("a,b\n1,2\n3,4").unwrap();
        assert_eq!(
            serde_json::to_string(&rows).unwrap(),
            r#"[{"a":"1","b":"2"},{"a":"3","b":"4"}]"#
        );
    }

    #[test]
    fn test_csv_to_rows_keeps_values_as_strings() {
        let rows = csv_to_rows("count,active\n42,true").unwrap();
        assert_eq!(rows[0]["count"], serde_json::json!("42"));
        assert_eq!(rows[0]["active"], serde_json::json!("true"));
    }

    #[test]
    fn test_csv_to_rows_header_only() {
        assert!(csv_to_rows("a,b\n").unwrap().is_empty());
    }

    #[test]
    fn test_csv_to_rows_ragged_line_is_an_error() {
        assert!(csv_to_rows("a,b\n1,2,3").is_err());
    }
}
