use serde_json::Value;

use crate::snapshot::{IngestError, Position};

/// Coerce a raw hourly payload into positions. Records that are not
/// `[lat, lon, alt]` numeric triples inside lat/lon bounds are dropped.
pub fn ingest(raw: &Value) -> Result<Vec<Position>, IngestError> {
    let records = raw.as_array().ok_or(IngestError::NotAnArray)?;

    let positions: Vec<Position> = records.iter().filter_map(parse_record).collect();

    let dropped = records.len() - positions.len();
    if dropped > 0 {
        log::debug!("Dropped {} malformed position records", dropped);
    }

    Ok(positions)
}

pub fn ingest_str(content: &str) -> Result<Vec<Position>, IngestError> {
    let raw: Value = serde_json::from_str(content)?;
    ingest(&raw)
}

fn parse_record(record: &Value) -> Option<Position> {
    let fields = record.as_array()?;
    if fields.len() != 3 {
        return None;
    }

    let lat = fields[0].as_f64()?;
    let lon = fields[1].as_f64()?;
    let alt = fields[2].as_f64()?;

    let position = Position::new(lat, lon, alt);
    position.is_valid().then_some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keeps_valid_records_in_order() {
        let raw = json!([[10.0, 20.0, 15.5], [-45.5, 179.9, 3.2]]);
        let positions = ingest(&raw).unwrap();
        assert_eq!(
            positions,
            vec![
                Position::new(10.0, 20.0, 15.5),
                Position::new(-45.5, 179.9, 3.2)
            ]
        );
    }

    #[test]
    fn test_drops_malformed_records() {
        let raw = json!([
            [10.0, 20.0, 15.5],
            [91.0, 0.0, 1.0],
            [0.0, -180.5, 1.0],
            [1.0, 2.0],
            [1.0, 2.0, 3.0, 4.0],
            ["1", 2.0, 3.0],
            null,
            [1.0, 2.0, null],
            [-90, 180, -2]
        ]);
        let positions = ingest(&raw).unwrap();
        assert_eq!(
            positions,
            vec![
                Position::new(10.0, 20.0, 15.5),
                Position::new(-90.0, 180.0, -2.0)
            ]
        );
    }

    #[test]
    fn test_rejects_non_array_payload() {
        assert!(matches!(
            ingest(&json!({"error": "rate limited"})),
            Err(IngestError::NotAnArray)
        ));
        assert!(matches!(ingest_str("not json"), Err(IngestError::Json(_))));
    }
}
