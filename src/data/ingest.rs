//! CSV ingest for the Kaggle flight price export.
//!
//! Design goals, in order:
//! - **Strict schema** for required columns (clear error + exit code 2)
//! - **Row-level tolerance**: a malformed row is skipped and reported, not
//!   fatal — 300k-row exports routinely contain a few bad lines
//! - **No feature logic here**: rows come out as raw strings/numbers; mapping
//!   them into the numeric schema is the feature pipeline's job

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::FlightRow;
use crate::error::AppError;

/// Columns that must be present in the header.
const REQUIRED_COLUMNS: [&str; 9] = [
    "airline",
    "source_city",
    "departure_time",
    "stops",
    "destination_city",
    "class",
    "duration",
    "days_left",
    "price",
];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed rows plus what went wrong along the way.
#[derive(Debug, Clone)]
pub struct IngestedRows {
    pub rows: Vec<FlightRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load and parse the flight CSV.
pub fn load_flight_rows(path: &Path) -> Result<IngestedRows, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for col in REQUIRED_COLUMNS {
        if !header_map.contains_key(col) {
            return Err(AppError::input(format!("Missing required column: `{col}`")));
        }
    }

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if rows.is_empty() {
        return Err(AppError::no_model("No valid rows in the dataset."));
    }

    Ok(IngestedRows {
        rows,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Kaggle exports opened in Excel can grow a BOM on the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<FlightRow, String> {
    let airline = get_required(record, header_map, "airline")?.to_string();
    let source_city = get_required(record, header_map, "source_city")?.to_string();
    let destination_city = get_required(record, header_map, "destination_city")?.to_string();
    let departure_time = get_required(record, header_map, "departure_time")?.to_string();
    let arrival_time = get_optional(record, header_map, "arrival_time").map(str::to_string);
    let stops = get_required(record, header_map, "stops")?.to_string();
    let cabin_class = get_required(record, header_map, "class")?.to_string();

    let duration_hours = parse_f64(get_required(record, header_map, "duration")?, "duration")?;
    if !(duration_hours.is_finite() && duration_hours > 0.0) {
        return Err("`duration` must be finite and > 0.".to_string());
    }

    let days_left = get_required(record, header_map, "days_left")?
        .parse::<u32>()
        .map_err(|_| "Invalid `days_left` (expected a non-negative integer).".to_string())?;

    let price_inr = parse_f64(get_required(record, header_map, "price")?, "price")?;
    if !(price_inr.is_finite() && price_inr > 0.0) {
        return Err("`price` must be finite and > 0.".to_string());
    }

    Ok(FlightRow {
        airline,
        source_city,
        destination_city,
        departure_time,
        arrival_time,
        stops,
        cabin_class,
        duration_hours,
        days_left,
        price_inr,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_well_formed_rows() {
        let path = write_temp_csv(
            "fare_ingest_ok.csv",
            "airline,source_city,departure_time,stops,arrival_time,destination_city,class,duration,days_left,price\n\
             Vistara,Delhi,Morning,zero,Afternoon,Mumbai,Economy,2.17,10,5955\n\
             SpiceJet,Delhi,Evening,one,Night,Mumbai,Economy,5.83,3,660\n",
        );

        let ingested = load_flight_rows(&path).unwrap();
        assert_eq!(ingested.rows_read, 2);
        assert_eq!(ingested.rows.len(), 2);
        assert!(ingested.row_errors.is_empty());

        let row = &ingested.rows[0];
        assert_eq!(row.airline, "Vistara");
        assert_eq!(row.departure_time, "Morning");
        assert_eq!(row.stops, "zero");
        assert_eq!(row.days_left, 10);
        assert!((row.duration_hours - 2.17).abs() < 1e-12);
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let path = write_temp_csv(
            "fare_ingest_bad_row.csv",
            "airline,source_city,departure_time,stops,arrival_time,destination_city,class,duration,days_left,price\n\
             Vistara,Delhi,Morning,zero,Afternoon,Mumbai,Economy,2.17,10,5955\n\
             Indigo,Delhi,Morning,zero,Afternoon,Mumbai,Economy,not_a_number,10,5955\n",
        );

        let ingested = load_flight_rows(&path).unwrap();
        assert_eq!(ingested.rows.len(), 1);
        assert_eq!(ingested.row_errors.len(), 1);
        assert_eq!(ingested.row_errors[0].line, 3);
    }

    #[test]
    fn missing_column_is_fatal() {
        let path = write_temp_csv(
            "fare_ingest_missing_col.csv",
            "airline,source_city,departure_time,stops,destination_city,class,duration,days_left\n\
             Vistara,Delhi,Morning,zero,Mumbai,Economy,2.17,10\n",
        );

        let err = load_flight_rows(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn all_rows_bad_is_fatal() {
        let path = write_temp_csv(
            "fare_ingest_all_bad.csv",
            "airline,source_city,departure_time,stops,arrival_time,destination_city,class,duration,days_left,price\n\
             Vistara,Delhi,Morning,zero,Afternoon,Mumbai,Economy,-1,10,5955\n",
        );

        let err = load_flight_rows(&path).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
