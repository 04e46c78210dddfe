//! CSV context for the enhancer. Uses the `csv` crate for safe serialization.
//!
//! Converts call transcript segments to CSV suitable for LLM context input.

use crate::domain::{Speaker, TranscriptSegment};
use chrono::{DateTime, Utc};

/// Convert transcript segments to a CSV string for LLM context.
///
/// Format: `Time;Speaker;Text` (semicolon-delimited for token efficiency)
pub fn segments_to_csv(segments: &[TranscriptSegment]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["Time", "Speaker", "Text"])?;

    for seg in segments {
        let time_str = DateTime::<Utc>::from_timestamp(seg.timestamp, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| seg.timestamp.to_string());

        let speaker = match seg.speaker {
            Speaker::Caller => "caller",
            Speaker::Screener => "screener",
        };

        // The csv crate handles quoting; newlines are flattened for readability
        let clean_text = seg.text.replace('\n', " ").replace('\r', "");

        wtr.write_record([&time_str, speaker, &clean_text])?;
    }

    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::other(e.to_string()))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> TranscriptSegment {
        TranscriptSegment {
            timestamp: 1704067200, // 2024-01-01 00:00:00 UTC
            duration_secs: 5,
            speaker: Speaker::Caller,
            text: text.to_string(),
        }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = segments_to_csv(&[segment("Hello there")]).unwrap();
        assert!(csv.contains("Time;Speaker;Text"));
        assert!(csv.contains("2024-01-01"));
        assert!(csv.contains("caller"));
        assert!(csv.contains("Hello there"));
    }

    #[test]
    fn csv_flattens_newlines() {
        let csv = segments_to_csv(&[segment("line one\nline two")]).unwrap();
        // header + one data row
        assert_eq!(csv.lines().count(), 2);
    }
}
