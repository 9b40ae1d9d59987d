//! Job number codec.
//!
//! A job number is the human-readable identifier printed on inspection
//! paperwork: `{facilityCode}-{sequence}-{revision}`, e.g. `"16-42-1"`.
//! The three fields are plain integers with no zero-padding. Sequence and
//! revision start at 1; the facility code may be any non-negative integer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Marker embedded in placeholder numbers issued while the sequence
/// allocator is unavailable. A placeholder never parses as a real number.
pub const PLACEHOLDER_MARKER: &str = "PENDING";

/// Error raised when a job number string does not match the expected shape.
///
/// Malformed numbers are treated as corrupt data: callers log them and
/// propagate the error, never silently coerce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("malformed job number '{0}': expected exactly three hyphen-separated fields")]
    FieldCount(String),

    #[error("malformed job number '{input}': field '{field}' is not a non-negative integer")]
    NonNumeric { input: String, field: String },

    #[error("malformed job number '{0}': sequence and revision must be at least 1")]
    OutOfRange(String),
}

/// A fully-allocated job number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobNumber {
    pub facility_code: i64,
    pub sequence: i64,
    pub revision: i64,
}

impl JobNumber {
    /// Builds the first revision of a freshly-allocated sequence.
    pub fn first_revision(facility_code: i64, sequence: i64) -> Self {
        Self {
            facility_code,
            sequence,
            revision: 1,
        }
    }

    /// Returns the number the next resubmission of this job would carry.
    pub fn next_revision(&self) -> Self {
        Self {
            revision: self.revision + 1,
            ..*self
        }
    }
}

impl fmt::Display for JobNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.facility_code, self.sequence, self.revision)
    }
}

impl FromStr for JobNumber {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('-').collect();
        if fields.len() != 3 {
            return Err(FormatError::FieldCount(s.to_string()));
        }

        let mut parsed = [0i64; 3];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            // `i64::from_str` accepts a leading '+', which is not a valid
            // job number field, so require plain digits up front.
            if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
                return Err(FormatError::NonNumeric {
                    input: s.to_string(),
                    field: field.to_string(),
                });
            }
            *slot = field.parse().map_err(|_| FormatError::NonNumeric {
                input: s.to_string(),
                field: field.to_string(),
            })?;
        }

        let [facility_code, sequence, revision] = parsed;
        if sequence < 1 || revision < 1 {
            return Err(FormatError::OutOfRange(s.to_string()));
        }

        Ok(JobNumber {
            facility_code,
            sequence,
            revision,
        })
    }
}

/// The number attached to a draft: either a real allocated number or a
/// clearly-marked temporary placeholder awaiting manual reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobNumberSlot {
    Assigned(JobNumber),
    Placeholder(String),
}

impl JobNumberSlot {
    /// Builds a placeholder for a facility whose allocator is unavailable.
    ///
    /// The draft reference keeps concurrent placeholders distinguishable
    /// until reconciliation assigns real sequence values.
    pub fn placeholder(facility_code: i64, draft_ref: &str) -> Self {
        JobNumberSlot::Placeholder(format!(
            "{facility_code}-{PLACEHOLDER_MARKER}-{draft_ref}"
        ))
    }

    /// Reconstructs a slot from its stored string form.
    pub fn from_stored(s: &str) -> Result<Self, FormatError> {
        if s.split('-').any(|field| field == PLACEHOLDER_MARKER) {
            return Ok(JobNumberSlot::Placeholder(s.to_string()));
        }
        s.parse().map(JobNumberSlot::Assigned)
    }

    /// Returns the real number, if one has been assigned.
    pub fn assigned(&self) -> Option<&JobNumber> {
        match self {
            JobNumberSlot::Assigned(number) => Some(number),
            JobNumberSlot::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, JobNumberSlot::Placeholder(_))
    }
}

impl fmt::Display for JobNumberSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobNumberSlot::Assigned(number) => number.fmt(f),
            JobNumberSlot::Placeholder(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple() {
        let number = JobNumber::first_revision(16, 42);
        assert_eq!(number.to_string(), "16-42-1");
    }

    #[test]
    fn test_format_no_zero_padding() {
        let number = JobNumber {
            facility_code: 7,
            sequence: 3,
            revision: 12,
        };
        assert_eq!(number.to_string(), "7-3-12");
    }

    #[test]
    fn test_parse_simple() {
        let number: JobNumber = "16-42-1".parse().unwrap();
        assert_eq!(number.facility_code, 16);
        assert_eq!(number.sequence, 42);
        assert_eq!(number.revision, 1);
    }

    #[test]
    fn test_round_trip() {
        for facility in [0, 1, 16, 999, 100_000] {
            for sequence in [1, 2, 42, 10_000] {
                for revision in [1, 2, 9] {
                    let number = JobNumber {
                        facility_code: facility,
                        sequence,
                        revision,
                    };
                    let parsed: JobNumber = number.to_string().parse().unwrap();
                    assert_eq!(parsed, number);
                }
            }
        }
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(matches!(
            "16-42".parse::<JobNumber>(),
            Err(FormatError::FieldCount(_))
        ));
        assert!(matches!(
            "16-42-1-2".parse::<JobNumber>(),
            Err(FormatError::FieldCount(_))
        ));
        assert!(matches!(
            "".parse::<JobNumber>(),
            Err(FormatError::FieldCount(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(matches!(
            "a-b-c".parse::<JobNumber>(),
            Err(FormatError::NonNumeric { .. })
        ));
        // An empty middle field still splits into three fields; it fails
        // on the numeric parse, not the field count.
        assert!(matches!(
            "16--1".parse::<JobNumber>(),
            Err(FormatError::NonNumeric { .. })
        ));
        assert!(matches!(
            "16-4 2-1".parse::<JobNumber>(),
            Err(FormatError::NonNumeric { .. })
        ));
        assert!(matches!(
            "+16-42-1".parse::<JobNumber>(),
            Err(FormatError::NonNumeric { .. })
        ));
        assert!(matches!(
            " 16-42-1".parse::<JobNumber>(),
            Err(FormatError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_zero_sequence_or_revision() {
        assert!(matches!(
            "16-0-1".parse::<JobNumber>(),
            Err(FormatError::OutOfRange(_))
        ));
        assert!(matches!(
            "16-42-0".parse::<JobNumber>(),
            Err(FormatError::OutOfRange(_))
        ));
        // Facility code zero is allowed.
        assert!("0-1-1".parse::<JobNumber>().is_ok());
    }

    #[test]
    fn test_next_revision() {
        let number: JobNumber = "16-2-1".parse().unwrap();
        assert_eq!(number.next_revision().to_string(), "16-2-2");
    }

    #[test]
    fn test_placeholder_round_trip() {
        let slot = JobNumberSlot::placeholder(16, "a1b2c3d4");
        assert_eq!(slot.to_string(), "16-PENDING-a1b2c3d4");
        assert!(slot.is_placeholder());
        assert!(slot.assigned().is_none());

        let restored = JobNumberSlot::from_stored(&slot.to_string()).unwrap();
        assert_eq!(restored, slot);
    }

    #[test]
    fn test_from_stored_assigned() {
        let slot = JobNumberSlot::from_stored("16-42-1").unwrap();
        assert_eq!(
            slot.assigned(),
            Some(&JobNumber {
                facility_code: 16,
                sequence: 42,
                revision: 1
            })
        );
    }

    #[test]
    fn test_from_stored_rejects_garbage() {
        assert!(JobNumberSlot::from_stored("not-a-number").is_err());
        assert!(JobNumberSlot::from_stored("16/42/1").is_err());
    }
}
