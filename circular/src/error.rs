use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("circular addressing needs a non-empty container")]
    EmptyContainer,
    #[error("unsupported stride {0}, ranges are contiguous")]
    Stride(isize),
    #[error("range {start}..{stop} runs backwards")]
    ReversedRange { start: isize, stop: isize },
    #[error("range needs {expected} values but {actual} were given")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("range {start}..{stop} out of range for length {len}")]
    RangeOutOfRange { start: isize, stop: isize, len: usize },
}

impl Error {
    /// Malformed call, rejected before the container is touched.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::Stride(_) | Error::ReversedRange { .. } | Error::LengthMismatch { .. }
        )
    }

    /// Native bounds failure of the underlying container.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. } | Error::RangeOutOfRange { .. }
        )
    }
}

/// Physical indices past `isize::MAX` can't name a real slot, saturate them for reporting.
pub(crate) fn signed(index: usize) -> isize {
    use std::convert::TryFrom;

    isize::try_from(index).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_disjoint() {
        let invalid = [
            Error::Stride(2),
            Error::ReversedRange { start: 3, stop: 1 },
            Error::LengthMismatch {
                expected: 2,
                actual: 3,
            },
        ];
        for e in invalid.iter() {
            assert!(e.is_invalid_argument());
            assert!(!e.is_out_of_range());
        }

        let native = [
            Error::IndexOutOfRange { index: 3, len: 3 },
            Error::RangeOutOfRange {
                start: 0,
                stop: 4,
                len: 3,
            },
        ];
        for e in native.iter() {
            assert!(e.is_out_of_range());
            assert!(!e.is_invalid_argument());
        }

        assert!(!Error::EmptyContainer.is_invalid_argument());
        assert!(!Error::EmptyContainer.is_out_of_range());
    }

    #[test]
    fn messages_name_the_offending_values() {
        assert_eq!(
            Error::IndexOutOfRange { index: -1, len: 3 }.to_string(),
            "index -1 out of range for length 3"
        );
        assert_eq!(
            Error::LengthMismatch {
                expected: 2,
                actual: 0
            }
            .to_string(),
            "range needs 2 values but 0 were given"
        );
    }

    #[test]
    fn signed_saturates() {
        assert_eq!(signed(7), 7);
        assert_eq!(signed(usize::MAX), isize::MAX);
    }
}
