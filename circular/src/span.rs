use crate::error::{signed, Error, Result};
use std::{
    convert::TryFrom,
    num::NonZeroUsize,
    ops::{Range, RangeFrom, RangeFull, RangeTo},
};

/// Maps any logical index onto `0..len`, counting negative indices back from the end of the
/// ring (`-1` is the last slot).
#[inline]
pub fn wrap(index: isize, len: NonZeroUsize) -> usize {
    match isize::try_from(len.get()) {
        Ok(n) => index.rem_euclid(n) as usize,
        // Longer than any index: non-negative ones are already in place.
        Err(_) if index >= 0 => index as usize,
        Err(_) => len.get() - index.unsigned_abs(),
    }
}

/// A contiguous range key with optional ends, like `a..b`, `a..`, `..b` and `..`.
///
/// Omitted ends are resolved against the container length at the time of the call:
/// start defaults to `0` and stop to the length. A stride may be recorded with
/// [`Span::step_by`], but only unit stride is accepted by the range operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Span {
    pub fn new(start: isize, stop: isize) -> Self {
        Span {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    pub fn step_by(self, step: isize) -> Self {
        Span {
            step: Some(step),
            ..self
        }
    }

    /// Resolves omitted ends against `len` and checks that the span is a forward unit-stride run.
    pub fn bounds(&self, len: usize) -> Result<(isize, isize)> {
        match self.step {
            None | Some(1) => {}
            Some(step) => return Err(Error::Stride(step)),
        }
        let start = self.start.unwrap_or(0);
        let stop = self.stop.unwrap_or_else(|| signed(len));
        if stop < start {
            return Err(Error::ReversedRange { start, stop });
        }
        Ok((start, stop))
    }
}

/// Number of elements between `start` and `stop`, where `stop >= start`.
#[inline]
pub(crate) fn run_len(start: isize, stop: isize) -> usize {
    debug_assert!(stop >= start);
    // The true difference always fits in usize once the ends are ordered.
    stop.wrapping_sub(start) as usize
}

impl From<Range<isize>> for Span {
    fn from(range: Range<isize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<RangeFrom<isize>> for Span {
    fn from(range: RangeFrom<isize>) -> Self {
        Span {
            start: Some(range.start),
            ..Span::default()
        }
    }
}

impl From<RangeTo<isize>> for Span {
    fn from(range: RangeTo<isize>) -> Self {
        Span {
            stop: Some(range.end),
            ..Span::default()
        }
    }
}

impl From<RangeFull> for Span {
    fn from(_: RangeFull) -> Self {
        Span::default()
    }
}

/// Physical ranges of a logical run, one per pass around the ring.
#[derive(Clone, Debug)]
pub struct Segments {
    cursor: usize,
    remaining: usize,
    len: usize,
}

impl Segments {
    pub fn new(start: isize, n: usize, len: NonZeroUsize) -> Self {
        Segments {
            cursor: wrap(start, len),
            remaining: n,
            len: len.get(),
        }
    }

    /// Only the final `len` elements of the run, with the count of leading elements skipped.
    pub fn last_pass(start: isize, n: usize, len: NonZeroUsize) -> (usize, Self) {
        let skip = n.saturating_sub(len.get());
        let cursor = wrap(start, len);
        let shift = skip % len.get();
        let cursor = if cursor >= len.get() - shift {
            cursor - (len.get() - shift)
        } else {
            cursor + shift
        };
        let segments = Segments {
            cursor,
            remaining: n - skip,
            len: len.get(),
        };
        (skip, segments)
    }
}

impl Iterator for Segments {
    type Item = Range<usize>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let take = self.remaining.min(self.len - self.cursor);
        let range = self.cursor..(self.cursor + take);
        self.remaining -= take;
        self.cursor = 0;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = if self.remaining == 0 {
            0
        } else {
            let first = self.remaining.min(self.len - self.cursor);
            let rest = self.remaining - first;
            1 + rest / self.len + (rest % self.len != 0) as usize
        };
        (count, Some(count))
    }
}

impl ExactSizeIterator for Segments {}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn split(start: isize, n: usize, ring: usize) -> Vec<Range<usize>> {
        Segments::new(start, n, len(ring)).collect()
    }

    #[test]
    fn wrap_uses_floor_mod() {
        assert_eq!(wrap(5, len(3)), 2);
        assert_eq!(wrap(-1, len(3)), 2);
        assert_eq!(wrap(-3, len(3)), 0);
        assert_eq!(wrap(-4, len(3)), 2);
        assert_eq!(wrap(0, len(1)), 0);
        assert_eq!(wrap(isize::MIN, len(3)), (isize::MIN).rem_euclid(3) as usize);
    }

    #[test]
    fn wrap_beyond_isize() {
        let huge = len(usize::MAX);
        assert_eq!(wrap(5, huge), 5);
        assert_eq!(wrap(-1, huge), usize::MAX - 1);
    }

    #[test]
    fn run_inside_the_ring_is_one_segment() {
        assert_eq!(split(0, 3, 3), vec![0..3]);
        assert_eq!(split(4, 2, 3), vec![1..3]);
    }

    #[test]
    fn run_across_the_seam_splits() {
        assert_eq!(split(2, 2, 3), vec![2..3, 0..1]);
        assert_eq!(split(-1, 2, 3), vec![2..3, 0..1]);
    }

    #[test]
    fn overlong_run_makes_a_segment_per_pass() {
        assert_eq!(split(0, 7, 3), vec![0..3, 0..3, 0..1]);
        assert_eq!(split(1, 8, 3), vec![1..3, 0..3, 0..3]);
    }

    #[test]
    fn last_pass_covers_each_slot_once() {
        let (skip, segments) = Segments::last_pass(2, 7, len(3));
        assert_eq!(skip, 4);
        assert_eq!(segments.collect::<Vec<_>>(), vec![0..3]);

        let (skip, segments) = Segments::last_pass(-1, 5, len(3));
        assert_eq!(skip, 2);
        assert_eq!(segments.collect::<Vec<_>>(), vec![1..3, 0..1]);

        let (skip, segments) = Segments::last_pass(2, 2, len(3));
        assert_eq!(skip, 0);
        assert_eq!(segments.collect::<Vec<_>>(), vec![2..3, 0..1]);
    }

    #[test]
    fn empty_run_has_no_segments() {
        assert!(split(2, 0, 3).is_empty());
    }

    #[test]
    fn size_hint_is_exact() {
        for &(start, n, ring) in [(0, 7, 3), (1, 8, 3), (2, 2, 3), (0, 0, 5), (4, 1, 5)].iter() {
            let segments = Segments::new(start, n, len(ring));
            assert_eq!(segments.len(), segments.clone().count());
        }
    }

    #[test]
    fn span_defaults_follow_the_length() {
        assert_eq!(Span::from(..).bounds(4), Ok((0, 4)));
        assert_eq!(Span::from(2isize..).bounds(4), Ok((2, 4)));
        assert_eq!(
            Span::from(..-1isize).bounds(4),
            Err(Error::ReversedRange { start: 0, stop: -1 })
        );
        assert_eq!(Span::from(-1isize..1).bounds(4), Ok((-1, 1)));
    }

    #[test]
    fn span_rejects_strides_and_reversal() {
        assert_eq!(Span::new(0, 4).step_by(2).bounds(4), Err(Error::Stride(2)));
        assert_eq!(Span::new(0, 4).step_by(-1).bounds(4), Err(Error::Stride(-1)));
        assert_eq!(Span::new(0, 4).step_by(1).bounds(4), Ok((0, 4)));
        assert_eq!(
            Span::new(3, 1).bounds(4),
            Err(Error::ReversedRange { start: 3, stop: 1 })
        );
    }

    #[test]
    fn run_len_spans_the_whole_index_space() {
        assert_eq!(run_len(-2, 5), 7);
        assert_eq!(run_len(isize::MIN, isize::MAX), usize::MAX);
    }
}
