use crate::{
    error::{Error, Result},
    linear::{Linear, Segment},
    span::{run_len, wrap, Segments, Span},
};
use bitvec::vec::BitVec;
use std::{convert::TryFrom, num::NonZeroUsize};

/// Circular view over a list of arbitrary values.
pub type CircularVec<T> = CircularView<Vec<T>>;

/// Circular view over a track of bits.
pub type CircularBits = CircularView<BitVec>;

/// Wrap-aware access to a fixed-length container, or plain access with `circular` off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircularView<C> {
    inner: C,
    circular: bool,
}

impl<C: Linear> CircularView<C> {
    pub fn new(inner: C) -> Self {
        CircularView::with_mode(inner, true)
    }

    pub fn with_mode(inner: C, circular: bool) -> Self {
        CircularView { inner, circular }
    }

    pub fn circular(&self) -> bool {
        self.circular
    }

    /// Takes effect on the next operation.
    pub fn set_circular(&mut self, circular: bool) {
        self.circular = circular;
    }

    pub fn len(&self) -> usize {
        self.inner.length()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn get(&self, index: isize) -> Result<C::Item> {
        let index = self.physical(index)?;
        self.inner.get_at(index)
    }

    pub fn set(&mut self, index: isize, value: C::Item) -> Result<()> {
        let index = self.physical(index)?;
        self.inner.set_at(index, value)
    }

    /// Reads `start..stop`, which may be longer than the container in circular mode.
    pub fn get_range(&self, start: isize, stop: isize) -> Result<C::Owned> {
        self.get_span(Span::new(start, stop))
    }

    /// Writes `values` over `start..stop`; `values` must be exactly `stop - start` long.
    pub fn set_range(&mut self, start: isize, stop: isize, values: &C::Slice) -> Result<()> {
        self.set_span(Span::new(start, stop), values)
    }

    pub fn get_span<S: Into<Span>>(&self, span: S) -> Result<C::Owned> {
        let (start, stop) = span.into().bounds(self.len())?;
        let n = run_len(start, stop);

        if !self.circular {
            if n == 0 {
                return Ok(C::Owned::default());
            }
            let (lo, hi) = self.linear_bounds(start, stop)?;
            return self.inner.get_slice(lo, hi);
        }

        let segments = Segments::new(start, n, self.ring_len()?);
        self.trace_seam(start, stop, segments.len());
        let mut out = C::Owned::default();
        for range in segments {
            out.extend(self.inner.get_slice(range.start, range.end)?);
        }
        Ok(out)
    }

    pub fn set_span<S: Into<Span>>(&mut self, span: S, values: &C::Slice) -> Result<()> {
        let (start, stop) = span.into().bounds(self.len())?;
        let n = run_len(start, stop);
        if values.len() != n {
            return Err(Error::LengthMismatch {
                expected: n,
                actual: values.len(),
            });
        }

        if !self.circular {
            if n == 0 {
                return Ok(());
            }
            let (lo, hi) = self.linear_bounds(start, stop)?;
            return self.inner.set_slice(lo, hi, values);
        }

        // Earlier passes are overwritten by the last one.
        let (skip, segments) = Segments::last_pass(start, n, self.ring_len()?);
        self.trace_seam(start, stop, segments.len());
        let mut offset = skip;
        for range in segments {
            let next = offset + range.len();
            self.inner
                .set_slice(range.start, range.end, values.part(offset..next))?;
            offset = next;
        }
        Ok(())
    }

    fn ring_len(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.len()).ok_or(Error::EmptyContainer)
    }

    fn physical(&self, index: isize) -> Result<usize> {
        if self.circular {
            return Ok(wrap(index, self.ring_len()?));
        }
        usize::try_from(index).map_err(|_| Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    fn linear_bounds(&self, start: isize, stop: isize) -> Result<(usize, usize)> {
        match (usize::try_from(start), usize::try_from(stop)) {
            (Ok(lo), Ok(hi)) => Ok((lo, hi)),
            _ => Err(Error::RangeOutOfRange {
                start,
                stop,
                len: self.len(),
            }),
        }
    }

    fn trace_seam(&self, start: isize, stop: isize, segments: usize) {
        if segments > 1 {
            log::trace!(
                "{}..{} crosses the seam of a {} long ring, {} segments",
                start,
                stop,
                self.len(),
                segments
            );
        }
    }
}

impl<C: Linear> From<C> for CircularView<C> {
    fn from(inner: C) -> Self {
        CircularView::new(inner)
    }
}
