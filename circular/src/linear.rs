use crate::error::{signed, Error, Result};
use bitvec::prelude::{BitOrder, BitSlice, BitStore, BitVec};
use std::{borrow::Borrow, ops::Range};

/// A fixed-length ordered container with bounds-checked physical access.
pub trait Linear {
    type Item;
    /// Borrowed run of items accepted by [`Linear::set_slice`].
    type Slice: Segment + ?Sized;
    /// Owned run of items returned by [`Linear::get_slice`].
    type Owned: Default
        + Extend<Self::Item>
        + IntoIterator<Item = Self::Item>
        + Borrow<Self::Slice>;

    fn length(&self) -> usize;

    fn get_at(&self, index: usize) -> Result<Self::Item>;

    fn set_at(&mut self, index: usize, value: Self::Item) -> Result<()>;

    /// Copies `lo..hi` out of the container.
    fn get_slice(&self, lo: usize, hi: usize) -> Result<Self::Owned>;

    /// Overwrites `lo..hi` with `values`, which must be exactly `hi - lo` long.
    fn set_slice(&mut self, lo: usize, hi: usize, values: &Self::Slice) -> Result<()>;
}

/// A borrowed run of items that can be measured and cut into sub-runs.
pub trait Segment {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Panics if `range` is out of bounds.
    fn part(&self, range: Range<usize>) -> &Self;
}

fn index_error(index: usize, len: usize) -> Error {
    Error::IndexOutOfRange {
        index: signed(index),
        len,
    }
}

fn range_error(lo: usize, hi: usize, len: usize) -> Error {
    Error::RangeOutOfRange {
        start: signed(lo),
        stop: signed(hi),
        len,
    }
}

fn check_fit(lo: usize, hi: usize, actual: usize) -> Result<()> {
    let expected = hi.saturating_sub(lo);
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, actual })
    }
}

impl<T> Segment for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn part(&self, range: Range<usize>) -> &Self {
        &self[range]
    }
}

impl<T: Clone> Linear for Vec<T> {
    type Item = T;
    type Slice = [T];
    type Owned = Vec<T>;

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }

    fn get_at(&self, index: usize) -> Result<T> {
        self.get(index)
            .cloned()
            .ok_or_else(|| index_error(index, self.len()))
    }

    fn set_at(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        let slot = self.get_mut(index).ok_or_else(|| index_error(index, len))?;
        *slot = value;
        Ok(())
    }

    fn get_slice(&self, lo: usize, hi: usize) -> Result<Vec<T>> {
        self.get(lo..hi)
            .map(<[T]>::to_vec)
            .ok_or_else(|| range_error(lo, hi, self.len()))
    }

    fn set_slice(&mut self, lo: usize, hi: usize, values: &[T]) -> Result<()> {
        let len = self.len();
        let target = self.get_mut(lo..hi).ok_or_else(|| range_error(lo, hi, len))?;
        check_fit(lo, hi, values.len())?;
        target.clone_from_slice(values);
        Ok(())
    }
}

impl<T: BitStore, O: BitOrder> Segment for BitSlice<T, O> {
    #[inline]
    fn len(&self) -> usize {
        BitSlice::len(self)
    }

    #[inline]
    fn part(&self, range: Range<usize>) -> &Self {
        &self[range]
    }
}

impl<T: BitStore, O: BitOrder> Linear for BitVec<T, O> {
    type Item = bool;
    type Slice = BitSlice<T, O>;
    type Owned = BitVec<T, O>;

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }

    fn get_at(&self, index: usize) -> Result<bool> {
        self.get(index)
            .map(|bit| *bit)
            .ok_or_else(|| index_error(index, self.len()))
    }

    fn set_at(&mut self, index: usize, value: bool) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(index_error(index, len));
        }
        self.set(index, value);
        Ok(())
    }

    fn get_slice(&self, lo: usize, hi: usize) -> Result<BitVec<T, O>> {
        self.get(lo..hi)
            .map(BitVec::from_bitslice)
            .ok_or_else(|| range_error(lo, hi, self.len()))
    }

    fn set_slice(&mut self, lo: usize, hi: usize, values: &BitSlice<T, O>) -> Result<()> {
        let len = self.len();
        let target = self.get_mut(lo..hi).ok_or_else(|| range_error(lo, hi, len))?;
        check_fit(lo, hi, values.len())?;
        target.copy_from_bitslice(values);
        Ok(())
    }
}

impl<C: Linear + ?Sized> Linear for &mut C {
    type Item = C::Item;
    type Slice = C::Slice;
    type Owned = C::Owned;

    #[inline]
    fn length(&self) -> usize {
        (**self).length()
    }

    #[inline]
    fn get_at(&self, index: usize) -> Result<Self::Item> {
        (**self).get_at(index)
    }

    #[inline]
    fn set_at(&mut self, index: usize, value: Self::Item) -> Result<()> {
        (**self).set_at(index, value)
    }

    #[inline]
    fn get_slice(&self, lo: usize, hi: usize) -> Result<Self::Owned> {
        (**self).get_slice(lo, hi)
    }

    #[inline]
    fn set_slice(&mut self, lo: usize, hi: usize, values: &Self::Slice) -> Result<()> {
        (**self).set_slice(lo, hi, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn vec_reads_and_writes_in_bounds() {
        let mut v = vec!['a', 'b', 'c'];
        assert_eq!(v.length(), 3);
        assert_eq!(v.get_at(2), Ok('c'));
        v.set_at(0, 'x').unwrap();
        assert_eq!(v.get_slice(0, 2), Ok(vec!['x', 'b']));
        v.set_slice(1, 3, &['y', 'z']).unwrap();
        assert_eq!(v, vec!['x', 'y', 'z']);
    }

    #[test]
    fn vec_rejects_out_of_range() {
        let mut v = vec![1, 2, 3];
        assert_eq!(v.get_at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(v.set_at(7, 0), Err(Error::IndexOutOfRange { index: 7, len: 3 }));
        assert_eq!(
            v.get_slice(2, 4),
            Err(Error::RangeOutOfRange {
                start: 2,
                stop: 4,
                len: 3
            })
        );
        assert_eq!(
            v.set_slice(2, 1, &[]),
            Err(Error::RangeOutOfRange {
                start: 2,
                stop: 1,
                len: 3
            })
        );
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn vec_never_grows_on_mismatched_write() {
        let mut v = vec![1, 2, 3];
        assert_eq!(
            v.set_slice(0, 1, &[9, 9]),
            Err(Error::LengthMismatch {
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn bits_read_and_write_in_bounds() {
        let mut b = bitvec![1, 0, 1];
        assert_eq!(b.length(), 3);
        assert_eq!(b.get_at(1), Ok(false));
        b.set_at(1, true).unwrap();
        assert_eq!(b.get_slice(0, 2), Ok(bitvec![1, 1]));
        b.set_slice(1, 3, &bitvec![0, 0]).unwrap();
        assert_eq!(b, bitvec![1, 0, 0]);
    }

    #[test]
    fn bits_reject_out_of_range() {
        let mut b = bitvec![1, 0, 1];
        assert_eq!(b.get_at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(b.set_at(3, true), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        assert!(b.get_slice(0, 4).unwrap_err().is_out_of_range());
        assert!(b
            .set_slice(0, 2, &bitvec![1])
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(b, bitvec![1, 0, 1]);
    }

    #[test]
    fn borrowed_container_writes_through() {
        let mut v = vec![1, 2, 3];
        {
            let borrowed = &mut v;
            borrowed.set_at(1, 20).unwrap();
            assert_eq!(Linear::length(&borrowed), 3);
        }
        assert_eq!(v, vec![1, 20, 3]);
    }

    #[test]
    fn segments_cut_slices_and_bits() {
        let v = [1, 2, 3, 4];
        assert_eq!(Segment::part(&v[..], 1..3), &[2, 3]);
        assert_eq!(Segment::len(&v[..]), 4);
        let b = bitvec![1, 0, 1, 1];
        assert_eq!(Segment::part(b.as_bitslice(), 2..4), bits![1, 1]);
        assert!(!Segment::is_empty(b.as_bitslice()));
    }
}
