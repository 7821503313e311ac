//! Circular views over fixed-length sequences and bit tracks.

pub mod error;
pub mod linear;
pub mod span;
pub mod view;

pub use self::{
    error::{Error, Result},
    linear::{Linear, Segment},
    span::{wrap, Segments, Span},
    view::{CircularBits, CircularVec, CircularView},
};
