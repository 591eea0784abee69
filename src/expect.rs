//! Sets of token kinds that may legally come next.
//!
//! The JSON and path grammars both have positions with several legal
//! continuations (after a nested `}` either `,` or another closer may
//! follow), so their consumers track a set rather than a single state.

use std::fmt;
use std::marker::PhantomData;

/// A member of an [`ExpectSet`]. Implementors are fieldless enums with at
/// most 32 variants.
pub trait Expect: Copy + fmt::Debug {
    fn bit(self) -> u32;
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ExpectSet<E> {
    bits: u32,
    _kind: PhantomData<E>,
}

impl<E: Expect> ExpectSet<E> {
    pub fn of(members: &[E]) -> Self {
        ExpectSet {
            bits: members.iter().fold(0, |bits, m| bits | m.bit()),
            _kind: PhantomData,
        }
    }

    pub fn contains(&self, member: E) -> bool {
        self.bits & member.bit() != 0
    }

    /// True when `member` is the only legal continuation.
    pub fn is_only(&self, member: E) -> bool {
        self.bits == member.bit()
    }
}

impl<E: Expect> fmt::Debug for ExpectSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpectSet({:#b})", self.bits)
    }
}
