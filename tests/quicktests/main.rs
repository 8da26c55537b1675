//! Property tests driving the public API of both trees with random operations.

mod balanced;
mod unbalanced;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Add the value to the data structure
    Add(T),
    /// Remove one occurrence of the value from the data structure
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Add(T::arbitrary(g))
        } else {
            Op::Remove(T::arbitrary(g))
        }
    }
}
