//! Abstract operations executed by [`Handler`]s.
//!
//! Operations carry no behavior on their own: a storage backend decides what
//! each of them means by implementing [`Handler`] for it.

use std::marker::PhantomData;

use crate::Handler;

/// Operation to store a new value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Operation to overwrite an already stored value.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Operation to load a value, usually described with [`By`].
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Operation to lock a value until the end of the current [`Transact`]ion.
///
/// Concurrent [`Lock`]s of the same value wait for each other.
#[derive(Clone, Copy, Debug)]
pub struct Lock<T>(pub T);

/// Operation to open a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Transact;

/// Handler executing operations inside a [`Transact`]ion opened by `T`.
pub type Transacted<T> = <T as Handler<Transact>>::Ok;

/// Operation to commit a [`Transacted`] handler.
///
/// Nothing done in a transaction is visible until it is committed.
#[derive(Clone, Copy, Debug)]
pub struct Commit;

/// Selector of a `W`hat by a `B`y value.
///
/// `W` only tells which result is expected, so the same `B` (an ID, for
/// example) may select different things.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Expected result.
    _what: PhantomData<W>,

    /// Value to select by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Creates a new [`By`] selector out of the provided value.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Returns the value this [`By`] selects by.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
