// glwindow/src/attributes/mod.rs
//
//! Zero-terminated key/value attribute lists, as consumed by `wglChoosePixelFormatARB`,
//! `glXChooseFBConfig` and the `*CreateContextAttribsARB` entry points.
//!
//! The lists are built on the stack in fixed-size arrays. Keys and values are appended in
//! order, optional properties are dropped when their value is zero, and a `(0, 0)` pair ends
//! the list.

use std::fmt::{self, Debug, Formatter};
use std::os::raw::c_int;

pub mod glx;
pub mod wgl;

/// A fixed-capacity, sentinel-terminated list of `(key, value)` pairs.
///
/// `N` counts `c_int` slots, so a list holds at most `N / 2` pairs, sentinel included.
#[derive(Clone, Copy)]
pub struct AttributeList<const N: usize> {
    slots: [c_int; N],
    len: usize,
    terminated: bool,
}

impl<const N: usize> AttributeList<N> {
    #[inline]
    pub fn new() -> AttributeList<N> {
        AttributeList { slots: [0; N], len: 0, terminated: false }
    }

    /// Appends a pair unconditionally.
    ///
    /// Panics if the pair doesn't fit or if the list was already terminated.
    pub fn push(&mut self, key: c_int, value: c_int) {
        assert!(!self.terminated, "Tried to append to a terminated attribute list!");
        assert!(self.len + 1 < N, "Attribute list capacity ({} slots) exceeded!", N);
        self.slots[self.len] = key;
        self.slots[self.len + 1] = value;
        self.len += 2;
    }

    /// Appends a pair only if `value` is nonzero.
    #[inline]
    pub fn push_if_set(&mut self, key: c_int, value: c_int) {
        if value != 0 {
            self.push(key, value)
        }
    }

    /// Appends the `(0, 0)` sentinel. The list can't grow afterward.
    pub fn terminate(&mut self) {
        self.push(0, 0);
        self.terminated = true;
    }

    /// Builder-style termination.
    #[inline]
    pub fn terminated(mut self) -> AttributeList<N> {
        self.terminate();
        self
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The written prefix of the list, sentinel included if present.
    #[inline]
    pub fn as_slice(&self) -> &[c_int] {
        &self.slots[..self.len]
    }

    /// A pointer suitable for handing to the windowing API.
    ///
    /// Panics if the list hasn't been terminated, since the API would read past the end.
    #[inline]
    pub fn as_ptr(&self) -> *const c_int {
        assert!(self.terminated, "Attribute lists must be terminated before use!");
        self.slots.as_ptr()
    }

    /// Number of slots written, sentinel included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }

    /// The `(key, value)` pairs written so far, not counting the sentinel.
    pub fn pairs(&self) -> impl Iterator<Item = (c_int, c_int)> + '_ {
        let pair_count = if self.terminated { self.len / 2 - 1 } else { self.len / 2 };
        self.slots[..pair_count * 2].chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Looks up the value of the first pair with the given key.
    pub fn get(&self, key: c_int) -> Option<c_int> {
        self.pairs().find(|&(pair_key, _)| pair_key == key).map(|(_, value)| value)
    }
}

impl<const N: usize> Default for AttributeList<N> {
    #[inline]
    fn default() -> AttributeList<N> {
        AttributeList::new()
    }
}

impl<const N: usize> Debug for AttributeList<N> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let mut list = formatter.debug_list();
        for (key, value) in self.pairs() {
            list.entry(&format_args!("{:#06x} = {}", key, value));
        }
        list.finish()
    }
}

#[inline]
pub(crate) fn bool_to_int(value: bool) -> c_int {
    value as c_int
}
