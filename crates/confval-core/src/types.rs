//! Payload types shared by every [`Value`] flavour.
//!
//! Containers are parametrized on the same allocation strategy as the value
//! that owns them. Objects are plain vectors of `(key, value)` pairs rather
//! than a map: lookup is a linear scan, insertion appends, and insertion
//! order is what iteration yields.

use crate::alloc::{Allocator, Global};
use crate::value::Value;
use allocator_api2::vec::Vec;
use std::fmt;
use std::ops::Deref;

/// Which payload a [`Value`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Floating,
    String,
    Array,
    Object,
}

impl Kind {
    /// Lower-case name, as used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Floating => "floating",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered sequence of values.
pub type Array<A = Global> = Vec<Value<A>, A>;

/// One `(key, value)` pair of an [`Object`].
pub type Entry<A = Global> = (ValueString<A>, Value<A>);

/// Ordered sequence of key/value pairs. Keys are not deduplicated.
pub type Object<A = Global> = Vec<Entry<A>, A>;

/// Owned UTF-8 string whose buffer lives in the given allocator.
///
/// The bytes are only ever written from `&str` or `char`, so the buffer is
/// always valid UTF-8.
pub struct ValueString<A: Allocator = Global> {
    buf: Vec<u8, A>,
}

impl ValueString<Global> {
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<A: Allocator> ValueString<A> {
    /// Empty string allocated in `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            buf: Vec::new_in(alloc),
        }
    }

    /// Copy `s` into a new buffer allocated in `alloc`.
    pub fn from_str_in(s: &str, alloc: A) -> Self {
        let mut buf = Vec::with_capacity_in(s.len(), alloc);
        buf.extend_from_slice(s.as_bytes());
        Self { buf }
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: `buf` is only extended from `&str`/`char` data, so it is valid UTF-8.
        unsafe { std::str::from_utf8_unchecked(&self.buf) }
    }

    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn push(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.push_str(c.encode_utf8(&mut tmp));
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// The allocator the buffer lives in.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl Default for ValueString<Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator + Clone> Clone for ValueString<A> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
        }
    }
}

impl<A: Allocator> Deref for ValueString<A> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<A: Allocator> AsRef<str> for ValueString<A> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<A: Allocator, B: Allocator> PartialEq<ValueString<B>> for ValueString<A> {
    fn eq(&self, other: &ValueString<B>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<A: Allocator> Eq for ValueString<A> {}

impl<A: Allocator> PartialEq<str> for ValueString<A> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<A: Allocator> PartialEq<&str> for ValueString<A> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<A: Allocator> PartialEq<String> for ValueString<A> {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<A: Allocator> fmt::Debug for ValueString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<A: Allocator> fmt::Display for ValueString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
