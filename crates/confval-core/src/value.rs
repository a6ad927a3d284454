//! The dynamically-typed [`Value`].
//!
//! A `Value` holds exactly one of seven payloads (see [`Kind`]) and owns its
//! children exclusively, so a document is a plain tree. `Clone` is a deep
//! copy. This module covers storage, kind inspection, the exact-kind raw
//! accessors and the mutators; conversions live in [`crate::convert`].
//!
//! # Auto-vivification
//!
//! `value["key"]` (and [`Value::entry`], [`Value::ensure_object`]) turn a
//! non-object value into an empty object first. **Whatever the value held
//! before is discarded**, including arrays and strings. This is what makes
//! `root["a"]["b"].assign(42)` work on a fresh value; use [`Value::at`] when
//! a missing key or a wrong kind should be reported instead.

use crate::alloc::{Global, Strategy};
use crate::assign::Assign;
use crate::error::LookupError;
use crate::types::{Array, Entry, Kind, Object, ValueString};
use allocator_api2::vec::Vec;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Tagged storage. The active variant is the kind; there is no separate tag.
#[derive(Clone)]
pub(crate) enum Storage<A: Strategy> {
    Null,
    Boolean(bool),
    Integer(i64),
    Floating(f64),
    String(ValueString<A>),
    Array(Array<A>),
    Object(Object<A>),
}

/// A JSON-like value bound to an allocation strategy `A`.
#[derive(Clone)]
pub struct Value<A: Strategy = Global> {
    pub(crate) storage: Storage<A>,
    alloc: A,
}

impl Value<Global> {
    /// Null value on the heap.
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl Default for Value<Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Strategy> Value<A> {
    /// Null value bound to `alloc`. Every container this value later creates
    /// is allocated from a clone of `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            storage: Storage::Null,
            alloc,
        }
    }

    /// The allocation strategy this value is bound to.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    // ------------------------------------------------------------------
    // Kind inspection
    // ------------------------------------------------------------------

    /// Which of the seven payloads is active.
    pub fn kind(&self) -> Kind {
        match self.storage {
            Storage::Null => Kind::Null,
            Storage::Boolean(_) => Kind::Boolean,
            Storage::Integer(_) => Kind::Integer,
            Storage::Floating(_) => Kind::Floating,
            Storage::String(_) => Kind::String,
            Storage::Array(_) => Kind::Array,
            Storage::Object(_) => Kind::Object,
        }
    }

    /// `kind() == Kind::Null`.
    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }

    /// `kind() == Kind::Boolean`.
    pub fn is_bool(&self) -> bool {
        self.kind() == Kind::Boolean
    }

    /// `kind() == Kind::Integer`.
    pub fn is_integer(&self) -> bool {
        self.kind() == Kind::Integer
    }

    /// `kind() == Kind::Floating`.
    pub fn is_floating(&self) -> bool {
        self.kind() == Kind::Floating
    }

    /// `kind() == Kind::String`.
    pub fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }

    /// `kind() == Kind::Array`.
    pub fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }

    /// `kind() == Kind::Object`.
    pub fn is_object(&self) -> bool {
        self.kind() == Kind::Object
    }

    // ------------------------------------------------------------------
    // Raw accessors
    //
    // Each requires the matching kind and panics otherwise. Check `kind()`
    // first, or go through `get`/`try_get`/`get_ref` instead.
    // ------------------------------------------------------------------

    /// # Panics
    ///
    /// Panics if the value is not a boolean.
    #[track_caller]
    pub fn as_bool(&self) -> &bool {
        match &self.storage {
            Storage::Boolean(b) => b,
            _ => kind_violation(Kind::Boolean, self.kind()),
        }
    }

    /// Mutable counterpart of [`Value::as_bool`]; panics unless this is a boolean.
    #[track_caller]
    pub fn as_bool_mut(&mut self) -> &mut bool {
        let found = self.kind();
        match &mut self.storage {
            Storage::Boolean(b) => b,
            _ => kind_violation(Kind::Boolean, found),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an integer.
    #[track_caller]
    pub fn as_integer(&self) -> &i64 {
        match &self.storage {
            Storage::Integer(i) => i,
            _ => kind_violation(Kind::Integer, self.kind()),
        }
    }

    /// Mutable counterpart of [`Value::as_integer`]; panics unless this is an integer.
    #[track_caller]
    pub fn as_integer_mut(&mut self) -> &mut i64 {
        let found = self.kind();
        match &mut self.storage {
            Storage::Integer(i) => i,
            _ => kind_violation(Kind::Integer, found),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a floating value.
    #[track_caller]
    pub fn as_floating(&self) -> &f64 {
        match &self.storage {
            Storage::Floating(f) => f,
            _ => kind_violation(Kind::Floating, self.kind()),
        }
    }

    /// Mutable counterpart of [`Value::as_floating`]; panics unless this is a floating value.
    #[track_caller]
    pub fn as_floating_mut(&mut self) -> &mut f64 {
        let found = self.kind();
        match &mut self.storage {
            Storage::Floating(f) => f,
            _ => kind_violation(Kind::Floating, found),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a string.
    #[track_caller]
    pub fn as_string(&self) -> &ValueString<A> {
        match &self.storage {
            Storage::String(s) => s,
            _ => kind_violation(Kind::String, self.kind()),
        }
    }

    /// Mutable counterpart of [`Value::as_string`]; panics unless this is a string.
    #[track_caller]
    pub fn as_string_mut(&mut self) -> &mut ValueString<A> {
        let found = self.kind();
        match &mut self.storage {
            Storage::String(s) => s,
            _ => kind_violation(Kind::String, found),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an array.
    #[track_caller]
    pub fn as_array(&self) -> &Array<A> {
        match &self.storage {
            Storage::Array(a) => a,
            _ => kind_violation(Kind::Array, self.kind()),
        }
    }

    /// Mutable counterpart of [`Value::as_array`]; panics unless this is an array.
    #[track_caller]
    pub fn as_array_mut(&mut self) -> &mut Array<A> {
        let found = self.kind();
        match &mut self.storage {
            Storage::Array(a) => a,
            _ => kind_violation(Kind::Array, found),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an object.
    #[track_caller]
    pub fn as_object(&self) -> &Object<A> {
        match &self.storage {
            Storage::Object(o) => o,
            _ => kind_violation(Kind::Object, self.kind()),
        }
    }

    /// Mutable counterpart of [`Value::as_object`]; panics unless this is an object.
    #[track_caller]
    pub fn as_object_mut(&mut self) -> &mut Object<A> {
        let found = self.kind();
        match &mut self.storage {
            Storage::Object(o) => o,
            _ => kind_violation(Kind::Object, found),
        }
    }

    // ------------------------------------------------------------------
    // Mutators
    //
    // Every setter drops the previous payload, whatever its kind.
    // ------------------------------------------------------------------

    /// Replace the payload with null.
    pub fn set_null(&mut self) {
        self.storage = Storage::Null;
    }

    /// Replace the payload with a boolean.
    pub fn set_bool(&mut self, value: bool) {
        self.storage = Storage::Boolean(value);
    }

    /// Replace the payload with an integer.
    pub fn set_integer(&mut self, value: i64) {
        self.storage = Storage::Integer(value);
    }

    /// Replace the payload with a floating value.
    pub fn set_floating(&mut self, value: f64) {
        self.storage = Storage::Floating(value);
    }

    /// Replace the payload with a copy of `value`.
    pub fn set_string(&mut self, value: &str) {
        self.storage = Storage::String(ValueString::from_str_in(value, self.alloc.clone()));
    }

    /// Replace the payload with an empty array.
    pub fn set_array(&mut self) {
        self.storage = Storage::Array(Vec::new_in(self.alloc.clone()));
    }

    /// Replace the payload with an empty object.
    pub fn set_object(&mut self) {
        self.storage = Storage::Object(Vec::new_in(self.alloc.clone()));
    }

    /// Assign from a scalar, a string, or another value.
    ///
    /// Integers become [`Kind::Integer`], floats [`Kind::Floating`], `bool`
    /// [`Kind::Boolean`] and string-likes a copied [`Kind::String`]. Passing a
    /// `Value` moves it in along with its strategy; passing `&Value` (of any
    /// strategy) deep-copies it into this value's strategy.
    pub fn assign<T: Assign<A>>(&mut self, value: T) {
        value.assign_to(self);
    }

    /// Move the payload out, leaving an emptied payload of the same kind.
    ///
    /// Strings, arrays and objects are left empty (on the same strategy),
    /// scalars keep their value, and null stays null.
    pub fn take(&mut self) -> Self {
        let emptied = match &self.storage {
            Storage::Null => Storage::Null,
            Storage::Boolean(b) => Storage::Boolean(*b),
            Storage::Integer(i) => Storage::Integer(*i),
            Storage::Floating(f) => Storage::Floating(*f),
            Storage::String(_) => Storage::String(ValueString::new_in(self.alloc.clone())),
            Storage::Array(_) => Storage::Array(Vec::new_in(self.alloc.clone())),
            Storage::Object(_) => Storage::Object(Vec::new_in(self.alloc.clone())),
        };
        Self {
            storage: std::mem::replace(&mut self.storage, emptied),
            alloc: self.alloc.clone(),
        }
    }

    /// Deep copy of this tree with every nested container allocated from `alloc`.
    pub fn clone_in<B: Strategy>(&self, alloc: B) -> Value<B> {
        let storage = match &self.storage {
            Storage::Null => Storage::Null,
            Storage::Boolean(b) => Storage::Boolean(*b),
            Storage::Integer(i) => Storage::Integer(*i),
            Storage::Floating(f) => Storage::Floating(*f),
            Storage::String(s) => Storage::String(ValueString::from_str_in(s, alloc.clone())),
            Storage::Array(array) => {
                let mut copy = Vec::with_capacity_in(array.len(), alloc.clone());
                copy.extend(array.iter().map(|element| element.clone_in(alloc.clone())));
                Storage::Array(copy)
            }
            Storage::Object(object) => {
                let mut copy = Vec::with_capacity_in(object.len(), alloc.clone());
                copy.extend(object.iter().map(|(key, value)| {
                    (
                        ValueString::from_str_in(key, alloc.clone()),
                        value.clone_in(alloc.clone()),
                    )
                }));
                Storage::Object(copy)
            }
        };
        Value { storage, alloc }
    }

    // ------------------------------------------------------------------
    // Object helpers
    // ------------------------------------------------------------------

    /// Make this value an object, discarding any other payload, and return it.
    pub fn ensure_object(&mut self) -> &mut Object<A> {
        if !self.is_object() {
            self.discarding(Kind::Object);
            self.set_object();
        }
        self.as_object_mut()
    }

    /// Whether this is an object with a pair keyed `key`. `false` for non-objects.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// The first pair keyed `key`, or `None` if absent or not an object.
    pub fn find(&self, key: &str) -> Option<&Entry<A>> {
        match &self.storage {
            Storage::Object(object) => object.iter().find(|(k, _)| k.as_str() == key),
            _ => None,
        }
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry<A>> {
        match &mut self.storage {
            Storage::Object(object) => object.iter_mut().find(|(k, _)| k.as_str() == key),
            _ => None,
        }
    }

    /// Auto-vivifying object access, the `value["key"]` of [`IndexMut`].
    ///
    /// A non-object value is first replaced with an empty object (its old
    /// payload is lost). A missing key is appended with a null value. Never
    /// fails.
    pub fn entry(&mut self, key: &str) -> &mut Value<A> {
        let alloc = self.alloc.clone();
        let object = self.ensure_object();
        let index = match object.iter().position(|(k, _)| k.as_str() == key) {
            Some(index) => index,
            None => {
                object.push((
                    ValueString::from_str_in(key, alloc.clone()),
                    Value::new_in(alloc),
                ));
                object.len() - 1
            }
        };
        &mut object[index].1
    }

    /// Bounds-checked object access. Never inserts.
    pub fn at(&self, key: &str) -> Result<&Value<A>, LookupError> {
        match &self.storage {
            Storage::Object(_) => self
                .find(key)
                .map(|(_, value)| value)
                .ok_or_else(|| LookupError::KeyNotFound {
                    key: key.to_owned(),
                }),
            _ => Err(LookupError::NotAnObject { found: self.kind() }),
        }
    }

    pub fn at_mut(&mut self, key: &str) -> Result<&mut Value<A>, LookupError> {
        let found = self.kind();
        match &mut self.storage {
            Storage::Object(object) => object
                .iter_mut()
                .find(|(k, _)| k.as_str() == key)
                .map(|(_, value)| value)
                .ok_or_else(|| LookupError::KeyNotFound {
                    key: key.to_owned(),
                }),
            _ => Err(LookupError::NotAnObject { found }),
        }
    }

    // ------------------------------------------------------------------
    // Array helpers
    // ------------------------------------------------------------------

    /// Make this value an array, discarding any other payload, and return it.
    pub fn ensure_array(&mut self) -> &mut Array<A> {
        if !self.is_array() {
            self.discarding(Kind::Array);
            self.set_array();
        }
        self.as_array_mut()
    }

    /// Append a new element assigned from `value`, turning this value into
    /// an array first if needed. Returns the new element.
    pub fn push<T: Assign<A>>(&mut self, value: T) -> &mut Value<A> {
        let mut element = Value::new_in(self.alloc.clone());
        element.assign(value);
        let array = self.ensure_array();
        array.push(element);
        let last = array.len() - 1;
        &mut array[last]
    }

    /// Bounds-checked array access.
    pub fn at_index(&self, index: usize) -> Result<&Value<A>, LookupError> {
        match &self.storage {
            Storage::Array(array) => array.get(index).ok_or(LookupError::IndexOutOfBounds {
                index,
                len: array.len(),
            }),
            _ => Err(LookupError::NotAnArray { found: self.kind() }),
        }
    }

    pub fn at_index_mut(&mut self, index: usize) -> Result<&mut Value<A>, LookupError> {
        let found = self.kind();
        match &mut self.storage {
            Storage::Array(array) => {
                let len = array.len();
                array
                    .get_mut(index)
                    .ok_or(LookupError::IndexOutOfBounds { index, len })
            }
            _ => Err(LookupError::NotAnArray { found }),
        }
    }

    fn discarding(&self, replacement: Kind) {
        if !self.is_null() {
            tracing::debug!(
                discarded = %self.kind(),
                replacement = %replacement,
                "auto-vivification discards existing payload"
            );
        }
    }
}

#[cold]
#[track_caller]
fn kind_violation(expected: Kind, found: Kind) -> ! {
    panic!("expected {expected} value, found {found}")
}

impl<A: Strategy> Index<&str> for Value<A> {
    type Output = Value<A>;

    /// # Panics
    ///
    /// Panics if the value is not an object or `key` is absent. Use
    /// [`Value::at`] for a fallible lookup.
    #[track_caller]
    fn index(&self, key: &str) -> &Value<A> {
        match self.at(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<A: Strategy> IndexMut<&str> for Value<A> {
    fn index_mut(&mut self, key: &str) -> &mut Value<A> {
        self.entry(key)
    }
}

impl<A: Strategy, B: Strategy> PartialEq<Value<B>> for Value<A> {
    fn eq(&self, other: &Value<B>) -> bool {
        match (&self.storage, &other.storage) {
            (Storage::Null, Storage::Null) => true,
            (Storage::Boolean(a), Storage::Boolean(b)) => a == b,
            (Storage::Integer(a), Storage::Integer(b)) => a == b,
            (Storage::Floating(a), Storage::Floating(b)) => a == b,
            (Storage::String(a), Storage::String(b)) => a == b,
            (Storage::Array(a), Storage::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Storage::Object(a), Storage::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
            }
            _ => false,
        }
    }
}

impl<A: Strategy> fmt::Debug for Value<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Null => f.write_str("Null"),
            Storage::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Storage::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Storage::Floating(x) => f.debug_tuple("Floating").field(x).finish(),
            Storage::String(s) => f.debug_tuple("String").field(s).finish(),
            Storage::Array(array) => {
                f.write_str("Array ")?;
                f.debug_list().entries(array.iter()).finish()
            }
            Storage::Object(object) => {
                f.write_str("Object ")?;
                f.debug_map()
                    .entries(object.iter().map(|(k, v)| (k, v)))
                    .finish()
            }
        }
    }
}
