//! Allocation strategies a [`Value`] can be bound to.
//!
//! A strategy is any [`Allocator`] that can be cheaply cloned: the value
//! keeps one handle and hands a clone to every string, array and object it
//! creates, so a whole tree lives in one place.
//!
//! Two flavours are provided out of the box:
//!
//! - [`HeapValue`] uses [`Global`], the process heap.
//! - [`ArenaValue`] uses a borrowed [`Arena`] (a `bumpalo` bump allocator).
//!   Memory is reclaimed when the arena is dropped or reset; the borrow
//!   checker keeps every value from outliving it.
//!
//! ```
//! # #[cfg(feature = "arena")] {
//! use confval_core::{Arena, ArenaValue};
//!
//! let arena = Arena::new();
//! let mut root = ArenaValue::new_in(&arena);
//! root["listen"]["port"].assign(8080);
//! assert_eq!(root["listen"]["port"].get::<u16>().unwrap(), 8080);
//! # }
//! ```

use crate::value::Value;

pub use allocator_api2::alloc::{Allocator, Global};

/// Allocator handle that can be copied into nested containers.
pub trait Strategy: Allocator + Clone {}

impl<A: Allocator + Clone> Strategy for A {}

/// Value whose nested storage lives on the global heap.
pub type HeapValue = Value<Global>;

#[cfg(feature = "arena")]
pub use bumpalo::Bump as Arena;

/// Value whose nested storage lives in a bump arena.
#[cfg(feature = "arena")]
pub type ArenaValue<'bump> = Value<&'bump Arena>;
