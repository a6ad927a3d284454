//! # confval-core
//!
//! An in-memory, dynamically-typed configuration value. A [`Value`] holds one
//! of seven kinds (null, boolean, 64-bit integer, double, string, array of
//! values, ordered key/value object) and offers checked, typed reads on top.
//!
//! The allocation strategy is a type parameter: [`HeapValue`] uses the global
//! heap, [`ArenaValue`] places every nested string, array and object in a
//! caller-supplied bump arena. Both behave identically.
//!
//! ## Quick start
//!
//! ```rust
//! use confval_core::{ConversionError, Value};
//!
//! let mut root = Value::new();
//! root["server"]["port"].assign(8080);
//! root["server"]["host"].assign("localhost");
//! root["ratio"].assign(3.5);
//!
//! assert_eq!(root["server"]["port"].get::<u16>().unwrap(), 8080);
//! assert_eq!(root["ratio"].try_get::<i32>(), Err(ConversionError::FractionalLoss));
//! assert!(root.at("missing").is_err());
//! ```
//!
//! ## Modules
//!
//! - [`value`]: storage, kind inspection, raw accessors, mutators, object/array helpers
//! - [`convert`]: the conversion engine (`get`, `try_get`, `get_ref`, `get_to`, `coerce`)
//! - [`assign`]: the `assign` overload set
//! - [`alloc`]: allocation strategies (heap, arena)
//! - [`types`]: [`Kind`], [`ValueString`] and the container aliases
//! - [`error`]: conversion, lookup and raising-channel errors

pub mod alloc;
pub mod assign;
pub mod convert;
pub mod error;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod types;
pub mod value;

#[cfg(feature = "arena")]
pub use alloc::{Arena, ArenaValue};
pub use alloc::{Allocator, Global, HeapValue, Strategy};
pub use assign::Assign;
pub use convert::{FromValue, Payload};
pub use error::{ConversionError, Error, LookupError, Result};
#[cfg(feature = "serde")]
pub use serde_impl::{from_json, from_json_in, to_json, to_json_pretty, ValueSeed};
pub use types::{Array, Entry, Kind, Object, ValueString};
pub use value::Value;
