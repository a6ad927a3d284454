//! Conversion engine: `get`, `try_get`, `get_ref`, `get_to` and `coerce`.
//!
//! Every entry point funnels into [`FromValue::from_value`] (or, for
//! reference access, [`Payload`]); they differ only in how a failure is
//! reported.
//!
//! | Entry point | Access | Failure |
//! |---|---|---|
//! | [`Value::get`] | converted copy | [`Error`] |
//! | [`Value::get_ref`] / [`Value::get_mut`] | exact-kind reference | [`Error`] |
//! | [`Value::get_to`] | converted, written to `out` | [`Error`] |
//! | [`Value::try_get`] | converted copy | [`ConversionError`] |
//! | [`Value::coerce`] | converted copy, strings parsed | [`Error`] |
//!
//! # Numeric rules
//!
//! - **Integer** source: `bool` is `!= 0`; integer targets are range checked
//!   ([`ConversionError::OutOfRange`]); float targets always succeed.
//! - **Floating** source: non-finite values are out of range. Float targets
//!   are range checked. Integer targets (and `bool`) must have no fractional
//!   part ([`ConversionError::FractionalLoss`]) and then fit the range.
//! - **Boolean** source: `0`/`1`, `0.0`/`1.0`, or the boolean itself.
//! - Anything else is a [`ConversionError::TypeMismatch`].
//!
//! Strings, arrays and objects convert only to themselves, by copy.

use crate::alloc::Strategy;
use crate::error::{ConversionError, Error, Result};
use crate::types::{Array, Object, ValueString};
use crate::value::{Storage, Value};

/// A type a [`Value`] can be converted into.
pub trait FromValue<A: Strategy>: Sized {
    /// Type name used in error messages.
    const TARGET: &'static str;

    fn from_value(value: &Value<A>) -> std::result::Result<Self, ConversionError>;

    /// Parse `s` as this type for [`Value::coerce`].
    ///
    /// `None` means the type has no string form and coercion does not apply.
    fn parse(_s: &str) -> Option<std::result::Result<Self, ConversionError>> {
        None
    }
}

/// A payload type that [`Value::get_ref`] can hand out a reference to.
///
/// Implemented for exactly the six stored payload types, so asking for a
/// reference to anything else does not compile.
pub trait Payload<A: Strategy> {
    const TARGET: &'static str;

    fn payload(value: &Value<A>) -> Option<&Self>;
    fn payload_mut(value: &mut Value<A>) -> Option<&mut Self>;
}

impl<A: Strategy> Value<A> {
    /// Convert to `T`, returning the bare conversion code on failure.
    pub fn try_get<T: FromValue<A>>(&self) -> std::result::Result<T, ConversionError> {
        T::from_value(self)
    }

    /// Convert to `T`.
    ///
    /// ```
    /// use confval_core::{ConversionError, Value};
    ///
    /// let mut v = Value::new();
    /// v.assign(300);
    /// assert_eq!(v.get::<i32>().unwrap(), 300);
    /// assert_eq!(v.get::<u8>().unwrap_err().code(), Some(ConversionError::OutOfRange));
    /// ```
    pub fn get<T: FromValue<A>>(&self) -> Result<T> {
        T::from_value(self).map_err(|code| self.conversion_error(code, T::TARGET))
    }

    /// Convert into `out`. `out` is left untouched on failure.
    pub fn get_to<T: FromValue<A>>(&self, out: &mut T) -> Result<()> {
        *out = self.get()?;
        Ok(())
    }

    /// Borrow the stored payload as `T` without any conversion.
    ///
    /// `T` must match the stored kind exactly: an integer value lends out
    /// `&i64`, never `&i32` or `&f64`.
    pub fn get_ref<T: Payload<A>>(&self) -> Result<&T> {
        T::payload(self)
            .ok_or_else(|| self.conversion_error(ConversionError::TypeMismatch, T::TARGET))
    }

    /// Mutable counterpart of [`Value::get_ref`].
    pub fn get_mut<T: Payload<A>>(&mut self) -> Result<&mut T> {
        let found = self.kind();
        T::payload_mut(self).ok_or(Error::Conversion {
            code: ConversionError::TypeMismatch,
            found,
            target: T::TARGET,
        })
    }

    /// Like [`Value::try_get`], but a string is parsed as a number when the
    /// direct conversion fails and `T` is numeric.
    ///
    /// The whole string must match: no surrounding whitespace, no leading
    /// `+`, no trailing characters.
    pub fn try_coerce<T: FromValue<A>>(&self) -> std::result::Result<T, ConversionError> {
        let code = match T::from_value(self) {
            Ok(value) => return Ok(value),
            Err(code) => code,
        };
        if let Storage::String(s) = &self.storage {
            if let Some(parsed) = T::parse(s.as_str()) {
                tracing::trace!(target_type = T::TARGET, "coercing string payload");
                return parsed;
            }
        }
        Err(code)
    }

    /// Raising counterpart of [`Value::try_coerce`].
    ///
    /// ```
    /// use confval_core::Value;
    ///
    /// let mut v = Value::new();
    /// v.assign("123");
    /// assert_eq!(v.coerce::<i32>().unwrap(), 123);
    /// assert!(v.get::<i32>().is_err());
    /// ```
    pub fn coerce<T: FromValue<A>>(&self) -> Result<T> {
        self.try_coerce().map_err(|code| match (&self.storage, code) {
            (Storage::String(s), ConversionError::ParseError) => Error::Parse {
                input: s.as_str().to_owned(),
                target: T::TARGET,
            },
            _ => self.conversion_error(code, T::TARGET),
        })
    }

    fn conversion_error(&self, code: ConversionError, target: &'static str) -> Error {
        Error::Conversion {
            code,
            found: self.kind(),
            target,
        }
    }
}

// ----------------------------------------------------------------------
// Numeric conversions
// ----------------------------------------------------------------------

type Converted<T> = std::result::Result<T, ConversionError>;

/// Arithmetic targets: the per-source conversion rules.
trait Numeric: Sized {
    fn from_i64(value: i64) -> Converted<Self>;
    fn from_f64(value: f64) -> Converted<Self>;
    fn from_bool(value: bool) -> Self;
    fn parse_str(s: &str) -> Converted<Self>;
}

fn convert_numeric<T: Numeric, A: Strategy>(value: &Value<A>) -> Converted<T> {
    match &value.storage {
        Storage::Integer(i) => T::from_i64(*i),
        Storage::Floating(f) => T::from_f64(*f),
        Storage::Boolean(b) => Ok(T::from_bool(*b)),
        _ => Err(ConversionError::TypeMismatch),
    }
}

/// Strip a leading `-`, rejecting a leading `+` outright.
fn unsigned_digits(s: &str) -> Converted<&str> {
    if s.starts_with('+') {
        return Err(ConversionError::ParseError);
    }
    Ok(s.strip_prefix('-').unwrap_or(s))
}

/// Whether the mantissa of a decimal float literal has a nonzero digit.
fn has_nonzero_mantissa(digits: &str) -> bool {
    digits
        .split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.bytes().any(|b| matches!(b, b'1'..=b'9')))
}

macro_rules! numeric_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Numeric for $ty {
            fn from_i64(value: i64) -> Converted<Self> {
                <$ty>::try_from(value).map_err(|_| ConversionError::OutOfRange)
            }

            fn from_f64(value: f64) -> Converted<Self> {
                if !value.is_finite() {
                    return Err(ConversionError::OutOfRange);
                }
                let truncated = value.trunc();
                if truncated != value {
                    return Err(ConversionError::FractionalLoss);
                }
                // Upper bound is exclusive at MAX + 1: `MAX as f64` rounds up
                // to 2^63 / 2^64 for the 64-bit types.
                if truncated < <$ty>::MIN as f64 || truncated >= <$ty>::MAX as f64 + 1.0 {
                    return Err(ConversionError::OutOfRange);
                }
                Ok(truncated as $ty)
            }

            fn from_bool(value: bool) -> Self {
                <$ty>::from(value)
            }

            fn parse_str(s: &str) -> Converted<Self> {
                unsigned_digits(s)?;
                s.parse().map_err(|_| ConversionError::ParseError)
            }
        }
    )*};
}

numeric_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! numeric_float {
    ($($ty:ty),* $(,)?) => {$(
        impl Numeric for $ty {
            fn from_i64(value: i64) -> Converted<Self> {
                Ok(value as $ty)
            }

            fn from_f64(value: f64) -> Converted<Self> {
                if !value.is_finite() {
                    return Err(ConversionError::OutOfRange);
                }
                if value < <$ty>::MIN as f64 || value > <$ty>::MAX as f64 {
                    return Err(ConversionError::OutOfRange);
                }
                Ok(value as $ty)
            }

            fn from_bool(value: bool) -> Self {
                if value { 1.0 } else { 0.0 }
            }

            fn parse_str(s: &str) -> Converted<Self> {
                let digits = unsigned_digits(s)?;
                let parsed: $ty = s.parse().map_err(|_| ConversionError::ParseError)?;
                // A finite literal that overflows parses to infinity.
                if parsed.is_infinite() && !digits.starts_with(['i', 'I']) {
                    return Err(ConversionError::ParseError);
                }
                // A nonzero literal that underflows parses to zero.
                if parsed == 0.0 && has_nonzero_mantissa(digits) {
                    return Err(ConversionError::ParseError);
                }
                Ok(parsed)
            }
        }
    )*};
}

numeric_float!(f32, f64);

impl Numeric for bool {
    fn from_i64(value: i64) -> Converted<Self> {
        Ok(value != 0)
    }

    fn from_f64(value: f64) -> Converted<Self> {
        if !value.is_finite() {
            return Err(ConversionError::OutOfRange);
        }
        if value.trunc() != value {
            return Err(ConversionError::FractionalLoss);
        }
        if value == 0.0 {
            Ok(false)
        } else if value == 1.0 {
            Ok(true)
        } else {
            Err(ConversionError::OutOfRange)
        }
    }

    fn from_bool(value: bool) -> Self {
        value
    }

    fn parse_str(s: &str) -> Converted<Self> {
        match s {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ConversionError::ParseError),
        }
    }
}

macro_rules! from_value_numeric {
    ($($ty:ty),* $(,)?) => {$(
        impl<A: Strategy> FromValue<A> for $ty {
            const TARGET: &'static str = stringify!($ty);

            fn from_value(value: &Value<A>) -> Converted<Self> {
                convert_numeric(value)
            }

            fn parse(s: &str) -> Option<Converted<Self>> {
                Some(<$ty as Numeric>::parse_str(s))
            }
        }
    )*};
}

from_value_numeric!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

// ----------------------------------------------------------------------
// Exact-kind conversions (copies)
// ----------------------------------------------------------------------

impl<A: Strategy> FromValue<A> for ValueString<A> {
    const TARGET: &'static str = "string";

    fn from_value(value: &Value<A>) -> Converted<Self> {
        match &value.storage {
            Storage::String(s) => Ok(s.clone()),
            _ => Err(ConversionError::TypeMismatch),
        }
    }
}

impl<A: Strategy> FromValue<A> for String {
    const TARGET: &'static str = "String";

    fn from_value(value: &Value<A>) -> Converted<Self> {
        match &value.storage {
            Storage::String(s) => Ok(s.as_str().to_owned()),
            _ => Err(ConversionError::TypeMismatch),
        }
    }
}

impl<A: Strategy> FromValue<A> for Array<A> {
    const TARGET: &'static str = "array";

    fn from_value(value: &Value<A>) -> Converted<Self> {
        match &value.storage {
            Storage::Array(array) => Ok(array.clone()),
            _ => Err(ConversionError::TypeMismatch),
        }
    }
}

impl<A: Strategy> FromValue<A> for Object<A> {
    const TARGET: &'static str = "object";

    fn from_value(value: &Value<A>) -> Converted<Self> {
        match &value.storage {
            Storage::Object(object) => Ok(object.clone()),
            _ => Err(ConversionError::TypeMismatch),
        }
    }
}

// ----------------------------------------------------------------------
// Reference access
// ----------------------------------------------------------------------

macro_rules! payload {
    ($ty:ty, $variant:ident, $target:literal) => {
        impl<A: Strategy> Payload<A> for $ty {
            const TARGET: &'static str = $target;

            fn payload(value: &Value<A>) -> Option<&Self> {
                match &value.storage {
                    Storage::$variant(payload) => Some(payload),
                    _ => None,
                }
            }

            fn payload_mut(value: &mut Value<A>) -> Option<&mut Self> {
                match &mut value.storage {
                    Storage::$variant(payload) => Some(payload),
                    _ => None,
                }
            }
        }
    };
}

payload!(bool, Boolean, "&bool");
payload!(i64, Integer, "&i64");
payload!(f64, Floating, "&f64");
payload!(ValueString<A>, String, "&string");
payload!(Array<A>, Array, "&array");
payload!(Object<A>, Object, "&object");
