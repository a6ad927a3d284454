//! The overload set behind [`Value::assign`].

use crate::alloc::Strategy;
use crate::types::ValueString;
use crate::value::Value;

/// Something that can be stored into a [`Value`], replacing its payload.
pub trait Assign<A: Strategy> {
    fn assign_to(self, target: &mut Value<A>);
}

macro_rules! assign_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl<A: Strategy> Assign<A> for $ty {
            fn assign_to(self, target: &mut Value<A>) {
                target.set_integer(i64::from(self));
            }
        }
    )*};
}

assign_integer!(i8, i16, i32, i64, u8, u16, u32);

// Values above i64::MAX wrap to the two's-complement i64.
macro_rules! assign_integer_wrapping {
    ($($ty:ty),* $(,)?) => {$(
        impl<A: Strategy> Assign<A> for $ty {
            fn assign_to(self, target: &mut Value<A>) {
                target.set_integer(self as i64);
            }
        }
    )*};
}

assign_integer_wrapping!(isize, u64, usize);

impl<A: Strategy> Assign<A> for f32 {
    fn assign_to(self, target: &mut Value<A>) {
        target.set_floating(f64::from(self));
    }
}

impl<A: Strategy> Assign<A> for f64 {
    fn assign_to(self, target: &mut Value<A>) {
        target.set_floating(self);
    }
}

impl<A: Strategy> Assign<A> for bool {
    fn assign_to(self, target: &mut Value<A>) {
        target.set_bool(self);
    }
}

impl<A: Strategy> Assign<A> for &str {
    fn assign_to(self, target: &mut Value<A>) {
        target.set_string(self);
    }
}

impl<A: Strategy> Assign<A> for String {
    fn assign_to(self, target: &mut Value<A>) {
        target.set_string(&self);
    }
}

impl<A: Strategy> Assign<A> for &String {
    fn assign_to(self, target: &mut Value<A>) {
        target.set_string(self);
    }
}

impl<A: Strategy, B: Strategy> Assign<A> for &ValueString<B> {
    fn assign_to(self, target: &mut Value<A>) {
        target.set_string(self.as_str());
    }
}

impl<A: Strategy> Assign<A> for Value<A> {
    fn assign_to(self, target: &mut Value<A>) {
        *target = self;
    }
}

impl<A: Strategy, B: Strategy> Assign<A> for &Value<B> {
    fn assign_to(self, target: &mut Value<A>) {
        *target = self.clone_in(target.allocator().clone());
    }
}

/// `None` assigns null.
impl<A: Strategy, T: Assign<A>> Assign<A> for Option<T> {
    fn assign_to(self, target: &mut Value<A>) {
        match self {
            Some(value) => value.assign_to(target),
            None => target.set_null(),
        }
    }
}
