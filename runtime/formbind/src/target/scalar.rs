use super::{Bindable, Kind};
use crate::coerce::Leaf;
use crate::errors::FieldError;

macro_rules! bind_number {
    ($kind:ident, $error:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Bindable for $ty {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
                    leaf.assign_first(self, values)
                }

                fn assign_element(&mut self, raw: &str) -> Result<(), FieldError> {
                    *self = raw.parse::<$ty>().map_err(|source| FieldError::$error {
                        type_name: stringify!($ty),
                        source,
                    })?;
                    Ok(())
                }
            }
        )+
    };
}

bind_number!(Int, InvalidInteger => i8, i16, i32, i64, i128, isize);
bind_number!(Uint, InvalidInteger => u8, u16, u32, u64, u128, usize);
bind_number!(Float, InvalidFloat => f32, f64);

impl Bindable for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }

    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        leaf.assign_first(self, values)
    }

    /// Anything but `false` and `0` is truthy, including the empty string.
    fn assign_element(&mut self, raw: &str) -> Result<(), FieldError> {
        *self = raw != "false" && raw != "0";
        Ok(())
    }
}

impl Bindable for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        if let Some(first) = values.first() {
            *self = leaf.apply_filter(first).into_owned();
        }
    }

    fn assign_element(&mut self, raw: &str) -> Result<(), FieldError> {
        raw.clone_into(self);
        Ok(())
    }
}
