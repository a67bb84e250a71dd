use super::{Bindable, Kind};
use crate::coerce::Leaf;
use crate::errors::FieldError;

impl<T> Bindable for Vec<T>
where
    T: Bindable + Default,
{
    fn kind(&self) -> Kind {
        Kind::Slice
    }

    /// Assign the i-th raw value to the i-th element.
    ///
    /// The vector is extended with default elements when it is shorter than `values`.
    /// Existing elements past the end of `values` are left as they are.
    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        if self.len() < values.len() {
            self.resize_with(values.len(), T::default);
        }
        for (index, (slot, raw)) in self.iter_mut().zip(values).enumerate() {
            if let Err(e) = slot.assign_element(raw) {
                let unsupported = matches!(e, FieldError::UnsupportedElement { .. });
                leaf.report_element(index, raw, e);
                if unsupported {
                    break;
                }
            }
        }
    }
}

impl<T, const N: usize> Bindable for [T; N]
where
    T: Bindable,
{
    fn kind(&self) -> Kind {
        Kind::Array
    }

    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        for (index, raw) in values.iter().enumerate() {
            let Some(slot) = self.get_mut(index) else {
                leaf.report_element(index, raw, FieldError::ElementOutOfRange { len: N });
                continue;
            };
            if let Err(e) = slot.assign_element(raw) {
                let unsupported = matches!(e, FieldError::UnsupportedElement { .. });
                leaf.report_element(index, raw, e);
                if unsupported {
                    break;
                }
            }
        }
    }
}
