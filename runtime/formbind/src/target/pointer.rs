use super::{BindPointer, BindStruct, Bindable, Kind};
use crate::coerce::Leaf;
use crate::errors::FieldError;

/// `Option<T>` is the nilable indirection: intermediate segments allocate it on demand,
/// leaves are rebuilt from `T::default()` before coercion.
impl<T> Bindable for Option<T>
where
    T: Bindable + Default,
{
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn as_pointer_mut(&mut self) -> Option<&mut dyn BindPointer> {
        Some(self)
    }

    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        let mut fresh = T::default();
        if fresh.kind() == Kind::Pointer {
            leaf.report(
                values.first().map(String::as_str),
                FieldError::PointerToPointer {
                    type_name: self.type_name(),
                },
            );
            return;
        }
        fresh.assign(values, leaf);
        *self = Some(fresh);
    }

    fn assign_element(&mut self, raw: &str) -> Result<(), FieldError> {
        let mut fresh = T::default();
        fresh.assign_element(raw)?;
        *self = Some(fresh);
        Ok(())
    }
}

impl<T> BindPointer for Option<T>
where
    T: Bindable + Default,
{
    fn get_or_alloc(&mut self) -> &mut dyn Bindable {
        self.get_or_insert_with(T::default)
    }

    fn is_allocated(&self) -> bool {
        self.is_some()
    }

    fn release(&mut self) {
        *self = None;
    }
}

impl<T> Bindable for Box<T>
where
    T: Bindable + ?Sized,
{
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn as_struct_mut(&mut self) -> Option<&mut dyn BindStruct> {
        (**self).as_struct_mut()
    }

    fn as_pointer_mut(&mut self) -> Option<&mut dyn BindPointer> {
        (**self).as_pointer_mut()
    }

    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        (**self).assign(values, leaf)
    }

    fn assign_element(&mut self, raw: &str) -> Result<(), FieldError> {
        (**self).assign_element(raw)
    }
}

#[cfg(test)]
mod tests {
    use crate::coerce::Leaf;
    use crate::diagnostic::CollectingSink;
    use crate::errors::FieldError;
    use crate::target::{BindPointer, Bindable, Kind};

    #[test]
    fn optional_leaves_are_allocated() {
        let sink = CollectingSink::new();
        let mut age: Option<u8> = None;
        age.assign(&["42".to_owned()], &Leaf::new("age", &sink));
        assert_eq!(age, Some(42));
        assert!(sink.is_empty());
    }

    #[test]
    fn optional_leaves_are_reset_before_coercion() {
        let sink = CollectingSink::new();
        let mut age: Option<u8> = Some(42);
        age.assign(&["old".to_owned()], &Leaf::new("age", &sink));
        assert_eq!(age, Some(0));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn pointers_to_pointers_are_rejected() {
        let sink = CollectingSink::new();
        let mut nested: Option<Option<u8>> = None;
        nested.assign(&["1".to_owned()], &Leaf::new("nested", &sink));
        assert_eq!(nested, None);
        assert!(matches!(
            sink.take()[0].error,
            FieldError::PointerToPointer { .. }
        ));
    }

    #[test]
    fn boxes_are_transparent() {
        let sink = CollectingSink::new();
        let mut n: Box<i32> = Box::default();
        assert_eq!(n.kind(), Kind::Int);
        n.assign(&["-7".to_owned()], &Leaf::new("n", &sink));
        assert_eq!(*n, -7);
    }

    #[test]
    fn pointers_can_be_released() {
        let mut age: Option<u8> = None;
        assert!(!age.is_allocated());
        age.get_or_alloc();
        assert_eq!(age, Some(0));
        assert!(age.is_allocated());
        age.release();
        assert_eq!(age, None);
    }
}
