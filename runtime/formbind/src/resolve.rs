//! Walk a [`FieldPath`] down a bind target.
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::errors::FieldError;
use crate::key::{FieldPath, normalize_segment};
use crate::tags::{OPT_OUT, TagInspector};
use crate::target::{Bindable, FieldDescriptor, FieldLookup, Kind};

/// The field addressed by the last segment of a path.
pub(crate) struct ResolvedField<'t> {
    pub(crate) value: &'t mut dyn Bindable,
    /// The name of the struct the field belongs to.
    pub(crate) container: &'static str,
    pub(crate) descriptor: &'static FieldDescriptor,
}

/// Resolves the paths of a single form key.
pub(crate) struct Resolver<'a> {
    pub(crate) key: &'a str,
    pub(crate) tags: &'a dyn TagInspector,
    pub(crate) sink: &'a dyn DiagnosticSink,
    pub(crate) opt_out_tag: &'a str,
}

impl Resolver<'_> {
    /// Find the field addressed by `path` and hand it to `apply`.
    ///
    /// Unset optional structs are allocated along the way. If resolution stops early,
    /// every allocation made for this path is released and the target is left
    /// unchanged. Every stop is reported to the sink, except for fields that opted out
    /// of binding.
    ///
    /// Returns `true` if `apply` was called.
    pub(crate) fn resolve<F>(&self, root: &mut dyn Bindable, path: &FieldPath, apply: F) -> bool
    where
        F: FnOnce(ResolvedField<'_>),
    {
        let (parents, last) = path.split_last();
        self.descend(root, parents, last, apply)
    }

    fn descend<F>(
        &self,
        current: &mut dyn Bindable,
        parents: &[String],
        last: &str,
        apply: F,
    ) -> bool
    where
        F: FnOnce(ResolvedField<'_>),
    {
        let Some((segment, rest)) = parents.split_first() else {
            return match self.lookup(current, last) {
                Some(field) => {
                    apply(field);
                    true
                }
                None => false,
            };
        };
        let Some(field) = self.lookup(current, segment) else {
            return false;
        };
        let value = field.value;
        if value.kind() != Kind::Pointer {
            return self.descend(value, rest, last, apply);
        }
        let Some(pointer) = value.as_pointer_mut() else {
            return false;
        };
        let was_allocated = pointer.is_allocated();
        let resolved = self.descend(pointer.get_or_alloc(), rest, last, apply);
        if !resolved && !was_allocated {
            pointer.release();
        }
        resolved
    }

    fn lookup<'t>(
        &self,
        current: &'t mut dyn Bindable,
        segment: &str,
    ) -> Option<ResolvedField<'t>> {
        let type_name = current.type_name();
        let segment = normalize_segment(segment);
        let Some(target) = current.as_struct_mut() else {
            self.warn(FieldError::NotAStruct {
                segment: segment.into_owned(),
                type_name,
            });
            return None;
        };
        let container = target.struct_name();
        match target.field_mut(&segment) {
            FieldLookup::Settable { value, descriptor } => {
                if self.opted_out(container, descriptor) {
                    return None;
                }
                Some(ResolvedField {
                    value,
                    container,
                    descriptor,
                })
            }
            FieldLookup::Unsettable { descriptor } => {
                if !self.opted_out(container, descriptor) {
                    self.warn(FieldError::Unsettable {
                        segment: segment.into_owned(),
                        container,
                    });
                }
                None
            }
            FieldLookup::Missing => {
                self.warn(FieldError::UnknownField {
                    segment: segment.into_owned(),
                    container,
                });
                None
            }
        }
    }

    fn opted_out(&self, container: &'static str, descriptor: &FieldDescriptor) -> bool {
        self.tags.tag_value(container, descriptor, self.opt_out_tag) == Some(OPT_OUT)
    }

    fn warn(&self, error: FieldError) {
        self.sink.warn(Diagnostic::new(self.key, error));
    }
}
