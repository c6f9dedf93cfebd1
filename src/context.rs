//! Traversal state scoped to one parse pass.

use crate::object::Object;
use crate::token::Token;
use std::collections::HashSet;

/// The composite kinds that take part in depth and cycle tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Composite {
    Object,
    Array,
    Map,
    Set,
}

impl Composite {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Composite::Object => "object",
            Composite::Array => "array",
            Composite::Map => "map",
            Composite::Set => "set",
        }
    }

    pub(crate) const fn circular_ref(self) -> Token {
        match self {
            Composite::Object => Token::ObjectCircularRef,
            Composite::Array => Token::ArrayCircularRef,
            Composite::Map => Token::MapCircularRef,
            Composite::Set => Token::SetCircularRef,
        }
    }

    pub(crate) const fn max_depth_ref(self) -> Token {
        match self {
            Composite::Object => Token::ObjectMaxDepthRef,
            Composite::Array => Token::ArrayMaxDepthRef,
            Composite::Map => Token::MapMaxDepthRef,
            Composite::Set => Token::SetMaxDepthRef,
        }
    }
}

/// Depth counter plus one seen-set per composite kind.
///
/// The seen-sets hold the identities on the active recursion path only:
/// [`Context::leave`] removes what [`Context::enter`] added, so the same
/// object can appear at sibling positions without being reported as circular.
#[derive(Debug, Default)]
pub(crate) struct Context {
    depth: usize,
    objects_seen: HashSet<usize>,
    arrays_seen: HashSet<usize>,
    maps_seen: HashSet<usize>,
    sets_seen: HashSet<usize>,
}

impl Context {
    fn seen(&self, kind: Composite) -> &HashSet<usize> {
        match kind {
            Composite::Object => &self.objects_seen,
            Composite::Array => &self.arrays_seen,
            Composite::Map => &self.maps_seen,
            Composite::Set => &self.sets_seen,
        }
    }

    fn seen_mut(&mut self, kind: Composite) -> &mut HashSet<usize> {
        match kind {
            Composite::Object => &mut self.objects_seen,
            Composite::Array => &mut self.arrays_seen,
            Composite::Map => &mut self.maps_seen,
            Composite::Set => &mut self.sets_seen,
        }
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub(crate) fn is_seen(&self, kind: Composite, object: &Object) -> bool {
        self.seen(kind).contains(&object.id())
    }

    pub(crate) fn enter(&mut self, kind: Composite, object: &Object) {
        self.depth += 1;
        self.seen_mut(kind).insert(object.id());
    }

    pub(crate) fn leave(&mut self, kind: Composite, object: &Object) {
        self.depth = self.depth.saturating_sub(1);
        self.seen_mut(kind).remove(&object.id());
    }

    /// Returns `true` when nothing is on the active path.
    pub(crate) fn is_clear(&self) -> bool {
        self.depth == 0
            && self.objects_seen.is_empty()
            && self.arrays_seen.is_empty()
            && self.maps_seen.is_empty()
            && self.sets_seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    #[test]
    fn test_enter_and_leave_are_scoped_per_kind() {
        let object = Object::new(ObjectKind::Ordinary, None);
        let mut context = Context::default();

        context.enter(Composite::Object, &object);
        assert_eq!(context.depth(), 1);
        assert!(context.is_seen(Composite::Object, &object));
        assert!(!context.is_seen(Composite::Array, &object));

        context.leave(Composite::Object, &object);
        assert!(!context.is_seen(Composite::Object, &object));
        assert!(context.is_clear());
    }
}
