//! Member visibility partitioning.

use swiftgen_model::{AssociationEnd, ElementId, ElementKind, ModelRepository, Visibility};

/// A member rendered inside a class or protocol declaration.
#[derive(Debug, Clone, Copy)]
pub enum Member<'m> {
    /// An owned attribute.
    Attribute(ElementId),
    /// The navigable far end of an association.
    AssociationEnd(&'m AssociationEnd),
    /// An owned operation.
    Operation(ElementId),
    /// A nested class or enumeration.
    Nested(ElementId),
}

impl Member<'_> {
    /// Returns the modeled visibility of this member.
    #[must_use]
    pub fn visibility<R: ModelRepository + ?Sized>(&self, model: &R) -> Visibility {
        match self {
            Self::AssociationEnd(end) => end.visibility,
            Self::Attribute(id) | Self::Operation(id) | Self::Nested(id) => model
                .element(*id)
                .map_or(Visibility::Package, |e| e.visibility()),
        }
    }

    /// Returns the kind of element behind this member.
    #[must_use]
    pub fn kind<R: ModelRepository + ?Sized>(&self, model: &R) -> Option<ElementKind> {
        match self {
            Self::AssociationEnd(_) => Some(ElementKind::AssociationEnd),
            Self::Attribute(id) | Self::Operation(id) | Self::Nested(id) => {
                model.element(*id).map(|e| e.kind())
            }
        }
    }
}

/// Items partitioned into access buckets, each in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<T> {
    /// Public items.
    pub public: Vec<T>,
    /// Protected and package items.
    pub protected: Vec<T>,
    /// Private items.
    pub private: Vec<T>,
}

impl<T> Default for Classified<T> {
    fn default() -> Self {
        Self {
            public: Vec::new(),
            protected: Vec::new(),
            private: Vec::new(),
        }
    }
}

impl<T> Classified<T> {
    /// Iterates public, then protected, then private items.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.public
            .iter()
            .chain(&self.protected)
            .chain(&self.private)
    }

    /// Returns the total number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.public.len() + self.protected.len() + self.private.len()
    }

    /// Returns true if every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions `items` by visibility, keeping relative order in each bucket.
///
/// Public items go to `public`, private items to `private`, and everything
/// else (protected, package) to `protected`.
pub fn classify<T>(
    items: impl IntoIterator<Item = T>,
    visibility_of: impl Fn(&T) -> Visibility,
) -> Classified<T> {
    let mut out = Classified::default();
    for item in items {
        match visibility_of(&item) {
            Visibility::Public => out.public.push(item),
            Visibility::Private => out.private.push(item),
            Visibility::Protected | Visibility::Package => out.protected.push(item),
        }
    }
    out
}

/// Partitions model elements by their own visibility.
pub fn classify_elements<R: ModelRepository + ?Sized>(
    model: &R,
    ids: impl IntoIterator<Item = ElementId>,
) -> Classified<ElementId> {
    classify(ids, |id| {
        model
            .element(*id)
            .map_or(Visibility::Package, |e| e.visibility())
    })
}

/// Partitions declaration members by visibility.
pub fn classify_members<'m, R: ModelRepository + ?Sized>(
    model: &R,
    members: impl IntoIterator<Item = Member<'m>>,
) -> Classified<Member<'m>> {
    classify(members, |m| m.visibility(model))
}

/// Returns the Swift access keyword for a visibility, if any.
#[must_use]
pub const fn access_keyword(visibility: Visibility) -> Option<&'static str> {
    match visibility {
        Visibility::Public => Some("public"),
        Visibility::Protected => Some("fileprivate"),
        Visibility::Private => Some("private"),
        Visibility::Package => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftgen_model::{AttributeDef, ClassifierDef, Model, TypeRef};

    fn attribute(model: &mut Model, owner: ElementId, name: &str, vis: Visibility) -> ElementId {
        let mut def = AttributeDef::new(TypeRef::named("Int"));
        def.visibility = vis;
        model.add_attribute(owner, name, def)
    }

    #[test]
    fn test_partition_keeps_order() {
        let mut model = Model::new("M");
        let root = model.root();
        let class = model.add_class(root, "A", ClassifierDef::new());
        let a = attribute(&mut model, class, "a", Visibility::Private);
        let b = attribute(&mut model, class, "b", Visibility::Public);
        let c = attribute(&mut model, class, "c", Visibility::Package);
        let d = attribute(&mut model, class, "d", Visibility::Public);
        let e = attribute(&mut model, class, "e", Visibility::Protected);

        let buckets = classify_elements(&model, [a, b, c, d, e]);
        assert_eq!(buckets.public, vec![b, d]);
        assert_eq!(buckets.protected, vec![c, e]);
        assert_eq!(buckets.private, vec![a]);
        assert_eq!(buckets.iter().copied().collect::<Vec<_>>(), vec![b, d, c, e, a]);
        assert_eq!(buckets.len(), 5);
    }

    #[test]
    fn test_empty_input() {
        let buckets: Classified<u8> = classify(Vec::new(), |_| Visibility::Public);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_association_end_member() {
        let mut model = Model::new("M");
        let root = model.root();
        let class = model.add_class(root, "A", ClassifierDef::new());
        let mut end = AssociationEnd::navigable(class, "peer");
        end.visibility = Visibility::Private;

        let member = Member::AssociationEnd(&end);
        assert_eq!(member.visibility(&model), Visibility::Private);
        assert_eq!(member.kind(&model), Some(ElementKind::AssociationEnd));
    }

    #[test]
    fn test_access_keywords() {
        assert_eq!(access_keyword(Visibility::Public), Some("public"));
        assert_eq!(access_keyword(Visibility::Protected), Some("fileprivate"));
        assert_eq!(access_keyword(Visibility::Private), Some("private"));
        assert_eq!(access_keyword(Visibility::Package), None);
    }
}
