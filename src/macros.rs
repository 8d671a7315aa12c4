/// Implements `Display` for node types through the canonical writer.
macro_rules! readable_display {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&$crate::visitor::readable(self))
                }
            }
        )+
    };
}

/// Makes concrete node types visitable. Each type must have a `Node` variant
/// with the same name.
macro_rules! visitable {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::visitor::Visitable for $ty {
                #[inline(always)]
                fn as_node(&self) -> $crate::visitor::Node<'_> {
                    $crate::visitor::Node::$ty(self)
                }
            }
        )+
        readable_display!($($ty),+);
    };
}

/// Makes a closed family of nodes visitable by forwarding to the wrapped node.
macro_rules! visitable_enum {
    ($enum:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::visitor::Visitable for $enum {
            fn as_node(&self) -> $crate::visitor::Node<'_> {
                match self {
                    $($enum::$variant(n) => $crate::visitor::Visitable::as_node(n),)+
                }
            }
        }
        readable_display!($enum);
    };
}

/// Implements equality and hashing for nodes that store a precomputed `hash`.
///
/// Equality compares the stored hashes first and then every listed field.
macro_rules! precomputed_hash {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.hash == other.hash $(&& self.$field == other.$field)+
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.hash);
            }
        }
    };
}

/// Creates the conjunction of constraints as a tree of [`And`] nodes.
///
/// ```
/// # use qom::*;
/// let a = PropertyExistence::new("c", "year")?;
/// let b = PropertyExistence::new("c", "maker")?;
/// let both = and![a, b]?;
/// assert_eq!("(c.year IS NOT NULL AND c.maker IS NOT NULL)", both.to_string());
/// # Ok::<(), qom::Error>(())
/// ```
///
/// Constraints are folded to the left, so `and![a, b, c]` is `((a AND b) AND c)`,
/// and a single constraint is returned as is.
///
/// [`And`]: ./struct.And.html
#[macro_export]
macro_rules! and {
    ($($c:expr),+ $(,)?) => {
        $crate::Constraint::all(vec![$($crate::Constraint::from($c)),+])
    };
}

/// Creates the disjunction of constraints as a tree of `Or` nodes.
///
/// Constraints are folded to the left like [`and!`](macro.and.html).
#[macro_export]
macro_rules! or {
    ($($c:expr),+ $(,)?) => {
        $crate::Constraint::any(vec![$($crate::Constraint::from($c)),+])
    };
}
