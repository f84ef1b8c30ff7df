use std::borrow::Cow;

use crate::info::PropertyInfo;

/// Name resolution policy of an accessor.
///
/// A policy is fixed when an accessor is built and never changes afterwards.
/// The default is exact-case lookup over public properties only.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::Policy;
///
/// let policy = Policy::new().ignore_case();
/// assert!(policy.is_ignore_case());
/// assert!(!policy.is_include_non_public());
/// assert_eq!(Policy::default(), Policy::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Policy {
    ignore_case: bool,
    include_non_public: bool,
}

impl Policy {
    /// Creates the default policy: exact-case, public properties only.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ignore_case: false,
            include_non_public: false,
        }
    }

    /// Resolves property names case-insensitively.
    ///
    /// Names are folded with Unicode lowercasing at accessor construction;
    /// two properties that fold onto the same key become ambiguous and
    /// resolvable by neither spelling.
    #[inline]
    pub const fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Exposes properties declared with non-public visibility.
    #[inline]
    pub const fn include_non_public(mut self) -> Self {
        self.include_non_public = true;
        self
    }

    /// Whether names resolve case-insensitively.
    #[inline]
    pub const fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Whether non-public properties are exposed.
    #[inline]
    pub const fn is_include_non_public(&self) -> bool {
        self.include_non_public
    }

    /// Folds a lookup name into the snapshot's key form.
    ///
    /// Exact-case policies borrow; case-insensitive policies allocate the
    /// lowercased form.
    #[inline]
    pub(crate) fn fold<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.ignore_case {
            Cow::Owned(name.to_lowercase())
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Whether a property passes the visibility filter.
    #[inline]
    pub(crate) fn admits(&self, prop: &PropertyInfo) -> bool {
        self.include_non_public || prop.is_public()
    }
}

#[cfg(test)]
mod tests {
    use super::Policy;
    use std::borrow::Cow;

    #[test]
    fn fold_borrows_unless_case_insensitive() {
        let exact = Policy::new();
        assert!(matches!(exact.fold("Rpm"), Cow::Borrowed("Rpm")));

        let folded = Policy::new().ignore_case();
        assert!(matches!(folded.fold("Rpm"), Cow::Owned(ref s) if s == "rpm"));
    }
}
