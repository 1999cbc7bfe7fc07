//! Namespaces: named, access-controlled groupings of mappings.

use std::collections::BTreeSet;
use std::fmt;

use super::{ParameterError, StringRule, User, Validator};

/// Legal characters for a [`NamespaceId`]; nothing that needs escaping in a
/// path segment.
pub const NAMESPACE_ID_CHARACTERS: &str = "a-zA-Z0-9_";
/// Maximum length of a [`NamespaceId`].
pub const NAMESPACE_ID_MAX_LENGTH: usize = 256;

/// Identifier of a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(String);

impl NamespaceId {
    /// Name used in validation errors.
    pub const PARAMETER: &'static str = "namespace id";

    const RULE: StringRule = StringRule::present()
        .legal_characters(NAMESPACE_ID_CHARACTERS)
        .max_length(NAMESPACE_ID_MAX_LENGTH);

    /// Validate and construct a namespace id.
    ///
    /// # Examples
    /// ```
    /// use idmapping::domain::{NamespaceId, Validator};
    ///
    /// let validator = Validator::default();
    /// let err = NamespaceId::new(&validator, "foo&bar").unwrap_err();
    /// assert_eq!(err.to_string(), "Illegal character in namespace id foo&bar: &");
    /// ```
    pub fn new(validator: &Validator, id: impl Into<String>) -> Result<Self, ParameterError> {
        let id = id.into();
        validator.require_valid_string(&id, Self::PARAMETER, Self::RULE)?;
        Ok(Self(id))
    }
}

impl AsRef<str> for NamespaceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<NamespaceId> for String {
    fn from(value: NamespaceId) -> Self {
        value.0
    }
}

/// Namespace aggregate.
///
/// ## Invariants
/// - `id` never changes after creation.
/// - Public namespaces are readable by anyone; private namespaces only by
///   authorized users. Mutation always requires membership.
/// - `authorized_users` iterates in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    id: NamespaceId,
    publicly_mappable: bool,
    authorized_users: BTreeSet<User>,
}

impl Namespace {
    /// Build a namespace from its parts.
    pub fn new(
        id: NamespaceId,
        publicly_mappable: bool,
        authorized_users: impl IntoIterator<Item = User>,
    ) -> Self {
        Self {
            id,
            publicly_mappable,
            authorized_users: authorized_users.into_iter().collect(),
        }
    }

    /// A freshly created, private namespace whose only member is `creator`.
    pub fn created_by(id: NamespaceId, creator: User) -> Self {
        Self::new(id, false, [creator])
    }

    /// Namespace identifier.
    pub fn id(&self) -> &NamespaceId {
        &self.id
    }

    /// Whether unauthenticated callers may read the namespace.
    pub fn is_publicly_mappable(&self) -> bool {
        self.publicly_mappable
    }

    /// Users authorized to administer the namespace, sorted.
    pub fn authorized_users(&self) -> &BTreeSet<User> {
        &self.authorized_users
    }

    /// `true` when `user` is an authorized member.
    pub fn is_authorized(&self, user: &User) -> bool {
        self.authorized_users.contains(user)
    }
}
