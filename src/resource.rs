//! Resource wrappers
//!
//! API responses are wrapped in [`Resource`], an immutable view over the
//! raw JSON mapping. The API returns variable field sets across resource
//! kinds and versions, so no fixed schema is enforced: field access is
//! by name and returns `None` for absent fields.
//!
//! The resource variants (`User`, `BankAccount`, ...) are structurally
//! identical and differ only in their semantic label, carried as a
//! zero-sized marker type.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

/// Marker types labelling the resource variants.
pub mod kind {
    /// Semantic label of a resource variant.
    pub trait Kind {
        const NAME: &'static str;
    }

    macro_rules! kinds {
        ($($name:ident),+ $(,)?) => {
            $(
                pub enum $name {}

                impl Kind for $name {
                    const NAME: &'static str = stringify!($name);
                }
            )+
        };
    }

    kinds!(User, BankAccount, PrepaidCard, PaperCheck, Payment, Webhook);
}

/// An immutable, dynamically-keyed view over a decoded API response.
pub struct Resource<K: kind::Kind> {
    raw: Value,
    _kind: PhantomData<K>,
}

/// A Hyperwallet user.
pub type User = Resource<kind::User>;
/// A bank account transfer method belonging to a user.
pub type BankAccount = Resource<kind::BankAccount>;
/// A prepaid card transfer method belonging to a user.
pub type PrepaidCard = Resource<kind::PrepaidCard>;
/// A paper check transfer method belonging to a user.
pub type PaperCheck = Resource<kind::PaperCheck>;
/// A payment made through the platform.
pub type Payment = Resource<kind::Payment>;
/// A webhook notification.
pub type Webhook = Resource<kind::Webhook>;

impl<K: kind::Kind> Resource<K> {
    /// Wrap a decoded response body. No validation is performed.
    pub fn new(raw: Value) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// Look up a field by name. Absent fields (and non-object bodies)
    /// return `None`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.raw.get(field)
    }

    /// Look up a string field by name.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.raw.get(field).and_then(|v| v.as_str())
    }

    /// The resource token, when present. Every persisted Hyperwallet
    /// resource carries one.
    pub fn token(&self) -> Option<&str> {
        self.get_str("token")
    }

    /// The raw response body.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Unwrap into the raw response body.
    pub fn into_value(self) -> Value {
        self.raw
    }
}

impl<K: kind::Kind> fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(K::NAME).field(&self.raw).finish()
    }
}

impl<K: kind::Kind> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self::new(self.raw.clone())
    }
}

impl<K: kind::Kind> PartialEq for Resource<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
