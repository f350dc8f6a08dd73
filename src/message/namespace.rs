use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The sub-store of a swarm that a message was read from.
///
/// Serialized as its integer value. Values this crate does not know about are
/// kept as `Unknown` so they survive a round trip.
///
/// Namespaces compare and hash by [`Namespace::value`], so `Unknown(3)` built
/// by hand is the same namespace as `ConfigContacts`. Use `Namespace::from`
/// to get the named variant.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Namespace {
    #[default]
    Default,
    ConfigUserProfile,
    ConfigContacts,
    ConfigConvoInfoVolatile,
    ConfigUserGroups,
    GroupMessages,
    ConfigGroupKeys,
    ConfigGroupInfo,
    ConfigGroupMembers,
    LegacyClosedGroup,
    RevokedRetrievableGroupMessages,
    Unknown(i32),
}

impl Namespace {
    pub fn value(self) -> i32 {
        match self {
            Namespace::Default => 0,
            Namespace::ConfigUserProfile => 2,
            Namespace::ConfigContacts => 3,
            Namespace::ConfigConvoInfoVolatile => 4,
            Namespace::ConfigUserGroups => 5,
            Namespace::GroupMessages => 11,
            Namespace::ConfigGroupKeys => 12,
            Namespace::ConfigGroupInfo => 13,
            Namespace::ConfigGroupMembers => 14,
            Namespace::LegacyClosedGroup => -10,
            Namespace::RevokedRetrievableGroupMessages => -11,
            Namespace::Unknown(value) => value,
        }
    }

    /// Whether messages in this namespace carry config state rather than
    /// conversation content.
    pub fn is_config(self) -> bool {
        matches!(
            self,
            Namespace::ConfigUserProfile
                | Namespace::ConfigContacts
                | Namespace::ConfigConvoInfoVolatile
                | Namespace::ConfigUserGroups
                | Namespace::ConfigGroupKeys
                | Namespace::ConfigGroupInfo
                | Namespace::ConfigGroupMembers
        )
    }
}

impl From<i32> for Namespace {
    fn from(value: i32) -> Self {
        match value {
            0 => Namespace::Default,
            2 => Namespace::ConfigUserProfile,
            3 => Namespace::ConfigContacts,
            4 => Namespace::ConfigConvoInfoVolatile,
            5 => Namespace::ConfigUserGroups,
            11 => Namespace::GroupMessages,
            12 => Namespace::ConfigGroupKeys,
            13 => Namespace::ConfigGroupInfo,
            14 => Namespace::ConfigGroupMembers,
            -10 => Namespace::LegacyClosedGroup,
            -11 => Namespace::RevokedRetrievableGroupMessages,
            other => Namespace::Unknown(other),
        }
    }
}

impl From<Namespace> for i32 {
    fn from(namespace: Namespace) -> Self {
        namespace.value()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Namespace {}

impl Hash for Namespace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
