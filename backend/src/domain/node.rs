//! Node role and the write-gate derived from it.
//!
//! The gate is computed once at startup and handed to every service that can
//! mutate data. It is advisory: it stops this process from issuing writes but
//! says nothing about what the underlying MySQL server accepts.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use super::Error;

/// Fixed refusal returned for every write attempted on a replica.
pub const READ_ONLY_MESSAGE: &str =
    "this node is a read-only replica; write operations are disabled";

/// Replication role of the local node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Accepts writes.
    #[default]
    Primary,
    /// Serves reads only.
    Replica,
}

/// Error raised when a role string is neither `primary` nor `replica`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node role '{value}'; expected primary or replica")]
pub struct NodeRoleParseError {
    value: String,
}

impl FromStr for NodeRole {
    type Err = NodeRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "replica" => Ok(Self::Replica),
            _ => Err(NodeRoleParseError {
                value: s.to_owned(),
            }),
        }
    }
}

impl NodeRole {
    /// Lower-case label used in configuration and payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Replica => "replica",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write permission derived from the node role.
///
/// # Examples
/// ```
/// use gradebook::domain::{ErrorCode, NodeRole, WriteGate};
///
/// let gate = WriteGate::for_role(NodeRole::Replica);
/// let err = gate.ensure_writable().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::ReadOnlyNode);
/// assert!(WriteGate::for_role(NodeRole::Primary).ensure_writable().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteGate {
    role: NodeRole,
}

impl WriteGate {
    /// Build the gate for a node role.
    pub const fn for_role(role: NodeRole) -> Self {
        Self { role }
    }

    /// Gate that always allows writes.
    pub const fn open() -> Self {
        Self::for_role(NodeRole::Primary)
    }

    /// Gate that refuses every write.
    pub const fn closed() -> Self {
        Self::for_role(NodeRole::Replica)
    }

    /// Role the gate was built from.
    pub const fn role(&self) -> NodeRole {
        self.role
    }

    /// Whether writes are allowed.
    pub const fn is_open(&self) -> bool {
        matches!(self.role, NodeRole::Primary)
    }

    /// Return the fixed refusal when the node is a replica.
    pub fn ensure_writable(&self) -> Result<(), Error> {
        if self.is_open() {
            Ok(())
        } else {
            warn!(role = %self.role, "write refused on read-only node");
            Err(Error::read_only_node(READ_ONLY_MESSAGE))
        }
    }
}

/// Description of the node that served a read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// Local role.
    pub role: NodeRole,
    /// Whether this node accepts writes.
    pub writable: bool,
    /// Human-readable banner for tabular views.
    pub description: String,
}

impl From<WriteGate> for NodeInfo {
    fn from(gate: WriteGate) -> Self {
        let role = gate.role();
        Self {
            role,
            writable: gate.is_open(),
            description: format!(
                "data served by the local {} node",
                role.as_str().to_ascii_uppercase()
            ),
        }
    }
}
