use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The kind of step a workflow node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    End,
    Task,
    Condition,
    Parallel,
    Merge,
    Api,
    Database,
    Transform,
    Notification,
    Schedule,
    Manual,
    Custom,
}

impl NodeType {
    /// Every node type, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Start,
        Self::End,
        Self::Task,
        Self::Condition,
        Self::Parallel,
        Self::Merge,
        Self::Api,
        Self::Database,
        Self::Transform,
        Self::Notification,
        Self::Schedule,
        Self::Manual,
        Self::Custom,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Task => "task",
            Self::Condition => "condition",
            Self::Parallel => "parallel",
            Self::Merge => "merge",
            Self::Api => "api",
            Self::Database => "database",
            Self::Transform => "transform",
            Self::Notification => "notification",
            Self::Schedule => "schedule",
            Self::Manual => "manual",
            Self::Custom => "custom",
        }
    }
}

/// Execution status of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Idle,
    Waiting,
    Running,
    Success,
    Failed,
    Skipped,
}

impl NodeStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Idle,
        Self::Waiting,
        Self::Running,
        Self::Success,
        Self::Failed,
        Self::Skipped,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Return `true` once the step can no longer change status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed | Self::Skipped)
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected}: '{got}'")]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ParseEnumError {
                expected: "node type",
                got: s.to_string(),
            })
    }
}

impl FromStr for NodeStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ParseEnumError {
                expected: "node status",
                got: s.to_string(),
            })
    }
}

/// Execution details attached to a node by the host application.
///
/// Keys the engine does not know about are kept in `extra` so a
/// positioned copy carries the same metadata as its source node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeMetadata {
    /// Run time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeMetadata {
    /// Run time in milliseconds.
    ///
    /// Uses the explicit `duration` when present, otherwise the span
    /// between `start_time` and `end_time`. A negative span yields `None`.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<u64> {
        if let Some(ms) = self.duration {
            return Some(ms);
        }
        let (start, end) = (self.start_time?, self.end_time?);
        u64::try_from((end - start).num_milliseconds()).ok()
    }
}

/// One step of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
}

impl Node {
    /// Create a node with no status or metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, node_type: NodeType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            label: label.into(),
            status: None,
            metadata: None,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Run time in milliseconds, if the metadata records one.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.metadata.as_ref().and_then(NodeMetadata::elapsed_ms)
    }
}
