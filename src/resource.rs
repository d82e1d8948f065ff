use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Access level requested on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Configure,
    Write,
    Read,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Configure => "configure",
            Permission::Write => "write",
            Permission::Read => "read",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "configure" => Ok(Permission::Configure),
            "write" => Ok(Permission::Write),
            "read" => Ok(Permission::Read),
            other => Err(Error::Internal(format!("unknown permission '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Queue,
    Exchange,
    Topic,
}

/// A named broker resource within a virtual host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    pub vhost: String,
    pub kind: ResourceKind,
    pub name: String,
}

impl Resource {
    pub fn new(vhost: impl Into<String>, kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            vhost: vhost.into(),
            kind,
            name: name.into(),
        }
    }

    pub fn queue(vhost: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(vhost, ResourceKind::Queue, name)
    }

    pub fn exchange(vhost: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(vhost, ResourceKind::Exchange, name)
    }

    pub fn topic(vhost: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(vhost, ResourceKind::Topic, name)
    }
}

/// Routing context of a topic permission check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicContext {
    pub routing_key: String,
}

impl TopicContext {
    pub fn new(routing_key: impl Into<String>) -> Self {
        Self {
            routing_key: routing_key.into(),
        }
    }
}
