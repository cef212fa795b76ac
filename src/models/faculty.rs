//! Teacher and room models.
//!
//! Both are read-only inputs owned by external administration modules.
//! The engine consumes only identity, display name, and the availability
//! flag; everything else lives in the attributes map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A teacher who can be assigned to timetable entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this teacher is currently active.
    pub active: bool,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Teacher {
    /// Creates an active teacher.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            active: true,
            attributes: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the teacher inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display name, falling back to the identifier when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A room that timetable entries can occupy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this room can currently be scheduled.
    pub available: bool,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Room {
    /// Creates an available room.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            available: true,
            attributes: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the room unavailable.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display name, falling back to the identifier when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
