// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

/// An individual subject, keyed by its shortened code.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Subject {
    /// Short unique identifier, e.g. "CS101".
    pub shortened_code: String,

    /// Free text display name, e.g. "Introduction to Programming".
    pub full_display_name: String,
}

impl Subject {
    pub fn new(shortened_code: impl Into<String>, full_display_name: impl Into<String>) -> Self {
        Self {
            shortened_code: shortened_code.into(),
            full_display_name: full_display_name.into(),
        }
    }

    /// Build a custom subject from free text typed by the user.
    ///
    /// The code is derived from the trimmed name: its first three characters
    /// uppercased, or the whole name if it is shorter. A blank name yields a
    /// blank code, which never passes validation.
    pub fn custom(display_name: &str) -> Self {
        let name = display_name.trim();
        let code = if name.is_empty() {
            String::new()
        } else {
            name.chars().take(3).collect::<String>().to_uppercase()
        };

        Self {
            shortened_code: code,
            full_display_name: name.to_string(),
        }
    }
}

/// The teacher assigned to an event, keyed by name.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Teacher {
    pub teacher_name: String,
}

impl Teacher {
    pub fn new(teacher_name: impl Into<String>) -> Self {
        Self {
            teacher_name: teacher_name.into(),
        }
    }
}

/// A room an event takes place in, keyed by code.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Location {
    pub room_code: String,
}

impl Location {
    pub fn new(room_code: impl Into<String>) -> Self {
        Self {
            room_code: room_code.into(),
        }
    }
}
