//! Audit-trail rows
//!
//! Layout: `[Index, Event Time, Document, Tab, User, Description]`. Only the
//! user and description fields feed the engine; the others are carried along
//! for custom partitioners.

use crate::error::AggregateError;

/// Column names of an audit-trail export
pub const AUDIT_TRAIL_HEADER: [&str; FIELD_COUNT] =
    ["Index", "Event Time", "Document", "Tab", "User", "Description"];

/// Minimum number of fields in a data row
pub const FIELD_COUNT: usize = 6;

/// Position of the user identity field
pub const USER_FIELD: usize = 4;

/// Position of the action description field
pub const DESCRIPTION_FIELD: usize = 5;

/// One audit-trail entry, borrowed from the raw fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRow<'a> {
    /// Export row index
    pub index: &'a str,
    /// Event timestamp as recorded
    pub event_time: &'a str,
    /// Document name
    pub document: &'a str,
    /// Tab name
    pub tab: &'a str,
    /// Email-like user identity
    pub user: &'a str,
    /// Raw action description, possibly padded
    pub description: &'a str,
}

impl<'a> LogRow<'a> {
    /// Build a row from raw fields
    ///
    /// Fields beyond the sixth are ignored.
    ///
    /// # Errors
    /// [`AggregateError::MalformedRow`] if fewer than [`FIELD_COUNT`] fields
    /// are present.
    pub fn from_fields<S: AsRef<str>>(
        source_id: &str,
        row: usize,
        fields: &'a [S],
    ) -> Result<Self, AggregateError> {
        match fields {
            [index, event_time, document, tab, user, description, ..] => Ok(Self {
                index: index.as_ref(),
                event_time: event_time.as_ref(),
                document: document.as_ref(),
                tab: tab.as_ref(),
                user: user.as_ref(),
                description: description.as_ref(),
            }),
            _ => Err(AggregateError::MalformedRow {
                source_id: source_id.to_string(),
                row,
                found: fields.len(),
                expected: FIELD_COUNT,
            }),
        }
    }

    /// Description with surrounding whitespace removed
    #[inline]
    #[must_use]
    pub fn action(&self) -> &'a str {
        self.description.trim()
    }

    /// Part of the user identity before `@`
    ///
    /// Identities without `@` are returned whole.
    #[must_use]
    pub fn user_local_part(&self) -> &'a str {
        let user = self.user.trim();
        user.split_once('@').map_or(user, |(local, _)| local)
    }
}

/// Check if `fields` is the standard audit-trail header
#[must_use]
pub fn is_audit_trail_header<S: AsRef<str>>(fields: &[S]) -> bool {
    fields.len() >= FIELD_COUNT
        && fields
            .iter()
            .zip(AUDIT_TRAIL_HEADER)
            .all(|(field, expected)| field.as_ref().trim() == expected)
}
