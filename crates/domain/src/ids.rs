use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Parses an identifier from its hyphenated string form.
            pub fn parse(value: &str) -> Option<Self> {
                Uuid::parse_str(value.trim()).ok().map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a user account.
    UserId
);
uuid_identifier!(
    /// Unique identifier for a journal log entry.
    LogEntryId
);
uuid_identifier!(
    /// Unique identifier for a therapy session record.
    SessionId
);
uuid_identifier!(
    /// Unique identifier for a homework item.
    HomeworkId
);
uuid_identifier!(
    /// Unique identifier for a user profile row.
    ProfileId
);

#[cfg(test)]
mod tests {
    use super::{LogEntryId, UserId};

    #[test]
    fn parse_accepts_display_output() {
        let user_id = UserId::new();
        assert_eq!(UserId::parse(&user_id.to_string()), Some(user_id));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(LogEntryId::parse("not-a-uuid").is_none());
    }
}
