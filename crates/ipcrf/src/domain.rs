use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a Key Result Area.
    KraId
);
numeric_id!(
    /// Identifier of a weighted objective within a KRA.
    ObjectiveId
);
numeric_id!(CompetencyId);
numeric_id!(
    /// Identifier of a stored IPCRF rating record.
    RatingId
);
numeric_id!(
    /// Identifier of a teacher (a user holding the teacher role).
    TeacherId
);
numeric_id!(
    /// Identifier of any authenticated user acting on the portal.
    UserId
);
numeric_id!(SubmissionId);

/// Directory entry for a rated teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}
