/// The error vocabulary for version and range construction.
///
/// Every error is raised at the point of detection and surfaces directly to the caller;
/// a failed construction yields no usable instance.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SemaverError {
    /// A string did not match the version grammar (`major[.minor[.patch]]`).
    #[error("'{identifier}' is not a valid version identifier")]
    InvalidVersionIdentifier { identifier: String },

    /// A string matched neither range grammar, or its clauses produced a minimum above
    /// its maximum.
    #[error("'{identifier}' is not a valid version range identifier")]
    InvalidVersionRangeIdentifier { identifier: String },

    /// A version field was set to a value outside its allowed bounds.
    #[error("{field} number must be between 0 and {max}, got {value}")]
    FieldOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// A constructor received a value it cannot interpret. No current construction path
    /// produces this: the typed constructors make it unreachable. Kept so callers
    /// matching on the full error vocabulary keep compiling.
    #[error("version input should be {expected}, got {got}")]
    InvalidArgumentType { got: String, expected: &'static str },

    /// Reserved: an unrecognized comparison operator in a requirement clause. The clause
    /// pattern only extracts known operators, so this is not produced today.
    #[error("'{operator}' is not a valid comparison operator")]
    InvalidComparisonOperator { operator: String },

    /// Reserved: an unsatisfiable condition within a requirement. Not produced today.
    #[error("'{condition}' is not a valid condition")]
    InvalidCondition { condition: String },

    /// Reserved: a malformed requirement string. Not produced today.
    #[error("'{requirement}' is not a valid requirement string")]
    InvalidRequirementString { requirement: String },
}
