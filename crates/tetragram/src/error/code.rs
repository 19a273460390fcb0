//! Diagnostic codes for the tetragram validator.
//!
//! Codes are organized by diagram family:
//! - `E1xx` - Use-case diagram rules
//! - `E2xx` - Sequence diagram rules
//! - `E3xx` - Class diagram rules
//! - `E4xx` - Activity diagram rules
//!
//! Style warnings (the self-referential message check) carry no code.

use std::fmt;

use serde::Serialize;

/// Codes categorizing the validation rules a diagnostic comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    // =========================================================================
    // Use-Case Diagram Rules (E1xx)
    // =========================================================================
    /// Duplicate actor name.
    ///
    /// Two actors of the same diagram share one name.
    E100,

    /// Duplicate use-case name.
    ///
    /// Two use cases of the same diagram share one name.
    E101,

    /// Unknown relation endpoint.
    ///
    /// A relation endpoint does not resolve to an actor, use case, or
    /// rectangle declared by the same diagram.
    E102,

    // =========================================================================
    // Sequence Diagram Rules (E2xx)
    // =========================================================================
    /// Duplicate participant name.
    ///
    /// Two participants of the same diagram share one name.
    E200,

    /// Unknown message endpoint.
    ///
    /// A message sender or receiver does not resolve to a participant of
    /// the nearest enclosing sequence diagram.
    E201,

    // =========================================================================
    // Class Diagram Rules (E3xx)
    // =========================================================================
    /// Duplicate class name.
    ///
    /// Two classes of the same diagram share one name.
    E300,

    /// Duplicate attribute name.
    ///
    /// Two attributes of the same class share one name.
    E301,

    /// Duplicate method signature.
    ///
    /// Two methods of the same class share a name and a parameter count.
    /// Overloading by parameter count is allowed.
    E302,

    /// Unknown relationship endpoint.
    ///
    /// A relationship endpoint does not resolve to a class declared by the
    /// same diagram.
    E303,

    // =========================================================================
    // Activity Diagram Rules (E4xx)
    // =========================================================================
    /// Duplicate activity name.
    ///
    /// Two activities of the same diagram share one name.
    E400,

    /// Duplicate task name.
    ///
    /// Two tasks of the same activity share one name. Tasks of different
    /// activities may share names.
    E401,

    /// Unknown flow endpoint.
    ///
    /// A flow or data-flow endpoint does not resolve to a task of the
    /// nearest enclosing activity diagram.
    E402,

    /// Negative count minimum.
    ///
    /// The minimum of a flow count range is below zero.
    E403,

    /// Inverted count range.
    ///
    /// The maximum of a flow count range is below its minimum.
    E404,
}

impl DiagnosticCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Use-case diagram rules
            DiagnosticCode::E100 => "E100",
            DiagnosticCode::E101 => "E101",
            DiagnosticCode::E102 => "E102",
            // Sequence diagram rules
            DiagnosticCode::E200 => "E200",
            DiagnosticCode::E201 => "E201",
            // Class diagram rules
            DiagnosticCode::E300 => "E300",
            DiagnosticCode::E301 => "E301",
            DiagnosticCode::E302 => "E302",
            DiagnosticCode::E303 => "E303",
            // Activity diagram rules
            DiagnosticCode::E400 => "E400",
            DiagnosticCode::E401 => "E401",
            DiagnosticCode::E402 => "E402",
            DiagnosticCode::E403 => "E403",
            DiagnosticCode::E404 => "E404",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Use-case diagram rules
            DiagnosticCode::E100 => "duplicate actor name",
            DiagnosticCode::E101 => "duplicate use-case name",
            DiagnosticCode::E102 => "unknown relation endpoint",
            // Sequence diagram rules
            DiagnosticCode::E200 => "duplicate participant name",
            DiagnosticCode::E201 => "unknown message endpoint",
            // Class diagram rules
            DiagnosticCode::E300 => "duplicate class name",
            DiagnosticCode::E301 => "duplicate attribute name",
            DiagnosticCode::E302 => "duplicate method signature",
            DiagnosticCode::E303 => "unknown relationship endpoint",
            // Activity diagram rules
            DiagnosticCode::E400 => "duplicate activity name",
            DiagnosticCode::E401 => "duplicate task name",
            DiagnosticCode::E402 => "unknown flow endpoint",
            DiagnosticCode::E403 => "negative count minimum",
            DiagnosticCode::E404 => "inverted count range",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
