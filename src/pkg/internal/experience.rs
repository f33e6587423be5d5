use std::fmt;

use serde::Serialize;

/// The only experience levels the trained model was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
        }
    }

    /// Maps free-form input onto a canonical level, first matching rule wins.
    /// Executive-like titles fold into `Senior`; anything unrecognised is `Mid`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ExperienceLevel::Mid;
        };
        let e = raw.trim().to_lowercase();
        let e = e.as_str();

        if e.starts_with("junior") || matches!(e, "jr" | "entry" | "entry-level" | "entry level") {
            return ExperienceLevel::Entry;
        }
        if e.starts_with("mid") || matches!(e, "mid-level" | "mid level" | "intermediate") {
            return ExperienceLevel::Mid;
        }
        if e.starts_with("senior") || matches!(e, "sr" | "sr." | "senior-level" | "senior level") {
            return ExperienceLevel::Senior;
        }
        if e.starts_with("executive") || matches!(e, "lead" | "principal" | "director" | "head") {
            return ExperienceLevel::Senior;
        }
        ExperienceLevel::Mid
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
