use serde::{Deserialize, Serialize};

/// Discrete congestion level derived from a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

/// Display color paired with each [`CongestionLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionColor {
    Success,
    Warning,
    Error,
}

impl CongestionLevel {
    /// Bands a congestion score.
    ///
    /// | Score  | Level  | Color   |
    /// |--------|--------|---------|
    /// | >= 70  | high   | error   |
    /// | >= 40  | medium | warning |
    /// | < 40   | low    | success |
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 70 => Self::High,
            s if s >= 40 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn color(self) -> CongestionColor {
        match self {
            Self::Low => CongestionColor::Success,
            Self::Medium => CongestionColor::Warning,
            Self::High => CongestionColor::Error,
        }
    }
}

impl std::fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::fmt::Display for CongestionColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}
