/// Colour band for a mood score on the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTheme {
    Great,
    Good,
    Neutral,
    Low,
    Poor,
}

impl MoodTheme {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Great,
            60..=79 => Self::Good,
            40..=59 => Self::Neutral,
            20..=39 => Self::Low,
            _ => Self::Poor,
        }
    }

    /// CSS class suffix used by the stylesheet.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Low => "low",
            Self::Poor => "poor",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Great => "#22c55e",
            Self::Good => "#3b82f6",
            Self::Neutral => "#eab308",
            Self::Low => "#f97316",
            Self::Poor => "#ef4444",
        }
    }
}
