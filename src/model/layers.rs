use serde::Serialize;

/// Argument-sophistication layers, ordered. A response holds a layer only
/// when every lower layer's condition also holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentLayer {
    NoPosition,
    Definition,
    Comparison,
    CauseEffect,
    ProblemSolution,
}

impl ArgumentLayer {
    pub fn number(self) -> u8 {
        match self {
            ArgumentLayer::NoPosition => 0,
            ArgumentLayer::Definition => 1,
            ArgumentLayer::Comparison => 2,
            ArgumentLayer::CauseEffect => 3,
            ArgumentLayer::ProblemSolution => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArgumentLayer::NoPosition => "No Clear Position",
            ArgumentLayer::Definition => "Definition",
            ArgumentLayer::Comparison => "Comparison",
            ArgumentLayer::CauseEffect => "Cause-Effect",
            ArgumentLayer::ProblemSolution => "Problem-Solution",
        }
    }
}
