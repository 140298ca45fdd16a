pub mod layers;
pub mod record;
pub mod scores;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricVariant {
    Component,
    Argument,
}

impl RubricVariant {
    pub fn name(self) -> &'static str {
        match self {
            RubricVariant::Component => "component",
            RubricVariant::Argument => "argument",
        }
    }
}
