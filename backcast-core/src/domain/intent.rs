//! Order intent, the strategy-to-broker message.

use super::position::Direction;
use serde::{Deserialize, Serialize};

/// What the strategy wants done with the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentAction {
    Enter,
    Exit,
}

/// A strategy's order intent for the current bar.
///
/// Consumed by the broker simulator within the same bar it was emitted; there
/// is no order queue across bars. An Exit names the direction of the position
/// it closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub symbol: String,
    pub action: IntentAction,
    pub direction: Direction,
}

impl OrderIntent {
    pub fn enter(symbol: impl Into<String>, direction: Direction) -> Self {
        Self {
            symbol: symbol.into(),
            action: IntentAction::Enter,
            direction,
        }
    }

    pub fn exit(symbol: impl Into<String>, direction: Direction) -> Self {
        Self {
            symbol: symbol.into(),
            action: IntentAction::Exit,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_action() {
        let enter = OrderIntent::enter("INFY", Direction::Long);
        assert_eq!(enter.action, IntentAction::Enter);
        assert_eq!(enter.direction, Direction::Long);

        let exit = OrderIntent::exit("INFY", Direction::Short);
        assert_eq!(exit.action, IntentAction::Exit);
    }
}
