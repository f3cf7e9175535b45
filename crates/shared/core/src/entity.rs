use crate::values::Symbol;
use std::fmt;

/// Unit of aggregation: a single asset symbol or an ordered asset pair.
///
/// Pairs are directional — `ETH-BTC` and `BTC-ETH` aggregate independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Token(Symbol),
    Pair { from: Symbol, to: Symbol },
}

impl Entity {
    /// Single-asset entity
    pub fn token(symbol: impl Into<Symbol>) -> Self {
        Entity::Token(symbol.into())
    }

    /// Ordered pair entity, in event order (not sorted)
    pub fn pair(from: impl Into<Symbol>, to: impl Into<Symbol>) -> Self {
        Entity::Pair {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Rendered identifier used in bucket keys and update messages,
    /// e.g. `"ETH"` or `"ETH-BTC"`
    pub fn id(&self) -> String {
        match self {
            Entity::Token(symbol) => symbol.clone(),
            Entity::Pair { from, to } => format!("{}-{}", from, to),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Token(symbol) => f.write_str(symbol),
            Entity::Pair { from, to } => write!(f, "{}-{}", from, to),
        }
    }
}
