//! Government types and the difficulty ladder
//!
//! Rule formulas compare governments with `<`/`<=`, so the ordering is part
//! of the ruleset. It is stated explicitly in [`Government::ordinal`] rather
//! than inherited from declaration order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Form of government of a civilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Government {
    Anarchy,
    Despotism,
    Monarchy,
    Communism,
    Fundamentalism,
    Republic,
    Democracy,
}

impl Government {
    pub const ALL: [Government; 7] = [
        Government::Anarchy,
        Government::Despotism,
        Government::Monarchy,
        Government::Communism,
        Government::Fundamentalism,
        Government::Republic,
        Government::Democracy,
    ];

    /// Tier of this government in rule comparisons
    ///
    /// | Government     | Ordinal |
    /// |----------------|---------|
    /// | Anarchy        | 0       |
    /// | Despotism      | 1       |
    /// | Monarchy       | 2       |
    /// | Communism      | 3       |
    /// | Fundamentalism | 4       |
    /// | Republic       | 5       |
    /// | Democracy      | 6       |
    pub fn ordinal(self) -> i32 {
        match self {
            Government::Anarchy => 0,
            Government::Despotism => 1,
            Government::Monarchy => 2,
            Government::Communism => 3,
            Government::Fundamentalism => 4,
            Government::Republic => 5,
            Government::Democracy => 6,
        }
    }

    /// Whether tiles worked under this government suffer the low-organisation penalty
    pub fn is_low_organisation(self) -> bool {
        self <= Government::Despotism
    }

    /// Organisation level of a city under this government
    ///
    /// Celebrating cities (We Love the King Day) operate one level higher.
    pub fn organization_level(self, we_love_king_day: bool) -> u8 {
        let base = match self {
            Government::Anarchy | Government::Despotism => 0,
            Government::Monarchy | Government::Communism | Government::Fundamentalism => 1,
            Government::Republic | Government::Democracy => 2,
        };
        if we_love_king_day {
            (base + 1).min(3)
        } else {
            base
        }
    }
}

impl PartialOrd for Government {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Government {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

/// Game difficulty; its value is added to palace distance below Monarchy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Chieftain,
    Warlord,
    Prince,
    King,
    Emperor,
    Deity,
}

impl Difficulty {
    pub fn value(self) -> i32 {
        match self {
            Difficulty::Chieftain => 0,
            Difficulty::Warlord => 1,
            Difficulty::Prince => 2,
            Difficulty::King => 3,
            Difficulty::Emperor => 4,
            Difficulty::Deity => 5,
        }
    }
}
