use serde::{Deserialize, Serialize};

use crate::core::types::CivId;
use crate::entity::government::Government;

/// A player or AI civilization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Civilization {
    pub id: CivId,
    pub name: String,
    pub government: Government,
}

impl Civilization {
    pub fn new(id: CivId, name: impl Into<String>, government: Government) -> Self {
        Self {
            id,
            name: name.into(),
            government,
        }
    }

    pub fn is_fundamentalist(&self) -> bool {
        self.government == Government::Fundamentalism
    }
}
