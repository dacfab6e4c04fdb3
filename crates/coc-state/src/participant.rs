//! # Participants
//!
//! An actor authorized to interact with evidence. Participant records are
//! immutable once registered: there is no role update and no removal.

use coc_core::ParticipantId;
use serde::{Deserialize, Serialize};

use crate::codec::Record;

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique participant key.
    #[serde(rename = "participantID")]
    pub participant_id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Role tag, e.g. `first responder`.
    pub role: String,
}

impl Participant {
    /// Build a participant record.
    pub fn new(
        participant_id: ParticipantId,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            participant_id,
            name: name.into(),
            role: role.into(),
        }
    }
}

impl Record for Participant {
    const KIND: &'static str = "participant";

    fn key(&self) -> String {
        self.participant_id.as_str().to_string()
    }
}
