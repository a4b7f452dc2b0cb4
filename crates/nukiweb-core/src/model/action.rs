use serde::{Deserialize, Serialize};

/// Action codes accepted by `POST /smartlock/{id}/action`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LockAction {
    Unlock,
    Lock,
    /// Opener: electric strike actuation.
    Unlatch,
    LockNGo,
    LockNGoUnlatch,
}

impl LockAction {
    pub fn code(self) -> u8 {
        match self {
            Self::Unlock => 1,
            Self::Lock => 2,
            Self::Unlatch => 3,
            Self::LockNGo => 4,
            Self::LockNGoUnlatch => 5,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn wire_codes() {
        assert_eq!(LockAction::Unlock.code(), 1);
        assert_eq!(LockAction::Lock.code(), 2);
        assert_eq!(LockAction::Unlatch.code(), 3);
        assert_eq!(LockAction::LockNGo.code(), 4);
        assert_eq!(LockAction::LockNGoUnlatch.code(), 5);
    }

    #[test]
    fn parses_snake_case() {
        assert_eq!(
            LockAction::from_str("lock_n_go_unlatch").unwrap(),
            LockAction::LockNGoUnlatch
        );
        assert_eq!(LockAction::LockNGo.to_string(), "lock_n_go");
    }
}
