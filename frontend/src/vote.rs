use std::str::FromStr;

/// Which arrow a visitor clicked.
#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl FromStr for VoteDirection {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            _ => Err(()),
        }
    }
}

/// A session's vote on a single post.
///
/// On the wire this is the plain integer `-1`, `0` or `1`. Any other integer
/// decodes as `Neutral`.
#[derive(Hash, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "i64", into = "i64")]
pub enum VoteDelta {
    Down,
    #[default]
    Neutral,
    Up,
}

impl VoteDelta {
    /// Toggle transition: voting the same way twice cancels the vote,
    /// voting the other way switches it.
    pub fn toggled(self, direction: VoteDirection) -> Self {
        match (self, direction) {
            (VoteDelta::Up, VoteDirection::Up) => VoteDelta::Neutral,
            (_, VoteDirection::Up) => VoteDelta::Up,
            (VoteDelta::Down, VoteDirection::Down) => VoteDelta::Neutral,
            (_, VoteDirection::Down) => VoteDelta::Down,
        }
    }

    pub fn value(self) -> i64 {
        match self {
            VoteDelta::Down => -1,
            VoteDelta::Neutral => 0,
            VoteDelta::Up => 1,
        }
    }
}

impl From<i64> for VoteDelta {
    fn from(raw: i64) -> Self {
        match raw {
            -1 => VoteDelta::Down,
            1 => VoteDelta::Up,
            _ => VoteDelta::Neutral,
        }
    }
}

impl From<VoteDelta> for i64 {
    fn from(delta: VoteDelta) -> Self {
        delta.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        use VoteDelta::*;
        use VoteDirection::{Down as D, Up as U};

        assert_eq!(Neutral.toggled(U), Up);
        assert_eq!(Up.toggled(U), Neutral);
        assert_eq!(Neutral.toggled(D), Down);
        assert_eq!(Down.toggled(D), Neutral);
        assert_eq!(Up.toggled(D), Down);
        assert_eq!(Down.toggled(U), Up);
    }

    #[test]
    fn parse_direction() {
        assert_eq!("up".parse::<VoteDirection>(), Ok(VoteDirection::Up));
        assert_eq!("down".parse::<VoteDirection>(), Ok(VoteDirection::Down));
        assert_eq!("UP".parse::<VoteDirection>(), Err(()));
        assert_eq!("sideways".parse::<VoteDirection>(), Err(()));
    }

    #[test]
    fn out_of_range_delta_is_neutral() {
        assert_eq!(VoteDelta::from(7), VoteDelta::Neutral);
        assert_eq!(VoteDelta::from(-2), VoteDelta::Neutral);

        let parsed: Vec<VoteDelta> = serde_json::from_str("[-1, 0, 1, 42]").unwrap();
        assert_eq!(
            parsed,
            vec![
                VoteDelta::Down,
                VoteDelta::Neutral,
                VoteDelta::Up,
                VoteDelta::Neutral
            ]
        );
        assert_eq!(serde_json::to_string(&VoteDelta::Down).unwrap(), "-1");
    }
}
