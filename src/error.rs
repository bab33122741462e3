use crate::game::Player;

/// Failure kinds surfaced by the engine and the search.
///
/// These are carried inside `anyhow::Error` and can be recovered with
/// `err.downcast_ref::<Error>()`. None of them are retried: each one
/// means a core invariant was broken or the search was misconfigured.
///
/// - `InvalidEvent`: an event would drive a multiset negative, names a seat
///   that does not exist, or is an action with zero or several species
/// - `EmptyActionSet`: a player was asked to act holding no legal action
/// - `MalformedDrawRequest`: more cards were requested than the deck holds
/// - `InvalidConfig`: game or search parameters are out of range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidEvent(String),
    EmptyActionSet(Player),
    MalformedDrawRequest { requested: usize, available: usize },
    InvalidConfig(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidEvent(why) => write!(f, "invalid event: {}", why),
            Error::EmptyActionSet(who) => write!(f, "no legal action for {}", who),
            Error::MalformedDrawRequest {
                requested,
                available,
            } => write!(
                f,
                "requested {} cards from a deck of {}",
                requested, available
            ),
            Error::InvalidConfig(why) => write!(f, "invalid configuration: {}", why),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_through_anyhow() {
        let err = anyhow::Error::from(Error::EmptyActionSet(Player::from(1)));
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::EmptyActionSet(Player::from(1)))
        );
        assert_eq!(err.to_string(), "no legal action for P2");
    }
}
