//! Random team assignment.

use rand::{seq::SliceRandom, Rng};

use crate::server::error::game::GameError;

/// Two teams produced by [`split_teams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teams<T> {
    /// First half of the shuffled participants, `ceil(n / 2)` long.
    pub a: Vec<T>,
    /// Second half of the shuffled participants, `floor(n / 2)` long.
    pub b: Vec<T>,
}

/// Splits participants into two randomly assigned, balanced teams.
///
/// Shuffles the participants uniformly (Fisher-Yates) and splits the result in
/// half, giving team A the extra member when the count is odd. Order within each
/// team is the shuffled order.
///
/// # Arguments
/// - `participants` - Distinct participants to split
/// - `rng` - Random number source; callers pass `rand::rng()` in production
///
/// # Returns
/// - `Ok(Teams)` - Disjoint teams covering every participant
/// - `Err(GameError::NotEnoughPlayers)` - Fewer than two participants
pub fn split_teams<T: Clone, R: Rng + ?Sized>(
    participants: &[T],
    rng: &mut R,
) -> Result<Teams<T>, GameError> {
    if participants.len() < 2 {
        return Err(GameError::NotEnoughPlayers {
            found: participants.len(),
        });
    }

    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);

    let b = shuffled.split_off(shuffled.len().div_ceil(2));

    Ok(Teams { a: shuffled, b })
}
