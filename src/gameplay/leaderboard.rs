use crate::gameplay::session::{PlayerSlot, RoundResult};
use std::cmp::Ordering;

/// Seat indices ranked best-first: ascending elapsed time, descending score.
/// Stable, so seats that tie keep their registration order. Seats with no
/// recorded result sink to the end.
pub fn rank_players(players: &[PlayerSlot]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by(|&a, &b| compare_results(&players[a].result, &players[b].result));
    order
}

fn compare_results(a: &Option<RoundResult>, b: &Option<RoundResult>) -> Ordering {
    match (a, b) {
        (Some(RoundResult::Elapsed(x)), Some(RoundResult::Elapsed(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Some(RoundResult::Score(x)), Some(RoundResult::Score(y))) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// The fixed three-slot podium presentation order: runner-up on the left,
/// winner centre, third on the right.
pub fn podium_slots(ranked: &[usize]) -> [Option<usize>; 3] {
    [
        ranked.get(1).copied(),
        ranked.first().copied(),
        ranked.get(2).copied(),
    ]
}
