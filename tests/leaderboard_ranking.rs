use shape_sorter::gameplay::leaderboard::{podium_slots, rank_players};
use shape_sorter::gameplay::session::{PlayerSlot, RoundResult};

fn timed(name: &str, secs: f32) -> PlayerSlot {
    PlayerSlot {
        name: name.into(),
        result: Some(RoundResult::Elapsed(secs)),
    }
}

fn scored(name: &str, points: u32) -> PlayerSlot {
    PlayerSlot {
        name: name.into(),
        result: Some(RoundResult::Score(points)),
    }
}

#[test]
fn elapsed_time_ranks_ascending() {
    let players = [timed("A", 12.3), timed("B", 9.8), timed("C", 15.0)];
    let ranked = rank_players(&players);
    let names: Vec<&str> = ranked.iter().map(|&i| players[i].name.as_str()).collect();
    assert_eq!(names, ["B", "A", "C"]);
}

#[test]
fn podium_slot_order_is_rank2_rank1_rank3() {
    let players = [timed("A", 12.3), timed("B", 9.8), timed("C", 15.0)];
    let slots = podium_slots(&rank_players(&players));
    assert_eq!(slots, [Some(0), Some(1), Some(2)]);
}

#[test]
fn scores_rank_descending() {
    let players = [scored("low", 10), scored("high", 90), scored("mid", 40)];
    let ranked = rank_players(&players);
    let names: Vec<&str> = ranked.iter().map(|&i| players[i].name.as_str()).collect();
    assert_eq!(names, ["high", "mid", "low"]);
}

#[test]
fn four_players_leave_fourth_off_the_podium() {
    let players = [
        timed("A", 20.0),
        timed("B", 10.0),
        timed("C", 30.0),
        timed("D", 40.0),
    ];
    let ranked = rank_players(&players);
    assert_eq!(ranked, vec![1, 0, 2, 3]);
    let slots = podium_slots(&ranked);
    assert_eq!(slots, [Some(0), Some(1), Some(2)]);
}
