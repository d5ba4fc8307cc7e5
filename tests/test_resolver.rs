use rps_arena::moves::*;
use rps_arena::resolver::resolve;

#[test]
fn test_same_move_draws() {
    for m in ALL_MOVES {
        assert_eq!(resolve(m, m), Outcome::Draw, "{} vs itself", m);
    }
}

#[test]
fn test_standard_precedence() {
    // opponent first, player second
    assert_eq!(resolve(Move::Scissors, Move::Rock), Outcome::PlayerWin);
    assert_eq!(resolve(Move::Paper, Move::Scissors), Outcome::PlayerWin);
    assert_eq!(resolve(Move::Rock, Move::Paper), Outcome::PlayerWin);
    assert_eq!(resolve(Move::Rock, Move::Scissors), Outcome::OpponentWin);
    assert_eq!(resolve(Move::Scissors, Move::Paper), Outcome::OpponentWin);
    assert_eq!(resolve(Move::Paper, Move::Rock), Outcome::OpponentWin);
}

#[test]
fn test_resolve_is_antisymmetric() {
    for a in ALL_MOVES {
        for b in ALL_MOVES {
            if a == b {
                continue;
            }
            match resolve(a, b) {
                Outcome::OpponentWin => assert_eq!(resolve(b, a), Outcome::PlayerWin),
                Outcome::PlayerWin => assert_eq!(resolve(b, a), Outcome::OpponentWin),
                Outcome::Draw => panic!("{} vs {} should not draw", a, b),
            }
        }
    }
}

#[test]
fn test_counter_is_a_three_cycle() {
    assert_eq!(Move::Rock.counter(), Move::Paper);
    assert_eq!(Move::Paper.counter(), Move::Scissors);
    assert_eq!(Move::Scissors.counter(), Move::Rock);
    for m in ALL_MOVES {
        assert_eq!(m.counter().counter().counter(), m);
        assert_eq!(resolve(m.counter(), m), Outcome::OpponentWin);
    }
}

#[test]
fn test_parse_moves_compact() {
    let moves = parse_moves("r p, S").unwrap();
    assert_eq!(moves, vec![Move::Rock, Move::Paper, Move::Scissors]);
    assert!(parse_moves("rpx").is_err());
    assert_eq!("paper".parse::<Move>().unwrap(), Move::Paper);
}
