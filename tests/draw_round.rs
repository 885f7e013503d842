use badugi_engine::betting::Action;
use badugi_engine::cards::parse_cards;
use badugi_engine::config::HandContext;
use badugi_engine::deck::Deck;
use badugi_engine::draw::draw_order;
use badugi_engine::engine::{DrawEngine, GameEngine};
use badugi_engine::registry::Variant;
use badugi_engine::table::{HandState, Street};
use badugi_engine::IllegalReason;

// seat 0 is dealt the first four cards, seat 1 the next four, then replacements follow
const STACK: &str = "AS 2D 3D 4H KC KD 5H 6S 7C 8C";

fn heads_up() -> (DrawEngine, HandState) {
    let top = parse_cards(STACK).unwrap();
    let mut engine = DrawEngine::with_deck(Variant::Badugi, Deck::stacked(&top, 5));
    let ctx = HandContext {
        num_seats: 2,
        starting_stack: 1000,
        small_blind: 10,
        big_blind: 20,
        ante: 0,
        dealer_index: 0,
    };
    let st = engine.init_hand(&ctx).unwrap();
    let st = engine.apply_forced_bets(&st).unwrap();
    (engine, st)
}

fn act(engine: &mut DrawEngine, st: HandState, action: Action) -> HandState {
    engine.apply_player_action(&st, &action).unwrap()
}

/// Check the round through and open the next street.
fn check_around(engine: &mut DrawEngine, mut st: HandState) -> HandState {
    while let Some(seat) = st.acting_player_index {
        let a = if st.to_call(seat) > 0 { Action::call(seat) } else { Action::check(seat) };
        st = act(engine, st, a);
    }
    engine.advance_after_bet(&st).unwrap().state
}

#[test]
fn replacements_come_off_the_top_in_turn_order() {
    let (mut engine, st) = heads_up();
    // heads-up the dealer posts the big blind and the small blind acts first
    assert_eq!(st.players[1].bet_this_round, 10);
    assert_eq!(st.acting_player_index, Some(1));

    let st = check_around(&mut engine, st);
    assert_eq!(st.street, Street::Draw);
    assert_eq!(draw_order(&st), vec![1, 0]);

    let st = act(&mut engine, st, Action::draw(1, vec![0]));
    assert_eq!(st.players[1].hand, parse_cards("7C KD 5H 6S").unwrap());
    assert_eq!(st.players[1].last_action.as_deref(), Some("Draw 1"));
    assert_eq!(st.acting_player_index, Some(0));

    let st = act(&mut engine, st, Action::auto_draw(0));
    assert_eq!(st.players[0].hand, parse_cards("AS 2D 8C 4H").unwrap());
    assert_eq!(st.players[0].last_draw_count, 1);
    assert_eq!(engine.deck().discard_len(), 2);
    engine.check_cards(&st).unwrap();

    assert_eq!(st.street, Street::Bet);
    assert_eq!(st.acting_player_index, Some(1));
}

#[test]
fn drawing_twice_in_a_round_is_refused() {
    let (mut engine, st) = heads_up();
    let st = check_around(&mut engine, st);
    let st = act(&mut engine, st, Action::stand_pat(1));
    let err = engine.apply_player_action(&st, &Action::stand_pat(1)).unwrap_err();
    assert_eq!(err.illegal_reason(), Some(&IllegalReason::OutOfTurn { acting: Some(0) }));
    assert!(st.players[1].has_drawn);
    assert_eq!(st.players[1].last_action.as_deref(), Some("Stand pat"));
}

#[test]
fn third_draw_leads_to_showdown_after_betting() {
    let (mut engine, st) = heads_up();
    let mut st = check_around(&mut engine, st);
    st = act(&mut engine, st, Action::draw(1, vec![0]));
    st = act(&mut engine, st, Action::auto_draw(0));

    for round in 2..=3 {
        st = check_around(&mut engine, st);
        assert_eq!(st.street, Street::Draw);
        assert_eq!(st.draw_round_index, round);
        st = act(&mut engine, st, Action::stand_pat(1));
        st = act(&mut engine, st, Action::stand_pat(0));
    }

    let seat1_hand = st.players[1].hand.clone();
    let mut last = st.clone();
    while let Some(seat) = last.acting_player_index {
        last = act(&mut engine, last, Action::check(seat));
    }
    let adv = engine.advance_after_bet(&last).unwrap();
    assert_eq!(adv.street, Street::Showdown);
    let result = adv.showdown.unwrap();

    // 8-4-2-A beats K-7-6-5
    assert_eq!(result.total_pot, 40);
    assert_eq!(result.state.players[0].stack, 1020);
    assert_eq!(result.state.players[1].stack, 980);

    let seen = engine.observation(&result.state, 0);
    assert_eq!(seen.seats[1].cards.as_deref(), Some(seat1_hand.as_slice()));
}

#[test]
fn draws_go_to_an_all_in_seat_too() {
    let top = parse_cards(STACK).unwrap();
    let mut engine = DrawEngine::with_deck(Variant::Badugi, Deck::stacked(&top, 5));
    let ctx = HandContext {
        num_seats: 2,
        starting_stack: 20,
        small_blind: 10,
        big_blind: 20,
        ante: 0,
        dealer_index: 0,
    };
    let st = engine.init_hand(&ctx).unwrap();
    let st = engine.apply_forced_bets(&st).unwrap();
    let st = act(&mut engine, st, Action::call(1));
    assert!(st.players.iter().all(|p| p.all_in));
    assert_eq!(st.acting_player_index, None);

    let st = engine.advance_after_bet(&st).unwrap().state;
    assert_eq!(st.street, Street::Draw);
    assert_eq!(st.acting_player_index, Some(1));
    let st = act(&mut engine, st, Action::auto_draw(1));
    let st = act(&mut engine, st, Action::auto_draw(0));
    // nobody can bet, so the round is already closed
    assert_eq!(st.street, Street::Bet);
    assert_eq!(st.acting_player_index, None);
}

#[test]
fn draw_override_above_the_variant_is_clamped() {
    let (engine, st) = heads_up();
    let mut engine = engine.with_max_draws(10);
    assert_eq!(engine.max_draws(), 3);

    let mut st = check_around(&mut engine, st);
    for round in 1..=3 {
        assert_eq!(st.street, Street::Draw);
        assert_eq!(st.draw_round_index, round);
        st = act(&mut engine, st, Action::stand_pat(1));
        st = act(&mut engine, st, Action::stand_pat(0));
        while let Some(seat) = st.acting_player_index {
            st = act(&mut engine, st, Action::check(seat));
        }
        let adv = engine.advance_after_bet(&st).unwrap();
        if round == 3 {
            assert_eq!(adv.street, Street::Showdown);
            assert!(adv.showdown.is_some());
        }
        st = adv.state;
    }
}
