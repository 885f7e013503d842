use badugi_engine::betting::Action;
use badugi_engine::config::TableConfig;
use badugi_engine::registry::Variant;
use badugi_engine::session::Session;
use proptest::prelude::*;

const MAX_ACTIONS: usize = 2_000;

fn any_variant() -> impl Strategy<Value = Variant> {
    prop::sample::select(Variant::ALL.to_vec())
}

/// Play up to `hands` hands picking a legal action by `choices`, checking both
/// conservation laws after every transition.
fn run(
    variant: Variant,
    num_seats: usize,
    seed: u64,
    hands: usize,
    choices: &[usize],
) -> Result<(), TestCaseError> {
    let cfg = TableConfig { variant, num_seats, seed: Some(seed), ..TableConfig::default() };
    let total = cfg.starting_stack * num_seats as u64;
    let mut session = Session::new(cfg).unwrap();
    let mut pick = choices.iter().cycle();

    for _ in 0..hands {
        if session.is_finished() {
            break;
        }
        session.new_hand().unwrap();
        for _ in 0..MAX_ACTIONS {
            let st = session.state().unwrap();
            prop_assert_eq!(st.chips_in_play(), total);
            prop_assert!(session.engine().check_cards(st).is_ok());
            let Some(seat) = st.acting_player_index else { break };

            let legal = session.legal_actions(seat);
            prop_assert!(!legal.is_empty());
            let kind = legal[pick.next().copied().unwrap_or(0) % legal.len()];
            session.act(Action::new(seat, kind)).unwrap();
        }
        let st = session.state().unwrap();
        prop_assert!(st.hand_over);
        prop_assert_eq!(st.chips_in_play(), total);
        prop_assert_eq!(st.pot_total(), 0);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn chips_and_cards_are_conserved(
        variant in any_variant(),
        num_seats in 2usize..=6,
        seed in any::<u64>(),
        choices in prop::collection::vec(0usize..8, 1..64),
    ) {
        run(variant, num_seats, seed, 3, &choices)?;
    }

    #[test]
    fn full_tables_stay_consistent(seed in any::<u64>()) {
        run(Variant::Badugi, 8, seed, 2, &[2, 2, 1, 3, 0, 2])?;
    }
}
