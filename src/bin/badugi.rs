use badugi_engine::betting::Action;
use badugi_engine::config::TableConfig;
use badugi_engine::session::{PhaseEvent, Session};
use badugi_engine::table::Street;
use badugi_engine::EngineError;
use pico_args::Arguments;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
Play Badugi hands with every seat checking or calling and drawing automatically

USAGE:
  badugi [OPTIONS]

OPTIONS:
  --config     PATH        Table config JSON           [default: built-in 6-seat Badugi table]
  --hands      N           Number of hands to play     [default: 10]
  --seed       N           Deck seed, overrides the config seed

FLAGS:
  -h, --help               Print help information
  -V, --version            Print version
";

// a fixed-limit hand with three draws never comes close to this many actions
const MAX_ACTIONS_PER_HAND: usize = 500;

struct Args {
    config: Option<PathBuf>,
    hands: u64,
    seed: Option<u64>,
}

fn parse_args(mut pargs: Arguments) -> Result<Args, pico_args::Error> {
    let args = Args {
        config: pargs.opt_value_from_str("--config")?,
        hands: pargs.opt_value_from_str("--hands")?.unwrap_or(10),
        seed: pargs.opt_value_from_str("--seed")?,
    };
    let rest = pargs.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {rest:?}"),
        });
    }
    Ok(args)
}

/// Check when free, call otherwise; let the engine pick discards.
fn passive_action(session: &Session) -> Option<Action> {
    let state = session.state()?;
    let seat = state.acting_player_index?;
    Some(match state.street {
        Street::Draw => Action::auto_draw(seat),
        Street::Bet if state.to_call(seat) == 0 => Action::check(seat),
        Street::Bet => Action::call(seat),
        Street::Showdown => return None,
    })
}

fn play_hand(session: &mut Session) -> Result<(), EngineError> {
    session.new_hand()?;
    for _ in 0..MAX_ACTIONS_PER_HAND {
        let Some(action) = passive_action(session) else { break };
        session.act(action)?;
    }
    Ok(())
}

fn run(config: TableConfig, hands: u64) -> Result<(), EngineError> {
    let mut session = Session::new(config)?;
    session.on_phase(|event| match event {
        PhaseEvent::HandStarted { hand_number, dealer_index, level } => println!(
            "hand {hand_number}: dealer seat {dealer_index}, blinds {}/{}",
            level.small_blind, level.big_blind
        ),
        PhaseEvent::StreetChanged { street, draw_round_index } => {
            log::debug!("street {street} (draw {draw_round_index})")
        }
        PhaseEvent::Showdown { total_pot, summary, .. } => {
            for pot in summary {
                for p in &pot.payouts {
                    println!(
                        "  pot {}: seat {} wins {} (stack {} -> {})",
                        pot.pot_index, p.seat_index, p.payout, p.stack_before, p.stack_after
                    );
                }
            }
            println!("  total pot {total_pot}");
        }
    });

    for _ in 0..hands {
        if session.is_finished() {
            println!("one seat has all the chips");
            break;
        }
        play_hand(&mut session)?;
    }

    if let Some(state) = session.state() {
        println!("final stacks:");
        for p in &state.players {
            println!("  {} (seat {}): {}", p.id, p.seat_index, p.stack);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }
    if pargs.contains(["-V", "--version"]) {
        println!("badugi-engine {}", badugi_engine::VERSION);
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(pargs) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };
    let mut config = match &args.config {
        Some(path) => match TableConfig::from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => TableConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    match run(config, args.hands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("engine error: {e}");
            ExitCode::FAILURE
        }
    }
}
