use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use typedash::config::GameConfig;
use typedash::game::{Effect, Game, Phase, Timings};
use typedash::runtime::{Event, Runner, TestEventSource, TimerKind};
use typedash::texts::FixedTexts;

// Headless integration using the internal runtime + Game without a TTY.
// Timers run on short real deadlines so the countdown takes milliseconds.

#[derive(Default)]
struct Tally {
    beeps: usize,
    countdown_ticks: usize,
    exited: bool,
}

fn fast_game(texts: &[&str], beep: bool) -> Game {
    let config = GameConfig::new(texts.len(), beep).unwrap();
    let timings = Timings {
        countdown: Duration::from_millis(2),
        clock: Duration::from_millis(1),
    };
    Game::with_timings(
        config,
        Box::new(FixedTexts::new(texts.to_vec()).unwrap()),
        timings,
    )
}

fn send_key(tx: &Sender<Event>, c: char) {
    tx.send(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
        .unwrap();
}

/// Delivers one event to the game and applies the effects it asks for.
fn pump(game: &mut Game, runner: &mut Runner<TestEventSource>, tally: &mut Tally) {
    let event = runner.next_event().expect("event source closed");
    if let Event::Timer(TimerKind::Countdown) = event {
        tally.countdown_ticks += 1;
    }
    let now = Instant::now();
    for effect in game.update(event, now) {
        match effect {
            Effect::Schedule(timer) => runner.schedule(timer, now),
            Effect::Beep => tally.beeps += 1,
            Effect::Exit => tally.exited = true,
        }
    }
}

fn pump_until(
    game: &mut Game,
    runner: &mut Runner<TestEventSource>,
    tally: &mut Tally,
    phase: Phase,
) {
    for _ in 0..10_000u32 {
        if game.phase() == phase {
            return;
        }
        pump(game, runner, tally);
    }
    panic!("never reached {:?}, stuck in {:?}", phase, game.phase());
}

#[test]
fn headless_round_completes() {
    let mut game = fast_game(&["hi"], true);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx));
    let mut tally = Tally::default();

    send_key(&tx, ' ');
    pump_until(&mut game, &mut runner, &mut tally, Phase::Typing);
    assert_eq!(tally.countdown_ticks, 3);
    assert!(game.session.start_at.is_some());

    send_key(&tx, 'h');
    send_key(&tx, 'x');
    send_key(&tx, 'i');
    pump_until(&mut game, &mut runner, &mut tally, Phase::ShowingResult);

    assert_eq!(game.session.mistakes, 1);
    assert_eq!(tally.beeps, 1);
    assert!(game.session.end_at >= game.session.start_at);
    assert!(game.session.wpm().is_some());

    // the clock stops re-arming once the result is shown
    for _ in 0..100u32 {
        if runner.pending_timers() == 0 {
            break;
        }
        pump(&mut game, &mut runner, &mut tally);
    }
    assert_eq!(runner.pending_timers(), 0);
    assert_eq!(tally.countdown_ticks, 3);

    send_key(&tx, 'q');
    pump(&mut game, &mut runner, &mut tally);
    assert!(tally.exited);
}

#[test]
fn headless_retry_starts_a_new_round() {
    let mut game = fast_game(&["ab", "c"], false);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx));
    let mut tally = Tally::default();

    send_key(&tx, ' ');
    pump_until(&mut game, &mut runner, &mut tally, Phase::Typing);
    for c in "abc".chars() {
        send_key(&tx, c);
    }
    pump_until(&mut game, &mut runner, &mut tally, Phase::ShowingResult);
    assert_eq!(tally.beeps, 0);

    send_key(&tx, 'r');
    pump_until(&mut game, &mut runner, &mut tally, Phase::NotStarted);
    assert_eq!(game.session.current_text_index, 0);
    assert_eq!(game.session.mistakes, 0);

    send_key(&tx, ' ');
    pump_until(&mut game, &mut runner, &mut tally, Phase::Typing);
    assert_eq!(tally.countdown_ticks, 6);
    assert!(!tally.exited);
}

#[test]
fn headless_cancel_during_countdown() {
    let mut game = fast_game(&["hi"], true);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx));
    let mut tally = Tally::default();

    send_key(&tx, ' ');
    pump(&mut game, &mut runner, &mut tally);
    assert_eq!(game.phase(), Phase::Countdown);

    tx.send(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();
    // a due countdown tick may be delivered ahead of the key
    for _ in 0..10u32 {
        if tally.exited {
            break;
        }
        pump(&mut game, &mut runner, &mut tally);
    }

    assert!(tally.exited);
    assert_ne!(game.phase(), Phase::ShowingResult);
}
