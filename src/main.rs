use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::{Duration, SystemTime};

use bullscows::events::{Channel, EventHandler};
use bullscows::game::{FileStore, GameEngine, Settings};
use bullscows::model::{
    Difficulty, GameEngineCommand, GameEngineEvent, Outcome, SessionProjection, SessionSnapshot,
    StatsTable,
};
use bullscows::Destroyable;
use log::{error, info};

const RULES: &str = "\
Guess the secret number. Every digit in it is different.
After each guess you get feedback:
  bulls - correct digit in the right position
  cows  - correct digit in the wrong position
Example with secret 5832:
  1234 -> 1 bull, 1 cow   (3 is placed right, 2 is elsewhere)
  5821 -> 2 bulls, 1 cow
  5832 -> 4 bulls, you win
Commands: <digits>, new, give up, hint, stats, reset, rules, easy, hard, nightmare, quit";

fn init_logging() {
    env_logger::init();
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

fn render_history(snapshot: &SessionSnapshot) {
    for attempt in &snapshot.history {
        let show = |n: Option<usize>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
        println!(
            "  {}   bulls {}  cows {}",
            attempt.guess,
            show(attempt.bulls()),
            show(attempt.cows())
        );
    }
    if !snapshot.is_over() {
        println!("Attempts left: {}", snapshot.attempts_remaining);
    }
}

fn render_stats(stats: &StatsTable) {
    println!("{:<10} {:>7} {:>5} {:>7} {:>5}", "", "played", "won", "win %", "best");
    for (difficulty, record) in stats.iter() {
        println!(
            "{:<10} {:>7} {:>5} {:>7.2} {:>5}",
            difficulty,
            record.games_played,
            record.games_won,
            record.win_rate,
            record.best_attempt_count
        );
    }
}

fn render(event: &GameEngineEvent) {
    match event {
        GameEngineEvent::SessionStarted(snapshot) => println!(
            "New {} game: guess the {}-digit number within {} attempts.",
            snapshot.difficulty, snapshot.code_length, snapshot.max_attempts
        ),
        GameEngineEvent::SessionUpdated(snapshot) => render_history(snapshot),
        GameEngineEvent::GuessRejected(reason) => println!("! {}", reason),
        GameEngineEvent::GameOver {
            outcome: Outcome::Won,
            record,
            ..
        } => println!(
            "Congratulations! You guessed it right in {} attempts ({}).",
            record.attempts,
            format_duration(record.completion_time)
        ),
        GameEngineEvent::GameOver { secret, .. } => {
            println!("Game over! The number was {}.", secret)
        }
        GameEngineEvent::CelebrationChanged(true) => println!("*** 🎉 ***"),
        GameEngineEvent::HintRevealed(hint) => println!("Hint: {}", hint),
        GameEngineEvent::HintAvailabilityChanged(true) => println!("(type 'hint' for a hint)"),
        GameEngineEvent::RulesDisclosureRequested => println!("{}", RULES),
        GameEngineEvent::CelebrationChanged(false)
        | GameEngineEvent::HintAvailabilityChanged(false)
        | GameEngineEvent::StatsUpdated(_) => {}
    }
}

fn parse_command(line: &str) -> Option<Vec<GameEngineCommand>> {
    let line = line.trim();
    if let Ok(difficulty) = line.parse::<Difficulty>() {
        return Some(vec![GameEngineCommand::ChangeDifficulty(difficulty)]);
    }
    let command = match line.to_ascii_lowercase().as_str() {
        "new" => vec![GameEngineCommand::NewGame(None)],
        "give up" | "giveup" => vec![GameEngineCommand::GiveUp],
        // The dialog closes as soon as the hint has been printed.
        "hint" => vec![GameEngineCommand::RequestHint, GameEngineCommand::CloseHint],
        "stats" => vec![GameEngineCommand::RequestStats],
        "reset" => vec![GameEngineCommand::ResetStats],
        "rules" => vec![GameEngineCommand::ShowRules],
        _ if !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()) => {
            vec![GameEngineCommand::SubmitGuess(line.to_string())]
        }
        _ => return None,
    };
    Some(command)
}

fn main() {
    init_logging();

    let data_dir = Settings::data_dir();
    info!("Using data directory {}", data_dir.display());
    let store = Rc::new(FileStore::new(data_dir));

    let (command_emitter, command_observer) = Channel::<GameEngineCommand>::new();
    let (event_emitter, event_observer) = Channel::<GameEngineEvent>::new();

    let projection = Rc::new(RefCell::new(SessionProjection::default()));
    let projection_handler = projection.clone();
    let _rendering = event_observer.subscribe(move |event| {
        projection_handler.borrow_mut().handle_event(event);
        render(event);
    });

    let engine = match GameEngine::new(
        command_observer,
        event_emitter,
        store,
        Settings::seed_from_env(),
    ) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Could not start game: {}", e);
            std::process::exit(1);
        }
    };
    engine.borrow_mut().start();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Could not read input: {}", e);
                break;
            }
        }
        command_emitter.emit(GameEngineCommand::Tick(SystemTime::now()));

        if matches!(line.trim(), "q" | "quit" | "exit") {
            break;
        }
        let Some(commands) = parse_command(&line) else {
            println!("Unknown command. Type 'rules' for help.");
            continue;
        };
        let wants_stats = commands
            .iter()
            .any(|c| matches!(c, GameEngineCommand::RequestStats | GameEngineCommand::ResetStats));
        for command in commands {
            command_emitter.emit(command);
        }
        if wants_stats {
            render_stats(&projection.borrow().stats);
        }
    }

    engine.borrow_mut().destroy();
}
