use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use shakmaty::Color;

use super::TerminalDisplay;
use crate::BoardDisplay;
use crate::board::Square;
use crate::config::EngineConfig;
use crate::feedback::compute_feedback;
use crate::game_logic::{GameEngine, GameError, GameEvent, Outcome};

/// Everything the terminal loop reacts to, in arrival order.
#[derive(Debug)]
enum TerminalInput {
    Line(String),
    Tick,
    Closed,
}

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal game.
///
/// A reader thread forwards stdin lines and a ticker thread forwards one
/// clock tick per second; both feed one channel, so the engine sees
/// selections and ticks strictly one at a time.
pub fn run_interactive_terminal(config: EngineConfig) {
    let mut engine = GameEngine::with_config(config);
    let mut display = TerminalDisplay::new();
    let (tx, rx) = mpsc::channel();

    spawn_stdin_reader(tx.clone());
    spawn_ticker(tx);

    redraw(&mut display, &engine);
    prompt();

    for input in rx {
        let line = match input {
            TerminalInput::Tick => {
                if let Some(victory) = engine.tick() {
                    println!("\n⏰ {victory}");
                    prompt();
                }
                continue;
            }
            TerminalInput::Closed => break,
            TerminalInput::Line(line) => line,
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            prompt();
            continue;
        };

        match command {
            "t" => {
                let count: u32 = parts.get(1).and_then(|n| n.parse().ok()).unwrap_or(1);
                let mut result = Ok(Outcome::Ticked { victory: None });
                for _ in 0..count {
                    result = engine.handle(GameEvent::Tick);
                    if matches!(result, Ok(Outcome::Ticked { victory: Some(_) })) {
                        break;
                    }
                }
                report(&mut display, &engine, result);
            }
            "load" => {
                let fen = line.trim_start()[4..].trim();
                match GameEngine::from_fen(fen, *engine.config()) {
                    Ok(loaded) => {
                        engine = loaded;
                        redraw(&mut display, &engine);
                        println!("\n✅ Position loaded from FEN");
                    }
                    Err(e) => println!("❌ Invalid FEN: {e}"),
                }
            }
            "r" => {
                let result = engine.handle(GameEvent::Reset);
                report(&mut display, &engine, result);
            }
            "p" => redraw(&mut display, &engine),
            "q" => break,
            other => match other.parse::<Square>() {
                Ok(square) => {
                    let result = engine.handle(GameEvent::Select(square));
                    report(&mut display, &engine, result);
                }
                Err(e) => println!("Unknown command or square '{other}': {e}"),
            },
        }
        prompt();
    }
}

fn spawn_stdin_reader(tx: Sender<TerminalInput>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(TerminalInput::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::error!("failed to read input: {e}");
                    break;
                }
            }
        }
        let _ = tx.send(TerminalInput::Closed);
    });
}

fn spawn_ticker(tx: Sender<TerminalInput>) {
    thread::spawn(move || {
        while tx.send(TerminalInput::Tick).is_ok() {
            thread::sleep(Duration::from_secs(1));
        }
    });
}

fn prompt() {
    print!("> ");
    if let Err(e) = io::stdout().flush() {
        log::warn!("failed to flush stdout: {e}");
    }
}

/// Redraw after an event and explain what happened.
fn report(
    display: &mut TerminalDisplay,
    engine: &GameEngine,
    result: Result<Outcome, GameError>,
) {
    redraw(display, engine);
    match result {
        Ok(Outcome::Selected {
            square,
            destinations,
        }) => println!(
            "\nSelected {} on {square} ({} moves)",
            engine.piece_at(square),
            destinations.len()
        ),
        Ok(Outcome::Moved { mv, victory }) => {
            println!("\nMoved {} from {} to {}", mv.piece, mv.from, mv.to);
            if let Some(victory) = victory {
                println!("🏆 {victory}");
            }
        }
        Ok(Outcome::Ticked {
            victory: Some(victory),
        }) => println!("\n⏰ {victory}"),
        Ok(Outcome::Ticked { victory: None }) => {}
        Ok(Outcome::Reset) => println!("\n🔄 New game"),
        Err(e) => println!("\n❌ {e}"),
    }
}

/// Draws the complete interface: help text, status line, board.
fn draw_interface(engine: &GameEngine) {
    println!("♟️  King Capture Chess");
    println!();
    println!("Commands: <square> | t [n] (tick) | load <fen> | r (reset) | p (refresh) | q (quit)");
    println!();

    match engine.winner() {
        Some(victory) => println!("Game over: {victory}"),
        None => println!("{:?} to move", engine.current_turn()),
    }
    let (white, black) = engine.scores();
    println!("Clock: {}s per side", engine.clock().allotment());
    println!(
        "Black: {black:>3} pts {:>4}s  {}",
        engine.remaining_time(Color::Black),
        captured_icons(engine, Color::Black)
    );
    println!(
        "White: {white:>3} pts {:>4}s  {}",
        engine.remaining_time(Color::White),
        captured_icons(engine, Color::White)
    );
    println!();
}

fn captured_icons(engine: &GameEngine, color: Color) -> String {
    engine
        .captured_by(color)
        .iter()
        .filter_map(|piece| piece.icon())
        .collect()
}

fn redraw(display: &mut TerminalDisplay, engine: &GameEngine) {
    clear_screen();
    draw_interface(engine);
    let feedback = compute_feedback(&engine.snapshot());
    if let Err(e) = display.show(engine.board(), &feedback) {
        log::error!("{e}");
    }
}
