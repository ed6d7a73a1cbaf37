mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::thread_rng;

use space_invaders::high_scores::{HighScoreBoard, RankedPlayer};
use space_invaders::scheduler::{Command, Scheduler};
use space_invaders::{GameConfig, GameManager};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS redraw
const DEFAULT_CONFIG_FILE: &str = "space_invaders.toml";

fn config_path() -> PathBuf {
    std::env::var("SPACE_INVADERS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn player_name() -> String {
    std::env::var("USER").unwrap_or_default()
}

enum LoopExit {
    Quit,
    Restart,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain key events into the scheduler, let it dispatch the due ticks, then
/// redraw.  Returns when the player quits or asks for a new game.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut GameManager,
    scores: &mut HighScoreBoard,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut rng = thread_rng();
    let mut scheduler = Scheduler::new(game.config().tick_interval());
    let mut recorded = false;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(LoopExit::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(LoopExit::Quit);
                }
                KeyCode::Char('r') | KeyCode::Char('R') if game.status().is_over() => {
                    return Ok(LoopExit::Restart);
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    scheduler.submit(Command::MoveLeft)
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    scheduler.submit(Command::MoveRight)
                }
                KeyCode::Char(' ') => scheduler.submit(Command::Fire),
                _ => {}
            }
        }

        let now = Instant::now();
        scheduler.advance(now - last);
        last = now;
        scheduler.run_pending(game, &mut rng);

        if game.status().is_over() && !recorded {
            recorded = true;
            record_score(game, scores);
        }

        display::render(out, game, scores)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn record_score(game: &GameManager, scores: &mut HighScoreBoard) {
    let score = game.game_score();
    if !scores.qualifies(score) {
        return;
    }
    scores.add(RankedPlayer::new(&player_name(), score, game.wave()));
    if let Err(e) = scores.save() {
        warn!("could not save high scores to {}: {e}", scores.path().display());
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = GameConfig::load_or_default(config_path())?;
    let score_path = config.high_score_path();
    let mut scores = HighScoreBoard::load(&score_path).unwrap_or_else(|e| {
        warn!("ignoring unreadable high-score file: {e}");
        HighScoreBoard::empty(&score_path)
    });

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; only events cross the channel,
    // all game state stays on the main loop.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &config, &mut scores, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("terminal error: {e}");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    scores: &mut HighScoreBoard,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let mut game = GameManager::from_config(config.clone())?;
        game.initialize_game();
        info!("new game started");

        match game_loop(out, &mut game, scores, rx)? {
            LoopExit::Quit => break,
            LoopExit::Restart => continue,
        }
    }
    Ok(())
}
