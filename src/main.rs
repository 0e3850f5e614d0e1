mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use arena_shooter::compute::{init_state, restart, tick};
use arena_shooter::config::{load_config, GameConfig};
use arena_shooter::entities::{GameState, GameStatus, InputState};
use arena_shooter::snapshot::build_snapshot;

use display::Viewport;

// ── Held-key model ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms at
/// 60 Hz) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn read_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    use KeyCode::Char;
    InputState {
        up: any_held(key_frame, &[KeyCode::Up, Char('w'), Char('W')], frame),
        down: any_held(key_frame, &[KeyCode::Down, Char('s'), Char('S')], frame),
        left: any_held(key_frame, &[KeyCode::Left, Char('a'), Char('A')], frame),
        right: any_held(key_frame, &[KeyCode::Right, Char('d'), Char('D')], frame),
        rotate_left: any_held(key_frame, &[Char('j'), Char('J')], frame),
        rotate_right: any_held(key_frame, &[Char('k'), Char('K')], frame),
        fire: is_held(key_frame, &Char(' '), frame),
    }
}

// ── Command line ──────────────────────────────────────────────────────────────

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(GameConfig),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
    custom: Option<&GameConfig>,
) -> io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  ARENA  SHOOTER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if high_score > 0 {
        let hs_str = format!("Best Score: {}", high_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(5),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select mode:"))?;

    let mut options: Vec<(&str, &str, Color, &str)> = vec![
        ("1", "Arena ", Color::Green, "Health pool, enemies close in"),
        ("2", "Timed ", Color::Red, "One touch kills, survive 20s"),
    ];
    if custom.is_some() {
        options.push(("3", "Custom", Color::Yellow, "Settings from --config"));
    }

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Power-ups (catch falling items):"))?;

    let bonus_info: &[(&str, Color, &str)] = &[
        ("!", Color::Cyan, " RapidFire — double fire rate for 5s"),
        ("✹", Color::Magenta, " Bomb      — clears every enemy"),
    ];
    for (i, (sym, color, desc)) in bonus_info.iter().enumerate() {
        let row = cy + 4 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(GameConfig::arena())),
                KeyCode::Char('2') => return Ok(MenuResult::Start(GameConfig::timed())),
                KeyCode::Char('3') => {
                    if let Some(cfg) = custom {
                        return Ok(MenuResult::Start(cfg.clone()));
                    }
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" become one `InputState`, so movement, turning and fire can all be
/// held together.  Fire cadence is enforced by the simulation.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<bool> {
    let mut rng = thread_rng();
    let frame_len = Duration::from_millis(state.config.tick_ms);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            *state = restart(state);
                            key_frame.clear();
                        }
                        KeyCode::Char('m') | KeyCode::Char('M')
                            if state.status == GameStatus::GameOver =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = read_input(&key_frame, frame);
        *state = tick(state, &input, &mut rng);

        let (cols, rows) = terminal::size()?;
        display::render(out, &Viewport { cols, rows }, &build_snapshot(state))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            std::thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let _ = env_logger::Builder::from_default_env().try_init();

    let custom = match config_path_from_args() {
        Some(path) => {
            let cfg = load_config(&path)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            log::info!("loaded config from {}", path.display());
            Some(cfg)
        }
        None => None,
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ghostty / kitty-protocol terminals report releases; others fall back
    // to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the game loop never
    // waits on I/O.
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

    let result = run(&mut out, &rx, custom.as_ref());

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    custom: Option<&GameConfig>,
) -> io::Result<()> {
    let mut high_score = 0;

    loop {
        match show_menu(out, rx, high_score, custom)? {
            MenuResult::Quit => break,
            MenuResult::Start(config) => {
                log::info!("starting game: {:?} contact, {:?} spawn", config.contact, config.enemy_spawn);
                let mut state = init_state(config, high_score);
                let quit = game_loop(out, &mut state, rx)?;
                high_score = high_score.max(state.high_score);

                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
