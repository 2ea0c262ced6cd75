//! Ball Canvas entry point
//!
//! Headless shell: reads commands from stdin, runs the tick loop in real time
//! and logs what a graphical shell would draw.
//!
//! Usage: `ball-canvas [settings.json]`

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use ball_canvas::sim::Color;
use ball_canvas::{BallCanvas, CanvasEvent, Settings};

const HELP: &str = "\
commands:
  color <red|yellow|blue>   select a color
  size <radius>             select a size
  start | stop | reset      animation control
  speed                     speed up
  wait <ms>                 let the animation run
  show                      list balls
  help | quit";

/// Parsed shell command
#[derive(Debug)]
enum Command {
    Color(Color),
    Size(f32),
    Start,
    Stop,
    Reset,
    Speed,
    Wait(u64),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;
    let arg = parts.next();
    match cmd.to_lowercase().as_str() {
        "color" => arg.and_then(Color::from_str).map(Command::Color),
        "size" => arg.and_then(|a| a.parse().ok()).map(Command::Size),
        "start" => Some(Command::Start),
        "stop" => Some(Command::Stop),
        "reset" => Some(Command::Reset),
        "speed" => Some(Command::Speed),
        "wait" => arg.and_then(|a| a.parse().ok()).map(Command::Wait),
        "show" => Some(Command::Show),
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Run the scheduler loop for `duration` of wall-clock time
fn run_for(canvas: &mut BallCanvas, duration: Duration) {
    let deadline = Instant::now() + duration;
    let mut last = Instant::now();
    while Instant::now() < deadline {
        std::thread::sleep(canvas.tick_interval());
        let now = Instant::now();
        canvas.advance(now - last);
        last = now;
        render(canvas);
    }
}

/// Log drained events the way a shell would apply them
fn render(canvas: &mut BallCanvas) {
    for event in canvas.drain_events() {
        match event {
            CanvasEvent::BallAdded(view) => log::info!(
                "draw ball {} {} r={} at ({:.0}, {:.0})",
                view.id,
                view.color.as_str(),
                view.radius,
                view.center.x,
                view.center.y
            ),
            CanvasEvent::BallMoved { id, center } => {
                log::trace!("move ball {} to ({:.0}, {:.0})", id, center.x, center.y)
            }
            CanvasEvent::Cleared => log::info!("erase all balls"),
        }
    }
}

fn show(canvas: &BallCanvas) {
    println!(
        "{} balls, speed {}, {}",
        canvas.ball_count(),
        canvas.speed(),
        if canvas.is_running() { "running" } else { "stopped" }
    );
    for view in canvas.ball_views() {
        println!(
            "  #{:<3} {:<6} r={:<3} ({:.0}, {:.0})",
            view.id,
            view.color.as_str(),
            view.radius,
            view.center.x,
            view.center.y
        );
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ball Canvas (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let mut canvas = match BallCanvas::new(settings) {
        Ok(canvas) => canvas,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{HELP}");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(Command::Color(color)) => {
                if let Err(e) = canvas.select_color(color) {
                    println!("{e}");
                }
            }
            Some(Command::Size(size)) => {
                if let Err(e) = canvas.select_size(size) {
                    println!("{e}");
                }
            }
            Some(Command::Start) => {
                canvas.start();
            }
            Some(Command::Stop) => canvas.stop(),
            Some(Command::Reset) => canvas.reset(),
            Some(Command::Speed) => canvas.speed_up(),
            Some(Command::Wait(ms)) => run_for(&mut canvas, Duration::from_millis(ms)),
            Some(Command::Show) => show(&canvas),
            Some(Command::Help) => println!("{HELP}"),
            Some(Command::Quit) => break,
            None => println!("unknown command: {}", line.trim()),
        }
        render(&mut canvas);
        if let Err(e) = io::stdout().flush() {
            log::error!("Lost stdout: {}", e);
            break;
        }
    }

    ExitCode::SUCCESS
}
