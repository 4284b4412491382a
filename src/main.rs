//! Brick Rush entry point
//!
//! Headless demo driver: runs a session at the fixed tick rate with an
//! autopilot paddle, logging engine events, until the run ends. Pass a seed
//! as the first argument for a reproducible game.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use brick_rush::consts::{MAX_SUBSTEPS, SIM_DT};
use brick_rush::sim::{GameEvent, GamePhase};
use brick_rush::{JsonFileStore, PaddleIntent, Session, Snapshot, Tuning};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let store = JsonFileStore::new("brick-rush-highscore.json");
    let mut session = Session::new(seed, Tuning::default(), store);
    session.start();
    log::info!("demo run with seed {seed}");

    let mut accumulator = 0.0f32;
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        accumulator += (now - last).as_secs_f32().min(0.1);
        last = now;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let intent = autopilot(&session.snapshot());
            session.set_paddle_intent(intent);
            if session.snapshot().phase == GamePhase::Paused {
                // Ball-loss pause in a headless run: resume immediately
                session.toggle_pause();
            }
            for event in session.tick() {
                report(event);
            }
            accumulator -= SIM_DT;
            substeps += 1;
        }

        let snap = session.snapshot();
        if snap.phase.is_terminal() {
            println!("{}", snap.message);
            println!("score {}  high score {}", snap.score, snap.high_score);
            break;
        }

        std::thread::sleep(Duration::from_millis(2));
    }
}

/// Track the ball closest to the bottom edge with the paddle center
fn autopilot(snap: &Snapshot) -> PaddleIntent {
    let target = snap
        .balls
        .iter()
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal))
        .map(|ball| ball.pos.x);

    match target {
        Some(x) if x < snap.paddle.center() - 4.0 => PaddleIntent::Left,
        Some(x) if x > snap.paddle.center() + 4.0 => PaddleIntent::Right,
        _ => PaddleIntent::None,
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::BrickDestroyed => log::debug!("brick destroyed"),
        GameEvent::BrickDamaged => log::debug!("brick damaged"),
        GameEvent::IndestructibleHit => log::debug!("indestructible clang"),
        GameEvent::WallBounce | GameEvent::PaddleBounce => {}
        GameEvent::LifeLost => log::info!("life lost"),
        GameEvent::ComboBonus { bonus } => log::info!("combo bonus +{bonus}"),
        GameEvent::PowerUpCollected { kind } => log::info!("power-up collected: {kind:?}"),
        GameEvent::LevelUp { level } => log::info!("level up -> {level}"),
        GameEvent::GameOver { score } => log::info!("game over, score {score}"),
        GameEvent::Victory { score } => log::info!("victory, score {score}"),
    }
}
