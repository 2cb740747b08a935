//! Heart Catch entry point
//!
//! Native builds run a headless session with the idle autopilot steering the
//! basket. The browser build starts from `web::wasm_start` and is driven by
//! the page.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::fs;

    use heart_catch::consts::FRAME_DT;
    use heart_catch::sim::{
        GameEvent, GamePhase, GameState, TweenAnimator, advance, idle_target,
        start_game_with_area,
    };
    use heart_catch::{MessageBook, Tuning};

    /// Autopilot basket speed (percent of width per second)
    const IDLE_BASKET_SPEED: f32 = 60.0;
    /// Headless play area (px)
    const AREA_WIDTH: f32 = 400.0;
    const AREA_HEIGHT: f32 = 700.0;

    struct Options {
        seed: u64,
        tuning: Option<String>,
        messages: Option<String>,
        seconds: f32,
    }

    fn parse_args() -> Result<Options, Box<dyn Error>> {
        let mut opts = Options {
            seed: 12345,
            tuning: None,
            messages: None,
            seconds: 120.0,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| format!("missing value for {arg}"))
            };
            match arg.as_str() {
                "--seed" => opts.seed = value()?.parse()?,
                "--tuning" => opts.tuning = Some(value()?),
                "--messages" => opts.messages = Some(value()?),
                "--seconds" => opts.seconds = value()?.parse()?,
                other => return Err(format!("unknown argument: {other}").into()),
            }
        }
        Ok(opts)
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let opts = parse_args()?;
        let tuning = match &opts.tuning {
            Some(path) => Tuning::from_json(&fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };
        let messages = match &opts.messages {
            Some(path) => MessageBook::from_json(&fs::read_to_string(path)?)?,
            None => MessageBook::default(),
        };

        let mut state = GameState::new(opts.seed, messages.total_targets(), tuning.clone());
        let mut animator = TweenAnimator::new(opts.seed, tuning);
        log::info!("Headless session with seed: {}", opts.seed);
        start_game_with_area(&mut state, &mut animator, AREA_WIDTH, AREA_HEIGHT);

        let max_frames = (opts.seconds / FRAME_DT) as u64;
        let mut misses = 0u32;
        for _ in 0..max_frames {
            if let Some(target) = idle_target(&state, &animator) {
                let mut basket = state.basket.clone();
                basket.move_toward(target, FRAME_DT, IDLE_BASKET_SPEED);
                state.set_basket_position(basket.x);
            }
            advance(&mut state, &mut animator, FRAME_DT);

            for event in state.drain_events() {
                match event {
                    GameEvent::HeartCaught {
                        heart,
                        message_index,
                    } => println!(
                        "[{:6.2}s] caught heart {:>3}: {}",
                        state.time,
                        heart.id,
                        messages.message(message_index)
                    ),
                    GameEvent::HeartMissed { heart } => {
                        misses += 1;
                        log::info!("Missed heart {}", heart.id);
                    }
                    GameEvent::PhaseChanged {
                        phase: GamePhase::Final,
                    } => {
                        let final_message = messages.final_message();
                        println!("\n{}\n{}", final_message.title, final_message.text);
                    }
                    _ => {}
                }
            }

            if state.phase == GamePhase::Final {
                break;
            }
        }

        println!(
            "\nScore {}/{} with {} missed in {:.1}s",
            state.score, state.total_targets, misses, state.time
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Heart Catch (native) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
