//! Mouth King entry point
//!
//! Native builds run a headless match against synthetic detections and print
//! the final board. The browser build drives `mouth_king::wasm::WasmGame`
//! from JavaScript instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WasmGame, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use mouth_king::sim::Scene;
    use mouth_king::tracking::Detection;
    use mouth_king::{FrameInput, Game, Settings, Theme, Tuning, logging};

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;

    /// Play a headless Mouth King match with synthetic faces
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Enable verbose logging
        #[arg(short, long)]
        pub verbose: bool,

        /// Seed for the item and event RNG
        #[arg(long, default_value_t = 42)]
        pub seed: u64,

        /// Number of synthetic players
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=4))]
        pub players: u8,

        /// Tuning JSON file (defaults are used when omitted)
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// Event theme: default or spring_festival_horse
        #[arg(long, default_value = "default", value_parser = parse_theme)]
        pub theme: Theme,
    }

    fn parse_theme(s: &str) -> Result<Theme, String> {
        Theme::from_str(s).ok_or_else(|| format!("unknown theme `{}`", s))
    }

    /// Faces drifting around the frame, opening and closing their mouths
    fn synthetic_faces(players: usize, t: u32) -> Vec<Detection> {
        let t = t as f32;
        (0..players)
            .map(|i| {
                let phase = i as f32 * 1.7;
                let lane = (i as f32 + 0.5) / players as f32;
                let x = lane + 0.08 * (t * 0.021 + phase).sin();
                let y = 0.45 + 0.3 * (t * 0.013 + phase).sin();
                let open = ((t as u32 / 25) + i as u32) % 3 != 0;
                Detection::new(x, y, if open { 0.2 } else { 0.01 })
            })
            .collect()
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        logging::init(args.verbose);

        let tuning = match &args.tuning {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };
        let settings = Settings {
            theme: args.theme,
            ..Settings::default()
        };
        let max_frames = tuning.match_duration_frames + 1;
        let players = usize::from(args.players);

        log::info!("Mouth King (native) starting: {} synthetic players, seed {}", players, args.seed);
        let mut game = Game::new(tuning, settings, args.seed);
        game.finish_loading();
        game.start();

        let mut t = 0u32;
        let mut sfx_count = 0usize;
        while t < max_frames && game.state().scene == Scene::Playing {
            let input = FrameInput {
                video_time: f64::from(t) / 60.0,
                width: WIDTH,
                height: HEIGHT,
            };
            let mut source = || synthetic_faces(players, t);
            game.frame(&input, &mut source);
            sfx_count += game.drain_sfx().len();
            t += 1;
        }

        let state = game.state();
        println!("\n{} - final board", game.catalog().theme.title());
        println!("frames: {}  level: {}  sound cues: {}", state.frame, state.level, sfx_count);
        let standings = game.standings();
        for s in &standings {
            println!(
                "#{} P{}  {:>6} pts  hp {:>5.1}  max combo {:>3}  survived {:>5}f {}",
                s.rank,
                s.player,
                s.score,
                s.hp,
                s.max_combo,
                s.survival_frames,
                s.loser_mark.unwrap_or("")
            );
        }
        if let Some(winner) = standings.first() {
            println!("winner: P{} with {} pts", winner.player, winner.score);
        }
        Ok(())
    }

}
