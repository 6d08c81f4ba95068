use cryptrun_app::app_loop::{self, FixedStep};
use cryptrun_app::scene_render::{self, SceneCamera};
use cryptrun_app::{frame_input, run_state_file, seed, window_config};
use cryptrun_core::{Game, GameConfig, Vec2};
use macroquad::prelude::{get_frame_time, next_frame, screen_height, screen_width};
use macroquad::window::Conf;

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let resolved = match seed::resolve_seed_from_args(&args, seed::generate_runtime_seed()) {
        Ok(choice) => choice,
        Err(message) => {
            eprintln!("cryptrun: {message}");
            std::process::exit(2);
        }
    };

    let snapshot_path = run_state_file::default_snapshot_path();
    let snapshot = snapshot_path
        .as_deref()
        .map(run_state_file::load_or_fresh)
        .unwrap_or_else(run_state_file::fresh_snapshot);

    let mut game = Game::from_snapshot(resolved.value(), GameConfig::default(), &snapshot);
    let mut fixed = FixedStep::new();
    let mut persisted_depth = game.depth();

    loop {
        let screen = Vec2::new(screen_width(), screen_height());
        let camera = SceneCamera::centered_on(game.world().player().pos, screen);
        let player_screen = camera.to_screen(game.world().player().pos);
        let input = frame_input::capture_input_frame(player_screen);

        app_loop::drive(&mut game, &mut fixed, get_frame_time(), &input);
        let effects = game.drain_effects();

        scene_render::draw_frame(&game, &camera, &effects, resolved.value());

        if game.depth() != persisted_depth {
            persisted_depth = game.depth();
            if let Some(path) = &snapshot_path
                && let Err(error) = run_state_file::store(path, &game.progression_snapshot())
            {
                eprintln!("cryptrun: could not save progress: {error}");
            }
        }

        next_frame().await
    }
}
