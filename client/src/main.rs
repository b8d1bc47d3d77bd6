#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod game_ui;
#[cfg(target_arch = "wasm32")]
mod gpu;
#[cfg(target_arch = "wasm32")]
mod mesh;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
fn main() {
    app::run();
}

/// The game only runs in the browser. Natively this generates one world and reports
/// on it, which is handy for checking generation without a GPU.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use math_monsters::session::Session;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    match Session::new(seed) {
        Ok(session) => {
            let world = session.world();
            log::info!(
                "World ready: {} waypoints, {} spawn points, {} scene objects",
                world.waypoints().len(),
                world.spawn_candidates().len(),
                session.scene.len()
            );
            log::info!("Build for wasm32 and open index.html to play");
        }
        Err(e) => {
            log::error!("World generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
