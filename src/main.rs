use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use winit::event_loop::EventLoop;

use jar_sprite::app::App;
use jar_sprite::config::{load_scene_settings, save_scene_settings};
use jar_sprite::utils::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging();
    info!("{} {} starting", jar_sprite::APP_NAME, jar_sprite::VERSION);

    let settings = load_scene_settings();
    // creates sprite.toml on first run
    if let Err(e) = save_scene_settings(&settings) {
        warn!("Could not persist scene settings: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, StdRng::from_os_rng());
    event_loop.run_app(&mut app)?;

    info!("Event loop finished");
    Ok(())
}
