mod app;
mod game;
mod hanoi;
mod render;
mod sim;
mod ui;

use app::App;
use game::config::{resolve_disk_count, HanoiConfig};
use winit::event_loop::EventLoop;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = HanoiConfig::load();

    let args: Vec<String> = std::env::args().collect();
    let disk_count = resolve_disk_count(args.get(1).map(String::as_str), &config.gameplay);

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = match App::new(config, disk_count) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    event_loop.run_app(&mut app).expect("event loop error");

    if app.fatal_error().is_some() {
        std::process::exit(1);
    }
}
