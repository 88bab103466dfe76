use anyhow::Context;
use ledclock::{
    clock::WallClock,
    config::Config,
    forecast::Forecast,
    input::{Input, InputEvent},
    output,
    render::FrameCompositor,
    state::DisplayToggles,
    weather::Weather,
};
use log::{info, LevelFilter};
use std::{
    env,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_module("ledclock", LevelFilter::Info)
        .parse_default_env()
        .init();

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Config::DEFAULT_PATH.into());
    let config = Config::load(&config_path)?;

    let running = Arc::new(AtomicBool::new(true));
    let handler_running = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        handler_running.store(false, Ordering::Release);
    })
    .context("Error setting signal handler")?;

    let compositor = FrameCompositor::new(config.color_ramp()?, config.layers);
    let mut output = output::open(&config.output)?;
    let mut weather = Weather::new(&config);
    let mut input = Input::new(&config)?;
    let mut toggles = DisplayToggles::default();
    // Held over between frames, so a failed lock doesn't blank the forecast
    let mut forecast = Forecast::default();

    info!("Running; type `d` to toggle dim mode, `q` or Ctrl-C to exit");
    while running.load(Ordering::Acquire) {
        for event in input.poll()? {
            if event == InputEvent::Quit {
                running.store(false, Ordering::Release);
            }
            toggles.apply(event);
        }

        if let Some(latest) = weather.forecast() {
            forecast = latest;
        }

        let frame =
            compositor.compose_frame(&WallClock::now(), &forecast, toggles);
        output.transmit(&frame);
        thread::sleep(output.tick_interval());
    }

    info!("Shutting down");
    Ok(())
}
