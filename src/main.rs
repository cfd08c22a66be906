//! Orb Forage - headless demo runner
//!
//! The browser build drives `WebSession` from JavaScript. Natively this binary
//! runs the autopilot through a world and logs progress. An optional first
//! argument overrides the quality preset (`orb-forage high`).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use orb_forage::Settings;
    use orb_forage::platform::Session;
    use orb_forage::sim::GameEvent;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = Settings::load();
    if let Some(quality) = std::env::args().nth(1) {
        if let Err(e) = settings.set_quality(&quality) {
            log::warn!("{e}, keeping {}", settings.quality.as_str());
        }
    }
    log::info!(
        "Orb Forage (native) starting: {:?} world, {} quality",
        settings.world,
        settings.quality.as_str()
    );

    let mut session = Session::new(&settings, 0x0b5_f0a6e);
    session.play();
    session.begin();
    session.idle_mode = true;

    let out_of_bounds = session.world().state.total_count() - session.world().reachable_remaining();
    if out_of_bounds > 0 {
        log::warn!("{out_of_bounds} orbs lie outside the movement bound");
    }

    const DT: f32 = 1.0 / 60.0;
    const MAX_SECONDS: u32 = 600;
    for tick in 0..MAX_SECONDS * 60 {
        let out = session.frame(DT);
        let hidden = out.visibility.iter().filter(|v| !**v).count();
        let glow = out.feedback.glow_intensity;
        for event in &out.events {
            match event {
                GameEvent::Collected { id } => {
                    log::info!(
                        "[{:6.1}s] orb {:2} collected ({} scenery hidden, glow {:.2})",
                        tick as f32 * DT,
                        id,
                        hidden,
                        glow
                    );
                }
                GameEvent::AllCollected => {
                    log::info!("[{:6.1}s] all orbs collected", tick as f32 * DT);
                    return;
                }
            }
        }
        if session.world().reachable_remaining() == 0 {
            let state = &session.world().state;
            log::info!(
                "[{:6.1}s] every reachable orb collected ({}/{})",
                tick as f32 * DT,
                state.collected_count(),
                state.total_count()
            );
            return;
        }
    }

    let state = &session.world().state;
    log::warn!(
        "demo stopped after {MAX_SECONDS}s with {}/{} orbs",
        state.collected_count(),
        state.total_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
