//! Drive an effect surface in real time with a synthetic pointer

use anyhow::{Context, Result};
use folio_core::{Clock, PointerEvent, SystemClock, Timestamp};
use folio_effects::{Bounds, EffectConfig, EffectSurface, TriggerMode};
use folio_theme::IntensityParameterTable;
use std::time::Duration;

pub struct SimulationOptions {
    pub duration_ms: u64,
    pub frame_ms: u64,
    pub bounds: Bounds,
    pub seed: Option<u64>,
}

#[derive(Debug, Default)]
pub struct SimulationReport {
    pub frames: u64,
    pub spawned: usize,
    pub expired: usize,
    pub peak_live: usize,
    /// Sum of rendered instances over all frames
    pub rendered: usize,
    pub timers_after_dispose: usize,
}

/// Run on a current-thread runtime, one surface tick per frame
pub fn run(
    config: EffectConfig,
    parameters: &'static IntensityParameterTable,
    options: SimulationOptions,
) -> Result<SimulationReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(drive(config, parameters, options))
}

async fn drive(
    config: EffectConfig,
    parameters: &'static IntensityParameterTable,
    options: SimulationOptions,
) -> Result<SimulationReport> {
    let clock = SystemClock::new();
    let mode = config.trigger_mode;
    let mut surface = match options.seed {
        Some(seed) => EffectSurface::seeded(config, options.bounds, clock.now(), seed),
        None => EffectSurface::new(config, options.bounds, clock.now()),
    }
    .context("Invalid effect configuration")?;

    let mut pointer = SyntheticPointer::new(options.bounds);
    let mut interval = tokio::time::interval(Duration::from_millis(options.frame_ms.max(1)));
    let mut report = SimulationReport::default();

    loop {
        interval.tick().await;
        let now = clock.now();
        if now >= options.duration_ms {
            break;
        }

        for event in pointer.events(mode, now) {
            if surface.handle_pointer(&event).is_some() {
                report.spawned += 1;
            }
        }

        let tick = surface.tick(now);
        report.spawned += tick.spawned;
        report.expired += tick.expired;
        report.peak_live = report.peak_live.max(surface.len());

        if surface.needs_repaint() {
            report.rendered += surface.frame(now, parameters).len();
            surface.clear_repaint();
        }
        report.frames += 1;

        if report.frames % 60 == 0 {
            tracing::info!(
                "t={}ms live={} spawned={} expired={}",
                now,
                surface.len(),
                report.spawned,
                report.expired
            );
        }
    }

    surface.dispose();
    report.timers_after_dispose = surface.pending_timers();
    Ok(report)
}

/// Pointer that circles the surface, clicking every half second
struct SyntheticPointer {
    bounds: Bounds,
    inside: bool,
    last_click: Option<Timestamp>,
}

impl SyntheticPointer {
    const CLICK_EVERY_MS: u64 = 500;

    fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            inside: false,
            last_click: None,
        }
    }

    fn position(&self, now: Timestamp) -> (f32, f32) {
        let phase = (now as f32 / 1_000.0) * std::f32::consts::TAU;
        let x = self.bounds.width * (0.5 + 0.4 * phase.cos());
        let y = self.bounds.height * (0.5 + 0.4 * (phase * 2.0).sin());
        (x, y)
    }

    fn events(&mut self, mode: TriggerMode, now: Timestamp) -> Vec<PointerEvent> {
        let (x, y) = self.position(now);
        match mode {
            TriggerMode::Hover => {
                let mut events = Vec::with_capacity(2);
                if !self.inside {
                    self.inside = true;
                    events.push(PointerEvent::enter(x, y, now));
                }
                events.push(PointerEvent::moved(x, y, now));
                events
            }
            TriggerMode::Click => {
                let due = self
                    .last_click
                    .map_or(true, |last| now.saturating_sub(last) >= Self::CLICK_EVERY_MS);
                if due {
                    self.last_click = Some(now);
                    vec![PointerEvent::click(x, y, now)]
                } else {
                    Vec::new()
                }
            }
            TriggerMode::Auto => Vec::new(),
        }
    }
}
