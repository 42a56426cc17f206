//! Drives the view with a simulated sensor and logs what a renderer would receive.
//!
//! Run with `cargo run --example console [path/to/view.toml]`.

use body_cutout::prelude::*;

const TICKS: u64 = 12;

fn walking_body(id: u64, step: u64) -> Body {
    let x = 180.0 + 12.0 * step as f32;
    let z = 1.2 + 0.25 * step as f32;
    let mut body = Body::new(id);

    for (i, jt) in JointType::ALL.into_iter().enumerate() {
        let pixel = Vec2::new(x + 6.0 * (i % 5) as f32, 80.0 + 14.0 * (i / 5) as f32);
        let state = if i % 7 == 3 {
            TrackingState::Inferred
        } else {
            TrackingState::Tracked
        };
        body.set_joint(jt, Intrinsics::DEPTH_512X424.deproject(pixel, z), state);
    }
    body
}

fn cutout_frames(feed: &SimulatedFeed, depth_mm: u16, with_color: bool) -> FrameSet {
    let depth = feed.depth_description();
    let color = feed.color_description();

    FrameSet {
        depth: DepthFrame::new(depth, vec![depth_mm; depth.len()]).ok(),
        body_index: BodyIndexFrame::new(depth, vec![0; depth.len()]).ok(),
        color: with_color
            .then(|| {
                let bgra = [64u8, 128, 192, 255].repeat(color.len());
                ColorFrame::new(color, ColorImageFormat::Bgra, bgra).ok()
            })
            .flatten(),
        bodies: None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ViewConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("Could not load {}: {}, using defaults", path, e);
            ViewConfig::default()
        }),
        None => ViewConfig::default(),
    };

    let (device, feed) = SimulatedDevice::new();
    let mut view = ViewCoordinator::open(Box::new(device), config);
    let mut renderer = SummaryRenderer::new();

    for step in 0..TICKS {
        // Every third color frame is dropped; the cutout skips those ticks.
        feed.push(cutout_frames(&feed, 1000 + 250 * step as u16, step % 3 != 2));

        let mut bodies = vec![walking_body(1, step)];
        if (4..8).contains(&step) {
            bodies.push(walking_body(2, TICKS - step));
        }
        feed.push_bodies(BodyFrame::new(bodies));

        if step == TICKS / 2 {
            view.request(ViewConfig {
                mirror: !view.config().mirror,
                downsample: 2,
                ..view.config().clone()
            });
        }

        let report = view.tick();
        view.present(&mut renderer);
        log::info!("{} | {:?}", report, renderer.last());
    }

    log::info!(
        "{} passes, {} bytes uploaded",
        renderer.passes(),
        renderer.uploaded_bytes()
    );
}
