//! Skeleton overlay behavior driven through a simulated sensor.

use body_cutout::prelude::*;
use body_cutout::skeleton::{parent, BONES};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Rig {
    mapper: SkeletonPlaneMapper,
    session: SensorSession,
    feed: SimulatedFeed,
    plane: CutoutMesh,
}

impl Rig {
    fn new(settings: SkeletonSettings) -> Self {
        init_logger();
        let (device, feed) = SimulatedDevice::new();
        let session = SensorSession::open(Box::new(device), StreamKinds::all()).unwrap();
        let mut mapper = SkeletonPlaneMapper::new(settings);
        mapper.initialize(&session, None).unwrap();

        Self {
            mapper,
            session,
            feed,
            plane: CutoutMesh::new(GridSize::new(8, 8)),
        }
    }

    fn tick(&mut self, bodies: Vec<Body>) -> TickOutcome {
        self.feed.push_bodies(BodyFrame::new(bodies));
        self.mapper.tick(&mut self.session, &self.plane)
    }
}

fn at_pixel(x: f32, y: f32, z: f32) -> Vec3 {
    Intrinsics::DEPTH_512X424.deproject(Vec2::new(x, y), z)
}

/// A body facing the sensor at `z` meters, every joint inside the depth frame.
fn body_at(id: u64, z: f32) -> Body {
    let mut body = Body::new(id);
    for (i, jt) in JointType::ALL.into_iter().enumerate() {
        let x = 150.0 + 8.0 * (i % 5) as f32;
        let y = 60.0 + 12.0 * (i / 5) as f32;
        body.set_joint(jt, at_pixel(x, y, z), TrackingState::Tracked);
    }
    body
}

#[test]
fn joint_beyond_max_distance_hidden_despite_valid_projection() {
    let mut rig = Rig::new(SkeletonSettings {
        max_distance: 2.0,
        ..SkeletonSettings::default()
    });

    let mut body = body_at(1, 1.5);
    body.set_joint(JointType::HandLeft, at_pixel(256.0, 212.0, 2.5), TrackingState::Tracked);
    assert!(rig.tick(vec![body]).is_updated());

    let visuals = rig.mapper.body(1).unwrap();
    let hand = visuals.joint(JointType::HandLeft);
    assert!(!hand.marker_visible);
    assert!(!hand.proxy_enabled);
    assert!(!hand.bone.visible);

    // Bones pointing at the hidden hand are hidden too.
    for (child, p) in BONES {
        if p == JointType::HandLeft {
            assert!(!visuals.joint(child).bone.visible, "{:?}", child);
            assert!(visuals.joint(child).marker_visible, "{:?}", child);
        }
    }
}

#[test]
fn bones_need_both_endpoints() {
    let mut rig = Rig::new(SkeletonSettings::default());
    let mut body = body_at(1, 2.0);
    // Outside the depth frame.
    body.set_joint(JointType::ElbowRight, at_pixel(-40.0, 100.0, 2.0), TrackingState::Tracked);
    rig.tick(vec![body]);

    let visuals = rig.mapper.body(1).unwrap();
    for jt in JointType::ALL {
        let visual = visuals.joint(jt);
        let parent_hidden = parent(jt).is_some_and(|p| p == JointType::ElbowRight);
        let expected = jt != JointType::ElbowRight && !parent_hidden && parent(jt).is_some();
        assert_eq!(visual.bone.visible, expected, "{:?}", jt);
    }
}

#[test]
fn restyling_is_lazy() {
    let mut rig = Rig::new(SkeletonSettings::default());
    rig.tick(vec![body_at(1, 2.0), body_at(2, 2.5)]);

    for _ in 0..3 {
        rig.mapper.apply_settings(SkeletonSettings::default(), None);
        rig.tick(vec![body_at(1, 2.0), body_at(2, 2.5)]);
    }
    assert_eq!(rig.mapper.style_writes(), 0);

    let bigger = SkeletonSettings {
        joint_base_size: 0.6,
        ..SkeletonSettings::default()
    };
    rig.mapper.apply_settings(bigger, None);
    rig.mapper.apply_settings(bigger, None);
    assert_eq!(rig.mapper.style_writes(), 2 * JointType::COUNT);

    let proxies = rig.mapper.interaction_proxies();
    assert!(proxies.iter().all(|p| (p.half_extent - 0.3).abs() < 1.0e-6));
}

#[test]
fn lost_bodies_vanish_the_same_tick() {
    let mut rig = Rig::new(SkeletonSettings::default());
    rig.tick(vec![body_at(10, 2.0), body_at(20, 2.0), Body::untracked()]);
    let first = rig.mapper.body(10).unwrap().generation;
    assert_eq!(rig.mapper.bodies().len(), 2);

    rig.tick(vec![body_at(20, 2.0)]);
    assert!(rig.mapper.body(10).is_none());
    assert!(rig
        .mapper
        .interaction_proxies()
        .iter()
        .all(|p| p.body_id == 20));

    rig.tick(vec![body_at(20, 2.0)]);
    assert!(rig.mapper.body(10).is_none());

    rig.tick(vec![body_at(10, 2.0), body_at(20, 2.0)]);
    let again = rig.mapper.body(10).unwrap();
    assert_ne!(again.generation, first);
}

#[test]
fn missing_body_frame_keeps_visuals() {
    let mut rig = Rig::new(SkeletonSettings::default());
    rig.tick(vec![body_at(1, 2.0)]);
    let before = rig.mapper.bodies().clone();

    assert_eq!(
        rig.mapper.tick(&mut rig.session, &rig.plane),
        TickOutcome::Skipped(SkipReason::NoBodyFrame)
    );
    assert_eq!(rig.mapper.bodies(), &before);
}

#[test]
fn mirror_reflects_joints_about_plane_center() {
    let mut plain = Rig::new(SkeletonSettings::default());
    let mut mirrored = Rig::new(SkeletonSettings {
        mirror: true,
        ..SkeletonSettings::default()
    });
    plain.tick(vec![body_at(1, 2.0)]);
    mirrored.tick(vec![body_at(1, 2.0)]);

    for jt in JointType::ALL {
        let a = plain.mapper.body(1).unwrap().joint(jt).position;
        let b = mirrored.mapper.body(1).unwrap().joint(jt).position;
        assert!((a.x + b.x).abs() < 1.0e-4, "{:?}: {} vs {}", jt, a, b);
        assert!((a.y - b.y).abs() < 1.0e-6);
    }
}

#[test]
fn plane_geometry_follows_surface_rebuilds() {
    let mut rig = Rig::new(SkeletonSettings::default());
    rig.tick(vec![body_at(1, 2.0)]);
    rig.tick(vec![body_at(1, 2.0)]);
    assert_eq!(rig.mapper.plane().recomputations(), 1);

    rig.plane.rebuild(GridSize::new(4, 4));
    rig.tick(vec![body_at(1, 2.0)]);
    assert_eq!(rig.mapper.plane().recomputations(), 2);
}

#[test]
fn bone_colors_follow_tracking_quality() {
    let mut rig = Rig::new(SkeletonSettings::default());
    let mut body = body_at(1, 2.0);
    let knee = body.joint(JointType::KneeLeft).position;
    body.set_joint(JointType::KneeLeft, knee, TrackingState::Inferred);
    let ankle = body.joint(JointType::AnkleLeft).position;
    body.set_joint(JointType::AnkleLeft, ankle, TrackingState::NotTracked);
    rig.tick(vec![body]);

    let visuals = rig.mapper.body(1).unwrap();
    let ankle_bone = visuals.joint(JointType::AnkleLeft).bone;
    assert_eq!(ankle_bone.start_color, BLACK);
    assert_eq!(ankle_bone.end_color, RED);
    let knee_bone = visuals.joint(JointType::KneeLeft).bone;
    assert_eq!(knee_bone.start_color, RED);
    assert_eq!(knee_bone.end_color, LIME);
}
