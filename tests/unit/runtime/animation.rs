use super::*;
use crate::{
    random::source::{SequenceRandom, seeded},
    render::surface::{DrawCmd, RecordingSurface},
    runtime::{host::StaticHost, scheduler::ManualScheduler},
    sim::state::Motion,
};

fn viewport() -> Viewport {
    Viewport::new(320.0, 240.0)
}

#[test]
fn mount_requests_exactly_one_frame() {
    let mut sched = ManualScheduler::new();
    let anim = CurveAnimation::mount(EffectConfig::default(), viewport(), seeded(1), &mut sched)
        .unwrap();
    assert!(anim.is_mounted());
    drop(anim);
    assert_eq!(sched.requested(), 1);
    assert_eq!(sched.cancelled().len(), 1);
}

#[test]
fn mount_rejects_invalid_inputs() {
    let mut cfg = EffectConfig::default();
    cfg.point_radius = -1.0;
    assert!(CurveAnimation::mount(cfg, viewport(), seeded(1), ManualScheduler::new()).is_err());
    assert!(
        CurveAnimation::mount(
            EffectConfig::default(),
            Viewport::new(0.0, 10.0),
            seeded(1),
            ManualScheduler::new()
        )
        .is_err()
    );
}

#[test]
fn each_tick_draws_and_requests_the_next_frame() {
    let mut anim =
        CurveAnimation::mount(EffectConfig::default(), viewport(), seeded(5), ManualScheduler::new())
            .unwrap();
    let mut host = StaticHost::new(viewport(), RecordingSurface::new());
    let n = anim.state().points().len();

    for _ in 0..10 {
        let handle = anim.scheduler_mut().next_due().unwrap();
        let outcome = anim.tick(handle, &mut host);
        assert!(matches!(outcome, FrameOutcome::Drawn(_)));
        let cmds = host.surface.as_mut().unwrap().take();
        assert_eq!(cmds.len(), 1 + n * 5);
        assert!(matches!(cmds[0], DrawCmd::ClearRect(_)));
    }
    assert_eq!(anim.frames_drawn(), 10);
    assert_eq!(anim.scheduler().requested(), 11);
}

#[test]
fn frame_shows_positions_before_advancing() {
    let mut anim =
        CurveAnimation::mount(EffectConfig::default(), viewport(), seeded(9), ManualScheduler::new())
            .unwrap();
    let mut host = StaticHost::new(viewport(), RecordingSurface::new());
    let before = anim.state().positions();
    let handle = anim.scheduler_mut().next_due().unwrap();
    anim.tick(handle, &mut host);

    let drawn: Vec<_> = host
        .surface
        .as_ref()
        .unwrap()
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCmd::FillCircle { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(drawn, before);
}

#[test]
fn missing_surface_skips_frame_but_keeps_loop_alive() {
    let mut rng = SequenceRandom::new(vec![0.3, 0.6, 0.9]);
    let mut anim = CurveAnimation::mount(
        EffectConfig::default(),
        viewport(),
        &mut rng,
        ManualScheduler::new(),
    )
    .unwrap();
    let drawn_at_mount = anim.rng.drawn();
    let before = anim.state().clone();
    let mut host: StaticHost<RecordingSurface> = StaticHost::detached(viewport());

    let handle = anim.scheduler_mut().next_due().unwrap();
    assert_eq!(anim.tick(handle, &mut host), FrameOutcome::SkippedNoSurface);
    assert_eq!(anim.state(), &before);
    assert_eq!(anim.rng.drawn(), drawn_at_mount);
    assert_eq!(anim.frames_drawn(), 0);
    assert!(anim.scheduler().has_due());

    host.surface = Some(RecordingSurface::new());
    let handle = anim.scheduler_mut().next_due().unwrap();
    assert!(matches!(anim.tick(handle, &mut host), FrameOutcome::Drawn(_)));
}

#[test]
fn stale_handles_are_ignored() {
    let mut anim =
        CurveAnimation::mount(EffectConfig::default(), viewport(), seeded(2), ManualScheduler::new())
            .unwrap();
    let mut host = StaticHost::new(viewport(), RecordingSurface::new());
    let first = anim.scheduler_mut().next_due().unwrap();
    anim.tick(first, &mut host);
    assert_eq!(anim.tick(first, &mut host), FrameOutcome::Ignored);
    assert_eq!(anim.frames_drawn(), 1);
}

#[test]
fn unmount_cancels_once_and_no_frame_fires_afterwards() {
    let mut sched = ManualScheduler::new();
    let mut host = StaticHost::new(viewport(), RecordingSurface::new());
    {
        let mut anim =
            CurveAnimation::mount(EffectConfig::default(), viewport(), seeded(4), &mut sched)
                .unwrap();
        for _ in 0..3 {
            let h = anim.scheduler_mut().next_due().unwrap();
            anim.tick(h, &mut host);
        }
        let pending = anim.pending().unwrap();
        assert!(anim.unmount());
        assert!(!anim.unmount());
        assert!(!anim.is_mounted());
        assert!(anim.scheduler_mut().next_due().is_none());
        assert_eq!(anim.tick(pending, &mut host), FrameOutcome::Ignored);
        assert_eq!(anim.frames_drawn(), 3);
    }
    // dropping after unmount must not cancel again
    assert_eq!(sched.cancelled().len(), 1);
    assert_eq!(sched.requested(), 4);
}

#[test]
fn viewport_is_read_every_frame() {
    let mut anim = CurveAnimation::mount(
        EffectConfig::default(),
        Viewport::new(1000.0, 1000.0),
        seeded(8),
        ManualScheduler::new(),
    )
    .unwrap();
    let mut host = StaticHost::new(Viewport::new(1000.0, 1000.0), RecordingSurface::new());
    let h = anim.scheduler_mut().next_due().unwrap();
    anim.tick(h, &mut host);

    host.viewport = Viewport::new(50.0, 40.0);
    let h = anim.scheduler_mut().next_due().unwrap();
    anim.tick(h, &mut host);
    if let Motion::FreeDrift { .. } = anim.state().motion() {
        for p in anim.state().points() {
            assert!(host.viewport.contains(p.pos()), "{p:?}");
        }
    }
}
