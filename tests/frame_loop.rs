use glam::Vec2;
use scroll_viz::clock::ManualClock;
use scroll_viz::sections::SectionChange;
use scroll_viz::viewport::Viewport;
use scroll_viz::{AnimationLoop, FrameSnapshot, SceneConfig, SceneRenderer, Schedule, ViewportAnimator};

#[derive(Default)]
struct Recorder {
    frames: Vec<FrameSnapshot>,
    resizes: Vec<Viewport>,
}

impl SceneRenderer for Recorder {
    fn resize(&mut self, viewport: &Viewport) {
        self.resizes.push(*viewport);
    }

    fn render(&mut self, frame: &FrameSnapshot) {
        self.frames.push(frame.clone());
    }
}

const FRAME: f64 = 1.0 / 60.0;

fn page(width: f64, height: f64) -> AnimationLoop<Recorder, ManualClock> {
    let animator = ViewportAnimator::new(
        SceneConfig::default(),
        Viewport::new(width, height, 1.0),
        0.0,
    );
    let mut l = AnimationLoop::new(animator, Recorder::default(), ManualClock::new());
    assert!(l.start());
    l
}

fn run(l: &mut AnimationLoop<Recorder, ManualClock>, frames: usize) {
    for _ in 0..frames {
        l.clock().advance(FRAME);
        assert_eq!(l.frame(), Schedule::Continue);
    }
}

#[test]
fn renderer_sized_before_first_frame() {
    let l = page(1280.0, 800.0);
    assert_eq!(l.renderer().resizes, vec![Viewport::new(1280.0, 800.0, 1.0)]);
    assert_eq!(l.render_count(), 0);
}

#[test]
fn smoothed_scroll_moves_monotonically_toward_target() {
    let mut l = page(1280.0, 800.0);
    l.scroll(1200.0);
    let mut previous = l.animator().scroll().current_y;
    for _ in 0..400 {
        l.clock().advance(FRAME);
        l.frame();
        let current = l.animator().scroll().current_y;
        if current == 1200.0 {
            return;
        }
        assert!(current > previous && current < 1200.0);
        previous = current;
    }
    panic!("scroll never reached its target");
}

#[test]
fn section_transition_fires_only_on_index_change() {
    let mut l = page(1280.0, 800.0);
    assert_eq!(l.scroll(50.0), None);
    assert_eq!(l.animator().section(), 0);
    assert_eq!(l.scroll(900.0), Some(SectionChange { from: 0, to: 1 }));
    assert_eq!(l.scroll(910.0), None);
    assert_eq!(l.scroll(1100.0), None);
    assert_eq!(l.scroll(300.0), Some(SectionChange { from: 1, to: 0 }));
}

#[test]
fn resize_recomputes_mesh_target_across_breakpoint() {
    let mut l = page(1280.0, 800.0);
    assert_eq!(l.animator().mesh_target(), Vec2::new(1.0, 0.0));

    l.clock().advance(1.0);
    assert!(l.resize(768.0, 1024.0, 3.0));
    assert_eq!(l.animator().mesh_target(), Vec2::ZERO);
    assert_eq!(
        l.renderer().resizes.last(),
        Some(&Viewport::new(768.0, 1024.0, 2.0))
    );

    assert!(l.resize(1024.0, 768.0, 1.0));
    assert_eq!(l.animator().mesh_target(), Vec2::new(1.0, 0.0));
    assert_eq!(l.renderer().resizes.len(), 3);
}

#[test]
fn resize_suppressed_while_scrolling() {
    let mut l = page(1280.0, 800.0);
    l.clock().set(5.0);
    l.scroll(40.0);

    l.clock().set(5.05);
    assert!(!l.resize(400.0, 700.0, 1.0));
    assert_eq!(l.animator().viewport().width, 1280.0);
    assert_eq!(l.renderer().resizes.len(), 1);

    // Another scroll re-arms the window.
    l.scroll(80.0);
    l.clock().set(5.12);
    assert!(!l.resize(400.0, 700.0, 1.0));

    l.clock().set(5.2);
    assert!(l.resize(400.0, 700.0, 1.0));
    assert_eq!(l.animator().viewport().width, 400.0);
    assert_eq!(l.animator().mesh_target(), Vec2::ZERO);
}

#[test]
fn blur_stops_rendering_and_focus_resyncs_delta() {
    let mut l = page(1280.0, 800.0);
    run(&mut l, 10);
    assert_eq!(l.render_count(), 10);

    l.blur();
    l.clock().advance(FRAME);
    assert_eq!(l.frame(), Schedule::Stop);
    assert_eq!(l.render_count(), 10);

    // A long time in the background.
    l.clock().advance(120.0);
    assert!(l.focus());
    assert!(!l.focus(), "a running loop must not be scheduled twice");

    l.clock().advance(FRAME);
    assert_eq!(l.frame(), Schedule::Continue);
    assert_eq!(l.render_count(), 11);
    let delta = l.renderer().frames.last().unwrap().delta as f64;
    assert!((delta - FRAME).abs() < 1e-4, "delta {delta} includes paused time");
}

#[test]
fn quick_blur_focus_keeps_single_loop() {
    let mut l = page(1280.0, 800.0);
    run(&mut l, 2);
    l.blur();
    // Focus returns before the pending frame runs: that frame keeps going.
    assert!(!l.focus());
    l.clock().advance(FRAME);
    assert_eq!(l.frame(), Schedule::Continue);
}

#[test]
fn pointer_ignored_while_blurred() {
    let mut l = page(1000.0, 800.0);
    l.blur();
    assert!(!l.pointer(1000.0, 800.0, true));
    assert_eq!(l.animator().cursor().x, 0.0);
    l.focus();
    assert!(l.pointer(1000.0, 800.0, true));
    assert_eq!(l.animator().cursor().x, 0.5);
}

#[test]
fn pointer_over_overlay_text_ignored_unless_any() {
    let mut l = page(1000.0, 800.0);
    assert!(!l.pointer(750.0, 400.0, false));
    assert_eq!(l.animator().cursor().x, 0.0);
    assert!(l.pointer(750.0, 400.0, true));
    assert_eq!(l.animator().cursor().x, 0.25);

    let config = SceneConfig {
        pointer_body_only: false,
        ..SceneConfig::default()
    };
    let animator = ViewportAnimator::new(config, Viewport::new(1000.0, 800.0, 1.0), 0.0);
    let mut any = AnimationLoop::new(animator, Recorder::default(), ManualClock::new());
    assert!(any.pointer(250.0, 400.0, false));
    assert_eq!(any.animator().cursor().x, -0.25);
}

#[test]
fn pointer_always_normalized() {
    let mut l = page(1000.0, 800.0);
    for (x, y) in [(0.0, 0.0), (1000.0, 800.0), (250.0, 600.0), (999.0, 1.0)] {
        l.pointer(x, y, true);
        let c = l.animator().cursor();
        assert!((-0.5..=0.5).contains(&c.x) && (-0.5..=0.5).contains(&c.y));
    }
}

#[test]
fn parallax_converges_on_pointer() {
    let mut l = page(1000.0, 800.0);
    l.pointer(1000.0, 0.0, true);
    run(&mut l, 600);
    let group = l.renderer().frames.last().unwrap().camera.group;
    assert!(group.abs_diff_eq(Vec2::new(0.4, 0.4), 1e-3));
}

#[test]
fn mesh_position_never_jumps() {
    let mut l = page(1280.0, 800.0);
    l.clock().advance(1.0);
    l.resize(600.0, 800.0, 1.0);
    let mut previous = l.animator().mesh_position().x;
    for _ in 0..30 {
        l.clock().advance(FRAME);
        l.frame();
        let x = l.animator().mesh_position().x;
        assert!(x < previous && x >= 0.0);
        assert!(previous - x <= previous * 0.05 + 1e-6);
        previous = x;
    }
}

#[test]
fn overlays_cross_fade_over_frames() {
    let mut l = page(1280.0, 800.0);
    l.scroll(800.0);
    run(&mut l, 5);
    let mid = l.renderer().frames.last().unwrap().overlays.clone();
    assert!(mid[0].opacity > 0.0 && mid[0].opacity < 1.0);

    run(&mut l, 120);
    let end = &l.renderer().frames.last().unwrap().overlays;
    assert_eq!(end[0].opacity, 0.0);
    assert_eq!(end[1].opacity, 1.0);
    assert_eq!(end[2].opacity, 0.0);
}
