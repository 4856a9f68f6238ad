// tests/drawing.rs
use glam::Vec2;
use lsystem_canvas::{
    ActionTable, LSystemEngine, LSystemError, LSystemParams, PoseStack, Preset, RecordingCanvas,
    RecordingTurtle, RenderConfig, RenderContext, SceneConfig, Turtle, TurtleOp, TurtlePose,
    draw_lsystem,
};

type Ctx = RenderContext<RecordingTurtle, RecordingCanvas>;

fn ctx() -> Ctx {
    RenderContext::new(RecordingTurtle::new(), RecordingCanvas::new())
}

fn close(a: Vec2, b: Vec2) -> bool {
    a.abs_diff_eq(b, 1e-3)
}

#[test]
fn bracketed_seed_leaves_the_stack_empty() {
    let params = LSystemParams::new(0, 20.0, 90.0, "F[+F]F[-F]F", &[]);
    let mut ctx = ctx();

    let report = draw_lsystem(&params, &mut ctx).unwrap();

    assert_eq!(report.open_branches, 0);
    assert_eq!(report.unknown_count(), 0);
    assert_eq!(ctx.turtle.segments().len(), 5);
    assert_eq!(ctx.turtle.position(), Vec2::new(60.0, 0.0));
    assert_eq!(ctx.turtle.heading(), 0.0);

    // Branches reached (20, 20) and (40, -20).
    let bbox = report.bounding_box;
    assert!(close(bbox.min, Vec2::new(0.0, -20.0)));
    assert!(close(bbox.max, Vec2::new(60.0, 20.0)));
    assert!(close(report.canvas_size, Vec2::new(220.0, 140.0)));
    assert_eq!(ctx.canvas.size(), Some(report.canvas_size));
}

#[test]
fn unmatched_pop_aborts_before_touching_the_canvas() {
    let params = LSystemParams::new(0, 20.0, 90.0, "]", &[]);
    let mut ctx = ctx();

    let err = draw_lsystem(&params, &mut ctx).unwrap_err();

    match err {
        LSystemError::UnbalancedStack {
            symbol,
            generation,
            index,
        } => {
            assert_eq!(symbol, ']');
            assert_eq!(generation, 0);
            assert_eq!(index, 0);
        }
        other => panic!("expected UnbalancedStack, got {other:?}"),
    }
    assert_eq!(ctx.canvas.resize_count(), 0);
    assert_eq!(ctx.canvas.size(), None);
    assert_eq!(ctx.bounding_box().min, Vec2::ZERO);
    assert_eq!(ctx.bounding_box().max, Vec2::ZERO);
}

#[test]
fn unmatched_pop_stops_mid_run() {
    let params = LSystemParams::new(0, 20.0, 90.0, "F]F", &[]);
    let mut ctx = ctx();

    let err = draw_lsystem(&params, &mut ctx).unwrap_err();

    assert!(matches!(
        err,
        LSystemError::UnbalancedStack { index: 1, .. }
    ));
    assert_eq!(ctx.turtle.segments().len(), 1);
    assert_eq!(ctx.turtle.position(), Vec2::new(20.0, 0.0));
    assert_eq!(ctx.canvas.resize_count(), 1);
}

#[test]
fn unmatched_pop_reports_the_generation() {
    let params = LSystemParams::new(1, 10.0, 90.0, "A", &[('A', "F]")]);
    let err = draw_lsystem(&params, &mut ctx()).unwrap_err();

    assert!(matches!(
        err,
        LSystemError::UnbalancedStack {
            symbol: ']',
            generation: 1,
            index: 1,
        }
    ));
    assert!(err.to_string().contains("generation 1"));
}

#[test]
fn unknown_symbols_are_skipped() {
    let params = LSystemParams::new(0, 20.0, 90.0, "FQF", &[]);
    let mut ctx = ctx();

    let report = draw_lsystem(&params, &mut ctx).unwrap();

    assert_eq!(report.symbols_dispatched, 3);
    assert_eq!(report.unknown_symbols.get(&'Q'), Some(&1));
    assert_eq!(report.unknown_count(), 1);
    assert_eq!(ctx.turtle.segments().len(), 2);
    assert_eq!(ctx.turtle.position(), Vec2::new(40.0, 0.0));
    assert_eq!(ctx.canvas.resize_count(), 2);
}

#[test]
fn non_terminals_without_actions_count_as_unknown() {
    // X is rewritten, but still dispatched when it appears in an expansion.
    let params = LSystemParams::new(2, 10.0, 90.0, "X", &[('X', "FX")]);
    let report = draw_lsystem(&params, &mut ctx()).unwrap();

    assert_eq!(report.final_sequence, "FFX");
    assert_eq!(report.unknown_symbols.get(&'X'), Some(&2));
}

#[test]
fn turns_do_not_resize_the_canvas() {
    let params = LSystemParams::new(0, 20.0, 45.0, "++-", &[]);
    let mut ctx = ctx();

    draw_lsystem(&params, &mut ctx).unwrap();

    assert_eq!(ctx.canvas.resize_count(), 0);
    assert!((ctx.turtle.heading() - 45.0).abs() < 1e-4);
}

#[test]
fn pen_up_move_extends_bounds_without_drawing() {
    let params = LSystemParams::new(0, 20.0, 90.0, "FfF", &[]);
    let mut ctx = ctx();

    let report = draw_lsystem(&params, &mut ctx).unwrap();

    let segments = ctx.turtle.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].from, Vec2::new(40.0, 0.0));
    assert_eq!(segments[1].to, Vec2::new(60.0, 0.0));
    assert!(ctx.turtle.is_pen_down());
    assert_eq!(report.bounding_box.max.x, 60.0);
    assert_eq!(ctx.canvas.resize_count(), 3);
}

#[test]
fn every_generation_is_drawn() {
    let params = LSystemParams::new(2, 20.0, 90.0, "F", &[('F', "FF")]);
    let mut ctx = ctx();

    let report = draw_lsystem(&params, &mut ctx).unwrap();

    // 2 segments for the first generation, then 4 more continuing from (40, 0).
    assert_eq!(ctx.turtle.segments().len(), 6);
    assert_eq!(report.symbols_dispatched, 6);
    assert_eq!(report.bounding_box.max.x, 120.0);
    assert_eq!(report.canvas_size, Vec2::new(340.0, 100.0));
    assert_eq!(report.final_sequence, "FFFF");
}

#[test]
fn unmatched_push_is_reported_not_fatal() {
    let params = LSystemParams::new(0, 20.0, 90.0, "[F[F", &[]);
    let report = draw_lsystem(&params, &mut ctx()).unwrap();
    assert_eq!(report.open_branches, 2);
}

#[test]
fn pop_restores_pose_and_observes_it() {
    let mut ctx = ctx();
    let mut stack = PoseStack::new();
    let actions = ActionTable::new(10.0, 90.0);

    actions.execute(TurtleOp::Push, &mut ctx, &mut stack).unwrap();
    actions.execute(TurtleOp::TurnRight, &mut ctx, &mut stack).unwrap();
    actions.execute(TurtleOp::Forward, &mut ctx, &mut stack).unwrap();
    assert_eq!(stack.depth(), 1);
    assert_eq!(ctx.canvas.resize_count(), 1);

    actions.execute(TurtleOp::Pop, &mut ctx, &mut stack).unwrap();
    assert!(stack.is_empty());
    assert_eq!(ctx.turtle.position(), Vec2::ZERO);
    assert_eq!(ctx.turtle.heading(), 0.0);
    assert_eq!(ctx.canvas.resize_count(), 2);
    assert!(close(ctx.bounding_box().min, Vec2::new(0.0, -10.0)));

    assert!(actions.execute(TurtleOp::Pop, &mut ctx, &mut stack).is_err());
    assert_eq!(ctx.canvas.resize_count(), 2);
}

#[test]
fn unrecognized_op_is_a_no_op() {
    let mut ctx = ctx();
    let mut stack = PoseStack::new();
    let actions = ActionTable::new(10.0, 90.0);

    let handled = actions
        .execute(TurtleOp::Unrecognized, &mut ctx, &mut stack)
        .unwrap();

    assert!(!handled);
    assert_eq!(ctx.turtle.pose(), TurtlePose::default());
    assert_eq!(ctx.canvas.resize_count(), 0);
}

#[test]
fn only_moving_ops_resize_the_canvas() {
    let ops = [
        TurtleOp::Forward,
        TurtleOp::Move,
        TurtleOp::TurnLeft,
        TurtleOp::TurnRight,
        TurtleOp::Push,
        TurtleOp::Pop,
        TurtleOp::Unrecognized,
    ];
    let actions = ActionTable::new(10.0, 90.0).with_map(ops.to_vec());

    for (id, op) in ops.into_iter().enumerate() {
        assert_eq!(actions.op(id as u16), op);

        let mut ctx = ctx();
        let mut stack = PoseStack::new();
        stack.push(TurtlePose::default());
        actions.execute(actions.op(id as u16), &mut ctx, &mut stack).unwrap();

        let expected = if op.moves() { 1 } else { 0 };
        assert_eq!(ctx.canvas.resize_count(), expected, "{op:?}");
    }
    assert_eq!(actions.op(ops.len() as u16), TurtleOp::Unrecognized);

    let moving: Vec<TurtleOp> = ops.into_iter().filter(|op| op.moves()).collect();
    assert_eq!(moving, [TurtleOp::Forward, TurtleOp::Move, TurtleOp::Pop]);
}

#[test]
fn action_table_maps_only_interned_symbols() {
    let (engine, actions) =
        LSystemEngine::from_params(&LSystemParams::new(0, 5.0, 30.0, "F+Q", &[])).unwrap();
    let alphabet = engine.grammar().alphabet();

    assert_eq!(actions.op(alphabet.resolve('F').unwrap()), TurtleOp::Forward);
    assert_eq!(actions.op(alphabet.resolve('+').unwrap()), TurtleOp::TurnLeft);
    assert_eq!(actions.op(alphabet.resolve('Q').unwrap()), TurtleOp::Unrecognized);
    assert_eq!(alphabet.resolve(']'), None);
    assert_eq!(actions.op(u16::MAX), TurtleOp::Unrecognized);
    assert_eq!(actions.step(), 5.0);
    assert_eq!(actions.angle(), 30.0);
}

#[test]
fn presets_draw_cleanly() {
    for preset in Preset::ALL {
        let params = preset.params();
        let mut ctx = RenderConfig::default().recording_context();

        let report = draw_lsystem(&params, &mut ctx)
            .unwrap_or_else(|e| panic!("{preset} failed: {e}"));

        assert_eq!(report.open_branches, 0, "{preset}");
        assert_eq!(report.unknown_count(), 0, "{preset}");
        assert!(!ctx.turtle.segments().is_empty(), "{preset}");
        assert!(report.canvas_size.x > 100.0, "{preset}");
        assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
    }
}

#[test]
fn render_config_styles_the_context() {
    let render = RenderConfig {
        margin: 10.0,
        pen_color: [0, 0, 255],
        fill_color: [0, 0, 0],
    };
    let mut ctx = render.recording_context();
    let params = LSystemParams::new(0, 5.0, 90.0, "F", &[]);

    let report = draw_lsystem(&params, &mut ctx).unwrap();

    assert_eq!(ctx.turtle.pen_color, [0, 0, 255]);
    assert_eq!(report.canvas_size, Vec2::new(20.0, 10.0));
}

#[test]
fn scene_config_parses_json() {
    let scene = SceneConfig::from_json(
        r#"{
            "generations": 2,
            "step": 20,
            "angle": 90,
            "seed": "F-F-F-F",
            "rules": { "F": "FF-F-F-F-FF" },
            "render": { "margin": 50 }
        }"#,
    )
    .unwrap();

    let mut expected = Preset::KochB.params();
    expected.generations = 2;
    assert_eq!(scene.lsystem, expected);
    assert_eq!(scene.render.margin, 50.0);
    assert_eq!(scene.render.pen_color, [255, 0, 0]);

    let bare = SceneConfig::from_json(r#"{"generations": 0, "step": 1, "angle": 0, "seed": "F"}"#)
        .unwrap();
    assert!(bare.lsystem.rules.is_empty());
    assert_eq!(bare.render, RenderConfig::default());

    let negative =
        SceneConfig::from_json(r#"{"generations": -1, "step": 1, "angle": 0, "seed": "F"}"#);
    assert!(matches!(negative, Err(LSystemError::Config(_))));

    assert!("no-such-preset".parse::<Preset>().is_err());
}
