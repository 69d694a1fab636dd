use tickcurve::closeness::compute_closeness;
use tickcurve::curves::{
    CurveConfig, CurveKind, Cubic, ExponentialGrowth, Normal, Quadratic, Sine, Triangle, Wave,
};
use tickcurve::error::{ConfigError, CurveError};
use tickcurve::generator::GenerationRequest;
use tickcurve::optimizer::optimize;
use tickcurve::pipeline::validate;
use tickcurve::position::{Position, TendArrays};
use tickcurve::StrategyConfig;

fn triples(positions: &[Position]) -> Vec<(i64, i64, u64)> {
    positions.iter().map(|p| (p.start_tick, p.end_tick, p.weight)).collect()
}

fn weights(positions: &[Position]) -> Vec<u64> {
    positions.iter().map(|p| p.weight).collect()
}

fn run(curve: CurveConfig) -> Vec<Position> {
    GenerationRequest::new(0, 100, 10, curve).generate().expect("generate")
}

#[test]
fn linear_weights_fall_from_lower_to_upper_edge() {
    let out = run(CurveConfig::Linear);
    assert_eq!(out.len(), 10);
    assert_eq!(weights(&out), vec![954, 864, 775, 685, 595, 505, 415, 325, 234, 145]);
    assert!(out.windows(2).all(|w| w[0].weight > w[1].weight));
    assert_eq!(out[0].start_tick, 0);
    assert_eq!(out[9].end_tick, 100);
}

#[test]
fn reflect_mirrors_weights_but_not_ticks() {
    let mut req = GenerationRequest::new(0, 100, 10, CurveConfig::Linear);
    req.reflect = true;
    let out = req.generate().unwrap();
    assert_eq!(weights(&out), vec![145, 234, 325, 415, 505, 595, 685, 775, 864, 954]);
    assert_eq!(out[0].start_tick, 0);
    assert_eq!(out[0].end_tick, 10);
}

#[test]
fn normalized_centres_on_window_and_merges_the_peak() {
    let out = run(CurveConfig::Normalized(Normal { mean: 123.0, std_dev: 2.0 }));
    // the configured mean is overridden by the window midpoint
    assert_eq!(
        triples(&out),
        vec![
            (0, 10, 2),
            (10, 20, 5),
            (20, 30, 10),
            (30, 40, 15),
            (40, 60, 19),
            (60, 70, 15),
            (70, 80, 10),
            (80, 90, 5),
            (90, 100, 2),
        ]
    );
}

#[test]
fn normalized_inverted() {
    let mut req = GenerationRequest::new(0, 100, 10, CurveConfig::default_for(CurveKind::Normalized));
    req.invert = true;
    let out = req.generate().unwrap();
    assert_eq!(weights(&out), vec![19, 16, 11, 6, 2, 6, 11, 16, 19]);
    assert_eq!((out[4].start_tick, out[4].end_tick), (40, 60));
}

#[test]
fn normalized_narrow_deviation_on_symmetric_window() {
    let curve = CurveConfig::Normalized(Normal { mean: 0.0, std_dev: 1.0 });
    let out = GenerationRequest::new(-1000, 1000, 100, curve).generate().unwrap();
    assert_eq!(
        triples(&out),
        vec![
            (-1000, -600, 0),
            (-600, -500, 1),
            (-500, -400, 5),
            (-400, -300, 11),
            (-300, -200, 21),
            (-200, -100, 31),
            (-100, 100, 38),
            (100, 200, 31),
            (200, 300, 21),
            (300, 400, 11),
            (400, 500, 5),
            (500, 600, 1),
            (600, 1000, 0),
        ]
    );
}

#[test]
fn sigmoid_is_centred_on_the_window() {
    let out = run(CurveConfig::default_for(CurveKind::Sigmoid));
    assert_eq!(weights(&out), vec![98, 97, 93, 86, 72, 51, 29, 14, 6, 2]);
}

#[test]
fn sine_is_floated_above_zero() {
    let out = run(CurveConfig::Sine(Sine { amplitude: 1.0, frequency: 1.0, phase: 0.0 }));
    assert_eq!(weights(&out), vec![70, 20, 0, 20, 70, 130, 180, 200, 180, 130]);
}

#[test]
fn triangle_ignores_caller_wave_and_takes_magnitude() {
    let custom = Triangle(Wave { amplitude: 40.0, period: 3.0, phase: 1.0 });
    let out = run(CurveConfig::Triangle(custom));
    assert_eq!(weights(&out), vec![90, 72, 55, 37, 18, 0, 16, 35, 53, 71]);
}

#[test]
fn sawtooth_and_square_wave() {
    let saw = run(CurveConfig::default_for(CurveKind::Sawtooth));
    assert_eq!(weights(&saw), vec![161, 143, 126, 108, 90, 72, 55, 36, 18, 0]);

    let square = run(CurveConfig::default_for(CurveKind::SquareWave));
    assert_eq!(triples(&square), vec![(0, 60, 0), (60, 100, 200)]);
}

#[test]
fn logarithmic_and_power_law_defaults() {
    let log = run(CurveConfig::default_for(CurveKind::Logarithmic));
    assert_eq!(weights(&log), vec![98, 93, 88, 83, 77, 70, 61, 51, 37, 16]);

    let pow = run(CurveConfig::default_for(CurveKind::PowerLaw));
    assert_eq!(weights(&pow), vec![9120, 7482, 6006, 4692, 3540, 2550, 1722, 1056, 552, 210]);
}

#[test]
fn exponential_and_decay_shapes() {
    let growth = run(CurveConfig::ExponentialGrowth(ExponentialGrowth { rate: 0.5 }));
    assert_eq!(weights(&growth), vec![11851, 7556, 4818, 3072, 1958, 1249, 796, 507, 323, 206]);

    let decay = run(CurveConfig::default_for(CurveKind::ExponentialDecay));
    assert_eq!(weights(&decay), vec![0, 1, 2, 3, 5, 8, 12, 19, 30, 48]);

    let log_decay = run(CurveConfig::default_for(CurveKind::LogarithmicDecay));
    assert_eq!(weights(&log_decay), vec![3, 4, 6, 9, 12, 17, 23, 32, 44, 60]);
}

#[test]
fn step_and_basic_collapse_into_runs() {
    let step = run(CurveConfig::default_for(CurveKind::Step));
    assert_eq!(triples(&step), vec![(0, 60, 100), (60, 100, 0)]);

    let basic = run(CurveConfig::Basic);
    assert_eq!(triples(&basic), vec![(0, 100, 100)]);
}

#[test]
fn cubic_polynomial() {
    let out = run(CurveConfig::Cubic(Cubic { a: 1.0, b: 0.0, c: 0.0, d: 0.0 }));
    assert_eq!(weights(&out), vec![21774, 16180, 11637, 8035, 5266, 3219, 1786, 858, 324, 76]);
}

#[test]
fn large_quadratic_is_rescaled_below_ceiling() {
    let curve = CurveConfig::Quadratic(Quadratic { a: 1000.0, b: 100.0, c: 100.0 });
    let out = GenerationRequest::new(-500, 500, 100, curve).generate().unwrap();
    assert_eq!(
        weights(&out),
        vec![59139, 48581, 39062, 30581, 23139, 16735, 11370, 7043, 3754, 1504]
    );
    assert_eq!(out[0].start_tick, -500);
    assert_eq!(out[9].end_tick, 500);
}

#[test]
fn huge_growth_over_wide_window_stays_under_cap() {
    let curve = CurveConfig::ExponentialGrowth(ExponentialGrowth { rate: 3.0 });
    let out = GenerationRequest::new(-880_000, 880_000, 10_000, curve).generate().unwrap();
    assert_eq!(out.len(), 67);
    assert_eq!(triples(&out[..3]), vec![
        (-880_000, -870_000, 59999),
        (-870_000, -860_000, 51466),
        (-860_000, -850_000, 44147),
    ]);
    assert_eq!(*out.last().unwrap(), Position::new(-160_000, 880_000, 0));
}

#[test]
fn negative_window_with_unit_bins() {
    let out = GenerationRequest::new(-25, 25, 1, CurveConfig::Linear).generate().unwrap();
    assert_eq!(out.len(), 50);
    assert_eq!(triples(&out[..3]), vec![(-25, -24, 991), (-24, -23, 973), (-23, -22, 954)]);
    assert_eq!(triples(&out[47..]), vec![(22, 23, 145), (23, 24, 127), (24, 25, 109)]);
}

#[test]
fn final_bin_keeps_full_width() {
    let out = GenerationRequest::new(0, 95, 10, CurveConfig::Linear).generate().unwrap();
    assert_eq!(out.len(), 10);
    assert_eq!(*out.last().unwrap(), Position::new(90, 100, 100));
}

#[test]
fn overshooting_final_bin_trips_the_tick_bound() {
    let curve = CurveConfig::Linear;
    let err = GenerationRequest::new(-887_272, 887_272, 10_000, curve).generate().unwrap_err();
    assert_eq!(err, CurveError::Range { start: -887_272, end: 892_728 });
}

#[test]
fn window_below_min_tick_is_rejected() {
    let err = GenerationRequest::new(-900_000, 0, 1000, CurveConfig::Basic).generate().unwrap_err();
    assert!(matches!(err, CurveError::Range { start: -900_000, .. }));
    assert_eq!(err.to_string(), "position ticks out of range: [-900000, 0)");
}

#[test]
fn huge_windows_fail_on_the_tick_bound_without_walking() {
    let err = GenerationRequest::new(-1_000_000_000_000, 0, 1, CurveConfig::Basic).generate().unwrap_err();
    assert_eq!(err, CurveError::Range { start: -1_000_000_000_000, end: 0 });
    assert_eq!(err.to_string(), "position ticks out of range: [-1000000000000, 0)");

    let curve = CurveConfig::default_for(CurveKind::Normalized);
    let err = GenerationRequest::new(0, 1_000_000_000_000, 1, curve).generate().unwrap_err();
    assert_eq!(err, CurveError::Range { start: 0, end: 1_000_000_000_000 });

    // the last bin end saturates like the walk would
    let err = GenerationRequest::new(i64::MIN, i64::MAX, 1, CurveConfig::Linear).generate().unwrap_err();
    assert_eq!(err, CurveError::Range { start: i64::MIN, end: i64::MAX });
    let err = GenerationRequest::new(0, i64::MAX - 5, 10, CurveConfig::Linear).generate().unwrap_err();
    assert_eq!(err, CurveError::Range { start: 0, end: i64::MAX });
}

#[test]
fn oversized_weight_fails_validation() {
    let positions = vec![Position::new(0, 10, 100), Position::new(10, 20, 65_536)];
    assert_eq!(validate(&positions), Err(CurveError::Overflow { weight: 65_536 }));
    assert!(validate(&positions[..1]).is_ok());
}

#[test]
fn closeness_edges() {
    assert_eq!(compute_closeness(100.0, 0, 100).unwrap(), 1.0);
    assert_eq!(compute_closeness(0.0, 0, 100).unwrap(), 10.0);
    assert_eq!(compute_closeness(-50.0, 0, 100).unwrap(), 4.5);
    assert_eq!(compute_closeness(150.0, 0, 100).unwrap(), 3.5);
    assert_eq!(compute_closeness(1e9, 0, 100).unwrap(), 8.0);
    assert_eq!(compute_closeness(-887_272.0, -887_272, 887_272).unwrap(), 10.0);
}

#[test]
fn degenerate_window_is_a_config_error() {
    for x in [-10.0, 5.0, 1e12] {
        assert_eq!(
            compute_closeness(x, 5, 5),
            Err(CurveError::Config(ConfigError::EqualBounds))
        );
    }
    let err = GenerationRequest::new(5, 5, 1, CurveConfig::Linear).generate().unwrap_err();
    assert_eq!(err.to_string(), "bounds cannot be equal");
}

#[test]
fn bad_width_and_inverted_window_fail_fast() {
    let err = GenerationRequest::new(0, 100, 0, CurveConfig::Linear).generate().unwrap_err();
    assert_eq!(err, CurveError::Config(ConfigError::InvalidSegmentWidth(0)));
    let err = GenerationRequest::new(100, 0, 10, CurveConfig::Linear).generate().unwrap_err();
    assert_eq!(err, CurveError::Config(ConfigError::InvertedBounds { lower: 100, upper: 0 }));
}

#[test]
fn optimizer_merges_ten_into_five() {
    let input: Vec<Position> = (0..10)
        .map(|i| Position::new(i * 10, i * 10 + 10, (10 - i) as u64 * 7))
        .collect();
    let total: u64 = input.iter().map(|p| p.weight).sum();
    let out = optimize(&input, 5).unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(out.iter().map(|p| p.weight).sum::<u64>(), total);
    // lightest pair first: weights 7 and 14 live in the two top bins
    assert_eq!(out[0], Position::new(80, 100, 21));
    assert_eq!(out[4], Position::new(0, 20, 133));
}

#[test]
fn optimizer_uneven_split_and_bad_counts() {
    let input: Vec<Position> = (0..10).map(|i| Position::new(i, i + 1, i as u64)).collect();
    assert_eq!(optimize(&input, 6).unwrap().len(), 5);
    assert_eq!(optimize(&input, 10).unwrap().len(), 10);
    assert_eq!(optimize(&input, 1).unwrap(), vec![Position::new(0, 10, 45)]);
    assert!(matches!(
        optimize(&input, 0),
        Err(CurveError::Config(ConfigError::InvalidBinCount { requested: 0, available: 10 }))
    ));
    assert!(optimize(&input, 11).is_err());
}

#[test]
fn json_blob_drives_generation() {
    let cfg = StrategyConfig::from_json(
        r#"{"lowerBound": 0, "upperBound": 100, "segmentWidth": 10,
            "liquidityShape": "Sine", "amplitude": 1, "frequency": 1, "phase": 0,
            "reflect": false, "invert": false, "poolFee": 500}"#,
    )
    .unwrap();
    assert_eq!(cfg.request.curve.kind(), CurveKind::Sine);
    assert_eq!(cfg.bins, None);
    let arrays = TendArrays::from(cfg.run().unwrap().as_slice());
    assert_eq!(arrays.lower_ticks, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    assert_eq!(arrays.upper_ticks, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    assert_eq!(arrays.weights, vec![70, 20, 0, 20, 70, 130, 180, 200, 180, 130]);
}

#[test]
fn json_blob_fills_defaults_and_rebins() {
    let cfg = StrategyConfig::from_json(
        r#"{"lowerBound": 0, "upperBound": 100, "segmentWidth": 10, "bins": 5}"#,
    )
    .unwrap();
    assert_eq!(cfg.request.curve, CurveConfig::Normalized(Normal::default()));
    assert!(!cfg.request.reflect && !cfg.request.invert);
    let out = cfg.run().unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(out.iter().map(|p| p.weight).sum::<u64>(), 2 + 5 + 10 + 15 + 19 + 15 + 10 + 5 + 2);
}

#[test]
fn json_absolute_is_basic() {
    let cfg = StrategyConfig::from_json(
        r#"{"lowerBound": -30, "upperBound": 40, "segmentWidth": 10, "liquidityShape": "Absolute"}"#,
    )
    .unwrap();
    assert_eq!(cfg.run().unwrap(), vec![Position::new(-30, 40, 100)]);
}

#[test]
fn json_rejects_unknown_shape_and_garbage() {
    let err = StrategyConfig::from_json(
        r#"{"lowerBound": 0, "upperBound": 100, "segmentWidth": 10, "liquidityShape": "Zigzag"}"#,
    )
    .unwrap_err();
    assert_eq!(err, CurveError::Config(ConfigError::UnsupportedCurve("Zigzag".into())));
    assert_eq!(err.to_string(), "unsupported curve kind: Zigzag");

    assert!(matches!(
        StrategyConfig::from_json("[1, 2]"),
        Err(CurveError::Config(ConfigError::Malformed(_)))
    ));
    assert!(matches!(
        StrategyConfig::from_json(r#"{"lowerBound": 0}"#),
        Err(CurveError::Config(ConfigError::Malformed(_)))
    ));
    assert!(matches!(
        StrategyConfig::from_json(r#"{"lowerBound": 7, "upperBound": 7, "segmentWidth": 1}"#),
        Err(CurveError::Config(ConfigError::EqualBounds))
    ));
}
