use approx::assert_relative_eq;
use phscale_beaker::{
    Scene, SceneConfig, SourceRole,
    config::{GeometryConfig, RectConfig, SoluteSelection},
    geometry::Point,
    probe::FluidKind,
    run,
};
use phscale_chemistry::{SoluteId, Species};
use phscale_core::TimeStep;
use uom::si::{
    f64::{Length, VolumeRate},
    length::centimeter,
    time::second,
    volume::liter,
    volume_rate::liter_per_second,
};

fn lps(value: f64) -> VolumeRate {
    VolumeRate::new::<liter_per_second>(value)
}

fn cm(x: f64, y: f64) -> Point {
    Point::new(Length::new::<centimeter>(x), Length::new::<centimeter>(y))
}

fn empty_vomit_beaker() -> Scene {
    let config = SceneConfig {
        solute: SoluteSelection::Stock(SoluteId::Vomit),
        initial_solute_liters: 0.0,
        ..SceneConfig::default()
    };
    Scene::new(&config).unwrap()
}

#[test]
fn dispense_dilute_and_drain() {
    let mut scene = empty_vomit_beaker();
    let dt = TimeStep::new::<second>(0.5).unwrap();

    // Dispense 0.2 L of solute.
    scene.set_flow_rate(SourceRole::Dropper, lps(0.05)).unwrap();
    run::run_unobserved(&mut scene, dt, 8);
    scene.close_all();

    let solution = scene.solution();
    assert_relative_eq!(solution.solute_volume().get::<liter>(), 0.2, epsilon = 1e-12);
    assert_relative_eq!(solution.solvent_volume().get::<liter>(), 0.0);
    assert_relative_eq!(solution.ph().unwrap(), 2.0, epsilon = 1e-12);

    // Fill the rest of the beaker with water.
    scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.25)).unwrap();
    run::run_unobserved(&mut scene, dt, 8);
    scene.close_all();

    let solution = scene.solution();
    assert_relative_eq!(solution.solvent_volume().get::<liter>(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(solution.total_volume().get::<liter>(), 1.2, epsilon = 1e-12);
    assert!(solution.total_volume() <= scene.capacity());

    let diluted_ph = solution.ph().unwrap();
    assert!(diluted_ph > 2.0 && diluted_ph < 7.0);

    // Drain 0.25 L.
    scene.set_flow_rate(SourceRole::DrainFaucet, lps(0.25)).unwrap();
    run::run_unobserved(&mut scene, dt, 2);

    let solution = scene.solution();
    assert_relative_eq!(solution.total_volume().get::<liter>(), 0.95, epsilon = 1e-12);
    assert_relative_eq!(solution.ph().unwrap(), diluted_ph, epsilon = 1e-9);
    assert!(scene.source(SourceRole::WaterFaucet).is_enabled());
}

#[test]
fn quantities_follow_volume_and_concentrations_follow_ph() {
    let mut scene = empty_vomit_beaker();
    scene.set_flow_rate(SourceRole::Dropper, lps(0.05)).unwrap();
    scene.tick(TimeStep::new::<second>(2.0).unwrap());

    let solution = scene.solution();
    let h3o = solution.concentration(Species::H3O).unwrap();
    let oh = solution.concentration(Species::OH).unwrap();
    assert_relative_eq!(
        h3o.value * oh.value,
        1e-14 * 1e6,
        max_relative = 1e-9
    );

    // 0.1 L at 1e-2 mol/L.
    let moles = solution.quantity(Species::H3O).unwrap();
    assert_relative_eq!(moles.value, 1e-3, max_relative = 1e-9);
}

#[test]
fn overfilling_stops_exactly_at_capacity() {
    let mut scene = empty_vomit_beaker();
    scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.25)).unwrap();
    scene.set_flow_rate(SourceRole::Dropper, lps(0.05)).unwrap();

    let run = run::run_unobserved(&mut scene, TimeStep::new::<second>(1.0).unwrap(), 10);

    assert_eq!(scene.solution().total_volume(), scene.capacity());
    assert!(run
        .history
        .iter()
        .all(|sample| sample.total_volume() <= scene.capacity()));
    assert!(!scene.source(SourceRole::WaterFaucet).is_enabled());
    assert!(!scene.source(SourceRole::Dropper).is_enabled());
    assert!(!scene.sources().is_dispensing());
}

#[test]
fn probe_prefers_solution_over_overlapping_drain() {
    let config = SceneConfig {
        geometry: GeometryConfig {
            drain_stream: RectConfig {
                min: [0.0, 0.0],
                max: [20.0, 10.0],
            },
            ..GeometryConfig::default()
        },
        ..SceneConfig::default()
    };
    let mut scene = Scene::new(&config).unwrap();
    scene.set_flow_rate(SourceRole::DrainFaucet, lps(0.01)).unwrap();

    let regions = scene.regions();
    assert!(regions.solution.is_some());
    assert!(regions.drain.is_some());

    let reading = scene.probe(cm(10.0, 1.0));
    assert_eq!(reading.fluid, FluidKind::Solution);
    assert_eq!(reading.ph, scene.solution().ph());

    // Above the solution surface only the drain column remains.
    let reading = scene.probe(cm(10.0, 9.0));
    assert_eq!(reading.fluid, FluidKind::DrainStream);
    assert_eq!(reading.ph, scene.solution().ph());
}

#[test]
fn probe_reads_incoming_streams() {
    let mut scene = Scene::new(&SceneConfig::default()).unwrap();
    let above_dropper = cm(10.0, 30.0);
    let above_faucet = cm(3.0, 25.0);

    assert_eq!(scene.probe(above_dropper).fluid, FluidKind::None);
    assert_eq!(scene.probe(above_faucet).fluid, FluidKind::None);

    scene.set_flow_rate(SourceRole::Dropper, lps(0.01)).unwrap();
    scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.01)).unwrap();

    let dropper = scene.probe(above_dropper);
    assert_eq!(dropper.fluid, FluidKind::DropperStream);
    assert_eq!(dropper.ph, Some(6.5));

    let faucet = scene.probe(above_faucet);
    assert_eq!(faucet.fluid, FluidKind::WaterStream);
    assert_eq!(faucet.ph, Some(7.0));
}

#[test]
fn finite_reservoir_runs_dry() {
    let config = SceneConfig {
        initial_solute_liters: 0.0,
        dropper: phscale_beaker::config::DropperConfig {
            reservoir_liters: Some(0.1),
            ..Default::default()
        },
        ..SceneConfig::default()
    };
    let mut scene = Scene::new(&config).unwrap();
    scene.set_flow_rate(SourceRole::Dropper, lps(0.05)).unwrap();

    run::run_unobserved(&mut scene, TimeStep::new::<second>(1.0).unwrap(), 4);

    assert_relative_eq!(scene.solution().solute_volume().get::<liter>(), 0.1, epsilon = 1e-12);
    assert!(scene.sources().reservoir.is_empty());
    assert!(!scene.source(SourceRole::Dropper).is_enabled());

    scene.reset();
    assert!(!scene.sources().reservoir.is_empty());
    assert!(scene.source(SourceRole::Dropper).is_enabled());
}
