use approx::assert_relative_eq;
use phscale_beaker::{Scene, SceneConfig, SourceRole, config::SoluteSelection, run};
use phscale_chemistry::{SoluteId, Species, solute};
use phscale_core::TimeStep;
use uom::si::{f64::VolumeRate, time::second, volume::liter, volume_rate::liter_per_second};

fn lps(value: f64) -> VolumeRate {
    VolumeRate::new::<liter_per_second>(value)
}

fn seconds(value: f64) -> TimeStep {
    TimeStep::new::<second>(value).unwrap()
}

fn scene_with(solute: SoluteId, initial_solute_liters: f64) -> Scene {
    Scene::new(&SceneConfig {
        solute: SoluteSelection::Stock(solute),
        initial_solute_liters,
        ..SceneConfig::default()
    })
    .unwrap()
}

#[test]
fn volume_is_conserved_below_capacity() {
    let mut scene = scene_with(SoluteId::Coffee, 0.1);
    scene.set_flow_rate(SourceRole::Dropper, lps(0.02)).unwrap();
    scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.05)).unwrap();
    scene.set_flow_rate(SourceRole::DrainFaucet, lps(0.03)).unwrap();

    let mut added = 0.0;
    let mut drained = 0.0;
    let run = run::run(&mut scene, seconds(0.1), 50, |event: &run::Event| {
        if let Some(report) = event.report {
            assert_eq!(report.rejected.get::<liter>(), 0.0);
            added += (report.solute_added + report.solvent_added).get::<liter>();
            drained += report.drained.get::<liter>();
        }
        None
    });

    let initial = run.history[0].total_volume().get::<liter>();
    let last = run.last().unwrap().total_volume().get::<liter>();
    assert_relative_eq!(last, initial + added - drained, epsilon = 1e-12);
    assert_relative_eq!(last, 0.1 + 0.04 * 5.0, epsilon = 1e-12);
}

#[test]
fn draining_preserves_ph_for_every_stock_solute() {
    for kind in solute::catalog() {
        let mut scene = scene_with(kind.id(), 0.3);
        scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.2)).unwrap();
        scene.tick(seconds(2.0));
        scene.close_all();

        let before = scene.solution().ph().unwrap();
        scene.set_flow_rate(SourceRole::DrainFaucet, lps(0.1)).unwrap();
        run::run_unobserved(&mut scene, seconds(0.5), 6);

        assert_relative_eq!(scene.solution().ph().unwrap(), before, epsilon = 1e-9);
    }
}

#[test]
fn dilution_approaches_neutral_without_crossing() {
    for kind in solute::catalog() {
        let mut scene = scene_with(kind.id(), 0.1);
        scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.05)).unwrap();

        let run = run::run_unobserved(&mut scene, seconds(1.0), 20);
        let distances: Vec<f64> = run
            .history
            .iter()
            .map(|sample| (sample.ph.unwrap() - 7.0).abs())
            .collect();

        for pair in distances.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12, "{kind}: {pair:?}");
        }
        for sample in &run.history {
            let ph = sample.ph.unwrap();
            if kind.ph() < 7.0 {
                assert!(ph <= 7.0, "{kind} crossed neutral: {ph}");
            } else {
                assert!(ph >= 7.0, "{kind} crossed neutral: {ph}");
            }
        }
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let trajectory = || {
        let mut scene = scene_with(SoluteId::DrainCleaner, 0.2);
        scene.set_flow_rate(SourceRole::Dropper, lps(0.013)).unwrap();
        scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.17)).unwrap();
        scene.set_flow_rate(SourceRole::DrainFaucet, lps(0.07)).unwrap();
        run::run_unobserved(&mut scene, seconds(0.037), 500).history
    };

    assert_eq!(trajectory(), trajectory());
}

#[test]
fn total_never_exceeds_capacity() {
    let mut scene = scene_with(SoluteId::HandSoap, 0.9);
    scene.set_flow_rate(SourceRole::Dropper, lps(0.05)).unwrap();
    scene.set_flow_rate(SourceRole::WaterFaucet, lps(0.25)).unwrap();
    let capacity = scene.capacity();

    let run = run::run(&mut scene, seconds(0.3), 20, |event: &run::Event| {
        assert!(event.sample.total_volume() <= capacity);
        None
    });

    assert_eq!(run.last().unwrap().total_volume(), capacity);
}

#[test]
fn empty_beaker_has_no_chemistry() {
    let mut scene = scene_with(SoluteId::BatteryAcid, 0.4);
    scene.set_flow_rate(SourceRole::DrainFaucet, lps(0.25)).unwrap();

    let mut emptied_at = None;
    run::run(&mut scene, seconds(0.5), 10, |event: &run::Event| {
        if event.report.is_some_and(|report| report.emptied) {
            emptied_at = Some(event.step);
        }
        None
    });

    assert_eq!(emptied_at, Some(4));

    let solution = scene.solution();
    assert!(solution.is_empty());
    assert_eq!(solution.ph(), None);
    assert_eq!(solution.color(), None);
    for species in Species::ALL {
        assert_eq!(solution.concentration(species), None);
        assert_eq!(solution.quantity(species), None);
        assert_eq!(solution.molecule_count(species), None);
    }
    assert!(!scene.source(SourceRole::DrainFaucet).is_enabled());
    assert!(!scene.source(SourceRole::DrainFaucet).is_flowing());
}
