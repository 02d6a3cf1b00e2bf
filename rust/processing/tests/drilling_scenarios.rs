// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use strata_lite_core::{ContactType, GeologicalSampleData, Layer, LayerType};
use strata_lite_geometry::{Aabb, Point3, Vector3};
use strata_lite_processing::{optimize_segments, DetectionConfig, DrillingAnalyzer};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn slab(name: &str, layer_type: LayerType, y_min: f64, y_max: f64) -> Layer {
    Layer::new(name, layer_type).with_box(Aabb::new(
        Point3::new(-5.0, y_min, -5.0),
        Point3::new(5.0, y_max, 5.0),
    ))
}

/// Topsoil over bedrock, meeting at y = 4. Bedrock's top is pulled just below
/// the shared face so the two boxes do not both claim it.
fn topsoil_over_bedrock() -> Vec<Arc<Layer>> {
    vec![
        Arc::new(slab("Topsoil", LayerType::Soil, 4.0, 10.0).with_formation("Holocene Cover")),
        Arc::new(
            slab("Bedrock", LayerType::Bedrock, -10.0, 4.0 - 1e-6)
                .with_formation("Basement Granite")
                .with_mask_bits(0b10),
        ),
    ]
}

fn assert_statistics_consistent(sample: &GeologicalSampleData) {
    for stat in &sample.layer_stats {
        let containing: Vec<_> = sample
            .segments
            .iter()
            .filter_map(|s| s.layer(stat.layer).map(|info| s.segment_height * info.area_share))
            .collect();
        let expected: f64 = containing.iter().sum();

        assert!(
            (stat.total_thickness - expected).abs() < 1e-9,
            "{}: {} != {}",
            stat.layer_name,
            stat.total_thickness,
            expected
        );
        assert_eq!(stat.number_of_segments, containing.len());
    }
}

#[test]
fn single_enclosing_layer_gives_one_segment() {
    init_tracing();
    let layers = vec![Arc::new(slab("Sandstone", LayerType::Sedimentary, -10.0, 20.0))];
    let analyzer = DrillingAnalyzer::default();

    let sample = analyzer.analyze_drilling_sample(&layers, Point3::new(0.0, 10.0, 0.0), 5.0, 0.5);

    assert_eq!(sample.segments.len(), 1);
    let segment = &sample.segments[0];
    assert_eq!(segment.depth, 0.0);
    assert!((segment.segment_height - 5.0).abs() < 1e-9);
    assert_eq!(segment.layers.len(), 1);
    assert_eq!(segment.layers[0].area_share, 1.0);
    assert!(segment.interfaces.is_empty());

    assert_eq!(sample.total_layers, 1);
    assert!((sample.layer_stats[0].total_thickness - 5.0).abs() < 1e-9);
    assert!((sample.layer_stats[0].percentage_of_sample - 100.0).abs() < 1e-9);
    assert_statistics_consistent(&sample);
}

#[test]
fn topsoil_and_bedrock_profile() {
    init_tracing();
    let layers = topsoil_over_bedrock();
    let analyzer =
        DrillingAnalyzer::new(DetectionConfig::default().with_sample_resolution(0.2)).unwrap();

    let start = Point3::new(0.0, 10.0, 0.0);
    let registry = strata_lite_core::LayerRegistry::snapshot(&layers, u32::MAX);
    let raw = analyzer.sample_path(&registry, start, 10.0, 0.5).unwrap();
    assert_eq!(raw.len(), 50);
    assert!(raw.iter().all(|s| s.layers.len() == 1));

    let sample = analyzer.analyze_drilling_sample(&layers, start, 10.0, 0.5);
    assert_eq!(sample.segments.len(), 2);
    assert_eq!(sample.segments[0].layers[0].name, "Topsoil");
    assert_eq!(sample.segments[1].layers[0].name, "Bedrock");
    assert!((sample.segments[1].depth - 6.0).abs() <= 0.25);
    assert!(sample.segments.iter().all(|s| s.interfaces.is_empty()));

    let topsoil = sample.stats_for("Topsoil").unwrap();
    let bedrock = sample.stats_for("Bedrock").unwrap();
    assert!((topsoil.total_thickness - 6.0).abs() <= 0.25);
    assert!((bedrock.total_thickness - 4.0).abs() <= 0.25);
    assert_eq!(topsoil.layer_type, LayerType::Soil);

    // First appearance order, not sorted
    assert_eq!(sample.layer_stats[0].layer_name, "Topsoil");
    assert_eq!(
        sample.identified_formations,
        vec!["Holocene Cover".to_string(), "Basement Granite".to_string()]
    );
    assert_statistics_consistent(&sample);
}

#[test]
fn shared_face_gives_single_conformable_contact() {
    let layers = vec![
        Arc::new(slab("Siltstone", LayerType::Sedimentary, 4.0, 10.0)),
        Arc::new(slab("Mudstone", LayerType::Sedimentary, -10.0, 4.0)),
    ];
    let analyzer = DrillingAnalyzer::default();

    let sample = analyzer.analyze_drilling_sample(&layers, Point3::new(0.0, 10.0, 0.0), 10.0, 0.5);

    let with_contacts: Vec<_> = sample
        .segments
        .iter()
        .filter(|s| !s.interfaces.is_empty())
        .collect();
    assert_eq!(with_contacts.len(), 1);
    assert!((with_contacts[0].segment_height - 0.2).abs() < 1e-9);

    let contact = &with_contacts[0].interfaces[0];
    assert!(contact.contact_angle < 1e-6);
    assert_eq!(contact.contact_type, ContactType::Conformable);

    let single_layer = sample.segments.iter().filter(|s| s.layers.len() == 1).count();
    assert_eq!(single_layer, 2);
    assert_statistics_consistent(&sample);
}

#[test]
fn cross_cutting_dyke_is_unconformable() {
    let dyke = Layer::new("Dolerite Dyke", LayerType::Igneous)
        .with_box(Aabb::new(Point3::new(-0.1, -10.0, -5.0), Point3::new(5.0, 10.0, 5.0)))
        .with_strike_dip(Vector3::z(), 80.0);
    let layers = vec![
        Arc::new(slab("Limestone", LayerType::Sedimentary, -10.0, 10.0)),
        Arc::new(dyke),
    ];
    let analyzer = DrillingAnalyzer::default();

    let sample = analyzer.analyze_drilling_sample(&layers, Point3::new(0.0, 5.0, 0.0), 3.0, 0.5);

    assert_eq!(sample.segments.len(), 1);
    let segment = &sample.segments[0];
    assert_eq!(segment.layers.len(), 2);
    assert_eq!(segment.interfaces.len(), 1);
    assert_eq!(segment.interfaces[0].contact_type, ContactType::Unconformable);

    let dyke_stats = sample.stats_for("Dolerite Dyke").unwrap();
    assert!((dyke_stats.average_dip_angle - 80.0).abs() < 1e-9);
    assert_eq!(dyke_stats.dominant_strike.as_deref(), Some("N"));
    assert!(dyke_stats.total_thickness < sample.stats_for("Limestone").unwrap().total_thickness);
    assert_statistics_consistent(&sample);
}

#[test]
fn optimizing_result_again_changes_nothing() {
    let layers = topsoil_over_bedrock();
    let analyzer = DrillingAnalyzer::default();
    let sample = analyzer.analyze_drilling_sample(&layers, Point3::new(0.0, 10.0, 0.0), 10.0, 0.5);

    let again = optimize_segments(sample.segments.clone(), analyzer.config().composition_tolerance);
    assert_eq!(again, sample.segments);
}

#[test]
fn layer_mask_scopes_participants() {
    let layers = topsoil_over_bedrock();
    let analyzer = DrillingAnalyzer::new(DetectionConfig::default().with_layer_mask(0b01)).unwrap();

    let sample = analyzer.analyze_drilling_sample(&layers, Point3::new(0.0, 10.0, 0.0), 10.0, 0.5);
    assert_eq!(sample.total_layers, 1);
    assert!(sample.stats_for("Bedrock").is_none());
}

#[test]
fn thin_layer_needs_finer_resolution() {
    let layers = vec![Arc::new(slab("Ash Band", LayerType::Igneous, 7.05, 7.15))];
    let start = Point3::new(0.0, 10.0, 0.0);

    let coarse = DrillingAnalyzer::default().analyze_drilling_sample(&layers, start, 5.0, 0.5);
    assert!(coarse.is_empty());

    let fine = DrillingAnalyzer::new(DetectionConfig::default().with_sample_resolution(0.05))
        .unwrap()
        .analyze_drilling_sample(&layers, start, 5.0, 0.5);
    assert_eq!(fine.total_layers, 1);
}

#[test]
fn drilling_range_and_point_queries() {
    let layers = topsoil_over_bedrock();
    let analyzer = DrillingAnalyzer::default();

    let range = analyzer.layers_in_drilling_range(&layers, Point3::new(0.0, 12.0, 0.0), 20.0);
    let names: Vec<_> = range.iter().map(|(l, _)| l.name.as_str()).collect();
    assert_eq!(names, vec!["Topsoil", "Bedrock"]);
    assert!((range[0].1 - 2.0).abs() < 1e-9);

    let here = analyzer.layers_at_point(&layers, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(here.len(), 1);
    assert_eq!(here[0].name, "Bedrock");
}

#[test]
fn empty_scene_and_bad_input_degrade_quietly() {
    let analyzer = DrillingAnalyzer::default();
    let start = Point3::new(0.0, 10.0, 0.0);

    assert!(analyzer.analyze_drilling_sample(&[], start, 5.0, 0.5).is_empty());
    assert!(analyzer
        .analyze_drilling_sample(&topsoil_over_bedrock(), start, 5.0, 0.0)
        .is_empty());
    assert!(analyzer
        .analyze_drilling_sample(&topsoil_over_bedrock(), start, -1.0, 0.5)
        .is_empty());
}

#[test]
fn result_exports_to_json() {
    let analyzer = DrillingAnalyzer::default();
    let start = Point3::new(0.0, 10.0, 0.0);
    let sample = analyzer.analyze_drilling_sample(&topsoil_over_bedrock(), start, 10.0, 0.5);

    let json = sample.to_json().unwrap();
    let restored = GeologicalSampleData::from_json(&json).unwrap();
    assert_eq!(restored.sample_id, sample.sample_id);
    assert_eq!(restored.segments.len(), 2);
    assert_eq!(restored.layer_stats[1].layer_name, "Bedrock");
}
