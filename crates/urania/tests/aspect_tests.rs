use chrono::{TimeZone, Utc};
use std::collections::HashSet;
use urania::aspects::{AspectCalculator, AspectContext, AspectPoint, AspectType, OrbPolicy};
use urania::ephemeris::{Body, GeoPositionProvider, PlanetPosition};
use urania::{BodyFilter, Chart, ChartBuilder};

fn chart(positions: &[(Body, f64)]) -> Chart {
    let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Chart::from_positions(
        instant,
        positions
            .iter()
            .map(|&(body, lon)| PlanetPosition::new(body, lon, false))
            .collect(),
    )
}

#[test]
fn test_inner_conjunction_at_two_degrees() {
    let calculator = AspectCalculator::default();
    let aspects = calculator.transit_to_transit(&chart(&[(Body::Sun, 10.0), (Body::Mercury, 12.0)]));
    assert_eq!(aspects.len(), 1);
    let aspect = &aspects[0];
    assert_eq!(aspect.aspect_type, AspectType::Conjunction);
    assert_eq!(aspect.exact_angle, 0.0);
    assert!((aspect.orb - 2.0).abs() < 1e-9);
    assert!(aspect.orb <= aspect.orb_limit);
}

#[test]
fn test_moon_trine_orb_boundary() {
    let calculator = AspectCalculator::default();
    let inside = calculator.transit_to_transit(&chart(&[(Body::Moon, 0.0), (Body::Venus, 121.5)]));
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].aspect_type, AspectType::Trine);
    assert_eq!(inside[0].orb_limit, 1.5);

    let outside = calculator.transit_to_transit(&chart(&[(Body::Moon, 0.0), (Body::Venus, 121.6)]));
    assert!(outside.is_empty());
}

#[test]
fn test_node_axis_opposition_never_reported() {
    let calculator = AspectCalculator::default();
    let c = chart(&[(Body::NorthNode, 15.0), (Body::SouthNode, 195.0)]);
    assert!(calculator.transit_to_transit(&c).is_empty());
    assert!(calculator.natal_to_transit(&c, &c).iter().all(|a| a.aspect_type != AspectType::Opposition));
}

#[test]
fn test_aspect_presence_is_monotone_in_separation() {
    // Mars–Jupiter is a mixed pair: 4° conjunction orb
    let calculator = AspectCalculator::default();
    for k in 0..=160 {
        let offset = k as f64 * 0.25;
        let found = calculator.calculate_aspect(
            AspectContext::TransitToTransit,
            Body::Mars.into(),
            100.0,
            Body::Jupiter.into(),
            100.0 + offset,
        );
        assert_eq!(found.is_some(), offset <= 4.0, "offset {offset}");
    }
}

#[test]
fn test_first_matching_aspect_wins() {
    // Jupiter–Saturn orbs are wide enough that scan order matters
    let policy = OrbPolicy::standard();
    let orb = policy.orb_limit(
        AspectContext::TransitToTransit,
        Body::Jupiter.into(),
        Body::Saturn.into(),
        AspectType::Conjunction,
    );
    assert_eq!(orb, Some(6.0));

    let calculator = AspectCalculator::new(policy);
    let aspect = calculator
        .calculate_aspect(
            AspectContext::TransitToTransit,
            Body::Jupiter.into(),
            0.0,
            Body::Saturn.into(),
            5.5,
        )
        .unwrap();
    assert_eq!(aspect.aspect_type, AspectType::Conjunction);
}

#[test]
fn test_natal_to_transit_has_no_mirrored_pairs() {
    let provider = GeoPositionProvider::analytic();
    let natal = ChartBuilder::new(&provider)
        .build(Utc.with_ymd_and_hms(1990, 7, 4, 12, 0, 0).unwrap())
        .unwrap();
    let transit = ChartBuilder::new(&provider)
        .build(Utc.with_ymd_and_hms(2024, 4, 8, 18, 0, 0).unwrap())
        .unwrap();
    let aspects = AspectCalculator::default().natal_to_transit(&natal, &transit);
    let mut seen = HashSet::new();
    for aspect in &aspects {
        let (a, b) = (aspect.point_a.body().unwrap(), aspect.point_b.body().unwrap());
        let key = if a <= b { (a, b) } else { (b, a) };
        assert!(seen.insert(key), "duplicate pair {key:?}");
        assert!(aspect.orb <= aspect.orb_limit);
        assert_eq!(aspect.context, AspectContext::NatalToTransit);
    }
}

#[test]
fn test_filtered_chart_restricts_scan() {
    let calculator = AspectCalculator::default();
    let full = chart(&[(Body::Sun, 10.0), (Body::Mercury, 12.0), (Body::Jupiter, 130.0)]);
    let inner_only = calculator.transit_to_transit(&full.filtered(BodyFilter::Inner));
    assert_eq!(inner_only.len(), 1);
    assert_eq!(inner_only[0].point_b, AspectPoint::Body(Body::Mercury));
}

#[test]
fn test_results_serialize_camel_case() {
    let calculator = AspectCalculator::default();
    let aspects = calculator.transit_to_transit(&chart(&[(Body::Sun, 10.0), (Body::Mars, 100.0)]));
    let json = serde_json::to_value(&aspects[0]).unwrap();
    assert_eq!(json["aspectType"], "square");
    assert_eq!(json["pointA"]["body"], "sun");
    assert_eq!(json["context"], "transit_to_transit");
}
