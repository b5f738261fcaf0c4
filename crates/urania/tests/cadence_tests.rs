use urania::aspects::{AspectCalculator, AspectContext, AspectType};
use urania::cadence::{duration_in_orb, recurrence_interval, synodic_period, AspectCadence};
use urania::ephemeris::Body;

#[test]
fn test_lunation_cycle() {
    let cadence = AspectCadence::estimate(Body::Sun, Body::Moon, AspectType::Conjunction, 2.0);
    assert_eq!(cadence.synodic_period_days, Some(29.530589));
    assert_eq!(cadence.recurrence_days, Some(29.530589));
    assert_eq!(cadence.to_string(), "sun conjunction moon: every ~29.5 days, in orb for ~8 hours");
}

#[test]
fn test_great_conjunction_cycle() {
    let period = synodic_period(Body::Jupiter, Body::Saturn).unwrap();
    assert!((period / 365.25 - 19.86).abs() < 0.01);
    let cadence = AspectCadence::estimate(Body::Jupiter, Body::Saturn, AspectType::Square, 5.0);
    assert_eq!(cadence.recurrence_text(), "every ~9.9 years");
}

#[test]
fn test_duration_scales_with_orb() {
    let narrow = duration_in_orb(Body::Sun, Body::Mars, 1.0).unwrap();
    let wide = duration_in_orb(Body::Sun, Body::Mars, 3.0).unwrap();
    assert!((wide - 3.0 * narrow).abs() < 1e-9);
}

#[test]
fn test_node_pair_has_no_cadence() {
    assert!(recurrence_interval(Body::NorthNode, Body::SouthNode, AspectType::Conjunction).is_none());
    let cadence = AspectCadence::estimate(Body::NorthNode, Body::SouthNode, AspectType::Conjunction, 5.0);
    assert_eq!(cadence.recurrence_text(), "does not recur");
    assert_eq!(cadence.duration_text(), "stays in orb indefinitely");
}

#[test]
fn test_cadence_from_detected_aspect() {
    let aspect = AspectCalculator::default()
        .calculate_aspect(
            AspectContext::TransitToTransit,
            Body::Sun.into(),
            10.0,
            Body::Venus.into(),
            11.0,
        )
        .unwrap();
    let cadence = AspectCadence::for_result(&aspect).unwrap();
    assert_eq!(cadence.orb, 3.0);
    assert_eq!(cadence.synodic_period_days, Some(583.92));
}
