//! Orb policy: an ordered rule table mapping `(context, pair, aspect)` to
//! the widest orb at which the aspect still counts.
//!
//! Rules are tried in order and the first rule whose context and selector
//! match decides the orb. A pair no rule matches has no orb and can never
//! aspect.

use crate::aspects::types::{AspectContext, AspectPoint, AspectType};
use crate::ephemeris::{Body, BodyClass};
use AspectContext::*;

/// Orbs for the three aspect families, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbTier {
    pub conjunction_opposition: f64,
    pub trine_square: f64,
    pub sextile: f64,
}

impl OrbTier {
    pub const fn new(conjunction_opposition: f64, trine_square: f64, sextile: f64) -> Self {
        Self {
            conjunction_opposition,
            trine_square,
            sextile,
        }
    }

    pub const fn uniform(orb: f64) -> Self {
        Self::new(orb, orb, orb)
    }

    pub fn for_aspect(&self, aspect: AspectType) -> f64 {
        match aspect {
            AspectType::Conjunction | AspectType::Opposition => self.conjunction_opposition,
            AspectType::Trine | AspectType::Square => self.trine_square,
            AspectType::Sextile => self.sextile,
        }
    }

    /// The widest orb of the tier
    pub fn max(&self) -> f64 {
        self.conjunction_opposition
            .max(self.trine_square)
            .max(self.sextile)
    }
}

/// A predicate on a single body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyMatch {
    Is(Body),
    Class(BodyClass),
    OneOf(&'static [Body]),
}

impl BodyMatch {
    pub fn matches(&self, body: Body) -> bool {
        match self {
            BodyMatch::Is(b) => *b == body,
            BodyMatch::Class(class) => body.class() == *class,
            BodyMatch::OneOf(bodies) => bodies.contains(&body),
        }
    }

    fn matches_point(&self, point: AspectPoint) -> bool {
        point.body().is_some_and(|body| self.matches(body))
    }
}

/// Which pairs a rule applies to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selector {
    /// At least one side matches
    Either(BodyMatch),
    /// Both sides match
    Both(BodyMatch),
    /// Exactly these two bodies, in either order
    Pair(Body, Body),
    /// One side in each class
    Mixed(BodyClass, BodyClass),
    /// The second point (the transiting body or aspected planet) matches
    Subject(BodyMatch),
    Any,
}

impl Selector {
    pub fn matches(&self, a: AspectPoint, b: AspectPoint) -> bool {
        match self {
            Selector::Either(m) => m.matches_point(a) || m.matches_point(b),
            Selector::Both(m) => m.matches_point(a) && m.matches_point(b),
            Selector::Pair(x, y) => {
                let (x, y) = (AspectPoint::Body(*x), AspectPoint::Body(*y));
                (a == x && b == y) || (a == y && b == x)
            }
            Selector::Mixed(c1, c2) => {
                let (m1, m2) = (BodyMatch::Class(*c1), BodyMatch::Class(*c2));
                (m1.matches_point(a) && m2.matches_point(b))
                    || (m2.matches_point(a) && m1.matches_point(b))
            }
            Selector::Subject(m) => m.matches_point(b),
            Selector::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbRule {
    pub context: AspectContext,
    pub selector: Selector,
    pub orbs: OrbTier,
}

impl OrbRule {
    pub const fn new(context: AspectContext, selector: Selector, orbs: OrbTier) -> Self {
        Self {
            context,
            selector,
            orbs,
        }
    }
}

const SOCIAL: &[Body] = &[Body::Jupiter, Body::Saturn];
const GENERATIONAL: &[Body] = &[Body::Uranus, Body::Neptune, Body::Pluto];
const PERSONAL: &[Body] = &[Body::Mercury, Body::Venus, Body::Mars];

/// The standard rule table, in priority order
#[rustfmt::skip]
pub const STANDARD_RULES: &[OrbRule] = &[
    // transit to transit
    OrbRule::new(TransitToTransit, Selector::Either(BodyMatch::Is(Body::Moon)), OrbTier::new(2.0, 1.5, 1.0)),
    OrbRule::new(TransitToTransit, Selector::Either(BodyMatch::Class(BodyClass::Node)), OrbTier::new(5.0, 4.0, 3.0)),
    OrbRule::new(TransitToTransit, Selector::Pair(Body::Jupiter, Body::Saturn), OrbTier::new(6.0, 5.0, 4.0)),
    OrbRule::new(TransitToTransit, Selector::Both(BodyMatch::Class(BodyClass::Inner)), OrbTier::new(3.0, 2.5, 2.0)),
    OrbRule::new(TransitToTransit, Selector::Both(BodyMatch::Class(BodyClass::Outer)), OrbTier::new(5.0, 4.0, 3.0)),
    OrbRule::new(TransitToTransit, Selector::Mixed(BodyClass::Inner, BodyClass::Outer), OrbTier::new(4.0, 3.0, 2.5)),
    // natal to transit, keyed on the transiting body
    OrbRule::new(NatalToTransit, Selector::Subject(BodyMatch::Class(BodyClass::Inner)), OrbTier::new(2.0, 2.0, 1.5)),
    OrbRule::new(NatalToTransit, Selector::Subject(BodyMatch::OneOf(SOCIAL)), OrbTier::new(4.0, 3.0, 3.0)),
    OrbRule::new(NatalToTransit, Selector::Subject(BodyMatch::OneOf(GENERATIONAL)), OrbTier::new(2.0, 1.5, 1.0)),
    OrbRule::new(NatalToTransit, Selector::Subject(BodyMatch::Class(BodyClass::Node)), OrbTier::new(2.0, 1.5, 1.0)),
    // midpoints
    OrbRule::new(NatalToMidpoint, Selector::Any, OrbTier::uniform(2.0)),
    // eclipse points, keyed on the planet; luminaries have no rule
    OrbRule::new(EclipseToPlanet, Selector::Subject(BodyMatch::OneOf(PERSONAL)), OrbTier::new(3.0, 2.5, 2.0)),
    OrbRule::new(EclipseToPlanet, Selector::Subject(BodyMatch::Class(BodyClass::Outer)), OrbTier::new(4.0, 3.0, 2.0)),
    OrbRule::new(EclipseToPlanet, Selector::Subject(BodyMatch::Class(BodyClass::Node)), OrbTier::new(5.0, 4.0, 3.0)),
];

/// Context-dependent orb limits
#[derive(Debug, Clone, PartialEq)]
pub struct OrbPolicy {
    rules: Vec<OrbRule>,
}

impl Default for OrbPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl OrbPolicy {
    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }

    /// A policy with a caller-supplied rule table, tried in order
    pub fn new(rules: Vec<OrbRule>) -> Self {
        Self { rules }
    }

    /// Put `rule` ahead of every existing rule
    pub fn with_override(mut self, rule: OrbRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    pub fn rules(&self) -> &[OrbRule] {
        &self.rules
    }

    /// Orb limit for an aspect between two points, or `None` when the pair can
    /// never form it.
    ///
    /// The node axis never forms an opposition, whatever the table says.
    pub fn orb_limit(
        &self,
        context: AspectContext,
        point_a: AspectPoint,
        point_b: AspectPoint,
        aspect: AspectType,
    ) -> Option<f64> {
        if aspect == AspectType::Opposition && is_node_axis(point_a, point_b) {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.context == context && rule.selector.matches(point_a, point_b))
            .map(|rule| rule.orbs.for_aspect(aspect))
    }
}

fn is_node_axis(a: AspectPoint, b: AspectPoint) -> bool {
    matches!(
        (a.body(), b.body()),
        (Some(Body::NorthNode), Some(Body::SouthNode)) | (Some(Body::SouthNode), Some(Body::NorthNode))
    )
}
