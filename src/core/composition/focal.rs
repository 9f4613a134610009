//! Focal point placement.
//!
//! Brightness and shape tags select one of a fixed set of layouts. Several
//! tags overlap textually (a "bright_cross" record may also carry a
//! "cross_symmetric" shape), so the table order below is part of the contract.

use std::f64::consts::PI;

use super::rules::{brightness, shape, Rule, RuleSet, TagSubject};
use super::seeded::{Mt19937, DISPERSED_SEED};
use crate::core::models::FocalPoint;

/// Named focal layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocalPattern {
    /// Two equal anchors side by side
    TwinPair,
    /// One dominant star with two faint satellites
    DominantStar,
    /// Plus sign: center and four arms
    Cross,
    /// Belt, shoulders, feet
    Hourglass,
    /// Horizontal W
    Zigzag,
    /// Four-corner bowl and three-point handle
    Dipper,
    /// Four corners
    Square,
    /// Apex and two base points
    Triangle,
    /// Seven points along a half sine wave
    CurvedSweep,
    /// Six seeded pseudo-random points
    Dispersed,
    /// Three-point fallback
    Default,
}

pub static FOCAL_RULES: RuleSet<FocalPattern> = RuleSet {
    rules: &[
        Rule { name: "two_bright_stars", when: &[brightness(&["two_bright_stars"])], then: FocalPattern::TwinPair },
        Rule { name: "extremely_bright_star", when: &[brightness(&["extremely_bright_star"])], then: FocalPattern::DominantStar },
        Rule { name: "cross", when: &[brightness(&["bright_cross"]), shape(&["cross"])], then: FocalPattern::Cross },
        Rule { name: "hourglass", when: &[shape(&["belt", "hourglass"])], then: FocalPattern::Hourglass },
        Rule { name: "w_zigzag", when: &[shape(&["w_zigzag"])], then: FocalPattern::Zigzag },
        Rule { name: "dipper", when: &[shape(&["dipper"])], then: FocalPattern::Dipper },
        Rule { name: "square", when: &[shape(&["square"])], then: FocalPattern::Square },
        Rule { name: "triangular", when: &[shape(&["triangular"])], then: FocalPattern::Triangle },
        Rule { name: "curved", when: &[shape(&["curved", "tail"])], then: FocalPattern::CurvedSweep },
        Rule { name: "dispersed", when: &[shape(&["dispersed"])], then: FocalPattern::Dispersed },
    ],
    fallback: FocalPattern::Default,
};

const TWIN_PAIR: &[FocalPoint] = &[
    FocalPoint::new(0.35, 0.5, 0.5),
    FocalPoint::new(0.65, 0.5, 0.5),
];

const DOMINANT_STAR: &[FocalPoint] = &[
    FocalPoint::new(0.5, 0.5, 1.0),
    FocalPoint::new(0.35, 0.6, 0.2),
    FocalPoint::new(0.65, 0.4, 0.2),
];

// center, top, left, right, bottom
const CROSS: &[FocalPoint] = &[
    FocalPoint::new(0.5, 0.5, 0.5),
    FocalPoint::new(0.5, 0.3, 0.3),
    FocalPoint::new(0.3, 0.5, 0.25),
    FocalPoint::new(0.7, 0.5, 0.25),
    FocalPoint::new(0.5, 0.7, 0.3),
];

// belt center, shoulders, feet
const HOURGLASS: &[FocalPoint] = &[
    FocalPoint::new(0.5, 0.45, 0.4),
    FocalPoint::new(0.35, 0.3, 0.35),
    FocalPoint::new(0.65, 0.3, 0.35),
    FocalPoint::new(0.35, 0.7, 0.25),
    FocalPoint::new(0.65, 0.7, 0.25),
];

const ZIGZAG: &[FocalPoint] = &[
    FocalPoint::new(0.2, 0.5, 0.25),
    FocalPoint::new(0.35, 0.4, 0.25),
    FocalPoint::new(0.5, 0.5, 0.25),
    FocalPoint::new(0.65, 0.4, 0.25),
    FocalPoint::new(0.8, 0.5, 0.25),
];

// bowl corners, then handle out to its tip
const DIPPER: &[FocalPoint] = &[
    FocalPoint::new(0.3, 0.45, 0.25),
    FocalPoint::new(0.45, 0.45, 0.25),
    FocalPoint::new(0.45, 0.6, 0.25),
    FocalPoint::new(0.3, 0.6, 0.25),
    FocalPoint::new(0.55, 0.5, 0.2),
    FocalPoint::new(0.65, 0.45, 0.2),
    FocalPoint::new(0.75, 0.4, 0.2),
];

const SQUARE: &[FocalPoint] = &[
    FocalPoint::new(0.35, 0.35, 0.3),
    FocalPoint::new(0.65, 0.35, 0.3),
    FocalPoint::new(0.65, 0.65, 0.3),
    FocalPoint::new(0.35, 0.65, 0.3),
];

const TRIANGLE: &[FocalPoint] = &[
    FocalPoint::new(0.5, 0.3, 0.4),
    FocalPoint::new(0.35, 0.65, 0.35),
    FocalPoint::new(0.65, 0.65, 0.35),
];

const DEFAULT: &[FocalPoint] = &[
    FocalPoint::new(0.5, 0.35, 0.4),
    FocalPoint::new(0.35, 0.65, 0.35),
    FocalPoint::new(0.65, 0.65, 0.35),
];

const SWEEP_POINTS: usize = 7;
const DISPERSED_POINTS: usize = 6;

impl FocalPattern {
    /// Materialize the layout as canvas-relative points.
    pub fn points(self) -> Vec<FocalPoint> {
        match self {
            FocalPattern::TwinPair => TWIN_PAIR.to_vec(),
            FocalPattern::DominantStar => DOMINANT_STAR.to_vec(),
            FocalPattern::Cross => CROSS.to_vec(),
            FocalPattern::Hourglass => HOURGLASS.to_vec(),
            FocalPattern::Zigzag => ZIGZAG.to_vec(),
            FocalPattern::Dipper => DIPPER.to_vec(),
            FocalPattern::Square => SQUARE.to_vec(),
            FocalPattern::Triangle => TRIANGLE.to_vec(),
            FocalPattern::CurvedSweep => curved_sweep(),
            FocalPattern::Dispersed => dispersed(),
            FocalPattern::Default => DEFAULT.to_vec(),
        }
    }
}

/// `x = 0.2 + 0.6t`, `y = 0.5 + 0.2 sin(πt)` for `t = i/6`; the two leading
/// points carry weight 0.4, the rest 0.2.
fn curved_sweep() -> Vec<FocalPoint> {
    (0..SWEEP_POINTS)
        .map(|i| {
            let t = i as f64 / (SWEEP_POINTS - 1) as f64;
            let weight = if i < 2 { 0.4 } else { 0.2 };
            FocalPoint::new(0.2 + 0.6 * t, 0.5 + 0.2 * (t * PI).sin(), weight)
        })
        .collect()
}

/// Fresh generator per call, so every call yields the same six points.
/// Draw order per point: x, y, weight.
fn dispersed() -> Vec<FocalPoint> {
    let mut rng = Mt19937::from_seed(DISPERSED_SEED);
    (0..DISPERSED_POINTS)
        .map(|_| {
            let x = rng.next_in(0.2, 0.6);
            let y = rng.next_in(0.2, 0.6);
            let weight = rng.next_in(0.2, 0.2);
            FocalPoint::new(x, y, weight)
        })
        .collect()
}

/// Select the layout for a record's tags.
pub fn classify(subject: &TagSubject) -> FocalPattern {
    *FOCAL_RULES.resolve(subject)
}

/// Focal points for a record's tags.
pub fn focal_points(subject: &TagSubject) -> Vec<FocalPoint> {
    classify(subject).points()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(shape: &str, brightness: &str) -> TagSubject {
        TagSubject::new(shape, brightness, "", "")
    }

    #[test]
    fn test_brightness_rules_precede_shape_rules() {
        assert_eq!(classify(&tags("hourglass_belt", "two_bright_stars")), FocalPattern::TwinPair);
        assert_eq!(classify(&tags("square", "extremely_bright_star")), FocalPattern::DominantStar);
    }

    #[test]
    fn test_cross_matches_either_tag() {
        assert_eq!(classify(&tags("blob", "bright_cross")), FocalPattern::Cross);
        assert_eq!(classify(&tags("northern_cross", "moderate")), FocalPattern::Cross);
    }

    #[test]
    fn test_square_precedes_triangular() {
        assert_eq!(classify(&tags("square_triangular", "moderate")), FocalPattern::Square);
        assert_eq!(classify(&tags("triangular_square", "moderate")), FocalPattern::Square);
    }

    #[test]
    fn test_curved_and_tail() {
        assert_eq!(classify(&tags("curved_chain", "bright")), FocalPattern::CurvedSweep);
        assert_eq!(classify(&tags("long_tail", "bright")), FocalPattern::CurvedSweep);
    }

    #[test]
    fn test_unrecognized_tags_fall_back() {
        assert_eq!(classify(&tags("teapot", "bright")), FocalPattern::Default);
        assert_eq!(classify(&tags("", "")), FocalPattern::Default);
    }

    #[test]
    fn test_hourglass_weights() {
        let points = FocalPattern::Hourglass.points();
        let weights: Vec<f64> = points.iter().map(|p| p.weight).collect();
        assert_eq!(weights, [0.4, 0.35, 0.35, 0.25, 0.25]);
        assert_eq!(points[0].x, 0.5);
    }

    #[test]
    fn test_cross_center_heaviest() {
        let points = FocalPattern::Cross.points();
        assert_eq!(points.len(), 5);
        assert!(points[1..].iter().all(|p| p.weight < points[0].weight));
    }

    #[test]
    fn test_dipper_handle_lighter_than_bowl() {
        let points = FocalPattern::Dipper.points();
        assert_eq!(points.len(), 7);
        assert!(points[..4].iter().all(|p| p.weight == 0.25));
        assert!(points[4..].iter().all(|p| p.weight == 0.2));
    }

    #[test]
    fn test_default_differs_from_triangle() {
        assert_ne!(FocalPattern::Default.points(), FocalPattern::Triangle.points());
        assert_eq!(FocalPattern::Default.points().len(), 3);
    }

    #[test]
    fn test_curved_sweep_follows_sine() {
        let points = FocalPattern::CurvedSweep.points();
        assert_eq!(points.len(), 7);
        for (i, p) in points.iter().enumerate() {
            let t = i as f64 / 6.0;
            assert!((p.x - (0.2 + 0.6 * t)).abs() < 1e-12);
            assert!((p.y - (0.5 + 0.2 * (t * PI).sin())).abs() < 1e-12);
            assert_eq!(p.weight, if i < 2 { 0.4 } else { 0.2 });
        }
        assert!((points[3].y - 0.7).abs() < 1e-12);
        assert!((points[6].y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dispersed_is_reproducible() {
        let first = FocalPattern::Dispersed.points();
        let second = FocalPattern::Dispersed.points();
        assert_eq!(first.len(), 6);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.weight.to_bits(), b.weight.to_bits());
        }
    }

    #[test]
    fn test_dispersed_ranges_and_first_point() {
        let points = FocalPattern::Dispersed.points();
        for p in &points {
            assert!((0.2..=0.8).contains(&p.x));
            assert!((0.2..=0.8).contains(&p.y));
            assert!((0.2..=0.4).contains(&p.weight));
        }
        assert!((points[0].x - 0.583_656_079_074_730_3).abs() < 1e-12);
        assert!((points[0].y - 0.215_006_453_133_600_17).abs() < 1e-12);
        assert!((points[0].weight - 0.255_005_863_673_823_9).abs() < 1e-12);
    }
}
