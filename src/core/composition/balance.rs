//! Balance calculation over already-placed focal points.

use super::rules::{shape, Rule, RuleSet, TagSubject};
use crate::core::models::{Balance, BalanceType, CenterOfMass, FocalPoint, Stability, Symmetry};

/// Distance from the canvas center still considered centered, per axis.
pub const CENTER_TOLERANCE: f64 = 0.1;

pub static SYMMETRY_RULES: RuleSet<Symmetry> = RuleSet {
    rules: &[Rule {
        name: "symmetric",
        when: &[shape(&["symmetric", "cross", "square"])],
        then: Symmetry::Symmetric,
    }],
    fallback: Symmetry::Asymmetric,
};

/// Weighted centroid: `Σ(p·w) / Σw` on each axis. An empty or weightless
/// set sits at the canvas center.
pub fn center_of_mass(points: &[FocalPoint]) -> CenterOfMass {
    let total: f64 = points.iter().map(|p| p.weight).sum();
    if total <= 0.0 {
        return CenterOfMass { x: 0.5, y: 0.5 };
    }
    CenterOfMass {
        x: points.iter().map(|p| p.x * p.weight).sum::<f64>() / total,
        y: points.iter().map(|p| p.y * p.weight).sum::<f64>() / total,
    }
}

pub fn balance_type(center: CenterOfMass) -> BalanceType {
    let x_centered = (center.x - 0.5).abs() < CENTER_TOLERANCE;
    let y_centered = (center.y - 0.5).abs() < CENTER_TOLERANCE;
    match (x_centered, y_centered) {
        (true, true) => BalanceType::Centered,
        (true, false) => BalanceType::VerticallyCentered,
        (false, true) => BalanceType::HorizontallyCentered,
        (false, false) => BalanceType::Asymmetric,
    }
}

pub fn calculate_balance(subject: &TagSubject, points: &[FocalPoint]) -> Balance {
    let center = center_of_mass(points);
    let balance_type = balance_type(center);
    let stability = if balance_type == BalanceType::Centered {
        Stability::High
    } else {
        Stability::Dynamic
    };

    Balance {
        balance_type,
        center_of_mass: center,
        symmetry: *SYMMETRY_RULES.resolve(subject),
        stability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(shape: &str) -> TagSubject {
        TagSubject::new(shape, "", "", "")
    }

    #[test]
    fn test_weighted_centroid() {
        let points = [FocalPoint::new(0.2, 0.2, 1.0), FocalPoint::new(0.8, 0.8, 3.0)];
        let center = center_of_mass(&points);
        assert!((center.x - 0.65).abs() < 1e-12);
        assert!((center.y - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_balance_type_quadrants() {
        assert_eq!(balance_type(CenterOfMass { x: 0.5, y: 0.55 }), BalanceType::Centered);
        assert_eq!(balance_type(CenterOfMass { x: 0.52, y: 0.8 }), BalanceType::VerticallyCentered);
        assert_eq!(balance_type(CenterOfMass { x: 0.2, y: 0.5 }), BalanceType::HorizontallyCentered);
        assert_eq!(balance_type(CenterOfMass { x: 0.2, y: 0.8 }), BalanceType::Asymmetric);
    }

    #[test]
    fn test_tolerance_is_strict() {
        assert_eq!(balance_type(CenterOfMass { x: 0.7, y: 0.5 }), BalanceType::HorizontallyCentered);
    }

    #[test]
    fn test_symmetry_keywords() {
        let points = [FocalPoint::new(0.5, 0.5, 1.0)];
        for shape in ["cross_symmetric", "square_extended", "northern_cross"] {
            assert_eq!(calculate_balance(&subject(shape), &points).symmetry, Symmetry::Symmetric);
        }
        assert_eq!(calculate_balance(&subject("parallel_twins"), &points).symmetry, Symmetry::Asymmetric);
    }

    #[test]
    fn test_stability_follows_centering() {
        let centered = calculate_balance(&subject("x"), &[FocalPoint::new(0.5, 0.5, 1.0)]);
        assert_eq!(centered.stability, Stability::High);

        let offset = calculate_balance(&subject("x"), &[FocalPoint::new(0.9, 0.5, 1.0)]);
        assert_eq!(offset.stability, Stability::Dynamic);
    }

    #[test]
    fn test_empty_points_sit_at_center() {
        let center = center_of_mass(&[]);
        assert_eq!((center.x, center.y), (0.5, 0.5));
    }
}
