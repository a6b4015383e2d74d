use super::domain::HealthGrade;

/// Lower bounds for the excellent/good/fair grades; anything below `fair` is poor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl GradeThresholds {
    pub fn grade(&self, value: f64) -> HealthGrade {
        if !value.is_finite() {
            HealthGrade::Poor
        } else if value >= self.excellent {
            HealthGrade::Excellent
        } else if value >= self.good {
            HealthGrade::Good
        } else if value >= self.fair {
            HealthGrade::Fair
        } else {
            HealthGrade::Poor
        }
    }
}

/// Scale for the executive summary's overall health grade.
pub const HEALTH_THRESHOLDS: GradeThresholds = GradeThresholds {
    excellent: 85.0,
    good: 70.0,
    fair: 50.0,
};

/// Scale for coloring individual scores in rendered documents. Distinct from
/// [`HEALTH_THRESHOLDS`].
pub const DISPLAY_SCORE_THRESHOLDS: GradeThresholds = GradeThresholds {
    excellent: 80.0,
    good: 60.0,
    fair: 40.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_and_display_scales_disagree_on_purpose() {
        assert_eq!(HEALTH_THRESHOLDS.grade(82.0), HealthGrade::Good);
        assert_eq!(DISPLAY_SCORE_THRESHOLDS.grade(82.0), HealthGrade::Excellent);
        assert_eq!(HEALTH_THRESHOLDS.grade(45.0), HealthGrade::Poor);
        assert_eq!(DISPLAY_SCORE_THRESHOLDS.grade(45.0), HealthGrade::Fair);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(HEALTH_THRESHOLDS.grade(85.0), HealthGrade::Excellent);
        assert_eq!(HEALTH_THRESHOLDS.grade(70.0), HealthGrade::Good);
        assert_eq!(HEALTH_THRESHOLDS.grade(50.0), HealthGrade::Fair);
        assert_eq!(DISPLAY_SCORE_THRESHOLDS.grade(40.0), HealthGrade::Fair);
        assert_eq!(DISPLAY_SCORE_THRESHOLDS.grade(39.9), HealthGrade::Poor);
    }

    #[test]
    fn non_finite_values_grade_poor() {
        assert_eq!(HEALTH_THRESHOLDS.grade(f64::NAN), HealthGrade::Poor);
    }
}
