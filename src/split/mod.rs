//! Share-split reconciliation for account report configuration
//!
//! Keeps three percentage fields (Total %, Company %, My-Own %) mutually
//! consistent while one of them is being edited. Modeled as a pure reducer:
//! the host feeds `SplitInput`s and re-renders from the returned state, so
//! a programmatic field update can never re-trigger itself.

use thiserror::Error;

use crate::api::types::ReportConfig;

/// Tolerance for all sum comparisons. Comparisons always use unrounded
/// values; `round2` is for presentation only.
pub const EPSILON: f64 = 0.01;

/// Which field the user is currently editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    Total,
    Company,
    MyOwn,
}

/// Reducer inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitInput {
    FocusChanged(Focus),
    TotalChanged(f64),
    CompanyChanged(f64),
    MyOwnChanged(f64),
}

/// Current values of the three fields plus edit focus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitState {
    pub total: f64,
    pub company: f64,
    pub my_own: f64,
    pub focus: Focus,
}

/// Validity of the current split, recomputed after every input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validity {
    /// Total is (effectively) zero; nothing to reconcile
    ZeroTotal,
    Valid,
    Invalid { difference: f64 },
}

/// Display tone for the validity line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Success,
    Error,
}

impl Validity {
    pub fn message(&self) -> String {
        match self {
            Validity::ZeroTotal => "Total %: 0".to_string(),
            Validity::Valid => "Valid".to_string(),
            Validity::Invalid { difference } => {
                format!("Invalid: Company % + My-Own % is off by {:.2}", difference)
            }
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Validity::ZeroTotal => Tone::Neutral,
            Validity::Valid => Tone::Success,
            Validity::Invalid { .. } => Tone::Error,
        }
    }
}

/// Rejections raised by the submit gate. No network call happens on Err.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SubmitError {
    #[error("Total % must be between 0 and 100, got {0}")]
    TotalOutOfRange(f64),

    #[error("Company % + My-Own % differs from Total % by {difference:.2}")]
    SplitMismatch { difference: f64 },
}

/// Clamp a percentage to [0, 100]
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Round to 2 decimal places for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl SplitState {
    pub fn new(total: f64, company: f64, my_own: f64) -> Self {
        Self {
            total,
            company,
            my_own,
            focus: Focus::None,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            config.my_total_percentage,
            config.friend_percentage,
            config.my_own_percentage,
        )
    }

    fn sum_difference(&self) -> f64 {
        self.company + self.my_own - self.total
    }

    /// Pure transition function
    pub fn apply(self, input: SplitInput) -> SplitState {
        match input {
            SplitInput::FocusChanged(focus) => Self { focus, ..self },

            SplitInput::TotalChanged(total) => {
                let (company, my_own) = if total <= 0.0 {
                    (0.0, 0.0)
                } else if self.focus == Focus::Company
                    && self.company != 0.0
                    && self.company <= total
                {
                    // The user is mid-edit on Company: derive the other side
                    (self.company, total - self.company)
                } else if self.focus == Focus::MyOwn
                    && self.my_own != 0.0
                    && self.my_own <= total
                {
                    (total - self.my_own, self.my_own)
                } else if (self.company + self.my_own - total).abs() < EPSILON
                    && self.company != 0.0
                    && self.my_own != 0.0
                {
                    // Already consistent with the new total
                    (self.company, self.my_own)
                } else {
                    (0.0, total)
                };

                Self {
                    total,
                    company,
                    my_own,
                    ..self
                }
            }

            SplitInput::CompanyChanged(company) => {
                // Programmatic updates cascade; a focused edit stands alone
                let my_own = if self.focus != Focus::Company {
                    clamp_percent(self.total - company)
                } else {
                    self.my_own
                };
                Self {
                    company,
                    my_own,
                    ..self
                }
            }

            SplitInput::MyOwnChanged(my_own) => {
                let company = if self.focus != Focus::MyOwn {
                    clamp_percent(self.total - my_own)
                } else {
                    self.company
                };
                Self {
                    my_own,
                    company,
                    ..self
                }
            }
        }
    }

    pub fn validity(&self) -> Validity {
        if self.total.abs() < EPSILON {
            Validity::ZeroTotal
        } else if self.sum_difference().abs() < EPSILON {
            Validity::Valid
        } else {
            Validity::Invalid {
                difference: self.sum_difference().abs(),
            }
        }
    }

    /// Authoritative validation before any update is pushed to the server.
    /// Mid-edit clamping is only a nicety; this gate decides.
    pub fn check_submit(&self) -> Result<(), SubmitError> {
        if !(0.0..=100.0).contains(&self.total) {
            return Err(SubmitError::TotalOutOfRange(self.total));
        }
        if self.total > 0.0 && self.sum_difference().abs() >= EPSILON {
            return Err(SubmitError::SplitMismatch {
                difference: self.sum_difference().abs(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfocused(total: f64, company: f64, my_own: f64) -> SplitState {
        SplitState::new(total, company, my_own)
    }

    #[test]
    fn test_total_zero_resets_subshares() {
        let state = unfocused(100.0, 40.0, 60.0).apply(SplitInput::TotalChanged(0.0));
        assert_eq!(state.company, 0.0);
        assert_eq!(state.my_own, 0.0);
        assert_eq!(state.validity(), Validity::ZeroTotal);
        assert_eq!(state.validity().tone(), Tone::Neutral);
        assert_eq!(state.validity().message(), "Total %: 0");
    }

    #[test]
    fn test_negative_total_resets_subshares() {
        let state = unfocused(100.0, 40.0, 60.0).apply(SplitInput::TotalChanged(-5.0));
        assert_eq!(state.company, 0.0);
        assert_eq!(state.my_own, 0.0);
    }

    #[test]
    fn test_total_change_with_company_focused_derives_my_own() {
        let state = unfocused(0.0, 30.0, 0.0)
            .apply(SplitInput::FocusChanged(Focus::Company))
            .apply(SplitInput::TotalChanged(80.0));
        assert_eq!(state.company, 30.0);
        assert_eq!(state.my_own, 50.0);
    }

    #[test]
    fn test_total_change_with_my_own_focused_derives_company() {
        let state = unfocused(0.0, 0.0, 25.0)
            .apply(SplitInput::FocusChanged(Focus::MyOwn))
            .apply(SplitInput::TotalChanged(60.0));
        assert_eq!(state.company, 35.0);
        assert_eq!(state.my_own, 25.0);
    }

    #[test]
    fn test_total_change_keeps_consistent_pair() {
        // 40 + 60 already equals the new total, both non-zero: keep them
        let state = unfocused(50.0, 40.0, 60.0).apply(SplitInput::TotalChanged(100.0));
        assert_eq!(state.company, 40.0);
        assert_eq!(state.my_own, 60.0);
        assert_eq!(state.validity(), Validity::Valid);
    }

    #[test]
    fn test_total_change_default_assigns_everything_to_my_own() {
        let state = unfocused(0.0, 0.0, 0.0).apply(SplitInput::TotalChanged(75.0));
        assert_eq!(state.company, 0.0);
        assert_eq!(state.my_own, 75.0);
        assert_eq!(state.validity(), Validity::Valid);
    }

    #[test]
    fn test_total_change_with_focused_field_exceeding_total_falls_through() {
        // Company focused but larger than the new total: default case applies
        let state = unfocused(100.0, 90.0, 10.0)
            .apply(SplitInput::FocusChanged(Focus::Company))
            .apply(SplitInput::TotalChanged(50.0));
        assert_eq!(state.company, 0.0);
        assert_eq!(state.my_own, 50.0);
    }

    #[test]
    fn test_programmatic_company_change_derives_my_own() {
        let state = unfocused(100.0, 0.0, 0.0).apply(SplitInput::CompanyChanged(30.0));
        assert_eq!(state.my_own, 70.0);
        assert_eq!(state.validity(), Validity::Valid);
    }

    #[test]
    fn test_programmatic_my_own_change_derives_company() {
        let state = unfocused(100.0, 0.0, 0.0).apply(SplitInput::MyOwnChanged(45.0));
        assert_eq!(state.company, 55.0);
    }

    #[test]
    fn test_derived_field_is_clamped() {
        let state = unfocused(40.0, 0.0, 0.0).apply(SplitInput::CompanyChanged(90.0));
        // 40 - 90 clamps to 0
        assert_eq!(state.my_own, 0.0);
    }

    #[test]
    fn test_focused_company_edit_does_not_cascade() {
        let state = unfocused(100.0, 0.0, 60.0)
            .apply(SplitInput::FocusChanged(Focus::Company))
            .apply(SplitInput::CompanyChanged(30.0));
        assert_eq!(state.my_own, 60.0);
        assert_eq!(
            state.validity(),
            Validity::Invalid { difference: 10.0 }
        );
        assert_eq!(state.validity().tone(), Tone::Error);
    }

    #[test]
    fn test_focused_my_own_edit_does_not_cascade() {
        let state = unfocused(100.0, 40.0, 0.0)
            .apply(SplitInput::FocusChanged(Focus::MyOwn))
            .apply(SplitInput::MyOwnChanged(20.0));
        assert_eq!(state.company, 40.0);
    }

    #[test]
    fn test_unfocused_sequences_reconcile() {
        // Any programmatic edit sequence leaves the invariant intact
        let state = unfocused(0.0, 0.0, 0.0)
            .apply(SplitInput::TotalChanged(100.0))
            .apply(SplitInput::CompanyChanged(12.5))
            .apply(SplitInput::MyOwnChanged(40.0))
            .apply(SplitInput::CompanyChanged(33.0));
        assert!((state.company + state.my_own - state.total).abs() < EPSILON);
    }

    #[test]
    fn test_submit_rejects_total_out_of_range() {
        let err = unfocused(150.0, 100.0, 50.0).check_submit().unwrap_err();
        assert_eq!(err, SubmitError::TotalOutOfRange(150.0));

        let err = unfocused(-1.0, 0.0, 0.0).check_submit().unwrap_err();
        assert_eq!(err, SubmitError::TotalOutOfRange(-1.0));
    }

    #[test]
    fn test_submit_rejects_mismatched_split() {
        let err = unfocused(100.0, 30.0, 50.0).check_submit().unwrap_err();
        assert_eq!(err, SubmitError::SplitMismatch { difference: 20.0 });
    }

    #[test]
    fn test_submit_accepts_matching_split() {
        assert!(unfocused(100.0, 40.0, 60.0).check_submit().is_ok());
    }

    #[test]
    fn test_submit_accepts_zero_total() {
        assert!(unfocused(0.0, 0.0, 0.0).check_submit().is_ok());
    }

    #[test]
    fn test_submit_tolerates_epsilon_noise() {
        assert!(unfocused(100.0, 40.005, 59.999).check_submit().is_ok());
    }

    #[test]
    fn test_round2_presentation_only() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);

        // Comparisons stay on unrounded values
        let state = unfocused(100.0, 33.333333, 66.666667);
        assert_eq!(state.validity(), Validity::Valid);
    }

    #[test]
    fn test_from_config() {
        let config = ReportConfig {
            friend_percentage: 40.0,
            my_own_percentage: 60.0,
            my_total_percentage: 100.0,
        };
        let state = SplitState::from_config(&config);
        assert_eq!(state.total, 100.0);
        assert_eq!(state.company, 40.0);
        assert_eq!(state.my_own, 60.0);
        assert_eq!(state.focus, Focus::None);
    }
}
