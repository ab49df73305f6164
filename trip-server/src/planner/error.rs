//! Reasons a branch of the search is dropped.

use std::fmt;

use crate::pricing::PricingError;

/// Why one combination/distribution branch produced no itinerary.
///
/// None of these end a run; they are counted and the run moves on.
#[derive(Debug, thiserror::Error)]
pub enum BranchRejection {
    /// The trip is too short to give every city its minimum stay.
    #[error("not enough days for the minimum stay in every city")]
    InfeasibleDays,

    /// The provider could not price every leg.
    #[error("provider priced {returned} of {requested} legs")]
    ProviderShortfall { requested: usize, returned: usize },

    /// The provider priced a leg other than the one requested.
    #[error("priced leg {index} does not match the requested route")]
    LegMismatch { index: usize },

    /// The assembled trip costs more than the search allows.
    #[error("total {total:.2} exceeds budget {budget:.2}")]
    BudgetExceeded { total: f64, budget: f64 },

    /// The pricing call failed or timed out.
    #[error("pricing failed: {0}")]
    Provider(#[from] PricingError),

    /// Anything else that went wrong assembling this branch.
    #[error("internal fault: {0}")]
    Fault(String),
}

impl BranchRejection {
    /// The rejection category, for statistics.
    pub fn kind(&self) -> RejectionKind {
        match self {
            BranchRejection::InfeasibleDays => RejectionKind::InfeasibleDays,
            BranchRejection::ProviderShortfall { .. } | BranchRejection::LegMismatch { .. } => {
                RejectionKind::ProviderShortfall
            }
            BranchRejection::BudgetExceeded { .. } => RejectionKind::BudgetExceeded,
            BranchRejection::Provider(_) => RejectionKind::ProviderError,
            BranchRejection::Fault(_) => RejectionKind::Fault,
        }
    }
}

/// Rejection categories counted in run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectionKind {
    InfeasibleDays,
    ProviderShortfall,
    BudgetExceeded,
    ProviderError,
    Fault,
}

impl RejectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionKind::InfeasibleDays => "infeasible_days",
            RejectionKind::ProviderShortfall => "provider_shortfall",
            RejectionKind::BudgetExceeded => "budget_exceeded",
            RejectionKind::ProviderError => "provider_error",
            RejectionKind::Fault => "fault",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
