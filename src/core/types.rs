use serde::Serialize;

/// Inflation applied to living expenses, locked for every plan.
pub const LOCKED_INFLATION_RATE: f64 = 0.06;

/// Fallback when the user does not know how long savings should last.
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 85;

/// Candidate retirement ages evaluated for the export what-if table.
pub const WHATIF_RETIREMENT_AGES: [u32; 5] = [55, 58, 60, 62, 65];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// Resolves a free-form label case-insensitively. "balanced" is accepted
    /// as a synonym for moderate; any unrecognized label falls back to
    /// moderate. Safe-default policy, not an error condition.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "conservative" => RiskProfile::Conservative,
            "aggressive" => RiskProfile::Aggressive,
            _ => RiskProfile::Moderate,
        }
    }

    /// Assumed annual nominal return for this profile, applied both pre- and
    /// post-retirement.
    pub fn expected_return(self) -> f64 {
        match self {
            RiskProfile::Conservative => 0.08,
            RiskProfile::Moderate => 0.12,
            RiskProfile::Aggressive => 0.15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Moderate => "moderate",
            RiskProfile::Aggressive => "aggressive",
        }
    }
}

/// Who the retirement savings will support. Descriptive only; never used in
/// the arithmetic.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependents {
    SelfSpouse,
    Children,
    Parents,
    Combination,
    NotSure,
}

impl Dependents {
    /// Unrecognized labels resolve to NotSure rather than failing.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "self_spouse" => Dependents::SelfSpouse,
            "children" => Dependents::Children,
            "parents" => Dependents::Parents,
            "combination" => Dependents::Combination,
            _ => Dependents::NotSure,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dependents::SelfSpouse => "self_spouse",
            Dependents::Children => "children",
            Dependents::Parents => "parents",
            Dependents::NotSure => "not_sure",
            Dependents::Combination => "combination",
        }
    }
}

/// Validated inputs for one plan. Built once per session by the boundary in
/// `crate::api`, or cloned with a replacement retirement age for a what-if.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_annual_expenses: f64,
    pub current_investments: f64,
    pub current_annual_income: f64,
    pub risk_profile: RiskProfile,
    pub dependents: Dependents,
    pub inflation_rate: f64,
}

/// Fully derived plan. Never mutated after creation; a new retirement age
/// assumption produces a new, independent PlanResult.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub years_to_retirement: i32,
    pub retirement_duration: i32,

    pub current_annual_expenses: f64,
    pub future_annual_expenses: f64,
    pub corpus_required: f64,
    pub future_investment_value: f64,
    pub corpus_gap: f64,
    pub monthly_savings_required: f64,
    pub monthly_savings_rounded: f64,

    pub expected_return_rate: f64,
    pub inflation_rate: f64,
    pub risk_profile: RiskProfile,

    pub current_annual_income: f64,
    pub dependents: Dependents,
    pub income_expense_flag: bool,

    pub assumptions: Vec<String>,
}
