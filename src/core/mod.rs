mod engine;
mod format;
mod types;

pub use engine::{
    compute_plan, future_value, monthly_sip, required_corpus, round_to_clean_figure,
    whatif_retirement_age, whatif_table,
};
pub use format::format_currency;
pub use types::{
    DEFAULT_LIFE_EXPECTANCY, Dependents, LOCKED_INFLATION_RATE, PlanInputs, PlanResult,
    RiskProfile, WHATIF_RETIREMENT_AGES,
};
