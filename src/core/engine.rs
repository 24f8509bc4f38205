use super::types::{PlanInputs, PlanResult, WHATIF_RETIREMENT_AGES};

/// Below this spread the growing-annuity denominator is treated as zero and
/// the limit form is used instead.
const RATE_EQUALITY_EPS: f64 = 0.0001;

/// Contributions above this round to the nearest 1000 instead of 500.
const LARGE_ROUNDING_THRESHOLD: f64 = 50_000.0;

/// Compound growth over whole years. A non-positive horizon applies no growth.
pub fn future_value(present_value: f64, rate: f64, years: i32) -> f64 {
    if years <= 0 {
        return present_value;
    }
    present_value * (1.0 + rate).powi(years)
}

/// Corpus needed at the retirement date to fund `retirement_duration` years of
/// expenses that start at `annual_expense_at_retirement` and grow with
/// inflation, while the remaining corpus earns the risk-profile return.
///
/// Present value of a growing annuity, discounted at the same return rate used
/// during accumulation. The near-equality branch exists for numerical
/// stability; the formula has a well-defined limit at r == g.
pub fn required_corpus(
    annual_expense_at_retirement: f64,
    return_rate: f64,
    inflation_rate: f64,
    retirement_duration: i32,
) -> f64 {
    if retirement_duration <= 0 {
        return 0.0;
    }

    let g = inflation_rate;
    let r = return_rate;
    let n = retirement_duration;
    let pmt = annual_expense_at_retirement;

    let corpus = if (r - g).abs() < RATE_EQUALITY_EPS {
        pmt * f64::from(n) / (1.0 + r)
    } else {
        pmt * (1.0 - ((1.0 + g) / (1.0 + r)).powi(n)) / (r - g)
    };

    corpus.max(0.0)
}

/// Constant monthly contribution whose future value, compounded at the annual
/// rate, reaches `target_future_value` after `years`. No step-ups.
pub fn monthly_sip(target_future_value: f64, annual_rate: f64, years: i32) -> f64 {
    if years <= 0 || target_future_value <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 12.0;
    let months = years * 12;

    if monthly_rate == 0.0 {
        return target_future_value / f64::from(months);
    }

    target_future_value * monthly_rate / ((1.0 + monthly_rate).powi(months) - 1.0)
}

/// Rounds a contribution to a human-readable figure: nearest 500, or nearest
/// 1000 above 50 000. Display policy only; the exact value is kept alongside.
pub fn round_to_clean_figure(amount: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }

    let unit = if amount > LARGE_ROUNDING_THRESHOLD {
        1_000.0
    } else {
        500.0
    };
    (amount / unit).round() * unit
}

fn build_assumptions(inputs: &PlanInputs, expected_return: f64) -> Vec<String> {
    vec![
        format!(
            "Inflation rate: {:.0}% per annum (locked)",
            inputs.inflation_rate * 100.0
        ),
        format!(
            "Expected investment return: {:.0}% per annum ({} profile)",
            expected_return * 100.0,
            inputs.risk_profile.label()
        ),
        format!("Life expectancy: {} years", inputs.life_expectancy),
        format!(
            "Same return rate ({:.0}%) applied pre- and post-retirement",
            expected_return * 100.0
        ),
        "Constant monthly SIP (no step-ups)".to_string(),
        "No tax implications considered".to_string(),
        "No product or fund recommendations included".to_string(),
        "Figures are planning-level estimates, not precise forecasts".to_string(),
    ]
}

/// Runs the full plan pipeline. Total over its input domain: degenerate
/// timelines yield zero corpus and zero contribution rather than errors.
pub fn compute_plan(inputs: &PlanInputs) -> PlanResult {
    let years_to_retirement = inputs.retirement_age as i32 - inputs.current_age as i32;
    let retirement_duration = inputs.life_expectancy as i32 - inputs.retirement_age as i32;

    let expected_return = inputs.risk_profile.expected_return();

    let future_annual_expenses = future_value(
        inputs.current_annual_expenses,
        inputs.inflation_rate,
        years_to_retirement,
    );

    let corpus_required = required_corpus(
        future_annual_expenses,
        expected_return,
        inputs.inflation_rate,
        retirement_duration,
    );

    let future_investment_value = future_value(
        inputs.current_investments,
        expected_return,
        years_to_retirement,
    );

    let corpus_gap = (corpus_required - future_investment_value).max(0.0);

    let monthly_savings_required = monthly_sip(corpus_gap, expected_return, years_to_retirement);
    let monthly_savings_rounded = round_to_clean_figure(monthly_savings_required);

    // Advisory disclosure only; the pipeline never recomputes on this flag.
    let income_expense_flag = inputs.current_annual_income > 0.0
        && inputs.current_annual_expenses > inputs.current_annual_income;

    PlanResult {
        current_age: inputs.current_age,
        retirement_age: inputs.retirement_age,
        life_expectancy: inputs.life_expectancy,
        years_to_retirement,
        retirement_duration,
        current_annual_expenses: inputs.current_annual_expenses,
        future_annual_expenses,
        corpus_required,
        future_investment_value,
        corpus_gap,
        monthly_savings_required,
        monthly_savings_rounded,
        expected_return_rate: expected_return,
        inflation_rate: inputs.inflation_rate,
        risk_profile: inputs.risk_profile,
        current_annual_income: inputs.current_annual_income,
        dependents: inputs.dependents,
        income_expense_flag,
        assumptions: build_assumptions(inputs, expected_return),
    }
}

/// Recomputes the plan with a different retirement age and nothing else
/// changed. Base and variant share no state and may run in any order.
pub fn whatif_retirement_age(base_inputs: &PlanInputs, new_retirement_age: u32) -> PlanResult {
    let whatif_inputs = PlanInputs {
        retirement_age: new_retirement_age,
        ..*base_inputs
    };
    compute_plan(&whatif_inputs)
}

/// Batch of what-if plans over the fixed candidate ages, filtered to ages
/// greater than the current age. Feeds the spreadsheet-export boundary.
pub fn whatif_table(base_inputs: &PlanInputs) -> Vec<PlanResult> {
    WHATIF_RETIREMENT_AGES
        .iter()
        .filter(|&&age| age > base_inputs.current_age)
        .map(|&age| whatif_retirement_age(base_inputs, age))
        .collect()
}
