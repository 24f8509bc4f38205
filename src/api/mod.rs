use axum::{
    Router,
    extract::{Json, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    Dependents, LOCKED_INFLATION_RATE, PlanInputs, PlanResult, RiskProfile, compute_plan,
    format_currency, whatif_retirement_age, whatif_table,
};

/// Boundary validation failures. The calculator itself is total; nonsensical
/// timelines and malformed amounts are rejected here before it runs.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
    #[error("{field} must be >= 0")]
    NegativeAmount { field: &'static str },
    #[error("retirement age ({retirement_age}) must be greater than current age ({current_age})")]
    RetirementTooEarly { retirement_age: u32, current_age: u32 },
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("no base plan computed yet; submit inputs to /api/plan first")]
    NoBasePlan,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<CliRiskProfile> for RiskProfile {
    fn from(value: CliRiskProfile) -> Self {
        match value {
            CliRiskProfile::Conservative => RiskProfile::Conservative,
            CliRiskProfile::Moderate => RiskProfile::Moderate,
            CliRiskProfile::Aggressive => RiskProfile::Aggressive,
        }
    }
}

impl From<RiskProfile> for CliRiskProfile {
    fn from(value: RiskProfile) -> Self {
        match value {
            RiskProfile::Conservative => CliRiskProfile::Conservative,
            RiskProfile::Moderate => CliRiskProfile::Moderate,
            RiskProfile::Aggressive => CliRiskProfile::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliDependents {
    SelfSpouse,
    Children,
    Parents,
    Combination,
    NotSure,
}

impl From<CliDependents> for Dependents {
    fn from(value: CliDependents) -> Self {
        match value {
            CliDependents::SelfSpouse => Dependents::SelfSpouse,
            CliDependents::Children => Dependents::Children,
            CliDependents::Parents => Dependents::Parents,
            CliDependents::Combination => Dependents::Combination,
            CliDependents::NotSure => Dependents::NotSure,
        }
    }
}

impl From<Dependents> for CliDependents {
    fn from(value: Dependents) -> Self {
        match value {
            Dependents::SelfSpouse => CliDependents::SelfSpouse,
            Dependents::Children => CliDependents::Children,
            Dependents::Parents => CliDependents::Parents,
            Dependents::Combination => CliDependents::Combination,
            Dependents::NotSure => CliDependents::NotSure,
        }
    }
}

/// JSON payload in the shape the conversational data-collection agent emits.
/// Every field is optional; missing fields are default-substituted by the
/// documented policy in `default_cli_for_api`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    life_expectancy: Option<u32>,
    current_annual_expenses: Option<f64>,
    current_investments: Option<f64>,
    current_annual_income: Option<f64>,
    risk_profile: Option<String>,
    dependents: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "goalplan",
    about = "Deterministic retirement plan calculator (growing-annuity corpus + FV-based SIP)"
)]
struct Cli {
    #[arg(long)]
    current_age: u32,
    #[arg(long, help = "Target retirement age; must exceed current age")]
    retirement_age: u32,
    #[arg(
        long,
        default_value_t = 85,
        help = "Age the savings should last until"
    )]
    life_expectancy: u32,
    #[arg(long, help = "Current living expenses per year")]
    current_annual_expenses: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Total current investment portfolio value; zero allowed"
    )]
    current_investments: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Current income per year, used for disclosure only; 0 means not provided"
    )]
    current_annual_income: f64,
    #[arg(long, value_enum, default_value_t = CliRiskProfile::Moderate)]
    risk_profile: CliRiskProfile,
    #[arg(long, value_enum, default_value_t = CliDependents::SelfSpouse)]
    dependents: CliDependents,
}

/// Session-scoped context: the base inputs and result held across what-if and
/// export requests. Created when a plan is computed, cleared on reset.
#[derive(Debug, Clone)]
pub struct PlanSession {
    pub inputs: PlanInputs,
    pub result: PlanResult,
}

type SharedSession = Arc<RwLock<Option<PlanSession>>>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanSummary {
    future_annual_expenses: String,
    corpus_required: String,
    future_investment_value: String,
    corpus_gap: String,
    monthly_savings: String,
    current_annual_income: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    result: PlanResult,
    summary: PlanSummary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WhatifPayload {
    retirement_age: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WhatifResponse {
    base_retirement_age: u32,
    base_monthly_savings_rounded: f64,
    monthly_difference: f64,
    scenario: PlanResult,
}

/// One row of the export boundary's what-if table, mirroring the columns the
/// spreadsheet serializer presents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WhatifRow {
    retirement_age: u32,
    years_to_retirement: i32,
    retirement_duration: i32,
    corpus_required: f64,
    monthly_savings_rounded: f64,
}

impl From<&PlanResult> for WhatifRow {
    fn from(result: &PlanResult) -> Self {
        WhatifRow {
            retirement_age: result.retirement_age,
            years_to_retirement: result.years_to_retirement,
            retirement_duration: result.retirement_duration,
            corpus_required: result.corpus_required,
            monthly_savings_rounded: result.monthly_savings_rounded,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WhatifTableResponse {
    base_retirement_age: u32,
    rows: Vec<WhatifRow>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliPlanOutput {
    result: PlanResult,
    whatif_table: Vec<WhatifRow>,
}

fn check_amount(value: f64, field: &'static str) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFiniteAmount { field });
    }
    if value < 0.0 {
        return Err(InputError::NegativeAmount { field });
    }
    Ok(value)
}

fn build_inputs(cli: Cli) -> Result<PlanInputs, InputError> {
    if cli.retirement_age <= cli.current_age {
        return Err(InputError::RetirementTooEarly {
            retirement_age: cli.retirement_age,
            current_age: cli.current_age,
        });
    }

    Ok(PlanInputs {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        life_expectancy: cli.life_expectancy,
        current_annual_expenses: check_amount(
            cli.current_annual_expenses,
            "currentAnnualExpenses",
        )?,
        current_investments: check_amount(cli.current_investments, "currentInvestments")?,
        current_annual_income: check_amount(cli.current_annual_income, "currentAnnualIncome")?,
        risk_profile: cli.risk_profile.into(),
        dependents: cli.dependents.into(),
        inflation_rate: LOCKED_INFLATION_RATE,
    })
}

/// Default substitution for fields the collection agent did not supply. This
/// is a documented boundary policy; the calculator never defaults anything.
fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 30,
        retirement_age: 60,
        life_expectancy: 85,
        current_annual_expenses: 600_000.0,
        current_investments: 0.0,
        current_annual_income: 0.0,
        risk_profile: CliRiskProfile::Moderate,
        dependents: CliDependents::SelfSpouse,
    }
}

fn inputs_from_payload(payload: PlanPayload) -> Result<PlanInputs, InputError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.life_expectancy {
        cli.life_expectancy = v;
    }
    if let Some(v) = payload.current_annual_expenses {
        cli.current_annual_expenses = v;
    }
    if let Some(v) = payload.current_investments {
        cli.current_investments = v;
    }
    if let Some(v) = payload.current_annual_income {
        cli.current_annual_income = v;
    }
    if let Some(v) = payload.risk_profile {
        cli.risk_profile = RiskProfile::from_label(&v).into();
    }
    if let Some(v) = payload.dependents {
        cli.dependents = Dependents::from_label(&v).into();
    }

    build_inputs(cli)
}

fn build_summary(result: &PlanResult) -> PlanSummary {
    PlanSummary {
        future_annual_expenses: format_currency(result.future_annual_expenses),
        corpus_required: format_currency(result.corpus_required),
        future_investment_value: format_currency(result.future_investment_value),
        corpus_gap: format_currency(result.corpus_gap),
        monthly_savings: format_currency(result.monthly_savings_rounded),
        current_annual_income: if result.current_annual_income > 0.0 {
            format_currency(result.current_annual_income)
        } else {
            "Not provided".to_string()
        },
    }
}

fn compute_and_store(session: &SharedSession, inputs: PlanInputs) -> PlanResult {
    let result = compute_plan(&inputs);
    debug!(
        "computed plan: retire at {} -> monthly SIP {}",
        result.retirement_age, result.monthly_savings_rounded
    );
    let mut guard = session.write().expect("session lock poisoned");
    *guard = Some(PlanSession {
        inputs,
        result: result.clone(),
    });
    result
}

fn session_snapshot(session: &SharedSession) -> Option<PlanSession> {
    session.read().expect("session lock poisoned").clone()
}

fn clear_session(session: &SharedSession) {
    let mut guard = session.write().expect("session lock poisoned");
    *guard = None;
}

fn whatif_for_session(
    session: &SharedSession,
    new_retirement_age: u32,
) -> Result<WhatifResponse, InputError> {
    let Some(base) = session_snapshot(session) else {
        return Err(InputError::NoBasePlan);
    };
    if new_retirement_age <= base.inputs.current_age {
        return Err(InputError::RetirementTooEarly {
            retirement_age: new_retirement_age,
            current_age: base.inputs.current_age,
        });
    }

    let scenario = whatif_retirement_age(&base.inputs, new_retirement_age);
    debug!(
        "what-if: retire at {} -> monthly SIP {}",
        scenario.retirement_age, scenario.monthly_savings_rounded
    );
    Ok(WhatifResponse {
        base_retirement_age: base.result.retirement_age,
        base_monthly_savings_rounded: base.result.monthly_savings_rounded,
        monthly_difference: scenario.monthly_savings_rounded
            - base.result.monthly_savings_rounded,
        scenario,
    })
}

fn whatif_table_for_session(session: &SharedSession) -> Result<WhatifTableResponse, InputError> {
    let Some(base) = session_snapshot(session) else {
        return Err(InputError::NoBasePlan);
    };
    let rows = whatif_table(&base.inputs).iter().map(WhatifRow::from).collect();
    Ok(WhatifTableResponse {
        base_retirement_age: base.result.retirement_age,
        rows,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let session: SharedSession = Arc::new(RwLock::new(None));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/plan", get(current_plan_handler).post(plan_handler))
        .route("/api/whatif", post(whatif_handler))
        .route("/api/whatif-table", get(whatif_table_handler))
        .route("/api/reset", post(reset_handler))
        .fallback(not_found_handler)
        .with_state(session);

    let listener = TcpListener::bind(addr).await?;
    info!("goalplan HTTP API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn plan_handler(
    State(session): State<SharedSession>,
    Json(payload): Json<PlanPayload>,
) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(e) => return input_error_response(e),
    };

    let result = compute_and_store(&session, inputs);
    let summary = build_summary(&result);
    json_response(StatusCode::OK, PlanResponse { result, summary })
}

async fn current_plan_handler(State(session): State<SharedSession>) -> Response {
    match session_snapshot(&session) {
        Some(base) => {
            let summary = build_summary(&base.result);
            json_response(
                StatusCode::OK,
                PlanResponse {
                    result: base.result,
                    summary,
                },
            )
        }
        None => input_error_response(InputError::NoBasePlan),
    }
}

async fn whatif_handler(
    State(session): State<SharedSession>,
    Json(payload): Json<WhatifPayload>,
) -> Response {
    let Some(age) = payload.retirement_age else {
        return input_error_response(InputError::MissingField {
            field: "retirementAge",
        });
    };
    match whatif_for_session(&session, age) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => input_error_response(e),
    }
}

async fn whatif_table_handler(State(session): State<SharedSession>) -> Response {
    match whatif_table_for_session(&session) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => input_error_response(e),
    }
}

async fn reset_handler(State(session): State<SharedSession>) -> Response {
    clear_session(&session);
    info!("session cleared");
    json_response(StatusCode::OK, serde_json::json!({ "reset": true }))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn input_error_response(error: InputError) -> Response {
    let status = match error {
        InputError::NoBasePlan => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    error_response(status, &error.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

/// One-shot CLI mode: parse the eight collected fields from flags, run the
/// pipeline once, and return the plan plus the what-if table as pretty JSON.
pub fn run_plan_command(args: &[String]) -> Result<String, String> {
    let argv = std::iter::once("goalplan plan".to_string()).chain(args.iter().cloned());
    let cli = Cli::try_parse_from(argv).map_err(|e| e.to_string())?;

    let inputs = build_inputs(cli).map_err(|e| e.to_string())?;
    let result = compute_plan(&inputs);
    let whatif_rows = whatif_table(&inputs).iter().map(WhatifRow::from).collect();

    serde_json::to_string_pretty(&CliPlanOutput {
        result,
        whatif_table: whatif_rows,
    })
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn payload_from_json(json: &str) -> PlanPayload {
        serde_json::from_str(json).expect("payload should parse")
    }

    fn sample_payload() -> PlanPayload {
        payload_from_json(
            r#"{
              "currentAge": 35,
              "retirementAge": 60,
              "lifeExpectancy": 85,
              "currentAnnualExpenses": 600000,
              "currentInvestments": 500000,
              "currentAnnualIncome": 1200000,
              "riskProfile": "moderate",
              "dependents": "self_spouse"
            }"#,
        )
    }

    fn fresh_session() -> SharedSession {
        Arc::new(RwLock::new(None))
    }

    #[test]
    fn inputs_from_payload_parses_collected_fields() {
        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");

        assert_eq!(inputs.current_age, 35);
        assert_eq!(inputs.retirement_age, 60);
        assert_eq!(inputs.life_expectancy, 85);
        assert_approx(inputs.current_annual_expenses, 600_000.0);
        assert_approx(inputs.current_investments, 500_000.0);
        assert_approx(inputs.current_annual_income, 1_200_000.0);
        assert_eq!(inputs.risk_profile, RiskProfile::Moderate);
        assert_eq!(inputs.dependents, Dependents::SelfSpouse);
        assert_approx(inputs.inflation_rate, LOCKED_INFLATION_RATE);
    }

    #[test]
    fn inputs_from_payload_applies_documented_defaults() {
        let inputs = inputs_from_payload(payload_from_json("{}")).expect("defaults are valid");

        assert_eq!(inputs.current_age, 30);
        assert_eq!(inputs.retirement_age, 60);
        assert_eq!(inputs.life_expectancy, 85);
        assert_approx(inputs.current_annual_expenses, 600_000.0);
        assert_approx(inputs.current_investments, 0.0);
        assert_approx(inputs.current_annual_income, 0.0);
        assert_eq!(inputs.risk_profile, RiskProfile::Moderate);
        assert_eq!(inputs.dependents, Dependents::SelfSpouse);
    }

    #[test]
    fn inputs_from_payload_resolves_free_form_labels() {
        let inputs = inputs_from_payload(payload_from_json(
            r#"{ "riskProfile": "Balanced", "dependents": "PARENTS" }"#,
        ))
        .expect("valid inputs");
        assert_eq!(inputs.risk_profile, RiskProfile::Moderate);
        assert_eq!(inputs.dependents, Dependents::Parents);

        let inputs = inputs_from_payload(payload_from_json(
            r#"{ "riskProfile": "yolo", "dependents": "roommates" }"#,
        ))
        .expect("fallbacks are not errors");
        assert_eq!(inputs.risk_profile, RiskProfile::Moderate);
        assert_eq!(inputs.dependents, Dependents::NotSure);
    }

    #[test]
    fn inputs_from_payload_rejects_retirement_not_after_current_age() {
        let err = inputs_from_payload(payload_from_json(
            r#"{ "currentAge": 60, "retirementAge": 60 }"#,
        ))
        .expect_err("must reject degenerate timeline");
        assert_eq!(
            err,
            InputError::RetirementTooEarly {
                retirement_age: 60,
                current_age: 60
            }
        );
    }

    #[test]
    fn inputs_from_payload_rejects_negative_amounts() {
        let err = inputs_from_payload(payload_from_json(
            r#"{ "currentAnnualExpenses": -100 }"#,
        ))
        .expect_err("must reject negative expenses");
        assert_eq!(
            err,
            InputError::NegativeAmount {
                field: "currentAnnualExpenses"
            }
        );

        let err = inputs_from_payload(payload_from_json(
            r#"{ "currentInvestments": -1 }"#,
        ))
        .expect_err("must reject negative investments");
        assert_eq!(
            err,
            InputError::NegativeAmount {
                field: "currentInvestments"
            }
        );
    }

    #[test]
    fn build_inputs_rejects_non_finite_amounts() {
        let mut cli = default_cli_for_api();
        cli.current_annual_income = f64::NAN;
        let err = build_inputs(cli).expect_err("must reject NaN income");
        assert_eq!(
            err,
            InputError::NonFiniteAmount {
                field: "currentAnnualIncome"
            }
        );
    }

    #[test]
    fn session_stores_base_plan_and_serves_whatif() {
        let session = fresh_session();
        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");
        let base = compute_and_store(&session, inputs);

        let whatif = whatif_for_session(&session, 58).expect("whatif should compute");
        assert_eq!(whatif.base_retirement_age, 60);
        assert_approx(
            whatif.base_monthly_savings_rounded,
            base.monthly_savings_rounded,
        );
        assert_eq!(whatif.scenario.retirement_age, 58);
        assert_approx(
            whatif.monthly_difference,
            whatif.scenario.monthly_savings_rounded - base.monthly_savings_rounded,
        );

        // Earlier retirement means less time to accumulate.
        assert!(whatif.scenario.monthly_savings_rounded >= base.monthly_savings_rounded);
    }

    #[test]
    fn whatif_with_base_age_reproduces_base_numbers() {
        let session = fresh_session();
        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");
        let base = compute_and_store(&session, inputs);

        let whatif = whatif_for_session(&session, 60).expect("same-age whatif is allowed");
        assert_approx(whatif.monthly_difference, 0.0);
        assert_approx(whatif.scenario.corpus_required, base.corpus_required);
    }

    #[test]
    fn whatif_rejects_ages_at_or_below_current_age() {
        let session = fresh_session();
        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");
        compute_and_store(&session, inputs);

        let err = whatif_for_session(&session, 35).expect_err("must reject age == current");
        assert_eq!(
            err,
            InputError::RetirementTooEarly {
                retirement_age: 35,
                current_age: 35
            }
        );
    }

    #[test]
    fn whatif_without_base_plan_is_a_distinct_error() {
        let session = fresh_session();
        assert_eq!(
            whatif_for_session(&session, 58).expect_err("no session yet"),
            InputError::NoBasePlan
        );
        assert_eq!(
            whatif_table_for_session(&session).expect_err("no session yet"),
            InputError::NoBasePlan
        );
    }

    #[test]
    fn reset_clears_the_session() {
        let session = fresh_session();
        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");
        compute_and_store(&session, inputs);
        assert!(session_snapshot(&session).is_some());

        clear_session(&session);
        assert!(session_snapshot(&session).is_none());
        assert_eq!(
            whatif_for_session(&session, 58).expect_err("cleared"),
            InputError::NoBasePlan
        );
    }

    #[test]
    fn whatif_table_rows_match_independent_recomputation() {
        let session = fresh_session();
        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");
        compute_and_store(&session, inputs);

        let table = whatif_table_for_session(&session).expect("table should compute");
        assert_eq!(table.base_retirement_age, 60);
        let ages: Vec<u32> = table.rows.iter().map(|r| r.retirement_age).collect();
        assert_eq!(ages, vec![55, 58, 60, 62, 65]);

        for row in &table.rows {
            let scenario = whatif_retirement_age(&inputs, row.retirement_age);
            assert_eq!(row.years_to_retirement, scenario.years_to_retirement);
            assert_eq!(row.retirement_duration, scenario.retirement_duration);
            assert_approx(row.corpus_required, scenario.corpus_required);
            assert_approx(row.monthly_savings_rounded, scenario.monthly_savings_rounded);
        }
    }

    #[test]
    fn whatif_table_filters_candidate_ages_for_older_users() {
        let session = fresh_session();
        let inputs = inputs_from_payload(payload_from_json(
            r#"{ "currentAge": 59, "retirementAge": 62 }"#,
        ))
        .expect("valid inputs");
        compute_and_store(&session, inputs);

        let table = whatif_table_for_session(&session).expect("table should compute");
        let ages: Vec<u32> = table.rows.iter().map(|r| r.retirement_age).collect();
        assert_eq!(ages, vec![60, 62, 65]);
    }

    #[test]
    fn plan_response_serializes_camel_case_fields() {
        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");
        let result = compute_plan(&inputs);
        let summary = build_summary(&result);
        let json = serde_json::to_string(&PlanResponse { result, summary })
            .expect("response should serialize");

        assert!(json.contains("\"yearsToRetirement\":25"));
        assert!(json.contains("\"retirementDuration\":25"));
        assert!(json.contains("\"monthlySavingsRounded\""));
        assert!(json.contains("\"incomeExpenseFlag\":false"));
        assert!(json.contains("\"riskProfile\":\"moderate\""));
        assert!(json.contains("\"dependents\":\"self_spouse\""));
        assert!(json.contains("\"assumptions\""));
        assert!(json.contains("\"corpusGap\""));
    }

    #[test]
    fn summary_marks_missing_income_as_not_provided() {
        let inputs = inputs_from_payload(payload_from_json("{}")).expect("valid inputs");
        let result = compute_plan(&inputs);
        let summary = build_summary(&result);
        assert_eq!(summary.current_annual_income, "Not provided");

        let inputs = inputs_from_payload(sample_payload()).expect("valid inputs");
        let summary = build_summary(&compute_plan(&inputs));
        assert_ne!(summary.current_annual_income, "Not provided");
    }

    #[test]
    fn run_plan_command_emits_result_and_whatif_table() {
        let args: Vec<String> = [
            "--current-age",
            "35",
            "--retirement-age",
            "60",
            "--current-annual-expenses",
            "600000",
            "--current-investments",
            "500000",
            "--current-annual-income",
            "1200000",
            "--risk-profile",
            "moderate",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let json = run_plan_command(&args).expect("command should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["result"]["yearsToRetirement"], 25);
        assert_eq!(value["whatifTable"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn run_plan_command_surfaces_validation_errors() {
        let args: Vec<String> = [
            "--current-age",
            "62",
            "--retirement-age",
            "60",
            "--current-annual-expenses",
            "600000",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let err = run_plan_command(&args).expect_err("must reject timeline");
        assert!(err.contains("retirement age"));
    }
}
