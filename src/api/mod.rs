//! JSON request handling behind the HTTP function
//!
//! Kept free of any runtime so it can be exercised directly in tests.

use crate::input::{InputError, SimulationInput};
use crate::projection::{project, Summary, YearResult};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub input: SimulationInput,
    pub years: Vec<YearResult>,
    pub summary: Option<Summary>,
}

/// Status code and JSON body ready to be sent back
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn error(status: u16, message: &str, field: Option<&str>) -> Self {
        let body = match field {
            Some(field) => json!({ "error": message, "field": field }),
            None => json!({ "error": message }),
        };
        Self {
            status,
            body: body.to_string(),
        }
    }
}

fn input_error_response(err: &InputError) -> ApiResponse {
    ApiResponse::error(422, &err.to_string(), Some(err.field().label()))
}

/// Handle a JSON encoded `SimulationInput`
pub fn handle_simulation(body: &str) -> ApiResponse {
    let input: SimulationInput = match serde_json::from_str(body) {
        Ok(input) => input,
        Err(e) => return ApiResponse::error(400, &format!("invalid request body: {e}"), None),
    };

    let projection = match project(&input) {
        Ok(projection) => projection,
        Err(e) => return input_error_response(&e),
    };

    let summary = projection.summary();
    let response = SimulationResponse {
        input: projection.input,
        years: projection.years,
        summary,
    };
    match serde_json::to_string(&response) {
        Ok(body) => ApiResponse { status: 200, body },
        Err(e) => {
            log::error!("failed to serialize simulation response: {e}");
            ApiResponse::error(500, "internal error", None)
        }
    }
}
