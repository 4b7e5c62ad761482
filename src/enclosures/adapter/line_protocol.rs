//! Text front end for the evaluator: one `SPECIES COUNT` request per line, one JSON object per
//! response.

use log::debug;
use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;

use crate::enclosures::domain::{EvaluationError, Evaluator, ViableEnclosure};

lazy_static::lazy_static! {
    static ref REQUEST: Regex = Regex::new(r"^\s*(\S+)\s+([+-]?\d+)\s*$").unwrap();
}

const MALFORMED_REQUEST: &str = "Requisição inválida";

#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub species: String,
    pub count: i64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestLineError {
    #[error("expected `SPECIES COUNT`, got {0:?}")]
    Malformed(String),

    #[error("count {0} does not fit in 64 bits")]
    CountOutOfRange(String),
}

impl Request {
    pub fn parse(line: &str) -> Result<Self, RequestLineError> {
        let capt = REQUEST
            .captures(line)
            .ok_or_else(|| RequestLineError::Malformed(line.to_string()))?;

        let count = capt[2]
            .parse()
            .map_err(|_| RequestLineError::CountOutOfRange(capt[2].to_string()))?;

        Ok(Request {
            species: capt[1].to_string(),
            count,
        })
    }
}

pub fn to_json(result: &Result<Vec<ViableEnclosure>, EvaluationError>) -> Value {
    match result {
        Ok(viable) => {
            let descriptors: Vec<String> = viable.iter().map(ToString::to_string).collect();
            json!({ "recintosViaveis": descriptors })
        }
        Err(e) => json!({ "erro": e.to_string() }),
    }
}

/// Answer a single request line.
pub fn handle_line(evaluator: &Evaluator, line: &str) -> Value {
    let request = match Request::parse(line) {
        Ok(request) => request,
        Err(e) => {
            debug!("rejecting request line: {e}");
            return json!({ "erro": MALFORMED_REQUEST });
        }
    };

    let result = evaluator.evaluate(&request.species, request.count);
    debug!("{} x {} -> {result:?}", request.count, request.species);
    to_json(&result)
}
