//! AWS Lambda HTTP function: POST a JSON simulation input, get the
//! yearly results and summary back as JSON.

use dividend_growth::api::handle_simulation;
use lambda_http::{run, service_fn, Body, Error, Request, Response};

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let response = match std::str::from_utf8(event.body().as_ref()) {
        Ok(body) => handle_simulation(body),
        Err(e) => {
            log::warn!("request body is not UTF-8: {e}");
            handle_simulation("")
        }
    };

    log::info!("simulation request answered with {}", response.status);

    let resp = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(Body::from(response.body))?;
    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(function_handler)).await
}
