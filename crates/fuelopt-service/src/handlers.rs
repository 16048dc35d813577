use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use fuelopt_lib::{
    estimate, optimize_with, AircraftProfile, Error as LibError, OptimizationResult,
    OptimizeOptions, RouteEstimate, RouteLoader,
};
use fuelopt_service_shared::{
    from_lib_error, record_estimate, record_optimization, record_request_failed,
    record_route_failures, AppState, AskAgentQuery, OptimizeRequest, ProblemDetails, RequestId,
    UploadRouteRequest, Validate,
};

type ApiResult<T> = Result<T, ProblemDetails>;

#[derive(Debug, Serialize)]
pub(crate) struct AircraftList {
    count: usize,
    aircraft: Vec<AircraftProfile>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReloadResponse {
    aircraft_loaded: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct EstimateResponse {
    aircraft: String,
    route_file: String,
    fuel_estimate_kg: RouteEstimate,
}

#[derive(Debug, Serialize)]
pub(crate) struct RouteList {
    routes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadResponse {
    filename: String,
    status: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AskAgentResponse {
    question: String,
    answer: String,
}

fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::AircraftNotFound { .. } => "aircraft_not_found",
        LibError::RouteNotFound { .. } => "route_not_found",
        LibError::RouteParse { .. } | LibError::InvalidRouteName { .. } => "invalid_route",
        LibError::InvalidInput { .. } => "invalid_input",
        LibError::AircraftDataNotFound { .. } | LibError::AircraftDataValidation { .. } => {
            "aircraft_data"
        }
        _ => "internal_error",
    }
}

/// Map a library error to Problem Details and count it.
fn lib_problem(error: &LibError, request_id: &RequestId) -> ProblemDetails {
    record_request_failed(failure_reason(error));
    from_lib_error(error, request_id.as_str())
}

fn rejected(problem: Box<ProblemDetails>) -> ProblemDetails {
    record_request_failed("validation_error");
    *problem
}

/// Run file-backed library work on the blocking pool.
async fn run_blocking<T, F>(request_id: &RequestId, work: F) -> ApiResult<Result<T, LibError>>
where
    F: FnOnce() -> Result<T, LibError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|join_error| {
        error!(request_id = %request_id, error = %join_error, "blocking task failed");
        record_request_failed("internal_error");
        ProblemDetails::internal_error("The request did not complete", request_id.as_str())
    })
}

pub(crate) async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the fuel optimizer API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/v1/aircraft": "List aircraft from aircraft.csv",
            "POST /api/v1/aircraft/reload": "Reload aircraft.csv from the data directory",
            "GET /api/v1/estimate/{aircraft}/{route_file}": "Estimate fuel for one aircraft on one route CSV",
            "POST /api/v1/optimize/{aircraft}": "Compare route CSVs (JSON body: list of file names)",
            "GET /api/v1/routes": "List route CSVs in the data directory",
            "POST /api/v1/routes": "Upload a route CSV (JSON body: filename, content)",
            "GET /api/v1/ask-agent?question=...": "Ask the assistant about routes and fuel",
        }
    }))
}

pub(crate) async fn list_aircraft(State(state): State<AppState>) -> Json<AircraftList> {
    let directory = state.directory();
    let aircraft: Vec<AircraftProfile> = directory.aircraft_sorted().into_iter().cloned().collect();
    Json(AircraftList {
        count: aircraft.len(),
        aircraft,
    })
}

pub(crate) async fn reload_aircraft(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> ApiResult<Json<ReloadResponse>> {
    let reloader = state.clone();
    match run_blocking(&request_id, move || reloader.reload_aircraft()).await? {
        Ok(directory) => Ok(Json(ReloadResponse {
            aircraft_loaded: directory.len(),
        })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "aircraft reload failed");
            Err(lib_problem(&e, &request_id))
        }
    }
}

pub(crate) async fn estimate_route(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((aircraft, route_file)): Path<(String, String)>,
) -> ApiResult<Json<EstimateResponse>> {
    info!(request_id = %request_id, aircraft = %aircraft, route = %route_file, "handling estimate request");

    let directory = state.directory();
    let loader = state.loader().clone();
    let (aircraft_type, route) = (aircraft.clone(), route_file.clone());
    let (resolved_type, fuel) = run_blocking(&request_id, move || {
        let profile = directory.require(&aircraft_type)?;
        let segments = loader.load(&route)?;
        let fuel = estimate(profile, &segments)?;
        Ok((profile.aircraft_type.clone(), fuel))
    })
    .await?
    .map_err(|e| lib_problem(&e, &request_id))?;

    record_estimate(&resolved_type);
    info!(request_id = %request_id, total_fuel = fuel.total_fuel, "estimate computed");

    Ok(Json(EstimateResponse {
        aircraft,
        route_file,
        fuel_estimate_kg: fuel,
    }))
}

pub(crate) async fn optimize_routes(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(aircraft): Path<String>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> ApiResult<Json<OptimizationResult>> {
    let Json(request) = payload.map_err(|e| {
        rejected(Box::new(ProblemDetails::bad_request(
            format!("Expected a JSON array of route file names: {}", e.body_text()),
            request_id.as_str(),
        )))
    })?;
    request.validate(request_id.as_str()).map_err(rejected)?;

    let files = request.files().to_vec();
    info!(
        request_id = %request_id,
        aircraft = %aircraft,
        candidates = files.len(),
        parallel = request.parallel(),
        "handling optimize request"
    );

    let options = OptimizeOptions {
        parallel: request.parallel(),
        ..OptimizeOptions::default()
    };
    let directory = state.directory();
    let loader = state.loader().clone();
    let aircraft_type = aircraft.clone();
    let outcome = run_blocking(&request_id, move || {
        let result = optimize_with(&aircraft_type, &files, &directory, &loader, &options)?;
        let resolved_type = directory.require(&aircraft_type)?.aircraft_type.clone();
        Ok((resolved_type, result))
    })
    .await?;

    let (resolved_type, result) = match outcome {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "optimization rejected");
            return Err(lib_problem(&e, &request_id));
        }
    };

    record_optimization(&resolved_type, result.options.len());
    record_route_failures(result.failed_count());

    Ok(Json(result))
}

pub(crate) async fn list_routes(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> ApiResult<Json<RouteList>> {
    let loader = state.loader().clone();
    let routes = run_blocking(&request_id, move || loader.list())
        .await?
        .map_err(|e| lib_problem(&e, &request_id))?;
    Ok(Json(RouteList { routes }))
}

pub(crate) async fn upload_route(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<UploadRouteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let Json(request) = payload.map_err(|e| {
        rejected(Box::new(ProblemDetails::bad_request(
            e.body_text(),
            request_id.as_str(),
        )))
    })?;
    request.validate(request_id.as_str()).map_err(rejected)?;

    let loader = state.loader().clone();
    let UploadRouteRequest { filename, content } = request;
    let target = filename.clone();
    let path = run_blocking(&request_id, move || loader.store(&target, content.as_bytes()))
        .await?
        .map_err(|e| lib_problem(&e, &request_id))?;
    info!(request_id = %request_id, path = %path.display(), "route uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            filename,
            status: "uploaded",
        }),
    ))
}

pub(crate) async fn ask_agent(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<AskAgentQuery>, QueryRejection>,
) -> ApiResult<Json<AskAgentResponse>> {
    let Query(query) = query.map_err(|_| {
        rejected(Box::new(ProblemDetails::bad_request(
            "The 'question' parameter is required",
            request_id.as_str(),
        )))
    })?;
    query.validate(request_id.as_str()).map_err(rejected)?;

    let Some(assistant) = state.assistant() else {
        record_request_failed("assistant_unavailable");
        return Err(ProblemDetails::service_unavailable(
            "The assistant is not configured; set OPENAI_API_KEY to enable it",
            request_id.as_str(),
        ));
    };

    match assistant.ask(&query.question).await {
        Ok(answer) => Ok(Json(AskAgentResponse {
            question: query.question,
            answer,
        })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "assistant call failed");
            record_request_failed("assistant_upstream");
            Err(ProblemDetails::upstream_error(
                e.public_detail(),
                request_id.as_str(),
            ))
        }
    }
}
