use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{Local, Utc};
use serde::Deserialize;
use serde_json::json;

use super::conversations::MessageDraft;
use super::domain::{
    ApplicationId, ApplicationStatus, JobId, JobStatus, StaffingError, TemplateId, WorkerId,
};
use super::forms::{JobForm, JobTemplateForm, ScheduleForm, WorkerForm};
use super::report::ReportMonth;
use super::repository::{RepositoryError, StaffingRepository};
use super::service::{StaffingService, StaffingServiceError};
use super::session::Role;

type SharedService<R> = State<Arc<StaffingService<R>>>;

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) role: Role,
    #[serde(default)]
    pub(crate) email: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub(crate) q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MonthQuery {
    #[serde(default)]
    pub(crate) month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyRequest {
    pub(crate) worker_id: WorkerId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationStatusUpdate {
    pub(crate) status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobStatusUpdate {
    pub(crate) status: JobStatus,
}

/// Router builder exposing the admin and worker dashboard endpoints.
pub fn staffing_router<R>(service: Arc<StaffingService<R>>) -> Router
where
    R: StaffingRepository + 'static,
{
    Router::new()
        .route("/api/v1/session", post(login_handler::<R>))
        .route(
            "/api/v1/workers",
            get(search_workers_handler::<R>).post(register_worker_handler::<R>),
        )
        .route(
            "/api/v1/workers/:worker_id",
            delete(delete_worker_handler::<R>),
        )
        .route(
            "/api/v1/workers/:worker_id/jobs",
            get(visible_jobs_handler::<R>),
        )
        .route(
            "/api/v1/workers/:worker_id/applications",
            get(applied_jobs_handler::<R>),
        )
        .route(
            "/api/v1/workers/:worker_id/history",
            get(history_handler::<R>),
        )
        .route(
            "/api/v1/workers/:worker_id/totals",
            get(totals_handler::<R>),
        )
        .route(
            "/api/v1/workers/:worker_id/messages",
            get(inbox_handler::<R>),
        )
        .route(
            "/api/v1/jobs",
            get(list_jobs_handler::<R>).post(create_job_handler::<R>),
        )
        .route("/api/v1/jobs/:job_id", put(update_job_handler::<R>))
        .route(
            "/api/v1/jobs/:job_id/status",
            put(job_status_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(apply_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications/:application_id",
            put(application_status_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications/workers/:worker_id",
            delete(withdraw_handler::<R>),
        )
        .route(
            "/api/v1/templates",
            get(list_templates_handler::<R>).post(create_template_handler::<R>),
        )
        .route(
            "/api/v1/templates/:template_id",
            put(update_template_handler::<R>).delete(delete_template_handler::<R>),
        )
        .route(
            "/api/v1/templates/:template_id/jobs",
            post(job_from_template_handler::<R>),
        )
        .route("/api/v1/messages", post(send_message_handler::<R>))
        .route(
            "/api/v1/conversations",
            get(conversations_handler::<R>),
        )
        .route(
            "/api/v1/conversations/:worker_id/read",
            post(mark_read_handler::<R>),
        )
        .route("/api/v1/reports/overview", get(overview_handler::<R>))
        .route(
            "/api/v1/reports/payments",
            get(payment_report_handler::<R>),
        )
        .route(
            "/api/v1/reports/payments.csv",
            get(payment_csv_handler::<R>),
        )
        .route(
            "/api/v1/reports/payments/history.csv",
            get(history_csv_handler::<R>),
        )
        .with_state(service)
}

/// Maps service failures onto HTTP status codes with a JSON error body.
pub(crate) fn error_response(err: StaffingServiceError) -> Response {
    let status = match &err {
        StaffingServiceError::Staffing(error) if error.is_not_found() => StatusCode::NOT_FOUND,
        StaffingServiceError::Staffing(
            StaffingError::AlreadyApplied { .. } | StaffingError::WorkerReferenced(_),
        ) => StatusCode::CONFLICT,
        StaffingServiceError::Staffing(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StaffingServiceError::Repository(RepositoryError::Conflict { .. }) => StatusCode::CONFLICT,
        StaffingServiceError::Repository(_) | StaffingServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, StaffingServiceError>,
) -> Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(err) => error_response(err),
    }
}

fn parse_month(raw: Option<String>) -> Result<Option<ReportMonth>, StaffingServiceError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| value.parse::<ReportMonth>())
        .transpose()
        .map_err(StaffingServiceError::from)
}

pub(crate) async fn login_handler<R>(
    State(service): SharedService<R>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.login(request.role, &request.email))
}

pub(crate) async fn search_workers_handler<R>(
    State(service): SharedService<R>,
    Query(query): Query<SearchQuery>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.workers(query.q.as_deref()))
}

pub(crate) async fn register_worker_handler<R>(
    State(service): SharedService<R>,
    Json(form): Json<WorkerForm>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    let joined = Local::now().date_naive();
    respond(StatusCode::CREATED, service.register_worker(form, joined))
}

pub(crate) async fn delete_worker_handler<R>(
    State(service): SharedService<R>,
    Path(worker_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    match service.delete_worker(&WorkerId(worker_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn visible_jobs_handler<R>(
    State(service): SharedService<R>,
    Path(worker_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.visible_jobs(&WorkerId(worker_id)))
}

pub(crate) async fn applied_jobs_handler<R>(
    State(service): SharedService<R>,
    Path(worker_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.applied_jobs(&WorkerId(worker_id)))
}

pub(crate) async fn history_handler<R>(
    State(service): SharedService<R>,
    Path(worker_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.work_history(&WorkerId(worker_id)))
}

pub(crate) async fn totals_handler<R>(
    State(service): SharedService<R>,
    Path(worker_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.worker_totals(&WorkerId(worker_id)))
}

pub(crate) async fn inbox_handler<R>(
    State(service): SharedService<R>,
    Path(worker_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.inbox(&WorkerId(worker_id)))
}

pub(crate) async fn list_jobs_handler<R>(State(service): SharedService<R>) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.jobs())
}

pub(crate) async fn create_job_handler<R>(
    State(service): SharedService<R>,
    Json(form): Json<JobForm>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::CREATED, service.save_job(None, form))
}

pub(crate) async fn update_job_handler<R>(
    State(service): SharedService<R>,
    Path(job_id): Path<String>,
    Json(form): Json<JobForm>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.save_job(Some(&JobId(job_id)), form))
}

pub(crate) async fn job_status_handler<R>(
    State(service): SharedService<R>,
    Path(job_id): Path<String>,
    Json(update): Json<JobStatusUpdate>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.set_job_status(&JobId(job_id), update.status),
    )
}

pub(crate) async fn apply_handler<R>(
    State(service): SharedService<R>,
    Path(job_id): Path<String>,
    Json(request): Json<ApplyRequest>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.apply(&JobId(job_id), &request.worker_id, Utc::now()),
    )
}

pub(crate) async fn application_status_handler<R>(
    State(service): SharedService<R>,
    Path((job_id, application_id)): Path<(String, String)>,
    Json(update): Json<ApplicationStatusUpdate>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.set_application_status(
            &JobId(job_id),
            &ApplicationId(application_id),
            update.status,
            Utc::now(),
        ),
    )
}

pub(crate) async fn withdraw_handler<R>(
    State(service): SharedService<R>,
    Path((job_id, worker_id)): Path<(String, String)>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.withdraw(&JobId(job_id), &WorkerId(worker_id), Utc::now()),
    )
}

pub(crate) async fn list_templates_handler<R>(State(service): SharedService<R>) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.templates())
}

pub(crate) async fn create_template_handler<R>(
    State(service): SharedService<R>,
    Json(form): Json<JobTemplateForm>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.save_template(None, form, Utc::now()),
    )
}

pub(crate) async fn update_template_handler<R>(
    State(service): SharedService<R>,
    Path(template_id): Path<String>,
    Json(form): Json<JobTemplateForm>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.save_template(Some(&TemplateId(template_id)), form, Utc::now()),
    )
}

pub(crate) async fn delete_template_handler<R>(
    State(service): SharedService<R>,
    Path(template_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    match service.delete_template(&TemplateId(template_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn job_from_template_handler<R>(
    State(service): SharedService<R>,
    Path(template_id): Path<String>,
    Json(schedule): Json<ScheduleForm>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.create_job_from_template(&TemplateId(template_id), schedule),
    )
}

pub(crate) async fn send_message_handler<R>(
    State(service): SharedService<R>,
    Json(draft): Json<MessageDraft>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::CREATED, service.send_message(draft, Utc::now()))
}

pub(crate) async fn conversations_handler<R>(
    State(service): SharedService<R>,
    Query(query): Query<SearchQuery>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.conversations(query.q.as_deref()))
}

pub(crate) async fn mark_read_handler<R>(
    State(service): SharedService<R>,
    Path(worker_id): Path<String>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.mark_conversation_read(&WorkerId(worker_id)),
    )
}

pub(crate) async fn overview_handler<R>(State(service): SharedService<R>) -> Response
where
    R: StaffingRepository + 'static,
{
    respond(StatusCode::OK, service.overview())
}

pub(crate) async fn payment_report_handler<R>(
    State(service): SharedService<R>,
    Query(query): Query<MonthQuery>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    let report = parse_month(query.month).and_then(|month| service.payment_report(month));
    respond(StatusCode::OK, report)
}

pub(crate) async fn payment_csv_handler<R>(
    State(service): SharedService<R>,
    Query(query): Query<MonthQuery>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    csv_response(parse_month(query.month).and_then(|month| service.export_payments_csv(month)))
}

pub(crate) async fn history_csv_handler<R>(
    State(service): SharedService<R>,
    Query(query): Query<MonthQuery>,
) -> Response
where
    R: StaffingRepository + 'static,
{
    csv_response(parse_month(query.month).and_then(|month| service.export_history_csv(month)))
}

fn csv_response(result: Result<String, StaffingServiceError>) -> Response {
    match result {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
