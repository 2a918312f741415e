// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Form, Router,
    extract::{Multipart, Path, State as AxumState},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use clap::Parser;
use maud::Markup;
use roster_api::{
    ApiError, AuthenticationService, CreateSeriesOutcome, CreateSeriesRequest, Credentials,
    PhotoStore, PhotoUpload, StudentForm, create_series, create_student, delete_student,
    edit_student, get_student, list_series_ordered, list_students,
};
use roster_domain::{Series, Sex, Student, StudentWithSeries};
use roster_persistence::SqlitePersistence;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

mod pages;
mod photos;
mod session;

use photos::{FsPhotoStore, PLACEHOLDER_SVG};
use session::{AuthenticatedUser, CookieCredentials};

/// Roster Server - HTTP server for the school roster application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory the uploaded student photos are stored in
    #[arg(long, default_value = "student_photos")]
    photo_dir: String,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex to allow safe
/// concurrent access; the photo store is read-mostly and shared as-is.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for series, students and users.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// The on-disk store for uploaded photos.
    photos: Arc<FsPhotoStore>,
}

/// The login form as posted by the login page.
#[derive(Debug, Deserialize)]
struct LoginForm {
    /// The login name.
    login: String,
    /// The plaintext password.
    senha: String,
}

/// The create-series form as posted by the series page.
#[derive(Debug, Deserialize)]
struct SeriesForm {
    /// The grade number.
    numero: i32,
    /// The class letter, exactly one character.
    turma: String,
}

/// HTTP error response carrying a status code and a message.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    /// Shorthand for a 422 with the given message.
    fn unprocessable(message: String) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, pages::error_page(&self.message)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::NotAuthenticated(_) => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::StudentNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Conflict(_) => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::Persistence(_) | ApiError::PhotoStore(_) => {
                error!(error = %err, "Internal error while handling request");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                }
            }
        }
    }
}

/// Extracts the student fields from a multipart form.
///
/// Required fields are `nome`, `sexo` and `id_serie`; an empty or
/// absent `foto` part means no upload. A missing or unparsable field
/// maps to a 422.
async fn student_form_from_multipart(mut multipart: Multipart) -> Result<StudentForm, HttpError> {
    let mut name: Option<String> = None;
    let mut sex: Option<Sex> = None;
    let mut series_id: Option<i64> = None;
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::unprocessable(format!("Malformed multipart request: {e}")))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };
        match field_name.as_str() {
            "nome" => {
                name = Some(field.text().await.map_err(|e| {
                    HttpError::unprocessable(format!("Unreadable field nome: {e}"))
                })?);
            }
            "sexo" => {
                let value: String = field.text().await.map_err(|e| {
                    HttpError::unprocessable(format!("Unreadable field sexo: {e}"))
                })?;
                sex = Some(
                    value
                        .parse()
                        .map_err(|e| HttpError::unprocessable(format!("{e}")))?,
                );
            }
            "id_serie" => {
                let value: String = field.text().await.map_err(|e| {
                    HttpError::unprocessable(format!("Unreadable field id_serie: {e}"))
                })?;
                series_id = Some(value.parse().map_err(|_| {
                    HttpError::unprocessable(format!("Invalid series id: {value}"))
                })?);
            }
            "foto" => {
                let file_name: String = field.file_name().map(str::to_string).unwrap_or_default();
                let data = field.bytes().await.map_err(|e| {
                    HttpError::unprocessable(format!("Unreadable field foto: {e}"))
                })?;
                if !file_name.is_empty() && !data.is_empty() {
                    photo = Some(PhotoUpload {
                        file_name,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let missing =
        |field: &str| HttpError::unprocessable(format!("Missing form field: {field}"));
    Ok(StudentForm {
        name: name.ok_or_else(|| missing("nome"))?,
        sex: sex.ok_or_else(|| missing("sexo"))?,
        series_id: series_id.ok_or_else(|| missing("id_serie"))?,
        photo,
    })
}

/// Handler for GET `/` endpoint.
///
/// Renders the menu when the cookie pair authenticates, the login
/// form otherwise.
async fn handle_menu(
    AxumState(app_state): AxumState<AppState>,
    CookieCredentials(credentials): CookieCredentials,
) -> Markup {
    let persistence = app_state.persistence.lock().await;
    let result = AuthenticationService::login(&persistence, &credentials);
    drop(persistence);

    match result {
        Ok(user) => pages::menu_page(&user, ""),
        Err(_) => pages::login_page("", ""),
    }
}

/// Handler for POST `/login` endpoint.
///
/// On success redirects to the menu with the credential pair set as
/// cookies; on failure re-renders the login form with the error.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials: Credentials = Credentials::new(form.login, form.senha);

    let persistence = app_state.persistence.lock().await;
    let result = AuthenticationService::login(&persistence, &credentials);
    drop(persistence);

    let user = match result {
        Ok(user) => user,
        Err(e) => return pages::login_page(&e.to_string(), "").into_response(),
    };
    info!(login = %user.login, "Login succeeded");

    let mut response: Response = Redirect::to("/").into_response();
    for cookie in [
        format!("login={}; SameSite=Strict; Path=/", credentials.login),
        format!("senha={}; SameSite=Strict; Path=/", credentials.password),
    ] {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => {
                return HttpError::unprocessable(format!(
                    "Credential not representable as a cookie: {e}"
                ))
                .into_response();
            }
        }
    }
    response
}

/// Handler for POST `/logout` endpoint.
///
/// Expires both credential cookies and renders the login form.
#[allow(clippy::unused_async)]
async fn handle_logout() -> Response {
    let mut response: Response =
        pages::login_page("", "You have been logged out.").into_response();
    for cookie in [
        "login=; Max-Age=0; SameSite=Strict; Path=/",
        "senha=; Max-Age=0; SameSite=Strict; Path=/",
    ] {
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_static(cookie));
    }
    response
}

/// Handler for GET `/serie` endpoint.
async fn handle_series_list(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Markup, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let series: Vec<Series> = list_series_ordered(&persistence, &user)?;
    drop(persistence);

    Ok(pages::series_list_page(&user, &series))
}

/// Handler for GET `/serie/novo` endpoint.
#[allow(clippy::unused_async)]
async fn handle_series_new_form(AuthenticatedUser(user): AuthenticatedUser) -> Markup {
    pages::series_form_page(&user)
}

/// Handler for POST `/serie/novo` endpoint.
///
/// Creates the series, or reports the existing one when the
/// `(number, letter)` pair is already taken.
async fn handle_series_create(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Form(form): Form<SeriesForm>,
) -> Result<Markup, HttpError> {
    let letter: char = Series::parse_letter(&form.turma)
        .map_err(|e| HttpError::unprocessable(e.to_string()))?;

    let mut persistence = app_state.persistence.lock().await;
    let outcome: CreateSeriesOutcome = create_series(
        &mut persistence,
        &user,
        CreateSeriesRequest {
            number: form.numero,
            letter,
        },
    )?;
    drop(persistence);

    let message: String = if outcome.already_existed {
        format!("Series {} already existed.", outcome.series.label())
    } else {
        format!("Series {} created.", outcome.series.label())
    };
    Ok(pages::menu_page(&user, &message))
}

/// Handler for GET `/aluno` endpoint.
async fn handle_students_list(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Markup, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let students: Vec<StudentWithSeries> = list_students(&persistence, &user)?;
    drop(persistence);

    Ok(pages::students_list_page(&user, &students))
}

/// Handler for GET `/aluno/novo` endpoint.
async fn handle_student_new_form(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Markup, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let series: Vec<Series> = list_series_ordered(&persistence, &user)?;
    drop(persistence);

    Ok(pages::student_form_page(&user, None, &series))
}

/// Handler for POST `/aluno/novo` endpoint.
///
/// Creates the student, saving an accepted photo upload first.
async fn handle_student_create(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    multipart: Multipart,
) -> Result<Markup, HttpError> {
    let form: StudentForm = student_form_from_multipart(multipart).await?;

    let persistence = app_state.persistence.lock().await;
    let student: Student = create_student(&persistence, app_state.photos.as_ref(), &user, form)?;
    drop(persistence);

    Ok(pages::menu_page(
        &user,
        &format!("Student {} created.", student.name),
    ))
}

/// Handler for GET `/aluno/{id}` endpoint.
///
/// Renders the edit form prefilled with the student's current fields.
async fn handle_student_edit_form(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(student_id): Path<i64>,
) -> Result<Markup, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let student: StudentWithSeries = get_student(&persistence, &user, student_id)?;
    let series: Vec<Series> = list_series_ordered(&persistence, &user)?;
    drop(persistence);

    Ok(pages::student_form_page(&user, Some(&student), &series))
}

/// Handler for POST `/aluno/{id}` endpoint.
///
/// Overwrites the student's fields; a new accepted upload replaces
/// the stored photo.
async fn handle_student_edit(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(student_id): Path<i64>,
    multipart: Multipart,
) -> Result<Markup, HttpError> {
    let form: StudentForm = student_form_from_multipart(multipart).await?;

    let persistence = app_state.persistence.lock().await;
    let student: Student = edit_student(
        &persistence,
        app_state.photos.as_ref(),
        &user,
        student_id,
        form,
    )?;
    drop(persistence);

    Ok(pages::menu_page(
        &user,
        &format!("Student {} saved.", student.name),
    ))
}

/// Handler for DELETE `/aluno/{id}` endpoint.
///
/// Removes the student row only; the stored photo file is deleted
/// through its own endpoint.
async fn handle_student_delete(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(student_id): Path<i64>,
) -> Result<Markup, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let removed: StudentWithSeries = delete_student(&persistence, &user, student_id)?;
    drop(persistence);

    Ok(pages::menu_page(
        &user,
        &format!("Student {} removed.", removed.student.name),
    ))
}

/// Handler for GET `/aluno/foto/{id_foto}` endpoint.
///
/// Serves the stored photo bytes, or the placeholder image when the
/// id matches no file.
#[allow(clippy::unused_async)]
async fn handle_photo_download(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(photo_id): Path<String>,
) -> Response {
    app_state.photos.open(&photo_id).map_or_else(
        || {
            (
                [(header::CONTENT_TYPE, String::from("image/svg+xml"))],
                PLACEHOLDER_SVG,
            )
                .into_response()
        },
        |bytes| {
            let mime = mime_guess::from_path(&photo_id).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        },
    )
}

/// Handler for DELETE `/aluno/foto/{id_foto}` endpoint.
#[allow(clippy::unused_async)]
async fn handle_photo_delete(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(photo_id): Path<String>,
) -> Result<Markup, HttpError> {
    app_state.photos.delete(&photo_id).map_err(ApiError::from)?;
    info!(login = %user.login, photo_id = %photo_id, "Deleted photo");
    Ok(pages::menu_page(&user, "Photo removed."))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_menu))
        .route("/login", get(handle_menu).post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/serie", get(handle_series_list))
        .route(
            "/serie/novo",
            get(handle_series_new_form).post(handle_series_create),
        )
        .route("/aluno", get(handle_students_list))
        .route(
            "/aluno/novo",
            get(handle_student_new_form).post(handle_student_create),
        )
        .route(
            "/aluno/{id}",
            get(handle_student_edit_form)
                .post(handle_student_edit)
                .delete(handle_student_delete),
        )
        .route(
            "/aluno/foto/{id_foto}",
            get(handle_photo_download).delete(handle_photo_delete),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Roster Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let photo_store: FsPhotoStore = FsPhotoStore::new(&args.photo_dir)?;
    info!("Storing photos under: {}", args.photo_dir);

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        photos: Arc::new(photo_store),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use std::path::{Path as FsPath, PathBuf};
    use tower::ServiceExt;
    use uuid::Uuid;

    /// The seeded credential pair the tests authenticate with.
    const AUTH_COOKIE: &str = "login=ironman; senha=ferro";

    const BOUNDARY: &str = "roster-test-boundary";

    /// Helper to create test app state backed by an in-memory database
    /// and a fresh photo directory.
    fn create_test_app_state() -> (AppState, PathBuf) {
        let persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
        let photo_dir: PathBuf =
            std::env::temp_dir().join(format!("roster-server-test-{}", Uuid::new_v4()));
        let photo_store: FsPhotoStore =
            FsPhotoStore::new(&photo_dir).expect("Failed to create photo store");
        let app_state: AppState = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            photos: Arc::new(photo_store),
        };
        (app_state, photo_dir)
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Helper to send an authenticated GET request.
    async fn get_authenticated(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::COOKIE, AUTH_COOKIE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Helper to send an authenticated urlencoded form POST.
    async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .header(header::COOKIE, AUTH_COOKIE)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn push_text_part(body: &mut Vec<u8>, name: &str, value: &str) {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    /// Builds a multipart student form body.
    fn student_body(
        name: Option<&str>,
        sex: Option<&str>,
        series_id: Option<i64>,
        photo: Option<(&str, &[u8])>,
    ) -> Vec<u8> {
        let mut body: Vec<u8> = Vec::new();
        if let Some(name) = name {
            push_text_part(&mut body, "nome", name);
        }
        if let Some(sex) = sex {
            push_text_part(&mut body, "sexo", sex);
        }
        if let Some(series_id) = series_id {
            push_text_part(&mut body, "id_serie", &series_id.to_string());
        }
        if let Some((file_name, data)) = photo {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"foto\"; \
                     filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    /// Helper to send an authenticated multipart student POST.
    async fn post_student(app: &Router, uri: &str, body: Vec<u8>) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .header(header::COOKIE, AUTH_COOKIE)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Creates a series over HTTP and asserts success.
    async fn create_series_via_http(app: &Router, numero: i32, turma: &str) {
        let response = post_form(app, "/serie/novo", &format!("numero={numero}&turma={turma}"))
            .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    /// Lists the files currently stored in the photo directory.
    fn stored_photos(photo_dir: &FsPath) -> Vec<PathBuf> {
        std::fs::read_dir(photo_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[tokio::test]
    async fn test_menu_without_cookies_shows_login_form() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: String = body_string(response).await;
        assert!(body.contains("action=\"/login\""));
        assert!(body.contains("name=\"senha\""));
    }

    #[tokio::test]
    async fn test_menu_with_cookies_shows_menu() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = get_authenticated(&app, "/").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: String = body_string(response).await;
        assert!(body.contains("Tony Stark"));
        assert!(body.contains("href=\"/aluno\""));
    }

    #[tokio::test]
    async fn test_login_sets_cookies_and_redirects() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("login=spiderman&senha=aranha"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        let cookies: Vec<&str> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().any(|c| c.starts_with("login=spiderman")));
        assert!(cookies.iter().any(|c| c.starts_with("senha=aranha")));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_rerenders_form() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("login=ironman&senha=wrong"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: String = body_string(response).await;
        assert!(body.contains("Unknown login or wrong password"));
        assert!(body.contains("action=\"/login\""));
    }

    #[tokio::test]
    async fn test_login_with_missing_field_is_unprocessable() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("login=ironman"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_logout_expires_both_cookies() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .header(header::COOKIE, AUTH_COOKIE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let cookies: Vec<&str> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn test_unauthenticated_request_redirects_to_login() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        for uri in ["/serie", "/aluno", "/aluno/novo", "/aluno/1"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), HttpStatusCode::SEE_OTHER);
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        }
    }

    #[tokio::test]
    async fn test_create_series_and_list_it() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_form(&app, "/serie/novo", "numero=2&turma=A").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: String = body_string(response).await;
        assert!(body.contains("Series 2A created."));

        let response = get_authenticated(&app, "/serie").await;
        let body: String = body_string(response).await;
        assert!(body.contains("<td>2</td>"));
        assert!(body.contains("<td>A</td>"));
    }

    #[tokio::test]
    async fn test_create_series_twice_reports_existing() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        create_series_via_http(&app, 3, "B").await;
        let response = post_form(&app, "/serie/novo", "numero=3&turma=B").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: String = body_string(response).await;
        assert!(body.contains("Series 3B already existed."));
    }

    #[tokio::test]
    async fn test_series_with_multicharacter_letter_is_rejected() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_form(&app, "/serie/novo", "numero=2&turma=AB").await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_student_lifecycle_over_http() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);
        create_series_via_http(&app, 2, "A").await;

        let response = post_student(
            &app,
            "/aluno/novo",
            student_body(Some("Maria Silva"), Some("F"), Some(1), None),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = get_authenticated(&app, "/aluno").await;
        let body: String = body_string(response).await;
        assert!(body.contains("Maria Silva"));

        let response = get_authenticated(&app, "/aluno/1").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: String = body_string(response).await;
        assert!(body.contains("value=\"Maria Silva\""));

        let response = post_student(
            &app,
            "/aluno/1",
            student_body(Some("Maria Souza"), Some("F"), Some(1), None),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/aluno/1")
                    .header(header::COOKIE, AUTH_COOKIE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: String = body_string(response).await;
        assert!(body.contains("Student Maria Souza removed."));

        let response = get_authenticated(&app, "/aluno/1").await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_student_with_missing_field_is_unprocessable() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);
        create_series_via_http(&app, 2, "A").await;

        let response = post_student(
            &app,
            "/aluno/novo",
            student_body(Some("Maria Silva"), None, Some(1), None),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_student_with_unknown_series_is_conflict() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_student(
            &app,
            "/aluno/novo",
            student_body(Some("Maria Silva"), Some("F"), Some(99), None),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unsupported_photo_extension_is_dropped() {
        let (app_state, photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);
        create_series_via_http(&app, 2, "A").await;

        let response = post_student(
            &app,
            "/aluno/novo",
            student_body(
                Some("Pedro Santos"),
                Some("M"),
                Some(1),
                Some(("notes.txt", b"not a picture")),
            ),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        assert!(stored_photos(&photo_dir).is_empty());
        let response = get_authenticated(&app, "/aluno").await;
        let body: String = body_string(response).await;
        assert!(body.contains("Pedro Santos"));
        assert!(!body.contains("/aluno/foto/"));

        std::fs::remove_dir_all(&photo_dir).ok();
    }

    #[tokio::test]
    async fn test_photo_upload_download_and_delete() {
        let (app_state, photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);
        create_series_via_http(&app, 2, "A").await;

        let photo_bytes: &[u8] = b"\x89PNG\r\n\x1a\nfake image payload";
        let response = post_student(
            &app,
            "/aluno/novo",
            student_body(
                Some("Ana Costa"),
                Some("F"),
                Some(1),
                Some(("me.png", photo_bytes)),
            ),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let stored: Vec<PathBuf> = stored_photos(&photo_dir);
        assert_eq!(stored.len(), 1);
        let photo_id: String = stored[0].file_name().unwrap().to_str().unwrap().to_string();
        assert!(photo_id.ends_with(".png"));

        let response = get_authenticated(&app, &format!("/aluno/foto/{photo_id}")).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), photo_bytes);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/aluno/foto/{photo_id}"))
                    .header(header::COOKIE, AUTH_COOKIE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        assert!(stored_photos(&photo_dir).is_empty());

        std::fs::remove_dir_all(&photo_dir).ok();
    }

    #[tokio::test]
    async fn test_missing_photo_serves_placeholder() {
        let (app_state, _photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = get_authenticated(&app, "/aluno/foto/no-such-photo.png").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), PLACEHOLDER_SVG);
    }

    #[tokio::test]
    async fn test_photo_replacement_deletes_old_file() {
        let (app_state, photo_dir) = create_test_app_state();
        let app: Router = build_router(app_state);
        create_series_via_http(&app, 2, "A").await;

        post_student(
            &app,
            "/aluno/novo",
            student_body(
                Some("Ana Costa"),
                Some("F"),
                Some(1),
                Some(("first.jpg", b"first")),
            ),
        )
        .await;
        assert_eq!(stored_photos(&photo_dir).len(), 1);

        let response = post_student(
            &app,
            "/aluno/1",
            student_body(
                Some("Ana Costa"),
                Some("F"),
                Some(1),
                Some(("second.jpg", b"second")),
            ),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let stored: Vec<PathBuf> = stored_photos(&photo_dir);
        assert_eq!(stored.len(), 1);
        assert_eq!(std::fs::read(&stored[0]).unwrap(), b"second");

        std::fs::remove_dir_all(&photo_dir).ok();
    }
}
