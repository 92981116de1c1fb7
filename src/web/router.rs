use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{
    config::AllowedOrigins,
    web::{AppState, courses, results, students},
};

pub fn build_router(state: AppState, origins: &AllowedOrigins) -> Router {
    let api = Router::new()
        .route("/api/get_students", get(students::list_students))
        .route("/api/get_student/:id", get(students::get_student))
        .route("/api/add_student", post(students::create_student))
        .route("/api/delete_student/:id", delete(students::delete_student))
        .route("/api/get_courses", get(courses::list_courses))
        .route("/api/get_course/:id", get(courses::get_course))
        .route("/api/add_course", post(courses::create_course))
        .route("/api/delete_course/:id", delete(courses::delete_course))
        .route("/api/get_results", get(results::list_results))
        .route("/api/get_result/:id", get(results::get_result))
        .route("/api/add_result", post(results::create_result))
        .layer(cors_layer(origins));

    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .merge(api)
        .with_state(state)
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(list) => AllowOrigin::list(list.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn home() -> &'static str {
    "Hello, World!"
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, Response, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::records::MemoryRecordStore;

    const ORIGIN: &str = "https://client.example";

    fn app() -> Router {
        build_router(
            AppState::with_store(Arc::new(MemoryRecordStore::new())),
            &AllowedOrigins::Any,
        )
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ORIGIN, ORIGIN);
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    fn allow_origin(response: &Response<Body>) -> Option<&str> {
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn root_greets_without_cors() {
        let response = send(app(), Method::GET, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), None);
        assert_eq!(body_text(response).await, "Hello, World!");
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let response = send(app(), Method::GET, "/healthz", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), None);
    }

    #[tokio::test]
    async fn api_routes_carry_cors_header() {
        let response = send(app(), Method::GET, "/api/get_results", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("*"));
        assert_eq!(body_json(response).await, json!({ "results": [] }));
    }

    #[tokio::test]
    async fn delete_of_unknown_course_is_404_envelope() {
        let response = send(app(), Method::DELETE, "/api/delete_course/x", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Course not found" }));
    }

    #[tokio::test]
    async fn non_object_body_is_400_envelope() {
        let response = send(app(), Method::POST, "/api/add_course", Some("[1]")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(allow_origin(&response), Some("*"));

        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Invalid JSON body:"), "{error}");
    }

    #[tokio::test]
    async fn created_records_are_reachable_by_route() {
        let app = app();

        let student = json!({
            "firstName": "Alice",
            "familyName": "Smith",
            "dateOfBirth": "01-15-1990",
            "email": "a@x.com",
        });
        let response = send(
            app.clone(),
            Method::POST,
            "/api/add_student",
            Some(&student.to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let student_id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = send(
            app.clone(),
            Method::POST,
            "/api/add_course",
            Some(r#"{"courseName":"Math"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let course_id = body_json(response).await["id"].as_str().unwrap().to_string();

        let payload = json!({ "courseId": course_id, "studentId": student_id, "score": "A" });
        let response = send(
            app.clone(),
            Method::POST,
            "/api/add_result",
            Some(&payload.to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let result_id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = send(app.clone(), Method::GET, "/api/get_students", None).await;
        assert_eq!(
            body_json(response).await["students"][0]["dateOfBirth"],
            "01-15-1990"
        );

        let response = send(app.clone(), Method::GET, "/api/get_courses", None).await;
        assert_eq!(body_json(response).await["courses"][0]["courseName"], "Math");

        let uri = format!("/api/get_student/{student_id}");
        let response = send(app.clone(), Method::GET, &uri, None).await;
        assert_eq!(body_json(response).await["student"]["fullName"], "Alice Smith");

        let uri = format!("/api/delete_course/{course_id}");
        let response = send(app.clone(), Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let uri = format!("/api/get_course/{course_id}");
        let response = send(app.clone(), Method::GET, &uri, None).await;
        assert_eq!(body_json(response).await["course"]["status"], "INACTIVE");

        let uri = format!("/api/get_result/{result_id}");
        let response = send(app.clone(), Method::GET, &uri, None).await;
        assert_eq!(body_json(response).await["result"]["score"], "A");

        let response = send(app.clone(), Method::GET, "/api/get_results", None).await;
        assert_eq!(body_json(response).await, json!({ "results": [] }));

        let uri = format!("/api/delete_student/{student_id}");
        let response = send(app, Method::DELETE, &uri, None).await;
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Student deleted successfully" })
        );
    }
}
