pub mod protected;
pub mod public;

#[cfg(test)]
mod tests {
    //! Full-stack tests: the real router and middleware driven over in-memory
    //! stores, one request at a time.

    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::testing::{send, test_app};

    async fn register(app: &axum::Router, email: &str) -> (String, String, Value) {
        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Ada Lovelace",
                "email": email,
                "password": "secret123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (
            body["data"]["accessToken"].as_str().unwrap().to_string(),
            body["data"]["refreshToken"].as_str().unwrap().to_string(),
            body["data"]["user"].clone(),
        )
    }

    async fn create_survey(app: &axum::Router, token: &str, title: &str) -> Value {
        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/surveys",
            Some(token),
            Some(json!({ "title": title, "description": "screening flow" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["data"].clone()
    }

    #[tokio::test]
    async fn register_login_and_whoami_flow() {
        let app = test_app();
        let (_, _, user) = register(&app, "ada@example.com").await;
        assert_eq!(user["email"], "ada@example.com");
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password_hash").is_none());

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let access = body["data"]["accessToken"].as_str().unwrap().to_string();
        assert!(body["data"]["refreshToken"].is_string());
        assert!(body["data"].get("user").is_none());

        let (status, body) = send(app, "GET", "/api/auth/whoami", Some(&access), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected_with_400() {
        let app = test_app();
        register(&app, "ada@example.com").await;

        let (status, body) = send(
            app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Someone Else",
                "email": "ada@example.com",
                "password": "different"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    async fn register_validates_request_shape() {
        let app = test_app();
        let (status, body) = send(
            app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": "A", "email": "not-an-email", "password": "short" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields = body["fieldErrors"].as_object().unwrap();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[tokio::test]
    async fn login_failures_share_one_message() {
        let app = test_app();
        register(&app, "ada@example.com").await;

        let (status, wrong_pw) = send(
            app.clone(),
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "wrong-one" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, unknown) = send(
            app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "secret123" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_pw["message"], unknown["message"]);
        assert_eq!(wrong_pw["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn refresh_returns_new_access_token_only() {
        let app = test_app();
        let (_, refresh_token, _) = register(&app, "ada@example.com").await;

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": refresh_token })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let access = body["data"]["accessToken"].as_str().unwrap().to_string();
        assert!(body["data"].get("refreshToken").is_none());

        // The refreshed token works against a protected route
        let (status, _) = send(app, "GET", "/api/auth/whoami", Some(&access), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn refresh_normalizes_every_failure() {
        let app = test_app();
        let (access_token, _, _) = register(&app, "ada@example.com").await;

        for bad in [json!({ "refreshToken": "garbage" }),
            json!({ "refreshToken": access_token }),
            json!({})]
        {
            let (status, body) =
                send(app.clone(), "POST", "/api/auth/refresh", None, Some(bad)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["message"], "Invalid refresh token");
        }
    }

    #[tokio::test]
    async fn logout_acknowledges_statelessly() {
        let app = test_app();
        let (status, body) = send(app, "POST", "/api/auth/logout", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn unauthenticated_survey_requests_are_rejected() {
        let app = test_app();

        for (method, uri) in [
            ("POST", "/api/surveys"),
            ("GET", "/api/surveys"),
            ("GET", "/api/surveys/analytics"),
            ("GET", "/api/surveys/00000000-0000-0000-0000-000000000000"),
            ("PUT", "/api/surveys/00000000-0000-0000-0000-000000000000"),
            ("DELETE", "/api/surveys/00000000-0000-0000-0000-000000000000"),
        ] {
            let (status, body) = send(app.clone(), method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}: {body}");
        }

        // A forged token is no better than a missing one
        let (status, _) = send(
            app,
            "GET",
            "/api/surveys",
            Some("definitely.not.valid"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn survey_crud_round_trip() {
        let app = test_app();
        let (token, _, _) = register(&app, "ada@example.com").await;

        let created = create_survey(&app, &token, "Eligibility Screener").await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["status"], "draft");
        assert_eq!(created["nodes"], json!([]));
        assert_eq!(created["edges"], json!([]));

        // Update the graph
        let nodes = json!([
            { "id": "1", "type": "start", "data": { "label": "Start" }, "position": { "x": 0.0, "y": 0.0 } },
            { "id": "2", "type": "question", "data": { "label": "Over 18?" } },
            { "id": "3", "type": "eligible", "data": { "label": "Welcome" } },
            { "id": "4", "type": "ineligible", "data": { "label": "Sorry" } },
        ]);
        let edges = json!([
            { "id": "e1", "source": "1", "target": "2" },
            { "id": "e2", "source": "2", "target": "3" },
            { "id": "e3", "source": "2", "target": "4" },
        ]);
        let (status, body) = send(
            app.clone(),
            "PUT",
            &format!("/api/surveys/{id}"),
            Some(&token),
            Some(json!({ "title": "Screener v2", "nodes": nodes, "edges": edges })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "update failed: {body}");
        assert_eq!(body["data"]["title"], "Screener v2");
        assert_eq!(body["data"]["nodes"].as_array().unwrap().len(), 4);

        // Read it back
        let (status, body) = send(
            app.clone(),
            "GET",
            &format!("/api/surveys/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["edges"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["nodes"][1]["data"]["label"], "Over 18?");

        // Delete and confirm it is gone
        let (status, _) = send(
            app.clone(),
            "DELETE",
            &format!("/api/surveys/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            app.clone(),
            "GET",
            &format!("/api/surveys/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            app,
            "DELETE",
            &format!("/api/surveys/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn publish_is_one_way_and_idempotent() {
        let app = test_app();
        let (token, _, _) = register(&app, "ada@example.com").await;
        let created = create_survey(&app, &token, "Screener").await;
        let id = created["id"].as_str().unwrap();

        for _ in 0..2 {
            let (status, body) = send(
                app.clone(),
                "PUT",
                &format!("/api/surveys/{id}"),
                Some(&token),
                Some(json!({ "status": "published" })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["status"], "published");
        }

        let (status, body) = send(
            app,
            "GET",
            &format!("/api/surveys/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "published");
    }

    #[tokio::test]
    async fn surveys_are_scoped_to_their_owner() {
        let app = test_app();
        let (ada, _, _) = register(&app, "ada@example.com").await;
        let (grace, _, _) = register(&app, "grace@example.com").await;

        let created = create_survey(&app, &ada, "Ada's flow").await;
        let id = created["id"].as_str().unwrap();

        // Another user sees neither the document nor its existence
        for (method, body) in [
            ("GET", None),
            ("PUT", Some(json!({ "title": "hijacked" }))),
            ("DELETE", None),
        ] {
            let (status, _) = send(
                app.clone(),
                method,
                &format!("/api/surveys/{id}"),
                Some(&grace),
                body,
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} leaked");
        }

        let (status, body) = send(app, "GET", "/api/surveys", Some(&grace), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 0);
    }

    #[tokio::test]
    async fn listing_paginates_and_clamps_limits() {
        let app = test_app();
        let (token, _, _) = register(&app, "ada@example.com").await;
        for i in 0..7 {
            create_survey(&app, &token, &format!("Survey {i}")).await;
        }

        let (status, body) = send(
            app.clone(),
            "GET",
            "/api/surveys?page=2&limit=3",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 7);
        assert_eq!(body["data"]["page"], 2);
        assert_eq!(body["data"]["limit"], 3);
        assert_eq!(body["data"]["surveys"].as_array().unwrap().len(), 3);

        // Oversized limit collapses to the configured maximum (100 in dev)
        let (status, body) = send(
            app,
            "GET",
            "/api/surveys?limit=100000",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["limit"], 100);
    }

    #[tokio::test]
    async fn analytics_aggregates_owner_surveys() {
        let app = test_app();
        let (token, _, _) = register(&app, "ada@example.com").await;

        // Survey 1: 3 eligible / 1 ineligible -> 75, published
        let s1 = create_survey(&app, &token, "S1").await;
        let id1 = s1["id"].as_str().unwrap();
        let nodes1 = json!([
            { "id": "1", "type": "eligible", "data": { "label": "a" } },
            { "id": "2", "type": "eligible", "data": { "label": "b" } },
            { "id": "3", "type": "eligible", "data": { "label": "c" } },
            { "id": "4", "type": "ineligible", "data": { "label": "d" } },
        ]);
        send(
            app.clone(),
            "PUT",
            &format!("/api/surveys/{id1}"),
            Some(&token),
            Some(json!({ "nodes": nodes1, "status": "published" })),
        )
        .await;

        // Survey 2: 1 eligible / 3 ineligible -> 25, draft
        let s2 = create_survey(&app, &token, "S2").await;
        let id2 = s2["id"].as_str().unwrap();
        let nodes2 = json!([
            { "id": "1", "type": "eligible", "data": { "label": "a" } },
            { "id": "2", "type": "ineligible", "data": { "label": "b" } },
            { "id": "3", "type": "ineligible", "data": { "label": "c" } },
            { "id": "4", "type": "ineligible", "data": { "label": "d" } },
        ]);
        send(
            app.clone(),
            "PUT",
            &format!("/api/surveys/{id2}"),
            Some(&token),
            Some(json!({ "nodes": nodes2 })),
        )
        .await;

        let (status, body) = send(
            app,
            "GET",
            "/api/surveys/analytics",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "analytics failed: {body}");
        assert_eq!(body["data"]["totalSurveys"], 2);
        assert_eq!(body["data"]["publishedSurveys"], 1);
        assert_eq!(body["data"]["totalResponses"], 0);
        // (75 + 25) / 2
        assert_eq!(body["data"]["avgEligibilityRate"], 50);
    }

    #[tokio::test]
    async fn create_requires_a_title() {
        let app = test_app();
        let (token, _, _) = register(&app, "ada@example.com").await;

        let (status, body) = send(
            app,
            "POST",
            "/api/surveys",
            Some(&token),
            Some(json!({ "title": "", "description": "no title" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
