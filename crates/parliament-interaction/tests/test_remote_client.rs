use mockito::{Matcher, Server};
use parliament_core::error::ParliamentError;
use parliament_core::meeting::{CouncilBackend, Idea, Meeting, MeetingRequest, MeetingStatus};
use parliament_core::session::DeliberationStage;
use parliament_interaction::RemoteCouncilClient;
use serde_json::json;
use std::time::Duration;

fn client(server: &Server) -> RemoteCouncilClient {
    RemoteCouncilClient::new(format!("{}/", server.url()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_create_meeting_posts_request() {
    let mut server = Server::new_async().await;
    let meeting = Meeting::open(MeetingRequest::new("Rooftop farms")).unwrap();
    let mock = server
        .mock("POST", "/api/meetings")
        .match_body(Matcher::PartialJson(json!({ "topic": "Rooftop farms" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&meeting).unwrap())
        .create_async()
        .await;

    let created = client(&server)
        .create_meeting(MeetingRequest::new("Rooftop farms"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, meeting.id);
    assert_eq!(created.topic, "Rooftop farms");
}

#[tokio::test]
async fn test_empty_topic_never_reaches_server() {
    let server = Server::new_async().await;
    let err = client(&server)
        .create_meeting(MeetingRequest::new("   "))
        .await
        .unwrap_err();
    assert!(err.is_validation(), "expected validation error, got {err:?}");
}

#[tokio::test]
async fn test_start_deliberation_unwraps_ideas() {
    let mut server = Server::new_async().await;
    let ideas = vec![
        Idea::new("mouse", "The Mouse", "Study the past"),
        Idea::new("id", "The ID", "Act now"),
    ];
    server
        .mock("POST", "/api/meetings/m-1/start-deliberation")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "message": "Deliberation started", "ideas": ideas }).to_string())
        .create_async()
        .await;

    let received = client(&server).start_deliberation("m-1").await.unwrap();
    assert_eq!(received, ideas);
}

#[tokio::test]
async fn test_analyze_idea_uses_index_in_path() {
    let mut server = Server::new_async().await;
    let idea = Idea::new("ego", "The Ego", "Phase it in");
    server
        .mock("POST", "/api/meetings/m-1/analyze-idea/2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "message": "Idea analyzed", "analyzed_idea": idea }).to_string())
        .create_async()
        .await;

    let analyzed = client(&server).analyze_idea("m-1", 2).await.unwrap();
    assert_eq!(analyzed.persona_id, "ego");
}

#[tokio::test]
async fn test_missing_meeting_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/meetings/ghost")
        .with_status(404)
        .with_body(r#"{"detail":"Meeting not found"}"#)
        .create_async()
        .await;

    let err = client(&server).get_meeting("ghost").await.unwrap_err();
    assert!(err.is_not_found(), "expected not found, got {err:?}");
}

#[tokio::test]
async fn test_report_before_finalize() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/meetings/m-1/report")
        .with_status(400)
        .with_body(r#"{"detail":"Meeting not yet finalized"}"#)
        .create_async()
        .await;

    let err = client(&server).final_report("m-1").await.unwrap_err();
    assert!(matches!(err, ParliamentError::NotFinalized(ref id) if id == "m-1"));
}

#[tokio::test]
async fn test_server_error_carries_status_and_detail() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/meetings/m-1/finalize")
        .with_status(500)
        .with_body(r#"{"detail":"Error finalizing meeting: boom"}"#)
        .create_async()
        .await;

    let err = client(&server).finalize("m-1").await.unwrap_err();
    match err {
        ParliamentError::Remote { status, message } => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "Error finalizing meeting: boom");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_finalize_unwraps_report() {
    let mut server = Server::new_async().await;
    let body = json!({
        "message": "Meeting finalized",
        "final_report": {
            "winning_idea": Idea::new("ego", "The Ego", "Phase it in"),
            "implementation_plan": "Pilot first",
            "follow_up_questions": "1. Who pays?",
            "final_score": 7.5,
            "total_ideas_evaluated": 11,
            "generated_at": "2026-01-01T00:00:00Z"
        }
    });
    server
        .mock("POST", "/api/meetings/m-1/finalize")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let report = client(&server).finalize("m-1").await.unwrap();
    assert_eq!(report.final_score, 7.5);
    assert_eq!(report.total_ideas_evaluated, 11);
    assert_eq!(report.winning_idea.idea, "Phase it in");
}

#[tokio::test]
async fn test_create_meeting_accepts_naive_timestamps() {
    let mut server = Server::new_async().await;
    let body = r#"{"id":"0f6b2c1e-8f4d-4a57-9a3e-2d1c7b5e9f10","topic":"Rooftop farms","description":null,"proposer":"Anonymous","status":"active","phase":"inspiration","created_at":"2025-07-15T12:34:56.789012","ideas":[],"current_idea_index":0,"discussion_round":0,"final_report":null}"#;
    server
        .mock("POST", "/api/meetings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let created = client(&server)
        .create_meeting(MeetingRequest::new("Rooftop farms"))
        .await
        .unwrap();

    assert_eq!(created.id, "0f6b2c1e-8f4d-4a57-9a3e-2d1c7b5e9f10");
    assert_eq!(created.description, None);
    assert_eq!(created.status, MeetingStatus::Active);
    assert_eq!(created.stage, DeliberationStage::Inspiration);
    assert_eq!(created.created_at.to_rfc3339(), "2025-07-15T12:34:56.789012+00:00");
    assert!(!created.is_finalized());
}

#[tokio::test]
async fn test_get_meeting_after_analysis() {
    let mut server = Server::new_async().await;
    let body = r#"{"id":"m-1","topic":"Rooftop farms","description":"Dense city blocks","proposer":"Ada","status":"analyzing","phase":"analysis","created_at":"2025-07-15T12:34:56.789012","ideas":[{"persona_id":"mouse","persona_name":"The Mouse","idea":"Study the past","scores":[{"persona_id":"ego","persona_name":"The Ego","analysis":"Sound","score":8.0,"reasoning":"Cheap"}],"average_score":8.0,"discussion":[]},{"persona_id":"id","persona_name":"The ID","idea":"Act now","scores":[],"average_score":0,"discussion":[]}],"current_idea_index":1,"discussion_round":0,"final_report":null}"#;
    server
        .mock("GET", "/api/meetings/m-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let meeting = client(&server).get_meeting("m-1").await.unwrap();
    assert_eq!(meeting.stage, DeliberationStage::Analysis);
    assert_eq!(meeting.status, MeetingStatus::Analyzing);
    assert_eq!(meeting.current_idea_index, 1);
    assert_eq!(meeting.winning_idea().unwrap().persona_id, "mouse");
    assert_eq!(meeting.ideas[1].average_score, 0.0);
}

#[tokio::test]
async fn test_finalize_accepts_naive_generated_at() {
    let mut server = Server::new_async().await;
    let body = r#"{"message":"Meeting finalized","final_report":{"winning_idea":{"persona_id":"ego","persona_name":"The Ego","idea":"Phase it in","scores":[],"average_score":7.25,"discussion":[]},"implementation_plan":"Pilot first","follow_up_questions":"1. Who pays?","final_score":7.25,"total_ideas_evaluated":11,"generated_at":"2025-07-15T13:02:11.004518"}}"#;
    server
        .mock("POST", "/api/meetings/m-1/finalize")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let report = client(&server).finalize("m-1").await.unwrap();
    assert_eq!(report.final_score, 7.25);
    assert_eq!(report.generated_at.to_rfc3339(), "2025-07-15T13:02:11.004518+00:00");
}
