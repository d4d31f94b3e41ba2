use async_trait::async_trait;
use chrono::Utc;
use parliament_application::MeetingRoom;
use parliament_core::config::DeliberationConfig;
use parliament_core::error::{ParliamentError, Result};
use parliament_core::meeting::{
    CouncilBackend, FinalReport, Idea, Meeting, MeetingRequest, PersonaScore,
};
use parliament_core::persona::PersonaCatalog;
use parliament_core::session::{DeliberationStage, MessageKind, SessionEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// A backend with two canned ideas. `fail_on` names the step that errors.
#[derive(Default)]
struct CannedBackend {
    fail_on: Option<&'static str>,
}

impl CannedBackend {
    fn check(&self, step: &str) -> Result<()> {
        match self.fail_on {
            Some(s) if s == step => Err(ParliamentError::remote(Some(500), "backend down")),
            _ => Ok(()),
        }
    }

    fn idea(index: usize) -> Idea {
        let mut idea = Idea::new(format!("p{index}"), format!("Member {index}"), format!("Idea {index}"));
        let scores = (0..4)
            .map(|seat| PersonaScore {
                persona_id: format!("s{seat}"),
                persona_name: format!("Scorer {seat}"),
                analysis: format!("Take {seat}"),
                score: (6 + index) as f64,
                reasoning: String::new(),
            })
            .collect();
        idea.record_scores(scores);
        idea
    }
}

#[async_trait]
impl CouncilBackend for CannedBackend {
    async fn create_meeting(&self, request: MeetingRequest) -> Result<Meeting> {
        self.check("create")?;
        Meeting::open(request)
    }

    async fn get_meeting(&self, meeting_id: &str) -> Result<Meeting> {
        Err(ParliamentError::not_found("meeting", meeting_id))
    }

    async fn start_deliberation(&self, _meeting_id: &str) -> Result<Vec<Idea>> {
        self.check("start")?;
        Ok(vec![Idea::new("p0", "Member 0", "Idea 0"), Idea::new("p1", "Member 1", "Idea 1")])
    }

    async fn analyze_idea(&self, _meeting_id: &str, index: usize) -> Result<Idea> {
        self.check("analyze")?;
        Ok(Self::idea(index))
    }

    async fn finalize(&self, _meeting_id: &str) -> Result<FinalReport> {
        self.check("finalize")?;
        let winner = Self::idea(1);
        Ok(FinalReport {
            final_score: winner.average_score,
            winning_idea: winner,
            implementation_plan: "Plan".into(),
            follow_up_questions: "Questions".into(),
            total_ideas_evaluated: 2,
            generated_at: Utc::now(),
        })
    }

    async fn final_report(&self, meeting_id: &str) -> Result<FinalReport> {
        Err(ParliamentError::NotFinalized(meeting_id.to_string()))
    }
}

fn room(backend: CannedBackend) -> MeetingRoom {
    MeetingRoom::new(
        Arc::new(backend),
        &PersonaCatalog::council(),
        DeliberationConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_run_reaches_completion() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let room = room(CannedBackend::default()).with_events(tx);

    let report = room
        .run(MeetingRequest::new("Floating gardens"))
        .await
        .expect("run completes");
    assert_eq!(report.winning_idea.idea, "Idea 1");

    let snapshot = room.snapshot().await;
    assert_eq!(snapshot.stage, DeliberationStage::Completed);
    assert_eq!(snapshot.progress, 100);
    assert!(snapshot.meeting_id.is_some());

    let transcript = snapshot.transcript;
    // Three sample critiques per idea
    assert_eq!(transcript.by_kind(MessageKind::Discussion).count(), 6);
    assert_eq!(transcript.by_kind(MessageKind::Motion).count(), 2);
    let last = transcript.last().unwrap();
    assert_eq!(last.kind, MessageKind::Conclusion);
    assert_eq!(last.speaker, "The EGO");
    assert!(last.content.contains("Winner: \"Idea 1\" (Member 1) - Score: 7/10"));

    let mut progress = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let SessionEvent::StageChanged { progress: p, .. } = event {
            progress.push(p);
        }
    }
    assert_eq!(progress, vec![10, 25, 50, 75, 80, 100]);
}

#[tokio::test(start_paused = true)]
async fn test_backend_error_surfaces_once_and_stops() {
    let room = room(CannedBackend {
        fail_on: Some("analyze"),
    });

    let err = room
        .run(MeetingRequest::new("Floating gardens"))
        .await
        .unwrap_err();
    assert!(matches!(err, ParliamentError::Remote { status: Some(500), .. }));

    let snapshot = room.snapshot().await;
    assert_eq!(snapshot.stage, DeliberationStage::Analysis);
    let errors: Vec<_> = snapshot.transcript.by_kind(MessageKind::Error).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].content, "❌ Error during analysis phase. Please try again.");
    assert_eq!(snapshot.transcript.last().unwrap().kind, MessageKind::Error);
}

#[tokio::test(start_paused = true)]
async fn test_create_failure() {
    let room = room(CannedBackend {
        fail_on: Some("create"),
    });
    assert!(room.run(MeetingRequest::new("x")).await.is_err());

    let snapshot = room.snapshot().await;
    assert_eq!(snapshot.meeting_id, None);
    assert_eq!(snapshot.stage, DeliberationStage::Creating);
    assert_eq!(snapshot.transcript.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_questioner_is_acknowledged_after_delay() {
    let room = Arc::new(room(CannedBackend::default()));

    let speaker = Arc::clone(&room);
    let handle = tokio::spawn(async move { speaker.speak("  What of the rivers?  ").await });

    tokio::time::sleep(Duration::from_millis(500)).await;
    let before = room.snapshot().await.transcript;
    assert_eq!(before.len(), 1);
    assert_eq!(before.messages()[0].speaker, "The Questioner");
    assert_eq!(before.messages()[0].content, "What of the rivers?");
    assert_eq!(before.messages()[0].kind, MessageKind::User);

    assert!(handle.await.unwrap());
    let after = room.snapshot().await.transcript;
    assert_eq!(after.len(), 2);
    assert_eq!(after.messages()[1].kind, MessageKind::Response);
    assert_eq!(
        after.messages()[1].content,
        "The council acknowledges your input, mortal observer."
    );
}

#[tokio::test(start_paused = true)]
async fn test_blank_question_is_ignored() {
    let room = room(CannedBackend::default());
    assert!(!room.speak("   ").await);
    assert!(room.snapshot().await.transcript.is_empty());
}
