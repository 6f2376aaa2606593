//! End-to-end pipeline scenarios against scripted agents and a stubbed
//! video generator.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use cellini_agents::AgentExecutor;
use cellini_core::{
    ChatRequest, ChatResponse, GenerationOutput, GenerationRequest, Input, VideoJob, VideoType,
};
use cellini_error::CelliniResult;
use cellini_interface::{AgentDriver, VideoGenerator};
use cellini_pipeline::Orchestrator;

/// Driver that replays scripted responses in call order and records every
/// request it sees.
struct ScriptedDriver {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedDriver {
    fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentDriver for ScriptedDriver {
    async fn generate(&self, req: &ChatRequest) -> CelliniResult<ChatResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("pipeline made more agent calls than scripted");
        if next.is_empty() {
            // Empty script entry simulates a model returning nothing.
            return Ok(ChatResponse {
                outputs: vec![],
                finish_reason: None,
                refusal: None,
            });
        }
        Ok(ChatResponse::from_text(next))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "gpt-4.1-nano"
    }
}

/// Video generator stub that records jobs and returns a fixed output.
struct StubVideo {
    jobs: Mutex<Vec<VideoJob>>,
    video_url: String,
}

impl StubVideo {
    fn new(video_url: &str) -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            video_url: video_url.to_string(),
        }
    }

    fn recorded(&self) -> Vec<VideoJob> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoGenerator for StubVideo {
    async fn generate(&self, job: &VideoJob) -> CelliniResult<GenerationOutput> {
        self.jobs.lock().unwrap().push(job.clone());
        Ok(GenerationOutput {
            video_url: self.video_url.clone(),
            generation_id: "gen-test-1".to_string(),
            status: "success".to_string(),
        })
    }
}

// Scripted agent payloads, in pipeline call order.

fn analysis_json() -> String {
    r#"{"jewellery_type": "Ring", "materials": "Platinum, polished",
        "gemstones": "Round brilliant diamond, prong set", "design_style": "Modern",
        "detailed_features": "Plain shank", "color_palette": "Silver and white",
        "visual_context_summary": "A polished platinum solitaire ring with a round diamond."}"#
        .to_string()
}

fn concept_json() -> String {
    r#"{"title": "Midnight Facets", "storytelling_concept": "A slow hero reveal.",
        "aesthetic_direction": "Deep slate gray textured stone (#1C1C1C).",
        "lighting_mood": "Soft top-down key light.",
        "product_focus_strategy": "Macro on the center stone.",
        "narrative_flow": "Reveal, orbit, sparkle close-up. Product locked to reference."}"#
        .to_string()
}

fn plan_json() -> String {
    r#"{"visual_style_summary": "Premium dark studio",
        "scenes": [{"sequence_number": 1, "description": "Slow orbit of the ring",
                    "camera_angle": "macro", "camera_movement": "360-degree orbit",
                    "lighting_setup": "top-down key with side fill",
                    "focus_points": ["diamond facets"], "duration_estimate": 4.0}],
        "technical_notes": "100mm macro, f/2.8"}"#
        .to_string()
}

fn refinement_json(version: u32) -> String {
    format!(
        r#"{{"final_prompt": "Platinum diamond ring on deep slate gray stone, v{version}",
            "individual_prompts": ["Scene 1 prompt v{version}"],
            "rationale": "Hero shot first.", "negative_prompt": "morphing"}}"#
    )
}

fn qa_json(score: f64, feedback: &str) -> String {
    format!(
        r#"{{"score": {score}, "feedback": "{feedback}", "critique_points": [],
            "approved": {approved}}}"#,
        approved = score >= 9.0,
    )
}

fn continuity_json(approved: bool, violation: &str) -> String {
    if approved {
        r#"{"score": 10.0, "feedback": "All locks present.", "violation_type": null,
            "approved": true}"#
            .to_string()
    } else {
        format!(
            r#"{{"score": 0.0, "feedback": "Background lock missing.",
                "violation_type": "{violation}", "approved": false}}"#
        )
    }
}

fn request(video_type: VideoType, is_model: bool) -> GenerationRequest {
    GenerationRequest {
        product_description: Some("A platinum solitaire".to_string()),
        jewellery_type: "ring".to_string(),
        gender: "female".to_string(),
        video_type,
        duration: 8,
        base64_image: "base64imagedata".to_string(),
        is_music: true,
        is_model,
        model_consistency: true,
        reference_video: None,
    }
}

fn user_text(request: &ChatRequest) -> String {
    request.messages[1]
        .content
        .iter()
        .filter_map(|input| match input {
            Input::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn system_text(request: &ChatRequest) -> String {
    match &request.messages[0].content[0] {
        Input::Text(text) => text.clone(),
        other => panic!("unexpected system content: {other:?}"),
    }
}

fn count_continuity_calls(requests: &[ChatRequest]) -> usize {
    requests
        .iter()
        .filter(|r| system_text(r).contains("Continuity Control Agent"))
        .count()
}

#[tokio::test]
async fn first_iteration_approval_short_circuits_the_budget() {
    // Scenario: product-only ecommerce request approved on iteration 1.
    let driver = ScriptedDriver::new(vec![
        analysis_json(),
        concept_json(),
        plan_json(),
        refinement_json(1),
        qa_json(9.5, "Excellent"),
        continuity_json(true, ""),
    ]);
    let video = StubVideo::new("https://v.test/out.mp4");
    let orchestrator = Orchestrator::new(AgentExecutor::new(driver), video);

    let response = orchestrator
        .process(&request(VideoType::Ecommerce, false))
        .await
        .expect("pipeline should succeed");

    assert_eq!(response.feedback_iterations, 1);
    assert_eq!(response.qa_score, 9.5);
    assert_eq!(response.video_url, "https://v.test/out.mp4");
    assert_eq!(response.generation_id, "gen-test-1");
    assert_eq!(response.status, "success");
    assert_eq!(response.scene_prompts, vec!["Scene 1 prompt v1".to_string()]);
    assert!(response.final_prompt.contains("v1"));

    // Exactly six agent calls: analysis, concept, plan, refine, QA,
    // continuity. No wasted iterations after approval.
    let requests = orchestrator.agents().driver().recorded();
    assert_eq!(requests.len(), 6);
    assert_eq!(count_continuity_calls(&requests), 1);
}

#[tokio::test]
async fn qa_rejection_feeds_back_into_the_next_refinement() {
    // Scenario: QA scores 6.0 on iteration 1 and 9.5 on iteration 2, with
    // continuity approving iteration 2.
    let driver = ScriptedDriver::new(vec![
        analysis_json(),
        concept_json(),
        plan_json(),
        refinement_json(1),
        qa_json(6.0, "Too dark and flat"),
        refinement_json(2),
        qa_json(9.5, "Much better"),
        continuity_json(true, ""),
    ]);
    let video = StubVideo::new("https://v.test/out.mp4");
    let orchestrator = Orchestrator::new(AgentExecutor::new(driver), video);

    let response = orchestrator
        .process(&request(VideoType::Ecommerce, false))
        .await
        .expect("pipeline should succeed");

    assert_eq!(response.feedback_iterations, 2);
    assert_eq!(response.qa_score, 9.5);

    let requests = orchestrator.agents().driver().recorded();
    // analysis, concept, plan, refine1, qa1, refine2, qa2, continuity
    assert_eq!(requests.len(), 8);

    // Iteration 1 carried no feedback; iteration 2 carries exactly the QA
    // gate's rejection text.
    let refine1 = user_text(&requests[3]);
    assert!(refine1.contains("\"previous_feedback\":null"));
    let refine2 = user_text(&requests[5]);
    assert!(refine2.contains("QA Creative Feedback: Too dark and flat"));

    // Continuity never saw the QA-rejected iteration.
    assert_eq!(count_continuity_calls(&requests), 1);
}

#[tokio::test]
async fn continuity_rejection_carries_the_violation_tag() {
    let driver = ScriptedDriver::new(vec![
        analysis_json(),
        concept_json(),
        plan_json(),
        refinement_json(1),
        qa_json(9.2, "Good"),
        continuity_json(false, "Background Issue"),
        refinement_json(2),
        qa_json(9.4, "Good"),
        continuity_json(true, ""),
    ]);
    let video = StubVideo::new("https://v.test/out.mp4");
    let orchestrator = Orchestrator::new(AgentExecutor::new(driver), video);

    let response = orchestrator
        .process(&request(VideoType::Ecommerce, false))
        .await
        .expect("pipeline should succeed");

    assert_eq!(response.feedback_iterations, 2);

    let requests = orchestrator.agents().driver().recorded();
    let refine2 = user_text(&requests[6]);
    assert!(refine2.contains("STRICT RULE VIOLATION (Background Issue): Background lock missing."));
}

#[tokio::test]
async fn exhausted_budget_still_generates_with_the_last_prompt() {
    // Scenario: all three iterations rejected by continuity.
    let driver = ScriptedDriver::new(vec![
        analysis_json(),
        concept_json(),
        plan_json(),
        refinement_json(1),
        qa_json(9.1, "Good"),
        continuity_json(false, "Background Issue"),
        refinement_json(2),
        qa_json(9.1, "Good"),
        continuity_json(false, "Background Issue"),
        refinement_json(3),
        qa_json(9.1, "Good"),
        continuity_json(false, "Background Issue"),
    ]);
    let video = StubVideo::new("https://v.test/out.mp4");
    let orchestrator = Orchestrator::new(AgentExecutor::new(driver), video);

    let response = orchestrator
        .process(&request(VideoType::Ecommerce, false))
        .await
        .expect("best-effort fallthrough is not an error");

    assert_eq!(response.feedback_iterations, 3);
    assert!(response.final_prompt.contains("v3"));

    // The generation client ran exactly once, with iteration 3's prompt.
    let jobs = orchestrator.video().recorded();
    assert_eq!(jobs.len(), 1);
    assert!(jobs[0].prompt.contains("v3"));
    assert_eq!(jobs[0].duration, 8);
    assert!(!jobs[0].is_model);
}

#[tokio::test]
async fn qa_rejections_never_reach_continuity() {
    let driver = ScriptedDriver::new(vec![
        analysis_json(),
        concept_json(),
        plan_json(),
        refinement_json(1),
        qa_json(5.0, "Weak"),
        refinement_json(2),
        qa_json(6.0, "Still weak"),
        refinement_json(3),
        qa_json(7.0, "Closer"),
    ]);
    let video = StubVideo::new("https://v.test/out.mp4");
    let orchestrator = Orchestrator::new(AgentExecutor::new(driver), video);

    let response = orchestrator
        .process(&request(VideoType::Ugc, true))
        .await
        .expect("pipeline should succeed");

    assert_eq!(response.feedback_iterations, 3);
    assert_eq!(response.qa_score, 7.0);

    let requests = orchestrator.agents().driver().recorded();
    assert_eq!(requests.len(), 9);
    assert_eq!(count_continuity_calls(&requests), 0);

    // Best-effort generation still happened exactly once.
    assert_eq!(orchestrator.video().recorded().len(), 1);
}

#[tokio::test]
async fn fixed_stage_failure_aborts_before_generation() {
    // Concept agent returns nothing: the request fails and the video client
    // is never invoked.
    let driver = ScriptedDriver::new(vec![analysis_json(), String::new()]);
    let video = StubVideo::new("https://v.test/out.mp4");
    let orchestrator = Orchestrator::new(AgentExecutor::new(driver), video);

    let result = orchestrator
        .process(&request(VideoType::Ecommerce, false))
        .await;

    assert!(result.is_err());
    assert!(orchestrator.video().recorded().is_empty());
}

#[tokio::test]
async fn storage_failure_does_not_fail_the_response() {
    let driver = ScriptedDriver::new(vec![
        analysis_json(),
        concept_json(),
        plan_json(),
        refinement_json(1),
        qa_json(9.5, "Great"),
        continuity_json(true, ""),
    ]);
    // Empty video URL also means persist skips the download.
    let video = StubVideo::new("");

    let dir = tempfile::tempdir().unwrap();
    let store = cellini_storage::AssetStore::new(dir.path().join("assets")).unwrap();
    // A file where the generation directory should go forces persistence to
    // fail for this request.
    std::fs::write(dir.path().join("assets").join("gen-test-1"), b"blocker").unwrap();

    let orchestrator =
        Orchestrator::new(AgentExecutor::new(driver), video).with_store(store);

    let response = orchestrator
        .process(&request(VideoType::Ecommerce, false))
        .await
        .expect("storage failures are swallowed");
    assert_eq!(response.feedback_iterations, 1);
}

#[tokio::test]
async fn successful_persistence_writes_artifacts() {
    let driver = ScriptedDriver::new(vec![
        analysis_json(),
        concept_json(),
        plan_json(),
        refinement_json(1),
        qa_json(9.5, "Great"),
        continuity_json(true, ""),
    ]);
    let video = StubVideo::new("");

    let dir = tempfile::tempdir().unwrap();
    let store = cellini_storage::AssetStore::new(dir.path().join("assets")).unwrap();
    let orchestrator =
        Orchestrator::new(AgentExecutor::new(driver), video).with_store(store);

    orchestrator
        .process(&request(VideoType::Ecommerce, false))
        .await
        .expect("pipeline should succeed");

    let generation_dir = dir.path().join("assets").join("gen-test-1");
    assert!(generation_dir.join("concept.json").exists());
    assert!(generation_dir.join("qa_output.json").exists());
    assert!(generation_dir.join("continuity_output.json").exists());
}
