use std::sync::Mutex;

use async_trait::async_trait;
use cellini_agents::{AgentExecutor, continuity, image_analysis, qa};
use cellini_core::{
    ChatRequest, ChatResponse, ContinuityControlOutput, FinishReason, Input, Output,
    PromptRefinementOutput, QaAgentOutput, Role, VideoType, VisualDirectorOutput,
};
use cellini_error::{AgentErrorKind, CelliniErrorKind, CelliniResult};
use cellini_interface::AgentDriver;

/// Mock driver that returns scripted responses and records every request.
struct MockDriver {
    model: &'static str,
    responses: Mutex<Vec<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockDriver {
    fn new(model: &'static str, responses: Vec<ChatResponse>) -> Self {
        Self {
            model,
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentDriver for MockDriver {
    async fn generate(&self, req: &ChatRequest) -> CelliniResult<ChatResponse> {
        self.requests.lock().unwrap().push(req.clone());
        Ok(self.responses.lock().unwrap().remove(0))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        self.model
    }
}

fn sample_refinement() -> PromptRefinementOutput {
    PromptRefinementOutput {
        final_prompt: "Gold ring on light ash gray silk fabric (#E8E8E8).".to_string(),
        individual_prompts: vec!["Scene 1".to_string()],
        rationale: "Hero shot first.".to_string(),
        negative_prompt: None,
    }
}

fn sample_plan() -> VisualDirectorOutput {
    VisualDirectorOutput {
        visual_style_summary: "Warm premium studio".to_string(),
        scenes: vec![],
        technical_notes: "100mm macro, f/2.8".to_string(),
    }
}

fn agent_error_kind(err: cellini_error::CelliniError) -> AgentErrorKind {
    match err.kind() {
        CelliniErrorKind::Agent(agent) => agent.kind.clone(),
        other => panic!("expected agent error, got {other}"),
    }
}

#[tokio::test]
async fn qa_call_parses_fenced_json() {
    let scripted = ChatResponse::from_text(
        "Here is my audit:\n```json\n{\"score\": 9.5, \"feedback\": \"Excellent\", \"critique_points\": [], \"approved\": true}\n```",
    );
    let driver = MockDriver::new("gpt-4.1-nano", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    let output: QaAgentOutput = qa::run(&executor, &sample_refinement(), "Target: ugc video")
        .await
        .expect("call should succeed");

    assert_eq!(output.score, 9.5);
    assert!(output.approved);

    // The QA agent runs without vision: no model override, schema in the
    // system message, context in the user message.
    let requests = executor.driver().recorded();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].model.is_none());

    let system_text = match &requests[0].messages[0].content[0] {
        Input::Text(text) => text.clone(),
        other => panic!("unexpected system content: {other:?}"),
    };
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert!(system_text.contains("Required JSON Schema:"));
    assert!(system_text.contains("QAAgentOutput"));

    let user_text = match &requests[0].messages[1].content[0] {
        Input::Text(text) => text.clone(),
        other => panic!("unexpected user content: {other:?}"),
    };
    assert!(user_text.contains("Evaluate this prompt against luxury standards."));
    assert!(user_text.contains("Target: ugc video"));
}

#[tokio::test]
async fn image_analysis_attaches_image_and_overrides_model() {
    let scripted = ChatResponse::from_text(
        r#"{"jewellery_type": "Ring", "materials": "Platinum", "gemstones": "Diamond",
            "design_style": "Modern", "detailed_features": "None visible",
            "color_palette": "White and silver", "visual_context_summary": "A platinum ring."}"#,
    );
    // A text-only model configured: the executor must force the vision model.
    let driver = MockDriver::new("nano-text-1", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    let output = image_analysis::run(&executor, "aGVsbG8=")
        .await
        .expect("call should succeed");
    assert_eq!(output.jewellery_type, "Ring");

    let requests = executor.driver().recorded();
    assert_eq!(requests[0].model.as_deref(), Some("gpt-4o"));
    let user_content = &requests[0].messages[1].content;
    assert_eq!(user_content.len(), 2);
    assert!(matches!(user_content[1], Input::Image { .. }));
}

#[tokio::test]
async fn vision_capable_model_is_not_overridden() {
    let scripted = ChatResponse::from_text(
        r#"{"jewellery_type": "Ring", "materials": "Gold", "gemstones": "None",
            "design_style": "Minimalist", "detailed_features": "Plain band",
            "color_palette": "Gold", "visual_context_summary": "A gold band."}"#,
    );
    let driver = MockDriver::new("gpt-4o", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    image_analysis::run(&executor, "aGVsbG8=").await.unwrap();

    let requests = executor.driver().recorded();
    assert!(requests[0].model.is_none());
}

#[tokio::test]
async fn refusal_maps_to_content_rejected() {
    let scripted = ChatResponse {
        outputs: vec![],
        finish_reason: Some(FinishReason::Stop),
        refusal: Some("I cannot produce that.".to_string()),
    };
    let driver = MockDriver::new("gpt-4.1-nano", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    let err = qa::run(&executor, &sample_refinement(), "req")
        .await
        .unwrap_err();
    match agent_error_kind(err) {
        AgentErrorKind::ContentRejected(reason) => {
            assert!(reason.contains("cannot produce"));
        }
        other => panic!("unexpected kind: {other}"),
    }
}

#[tokio::test]
async fn content_filter_maps_to_content_rejected() {
    let scripted = ChatResponse {
        outputs: vec![],
        finish_reason: Some(FinishReason::ContentFilter),
        refusal: None,
    };
    let driver = MockDriver::new("gpt-4.1-nano", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    let err = qa::run(&executor, &sample_refinement(), "req")
        .await
        .unwrap_err();
    assert!(matches!(
        agent_error_kind(err),
        AgentErrorKind::ContentRejected(_)
    ));
}

#[tokio::test]
async fn empty_response_carries_finish_reason() {
    let scripted = ChatResponse {
        outputs: vec![Output::Text("   ".to_string())],
        finish_reason: Some(FinishReason::Length),
        refusal: None,
    };
    let driver = MockDriver::new("gpt-4.1-nano", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    let err = qa::run(&executor, &sample_refinement(), "req")
        .await
        .unwrap_err();
    match agent_error_kind(err) {
        AgentErrorKind::EmptyResponse { finish_reason } => {
            assert_eq!(finish_reason.as_deref(), Some("length"));
        }
        other => panic!("unexpected kind: {other}"),
    }
}

#[tokio::test]
async fn schema_mismatch_is_a_validation_failure() {
    let scripted = ChatResponse::from_text(r#"{"score": "very good"}"#);
    let driver = MockDriver::new("gpt-4.1-nano", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    let err = qa::run(&executor, &sample_refinement(), "req")
        .await
        .unwrap_err();
    assert!(matches!(
        agent_error_kind(err),
        AgentErrorKind::ValidationFailure(_)
    ));
}

#[tokio::test]
async fn native_json_output_skips_extraction() {
    let scripted = ChatResponse {
        outputs: vec![Output::Json(serde_json::json!({
            "score": 10.0,
            "feedback": "All locks present",
            "approved": true
        }))],
        finish_reason: Some(FinishReason::Stop),
        refusal: None,
    };
    let driver = MockDriver::new("gpt-4.1-nano", vec![scripted]);
    let executor = AgentExecutor::new(driver);

    let output: ContinuityControlOutput = continuity::run(
        &executor,
        &sample_refinement(),
        &sample_plan(),
        false,
        VideoType::Ecommerce,
    )
    .await
    .expect("call should succeed");

    assert_eq!(output.score, 10.0);
    assert!(output.approved);
    assert!(output.violation_type.is_none());
}
