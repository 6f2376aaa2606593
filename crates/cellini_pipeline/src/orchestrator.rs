//! The orchestration state machine.
//!
//! Stages run strictly in sequence within one request:
//! analyze, concept, direct, then the bounded refine/audit cycle, then
//! generation and best-effort persistence. The analysis stages run exactly
//! once and any failure there aborts the request; recovery loops exist only
//! at the creative/compliance level.

use cellini_agents::{
    AgentExecutor, concept, continuity, image_analysis, prompt_refinement, qa, visual_director,
};
use cellini_core::{
    ContinuityControlOutput, GenerationRequest, GenerationResponse, PromptRefinementOutput,
    QA_APPROVAL_THRESHOLD, QaAgentOutput, VideoJob,
};
use cellini_error::{CelliniResult, PipelineError, PipelineErrorKind};
use cellini_interface::{AgentDriver, VideoGenerator};
use cellini_storage::{AssetStore, GenerationArtifacts};
use tracing::{error, info, instrument, warn};

/// Default refinement iteration budget.
const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Sequences one generation request through the full pipeline.
///
/// Owns no per-request state: every `process` call carries its own loop
/// state, so one orchestrator can serve many concurrent requests.
pub struct Orchestrator<D, V> {
    agents: AgentExecutor<D>,
    video: V,
    store: Option<AssetStore>,
    max_iterations: u32,
}

impl<D: AgentDriver, V: VideoGenerator> Orchestrator<D, V> {
    /// Create an orchestrator over an agent executor and a video generator.
    pub fn new(agents: AgentExecutor<D>, video: V) -> Self {
        Self {
            agents,
            video,
            store: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Attach an asset store; persistence stays best-effort.
    pub fn with_store(mut self, store: AssetStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the refinement iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Get a reference to the agent executor.
    pub fn agents(&self) -> &AgentExecutor<D> {
        &self.agents
    }

    /// Get a reference to the video generator.
    pub fn video(&self) -> &V {
        &self.video
    }

    /// Run one request through the pipeline.
    ///
    /// # Errors
    ///
    /// Any agent failure in the fixed stages, and any generation failure,
    /// aborts the request. An exhausted refinement budget is NOT an error:
    /// generation proceeds with the last refined prompt. Storage failures
    /// are logged and swallowed.
    #[instrument(
        skip(self, request),
        fields(
            jewellery_type = %request.jewellery_type,
            video_type = %request.video_type,
            is_model = request.is_model
        )
    )]
    pub async fn process(&self, request: &GenerationRequest) -> CelliniResult<GenerationResponse> {
        info!("Starting orchestration");

        // 0. Image analysis
        info!("Executing image analysis agent");
        let image_analysis = image_analysis::run(&self.agents, &request.base64_image).await?;
        let visual_context = image_analysis.visual_context_summary.as_str();
        info!(
            summary_chars = visual_context.len(),
            "Visual context generated"
        );

        // 1. Concept
        info!("Executing concept agent");
        let brief = concept_brief(request, visual_context);
        let concept = concept::run(&self.agents, &brief).await?;

        // 2. Visual direction
        info!("Executing visual director agent");
        let visual_plan = visual_director::run(&self.agents, &concept, visual_context).await?;

        // 3. Refinement cycle
        let requirements = qa_requirements(request);
        let mut feedback: Option<String> = None;
        let mut iterations = 0u32;
        let mut qa_score = 0.0f64;
        let mut last_qa: Option<QaAgentOutput> = None;
        let mut last_continuity: Option<ContinuityControlOutput> = None;
        let mut refined: Option<PromptRefinementOutput> = None;

        for i in 0..self.max_iterations {
            iterations = i + 1;
            info!(iteration = iterations, "Refinement iteration");

            let candidate = prompt_refinement::run(
                &self.agents,
                &concept,
                &visual_plan,
                feedback.as_deref(),
                request.reference_video.as_deref(),
                request.model_consistency,
            )
            .await?;

            let qa_output = qa::run(&self.agents, &candidate, &requirements).await?;
            qa_score = qa_output.score;
            info!(score = qa_score, "QA score");

            if !qa_output.approved {
                info!(feedback = %qa_output.feedback, "QA rejected");
                feedback = Some(format!("QA Creative Feedback: {}", qa_output.feedback));
                last_qa = Some(qa_output);
                refined = Some(candidate);
                continue;
            }
            last_qa = Some(qa_output);

            // Continuity is only spent on prompts QA already approved.
            info!("Executing continuity control agent");
            let continuity_output = continuity::run(
                &self.agents,
                &candidate,
                &visual_plan,
                request.is_model,
                request.video_type,
            )
            .await?;

            if !continuity_output.approved {
                let violation = continuity_output
                    .violation_type
                    .as_deref()
                    .unwrap_or("Unspecified")
                    .to_string();
                info!(violation = %violation, "Continuity rejected");
                feedback = Some(format!(
                    "STRICT RULE VIOLATION ({}): {}",
                    violation, continuity_output.feedback
                ));
                last_continuity = Some(continuity_output);
                refined = Some(candidate);
                continue;
            }

            info!("QA and continuity approved");
            last_continuity = Some(continuity_output);
            refined = Some(candidate);
            break;
        }

        let refined = refined.ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::Configuration(
                "refinement iteration budget is zero".to_string(),
            ))
        })?;

        // 4. Video generation, best-effort past an exhausted budget.
        if qa_score < QA_APPROVAL_THRESHOLD {
            warn!(
                score = qa_score,
                iterations, "Proceeding with unapproved prompt after exhausting retries"
            );
        }

        info!("Executing video generation");
        let job = VideoJob {
            prompt: refined.final_prompt.clone(),
            image: request.base64_image.clone(),
            video_type: request.video_type,
            duration: request.duration,
            is_music: request.is_music,
            is_model: request.is_model,
        };
        let generation = self.video.generate(&job).await?;

        // 5. Asset storage; failures never reach the caller.
        if let Some(store) = &self.store {
            let artifacts = GenerationArtifacts {
                generation_id: &generation.generation_id,
                video_url: &generation.video_url,
                concept: &concept,
                visual_plan: &visual_plan,
                final_prompt: &refined,
                qa_output: last_qa.as_ref(),
                continuity_output: last_continuity.as_ref(),
            };
            if let Err(e) = store.persist(&artifacts).await {
                error!(
                    generation_id = %generation.generation_id,
                    error = %e,
                    "Failed to save generation assets"
                );
            }
        }

        Ok(GenerationResponse {
            video_url: generation.video_url,
            generation_id: generation.generation_id,
            status: generation.status,
            concept,
            visual_plan,
            final_prompt: refined.final_prompt,
            scene_prompts: refined.individual_prompts,
            qa_score,
            feedback_iterations: iterations,
        })
    }
}

/// Assemble the concept agent's brief from the request and visual analysis.
fn concept_brief(request: &GenerationRequest, visual_context: &str) -> String {
    format!(
        "Jewellery Type: {}\n\
        Target Gender: {}\n\
        Video Theme: {}\n\
        Model Included: {}\n\
        Music Enabled: {}\n\
        Duration: {} seconds\n\
        Product Description: {}\n\
        Visual Analysis: {}",
        request.jewellery_type,
        request.gender,
        request.video_type,
        request.is_model,
        request.is_music,
        request.duration,
        request
            .product_description
            .as_deref()
            .unwrap_or("No description provided."),
        visual_context,
    )
}

/// Assemble the original-requirements line handed to the quality auditor.
fn qa_requirements(request: &GenerationRequest) -> String {
    format!(
        "Target: {} video for {}. Description: {}",
        request.video_type,
        request.jewellery_type,
        request.product_description.as_deref().unwrap_or("None"),
    )
}
