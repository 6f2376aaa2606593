use cellini_core::{
    ConceptOutput, PromptRefinementOutput, QaAgentOutput, VisualDirectorOutput,
};
use cellini_storage::{AssetStore, GenerationArtifacts};

fn sample_concept() -> ConceptOutput {
    ConceptOutput {
        title: "Midnight Facets".to_string(),
        storytelling_concept: "A slow reveal of a solitaire ring.".to_string(),
        aesthetic_direction: "Deep slate gray stone, macro sparkle.".to_string(),
        lighting_mood: "Soft top-down key light.".to_string(),
        product_focus_strategy: "Macro on the center stone.".to_string(),
        narrative_flow: "Reveal, orbit, sparkle close-up.".to_string(),
    }
}

fn sample_plan() -> VisualDirectorOutput {
    VisualDirectorOutput {
        visual_style_summary: "Premium studio".to_string(),
        scenes: vec![],
        technical_notes: "100mm macro".to_string(),
    }
}

fn sample_prompt() -> PromptRefinementOutput {
    PromptRefinementOutput {
        final_prompt: "A diamond ring on deep slate gray stone.".to_string(),
        individual_prompts: vec!["Scene 1".to_string()],
        rationale: "Hero first.".to_string(),
        negative_prompt: Some("morphing".to_string()),
    }
}

#[tokio::test]
async fn persist_writes_all_artifact_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = AssetStore::new(dir.path().join("assets")).unwrap();

    let concept = sample_concept();
    let plan = sample_plan();
    let prompt = sample_prompt();
    let qa = QaAgentOutput {
        score: 9.5,
        feedback: "Strong".to_string(),
        critique_points: vec![],
        approved: true,
    };

    let artifacts = GenerationArtifacts {
        generation_id: "gen-42",
        // Empty URL: skip the network download in tests.
        video_url: "",
        concept: &concept,
        visual_plan: &plan,
        final_prompt: &prompt,
        qa_output: Some(&qa),
        continuity_output: None,
    };

    store.persist(&artifacts).await.unwrap();

    let base = dir.path().join("assets").join("gen-42");
    for name in [
        "concept.json",
        "visual_plan.json",
        "final_prompt.json",
        "qa_output.json",
        "continuity_output.json",
    ] {
        assert!(base.join(name).exists(), "missing artifact {name}");
    }
    assert!(!base.join("video.mp4").exists());

    // Artifacts round-trip through serde.
    let raw = std::fs::read_to_string(base.join("concept.json")).unwrap();
    let read_back: ConceptOutput = serde_json::from_str(&raw).unwrap();
    assert_eq!(read_back, concept);

    // A missing auditor output is stored as an empty document.
    let raw = std::fs::read_to_string(base.join("continuity_output.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[tokio::test]
async fn concurrent_generations_use_separate_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = AssetStore::new(dir.path()).unwrap();

    let concept = sample_concept();
    let plan = sample_plan();
    let prompt = sample_prompt();

    for id in ["gen-a", "gen-b"] {
        let artifacts = GenerationArtifacts {
            generation_id: id,
            video_url: "",
            concept: &concept,
            visual_plan: &plan,
            final_prompt: &prompt,
            qa_output: None,
            continuity_output: None,
        };
        store.persist(&artifacts).await.unwrap();
    }

    assert!(dir.path().join("gen-a").join("concept.json").exists());
    assert!(dir.path().join("gen-b").join("concept.json").exists());
}
