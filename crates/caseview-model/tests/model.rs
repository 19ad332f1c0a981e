use caseview_model::{
    ConversionTask, DEFAULT_MODEL_PREFIX, DocumentFormat, ModelError, PathStrategyKind,
    builtin_profiles, conversion_tasks, find_profile,
};

#[test]
fn prefix_path_without_subfolder_is_base_verbatim() {
    let ai2d = find_profile("AI2D").unwrap();
    assert_eq!(ai2d.prefix_path("/data/LMUData"), "/data/LMUData");
}

#[test]
fn prefix_path_with_subfolder_ends_in_separator() {
    let mmmu = find_profile("MMMU").unwrap();
    assert_eq!(mmmu.prefix_path("/data/LMUData"), "/data/LMUData/MMMU_DEV_VAL/");
    assert_eq!(
        mmmu.prefix_path("/data/LMUData/"),
        "/data/LMUData/MMMU_DEV_VAL/"
    );
}

#[test]
fn conversion_tasks_substitute_model_prefix() {
    let tasks = conversion_tasks("my_model").unwrap();
    assert_eq!(tasks.len(), 12);
    let realworld = tasks
        .iter()
        .find(|task| task.profile.name == "RealWorldQA")
        .unwrap();
    assert_eq!(
        realworld.input_filename,
        "my_model_RealWorldQA_openai_result.xlsx"
    );
    assert_eq!(realworld.input_filename, realworld.output_filename);
}

#[test]
fn conversion_tasks_reject_empty_prefix() {
    assert!(matches!(
        conversion_tasks("  "),
        Err(ModelError::EmptyModelPrefix)
    ));
}

#[test]
fn task_for_profile_uses_profile_template() {
    let profile = find_profile("WeMath").unwrap();
    let task = ConversionTask::for_profile(&profile, DEFAULT_MODEL_PREFIX);
    assert_eq!(task.input_filename, "taichu_vl_moe_WeMath_gpt4o-mini.xlsx");
    assert_eq!(
        profile.file_name_as(DEFAULT_MODEL_PREFIX, DocumentFormat::Csv),
        "taichu_vl_moe_WeMath_gpt4o-mini.csv"
    );
}

#[test]
fn strategy_path_columns() {
    assert_eq!(
        PathStrategyKind::DirectPrefix.path_columns(),
        vec!["image_path".to_string()]
    );
    assert_eq!(
        PathStrategyKind::id_synthesis("id", ".png").path_columns(),
        vec!["id".to_string()]
    );
    assert!(PathStrategyKind::Passthrough.path_columns().is_empty());
}

#[test]
fn strategy_serializes_tagged() {
    let json = serde_json::to_value(PathStrategyKind::id_synthesis("index", ".png")).unwrap();
    assert_eq!(json["kind"], "id_synthesis");
    assert_eq!(json["source_field"], "index");
    let round: PathStrategyKind = serde_json::from_value(json).unwrap();
    assert_eq!(round, PathStrategyKind::id_synthesis("index", ".png"));
}

#[test]
fn profile_keyword_matches_file_names_case_insensitively() {
    let profiles = builtin_profiles();
    let mmstar = profiles.iter().find(|p| p.name == "MMStar").unwrap();
    assert!(mmstar.matches_file_name("model_mmstar_openai_result.csv"));
    assert!(!mmstar.matches_file_name("model_MMMU_DEV_VAL.csv"));
}
