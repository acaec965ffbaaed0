use recall_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = RecallConfig::from_toml("").unwrap();

    // Storage defaults
    assert_eq!(config.storage.db_path, "recall.db");
    assert_eq!(config.storage.read_pool_size, 4);

    // Learning defaults: off until the deployer opts in.
    assert!(!config.learning.enabled);
    assert_eq!(config.learning.term_ttl_days, 30);
    assert_eq!(config.learning.max_terms_per_selection, 3);
    assert_eq!(config.learning.max_terms_per_memory, 8);
    assert_eq!(config.learning.top_n_exclusion, 3);
    assert_eq!(config.learning.min_memory_age_hours, 72);
    assert_eq!(config.learning.learned_trigger_weight, 0.7);

    // Promotion defaults
    assert_eq!(config.promotion.important_threshold, 5);
    assert_eq!(config.promotion.critical_threshold, 10);
    assert_eq!(config.promotion.max_promotions_per_window, 3);
    assert_eq!(config.promotion.window_hours, 8);

    // Negative feedback defaults
    assert!(config.negative_feedback.enabled);
    assert_eq!(config.negative_feedback.penalty_per_negative, 0.1);
    assert_eq!(config.negative_feedback.floor, 0.3);
    assert_eq!(config.negative_feedback.recovery_half_life_days, 30);

    // Folder scoring defaults
    assert_eq!(config.folder_scoring.decay_rate, 0.10);
    assert_eq!(config.folder_scoring.max_activity_memories, 5);
    assert_eq!(config.folder_scoring.validation_score, 0.5);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[learning]
enabled = true
max_terms_per_memory = 6

[promotion]
max_promotions_per_window = 10
window_hours = 24
"#;
    let config = RecallConfig::from_toml(toml).unwrap();
    assert!(config.learning.enabled);
    assert_eq!(config.learning.max_terms_per_memory, 6);
    // Non-overridden fields keep defaults
    assert_eq!(config.learning.max_terms_per_selection, 3);
    assert_eq!(config.promotion.max_promotions_per_window, 10);
    assert_eq!(config.promotion.window_hours, 24);
    assert_eq!(config.promotion.important_threshold, 5); // default
}

#[test]
fn derived_durations() {
    let config = RecallConfig::default();
    assert_eq!(config.learning.term_ttl_secs(), 30 * 86_400);
    assert_eq!(config.learning.min_memory_age_secs(), 72 * 3600);
    assert_eq!(config.promotion.window_ms(), 8 * 3_600_000);
    assert_eq!(
        config.negative_feedback.recovery_half_life_ms(),
        30 * 86_400_000
    );
}

#[test]
fn config_rejects_malformed_toml() {
    let err = RecallConfig::from_toml("[learning\nenabled = ").unwrap_err();
    assert!(matches!(err, recall_core::RecallError::ConfigError(_)));
}

#[test]
fn config_rejects_out_of_range_negative_feedback() {
    for toml in [
        "[negative_feedback]\nfloor = 1.5\n",
        "[negative_feedback]\nfloor = -0.1\n",
        "[negative_feedback]\nfloor = nan\n",
        "[negative_feedback]\npenalty_per_negative = -0.1\n",
        "[negative_feedback]\npenalty_per_negative = inf\n",
    ] {
        let err = RecallConfig::from_toml(toml).unwrap_err();
        assert!(
            matches!(err, recall_core::RecallError::ConfigError(_)),
            "{toml:?} was accepted"
        );
    }

    let edges =
        RecallConfig::from_toml("[negative_feedback]\nfloor = 1.0\npenalty_per_negative = 0.0\n")
            .unwrap();
    assert_eq!(edges.negative_feedback.floor, 1.0);
    assert!(NegativeFeedbackConfig::default().validate().is_ok());
}

#[test]
fn config_serde_roundtrip() {
    let mut config = RecallConfig::default();
    config.learning.enabled = true;
    let toml_str = config.to_toml().unwrap();
    let roundtripped = RecallConfig::from_toml(&toml_str).unwrap();
    assert!(roundtripped.learning.enabled);
    assert_eq!(
        roundtripped.promotion.window_hours,
        config.promotion.window_hours
    );
}
