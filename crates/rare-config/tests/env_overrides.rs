use figment::Jail;
use rare_config::RareConfig;

#[test]
fn prefixed_env_overrides_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("RAREAGENT_SESSION__MAX_ITERATIONS", "3");
        jail.set_env("RAREAGENT_REASONING__MODEL", "mixtral-8x7b");

        let config = RareConfig::load().expect("config loads");
        assert_eq!(config.session.max_iterations, 3);
        assert_eq!(config.reasoning.model, "mixtral-8x7b");
        Ok(())
    });
}

#[test]
fn groq_api_key_fills_reasoning_key() {
    Jail::expect_with(|jail| {
        jail.set_env("GROQ_API_KEY", "gsk_from_provider_var");

        let config = RareConfig::load().expect("config loads");
        assert_eq!(config.reasoning.api_key, "gsk_from_provider_var");
        assert!(config.reasoning.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_key_beats_provider_var() {
    Jail::expect_with(|jail| {
        jail.set_env("GROQ_API_KEY", "gsk_provider");
        jail.set_env("RAREAGENT_REASONING__API_KEY", "gsk_prefixed");

        let config = RareConfig::load().expect("config loads");
        assert_eq!(config.reasoning.api_key, "gsk_prefixed");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".rareagent")?;
        jail.create_file(
            ".rareagent/config.toml",
            "[session]\nmax_retries = 1\n",
        )?;
        jail.set_env("RAREAGENT_SESSION__MAX_RETRIES", "5");

        let config = RareConfig::load().expect("config loads");
        assert_eq!(config.session.max_retries, 5);
        Ok(())
    });
}
