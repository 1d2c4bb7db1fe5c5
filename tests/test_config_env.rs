use ai_chef::client::{
    config::{BASE_URL_VAR, PUBLISHABLE_KEY_VAR, RECENT_LIMIT_VAR},
    ChefConfig, ChefError,
};
use pretty_assertions::assert_eq;
use serial_test::serial;

fn clear_env() {
    for key in [BASE_URL_VAR, PUBLISHABLE_KEY_VAR, RECENT_LIMIT_VAR] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_config_from_env() {
    clear_env();
    std::env::set_var(BASE_URL_VAR, "https://abc.supabase.co/");
    std::env::set_var(PUBLISHABLE_KEY_VAR, "sb_publishable_env");
    std::env::set_var(RECENT_LIMIT_VAR, "3");

    let config = ChefConfig::from_env().expect("Config should load");
    assert_eq!(config.base_url, "https://abc.supabase.co");
    assert_eq!(config.key.expose(), "sb_publishable_env");
    assert_eq!(config.recent_limit, 3);

    clear_env();
}

#[test]
#[serial]
fn test_config_from_empty_env() {
    clear_env();
    assert_eq!(
        ChefConfig::from_env().unwrap_err(),
        ChefError::ConfigMissing(vec![BASE_URL_VAR, PUBLISHABLE_KEY_VAR])
    );
}
