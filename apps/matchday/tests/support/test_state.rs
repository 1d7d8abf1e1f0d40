use matchday::config::db::DbProfile;
use matchday::config::engine::EngineConfig;
use matchday::infra::state::build_state;
use matchday::state::app_state::AppState;
use matchday::AppError;

/// Fresh in-memory database with instant replays.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_test_state_with(EngineConfig::for_tests()).await
}

pub async fn build_test_state_with(engine: EngineConfig) -> Result<AppState, AppError> {
    build_state()
        .with_db(DbProfile::Test)
        .with_engine(engine)
        .build()
        .await
}
