use anyhow::Result;
use breakapp_application::VoiceOrderingUseCase;

/// Answers the confirmation prompt of a stored session.
pub async fn run(
    usecase: &VoiceOrderingUseCase,
    user_id: &str,
    session_id: &str,
    confirmed: bool,
    json: bool,
) -> Result<()> {
    let result = usecase.confirm(user_id, session_id, confirmed).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        crate::render::confirmation(&result);
    }
    Ok(())
}
