use anyhow::Result;
use breakapp_application::{CommandRequest, VoiceOrderingUseCase};

/// Processes one utterance and prints the response.
///
/// Pass the printed `session_id` back with `--session` to continue the
/// conversation.
pub async fn run(
    usecase: &VoiceOrderingUseCase,
    request: CommandRequest,
    json: bool,
) -> Result<()> {
    let language = request.language;
    let response = usecase.process_command(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        crate::render::response(&response, language);
        println!("session: {}", response.session_id);
    }
    Ok(())
}

