use crate::chat::ResolvedChat;

/// Canned SSE body returned in place of an upstream 401 outside production.
pub fn mock_sse_body(chat: &ResolvedChat) -> String {
    let text = format!(
        "🏟️ **Development Mode** - Mock response for testing\n\n\
         I would normally connect to the sports-proxy to get real Yankees data, \
         but authentication is required for the production API.\n\n\
         **Test Query:** {}\n**Sport Context:** {}\n**User ID:** {}\n\n\
         In production, this would resolve team names, fetch roster data, and \
         provide real-time statistics through the sports data platform.",
        chat.message, chat.sport, chat.user_id
    );
    let text_frame = serde_json::json!({ "text": text });

    let mut body = String::new();
    for payload in [
        r#"{"response_created":true}"#.to_string(),
        text_frame.to_string(),
        r#"{"response_completed":true}"#.to_string(),
        "[DONE]".to_string(),
    ] {
        body.push_str("data: ");
        body.push_str(&payload);
        body.push_str("\n\n");
    }
    body
}
