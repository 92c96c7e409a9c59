use anthropic_ox::{
    ChatRequest, ChatResponse, ContentBlock,
    message::{ChatMessage, Role},
    response::StopReason,
    tool::{Tool, ToolChoice},
};
use serde_json::{Value, json};

const RESPONSE_FIXTURE: &str = r#"{
    "id": "msg_013Zva2CMHLNnXjNJJKqJ2EF",
    "type": "message",
    "role": "assistant",
    "content": [
        {"type": "text", "text": "@startuml\nA -> B: call\nB --> A: return\n@enduml"},
        {"type": "tool_use", "id": "toolu_01A09q90qw90lq917835lq9", "name": "render", "input": {"zeta":1,"format":"png","options":{"theme":null,"scale":1.50},"tags":["b","a"]}}
    ],
    "model": "claude-3-5-sonnet-20241022",
    "stop_reason": "tool_use",
    "stop_sequence": null,
    "usage": {"input_tokens": 2095, "output_tokens": 503}
}"#;

#[test]
fn test_chat_request_from_wire_json() {
    let json = r#"{
        "model": "claude-3-5-sonnet-20241022",
        "max_tokens": 1000,
        "messages": [
            {"role": "user", "content": "Hello world"},
            {"role": "assistant", "content": "Hi"}
        ]
    }"#;

    let request: ChatRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.model, "claude-3-5-sonnet-20241022");
    assert_eq!(request.max_tokens, 1000);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role(), Role::User);
    assert_eq!(request.messages[0].content(), "Hello world");
    assert_eq!(request.messages[1].role(), Role::Assistant);
    assert!(request.temperature.is_none());
    assert!(request.tools.is_none());
    assert!(request.tool_choice.is_none());
}

#[test]
fn test_request_round_trip_preserves_every_field() {
    let request = ChatRequest::builder()
        .model("claude-3-5-sonnet-20241022")
        .messages([
            ChatMessage::system("You draw diagrams."),
            ChatMessage::user("A calls B then B returns to A"),
        ])
        .max_tokens(1000)
        .temperature(0.25)
        .tools(vec![Tool::new(
            "render",
            "Render markup",
            json!({"type": "object", "properties": {"format": {"type": "string"}}}),
        )])
        .tool_choice(ToolChoice::Auto)
        .build();

    let wire = serde_json::to_string(&request).unwrap();
    let back: ChatRequest = serde_json::from_str(&wire).unwrap();
    assert_eq!(back, request);

    let value: Value = serde_json::from_str(&wire).unwrap();
    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["max_tokens", "messages", "model", "temperature", "tool_choice", "tools"]
    );
}

#[test]
fn test_response_fixture_parses() {
    let response: ChatResponse = serde_json::from_str(RESPONSE_FIXTURE).unwrap();

    assert_eq!(response.id, "msg_013Zva2CMHLNnXjNJJKqJ2EF");
    assert_eq!(response.r#type, "message");
    assert_eq!(response.role, Role::Assistant);
    assert_eq!(response.model, "claude-3-5-sonnet-20241022");
    assert_eq!(response.stop_reason.as_deref(), Some("tool_use"));
    assert_eq!(response.stop_reason_kind(), Some(StopReason::ToolUse));
    assert_eq!(response.usage.input_tokens, 2095);
    assert_eq!(response.usage.output_tokens, 503);
    assert_eq!(response.usage.total_tokens(), 2598);
    assert_eq!(response.content.len(), 2);
    assert_eq!(
        response.content[0].as_text(),
        Some("@startuml\nA -> B: call\nB --> A: return\n@enduml")
    );
}

#[test]
fn test_tool_use_block_round_trips_untouched() {
    let response: ChatResponse = serde_json::from_str(RESPONSE_FIXTURE).unwrap();
    let wire = serde_json::to_string(&response).unwrap();
    let back: ChatResponse = serde_json::from_str(&wire).unwrap();
    assert_eq!(back, response);

    let ContentBlock::ToolUse(tool_use) = &back.content[1] else {
        panic!("Expected tool_use block, got {:?}", back.content[1]);
    };
    assert_eq!(tool_use.id, "toolu_01A09q90qw90lq917835lq9");
    assert_eq!(tool_use.name, "render");
    const INPUT: &str = r#"{"zeta":1,"format":"png","options":{"theme":null,"scale":1.50},"tags":["b","a"]}"#;
    assert_eq!(tool_use.input.get(), INPUT);
    assert!(wire.contains(&format!(r#""input":{INPUT}"#)));
    assert_eq!(tool_use.input_value().unwrap()["options"]["scale"], 1.5);

    let original: Value = serde_json::from_str(RESPONSE_FIXTURE).unwrap();
    let reserialized: Value = serde_json::from_str(&wire).unwrap();
    assert_eq!(reserialized["content"], original["content"]);
    assert_eq!(reserialized["usage"], original["usage"]);
}
