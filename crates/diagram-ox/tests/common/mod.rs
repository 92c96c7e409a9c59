#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use anthropic_ox::{
    AnthropicRequestError, ChatRequest, ChatResponse, ContentBlock, message::Role, usage::Usage,
};
use async_trait::async_trait;
use diagram_ox::{ChatClient, RenderError, Renderer};

pub const SEQUENCE_MARKUP: &str = "@startuml\nA -> B\nB --> A\n@enduml";

pub fn response_with(content: Vec<ContentBlock>) -> ChatResponse {
    ChatResponse {
        id: "msg_test".to_string(),
        r#type: "message".to_string(),
        role: Role::Assistant,
        content,
        model: "claude-3-5-sonnet-20241022".to_string(),
        stop_reason: Some("end_turn".to_string()),
        stop_sequence: None,
        usage: Usage {
            input_tokens: 42,
            output_tokens: 17,
        },
    }
}

enum Reply {
    Response(ChatResponse),
    Api { status: u16, body: String },
}

/// Model stand-in that records every request and answers with a canned reply.
#[derive(Clone)]
pub struct FakeClient {
    reply: Arc<Reply>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
    calls: Arc<AtomicUsize>,
}

impl FakeClient {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply: Arc::new(reply),
            requests: Arc::default(),
            calls: Arc::default(),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::with_reply(Reply::Response(response_with(vec![ContentBlock::text(text)])))
    }

    pub fn response(response: ChatResponse) -> Self {
        Self::with_reply(Reply::Response(response))
    }

    pub fn api_error(status: u16, body: &str) -> Self {
        Self::with_reply(Reply::Api {
            status,
            body: body.to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for FakeClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, AnthropicRequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match self.reply.as_ref() {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Api { status, body } => Err(AnthropicRequestError::Api {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Writes a fake PNG next to the markup, the way `plantuml -tpng` does.
#[derive(Default)]
pub struct FileRenderer {
    seen: Mutex<Vec<(PathBuf, String)>>,
}

impl FileRenderer {
    /// Every markup path handed to the renderer, with the file contents at that time.
    pub fn seen(&self) -> Vec<(PathBuf, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for FileRenderer {
    fn markup_extension(&self) -> &str {
        "puml"
    }

    async fn render(&self, markup_path: &Path) -> Result<PathBuf, RenderError> {
        let markup = tokio::fs::read_to_string(markup_path).await.unwrap();
        self.seen
            .lock()
            .unwrap()
            .push((markup_path.to_path_buf(), markup));
        let image = markup_path.with_extension("png");
        tokio::fs::write(&image, b"\x89PNG\r\n\x1a\n").await.unwrap();
        Ok(image)
    }
}

/// Fails the way `plantuml` does on a syntax error.
pub struct FailingRenderer;

pub const SYNTAX_ERROR: &str = "Error line 2 in file: diagram.puml\nSyntax Error?";

#[async_trait]
impl Renderer for FailingRenderer {
    fn markup_extension(&self) -> &str {
        "puml"
    }

    async fn render(&self, markup_path: &Path) -> Result<PathBuf, RenderError> {
        assert!(markup_path.exists(), "markup must exist while rendering");
        Err(RenderError::ExitStatus {
            program: "plantuml".to_string(),
            status: "exit status: 1".to_string(),
            code: Some(1),
            stderr: SYNTAX_ERROR.to_string(),
        })
    }
}

/// Files currently in `dir`, sorted by name.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
