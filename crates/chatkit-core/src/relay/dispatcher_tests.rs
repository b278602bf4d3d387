use super::*;
use crate::provider::stub::{Operation, ScriptedProvider};
use crate::relay::normalizer::normalize;
use chatkit_types::ChatRequest;
use serde_json::json;

fn normalized(files: &[&str], vector_store_id: Option<&str>) -> NormalizedRequest {
    normalize(
        ChatRequest {
            session_id: Some("s1".to_string()),
            text: Some("hi".to_string()),
            staged_file_ids: files.iter().map(|f| f.to_string()).collect(),
            vector_store_id: vector_store_id.map(str::to_string),
        },
        false,
    )
    .unwrap()
}

fn dispatcher(provider: &Arc<ScriptedProvider>) -> Dispatcher {
    Dispatcher::new(provider.clone(), "gpt-4o-mini")
}

#[tokio::test]
async fn test_session_scoped_success_stops_immediately() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .succeed(Operation::SessionResponse, json!({"id": "r1", "output_text": "hi there"})),
    );

    let outcome = dispatcher(&provider).dispatch(&normalized(&[], None), "t").await.unwrap();

    assert_eq!(outcome.strategy, CallStrategy::SessionScoped);
    assert_eq!(outcome.attempted, vec![CallStrategy::SessionScoped]);
    assert_eq!(outcome.response.output_text(), Some("hi there"));

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target.as_deref(), Some("s1"));
    assert_eq!(calls[0].body["model"], "gpt-4o-mini");
    assert_eq!(
        calls[0].body["input"],
        json!([{"role": "user", "content": [{"type": "input_text", "text": "hi"}]}])
    );
}

#[tokio::test]
async fn test_vector_store_bound_through_tool_resources() {
    let provider = Arc::new(
        ScriptedProvider::new().succeed(Operation::SessionResponse, json!({"id": "r1"})),
    );

    dispatcher(&provider).dispatch(&normalized(&[], Some("vs1")), "t").await.unwrap();

    let body = &provider.calls()[0].body;
    assert_eq!(body["tools"], json!([{"type": "file_search"}]));
    assert_eq!(body["tool_resources"], json!({"file_search": {"vector_store_ids": ["vs1"]}}));
    assert_eq!(body["metadata"]["use_tools"], "true");
}

#[tokio::test]
async fn test_falls_back_in_order_until_stateless() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .succeed(Operation::Response, json!({"id": "r3", "output_text": "done"})),
    );

    let outcome =
        dispatcher(&provider).dispatch(&normalized(&["f1"], Some("vs1")), "t").await.unwrap();

    assert_eq!(outcome.strategy, CallStrategy::Stateless);
    assert_eq!(outcome.attempted, CallStrategy::ORDERED.to_vec());

    let operations: Vec<Operation> = provider.calls().iter().map(|c| c.operation).collect();
    assert_eq!(
        operations,
        vec![
            Operation::SessionResponse,
            Operation::CreateThread,
            Operation::ThreadResponse,
            Operation::Response,
        ]
    );

    let thread_call = &provider.calls_for(Operation::ThreadResponse)[0];
    assert_eq!(thread_call.target.as_deref(), Some("thread_stub"));

    let stateless = &provider.calls_for(Operation::Response)[0].body;
    assert!(stateless.get("tool_resources").is_none());
    assert_eq!(stateless["tools"], json!([{"type": "file_search", "vector_store_ids": ["vs1"]}]));
    assert_eq!(stateless["input"][0]["attachments"], json!([{"file_id": "f1"}]));
    assert_eq!(
        stateless["metadata"]["fallback_error_1"],
        "session_scoped: operation 'chatkit.sessions.responses.create' not supported by provider"
    );
    assert_eq!(
        stateless["metadata"]["fallback_error_2"],
        "thread_scoped: operation 'threads.responses.create' not supported by provider"
    );
    assert!(stateless["metadata"].get("session_id").is_none());
    assert_eq!(provider.calls_for(Operation::SessionResponse)[0].body["metadata"]["session_id"], "s1");
}

#[tokio::test]
async fn test_thread_creation_unsupported_falls_through() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .fail(Operation::CreateThread, ProviderCallError::unsupported("threads.create"))
            .succeed(Operation::Response, json!({"id": "r3"})),
    );

    let outcome = dispatcher(&provider).dispatch(&normalized(&[], None), "t").await.unwrap();

    assert_eq!(outcome.strategy, CallStrategy::Stateless);
    assert!(provider.calls_for(Operation::ThreadResponse).is_empty());
}

#[tokio::test]
async fn test_unknown_tool_resources_retried_on_same_strategy() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .fail(
                Operation::SessionResponse,
                ProviderCallError::unknown_parameter("tool_resources", "Unknown parameter"),
            )
            .succeed(Operation::SessionResponse, json!({"id": "r1"})),
    );

    let outcome = dispatcher(&provider).dispatch(&normalized(&[], Some("vs1")), "t").await.unwrap();

    assert_eq!(outcome.strategy, CallStrategy::SessionScoped);
    let calls = provider.calls_for(Operation::SessionResponse);
    assert_eq!(calls.len(), 2);
    assert!(calls[0].body.get("tool_resources").is_some());
    assert!(calls[1].body.get("tool_resources").is_none());
    assert_eq!(calls[1].body["tools"], json!([{"type": "file_search"}]));
    assert_eq!(calls[1].body["model"], calls[0].body["model"]);
    assert_eq!(calls[1].body["input"], calls[0].body["input"]);
    assert_eq!(calls[1].body["metadata"], calls[0].body["metadata"]);
    assert_eq!(calls[1].target, calls[0].target);
}

#[tokio::test]
async fn test_unsupported_retry_falls_through_with_full_request() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .fail(
                Operation::SessionResponse,
                ProviderCallError::unknown_parameter("tool_resources", "Unknown parameter"),
            )
            .fail(
                Operation::SessionResponse,
                ProviderCallError::unsupported(Operation::SessionResponse.name()),
            )
            .succeed(Operation::ThreadResponse, json!({"id": "r2", "output_text": "from thread"})),
    );

    let outcome = dispatcher(&provider).dispatch(&normalized(&[], Some("vs1")), "t").await.unwrap();

    assert_eq!(outcome.strategy, CallStrategy::ThreadScoped);
    assert_eq!(outcome.attempted, vec![CallStrategy::SessionScoped, CallStrategy::ThreadScoped]);
    assert_eq!(outcome.response.output_text(), Some("from thread"));

    let session_calls = provider.calls_for(Operation::SessionResponse);
    assert_eq!(session_calls.len(), 2);
    assert!(session_calls[1].body.get("tool_resources").is_none());

    let thread_calls = provider.calls_for(Operation::ThreadResponse);
    assert_eq!(thread_calls.len(), 1);
    assert_eq!(
        thread_calls[0].body["tool_resources"],
        json!({"file_search": {"vector_store_ids": ["vs1"]}})
    );
    assert_eq!(thread_calls[0].body["tools"], json!([{"type": "file_search"}]));
}

#[tokio::test]
async fn test_thread_retry_reuses_created_thread() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .succeed(Operation::CreateThread, json!({"id": "thread_1"}))
            .fail(
                Operation::ThreadResponse,
                ProviderCallError::unknown_parameter("tool_resources.file_search", "Unknown"),
            )
            .succeed(Operation::ThreadResponse, json!({"id": "r2"})),
    );

    let outcome = dispatcher(&provider).dispatch(&normalized(&[], Some("vs1")), "t").await.unwrap();

    assert_eq!(outcome.strategy, CallStrategy::ThreadScoped);
    assert_eq!(provider.calls_for(Operation::CreateThread).len(), 1);
    let responses = provider.calls_for(Operation::ThreadResponse);
    assert_eq!(responses.len(), 2);
    assert!(responses.iter().all(|c| c.target.as_deref() == Some("thread_1")));
}

#[tokio::test]
async fn test_unknown_parameter_without_tool_resources_is_terminal() {
    let provider = Arc::new(ScriptedProvider::new().fail(
        Operation::SessionResponse,
        ProviderCallError::unknown_parameter("tool_resources", "Unknown parameter"),
    ));

    let err = dispatcher(&provider).dispatch(&normalized(&[], None), "t").await.unwrap_err();

    assert_eq!(err.attempted, vec![CallStrategy::SessionScoped]);
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn test_rejection_is_terminal() {
    let provider = Arc::new(ScriptedProvider::new().fail(
        Operation::SessionResponse,
        ProviderCallError::Rejected { status: 401, message: "bad key".to_string() },
    ));

    let err = dispatcher(&provider).dispatch(&normalized(&[], None), "t").await.unwrap_err();

    assert_eq!(err.attempted, vec![CallStrategy::SessionScoped]);
    assert!(provider.calls_for(Operation::Response).is_empty());

    let relay_err = RelayError::from(err);
    assert_eq!(relay_err.http_status_code(), 500);
    assert_eq!(relay_err.to_string(), "Provider error: HTTP 401: bad key");
}

#[tokio::test]
async fn test_all_unsupported_reports_every_strategy() {
    let provider = Arc::new(ScriptedProvider::new());

    let err = dispatcher(&provider).dispatch(&normalized(&[], None), "t").await.unwrap_err();

    assert_eq!(err.attempted, CallStrategy::ORDERED.to_vec());
    assert_eq!(err.last_error, ProviderCallError::unsupported("responses.create"));

    match RelayError::from(err) {
        RelayError::Provider { attempted, .. } => {
            assert_eq!(attempted, vec!["session_scoped", "thread_scoped", "stateless"]);
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_build_request_body_keeps_attachment_tools_for_session_bound() {
    let request = normalized(&["f1"], None);
    let body = build_request_body(CallStrategy::ThreadScoped, &request, "m", &[]);

    assert_eq!(body.input[0].attachments, vec![chatkit_types::Attachment::with_file_search("f1")]);
    assert!(!body.metadata.contains_key("fallback_error_1"));
}

#[test]
fn test_fold_vector_stores_adds_tool_when_missing() {
    let mut tools = Vec::new();
    fold_vector_stores(&mut tools, &["vs1".to_string()]);
    fold_vector_stores(&mut tools, &["vs1".to_string()]);

    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].vector_store_ids, vec!["vs1".to_string()]);
}
