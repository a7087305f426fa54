use async_trait::async_trait;
use giphy_mcp::config::GiphyConfig;
use giphy_mcp::gateway::RequestGateway;
use giphy_mcp::normalize::NormalizedMedia;
use giphy_mcp::server::GiphyServer;
use giphy_mcp::tools::{Tool, ToolDescription, ToolError, ToolOutput, ToolSystem};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingTool {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Tool for CountingTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: "counting".to_string(),
            description: "Counts executions".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {"n": {"type": "integer", "minimum": 1}},
                "required": ["n"]
            }),
        }
    }

    async fn execute(&self, parameters: &Value) -> Result<ToolOutput, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let n = parameters["n"].as_u64().unwrap_or(0) as usize;
        Ok(ToolOutput::List(vec![NormalizedMedia::default(); n]))
    }
}

fn giphy_system() -> ToolSystem {
    let gateway = Arc::new(RequestGateway::new(&GiphyConfig::default()).unwrap());
    ToolSystem::giphy(gateway)
}

#[tokio::test]
async fn test_giphy_system_registers_five_tools_in_order() {
    let tool_system = giphy_system();

    assert_eq!(
        tool_system.list_tools(),
        vec!["search", "trending", "random", "search_stickers", "translate"]
    );
}

#[tokio::test]
async fn test_tool_descriptions_match_catalog() {
    let tool_system = giphy_system();

    let search = tool_system.describe_tool("search").unwrap();
    assert_eq!(search.description, "Search for GIFs.");
    assert_eq!(search.parameters["required"], json!(["query"]));
    assert_eq!(
        search.parameters["properties"]["rating"]["enum"],
        json!(["g", "pg", "pg-13", "r"])
    );
    assert_eq!(search.parameters["properties"]["limit"]["default"], json!(10));

    let random = tool_system.describe_tool("random").unwrap();
    assert_eq!(
        random.parameters["properties"]["tag"]["description"],
        "Filter by tag"
    );
    assert!(random.parameters.get("required").is_none());

    let translate = tool_system.describe_tool("translate").unwrap();
    assert_eq!(
        translate.parameters["properties"]["weirdness"]["maximum"],
        json!(10)
    );

    assert!(tool_system.describe_tool("missing").is_none());
}

#[tokio::test]
async fn test_custom_tool_only_runs_with_valid_parameters() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut tool_system = ToolSystem::new();
    tool_system
        .register(Box::new(CountingTool {
            calls: calls.clone(),
        }))
        .unwrap();

    let invalid = tool_system.call_tool("counting", &json!({"n": 0})).await;
    assert!(matches!(invalid, Err(ToolError::ValidationError(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let text = tool_system
        .call_tool("counting", &json!({"n": 2}))
        .await
        .unwrap();
    assert_eq!(text, "[\n  {},\n  {}\n]");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_validation_error_names_offending_field() {
    let tool_system = giphy_system();

    let err = tool_system
        .execute_tool("search", &json!({"query": "cat", "limit": 99}))
        .await
        .unwrap_err();

    match err {
        ToolError::ValidationError(message) => assert!(message.contains("/limit"), "{message}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_wraps_custom_tool_system() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut tool_system = ToolSystem::new();
    tool_system
        .register(Box::new(CountingTool {
            calls: calls.clone(),
        }))
        .unwrap();

    let server = GiphyServer::new(tool_system);
    let tools = server.mcp_tools();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "counting");

    let result = server.invoke("counting", &json!({"n": 1})).await.unwrap();
    assert_ne!(result.is_error, Some(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
