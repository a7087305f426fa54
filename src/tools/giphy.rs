//! The Giphy tool catalog
//!
//! All five tools share one implementation. A [`ToolSpec`] row names the
//! endpoint, the parameter schema, the query builder, and whether the
//! upstream `data` field is a list or a single record.

use crate::gateway::{Endpoint, Query, RequestGateway};
use crate::normalize::{normalize_list, normalize_single};
use crate::tools::params::{
    build_query, RandomParams, SearchParams, StickerSearchParams, ToolParams, TranslateParams,
    TrendingParams,
};
use crate::tools::{Tool, ToolDescription, ToolError, ToolOutput};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Shape of the upstream `data` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Single,
    List,
}

/// Static description of one Giphy tool
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: Endpoint,
    pub shape: ResultShape,
    pub schema: fn() -> Value,
    pub build_query: fn(&Value) -> Result<Query, ToolError>,
}

pub static TOOL_SPECS: [ToolSpec; 5] = [
    ToolSpec {
        name: "search",
        description: "Search for GIFs.",
        endpoint: Endpoint::GifsSearch,
        shape: ResultShape::List,
        schema: SearchParams::schema,
        build_query: build_query::<SearchParams>,
    },
    ToolSpec {
        name: "trending",
        description: "Get trending GIFs.",
        endpoint: Endpoint::GifsTrending,
        shape: ResultShape::List,
        schema: TrendingParams::schema,
        build_query: build_query::<TrendingParams>,
    },
    ToolSpec {
        name: "random",
        description: "Get a random GIF.",
        endpoint: Endpoint::GifsRandom,
        shape: ResultShape::Single,
        schema: RandomParams::schema,
        build_query: build_query::<RandomParams>,
    },
    ToolSpec {
        name: "search_stickers",
        description: "Search for stickers.",
        endpoint: Endpoint::StickersSearch,
        shape: ResultShape::List,
        schema: StickerSearchParams::schema,
        build_query: build_query::<StickerSearchParams>,
    },
    ToolSpec {
        name: "translate",
        description: "Translate a phrase to a single GIF (Giphy's WeirdnessEngine).",
        endpoint: Endpoint::GifsTranslate,
        shape: ResultShape::Single,
        schema: TranslateParams::schema,
        build_query: build_query::<TranslateParams>,
    },
];

/// Find a spec by tool name
pub fn spec_for(name: &str) -> Option<&'static ToolSpec> {
    TOOL_SPECS.iter().find(|spec| spec.name == name)
}

/// Generic Giphy tool driven by a [`ToolSpec`]
pub struct GiphyTool {
    spec: &'static ToolSpec,
    gateway: Arc<RequestGateway>,
}

impl GiphyTool {
    pub fn new(spec: &'static ToolSpec, gateway: Arc<RequestGateway>) -> Self {
        Self { spec, gateway }
    }

    /// Project an upstream body according to the result shape (pure function)
    fn shape_output(shape: ResultShape, body: &Value) -> ToolOutput {
        match shape {
            ResultShape::Single => ToolOutput::Single(normalize_single(body)),
            ResultShape::List => ToolOutput::List(normalize_list(body)),
        }
    }
}

#[async_trait]
impl Tool for GiphyTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: self.spec.name.to_string(),
            description: self.spec.description.to_string(),
            parameters: (self.spec.schema)(),
        }
    }

    async fn execute(&self, parameters: &Value) -> Result<ToolOutput, ToolError> {
        let query = (self.spec.build_query)(parameters)?;
        let body = self.gateway.fetch(self.spec.endpoint, query).await?;
        Ok(Self::shape_output(self.spec.shape, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GiphyConfig;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_five_unique_tools() {
        let names: HashSet<_> = TOOL_SPECS.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), 5);
        for name in ["search", "trending", "random", "search_stickers", "translate"] {
            assert!(names.contains(name), "missing tool {name}");
        }
    }

    #[test]
    fn test_catalog_endpoints_and_shapes() {
        let expect = [
            ("search", Endpoint::GifsSearch, ResultShape::List),
            ("trending", Endpoint::GifsTrending, ResultShape::List),
            ("random", Endpoint::GifsRandom, ResultShape::Single),
            ("search_stickers", Endpoint::StickersSearch, ResultShape::List),
            ("translate", Endpoint::GifsTranslate, ResultShape::Single),
        ];

        for (name, endpoint, shape) in expect {
            let spec = spec_for(name).unwrap();
            assert_eq!(spec.endpoint, endpoint, "{name}");
            assert_eq!(spec.shape, shape, "{name}");
        }
        assert!(spec_for("stickers").is_none());
    }

    #[test]
    fn test_every_schema_compiles() {
        for spec in TOOL_SPECS.iter() {
            assert!(
                jsonschema::validator_for(&(spec.schema)()).is_ok(),
                "{} schema",
                spec.name
            );
        }
    }

    #[test]
    fn test_shape_output_single_and_list() {
        let body = json!({"data": [{"id": "a"}, {"id": "b"}]});
        match GiphyTool::shape_output(ResultShape::List, &body) {
            ToolOutput::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {other:?}"),
        }

        // A single-record tool receiving an array maps to an empty record
        assert_eq!(
            GiphyTool::shape_output(ResultShape::Single, &body),
            ToolOutput::Single(Default::default())
        );
    }

    #[tokio::test]
    async fn test_describe_uses_spec() {
        let gateway = Arc::new(RequestGateway::new(&GiphyConfig::default()).unwrap());
        let tool = GiphyTool::new(spec_for("translate").unwrap(), gateway);

        let description = tool.describe();
        assert_eq!(description.name, "translate");
        assert!(description.description.contains("WeirdnessEngine"));
        assert_eq!(description.parameters["required"], json!(["phrase"]));
    }
}
