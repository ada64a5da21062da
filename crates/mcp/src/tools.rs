//! Tool catalog returned by `tools/list`.

use serde_json::{Value, json};
use splunk_config::constants::{
    DEFAULT_EARLIEST_TIME, DEFAULT_LATEST_TIME, DEFAULT_MAX_COUNT, DEFAULT_SEARCH_TIMEOUT_SECS,
    MAX_MAX_COUNT, MAX_SEARCH_TIMEOUT_SECS,
};

pub const SEARCH_SPLUNK_TOOL: &str = "search_splunk";
pub const LIST_INDEXES_TOOL: &str = "list_indexes";
pub const LIST_SAVED_SEARCHES_TOOL: &str = "list_saved_searches";
pub const LIST_APPS_TOOL: &str = "list_apps";
pub const GET_SERVER_INFO_TOOL: &str = "get_server_info";

pub const TOOL_NAMES: [&str; 5] = [
    SEARCH_SPLUNK_TOOL,
    LIST_INDEXES_TOOL,
    LIST_SAVED_SEARCHES_TOOL,
    LIST_APPS_TOOL,
    GET_SERVER_INFO_TOOL,
];

pub fn list_tools() -> Value {
    json!({
        "tools": [
            {
                "name": SEARCH_SPLUNK_TOOL,
                "title": "Search Splunk",
                "description": "Execute a Splunk search query using SPL (Search Processing Language).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "SPL (Search Processing Language) query"
                        },
                        "earliest_time": {
                            "type": "string",
                            "description": "Earliest time for search (e.g., '-24h@h', '2024-01-01T00:00:00')",
                            "default": DEFAULT_EARLIEST_TIME
                        },
                        "latest_time": {
                            "type": "string",
                            "description": "Latest time for search (e.g., 'now', '2024-01-01T23:59:59')",
                            "default": DEFAULT_LATEST_TIME
                        },
                        "max_count": {
                            "type": "integer",
                            "description": "Maximum number of results to return",
                            "minimum": 1,
                            "maximum": MAX_MAX_COUNT,
                            "default": DEFAULT_MAX_COUNT
                        },
                        "timeout": {
                            "type": "integer",
                            "description": "Search timeout in seconds",
                            "minimum": 1,
                            "maximum": MAX_SEARCH_TIMEOUT_SECS,
                            "default": DEFAULT_SEARCH_TIMEOUT_SECS
                        }
                    },
                    "required": ["query"]
                }
            },
            {
                "name": LIST_INDEXES_TOOL,
                "title": "List Indexes",
                "description": "List available Splunk indexes.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "pattern": {
                            "type": "string",
                            "description": "Pattern to filter index names (e.g., 'main*', '*security*')"
                        }
                    }
                }
            },
            {
                "name": LIST_SAVED_SEARCHES_TOOL,
                "title": "List Saved Searches",
                "description": "List or retrieve saved searches from Splunk.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "search_name": {
                            "type": "string",
                            "description": "Name (or part of a name) of the saved search to retrieve"
                        },
                        "owner": {
                            "type": "string",
                            "description": "Owner of the saved search"
                        }
                    }
                }
            },
            {
                "name": LIST_APPS_TOOL,
                "title": "List Apps",
                "description": "List installed Splunk applications.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "visible_only": {
                            "type": "boolean",
                            "description": "Only return visible applications",
                            "default": true
                        }
                    }
                }
            },
            {
                "name": GET_SERVER_INFO_TOOL,
                "title": "Get Server Info",
                "description": "Get Splunk server information and health status.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ],
        "nextCursor": null
    })
}
