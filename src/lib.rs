//! obsidian-mcp: MCP server for Obsidian vaults
//!
//! This library exposes Obsidian vault and canvas operations as Model Context
//! Protocol (MCP) tools. Tools reach Obsidian through the Local REST API
//! plugin.

pub mod canvas;
pub mod config;
pub mod error;
pub mod mcp;
pub mod mcp_content;
pub mod model;
pub mod tool_groups;
pub mod upstream;
