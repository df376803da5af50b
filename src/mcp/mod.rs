//! MCP server exposing the tool bridge.
//!
//! ## Usage
//!
//! ```bash
//! workfacts serve --persona labor_market_analyst
//! ```
//!
//! ### Client Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "workfacts": {
//!       "command": "workfacts",
//!       "args": ["serve", "--persona", "program_designer"]
//!     }
//!   }
//! }
//! ```

mod dispatch;
mod server;

pub use dispatch::McpMethod;
pub use server::{McpServer, RateLimitConfig};
