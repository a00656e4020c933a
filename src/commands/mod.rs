/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`  - Interactive chat session against the gateway
- `serve` - Run the gateway itself

The handlers are intentionally small and use the library components:
the session state machine, the gateway client, and the renderer.
*/

pub mod chat;
pub mod serve;
pub mod special_commands;
