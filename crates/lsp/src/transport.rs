use async_trait::async_trait;
use lsp_types::request::{ExecuteCommand, Request};
use lsp_types::{Command, ExecuteCommandParams};

use crate::{JsonValue, Result};

/// Request channel to a language server.
///
/// Only used to forward commands attached to code actions; the engine never
/// talks to a server otherwise. Futures are `?Send`: every call happens on the
/// host's single editor task.
#[async_trait(?Send)]
pub trait CommandTransport {
	/// Sends a request and waits for its result.
	async fn send_request(&self, method: &str, params: JsonValue) -> Result<JsonValue>;
}

/// Forwards `command` as a `workspace/executeCommand` request.
///
/// Returns `None` when the server answers `null`.
pub async fn execute_command<T: CommandTransport + ?Sized>(transport: &T, command: Command) -> Result<Option<JsonValue>> {
	tracing::debug!(command = %command.command, "lsp.execute_command");
	let params = ExecuteCommandParams {
		command: command.command,
		arguments: command.arguments.unwrap_or_default(),
		work_done_progress_params: Default::default(),
	};
	let response = transport.send_request(ExecuteCommand::METHOD, serde_json::to_value(params)?).await?;
	Ok((!response.is_null()).then_some(response))
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use serde_json::json;

	use super::*;

	#[derive(Default)]
	struct RecordingTransport {
		sent: RefCell<Vec<(String, JsonValue)>>,
		reply: JsonValue,
	}

	#[async_trait(?Send)]
	impl CommandTransport for RecordingTransport {
		async fn send_request(&self, method: &str, params: JsonValue) -> Result<JsonValue> {
			self.sent.borrow_mut().push((method.to_string(), params));
			Ok(self.reply.clone())
		}
	}

	#[tokio::test]
	async fn forwards_command_and_arguments() {
		let transport = RecordingTransport {
			reply: json!({ "ok": true }),
			..Default::default()
		};
		let command = Command {
			title: "Organize imports".into(),
			command: "organize".into(),
			arguments: Some(vec![json!("file:///a.rs"), json!(3)]),
		};

		let response = execute_command(&transport, command).await.unwrap();
		assert_eq!(response, Some(json!({ "ok": true })));

		let sent = transport.sent.borrow();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].0, "workspace/executeCommand");
		assert_eq!(sent[0].1["command"], "organize");
		assert_eq!(sent[0].1["arguments"], json!(["file:///a.rs", 3]));
	}

	#[tokio::test]
	async fn null_response_is_none() {
		let transport = RecordingTransport::default();
		let command = Command {
			title: "noop".into(),
			command: "noop".into(),
			arguments: None,
		};
		assert_eq!(execute_command(&transport, command).await.unwrap(), None);
		assert_eq!(transport.sent.borrow()[0].1["arguments"], json!([]));
	}
}
