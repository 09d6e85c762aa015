//! Code action execution.
//!
//! A code action may carry a workspace edit, a command, or both. The edit is
//! applied first, then the command is sent back to the server that offered the
//! action. Edit failures are reported but do not hold back the command.

use quire_lsp::lsp_types::{CodeActionOrCommand, Command};
use quire_lsp::{CommandTransport, JsonValue};

use crate::store::BufferStore;
use crate::workspace_edit::{ApplyError, ApplyReport, WorkspaceEditor};

/// What running a code action did.
#[derive(Debug, Default)]
pub struct CodeActionOutcome {
	/// Report of the action's workspace edit, if it had one.
	pub report: Option<ApplyReport>,
	/// Server response to the forwarded command, if there was one.
	pub command: Option<Result<Option<JsonValue>, ApplyError>>,
	/// Why the server disabled the action; nothing else ran.
	pub disabled: Option<String>,
}

impl CodeActionOutcome {
	/// Returns `true` if the action ran and nothing in it failed.
	pub fn is_success(&self) -> bool {
		self.disabled.is_none() && self.report.as_ref().is_none_or(ApplyReport::is_success) && !matches!(self.command, Some(Err(_)))
	}
}

impl<S: BufferStore + ?Sized> WorkspaceEditor<'_, S> {
	/// Runs a code action or bare command chosen by the user.
	pub async fn apply_code_action<T: CommandTransport + ?Sized>(&mut self, transport: &T, action: CodeActionOrCommand) -> CodeActionOutcome {
		let mut outcome = CodeActionOutcome::default();
		match action {
			CodeActionOrCommand::Command(command) => {
				outcome.command = Some(execute_command(transport, command).await);
			}
			CodeActionOrCommand::CodeAction(action) => {
				if let Some(disabled) = action.disabled {
					tracing::warn!(title = %action.title, reason = %disabled.reason, "code_action.disabled");
					outcome.disabled = Some(disabled.reason);
					return outcome;
				}
				if let Some(edit) = action.edit {
					outcome.report = Some(self.apply_workspace_edit(edit).await);
				}
				if let Some(command) = action.command {
					outcome.command = Some(execute_command(transport, command).await);
				}
			}
		}
		outcome
	}
}

async fn execute_command<T: CommandTransport + ?Sized>(transport: &T, command: Command) -> Result<Option<JsonValue>, ApplyError> {
	let name = command.command.clone();
	quire_lsp::execute_command(transport, command).await.map_err(|error| {
		tracing::warn!(command = %name, %error, "code_action.command_failed");
		ApplyError::Command(error)
	})
}
