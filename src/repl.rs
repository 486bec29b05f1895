//! Interactive run loop.
//!
//! Reads one command per line, hands it to the agent, and prints the answer
//! followed by the current inventory. Commands are handled strictly one at a
//! time: the loop waits for input, then waits for the agent, then repeats.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::agent::Agent;
use crate::inventory::{format_snapshot, Inventory};

/// Commands that end the session (compared case-insensitively).
pub const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

const BANNER: &str = "Pharma Inventory Agent Started! (type 'exit' to quit)";
const PROMPT: &str = "Enter command: ";

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Terminated,
}

/// What to do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Exit,
    Blank,
    Command(String),
}

/// Whether `line` is one of [`EXIT_COMMANDS`].
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    EXIT_COMMANDS.iter().any(|c| c.eq_ignore_ascii_case(line))
}

/// Classify a raw input line. `None` means end of input.
///
/// Commands are forwarded as typed, minus the line terminator.
pub fn classify(line: Option<&str>) -> Input {
    match line {
        None => Input::Exit,
        Some(l) if is_exit_command(l) => Input::Exit,
        Some(l) if l.trim().is_empty() => Input::Blank,
        Some(l) => Input::Command(l.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Run the session until an exit command or end of input.
///
/// Agent errors end the loop and are returned to the caller.
pub async fn run_loop<R, W>(
    agent: &Agent,
    inventory: &Inventory,
    mut input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_line(&mut output, &format!("{}\n", BANNER)).await?;
    print_inventory(&mut output, "Current Inventory", inventory).await?;
    write_line(&mut output, "").await?;

    let mut state = RunState::Running;
    let mut line = String::new();
    let mut handled = 0usize;

    while state == RunState::Running {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        line.clear();
        let read = input.read_line(&mut line).await?;
        let raw = (read > 0).then_some(line.as_str());

        match classify(raw) {
            Input::Exit => {
                write_line(&mut output, "").await?;
                print_inventory(&mut output, "Final Inventory", inventory).await?;
                state = RunState::Terminated;
            }
            Input::Blank => continue,
            Input::Command(command) => {
                tracing::debug!("Handling command: {}", command);
                let outcome = agent.run(&command).await?;
                handled += 1;
                tracing::debug!(
                    turns = outcome.turns,
                    tools = outcome.tool_calls().count(),
                    "Command resolved"
                );
                for entry in &outcome.log {
                    tracing::debug!(
                        at = %entry.timestamp,
                        kind = ?entry.entry_type,
                        tool = entry.tool.as_deref().unwrap_or("-"),
                        "{}",
                        entry.content
                    );
                }

                write_line(&mut output, &outcome.final_output).await?;
                print_inventory(&mut output, "Current Inventory", inventory).await?;
            }
        }
    }

    tracing::info!("Session ended after {} command(s)", handled);
    Ok(())
}

async fn print_inventory<W: AsyncWrite + Unpin>(
    output: &mut W,
    label: &str,
    inventory: &Inventory,
) -> std::io::Result<()> {
    let snapshot = inventory.snapshot().await;
    write_line(output, &format!("{}: {}", label, format_snapshot(&snapshot))).await
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
