use kanal::AsyncSender;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use wordbook_types::{UiCommand, View};

use crate::events::AppEvent;
use crate::ui::parse_command;

/// Feed terminal lines to the controller as commands
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    view_tx: AsyncSender<View>,
) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    read_commands(stdin, cancel, event_tx, view_tx).await
}

pub async fn read_commands<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    view_tx: AsyncSender<View>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Input reader stopping");
                return Ok(());
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("Input closed");
            event_tx.send(AppEvent::Command(UiCommand::Quit)).await?;
            return Ok(());
        };

        match parse_command(&line) {
            Ok(command) => {
                tracing::debug!("Command: {:?}", command);
                event_tx.send(AppEvent::Command(command)).await?;
            }
            Err(message) if message.is_empty() => {}
            Err(message) => view_tx.send(View::Status(message)).await?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn test_lines_become_commands_and_eof_quits() {
        let (event_tx, event_rx) = kanal::bounded_async(16);
        let (view_tx, view_rx) = kanal::bounded_async(16);
        let input: &[u8] = b"lookup hola\n\nfly away\nstudy\n";

        timeout(
            Duration::from_secs(2),
            read_commands(input, CancellationToken::new(), event_tx, view_tx),
        )
        .await
        .unwrap()
        .unwrap();

        let mut commands = Vec::new();
        while let Ok(Some(AppEvent::Command(command))) = event_rx.try_recv() {
            commands.push(command);
        }
        assert_eq!(
            commands,
            vec![
                UiCommand::Lookup("hola".to_string()),
                UiCommand::Study,
                UiCommand::Quit
            ]
        );

        let view = view_rx.try_recv().unwrap().unwrap();
        assert!(matches!(view, View::Status(message) if message.contains("fly")));
    }
}
