use std::time::Duration;

use tokio::time::timeout;
use wordbook_types::{SpeakTarget, UiCommand};

use crate::events::AppEvent;

#[tokio::test]
async fn test_tokio_spawn_from_sync_context() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    let sync_callback = move || {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(AppEvent::Command(UiCommand::Lookup("test".to_string())))
                .await
                .expect("send failed");
        });
    };

    sync_callback();

    let result = timeout(Duration::from_secs(2), rx.recv()).await;

    match result {
        Ok(Ok(AppEvent::Command(UiCommand::Lookup(text)))) => assert_eq!(text, "test"),
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - tokio::spawn from sync context failed!"),
    }
}

#[tokio::test]
async fn test_completions_interleave_with_commands() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(8);

    let command_tx = tx.clone();
    tokio::spawn(async move {
        command_tx
            .send(AppEvent::Command(UiCommand::Speak(SpeakTarget::Word)))
            .await
            .expect("send failed");
    });
    tokio::spawn(async move {
        tx.send(AppEvent::StoryComposed {
            seq: 7,
            story: "once".to_string(),
        })
        .await
        .expect("send failed");
    });

    let mut seen_story = false;
    let mut seen_command = false;
    for _ in 0..2 {
        match timeout(Duration::from_secs(2), rx.recv()).await {
            Ok(Ok(AppEvent::StoryComposed { seq, .. })) => {
                assert_eq!(seq, 7);
                seen_story = true;
            }
            Ok(Ok(AppEvent::Command(UiCommand::Speak(SpeakTarget::Word)))) => seen_command = true,
            Ok(Ok(other)) => panic!("Unexpected event {:?}", other),
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - event never arrived!"),
        }
    }
    assert!(seen_story && seen_command);
}

#[tokio::test]
async fn test_multiple_spawned_sends() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    for i in 0..100 {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(AppEvent::Command(UiCommand::Lookup(format!("msg{}", i))))
                .await
                .expect("send failed");
        });
    }

    let mut count = 0;
    let result = timeout(Duration::from_secs(2), async {
        while count < 100 {
            rx.recv().await.expect("recv failed");
            count += 1;
        }
    })
    .await;

    assert!(result.is_ok(), "Timeout waiting for events!");
    assert_eq!(count, 100);
}
