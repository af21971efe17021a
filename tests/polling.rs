//! Polling loop tests on a paused tokio clock.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::sleep;

use cryptomania_mint::chain::ChainId;
use cryptomania_mint::session::SessionAlert;
use cryptomania_mint::{MintStatus, RenderMode};

mod common;
use common::{FakeChain, POLL_INTERVAL};

fn just_before_tick() -> Duration {
    POLL_INTERVAL - Duration::from_millis(100)
}

#[tokio::test(start_paused = true)]
async fn test_polling_picks_up_chain_changes() {
    let chain = FakeChain::new(true);
    let controller = common::controller(&chain);
    controller.load().await.unwrap();
    assert_eq!(controller.status().minted_count, 0);

    chain.minted.store(9, Ordering::SeqCst);
    chain.presale_started.store(true, Ordering::SeqCst);
    chain.presale_end.store(u64::MAX, Ordering::SeqCst);

    sleep(just_before_tick()).await;
    assert_eq!(controller.status().minted_count, 0);

    sleep(Duration::from_millis(200)).await;
    let status = controller.status();
    assert_eq!(status.minted_count, 9);
    assert!(status.presale_started);
    assert!(!status.presale_ended);
    assert_eq!(RenderMode::from_status(&status), RenderMode::PresaleActive);

    chain.presale_end.store(1, Ordering::SeqCst);
    sleep(POLL_INTERVAL).await;
    assert_eq!(
        RenderMode::from_status(&controller.status()),
        RenderMode::PresaleEndedPublicMint
    );

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_tick_keeps_state_and_next_tick_recovers() {
    let chain = FakeChain::new(true);
    chain.minted.store(2, Ordering::SeqCst);
    chain.presale_started.store(true, Ordering::SeqCst);
    let controller = common::controller(&chain);
    controller.load().await.unwrap();
    let before = controller.status();

    chain.fail_reads.store(true, Ordering::SeqCst);
    chain.minted.store(5, Ordering::SeqCst);
    sleep(POLL_INTERVAL + Duration::from_millis(100)).await;
    assert_eq!(controller.status(), before);

    chain.fail_reads.store(false, Ordering::SeqCst);
    sleep(POLL_INTERVAL).await;
    assert_eq!(controller.status().minted_count, 5);

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn test_wrong_network_tick_is_ignored() {
    let chain = FakeChain::new(true);
    chain.minted.store(1, Ordering::SeqCst);
    let controller = common::controller(&chain);
    controller.load().await.unwrap();

    chain.chain_id.store(1, Ordering::SeqCst);
    chain.minted.store(6, Ordering::SeqCst);
    sleep(POLL_INTERVAL * 2).await;
    assert_eq!(controller.status().minted_count, 1);
    assert!(controller.status().wallet_connected);

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn test_wrong_network_tick_raises_one_alert() {
    let chain = FakeChain::new(true);
    let controller = common::controller(&chain);
    controller.load().await.unwrap();
    let mut alerts = controller.alerts();

    chain.chain_id.store(1, Ordering::SeqCst);
    sleep(POLL_INTERVAL * 3).await;

    assert!(matches!(
        alerts.try_recv(),
        Ok(SessionAlert::NetworkSwitched { actual: ChainId(1), .. })
    ));
    assert!(matches!(alerts.try_recv(), Err(TryRecvError::Empty)));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn test_disconnect_cancels_polling() {
    let chain = FakeChain::new(true);
    let controller = common::controller(&chain);
    controller.load().await.unwrap();
    assert!(controller.is_polling().await);

    controller.disconnect().await;
    assert!(!controller.is_polling().await);

    chain.minted.store(4, Ordering::SeqCst);
    sleep(POLL_INTERVAL * 3).await;
    assert_eq!(controller.status(), MintStatus::default());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_stops_tasks() {
    let chain = FakeChain::new(true);
    let controller = common::controller(&chain);
    controller.load().await.unwrap();
    assert!(Arc::strong_count(&chain) > 1);

    drop(controller);
    sleep(Duration::from_millis(10)).await;
    assert_eq!(Arc::strong_count(&chain), 1);
}

#[tokio::test(start_paused = true)]
async fn test_status_updates_are_published() {
    let chain = FakeChain::new(true);
    let controller = common::controller(&chain);
    let mut updates = controller.subscribe();
    controller.load().await.unwrap();
    assert!(updates.has_changed().unwrap());
    let _ = updates.borrow_and_update();

    chain.minted.store(3, Ordering::SeqCst);
    let status = updates.wait_for(|s| s.minted_count == 3).await.unwrap();
    assert_eq!(status.minted_count, 3);

    drop(status);
    controller.disconnect().await;
}
