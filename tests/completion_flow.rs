//! End-to-end completion scenarios against mock sources.
//!
//! Covers the aggregation contract: account gating, prefix suppression,
//! staleness-triggered refresh with stale-but-served snapshots, source
//! ordering, the single-flight guard, and the bounded wait on asynchronous
//! sources.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use report_completion_engine::completion::{CompletionItem, ProviderKind};
use report_completion_engine::config::EngineConfig;
use report_completion_engine::engine::CompletionEngine;
use report_completion_engine::models::{EditorState, HotkeyEntry, SnippetEntry};

use common::{MockHotkeys, MockPhrases, MockSnippets, SwitchableAccount};

fn test_config() -> EngineConfig {
    EngineConfig {
        retry_delay: Duration::from_millis(5),
        ..EngineConfig::default()
    }
}

fn engine_with(
    account: i64,
    phrases: Arc<MockPhrases>,
    hotkeys: Arc<MockHotkeys>,
    snippets: Arc<MockSnippets>,
    config: EngineConfig,
) -> Arc<CompletionEngine> {
    CompletionEngine::with_current_runtime(
        SwitchableAccount::new(account),
        phrases,
        hotkeys,
        snippets,
        config,
    )
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition never became true");
}

fn labels(items: Vec<CompletionItem>) -> Vec<String> {
    items.iter().map(|i| i.label().to_string()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_account_yields_empty_and_no_io() {
    let phrases = MockPhrases::new(&["ct"]);
    let engine = engine_with(
        0,
        Arc::clone(&phrases),
        MockHotkeys::new(Vec::new()),
        MockSnippets::empty(),
        test_config(),
    );

    let provider = engine.provider(ProviderKind::Composite);
    let items: Vec<_> = provider.completions(&EditorState::at_line_end("ct")).collect();
    assert!(items.is_empty());

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(phrases.call_count(), 0, "no fetch may happen without a tenant");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_prefix_suppresses_completion() {
    let phrases = MockPhrases::new(&["ct"]);
    let engine = engine_with(
        1,
        Arc::clone(&phrases),
        MockHotkeys::new(Vec::new()),
        MockSnippets::empty(),
        test_config(),
    );

    let provider = engine.provider(ProviderKind::Composite);
    // Cursor right after a space: nothing to filter on.
    let items: Vec<_> = provider
        .completions(&EditorState::new("no acute ", 9))
        .collect();
    assert!(items.is_empty());
    assert_eq!(phrases.call_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn first_call_empty_then_populated_after_refresh() {
    let phrases = MockPhrases::with_delay(
        &["ct", "ct angiography", "contrast"],
        Duration::from_millis(50),
    );
    let engine = engine_with(
        1,
        Arc::clone(&phrases),
        MockHotkeys::new(Vec::new()),
        MockSnippets::empty(),
        test_config(),
    );

    let provider = engine.provider(ProviderKind::Phrase);
    let state = EditorState::at_line_end("ct");

    // Cache is cold: serve nothing, kick off the background fetch.
    let first: Vec<_> = provider.completions(&state).collect();
    assert!(first.is_empty());
    assert!(
        engine.vocabulary_prefetcher().is_refreshing(),
        "single-flight guard should be held while the fetch runs"
    );

    wait_until(|| engine.vocabulary_cache().has(1)).await;

    let second = labels(provider.completions(&state).collect());
    assert_eq!(second, vec!["ct", "ct angiography"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn repeated_cold_calls_start_exactly_one_fetch() {
    let phrases = MockPhrases::with_delay(&["ct"], Duration::from_millis(100));
    let engine = engine_with(
        1,
        Arc::clone(&phrases),
        MockHotkeys::new(Vec::new()),
        MockSnippets::empty(),
        test_config(),
    );

    let provider = engine.provider(ProviderKind::Phrase);
    let state = EditorState::at_line_end("ct");
    for _ in 0..8 {
        let _: Vec<_> = provider.completions(&state).collect();
    }

    wait_until(|| engine.vocabulary_cache().has(1)).await;
    assert_eq!(phrases.call_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn composite_orders_tokens_hotkeys_snippets() {
    let phrases = MockPhrases::new(&["ct", "ct angiography"]);
    let hotkeys = MockHotkeys::new(vec![
        HotkeyEntry::new("ct2", "CT with contrast").with_description("contrast study"),
    ]);
    let snippets = MockSnippets::new(vec![SnippetEntry::new("ct", "CT Chest:\n")]);
    let engine = engine_with(1, phrases, hotkeys, snippets, test_config());

    engine.preload();

    let provider = engine.provider(ProviderKind::Composite);
    let mut items: Vec<_> = Vec::new();
    // All three sources land asynchronously; poll until every contribution
    // is visible.
    wait_until(|| {
        items = provider.completions(&EditorState::at_line_end("ct")).collect();
        items.len() == 4
    })
    .await;

    let kinds: Vec<&str> = items
        .iter()
        .map(|item| match item {
            CompletionItem::Token { .. } => "token",
            CompletionItem::Hotkey { .. } => "hotkey",
            CompletionItem::Snippet { .. } => "snippet",
        })
        .collect();
    assert_eq!(kinds, vec!["token", "token", "hotkey", "snippet"]);
    assert_eq!(items[2].label(), "ct2 - contrast study");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_hotkey_source_contributes_nothing_within_bound() {
    let hotkeys = MockHotkeys::with_delay(
        vec![HotkeyEntry::new("ct2", "CT with contrast")],
        Duration::from_millis(300),
    );
    let engine = engine_with(
        1,
        MockPhrases::new(&["ct"]),
        hotkeys,
        MockSnippets::empty(),
        test_config(),
    );

    let provider = engine.provider(ProviderKind::Hotkey);
    let state = EditorState::at_line_end("ct2");

    let started = Instant::now();
    let first: Vec<_> = provider.completions(&state).collect();
    let elapsed = started.elapsed();
    assert!(first.is_empty(), "timed-out source must contribute nothing");
    assert!(
        elapsed < Duration::from_millis(250),
        "call must not block past the bounded wait, took {elapsed:?}"
    );

    // The fetch keeps running in the background for next time.
    wait_until(|| {
        let items: Vec<_> = provider.completions(&state).collect();
        !items.is_empty()
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn letters_only_boundary_ignores_digit_triggers() {
    let engine = engine_with(
        1,
        MockPhrases::new(&["ct"]),
        MockHotkeys::new(vec![HotkeyEntry::new("ct2", "CT with contrast")]),
        MockSnippets::empty(),
        test_config(),
    );
    engine.preload();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The phrase provider's letters-only boundary sees no prefix before a
    // digit, so completion is suppressed.
    let phrase_provider = engine.provider(ProviderKind::Phrase);
    let none: Vec<_> = phrase_provider
        .completions(&EditorState::at_line_end("ct2"))
        .collect();
    assert!(none.is_empty());

    // The hotkey provider's extended boundary matches the full trigger.
    let hotkey_provider = engine.provider(ProviderKind::Hotkey);
    let items: Vec<_> = hotkey_provider
        .completions(&EditorState::at_line_end("ct2"))
        .collect();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].insert_text(), "CT with contrast");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stale_snapshot_is_served_while_refresh_runs() {
    let phrases = MockPhrases::new(&["ct"]);
    let config = EngineConfig {
        vocabulary_ttl: Duration::ZERO,
        retry_delay: Duration::from_millis(5),
        ..EngineConfig::default()
    };
    let engine = engine_with(
        1,
        Arc::clone(&phrases),
        MockHotkeys::new(Vec::new()),
        MockSnippets::empty(),
        config,
    );

    engine.preload();
    wait_until(|| engine.vocabulary_cache().has(1)).await;
    let calls_after_preload = phrases.call_count();

    // TTL zero: every call sees a stale snapshot, serves it anyway, and
    // schedules another refresh behind the scenes.
    let provider = engine.provider(ProviderKind::Phrase);
    let items = labels(provider.completions(&EditorState::at_line_end("ct")).collect());
    assert_eq!(items, vec!["ct"]);

    wait_until(|| phrases.call_count() > calls_after_preload).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hotkey_meta_passes_through_inactive_entries() {
    let mut inactive = HotkeyEntry::new("old", "obsolete text");
    inactive.active = false;
    let engine = engine_with(
        1,
        MockPhrases::new(&[]),
        MockHotkeys::new(vec![HotkeyEntry::new("fu", "follow-up"), inactive]),
        MockSnippets::empty(),
        test_config(),
    );

    let meta = engine.hotkey_meta().await.unwrap();
    assert_eq!(meta.len(), 2);
}
