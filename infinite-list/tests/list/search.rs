use std::time::Duration;

use infinite_list::{ListConfig, Page};
use test_helpers::{MockSource, mount_list, run_local, settle};
use tokio::time::advance;

fn echo_source() -> MockSource<String> {
    MockSource::from_fn(|request| {
        let item = format!("{}:{}", request.search_query, request.page);
        Ok(Page::new(vec![item], true))
    })
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_issues_one_fetch() {
    run_local(async {
        let source = echo_source();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;
        assert_eq!(source.call_count(), 1);

        for text in ["r", "ru", "rus", "rust"] {
            list.set_search_query(text);
            advance(Duration::from_millis(100)).await;
            settle().await;
        }

        // the input follows every keystroke, fetching waits
        let state = list.state();
        assert_eq!(state.search_input, "rust");
        assert_eq!(state.search_query, "");
        assert!(state.has_pending_search());
        assert_eq!(source.call_count(), 1);

        advance(Duration::from_millis(199)).await;
        settle().await;
        assert_eq!(source.call_count(), 1);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(source.call_count(), 2);
        let request = source.last_call().expect("search fetch");
        assert_eq!(request.search_query, "rust");
        assert_eq!(request.page, 1);

        let state = list.state();
        assert_eq!(state.search_query, "rust");
        assert_eq!(state.items, ["rust:1"]);

        advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(source.call_count(), 2);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn each_settled_value_fetches_once() {
    run_local(async {
        let source = echo_source();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;

        list.set_search_query("cat");
        advance(Duration::from_millis(300)).await;
        settle().await;
        list.set_search_query("dog");
        advance(Duration::from_millis(300)).await;
        settle().await;

        let searches: Vec<String> = source
            .calls()
            .into_iter()
            .map(|request| request.search_query)
            .collect();
        assert_eq!(searches, ["", "cat", "dog"]);
        assert_eq!(list.state().items, ["dog:1"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn typing_back_to_the_current_search_does_not_refetch() {
    run_local(async {
        let source = echo_source();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;

        list.set_search_query("abc");
        advance(Duration::from_millis(100)).await;
        list.set_search_query("");
        advance(Duration::from_millis(300)).await;
        settle().await;

        assert_eq!(source.call_count(), 1);
        assert_eq!(list.state().items, [":1"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn honours_configured_delay() {
    run_local(async {
        let source = echo_source();
        let config =
            ListConfig::default().with_debounce_delay(Duration::from_millis(50));
        let list = mount_list(config, source.clone());
        settle().await;

        list.set_search_query("fast");
        advance(Duration::from_millis(50)).await;
        settle().await;
        assert_eq!(source.call_count(), 2);
        assert_eq!(list.state().items, ["fast:1"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn new_search_restarts_pagination() {
    run_local(async {
        let source = echo_source();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;
        list.load_more();
        settle().await;
        assert_eq!(list.state().current_page, 2);

        list.set_search_query("x");
        advance(Duration::from_millis(300)).await;
        settle().await;

        let state = list.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.items, ["x:1"]);
        assert_eq!(source.last_call().map(|request| request.page), Some(1));
    })
    .await;
}
