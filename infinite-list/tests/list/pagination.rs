use std::num::NonZeroU32;

use infinite_list::{ListConfig, Page, Phase};
use test_helpers::{MockSource, items, mount_list, run_local, settle};

fn page_size(size: u32) -> NonZeroU32 {
    NonZeroU32::new(size).expect("page size is non-zero")
}

#[tokio::test(start_paused = true)]
async fn loads_pages_until_exhausted() {
    run_local(async {
        let source = MockSource::pages(vec![
            Page::new(items(&["a", "b"]), true),
            Page::new(items(&["c", "d"]), true),
            Page::last(items(&["e"])),
        ]);
        let config = ListConfig::default().with_page_size(page_size(2));
        let list = mount_list(config, source.clone());
        settle().await;

        let state = list.state();
        assert_eq!(state.items, items(&["a", "b"]));
        assert!(state.has_more);

        list.load_more();
        assert!(list.state().is_loading_more());
        settle().await;
        assert_eq!(list.state().items, items(&["a", "b", "c", "d"]));

        list.load_more();
        settle().await;
        let state = list.state();
        assert_eq!(state.items, items(&["a", "b", "c", "d", "e"]));
        assert!(!state.has_more);
        assert_eq!(state.current_page, 3);

        list.load_more();
        settle().await;
        assert_eq!(source.call_count(), 3);
        assert_eq!(list.state().phase, Phase::Ready);

        let pages: Vec<u32> =
            source.calls().iter().map(|request| request.page).collect();
        assert_eq!(pages, [1, 2, 3]);
        assert!(source.calls().iter().all(|request| request.page_size == 2));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn appends_pages_in_request_order() {
    run_local(async {
        let source = MockSource::from_fn(|request| {
            let data = (0..request.page_size)
                .map(|i| format!("p{}-{i}", request.page))
                .collect();
            Ok(Page::new(data, true).with_total_count(100))
        });
        let config = ListConfig::default().with_page_size(page_size(3));
        let list = mount_list(config, source);
        settle().await;

        const LOADS: u32 = 4;
        for _ in 0..LOADS {
            list.load_more();
            settle().await;
        }

        let state = list.state();
        let expected: Vec<String> = (1..=LOADS + 1)
            .flat_map(|page| (0..3).map(move |i| format!("p{page}-{i}")))
            .collect();
        assert_eq!(state.items, expected);
        assert_eq!(state.current_page, LOADS + 1);
        assert_eq!(state.total_count, Some(100));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn rapid_load_more_issues_one_request() {
    run_local(async {
        let source = MockSource::pages(vec![
            Page::new(items(&["a"]), true),
            Page::new(items(&["b"]), true),
        ]);
        source.hold();
        let list = mount_list(ListConfig::default(), source.clone());

        // nothing loaded yet
        list.load_more();
        assert_eq!(source.call_count(), 1);

        assert!(source.release(0));
        settle().await;

        for _ in 0..5 {
            list.load_more();
        }
        assert_eq!(source.call_count(), 2);
        assert!(list.state().is_loading_more());

        assert!(source.release(1));
        settle().await;
        let state = list.state();
        assert_eq!(state.items, items(&["a", "b"]));
        assert_eq!(state.current_page, 2);
    })
    .await;
}
