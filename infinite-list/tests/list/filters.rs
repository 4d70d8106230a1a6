use std::num::NonZeroU32;
use std::time::Duration;

use infinite_list::{ListConfig, Page};
use test_helpers::{
    MockSource, filter_value, filters, mount_list, run_local, settle,
};
use tokio::time::advance;

/// Items name the category filter, the search and the page they came from.
fn catalog() -> MockSource<String> {
    MockSource::from_fn(|request| {
        let category =
            filter_value(&request.filters, "category").unwrap_or("all");
        let item =
            format!("{category}/{}/{}", request.search_query, request.page);
        Ok(Page::new(vec![item], true))
    })
}

#[tokio::test(start_paused = true)]
async fn filter_change_after_page_three_restarts_at_page_one() {
    run_local(async {
        let source = catalog();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;
        list.load_more();
        settle().await;
        list.load_more();
        settle().await;
        assert_eq!(list.state().current_page, 3);

        list.set_filters(filters(&[("category", "x")]));
        let state = list.state();
        assert!(state.items.is_empty());
        assert_eq!(state.current_page, 0);
        assert!(state.is_loading());

        settle().await;
        let state = list.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.items, ["x//1"]);

        let request = source.last_call().expect("filter fetch");
        assert_eq!(request.page, 1);
        assert_eq!(filter_value(&request.filters, "category"), Some("x"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn equal_filters_do_not_refetch() {
    run_local(async {
        let source = catalog();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;

        list.set_filters(filters(&[]));
        list.clear_filters();
        assert_eq!(source.call_count(), 1);

        list.set_filters(filters(&[("category", "x")]));
        list.set_filters(filters(&[("category", "x")]));
        assert_eq!(source.call_count(), 2);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn clear_filters_fetches_unfiltered() {
    run_local(async {
        let source = catalog();
        let list = mount_list(ListConfig::default(), source.clone());
        list.set_filters(filters(&[("category", "x")]));
        settle().await;

        list.clear_filters();
        settle().await;
        assert!(list.state().filters.is_empty());
        assert_eq!(list.state().items, ["all//1"]);
        assert_eq!(source.call_count(), 3);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn update_filters_starts_from_current_value() {
    run_local(async {
        let source = catalog();
        let list = mount_list(ListConfig::default(), source.clone());
        list.set_filters(filters(&[("category", "x")]));
        list.update_filters(|current| {
            let mut next = current.clone();
            next.insert("sort".into(), "price".into());
            next
        });
        settle().await;

        let request = source.last_call().expect("filter fetch");
        assert_eq!(
            request.filters,
            filters(&[("category", "x"), ("sort", "price")])
        );
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn filter_change_applies_pending_search_in_one_fetch() {
    run_local(async {
        let source = catalog();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;

        list.set_search_query("abc");
        list.set_filters(filters(&[("category", "x")]));
        assert_eq!(source.call_count(), 2);

        let request = source.last_call().expect("filter fetch");
        assert_eq!(request.search_query, "abc");
        assert_eq!(filter_value(&request.filters, "category"), Some("x"));
        assert!(!list.state().has_pending_search());

        // the debounce was consumed by the filter change
        advance(Duration::from_millis(300)).await;
        settle().await;
        assert_eq!(source.call_count(), 2);
        assert_eq!(list.state().items, ["x/abc/1"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn page_size_is_part_of_the_query() {
    run_local(async {
        let source = catalog();
        let list = mount_list(ListConfig::default(), source.clone());
        settle().await;
        list.load_more();
        settle().await;

        let five = NonZeroU32::new(5).expect("non-zero");
        list.set_page_size(five);
        list.set_page_size(five);
        settle().await;

        assert_eq!(source.call_count(), 3);
        let request = source.last_call().expect("resized fetch");
        assert_eq!((request.page, request.page_size), (1, 5));
        assert_eq!(list.state().current_page, 1);
    })
    .await;
}
