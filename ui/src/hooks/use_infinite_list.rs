use infinite_list::{
    FetchAdapter, Filters, ListConfig, ListController, ListState,
};
use web_sys::Element;
use yew::prelude::*;

use crate::BrowserExecutor;
use crate::scroll::{DEFAULT_END_REACHED_THRESHOLD, ScrollMetrics};

/// Hook return type for an infinite list
pub struct InfiniteListHookReturn<T, F = Filters> {
    pub state: ListState<T, F>,
    pub load_more: Callback<()>,
    /// Pull-to-refresh. Completion shows up in `state`.
    pub refresh: Callback<()>,
    pub retry: Callback<()>,
    pub set_search_query: Callback<String>,
    pub set_filters: Callback<F>,
    pub clear_filters: Callback<()>,
    pub reset: Callback<()>,
    /// Attach to the scroll container's `onscroll` to load the next page
    /// as the end comes into view.
    pub on_scroll: Callback<Event>,
    /// For commands without a callback, e.g. `update_filters`.
    pub controller: ListController<T, F>,
}

impl<T, F> InfiniteListHookReturn<T, F> {
    /// Returns true if this is the first load of the current query.
    pub fn is_initial_loading(&self) -> bool {
        self.state.is_loading()
    }
}

/// Mount a list controller for the lifetime of the component.
///
/// `config` and `adapter` are only read on the first render. The component
/// re-renders whenever the list state changes, and the list is disposed
/// when the component unmounts.
///
/// # Example
///
/// ```rust,ignore
/// #[hook]
/// pub fn use_products() -> InfiniteListHookReturn<Product> {
///     use_infinite_list(ListConfig::default(), |request: PageRequest| async move {
///         get_api_client()
///             .list_products(&request)
///             .await
///             .map_err(FetchError::from_display)
///     })
/// }
/// ```
#[hook]
pub fn use_infinite_list<T, F, A>(
    config: ListConfig<F>,
    adapter: A,
) -> InfiniteListHookReturn<T, F>
where
    T: Clone + 'static,
    F: Clone + PartialEq + Default + 'static,
    A: FetchAdapter<T, F>,
{
    let force_update = use_force_update();

    let controller = use_memo((), move |_| {
        let controller =
            ListController::mount(config, adapter, BrowserExecutor);
        // registered before the first fetch can settle
        controller.on_change(move |_| force_update.force_update());
        controller
    });
    let controller = (*controller).clone();

    // Dispose on unmount
    {
        let controller = controller.clone();
        use_effect_with((), move |_| move || controller.dispose());
    }

    let load_more = {
        let controller = controller.clone();
        Callback::from(move |_| controller.load_more())
    };

    let refresh = {
        let controller = controller.clone();
        Callback::from(move |_| {
            yew::platform::spawn_local(controller.refresh())
        })
    };

    let retry = {
        let controller = controller.clone();
        Callback::from(move |_| controller.retry())
    };

    let set_search_query = {
        let controller = controller.clone();
        Callback::from(move |text: String| controller.set_search_query(text))
    };

    let set_filters = {
        let controller = controller.clone();
        Callback::from(move |filters: F| controller.set_filters(filters))
    };

    let clear_filters = {
        let controller = controller.clone();
        Callback::from(move |_| controller.clear_filters())
    };

    let reset = {
        let controller = controller.clone();
        Callback::from(move |_| controller.reset())
    };

    let on_scroll = {
        let controller = controller.clone();
        Callback::from(move |event: Event| {
            let Some(element) = event.target_dyn_into::<Element>() else {
                return;
            };
            let metrics = ScrollMetrics {
                offset: element.scroll_top(),
                viewport: element.client_height(),
                content: element.scroll_height(),
            };
            if metrics.is_near_end(DEFAULT_END_REACHED_THRESHOLD) {
                controller.load_more();
            }
        })
    };

    InfiniteListHookReturn {
        state: controller.state(),
        load_more,
        refresh,
        retry,
        set_search_query,
        set_filters,
        clear_filters,
        reset,
        on_scroll,
        controller,
    }
}
