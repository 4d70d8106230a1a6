//! yew bindings for the list controller.
//!
//! ```rust,ignore
//! fn main() {
//!     ui::init_logging();
//!     yew::Renderer::<Products>::new().render();
//! }
//!
//! #[function_component]
//! fn Products() -> Html {
//!     let list = use_infinite_list(ListConfig::default(), fetch_products);
//!     let oninput = {
//!         let set_search_query = list.set_search_query.clone();
//!         Callback::from(move |e: InputEvent| {
//!             let input: HtmlInputElement = e.target_unchecked_into();
//!             set_search_query.emit(input.value())
//!         })
//!     };
//!     html! {
//!         <div onscroll={list.on_scroll.clone()}>
//!             <input value={list.state.search_input.clone()} {oninput} />
//!             { for list.state.items.iter().map(render_product) }
//!         </div>
//!     }
//! }
//! ```

mod executor;
pub mod hooks;
mod logs;
pub mod scroll;

pub use executor::BrowserExecutor;
pub use hooks::{InfiniteListHookReturn, use_infinite_list};
pub use logs::init_logging;
