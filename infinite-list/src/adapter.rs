use std::future::Future;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use payloads::{FetchError, Page, PageRequest};

/// The data source behind a list.
///
/// Failures must come back as `Err`, never as an empty page. The controller
/// may drop the returned future before it completes when its result is no
/// longer wanted.
///
/// Any `Fn(PageRequest<F>) -> impl Future<Output = Result<Page<T>, _>>`
/// closure is an adapter:
///
/// ```rust,ignore
/// let adapter = move |request: PageRequest| {
///     let client = client.clone();
///     async move {
///         client
///             .list_products(&request)
///             .await
///             .map_err(FetchError::from_display)
///     }
/// };
/// ```
pub trait FetchAdapter<T, F>: 'static {
    fn fetch(
        &self,
        request: PageRequest<F>,
    ) -> LocalBoxFuture<'static, Result<Page<T>, FetchError>>;
}

impl<T, F, Func, Fut> FetchAdapter<T, F> for Func
where
    Func: Fn(PageRequest<F>) -> Fut + 'static,
    Fut: Future<Output = Result<Page<T>, FetchError>> + 'static,
{
    fn fetch(
        &self,
        request: PageRequest<F>,
    ) -> LocalBoxFuture<'static, Result<Page<T>, FetchError>> {
        self(request).boxed_local()
    }
}
