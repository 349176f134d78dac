use std::future::Future;

use futures_util::stream::BoxStream;

use crate::http::error::Error;

/// A list request that can be pointed at a following page.
pub trait PageRequest {
    fn set_page_token(&mut self, page_token: String);
}

/// One page of a list response.
pub trait Page {
    type Item;

    /// The items of the page and the token of the next page, empty on the last page.
    fn into_parts(self) -> (Vec<Self::Item>, String);
}

/// Streams every item of a paginated list, issuing one call per page.
///
/// Pages are fetched lazily as the stream is polled. The stream ends after a page without a
/// next page token. A failed page yields the error as the final element.
pub fn paginate<R, P, F, Fut>(request: R, mut fetch: F) -> BoxStream<'static, Result<P::Item, Error>>
where
    R: PageRequest + Clone + Send + 'static,
    P: Page + Send + 'static,
    P::Item: Send + 'static,
    F: FnMut(R) -> Fut + Send + 'static,
    Fut: Future<Output = Result<P, Error>> + Send + 'static,
{
    let mut request = request;
    Box::pin(async_stream::stream! {
        loop {
            let page = match fetch(request.clone()).await {
                Ok(page) => page,
                Err(e) => {
                    yield Err(e);
                    break;
                }
            };
            let (items, next_page_token) = page.into_parts();
            for item in items {
                yield Ok(item);
            }
            if next_page_token.is_empty() {
                break;
            }
            request.set_page_token(next_page_token);
        }
    })
}
