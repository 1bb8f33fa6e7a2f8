//! Helpers that drain a paginated repository.

use crate::error::DirectoryResult;
use crate::models::{Company, Firm};
use crate::repositories::traits::{CompanyRepository, FirmRepository};
use std::future::Future;

/// Page size used when draining a repository.
pub const PAGE_SIZE: usize = 100;

/// Fetch every firm from a repository, page by page, until a short page.
pub async fn fetch_all_firms(repo: &dyn FirmRepository) -> DirectoryResult<Vec<Firm>> {
    drain(&repo.source_name(), |limit, offset| repo.list(limit, offset)).await
}

/// Fetch every company from a repository, page by page, until a short page.
pub async fn fetch_all_companies(repo: &dyn CompanyRepository) -> DirectoryResult<Vec<Company>> {
    drain(&repo.source_name(), |limit, offset| repo.list(limit, offset)).await
}

/// Request pages until one comes back short.
///
/// A full page identical to the one before it means the source ignores
/// `offset`; paging stops there instead of looping forever.
async fn drain<T, F, Fut>(source: &str, mut fetch_page: F) -> DirectoryResult<Vec<T>>
where
    T: PartialEq,
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = DirectoryResult<Vec<T>>>,
{
    let mut all = Vec::new();
    let mut offset = 0;

    loop {
        let page = fetch_page(PAGE_SIZE, offset).await?;
        let count = page.len();

        let repeated = offset > 0
            && count > 0
            && all.len() >= count
            && all[all.len() - count..] == page[..];
        if repeated {
            tracing::warn!(
                "{} returned the same page again at offset {}, stopping pagination",
                source,
                offset
            );
            break;
        }

        all.extend(page);

        if count < PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }

    Ok(all)
}
