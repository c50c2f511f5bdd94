//! Loading a page of records for the current query.

use crate::domain::entity::{Entity, decode_record};
use crate::domain::query::QueryState;
use crate::domain::resource::Endpoints;
use crate::dto::api::ListQuery;
use crate::repository::CollectionReader;
use crate::services::{ServiceError, ServiceResult};

/// A decoded page of records.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub total_pages: Option<u32>,
}

/// Requests the page described by `query` and decodes its records.
///
/// Display fields are read leniently. A record without a usable id or label
/// fails the whole page: a partial table would silently hide rows.
pub async fn load_page<E, R>(
    repo: &R,
    endpoints: &Endpoints,
    query: &QueryState,
) -> ServiceResult<Page<E>>
where
    E: Entity,
    R: CollectionReader + ?Sized,
{
    let list_query = ListQuery::from(query);

    let page = repo
        .list_records(endpoints, &list_query)
        .await
        .map_err(|err| {
            log::error!("Failed to list {}: {err}", E::KIND);
            err
        })?;

    let items = page
        .items
        .into_iter()
        .map(decode_record::<E>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            log::error!("Failed to decode {} page: {err}", E::KIND);
            ServiceError::Decode {
                kind: E::KIND,
                message: err.to_string(),
            }
        })?;

    Ok(Page {
        items,
        total_pages: page.total_pages,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::query::QueryAction;
    use crate::domain::resource::ResourceKind;
    use crate::domain::trip::Tour;
    use crate::dto::api::ListPage;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn sends_query_and_decodes_records() {
        let mut repo = MockRepository::new();
        repo.expect_list_records()
            .times(1)
            .withf(|endpoints, query| {
                endpoints.list == "/tours"
                    && query.page == 1
                    && query.search.as_deref() == Some("everest")
            })
            .returning(|_, _| {
                Ok(ListPage {
                    items: vec![json!({ "_id": "t1", "name": "Everest Base Camp" })],
                    total_pages: Some(1),
                })
            });

        let mut query = QueryState::default();
        query.apply(QueryAction::SetSearch("everest".into()));

        let page: Page<Tour> =
            load_page(&repo, &ResourceKind::Tours.default_endpoints(), &query)
                .await
                .expect("page should load");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Everest Base Camp");
        assert_eq!(page.total_pages, Some(1));
    }

    #[tokio::test]
    async fn undecodable_record_fails_the_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_records().returning(|_, _| {
            Ok(ListPage {
                items: vec![json!({ "_id": "t1" })],
                total_pages: None,
            })
        });

        let result: ServiceResult<Page<Tour>> = load_page(
            &repo,
            &ResourceKind::Tours.default_endpoints(),
            &QueryState::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(ServiceError::Decode {
                kind: ResourceKind::Tours,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn repository_errors_pass_through() {
        let mut repo = MockRepository::new();
        repo.expect_list_records()
            .returning(|_, _| Err(RepositoryError::Rejected(Some("Not allowed".into()))));

        let result: ServiceResult<Page<Tour>> = load_page(
            &repo,
            &ResourceKind::Tours.default_endpoints(),
            &QueryState::default(),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.user_message(), Some("Not allowed"));
    }
}
