//! Mock repository implementations for isolating services in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::mock;

use crate::domain::resource::Endpoints;
use crate::domain::types::{EntityId, FlagName};
use crate::dto::api::{Acknowledgement, ListPage, ListQuery};
use crate::dto::payload::Payload;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CollectionReader, CollectionWriter, DashboardReader};

mock! {
    pub Repository {}

    #[async_trait]
    impl CollectionReader for Repository {
        async fn list_records(
            &self,
            endpoints: &Endpoints,
            query: &ListQuery,
        ) -> RepositoryResult<ListPage>;
    }

    #[async_trait]
    impl CollectionWriter for Repository {
        async fn create_record(
            &self,
            endpoints: &Endpoints,
            payload: &Payload,
        ) -> RepositoryResult<Acknowledgement>;
        async fn update_record(
            &self,
            endpoints: &Endpoints,
            id: &EntityId,
            payload: &Payload,
        ) -> RepositoryResult<Acknowledgement>;
        async fn delete_record(
            &self,
            endpoints: &Endpoints,
            id: &EntityId,
        ) -> RepositoryResult<Acknowledgement>;
        async fn set_flag(
            &self,
            endpoints: &Endpoints,
            id: &EntityId,
            flag: &FlagName,
            value: bool,
        ) -> RepositoryResult<Acknowledgement>;
    }

    #[async_trait]
    impl DashboardReader for Repository {
        async fn resource_counts(&self, endpoint: &str) -> RepositoryResult<BTreeMap<String, u64>>;
    }
}
