//! Single-record state changes against the backend.

use crate::domain::entity::{Entity, decode_record};
use crate::domain::resource::Endpoints;
use crate::domain::types::{EntityId, FlagName};
use crate::dto::api::Acknowledgement;
use crate::dto::payload::Payload;
use crate::repository::CollectionWriter;
use crate::services::ServiceResult;

/// What a successful mutation brought back.
#[derive(Clone, Debug, PartialEq)]
pub struct MutationOutcome<E> {
    /// Record echoed by the backend, when it sent one that decodes.
    pub record: Option<E>,
    pub message: Option<String>,
}

impl<E: Entity> MutationOutcome<E> {
    fn from_ack(ack: Acknowledgement) -> Self {
        // The write already happened, so an echo we cannot read is only logged.
        let record = ack
            .data
            .and_then(|data| match decode_record::<E>(data) {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("Ignoring undecodable {} echo: {err}", E::KIND);
                    None
                }
            });

        Self {
            record,
            message: ack.message,
        }
    }
}

/// Creates a record in the collection.
pub async fn create_record<E, R>(
    repo: &R,
    endpoints: &Endpoints,
    payload: &Payload,
) -> ServiceResult<MutationOutcome<E>>
where
    E: Entity,
    R: CollectionWriter + ?Sized,
{
    let ack = repo
        .create_record(endpoints, payload)
        .await
        .map_err(|err| {
            log::error!("Failed to create {}: {err}", E::KIND.display_name());
            err
        })?;

    log::info!("Created {}", E::KIND.display_name());
    Ok(MutationOutcome::from_ack(ack))
}

/// Replaces the fields of an existing record.
pub async fn update_record<E, R>(
    repo: &R,
    endpoints: &Endpoints,
    id: &EntityId,
    payload: &Payload,
) -> ServiceResult<MutationOutcome<E>>
where
    E: Entity,
    R: CollectionWriter + ?Sized,
{
    let ack = repo
        .update_record(endpoints, id, payload)
        .await
        .map_err(|err| {
            log::error!("Failed to update {} {id}: {err}", E::KIND.display_name());
            err
        })?;

    log::info!("Updated {} {id}", E::KIND.display_name());
    Ok(MutationOutcome::from_ack(ack))
}

/// Deletes a record. Callers are responsible for asking for confirmation.
pub async fn delete_record<E, R>(
    repo: &R,
    endpoints: &Endpoints,
    id: &EntityId,
) -> ServiceResult<MutationOutcome<E>>
where
    E: Entity,
    R: CollectionWriter + ?Sized,
{
    let ack = repo.delete_record(endpoints, id).await.map_err(|err| {
        log::error!("Failed to delete {} {id}: {err}", E::KIND.display_name());
        err
    })?;

    log::info!("Deleted {} {id}", E::KIND.display_name());
    Ok(MutationOutcome::from_ack(ack))
}

/// Stores `value` in the boolean field `flag` of a record.
pub async fn set_flag<E, R>(
    repo: &R,
    endpoints: &Endpoints,
    id: &EntityId,
    flag: &FlagName,
    value: bool,
) -> ServiceResult<MutationOutcome<E>>
where
    E: Entity,
    R: CollectionWriter + ?Sized,
{
    let ack = repo
        .set_flag(endpoints, id, flag, value)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to set {flag}={value} on {} {id}: {err}",
                E::KIND.display_name()
            );
            err
        })?;

    log::info!("Set {flag}={value} on {} {id}", E::KIND.display_name());
    Ok(MutationOutcome::from_ack(ack))
}
