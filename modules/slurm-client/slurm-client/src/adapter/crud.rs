//! Managers whose operations are exactly list/get/create/update/delete.

use async_trait::async_trait;
use slurm_client_sdk::{
    ApiVersion, Association, AssociationCreate, AssociationListOptions, AssociationManager,
    AssociationUpdate, Cluster, ClusterCreate, ClusterListOptions, ClusterManager, ClusterUpdate,
    Created, ListResult, Qos, QosCreate, QosListOptions, QosManager, QosUpdate, RequestContext,
    Reservation, ReservationCreate, ReservationListOptions, ReservationManager, ReservationUpdate,
    SlurmError, Wckey, WckeyCreate, WckeyListOptions, WckeyManager, WckeyUpdate,
};

use super::EntityAdapter;
use crate::versions::Binding;

/// Implements a CRUD manager trait for every binding of its entity.
///
/// `$arg` is the key type the trait takes, `$key` the binding's owned key.
macro_rules! crud_manager {
    (
        $manager:ident for $entity:ident {
            key: $arg:ty => $key:ty,
            create: $create:ident,
            update: $update:ident,
            query: $query:ident $(,)?
        }
    ) => {
        #[async_trait]
        impl<B> $manager for EntityAdapter<B>
        where
            B: Binding<
                    Key = $key,
                    Entity = $entity,
                    Create = $create,
                    Update = $update,
                    Query = $query,
                >,
        {
            fn version(&self) -> ApiVersion {
                B::capabilities().version
            }

            async fn list(
                &self,
                ctx: &RequestContext,
                opts: &$query,
            ) -> Result<ListResult<$entity>, SlurmError> {
                self.list_entities(ctx, opts).await
            }

            async fn get(&self, ctx: &RequestContext, key: $arg) -> Result<$entity, SlurmError> {
                self.get_entity(ctx, key).await
            }

            async fn create(
                &self,
                ctx: &RequestContext,
                input: &$create,
            ) -> Result<Created, SlurmError> {
                self.create_entity(ctx, input).await
            }

            async fn update(
                &self,
                ctx: &RequestContext,
                key: $arg,
                update: &$update,
            ) -> Result<(), SlurmError> {
                self.update_entity(ctx, key, update).await
            }

            async fn delete(&self, ctx: &RequestContext, key: $arg) -> Result<(), SlurmError> {
                self.delete_entity(ctx, key).await
            }
        }
    };
}

crud_manager!(AssociationManager for Association {
    key: u32 => u32,
    create: AssociationCreate,
    update: AssociationUpdate,
    query: AssociationListOptions,
});

crud_manager!(QosManager for Qos {
    key: &str => String,
    create: QosCreate,
    update: QosUpdate,
    query: QosListOptions,
});

crud_manager!(ReservationManager for Reservation {
    key: &str => String,
    create: ReservationCreate,
    update: ReservationUpdate,
    query: ReservationListOptions,
});

crud_manager!(ClusterManager for Cluster {
    key: &str => String,
    create: ClusterCreate,
    update: ClusterUpdate,
    query: ClusterListOptions,
});

crud_manager!(WckeyManager for Wckey {
    key: u32 => u32,
    create: WckeyCreate,
    update: WckeyUpdate,
    query: WckeyListOptions,
});
