use async_trait::async_trait;
use slurm_client_sdk::{
    ApiVersion, AssociationsCreated, Created, ListResult, RequestContext, SlurmError, User,
    UserAssociationRequest, UserCreate, UserListOptions, UserManager, UserUpdate, Verb,
};

use super::EntityAdapter;
use crate::versions::UserAssociations;

#[async_trait]
impl<B> UserManager for EntityAdapter<B>
where
    B: UserAssociations<
            Key = String,
            Entity = User,
            Create = UserCreate,
            Update = UserUpdate,
            Query = UserListOptions,
        >,
{
    fn version(&self) -> ApiVersion {
        B::capabilities().version
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &UserListOptions,
    ) -> Result<ListResult<User>, SlurmError> {
        self.list_entities(ctx, opts).await
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<User, SlurmError> {
        self.get_entity(ctx, name).await
    }

    async fn create(&self, ctx: &RequestContext, user: &UserCreate) -> Result<Created, SlurmError> {
        self.create_entity(ctx, user).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &UserUpdate,
    ) -> Result<(), SlurmError> {
        self.update_entity(ctx, name, update).await
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError> {
        self.delete_entity(ctx, name).await
    }

    async fn create_association(
        &self,
        ctx: &RequestContext,
        request: &UserAssociationRequest,
    ) -> Result<AssociationsCreated, SlurmError> {
        let call = self.prepare(ctx, Verb::CreateAssociation)?;
        call.validate(request)?;
        let body = call.body(B::association_body(request))?;
        let reply = call.send(ctx, None, body).await?;
        Ok(AssociationsCreated {
            count: request.users.len(),
            warnings: reply.warnings,
        })
    }
}
