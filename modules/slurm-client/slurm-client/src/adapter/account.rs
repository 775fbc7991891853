use async_trait::async_trait;
use slurm_client_sdk::{
    Account, AccountAssociationRequest, AccountCreate, AccountListOptions, AccountManager,
    AccountUpdate, ApiVersion, AssociationsCreated, Created, ListResult, RequestContext,
    SlurmError, Verb,
};

use super::EntityAdapter;
use crate::versions::AccountAssociations;

#[async_trait]
impl<B> AccountManager for EntityAdapter<B>
where
    B: AccountAssociations<
            Key = String,
            Entity = Account,
            Create = AccountCreate,
            Update = AccountUpdate,
            Query = AccountListOptions,
        >,
{
    fn version(&self) -> ApiVersion {
        B::capabilities().version
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &AccountListOptions,
    ) -> Result<ListResult<Account>, SlurmError> {
        self.list_entities(ctx, opts).await
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Account, SlurmError> {
        self.get_entity(ctx, name).await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        account: &AccountCreate,
    ) -> Result<Created, SlurmError> {
        self.create_entity(ctx, account).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &AccountUpdate,
    ) -> Result<(), SlurmError> {
        self.update_entity(ctx, name, update).await
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), SlurmError> {
        self.delete_entity(ctx, name).await
    }

    async fn create_association(
        &self,
        ctx: &RequestContext,
        request: &AccountAssociationRequest,
    ) -> Result<AssociationsCreated, SlurmError> {
        let call = self.prepare(ctx, Verb::CreateAssociation)?;
        call.validate(request)?;
        let body = call.body(B::association_body(request))?;
        let reply = call.send(ctx, None, body).await?;
        Ok(AssociationsCreated {
            count: request.accounts.len(),
            warnings: reply.warnings,
        })
    }
}
