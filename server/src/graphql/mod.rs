mod payload;

use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, ID, Object, Schema, SimpleObject};
use platform_api::gql_error;
use products_hr::{EmployeeDirectory, EmployeeId, ReportingStructureService};
use serde::Serialize;
use tracing::instrument;

pub use payload::{EmployeePayload, ReportingStructurePayload};

pub type SchemaType = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Calculator wired to whichever directory the process was started with.
pub type ReportingService = ReportingStructureService<Arc<dyn EmployeeDirectory>>;

#[derive(Clone)]
pub struct GraphqlData {
    pub reporting: Arc<ReportingService>,
}

pub fn build_schema(data: GraphqlData) -> SchemaType {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(data)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload { ok: true }
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    #[instrument(name = "graphql.employee", skip(self, ctx))]
    async fn employee(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<EmployeePayload> {
        let data = ctx.data::<GraphqlData>()?;
        let employee_id = EmployeeId::parse(id.to_string()).map_err(gql_error)?;
        let employee = data
            .reporting
            .directory()
            .read(&employee_id)
            .map_err(gql_error)?;
        Ok(employee.into())
    }

    #[instrument(name = "graphql.reporting_structure", skip(self, ctx))]
    async fn reporting_structure(
        &self,
        ctx: &Context<'_>,
        employee_id: ID,
    ) -> async_graphql::Result<ReportingStructurePayload> {
        let data = ctx.data::<GraphqlData>()?;
        let employee_id = EmployeeId::parse(employee_id.to_string()).map_err(gql_error)?;
        let structure = data
            .reporting
            .generate_for_id(&employee_id)
            .map_err(gql_error)?;
        Ok(structure.into())
    }
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}
