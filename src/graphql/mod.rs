//! GraphQL schema
//!
//! A thin resolver layer: each field validates nothing itself, it builds
//! the matching service from shared state and converts the outcome. Typed
//! failures cross the boundary with their `extensions.code` attached.

pub mod view;

pub use view::{AuthPayload, EmployeeView, UserView};

use async_graphql::{Context, EmptySubscription, ErrorExtensions, ID, Object, Schema};

use crate::core::ServerState;
use crate::services::{
    AccountService, AddEmployeeInput, EmployeeService, SignupInput, UpdateEmployeeInput,
};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: ServerState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

fn accounts(ctx: &Context<'_>) -> async_graphql::Result<AccountService> {
    let state = ctx.data::<ServerState>()?;
    Ok(AccountService::new(state.db.clone(), state.jwt.clone()))
}

fn employees(ctx: &Context<'_>) -> async_graphql::Result<EmployeeService> {
    let state = ctx.data::<ServerState>()?;
    Ok(EmployeeService::new(state.db.clone()))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Authenticate with a username or email plus password
    async fn login(
        &self,
        ctx: &Context<'_>,
        username_or_email: String,
        password: String,
    ) -> async_graphql::Result<AuthPayload> {
        let (token, account) = accounts(ctx)?
            .login(&username_or_email, &password)
            .await
            .map_err(|e| e.extend())?;
        Ok(AuthPayload {
            token,
            user: account.into(),
        })
    }

    /// Every employee record, newest first
    async fn get_all_employees(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<EmployeeView>> {
        let all = employees(ctx)?.list().await.map_err(|e| e.extend())?;
        Ok(all.into_iter().map(EmployeeView::from).collect())
    }

    /// Single employee by id; null when the id is unknown
    async fn get_employee_by_eid(
        &self,
        ctx: &Context<'_>,
        eid: ID,
    ) -> async_graphql::Result<Option<EmployeeView>> {
        let found = employees(ctx)?
            .get(eid.as_str())
            .await
            .map_err(|e| e.extend())?;
        Ok(found.map(EmployeeView::from))
    }

    /// Case-insensitive substring match on designation and/or department
    async fn get_employees_by_designation_or_department(
        &self,
        ctx: &Context<'_>,
        designation: Option<String>,
        department: Option<String>,
    ) -> async_graphql::Result<Vec<EmployeeView>> {
        let matched = employees(ctx)?
            .search(designation, department)
            .await
            .map_err(|e| e.extend())?;
        Ok(matched.into_iter().map(EmployeeView::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register an account and return its first token
    async fn signup(
        &self,
        ctx: &Context<'_>,
        input: SignupInput,
    ) -> async_graphql::Result<AuthPayload> {
        let (token, account) = accounts(ctx)?.signup(input).await.map_err(|e| e.extend())?;
        Ok(AuthPayload {
            token,
            user: account.into(),
        })
    }

    /// Create an employee record
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        input: AddEmployeeInput,
    ) -> async_graphql::Result<EmployeeView> {
        let created = employees(ctx)?.add(input).await.map_err(|e| e.extend())?;
        Ok(created.into())
    }

    /// Merge the supplied fields into an existing employee
    async fn update_employee_by_eid(
        &self,
        ctx: &Context<'_>,
        eid: ID,
        input: UpdateEmployeeInput,
    ) -> async_graphql::Result<EmployeeView> {
        let updated = employees(ctx)?
            .update(eid.as_str(), input)
            .await
            .map_err(|e| e.extend())?;
        Ok(updated.into())
    }

    /// Delete an employee, returning its last state
    async fn delete_employee_by_eid(
        &self,
        ctx: &Context<'_>,
        eid: ID,
    ) -> async_graphql::Result<EmployeeView> {
        let deleted = employees(ctx)?
            .delete(eid.as_str())
            .await
            .map_err(|e| e.extend())?;
        Ok(deleted.into())
    }
}
