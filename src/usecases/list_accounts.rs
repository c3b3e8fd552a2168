use crate::{
    domain::account::Account,
    usecases::{contracts::ChatGateway, error::QueryError},
};

pub fn list_accounts(gateway: &dyn ChatGateway) -> Result<Vec<Account>, QueryError> {
    Ok(gateway.list_accounts()?)
}
