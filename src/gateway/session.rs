use super::{Gateway, QueryError, UserRecord};
use crate::storage::Storage;

/// Caller-facing wrapper that keeps the records of the most recent call.
pub struct QuerySession<S: Storage> {
    gateway: Gateway<S>,
    records: Vec<UserRecord>,
}

impl<S: Storage> QuerySession<S> {
    pub fn new(gateway: Gateway<S>) -> Self {
        QuerySession {
            gateway,
            records: Vec::new(),
        }
    }

    /// Run a query, replacing whatever the previous call produced.
    ///
    /// Prior records are cleared before the gateway runs, so a failed call
    /// leaves the session empty.
    pub fn run(&mut self, query: &str, has_user_input: bool) -> Result<&[UserRecord], QueryError> {
        self.records.clear();
        self.records = self.gateway.execute(query, has_user_input)?;
        Ok(&self.records)
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn gateway(&self) -> &Gateway<S> {
        &self.gateway
    }

    pub fn into_gateway(self) -> Gateway<S> {
        self.gateway
    }
}
