//! Employee store

use shared::{Employee, NewEmployee, NoFilter};

use super::{Entity, EntityStore, FetchOutcome, StoreMessages, StoreResult};
use crate::client::{HttpClient, NetworkHttpClient};

impl Entity for Employee {
    type Input = NewEmployee;
    type Filter = NoFilter;

    const RESOURCE: &'static str = "employees";

    const MESSAGES: StoreMessages = StoreMessages {
        fetch_list: "Failed to load employees",
        fetch_one: "Failed to load employee",
        create: "Failed to create employee",
        update: "Failed to update employee",
        delete: "Failed to delete employee",
    };
}

/// Store of employee records
pub type EmployeeStore<C = NetworkHttpClient> = EntityStore<Employee, C>;

impl<C: HttpClient> EntityStore<Employee, C> {
    /// Load one page of employees
    pub async fn fetch_employees(&self, page: u32, limit: u32) -> StoreResult<FetchOutcome> {
        self.fetch_list(page, limit, NoFilter).await
    }

    /// Loaded employees flagged active
    pub fn active_employees(&self) -> Vec<Employee> {
        self.state
            .read()
            .items
            .iter()
            .filter(|e| e.is_active)
            .cloned()
            .collect()
    }
}
