//! Employee operations: login, profile lookup and password reset.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `/authenticate_user/` | Check credentials, return the employee |
//! | GET  | `/get_employee/` | Profile of the calling employee |
//! | POST | `/reset_password/` | Change the calling employee's password |

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::UpstreamError;
use crate::operation::{AUTHENTICATE, GET_EMPLOYEE, RESET_PASSWORD};
use crate::transport::Transport;
use crate::types::false_as_none;

/// An employee record as returned by the upstream system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "false_as_none")]
    pub email: Option<String>,
}

/// Client for employee operations.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    transport: Transport,
}

impl EmployeeClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Verify a login and password.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Employee, UpstreamError> {
        let body = json!({ "user_login": login, "password": password });
        let mut envelope = self.transport.call(&AUTHENTICATE, Some(&body)).await?;
        Transport::payload(&AUTHENTICATE, &mut envelope, "employee")
    }

    /// Fetch the employee identified by `employee_id`.
    pub async fn get(&self, employee_id: &str) -> Result<Employee, UpstreamError> {
        let body = json!({ "employee_id": employee_id });
        let mut envelope = self.transport.call(&GET_EMPLOYEE, Some(&body)).await?;
        Transport::payload(&GET_EMPLOYEE, &mut envelope, "employee")
    }

    pub async fn reset_password(
        &self,
        employee_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UpstreamError> {
        let body = json!({
            "employee_id": employee_id,
            "current_password": current_password,
            "new_password": new_password,
        });
        self.transport.call(&RESET_PASSWORD, Some(&body)).await?;
        Ok(())
    }
}
