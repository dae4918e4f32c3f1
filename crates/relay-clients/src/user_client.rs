//! User adapter: SOAP over HTTP to the user service.
//!
//! A SOAP fault whose message reports absence becomes `NotFound`; any other
//! fault, a non-2xx status without a fault, or a document that does not
//! decode becomes `BackendProtocolFault`. Transport failures and timeouts
//! become `BackendUnavailable`.

use std::time::Duration;

use relay_core::{Fault, Result, User, UserId};
use relay_soap::{
    decode_user_list_response, decode_user_response, SoapError, SoapRequest, UserOperation,
    SERVICE_NS, SOAP_CONTENT_TYPE,
};

/// Name used for the user backend in fault details.
pub const USER_SERVICE: &str = "user service";

/// A user plus the gateway-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReply {
    /// The user.
    pub user: User,
    /// Message for the REST response.
    pub message: String,
}

/// Every user plus the gateway-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListReply {
    /// The users, in creation order.
    pub users: Vec<User>,
    /// Message for the REST response.
    pub message: String,
}

/// SOAP client for the user service.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl UserClient {
    /// Create a client posting envelopes to `endpoint`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The service URL (e.g., "http://users:8001/")
    #[must_use]
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// The service URL envelopes are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns a `Fault` classified per the module docs.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<UserReply> {
        let request = SoapRequest::CreateUser {
            name: name.to_string(),
            email: email.to_string(),
        };
        let body = self.call(&request).await?;
        let user = decode_user_response(&body)
            .map_err(|e| log_fault(UserOperation::CreateUser, classify(&e)))?;

        tracing::info!(user_id = %user.user_id, "User created");
        Ok(UserReply {
            user,
            message: "User created successfully via SOAP.".to_string(),
        })
    }

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns a `Fault` classified per the module docs.
    pub async fn list_users(&self) -> Result<UserListReply> {
        let body = self.call(&SoapRequest::ListUsers).await?;
        let users = decode_user_list_response(&body)
            .map_err(|e| log_fault(UserOperation::ListUsers, classify(&e)))?;

        let message = format!("{} users found via SOAP.", users.len());
        Ok(UserListReply { users, message })
    }

    /// Get one user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the service faults with an absence message.
    pub async fn get_user(&self, user_id: UserId) -> Result<UserReply> {
        let body = self.call(&SoapRequest::GetUser { user_id }).await?;
        let user = decode_user_response(&body)
            .map_err(|e| log_fault(UserOperation::GetUser, classify(&e)))?;

        let message = format!("User with ID {user_id} found via SOAP.");
        Ok(UserReply { user, message })
    }

    /// Post one envelope and return the response document.
    ///
    /// A non-2xx response is returned as an error unless it carries a fault,
    /// in which case the fault is classified.
    async fn call(&self, request: &SoapRequest) -> Result<String> {
        let operation = request.operation();
        let envelope = request
            .encode()
            .map_err(|e| Fault::internal(format!("could not encode SOAP request: {e}")))?;

        tracing::debug!(operation = operation.element_name(), endpoint = %self.endpoint, "Calling user service");

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", soap_action(operation))
            .timeout(self.timeout)
            .body(envelope)
            .send()
            .await
            .map_err(|e| self.transport_fault(operation, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_fault(operation, &e))?;

        if status.is_success() {
            return Ok(body);
        }

        // Faults arrive with HTTP 500; anything else is unexpected.
        match decode_user_response(&body) {
            Err(err @ SoapError::Fault(_)) => Err(log_fault(operation, classify(&err))),
            _ => Err(log_fault(
                operation,
                Fault::protocol(format!("{USER_SERVICE} returned HTTP {status}")),
            )),
        }
    }

    fn transport_fault(&self, operation: UserOperation, err: &reqwest::Error) -> Fault {
        let fault = if err.is_timeout() {
            Fault::unavailable(format!(
                "{USER_SERVICE} did not respond within {:?}",
                self.timeout
            ))
        } else {
            Fault::unavailable(format!("{USER_SERVICE} is unreachable: {err}"))
        };
        log_fault(operation, fault)
    }
}

fn soap_action(operation: UserOperation) -> String {
    format!("{SERVICE_NS}#{}", operation.element_name())
}

fn log_fault(operation: UserOperation, fault: Fault) -> Fault {
    tracing::error!(
        operation = operation.element_name(),
        category = %fault.category,
        detail = %fault.detail,
        "User service call failed"
    );
    fault
}

/// Map a SOAP decoding error to a fault.
#[must_use]
pub fn classify(err: &SoapError) -> Fault {
    match err {
        SoapError::Fault(fault) if fault.is_not_found() => Fault::not_found(fault.message.clone()),
        SoapError::Fault(fault) => Fault::protocol(format!(
            "{USER_SERVICE} returned fault {}: {}",
            fault.code, fault.message
        )),
        SoapError::Xml(_) | SoapError::NotAnEnvelope(_) => {
            Fault::protocol(format!("{USER_SERVICE} sent a malformed response"))
        }
        other => Fault::protocol(format!("{USER_SERVICE} sent an invalid response: {other}")),
    }
}
