//! Request dispatch
//!
//! Every endpoint call goes through [`Dispatcher`]: send the request, let the
//! [`ErrorMapper`] look at the response, and only then decode the body.

use std::sync::Arc;

use dialog_core::{Decodable, DynamicValue};
use tracing::{debug, warn};

use crate::error::{ClientError, Result, TransportError};
use crate::error_mapper::{ErrorMapper, ServiceErrorMapper};
use crate::request::RequestDescriptor;
use crate::transport::{RawResponse, Transport};

/// Sends requests and turns responses into typed results
#[derive(Debug, Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    error_mapper: Arc<dyn ErrorMapper>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_error_mapper(transport, Arc::new(ServiceErrorMapper))
    }

    pub fn with_error_mapper(
        transport: Arc<dyn Transport>,
        error_mapper: Arc<dyn ErrorMapper>,
    ) -> Self {
        Self {
            transport,
            error_mapper,
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn error_mapper(&self) -> &Arc<dyn ErrorMapper> {
        &self.error_mapper
    }

    /// Perform the request without interpreting the response
    pub async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.transport.perform(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }

    /// Perform the request and decode a `T` from the response body
    pub async fn expect_object<T: Decodable>(&self, request: &RequestDescriptor) -> Result<T> {
        let response = self.send(request).await?;
        self.check(&response)?;

        let json = DynamicValue::parse_document(&response.body)?;
        Ok(T::decode(&json)?)
    }

    /// Perform the request and discard the response body
    pub async fn expect_void(&self, request: &RequestDescriptor) -> Result<()> {
        let response = self.send(request).await?;
        self.check(&response)
    }

    fn check(&self, response: &RawResponse) -> Result<()> {
        if let Some(err) = self
            .error_mapper
            .map_error(response.status, response.body_opt())
        {
            debug!(status = err.status, message = ?err.message, "service reported an error");
            return Err(ClientError::Domain(err));
        }

        if !response.is_success() {
            warn!(status = response.status, "unrecognized error response");
            return Err(TransportError::UnacceptableStatus {
                status: response.status,
            }
            .into());
        }

        Ok(())
    }
}
