//! Dialog service HTTP client implementation

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use dialog_core::models::*;
use tracing::{debug, instrument};
use url::Url;

use crate::auth::{BasicAuth, BearerToken, Credentials};
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::{ClientError, Result};
use crate::error_mapper::ErrorMapper;
use crate::request::{ListOptions, LogQuery, Method, RequestBuilder};
use crate::transport::{ReqwestTransport, Transport};

/// API version path segment
const API_PREFIX: &str = "v1";

/// Dialog service REST API client
///
/// Cheap to clone; clones share the transport and credentials.
#[derive(Debug, Clone)]
pub struct DialogClient {
    base_url: Url,
    version: String,
    credentials: Option<Arc<dyn Credentials>>,
    default_headers: BTreeMap<String, String>,
    dispatcher: Dispatcher,
}

impl DialogClient {
    /// Create a new client without credentials
    ///
    /// # Arguments
    /// * `base_url` - Service URL (e.g., "https://dialog.example.com/api")
    /// * `version` - API version date sent with every call (e.g., "2017-05-26")
    pub fn new(base_url: &str, version: &str) -> Result<Self> {
        Self::with_transport(base_url, version, Arc::new(ReqwestTransport::new()?))
    }

    /// Create a new client that authenticates with HTTP basic auth
    pub fn with_basic_auth(
        base_url: &str,
        version: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        Ok(Self::new(base_url, version)?.credentials(BasicAuth::new(username, password)))
    }

    /// Create a new client on top of a custom transport
    pub fn with_transport(
        base_url: &str,
        version: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        if version.is_empty() {
            return Err(ClientError::Config("version must not be empty".to_string()));
        }

        Ok(Self {
            base_url,
            version: version.to_string(),
            credentials: None,
            default_headers: BTreeMap::new(),
            dispatcher: Dispatcher::new(transport),
        })
    }

    /// Create a client from a loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_timeouts(
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )?;
        let mut client = Self::with_transport(&config.url, &config.version, Arc::new(transport))?;

        if let Some(credentials) = config.credentials()? {
            client.credentials = Some(credentials);
        }
        for (name, value) in &config.headers {
            client = client.default_header(name, value.clone());
        }
        Ok(client)
    }

    /// Authenticate every request with `credentials`
    pub fn credentials(mut self, credentials: impl Credentials + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// Authenticate every request with a bearer token
    pub fn bearer_token(self, token: &str) -> Self {
        self.credentials(BearerToken::new(token))
    }

    /// Send `name: value` with every request
    pub fn default_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.default_headers
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Replace the error mapper
    pub fn error_mapper(mut self, error_mapper: Arc<dyn ErrorMapper>) -> Self {
        self.dispatcher =
            Dispatcher::with_error_mapper(self.dispatcher.transport().clone(), error_mapper);
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the API version date
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the dispatcher, for requests not covered by an endpoint method
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // =========================================================================
    // Message
    // =========================================================================

    /// Send user input to a workspace and get the dialog's response
    ///
    /// Pass the previous response's context in `request` to continue a
    /// conversation.
    #[instrument(skip(self, request))]
    pub async fn message(
        &self,
        workspace_id: &str,
        request: Option<&MessageRequest>,
        nodes_visited_details: Option<bool>,
    ) -> Result<MessageResponse> {
        let mut builder = self
            .request(Method::Post, &["workspaces", workspace_id, "message"])?
            .query_opt("nodes_visited_details", nodes_visited_details);
        if let Some(request) = request {
            builder = builder.json_body(request)?;
        }
        self.dispatcher.expect_object(&builder.build()).await
    }

    // =========================================================================
    // Workspaces
    // =========================================================================

    /// List workspaces
    #[instrument(skip(self))]
    pub async fn list_workspaces(&self, options: &ListOptions) -> Result<WorkspaceCollection> {
        let builder = options.apply(self.request(Method::Get, &["workspaces"])?);
        self.dispatcher.expect_object(&builder.build()).await
    }

    /// Create a workspace, optionally with its full content
    #[instrument(skip(self, definition))]
    pub async fn create_workspace(&self, definition: &WorkspaceDefinition) -> Result<Workspace> {
        let request = self
            .request(Method::Post, &["workspaces"])?
            .json_body(definition)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    /// Get a workspace; with `export=true` its intents, entities,
    /// counterexamples and dialog nodes are included
    #[instrument(skip(self))]
    pub async fn get_workspace(&self, workspace_id: &str, export: Option<bool>) -> Result<Workspace> {
        let request = self
            .request(Method::Get, &["workspaces", workspace_id])?
            .query_opt("export", export)
            .build();
        self.dispatcher.expect_object(&request).await
    }

    /// Update a workspace
    ///
    /// Arrays in `definition` replace existing content unless `append` is set.
    #[instrument(skip(self, definition))]
    pub async fn update_workspace(
        &self,
        workspace_id: &str,
        definition: &WorkspaceDefinition,
        append: Option<bool>,
    ) -> Result<Workspace> {
        let request = self
            .request(Method::Post, &["workspaces", workspace_id])?
            .query_opt("append", append)
            .json_body(definition)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    /// Delete a workspace
    #[instrument(skip(self))]
    pub async fn delete_workspace(&self, workspace_id: &str) -> Result<()> {
        let request = self
            .request(Method::Delete, &["workspaces", workspace_id])?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// List the intents of a workspace
    #[instrument(skip(self))]
    pub async fn list_intents(
        &self,
        workspace_id: &str,
        export: Option<bool>,
        options: &ListOptions,
    ) -> Result<IntentCollection> {
        let builder = self
            .request(Method::Get, &["workspaces", workspace_id, "intents"])?
            .query_opt("export", export);
        let request = options.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, intent))]
    pub async fn create_intent(&self, workspace_id: &str, intent: &CreateIntent) -> Result<Intent> {
        let request = self
            .request(Method::Post, &["workspaces", workspace_id, "intents"])?
            .json_body(intent)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn get_intent(
        &self,
        workspace_id: &str,
        intent: &str,
        export: Option<bool>,
    ) -> Result<Intent> {
        let request = self
            .request(Method::Get, &["workspaces", workspace_id, "intents", intent])?
            .query_opt("export", export)
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_intent(
        &self,
        workspace_id: &str,
        intent: &str,
        update: &UpdateIntent,
    ) -> Result<Intent> {
        let request = self
            .request(Method::Post, &["workspaces", workspace_id, "intents", intent])?
            .json_body(update)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_intent(&self, workspace_id: &str, intent: &str) -> Result<()> {
        let request = self
            .request(Method::Delete, &["workspaces", workspace_id, "intents", intent])?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Examples
    // =========================================================================

    /// List the user input examples of an intent
    #[instrument(skip(self))]
    pub async fn list_examples(
        &self,
        workspace_id: &str,
        intent: &str,
        options: &ListOptions,
    ) -> Result<ExampleCollection> {
        let builder = self.request(
            Method::Get,
            &["workspaces", workspace_id, "intents", intent, "examples"],
        )?;
        let request = options.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, example))]
    pub async fn create_example(
        &self,
        workspace_id: &str,
        intent: &str,
        example: &CreateExample,
    ) -> Result<Example> {
        let request = self
            .request(
                Method::Post,
                &["workspaces", workspace_id, "intents", intent, "examples"],
            )?
            .json_body(example)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn get_example(&self, workspace_id: &str, intent: &str, text: &str) -> Result<Example> {
        let request = self
            .request(
                Method::Get,
                &["workspaces", workspace_id, "intents", intent, "examples", text],
            )?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_example(
        &self,
        workspace_id: &str,
        intent: &str,
        text: &str,
        update: &UpdateExample,
    ) -> Result<Example> {
        let request = self
            .request(
                Method::Post,
                &["workspaces", workspace_id, "intents", intent, "examples", text],
            )?
            .json_body(update)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_example(&self, workspace_id: &str, intent: &str, text: &str) -> Result<()> {
        let request = self
            .request(
                Method::Delete,
                &["workspaces", workspace_id, "intents", intent, "examples", text],
            )?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Counterexamples
    // =========================================================================

    /// List inputs marked as irrelevant to the workspace
    #[instrument(skip(self))]
    pub async fn list_counterexamples(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<CounterexampleCollection> {
        let builder = self.request(Method::Get, &["workspaces", workspace_id, "counterexamples"])?;
        let request = options.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, counterexample))]
    pub async fn create_counterexample(
        &self,
        workspace_id: &str,
        counterexample: &CreateCounterexample,
    ) -> Result<Counterexample> {
        let request = self
            .request(Method::Post, &["workspaces", workspace_id, "counterexamples"])?
            .json_body(counterexample)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn get_counterexample(&self, workspace_id: &str, text: &str) -> Result<Counterexample> {
        let request = self
            .request(
                Method::Get,
                &["workspaces", workspace_id, "counterexamples", text],
            )?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_counterexample(
        &self,
        workspace_id: &str,
        text: &str,
        update: &UpdateCounterexample,
    ) -> Result<Counterexample> {
        let request = self
            .request(
                Method::Post,
                &["workspaces", workspace_id, "counterexamples", text],
            )?
            .json_body(update)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_counterexample(&self, workspace_id: &str, text: &str) -> Result<()> {
        let request = self
            .request(
                Method::Delete,
                &["workspaces", workspace_id, "counterexamples", text],
            )?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// List the entities of a workspace
    #[instrument(skip(self))]
    pub async fn list_entities(
        &self,
        workspace_id: &str,
        export: Option<bool>,
        options: &ListOptions,
    ) -> Result<EntityCollection> {
        let builder = self
            .request(Method::Get, &["workspaces", workspace_id, "entities"])?
            .query_opt("export", export);
        let request = options.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, entity))]
    pub async fn create_entity(&self, workspace_id: &str, entity: &CreateEntity) -> Result<Entity> {
        let request = self
            .request(Method::Post, &["workspaces", workspace_id, "entities"])?
            .json_body(entity)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn get_entity(
        &self,
        workspace_id: &str,
        entity: &str,
        export: Option<bool>,
    ) -> Result<Entity> {
        let request = self
            .request(Method::Get, &["workspaces", workspace_id, "entities", entity])?
            .query_opt("export", export)
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_entity(
        &self,
        workspace_id: &str,
        entity: &str,
        update: &UpdateEntity,
    ) -> Result<Entity> {
        let request = self
            .request(Method::Post, &["workspaces", workspace_id, "entities", entity])?
            .json_body(update)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_entity(&self, workspace_id: &str, entity: &str) -> Result<()> {
        let request = self
            .request(Method::Delete, &["workspaces", workspace_id, "entities", entity])?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Entity Values
    // =========================================================================

    /// List the values of an entity
    #[instrument(skip(self))]
    pub async fn list_values(
        &self,
        workspace_id: &str,
        entity: &str,
        export: Option<bool>,
        options: &ListOptions,
    ) -> Result<ValueCollection> {
        let builder = self
            .request(
                Method::Get,
                &["workspaces", workspace_id, "entities", entity, "values"],
            )?
            .query_opt("export", export);
        let request = options.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, value))]
    pub async fn create_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &CreateValue,
    ) -> Result<EntityValue> {
        let request = self
            .request(
                Method::Post,
                &["workspaces", workspace_id, "entities", entity, "values"],
            )?
            .json_body(value)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn get_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        export: Option<bool>,
    ) -> Result<EntityValue> {
        let request = self
            .request(
                Method::Get,
                &["workspaces", workspace_id, "entities", entity, "values", value],
            )?
            .query_opt("export", export)
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        update: &UpdateValue,
    ) -> Result<EntityValue> {
        let request = self
            .request(
                Method::Post,
                &["workspaces", workspace_id, "entities", entity, "values", value],
            )?
            .json_body(update)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_value(&self, workspace_id: &str, entity: &str, value: &str) -> Result<()> {
        let request = self
            .request(
                Method::Delete,
                &["workspaces", workspace_id, "entities", entity, "values", value],
            )?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Synonyms
    // =========================================================================

    /// List the synonyms of an entity value
    #[instrument(skip(self))]
    pub async fn list_synonyms(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        options: &ListOptions,
    ) -> Result<SynonymCollection> {
        let builder = self.request(
            Method::Get,
            &["workspaces", workspace_id, "entities", entity, "values", value, "synonyms"],
        )?;
        let request = options.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, synonym))]
    pub async fn create_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &CreateSynonym,
    ) -> Result<Synonym> {
        let request = self
            .request(
                Method::Post,
                &["workspaces", workspace_id, "entities", entity, "values", value, "synonyms"],
            )?
            .json_body(synonym)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn get_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
    ) -> Result<Synonym> {
        let request = self
            .request(
                Method::Get,
                &[
                    "workspaces", workspace_id, "entities", entity, "values", value, "synonyms",
                    synonym,
                ],
            )?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
        update: &UpdateSynonym,
    ) -> Result<Synonym> {
        let request = self
            .request(
                Method::Post,
                &[
                    "workspaces", workspace_id, "entities", entity, "values", value, "synonyms",
                    synonym,
                ],
            )?
            .json_body(update)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
    ) -> Result<()> {
        let request = self
            .request(
                Method::Delete,
                &[
                    "workspaces", workspace_id, "entities", entity, "values", value, "synonyms",
                    synonym,
                ],
            )?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Dialog Nodes
    // =========================================================================

    /// List the dialog nodes of a workspace
    #[instrument(skip(self))]
    pub async fn list_dialog_nodes(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<DialogNodeCollection> {
        let builder = self.request(Method::Get, &["workspaces", workspace_id, "dialog_nodes"])?;
        let request = options.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, node))]
    pub async fn create_dialog_node(
        &self,
        workspace_id: &str,
        node: &CreateDialogNode,
    ) -> Result<DialogNode> {
        let request = self
            .request(Method::Post, &["workspaces", workspace_id, "dialog_nodes"])?
            .json_body(node)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn get_dialog_node(&self, workspace_id: &str, dialog_node: &str) -> Result<DialogNode> {
        let request = self
            .request(
                Method::Get,
                &["workspaces", workspace_id, "dialog_nodes", dialog_node],
            )?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_dialog_node(
        &self,
        workspace_id: &str,
        dialog_node: &str,
        update: &UpdateDialogNode,
    ) -> Result<DialogNode> {
        let request = self
            .request(
                Method::Post,
                &["workspaces", workspace_id, "dialog_nodes", dialog_node],
            )?
            .json_body(update)?
            .build();
        self.dispatcher.expect_object(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_dialog_node(&self, workspace_id: &str, dialog_node: &str) -> Result<()> {
        let request = self
            .request(
                Method::Delete,
                &["workspaces", workspace_id, "dialog_nodes", dialog_node],
            )?
            .build();
        self.dispatcher.expect_void(&request).await
    }

    // =========================================================================
    // Logs
    // =========================================================================

    /// List the logged message exchanges of one workspace
    #[instrument(skip(self))]
    pub async fn list_logs(&self, workspace_id: &str, query: &LogQuery) -> Result<LogCollection> {
        let builder = self.request(Method::Get, &["workspaces", workspace_id, "logs"])?;
        let request = query.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    /// List logged message exchanges across workspaces
    ///
    /// `filter` must select the workspaces, e.g. `workspace_id::<id>`; it
    /// takes the place of any filter set in `query`.
    #[instrument(skip(self))]
    pub async fn list_all_logs(&self, filter: &str, query: &LogQuery) -> Result<LogCollection> {
        let query = LogQuery {
            filter: Some(filter.to_string()),
            ..query.clone()
        };
        let builder = self.request(Method::Get, &["logs"])?;
        let request = query.apply(builder).build();
        self.dispatcher.expect_object(&request).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Start a request to `/v1/<segments>` with credentials, default headers
    /// and the version parameter attached
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);

        Ok(RequestBuilder::new(method, url)
            .credentials(self.credentials.clone())
            .headers(self.default_headers.iter().map(|(k, v)| (k, v.clone())))
            .query("version", &self.version))
    }

    /// Percent-encodes every segment, so ids containing `/` or spaces stay
    /// a single path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(API_PREFIX)
            .extend(segments);
        Ok(url)
    }
}
