//! Operation descriptor.

use serde_json::Value;

use super::{InputValue, OperationContext, Variables};

/// A GraphQL request: name, query text, variables and a shared context.
///
/// Operations are built once and then only read; the context is the single
/// mutable part and is shared by every clone.
///
/// # Example
///
/// ```rust
/// use graphql_upload_link::{Operation, Upload};
///
/// let operation = Operation::new("mutation Upload($file: Upload!) { upload(file: $file) { id } }")
///     .operation_name("Upload")
///     .variable("file", Upload::from_bytes(b"hello".to_vec()).with_file_name("a.txt"));
///
/// assert_eq!(operation.name(), Some("Upload"));
/// assert!(operation.has_uploads());
/// ```
#[derive(Debug, Clone)]
pub struct Operation {
    operation_name: Option<String>,
    query: String,
    variables: Variables,
    extensions: Option<Value>,
    context: OperationContext,
}

impl Operation {
    /// Creates an operation from query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            operation_name: None,
            query: query.into(),
            variables: Variables::new(),
            extensions: None,
            context: OperationContext::new(),
        }
    }

    /// Sets the operation name.
    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Binds a variable. Re-binding a name keeps its original position.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Replaces all variables.
    #[must_use]
    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Sets extension metadata.
    #[must_use]
    pub fn extensions(mut self, extensions: Value) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Uses an existing context instead of a fresh one.
    #[must_use]
    pub fn with_context(mut self, context: OperationContext) -> Self {
        self.context = context;
        self
    }

    /// Returns the operation name.
    pub fn name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Returns the query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the bound variables.
    pub fn variable_map(&self) -> &Variables {
        &self.variables
    }

    /// Returns the extension metadata.
    pub fn extension_data(&self) -> Option<&Value> {
        self.extensions.as_ref()
    }

    /// Returns the shared context.
    pub fn context(&self) -> &OperationContext {
        &self.context
    }

    /// Returns `true` if any variable holds a file upload.
    pub fn has_uploads(&self) -> bool {
        self.variables.values().any(InputValue::contains_upload)
    }
}
