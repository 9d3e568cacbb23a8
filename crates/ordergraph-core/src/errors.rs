use thiserror::Error;

/// Result type alias using OrderGraphError
pub type Result<T> = std::result::Result<T, OrderGraphError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// programmatically and that the CLI prints verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,

    // Domain rules
    InsufficientStock,
    IllegalState,
    DuplicateMember,

    // Loading pipelines
    /// A page was routed to a strategy whose row cardinality differs from root cardinality
    PaginationUnsupported,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InsufficientStock => "ERR_INSUFFICIENT_STOCK",
            ExErrorKind::IllegalState => "ERR_ILLEGAL_STATE",
            ExErrorKind::DuplicateMember => "ERR_DUPLICATE_MEMBER",
            ExErrorKind::PaginationUnsupported => "ERR_PAGINATION_UNSUPPORTED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether retrying the same request could ever succeed.
    ///
    /// Only infrastructure failures qualify; every domain and configuration
    /// error needs different input.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExErrorKind::Io | ExErrorKind::Persistence)
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus free-form context
/// for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    strategy: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            strategy: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add loading strategy context
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the strategy context, if any
    pub fn strategy(&self) -> Option<&str> {
        self.strategy.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(strategy) = &self.strategy {
            write!(f, " (strategy: {})", strategy)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for ordergraph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderGraphError {
    // ===== Stock =====
    /// Requested quantity exceeds the product's current stock
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        requested: u32,
        available: u32,
    },

    // ===== Order lifecycle =====
    /// Order cannot be cancelled once its delivery completed
    #[error("Order {order_id} cannot be cancelled: delivery already completed")]
    DeliveryCompleted { order_id: i64 },

    /// Order was already cancelled; cancelling again would double-credit stock
    #[error("Order {order_id} is already cancelled")]
    AlreadyCancelled { order_id: i64 },

    /// Returning stock would exceed the largest representable stock level
    #[error("Stock overflow for product {product_id}: {stock} + {quantity} exceeds the maximum")]
    StockOverflow {
        product_id: i64,
        stock: u32,
        quantity: u32,
    },

    /// Delivery cannot complete for a cancelled order
    #[error("Delivery for order {order_id} cannot complete: order is cancelled")]
    CancelledDelivery { order_id: i64 },

    /// An order must own at least one line item
    #[error("An order must contain at least one line item")]
    EmptyOrder,

    /// Line-item count must be positive
    #[error("Invalid quantity {count} for product {product_id}: must be at least 1")]
    InvalidQuantity { product_id: i64, count: u32 },

    // ===== Members =====
    /// Member name already taken
    #[error("Member already exists: {name}")]
    DuplicateMember { name: String },

    /// Member name must not be blank
    #[error("Invalid member name: {reason}")]
    InvalidMemberName { reason: String },

    // ===== Lookup =====
    #[error("Member not found: {member_id}")]
    MemberNotFound { member_id: i64 },

    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: i64 },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: i64 },

    // ===== Loading =====
    /// Offset/limit routed to a strategy that joins the to-many association
    #[error("Strategy '{strategy}' joins the line-item collection and cannot be paginated")]
    PaginationUnsupported { strategy: String },

    /// Page parameters out of range
    #[error("Invalid page: {reason}")]
    InvalidPage { reason: String },

    // ===== Parsing =====
    #[error("Unknown order status: {value}")]
    UnknownStatus { value: String },

    #[error("Unknown loading strategy: {value}")]
    UnknownStrategy { value: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from OrderGraphError to ExError
impl From<OrderGraphError> for ExError {
    fn from(err: OrderGraphError) -> Self {
        let message = err.to_string();
        match err {
            OrderGraphError::InsufficientStock { product_id, .. } => {
                ExError::new(ExErrorKind::InsufficientStock)
                    .with_op("remove_stock")
                    .with_entity_id(product_id)
                    .with_message(message)
            }

            OrderGraphError::DeliveryCompleted { order_id }
            | OrderGraphError::AlreadyCancelled { order_id } => {
                ExError::new(ExErrorKind::IllegalState)
                    .with_op("cancel_order")
                    .with_entity_id(order_id)
                    .with_message(message)
            }

            OrderGraphError::StockOverflow { product_id, .. } => {
                ExError::new(ExErrorKind::IllegalState)
                    .with_op("add_stock")
                    .with_entity_id(product_id)
                    .with_message(message)
            }

            OrderGraphError::CancelledDelivery { order_id } => {
                ExError::new(ExErrorKind::IllegalState)
                    .with_op("complete_delivery")
                    .with_entity_id(order_id)
                    .with_message(message)
            }

            OrderGraphError::EmptyOrder => ExError::new(ExErrorKind::InvalidInput)
                .with_op("place_order")
                .with_message(message),

            OrderGraphError::InvalidQuantity { product_id, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("create_line_item")
                    .with_entity_id(product_id)
                    .with_message(message)
            }

            OrderGraphError::DuplicateMember { name } => {
                ExError::new(ExErrorKind::DuplicateMember)
                    .with_op("join_member")
                    .with_entity_id(name)
                    .with_message(message)
            }

            OrderGraphError::InvalidMemberName { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("join_member")
                .with_message(message),

            OrderGraphError::MemberNotFound { member_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(member_id)
                .with_message(message),

            OrderGraphError::ProductNotFound { product_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(product_id)
                    .with_message(message)
            }

            OrderGraphError::OrderNotFound { order_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(order_id)
                .with_message(message),

            OrderGraphError::PaginationUnsupported { strategy } => {
                ExError::new(ExErrorKind::PaginationUnsupported)
                    .with_op("admit_page")
                    .with_strategy(strategy)
                    .with_message(message)
            }

            OrderGraphError::InvalidPage { .. }
            | OrderGraphError::UnknownStatus { .. }
            | OrderGraphError::UnknownStrategy { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            OrderGraphError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            OrderGraphError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for OrderGraphError {
    fn from(err: serde_json::Error) -> Self {
        OrderGraphError::Serialization {
            message: err.to_string(),
        }
    }
}
