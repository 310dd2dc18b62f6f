#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyError {
    Empty,
    NotAnObject,
    Unparsable(String),
}

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyError::Empty => write!(f, "JSON body is required"),
            BodyError::NotAnObject => write!(f, "JSON body must be an object"),
            BodyError::Unparsable(reason) => write!(f, "Invalid JSON body: {}", reason),
        }
    }
}

impl std::error::Error for BodyError {}

/// A request field that is missing or violates its constraint. `item` is the
/// position in `objetos` when the field belongs to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Missing {
        field: &'static str,
        item: Option<usize>,
    },
    NotAnObject {
        item: usize,
    },
    Invalid {
        field: &'static str,
        item: Option<usize>,
        expected: String,
    },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field, .. } | FieldError::Invalid { field, .. } => *field,
            FieldError::NotAnObject { .. } => "objetos",
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::Missing { field, item: None } => {
                write!(f, "Field '{}' is required", field)
            }
            FieldError::Missing {
                field,
                item: Some(item),
            } => write!(f, "Item {} must have a '{}' field", item, field),
            FieldError::NotAnObject { item } => write!(f, "Item {} must be an object", item),
            FieldError::Invalid {
                field,
                item: None,
                expected,
            } => write!(f, "Field '{}' must be {}", field, expected),
            FieldError::Invalid {
                field,
                item: Some(item),
                expected,
            } => write!(f, "Field '{}' of item {} must be {}", field, item, expected),
        }
    }
}

impl std::error::Error for FieldError {}
