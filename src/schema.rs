use crate::errors;
use std::fmt;
use std::str::FromStr;

/// Bytes every row carries regardless of user columns: primary key, agent id, timestamp.
pub const BASE_OVERHEAD: u64 = 20;

/// Length prefix added on top of the declared length of variable-length columns.
pub const LENGTH_PREFIX: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    INT,      // 32-bit integer
    BIGINT,   // 64-bit integer
    FLOAT,    // 32-bit floating point
    DOUBLE,   // 64-bit floating point
    UUID,     // 128-bit identifier
    DATETIME, // Date and time combined
    DATE,     // Calendar date
    BOOLEAN,  // True/False value
    VARCHAR,  // Variable-length string
    TEXT,     // Variable-length text
}

/// Static description of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub type_: ColumnType,
    pub id: &'static str,
    pub label: &'static str,
    pub fixed_size: u64,
    pub is_variable_length: bool,
}

/// Every supported column type, in the order offered to the user.
pub const TYPES: [TypeDescriptor; 10] = [
    fixed(ColumnType::INT, "int", "Integer", 4),
    fixed(ColumnType::BIGINT, "bigint", "Big Integer", 8),
    fixed(ColumnType::FLOAT, "float", "Float", 4),
    fixed(ColumnType::DOUBLE, "double", "Double", 8),
    fixed(ColumnType::UUID, "uuid", "UUID", 16),
    fixed(ColumnType::DATETIME, "datetime", "DateTime", 8),
    fixed(ColumnType::DATE, "date", "Date", 3),
    fixed(ColumnType::BOOLEAN, "boolean", "Boolean", 1),
    variable(ColumnType::VARCHAR, "varchar", "String"),
    variable(ColumnType::TEXT, "text", "Text"),
];

const fn fixed(
    type_: ColumnType,
    id: &'static str,
    label: &'static str,
    size: u64,
) -> TypeDescriptor {
    TypeDescriptor {
        type_,
        id,
        label,
        fixed_size: size,
        is_variable_length: false,
    }
}

const fn variable(type_: ColumnType, id: &'static str, label: &'static str) -> TypeDescriptor {
    TypeDescriptor {
        type_,
        id,
        label,
        fixed_size: 0,
        is_variable_length: true,
    }
}

impl ColumnType {
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        match self {
            ColumnType::INT => &TYPES[0],
            ColumnType::BIGINT => &TYPES[1],
            ColumnType::FLOAT => &TYPES[2],
            ColumnType::DOUBLE => &TYPES[3],
            ColumnType::UUID => &TYPES[4],
            ColumnType::DATETIME => &TYPES[5],
            ColumnType::DATE => &TYPES[6],
            ColumnType::BOOLEAN => &TYPES[7],
            ColumnType::VARCHAR => &TYPES[8],
            ColumnType::TEXT => &TYPES[9],
        }
    }

    pub fn is_variable_length(&self) -> bool {
        self.descriptor().is_variable_length
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().id)
    }
}

impl FromStr for ColumnType {
    type Err = errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        TYPES
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.type_)
            .ok_or_else(|| {
                let known: Vec<&str> = TYPES.iter().map(|t| t.id).collect();
                err!(
                    Schema,
                    "Unknown column type '{}'. Expected one of: {}",
                    s.trim(),
                    known.join(", ")
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: Option<String>,
    pub type_: ColumnType,
    /// Average stored length; only read for variable-length types.
    pub length: Option<u64>,
}

impl ColumnSpec {
    pub fn new(type_: ColumnType, length: Option<u64>) -> Self {
        Self {
            name: None,
            type_,
            length,
        }
    }

    pub fn named(name: impl Into<String>, type_: ColumnType, length: Option<u64>) -> Self {
        Self {
            name: Some(name.into()),
            type_,
            length,
        }
    }

    /// Bytes this column contributes to a row.
    pub fn size(&self) -> u64 {
        let descriptor = self.type_.descriptor();
        if descriptor.is_variable_length {
            self.length.unwrap_or(0) + LENGTH_PREFIX
        } else {
            descriptor.fixed_size
        }
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{} ", name)?;
        }
        match (self.type_.is_variable_length(), self.length) {
            (true, Some(len)) => write!(f, "{}({})", self.type_, len),
            (true, None) => write!(f, "{}(0)", self.type_),
            (false, _) => write!(f, "{}", self.type_),
        }
    }
}

/// Ordered list of user-defined columns. Only the aggregate size matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSpec {
    pub columns: Vec<ColumnSpec>,
}

impl SchemaSpec {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn columns_size(&self) -> u64 {
        self.columns.iter().map(|c| c.size()).sum()
    }

    pub fn get_row_size(&self) -> u64 {
        BASE_OVERHEAD + self.columns_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_types() {
        for t in TYPES.iter() {
            assert_eq!(t.type_.descriptor(), t);
            assert_eq!(t.id.parse::<ColumnType>().unwrap(), t.type_);
            if t.is_variable_length {
                assert_eq!(t.fixed_size, 0);
            }
        }
    }

    #[test]
    fn test_parse_type_case_insensitive() {
        assert_eq!("VARCHAR".parse::<ColumnType>().unwrap(), ColumnType::VARCHAR);
        assert_eq!(" Uuid ".parse::<ColumnType>().unwrap(), ColumnType::UUID);
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "blob".parse::<ColumnType>().unwrap_err();
        assert_eq!(err.code(), 5000);
        assert!(err.to_string().contains("'blob'"));
    }

    #[test]
    fn test_fixed_column_ignores_length() {
        let c = ColumnSpec::new(ColumnType::DATE, Some(100));
        assert_eq!(c.size(), 3);
        let c = ColumnSpec::new(ColumnType::UUID, None);
        assert_eq!(c.size(), 16);
    }

    #[test]
    fn test_variable_column_adds_prefix() {
        assert_eq!(ColumnSpec::new(ColumnType::VARCHAR, Some(50)).size(), 52);
        assert_eq!(ColumnSpec::new(ColumnType::TEXT, None).size(), 2);
    }

    #[test]
    fn test_empty_schema_row_size() {
        assert_eq!(SchemaSpec::default().get_row_size(), BASE_OVERHEAD);
    }

    #[test]
    fn test_row_size_sums_columns() {
        let schema = SchemaSpec::new(vec![
            ColumnSpec::new(ColumnType::INT, None),
            ColumnSpec::new(ColumnType::BOOLEAN, None),
            ColumnSpec::new(ColumnType::TEXT, Some(10)),
            ColumnSpec::new(ColumnType::DOUBLE, None),
        ]);
        assert_eq!(schema.get_row_size(), 20 + 4 + 1 + 12 + 8);
    }

    #[test]
    fn test_column_display() {
        let c = ColumnSpec::named("payload", ColumnType::VARCHAR, Some(64));
        assert_eq!(c.to_string(), "payload varchar(64)");
        assert_eq!(ColumnSpec::new(ColumnType::BIGINT, Some(3)).to_string(), "bigint");
    }
}
