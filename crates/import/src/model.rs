use chrono::NaiveDateTime;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Canonical fields
// ---------------------------------------------------------------------------

/// The fixed set of asset attributes an import can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Code,
    Name,
    Building,
    Floor,
    Category,
    Space,
    Serial,
}

impl Field {
    /// All fields in canonical (template column) order.
    pub const ALL: [Field; 7] = [
        Field::Code,
        Field::Name,
        Field::Building,
        Field::Floor,
        Field::Category,
        Field::Space,
        Field::Serial,
    ];

    /// Fields that must be mapped for an import to start.
    pub const REQUIRED: [Field; 2] = [Field::Code, Field::Name];

    /// Spreadsheet header token recognized for this field (lower-case).
    pub fn header(&self) -> &'static str {
        match self {
            Self::Code => "codigo",
            Self::Name => "nombre",
            Self::Building => "edificio",
            Self::Floor => "nivel",
            Self::Category => "categoria",
            Self::Space => "espacio",
            Self::Serial => "serie",
        }
    }

    /// Reverse lookup of a cleaned (trimmed, lower-cased) header token.
    pub fn from_header(token: &str) -> Option<Field> {
        Self::ALL.iter().copied().find(|f| f.header() == token)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Name => write!(f, "name"),
            Self::Building => write!(f, "building"),
            Self::Floor => write!(f, "floor"),
            Self::Category => write!(f, "category"),
            Self::Space => write!(f, "space"),
            Self::Serial => write!(f, "serial"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sheet input
// ---------------------------------------------------------------------------

/// One raw spreadsheet value, as handed over by the sheet reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Float(f64),
    Int(i64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Error(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Textual representation of the cell, `None` for empty and error cells.
    ///
    /// Integral floats print without decimals so that numeric codes typed
    /// into a spreadsheet (`1001`) come back as `"1001"`, not `"1001.0"`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Float(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
            Cell::Int(n) => Some(n.to_string()),
            Cell::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Cell::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    Some(dt.format("%Y-%m-%d").to_string())
                } else {
                    Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
                }
            }
            // #DIV/0!, #N/A and friends never become a code or name
            Cell::Error(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Column map + normalized rows
// ---------------------------------------------------------------------------

/// Canonical field -> zero-based column index. Built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [Option<usize>; 7],
}

impl ColumnMap {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns[field.index()]
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub(crate) fn set(&mut self, field: Field, column: usize) {
        self.columns[field.index()] = Some(column);
    }

    /// Mapped fields with their columns, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, usize)> + '_ {
        Field::ALL
            .iter()
            .filter_map(move |f| self.get(*f).map(|col| (*f, col)))
    }
}

/// One data row after header mapping and trimming.
///
/// Missing column, blank cell and whitespace-only cell all end up as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    values: [Option<String>; 7],
}

impl NormalizedRow {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        self.values[field.index()] = value.filter(|v| !v.is_empty());
    }

    pub(crate) fn owned(&self, field: Field) -> Option<String> {
        self.values[field.index()].clone()
    }

    /// Rows without code or name are filler, not data.
    pub fn is_blank_filler(&self) -> bool {
        Field::REQUIRED.iter().any(|f| self.get(*f).is_none())
    }
}

// ---------------------------------------------------------------------------
// Asset record
// ---------------------------------------------------------------------------

/// Marker value for an active (not soft-deleted) record.
pub const ACTIVE: i64 = 0;

/// Asset record as persisted by an `AssetStore`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    /// Store surrogate key, `None` until persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub sync_id: String,
    pub code: String,
    pub name: String,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub category: Option<String>,
    pub space: Option<String>,
    pub serial: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
    /// Tri-state soft-delete marker; `None` only for legacy rows.
    pub deleted: Option<i64>,
}

impl Asset {
    /// Value of a canonical field, for export and display.
    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Code => Some(&self.code),
            Field::Name => Some(&self.name),
            Field::Building => self.building.as_deref(),
            Field::Floor => self.floor.as_deref(),
            Field::Category => self.category.as_deref(),
            Field::Space => self.space.as_deref(),
            Field::Serial => self.serial.as_deref(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.deleted.unwrap_or(ACTIVE) == ACTIVE
    }
}

/// Per-row result of the reconciliation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Created,
    Updated,
    Skipped,
    Errored,
}

impl std::fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Skipped => write!(f, "skipped"),
            Self::Errored => write!(f, "errored"),
        }
    }
}
