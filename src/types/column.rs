/// Metadata for one column of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    /// Owning table. The native client does not report it, so this is always `None`.
    pub table: Option<String>,
    /// Native type name, e.g. `VARCHAR2` or `NUMBER`.
    pub native_type: String,
    pub size: Option<u32>,
    pub scale: Option<i16>,
    pub precision: Option<u16>,
}
