//! Contents sent for printing.

/// A content accepted by the vendor.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Content {
    pub id: i64,
    /// Vendor-assigned content id.
    pub content_id: i64,
    pub memobird_id: String,
    pub is_printed: bool,
    pub created_at: i64,
}
