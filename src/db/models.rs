/// A persisted `short_code -> long_url` association.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
}
