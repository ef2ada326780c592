//! The fixed read statements served by the API.

/// One of the three read queries the API is allowed to run.
///
/// Filter values are bound as text exactly as the client sent them; SQLite
/// column affinity decides how they compare against stored keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing<'a> {
    /// Every row of `category`.
    Categories,

    /// Rows of `sub_category` belonging to one category.
    Subcategories { category_id: &'a str },

    /// Rows of `dua`, optionally restricted to one subcategory.
    Duas { subcategory_id: Option<&'a str> },
}

impl<'a> Listing<'a> {
    /// Plural name of what the listing returns, used in error messages.
    pub fn resource(&self) -> &'static str {
        match self {
            Listing::Categories => "categories",
            Listing::Subcategories { .. } => "subcategories",
            Listing::Duas { .. } => "duas",
        }
    }

    /// SQL text for the listing.
    pub fn sql(&self) -> &'static str {
        match self {
            Listing::Categories => "SELECT * FROM category",
            Listing::Subcategories { .. } => "SELECT * FROM sub_category WHERE cat_id = ?",
            Listing::Duas {
                subcategory_id: Some(_),
            } => "SELECT * FROM dua WHERE subcat_id = ?",
            Listing::Duas {
                subcategory_id: None,
            } => "SELECT * FROM dua",
        }
    }

    /// The single bound parameter, if the statement takes one.
    pub fn param(&self) -> Option<&'a str> {
        match *self {
            Listing::Categories => None,
            Listing::Subcategories { category_id } => Some(category_id),
            Listing::Duas { subcategory_id } => subcategory_id,
        }
    }
}
