use crate::utils::error::Result;

/// Where the catalog JSON documents are read from.
pub trait DataSource: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;

    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn cards_path(&self) -> &str;
    fn cylinders_path(&self) -> &str;
    fn image_base_url(&self) -> &str;
    fn image_extension(&self) -> &str;
    fn star_glyph(&self) -> &str;
}
