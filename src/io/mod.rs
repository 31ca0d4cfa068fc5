use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fs;
use std::io;
use std::path::Path;

use crate::*;

mod core_types;
pub use core_types::*;

mod organizations;
pub use organizations::*;

mod output;
pub use output::*;

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
