//! Test fixtures and constants.

use image::{ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use std::io::Cursor;

pub const API_KEY: &str = "test-api-key";
pub const ALBUM_NAME: &str = "Family";
pub const ALBUM_ID: &str = "7c1a0f6e-album";

/// Solid-color PNG
pub fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Body of `GET /api/albums`
pub fn album_list(albums: &[(&str, &str)]) -> Value {
    Value::Array(
        albums
            .iter()
            .map(|(id, name)| json!({ "id": id, "albumName": name, "assetCount": 0 }))
            .collect(),
    )
}

/// Album asset entry with an optional capture time
pub fn asset(id: &str, path: &str, taken: Option<&str>) -> Value {
    match taken {
        Some(ts) => json!({
            "id": id,
            "originalPath": path,
            "type": "IMAGE",
            "exifInfo": { "dateTimeOriginal": ts }
        }),
        None => json!({ "id": id, "originalPath": path, "type": "IMAGE" }),
    }
}

/// Body of `GET /api/albums/{id}`
pub fn album_detail(id: &str, name: &str, assets: Vec<Value>) -> Value {
    json!({ "id": id, "albumName": name, "assets": assets })
}
