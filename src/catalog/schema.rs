//! JSON Schema of the catalog item shape, served by `GET /schema` for the
//! external database viewer.

use serde_json::{json, Value};

use super::models::{default_formats, COLLECTION_NAME, MAX_RATING};

/// JSON Schema describing a stored catalog item.
pub fn catalog_item_schema() -> Value {
    json!({
        "title": "CharacterModel",
        "description": "3D character models for sale",
        "type": "object",
        "properties": {
            "name": { "title": "Name", "type": "string", "description": "Model name" },
            "description": {
                "title": "Description",
                "type": ["string", "null"],
                "default": null,
                "description": "Description of the model"
            },
            "price": {
                "title": "Price",
                "type": "number",
                "minimum": 0,
                "description": "Price in USD"
            },
            "thumbnail_url": {
                "title": "Thumbnail Url",
                "type": ["string", "null"],
                "format": "uri",
                "default": null,
                "description": "Thumbnail image URL"
            },
            "preview_url": {
                "title": "Preview Url",
                "type": ["string", "null"],
                "format": "uri",
                "default": null,
                "description": "Optional 3D viewer or video preview URL"
            },
            "tags": {
                "title": "Tags",
                "type": "array",
                "items": { "type": "string" },
                "description": "Tags like stylized, sci-fi, fantasy"
            },
            "formats": {
                "title": "Formats",
                "type": "array",
                "items": { "type": "string" },
                "default": default_formats(),
                "description": "Included file formats"
            },
            "polycount": {
                "title": "Polycount",
                "type": ["string", "null"],
                "default": null,
                "description": "Polycount info, e.g., 25k tris"
            },
            "rigged": {
                "title": "Rigged",
                "type": "boolean",
                "default": false,
                "description": "Whether rigging is included"
            },
            "animated": {
                "title": "Animated",
                "type": "boolean",
                "default": false,
                "description": "Whether animation clips are included"
            },
            "rating": {
                "title": "Rating",
                "type": ["number", "null"],
                "minimum": 0,
                "maximum": MAX_RATING,
                "default": null,
                "description": "Average rating 0-5"
            },
            "downloads": {
                "title": "Downloads",
                "type": "integer",
                "minimum": 0,
                "default": 0,
                "description": "Number of purchases/downloads"
            }
        },
        "required": ["name", "price"]
    })
}

/// Body of `GET /schema`.
pub fn collections_document() -> Value {
    json!({
        "collections": [
            {
                "name": COLLECTION_NAME,
                "schema": catalog_item_schema(),
            }
        ]
    })
}
